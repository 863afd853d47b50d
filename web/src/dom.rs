//! DOM element handles

use siws_ui_core::{ElementHandle, ElementResolver};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

/// A DOM element managed by the reconciler
#[derive(Clone, Debug)]
pub struct DomElement {
    element: HtmlElement,
}

impl DomElement {
    /// Underlying element
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    /// Replace the element's children with `html`
    pub fn set_inner_html(&self, html: &str) {
        self.element.set_inner_html(html);
    }
}

impl ElementHandle for DomElement {
    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_visible(&self, visible: bool) {
        let display = if visible { "" } else { "none" };
        if let Err(e) = self.element.style().set_property("display", display) {
            tracing::warn!(error = ?e, "Failed to set display");
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.element.set_attribute("aria-disabled", "true");
        } else {
            let _ = self.element.remove_attribute("aria-disabled");
        }
    }
}

/// Resolves elements with `querySelector`
pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    /// Wrap a document
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ElementResolver for DomDocument {
    type Handle = DomElement;

    fn lookup(&self, selector: &str) -> Option<DomElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(|element| DomElement { element })
    }
}
