//! SIWS Web - browser surface for the Sign in with Solana demo
//!
//! Renders the static page into `#app`, resolves the managed elements, wires
//! `solana-connect` and `ic-siws-js` into the reconciler and forwards button
//! clicks.
//!
//! ```js
//! import init, { SiwsPage } from "siws-web";
//!
//! await init();
//! const page = new SiwsPage(canisterId);
//! ```

pub mod bindings;
pub mod convert;
pub mod dom;
pub mod sources;

use std::rc::Rc;

use siws_ui_core::{
    parse_config, render_static_content, resolve, ElementName, SessionContext, SiwsApp, UiAction,
    UiConfig,
};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement};

use crate::bindings::SolanaConnect;
use crate::dom::{DomDocument, DomElement};
use crate::sources::{JsSiws, JsWallet};

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("SIWS web surface loaded");
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A mounted login page
///
/// Keep the value alive for as long as the page should react; freeing it
/// removes the click listeners and unsubscribes from both sources.
#[wasm_bindgen]
pub struct SiwsPage {
    app: Rc<SiwsApp<DomElement>>,
    listeners: Vec<(HtmlElement, Closure<dyn FnMut(Event)>)>,
}

#[wasm_bindgen]
impl SiwsPage {
    /// Mount with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canister_id: &str) -> Result<SiwsPage, JsValue> {
        mount(canister_id, &UiConfig::default())
    }

    /// Mount with a TOML configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canister_id: &str, config_toml: &str) -> Result<SiwsPage, JsValue> {
        let config = parse_config(config_toml).map_err(to_js)?;
        mount(canister_id, &config)
    }

    /// Re-render from the current source snapshots
    pub fn refresh(&self) {
        self.app.refresh();
    }
}

impl Drop for SiwsPage {
    fn drop(&mut self) {
        for (element, listener) in &self.listeners {
            let _ = element
                .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref());
        }
    }
}

fn mount(canister_id: &str, config: &UiConfig) -> Result<SiwsPage, JsValue> {
    let window = web_sys::window().ok_or_else(|| to_js("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| to_js("No document available"))?;
    let dom = DomDocument::new(document);

    let container =
        resolve(&dom, &config.selectors, ElementName::AppContainer).map_err(to_js)?;
    container.set_inner_html(&render_static_content(config));

    let connect = SolanaConnect::new();
    let wallet = Rc::new(JsWallet::new(connect.clone()));
    let siws = Rc::new(JsSiws::new(canister_id, connect));
    let context = SessionContext::new(wallet, siws);

    let app = Rc::new(SiwsApp::start(&dom, context, config).map_err(|e| {
        tracing::error!(error = %e, "SIWS UI failed to start");
        to_js(e)
    })?);

    let mut listeners = Vec::with_capacity(UiAction::ALL.len());
    for action in UiAction::ALL {
        let button = app.reconciler().elements().get(action.trigger()).element().clone();
        let handler = {
            let app = Rc::clone(&app);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| app.handle_action(action))
        };
        button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        listeners.push((button, handler));
    }

    tracing::info!(canister_id, "SIWS page mounted");
    Ok(SiwsPage { app, listeners })
}
