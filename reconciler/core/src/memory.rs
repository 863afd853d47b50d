//! In-memory surface
//!
//! Headless stand-ins for the browser used by the demo and tests:
//!
//! - [`MemoryDocument`]: an [`ElementResolver`] whose elements record the last
//!   text, visibility and disabled flag written to them
//! - [`MemoryWalletSource`] / [`MemoryAuthSource`]: sources backed by a
//!   [`SnapshotStore`] that the caller drives directly

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::Rc;

use serde::Serialize;

use crate::config::UiConfig;
use crate::registry::{ElementHandle, ElementName, ElementResolver, Selectors};
use crate::session::{AuthSession, WalletAdapter, WalletSession};
use crate::sources::{AuthCallback, AuthSource, Subscription, WalletCallback, WalletSource};
use crate::store::SnapshotStore;

/// Observable condition of one element
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementState {
    /// Selector the element is registered under
    pub selector: String,
    /// Text content
    pub text: String,
    /// Whether the element is displayed
    pub visible: bool,
    /// Whether the element is disabled
    pub disabled: bool,
}

/// Handle to an element of a [`MemoryDocument`]
#[derive(Clone, Debug)]
pub struct MemoryElement {
    node: Rc<RefCell<ElementState>>,
}

impl MemoryElement {
    /// Selector this element answers to
    #[must_use]
    pub fn selector(&self) -> String {
        self.node.borrow().selector.clone()
    }

    /// Copy of the current state
    #[must_use]
    pub fn state(&self) -> ElementState {
        self.node.borrow().clone()
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> String {
        self.node.borrow().text.clone()
    }

    /// Whether the element is displayed
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.node.borrow().visible
    }

    /// Whether the element is disabled
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.node.borrow().disabled
    }
}

impl ElementHandle for MemoryElement {
    fn set_text(&self, text: &str) {
        let mut node = self.node.borrow_mut();
        if node.text != text {
            node.text = text.to_string();
        }
    }

    fn set_visible(&self, visible: bool) {
        self.node.borrow_mut().visible = visible;
    }

    fn set_disabled(&self, disabled: bool) {
        self.node.borrow_mut().disabled = disabled;
    }
}

/// Headless document holding elements in insertion order
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    elements: Rc<RefCell<Vec<MemoryElement>>>,
}

impl MemoryDocument {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document containing every managed element in its initial markup state
    #[must_use]
    pub fn with_elements(selectors: &Selectors) -> Self {
        Self::from_config(&UiConfig {
            selectors: selectors.clone(),
            ..UiConfig::default()
        })
    }

    /// Document matching the markup rendered for `config`
    #[must_use]
    pub fn from_config(config: &UiConfig) -> Self {
        let doc = Self::new();
        for name in ElementName::ALL {
            let (text, visible) = match name {
                ElementName::AppContainer => ("", true),
                ElementName::ConnectButton => (config.markup.connect_label.as_str(), true),
                ElementName::LoginButton => (config.labels.login.as_str(), false),
                ElementName::LogoutButton => (config.markup.logout_label.as_str(), false),
                ElementName::WalletAddress | ElementName::Principal | ElementName::ErrorBanner => {
                    ("", false)
                }
            };
            doc.insert(ElementState {
                selector: config.selectors.selector(name).to_string(),
                text: text.to_string(),
                visible,
                disabled: false,
            });
        }
        doc
    }

    /// Add an element, replacing any with the same selector
    pub fn insert(&self, state: ElementState) -> MemoryElement {
        self.remove(&state.selector);
        let element = MemoryElement {
            node: Rc::new(RefCell::new(state)),
        };
        self.elements.borrow_mut().push(element.clone());
        element
    }

    /// Remove the element registered under `selector`
    pub fn remove(&self, selector: &str) -> bool {
        let mut elements = self.elements.borrow_mut();
        let before = elements.len();
        elements.retain(|e| e.node.borrow().selector != selector);
        elements.len() != before
    }

    /// State of every element, in insertion order
    #[must_use]
    pub fn snapshot(&self) -> Vec<ElementState> {
        self.elements.borrow().iter().map(MemoryElement::state).collect()
    }

    /// One line per visible element
    #[must_use]
    pub fn render_text(&self) -> String {
        render_elements(&self.snapshot())
    }
}

/// One line per visible, non-empty element
#[must_use]
pub fn render_elements(elements: &[ElementState]) -> String {
    let mut out = String::new();
    for state in elements {
        if !state.visible || state.text.is_empty() {
            continue;
        }
        let suffix = if state.disabled { " (disabled)" } else { "" };
        let _ = writeln!(out, "{:<16} {}{}", state.selector, state.text, suffix);
    }
    out
}

impl ElementResolver for MemoryDocument {
    type Handle = MemoryElement;

    fn lookup(&self, selector: &str) -> Option<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.node.borrow().selector == selector)
            .cloned()
    }
}

/// Wallet source driven by the caller
#[derive(Clone)]
pub struct MemoryWalletSource {
    session: SnapshotStore<WalletSession>,
    menu_opened: Rc<Cell<usize>>,
}

impl Default for MemoryWalletSource {
    fn default() -> Self {
        Self {
            session: SnapshotStore::new(None),
            menu_opened: Rc::new(Cell::new(0)),
        }
    }
}

impl MemoryWalletSource {
    /// Source with no wallet connected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `adapter` (or switch to it)
    pub fn connect(&self, adapter: WalletAdapter) {
        self.session.set(Some(adapter));
    }

    /// Disconnect the wallet
    pub fn disconnect(&self) {
        self.session.set(None);
    }

    /// How often the selection menu was requested
    #[must_use]
    pub fn menu_opened(&self) -> usize {
        self.menu_opened.get()
    }
}

impl WalletSource for MemoryWalletSource {
    fn current_session(&self) -> WalletSession {
        self.session.get()
    }

    fn subscribe(&self, mut callback: WalletCallback) -> Subscription {
        self.session.subscribe(move |session| callback(session))
    }

    fn open_selection_menu(&self) {
        self.menu_opened.set(self.menu_opened.get() + 1);
    }
}

/// Auth source driven by the caller
///
/// `begin_login` only records the request; tests push the resulting
/// transitions with [`MemoryAuthSource::set`].
#[derive(Clone)]
pub struct MemoryAuthSource {
    state: SnapshotStore<AuthSession>,
    bound_wallet: Rc<RefCell<Option<WalletAdapter>>>,
    login_requests: Rc<Cell<usize>>,
}

impl Default for MemoryAuthSource {
    fn default() -> Self {
        Self {
            state: SnapshotStore::new(AuthSession::default()),
            bound_wallet: Rc::new(RefCell::new(None)),
            login_requests: Rc::new(Cell::new(0)),
        }
    }
}

impl MemoryAuthSource {
    /// Idle source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a new snapshot
    pub fn set(&self, auth: AuthSession) {
        self.state.set(auth);
    }

    /// Adapter last passed to `bind_wallet`
    #[must_use]
    pub fn bound_wallet(&self) -> Option<WalletAdapter> {
        self.bound_wallet.borrow().clone()
    }

    /// How often a login was requested
    #[must_use]
    pub fn login_requests(&self) -> usize {
        self.login_requests.get()
    }
}

impl AuthSource for MemoryAuthSource {
    fn snapshot(&self) -> AuthSession {
        self.state.get()
    }

    fn subscribe(&self, mut callback: AuthCallback) -> Subscription {
        self.state.subscribe(move |auth| callback(auth))
    }

    fn begin_login(&self) {
        self.login_requests.set(self.login_requests.get() + 1);
    }

    fn clear_session(&self) {
        self.state.set(AuthSession::default());
    }

    fn bind_wallet(&self, adapter: &WalletAdapter) {
        *self.bound_wallet.borrow_mut() = Some(adapter.clone());
    }
}


#[cfg(test)]
mod source_tests {
    use super::*;
    use crate::session::{Identity, PublicKey};

    #[test]
    fn test_wallet_source_notifies() {
        let source = MemoryWalletSource::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = source.subscribe(Box::new(move |session: &WalletSession| {
            s.borrow_mut().push(session.is_some());
        }));

        source.connect(WalletAdapter::connected("Phantom", PublicKey::new("key")));
        source.disconnect();

        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(source.current_session().is_none());
    }

    #[test]
    fn test_auth_source_clear_resets() {
        let source = MemoryAuthSource::new();
        source.set(AuthSession {
            identity: Some(Identity::new("2vxsx-fae")),
            ..Default::default()
        });
        source.clear_session();
        assert_eq!(source.snapshot(), AuthSession::default());
    }
}
