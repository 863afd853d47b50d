//! UI Reconciler
//!
//! Mirrors the wallet and auth sources into the page. Every notification,
//! from either source, recomputes the full [`UiState`] from the latest pair of
//! snapshots and writes all of it. There is no incremental patching and no
//! history: a repeated or out-of-order notification just produces the same
//! page again.
//!
//! The reconciler owns nothing but the element handles resolved at startup.
//! The sources are reached through the injected [`SessionContext`].

use std::rc::Rc;

use crate::display::{Presentation, UiState};
use crate::registry::{ElementHandle, ElementRegistry};
use crate::session::{AuthSession, WalletSession};
use crate::sources::{AuthSource, WalletSource};

/// The two external sources, shared by the composition root and the reconciler
#[derive(Clone)]
pub struct SessionContext {
    /// Wallet connection source
    pub wallet: Rc<dyn WalletSource>,
    /// SIWS state machine
    pub auth: Rc<dyn AuthSource>,
}

impl SessionContext {
    /// Bundle the two sources
    pub fn new(wallet: Rc<dyn WalletSource>, auth: Rc<dyn AuthSource>) -> Self {
        Self { wallet, auth }
    }

    /// Latest snapshot of both sources
    #[must_use]
    pub fn snapshot(&self) -> (WalletSession, AuthSession) {
        (self.wallet.current_session(), self.auth.snapshot())
    }
}

/// Recomputes and applies the UI on every source notification
pub struct Reconciler<H> {
    elements: ElementRegistry<H>,
    presentation: Presentation,
    context: SessionContext,
}

impl<H: ElementHandle> Reconciler<H> {
    /// Create a reconciler over resolved elements
    pub fn new(
        elements: ElementRegistry<H>,
        presentation: Presentation,
        context: SessionContext,
    ) -> Self {
        Self {
            elements,
            presentation,
            context,
        }
    }

    /// Resolved element handles
    #[must_use]
    pub fn elements(&self) -> &ElementRegistry<H> {
        &self.elements
    }

    /// Wallet connected, disconnected or switched account
    pub fn on_wallet_change(&self, wallet: &WalletSession) -> UiState {
        let auth = self.context.auth.snapshot();
        self.reconcile(wallet, &auth)
    }

    /// Auth state machine transitioned
    pub fn on_auth_change(&self, auth: &AuthSession) -> UiState {
        let wallet = self.context.wallet.current_session();
        self.reconcile(&wallet, auth)
    }

    /// Recompute from the sources' current snapshots
    pub fn refresh(&self) -> UiState {
        let (wallet, auth) = self.context.snapshot();
        self.reconcile(&wallet, &auth)
    }

    /// Pure derivation with this reconciler's presentation
    #[must_use]
    pub fn compute_ui_state(&self, wallet: &WalletSession, auth: &AuthSession) -> UiState {
        self.presentation.derive(wallet, auth)
    }

    /// Write `state` to every element
    ///
    /// All fields are written unconditionally, so applying the same state
    /// twice leaves the page exactly as applying it once.
    pub fn apply(&self, state: &UiState) {
        let e = &self.elements;

        e.login_button.set_text(&state.login_button_label);
        e.login_button.set_disabled(state.login_button_disabled);

        e.connect_button.set_visible(state.show_connect);
        e.login_button.set_visible(state.show_login);
        e.logout_button.set_visible(state.show_logout);

        e.wallet_address.set_text(&state.wallet_address_text);
        e.wallet_address.set_visible(state.show_wallet_address);

        e.principal.set_text(&state.principal_text);
        e.principal.set_visible(state.show_principal);

        e.error_banner
            .set_text(state.error_text.as_deref().unwrap_or_default());
        e.error_banner.set_visible(state.error_text.is_some());
    }

    fn reconcile(&self, wallet: &WalletSession, auth: &AuthSession) -> UiState {
        let state = self.compute_ui_state(wallet, auth);
        tracing::debug!(
            phase = ?state.phase(),
            label = %state.login_button_label,
            disabled = state.login_button_disabled,
            error = state.error_text.as_deref().unwrap_or(""),
            "Reconciling UI"
        );
        self.apply(&state);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::ConnectionPhase;
    use crate::memory::{ElementState, MemoryAuthSource, MemoryDocument, MemoryWalletSource};
    use crate::registry::Selectors;
    use crate::session::{Identity, LoginStatus, PrepareStatus, PublicKey, WalletAdapter};
    use pretty_assertions::assert_eq;

    struct Fixture {
        doc: MemoryDocument,
        wallet: MemoryWalletSource,
        auth: MemoryAuthSource,
        reconciler: Reconciler<crate::memory::MemoryElement>,
    }

    fn fixture() -> Fixture {
        let selectors = Selectors::default();
        let doc = MemoryDocument::with_elements(&selectors);
        let wallet = MemoryWalletSource::new();
        let auth = MemoryAuthSource::new();
        let context = SessionContext::new(Rc::new(wallet.clone()), Rc::new(auth.clone()));
        let elements = ElementRegistry::resolve_all(&doc, &selectors).unwrap();
        let reconciler = Reconciler::new(elements, Presentation::default(), context);
        Fixture {
            doc,
            wallet,
            auth,
            reconciler,
        }
    }

    fn phantom() -> WalletAdapter {
        WalletAdapter::connected("Phantom", PublicKey::new("Gh7xQ1pLmN9zT3kR"))
    }

    fn state_of(doc: &MemoryDocument, selector: &str) -> ElementState {
        doc.snapshot()
            .into_iter()
            .find(|s| s.selector == selector)
            .unwrap()
    }

    #[test]
    fn test_wallet_change_reads_latest_auth() {
        let f = fixture();
        f.auth.set(AuthSession {
            identity: Some(Identity::new("2vxsx-fae")),
            ..Default::default()
        });

        let state = f.reconciler.on_wallet_change(&Some(phantom()));

        assert_eq!(state.phase(), ConnectionPhase::ConnectedWithIdentity);
        assert!(state_of(&f.doc, "#logoutButton").visible);
        assert!(!state_of(&f.doc, "#connectButton").visible);
    }

    #[test]
    fn test_auth_change_reads_latest_wallet() {
        let f = fixture();
        f.wallet.connect(phantom());

        let auth = AuthSession {
            prepare_status: PrepareStatus::Preparing,
            ..Default::default()
        };
        f.reconciler.on_auth_change(&auth);

        let login = state_of(&f.doc, "#loginButton");
        assert!(login.visible);
        assert!(login.disabled);
        assert_eq!(login.text, "Preparing...");
        assert_eq!(state_of(&f.doc, "#solPubKey").text, "Gh7x...T3kR");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let f = fixture();
        f.wallet.connect(phantom());
        f.auth.set(AuthSession {
            login_status: LoginStatus::Error,
            login_error: Some("User rejected the request".to_string()),
            ..Default::default()
        });

        let state = f.reconciler.refresh();
        let once = f.doc.snapshot();
        f.reconciler.apply(&state);
        f.reconciler.apply(&state);

        assert_eq!(f.doc.snapshot(), once);
        let banner = state_of(&f.doc, "#error");
        assert!(banner.visible);
        assert_eq!(banner.text, "User rejected the request");
    }

    #[test]
    fn test_notification_order_does_not_matter() {
        let identity = AuthSession {
            login_status: LoginStatus::LoggedIn,
            identity: Some(Identity::new("rdmx6-jaaaa-aaaaa-aaadq-cai")),
            ..Default::default()
        };

        let a = fixture();
        a.wallet.connect(phantom());
        a.reconciler.on_wallet_change(&Some(phantom()));
        a.auth.set(identity.clone());
        a.reconciler.on_auth_change(&identity);

        let b = fixture();
        b.auth.set(identity.clone());
        b.reconciler.on_auth_change(&identity);
        b.wallet.connect(phantom());
        b.reconciler.on_wallet_change(&Some(phantom()));
        b.reconciler.on_wallet_change(&Some(phantom()));

        assert_eq!(a.doc.snapshot(), b.doc.snapshot());
        assert!(state_of(&a.doc, "#logoutButton").visible);
        assert_eq!(state_of(&a.doc, "#icPrincipal").text, "rdmx...-cai");
    }

    #[test]
    fn test_absent_wallet_without_prior_session_is_noop() {
        let f = fixture();
        let before = f.reconciler.refresh();
        let snapshot = f.doc.snapshot();

        let after = f.reconciler.on_wallet_change(&None);

        assert_eq!(before, after);
        assert_eq!(f.doc.snapshot(), snapshot);
    }

    #[test]
    fn test_disconnect_hides_address() {
        let f = fixture();
        f.wallet.connect(phantom());
        f.reconciler.refresh();
        assert!(state_of(&f.doc, "#solPubKey").visible);

        f.wallet.disconnect();
        f.reconciler.on_wallet_change(&None);

        let address = state_of(&f.doc, "#solPubKey");
        assert!(!address.visible);
        assert_eq!(address.text, "");
        assert!(state_of(&f.doc, "#connectButton").visible);
    }
}
