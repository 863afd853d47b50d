//! Composition Root
//!
//! [`SiwsApp`] owns the wiring between the two sources and the reconciler:
//!
//! 1. resolves every element (fails fast when one is missing)
//! 2. subscribes the reconciler to both sources
//! 3. binds connected wallets to the auth source for signing
//! 4. renders the initial state
//!
//! Surfaces forward button clicks through [`SiwsApp::handle_action`].
//! Dropping the app unsubscribes from both sources.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, UiConfig};
use crate::display::UiState;
use crate::reconciler::{Reconciler, SessionContext};
use crate::registry::{
    ElementHandle, ElementName, ElementRegistry, ElementResolver, MissingElementError,
};
use crate::session::{AuthSession, WalletSession};
use crate::sources::Subscription;

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum StartupError {
    /// A required element is absent from the page
    #[error(transparent)]
    MissingElement(#[from] MissingElementError),

    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// User actions exposed by the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    /// Open the wallet selection menu
    Connect,
    /// Start signing in
    Login,
    /// Drop the identity
    Logout,
}

impl UiAction {
    /// All actions
    pub const ALL: [UiAction; 3] = [UiAction::Connect, UiAction::Login, UiAction::Logout];

    /// Button that triggers this action
    #[must_use]
    pub fn trigger(self) -> ElementName {
        match self {
            Self::Connect => ElementName::ConnectButton,
            Self::Login => ElementName::LoginButton,
            Self::Logout => ElementName::LogoutButton,
        }
    }
}

/// Running UI: reconciler plus live subscriptions
pub struct SiwsApp<H> {
    reconciler: Rc<Reconciler<H>>,
    context: SessionContext,
    _wallet_subscription: Subscription,
    _auth_subscription: Subscription,
}

impl<H: ElementHandle + 'static> SiwsApp<H> {
    /// Resolve elements, subscribe to both sources and render once
    pub fn start<R>(
        resolver: &R,
        context: SessionContext,
        config: &UiConfig,
    ) -> Result<Self, StartupError>
    where
        R: ElementResolver<Handle = H>,
    {
        config.validate()?;
        let elements = ElementRegistry::resolve_all(resolver, &config.selectors)?;
        let reconciler = Rc::new(Reconciler::new(
            elements,
            config.presentation(),
            context.clone(),
        ));

        let wallet_subscription = {
            let reconciler = Rc::clone(&reconciler);
            let auth = Rc::clone(&context.auth);
            context
                .wallet
                .subscribe(Box::new(move |session: &WalletSession| {
                    if let Some(adapter) = session {
                        tracing::debug!(wallet = %adapter.name, "Binding wallet to auth source");
                        auth.bind_wallet(adapter);
                    }
                    reconciler.on_wallet_change(session);
                }))
        };

        let auth_subscription = {
            let reconciler = Rc::clone(&reconciler);
            context.auth.subscribe(Box::new(move |auth: &AuthSession| {
                let state = reconciler.on_auth_change(auth);
                if let Some(error) = &state.error_text {
                    tracing::warn!(%error, "SIWS login failed");
                }
            }))
        };

        if let Some(adapter) = context.wallet.current_session() {
            context.auth.bind_wallet(&adapter);
        }

        let initial = reconciler.refresh();
        tracing::info!(phase = ?initial.phase(), "SIWS UI started");

        Ok(Self {
            reconciler,
            context,
            _wallet_subscription: wallet_subscription,
            _auth_subscription: auth_subscription,
        })
    }

    /// Forward a button click to the matching source
    pub fn handle_action(&self, action: UiAction) {
        tracing::info!(?action, "UI action");
        match action {
            UiAction::Connect => self.context.wallet.open_selection_menu(),
            UiAction::Login => self.context.auth.begin_login(),
            UiAction::Logout => self.context.auth.clear_session(),
        }
    }

    /// Recompute from the current snapshots
    pub fn refresh(&self) -> UiState {
        self.reconciler.refresh()
    }

    /// The reconciler driving the page
    #[must_use]
    pub fn reconciler(&self) -> &Reconciler<H> {
        &self.reconciler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryAuthSource, MemoryDocument, MemoryWalletSource};
    use crate::registry::Selectors;
    use crate::session::{PublicKey, WalletAdapter};

    #[test]
    fn test_actions_map_to_buttons() {
        assert_eq!(UiAction::Connect.trigger(), ElementName::ConnectButton);
        assert_eq!(UiAction::Login.trigger(), ElementName::LoginButton);
        assert_eq!(UiAction::Logout.trigger(), ElementName::LogoutButton);
    }

    #[test]
    fn test_start_fails_on_missing_element() {
        let doc = MemoryDocument::with_elements(&Selectors::default());
        doc.remove("#icPrincipal");
        let context = SessionContext::new(
            Rc::new(MemoryWalletSource::new()),
            Rc::new(MemoryAuthSource::new()),
        );

        let result = SiwsApp::start(&doc, context, &UiConfig::default());
        assert!(matches!(
            result,
            Err(StartupError::MissingElement(MissingElementError {
                name: ElementName::Principal,
                ..
            }))
        ));
    }

    #[test]
    fn test_start_binds_already_connected_wallet() {
        let doc = MemoryDocument::with_elements(&Selectors::default());
        let wallet = MemoryWalletSource::new();
        let adapter = WalletAdapter::connected("Backpack", PublicKey::new("4Nd1mYdQy9bqVw2M"));
        wallet.connect(adapter.clone());
        let auth = MemoryAuthSource::new();
        let context = SessionContext::new(Rc::new(wallet), Rc::new(auth.clone()));

        let app = SiwsApp::start(&doc, context, &UiConfig::default()).unwrap();

        assert_eq!(auth.bound_wallet(), Some(adapter));
        assert!(app.refresh().show_login);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let doc = MemoryDocument::with_elements(&Selectors::default());
        let wallet = MemoryWalletSource::new();
        let auth = MemoryAuthSource::new();
        let context = SessionContext::new(Rc::new(wallet.clone()), Rc::new(auth.clone()));

        let app = SiwsApp::start(&doc, context, &UiConfig::default()).unwrap();
        drop(app);

        let before = doc.snapshot();
        wallet.connect(WalletAdapter::connected("Phantom", PublicKey::new("Gh7xQ1pLmN9zT3kR")));
        assert_eq!(doc.snapshot(), before);
    }
}
