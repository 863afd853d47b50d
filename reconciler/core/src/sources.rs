//! External Session Sources
//!
//! The reconciler consumes two push-based sources it does not own:
//!
//! - [`WalletSource`]: wallet connection state (connect, disconnect, account switch)
//! - [`AuthSource`]: the Sign in with Solana state machine
//!
//! Surfaces implement these traits over whatever actually provides the state
//! (JS libraries in the browser, simulations in the demo, stores in tests).
//! Subscriptions return a [`Subscription`] guard; dropping it unsubscribes.

use std::fmt;

use crate::session::{AuthSession, WalletAdapter, WalletSession};

/// Callback invoked with every new wallet session
pub type WalletCallback = Box<dyn FnMut(&WalletSession)>;

/// Callback invoked with every new auth snapshot
pub type AuthCallback = Box<dyn FnMut(&AuthSession)>;

/// Wallet connection source
pub trait WalletSource {
    /// Current connection, `None` when no wallet is connected
    fn current_session(&self) -> WalletSession;

    /// Register for connection changes
    fn subscribe(&self, callback: WalletCallback) -> Subscription;

    /// Open the wallet selection menu (user initiated)
    fn open_selection_menu(&self);
}

/// Sign in with Solana state machine
pub trait AuthSource {
    /// Latest state machine context
    fn snapshot(&self) -> AuthSession;

    /// Register for state transitions
    fn subscribe(&self, callback: AuthCallback) -> Subscription;

    /// Start the prepare, sign, login sequence
    fn begin_login(&self);

    /// Drop the current identity
    fn clear_session(&self);

    /// Use `adapter` for signing in subsequent logins
    fn bind_wallet(&self, adapter: &WalletAdapter);
}

/// Unsubscribe guard
///
/// Unsubscribes when dropped or when [`Subscription::unsubscribe`] is called.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Guard that runs `unsubscribe` once
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Guard for a source that cannot unsubscribe
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }

    /// Unsubscribe now
    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
