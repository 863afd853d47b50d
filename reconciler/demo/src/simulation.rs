//! Simulated Sources
//!
//! Stand-ins for the wallet adapter and the SIWS state machine so the
//! reconciler can be exercised without a browser.
//!
//! The SIWS simulation advances one stage per [`SimulatedSiws::advance`] call:
//!
//! ```text
//! begin_login ──► Preparing ──► Signing ──► LoggingIn ──► LoggedIn
//!                     │                         │
//!                     └─► prepare error         └─► login error
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use siws_ui_core::{
    AuthCallback, AuthSession, AuthSource, Identity, LoginStatus, PrepareStatus, PublicKey,
    SignStatus, SnapshotStore, Subscription, WalletAdapter, WalletCallback, WalletSession,
    WalletSource,
};

/// Wallet source with a fixed list of installed wallets
#[derive(Clone)]
pub struct SimulatedWallet {
    session: SnapshotStore<WalletSession>,
    installed: Rc<Vec<WalletAdapter>>,
}

impl SimulatedWallet {
    /// Wallet source offering `installed` in its selection menu
    pub fn new(installed: Vec<WalletAdapter>) -> Self {
        Self {
            session: SnapshotStore::new(None),
            installed: Rc::new(installed),
        }
    }

    /// Connect a specific adapter
    pub fn connect(&self, adapter: WalletAdapter) {
        tracing::info!(wallet = %adapter.name, "Wallet connected");
        self.session.set(Some(adapter));
    }

    /// Disconnect the current wallet
    pub fn disconnect(&self) {
        tracing::info!("Wallet disconnected");
        self.session.set(None);
    }

    /// Switch the connected wallet to another account
    pub fn switch_account(&self, public_key: PublicKey) {
        let Some(mut adapter) = self.session.get() else {
            tracing::warn!("Account switch ignored: no wallet connected");
            return;
        };
        adapter.public_key = Some(public_key);
        self.session.set(Some(adapter));
    }
}

impl WalletSource for SimulatedWallet {
    fn current_session(&self) -> WalletSession {
        self.session.get()
    }

    fn subscribe(&self, mut callback: WalletCallback) -> Subscription {
        self.session.subscribe(move |session| callback(session))
    }

    /// The simulated user always picks the first installed wallet
    fn open_selection_menu(&self) {
        match self.installed.first() {
            Some(adapter) => self.connect(adapter.clone()),
            None => tracing::warn!("No wallets installed"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Preparing,
    Signing,
    LoggingIn,
}

#[derive(Default)]
struct Flow {
    stage: Option<Stage>,
    wallet: Option<WalletAdapter>,
    fail_next_prepare: bool,
    fail_next_login: bool,
}

/// Stepwise simulation of the SIWS login state machine
#[derive(Clone)]
pub struct SimulatedSiws {
    state: SnapshotStore<AuthSession>,
    flow: Rc<RefCell<Flow>>,
}

impl Default for SimulatedSiws {
    fn default() -> Self {
        Self {
            state: SnapshotStore::new(AuthSession::default()),
            flow: Rc::new(RefCell::new(Flow::default())),
        }
    }
}

impl SimulatedSiws {
    /// Idle state machine
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next preparation fail
    pub fn fail_next_prepare(&self) {
        self.flow.borrow_mut().fail_next_prepare = true;
    }

    /// Make the next login call fail
    pub fn fail_next_login(&self) {
        self.flow.borrow_mut().fail_next_login = true;
    }

    /// Whether a login is in flight
    pub fn in_flight(&self) -> bool {
        self.flow.borrow().stage.is_some()
    }

    /// Move the in-flight login one stage forward
    ///
    /// Returns false when nothing was in flight.
    pub fn advance(&self) -> bool {
        let (stage, next) = {
            let mut flow = self.flow.borrow_mut();
            let Some(stage) = flow.stage else {
                return false;
            };
            let mut next = self.state.get();
            match stage {
                Stage::Preparing if std::mem::take(&mut flow.fail_next_prepare) => {
                    next.prepare_status = PrepareStatus::Error;
                    next.prepare_error =
                        Some("Prepare login failed: canister rejected the request".to_string());
                    flow.stage = None;
                }
                Stage::Preparing => {
                    next.prepare_status = PrepareStatus::Idle;
                    next.sign_status = SignStatus::Pending;
                    flow.stage = Some(Stage::Signing);
                }
                Stage::Signing => {
                    next.sign_status = SignStatus::Idle;
                    next.login_status = LoginStatus::LoggingIn;
                    flow.stage = Some(Stage::LoggingIn);
                }
                Stage::LoggingIn if std::mem::take(&mut flow.fail_next_login) => {
                    next.login_status = LoginStatus::Error;
                    next.login_error =
                        Some("Login failed: signature verification failed".to_string());
                    flow.stage = None;
                }
                Stage::LoggingIn => {
                    let key = flow
                        .wallet
                        .as_ref()
                        .and_then(|w| w.public_key.as_ref())
                        .map(PublicKey::as_str)
                        .unwrap_or_default();
                    next.login_status = LoginStatus::LoggedIn;
                    next.identity = Some(Identity::new(principal_for(key)));
                    flow.stage = None;
                }
            }
            (stage, next)
        };

        tracing::debug!(?stage, "SIWS stage complete");
        self.state.set(next);
        true
    }
}

impl AuthSource for SimulatedSiws {
    fn snapshot(&self) -> AuthSession {
        self.state.get()
    }

    fn subscribe(&self, mut callback: AuthCallback) -> Subscription {
        self.state.subscribe(move |auth| callback(auth))
    }

    fn begin_login(&self) {
        {
            let mut flow = self.flow.borrow_mut();
            if flow.stage.is_some() {
                tracing::debug!("Login already in flight");
                return;
            }
            if flow.wallet.is_none() {
                drop(flow);
                tracing::warn!("Login requested without a bound wallet");
                self.state.update(|auth| {
                    auth.prepare_status = PrepareStatus::Error;
                    auth.prepare_error = Some("No wallet bound for signing".to_string());
                });
                return;
            }
            flow.stage = Some(Stage::Preparing);
        }

        self.state.set(AuthSession {
            prepare_status: PrepareStatus::Preparing,
            ..AuthSession::default()
        });
    }

    fn clear_session(&self) {
        self.flow.borrow_mut().stage = None;
        self.state.set(AuthSession::default());
    }

    fn bind_wallet(&self, adapter: &WalletAdapter) {
        self.flow.borrow_mut().wallet = Some(adapter.clone());
    }
}

/// Deterministic stand-in principal for a wallet key
fn principal_for(public_key: &str) -> String {
    let mut chars: Vec<char> = public_key
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(25)
        .collect();
    while chars.len() < 25 {
        chars.push('a');
    }
    let groups: Vec<String> = chars.chunks(5).map(|g| g.iter().collect()).collect();
    format!("{}-cai", groups.join("-"))
}
