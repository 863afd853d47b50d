//! Display State
//!
//! The derived view of the two session snapshots. Nothing in here is stored:
//! [`UiState`] is recomputed from the latest `(WalletSession, AuthSession)`
//! pair on every notification, so the result never depends on the order in
//! which the two sources fired.
//!
//! # Visibility
//!
//! The three action buttons are driven by a single [`ConnectionPhase`], which
//! makes "exactly one of connect/login/logout is visible" hold by
//! construction:
//!
//! | wallet | identity | phase                   | visible button |
//! |--------|----------|-------------------------|----------------|
//! | no     | any      | `Disconnected`          | connect        |
//! | yes    | no       | `ConnectedNoIdentity`   | login          |
//! | yes    | yes      | `ConnectedWithIdentity` | logout         |
//!
//! # Login button label
//!
//! First match wins: preparing, logging in, signing, otherwise "Login".

use serde::{Deserialize, Serialize};

use crate::session::{AuthSession, LoginStatus, PrepareStatus, SignStatus, WalletSession};

/// Which action the user can take next
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    /// No wallet connected
    Disconnected,
    /// Wallet connected, not signed in
    ConnectedNoIdentity,
    /// Wallet connected and signed in
    ConnectedWithIdentity,
}

impl ConnectionPhase {
    /// Phase for the current snapshots
    #[must_use]
    pub fn from_snapshot(wallet: &WalletSession, auth: &AuthSession) -> Self {
        match (wallet.is_some(), auth.identity.is_some()) {
            (false, _) => Self::Disconnected,
            (true, false) => Self::ConnectedNoIdentity,
            (true, true) => Self::ConnectedWithIdentity,
        }
    }
}

/// Login button labels for each stage of the flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginLabels {
    /// Idle label
    pub login: String,
    /// Shown while the login message is prepared
    pub preparing: String,
    /// Shown while the login call is in flight
    pub logging_in: String,
    /// Shown while the wallet is asked to sign
    pub signing: String,
}

impl Default for LoginLabels {
    fn default() -> Self {
        Self {
            login: "Login".to_string(),
            preparing: "Preparing...".to_string(),
            logging_in: "Logging in...".to_string(),
            signing: "Signing message...".to_string(),
        }
    }
}

/// How long identifiers are shortened for display
///
/// Identifiers with at least `head + tail` characters are shown as
/// `head chars + "..." + tail chars`. Shorter identifiers are shown whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationPolicy {
    /// Leading characters kept
    pub head: usize,
    /// Trailing characters kept
    pub tail: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self { head: 4, tail: 4 }
    }
}

impl TruncationPolicy {
    /// Shorten `id` for display
    #[must_use]
    pub fn apply(&self, id: &str) -> String {
        let len = id.chars().count();
        if len < self.head.saturating_add(self.tail) {
            return id.to_string();
        }
        let head: String = id.chars().take(self.head).collect();
        let tail: String = id.chars().skip(len - self.tail).collect();
        format!("{head}...{tail}")
    }
}

/// Shorten `id` with the default 4 + 4 policy
#[must_use]
pub fn truncate_middle(id: &str) -> String {
    TruncationPolicy::default().apply(id)
}

/// Everything the reconciler writes to the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// Login button text
    pub login_button_label: String,
    /// Whether the login button is disabled
    pub login_button_disabled: bool,
    /// Connect button visibility
    pub show_connect: bool,
    /// Login button visibility
    pub show_login: bool,
    /// Logout button visibility
    pub show_logout: bool,
    /// Wallet address label visibility
    pub show_wallet_address: bool,
    /// Truncated wallet address, empty when hidden
    pub wallet_address_text: String,
    /// Principal label visibility
    pub show_principal: bool,
    /// Truncated principal, empty when hidden
    pub principal_text: String,
    /// Error banner text; the banner is visible iff present
    pub error_text: Option<String>,
}

impl UiState {
    /// Phase the visibility flags encode
    #[must_use]
    pub fn phase(&self) -> ConnectionPhase {
        if self.show_logout {
            ConnectionPhase::ConnectedWithIdentity
        } else if self.show_login {
            ConnectionPhase::ConnectedNoIdentity
        } else {
            ConnectionPhase::Disconnected
        }
    }
}

/// Text and formatting settings used when deriving [`UiState`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    /// Login button labels
    pub labels: LoginLabels,
    /// Identifier shortening
    pub truncation: TruncationPolicy,
}

impl Presentation {
    /// Derive the UI for a pair of snapshots
    ///
    /// Pure and total: identical inputs always give identical output.
    #[must_use]
    pub fn derive(&self, wallet: &WalletSession, auth: &AuthSession) -> UiState {
        let phase = ConnectionPhase::from_snapshot(wallet, auth);
        let (label, disabled) = self.login_label(auth);

        let public_key = wallet
            .as_ref()
            .and_then(|adapter| adapter.public_key.as_ref());
        let wallet_address_text = public_key
            .map(|key| self.truncation.apply(key.as_str()))
            .unwrap_or_default();
        let principal_text = auth
            .identity
            .as_ref()
            .map(|identity| self.truncation.apply(identity.principal.as_str()))
            .unwrap_or_default();

        UiState {
            login_button_label: label.to_string(),
            login_button_disabled: disabled,
            show_connect: phase == ConnectionPhase::Disconnected,
            show_login: phase == ConnectionPhase::ConnectedNoIdentity,
            show_logout: phase == ConnectionPhase::ConnectedWithIdentity,
            show_wallet_address: public_key.is_some(),
            wallet_address_text,
            show_principal: auth.identity.is_some(),
            principal_text,
            error_text: error_text(auth),
        }
    }

    fn login_label(&self, auth: &AuthSession) -> (&str, bool) {
        if auth.prepare_status == PrepareStatus::Preparing {
            (self.labels.preparing.as_str(), true)
        } else if auth.login_status == LoginStatus::LoggingIn {
            (self.labels.logging_in.as_str(), true)
        } else if auth.sign_status == SignStatus::Pending {
            (self.labels.signing.as_str(), true)
        } else {
            (self.labels.login.as_str(), false)
        }
    }
}

/// Login error wins over prepare error whenever it is set, even when its
/// message is empty; an empty message hides the banner
fn error_text(auth: &AuthSession) -> Option<String> {
    auth.login_error
        .as_ref()
        .or(auth.prepare_error.as_ref())
        .filter(|message| !message.is_empty())
        .cloned()
}

/// Derive the UI with the default presentation
#[must_use]
pub fn compute_ui_state(wallet: &WalletSession, auth: &AuthSession) -> UiState {
    Presentation::default().derive(wallet, auth)
}
