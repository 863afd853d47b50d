//! Session Snapshots
//!
//! Read-only snapshots of the two external state sources the UI mirrors:
//!
//! - [`WalletSession`]: the currently connected Solana wallet, if any
//! - [`AuthSession`]: the Sign in with Solana state machine context
//!
//! Both are owned by their sources. The reconciler only reads them, and every
//! snapshot is self-contained so the UI can be re-derived from the latest pair
//! without knowing how it was reached.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base58 encoded Solana public key
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    /// Wrap an encoded public key
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded key
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connected wallet adapter
///
/// The public key can be missing for a short while after the adapter is
/// selected but before the wallet has handed over an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAdapter {
    /// Wallet name as reported by the adapter (e.g. "Phantom")
    pub name: String,
    /// Active account, once the wallet exposes one
    pub public_key: Option<PublicKey>,
}

impl WalletAdapter {
    /// Adapter with an active account
    pub fn connected(name: impl Into<String>, public_key: PublicKey) -> Self {
        Self {
            name: name.into(),
            public_key: Some(public_key),
        }
    }
}

/// Current wallet connection. `None` means no wallet is connected.
pub type WalletSession = Option<WalletAdapter>;

/// Progress of fetching the SIWS message from the provider canister
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrepareStatus {
    /// Nothing in flight
    #[default]
    Idle,
    /// Waiting for the canister to prepare the login message
    Preparing,
    /// Preparation failed; details in [`AuthSession::prepare_error`]
    Error,
}

/// Progress of the login call against the provider canister
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoginStatus {
    /// Nothing in flight
    #[default]
    Idle,
    /// Login call in flight
    LoggingIn,
    /// Login completed and an identity was issued
    LoggedIn,
    /// Login failed; details in [`AuthSession::login_error`]
    Error,
}

/// Progress of the wallet signing the SIWS message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignStatus {
    /// No signature requested
    #[default]
    Idle,
    /// Waiting for the user to approve the signature in the wallet
    Pending,
    /// The wallet refused or failed to sign
    Error,
}

/// Textual Internet Computer principal
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap a textual principal
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The textual form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Delegated canister identity bound to an authenticated wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Principal the delegation resolves to
    pub principal: Principal,
}

impl Identity {
    /// Identity for a textual principal
    pub fn new(principal: impl Into<String>) -> Self {
        Self {
            principal: Principal::from_text(principal),
        }
    }
}

/// Snapshot of the SIWS state machine context
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSession {
    /// Message preparation progress
    pub prepare_status: PrepareStatus,
    /// Login call progress
    pub login_status: LoginStatus,
    /// Wallet signature progress
    pub sign_status: SignStatus,
    /// Identity issued by a successful login
    pub identity: Option<Identity>,
    /// Message from the last failed preparation
    pub prepare_error: Option<String>,
    /// Message from the last failed login
    pub login_error: Option<String>,
}

impl AuthSession {
    /// Whether a login has produced an identity
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether any step of the login flow is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.prepare_status == PrepareStatus::Preparing
            || self.login_status == LoginStatus::LoggingIn
            || self.sign_status == SignStatus::Pending
    }
}
