//! Demo Scenarios
//!
//! A scenario is a JSON list of user and wallet actions:
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "click_connect" },
//!     { "action": "fail_next_login" },
//!     { "action": "click_login" },
//!     { "action": "click_login" },
//!     { "action": "switch_account", "public_key": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin" },
//!     { "action": "click_logout" },
//!     { "action": "disconnect" }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// One scripted action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// User clicks "Connect wallet"
    ClickConnect,
    /// User clicks "Login"
    ClickLogin,
    /// User clicks "Logout"
    ClickLogout,
    /// A wallet connects without going through the menu
    Connect {
        /// Wallet name
        wallet: String,
        /// Account public key
        public_key: String,
    },
    /// The wallet disconnects
    Disconnect,
    /// The user switches accounts inside the wallet
    SwitchAccount {
        /// New account public key
        public_key: String,
    },
    /// The next message preparation fails
    FailNextPrepare,
    /// The next login call fails
    FailNextLogin,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClickConnect => write!(f, "click connect"),
            Self::ClickLogin => write!(f, "click login"),
            Self::ClickLogout => write!(f, "click logout"),
            Self::Connect { wallet, .. } => write!(f, "connect {wallet}"),
            Self::Disconnect => write!(f, "disconnect"),
            Self::SwitchAccount { public_key } => write!(f, "switch account to {public_key}"),
            Self::FailNextPrepare => write!(f, "arm prepare failure"),
            Self::FailNextLogin => write!(f, "arm login failure"),
        }
    }
}

/// Ordered list of steps
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Steps, run in order
    pub steps: Vec<Step>,
}

impl Default for Scenario {
    /// Connect, fail once, retry, switch account, log out, disconnect
    fn default() -> Self {
        Self {
            steps: vec![
                Step::ClickConnect,
                Step::FailNextLogin,
                Step::ClickLogin,
                Step::ClickLogin,
                Step::SwitchAccount {
                    public_key: "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin".to_string(),
                },
                Step::ClickLogout,
                Step::Disconnect,
            ],
        }
    }
}

impl Scenario {
    /// Parse a scenario from JSON
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid scenario JSON")
    }

    /// Load a scenario file
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario: {}", path.display()))?;
        Self::from_json(&text)
    }
}
