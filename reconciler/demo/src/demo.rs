//! Demo Driver
//!
//! Builds the UI over a headless document and the simulated sources, and
//! turns scenario steps into rendered frames.

use std::rc::Rc;

use serde::Serialize;
use siws_ui_core::{
    AuthSource, ElementState, MemoryDocument, MemoryElement, PublicKey, SessionContext, SiwsApp,
    StartupError, UiAction, UiConfig, UiState, WalletAdapter, WalletSource,
};

use crate::scenario::Step;
use crate::simulation::{SimulatedSiws, SimulatedWallet};

/// Page state after one step or stage
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    /// What produced this frame
    pub cause: String,
    /// Derived UI state
    pub ui: UiState,
    /// Every element as written
    pub elements: Vec<ElementState>,
}

/// UI wired to the simulated sources
pub struct Demo {
    doc: MemoryDocument,
    wallet: SimulatedWallet,
    siws: SimulatedSiws,
    app: SiwsApp<MemoryElement>,
}

impl Demo {
    /// Start the UI with the default installed wallet
    pub fn new(config: &UiConfig) -> Result<Self, StartupError> {
        let installed = vec![WalletAdapter::connected(
            "Phantom",
            PublicKey::new("Gh7xQ1pLmN9zT3kR"),
        )];
        Self::with_wallets(config, installed)
    }

    /// Start the UI with a custom wallet menu
    pub fn with_wallets(
        config: &UiConfig,
        installed: Vec<WalletAdapter>,
    ) -> Result<Self, StartupError> {
        let doc = MemoryDocument::from_config(config);
        let wallet = SimulatedWallet::new(installed);
        let siws = SimulatedSiws::new();
        let context = SessionContext::new(Rc::new(wallet.clone()), Rc::new(siws.clone()));
        let app = SiwsApp::start(&doc, context, config)?;
        Ok(Self {
            doc,
            wallet,
            siws,
            app,
        })
    }

    /// Current page as a frame
    pub fn frame(&self, cause: impl Into<String>) -> Frame {
        let ui = self
            .app
            .reconciler()
            .compute_ui_state(&self.wallet.current_session(), &self.siws.snapshot());
        Frame {
            cause: cause.into(),
            ui,
            elements: self.doc.snapshot(),
        }
    }

    /// Run one step and every SIWS stage it sets off
    pub fn apply(&self, step: &Step) -> Vec<Frame> {
        tracing::info!(%step, "Scenario step");
        match step {
            Step::ClickConnect => self.app.handle_action(UiAction::Connect),
            Step::ClickLogin => self.app.handle_action(UiAction::Login),
            Step::ClickLogout => self.app.handle_action(UiAction::Logout),
            Step::Connect { wallet, public_key } => self.wallet.connect(WalletAdapter::connected(
                wallet.clone(),
                PublicKey::new(public_key.clone()),
            )),
            Step::Disconnect => self.wallet.disconnect(),
            Step::SwitchAccount { public_key } => {
                self.wallet.switch_account(PublicKey::new(public_key.clone()));
            }
            Step::FailNextPrepare => self.siws.fail_next_prepare(),
            Step::FailNextLogin => self.siws.fail_next_login(),
        }

        let mut frames = vec![self.frame(step.to_string())];
        while self.siws.advance() {
            frames.push(self.frame("siws stage"));
        }
        frames
    }
}
