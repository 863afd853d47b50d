//! SIWS UI Core - Headless UI reconciliation for Sign in with Solana
//!
//! This crate mirrors two external state sources into a small login page,
//! independent of any rendering technology. It drives the browser surface,
//! the terminal demo, or a headless document in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐          ┌──────────────────────┐
//! │    Wallet Source     │          │     Auth Source      │
//! │ (connect/disconnect) │          │ (SIWS state machine) │
//! └──────────┬───────────┘          └──────────┬───────────┘
//!            │ WalletSession                   │ AuthSession
//!            └────────────────┬────────────────┘
//!                             │
//!                  ┌──────────▼──────────┐
//!                  │     Reconciler      │
//!                  │ compute_ui_state()  │  pure, total
//!                  │ apply()             │  idempotent
//!                  └──────────┬──────────┘
//!                             │ UiState
//!                  ┌──────────▼──────────┐
//!                  │  Element Registry   │
//!                  │ (resolved once)     │
//!                  └─────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SiwsApp`]: composition root wiring sources, reconciler and elements
//! - [`Reconciler`]: recomputes and applies the UI on every notification
//! - [`UiState`]: everything written to the page
//! - [`WalletSource`] / [`AuthSource`]: the external sources
//! - [`ElementRegistry`]: element handles resolved at startup
//!
//! # Module Overview
//!
//! - [`session`]: wallet and auth snapshots
//! - [`sources`]: source traits and subscriptions
//! - [`store`]: single-threaded observable snapshot cell
//! - [`registry`]: element names, selectors, resolution
//! - [`display`]: derived UI state and formatting
//! - [`reconciler`]: the reconciler and its session context
//! - [`app`]: composition root and user actions
//! - [`config`]: TOML and environment configuration
//! - [`markup`]: static page HTML
//! - [`memory`]: headless document and sources

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod config;
pub mod display;
pub mod markup;
pub mod memory;
pub mod reconciler;
pub mod registry;
pub mod session;
pub mod sources;
pub mod store;

pub use app::{SiwsApp, StartupError, UiAction};
pub use config::{
    default_config_path, load_config, load_config_from_path, parse_config, ConfigError, UiConfig,
};
pub use display::{
    compute_ui_state, truncate_middle, ConnectionPhase, LoginLabels, Presentation,
    TruncationPolicy, UiState,
};
pub use markup::{render_static_content, MarkupConfig};
pub use memory::{
    render_elements, ElementState, MemoryAuthSource, MemoryDocument, MemoryElement,
    MemoryWalletSource,
};
pub use reconciler::{Reconciler, SessionContext};
pub use registry::{
    resolve, ElementHandle, ElementName, ElementRegistry, ElementResolver, MissingElementError,
    Selectors,
};
pub use session::{
    AuthSession, Identity, LoginStatus, PrepareStatus, Principal, PublicKey, SignStatus,
    WalletAdapter, WalletSession,
};
pub use sources::{AuthCallback, AuthSource, Subscription, WalletCallback, WalletSource};
pub use store::SnapshotStore;
