//! Source adapters over the JS libraries
//!
//! Each adapter registers a single JS callback and fans the converted
//! snapshots out through a [`SnapshotStore`], so any number of Rust
//! subscribers share one JS listener.

use siws_ui_core::{
    AuthCallback, AuthSession, AuthSource, SnapshotStore, Subscription, WalletAdapter,
    WalletCallback, WalletSession, WalletSource,
};
use wasm_bindgen::prelude::*;

use crate::bindings::{
    SiwsManager, SiwsStateStore, SolanaConnect, StoreSubscription, SIWS_STATE_STORE,
};
use crate::convert::{auth_from_js, wallet_from_js};

/// [`WalletSource`] backed by `solana-connect`
pub struct JsWallet {
    connect: SolanaConnect,
    session: SnapshotStore<WalletSession>,
}

impl JsWallet {
    /// Listen to wallet changes on `connect`
    pub fn new(connect: SolanaConnect) -> Self {
        let session = SnapshotStore::new(wallet_from_js(&connect.get_wallet()));
        let store = session.clone();
        let on_change = Closure::<dyn FnMut(JsValue)>::new(move |adapter: JsValue| {
            store.set(wallet_from_js(&adapter));
        });
        connect.on_wallet_change(on_change.as_ref().unchecked_ref());
        // solana-connect offers no way to remove the listener.
        on_change.forget();
        Self { connect, session }
    }
}

impl WalletSource for JsWallet {
    fn current_session(&self) -> WalletSession {
        self.session.get()
    }

    fn subscribe(&self, mut callback: WalletCallback) -> Subscription {
        self.session.subscribe(move |session| callback(session))
    }

    fn open_selection_menu(&self) {
        self.connect.open_menu();
    }
}

/// [`AuthSource`] backed by `ic-siws-js`
pub struct JsSiws {
    manager: SiwsManager,
    connect: SolanaConnect,
    state: SnapshotStore<AuthSession>,
    js_subscription: StoreSubscription,
    _on_change: Closure<dyn FnMut(JsValue)>,
}

impl JsSiws {
    /// Manager for `canister_id`; adapters are taken from `connect` when bound
    pub fn new(canister_id: &str, connect: SolanaConnect) -> Self {
        let store: SiwsStateStore = SIWS_STATE_STORE.with(SiwsStateStore::clone);
        let state = SnapshotStore::new(auth_from_js(&store.get_snapshot()));
        let mirror = state.clone();
        let on_change = Closure::<dyn FnMut(JsValue)>::new(move |snapshot: JsValue| {
            mirror.set(auth_from_js(&snapshot));
        });
        let js_subscription = store.subscribe(on_change.as_ref().unchecked_ref());

        Self {
            manager: SiwsManager::new(canister_id),
            connect,
            state,
            js_subscription,
            _on_change: on_change,
        }
    }
}

impl AuthSource for JsSiws {
    fn snapshot(&self) -> AuthSession {
        self.state.get()
    }

    fn subscribe(&self, mut callback: AuthCallback) -> Subscription {
        self.state.subscribe(move |auth| callback(auth))
    }

    fn begin_login(&self) {
        self.manager.login();
    }

    fn clear_session(&self) {
        self.manager.clear();
    }

    fn bind_wallet(&self, adapter: &WalletAdapter) {
        // The manager needs the live JS adapter, not the converted snapshot.
        let live = self.connect.get_wallet();
        match wallet_from_js(&live) {
            Some(current) if current == *adapter => self.manager.set_adapter(&live),
            _ => tracing::warn!(wallet = %adapter.name, "Wallet changed before it could be bound"),
        }
    }
}

impl Drop for JsSiws {
    fn drop(&mut self) {
        self.js_subscription.unsubscribe();
    }
}
