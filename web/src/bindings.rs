//! Imports from the JavaScript wallet and SIWS libraries

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "ic-siws-js")]
extern "C" {
    /// Drives the SIWS login against the provider canister
    pub type SiwsManager;

    #[wasm_bindgen(constructor)]
    pub fn new(canister_id: &str) -> SiwsManager;

    #[wasm_bindgen(method)]
    pub fn login(this: &SiwsManager);

    #[wasm_bindgen(method)]
    pub fn clear(this: &SiwsManager);

    #[wasm_bindgen(method, js_name = setAdapter)]
    pub fn set_adapter(this: &SiwsManager, adapter: &JsValue);

    /// Observable SIWS state machine store
    #[derive(Clone)]
    pub type SiwsStateStore;

    #[wasm_bindgen(thread_local_v2, js_name = siwsStateStore)]
    pub static SIWS_STATE_STORE: SiwsStateStore;

    #[wasm_bindgen(method, js_name = getSnapshot)]
    pub fn get_snapshot(this: &SiwsStateStore) -> JsValue;

    #[wasm_bindgen(method)]
    pub fn subscribe(this: &SiwsStateStore, callback: &js_sys::Function) -> StoreSubscription;

    /// Handle returned by `SiwsStateStore::subscribe`
    pub type StoreSubscription;

    #[wasm_bindgen(method)]
    pub fn unsubscribe(this: &StoreSubscription);
}

#[wasm_bindgen(module = "solana-connect")]
extern "C" {
    /// Wallet selection menu and adapter manager
    #[derive(Clone)]
    pub type SolanaConnect;

    #[wasm_bindgen(constructor)]
    pub fn new() -> SolanaConnect;

    #[wasm_bindgen(method, js_name = openMenu)]
    pub fn open_menu(this: &SolanaConnect);

    #[wasm_bindgen(method, js_name = getWallet)]
    pub fn get_wallet(this: &SolanaConnect) -> JsValue;

    #[wasm_bindgen(method, js_name = onWalletChange)]
    pub fn on_wallet_change(this: &SolanaConnect, callback: &js_sys::Function);
}
