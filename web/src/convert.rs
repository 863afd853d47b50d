//! JS snapshot conversion
//!
//! The JS libraries hand over plain objects. Fields are read with
//! `Reflect` and anything missing or of the wrong type maps to the idle or
//! absent value, so a library upgrade that renames a field degrades the UI
//! instead of breaking it.

use js_sys::{Function, Reflect};
use siws_ui_core::{
    AuthSession, Identity, LoginStatus, PrepareStatus, PublicKey, SignStatus, WalletAdapter,
    WalletSession,
};
use wasm_bindgen::{JsCast, JsValue};

fn is_nullish(value: &JsValue) -> bool {
    value.is_null() || value.is_undefined()
}

fn field(object: &JsValue, key: &str) -> JsValue {
    if is_nullish(object) {
        return JsValue::UNDEFINED;
    }
    Reflect::get(object, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn string_field(object: &JsValue, key: &str) -> Option<String> {
    field(object, key).as_string()
}

/// Call a zero-argument method, `None` when absent or throwing
fn call_method(object: &JsValue, name: &str) -> Option<JsValue> {
    let method = field(object, name).dyn_into::<Function>().ok()?;
    method.call0(object).ok()
}

/// Message of an `Error`-like object
fn error_message(object: &JsValue) -> Option<String> {
    if is_nullish(object) {
        return None;
    }
    string_field(object, "message").or_else(|| object.as_string())
}

/// Convert a wallet adapter (or `null`) from `solana-connect`
pub fn wallet_from_js(adapter: &JsValue) -> WalletSession {
    if is_nullish(adapter) {
        return None;
    }
    let name = string_field(adapter, "name").unwrap_or_else(|| "Unknown wallet".to_string());
    let key = field(adapter, "publicKey");
    let public_key = if is_nullish(&key) {
        None
    } else {
        call_method(&key, "toString")
            .and_then(|s| s.as_string())
            .map(PublicKey::new)
    };
    Some(WalletAdapter { name, public_key })
}

/// Convert a `siwsStateStore` snapshot (`{ context }`)
pub fn auth_from_js(snapshot: &JsValue) -> AuthSession {
    let context = field(snapshot, "context");

    let identity = field(&context, "identity");
    let identity = if is_nullish(&identity) {
        None
    } else {
        call_method(&identity, "getPrincipal")
            .and_then(|principal| call_method(&principal, "toText"))
            .and_then(|text| text.as_string())
            .map(Identity::new)
    };

    AuthSession {
        prepare_status: prepare_status_from(
            string_field(&context, "prepareLoginStatus").as_deref(),
        ),
        login_status: login_status_from(string_field(&context, "loginStatus").as_deref()),
        sign_status: sign_status_from(string_field(&context, "signMessageStatus").as_deref()),
        identity,
        prepare_error: error_message(&field(&context, "prepareLoginError")),
        login_error: error_message(&field(&context, "loginError")),
    }
}

pub(crate) fn prepare_status_from(status: Option<&str>) -> PrepareStatus {
    match status {
        Some("preparing") => PrepareStatus::Preparing,
        Some("error") => PrepareStatus::Error,
        _ => PrepareStatus::Idle,
    }
}

pub(crate) fn login_status_from(status: Option<&str>) -> LoginStatus {
    match status {
        Some("logging-in") => LoginStatus::LoggingIn,
        Some("success" | "logged-in") => LoginStatus::LoggedIn,
        Some("error") => LoginStatus::Error,
        _ => LoginStatus::Idle,
    }
}

pub(crate) fn sign_status_from(status: Option<&str>) -> SignStatus {
    match status {
        Some("pending") => SignStatus::Pending,
        Some("error") => SignStatus::Error,
        _ => SignStatus::Idle,
    }
}
