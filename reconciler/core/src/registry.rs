//! Element Registry
//!
//! Resolves the named UI placeholders to concrete handles once, at startup.
//! A missing element is a markup defect, not a transient condition, so
//! resolution fails fast with [`MissingElementError`] and is never retried.
//!
//! Surfaces plug in through two traits:
//!
//! - [`ElementResolver`]: finds a node by selector (DOM `querySelector`, the
//!   in-memory document, ...)
//! - [`ElementHandle`]: the three writes the reconciler performs

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Elements the UI needs to function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementName {
    /// Root the static markup is rendered into
    AppContainer,
    /// Label showing the truncated wallet address
    WalletAddress,
    /// Label showing the truncated canister principal
    Principal,
    /// "Connect wallet" button
    ConnectButton,
    /// "Login" button (label and disabled state follow the auth flow)
    LoginButton,
    /// "Logout" button
    LogoutButton,
    /// Error banner
    ErrorBanner,
}

impl ElementName {
    /// Every element, in resolution order
    pub const ALL: [ElementName; 7] = [
        ElementName::AppContainer,
        ElementName::WalletAddress,
        ElementName::Principal,
        ElementName::ConnectButton,
        ElementName::LoginButton,
        ElementName::LogoutButton,
        ElementName::ErrorBanner,
    ];

    /// Stable name used in logs and errors
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppContainer => "app_container",
            Self::WalletAddress => "wallet_address",
            Self::Principal => "principal",
            Self::ConnectButton => "connect_button",
            Self::LoginButton => "login_button",
            Self::LogoutButton => "logout_button",
            Self::ErrorBanner => "error_banner",
        }
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS selectors for each element
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Root container
    pub app_container: String,
    /// Wallet address label
    pub wallet_address: String,
    /// Principal label
    pub principal: String,
    /// Connect button
    pub connect_button: String,
    /// Login button
    pub login_button: String,
    /// Logout button
    pub logout_button: String,
    /// Error banner
    pub error_banner: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            app_container: "#app".to_string(),
            wallet_address: "#solPubKey".to_string(),
            principal: "#icPrincipal".to_string(),
            connect_button: "#connectButton".to_string(),
            login_button: "#loginButton".to_string(),
            logout_button: "#logoutButton".to_string(),
            error_banner: "#error".to_string(),
        }
    }
}

impl Selectors {
    /// Selector for `name`
    #[must_use]
    pub fn selector(&self, name: ElementName) -> &str {
        match name {
            ElementName::AppContainer => &self.app_container,
            ElementName::WalletAddress => &self.wallet_address,
            ElementName::Principal => &self.principal,
            ElementName::ConnectButton => &self.connect_button,
            ElementName::LoginButton => &self.login_button,
            ElementName::LogoutButton => &self.logout_button,
            ElementName::ErrorBanner => &self.error_banner,
        }
    }
}

/// Writable UI element
///
/// Handles are cheap references to a node owned by the surface; writes go
/// through `&self`.
pub trait ElementHandle {
    /// Replace the element's text content
    fn set_text(&self, text: &str);

    /// Show or hide the element
    fn set_visible(&self, visible: bool);

    /// Enable or disable the element (buttons)
    fn set_disabled(&self, disabled: bool);
}

/// Finds elements by selector
pub trait ElementResolver {
    /// Handle type produced by this resolver
    type Handle: ElementHandle;

    /// Look up the first node matching `selector`
    fn lookup(&self, selector: &str) -> Option<Self::Handle>;
}

/// A required element is absent from the markup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing element {name}: nothing matches {selector}")]
pub struct MissingElementError {
    /// Which element was missing
    pub name: ElementName,
    /// Selector that matched nothing
    pub selector: String,
}

/// Resolve a single element
pub fn resolve<R: ElementResolver>(
    resolver: &R,
    selectors: &Selectors,
    name: ElementName,
) -> Result<R::Handle, MissingElementError> {
    let selector = selectors.selector(name);
    resolver.lookup(selector).ok_or_else(|| MissingElementError {
        name,
        selector: selector.to_string(),
    })
}

/// Handles for every managed element, resolved once
#[derive(Debug)]
pub struct ElementRegistry<H> {
    /// Root container
    pub app_container: H,
    /// Wallet address label
    pub wallet_address: H,
    /// Principal label
    pub principal: H,
    /// Connect button
    pub connect_button: H,
    /// Login button
    pub login_button: H,
    /// Logout button
    pub logout_button: H,
    /// Error banner
    pub error_banner: H,
}

impl<H: ElementHandle> ElementRegistry<H> {
    /// Resolve every element, failing on the first one missing
    pub fn resolve_all<R>(resolver: &R, selectors: &Selectors) -> Result<Self, MissingElementError>
    where
        R: ElementResolver<Handle = H>,
    {
        let registry = Self {
            app_container: resolve(resolver, selectors, ElementName::AppContainer)?,
            wallet_address: resolve(resolver, selectors, ElementName::WalletAddress)?,
            principal: resolve(resolver, selectors, ElementName::Principal)?,
            connect_button: resolve(resolver, selectors, ElementName::ConnectButton)?,
            login_button: resolve(resolver, selectors, ElementName::LoginButton)?,
            logout_button: resolve(resolver, selectors, ElementName::LogoutButton)?,
            error_banner: resolve(resolver, selectors, ElementName::ErrorBanner)?,
        };
        tracing::debug!(count = ElementName::ALL.len(), "Resolved UI elements");
        Ok(registry)
    }

    /// Handle for `name`
    #[must_use]
    pub fn get(&self, name: ElementName) -> &H {
        match name {
            ElementName::AppContainer => &self.app_container,
            ElementName::WalletAddress => &self.wallet_address,
            ElementName::Principal => &self.principal,
            ElementName::ConnectButton => &self.connect_button,
            ElementName::LoginButton => &self.login_button,
            ElementName::LogoutButton => &self.logout_button,
            ElementName::ErrorBanner => &self.error_banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_all_from_complete_document() {
        let selectors = Selectors::default();
        let doc = MemoryDocument::with_elements(&selectors);

        let registry = ElementRegistry::resolve_all(&doc, &selectors).unwrap();
        assert_eq!(registry.get(ElementName::LoginButton).selector(), "#loginButton");
        assert_eq!(registry.get(ElementName::ErrorBanner).selector(), "#error");
    }

    #[test]
    fn test_missing_element_names_the_culprit() {
        let selectors = Selectors::default();
        let doc = MemoryDocument::with_elements(&selectors);
        doc.remove("#logoutButton");

        let err = ElementRegistry::resolve_all(&doc, &selectors).unwrap_err();
        assert_eq!(err.name, ElementName::LogoutButton);
        assert_eq!(err.selector, "#logoutButton");
        assert_eq!(
            err.to_string(),
            "Missing element logout_button: nothing matches #logoutButton"
        );
    }

    #[test]
    fn test_custom_selectors_are_used() {
        let selectors = Selectors {
            error_banner: "#banner".to_string(),
            ..Default::default()
        };
        let doc = MemoryDocument::with_elements(&Selectors::default());

        let err = resolve(&doc, &selectors, ElementName::ErrorBanner).unwrap_err();
        assert_eq!(err.selector, "#banner");
        assert!(resolve(&doc, &selectors, ElementName::ConnectButton).is_ok());
    }

    #[test]
    fn test_element_names_are_distinct() {
        let mut names: Vec<&str> = ElementName::ALL.iter().map(ElementName::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ElementName::ALL.len());
    }
}
