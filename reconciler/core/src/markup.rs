//! Static page markup
//!
//! The HTML rendered into the app container before the managed elements are
//! resolved. Managed elements start in the disconnected presentation: only
//! the connect button is displayed.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::UiConfig;
use crate::registry::{ElementName, Selectors};

/// Linked logo in the page header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Link target
    pub href: String,
    /// Image source
    pub src: String,
    /// Alt text
    pub alt: String,
}

/// Text and links of the static page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Page heading
    pub title: String,
    /// Introductory paragraph (plain text)
    pub description: String,
    /// Small tags under the description
    pub pills: Vec<String>,
    /// Header logos
    pub logos: Vec<Logo>,
    /// Connect button label
    pub connect_label: String,
    /// Logout button label
    pub logout_label: String,
    /// Source repository link, omitted when empty
    pub repository_url: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            title: "Sign in with Solana".to_string(),
            description: "This demo authenticates Solana users against an IC canister using ic-siws-js."
                .to_string(),
            pills: vec!["Rust".to_string(), "No framework".to_string()],
            logos: vec![
                Logo {
                    href: "https://internetcomputer.org".to_string(),
                    src: "/ic.svg".to_string(),
                    alt: "Internet Computer".to_string(),
                },
                Logo {
                    href: "https://solana.com".to_string(),
                    src: "/solana.svg".to_string(),
                    alt: "Solana".to_string(),
                },
            ],
            connect_label: "Connect wallet".to_string(),
            logout_label: "Logout".to_string(),
            repository_url: String::new(),
        }
    }
}

/// Escape text for use in HTML content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn element_id(selectors: &Selectors, name: ElementName) -> String {
    let selector = selectors.selector(name);
    escape_html(selector.strip_prefix('#').unwrap_or(selector))
}

/// Render the page body for the app container
#[must_use]
pub fn render_static_content(ui: &UiConfig) -> String {
    let config = &ui.markup;
    let id = |name| element_id(&ui.selectors, name);
    let mut html = String::new();

    html.push_str("<div class=\"logo-group\">\n");
    for logo in &config.logos {
        let _ = writeln!(
            html,
            "  <a href=\"{}\" target=\"_blank\"><img src=\"{}\" class=\"logo\" alt=\"{}\" /></a>",
            escape_html(&logo.href),
            escape_html(&logo.src),
            escape_html(&logo.alt),
        );
    }
    html.push_str("</div>\n");

    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&config.title));
    let _ = writeln!(html, "<p>{}</p>", escape_html(&config.description));

    html.push_str("<div class=\"pill-container\">\n");
    for pill in &config.pills {
        let _ = writeln!(html, "  <span class=\"pill\">{}</span>", escape_html(pill));
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"container\">\n");
    let _ = writeln!(
        html,
        "  <div id=\"{}\" style=\"display: none\"></div>",
        id(ElementName::WalletAddress)
    );
    let _ = writeln!(
        html,
        "  <div id=\"{}\" style=\"display: none\"></div>",
        id(ElementName::Principal)
    );
    let _ = writeln!(
        html,
        "  <button id=\"{}\" type=\"button\">{}</button>",
        id(ElementName::ConnectButton),
        escape_html(&config.connect_label)
    );
    let _ = writeln!(
        html,
        "  <button id=\"{}\" type=\"button\" style=\"display: none\">{}</button>",
        id(ElementName::LoginButton),
        escape_html(&ui.labels.login)
    );
    let _ = writeln!(
        html,
        "  <button id=\"{}\" type=\"button\" style=\"display: none\">{}</button>",
        id(ElementName::LogoutButton),
        escape_html(&config.logout_label)
    );
    let _ = writeln!(
        html,
        "  <div id=\"{}\" class=\"error\" style=\"display: none\"></div>",
        id(ElementName::ErrorBanner)
    );
    html.push_str("</div>\n");

    if !config.repository_url.is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"links\"><a href=\"{}\" target=\"_blank\" rel=\"noreferrer\">Source</a></div>",
            escape_html(&config.repository_url)
        );
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_contains_managed_elements() {
        let html = render_static_content(&UiConfig::default());
        for id in [
            "solPubKey",
            "icPrincipal",
            "connectButton",
            "loginButton",
            "logoutButton",
            "error",
        ] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
    }

    #[test]
    fn test_only_connect_starts_visible() {
        let html = render_static_content(&UiConfig::default());
        let connect = html
            .lines()
            .find(|l| l.contains("connectButton"))
            .unwrap();
        assert!(!connect.contains("display: none"));
        for hidden in ["loginButton", "logoutButton", "solPubKey", "icPrincipal", "\"error\""] {
            let line = html.lines().find(|l| l.contains(hidden)).unwrap();
            assert!(line.contains("display: none"), "{hidden} should start hidden");
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let mut config = UiConfig::default();
        config.markup.title = "<script>alert(1)</script>".to_string();
        let html = render_static_content(&config);
        assert!(html.contains("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"));
    }

    #[test]
    fn test_repository_link_optional() {
        let mut config = UiConfig::default();
        let html = render_static_content(&config);
        assert!(!html.contains("class=\"links\""));

        config.markup.repository_url = "https://example.org/repo".to_string();
        let html = render_static_content(&config);
        assert!(html.contains("href=\"https://example.org/repo\""));
    }

    #[test]
    fn test_configured_labels_and_ids_rendered() {
        let mut config = UiConfig::default();
        config.labels.login = "Sign in".to_string();
        config.markup.connect_label = "Pick a wallet".to_string();
        config.selectors.error_banner = "#login-error".to_string();
        let html = render_static_content(&config);

        assert!(html.contains(">Sign in</button>"));
        assert!(html.contains(">Pick a wallet</button>"));
        assert!(html.contains("<div id=\"login-error\" class=\"error\""));
    }
}
