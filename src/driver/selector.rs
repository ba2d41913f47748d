//! Locator strategies.
//!
//! A [`By`] names how a node is resolved inside a scope. Plain strings convert
//! to CSS selectors, which is what the page objects use almost everywhere.
//!
//! ```ignore
//! use widget_verify::By;
//!
//! let host = ctx.find(By::css("div#shadow_host")).await?;
//! let day = grid.find(By::link_text("26")).await?;
//! let links = pager.find_all("ul#pagination a".into()).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Locator strategy (like Selenium's `By`).
///
/// Serialized as `{"strategy": "css", "value": "div#id"}` so locators can be
/// written in configuration files and sent over the wire unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector.
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression. Only the remote backend evaluates these.
    #[serde(rename = "xpath")]
    XPath(String),

    /// Trimmed text content equals the value.
    #[serde(rename = "text")]
    Text(String),

    /// Text content contains the value.
    #[serde(rename = "partialText")]
    PartialText(String),

    /// Element ID (`#id`).
    #[serde(rename = "id")]
    Id(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// `name` attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Single class name.
    #[serde(rename = "class")]
    Class(String),

    /// `<a>` whose trimmed text equals the value.
    #[serde(rename = "linkText")]
    LinkText(String),

    /// `<a>` whose text contains the value.
    #[serde(rename = "partialLinkText")]
    PartialLinkText(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an exact text selector.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a partial text selector.
    #[inline]
    pub fn partial_text(text: impl Into<String>) -> Self {
        Self::PartialText(text.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a `name` attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a class selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Returns the strategy name used on the wire.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Text(_) => "text",
            Self::PartialText(_) => "partialText",
            Self::Id(_) => "id",
            Self::Tag(_) => "tag",
            Self::Name(_) => "name",
            Self::Class(_) => "class",
            Self::LinkText(_) => "linkText",
            Self::PartialLinkText(_) => "partialLinkText",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Text(v)
            | Self::PartialText(v)
            | Self::Id(v)
            | Self::Tag(v)
            | Self::Name(v)
            | Self::Class(v)
            | Self::LinkText(v)
            | Self::PartialLinkText(v) => v,
        }
    }

    /// Returns `true` if the value is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value().trim().is_empty()
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for By {
    /// Treats the string as a CSS selector.
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Treats the string as a CSS selector.
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_strategy() {
        assert_eq!(By::css("div#shadow_host").to_string(), "css:div#shadow_host");
        assert_eq!(By::link_text("26").to_string(), "linkText:26");
    }

    #[test]
    fn test_from_str_is_css() {
        let by: By = "ul#pagination a".into();
        assert_eq!(by, By::Css("ul#pagination a".to_string()));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&By::link_text("3")).expect("serialize");
        assert_eq!(json, r#"{"strategy":"linkText","value":"3"}"#);

        let by: By = serde_json::from_str(r#"{"strategy":"css","value":"td"}"#).expect("parse");
        assert_eq!(by, By::css("td"));
    }

    #[test]
    fn test_is_blank() {
        assert!(By::css("  ").is_blank());
        assert!(!By::css("a").is_blank());
    }
}
