//! UI automation driver abstraction.
//!
//! Everything the widget algorithms need from a browser goes through the
//! [`UiDriver`] trait. Two backends implement it:
//!
//! | Backend | Description |
//! |---------|-------------|
//! | [`RemoteDriver`] | WebSocket bridge into a live browser |
//! | [`FixtureDom`](crate::fixture::FixtureDom) | In-memory element tree for offline runs |
//!
//! Callers rarely touch the trait directly. They hold a [`UiContext`] (a
//! scope to query in) and get back [`UiNode`] handles.
//!
//! ```ignore
//! let ctx = UiContext::document(driver);
//! let input = ctx.find(By::css("input#datepicker")).await?;
//! input.click().await?;
//! let value = input.attribute("value").await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Query contexts.
pub mod context;

/// Node handles.
pub mod node;

/// WebSocket-backed driver.
pub mod remote;

/// Locator strategies.
pub mod selector;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::identifiers::NodeId;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::UiContext;
pub use node::UiNode;
pub use remote::RemoteDriver;
pub use selector::By;

// ============================================================================
// Scope
// ============================================================================

/// Where a query is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The top-level document.
    Document,
    /// Descendants of a node (light tree only).
    Node(NodeId),
    /// The encapsulated inner scope owned by a boundary host.
    Shadow(NodeId),
}

impl Scope {
    /// Returns `true` for an encapsulated inner scope.
    #[inline]
    #[must_use]
    pub fn is_shadow(&self) -> bool {
        matches!(self, Self::Shadow(_))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::Node(id) => write!(f, "node({id})"),
            Self::Shadow(id) => write!(f, "shadow({id})"),
        }
    }
}

// ============================================================================
// UiDriver
// ============================================================================

/// Minimal surface a browser backend must provide.
///
/// Every call is a suspension point; the caller awaits completion before
/// issuing the next one. Implementations must not cache node state between
/// calls since the page mutates underneath them.
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Resolves the first node matching `by` inside `scope`.
    async fn query(&self, scope: &Scope, by: &By) -> Result<Option<NodeId>>;

    /// Resolves every node matching `by` inside `scope`, in document order.
    async fn query_all(&self, scope: &Scope, by: &By) -> Result<Vec<NodeId>>;

    /// Returns the node's visible text.
    async fn text(&self, node: &NodeId) -> Result<String>;

    /// Returns an attribute value, or `None` if absent.
    async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>>;

    /// Returns `true` if the node is rendered.
    async fn is_visible(&self, node: &NodeId) -> Result<bool>;

    /// Returns `true` for a checked checkbox/radio or selected option.
    async fn is_selected(&self, node: &NodeId) -> Result<bool>;

    /// Clicks the node.
    async fn click(&self, node: &NodeId) -> Result<()>;

    /// Types text into the node.
    async fn send_keys(&self, node: &NodeId, text: &str) -> Result<()>;

    /// Returns the inner scope the node hosts, if any.
    async fn shadow_root(&self, node: &NodeId) -> Result<Option<Scope>>;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Document.to_string(), "document");
        assert_eq!(Scope::Shadow(NodeId::new("n1")).to_string(), "shadow(n1)");
        assert_eq!(Scope::Node(NodeId::new("n2")).to_string(), "node(n2)");
    }

    #[test]
    fn test_is_shadow() {
        assert!(Scope::Shadow(NodeId::new("h")).is_shadow());
        assert!(!Scope::Document.is_shadow());
    }

    #[test]
    fn test_driver_is_object_safe() {
        fn assert_object(_: Option<&dyn UiDriver>) {}
        assert_object(None);
    }
}
