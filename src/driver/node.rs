//! Handles to located nodes.
//!
//! A [`UiNode`] is a transient reference: it remembers the node ID, the
//! locator it was resolved from (for error messages), and the driver that
//! owns it. Every accessor is a fresh driver call.
//!
//! ```ignore
//! let checkbox = ctx.find(By::css("input[type='checkbox']")).await?;
//! if !checkbox.is_selected().await? {
//!     checkbox.click().await?;
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::NodeId;

use super::context::UiContext;
use super::selector::By;
use super::{Scope, UiDriver};

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a node handle.
pub(crate) struct NodeInner {
    /// Backend node ID.
    pub id: NodeId,

    /// Locator the node was resolved from.
    pub locator: By,

    /// Owning driver.
    pub driver: Arc<dyn UiDriver>,
}

// ============================================================================
// UiNode
// ============================================================================

/// A handle to a located UI node.
#[derive(Clone)]
pub struct UiNode {
    pub(crate) inner: Arc<NodeInner>,
}

impl fmt::Debug for UiNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiNode")
            .field("id", &self.inner.id)
            .field("locator", &self.inner.locator)
            .finish_non_exhaustive()
    }
}

impl UiNode {
    /// Creates a node handle.
    pub(crate) fn new(id: NodeId, locator: By, driver: Arc<dyn UiDriver>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                id,
                locator,
                driver,
            }),
        }
    }

    /// Returns the backend node ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.inner.id
    }

    /// Returns the locator this node was resolved from.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &By {
        &self.inner.locator
    }
}

// ============================================================================
// UiNode - Reads
// ============================================================================

impl UiNode {
    /// Gets the node's visible text.
    pub async fn text(&self) -> Result<String> {
        self.inner.driver.text(&self.inner.id).await
    }

    /// Gets an attribute value.
    ///
    /// Returns `None` if the attribute doesn't exist.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.inner.driver.attribute(&self.inner.id, name).await
    }

    /// Checks if the node is displayed.
    pub async fn is_visible(&self) -> Result<bool> {
        self.inner.driver.is_visible(&self.inner.id).await
    }

    /// Checks if the node is selected (checked checkbox or radio).
    pub async fn is_selected(&self) -> Result<bool> {
        self.inner.driver.is_selected(&self.inner.id).await
    }
}

// ============================================================================
// UiNode - Actions
// ============================================================================

impl UiNode {
    /// Clicks the node.
    pub async fn click(&self) -> Result<()> {
        debug!(node_id = %self.inner.id, locator = %self.inner.locator, "Clicking node");
        self.inner.driver.click(&self.inner.id).await
    }

    /// Types text into the node.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        debug!(node_id = %self.inner.id, text_len = text.len(), "Typing into node");
        self.inner.driver.send_keys(&self.inner.id, text).await
    }
}

// ============================================================================
// UiNode - Scopes
// ============================================================================

impl UiNode {
    /// Enters the encapsulated inner scope this node hosts.
    ///
    /// # Errors
    ///
    /// [`Error::NoEncapsulatedScope`] if the node is not a boundary host.
    pub async fn inner_scope(&self) -> Result<UiContext> {
        let scope = self
            .inner
            .driver
            .shadow_root(&self.inner.id)
            .await?
            .ok_or_else(|| Error::no_encapsulated_scope(self.inner.locator.to_string()))?;

        debug!(node_id = %self.inner.id, %scope, "Entered inner scope");
        Ok(UiContext::new(scope, Arc::clone(&self.inner.driver)))
    }

    /// Uses this node's light-tree descendants as a query context.
    #[must_use]
    pub fn scope(&self) -> UiContext {
        UiContext::new(
            Scope::Node(self.inner.id.clone()),
            Arc::clone(&self.inner.driver),
        )
    }

    /// Finds a descendant node.
    pub async fn find(&self, by: By) -> Result<UiNode> {
        self.scope().find(by).await
    }

    /// Finds a descendant node, returning `None` if absent.
    pub async fn try_find(&self, by: By) -> Result<Option<UiNode>> {
        self.scope().try_find(by).await
    }

    /// Finds every matching descendant node.
    pub async fn find_all(&self, by: By) -> Result<Vec<UiNode>> {
        self.scope().find_all(by).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, FixtureNode};

    #[test]
    fn test_node_is_clone_and_debug() {
        fn assert_traits<T: Clone + fmt::Debug + Send + Sync>() {}
        assert_traits::<UiNode>();
    }

    #[tokio::test]
    async fn test_inner_scope_on_plain_node_fails() {
        let dom = FixtureDom::new();
        dom.append_to_document(FixtureNode::new("div").with_id("plain"));

        let node = dom.context().find(By::css("div#plain")).await.expect("found");
        let err = node.inner_scope().await.expect_err("no shadow root");
        assert!(matches!(err, Error::NoEncapsulatedScope { ref selector } if selector == "css:div#plain"));
    }

    #[tokio::test]
    async fn test_send_keys_then_read_value() {
        let dom = FixtureDom::new();
        dom.append_to_document(FixtureNode::new("input").with_attr("type", "text"));

        let input = dom.context().find(By::tag("input")).await.expect("found");
        input.send_keys("hello").await.expect("typed");
        assert_eq!(
            input.attribute("value").await.expect("read").as_deref(),
            Some("hello")
        );
    }
}
