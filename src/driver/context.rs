//! Query contexts.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

use super::node::UiNode;
use super::selector::By;
use super::{Scope, UiDriver};

// ============================================================================
// UiContext
// ============================================================================

/// A scope to resolve locators in, bound to a driver.
///
/// Starts at the document and moves into nodes or inner scopes via
/// [`UiNode::scope`] and [`UiNode::inner_scope`].
#[derive(Clone)]
pub struct UiContext {
    scope: Scope,
    driver: Arc<dyn UiDriver>,
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl UiContext {
    /// Creates a context for a scope.
    #[must_use]
    pub fn new(scope: Scope, driver: Arc<dyn UiDriver>) -> Self {
        Self { scope, driver }
    }

    /// Creates a context at the top-level document.
    #[must_use]
    pub fn document(driver: Arc<dyn UiDriver>) -> Self {
        Self::new(Scope::Document, driver)
    }

    /// Returns the scope queries run against.
    #[inline]
    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Returns the owning driver.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &Arc<dyn UiDriver> {
        &self.driver
    }
}

// ============================================================================
// UiContext - Search
// ============================================================================

impl UiContext {
    /// Finds the first node matching a locator.
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`] if nothing matches.
    pub async fn find(&self, by: By) -> Result<UiNode> {
        self.try_find(by.clone())
            .await?
            .ok_or_else(|| Error::element_not_found(by.to_string(), self.scope.to_string()))
    }

    /// Finds the first node matching a locator, returning `None` if absent.
    pub async fn try_find(&self, by: By) -> Result<Option<UiNode>> {
        debug!(scope = %self.scope, locator = %by, "Resolving node");

        let found = self.driver.query(&self.scope, &by).await?;
        Ok(found.map(|id| UiNode::new(id, by, Arc::clone(&self.driver))))
    }

    /// Finds every node matching a locator, in document order.
    pub async fn find_all(&self, by: By) -> Result<Vec<UiNode>> {
        let ids = self.driver.query_all(&self.scope, &by).await?;
        debug!(scope = %self.scope, locator = %by, count = ids.len(), "Resolved nodes");

        Ok(ids
            .into_iter()
            .map(|id| UiNode::new(id, by.clone(), Arc::clone(&self.driver)))
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, FixtureNode};

    #[tokio::test]
    async fn test_find_missing_reports_scope() {
        let dom = FixtureDom::new();
        let err = dom
            .context()
            .find(By::css("span.missing"))
            .await
            .expect_err("nothing to find");

        assert_eq!(
            err.to_string(),
            "Element not found: css:span.missing (scope: document)"
        );
    }

    #[tokio::test]
    async fn test_find_all_preserves_order() {
        let dom = FixtureDom::new();
        let list = dom.append_to_document(FixtureNode::new("ul"));
        for label in ["one", "two", "three"] {
            dom.append_child(&list, FixtureNode::new("li").with_text(label));
        }

        let items = dom.context().find_all(By::tag("li")).await.expect("query");
        let mut texts = Vec::new();
        for item in &items {
            texts.push(item.text().await.expect("text"));
        }
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_try_find_absent_is_none() {
        let dom = FixtureDom::new();
        let found = dom.context().try_find(By::id("nope")).await.expect("query");
        assert!(found.is_none());
    }
}
