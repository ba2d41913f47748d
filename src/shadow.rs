//! Locating nodes through nested shadow roots.
//!
//! A [`SelectorPath`] lists one locator per encapsulation level: every entry
//! but the last names a boundary host whose inner scope the next entry is
//! resolved in, and the last names the target.
//!
//! ```ignore
//! let path = SelectorPath::parse("div#shadow_host >>> div#nested_shadow_host >>> div")?;
//! let laptops = shadow::locate(&ctx, &path).await?;
//! assert_eq!(laptops.text().await?, "Laptops");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use futures_util::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::{By, UiContext, UiNode};
use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Separator between levels in the textual form.
pub const LEVEL_SEPARATOR: &str = ">>>";

// ============================================================================
// SelectorPath
// ============================================================================

/// Non-empty sequence of locators, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<By>", into = "Vec<By>")]
pub struct SelectorPath(Vec<By>);

impl SelectorPath {
    /// Creates a path from locators.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `selectors` is empty or any locator is
    /// blank.
    pub fn new(selectors: impl IntoIterator<Item = By>) -> Result<Self> {
        let selectors: Vec<By> = selectors.into_iter().collect();
        if selectors.is_empty() {
            return Err(Error::invalid_argument("selector path must not be empty"));
        }
        if let Some(blank) = selectors.iter().position(By::is_blank) {
            return Err(Error::invalid_argument(format!(
                "selector {blank} in path is blank"
            )));
        }
        Ok(Self(selectors))
    }

    /// Parses CSS selectors separated by `>>>`.
    pub fn parse(input: &str) -> Result<Self> {
        Self::new(input.split(LEVEL_SEPARATOR).map(|level| By::css(level.trim())))
    }

    /// Builds a path from non-empty CSS literals.
    pub(crate) fn from_css(levels: &[&str]) -> Self {
        Self(levels.iter().map(|level| By::css(*level)).collect())
    }

    /// Returns the locators, outermost first.
    #[inline]
    #[must_use]
    pub fn selectors(&self) -> &[By] {
        &self.0
    }

    /// Returns the number of levels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `false`: a constructed path has at least one level.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of boundary hosts crossed.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }
}

impl TryFrom<Vec<By>> for SelectorPath {
    type Error = Error;

    fn try_from(selectors: Vec<By>) -> Result<Self> {
        Self::new(selectors)
    }
}

impl From<SelectorPath> for Vec<By> {
    fn from(path: SelectorPath) -> Self {
        path.0
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, by) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " {LEVEL_SEPARATOR} ")?;
            }
            write!(f, "{by}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Resolves `path` from `root`, entering one inner scope per host.
///
/// Performs exactly `path.len()` queries and `path.len() - 1` scope switches.
///
/// # Errors
///
/// - [`Error::ElementNotFound`] if a host or the target is missing
/// - [`Error::NoEncapsulatedScope`] if a host has no inner scope
pub async fn locate(root: &UiContext, path: &SelectorPath) -> Result<UiNode> {
    let node = descend(root.clone(), path.selectors()).await?;
    debug!(path = %path, node_id = %node.id(), "Located node");
    Ok(node)
}

fn descend(ctx: UiContext, selectors: &[By]) -> BoxFuture<'_, Result<UiNode>> {
    async move {
        match selectors {
            [] => Err(Error::invalid_argument("selector path must not be empty")),
            [target] => ctx.find(target.clone()).await,
            [host, rest @ ..] => {
                let inner = ctx.find(host.clone()).await?.inner_scope().await?;
                descend(inner, rest).await
            }
        }
    }
    .boxed()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, FixtureNode, widgets};

    #[test]
    fn test_parse_levels() {
        let path = SelectorPath::parse("div#shadow_host >>> div#nested_shadow_host >>> div")
            .expect("parse");
        assert_eq!(path.len(), 3);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.selectors()[1], By::css("div#nested_shadow_host"));
        assert_eq!(
            path.to_string(),
            "css:div#shadow_host >>> css:div#nested_shadow_host >>> css:div"
        );
    }

    #[test]
    fn test_rejects_empty_paths() {
        assert!(SelectorPath::new(Vec::new()).is_err());
        assert!(SelectorPath::parse("").is_err());
        assert!(SelectorPath::parse("div >>>   ").is_err());
    }

    #[test]
    fn test_serde_as_locator_list() {
        let json = r#"[{"strategy":"css","value":"div#shadow_host"},{"strategy":"css","value":"a"}]"#;
        let path: SelectorPath = serde_json::from_str(json).expect("deserialize");
        assert_eq!(path.len(), 2);
        assert_eq!(serde_json::to_string(&path).expect("serialize"), json);

        assert!(serde_json::from_str::<SelectorPath>("[]").is_err());
    }

    #[tokio::test]
    async fn test_locate_single_level() {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);
        dom.reset_stats();

        let path = SelectorPath::parse("div#shadow_host").expect("parse");
        let host = locate(&dom.context(), &path).await.expect("host");

        assert_eq!(host.attribute("id").await.expect("id").as_deref(), Some("shadow_host"));
        assert_eq!(dom.stats().queries, 1);
        assert_eq!(dom.stats().scope_switches, 0);
    }

    #[tokio::test]
    async fn test_locate_counts_queries_and_switches() {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);

        for (raw, levels, text) in [
            ("div#shadow_host >>> span.info", 2, "Mobiles"),
            ("div#shadow_host >>> div#nested_shadow_host >>> div", 3, "Laptops"),
        ] {
            dom.reset_stats();
            let path = SelectorPath::parse(raw).expect("parse");
            let node = locate(&dom.context(), &path).await.expect("located");

            let stats = dom.stats();
            assert_eq!(stats.queries, levels);
            assert_eq!(stats.scope_switches, levels - 1);
            assert_eq!(node.text().await.expect("text"), text);
        }
    }

    #[tokio::test]
    async fn test_missing_host() {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);

        let path = SelectorPath::parse("div#absent >>> span").expect("parse");
        let err = locate(&dom.context(), &path).await.expect_err("no host");
        assert!(matches!(err, Error::ElementNotFound { ref selector, .. } if selector == "css:div#absent"));
    }

    #[tokio::test]
    async fn test_missing_target_reports_inner_scope() {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);

        let path = SelectorPath::parse("div#shadow_host >>> button").expect("parse");
        let err = locate(&dom.context(), &path).await.expect_err("no target");
        assert!(matches!(err, Error::ElementNotFound { ref scope, .. } if scope.starts_with("shadow(")));
    }

    #[tokio::test]
    async fn test_host_without_shadow_root() {
        let dom = FixtureDom::new();
        let plain = dom.append_to_document(FixtureNode::new("div").with_id("plain"));
        dom.append_child(&plain, FixtureNode::new("span"));

        let path = SelectorPath::parse("div#plain >>> span").expect("parse");
        let err = locate(&dom.context(), &path).await.expect_err("not a host");
        assert!(matches!(err, Error::NoEncapsulatedScope { .. }));
    }

    #[tokio::test]
    async fn test_locate_from_node_context() {
        let dom = FixtureDom::new();
        widgets::shadow_dom(&dom);
        let section = dom.context().find(By::id("HTML16")).await.expect("section");

        let path = SelectorPath::parse("div#shadow_host >>> a").expect("parse");
        let link = locate(&section.scope(), &path).await.expect("link");
        assert_eq!(link.text().await.expect("text"), "Blog");
    }
}
