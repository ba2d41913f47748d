//! Checkbox list page.

use tracing::debug;

use crate::config::CheckboxesConfig;
use crate::driver::{By, UiContext, UiNode};
use crate::error::{Error, Result};

// ============================================================================
// CheckboxesPage
// ============================================================================

/// Reads and toggles a list of checkboxes by position.
#[derive(Debug, Clone)]
pub struct CheckboxesPage {
    ctx: UiContext,
    boxes: By,
}

impl CheckboxesPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &CheckboxesConfig) -> Self {
        Self {
            ctx,
            boxes: config.boxes.clone(),
        }
    }

    /// Number of checkboxes.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.ctx.find_all(self.boxes.clone()).await?.len())
    }

    /// Checked state of every checkbox, in page order.
    pub async fn states(&self) -> Result<Vec<bool>> {
        let mut states = Vec::new();
        for checkbox in self.ctx.find_all(self.boxes.clone()).await? {
            states.push(checkbox.is_selected().await?);
        }
        Ok(states)
    }

    /// Returns `true` if the checkbox at `index` (0-based) is checked.
    pub async fn is_selected(&self, index: usize) -> Result<bool> {
        self.nth(index).await?.is_selected().await
    }

    /// Clicks the checkbox at `index`, flipping its state.
    pub async fn toggle(&self, index: usize) -> Result<()> {
        self.nth(index).await?.click().await
    }

    /// Checks every unchecked box, leaving checked ones alone.
    ///
    /// Returns the number of boxes clicked.
    pub async fn select_all(&self) -> Result<usize> {
        let mut clicked = 0;
        for checkbox in self.ctx.find_all(self.boxes.clone()).await? {
            if !checkbox.is_selected().await? {
                checkbox.click().await?;
                clicked += 1;
            }
        }
        debug!(clicked, "Checked all boxes");
        Ok(clicked)
    }

    async fn nth(&self, index: usize) -> Result<UiNode> {
        self.ctx
            .find_all(self.boxes.clone())
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| {
                Error::element_not_found(
                    format!("{} [{index}]", self.boxes),
                    self.ctx.scope().to_string(),
                )
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, widgets};

    fn page() -> (FixtureDom, CheckboxesPage) {
        let dom = FixtureDom::new();
        widgets::checkboxes(&dom);
        let page = CheckboxesPage::new(dom.context(), &CheckboxesConfig::default());
        (dom, page)
    }

    #[tokio::test]
    async fn test_initial_states() {
        let (_dom, page) = page();
        assert_eq!(page.count().await.expect("count"), 2);
        assert_eq!(page.states().await.expect("states"), [false, true]);
    }

    #[tokio::test]
    async fn test_select_all_clicks_only_unchecked() {
        let (dom, page) = page();

        assert_eq!(page.select_all().await.expect("select"), 1);
        assert_eq!(page.states().await.expect("states"), [true, true]);
        assert_eq!(dom.stats().clicks, 1);

        assert_eq!(page.select_all().await.expect("again"), 0);
    }

    #[tokio::test]
    async fn test_toggle_unchecks() {
        let (_dom, page) = page();
        page.toggle(1).await.expect("toggle");
        assert!(!page.is_selected(1).await.expect("state"));
    }

    #[tokio::test]
    async fn test_index_out_of_range() {
        let (_dom, page) = page();
        let err = page.toggle(5).await.expect_err("no fifth box");
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }
}
