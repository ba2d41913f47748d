//! Dropdown page.
//!
//! [`SelectList`] gives a `<select>` the usual select-by-text, by-value and
//! by-index operations on top of plain queries and clicks. Selecting an
//! option that is already selected does nothing, so a multi-select keeps
//! earlier choices.

use tracing::debug;

use crate::config::DropdownsConfig;
use crate::driver::{By, UiContext, UiNode};
use crate::error::{Error, Result};

// ============================================================================
// SelectList
// ============================================================================

/// One `<select>` element and its options.
#[derive(Debug, Clone)]
pub struct SelectList {
    ctx: UiContext,
    select: By,
    option: By,
}

impl SelectList {
    /// Wraps the list matched by `select`; `option` matches its entries.
    #[must_use]
    pub fn new(ctx: UiContext, select: By, option: By) -> Self {
        Self {
            ctx,
            select,
            option,
        }
    }

    /// Returns `true` if the list accepts several selections.
    pub async fn is_multiple(&self) -> Result<bool> {
        let list = self.ctx.find(self.select.clone()).await?;
        Ok(list.attribute("multiple").await?.is_some())
    }

    /// Visible labels of every option.
    pub async fn labels(&self) -> Result<Vec<String>> {
        let mut labels = Vec::new();
        for option in self.options().await? {
            labels.push(option.text().await?);
        }
        Ok(labels)
    }

    /// Selects the option whose label is `text`.
    pub async fn select_by_text(&self, text: &str) -> Result<()> {
        for option in self.options().await? {
            if option.text().await? == text {
                return self.pick(option).await;
            }
        }
        Err(self.missing(format!("text {text:?}")))
    }

    /// Selects the option whose `value` is `value`.
    pub async fn select_by_value(&self, value: &str) -> Result<()> {
        for option in self.options().await? {
            if option.attribute("value").await?.as_deref() == Some(value) {
                return self.pick(option).await;
            }
        }
        Err(self.missing(format!("value {value:?}")))
    }

    /// Selects the option at `index` (0-based).
    pub async fn select_by_index(&self, index: usize) -> Result<()> {
        let option = self
            .options()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| self.missing(format!("index {index}")))?;
        self.pick(option).await
    }

    /// Label of the first selected option.
    pub async fn first_selected(&self) -> Result<Option<String>> {
        for option in self.options().await? {
            if option.is_selected().await? {
                return Ok(Some(option.text().await?));
            }
        }
        Ok(None)
    }

    /// Labels of every selected option, in list order.
    pub async fn all_selected(&self) -> Result<Vec<String>> {
        let mut selected = Vec::new();
        for option in self.options().await? {
            if option.is_selected().await? {
                selected.push(option.text().await?);
            }
        }
        Ok(selected)
    }

    async fn options(&self) -> Result<Vec<UiNode>> {
        let list = self.ctx.find(self.select.clone()).await?;
        list.find_all(self.option.clone()).await
    }

    async fn pick(&self, option: UiNode) -> Result<()> {
        if option.is_selected().await? {
            return Ok(());
        }
        debug!(select = %self.select, node_id = %option.id(), "Selecting option");
        option.click().await
    }

    fn missing(&self, what: String) -> Error {
        Error::element_not_found(format!("{} with {what}", self.option), self.select.to_string())
    }
}

// ============================================================================
// DropdownsPage
// ============================================================================

/// The country list and the multi-select color list.
#[derive(Debug, Clone)]
pub struct DropdownsPage {
    country: SelectList,
    colors: SelectList,
}

impl DropdownsPage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &DropdownsConfig) -> Self {
        Self {
            country: SelectList::new(ctx.clone(), config.country.clone(), config.option.clone()),
            colors: SelectList::new(ctx, config.colors.clone(), config.option.clone()),
        }
    }

    /// Single-select country list.
    #[inline]
    #[must_use]
    pub fn country(&self) -> &SelectList {
        &self.country
    }

    /// Multi-select color list.
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &SelectList {
        &self.colors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::widgets::{self, COUNTRIES};
    use crate::fixture::FixtureDom;

    fn page() -> (FixtureDom, DropdownsPage) {
        let dom = FixtureDom::new();
        widgets::dropdowns(&dom);
        let page = DropdownsPage::new(dom.context(), &DropdownsConfig::default());
        (dom, page)
    }

    #[tokio::test]
    async fn test_country_select_each_way() {
        let (_dom, page) = page();
        let country = page.country();
        assert!(!country.is_multiple().await.expect("multiple"));
        assert_eq!(country.labels().await.expect("labels").len(), COUNTRIES.len());

        country.select_by_text("Brazil").await.expect("by text");
        assert_eq!(country.first_selected().await.expect("first").as_deref(), Some("Brazil"));

        country.select_by_value("france").await.expect("by value");
        assert_eq!(country.all_selected().await.expect("all"), ["France"]);

        country.select_by_index(9).await.expect("by index");
        assert_eq!(country.first_selected().await.expect("first").as_deref(), Some("India"));
    }

    #[tokio::test]
    async fn test_colors_accumulate() {
        let (_dom, page) = page();
        let colors = page.colors();
        assert!(colors.is_multiple().await.expect("multiple"));

        colors.select_by_text("Blue").await.expect("blue");
        colors.select_by_value("white").await.expect("white");
        colors.select_by_index(3).await.expect("yellow");
        colors.select_by_text("Blue").await.expect("already selected");

        assert_eq!(
            colors.all_selected().await.expect("all"),
            ["Blue", "Yellow", "White"]
        );
    }

    #[tokio::test]
    async fn test_missing_option() {
        let (dom, page) = page();
        let err = page
            .country()
            .select_by_text("Atlantis")
            .await
            .expect_err("absent");
        assert!(matches!(err, Error::ElementNotFound { .. }));
        assert_eq!(dom.stats().clicks, 0);
    }
}
