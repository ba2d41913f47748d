//! Paginated table page.

use crate::config::PaginationConfig;
use crate::driver::UiContext;
use crate::error::Result;
use crate::table::{
    self, PaginatedTableReader, PaginationResult, SelectCheckbox, TableSnapshot,
};

// ============================================================================
// PaginationTablePage
// ============================================================================

/// Reads the product table page by page.
#[derive(Debug, Clone)]
pub struct PaginationTablePage {
    ctx: UiContext,
    reader: PaginatedTableReader,
}

impl PaginationTablePage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &PaginationConfig) -> Self {
        Self {
            ctx,
            reader: PaginatedTableReader::new(config.table.clone(), config.pager.clone()),
        }
    }

    /// Reads every page, selecting each row's checkbox after reading it.
    pub async fn begin_pagination(&self) -> Result<PaginationResult> {
        self.reader.collect_all(&self.ctx, Some(&SelectCheckbox)).await
    }

    /// Number of pager links.
    pub async fn page_count(&self) -> Result<usize> {
        table::page_count(&self.ctx, self.reader.pager()).await
    }

    /// Switches to `page` and reads it.
    pub async fn read_page(&self, page: usize) -> Result<TableSnapshot> {
        table::go_to_page(&self.ctx, self.reader.pager(), page).await?;
        table::read_page(&self.ctx, self.reader.table(), page).await
    }

    /// Reads whatever page is displayed.
    ///
    /// The displayed page is not tracked, so errors report page 0.
    pub async fn read_current_page(&self) -> Result<TableSnapshot> {
        table::read_page(&self.ctx, self.reader.table(), 0).await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::{FixtureDom, widgets};

    fn page() -> (FixtureDom, PaginationTablePage) {
        let dom = FixtureDom::new();
        widgets::pagination_table(&dom);
        let page = PaginationTablePage::new(dom.context(), &PaginationConfig::default());
        (dom, page)
    }

    #[tokio::test]
    async fn test_begin_pagination_shape() {
        let (_dom, page) = page();
        assert_eq!(page.page_count().await.expect("count"), 4);

        let result = page.begin_pagination().await.expect("collected");
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|snapshot| snapshot.len() == 5));
        assert!(result.iter().flatten().all(|row| row.len() == 3));
        assert_eq!(result[0][0], ["1", "Smartphone", "$10.99"]);
        assert_eq!(result[3][4], ["20", "Wireless Mouse 20", "$17.99"]);
    }

    #[tokio::test]
    async fn test_read_page_and_current() {
        let (_dom, page) = page();

        let second = page.read_page(2).await.expect("page 2");
        assert_eq!(second[0], ["6", "Bluetooth Speaker", "$9.99"]);
        assert_eq!(page.read_current_page().await.expect("current"), second);
    }
}
