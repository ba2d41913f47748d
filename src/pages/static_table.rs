//! Static table page.

use crate::config::StaticTableConfig;
use crate::driver::UiContext;
use crate::error::Result;
use crate::table::{self, TableControl, TableSnapshot};

// ============================================================================
// StaticTablePage
// ============================================================================

/// Reads the single-page book table.
#[derive(Debug, Clone)]
pub struct StaticTablePage {
    ctx: UiContext,
    table: TableControl,
}

impl StaticTablePage {
    /// Creates the page object.
    #[must_use]
    pub fn new(ctx: UiContext, config: &StaticTableConfig) -> Self {
        Self {
            ctx,
            table: config.table.clone(),
        }
    }

    /// Reads every data row.
    pub async fn read_all(&self) -> Result<TableSnapshot> {
        table::read_page(&self.ctx, &self.table, 1).await
    }

    /// Number of data rows.
    pub async fn row_count(&self) -> Result<usize> {
        let rows = self.ctx.find_all(self.table.rows.clone()).await?;
        Ok(rows.len().saturating_sub(self.table.header_rows))
    }
}

// ============================================================================
// Tests
// ============================================================================
