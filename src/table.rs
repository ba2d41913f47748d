//! Table extraction across pages.
//!
//! Reading and acting are separate steps: [`read_page`] only reads cell text,
//! [`apply_row_action`] only acts on each row's action column, and
//! [`PaginatedTableReader::collect_all`] composes them page by page.
//!
//! # Result Shape
//!
//! | Type | Shape |
//! |------|-------|
//! | [`TableSnapshot`] | rows → cell texts, header excluded |
//! | [`PaginationResult`] | one snapshot per page, in page order |

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::driver::{By, UiContext, UiNode};
use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// One page of rows, each row a list of cell texts.
pub type TableSnapshot = Vec<Vec<String>>;

/// Every page's snapshot, first page first.
pub type PaginationResult = Vec<TableSnapshot>;

/// What to do with cells whose text is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellPolicy {
    /// Drop them; the row comes back shorter.
    #[default]
    SkipEmpty,
    /// Keep them as empty strings.
    KeepEmpty,
}

// ============================================================================
// TableControl
// ============================================================================

/// Locators for a table's rows and cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableControl {
    /// Every row of the table, header included.
    pub rows: By,
    /// Leading rows to skip.
    pub header_rows: usize,
    /// Cells, relative to a row.
    pub cells: By,
    /// The action column's node, relative to a row.
    pub action: By,
    /// Raw cell count every data row must have, if any.
    pub expected_columns: Option<usize>,
    /// Empty cell handling.
    pub cell_policy: CellPolicy,
}

impl Default for TableControl {
    fn default() -> Self {
        Self::new(By::css("table tr"))
    }
}

impl TableControl {
    /// Creates a control with one header row, `td` cells and an `input`
    /// action column.
    #[must_use]
    pub fn new(rows: By) -> Self {
        Self {
            rows,
            header_rows: 1,
            cells: By::tag("td"),
            action: By::css("input"),
            expected_columns: None,
            cell_policy: CellPolicy::SkipEmpty,
        }
    }

    /// Sets the action column locator.
    #[must_use]
    pub fn with_action(mut self, action: By) -> Self {
        self.action = action;
        self
    }

    /// Sets the raw cell count every data row must have.
    #[must_use]
    pub fn with_expected_columns(mut self, columns: usize) -> Self {
        self.expected_columns = Some(columns);
        self
    }

    /// Sets the empty cell policy.
    #[must_use]
    pub fn with_cell_policy(mut self, policy: CellPolicy) -> Self {
        self.cell_policy = policy;
        self
    }

    /// Sets the number of header rows.
    #[must_use]
    pub fn with_header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }
}

// ============================================================================
// PagerControl
// ============================================================================

/// Locator for a pager's page-index links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PagerControl {
    /// One node per page, labelled with its number.
    pub links: By,
}

impl Default for PagerControl {
    fn default() -> Self {
        Self {
            links: By::css("ul#pagination a"),
        }
    }
}

impl PagerControl {
    /// Creates a pager control.
    #[must_use]
    pub fn new(links: By) -> Self {
        Self { links }
    }
}

// ============================================================================
// RowAction
// ============================================================================

/// Side effect applied to each row's action node.
#[async_trait]
pub trait RowAction: Send + Sync {
    /// Acts on one row's action node.
    async fn apply(&self, target: &UiNode) -> Result<()>;
}

/// Clicks the action node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickAction;

#[async_trait]
impl RowAction for ClickAction {
    async fn apply(&self, target: &UiNode) -> Result<()> {
        target.click().await
    }
}

/// Clicks the action node unless it is already selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectCheckbox;

#[async_trait]
impl RowAction for SelectCheckbox {
    async fn apply(&self, target: &UiNode) -> Result<()> {
        if target.is_selected().await? {
            return Ok(());
        }
        target.click().await
    }
}

// ============================================================================
// Page Operations
// ============================================================================

/// Reads the visible rows, header excluded.
///
/// `page` only labels errors.
///
/// # Errors
///
/// [`Error::RowReadError`] if a row's raw cell count differs from
/// `expected_columns`.
pub async fn read_page(ctx: &UiContext, control: &TableControl, page: usize) -> Result<TableSnapshot> {
    let rows = ctx.find_all(control.rows.clone()).await?;
    let mut snapshot = Vec::with_capacity(rows.len().saturating_sub(control.header_rows));

    for (index, row) in rows.iter().skip(control.header_rows).enumerate() {
        let cells = row.find_all(control.cells.clone()).await?;
        if let Some(expected) = control.expected_columns
            && cells.len() != expected
        {
            return Err(Error::row_read(page, index + 1, expected, cells.len()));
        }

        let mut values = Vec::with_capacity(cells.len());
        for cell in &cells {
            let text = cell.text().await?;
            if text.is_empty() && control.cell_policy == CellPolicy::SkipEmpty {
                continue;
            }
            values.push(text);
        }
        snapshot.push(values);
    }

    debug!(page, rows = snapshot.len(), "Read table page");
    Ok(snapshot)
}

/// Applies `action` to every data row's action node, in row order.
///
/// Returns the number of rows acted on.
pub async fn apply_row_action(
    ctx: &UiContext,
    control: &TableControl,
    action: &dyn RowAction,
) -> Result<usize> {
    let rows = ctx.find_all(control.rows.clone()).await?;
    let mut applied = 0usize;

    for row in rows.iter().skip(control.header_rows) {
        let target = row.find(control.action.clone()).await?;
        action.apply(&target).await?;
        applied += 1;
    }

    debug!(rows = applied, "Applied row action");
    Ok(applied)
}

/// Counts the pager's page links.
///
/// # Errors
///
/// [`Error::PagerControlMissing`] if there are none.
pub async fn page_count(ctx: &UiContext, pager: &PagerControl) -> Result<usize> {
    let links = ctx.find_all(pager.links.clone()).await?;
    if links.is_empty() {
        return Err(Error::pager_control_missing(pager.links.to_string()));
    }
    Ok(links.len())
}

/// Clicks the pager link labelled `page`.
pub async fn go_to_page(ctx: &UiContext, pager: &PagerControl, page: usize) -> Result<()> {
    let label = page.to_string();
    for link in ctx.find_all(pager.links.clone()).await? {
        if link.text().await?.trim() == label {
            debug!(page, "Switching page");
            return link.click().await;
        }
    }
    Err(Error::element_not_found(
        format!("{} [text={label}]", pager.links),
        ctx.scope().to_string(),
    ))
}

// ============================================================================
// PaginatedTableReader
// ============================================================================

/// Reads a table across every page of its pager.
#[derive(Debug, Clone, Default)]
pub struct PaginatedTableReader {
    table: TableControl,
    pager: PagerControl,
}

impl PaginatedTableReader {
    /// Creates a reader.
    #[must_use]
    pub fn new(table: TableControl, pager: PagerControl) -> Self {
        Self { table, pager }
    }

    /// Returns the table locators.
    #[inline]
    #[must_use]
    pub fn table(&self) -> &TableControl {
        &self.table
    }

    /// Returns the pager locators.
    #[inline]
    #[must_use]
    pub fn pager(&self) -> &PagerControl {
        &self.pager
    }

    /// Visits pages 1..=N in order, reading each and then applying `action`
    /// to its rows.
    ///
    /// Page 1 is read as displayed; later pages are reached by clicking
    /// their numbered link.
    ///
    /// # Errors
    ///
    /// - [`Error::PagerControlMissing`] before any page switch if the pager
    ///   has no links
    /// - [`Error::RowReadError`] from [`read_page`]
    pub async fn collect_all(
        &self,
        ctx: &UiContext,
        action: Option<&dyn RowAction>,
    ) -> Result<PaginationResult> {
        let pages = page_count(ctx, &self.pager).await?;
        let mut result = Vec::with_capacity(pages);

        for page in 1..=pages {
            if page > 1 {
                go_to_page(ctx, &self.pager, page).await?;
            }

            let snapshot = read_page(ctx, &self.table, page).await?;
            if let Some(action) = action {
                apply_row_action(ctx, &self.table, action).await?;
            }
            result.push(snapshot);
        }

        let rows: usize = result.iter().map(Vec::len).sum();
        info!(pages, rows, "Collected paginated table");
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixture::widgets::{self, PRODUCTS, PRODUCTS_PER_PAGE};
    use crate::fixture::{FixtureDom, FixtureNode};

    fn product_reader() -> PaginatedTableReader {
        PaginatedTableReader::new(
            TableControl::new(By::css("table#productTable tr"))
                .with_action(By::css("input[type='checkbox']"))
                .with_expected_columns(4),
            PagerControl::default(),
        )
    }

    fn ragged_table(dom: &FixtureDom) {
        let table = dom.append_to_document(FixtureNode::new("table").with_id("t"));
        let header = dom.append_child(&table, FixtureNode::new("tr"));
        dom.append_child(&header, FixtureNode::new("th").with_text("A"));
        for cells in [["a1", "b1", "c1"], ["a2", "", "c2"], ["", "", "c3"]] {
            let row = dom.append_child(&table, FixtureNode::new("tr"));
            for text in cells {
                dom.append_child(&row, FixtureNode::new("td").with_text(text));
            }
        }
    }

    #[tokio::test]
    async fn test_collect_all_pages() {
        let dom = FixtureDom::new();
        widgets::pagination_table(&dom);

        let result = product_reader()
            .collect_all(&dom.context(), None)
            .await
            .expect("collected");

        assert_eq!(result.len(), 4);
        for (page, snapshot) in result.iter().enumerate() {
            assert_eq!(snapshot.len(), PRODUCTS_PER_PAGE);
            for (row, cells) in snapshot.iter().enumerate() {
                let (id, name, price) = PRODUCTS[page * PRODUCTS_PER_PAGE + row];
                assert_eq!(cells, &[id, name, price]);
            }
        }
    }

    #[tokio::test]
    async fn test_row_action_once_per_row() {
        let dom = FixtureDom::new();
        widgets::pagination_table(&dom);
        let ctx = dom.context();

        product_reader()
            .collect_all(&ctx, Some(&SelectCheckbox))
            .await
            .expect("collected");

        // 3 page switches + 20 checkboxes
        assert_eq!(dom.stats().clicks, 23);

        let boxes = ctx
            .find_all(By::css("table#productTable input[type='checkbox']"))
            .await
            .expect("boxes");
        assert_eq!(boxes.len(), PRODUCTS_PER_PAGE);
        for checkbox in boxes {
            assert!(checkbox.is_selected().await.expect("state"));
        }
    }

    #[tokio::test]
    async fn test_missing_pager() {
        let dom = FixtureDom::new();
        widgets::pagination_table(&dom);
        dom.with_tree(|tree| {
            if let Some(pager) = tree.element_by_id("pagination") {
                tree.remove_children(&pager);
            }
        });

        let err = product_reader()
            .collect_all(&dom.context(), Some(&ClickAction))
            .await
            .expect_err("no links");

        assert!(matches!(err, Error::PagerControlMissing { .. }));
        assert_eq!(dom.stats().clicks, 0);
    }

    #[tokio::test]
    async fn test_skip_empty_cells() {
        let dom = FixtureDom::new();
        ragged_table(&dom);
        let ctx = dom.context();
        let control = TableControl::new(By::css("table#t tr"));

        let first = read_page(&ctx, &control, 1).await.expect("read");
        assert_eq!(first, vec![vec!["a1", "b1", "c1"], vec!["a2", "c2"], vec!["c3"]]);

        let again = read_page(&ctx, &control, 1).await.expect("read");
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn test_keep_empty_cells() {
        let dom = FixtureDom::new();
        ragged_table(&dom);
        let control =
            TableControl::new(By::css("table#t tr")).with_cell_policy(CellPolicy::KeepEmpty);

        let snapshot = read_page(&dom.context(), &control, 1).await.expect("read");
        assert_eq!(snapshot[2], ["", "", "c3"]);
    }

    #[tokio::test]
    async fn test_column_count_mismatch() {
        let dom = FixtureDom::new();
        ragged_table(&dom);
        dom.with_tree(|tree| {
            if let Some(table) = tree.element_by_id("t") {
                let row = tree.append_child(&table, FixtureNode::new("tr"));
                tree.append_child(&row, FixtureNode::new("td").with_text("short"));
            }
        });
        let control = TableControl::new(By::css("table#t tr")).with_expected_columns(3);

        let err = read_page(&dom.context(), &control, 2).await.expect_err("ragged");
        assert!(matches!(
            err,
            Error::RowReadError { page: 2, row: 4, expected: 3, found: 1 }
        ));
    }

    #[tokio::test]
    async fn test_go_to_unknown_page() {
        let dom = FixtureDom::new();
        widgets::pagination_table(&dom);

        let err = go_to_page(&dom.context(), &PagerControl::default(), 9)
            .await
            .expect_err("only four pages");
        assert!(err.is_element_error());
    }
}
