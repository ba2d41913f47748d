//! Page objects for the demo widgets.
//!
//! Each page object owns a query context plus its locators and exposes the
//! actions and reads a check needs. The traversal logic lives in
//! [`shadow`](crate::shadow), [`calendar`](crate::calendar) and
//! [`table`](crate::table); page objects only wire it to a page.
//!
//! | Page | Widget |
//! |------|--------|
//! | [`ShadowDomPage`] | Shadow host with a nested host |
//! | [`DatePickerPage`] | jQuery UI date picker |
//! | [`PaginationTablePage`] | Product table with a numbered pager |
//! | [`StaticTablePage`] | Book table |
//! | [`CheckboxesPage`] | Checkbox list |
//! | [`RadioButtonsPage`] | Radio group with a disabled entry |
//! | [`DropdownsPage`] | Single and multi-select lists |
//! | [`FileUploadPage`] | Upload form and result |

// ============================================================================
// Submodules
// ============================================================================

/// Checkbox list page.
pub mod checkboxes;

/// Date picker page.
pub mod date_picker;

/// Dropdown page.
pub mod dropdowns;

/// File upload page.
pub mod file_upload;

/// Paginated table page.
pub mod pagination_table;

/// Radio button page.
pub mod radio_buttons;

/// Shadow DOM page.
pub mod shadow_dom;

/// Static table page.
pub mod static_table;

// ============================================================================
// Re-exports
// ============================================================================

pub use checkboxes::CheckboxesPage;
pub use date_picker::DatePickerPage;
pub use dropdowns::{DropdownsPage, SelectList};
pub use file_upload::FileUploadPage;
pub use pagination_table::PaginationTablePage;
pub use radio_buttons::{Answer, RadioButtonsPage};
pub use shadow_dom::ShadowDomPage;
pub use static_table::StaticTablePage;
