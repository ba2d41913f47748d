//! Widget Verify - page objects and traversal algorithms for demo-site widgets.
//!
//! This library checks the UI widgets of public automation practice pages:
//! a shadow DOM with a nested host, a jQuery UI date picker, a paginated
//! product table, a static book table, and the checkbox, radio, dropdown and
//! file upload forms. The widget logic is written against a small driver
//! trait, so the same checks run against a live browser or an in-memory
//! replica.
//!
//! # Architecture
//!
//! - **Algorithms**: [`shadow`] walks selector paths through encapsulated
//!   scopes, [`calendar`] steps a month view to a target date, [`table`]
//!   reads rows and walks a pager
//! - **Page objects**: [`pages`] wire the algorithms to concrete locators
//! - **Backends**: [`RemoteDriver`] talks to an in-browser bridge over
//!   WebSocket, [`FixtureDom`](fixture::FixtureDom) answers from memory
//!
//! # Quick Start
//!
//! ```no_run
//! use widget_verify::{DatePickerPage, Month, Result, SuiteConfig, TargetDate};
//! use widget_verify::fixture::{FixtureDom, widgets};
//! use widget_verify::calendar::CalendarState;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SuiteConfig::from_env()?;
//!
//!     let dom = FixtureDom::new();
//!     widgets::date_picker(&dom, CalendarState::new(Month::October, 2025));
//!
//!     let page = DatePickerPage::new(dom.context(), &config.calendar);
//!     page.open().await?;
//!     page.select_date(&"01/26/2026".parse::<TargetDate>()?).await?;
//!     assert_eq!(page.selected_date().await?.as_deref(), Some("01/26/2026"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`calendar`] | Month arithmetic and date picker navigation |
//! | [`config`] | Suite configuration |
//! | [`driver`] | Driver trait, contexts, node handles, locators |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`fixture`] | In-memory DOM backend |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`pages`] | Page objects |
//! | [`protocol`] | WebSocket message types (internal) |
//! | [`shadow`] | Shadow-piercing selector paths |
//! | [`table`] | Table reading and pagination |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Month arithmetic and date picker navigation.
pub mod calendar;

/// Suite configuration.
///
/// Load with [`SuiteConfig::from_env`] or build from defaults.
pub mod config;

/// Driver trait, query contexts and node handles.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// In-memory DOM backend.
pub mod fixture;

/// Type-safe identifiers.
pub mod identifiers;

/// Page objects for the demo widgets.
pub mod pages;

/// WebSocket protocol message types.
///
/// Internal module defining command/response structures.
pub mod protocol;

/// Shadow-piercing selector paths.
pub mod shadow;

/// Table reading and pagination.
pub mod table;

/// WebSocket transport layer.
///
/// Internal module handling the WebSocket server and connection.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Algorithm types
pub use calendar::{CalendarControl, CalendarNavigator, Month, TargetDate};
pub use shadow::SelectorPath;
pub use table::{
    CellPolicy, PagerControl, PaginatedTableReader, PaginationResult, RowAction, TableControl,
    TableSnapshot,
};

// Configuration
pub use config::SuiteConfig;

// Driver types
pub use driver::{By, RemoteDriver, Scope, UiContext, UiDriver, UiNode};

// Error types
pub use error::{Error, Result};

// Page objects
pub use pages::{
    Answer, CheckboxesPage, DatePickerPage, DropdownsPage, FileUploadPage, PaginationTablePage,
    RadioButtonsPage, SelectList, ShadowDomPage, StaticTablePage,
};
