//! Error types for widget verification.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use widget_verify::{Result, SelectorPath, shadow};
//!
//! async fn example(ctx: &UiContext) -> Result<()> {
//!     let path = SelectorPath::parse("div#shadow_host >>> span.info")?;
//!     let span = shadow::locate(ctx, &path).await?;
//!     span.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Traversal | [`Error::ElementNotFound`], [`Error::NoEncapsulatedScope`], [`Error::StaleNode`] |
//! | Calendar | [`Error::DayNotFound`], [`Error::StepLimitExceeded`], [`Error::CalendarHeader`] |
//! | Table | [`Error::PagerControlMissing`], [`Error::RowReadError`] |
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Protocol`], [`Error::RequestTimeout`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::calendar::Month;
use crate::identifiers::{NodeId, RequestId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Every variant is terminal for the operation that raised it; nothing in
/// the crate retries.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Traversal Errors
    // ========================================================================
    /// No node matched a locator in the given scope.
    #[error("Element not found: {selector} (scope: {scope})")]
    ElementNotFound {
        /// Locator that matched nothing.
        selector: String,
        /// Scope the query ran against.
        scope: String,
    },

    /// A boundary host does not expose an inner scope.
    #[error("No encapsulated scope under host: {selector}")]
    NoEncapsulatedScope {
        /// Locator of the host node.
        selector: String,
    },

    /// A node handle outlived the node it refers to.
    #[error("Stale node: {node_id}")]
    StaleNode {
        /// The stale node's ID.
        node_id: NodeId,
    },

    // ========================================================================
    // Calendar Errors
    // ========================================================================
    /// The resolved month view has no day with the requested label.
    #[error("Day {day} not found in {month} {year}")]
    DayNotFound {
        /// Requested day of month.
        day: u32,
        /// Month on display.
        month: Month,
        /// Year on display.
        year: i32,
    },

    /// Navigation did not reach the target within the configured step budget.
    #[error("Calendar navigation exceeded {limit} steps while heading to {month} {year}")]
    StepLimitExceeded {
        /// Maximum number of clicks allowed.
        limit: usize,
        /// Target month.
        month: Month,
        /// Target year.
        year: i32,
    },

    /// The calendar header could not be read as a month or year.
    #[error("Unreadable calendar header: {label:?}")]
    CalendarHeader {
        /// Raw header text.
        label: String,
    },

    // ========================================================================
    // Table Errors
    // ========================================================================
    /// The pager rendered no page-index affordances.
    #[error("Pager has no page links: {selector}")]
    PagerControlMissing {
        /// Locator of the page links.
        selector: String,
    },

    /// A row's cell count differs from what the table declares.
    #[error("Row {row} on page {page} has {found} cells, expected {expected}")]
    RowReadError {
        /// Page the row was read from (1-based).
        page: usize,
        /// Data row index (1-based, header excluded).
        row: usize,
        /// Declared cell count.
        expected: usize,
        /// Actual cell count.
        found: usize,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Timed out waiting for the remote bridge.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Protocol violation or error response from the remote end.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    /// Command request timeout.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
            scope: scope.into(),
        }
    }

    /// Creates a missing inner scope error.
    #[inline]
    pub fn no_encapsulated_scope(selector: impl Into<String>) -> Self {
        Self::NoEncapsulatedScope {
            selector: selector.into(),
        }
    }

    /// Creates a stale node error.
    #[inline]
    pub fn stale_node(node_id: NodeId) -> Self {
        Self::StaleNode { node_id }
    }

    /// Creates a day not found error.
    #[inline]
    pub fn day_not_found(day: u32, month: Month, year: i32) -> Self {
        Self::DayNotFound { day, month, year }
    }

    /// Creates a step limit error.
    #[inline]
    pub fn step_limit_exceeded(limit: usize, month: Month, year: i32) -> Self {
        Self::StepLimitExceeded { limit, month, year }
    }

    /// Creates a calendar header error.
    #[inline]
    pub fn calendar_header(label: impl Into<String>) -> Self {
        Self::CalendarHeader {
            label: label.into(),
        }
    }

    /// Creates a missing pager error.
    #[inline]
    pub fn pager_control_missing(selector: impl Into<String>) -> Self {
        Self::PagerControlMissing {
            selector: selector.into(),
        }
    }

    /// Creates a row read error.
    #[inline]
    pub fn row_read(page: usize, row: usize, expected: usize, found: usize) -> Self {
        Self::RowReadError {
            page,
            row,
            expected,
            found,
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. } | Self::RequestTimeout { .. }
        )
    }

    /// Returns `true` if a node could not be resolved.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::NoEncapsulatedScope { .. }
                | Self::StaleNode { .. }
        )
    }

    /// Returns `true` if a widget could not be driven to the requested state.
    #[inline]
    #[must_use]
    pub fn is_navigation_error(&self) -> bool {
        matches!(
            self,
            Self::DayNotFound { .. }
                | Self::StepLimitExceeded { .. }
                | Self::CalendarHeader { .. }
                | Self::PagerControlMissing { .. }
        )
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_element_not_found_display() {
        let err = Error::element_not_found("css:span.info", "shadow(node-3)");
        assert_eq!(
            err.to_string(),
            "Element not found: css:span.info (scope: shadow(node-3))"
        );
    }

    #[test]
    fn test_day_not_found_display() {
        let err = Error::day_not_found(31, Month::April, 2025);
        assert_eq!(err.to_string(), "Day 31 not found in April 2025");
    }

    #[test]
    fn test_row_read_display() {
        let err = Error::row_read(2, 4, 4, 3);
        assert_eq!(err.to_string(), "Row 4 on page 2 has 3 cells, expected 4");
    }

    #[test]
    fn test_is_element_error() {
        assert!(Error::no_encapsulated_scope("div#host").is_element_error());
        assert!(Error::element_not_found("a", "document").is_element_error());
        assert!(!Error::config("x").is_element_error());
    }

    #[test]
    fn test_is_navigation_error() {
        assert!(Error::pager_control_missing("ul a").is_navigation_error());
        assert!(Error::step_limit_exceeded(5, Month::May, 2020).is_navigation_error());
        assert!(!Error::ConnectionClosed.is_navigation_error());
    }

    #[test]
    fn test_is_connection_error() {
        assert!(Error::connection("refused").is_connection_error());
        assert!(Error::connection_timeout(1000).is_connection_error());
        assert!(Error::ConnectionClosed.is_connection_error());
        assert!(!Error::protocol("bad").is_connection_error());
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::request_timeout(RequestId::generate(), 10).is_timeout());
        assert!(!Error::ConnectionClosed.is_timeout());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
