//! WebSocket protocol message types.
//!
//! This module defines the message format between the suite (local end) and
//! the browser-side automation bridge (remote end).
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Request` | Local → Remote | Command request |
//! | `Response` | Remote → Local | Command response |
//!
//! The bridge opens with a READY response carrying the nil request ID.
//!
//! # Command Naming
//!
//! Commands follow `module.methodName` format:
//!
//! - `browsingContext.navigate`
//! - `element.find`
//! - `input.typeText`
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by domain |
//! | `request` | Request and Response types |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by module.
pub mod command;

/// Request and Response message types.
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{BrowsingContextCommand, Command, ElementCommand, InputCommand, SearchRoot};
pub use request::{Request, Response, ResponseType};
