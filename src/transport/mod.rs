//! WebSocket transport layer.
//!
//! Carries driver commands to an automation bridge running inside a live
//! browser, and carries its responses back.
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  RemoteDriver   │         WebSocket            │  Bridge         │
//! │                 │◄────────────────────────────►│  (in browser)   │
//! │  PendingServer  │      localhost:PORT          │                 │
//! │  → Connection   │                              │  WS client      │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `PendingServer::bind` - Bind to localhost with random port
//! 2. Start the bridge, pointing it at `PendingServer::ws_url`
//! 3. `PendingServer::accept` - Wait for the bridge and its READY message
//! 4. `Connection` - Send commands, receive responses
//! 5. `Connection::shutdown` - Close the socket
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `server` | WebSocket server binding and acceptance |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// WebSocket server the bridge dials.
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, ReadyData};
pub use server::PendingServer;
