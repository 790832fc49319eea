//! Live battle streaming for browsers.
//!
//! Every progress snapshot is broadcast as JSON to connected WebSocket
//! viewers. Viewers are read-only.
//!
//! ## Usage
//!
//! Build with web feature:
//! ```sh
//! cargo build --features web
//! ```
//!
//! Run with web server:
//! ```sh
//! ./target/debug/autofighter --serve        # Default port 3000
//! ./target/debug/autofighter --serve=8080   # Custom port
//! ```
//!
//! Then open http://localhost:3000 in your browser.

#[cfg(feature = "web")]
mod server;

#[cfg(feature = "web")]
pub use server::{start_web_server, BroadcastSink, SnapshotSender, WebServer};
