//! Transport-agnostic request surface
//!
//! Each request is a JSON object naming an `op`; each response carries an
//! HTTP-style `status` and a JSON `body`. Requests are validated into typed
//! values before they reach the query service.

mod protocol;
mod server;

pub use protocol::{dispatch, execute, RawRequest, Request, WireResponse};
pub use server::LineServer;
