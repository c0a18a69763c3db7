//! HTTP/1.0 protocol handling.
//!
//! - **`connection`**: reads the header block, parses it and dispatches
//! - **`parser`**: request-line parsing and line framing helpers
//! - **`request`**: the parsed request line and known methods
//! - **`response`**: status codes, the response value and the canned pages
//! - **`writer`**: serializes responses onto the stream
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read lines until the blank line
//!        └──────┬──────┘
//!               │ Request line parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← GET → 200/404, anything else → 501
//!        └──────┬───────────┘
//!               │ Response written
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! Early close, an oversized head or a malformed request line go straight
//! from Reading to Closed without writing anything.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
