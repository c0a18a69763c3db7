//! webserver - a minimal HTTP/1.0 server
//!
//! Serves a fixed page for `GET /`, a 404 page for any other path and a bare
//! `501` status line for any other method.

pub mod config;
pub mod http;
pub mod server;
