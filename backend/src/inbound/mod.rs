//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]. The admin bootstrap command line lives
//! in the `create-admin` binary and calls the domain directly.

pub mod http;
