//! wsforge - Remote Development Workspace Provisioner
//!
//! Provisions a single-user development workspace backed by a container,
//! resolving the container image against an optional remote build cache.

pub mod agent;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod orchestration;
pub mod provision;
pub mod workspace;

pub use error::{WsforgeError, WsforgeResult};
