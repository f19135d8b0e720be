//! Argo CD webhook gateway core contracts.
//!
//! This crate holds the request-scoped value types exchanged by the gateway stages
//! (inbound request, validated payload, dispatch envelope, outcome), the error
//! taxonomy, and the pure decision stages that need no configuration: payload
//! validation and the header/body cluster consistency check.
pub mod cluster;
pub mod error;
pub mod outcome;
pub mod request;
pub mod types;
pub mod validate;

pub use cluster::*;
pub use error::*;
pub use outcome::*;
pub use request::*;
pub use types::*;
pub use validate::*;
