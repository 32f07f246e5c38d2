//! Control-plane API payloads
//!
//! Request/response shapes for the control plane's action-style JSON API.
//! Field names follow the wire contract (camelCase), with unset optional
//! fields omitted from serialization entirely.

pub mod services;
pub mod taskdefs;
pub mod tasks;
