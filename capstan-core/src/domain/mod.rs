//! Core domain types
//!
//! This module contains the domain structures shared across Capstan crates.
//! They mirror the control plane's view of the world: versioned task
//! definitions, services with rollout records, and running task instances.

pub mod ident;
pub mod service;
pub mod task;
pub mod taskdef;
