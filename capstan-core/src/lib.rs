//! Capstan Core
//!
//! Core types for the Capstan deployment driver.
//!
//! This crate contains:
//! - Domain types: task definitions, services, deployments, and running tasks
//! - DTOs: request/response payloads for the control-plane API

pub mod domain;
pub mod dto;
