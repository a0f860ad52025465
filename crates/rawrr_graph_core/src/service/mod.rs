//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parse, index, resolve and assemble into one conversion.
//! - Keep CLI callers decoupled from pipeline phase details.

pub mod convert_service;
