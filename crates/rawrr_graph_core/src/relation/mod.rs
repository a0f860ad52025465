//! Inter-section relationship rules.
//!
//! # Responsibility
//! - Declare which section links to which, through which field.
//! - Keep the rule set as data so the resolver carries no per-section branches.

pub mod policy;
