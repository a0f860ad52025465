//! Domain model for RAWRR reports and their graph projection.
//!
//! # Responsibility
//! - Define the validated report shape consumed by the pipeline.
//! - Define the GraphCommons wire records produced by the pipeline.
//!
//! # Invariants
//! - Every report entry belongs to exactly one fixed `Section`.
//! - Every graph node and edge is identified by a fresh UUID v4.

pub mod graph;
pub mod report;
pub mod section;
