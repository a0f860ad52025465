//! Report-to-graph transformation phases.
//!
//! # Responsibility
//! - Index entries into nodes and per-section lookups.
//! - Resolve relation fields into edges against those lookups.
//! - Assemble nodes, edges and type catalogs into the import envelope.
//!
//! # Invariants
//! - Indexing completes before resolution starts, so forward references resolve.
//! - Lookups live only for one conversion and are read-only after indexing.

pub mod assemble;
pub mod catalog;
pub mod index;
pub mod resolve;
