//! Core data structures for hydrogen-bond surveys.
//!
//! - [`atom`] – Atoms with residue identity, coordinates, and a secondary-structure code.
//! - [`types`] – Chemical elements as they appear in PDB element columns.
//! - [`structure`] – A single model with an indexed residue → atoms lookup.
//! - [`class`] – Structural classes and the code → class mapping.
//! - [`bond`] – Candidate and accepted bonds with their six measurements.
//! - [`report`] – Per-class summary table and run statistics.
//!
//! Structures are read-only inputs; the survey pipeline only
//! produces new values from them.

pub mod atom;
pub mod bond;
pub mod class;
pub mod report;
pub mod structure;
pub mod types;
