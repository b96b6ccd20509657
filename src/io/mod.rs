//! Reading PDB structures and writing survey results.
//!
//! - [`read_structure`] / [`count_models`] — PDB input through `pdbtbx`
//! - [`write_summary`] / [`write_summaries`] — per-class tables as text, CSV or JSON
//! - [`AuditWriter`] — one CSV line per accepted bond, header written once

use crate::model::structure::Structure;
use std::fmt;
use std::io::BufRead;

pub mod error;

mod export;
mod pdb;

pub use error::Error;
pub use export::{AuditWriter, write_summaries, write_summary};

/// Handling of atoms with alternate-location identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AltLocPolicy {
    /// Keep blank identifiers and the first identifier seen for each atom.
    #[default]
    FirstOnly,
    /// Keep every alternate location.
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadConfig {
    /// 1-based model serial.
    pub model: usize,
    /// Restrict to one chain; `None` keeps every chain. `Some('A')` matches
    /// the chain-A selection common in single-chain surveys.
    pub chain: Option<char>,
    pub alt_locs: AltLocPolicy,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            model: 1,
            chain: None,
            alt_locs: AltLocPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Text => write!(f, "text"),
            TableFormat::Csv => write!(f, "CSV"),
            TableFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Reads one model of a PDB file, with secondary structure taken from its
/// `HELIX` and `SHEET` records.
///
/// # Errors
///
/// Returns [`Error::ModelNotFound`] when `config.model` is absent,
/// [`Error::EmptyStructure`] when filtering leaves no atoms, and
/// [`Error::Parse`] for malformed coordinate records.
pub fn read_structure<R: BufRead>(reader: R, config: &ReadConfig) -> Result<Structure, Error> {
    pdb::read(reader, config)
}

/// Number of models in a PDB file: `NUMMDL`, else `MODEL` records, else 1.
pub fn count_models<R: BufRead>(reader: R) -> Result<usize, Error> {
    pdb::count_models(reader)
}
