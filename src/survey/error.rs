//! Error types for hydrogen-bond surveys.
//!
//! Per-candidate failures ([`Error::MissingAtom`], [`Error::DegenerateGeometry`])
//! are recoverable: the pipeline counts them and moves on to the next pair.
//! Configuration and input failures abort the run before enumeration starts.

use crate::model::atom::ResidueId;
use thiserror::Error;

/// Errors that can occur while surveying a structure.
#[derive(Debug, Error)]
pub enum Error {
    /// A companion atom required to build or orient a bond is absent.
    ///
    /// Raised for a donor residue without hydrogens, an acceptor residue
    /// without a carbonyl `C`, or a carbonyl with no peptide-bonded `N` after it.
    #[error("residue {residue} has no {atom} atom")]
    MissingAtom {
        /// Residue that was searched.
        residue: ResidueId,
        /// Atom name or element that was expected.
        atom: &'static str,
    },

    /// A zero-length vector or collinear plane span fed an angle computation.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// A threshold is out of its admissible range.
    #[error("invalid survey configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse a TOML survey configuration.
    #[error("failed to parse survey configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The structure contains no atoms.
    #[error("input structure is empty: at least one atom is required")]
    EmptyStructure,
}

impl Error {
    /// Creates a [`MissingAtom`](Error::MissingAtom) error.
    pub fn missing_atom(residue: ResidueId, atom: &'static str) -> Self {
        Self::MissingAtom { residue, atom }
    }

    /// Whether the pipeline should skip the current candidate rather than abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MissingAtom { .. } | Error::DegenerateGeometry(_)
        )
    }
}
