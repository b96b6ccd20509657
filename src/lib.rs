//! Backbone hydrogen-bond census for protein structures.
//!
//! Reads a PDB model, pairs every N/O donor with every carbonyl O acceptor of
//! the same secondary-structure class, screens each pair against five
//! geometric criteria, and reports per-class means of the accepted bonds:
//! donor–acceptor distance, hydrogen–acceptor distance, the D–H···A and
//! H···A=C angles, and the beta/gamma orientation of the hydrogen relative
//! to the acceptor's peptide plane.
//!
//! # Features
//!
//! - **Geometric screening** — distance and angle cutoffs applied in a fixed
//!   order, first failure wins
//! - **Peptide-plane orientation** — out-of-plane (beta) and in-plane (gamma)
//!   angles of the O→H vector against the N–C–O plane
//! - **Class statistics** — alpha helix, 3₁₀ helix and strand buckets,
//!   averaged column by column
//! - **PDB input** — model, chain and alternate-location selection with
//!   secondary structure from `HELIX`/`SHEET` records
//!
//! # Quick Start
//!
//! ```
//! use hbond_census::{StructuralClass, SurveyConfig, io, survey};
//! use std::io::Cursor;
//!
//! let pdb = [
//!     "HELIX    1   1 ALA A    1  LEU A    5  1                                   5",
//!     "ATOM      1  N   ALA A   1      -1.200  -1.200   0.000  1.00  0.00           N",
//!     "ATOM      2  CA  ALA A   1      -2.300  -0.400   0.000  1.00  0.00           C",
//!     "ATOM      3  C   ALA A   1      -1.230   0.000   0.000  1.00  0.00           C",
//!     "ATOM      4  O   ALA A   1       0.000   0.000   0.000  1.00  0.00           O",
//!     "ATOM      5  N   GLU A   2      -1.900   1.150   0.000  1.00  0.00           N",
//!     "ATOM      6  N   LEU A   5       2.900   0.200   0.000  1.00  0.00           N",
//!     "ATOM      7  CA  LEU A   5       3.600   1.400   0.000  1.00  0.00           C",
//!     "ATOM      8  H   LEU A   5       1.900   0.150   0.000  1.00  0.00           H",
//! ]
//! .join("\n");
//!
//! let structure = io::read_structure(Cursor::new(pdb), &io::ReadConfig::default())?;
//! let report = survey(&structure, &SurveyConfig::default())?;
//!
//! // One N–H···O=C bond inside the helix
//! let alpha = report.table.row(StructuralClass::AlphaHelix).unwrap();
//! assert_eq!(alpha.bonds, 1);
//! assert!((alpha.means.donor_acceptor_distance - 2.907).abs() < 1e-3);
//! assert!(alpha.means.dha_angle > 170.0);
//!
//! // The hydrogen lies in the peptide plane
//! assert!(alpha.means.beta.abs() < 1e-9);
//!
//! // The amides of residues 1 and 2 carry no hydrogen, so their pairs were skipped
//! assert_eq!(report.stats.missing_atom, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — PDB reading and summary/audit export
//! - [`survey()`] — The census pipeline
//! - [`geometry`] — Vector helpers, angles and plane decomposition
//!
//! # Data Types
//!
//! ## Input
//!
//! - [`Structure`] — Atoms of one model with a residue index
//! - [`Atom`] — Element, name, residue, position and secondary-structure code
//! - [`ResidueId`] — Chain plus sequence number
//! - [`Element`] — Chemical element from the PDB element column
//!
//! ## Output
//!
//! - [`SurveyReport`] — Summary table, accepted bonds and run statistics
//! - [`SummaryTable`] / [`ClassSummary`] — Per-class means
//! - [`AcceptedBond`] / [`Measurements`] — One recorded bond
//! - [`SurveyStats`] — Where every screened pair went
//!
//! ## Configuration
//!
//! - [`SurveyConfig`] — Thresholds, hydrogen selection and pairing policy
//! - [`Thresholds`] — The five acceptance cutoffs
//! - [`HydrogenSelection`] — First or nearest hydrogen of the donor residue
//! - [`PairingPolicy`] — All pairs or greedy one-bond-per-atom

mod model;
mod survey;

pub mod io;

pub use model::atom::{Atom, ResidueId};
pub use model::bond::{AcceptedBond, CandidateBond, Measurements};
pub use model::class::{StructuralClass, classify};
pub use model::report::{ClassSummary, SummaryTable, SurveyReport, SurveyStats};
pub use model::structure::Structure;
pub use model::types::{Element, ParseElementError};

pub use survey::{
    BondGeometry, ClassStatistics, Criteria, Criterion, DAB_ANGLE_MIN, DHA_ANGLE_MIN,
    DONOR_ACCEPTOR_MAX_DISTANCE, HAB_ANGLE_MIN, HYDROGEN_ACCEPTOR_MAX_DISTANCE, HydrogenSelection,
    Orientation, PEPTIDE_BOND_MAX_LENGTH, PairingPolicy, Screening, SurveyConfig, Thresholds,
    Verdict, evaluate, geometry, orientation, screen, survey,
};

pub use survey::Error as SurveyError;
