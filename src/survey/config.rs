//! Configuration types for hydrogen-bond surveys.
//!
//! - [`SurveyConfig`] — Main configuration struct
//! - [`Thresholds`] — Distance and angle cutoffs for the five acceptance criteria
//! - [`HydrogenSelection`] — Which hydrogen of the donor residue is paired
//! - [`PairingPolicy`] — Whether a donor or acceptor may take part in several bonds
//!
//! Every type deserializes from TOML with all fields optional:
//!
//! ```
//! use hbond_census::SurveyConfig;
//!
//! let config = SurveyConfig::from_toml_str(r#"
//!     hydrogen = "nearest"
//!
//!     [thresholds]
//!     donor_acceptor_max_distance = 3.2
//!     dhaAngleMin = 120.0
//! "#)?;
//!
//! assert_eq!(config.thresholds.donor_acceptor_max_distance, 3.2);
//! assert_eq!(config.thresholds.dha_angle_min, 120.0);
//! assert_eq!(config.thresholds.hydrogen_acceptor_max_distance, 2.5);
//! # Ok::<(), hbond_census::SurveyError>(())
//! ```

use super::error::Error;
use serde::{Deserialize, Serialize};

/// Main configuration for a survey run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Acceptance cutoffs.
    pub thresholds: Thresholds,

    /// Hydrogen chosen from the donor's residue.
    pub hydrogen: HydrogenSelection,

    /// Exclusivity of donors and acceptors across accepted bonds.
    pub pairing: PairingPolicy,
}

impl SurveyConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        let config = Self::parse_toml(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document without range checks, for callers that layer
    /// further values on top before calling [`validate`](Self::validate).
    pub fn parse_toml(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.thresholds.validate()
    }
}

/// Cutoffs for the five geometric criteria.
///
/// Distances are strict upper bounds (Å); angles are strict lower bounds (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Thresholds {
    #[serde(alias = "donorAcceptorMaxDistance")]
    pub donor_acceptor_max_distance: f64,
    #[serde(alias = "hydrogenAcceptorMaxDistance")]
    pub hydrogen_acceptor_max_distance: f64,
    #[serde(alias = "dhaAngleMin")]
    pub dha_angle_min: f64,
    #[serde(alias = "dabAngleMin")]
    pub dab_angle_min: f64,
    #[serde(alias = "habAngleMin")]
    pub hab_angle_min: f64,
}

pub const DONOR_ACCEPTOR_MAX_DISTANCE: f64 = 3.5;
pub const HYDROGEN_ACCEPTOR_MAX_DISTANCE: f64 = 2.5;
pub const DHA_ANGLE_MIN: f64 = 90.0;
pub const DAB_ANGLE_MIN: f64 = 90.0;
pub const HAB_ANGLE_MIN: f64 = 90.0;

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            donor_acceptor_max_distance: DONOR_ACCEPTOR_MAX_DISTANCE,
            hydrogen_acceptor_max_distance: HYDROGEN_ACCEPTOR_MAX_DISTANCE,
            dha_angle_min: DHA_ANGLE_MIN,
            dab_angle_min: DAB_ANGLE_MIN,
            hab_angle_min: HAB_ANGLE_MIN,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("donor_acceptor_max_distance", self.donor_acceptor_max_distance),
            (
                "hydrogen_acceptor_max_distance",
                self.hydrogen_acceptor_max_distance,
            ),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive distance, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("dha_angle_min", self.dha_angle_min),
            ("dab_angle_min", self.dab_angle_min),
            ("hab_angle_min", self.hab_angle_min),
        ] {
            if !value.is_finite() || !(0.0..=180.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must lie within [0, 180] degrees, got {value}"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrogenSelection {
    /// First hydrogen of the donor residue in file order.
    #[default]
    First,
    /// Hydrogen of the donor residue closest to the donor atom.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingPolicy {
    /// Every accepted pair is recorded; atoms may appear in many bonds.
    #[default]
    AllPairs,
    /// Greedy one-bond-per-atom matching, shortest H···A distance first.
    Exclusive,
}
