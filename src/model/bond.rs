use super::class::StructuralClass;
use serde::Serialize;

/// A donor/acceptor pair with its companion atoms, as atom indices into a
/// [`Structure`](super::structure::Structure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateBond {
    pub donor: usize,
    pub hydrogen: usize,
    pub acceptor: usize,
    /// Carbonyl carbon `C` of the acceptor's residue.
    pub antecedent: usize,
}

/// The six quantities recorded per accepted bond.
///
/// Distances in Ångströms, angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Measurements {
    pub donor_acceptor_distance: f64,
    pub hydrogen_acceptor_distance: f64,
    pub dha_angle: f64,
    pub hab_angle: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Measurements {
    pub const COLUMN_COUNT: usize = 6;

    /// Short column headers, in [`Measurements::to_array`] order.
    pub const HEADERS: [&'static str; 6] =
        ["D_ON", "D_OH", "ANGLE(NHO)", "ANGLE(HOC)", "BETA", "GAMMA"];

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.donor_acceptor_distance,
            self.hydrogen_acceptor_distance,
            self.dha_angle,
            self.hab_angle,
            self.beta,
            self.gamma,
        ]
    }

    pub fn from_array(values: [f64; 6]) -> Self {
        Self {
            donor_acceptor_distance: values[0],
            hydrogen_acceptor_distance: values[1],
            dha_angle: values[2],
            hab_angle: values[3],
            beta: values[4],
            gamma: values[5],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedBond {
    pub candidate: CandidateBond,
    /// Backbone `N` of the residue after the antecedent's, peptide-bonded to
    /// the antecedent `C` and closing the N–C–O plane.
    pub plane_nitrogen: usize,
    /// Bucket taken from the antecedent atom, not the donor.
    pub class: StructuralClass,
    pub measurements: Measurements,
    /// Donor–acceptor–antecedent angle (criterion 4); not tabulated.
    pub dab_angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_array_order_matches_headers() {
        let m = Measurements {
            donor_acceptor_distance: 2.9,
            hydrogen_acceptor_distance: 1.9,
            dha_angle: 160.0,
            hab_angle: 150.0,
            beta: 10.0,
            gamma: -30.0,
        };
        assert_eq!(m.to_array(), [2.9, 1.9, 160.0, 150.0, 10.0, -30.0]);
        assert_eq!(Measurements::from_array(m.to_array()), m);
        assert_eq!(Measurements::HEADERS[0], "D_ON");
        assert_eq!(Measurements::HEADERS.len(), Measurements::COLUMN_COUNT);
    }
}
