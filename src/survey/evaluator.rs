//! Geometric acceptance test for a single donor/acceptor candidate.
//!
//! Five criteria are checked in order and the first failure ends the
//! evaluation. Accepted candidates are then oriented against the peptide
//! N–C–O plane to obtain the beta (out-of-plane) and gamma (in-plane) angles.

use super::config::Thresholds;
use super::error::Error;
use super::geometry::{
    LENGTH_EPSILON, Vec3, acos_degrees, angle, decompose, distance, dot, norm, normalize, sub,
    unit_normal,
};
use crate::model::bond::{AcceptedBond, CandidateBond, Measurements};
use crate::model::class::classify;
use crate::model::structure::Structure;
use std::fmt;

/// Longest C–N separation, in Å, still taken as a peptide bond.
pub const PEPTIDE_BOND_MAX_LENGTH: f64 = 2.0;

/// One of the five acceptance criteria, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Criterion {
    DonorAcceptorDistance,
    HydrogenAcceptorDistance,
    DhaAngle,
    DabAngle,
    HabAngle,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::DonorAcceptorDistance,
        Criterion::HydrogenAcceptorDistance,
        Criterion::DhaAngle,
        Criterion::DabAngle,
        Criterion::HabAngle,
    ];

    /// 1-based position in the evaluation order.
    pub fn number(&self) -> usize {
        match self {
            Criterion::DonorAcceptorDistance => 1,
            Criterion::HydrogenAcceptorDistance => 2,
            Criterion::DhaAngle => 3,
            Criterion::DabAngle => 4,
            Criterion::HabAngle => 5,
        }
    }

    /// Whether `value` satisfies this criterion under `thresholds`.
    pub fn accepts(&self, value: f64, thresholds: &Thresholds) -> bool {
        match self {
            Criterion::DonorAcceptorDistance => value < thresholds.donor_acceptor_max_distance,
            Criterion::HydrogenAcceptorDistance => {
                value < thresholds.hydrogen_acceptor_max_distance
            }
            Criterion::DhaAngle => value > thresholds.dha_angle_min,
            Criterion::DabAngle => value > thresholds.dab_angle_min,
            Criterion::HabAngle => value > thresholds.hab_angle_min,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Criterion::DonorAcceptorDistance => "donor-acceptor distance",
            Criterion::HydrogenAcceptorDistance => "hydrogen-acceptor distance",
            Criterion::DhaAngle => "donor-hydrogen-acceptor angle",
            Criterion::DabAngle => "donor-acceptor-antecedent angle",
            Criterion::HabAngle => "hydrogen-acceptor-antecedent angle",
        };
        f.write_str(text)
    }
}

/// Coordinates of the four atoms tested by the criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondGeometry {
    pub donor: Vec3,
    pub hydrogen: Vec3,
    pub acceptor: Vec3,
    pub antecedent: Vec3,
}

impl BondGeometry {
    pub fn of(structure: &Structure, candidate: &CandidateBond) -> Self {
        Self {
            donor: structure.atom(candidate.donor).position,
            hydrogen: structure.atom(candidate.hydrogen).position,
            acceptor: structure.atom(candidate.acceptor).position,
            antecedent: structure.atom(candidate.antecedent).position,
        }
    }
}

/// Values measured by a candidate that passed all five criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    pub donor_acceptor_distance: f64,
    pub hydrogen_acceptor_distance: f64,
    pub dha_angle: f64,
    pub dab_angle: f64,
    pub hab_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screening {
    Passed(Criteria),
    Failed(Criterion),
}

/// Applies the five criteria in order, stopping at the first failure.
///
/// Angles are only computed once the preceding checks have passed, so a
/// pair rejected on distance never reaches a degenerate angle.
pub fn screen(geometry: &BondGeometry, thresholds: &Thresholds) -> Result<Screening, Error> {
    let BondGeometry {
        donor,
        hydrogen,
        acceptor,
        antecedent,
    } = *geometry;

    let donor_acceptor_distance = distance(donor, acceptor);
    if !Criterion::DonorAcceptorDistance.accepts(donor_acceptor_distance, thresholds) {
        return Ok(Screening::Failed(Criterion::DonorAcceptorDistance));
    }

    let hydrogen_acceptor_distance = distance(hydrogen, acceptor);
    if !Criterion::HydrogenAcceptorDistance.accepts(hydrogen_acceptor_distance, thresholds) {
        return Ok(Screening::Failed(Criterion::HydrogenAcceptorDistance));
    }

    let dha_angle = angle(donor, hydrogen, acceptor)
        .ok_or(Error::DegenerateGeometry("hydrogen coincides with donor or acceptor"))?;
    if !Criterion::DhaAngle.accepts(dha_angle, thresholds) {
        return Ok(Screening::Failed(Criterion::DhaAngle));
    }

    let dab_angle = angle(donor, acceptor, antecedent)
        .ok_or(Error::DegenerateGeometry("acceptor coincides with donor or antecedent"))?;
    if !Criterion::DabAngle.accepts(dab_angle, thresholds) {
        return Ok(Screening::Failed(Criterion::DabAngle));
    }

    let hab_angle = angle(hydrogen, acceptor, antecedent)
        .ok_or(Error::DegenerateGeometry("acceptor coincides with hydrogen or antecedent"))?;
    if !Criterion::HabAngle.accepts(hab_angle, thresholds) {
        return Ok(Screening::Failed(Criterion::HabAngle));
    }

    Ok(Screening::Passed(Criteria {
        donor_acceptor_distance,
        hydrogen_acceptor_distance,
        dha_angle,
        dab_angle,
        hab_angle,
    }))
}

/// Orientation of the O–H vector relative to the N–C–O plane, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// `acos(|proj(O→H)| / |O→H|)`, within [0, 90].
    pub beta: f64,
    /// Negated in-plane angle between proj(O→H) and O→C, within [-180, 0].
    pub gamma: f64,
}

/// Computes beta and gamma for the carbonyl `c=o` approached by hydrogen `h`,
/// with the plane closed by nitrogen `n`.
pub fn orientation(c: Vec3, o: Vec3, h: Vec3, n: Vec3) -> Result<Orientation, Error> {
    let o_to_c = sub(c, o);
    let o_to_n = sub(n, o);
    let o_to_h = sub(h, o);

    let normal =
        unit_normal(o_to_c, o_to_n).ok_or(Error::DegenerateGeometry("collinear N-C-O plane"))?;

    let oh_len = norm(o_to_h);
    if oh_len < LENGTH_EPSILON {
        return Err(Error::DegenerateGeometry("hydrogen coincides with acceptor"));
    }

    let split =
        decompose(o_to_h, normal).ok_or(Error::DegenerateGeometry("collinear N-C-O plane"))?;
    let in_plane_len = norm(split.in_plane);
    if in_plane_len < LENGTH_EPSILON {
        return Err(Error::DegenerateGeometry(
            "O-H vector perpendicular to N-C-O plane",
        ));
    }

    let beta = acos_degrees(in_plane_len / oh_len);

    let carbonyl_axis =
        normalize(o_to_c).ok_or(Error::DegenerateGeometry("antecedent coincides with acceptor"))?;
    let gamma = -acos_degrees(dot(o_to_h, carbonyl_axis) / in_plane_len);

    Ok(Orientation { beta, gamma })
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted(AcceptedBond),
    Rejected(Criterion),
}

/// Evaluates `candidate` against `thresholds`.
///
/// On acceptance the bond is oriented against the peptide plane of the
/// acceptor's carbonyl: the antecedent `C`, the acceptor `O`, and the `N` of
/// the following residue in the same chain. That nitrogen must lie within
/// [`PEPTIDE_BOND_MAX_LENGTH`] of `C`; otherwise (C-terminus, chain break) the
/// candidate fails with [`Error::MissingAtom`]. The bond is bucketed by the
/// antecedent's secondary-structure code.
pub fn evaluate(
    structure: &Structure,
    candidate: &CandidateBond,
    thresholds: &Thresholds,
) -> Result<Verdict, Error> {
    let geometry = BondGeometry::of(structure, candidate);

    let criteria = match screen(&geometry, thresholds)? {
        Screening::Passed(criteria) => criteria,
        Screening::Failed(criterion) => return Ok(Verdict::Rejected(criterion)),
    };

    let antecedent = structure.atom(candidate.antecedent);
    let plane_nitrogen = peptide_nitrogen(structure, candidate.antecedent)?;

    let Orientation { beta, gamma } = orientation(
        geometry.antecedent,
        geometry.acceptor,
        geometry.hydrogen,
        structure.atom(plane_nitrogen).position,
    )?;

    Ok(Verdict::Accepted(AcceptedBond {
        candidate: *candidate,
        plane_nitrogen,
        class: classify(antecedent.secondary_structure),
        measurements: Measurements {
            donor_acceptor_distance: criteria.donor_acceptor_distance,
            hydrogen_acceptor_distance: criteria.hydrogen_acceptor_distance,
            dha_angle: criteria.dha_angle,
            hab_angle: criteria.hab_angle,
            beta,
            gamma,
        },
        dab_angle: criteria.dab_angle,
    }))
}

fn peptide_nitrogen(structure: &Structure, carbonyl: usize) -> Result<usize, Error> {
    let c = structure.atom(carbonyl);
    structure
        .next_residue(c.residue)
        .and_then(|next| structure.named_atom(next, "N"))
        .filter(|&n| distance(structure.atom(n).position, c.position) <= PEPTIDE_BOND_MAX_LENGTH)
        .ok_or_else(|| Error::missing_atom(c.residue, "peptide-bonded N"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::{Atom, ResidueId};
    use crate::model::class::StructuralClass;
    use crate::model::types::Element;
    use crate::survey::geometry::scale;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn add(a: Vec3, b: Vec3) -> Vec3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Acceptor at the origin, D···A = 2.9 Å, H···A = 2.0 Å, and the
    /// D–H–A, D–A–C and H–A–C angles all exactly 120°.
    fn reference_geometry(donor_acceptor: f64) -> BondGeometry {
        let ha: f64 = 2.0;
        let da: f64 = 2.9;
        // D–H length from the law of cosines with a 120° angle at H.
        let dh = -ha / 2.0 + ((ha / 2.0).powi(2) + da * da - ha * ha).sqrt();
        let cos_dah = (da * da + ha * ha - dh * dh) / (2.0 * da * ha);
        let half = cos_dah.acos() / 2.0;

        let d_hat = [half.cos(), half.sin(), 0.0];
        let h_hat = [half.cos(), -half.sin(), 0.0];
        let bx = -0.5 / half.cos();
        let b_hat = [bx, 0.0, (1.0 - bx * bx).sqrt()];

        let acceptor = [0.0, 0.0, 0.0];
        let hydrogen = scale(h_hat, ha);
        // Sliding the donor along the H→D ray keeps the D–H–A angle at 120°.
        let hd_dir = normalize(sub(scale(d_hat, da), hydrogen)).unwrap();
        let h_dot_u = dot(hydrogen, hd_dir);
        let reach = h_dot_u * h_dot_u - dot(hydrogen, hydrogen) + donor_acceptor.powi(2);
        let t = -h_dot_u + reach.sqrt();
        let donor = add(hydrogen, scale(hd_dir, t));

        BondGeometry {
            donor,
            hydrogen,
            acceptor,
            antecedent: scale(b_hat, 1.23),
        }
    }

    #[test]
    fn reference_quadruple_is_accepted() {
        let g = reference_geometry(2.9);
        assert!(approx_eq(distance(g.donor, g.acceptor), 2.9, 1e-9));
        assert!(approx_eq(distance(g.hydrogen, g.acceptor), 2.0, 1e-9));

        let result = screen(&g, &Thresholds::default()).unwrap();
        let Screening::Passed(c) = result else {
            panic!("expected acceptance, got {result:?}");
        };
        assert!(approx_eq(c.dha_angle, 120.0, 1e-6));
        assert!(approx_eq(c.dab_angle, 120.0, 1e-6));
        assert!(approx_eq(c.hab_angle, 120.0, 1e-6));
    }

    #[test]
    fn distant_donor_fails_first_criterion_only() {
        let g = reference_geometry(4.0);
        assert!(distance(g.donor, g.acceptor) >= 4.0);
        assert_eq!(
            screen(&g, &Thresholds::default()).unwrap(),
            Screening::Failed(Criterion::DonorAcceptorDistance)
        );
    }

    #[test]
    fn rejection_at_first_criterion_skips_angle_evaluation() {
        let g = BondGeometry {
            donor: [4.0, 0.0, 0.0],
            hydrogen: [4.0, 0.0, 0.0],
            acceptor: [0.0, 0.0, 0.0],
            antecedent: [0.0, 0.0, 0.0],
        };
        assert_eq!(
            screen(&g, &Thresholds::default()).unwrap(),
            Screening::Failed(Criterion::DonorAcceptorDistance)
        );
    }

    #[test]
    fn each_criterion_fails_independently() {
        let g = reference_geometry(2.9);
        let base = Thresholds::default();
        let tightened = [
            (
                Criterion::DonorAcceptorDistance,
                Thresholds {
                    donor_acceptor_max_distance: 2.8,
                    ..base
                },
            ),
            (
                Criterion::HydrogenAcceptorDistance,
                Thresholds {
                    hydrogen_acceptor_max_distance: 1.9,
                    ..base
                },
            ),
            (
                Criterion::DhaAngle,
                Thresholds {
                    dha_angle_min: 125.0,
                    ..base
                },
            ),
            (
                Criterion::DabAngle,
                Thresholds {
                    dab_angle_min: 125.0,
                    ..base
                },
            ),
            (
                Criterion::HabAngle,
                Thresholds {
                    hab_angle_min: 125.0,
                    ..base
                },
            ),
        ];

        let values = [
            distance(g.donor, g.acceptor),
            distance(g.hydrogen, g.acceptor),
            angle(g.donor, g.hydrogen, g.acceptor).unwrap(),
            angle(g.donor, g.acceptor, g.antecedent).unwrap(),
            angle(g.hydrogen, g.acceptor, g.antecedent).unwrap(),
        ];

        for (flipped, thresholds) in tightened {
            for (criterion, value) in Criterion::ALL.iter().zip(values) {
                assert_eq!(
                    criterion.accepts(value, &thresholds),
                    *criterion != flipped,
                    "tightening {flipped} changed {criterion}"
                );
            }
            assert_eq!(
                screen(&g, &thresholds).unwrap(),
                Screening::Failed(flipped)
            );
        }
    }

    #[test]
    fn threshold_boundaries_are_strict() {
        let t = Thresholds::default();
        assert!(!Criterion::DonorAcceptorDistance.accepts(3.5, &t));
        assert!(Criterion::DonorAcceptorDistance.accepts(3.4999, &t));
        assert!(!Criterion::HydrogenAcceptorDistance.accepts(2.5, &t));
        assert!(!Criterion::DhaAngle.accepts(90.0, &t));
        assert!(Criterion::DabAngle.accepts(90.0001, &t));
        assert!(!Criterion::HabAngle.accepts(f64::NAN, &t));
    }

    #[test]
    fn coincident_hydrogen_is_degenerate() {
        let g = BondGeometry {
            donor: [1.0, 0.0, 0.0],
            hydrogen: [1.0, 0.0, 0.0],
            acceptor: [0.0, 0.0, 0.0],
            antecedent: [-1.2, 0.0, 0.0],
        };
        assert!(matches!(
            screen(&g, &Thresholds::default()),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn orientation_of_in_plane_and_tilted_hydrogens() {
        let o = [0.0, 0.0, 0.0];
        let c = [1.0, 0.0, 0.0];
        let n = [1.0, 1.0, 0.0];

        let tilted = orientation(c, o, [-1.0, 0.0, 1.0], n).unwrap();
        assert!(approx_eq(tilted.beta, 45.0, 1e-9));
        assert!(approx_eq(tilted.gamma, -180.0, 1e-9));

        let in_plane = orientation(c, o, [0.0, 2.0, 0.0], n).unwrap();
        assert!(approx_eq(in_plane.beta, 0.0, 1e-9));
        assert!(approx_eq(in_plane.gamma, -90.0, 1e-9));

        let mirrored = orientation(c, o, [0.0, 2.0, -0.5], n).unwrap();
        let lifted = orientation(c, o, [0.0, 2.0, 0.5], n).unwrap();
        assert!(approx_eq(mirrored.beta, lifted.beta, 1e-12));
    }

    #[test]
    fn orientation_angles_stay_in_range() {
        let o = [0.0, 0.0, 0.0];
        let c = [1.23, 0.0, 0.0];
        let n = [1.9, 1.1, 0.0];
        for &h in &[
            [-1.8, 0.4, 0.3],
            [0.2, 1.9, -0.7],
            [1.5, -1.0, 1.2],
            [-0.3, -2.0, -0.1],
        ] {
            let or = orientation(c, o, h, n).unwrap();
            assert!((-180.0..=180.0).contains(&or.beta), "beta {}", or.beta);
            assert!((-180.0..=180.0).contains(&or.gamma), "gamma {}", or.gamma);
            assert!(!or.beta.is_nan() && !or.gamma.is_nan());
        }
    }

    #[test]
    fn collinear_plane_is_degenerate_not_nan() {
        let n = [0.0, 0.0, 0.0];
        let c = [1.3, 0.0, 0.0];
        let o = [2.5, 0.0, 0.0];
        let h = [4.3, 0.9, 0.0];
        assert!(matches!(
            orientation(c, o, h, n),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn hydrogen_along_normal_is_degenerate() {
        let o = [0.0, 0.0, 0.0];
        let c = [1.0, 0.0, 0.0];
        let n = [1.0, 1.0, 0.0];
        assert!(matches!(
            orientation(c, o, [0.0, 0.0, 1.8], n),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    /// Acceptor residue 1 (own `N` optional, `C`, `O`), the following
    /// residue 2 (its `N` optional) and donor residue 5.
    fn structure_for(
        g: &BondGeometry,
        own_n: Option<Vec3>,
        next_n: Option<Vec3>,
        code: Option<char>,
    ) -> Structure {
        let acc_res = ResidueId::new('A', 1);
        let next_res = ResidueId::new('A', 2);
        let don_res = ResidueId::new('A', 5);
        let at = |name: &str, element, residue, pos| {
            Atom::new(element, name, residue, pos).with_secondary_structure(code)
        };

        let mut atoms = Vec::new();
        if let Some(n) = own_n {
            atoms.push(at("N", Element::N, acc_res, n));
        }
        atoms.push(at("C", Element::C, acc_res, g.antecedent));
        atoms.push(at("O", Element::O, acc_res, g.acceptor));
        if let Some(n) = next_n {
            atoms.push(at("N", Element::N, next_res, n));
        }
        atoms.push(at("N", Element::N, don_res, g.donor));
        atoms.push(at("H", Element::H, don_res, g.hydrogen));
        Structure::from_atoms(atoms)
    }

    fn candidate_in(s: &Structure) -> CandidateBond {
        let find = |res: i32, name: &str| s.named_atom(ResidueId::new('A', res), name).unwrap();
        CandidateBond {
            donor: find(5, "N"),
            hydrogen: find(5, "H"),
            acceptor: find(1, "O"),
            antecedent: find(1, "C"),
        }
    }

    fn accepted(s: &Structure) -> AcceptedBond {
        match evaluate(s, &candidate_in(s), &Thresholds::default()).unwrap() {
            Verdict::Accepted(bond) => bond,
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_accepts_and_buckets_by_antecedent() {
        let g = reference_geometry(2.9);
        let next_n = add(g.antecedent, [0.6, 1.1, 0.0]);
        let s = structure_for(&g, None, Some(next_n), Some('H'));

        let bond = accepted(&s);
        assert_eq!(bond.class, StructuralClass::AlphaHelix);
        assert_eq!(bond.plane_nitrogen, 2);
        assert!(approx_eq(bond.measurements.donor_acceptor_distance, 2.9, 1e-9));
        assert!(approx_eq(bond.measurements.hydrogen_acceptor_distance, 2.0, 1e-9));
        assert!(approx_eq(bond.measurements.hab_angle, 120.0, 1e-6));
        assert!(approx_eq(bond.dab_angle, 120.0, 1e-6));
        assert!((0.0..=90.0).contains(&bond.measurements.beta));
        assert!((-180.0..=0.0).contains(&bond.measurements.gamma));
    }

    #[test]
    fn plane_is_closed_by_following_residue_nitrogen() {
        let g = reference_geometry(2.9);
        // Residue 2's N lies in the C, O, H plane; residue 1's own N sits on
        // that plane's normal.
        let next_n = add(g.antecedent, scale(normalize(g.hydrogen).unwrap(), 1.33));
        let normal = unit_normal(g.antecedent, g.hydrogen).unwrap();
        let own_n = add(g.antecedent, scale(normal, 1.3));
        let s = structure_for(&g, Some(own_n), Some(next_n), Some('H'));

        let bond = accepted(&s);
        assert_eq!(s.atom(bond.plane_nitrogen).residue, ResidueId::new('A', 2));
        assert!(approx_eq(bond.measurements.beta, 0.0, 1e-4));
        assert!(approx_eq(bond.measurements.gamma, -120.0, 1e-4));

        let with_own_n = orientation(g.antecedent, g.acceptor, g.hydrogen, own_n).unwrap();
        assert!(approx_eq(with_own_n.beta, 60.0, 1e-4));
        assert!(approx_eq(with_own_n.gamma, -180.0, 1e-4));
    }

    #[test]
    fn evaluate_requires_peptide_bonded_nitrogen() {
        let g = reference_geometry(2.9);
        let own_n = add(g.antecedent, [-0.6, 1.1, 0.0]);

        let s = structure_for(&g, Some(own_n), None, Some('E'));
        let err = evaluate(&s, &candidate_in(&s), &Thresholds::default()).unwrap_err();
        assert!(matches!(err, Error::MissingAtom { atom: "peptide-bonded N", .. }));

        let broken_chain = add(g.antecedent, [0.0, 0.0, 3.8]);
        let s = structure_for(&g, Some(own_n), Some(broken_chain), Some('E'));
        let err = evaluate(&s, &candidate_in(&s), &Thresholds::default()).unwrap_err();
        assert!(err.is_recoverable());
        assert!(matches!(err, Error::MissingAtom { .. }));
    }

    #[test]
    fn evaluate_skips_collinear_plane() {
        let g = reference_geometry(2.9);
        let beyond_c = add(g.antecedent, sub(g.antecedent, g.acceptor));
        let s = structure_for(&g, None, Some(beyond_c), Some('G'));
        let err = evaluate(&s, &candidate_in(&s), &Thresholds::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }

    #[test]
    fn evaluate_reports_rejection_criterion() {
        let g = reference_geometry(2.9);
        let s = structure_for(&g, None, None, Some('H'));
        let strict = Thresholds {
            hydrogen_acceptor_max_distance: 1.5,
            ..Thresholds::default()
        };
        assert_eq!(
            evaluate(&s, &candidate_in(&s), &strict).unwrap(),
            Verdict::Rejected(Criterion::HydrogenAcceptorDistance)
        );
    }
}
