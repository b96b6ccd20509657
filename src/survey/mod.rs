mod aggregator;
mod config;
mod error;
mod evaluator;
pub mod geometry;
mod pairing;
mod spatial;

pub use aggregator::ClassStatistics;
pub use config::{
    DAB_ANGLE_MIN, DHA_ANGLE_MIN, DONOR_ACCEPTOR_MAX_DISTANCE, HAB_ANGLE_MIN,
    HYDROGEN_ACCEPTOR_MAX_DISTANCE, HydrogenSelection, PairingPolicy, SurveyConfig, Thresholds,
};
pub use error::Error;
pub use evaluator::{
    BondGeometry, Criteria, Criterion, Orientation, PEPTIDE_BOND_MAX_LENGTH, Screening, Verdict,
    evaluate, orientation, screen,
};

use crate::model::bond::AcceptedBond;
use crate::model::class::classify;
use crate::model::report::{SurveyReport, SurveyStats};
use crate::model::structure::Structure;
use log::{debug, info};
use spatial::SpatialGrid;

/// Finds backbone hydrogen bonds in `structure` and tabulates per-class means.
///
/// Every donor (N or O) with a classified secondary-structure code is paired
/// with every acceptor (O) of the same class within the donor–acceptor
/// cutoff. Pairs lacking a companion atom or with degenerate geometry are
/// skipped and counted in [`SurveyStats`]. Accepted bonds are bucketed by the
/// class of the acceptor's antecedent `C`.
///
/// Each call owns a fresh [`ClassStatistics`], so repeated calls never share
/// state.
pub fn survey(structure: &Structure, config: &SurveyConfig) -> Result<SurveyReport, Error> {
    config.validate()?;
    if structure.is_empty() {
        return Err(Error::EmptyStructure);
    }

    let thresholds = &config.thresholds;
    let cutoff = thresholds.donor_acceptor_max_distance;

    let donors = pairing::donors(structure);
    let acceptors = pairing::acceptors(structure);
    let positions: Vec<[f64; 3]> = structure.atoms().iter().map(|a| a.position).collect();
    let grid = SpatialGrid::from_members(&acceptors, &positions, cutoff);

    let mut stats = SurveyStats {
        donors: donors.len(),
        acceptors: acceptors.len(),
        ..SurveyStats::default()
    };
    let mut accepted: Vec<AcceptedBond> = Vec::new();

    for &donor in &donors {
        let donor_class = classify(structure.atom(donor).secondary_structure);
        let hydrogen = pairing::hydrogen_for(structure, donor, config.hydrogen).ok();

        for acceptor in grid.query_radius(positions[donor], &positions, cutoff) {
            if acceptor == donor
                || classify(structure.atom(acceptor).secondary_structure) != donor_class
            {
                continue;
            }
            stats.pairs_screened += 1;

            let verdict = match hydrogen {
                Some(h) => pairing::candidate(structure, donor, h, acceptor)
                    .and_then(|c| evaluate(structure, &c, thresholds)),
                None => Err(Error::missing_atom(structure.atom(donor).residue, "H")),
            };

            match verdict {
                Ok(Verdict::Accepted(bond)) if bond.class.is_classified() => accepted.push(bond),
                Ok(Verdict::Accepted(bond)) => {
                    debug!(
                        "skipping bond {} -> {}: antecedent {} is unclassified",
                        donor, acceptor, bond.candidate.antecedent
                    );
                    stats.unclassified_antecedent += 1;
                }
                Ok(Verdict::Rejected(criterion)) => {
                    stats.rejected_by_criterion[criterion.number() - 1] += 1;
                }
                Err(e) if e.is_recoverable() => {
                    debug!("skipping pair {} -> {}: {}", donor, acceptor, e);
                    match e {
                        Error::DegenerateGeometry(_) => stats.degenerate_geometry += 1,
                        _ => stats.missing_atom += 1,
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    let bonds = match config.pairing {
        PairingPolicy::AllPairs => accepted,
        PairingPolicy::Exclusive => {
            let (kept, dropped) = pairing::exclusive(accepted);
            stats.dropped_by_exclusivity = dropped;
            kept
        }
    };

    let statistics = ClassStatistics::from_bonds(&bonds);
    stats.accepted = bonds.len();

    info!(
        "surveyed {} donors x {} acceptors: {} pairs screened, {} bonds accepted, {} skipped",
        stats.donors,
        stats.acceptors,
        stats.pairs_screened,
        stats.accepted,
        stats.skipped()
    );

    Ok(SurveyReport {
        table: statistics.finalize(),
        bonds,
        stats,
    })
}
