use super::config::HydrogenSelection;
use super::error::Error;
use crate::model::bond::{AcceptedBond, CandidateBond};
use crate::model::class::classify;
use crate::model::structure::Structure;
use std::collections::HashSet;

/// N and O atoms carrying a classified secondary-structure code, in file order.
pub fn donors(structure: &Structure) -> Vec<usize> {
    structure
        .atoms()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.element.is_donor_candidate())
        .filter(|(_, a)| classify(a.secondary_structure).is_classified())
        .map(|(idx, _)| idx)
        .collect()
}

/// O atoms carrying a classified secondary-structure code, in file order.
///
/// Unclassified oxygens can never share a class with a donor and are left out.
pub fn acceptors(structure: &Structure) -> Vec<usize> {
    structure
        .atoms()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.element.is_acceptor_candidate())
        .filter(|(_, a)| classify(a.secondary_structure).is_classified())
        .map(|(idx, _)| idx)
        .collect()
}

pub fn hydrogen_for(
    structure: &Structure,
    donor: usize,
    selection: HydrogenSelection,
) -> Result<usize, Error> {
    let atom = structure.atom(donor);
    let found = match selection {
        HydrogenSelection::First => structure.first_hydrogen(atom.residue),
        HydrogenSelection::Nearest => structure.nearest_hydrogen(atom.residue, atom.position),
    };
    found.ok_or_else(|| Error::missing_atom(atom.residue, "H"))
}

/// Completes a donor/acceptor pair with the acceptor's carbonyl carbon.
pub fn candidate(
    structure: &Structure,
    donor: usize,
    hydrogen: usize,
    acceptor: usize,
) -> Result<CandidateBond, Error> {
    let residue = structure.atom(acceptor).residue;
    let antecedent = structure
        .named_atom(residue, "C")
        .ok_or_else(|| Error::missing_atom(residue, "C"))?;

    Ok(CandidateBond {
        donor,
        hydrogen,
        acceptor,
        antecedent,
    })
}

/// Greedy one-bond-per-atom selection.
///
/// Bonds are visited by increasing hydrogen–acceptor distance, then
/// donor–acceptor distance, then enumeration order; a bond is kept when
/// neither its donor nor its acceptor was claimed earlier. Kept bonds are
/// returned in their original order together with the number dropped.
pub fn exclusive(bonds: Vec<AcceptedBond>) -> (Vec<AcceptedBond>, usize) {
    let mut order: Vec<usize> = (0..bonds.len()).collect();
    order.sort_by(|&a, &b| {
        let (ma, mb) = (&bonds[a].measurements, &bonds[b].measurements);
        ma.hydrogen_acceptor_distance
            .total_cmp(&mb.hydrogen_acceptor_distance)
            .then(ma.donor_acceptor_distance.total_cmp(&mb.donor_acceptor_distance))
            .then(a.cmp(&b))
    });

    let mut used_donors = HashSet::new();
    let mut used_acceptors = HashSet::new();
    let mut keep = vec![false; bonds.len()];
    for idx in order {
        let c = &bonds[idx].candidate;
        if used_donors.contains(&c.donor) || used_acceptors.contains(&c.acceptor) {
            continue;
        }
        used_donors.insert(c.donor);
        used_acceptors.insert(c.acceptor);
        keep[idx] = true;
    }

    let total = bonds.len();
    let kept: Vec<AcceptedBond> = bonds
        .into_iter()
        .zip(keep)
        .filter_map(|(bond, k)| k.then_some(bond))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}
