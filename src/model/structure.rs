use super::atom::{Atom, ResidueId};
use std::collections::HashMap;

/// A single conformational model of a macromolecule.
///
/// Atoms are kept in file order. A residue index is built once at
/// construction so residue-scoped lookups never rescan the atom list.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
    residues: HashMap<ResidueId, Vec<usize>>,
    residue_order: Vec<ResidueId>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        let mut residues: HashMap<ResidueId, Vec<usize>> = HashMap::new();
        let mut residue_order = Vec::new();

        for (idx, atom) in atoms.iter().enumerate() {
            let members = residues.entry(atom.residue).or_insert_with(|| {
                residue_order.push(atom.residue);
                Vec::new()
            });
            members.push(idx);
        }

        Self {
            atoms,
            residues,
            residue_order,
        }
    }

    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    #[inline]
    pub fn atom(&self, idx: usize) -> &Atom {
        &self.atoms[idx]
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn residue_count(&self) -> usize {
        self.residue_order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Residues in order of first appearance.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residue_order
    }

    /// Residue after `residue` in file order, if it belongs to the same chain.
    pub fn next_residue(&self, residue: ResidueId) -> Option<ResidueId> {
        let residues = self.residues();
        let pos = residues.iter().position(|&r| r == residue)?;
        residues
            .get(pos + 1)
            .copied()
            .filter(|next| next.chain == residue.chain)
    }

    /// Indices of every atom in `residue`, in file order. Empty when unknown.
    pub fn atoms_in_residue(&self, residue: ResidueId) -> &[usize] {
        self.residues
            .get(&residue)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First atom of `residue` whose name matches `name` exactly.
    pub fn named_atom(&self, residue: ResidueId, name: &str) -> Option<usize> {
        self.atoms_in_residue(residue)
            .iter()
            .copied()
            .find(|&idx| self.atoms[idx].name == name)
    }

    pub fn first_hydrogen(&self, residue: ResidueId) -> Option<usize> {
        self.atoms_in_residue(residue)
            .iter()
            .copied()
            .find(|&idx| self.atoms[idx].element.is_hydrogen())
    }

    /// Hydrogen of `residue` closest to `target`; ties go to the earlier atom.
    pub fn nearest_hydrogen(&self, residue: ResidueId, target: [f64; 3]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &idx in self.atoms_in_residue(residue) {
            let atom = &self.atoms[idx];
            if !atom.element.is_hydrogen() {
                continue;
            }
            let p = atom.position;
            let dist_sq = (p[0] - target[0]).powi(2)
                + (p[1] - target[1]).powi(2)
                + (p[2] - target[2]).powi(2);
            if best.is_none_or(|(_, d)| dist_sq < d) {
                best = Some((idx, dist_sq));
            }
        }
        best.map(|(idx, _)| idx)
    }

    pub fn chains(&self) -> Vec<char> {
        let mut chains: Vec<char> = self.residue_order.iter().map(|r| r.chain).collect();
        chains.sort_unstable();
        chains.dedup();
        chains
    }
}
