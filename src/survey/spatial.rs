//! Uniform grid for acceptor lookup around a donor.
//!
//! Cells are cubes with the donor–acceptor cutoff as edge length, so every
//! acceptor within the cutoff lies in the 27 cells around the donor's cell.
//! Edges shorter than [`MIN_CELL_SIZE`] are raised to it; queries still
//! filter at the caller's cutoff.

use std::collections::HashMap;

/// Smallest cell edge in Å.
pub const MIN_CELL_SIZE: f64 = 1.0;

type Cell = (i64, i64, i64);

/// Grid-based spatial index over a subset of atoms.
#[derive(Debug)]
pub struct SpatialGrid {
    /// Inverse cell size for fast coordinate-to-cell conversion.
    inv_cell_size: f64,
    /// Map from cell coordinates to atom indices.
    cells: HashMap<Cell, Vec<usize>>,
}

impl SpatialGrid {
    /// Creates an empty grid with edges of at least [`MIN_CELL_SIZE`].
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not a positive finite number.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "Cell size must be positive"
        );
        Self {
            inv_cell_size: 1.0 / cell_size.max(MIN_CELL_SIZE),
            cells: HashMap::new(),
        }
    }

    /// Builds a grid holding the atoms listed in `members`.
    ///
    /// # Arguments
    ///
    /// * `members` — Atom indices to index (e.g. all acceptor candidates)
    /// * `positions` — Full position array, indexed by atom index
    /// * `cell_size` — Edge length of each cubic cell, typically the search cutoff
    pub fn from_members(members: &[usize], positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for &idx in members {
            grid.insert(idx, positions[idx]);
        }
        grid
    }

    fn cell_coords(&self, pos: [f64; 3]) -> Cell {
        (
            (pos[0] * self.inv_cell_size).floor() as i64,
            (pos[1] * self.inv_cell_size).floor() as i64,
            (pos[2] * self.inv_cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Indexed atoms within `cutoff` of `query`, sorted by atom index.
    ///
    /// The ordering makes enumeration identical to a plain nested loop over
    /// the indexed atoms. `cutoff` must not exceed the cell size.
    pub fn query_radius(
        &self,
        query: [f64; 3],
        positions: &[[f64; 3]],
        cutoff: f64,
    ) -> Vec<usize> {
        let cutoff_sq = cutoff * cutoff;
        let (cx, cy, cz) = self.cell_coords(query);

        let mut results = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(indices) = self.cells.get(&cell) else {
                        continue;
                    };
                    for &idx in indices {
                        let pos = positions[idx];
                        let dist_sq = (pos[0] - query[0]).powi(2)
                            + (pos[1] - query[1]).powi(2)
                            + (pos[2] - query[2]).powi(2);
                        if dist_sq <= cutoff_sq {
                            results.push(idx);
                        }
                    }
                }
            }
        }

        results.sort_unstable();
        results
    }
}
