//! Per-class accumulation of bond measurements.

use crate::model::bond::{AcceptedBond, Measurements};
use crate::model::class::StructuralClass;
use crate::model::report::{ClassSummary, SummaryTable};

/// Six parallel columns of raw measurements for one class.
///
/// Values are only ever pushed as a full [`Measurements`] row, so every
/// column always has the same length.
#[derive(Debug, Clone, Default, PartialEq)]
struct Columns {
    values: [Vec<f64>; Measurements::COLUMN_COUNT],
}

impl Columns {
    fn push(&mut self, m: &Measurements) {
        for (column, value) in self.values.iter_mut().zip(m.to_array()) {
            column.push(value);
        }
    }

    fn len(&self) -> usize {
        self.values[0].len()
    }

    fn extend(&mut self, other: Columns) {
        for (column, tail) in self.values.iter_mut().zip(other.values) {
            column.extend(tail);
        }
    }

    fn means(&self) -> Measurements {
        let n = self.len() as f64;
        Measurements::from_array(self.values.each_ref().map(|c| c.iter().sum::<f64>() / n))
    }
}

/// Accumulator for one survey run.
///
/// Construct a fresh instance per structure; [`ClassStatistics::finalize`]
/// consumes it, so no partially reduced state is ever observable. Runs over
/// several structures are pooled with [`merge`](Self::merge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassStatistics {
    classes: [Columns; 3],
}

impl ClassStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one bond to `class`. Returns `false` and records nothing for
    /// [`StructuralClass::Unclassified`].
    pub fn record(&mut self, class: StructuralClass, measurements: &Measurements) -> bool {
        match class.table_index() {
            Some(idx) => {
                self.classes[idx].push(measurements);
                true
            }
            None => false,
        }
    }

    /// Records every classified bond in `bonds`.
    pub fn from_bonds(bonds: &[AcceptedBond]) -> Self {
        let mut stats = Self::new();
        for bond in bonds {
            stats.record(bond.class, &bond.measurements);
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.classes.iter().map(Columns::len).sum()
    }

    /// Concatenates another run's raw values into this one.
    ///
    /// Merging happens on the raw lists; means are only taken once, in
    /// [`finalize`](Self::finalize).
    pub fn merge(&mut self, other: ClassStatistics) {
        for (mine, theirs) in self.classes.iter_mut().zip(other.classes) {
            mine.extend(theirs);
        }
    }

    /// Reduces every non-empty class to the arithmetic mean of each column.
    pub fn finalize(self) -> SummaryTable {
        let rows = StructuralClass::REPORTED
            .iter()
            .zip(&self.classes)
            .filter(|(_, columns)| columns.len() > 0)
            .map(|(class, columns)| ClassSummary {
                class: *class,
                bonds: columns.len(),
                means: columns.means(),
            })
            .collect();
        SummaryTable { rows }
    }
}
