use super::bond::{AcceptedBond, Measurements};
use super::class::StructuralClass;
use serde::Serialize;

/// Per-class means over every accepted bond bucketed into that class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub class: StructuralClass,
    pub bonds: usize,
    pub means: Measurements,
}

/// Class × quantity table. Rows follow [`StructuralClass::REPORTED`];
/// classes without a single bond are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<ClassSummary>,
}

impl SummaryTable {
    pub fn row(&self, class: StructuralClass) -> Option<&ClassSummary> {
        self.rows.iter().find(|r| r.class == class)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_bonds(&self) -> usize {
        self.rows.iter().map(|r| r.bonds).sum()
    }
}

/// Where candidate pairs went during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyStats {
    pub donors: usize,
    pub acceptors: usize,
    pub pairs_screened: usize,
    pub accepted: usize,
    /// Rejections indexed by criterion, 1 through 5 at positions 0..5.
    pub rejected_by_criterion: [usize; 5],
    pub missing_atom: usize,
    pub degenerate_geometry: usize,
    pub unclassified_antecedent: usize,
    pub dropped_by_exclusivity: usize,
}

impl SurveyStats {
    pub fn rejected(&self) -> usize {
        self.rejected_by_criterion.iter().sum()
    }

    pub fn skipped(&self) -> usize {
        self.missing_atom + self.degenerate_geometry + self.unclassified_antecedent
    }
}

#[derive(Debug, Clone, Default)]
pub struct SurveyReport {
    pub table: SummaryTable,
    /// Recorded bonds in enumeration order.
    pub bonds: Vec<AcceptedBond>,
    pub stats: SurveyStats,
}
