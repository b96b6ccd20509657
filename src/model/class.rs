use serde::Serialize;
use std::fmt;

/// Coarse secondary-structure bucket used to stratify bond statistics.
///
/// Parallel and antiparallel strands share [`StructuralClass::SheetStrand`];
/// DSSP-style labels do not distinguish them at the atom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralClass {
    AlphaHelix,
    Helix310,
    SheetStrand,
    Unclassified,
}

impl StructuralClass {
    /// Classes that receive statistics, in table row order.
    pub const REPORTED: [StructuralClass; 3] = [
        StructuralClass::AlphaHelix,
        StructuralClass::Helix310,
        StructuralClass::SheetStrand,
    ];

    #[inline]
    pub fn is_classified(&self) -> bool {
        !matches!(self, StructuralClass::Unclassified)
    }

    /// Row position in the summary table, `None` for unclassified atoms.
    pub fn table_index(&self) -> Option<usize> {
        match self {
            StructuralClass::AlphaHelix => Some(0),
            StructuralClass::Helix310 => Some(1),
            StructuralClass::SheetStrand => Some(2),
            StructuralClass::Unclassified => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StructuralClass::AlphaHelix => "alpha-helix",
            StructuralClass::Helix310 => "3-10 helix",
            StructuralClass::SheetStrand => "beta-strand",
            StructuralClass::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for StructuralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a secondary-structure code to its bucket.
///
/// `'H'` → alpha helix, `'G'` → 3₁₀ helix, `'E'` → strand; every other
/// code, including an absent one, is unclassified.
pub fn classify(code: Option<char>) -> StructuralClass {
    match code {
        Some('H') => StructuralClass::AlphaHelix,
        Some('G') => StructuralClass::Helix310,
        Some('E') => StructuralClass::SheetStrand,
        _ => StructuralClass::Unclassified,
    }
}
