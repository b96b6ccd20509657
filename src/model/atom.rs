use super::types::Element;
use std::fmt;

/// Chain identifier plus residue sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueId {
    pub chain: char,
    pub number: i32,
}

impl ResidueId {
    pub fn new(chain: char, number: i32) -> Self {
        Self { chain, number }
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.number)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub name: String,
    pub residue: ResidueId,
    pub residue_name: String,
    pub position: [f64; 3],
    /// Single-letter DSSP-style code ('H', 'G', 'E', ...), `None` for coil or unknown.
    pub secondary_structure: Option<char>,
}

impl Atom {
    pub fn new(
        element: Element,
        name: impl Into<String>,
        residue: ResidueId,
        position: [f64; 3],
    ) -> Self {
        Self {
            element,
            name: name.into(),
            residue,
            residue_name: String::new(),
            position,
            secondary_structure: None,
        }
    }

    pub fn with_residue_name(mut self, residue_name: impl Into<String>) -> Self {
        self.residue_name = residue_name.into();
        self
    }

    pub fn with_secondary_structure(mut self, code: impl Into<Option<char>>) -> Self {
        self.secondary_structure = code.into();
        self
    }
}
