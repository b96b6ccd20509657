use hbond_census::io::TableFormat as LibTableFormat;
use hbond_census::{HydrogenSelection, PairingPolicy};

use crate::cli;

impl From<cli::TableFormat> for LibTableFormat {
    fn from(f: cli::TableFormat) -> Self {
        match f {
            cli::TableFormat::Text => Self::Text,
            cli::TableFormat::Csv => Self::Csv,
            cli::TableFormat::Json => Self::Json,
        }
    }
}

impl From<cli::HydrogenChoice> for HydrogenSelection {
    fn from(h: cli::HydrogenChoice) -> Self {
        match h {
            cli::HydrogenChoice::First => Self::First,
            cli::HydrogenChoice::Nearest => Self::Nearest,
        }
    }
}

pub fn hydrogen_display_name(selection: HydrogenSelection) -> &'static str {
    match selection {
        HydrogenSelection::First => "first in residue",
        HydrogenSelection::Nearest => "nearest to donor",
    }
}

pub fn pairing_display_name(policy: PairingPolicy) -> &'static str {
    match policy {
        PairingPolicy::AllPairs => "all pairs",
        PairingPolicy::Exclusive => "exclusive (greedy)",
    }
}
