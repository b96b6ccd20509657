//! Header records that the coordinate reader does not surface:
//! `HELIX`/`SHEET` ranges, `NUMMDL`, and whether `MODEL` records exist.

use crate::io::error::Error;
use crate::model::atom::ResidueId;
use std::ops::Range;

/// Residue span of one HELIX or SHEET record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondaryRange {
    pub chain: char,
    pub start: i32,
    pub end: i32,
    pub code: char,
}

impl SecondaryRange {
    pub fn contains(&self, residue: ResidueId) -> bool {
        residue.chain == self.chain && (self.start..=self.end).contains(&residue.number)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub ranges: Vec<SecondaryRange>,
    pub declared_models: Option<usize>,
    pub has_model_records: bool,
}

impl Records {
    /// Secondary-structure code of the first range covering `residue`.
    pub fn code_for(&self, residue: ResidueId) -> Option<char> {
        self.ranges
            .iter()
            .find(|r| r.contains(residue))
            .map(|r| r.code)
    }
}

pub fn scan(text: &str) -> Result<Records, Error> {
    let mut records = Records::default();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        match record_name(line) {
            "HELIX" => records.ranges.extend(parse_helix(line, line_no)?),
            "SHEET" => records.ranges.push(parse_sheet(line, line_no)?),
            "MODEL" => records.has_model_records = true,
            "NUMMDL" if records.declared_models.is_none() => {
                let count = parse_usize_field(line, 10..14)
                    .filter(|n| *n > 0)
                    .ok_or_else(|| Error::parse(line_no, "invalid model count in NUMMDL record"))?;
                records.declared_models = Some(count);
            }
            _ => {}
        }
    }

    Ok(records)
}

fn record_name(line: &str) -> &str {
    field(line, 0..6).trim_end()
}

/// Column slice that tolerates short lines.
fn field(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    line.get(range.start.min(end)..end).unwrap_or("")
}

/// Right-handed alpha (class 1) → 'H', pi (3) → 'I', 3-10 (5) → 'G'.
/// Any other helix class carries no code and yields no range.
fn parse_helix(line: &str, line_no: usize) -> Result<Option<SecondaryRange>, Error> {
    let chain = extract_char(field(line, 19..20)).unwrap_or(' ');
    let start = parse_i32_field(line, 21..25)
        .ok_or_else(|| Error::parse(line_no, "invalid HELIX start residue"))?;
    let end = parse_i32_field(line, 33..37)
        .ok_or_else(|| Error::parse(line_no, "invalid HELIX end residue"))?;
    let code = match parse_i32_field(line, 38..40) {
        Some(1) => 'H',
        Some(3) => 'I',
        Some(5) => 'G',
        _ => return Ok(None),
    };
    Ok(Some(SecondaryRange {
        chain,
        start,
        end,
        code,
    }))
}

fn parse_sheet(line: &str, line_no: usize) -> Result<SecondaryRange, Error> {
    let chain = extract_char(field(line, 21..22)).unwrap_or(' ');
    let start = parse_i32_field(line, 22..26)
        .ok_or_else(|| Error::parse(line_no, "invalid SHEET start residue"))?;
    let end = parse_i32_field(line, 33..37)
        .ok_or_else(|| Error::parse(line_no, "invalid SHEET end residue"))?;
    Ok(SecondaryRange {
        chain,
        start,
        end,
        code: 'E',
    })
}

fn parse_i32_field(line: &str, range: Range<usize>) -> Option<i32> {
    field(line, range).trim().parse::<i32>().ok()
}

fn parse_usize_field(line: &str, range: Range<usize>) -> Option<usize> {
    field(line, range).trim().parse::<usize>().ok()
}

fn extract_char(slice: &str) -> Option<char> {
    slice.trim().chars().next()
}
