use super::TableFormat;
use super::error::Error;
use crate::model::bond::{AcceptedBond, Measurements};
use crate::model::report::{ClassSummary, SummaryTable};
use crate::model::structure::Structure;
use serde::Serialize;
use std::io::Write;

const CLASS_WIDTH: usize = 14;
const VALUE_WIDTH: usize = 12;

#[derive(Serialize)]
struct SummaryRow<'a> {
    class: &'a str,
    bonds: usize,
    #[serde(rename = "D_ON")]
    d_on: f64,
    #[serde(rename = "D_OH")]
    d_oh: f64,
    #[serde(rename = "ANGLE(NHO)")]
    angle_nho: f64,
    #[serde(rename = "ANGLE(HOC)")]
    angle_hoc: f64,
    #[serde(rename = "BETA")]
    beta: f64,
    #[serde(rename = "GAMMA")]
    gamma: f64,
}

impl<'a> From<&'a ClassSummary> for SummaryRow<'a> {
    fn from(row: &'a ClassSummary) -> Self {
        let m = &row.means;
        Self {
            class: row.class.label(),
            bonds: row.bonds,
            d_on: m.donor_acceptor_distance,
            d_oh: m.hydrogen_acceptor_distance,
            angle_nho: m.dha_angle,
            angle_hoc: m.hab_angle,
            beta: m.beta,
            gamma: m.gamma,
        }
    }
}

#[derive(Serialize)]
struct SourcedSummaryRow<'a> {
    source: &'a str,
    class: &'a str,
    bonds: usize,
    #[serde(rename = "D_ON")]
    d_on: f64,
    #[serde(rename = "D_OH")]
    d_oh: f64,
    #[serde(rename = "ANGLE(NHO)")]
    angle_nho: f64,
    #[serde(rename = "ANGLE(HOC)")]
    angle_hoc: f64,
    #[serde(rename = "BETA")]
    beta: f64,
    #[serde(rename = "GAMMA")]
    gamma: f64,
}

impl<'a> SourcedSummaryRow<'a> {
    fn new(source: &'a str, row: &'a ClassSummary) -> Self {
        let r = SummaryRow::from(row);
        Self {
            source,
            class: r.class,
            bonds: r.bonds,
            d_on: r.d_on,
            d_oh: r.d_oh,
            angle_nho: r.angle_nho,
            angle_hoc: r.angle_hoc,
            beta: r.beta,
            gamma: r.gamma,
        }
    }
}

#[derive(Serialize)]
struct SourcedTable<'a> {
    source: &'a str,
    #[serde(flatten)]
    table: &'a SummaryTable,
}

pub fn write_summary<W: Write>(
    mut writer: W,
    table: &SummaryTable,
    format: TableFormat,
) -> Result<(), Error> {
    match format {
        TableFormat::Text => write_text(&mut writer, table)?,
        TableFormat::Csv => {
            let mut csv = csv::Writer::from_writer(&mut writer);
            if table.is_empty() {
                csv.write_record(summary_header(false))?;
            }
            for row in &table.rows {
                csv.serialize(SummaryRow::from(row))?;
            }
            csv.flush()?;
        }
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, table)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Tables of several inputs as one document.
///
/// Text repeats the table under a `# <source>` line, CSV prepends a
/// `source` column under a single header, and JSON is an array of
/// `{"source": .., "rows": [..]}` objects.
pub fn write_summaries<W: Write>(
    mut writer: W,
    tables: &[(&str, &SummaryTable)],
    format: TableFormat,
) -> Result<(), Error> {
    match format {
        TableFormat::Text => {
            for (source, table) in tables {
                writeln!(writer, "# {source}")?;
                write_text(&mut writer, table)?;
            }
        }
        TableFormat::Csv => {
            let mut csv = csv::Writer::from_writer(&mut writer);
            if tables.iter().all(|(_, t)| t.is_empty()) {
                csv.write_record(summary_header(true))?;
            }
            for (source, table) in tables {
                for row in &table.rows {
                    csv.serialize(SourcedSummaryRow::new(source, row))?;
                }
            }
            csv.flush()?;
        }
        TableFormat::Json => {
            let docs: Vec<SourcedTable> = tables
                .iter()
                .map(|&(source, table)| SourcedTable { source, table })
                .collect();
            serde_json::to_writer_pretty(&mut writer, &docs)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn summary_header(sourced: bool) -> Vec<&'static str> {
    let mut header = Vec::with_capacity(Measurements::COLUMN_COUNT + 3);
    if sourced {
        header.push("source");
    }
    header.extend(["class", "bonds"]);
    header.extend(Measurements::HEADERS);
    header
}

fn write_text<W: Write>(writer: &mut W, table: &SummaryTable) -> Result<(), Error> {
    write!(writer, "{:<CLASS_WIDTH$}", "CLASS")?;
    for header in Measurements::HEADERS {
        write!(writer, "{header:>VALUE_WIDTH$}")?;
    }
    writeln!(writer, "{:>8}", "BONDS")?;

    for row in &table.rows {
        write!(writer, "{:<CLASS_WIDTH$}", row.class.label())?;
        for value in row.means.to_array() {
            write!(writer, "{value:>VALUE_WIDTH$.3}")?;
        }
        writeln!(writer, "{:>8}", row.bonds)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct AuditRow<'a> {
    source: &'a str,
    class: &'a str,
    donor_residue: String,
    donor_atom: &'a str,
    hydrogen_atom: &'a str,
    acceptor_residue: String,
    acceptor_atom: &'a str,
    hydrogen_x: f64,
    hydrogen_y: f64,
    hydrogen_z: f64,
    d_on: f64,
    d_oh: f64,
    angle_nho: f64,
    angle_hoc: f64,
    angle_noc: f64,
    beta: f64,
    gamma: f64,
}

impl<'a> AuditRow<'a> {
    fn new(source: &'a str, bond: &'a AcceptedBond, structure: &'a Structure) -> Self {
        let donor = structure.atom(bond.candidate.donor);
        let hydrogen = structure.atom(bond.candidate.hydrogen);
        let acceptor = structure.atom(bond.candidate.acceptor);
        let m = &bond.measurements;
        let [hydrogen_x, hydrogen_y, hydrogen_z] = hydrogen.position;

        Self {
            source,
            class: bond.class.label(),
            donor_residue: donor.residue.to_string(),
            donor_atom: &donor.name,
            hydrogen_atom: &hydrogen.name,
            acceptor_residue: acceptor.residue.to_string(),
            acceptor_atom: &acceptor.name,
            hydrogen_x,
            hydrogen_y,
            hydrogen_z,
            d_on: m.donor_acceptor_distance,
            d_oh: m.hydrogen_acceptor_distance,
            angle_nho: m.dha_angle,
            angle_hoc: m.hab_angle,
            angle_noc: bond.dab_angle,
            beta: m.beta,
            gamma: m.gamma,
        }
    }
}

/// Per-bond CSV across one or more structures, with a single header.
///
/// Each row carries the input label, atom identities, the raw hydrogen
/// position, and every measured quantity including the untabulated D–A–C
/// angle.
pub struct AuditWriter<W: Write> {
    csv: csv::Writer<W>,
}

impl<W: Write> AuditWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            csv: csv::Writer::from_writer(writer),
        }
    }

    pub fn write(
        &mut self,
        source: &str,
        bonds: &[AcceptedBond],
        structure: &Structure,
    ) -> Result<(), Error> {
        for bond in bonds {
            self.csv.serialize(AuditRow::new(source, bond, structure))?;
        }
        self.csv.flush()?;
        Ok(())
    }
}
