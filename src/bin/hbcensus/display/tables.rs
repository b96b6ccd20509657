use std::collections::HashSet;
use std::io::{self, Write};

use hbond_census::{Structure, SummaryTable, SurveyConfig, SurveyStats, classify};

use crate::util::convert::{hydrogen_display_name, pairing_display_name};
use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_structure_info(label: &str, structure: &Structure) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let chains: String = structure.chains().into_iter().collect();
    let classified: HashSet<_> = structure
        .atoms()
        .iter()
        .filter(|atom| classify(atom.secondary_structure).is_classified())
        .map(|atom| atom.residue)
        .collect();

    let rows = vec![
        ("Source", label.to_string()),
        ("Atoms", format!("{}", structure.atom_count())),
        ("Residues", format!("{}", structure.residue_count())),
        ("Chains", chains),
        ("In H / G / E", format!("{}", classified.len())),
    ];

    print_kv_table(&mut out, "Structure Summary", &rows);
}

pub fn print_criteria(config: &SurveyConfig) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let t = &config.thresholds;
    let rows = vec![
        ("D···A (Å)", format!("< {:.2}", t.donor_acceptor_max_distance)),
        ("H···A (Å)", format!("< {:.2}", t.hydrogen_acceptor_max_distance)),
        ("∠D-H···A", format!("> {:.1}°", t.dha_angle_min)),
        ("∠D···A=C", format!("> {:.1}°", t.dab_angle_min)),
        ("∠H···A=C", format!("> {:.1}°", t.hab_angle_min)),
        ("Hydrogen", hydrogen_display_name(config.hydrogen).to_string()),
        ("Pairing", pairing_display_name(config.pairing).to_string()),
    ];

    print_kv_table(&mut out, "Acceptance Criteria", &rows);
}

pub fn print_survey_stats(stats: &SurveyStats) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = vec![
        ("Donors", format!("{}", stats.donors)),
        ("Acceptors", format!("{}", stats.acceptors)),
        ("Pairs screened", format!("{}", stats.pairs_screened)),
        ("Accepted", format!("{}", stats.accepted)),
    ];

    const CRITERIA: [&str; 5] = [
        "Failed D···A",
        "Failed H···A",
        "Failed ∠D-H···A",
        "Failed ∠D···A=C",
        "Failed ∠H···A=C",
    ];
    for (name, count) in CRITERIA.into_iter().zip(stats.rejected_by_criterion) {
        if count > 0 {
            rows.push((name, format!("{}", count)));
        }
    }

    for (name, count) in [
        ("No hydrogen/C/N", stats.missing_atom),
        ("Degenerate", stats.degenerate_geometry),
        ("Unclassified", stats.unclassified_antecedent),
        ("Not exclusive", stats.dropped_by_exclusivity),
    ] {
        if count > 0 {
            rows.push((name, format!("{}", count)));
        }
    }

    print_kv_table(&mut out, "Screening", &rows);
}

pub fn print_class_table(table: &SummaryTable) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let _ = writeln!(out, "{}┌─ Class Means ─┐", INDENT);
    let _ = writeln!(
        out,
        "{}┌─────────────┬───────┬───────┬───────┬────────┬────────┬───────┬────────┐",
        INDENT
    );
    let _ = writeln!(
        out,
        "{}│ Class       │ Bonds │  D_ON │  D_OH │  ∠NHO  │  ∠HOC  │  Beta │  Gamma │",
        INDENT
    );
    let _ = writeln!(
        out,
        "{}├─────────────┼───────┼───────┼───────┼────────┼────────┼───────┼────────┤",
        INDENT
    );

    if table.is_empty() {
        let _ = writeln!(
            out,
            "{}│ {:<11} │ {:>5} │ {:>5} │ {:>5} │ {:>6} │ {:>6} │ {:>5} │ {:>6} │",
            INDENT, "(none)", 0, "-", "-", "-", "-", "-", "-"
        );
    }

    for row in &table.rows {
        let m = &row.means;
        let _ = writeln!(
            out,
            "{}│ {:<11} │ {:>5} │ {:>5.2} │ {:>5.2} │ {:>6.1} │ {:>6.1} │ {:>5.1} │ {:>6.1} │",
            INDENT,
            truncate(row.class.label(), 11),
            row.bonds,
            m.donor_acceptor_distance,
            m.hydrogen_acceptor_distance,
            m.dha_angle,
            m.hab_angle,
            m.beta,
            m.gamma,
        );
    }

    let _ = writeln!(
        out,
        "{}└─────────────┴───────┴───────┴───────┴────────┴────────┴───────┴────────┘",
        INDENT
    );
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT,
        "Metric",
        "Value",
        key_w = key_w,
        val_w = val_w
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
