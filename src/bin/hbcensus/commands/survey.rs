use std::path::Path;

use anyhow::{Context, Result, bail};

use hbond_census::io::{AuditWriter, TableFormat, read_structure, write_summaries, write_summary};
use hbond_census::{ClassStatistics, SummaryTable, SurveyConfig, SurveyReport, survey};

use crate::cli::SurveyArgs;
use crate::config::{build_read_config, build_survey_config};
use crate::display::{
    Context as DisplayContext, Progress, print_class_table, print_criteria, print_structure_info,
    print_survey_stats,
};
use crate::io::{create_output, open_input, source_label, stdin_is_tty};
use crate::util::convert::{hydrogen_display_name, pairing_display_name};

const STEPS_PER_INPUT: usize = 2;

pub fn run_survey(args: SurveyArgs, ctx: DisplayContext) -> Result<()> {
    if args.inputs.is_empty() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: hbcensus survey <INPUT>... or pipe a PDB file via stdin."
        );
    }

    let read_config = build_read_config(&args.selection);
    let survey_config = build_survey_config(&args.criteria)?;
    let format: TableFormat = args.output.format.into();

    let sources: Vec<Option<&Path>> = if args.inputs.is_empty() {
        vec![None]
    } else {
        args.inputs.iter().map(|p| Some(p.as_path())).collect()
    };

    let mut audit = args
        .output
        .audit
        .as_deref()
        .map(|p| create_output(Some(p)).map(AuditWriter::new))
        .transpose()?;

    if ctx.interactive {
        print_criteria(&survey_config);
    }

    let mut progress = Progress::new(ctx.interactive, STEPS_PER_INPUT * sources.len() + 1);
    let mut tables: Vec<(String, SummaryTable)> = Vec::with_capacity(sources.len());
    let mut pooled = ClassStatistics::new();

    for source in sources {
        let label = source_label(source);

        progress.step(&format!("Reading {}", label));
        let input = open_input(source)?;
        let structure = read_structure(input, &read_config)
            .with_context(|| format!("Failed to read structure from {}", label))?;

        let read_substeps = vec![
            format!("Model {}", read_config.model),
            match read_config.chain {
                Some(chain) => format!("Chain {}", chain),
                None => "All chains".to_string(),
            },
            format!(
                "{} atoms in {} residues",
                structure.atom_count(),
                structure.residue_count()
            ),
        ];
        let read_substeps_ref: Vec<&str> = read_substeps.iter().map(|s| s.as_str()).collect();
        progress.complete_step(&format!("Reading {}", label), &read_substeps_ref);

        if ctx.interactive {
            print_structure_info(&label, &structure);
        }

        progress.step("Screening donor–acceptor pairs");
        let report = survey(&structure, &survey_config)
            .with_context(|| format!("Survey of {} failed", label))?;

        let survey_substeps = build_survey_substeps(&survey_config, &report);
        let survey_substeps_ref: Vec<&str> = survey_substeps.iter().map(|s| s.as_str()).collect();
        progress.complete_step("Screening donor–acceptor pairs", &survey_substeps_ref);

        if ctx.interactive {
            print_survey_stats(&report.stats);
            print_class_table(&report.table);
        }

        if let Some(audit) = audit.as_mut() {
            audit
                .write(&label, &report.bonds, &structure)
                .context("Failed to write bond audit")?;
        }

        if args.output.pool {
            pooled.merge(ClassStatistics::from_bonds(&report.bonds));
        }
        tables.push((label, report.table));
    }

    progress.step("Writing results");
    let mut write_substeps = vec![format!("Summary of {} input(s) ({})", tables.len(), format)];
    if args.output.pool {
        write_substeps.push(format!("Pooled {} bond(s)", pooled.total()));
        tables = vec![("pooled".to_string(), pooled.finalize())];
    }

    let mut output = create_output(args.output.output.as_deref())?;
    let written = match tables.as_slice() {
        [(_, table)] => write_summary(&mut output, table, format),
        _ => {
            let labelled: Vec<(&str, &SummaryTable)> =
                tables.iter().map(|(l, t)| (l.as_str(), t)).collect();
            write_summaries(&mut output, &labelled, format)
        }
    };
    written.context("Failed to write summary table")?;

    if let Some(path) = &args.output.audit {
        write_substeps.push(format!("Bond audit: {}", path.display()));
    }
    let write_substeps_ref: Vec<&str> = write_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Writing results", &write_substeps_ref);

    progress.finish();

    Ok(())
}

fn build_survey_substeps(config: &SurveyConfig, report: &SurveyReport) -> Vec<String> {
    let stats = &report.stats;

    vec![
        format!(
            "{} donors × {} acceptors, {} pairs in range",
            stats.donors, stats.acceptors, stats.pairs_screened
        ),
        format!("Hydrogen: {}", hydrogen_display_name(config.hydrogen)),
        format!(
            "Accepted {} bond(s), rejected {}, skipped {}",
            stats.accepted,
            stats.rejected(),
            stats.skipped()
        ),
        format!("Pairing: {}", pairing_display_name(config.pairing)),
    ]
}
