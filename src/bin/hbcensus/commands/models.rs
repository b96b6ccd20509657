use std::io::{self, Write};

use anyhow::{Context, Result};

use hbond_census::io::count_models;

use crate::cli::ModelsArgs;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::open_input;

pub fn run_models(args: ModelsArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 1);

    progress.step("Counting models");
    let input = open_input(Some(args.input.as_path()))?;
    let count = count_models(input)
        .with_context(|| format!("Failed to count models in {}", args.input.display()))?;
    let summary = format!("{} model(s)", count);
    progress.complete_step("Counting models", &[summary.as_str()]);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", count).context("Failed to write model count")?;

    progress.finish();

    Ok(())
}
