mod models;
mod survey;

use models::run_models;
use survey::run_survey;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Survey(args) => run_survey(args, ctx),
        Command::Models(args) => run_models(args, ctx),
    }
}
