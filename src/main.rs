use agent_icon::icon_gen::{self, default_output_path};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "agent-icon",
    about = "Generate the 128x128 robot-head PNG icon for the agent extension"
)]
struct Args {
    /// Where to write the PNG. Defaults to media/icon.png in the crate root.
    #[clap(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icon(icon_gen::Args {
        output: args.output.unwrap_or_else(default_output_path),
    })?;

    Ok(())
}
