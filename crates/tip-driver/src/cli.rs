//! Command-line argument surface (§10.2, §13).

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "tip", about = "Type and sign analysis for TIP programs")]
pub struct Cli {
    /// TIP source file to analyze.
    pub input: PathBuf,

    /// Print the type relation dump.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub types: bool,

    /// Print the per-node sign analysis dump.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub signs: bool,

    /// Override `RUST_LOG` with an explicit filter directive (e.g. `debug`).
    #[arg(long)]
    pub log: Option<String>,
}
