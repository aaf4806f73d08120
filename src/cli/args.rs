//! CLI argument definitions using clap derive

use clap::Parser;

#[derive(Parser)]
#[command(name = "riskreg")]
#[command(author, version, about = "Interactive risk register with CSV export and heatmap reporting")]
#[command(
    long_about = "Records organizational risks (description, likelihood, impact) in an \
interactive session, exports the register as CSV, and renders a heatmap in the terminal."
)]
pub struct Cli {
    /// Organization name used for the report title and register filename
    #[arg(long, short = 'o')]
    pub org: Option<String>,
}
