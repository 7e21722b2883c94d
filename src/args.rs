use crate::interval::CountdownDuration;
pub use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// Countdown interval override for this run, e.g. "45" or "07:30"
    #[arg(short, long, value_name = "MINUTES[:SS]")]
    pub interval: Option<CountdownDuration>,

    /// Directory holding the saved settings and the log file
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Start from the built-in defaults, ignoring any saved settings
    #[arg(long)]
    pub fresh: bool,

    /// Log debug details to the log file
    #[arg(long)]
    pub verbose: bool,
}
