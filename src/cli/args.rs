use clap::Parser;

use crate::measure::MeasurementMode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub feed_url: Option<String>,

    #[arg(long)]
    pub service_url: Option<String>,

    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long, value_enum)]
    pub mode: Option<MeasurementMode>,
}

impl CliArgs {
    /// Mode the controller starts in before any `mode` command.
    pub fn initial_mode(&self) -> MeasurementMode {
        self.mode.unwrap_or(MeasurementMode::Single)
    }
}
