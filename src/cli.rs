use clap::{ArgAction, Parser, ValueEnum};
use largefiles_core::config::DEFAULT_IGNORE_FILE_NAME;
use largefiles_core::report::OutputFormat;
use largefiles_core::{ErrorPolicy, ScanConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "largefiles",
    version,
    about = "Find files larger than a size threshold, skipping paths listed in an ignore file"
)]
pub struct Args {
    /// Directory to scan (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Report files strictly larger than this many MiB
    #[arg(long, value_name = "MIB", default_value_t = 50, conflicts_with = "threshold_bytes")]
    pub threshold_mib: u64,

    /// Report files strictly larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    pub threshold_bytes: Option<u64>,

    /// Ignore file to read from the scanned directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_IGNORE_FILE_NAME)]
    pub ignore_file: String,

    /// Skip unreadable entries instead of aborting the scan
    #[arg(short, long)]
    pub keep_going: bool,

    /// Threads used to read directories (1 = serial)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

impl Args {
    pub fn scan_config(&self) -> ScanConfig {
        let mut config = ScanConfig::default().with_ignore_file_name(self.ignore_file.clone());
        config = match self.threshold_bytes {
            Some(bytes) => config.with_threshold_bytes(bytes),
            None => config.with_threshold_mib(self.threshold_mib),
        };
        if self.keep_going {
            config = config.with_error_policy(ErrorPolicy::SkipAndContinue);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}
