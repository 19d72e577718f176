use clap::{Parser, Subcommand, ValueEnum};
use regrid::commands::{self, CommandError, ConvertArgs};
use regrid_domain::value_objects::resample_config::{InitialValuePolicy, ResampleMode};
use regrid_domain::value_objects::time_unit::OutputTimeUnit;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "regrid")]
#[command(about = "Resample time-of-change trend data onto a uniform time grid.", version)]
struct Cli {
    /// Log filter used when REGRID_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a TOML job file.
    Run {
        #[arg(long, env = "REGRID_CONFIG")]
        config: PathBuf,
    },
    /// Resample one input file with options given as flags.
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Grid spacing: seconds (600) or a duration (10m, 1h, 1d). Default 600.
        #[arg(long)]
        interval: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Seed used before a column's first recorded value.
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Grid start; defaults to each dataset's first timestamp.
        #[arg(long)]
        start: Option<String>,
        /// Grid end; defaults to covering the last source timestamp.
        #[arg(long)]
        end: Option<String>,
        /// Replace output timestamps with offsets from the grid start.
        #[arg(long, value_enum)]
        time_unit: Option<TimeUnitArg>,
        /// Lines before the header row; omit for files without a header.
        #[arg(long)]
        header_row: Option<usize>,
        /// strftime layout of the input time column.
        #[arg(long)]
        time_format: Option<String>,
        #[arg(long)]
        output_time_format: Option<String>,
        /// CSV separator: a single character or `tab`.
        #[arg(long)]
        separator: Option<String>,
        /// Workbook sheet to read (repeatable).
        #[arg(long = "sheet")]
        sheets: Vec<String>,
        /// Also write the resolved job as TOML for later `regrid run`.
        #[arg(long)]
        save_config: Option<PathBuf>,
    },
    /// Load the input and print what ingestion found, without resampling.
    Inspect {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        header_row: Option<usize>,
        #[arg(long)]
        time_format: Option<String>,
        #[arg(long = "sheet")]
        sheets: Vec<String>,
        /// Expected spacing between changes; longer gaps are counted.
        #[arg(long)]
        interval: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Step,
    Interpolate,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PolicyArg {
    MinOfTrend,
    FirstValue,
    Blank,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum TimeUnitArg {
    None,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl From<ModeArg> for ResampleMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Step => ResampleMode::Step,
            ModeArg::Interpolate => ResampleMode::Interpolate,
        }
    }
}

impl From<PolicyArg> for InitialValuePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::MinOfTrend => InitialValuePolicy::MinOfTrend,
            PolicyArg::FirstValue => InitialValuePolicy::FirstValue,
            PolicyArg::Blank => InitialValuePolicy::Blank,
        }
    }
}

impl From<TimeUnitArg> for OutputTimeUnit {
    fn from(value: TimeUnitArg) -> Self {
        match value {
            TimeUnitArg::None => OutputTimeUnit::None,
            TimeUnitArg::Seconds => OutputTimeUnit::Seconds,
            TimeUnitArg::Minutes => OutputTimeUnit::Minutes,
            TimeUnitArg::Hours => OutputTimeUnit::Hours,
            TimeUnitArg::Days => OutputTimeUnit::Days,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_format = match cli.log_format {
        LogFormat::Text => "text",
        LogFormat::Json => "json",
    };
    if let Err(err) = regrid::obs::init_tracing(&cli.log_level, log_format) {
        eprintln!("error: {err}");
        std::process::exit(2);
    }

    match dispatch(cli.command) {
        Ok(json) => {
            println!(
                "{}",
                serde_json::to_string(&json)
                    .unwrap_or_else(|_| "{\"status\":\"error\",\"error\":\"json\"}".to_string())
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn dispatch(command: Commands) -> Result<serde_json::Value, CommandError> {
    match command {
        Commands::Run { config } => commands::run_config(&config),
        Commands::Convert {
            input,
            output,
            interval,
            mode,
            policy,
            start,
            end,
            time_unit,
            header_row,
            time_format,
            output_time_format,
            separator,
            sheets,
            save_config,
        } => commands::convert(&ConvertArgs {
            input,
            output,
            interval,
            mode: mode.map(Into::into),
            policy: policy.map(Into::into),
            start,
            end,
            time_unit: time_unit.map(Into::into),
            header_row,
            time_format,
            output_time_format,
            separator,
            sheets,
            save_config,
        }),
        Commands::Inspect {
            input,
            header_row,
            time_format,
            sheets,
            interval,
        } => commands::inspect(
            &input,
            header_row,
            time_format,
            sheets,
            interval.as_deref(),
        ),
    }
}
