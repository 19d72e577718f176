use regrid_application::config::{
    load_config, to_toml_pretty, InputConfig, JobConfig, OutputConfig, ResampleSection,
};
use regrid_application::inspection;
use regrid_application::resampling::{run_job, JobReport};
use regrid_domain::errors::ResampleError;
use regrid_domain::value_objects::interval::parse_duration_like_seconds;
use regrid_domain::value_objects::resample_config::{InitialValuePolicy, ResampleMode};
use regrid_domain::value_objects::time_unit::OutputTimeUnit;
use regrid_infrastructure::tables::FilesystemTableSource;
use regrid_infrastructure::writers::FilesystemTableSink;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Bad flags, job file or formats.
    Config(String),
    /// Reading or writing data failed.
    Runtime(String),
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Config(_) => 2,
            CommandError::Runtime(_) => 1,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Config(msg) | CommandError::Runtime(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<ResampleError> for CommandError {
    fn from(err: ResampleError) -> Self {
        if err.is_configuration() {
            CommandError::Config(err.to_string())
        } else {
            CommandError::Runtime(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub interval: Option<String>,
    pub mode: Option<ResampleMode>,
    pub policy: Option<InitialValuePolicy>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub time_unit: Option<OutputTimeUnit>,
    pub header_row: Option<usize>,
    pub time_format: Option<String>,
    pub output_time_format: Option<String>,
    pub separator: Option<String>,
    pub sheets: Vec<String>,
    pub save_config: Option<PathBuf>,
}

pub fn run_config(path: &Path) -> Result<serde_json::Value, CommandError> {
    let job = load_config(path).map_err(CommandError::Config)?;
    execute("run", &job)
}

pub fn convert(args: &ConvertArgs) -> Result<serde_json::Value, CommandError> {
    let job = job_from_args(args)?;
    if let Some(path) = &args.save_config {
        let contents = to_toml_pretty(&job).map_err(CommandError::Runtime)?;
        fs::write(path, contents).map_err(|err| {
            CommandError::Runtime(format!(
                "failed to write config snapshot {}: {}",
                path.display(),
                err
            ))
        })?;
    }
    execute("convert", &job)
}

pub fn inspect(
    input: &Path,
    header_row: Option<usize>,
    time_format: Option<String>,
    sheets: Vec<String>,
    interval: Option<&str>,
) -> Result<serde_json::Value, CommandError> {
    let expected_step = interval
        .map(parse_duration_like_seconds)
        .transpose()
        .map_err(CommandError::Config)?;
    let input = InputConfig {
        path: path_string(input)?,
        header_row,
        time_format,
        sheets: (!sheets.is_empty()).then_some(sheets),
    };
    Ok(inspection::inspect(
        &input,
        expected_step,
        &FilesystemTableSource::new(),
    )?)
}

/// Builds the same job a TOML file would describe from `convert` flags.
pub fn job_from_args(args: &ConvertArgs) -> Result<JobConfig, CommandError> {
    let interval_seconds = args
        .interval
        .as_deref()
        .map(parse_duration_like_seconds)
        .transpose()
        .map_err(|err| CommandError::Config(format!("--interval: {err}")))?;
    Ok(JobConfig {
        input: InputConfig {
            path: path_string(&args.input)?,
            header_row: args.header_row,
            time_format: args.time_format.clone(),
            sheets: (!args.sheets.is_empty()).then(|| args.sheets.clone()),
        },
        output: OutputConfig {
            path: path_string(&args.output)?,
            separator: args.separator.clone(),
            time_format: args.output_time_format.clone(),
        },
        resample: ResampleSection {
            start_time: args.start.clone(),
            end_time: args.end.clone(),
            interval_seconds,
            mode: args.mode,
            initial_value_policy: args.policy,
            output_time_unit: args.time_unit,
        },
    })
}

fn execute(command: &str, job: &JobConfig) -> Result<serde_json::Value, CommandError> {
    let report: JobReport = run_job(
        job,
        &FilesystemTableSource::new(),
        &FilesystemTableSink::new(),
    )?;
    metrics::counter!("regrid.cli.jobs_total", "command" => command.to_string()).increment(1);
    let report = serde_json::to_value(&report)
        .map_err(|err| CommandError::Runtime(format!("failed to serialize report: {err}")))?;
    Ok(json!({
        "command": command,
        "status": "ok",
        "report": report,
    }))
}

fn path_string(path: &Path) -> Result<String, CommandError> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| CommandError::Config(format!("path is not valid utf-8: {}", path.display())))
}
