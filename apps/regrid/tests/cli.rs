use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("regrid_cli_{}_{}", tag, std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_trend(dir: &Path) -> PathBuf {
    let path = dir.join("chiller.csv");
    fs::write(
        &path,
        "Time,Item 1,Item 2\n\
         04/11/17 11:00:00 AM CST,2,\n\
         04/11/17 11:20:00 AM CST,3,OFF\n",
    )
    .expect("write trend");
    path
}

fn regrid(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_regrid"))
        .args(args)
        .env("REGRID_LOG", "warn")
        .env_remove("REGRID_CONFIG")
        .output()
        .expect("run regrid")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn convert_writes_csv_and_reports_warnings() {
    let dir = temp_dir("convert");
    let input = write_trend(&dir);
    let output = dir.join("regular.csv");

    let out = regrid(&[
        "convert",
        "--input",
        input.to_str().expect("utf8"),
        "--output",
        output.to_str().expect("utf8"),
        "--header-row",
        "0",
        "--interval",
        "10m",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let summary = stdout_json(&out);
    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["report"]["datasets"][0]["name"], "chiller");
    assert_eq!(summary["report"]["warnings"][0]["column"], "Item 2");
    assert_eq!(summary["report"]["warnings"][0]["issue"]["kind"], "all_invalid_column");

    let contents = fs::read_to_string(&output).expect("read output");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Time,Item 1,Item 2");
    assert_eq!(lines[1], "2017-04-11 11:00:00,2,");
    assert_eq!(lines[2], "2017-04-11 11:10:00,2,");
    assert_eq!(lines[3], "2017-04-11 11:20:00,3,");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_reads_a_job_file_and_saved_configs_round_trip() {
    let dir = temp_dir("run");
    let input = write_trend(&dir);
    let output = dir.join("regular.json");
    let saved = dir.join("job.toml");

    let out = regrid(&[
        "convert",
        "--input",
        input.to_str().expect("utf8"),
        "--output",
        output.to_str().expect("utf8"),
        "--header-row",
        "0",
        "--mode",
        "interpolate",
        "--time-unit",
        "minutes",
        "--save-config",
        saved.to_str().expect("utf8"),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let _ = fs::remove_file(&output);

    let out = regrid(&["run", "--config", saved.to_str().expect("utf8")]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout_json(&out)["command"], "run");

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read json")).expect("json");
    let table = &doc["tables"][0];
    assert_eq!(table["time_unit"], "minutes");
    assert_eq!(table["rows"][1]["time"], 10.0);
    assert_eq!(table["rows"][1]["values"][0], 2.5);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn configuration_errors_exit_with_two() {
    let dir = temp_dir("config_err");
    let input = write_trend(&dir);

    let out = regrid(&[
        "convert",
        "--input",
        input.to_str().expect("utf8"),
        "--output",
        dir.join("out.xlsx").to_str().expect("utf8"),
    ]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unsupported output format"));

    let bad_job = dir.join("bad.toml");
    fs::write(&bad_job, "[input]\npath = \"a.csv\"\n\n[output]\npath = \"b.csv\"\nextra = 1\n")
        .expect("write job");
    let out = regrid(&["run", "--config", bad_job.to_str().expect("utf8")]);
    assert_eq!(out.status.code(), Some(2));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_exits_with_one() {
    let dir = temp_dir("io_err");
    let out = regrid(&[
        "convert",
        "--input",
        dir.join("absent.csv").to_str().expect("utf8"),
        "--output",
        dir.join("out.csv").to_str().expect("utf8"),
    ]);
    assert_eq!(out.status.code(), Some(1));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inspect_prints_load_report() {
    let dir = temp_dir("inspect");
    let input = write_trend(&dir);
    let out = regrid(&[
        "inspect",
        "--input",
        input.to_str().expect("utf8"),
        "--header-row",
        "0",
        "--interval",
        "600",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let report = stdout_json(&out);
    assert_eq!(report["mode"], "inspect");
    assert_eq!(report["datasets"][0]["load"]["rows"], 2);
    assert_eq!(report["datasets"][0]["load"]["missing_cells"], 1);
    assert_eq!(report["datasets"][0]["load"]["invalid_cells"], 1);
    assert_eq!(report["datasets"][0]["profile"]["gaps"], 1);
    let _ = fs::remove_dir_all(&dir);
}
