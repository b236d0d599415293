//! Integration tests for the CLI interface
//!
//! Runs the binary against configuration and CSV fixtures in a temp directory

use assert_cmd::Command;
use calamine::{open_workbook, Data, Reader, Xlsx};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn site_kpi() -> Command {
    let mut cmd = Command::cargo_bin("site-kpi").unwrap();
    cmd.env_remove("SITE_KPI_CAPACITY_HOURS")
        .env_remove("SITE_KPI_OUTPUT_DIR")
        .env_remove("SITE_KPI_LOG_LEVEL");
    cmd
}

/// Writes a two-region configuration; the Phrae list is intentionally absent.
fn write_fixture(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("sites")).unwrap();
    fs::write(dir.join("sites/NAN.csv"), "SITEID\n1000001\n1000002\n").unwrap();
    fs::write(dir.join("sites/TAK.csv"), "LOCATION ID,PROVINCE\n2000001,Tak\n").unwrap();
    fs::write(
        dir.join("tt.csv"),
        "SITE_7DIGITS,TICKETID,DOWN_TIME,TRUEURGENCY\n\
         1000001,TT-1,120,4\n\
         1000001,TT-1,60,4\n\
         2000001,TT-2,600,4\n",
    )
    .unwrap();

    let config = dir.join("kpi.toml");
    fs::write(
        &config,
        r#"
capacity_days = 26
ticket_source = "tt.csv"
output_dir = "out"

[[regions]]
province = "Nan"
source = "sites/NAN.csv"

[[regions]]
province = "Tak"
source = "sites/TAK.csv"

[[regions]]
province = "Phrae"
source = "sites/PHR.csv"
"#,
    )
    .unwrap();
    config
}

#[test]
fn test_cli_help_flag() {
    site_kpi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_cli_without_command_shows_help() {
    site_kpi()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_command() {
    site_kpi()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_report_end_to_end() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());

    site_kpi()
        .args(["report", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Fault Rate: 66.67% (ticketed sites / registered sites: 2 / 3)",
        ))
        .stdout(predicate::str::contains("Fault Clear Rate: 66.67%"))
        .stdout(predicate::str::contains("Nan"))
        .stderr(predicate::str::contains("Site list for Phrae not found"));

    let out = temp.path().join("out");
    assert!(out.join("kpi_summary.json").is_file());

    let mut workbook: Xlsx<_> =
        open_workbook(out.join("KPI_Site_Availability_Report.xlsx")).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["All_Provinces", "Nan", "Tak", "Summary_By_Province"]
    );
    let all = workbook.worksheet_range("All_Provinces").unwrap();
    assert_eq!(all.height(), 4);
    assert_eq!(all.get((1, 1)), Some(&Data::String("1000001".to_string())));
    assert_eq!(all.get((1, 2)), Some(&Data::Float(2.0)));
}

#[test]
fn test_report_csv_format() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());

    site_kpi()
        .args(["report", "--format", "csv", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(5 files)"));

    let out = temp.path().join("out");
    assert!(!out.join("KPI_Site_Availability_Report.xlsx").exists());
    for name in [
        "01_All_Provinces.csv",
        "02_Nan.csv",
        "03_Tak.csv",
        "04_Summary_By_Province.csv",
        "kpi_summary.json",
    ] {
        assert!(out.join(name).is_file(), "missing {}", name);
    }

    let all = fs::read_to_string(out.join("01_All_Provinces.csv")).unwrap();
    assert_eq!(all.lines().count(), 4);
    assert!(all.contains("Nan,1000001,2.0,"));
    assert!(all.contains("Nan,1000002,0.0,100.0"));
}

#[test]
fn test_report_flags_override_config() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    let other = temp.path().join("elsewhere");

    site_kpi()
        .args(["report", "--capacity-hours", "100", "--config"])
        .arg(&config)
        .arg("--output")
        .arg(&other)
        .assert()
        .success();

    let json = fs::read_to_string(other.join("kpi_summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(summary["capacity_hours"], 100.0);
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_env_overrides_output_dir() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    let env_out = temp.path().join("from-env");

    site_kpi()
        .env("SITE_KPI_OUTPUT_DIR", &env_out)
        .args(["report", "--config"])
        .arg(&config)
        .assert()
        .success();

    assert!(env_out.join("kpi_summary.json").is_file());
}

#[test]
fn test_relative_env_output_dir_resolves_against_working_dir() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(&temp.path().join("conf"));
    let workdir = temp.path().join("work");
    fs::create_dir_all(&workdir).unwrap();

    site_kpi()
        .current_dir(&workdir)
        .env("SITE_KPI_OUTPUT_DIR", "kpi-out")
        .args(["report", "--config"])
        .arg(&config)
        .assert()
        .success();

    assert!(workdir.join("kpi-out/kpi_summary.json").is_file());
    assert!(!temp.path().join("conf/kpi-out").exists());
}

#[test]
fn test_check_lists_sources() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());

    site_kpi()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("(xlsx)"))
        .stdout(predicate::str::contains("[ok] Nan"))
        .stdout(predicate::str::contains("[missing] Phrae"))
        .stdout(predicate::str::contains("2 of 3 region sources present"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_missing_config_exits_with_config_code() {
    let temp = TempDir::new().unwrap();

    site_kpi()
        .args(["report", "--config"])
        .arg(temp.path().join("missing.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration problem"));
}

#[test]
fn test_missing_ticket_file_exits_with_source_code() {
    let temp = TempDir::new().unwrap();
    let config = write_fixture(temp.path());
    fs::remove_file(temp.path().join("tt.csv")).unwrap();

    site_kpi()
        .args(["report", "--config"])
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ticket file not found"));
}

#[test]
fn test_duplicate_region_rejected() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("kpi.toml");
    fs::write(
        &config,
        "capacity_days = 26\n\
         [[regions]]\nprovince = \"Nan\"\nsource = \"a.csv\"\n\
         [[regions]]\nprovince = \"Nan\"\nsource = \"b.csv\"\n",
    )
    .unwrap();

    site_kpi()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("declared more than once"));
}
