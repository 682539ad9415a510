use crate::common::docx::{DocxSpec, write_docx};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn lease_v1() -> DocxSpec {
    DocxSpec::new(vec![
        "Lease Agreement".to_string(),
        "3. Payments".to_string(),
        "3.1 Rent".to_string(),
        "The Tenant shall pay rent monthly.".to_string(),
        "3.2 Deposit".to_string(),
        "The deposit is one month of rent.".to_string(),
        "4 Term".to_string(),
    ])
    .with_footnote("1", "Rent is due on the first day.")
}

#[fixture]
pub fn lease_v2() -> DocxSpec {
    DocxSpec::new(vec![
        "Lease Agreement".to_string(),
        "3. Payments".to_string(),
        "3.1 Rent".to_string(),
        "The Tenant shall pay the rent quarterly.".to_string(),
        "3.2 Deposit".to_string(),
        "The deposit is two months of rent.".to_string(),
        "4 Term".to_string(),
    ])
    .with_footnote("1", "Rent is due on the fifth day.")
}

/// Writes both lease versions into `dir` and returns their paths.
pub fn write_leases(dir: &Path, v1: DocxSpec, v2: DocxSpec) -> (PathBuf, PathBuf) {
    let old = dir.join("lease_v1.docx");
    let new = dir.join("lease_v2.docx");
    write_docx(&old, &v1);
    write_docx(&new, &v2);
    (old, new)
}

pub fn run_redline_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("redline-trace").expect("Failed to find redline-trace binary");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
