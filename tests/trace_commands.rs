use crate::common::command::{lease_v1, lease_v2, run_redline_command, workspace_dir, write_leases};
use crate::common::docx::DocxSpec;
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::{PredicateBooleanExt, predicate};
use rstest::rstest;

mod common;

#[rstest]
fn trace_word_level_text(workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_redline_command(
        workspace_dir.path(),
        &[
            "trace",
            "--text",
            "The Tenant shall pay rent monthly.",
            "The Tenant shall pay the rent quarterly.",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
        "Word-level comparison: 11 vs 13 tokens\n",
    ))
    .stdout(predicate::str::contains("\nLCS length: 10\n"))
    .stdout(predicate::str::contains(
        "=== COALESCED EDIT SCRIPT ===\n  = The Tenant shall pay\n  +  the\n  =  rent \n  - monthly.\n  + quarterly.\n",
    ))
    .stdout(predicate::str::contains("Raw operations: 14\nCoalesced groups: 5\n"))
    .stdout(predicate::str::contains("  <w:del> #3: monthly.\n  <w:ins> #4: quarterly.\n"))
    .stdout(predicate::str::contains("=== SIDE-BY-SIDE ALIGNMENT ==="));

    Ok(())
}

#[rstest]
fn trace_characters_without_coalescing(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = [
        "Character-level comparison: 6 vs 7 chars",
        "",
        "=== INPUT ===",
        "Text 1: \"kitten\"",
        "Text 2: \"sitting\"",
        "",
        "LCS length: 4",
        "",
        "=== RAW EDIT SCRIPT ===",
        "  - k",
        "  + s",
        "  = i",
        "  = t",
        "  = t",
        "  - e",
        "  + i",
        "  = n",
        "  + g",
        "",
    ]
    .join("\n");

    let actual_output = run_redline_command(
        workspace_dir.path(),
        &["trace", "--text", "--chars", "--no-coalesce", "kitten", "sitting"],
    )
    .assert()
    .success();
    let stdout = actual_output.get_output().stdout.clone();
    let actual_output = String::from_utf8(stdout)?;

    pretty_assertions::assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn trace_prints_matrix_and_backtrack(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_redline_command(
        workspace_dir.path(),
        &["trace", "--text", "--chars", "--matrix", "--trace", "ab", "ba"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("=== LCS MATRIX ==="))
    .stdout(predicate::str::contains(
        "=== BACKTRACK TRACE ===\nStarting at matrix[2][2] = 1\n  [2,2] INSERT: \"a\"\n  [2,1] MATCH: \"b\"\n  [1,0] DELETE: \"a\"\n",
    ));

    Ok(())
}

#[rstest]
fn trace_skips_large_matrix(workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let old = Words(20..30).fake::<Vec<String>>().join(" ");
    let new = Words(20..30).fake::<Vec<String>>().join(" ");

    run_redline_command(
        workspace_dir.path(),
        &["trace", "--text", "--matrix", old.as_str(), new.as_str()],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("(Matrix too large to display:"))
    .stdout(predicate::str::contains("=== LCS MATRIX ===").not());

    Ok(())
}

#[rstest]
fn trace_document_sections(
    workspace_dir: TempDir,
    lease_v1: DocxSpec,
    lease_v2: DocxSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let (old, new) = write_leases(workspace_dir.path(), lease_v1, lease_v2);

    run_redline_command(
        workspace_dir.path(),
        &[
            "trace",
            old.to_str().ok_or("non UTF-8 path")?,
            new.to_str().ok_or("non UTF-8 path")?,
            "3.1",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "Text 1: \"3.1 Rent The Tenant shall pay rent monthly.\"",
    ))
    .stdout(predicate::str::contains(
        "Text 2: \"3.1 Rent The Tenant shall pay the rent quarterly.\"",
    ))
    .stdout(predicate::str::contains("  - monthly.\n  + quarterly.\n"));

    Ok(())
}

#[rstest]
fn trace_footnotes(
    workspace_dir: TempDir,
    lease_v1: DocxSpec,
    lease_v2: DocxSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let (old, new) = write_leases(workspace_dir.path(), lease_v1, lease_v2);

    run_redline_command(
        workspace_dir.path(),
        &[
            "trace",
            old.to_str().ok_or("non UTF-8 path")?,
            new.to_str().ok_or("non UTF-8 path")?,
            "footnote 1",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("  - first\n  + fifth\n"));

    Ok(())
}

#[rstest]
fn trace_documents_without_query_fails(
    workspace_dir: TempDir,
    lease_v1: DocxSpec,
    lease_v2: DocxSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let (old, new) = write_leases(workspace_dir.path(), lease_v1, lease_v2);

    run_redline_command(
        workspace_dir.path(),
        &[
            "trace",
            old.to_str().ok_or("non UTF-8 path")?,
            new.to_str().ok_or("non UTF-8 path")?,
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("query is required"));

    Ok(())
}

#[rstest]
fn trace_missing_section_fails(
    workspace_dir: TempDir,
    lease_v1: DocxSpec,
    lease_v2: DocxSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let (old, new) = write_leases(workspace_dir.path(), lease_v1, lease_v2);

    run_redline_command(
        workspace_dir.path(),
        &[
            "trace",
            old.to_str().ok_or("non UTF-8 path")?,
            new.to_str().ok_or("non UTF-8 path")?,
            "9.9",
        ],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not find section '9.9' in"))
    .stderr(predicate::str::contains("lease_v1.docx"));

    Ok(())
}
