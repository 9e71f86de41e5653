//! CLI Tests for the xlsxqa binary
//!
//! Runs the compiled binary against generated workbooks in a temporary directory.

use rust_xlsxwriter::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_workbook(path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    let main = workbook.add_worksheet();
    main.set_name("Main")?;
    main.write_string(0, 0, "Index")?;

    let savings = workbook.add_worksheet();
    savings.set_name("Savings")?;
    savings.write_string(0, 0, "Savings Account")?;
    savings.write_string(1, 0, "What is the minimum balance?")?;
    savings.write_string(2, 0, "PKR 5,000 for savings accounts.")?;
    savings.write_string(3, 0, "How do I open an account?")?;
    savings.write_string(4, 0, "Visit any branch with your CNIC.")?;

    workbook.save(path)?;
    Ok(())
}

fn xlsxqa() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xlsxqa"))
}

#[test]
fn test_cli_writes_three_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("knowledge.xlsx");
    let out_dir = dir.path().join("out");
    write_workbook(&input).unwrap();

    let status = xlsxqa()
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .arg("--faq")
        .arg(dir.path().join("missing_faq.json"))
        .status()
        .unwrap();
    assert!(status.success());

    let all: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("all_qa_pairs.json")).unwrap())
            .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);

    let instruction = fs::read_to_string(out_dir.join("finetuning_data.jsonl")).unwrap();
    assert_eq!(instruction.lines().count(), 2);

    let chat = fs::read_to_string(out_dir.join("finetuning_data_chat.jsonl")).unwrap();
    assert_eq!(chat.lines().count(), 2);
}

#[test]
fn test_cli_merges_faq() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("knowledge.xlsx");
    let faq = dir.path().join("faq.json");
    let out_dir = dir.path().join("out");
    write_workbook(&input).unwrap();
    fs::write(
        &faq,
        r#"{"categories":[{"category":"Transfers","questions":[{"question":"Is IBFT free?","answer":"Yes."}]}]}"#,
    )
    .unwrap();

    let status = xlsxqa()
        .arg(&input)
        .args(["--out-dir"])
        .arg(&out_dir)
        .arg("--faq")
        .arg(&faq)
        .status()
        .unwrap();
    assert!(status.success());

    let all: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(out_dir.join("all_qa_pairs.json")).unwrap())
            .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2]["product"], "Mobile App – Transfers");
    assert_eq!(all[2]["sheet"], "funds_transfer_app_features_faq.json");
}

#[test]
fn test_cli_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("knowledge.xlsx");
    let out_dir = dir.path().join("out");
    write_workbook(&input).unwrap();

    let run = || {
        let status = xlsxqa()
            .arg(&input)
            .arg("--out-dir")
            .arg(&out_dir)
            .status()
            .unwrap();
        assert!(status.success());
        [
            "all_qa_pairs.json",
            "finetuning_data.jsonl",
            "finetuning_data_chat.jsonl",
        ]
        .map(|name| fs::read(out_dir.join(name)).unwrap())
    };

    assert_eq!(run(), run());
}

#[test]
fn test_cli_corrupt_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xlsx");
    let out_dir = dir.path().join("out");
    fs::write(&input, b"not a workbook").unwrap();

    let output = xlsxqa()
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!out_dir.exists());
}

#[test]
fn test_cli_prints_sample_pairs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("knowledge.xlsx");
    let out_dir = dir.path().join("out");
    write_workbook(&input).unwrap();

    let output = xlsxqa()
        .arg(&input)
        .arg("--out-dir")
        .arg(&out_dir)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let samples = stdout
        .split("SAMPLE Q&A PAIRS (first 3):")
        .nth(1)
        .expect("sample section");
    assert!(samples.contains("[1] Product: Savings Account"));
    assert!(samples.contains("Q: What is the minimum balance?"));
    assert!(samples.contains("A: PKR 5,000 for savings accounts."));
    assert!(samples.contains("[2] Product: Savings Account"));
    assert!(!samples.contains("[3]"));
}
