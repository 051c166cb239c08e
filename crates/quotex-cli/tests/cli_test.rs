use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER_PAGE: &str = "\
ALCORN INDUSTRIAL INC QUOTATION
Quote Date: Mar 4, 2024
Customer ID Salesperson Ship Via Terms Quote No
11007-4 JZ UPSPPA NET30 QT000171
Ship To
Acme Corp
123 Main St
Springfield, IL 62704
USA
";

const ITEMS_PAGE: &str = "\
Please send your order to:
2 MISC 158012-5013 ASSY ATE400 48INX30IN 2,935.00 5,870.00
Tax Summary
";

/// Temp workspace with an empty config file so the user's config is never read.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.json"), "{}").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_dump(&self, name: &str, pages: &[&str]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, pages.join("\u{c}")).unwrap();
        path
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("quotex");
        cmd.arg("--config").arg(self.path("config.json"));
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn process_text_dump_as_csv() {
    let ws = Workspace::new();
    let input = ws.write_dump("QT000171.txt", &[HEADER_PAGE, ITEMS_PAGE]);

    ws.cmd()
        .arg("process")
        .arg(&input)
        .args(["-f", "csv"])
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with("ReferralManagerCode,ReferralManager,ReferralEmail,Brand")
                .and(predicate::str::contains(
                    "JZ,,,Alcorn Industrial Inc,QT000171,,\"Mar 4, 2024\",,11007-4,Acme Corp",
                ))
                .and(predicate::str::contains("158012-5013,ASSY ATE400 48INX30IN,,2,2935.00,,5870.00"))
                .and(predicate::str::contains("QT000171.txt")),
        );
}

#[test]
fn process_json_output_to_file() {
    let ws = Workspace::new();
    let input = ws.write_dump("q.txt", &[HEADER_PAGE, ITEMS_PAGE]);
    let output = ws.path("out.json");

    ws.cmd()
        .arg("process")
        .arg(&input)
        .args(["-f", "json", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records written"));

    let records: serde_json::Value = serde_json::from_str(&read(&output)).unwrap();
    let record = &records[0];
    assert_eq!(record["QuoteNumber"], "QT000171");
    assert_eq!(record["Customer Number/ID"], "11007-4");
    assert_eq!(record["Country"], "USA");
    assert_eq!(record["Quantity"], 2);
    assert_eq!(record["FirstName"], serde_json::Value::Null);
}

#[test]
fn process_without_header_warns() {
    let ws = Workspace::new();
    let input = ws.write_dump("items-only.txt", &[ITEMS_PAGE]);

    ws.cmd()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "No line items found in the supplied documents.",
        ));
}

#[test]
fn process_rejects_missing_and_unsupported_files() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("process")
        .arg(ws.path("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let docx = ws.path("quote.docx");
    fs::write(&docx, "x").unwrap();
    ws.cmd()
        .arg("process")
        .arg(&docx)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn batch_merges_in_input_order() {
    let ws = Workspace::new();
    let inputs = ws.path("in");
    fs::create_dir(&inputs).unwrap();

    let second_quote = HEADER_PAGE.replace("QT000171", "QT000172");
    let second_items = ITEMS_PAGE.replace("158012-5013", "999-1");
    fs::write(inputs.join("a.txt"), [HEADER_PAGE, ITEMS_PAGE].join("\u{c}")).unwrap();
    fs::write(inputs.join("b.txt"), ITEMS_PAGE).unwrap();
    fs::write(
        inputs.join("c.txt"),
        [second_quote.as_str(), second_items.as_str()].join("\u{c}"),
    )
    .unwrap();

    let output = ws.path("out/merged.csv");
    ws.cmd()
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .args(["-j", "3", "--summary", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 successful, 0 failed, 2 records"));

    let merged = read(&output);
    let lines: Vec<&str> = merged.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("QT000171") && lines[1].contains("a.txt"));
    assert!(lines[2].contains("QT000172") && lines[2].contains("c.txt"));

    let summary = read(&ws.path("out/summary.csv"));
    assert!(summary.starts_with("filename,status,quote_numbers,records"));
    assert!(summary.contains("b.txt,success,,0,1,0,0"));
}

#[test]
fn batch_skips_failed_documents_by_default() {
    let ws = Workspace::new();
    let inputs = ws.path("in");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("bad.pdf"), "not a pdf").unwrap();
    fs::write(inputs.join("good.txt"), [HEADER_PAGE, ITEMS_PAGE].join("\u{c}")).unwrap();

    let output = ws.path("merged.csv");
    ws.cmd()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .args(["-j", "1", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 successful, 1 failed, 1 records")
                .and(predicate::str::contains("Failed files:"))
                .and(predicate::str::contains("bad.pdf")),
        );

    let merged = read(&output);
    assert!(merged.contains("QT000171") && merged.contains("good.txt"));
}

#[test]
fn batch_fail_fast_stops_at_first_failure() {
    let ws = Workspace::new();
    let inputs = ws.path("in");
    fs::create_dir(&inputs).unwrap();
    fs::write(inputs.join("bad.pdf"), "not a pdf").unwrap();
    fs::write(inputs.join("good.txt"), [HEADER_PAGE, ITEMS_PAGE].join("\u{c}")).unwrap();

    let output = ws.path("merged.csv");
    ws.cmd()
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .args(["-j", "1", "--fail-fast", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed for bad.pdf"));
    assert!(!output.exists());
}

#[test]
fn batch_summary_into_new_directory() {
    let ws = Workspace::new();
    let input = ws.write_dump("a.txt", &[HEADER_PAGE, ITEMS_PAGE]);
    let output = ws.path("fresh/nested/merged.csv");

    ws.cmd()
        .arg("batch")
        .arg(&input)
        .args(["--summary", "-o"])
        .arg(&output)
        .assert()
        .success();

    assert!(read(&output).contains("QT000171"));
    assert!(read(&ws.path("fresh/nested/summary.csv")).contains("a.txt,success,QT000171,1"));
}

#[test]
fn batch_default_output_takes_format_extension() {
    let ws = Workspace::new();
    let input = ws.write_dump("a.txt", &[HEADER_PAGE, ITEMS_PAGE]);

    ws.cmd()
        .current_dir(ws.dir.path())
        .arg("batch")
        .arg(&input)
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alcorn_Quotes_Merged.json"));

    let records: serde_json::Value =
        serde_json::from_str(&read(&ws.path("Alcorn_Quotes_Merged.json"))).unwrap();
    assert_eq!(records[0]["QuoteNumber"], "QT000171");
    assert!(!ws.path("Alcorn_Quotes_Merged.csv").exists());
}

#[test]
fn batch_fail_on_empty() {
    let ws = Workspace::new();
    ws.write_dump("empty.txt", &["nothing to see"]);
    let pattern = format!("{}/*.txt", ws.dir.path().display());

    ws.cmd()
        .arg("batch")
        .arg(&pattern)
        .assert()
        .success()
        .stderr(predicate::str::contains("No line items found"));

    ws.cmd()
        .arg("batch")
        .arg(&pattern)
        .arg("--fail-on-empty")
        .assert()
        .failure();
}

#[test]
fn config_init_get_set() {
    let ws = Workspace::new();
    let config = ws.path("nested/config.json");
    let cmd = || {
        let mut cmd = cargo_bin_cmd!("quotex");
        cmd.arg("--config").arg(&config);
        cmd
    };

    cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    cmd().args(["config", "init"]).assert().success();
    assert!(config.exists());

    cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cmd()
        .args(["config", "set", "extraction.brand", "Other Brand"])
        .assert()
        .success();
    cmd()
        .args(["config", "get", "extraction.brand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Other Brand\""));

    cmd()
        .args(["config", "set", "extraction.no_such_key", "1"])
        .assert()
        .failure();
    cmd()
        .args(["config", "get", "output.file_name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alcorn_Quotes_Merged.csv"));
}
