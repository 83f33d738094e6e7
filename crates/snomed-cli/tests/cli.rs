//! End-to-end runs of the `snomed` binary against on-disk data.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const BASELINE: &str = r#"[
    {"No_Registrasi": "1001", "Kategori": "disorder", "Teks_Asli_Resume": "DM type 2",
     "Kode_SNOMED": "44054006", "FSN_SNOMED": "Diabetes mellitus type 2"},
    {"No_Registrasi": "1002", "Kategori": "person", "Teks_Asli_Resume": "laki-laki",
     "Kode_SNOMED": "339947000", "FSN_SNOMED": "Male"}
]"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), BASELINE).unwrap();
        Self { dir }
    }

    fn data_file(&self) -> std::path::PathBuf {
        self.dir.path().join("data.json")
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_with_data(&self.data_file(), args)
    }

    fn run_with_data(&self, data: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_snomed"))
            .env_remove("SNOMED_DATA_FILE")
            .env_remove("SNOMED_OVERLAY_DIR")
            .env_remove("RUST_LOG")
            .arg("--data")
            .arg(data)
            .arg("--overlay-dir")
            .arg(self.dir.path().join("overlay"))
            .arg("--color")
            .arg("never")
            .args(args)
            .output()
            .unwrap()
    }

    fn json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(output.status.success(), "{output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn added_records_are_editable_and_baseline_is_not() {
    let workspace = Workspace::new();

    let added = workspace.run(&[
        "add",
        "--registration",
        "2001",
        "--category",
        "person",
        "--text",
        "perempuan",
        "--code",
        "339947000",
        "--name",
        "Male",
    ]);
    assert!(added.status.success(), "{added:?}");
    assert_eq!(stdout(&added).trim(), "Record added as #2.");

    let rows = workspace.json(&["table"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["index"], 2);
    assert_eq!(rows[2]["editable"], true);
    assert_eq!(rows[0]["editable"], false);

    let refused = workspace.run(&["edit", "0", "--code", "248152002"]);
    assert_eq!(refused.status.code(), Some(1));
    assert!(stderr(&refused).contains("cannot be edited"), "{refused:?}");

    let edited = workspace.run(&[
        "edit",
        "2",
        "--code",
        "248152002",
        "--name",
        "Female",
    ]);
    assert!(edited.status.success(), "{edited:?}");

    let rows = workspace.json(&["table", "--category", "person"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["Kode_SNOMED"], "248152002");
    assert_eq!(rows[1]["Teks_Asli_Resume"], "perempuan");

    let stats = workspace.json(&["stats"]);
    assert_eq!(stats["gender"]["primary_count"], 1);
    assert_eq!(stats["gender"]["secondary_count"], 1);
}

#[test]
fn editing_a_missing_index_fails() {
    let workspace = Workspace::new();
    let output = workspace.run(&["edit", "7", "--code", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("There is no record number 7"), "{output:?}");
}

#[test]
fn missing_data_file_degrades_to_empty_results() {
    let workspace = Workspace::new();
    let missing = workspace.dir.path().join("absent.json");
    let output = workspace.run_with_data(&missing, &["search", "diab"]);

    assert!(output.status.success(), "{output:?}");
    assert!(stderr(&output).contains("Failed to load data file"), "{output:?}");
    assert_eq!(stdout(&output), "No results for this search term.\nFound 0 related codes.\n");
}

#[test]
fn search_groups_by_code() {
    let workspace = Workspace::new();
    let hits = workspace.json(&["search", "diab"]);
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["record"]["Kode_SNOMED"], "44054006");
    assert_eq!(hits[0]["usage"]["registration_ids"][0], "1001");
}
