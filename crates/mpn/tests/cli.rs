use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use httpmock::prelude::*;

const SEARCH_PATH: &str = "/api/v1.0/search/partnumber";

const ONE_PART: &str = r#"{
    "Errors": [],
    "SearchResults": {
        "NumberOfResult": 1,
        "Parts": [
            {
                "ManufacturerPartNumber": "LM358DR",
                "Description": "Operational Amplifiers - Op Amps Dual Low Power",
                "Category": "Operational Amplifiers - Op Amps",
                "Manufacturer": "Texas Instruments",
                "LifecycleStatus": null,
                "LeadTime": "42 Days",
                "ROHSStatus": "RoHS Compliant",
                "SuggestedReplacement": "",
                "ProductCompliance": [
                    { "ComplianceName": "ECCN", "ComplianceValue": "EAR99" }
                ],
                "ProductAttributes": []
            }
        ]
    }
}"#;

fn mpn() -> Command {
    let mut cmd = Command::cargo_bin("mpn").unwrap();
    cmd.env_remove("MOUSER_API_KEY")
        .env_remove("MOUSER_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Temp dir holding `parts.csv` with A1..A{count}, one per row
fn parts_file(count: usize) -> TempDir {
    let temp = TempDir::new().unwrap();
    let rows: String = (1..=count).map(|i| format!("A{i},1\n")).collect();
    temp.child("parts.csv").write_str(&rows).unwrap();
    temp
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn batches_prints_one_request_per_line() {
    let temp = parts_file(25);

    let output = mpn()
        .current_dir(temp.path())
        .args(["batches", "parts.csv"])
        .output()
        .unwrap();

    assert!(output.status.success());
    insta::assert_snapshot!(stdout_of(&output), @r"
    A1|A2|A3|A4|A5|A6|A7|A8|A9|A10
    A11|A12|A13|A14|A15|A16|A17|A18|A19|A20
    A21|A22|A23|A24|A25
    ");
}

#[test]
fn batches_respects_window_and_batch_size() {
    let temp = parts_file(25);

    let output = mpn()
        .current_dir(temp.path())
        .args(["batches", "parts.csv", "--start", "5", "--stop", "12"])
        .args(["--batch-size", "4"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "A6|A7|A8|A9\nA10|A11|A12\n");
}

#[test]
fn batches_rejects_zero_batch_size() {
    let temp = parts_file(3);

    let output = mpn()
        .current_dir(temp.path())
        .args(["batches", "parts.csv", "--batch-size", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn missing_input_file_is_reported() {
    let temp = TempDir::new().unwrap();

    let output = mpn()
        .current_dir(temp.path())
        .args(["batches", "missing.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Failed to read part numbers from missing.csv"));
}

#[test]
fn fetch_requires_api_key() {
    let temp = parts_file(3);

    let output = mpn()
        .current_dir(temp.path())
        .args(["fetch", "parts.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Missing Mouser API key"));
    assert!(!temp.child("output_data.csv").path().exists());
}

#[test]
fn fetch_writes_one_row_per_returned_part() {
    let temp = parts_file(25);
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .query_param("apiKey", "test-key");
        then.status(200)
            .header("content-type", "application/json")
            .body(ONE_PART);
    });

    let output = mpn()
        .current_dir(temp.path())
        .env("MOUSER_API_URL", server.base_url())
        .args(["fetch", "parts.csv", "--api-key", "test-key"])
        .args(["--delay-secs", "0", "-o", "results.csv"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr_of(&output));
    search.assert_hits(3);

    let csv = std::fs::read_to_string(temp.child("results.csv").path()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "MPN,Description,Category,Manufacturer,Lifecycle Status,Lead Time,ROHSStatus,SuggestedReplacement,ProductCompliance,ProductAttributes"
    );
    assert!(lines[1].starts_with("LM358DR,"));
    assert!(stdout_of(&output).contains("LM358DR"));
}

#[test]
fn fetch_with_no_usable_responses_fails() {
    let temp = parts_file(15);
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(500);
    });

    let output = mpn()
        .current_dir(temp.path())
        .env("MOUSER_API_URL", server.base_url())
        .env("MOUSER_API_KEY", "test-key")
        .args(["fetch", "parts.csv", "--delay-secs", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    search.assert_hits(2);
    assert!(stderr_of(&output).contains("No part data returned for 2 batches"));
}

#[test]
fn fetch_aborts_after_three_malformed_responses() {
    let temp = parts_file(50);
    let server = MockServer::start();
    let search = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(200).body("{\"Errors\": []}");
    });

    let output = mpn()
        .current_dir(temp.path())
        .env("MOUSER_API_URL", server.base_url())
        .args(["fetch", "parts.csv", "--api-key", "test-key"])
        .args(["--delay-secs", "0"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    search.assert_hits(3);
    assert!(stderr_of(&output).contains("Run aborted at batch 3 of 5"));
}

#[test]
fn fetch_exports_partial_results_before_abort() {
    let temp = parts_file(50);
    let server = MockServer::start();
    let first_batch = server.mock(|when, then| {
        when.method(POST)
            .path(SEARCH_PATH)
            .body_contains("\"A1|A2|");
        then.status(200)
            .header("content-type", "application/json")
            .body(ONE_PART);
    });
    let later_batches = server.mock(|when, then| {
        when.method(POST).path(SEARCH_PATH);
        then.status(200).body("{\"Errors\": []}");
    });

    let output = mpn()
        .current_dir(temp.path())
        .env("MOUSER_API_URL", server.base_url())
        .args(["fetch", "parts.csv", "--api-key", "test-key"])
        .args(["--delay-secs", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    first_batch.assert_hits(1);
    later_batches.assert_hits(3);
    assert!(stderr_of(&output).contains("Run aborted at batch 4 of 5"));

    let csv = std::fs::read_to_string(temp.child("output_data.csv").path()).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("MPN,"));
    assert!(lines[1].starts_with("LM358DR,"));
    assert!(stdout_of(&output).contains("LM358DR"));
}

#[test]
fn window_indexes_non_blank_part_numbers() {
    let temp = TempDir::new().unwrap();
    temp.child("parts.csv")
        .write_str("A1\n\nA2\n ,x\nA3\nA4\n")
        .unwrap();

    let output = mpn()
        .current_dir(temp.path())
        .args(["batches", "parts.csv", "--start", "1", "--stop", "3"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "A2|A3\n");

    let help = mpn().args(["batches", "--help"]).output().unwrap();
    let help = stdout_of(&help).split_whitespace().collect::<Vec<_>>().join(" ");
    assert!(help.contains("blank rows are not counted"), "{help}");
}
