//! End-to-end tests for `run_check_with`: input file in, CSV/JSONL file out.

mod helpers;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use helpers::{test_config, write_input, ScriptedDns};
use mail_dns_check::{run_check_with, CheckResult, OutputFormat};
use tempfile::TempDir;

fn scripted() -> ScriptedDns {
    ScriptedDns::new()
        .with_mail_domain(
            "example.com",
            &["v=spf1 include:_spf.example.com"],
            &["v=DMARC1; p=none"],
        )
        .with_mail_domain(
            "example.org",
            &["google-site-verification=abc", "v=spf1 -all"],
            &["v=dmarc1; p=reject"],
        )
        .with_no_mx("nomail.example")
}

fn read_csv_rows(path: &std::path::Path) -> (Vec<String>, HashMap<String, Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open output");
    let headers = reader
        .headers()
        .expect("Missing header")
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| {
            let record: Vec<String> = r.expect("Bad row").iter().map(String::from).collect();
            (record[0].clone(), record)
        })
        .collect();
    (headers, rows)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_csv_run_writes_one_row_per_domain() {
    let input = write_input(&[
        "# mail domains",
        "example.com",
        "",
        "alice@example.org,Alice",
        "nomail.example",
        "missing.example",
    ]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");

    let config = test_config(input.path(), output.clone(), OutputFormat::Csv);
    let report = run_check_with(config, scripted()).await.unwrap();

    assert_eq!(report.total_domains, 4);
    assert_eq!(report.written, 4);
    assert_eq!(report.lookup_errors, 1);
    assert_eq!(report.not_checked, 0);
    assert!(!report.cancelled);
    assert_eq!(report.output.as_deref(), Some(output.as_path()));

    let (headers, rows) = read_csv_rows(&output);
    assert_eq!(
        headers,
        vec!["domain", "hasMX", "hasSPF", "spfRecord", "hasDMARC", "dmarcRecord", "error"]
    );
    assert_eq!(rows.len(), 4);

    assert_eq!(
        rows["example.com"],
        vec![
            "example.com",
            "true",
            "true",
            "v=spf1 include:_spf.example.com",
            "true",
            "v=DMARC1; p=none",
            ""
        ]
    );

    // Second TXT record is the SPF one; DMARC prefix is case-sensitive
    let org = &rows["example.org"];
    assert_eq!(org[2], "true");
    assert_eq!(org[3], "v=spf1 -all");
    assert_eq!(org[4], "false");
    assert_eq!(org[5], "");

    assert_eq!(
        rows["nomail.example"],
        vec!["nomail.example", "false", "false", "", "false", "", ""]
    );

    let missing = &rows["missing.example"];
    assert_eq!(&missing[1..6], ["false", "false", "", "false", ""]);
    assert!(!missing[6].is_empty());
}

#[tokio::test]
async fn test_jsonl_run() {
    let input = write_input(&["example.com", "missing.example"]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.jsonl");

    let config = test_config(input.path(), output.clone(), OutputFormat::Jsonl);
    let report = run_check_with(config, scripted()).await.unwrap();
    assert_eq!(report.written, 2);

    let content = std::fs::read_to_string(&output).unwrap();
    let mut results: Vec<CheckResult> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Bad JSON line"))
        .collect();
    results.sort_by(|a, b| a.domain.cmp(&b.domain));

    assert_eq!(results[0].domain, "example.com");
    assert!(results[0].has_mx && results[0].has_spf && results[0].has_dmarc);
    assert_eq!(results[1].domain, "missing.example");
    assert!(results[1].is_error());
}

#[tokio::test]
async fn test_malformed_domain_gets_error_row() {
    let input = write_input(&["bad domain.example", "a..example"]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");

    let config = test_config(input.path(), output.clone(), OutputFormat::Csv);
    let report = run_check_with(config, ScriptedDns::new()).await.unwrap();
    assert_eq!(report.lookup_errors, 2);

    let (_, rows) = read_csv_rows(&output);
    assert_eq!(rows.len(), 2);
    for row in rows.values() {
        assert!(row[6].contains("invalid domain"), "unexpected error: {}", row[6]);
    }
}

#[tokio::test]
async fn test_empty_input_writes_header_only() {
    let input = write_input(&["# nothing here", ""]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");

    let config = test_config(input.path(), output.clone(), OutputFormat::Csv);
    let report = run_check_with(config, ScriptedDns::new()).await.unwrap();
    assert_eq!(report.total_domains, 0);
    assert_eq!(report.written, 0);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "domain,hasMX,hasSPF,spfRecord,hasDMARC,dmarcRecord,error\n"
    );
}

#[tokio::test]
async fn test_missing_input_fails_before_output_is_created() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");
    let missing = dir.path().join("no-such-input.csv");

    let config = test_config(&missing, output.clone(), OutputFormat::Csv);
    let err = run_check_with(config, ScriptedDns::new())
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("no-such-input.csv"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unwritable_output_fails() {
    let input = write_input(&["example.com"]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("missing-dir").join("results.csv");

    let config = test_config(input.path(), output, OutputFormat::Csv);
    let err = run_check_with(config, scripted()).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to open output"));
}

#[tokio::test]
async fn test_zero_workers_is_rejected() {
    let input = write_input(&["example.com"]);
    let dir = TempDir::new().unwrap();
    let mut config = test_config(input.path(), dir.path().join("out.csv"), OutputFormat::Csv);
    config.workers = 0;

    assert!(run_check_with(config, scripted()).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deadline_cuts_run_short() {
    let domains: Vec<String> = (0..50).map(|i| format!("d{i}.example")).collect();
    let lines: Vec<&str> = domains.iter().map(String::as_str).collect();
    let input = write_input(&lines);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");

    let mut config = test_config(input.path(), output.clone(), OutputFormat::Csv);
    config.workers = 1;
    config.timeout_seconds = 1;
    let dns = ScriptedDns::new().with_delay(Duration::from_millis(100));

    let started = Instant::now();
    let report = run_check_with(config, dns).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(report.cancelled);
    assert!(report.written < 50);
    assert_eq!(report.written + report.not_checked, 50);

    // Everything reported as written was flushed
    let (_, rows) = read_csv_rows(&output);
    assert_eq!(rows.len(), report.written);
}

#[tokio::test]
async fn test_rate_limited_run_is_paced() {
    let input = write_input(&["a.example", "b.example", "c.example", "d.example", "e.example"]);
    let dir = TempDir::new().unwrap();

    let mut config = test_config(input.path(), dir.path().join("out.csv"), OutputFormat::Csv);
    config.rate_limit_rps = 4;
    config.rate_burst = 1;

    let started = Instant::now();
    let report = run_check_with(config, ScriptedDns::new()).await.unwrap();

    assert_eq!(report.written, 5);
    assert!(started.elapsed() >= Duration::from_millis(900));
}

#[tokio::test]
async fn test_undecodable_line_gets_error_row() {
    use std::io::Write;

    let mut input = tempfile::NamedTempFile::new().unwrap();
    input
        .write_all(b"example.com\n\xffbad.example\nnomail.example\n")
        .unwrap();
    input.flush().unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");

    let config = test_config(input.path(), output.clone(), OutputFormat::Csv);
    let report = run_check_with(config, scripted()).await.unwrap();
    assert_eq!(report.total_domains, 3);
    assert_eq!(report.written, 3);
    assert_eq!(report.lookup_errors, 1);

    let (_, rows) = read_csv_rows(&output);
    assert_eq!(rows["example.com"][1], "true");
    assert_eq!(rows["nomail.example"][6], "");
    let bad = &rows["\u{FFFD}bad.example"];
    assert!(bad[6].contains("invalid domain"), "unexpected error: {}", bad[6]);
}
