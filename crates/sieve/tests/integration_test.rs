//! Integration tests for Sieve.

use std::fs;
use std::io::Write;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use sieve::{
    Checkpoint, OutputFormat, QualityCheck, ReaderConfig, RecordingReporter, Sieve, SieveConfig,
    SieveError,
};

const HEADER: &str = "customer_id,signup_date,feature_1,feature_2,country";
const OUTPUT_HEADER: &str =
    "customer_id,signup_day,feature_1,feature_2,feature_sum,is_high_value,country";

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Run the pipeline over `content` and return the output lines.
fn run_to_lines(content: &str) -> (sieve::RunSummary, Vec<String>) {
    let input = create_test_file(content);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clean_customers.csv");

    let summary = Sieve::new()
        .run(input.path(), &output)
        .expect("Pipeline failed");

    let lines = fs::read_to_string(&output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (summary, lines)
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

#[test]
fn test_clean_row_passes_through() {
    let (summary, lines) = run_to_lines(&format!("{HEADER}\n1,2024-03-15,5.0,6.0,US\n"));

    assert_eq!(lines, vec![OUTPUT_HEADER, "1,15,5.0,6.0,11.0,true,US"]);
    assert_eq!(summary.rows_read, 1);
    assert_eq!(summary.rows_written, 1);
}

#[test]
fn test_negative_feature_enriched_then_filtered() {
    let (summary, lines) = run_to_lines(&format!("{HEADER}\n2,2024-03-15,-1.0,2.0,US\n"));

    assert_eq!(lines, vec![OUTPUT_HEADER]);
    assert_eq!(summary.rows_rejected, 0);
    assert_eq!(summary.rows_enriched, 1);
    assert_eq!(summary.rows_removed, 1);
    assert_eq!(summary.quality.count(QualityCheck::NegativeFeature1), 1);
}

#[test]
fn test_non_numeric_feature_rejected_at_validation() {
    let (summary, lines) = run_to_lines(&format!(
        "{HEADER}\n3,2024-03-15,abc,2.0,US\n4,2024-03-16,1.0,2.0,US\n"
    ));

    assert_eq!(summary.rows_rejected, 1);
    assert_eq!(summary.rows_enriched, 1);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("4,16,"));
}

#[test]
fn test_missing_country_defaults_to_unknown() {
    let (_, lines) = run_to_lines(&format!("{HEADER}\n5,2024-01-09,1.0,2.0,\n"));
    assert_eq!(lines[1], "5,9,1.0,2.0,3.0,false,UNKNOWN");

    let (_, lines) = run_to_lines(
        "customer_id,signup_date,feature_1,feature_2\n6,2024-01-10,4.0,7.0\n",
    );
    assert_eq!(lines[1], "6,10,4.0,7.0,11.0,true,UNKNOWN");
}

#[test]
fn test_quality_report_counts_negatives() {
    let (summary, _) = run_to_lines(&format!(
        "{HEADER}\n1,2024-03-15,-3.0,1.0,US\n2,2024-03-15,1.0,1.0,US\n"
    ));

    assert_eq!(summary.quality.get("negative_feature_1"), Some(1));
    assert_eq!(summary.quality.get("negative_feature_2"), Some(0));
}

#[test]
fn test_order_preserved_across_stages() {
    let content = format!(
        "{HEADER}\n\
         10,2024-01-01,1,1,A\n\
         11,2024-01-02,x,1,B\n\
         12,2024-01-03,-1,1,C\n\
         13,2024-01-04,2,2,D\n\
         14,2024-01-05,3,3,E\n"
    );
    let (_, lines) = run_to_lines(&content);

    let ids: Vec<&str> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(ids, vec!["10", "13", "14"]);
}

// =============================================================================
// Source Handling
// =============================================================================

#[test]
fn test_source_not_found_is_terminal() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out").join("clean.csv");

    let err = Sieve::new()
        .run(dir.path().join("raw_customers.csv"), &output)
        .unwrap_err();

    assert!(matches!(err, SieveError::SourceNotFound { .. }));
    assert!(err.to_string().contains("customer_id, signup_date"));
    assert!(!output.exists());
}

#[test]
fn test_header_only_input_writes_header_only_output() {
    let (summary, lines) = run_to_lines(&format!("{HEADER}\n"));

    assert_eq!(summary.rows_read, 0);
    assert_eq!(summary.rows_written, 0);
    assert_eq!(lines, vec![OUTPUT_HEADER]);
}

#[test]
fn test_missing_required_column_rejects_every_row() {
    let (summary, lines) = run_to_lines("customer_id,signup_date,feature_1\n1,2024-03-15,1.0\n");

    assert_eq!(summary.rows_rejected, 1);
    assert_eq!(lines, vec![OUTPUT_HEADER]);
}

#[test]
fn test_tsv_input_auto_detected() {
    let input = create_test_file(
        "customer_id\tsignup_date\tfeature_1\tfeature_2\tcountry\n1\t2024-03-15\t5\t6\tUS\n",
    );
    let summary = Sieve::new().check(input.path()).unwrap();

    assert_eq!(summary.source.format, "tsv");
    assert_eq!(summary.rows_written, 1);
    assert_eq!(summary.destination, None);
}

#[test]
fn test_headerless_input() {
    let input = create_test_file("1,2024-03-15,5.0,6.0,US\n");
    let config = SieveConfig {
        reader: ReaderConfig {
            has_header: false,
            ..ReaderConfig::default()
        },
        ..SieveConfig::default()
    };

    let summary = Sieve::with_config(config).check(input.path()).unwrap();
    assert_eq!(summary.rows_read, 1);
    assert_eq!(summary.rows_written, 1);
}

// =============================================================================
// Output & Reporting
// =============================================================================

#[test]
fn test_json_output() {
    let input = create_test_file(&format!("{HEADER}\n1,2024-03-15,5.0,6.0,US\n"));
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clean.json");

    let config = SieveConfig {
        output_format: OutputFormat::Json,
        ..SieveConfig::default()
    };
    Sieve::with_config(config).run(input.path(), &output).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value[0]["customer_id"], 1);
    assert_eq!(value[0]["signup_day"], 15);
    assert_eq!(value[0]["country"], "US");
}

#[test]
fn test_summary_serializes() {
    let (summary, _) = run_to_lines(&format!("{HEADER}\n1,2024-03-15,5.0,6.0,US\n"));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["rows_written"], 1);
    assert_eq!(json["quality"]["missing_feature_1"], 0);
    assert!(json["source"]["hash"].as_str().unwrap().starts_with("sha256:"));
}

#[test]
fn test_reporter_receives_run_summary_values() {
    let reporter = Arc::new(RecordingReporter::new());
    let input = create_test_file(&format!(
        "{HEADER}\n1,2024-03-15,5,6,US\n2,2024-03-15,nope,6,US\n3,2024-03-15,-5,6,US\n"
    ));
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clean.csv");

    Sieve::new()
        .with_reporter(reporter.clone())
        .run(input.path(), &output)
        .unwrap();

    let checkpoints = reporter.checkpoints();
    assert_eq!(checkpoints.len(), 5);
    assert_eq!(
        checkpoints[1],
        Checkpoint::Validated {
            valid: 2,
            rejected: 1
        }
    );
    assert_eq!(
        checkpoints[3],
        Checkpoint::Filtered {
            kept: 1,
            removed: 1
        }
    );
    assert_eq!(
        checkpoints[4],
        Checkpoint::Completed {
            rows_written: 1,
            destination: Some(output.clone()),
        }
    );
}
