use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use expiry_check::{
    CheckEngine, CollectingSink, DiagnosticKind, ExpiryConfig, ExpiryError, FixedClock,
    InvalidMarkerPolicy, RustSourceSet, ScanDriver,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FEATURE_FLAG: &str = include_str!("fixtures/feature_flag.rs");

fn jan_first_2024() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn local_offset(at: NaiveDateTime) -> String {
    Local.from_local_datetime(&at).earliest().unwrap().format("%:z").to_string()
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/flags.rs", FEATURE_FLAG);
    write(temp_dir.path(), "src/lib.rs", "pub mod flags;\n\npub fn plain() {}\n");
    temp_dir
}

fn engine_for(root: &Path) -> CheckEngine {
    CheckEngine::new(ExpiryConfig::for_paths([root.join("src").display().to_string()]))
}

#[test]
fn test_reports_each_expired_marker_once() {
    let temp_dir = project();
    let mut sink = CollectingSink::default();

    let report = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap();

    assert_eq!(report.declarations, 4);
    assert_eq!(report.expired, 3);
    let declarations: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|d| d.declaration.as_str())
        .collect();
    assert_eq!(
        declarations,
        vec![
            "FeatureFlag::feature_flagging_enabled",
            "FeatureFlag::is_fast_enabled",
            "FeatureFlag::is_slow_enabled",
        ]
    );

    let flags = temp_dir.path().join("src").join("flags.rs");
    assert_eq!(
        sink.messages()[0],
        format!(
            "@Expiry -> Feature expired: \"FeatureFlag::feature_flagging_enabled\". \
             Expiry: Wed Mar 02 00:00:00 {} 2022 - Today: Mon Jan 01 08:00:00 {} 2024. \
             Can be found at : {}:3",
            local_offset(NaiveDate::from_ymd_opt(2022, 3, 2).unwrap().and_hms_opt(0, 0, 0).unwrap()),
            local_offset(jan_first_2024()),
            flags.display()
        )
    );
    assert!(sink.messages()[1].ends_with(&format!("{}:8", flags.display())));
    assert!(sink.messages()[2].ends_with(&format!("{}:13", flags.display())));
}

#[test]
fn test_nothing_expired_before_first_deadline() {
    let temp_dir = project();
    let mut sink = CollectingSink::default();
    let clock = FixedClock::new(
        NaiveDate::from_ymd_opt(2022, 3, 1)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap(),
    );

    let report = engine_for(temp_dir.path()).run(clock, &mut sink).unwrap();

    assert_eq!(report.evaluated, 4);
    assert!(!report.has_errors());
    assert!(sink.messages().is_empty());
}

#[test]
fn test_bad_date_in_one_file_does_not_hide_others() {
    let temp_dir = project();
    write(
        temp_dir.path(),
        "src/a_rollout.rs",
        "#[expiry(\"31-13-2022\")]\npub const ROLLOUT: bool = true;\n",
    );
    let mut sink = CollectingSink::default();

    let report = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap();

    assert_eq!(report.invalid, 1);
    assert_eq!(report.expired, 3);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::InvalidMarker);
    assert_eq!(report.diagnostics[0].declaration, "ROLLOUT");
    assert_eq!(sink.messages().len(), 4);
}

#[test]
fn test_abort_policy_returns_parse_error() {
    let temp_dir = project();
    write(
        temp_dir.path(),
        "src/a_rollout.rs",
        "#[expiry(\"31-13-2022\")]\npub const ROLLOUT: bool = true;\n",
    );
    let mut config = ExpiryConfig::for_paths([temp_dir.path().join("src").display().to_string()]);
    config.report.on_invalid_marker = InvalidMarkerPolicy::Abort;
    let mut sink = CollectingSink::default();

    let err = CheckEngine::new(config)
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap_err();

    assert!(matches!(err, ExpiryError::DateParse { ref text, .. } if text == "31-13-2022"));
    assert!(sink.messages().is_empty());
}

#[test]
fn test_unmarked_tree_yields_no_diagnostics() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/lib.rs", "pub fn plain() {}\n");
    let mut sink = CollectingSink::default();

    let report = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap();

    assert_eq!(report.declarations, 0);
    assert!(sink.messages().is_empty());
}

#[test]
fn test_excluded_directories_are_not_scanned() {
    let temp_dir = project();
    write(
        temp_dir.path(),
        "src/generated/old.rs",
        "#[expiry(\"01-01-2000\")]\npub fn ancient() {}\n",
    );

    let source = RustSourceSet::new([temp_dir.path().join("src")])
        .with_exclude(vec!["generated".to_string()]);
    let driver = ScanDriver::new(source, FixedClock::new(jan_first_2024()));
    let mut sink = CollectingSink::default();

    let report = driver.run(&mut sink).unwrap();
    assert!(report.diagnostics.iter().all(|d| d.declaration != "ancient"));
    assert_eq!(report.expired, 3);
}

#[test]
fn test_files_are_visited_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "src/b.rs", "#[expiry(\"01-01-2000\")]\nfn b() {}\n");
    write(temp_dir.path(), "src/a.rs", "#[expiry(\"01-01-2000\")]\nfn a() {}\n");
    write(temp_dir.path(), "src/a/z.rs", "#[expiry(\"01-01-2000\")]\nfn z() {}\n");

    let engine = engine_for(temp_dir.path());
    let run = || {
        let mut sink = CollectingSink::default();
        engine
            .run(FixedClock::new(jan_first_2024()), &mut sink)
            .unwrap();
        sink.messages().to_vec()
    };

    let first = run();
    assert_eq!(first, run());
    assert!(first[0].contains("\"z\""));
    assert!(first[1].contains("\"a\""));
    assert!(first[2].contains("\"b\""));
}

#[test]
fn test_syntax_error_stops_the_scan() {
    let temp_dir = project();
    write(temp_dir.path(), "src/broken.rs", "pub fn broken( {\n");
    let mut sink = CollectingSink::default();

    let err = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap_err();

    assert!(matches!(err, ExpiryError::SourceParse { .. }));
}

#[test]
fn test_missing_root_is_a_walk_error() {
    let temp_dir = TempDir::new().unwrap();
    let mut sink = CollectingSink::default();

    let err = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap_err();

    assert!(matches!(err, ExpiryError::WalkError(_)));
}

#[test]
fn test_report_serializes_to_json() {
    let temp_dir = project();
    let mut sink = CollectingSink::default();

    let report = engine_for(temp_dir.path())
        .run(FixedClock::new(jan_first_2024()), &mut sink)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["expired"], 3);
    assert_eq!(json["diagnostics"][0]["severity"], "error");
    assert_eq!(json["diagnostics"][0]["kind"], "expired");
    assert_eq!(json["diagnostics"][0]["expiry"], "2022-03-02");
}
