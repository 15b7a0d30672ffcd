//! Integration tests for filtered queries and name extraction.
//!
//! These tests run the full path: source CSV → bootstrap → `SQLite` → records.

mod common;

use std::sync::Arc;
use std::thread;

use battedball::{DatasetStore, Error, FilterParams, QueryFilter};
use common::bootstrapped;
use rstest::{fixture, rstest};

fn params() -> FilterParams {
    FilterParams::default()
}

fn filter(params: FilterParams) -> QueryFilter {
    params.parse().expect("filter should parse")
}

// ============================================================================
// Single-row store
// ============================================================================

#[fixture]
fn single_row() -> common::Workspace {
    bootstrapped(&["Smith,Jones,2023-04-01,20.0,95.0,12.5,410,home run,"])
}

#[rstest]
fn matching_request_returns_the_record(single_row: common::Workspace) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some("smi".to_string()),
            min_exit_speed: Some("90".to_string()),
            max_exit_speed: Some("100".to_string()),
            play_outcome: Some("home run".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.batter.as_deref(), Some("Smith"));
    assert_eq!(record.pitcher.as_deref(), Some("Jones"));
    assert_eq!(record.exit_speed, Some(95.0));
    assert_eq!(record.launch_angle, Some(20.0));
    assert_eq!(record.play_outcome.as_deref(), Some("home run"));
    assert_eq!(record.video_link, None);
}

#[rstest]
fn different_outcome_returns_empty(single_row: common::Workspace) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some("smi".to_string()),
            min_exit_speed: Some("90".to_string()),
            max_exit_speed: Some("100".to_string()),
            play_outcome: Some("out".to_string()),
            ..params()
        }))
        .expect("no match is not an error");

    assert!(records.is_empty());
}

#[rstest]
#[case("SMI")]
#[case("smith")]
#[case("  mIt ")]
fn name_matching_ignores_case(single_row: common::Workspace, #[case] hitter: &str) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some(hitter.to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1, "'{hitter}' should match Smith");
}

#[rstest]
#[case("Home Run")]
#[case("HOME RUN")]
fn outcome_matching_ignores_case(single_row: common::Workspace, #[case] outcome: &str) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            play_outcome: Some(outcome.to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1);
}

#[rstest]
fn outcome_is_exact_not_substring(single_row: common::Workspace) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            play_outcome: Some("home".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert!(records.is_empty());
}

#[rstest]
fn range_bounds_are_inclusive(single_row: common::Workspace) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            min_exit_speed: Some("95".to_string()),
            max_exit_speed: Some("95".to_string()),
            min_launch_angle: Some("20".to_string()),
            max_launch_angle: Some("20".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1);
}

#[rstest]
fn inverted_range_matches_nothing(single_row: common::Workspace) {
    let records = single_row
        .store
        .fetch_filtered(&filter(FilterParams {
            min_exit_speed: Some("100".to_string()),
            max_exit_speed: Some("90".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert!(records.is_empty());
}

// ============================================================================
// Multi-row store
// ============================================================================

const MIXED: &[&str] = &[
    "Smith,Jones,2023-04-01,20.0,95.0,12.5,410,home run,https://video/1",
    "SMITHERS,Brown,2023-04-02,35.0,80.0,-10.0,250,out,",
    "Doe,Jones,2023-04-03,-10.0,110.0,5.0,20,single,",
    "Doe,Smith,2023-04-03,10.0,130.0,5.0,20,double,",
    ",Jones,2023-04-04,5.0,70.0,0.0,100,out,",
];

#[test]
fn default_filter_applies_default_ranges() {
    let ws = bootstrapped(MIXED);

    let records = ws
        .store
        .fetch_filtered(&QueryFilter::default())
        .expect("query failed");

    // 130.0 is above the default maximum exit speed
    assert_eq!(records.len(), 4);
}

#[test]
fn hitter_and_pitcher_filters_combine() {
    let ws = bootstrapped(MIXED);

    let records = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some("smith".to_string()),
            pitcher: Some("brown".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].batter.as_deref(), Some("SMITHERS"));
}

#[test]
fn null_batter_rows_are_excluded_by_name_filter_only() {
    let ws = bootstrapped(MIXED);

    let all_outs = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            play_outcome: Some("out".to_string()),
            ..params()
        }))
        .expect("query failed");
    assert_eq!(all_outs.len(), 2);
    assert!(all_outs.iter().any(|r| r.batter.is_none()));

    let named_outs = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some("s".to_string()),
            play_outcome: Some("out".to_string()),
            ..params()
        }))
        .expect("query failed");
    assert_eq!(named_outs.len(), 1);
}

#[test]
fn pitcher_filter_returns_every_row_for_that_pitcher() {
    let ws = bootstrapped(MIXED);

    let records = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            pitcher: Some("jones".to_string()),
            ..params()
        }))
        .expect("query failed");

    // No ordering is promised, so compare sorted dates
    let mut dates: Vec<_> = records
        .iter()
        .map(|r| r.game_date.clone().unwrap_or_default())
        .collect();
    dates.sort();
    assert_eq!(dates, ["2023-04-01", "2023-04-03", "2023-04-04"]);
}

#[test]
fn concurrent_queries_return_consistent_results() {
    let ws = bootstrapped(MIXED);
    let store = Arc::new(ws.store.clone());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .fetch_filtered(&QueryFilter::default())
                    .expect("query should succeed")
                    .len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();
    assert!(counts.iter().all(|&c| c == 4), "counts: {counts:?}");
}

#[rstest]
#[case("ÁLVAREZ")]
#[case("álvarez")]
#[case("Álv")]
#[case("VAREZ")]
fn accented_names_match_in_any_casing(#[case] hitter: &str) {
    let ws = bootstrapped(&[
        "ÁLVAREZ,Núñez,2023-04-01,20.0,95.0,0,0,out,",
        "Smith,Jones,2023-04-01,20.0,95.0,0,0,out,",
    ]);

    let records = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            hitter: Some(hitter.to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1, "{hitter} should match");
    assert_eq!(records[0].batter.as_deref(), Some("ÁLVAREZ"));
}

#[test]
fn accented_outcome_and_pitcher_match_in_any_casing() {
    let ws = bootstrapped(&["Smith,NÚÑEZ,2023-04-01,20.0,95.0,0,0,ÉLAN,"]);

    let records = ws
        .store
        .fetch_filtered(&filter(FilterParams {
            pitcher: Some("núñez".to_string()),
            play_outcome: Some("Élan".to_string()),
            ..params()
        }))
        .expect("query failed");

    assert_eq!(records.len(), 1);
}

#[test]
fn query_against_missing_store_is_a_query_execution_error() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let store = DatasetStore::new(dir.path().join("absent.db"));

    let err = store
        .fetch_filtered(&QueryFilter::default())
        .expect_err("missing store should fail");

    assert!(matches!(err, Error::QueryExecution(_)));
    assert_eq!(err.to_string(), "query execution failed");
}

// ============================================================================
// Name extraction
// ============================================================================

#[test]
fn batter_names_are_lowercased_deduplicated_and_sorted() {
    let ws = bootstrapped(&[
        "Smith,Jones,2023-04-01,20.0,95.0,0,0,out,",
        "smith,Jones,2023-04-01,20.0,95.0,0,0,out,",
        "Doe,Adams,2023-04-01,20.0,95.0,0,0,out,",
    ]);

    let lists = ws.store.extract_name_lists().expect("extraction failed");

    assert_eq!(
        lists.batters.into_iter().collect::<Vec<_>>(),
        ["doe", "smith"]
    );
    assert_eq!(
        lists.pitchers.into_iter().collect::<Vec<_>>(),
        ["adams", "jones"]
    );
}

#[test]
fn name_lists_fold_non_ascii_capitals() {
    let ws = bootstrapped(&[
        "ÁLVAREZ,NÚÑEZ,2023-04-01,20.0,95.0,0,0,out,",
        "álvarez,Núñez,2023-04-01,20.0,95.0,0,0,out,",
    ]);

    let lists = ws.store.extract_name_lists().expect("extraction failed");

    assert_eq!(lists.batters.into_iter().collect::<Vec<_>>(), ["álvarez"]);
    assert_eq!(lists.pitchers.into_iter().collect::<Vec<_>>(), ["núñez"]);
}

#[test]
fn null_names_are_skipped() {
    let ws = bootstrapped(MIXED);

    let lists = ws.store.extract_name_lists().expect("extraction failed");

    assert_eq!(
        lists.batters.into_iter().collect::<Vec<_>>(),
        ["doe", "smith", "smithers"]
    );
}

#[test]
fn name_lists_round_trip_through_artifacts() {
    let ws = bootstrapped(MIXED);
    let out_dir = ws.dir.path().join("public");

    let lists = ws.store.extract_name_lists().expect("extraction failed");
    let paths = lists.write_to(&out_dir).expect("write failed");

    let hitters: Vec<String> = serde_json::from_str(
        &std::fs::read_to_string(&paths.hitters).expect("should read hitters"),
    )
    .expect("hitters should be a JSON array");
    let pitchers: Vec<String> = serde_json::from_str(
        &std::fs::read_to_string(&paths.pitchers).expect("should read pitchers"),
    )
    .expect("pitchers should be a JSON array");

    assert_eq!(hitters, ["doe", "smith", "smithers"]);
    assert_eq!(pitchers, ["brown", "jones", "smith"]);
}
