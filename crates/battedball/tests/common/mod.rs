//! Shared helpers for battedball integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use battedball::DatasetStore;
use tempfile::TempDir;

/// Header row with every required column.
pub const HEADER: &str = "BATTER,PITCHER,GAME_DATE,LAUNCH_ANGLE,EXIT_SPEED,\
                          EXIT_DIRECTION,HIT_DISTANCE,PLAY_OUTCOME,VIDEO_LINK";

/// A scratch directory holding a CSV source and a store path inside it.
pub struct Workspace {
    /// Keeps the directory alive for the duration of the test.
    pub dir: TempDir,
    /// Source spreadsheet.
    pub source: PathBuf,
    /// Store handle (file not created until bootstrap).
    pub store: DatasetStore,
}

/// Create a workspace whose source CSV holds `rows` beneath the header.
pub fn workspace_with_rows(rows: &[&str]) -> Workspace {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let source = dir.path().join("BattedBallData.csv");

    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&source, contents).expect("should write source");

    let store = DatasetStore::new(dir.path().join("data").join("BattedBallData.db"));
    Workspace { dir, source, store }
}

/// Same as [`workspace_with_rows`], then bootstrap the store.
pub fn bootstrapped(rows: &[&str]) -> Workspace {
    let ws = workspace_with_rows(rows);
    ws.store
        .bootstrap(&ws.source)
        .expect("bootstrap should succeed");
    ws
}
