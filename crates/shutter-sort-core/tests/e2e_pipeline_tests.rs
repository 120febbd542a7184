use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

use chrono::NaiveDateTime;
use shutter_sort_core::metadata::{CaptureTimestamp, MetadataReader};
use shutter_sort_core::{AppConfig, Error, SilentReporter, SortEngine};

/// Maps file names to capture timestamps; anything unlisted has none.
struct FixtureReader {
    by_name: HashMap<String, CaptureTimestamp>,
}

impl FixtureReader {
    fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    fn with(mut self, name: &str, stamp: &str) -> Self {
        let dt = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").unwrap();
        self.by_name
            .insert(name.to_string(), CaptureTimestamp::from_naive(dt));
        self
    }
}

impl MetadataReader for FixtureReader {
    fn capture_timestamp(&self, path: &Path) -> Option<CaptureTimestamp> {
        let name = path.file_name()?.to_str()?;
        self.by_name.get(name).cloned()
    }
}

fn test_config(source: &Path, dest: &Path) -> AppConfig {
    AppConfig {
        source_dir: source.to_string_lossy().into_owned(),
        dest_dir: dest.to_string_lossy().into_owned(),
        ignore_patterns: vec![],
        full_hash_algorithm: "sha512".to_string(),
    }
}

fn count_files_recursive(dir: &Path) -> usize {
    let mut count = 0;
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                count += count_files_recursive(&path);
            } else if path.is_file() {
                count += 1;
            }
        }
    }
    count
}

/// Create a source tree with known duplicates.
/// Layout:
///   source/
///     a.jpg       ("same bytes", taken 2023-05-01 10:00:00)
///     b.jpg       ("same bytes", taken 2023-05-01 10:00:00)  ← duplicate of a.jpg
///     c.jpg       ("only copy",  taken 2024-01-02 03:04:05)
///     d.jpg       ("no exif",    no capture timestamp)
fn create_source_tree(source: &Path) -> FixtureReader {
    fs::write(source.join("a.jpg"), "same bytes").unwrap();
    fs::write(source.join("b.jpg"), "same bytes").unwrap();
    fs::write(source.join("c.jpg"), "only copy").unwrap();
    fs::write(source.join("d.jpg"), "no exif").unwrap();

    FixtureReader::new()
        .with("a.jpg", "2023-05-01 10:00:00")
        .with("b.jpg", "2023-05-01 10:00:00")
        .with("c.jpg", "2024-01-02 03:04:05")
}

#[test]
fn test_full_pipeline() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let reader = create_source_tree(source.path());

    let engine = SortEngine::new(test_config(source.path(), dest.path()))
        .with_metadata_reader(Box::new(reader));
    let result = engine.run(&SilentReporter).unwrap();

    assert_eq!(result.files_found, 4);
    assert_eq!(result.files_relocated, 3);
    assert_eq!(result.files_skipped, 1);
    assert_eq!(result.files_rescanned, 3);
    assert_eq!(result.duplicate_groups, 1);
    assert_eq!(result.duplicate_files, 2);
    assert_eq!(result.files_purged, 1);

    // a.jpg and b.jpg were both filed under 2023/05/01; the purge left one.
    let day_dir = dest.path().join("2023/05/01");
    let survivors: Vec<String> = fs::read_dir(&day_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    // The last-processed copy is the one retained.
    assert_eq!(survivors, vec!["2023-05-01-10-00-00-2.jpg"]);

    // The unique photo survived under its own date.
    assert!(dest
        .path()
        .join("2024/01/02/2024-01-02-03-04-05-3.jpg")
        .exists());

    // The photo without a timestamp never left the source tree.
    assert!(source.path().join("d.jpg").exists());
    assert_eq!(count_files_recursive(source.path()), 1);
    assert_eq!(count_files_recursive(dest.path()), 2);
}

#[test]
fn test_empty_source_still_runs_every_phase() {
    let source = tempdir().unwrap();
    let dest_parent = tempdir().unwrap();
    let dest = dest_parent.path().join("sorted");

    let engine = SortEngine::new(test_config(source.path(), &dest));
    let result = engine.run(&SilentReporter).unwrap();

    assert_eq!(result.files_found, 0);
    assert_eq!(result.files_relocated, 0);
    assert_eq!(result.files_rescanned, 0);
    assert_eq!(result.duplicate_groups, 0);
    assert_eq!(result.files_purged, 0);
    // The rescan ran against a destination the engine created itself.
    assert!(dest.is_dir());
}

#[test]
fn test_purge_keeps_exactly_one_of_k_copies() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();

    let mut reader = FixtureReader::new();
    for i in 0..5 {
        let name = format!("copy{}.jpg", i);
        fs::write(source.path().join(&name), "five of a kind").unwrap();
        reader = reader.with(&name, "2023-05-01 10:00:00");
    }

    let engine = SortEngine::new(test_config(source.path(), dest.path()))
        .with_metadata_reader(Box::new(reader));
    let result = engine.run(&SilentReporter).unwrap();

    assert_eq!(result.files_relocated, 5);
    assert_eq!(result.duplicate_groups, 1);
    assert_eq!(result.duplicate_files, 5);
    assert_eq!(result.files_purged, 4);
    assert_eq!(count_files_recursive(dest.path()), 1);
}

#[test]
fn test_distinct_content_same_second_is_untouched() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();

    fs::write(source.path().join("x.jpg"), "content x").unwrap();
    fs::write(source.path().join("y.jpg"), "content y").unwrap();
    let reader = FixtureReader::new()
        .with("x.jpg", "2023-05-01 10:00:00")
        .with("y.jpg", "2023-05-01 10:00:00");

    let engine = SortEngine::new(test_config(source.path(), dest.path()))
        .with_metadata_reader(Box::new(reader));
    let result = engine.run(&SilentReporter).unwrap();

    assert_eq!(result.files_relocated, 2);
    assert_eq!(result.duplicate_groups, 0);
    assert_eq!(result.files_purged, 0);
    assert_eq!(count_files_recursive(dest.path()), 2);
}

#[test]
fn test_unknown_algorithm_aborts_before_touching_files() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let reader = create_source_tree(source.path());

    let mut config = test_config(source.path(), dest.path());
    config.full_hash_algorithm = "crc32".to_string();

    let engine = SortEngine::new(config).with_metadata_reader(Box::new(reader));
    let err = engine.run(&SilentReporter).unwrap_err();

    assert!(matches!(err, Error::UnsupportedAlgorithm(_)));
    // Nothing was relocated.
    assert_eq!(count_files_recursive(source.path()), 4);
    assert_eq!(count_files_recursive(dest.path()), 0);
}

#[test]
fn test_rerun_after_pipeline_is_stable() {
    let source = tempdir().unwrap();
    let dest = tempdir().unwrap();
    let reader = create_source_tree(source.path());

    let engine = SortEngine::new(test_config(source.path(), dest.path()))
        .with_metadata_reader(Box::new(reader));
    engine.run(&SilentReporter).unwrap();

    // Second run: nothing left to move, and the sorted tree holds no
    // duplicate content anymore.
    let result = engine.run(&SilentReporter).unwrap();
    assert_eq!(result.files_relocated, 0);
    assert_eq!(result.duplicate_groups, 0);
    assert_eq!(result.files_purged, 0);
    assert_eq!(count_files_recursive(dest.path()), 2);
}
