use crate::config::AppConfig;
use crate::error::Error;
use crate::hasher::detector::{self, DuplicateGroup};
use crate::hasher::digest::Algorithm;
use crate::metadata::{ExifReader, MetadataReader};
use crate::organizer;
use crate::progress::ProgressReporter;
use crate::scanner;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct SortEngine {
    config: AppConfig,
    reader: Box<dyn MetadataReader>,
}

#[derive(Debug)]
pub struct RunResult {
    pub scan_duration: Duration,
    pub relocate_duration: Duration,
    pub rescan_duration: Duration,
    pub detect_duration: Duration,
    pub purge_duration: Duration,
    pub files_found: usize,
    pub files_relocated: usize,
    pub files_skipped: usize,
    pub files_rescanned: usize,
    pub duplicate_groups: usize,
    /// Members across all duplicate groups (each group keeps one on purge).
    pub duplicate_files: usize,
    pub files_purged: usize,
}

impl SortEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            reader: Box::new(ExifReader),
        }
    }

    pub fn with_metadata_reader(mut self, reader: Box<dyn MetadataReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Run the full pipeline:
    /// 1. Scan the source tree for photo files
    /// 2. Relocate each timestamped photo into `dest/yyyy/MM/dd`
    /// 3. Rescan the sorted tree (duplicates are judged on the output)
    /// 4. Two-tier duplicate detection
    /// 5. Purge every group down to a single copy
    ///
    /// Any IO failure aborts the run, leaving the trees as they are;
    /// there is no rollback.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunResult, Error> {
        // Resolve the full-hash digest up front so a bad name aborts
        // before any file is touched.
        let full_algorithm = Algorithm::from_str(&self.config.full_hash_algorithm)?;

        let source = Path::new(&self.config.source_dir);
        let dest_root = Path::new(&self.config.dest_dir);
        fs::create_dir_all(dest_root).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Error creating {}: {}", dest_root.display(), e),
            )
        })?;

        // Phase 1: Scan
        info!("Scanning {} for photos...", source.display());
        reporter.on_scan_start();
        let scan_start = Instant::now();
        let photos =
            scanner::collect_photos(source, scanner::PHOTO_EXTENSIONS, &self.config.ignore_patterns)?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(photos.len(), scan_duration.as_secs_f64());
        debug!(
            "Scan completed in {:.2}s — {} candidate files",
            scan_duration.as_secs_f64(),
            photos.len(),
        );

        // Phase 2: Relocate
        info!("Relocating photos into {}...", dest_root.display());
        reporter.on_relocate_start();
        let relocate_start = Instant::now();
        let mut sequence: u64 = 0;
        let files_relocated = organizer::relocate(
            self.reader.as_ref(),
            &photos,
            dest_root,
            &mut sequence,
            reporter,
        )?;
        let relocate_duration = relocate_start.elapsed();
        let files_skipped = photos.len() - files_relocated;
        reporter.on_relocate_complete(
            files_relocated,
            files_skipped,
            relocate_duration.as_secs_f64(),
        );
        debug!(
            "Relocation completed in {:.2}s — {} moved, {} without timestamp",
            relocate_duration.as_secs_f64(),
            files_relocated,
            files_skipped,
        );

        // Phase 3: Rescan the sorted tree
        let rescan_start = Instant::now();
        let sorted = scanner::collect_photos(
            dest_root,
            scanner::SORTED_EXTENSIONS,
            &self.config.ignore_patterns,
        )?;
        let rescan_duration = rescan_start.elapsed();
        reporter.on_rescan_complete(sorted.len(), rescan_duration.as_secs_f64());

        // Phase 4: Detect
        info!("Detecting duplicate content...");
        reporter.on_detect_start();
        let detect_start = Instant::now();
        let groups = detector::find_duplicates(&sorted, full_algorithm, reporter)?;
        let detect_duration = detect_start.elapsed();
        let duplicate_files: usize = groups.iter().map(|g| g.paths.len()).sum();
        reporter.on_detect_complete(groups.len(), detect_duration.as_secs_f64());
        debug!(
            "Detection completed in {:.2}s — {} duplicate groups",
            detect_duration.as_secs_f64(),
            groups.len(),
        );

        // Phase 5: Purge
        info!("Purging duplicate copies...");
        reporter.on_purge_start();
        let purge_start = Instant::now();
        let files_purged = purge_duplicates(&groups)?;
        let purge_duration = purge_start.elapsed();
        reporter.on_purge_complete(files_purged, purge_duration.as_secs_f64());

        info!("{} photos sorted", files_relocated);

        Ok(RunResult {
            scan_duration,
            relocate_duration,
            rescan_duration,
            detect_duration,
            purge_duration,
            files_found: photos.len(),
            files_relocated,
            files_skipped,
            files_rescanned: sorted.len(),
            duplicate_groups: groups.len(),
            duplicate_files,
            files_purged,
        })
    }
}

/// Retain the last-processed copy of each group and delete the rest.
/// A failed delete is fatal; already-purged files stay purged.
fn purge_duplicates(groups: &[DuplicateGroup]) -> Result<usize, Error> {
    let mut removed = 0;

    for group in groups {
        let Some((keep, doomed)) = group.paths.split_last() else {
            continue;
        };
        debug!("Keeping {}", keep.display());

        for path in doomed {
            fs::remove_file(path).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Error removing {}: {}", path.display(), e),
                )
            })?;
            debug!("Removed duplicate {}", path.display());
            removed += 1;
        }
    }

    Ok(removed)
}
