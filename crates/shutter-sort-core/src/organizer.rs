use crate::error::Error;
use crate::metadata::MetadataReader;
use crate::progress::ProgressReporter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Move each photo into `dest_root/yyyy/MM/dd/`, renamed to
/// `yyyy-MM-dd-HH-mm-ss-<seq>.jpg`. The sequence counter is owned by the
/// caller and increases across the whole run, so photos taken in the
/// same second still get distinct names.
///
/// Photos without a capture timestamp are left where they are; that is
/// policy, not an error. A failed move aborts the run.
///
/// Returns the number of files moved.
pub fn relocate(
    reader: &dyn MetadataReader,
    photos: &[PathBuf],
    dest_root: &Path,
    sequence: &mut u64,
    reporter: &dyn ProgressReporter,
) -> Result<usize, Error> {
    let mut moved = 0;

    for (index, path) in photos.iter().enumerate() {
        match reader.capture_timestamp(path) {
            Some(ts) => {
                *sequence += 1;

                let dest_dir = dest_root.join(&ts.year).join(&ts.month).join(&ts.day);
                fs::create_dir_all(&dest_dir).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!("Error creating {}: {}", dest_dir.display(), e),
                    )
                })?;

                let file_name = format!(
                    "{}-{}-{}-{}-{}-{}-{}.jpg",
                    ts.year, ts.month, ts.day, ts.hour, ts.minute, ts.second, sequence
                );
                let dest = dest_dir.join(file_name);

                debug!("mv {} {}", path.display(), dest.display());
                fs::rename(path, &dest).map_err(|e| {
                    io::Error::new(
                        e.kind(),
                        format!(
                            "Error moving {} to {}: {}",
                            path.display(),
                            dest.display(),
                            e
                        ),
                    )
                })?;
                moved += 1;
            }
            None => {
                debug!("{}: no capture timestamp, leaving in place", path.display());
            }
        }

        reporter.on_relocate_progress(index + 1, photos.len());
    }

    Ok(moved)
}
