use chrono::{Datelike, NaiveDateTime, Timelike};
use exif::{In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// The moment a photo was taken, broken into the six fields the output
/// tree and filenames are built from. Fields are zero-padded strings so
/// they can be concatenated into paths verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTimestamp {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
    pub second: String,
}

impl CaptureTimestamp {
    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            year: format!("{:04}", dt.year()),
            month: format!("{:02}", dt.month()),
            day: format!("{:02}", dt.day()),
            hour: format!("{:02}", dt.hour()),
            minute: format!("{:02}", dt.minute()),
            second: format!("{:02}", dt.second()),
        }
    }
}

/// Source of capture timestamps. A photo without one is not an error;
/// it simply returns `None` and the caller leaves the file alone.
pub trait MetadataReader {
    fn capture_timestamp(&self, path: &Path) -> Option<CaptureTimestamp>;
}

/// Reads the capture timestamp from embedded EXIF data, preferring
/// `DateTimeOriginal` and falling back to `DateTime`.
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn capture_timestamp(&self, path: &Path) -> Option<CaptureTimestamp> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(e) => {
                trace!("{}: no EXIF data ({})", path.display(), e);
                return None;
            }
        };

        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .or_else(|| exif.get_field(Tag::DateTime, In::PRIMARY))?;

        let raw = field.display_value().to_string();
        let dt = parse_datetime(&raw)?;
        Some(CaptureTimestamp::from_naive(dt))
    }
}

/// Accepts both the kamadak-exif display form (`2023-05-01 10:00:00`)
/// and the raw EXIF ASCII form (`2023:05:01 10:00:00`).
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S"))
        .ok()
}
