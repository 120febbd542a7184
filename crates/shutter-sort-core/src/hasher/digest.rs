use crate::error::Error;
use md5::Md5;
use sha1::{Digest, Sha1};
use sha2::Sha512;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Chunk size for streaming reads; also the window the partial digest covers.
pub const BLOCK_SIZE: usize = 1024 * 1024; // 1 MiB

/// Digest algorithms selectable by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Sha1,
    Sha512,
    Md5,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "sha1" => Ok(Algorithm::Sha1),
            "sha512" => Ok(Algorithm::Sha512),
            "md5" => Ok(Algorithm::Md5),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Sha1 => write!(f, "sha1"),
            Algorithm::Sha512 => write!(f, "sha512"),
            Algorithm::Md5 => write!(f, "md5"),
        }
    }
}

/// How much of the file a digest covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestScope {
    /// Only the first [`BLOCK_SIZE`] bytes (or the whole file if smaller).
    FirstBlock,
    /// The entire file content.
    Full,
}

/// Compute the digest of `path` as an uppercase hex string.
///
/// Reads in [`BLOCK_SIZE`] chunks so memory stays bounded regardless of
/// file size. Open and read failures carry the offending path.
pub fn compute_digest(path: &Path, algorithm: Algorithm, scope: DigestScope) -> Result<String, Error> {
    let mut file = File::open(path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("Error opening {}: {}", path.display(), e),
        )
    })?;

    let digest = match algorithm {
        Algorithm::Sha1 => digest_stream::<Sha1>(&mut file, scope),
        Algorithm::Sha512 => digest_stream::<Sha512>(&mut file, scope),
        Algorithm::Md5 => digest_stream::<Md5>(&mut file, scope),
    };

    digest
        .map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Error reading {}: {}", path.display(), e),
            )
        })
        .map_err(Error::from)
}

fn digest_stream<D: Digest>(reader: &mut File, scope: DigestScope) -> io::Result<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; BLOCK_SIZE];

    loop {
        // read() may return short; fill the block until EOF so FirstBlock
        // covers exactly BLOCK_SIZE bytes of any larger file.
        let mut filled = 0;
        while filled < BLOCK_SIZE {
            let n = reader.read(&mut buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        hasher.update(&buffer[..filled]);
        if filled < BLOCK_SIZE || scope == DigestScope::FirstBlock {
            break;
        }
    }

    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_known_sha1_vector() {
        let file = write_temp(b"abc");
        let digest = compute_digest(file.path(), Algorithm::Sha1, DigestScope::Full).unwrap();
        assert_eq!(digest, "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }

    #[test]
    fn test_known_md5_vector() {
        let file = write_temp(b"abc");
        let digest = compute_digest(file.path(), Algorithm::Md5, DigestScope::Full).unwrap();
        assert_eq!(digest, "900150983CD24FB0D6963F7D28E17F72");
    }

    #[test]
    fn test_empty_file_sha1() {
        let file = write_temp(b"");
        let digest = compute_digest(file.path(), Algorithm::Sha1, DigestScope::Full).unwrap();
        assert_eq!(digest, "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
    }

    #[test]
    fn test_sha512_digest_length() {
        let file = write_temp(b"some content");
        let digest = compute_digest(file.path(), Algorithm::Sha512, DigestScope::Full).unwrap();
        assert_eq!(digest.len(), 128);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_first_block_equals_full_for_small_files() {
        let file = write_temp(b"smaller than one block");
        let partial =
            compute_digest(file.path(), Algorithm::Sha1, DigestScope::FirstBlock).unwrap();
        let full = compute_digest(file.path(), Algorithm::Sha1, DigestScope::Full).unwrap();
        assert_eq!(partial, full);
    }

    #[test]
    fn test_first_block_ignores_the_tail() {
        let mut prefix = vec![0x5Au8; BLOCK_SIZE];
        let truncated = write_temp(&prefix);

        prefix.extend_from_slice(b"tail beyond the first block");
        let extended = write_temp(&prefix);

        let a = compute_digest(truncated.path(), Algorithm::Sha1, DigestScope::FirstBlock).unwrap();
        let b = compute_digest(extended.path(), Algorithm::Sha1, DigestScope::FirstBlock).unwrap();
        assert_eq!(a, b);

        let full_a = compute_digest(truncated.path(), Algorithm::Sha1, DigestScope::Full).unwrap();
        let full_b = compute_digest(extended.path(), Algorithm::Sha1, DigestScope::Full).unwrap();
        assert_ne!(full_a, full_b);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(Algorithm::from_str("sha1").unwrap(), Algorithm::Sha1);
        assert_eq!(Algorithm::from_str("sha512").unwrap(), Algorithm::Sha512);
        assert_eq!(Algorithm::from_str("md5").unwrap(), Algorithm::Md5);
        assert!(matches!(
            Algorithm::from_str("crc32"),
            Err(Error::UnsupportedAlgorithm(name)) if name == "crc32"
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = compute_digest(
            Path::new("/no/such/file.jpg"),
            Algorithm::Sha1,
            DigestScope::Full,
        )
        .unwrap_err();
        assert!(err.to_string().contains("/no/such/file.jpg"));
    }
}
