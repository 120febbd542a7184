use crate::error::Error;
use crate::hasher::digest::{self, Algorithm, DigestScope};
use crate::progress::ProgressReporter;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Partial tier is always the fast digest over the first block.
const PARTIAL_ALGORITHM: Algorithm = Algorithm::Sha1;

/// Files confirmed byte-identical by full-content digest equality.
/// `paths` preserves the order the files were processed in.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub full_hash: String,
    pub paths: Vec<PathBuf>,
}

/// Two-tier duplicate detection:
/// 1. Partial digest (first block, SHA-1) to quickly eliminate non-matches
/// 2. Full content digest only on partial-digest collisions
///
/// When a path collides on the partial tier, every earlier member of that
/// bucket that was never fully hashed gets its full digest computed then,
/// so files seen before the collision still group correctly. Each file is
/// fully hashed at most once. Only groups with two or more confirmed
/// members are returned; a partial-tier collision alone never counts.
pub fn find_duplicates(
    paths: &[PathBuf],
    full_algorithm: Algorithm,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<DuplicateGroup>, Error> {
    debug!("Analyzing {} files", paths.len());

    // partial digest → files sharing it, each with its full digest once known
    let mut partial_buckets: HashMap<String, Vec<(PathBuf, Option<String>)>> = HashMap::new();
    // full digest → files sharing it, in the order the digests were computed
    let mut full_groups: HashMap<String, Vec<PathBuf>> = HashMap::new();
    let mut group_order: Vec<String> = Vec::new();

    for (processed, path) in paths.iter().enumerate() {
        let partial = digest::compute_digest(path, PARTIAL_ALGORITHM, DigestScope::FirstBlock)?;

        match partial_buckets.entry(partial) {
            Entry::Vacant(slot) => {
                slot.insert(vec![(path.clone(), None)]);
            }
            Entry::Occupied(mut slot) => {
                let bucket = slot.get_mut();
                bucket.push((path.clone(), None));

                for (candidate, full_hash) in bucket.iter_mut() {
                    if full_hash.is_some() {
                        continue;
                    }
                    let computed =
                        digest::compute_digest(candidate, full_algorithm, DigestScope::Full)?;
                    match full_groups.entry(computed.clone()) {
                        Entry::Vacant(group) => {
                            group_order.push(computed.clone());
                            group.insert(vec![candidate.clone()]);
                        }
                        Entry::Occupied(mut group) => {
                            group.get_mut().push(candidate.clone());
                        }
                    }
                    *full_hash = Some(computed);
                }
            }
        }

        reporter.on_detect_progress(processed + 1, paths.len());
    }

    let groups: Vec<DuplicateGroup> = group_order
        .into_iter()
        .filter_map(|full_hash| {
            let paths = full_groups.remove(&full_hash)?;
            (paths.len() > 1).then_some(DuplicateGroup { full_hash, paths })
        })
        .collect();

    report_groups(&groups, full_algorithm);

    Ok(groups)
}

// Observational only; callers act on the returned groups.
fn report_groups(groups: &[DuplicateGroup], full_algorithm: Algorithm) {
    if groups.is_empty() {
        info!("No duplicate content found");
        return;
    }

    info!(
        "{} group(s) of files share the same {} hash",
        groups.len(),
        full_algorithm
    );
    for group in groups {
        info!("Hash value {}", group.full_hash);
        for path in &group.paths {
            info!("    {}", path.display());
        }
    }
}
