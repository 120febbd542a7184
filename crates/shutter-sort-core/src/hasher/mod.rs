pub mod detector;
pub mod digest;

pub use detector::{find_duplicates, DuplicateGroup};
pub use digest::{compute_digest, Algorithm, DigestScope, BLOCK_SIZE};
