use std::fmt;
use xxhash_rust::xxh64::{Xxh64, xxh64};

/// Seed mixed into every source hash.
const SOURCE_SEED: u64 = 0x5c71_9e0b_a4d3_2f61;

/// Deterministic 64-bit fingerprint of a script text.
///
/// The host stores the fingerprint of the text it compiled, so it can tell
/// whether the running unit still matches the buffer.
///
/// ```
/// use scripthost_core::SourceHash;
///
/// assert_eq!(SourceHash::of("fn main() {}"), SourceHash::of("fn main() {}"));
/// assert_ne!(SourceHash::of("a"), SourceHash::of("b"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceHash(pub u64);

impl SourceHash {
    /// Hashes a script text.
    #[inline]
    pub fn of(source: &str) -> Self {
        SourceHash(xxh64(source.as_bytes(), SOURCE_SEED))
    }

    /// Hashes several texts as one. Moving text from one part to the next
    /// changes the hash.
    pub fn of_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let mut hasher = Xxh64::new(SOURCE_SEED);
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update(&[0]);
        }
        SourceHash(hasher.digest())
    }
}

impl fmt::Display for SourceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
