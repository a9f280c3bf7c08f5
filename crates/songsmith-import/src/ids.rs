//! Identifier allocation for imported entities.
//!
//! Ids are derived from a per-import salt with BLAKE3:
//!
//! ```text
//! id = prefix "_" hex(BLAKE3(salt || prefix || counter))[..16]
//! ```
//!
//! The salt covers the bundle content and the conversion timestamp, so two
//! imports never share ids while a single import stays reproducible when the
//! timestamp is fixed.

/// Hands out unique, prefixed ids for one import.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    salt: [u8; 32],
    counter: u64,
}

impl IdAllocator {
    /// Creates an allocator salted with `seed`.
    pub fn new(seed: &[u8]) -> Self {
        Self {
            salt: *blake3::hash(seed).as_bytes(),
            counter: 0,
        }
    }

    /// Next id with the given prefix, e.g. `sec_3f9a0c1d2b4e5f60`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.salt);
        hasher.update(prefix.as_bytes());
        hasher.update(&self.counter.to_le_bytes());
        self.counter += 1;

        let hex = hasher.finalize().to_hex();
        format!("{}_{}", prefix, &hex[..16])
    }
}
