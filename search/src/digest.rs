//! Content-addressed digests over canonical JSON.
//!
//! Canonical form: `serde_json` compact output with object keys in sorted
//! order (the default `Map` is a `BTreeMap`). Floats are never written as
//! JSON numbers by this crate; callers encode them with [`float_json`] so
//! non-finite values stay representable and formatting stays stable.

use sha2::{Digest, Sha256};

/// Domain prefix for search report hashing.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"ARA::SEARCH_REPORT::V1\0";

/// Domain prefix for search policy hashing.
pub const DOMAIN_SEARCH_POLICY: &[u8] = b"ARA::SEARCH_POLICY::V1\0";

/// A content hash in `"algorithm:hex_digest"` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format. `None` if either side is empty
    /// or the separator is missing.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 over `domain || data`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex = hex::encode(hasher.finalize());
    let full = format!("sha256:{hex}");
    let colon = "sha256".len();
    ContentHash { full, colon }
}

/// Compact sorted-key JSON bytes.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}

/// Encode a float as its shortest round-trip decimal string.
#[must_use]
pub fn float_json(x: f64) -> serde_json::Value {
    serde_json::Value::String(x.to_string())
}
