//! Path digests used as artifact names.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

/// A SHA-256 digest of a source path (the path string, not the file content).
///
/// The same path always maps to the same digest, so each source template has
/// exactly one artifact slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathDigest([u8; 32]);

impl PathDigest {
    /// Digests the path as given, without canonicalizing it.
    pub fn of(path: &Path) -> Self {
        Self(Sha256::digest(path.as_os_str().as_encoded_bytes()).into())
    }
}

impl fmt::Display for PathDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PathDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathDigest({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = PathDigest::of(Path::new("views/home.blade"));
        let b = PathDigest::of(Path::new("views/home.blade"));
        assert_eq!(a, b);
    }

    #[test]
    fn different_paths_differ() {
        let a = PathDigest::of(Path::new("views/home.blade"));
        let b = PathDigest::of(Path::new("views/about.blade"));
        assert_ne!(a, b);
    }

    #[test]
    fn known_value() {
        // sha256("abc")
        assert_eq!(
            PathDigest::of(Path::new("abc")).to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn display_format() {
        let s = PathDigest::of(Path::new("x")).to_string();
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn debug_abbreviated() {
        let s = format!("{:?}", PathDigest::of(Path::new("x")));
        assert!(s.starts_with("PathDigest("));
        assert!(s.ends_with("..)"));
    }
}
