use silt_types::ObjectId;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag (e.g., `"silt-blob-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: a blob and a commit with identical serialized bytes will
/// produce different hashes.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for blob objects.
    pub const BLOB: Self = Self {
        domain: "silt-blob-v1",
    };
    /// Hasher for commit objects.
    pub const COMMIT: Self = Self {
        domain: "silt-commit-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ObjectId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ObjectId::from_hash(*hasher.finalize().as_bytes())
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(&self, data: &[u8], expected: &ObjectId) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        let id1 = ContentHasher::BLOB.hash(data);
        let id2 = ContentHasher::BLOB.hash(data);
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_domains_produce_different_hashes() {
        let data = b"same content";
        let blob_hash = ContentHasher::BLOB.hash(data);
        let commit_hash = ContentHasher::COMMIT.hash(data);
        assert_ne!(blob_hash, commit_hash);
    }

    #[test]
    fn verify_correct_data() {
        let data = b"test data";
        let id = ContentHasher::BLOB.hash(data);
        assert!(ContentHasher::BLOB.verify(data, &id));
    }

    #[test]
    fn verify_incorrect_data() {
        let id = ContentHasher::BLOB.hash(b"original");
        assert!(!ContentHasher::BLOB.verify(b"tampered", &id));
    }

    #[test]
    fn custom_domain() {
        let hasher = ContentHasher::new("my-custom-domain-v1");
        let id = hasher.hash(b"data");
        assert_ne!(id, ContentHasher::BLOB.hash(b"data"));
    }
}
