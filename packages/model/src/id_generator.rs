use crate::BlockId;
use crc32fast::Hasher;

/// Generate a document seed from a document key using CRC32
pub fn get_document_seed(key: &str) -> String {
    let mut buff = String::from(key);
    if !key.starts_with("doc://") {
        buff = format!("doc://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for block nodes within a document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Document seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(key: &str) -> Self {
        Self {
            seed: get_document_seed(key),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Resume a generator past every existing `{seed}-{n}` id
    pub fn resume<'a>(key: &str, existing: impl IntoIterator<Item = &'a BlockId>) -> Self {
        let mut gen = Self::new(key);
        for id in existing {
            gen.observe(id);
        }
        gen
    }

    /// Bump the counter if `id` was produced under this seed
    pub fn observe(&mut self, id: &BlockId) {
        let Some(rest) = id.as_str().strip_prefix(self.seed.as_str()) else {
            return;
        };
        if let Some(n) = rest.strip_prefix('-').and_then(|n| n.parse::<u32>().ok()) {
            self.count = self.count.max(n);
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId::new(format!("{}-{}", self.seed, self.count))
    }

    /// Get document seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}
