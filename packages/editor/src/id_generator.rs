use crc32fast::Hasher;
use sitecraft_common::NodeId;

/// Session seed derived from the session id using CRC32
pub fn session_seed(session_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(session_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential node ids for one editing session: `{seed}-{n}`
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(session_id: &str) -> Self {
        Self {
            seed: session_seed(session_id),
            count: 0,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.count += 1;
        NodeId::new(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
