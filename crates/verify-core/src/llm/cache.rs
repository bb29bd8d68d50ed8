//! On-disk response cache.
//!
//! Keyed by the scaffold, case id, and model so that re-running a
//! suite against the same model skips paid calls. Writes go through a
//! temp file rename so a crashed run never leaves a torn entry.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::Result;
use crate::llm::LlmResponse;

pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key(scaffold: &str, case_id: &str, model: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(scaffold.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(case_id.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(model.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn entry_path(&self, scaffold: &str, case_id: &str, model: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json", Self::key(scaffold, case_id, model)))
    }

    pub fn get(&self, scaffold: &str, case_id: &str, model: &str) -> Option<LlmResponse> {
        let path = self.entry_path(scaffold, case_id, model);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(response) => {
                debug!(scaffold, case_id, "cache hit");
                Some(response)
            }
            Err(_) => {
                // A corrupt entry is treated as a miss and overwritten
                // on the next put.
                None
            }
        }
    }

    pub fn put(
        &self,
        scaffold: &str,
        case_id: &str,
        model: &str,
        response: &LlmResponse,
    ) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(scaffold, case_id, model);
        let serialized = serde_json::to_string_pretty(response)?;
        write_atomic(&self.dir, &path, &serialized)?;
        Ok(())
    }
}

fn write_atomic(dir: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
