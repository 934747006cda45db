use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ledger::Document;

use super::{paths, Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// JSON file backend. The whole document is read on load and atomically
/// overwritten on save: data is written to a sibling temp file, flushed, then
/// renamed over the target so a failed save never truncates the previous
/// document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_file: PathBuf,
}

impl JsonStorage {
    pub fn new(data_file: PathBuf) -> Result<Self> {
        if let Some(parent) = data_file.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self { data_file })
    }

    /// Backend rooted at the default (or `SESSION_LEDGER_HOME`) data dir.
    pub fn new_default() -> Result<Self> {
        let base = paths::app_data_dir();
        Self::new(paths::data_file_in(&base))
    }
}

impl StorageBackend for JsonStorage {
    /// Loads the document, treating a missing file as an empty ledger. A
    /// present but unparseable file is reported as malformed.
    fn load(&self) -> Result<Document> {
        if !self.data_file.exists() {
            tracing::debug!(path = %self.data_file.display(), "no ledger file yet, starting empty");
            return Ok(Document::default());
        }
        let data = fs::read_to_string(&self.data_file)?;
        let document = serde_json::from_str(&data)?;
        Ok(document)
    }

    fn save(&self, document: &Document) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        write_atomic(&self.data_file, &json)?;
        tracing::debug!(path = %self.data_file.display(), weeks = document.weeks.len(), "ledger saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.data_file
    }
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
