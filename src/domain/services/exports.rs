#[cfg(test)]
#[path = "exports_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ExportSnapshot;

pub const EXPORT_MIME_TYPE: &str = "application/json";

pub struct Exports {
    pub export_dir: path::PathBuf,
}

impl Default for Exports {
    fn default() -> Exports {
        return Exports::new(path::PathBuf::from(Config::get(ConfigKey::ExportDir)));
    }
}

impl Exports {
    pub fn new(export_dir: path::PathBuf) -> Exports {
        return Exports { export_dir };
    }

    pub fn file_name(at: &DateTime<Local>) -> String {
        return format!("chat_export_{}.json", at.format("%Y%m%d_%H%M%S"));
    }

    pub fn render(snapshot: &ExportSnapshot) -> Result<String> {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }

    /// Instant the snapshot was taken, so the file name matches its contents.
    fn snapshot_instant(snapshot: &ExportSnapshot) -> DateTime<Local> {
        return DateTime::parse_from_rfc3339(&snapshot.timestamp)
            .map(|at| return at.with_timezone(&Local))
            .unwrap_or_else(|_| return Local::now());
    }

    /// Creates a new export file, never replacing an existing one. Repeated
    /// exports within the same second get a `_N` suffix.
    async fn create_unique(&self, at: &DateTime<Local>) -> Result<(path::PathBuf, fs::File)> {
        let base_name = Exports::file_name(at);
        let mut attempt: usize = 1;
        loop {
            let mut file_name = base_name.clone();
            if attempt > 1 {
                file_name = base_name.replace(".json", &format!("_{attempt}.json"));
            }

            let file_path = self.export_dir.join(file_name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(file) => return Ok((file_path, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Writes the snapshot as pretty printed JSON and returns the file path.
    /// Empty snapshots are refused rather than written as a degenerate file.
    pub async fn save(&self, snapshot: &ExportSnapshot) -> Result<path::PathBuf> {
        if snapshot.messages.is_empty() {
            bail!("There are no messages to export.");
        }

        let payload = Exports::render(snapshot)?;

        if !self.export_dir.exists() {
            fs::create_dir_all(&self.export_dir).await?;
        }

        let at = Exports::snapshot_instant(snapshot);
        let (file_path, mut file) = self.create_unique(&at).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(
            path = %file_path.display(),
            mime = EXPORT_MIME_TYPE,
            messages = snapshot.messages.len(),
            "exported chat"
        );

        return Ok(file_path);
    }

    /// Previously written exports, oldest first.
    pub async fn list(&self) -> Result<Vec<path::PathBuf>> {
        let mut exports: Vec<path::PathBuf> = vec![];
        if !self.export_dir.exists() {
            return Ok(exports);
        }

        let mut dir = fs::read_dir(&self.export_dir).await?;
        while let Some(file) = dir.next_entry().await? {
            let name = file.file_name().to_string_lossy().to_string();
            if name.starts_with("chat_export_") && name.ends_with(".json") {
                exports.push(file.path());
            }
        }

        exports.sort();

        return Ok(exports);
    }
}
