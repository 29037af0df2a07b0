use std::fs;
use std::path::{Path, PathBuf};
use crate::pipeline::BatchReport;
use crate::utils::error::StorageError;
use std::io::Write;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Path a candidate's bio is written to: `<base_dir>/<Candidate>.txt`
    pub fn bio_path(&self, candidate: &str) -> Result<PathBuf, StorageError> {
        let stem = sanitize_file_stem(candidate);
        if stem.is_empty() {
            return Err(StorageError::InvalidName(candidate.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.txt", stem)))
    }

    /// Saves one rendered bio, replacing any previous file
    pub fn save_bio(&self, candidate: &str, text: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.bio_path(candidate)?;

        let mut file = fs::File::create(&file_path)
            .map_err(StorageError::IoError)?;
        file.write_all(text.as_bytes())
            .map_err(StorageError::IoError)?;

        tracing::debug!("Saved bio to {}", file_path.display());

        Ok(file_path)
    }

    /// Creates `<base_dir>/<name>/` for auxiliary output such as debug dumps
    pub fn subdir(&self, name: &str) -> Result<PathBuf, StorageError> {
        let dir = self.base_dir.join(name);
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(StorageError::IoError)?;
        }
        Ok(dir)
    }
}

/// Saves the batch report in JSON format
pub fn save_report(
    report: &BatchReport,
    docx_path: &Path,
    manifest_path: &Path,
    file_path: &Path,
) -> Result<PathBuf, StorageError> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(StorageError::IoError)?;
    }

    let metadata = serde_json::json!({
        "document": docx_path.display().to_string(),
        "manifest": manifest_path.display().to_string(),
        "candidates": report.candidates,
        "matched_count": report.matched.len(),
        "saved_count": report.saved.len(),
        "skipped_empty_count": report.skipped_empty.len(),
        "unmatched_count": report.unmatched.len(),
        "matched": report.matched,
        "saved": report.saved,
        "skipped_empty": report.skipped_empty,
        "failed_writes": report.failed_writes,
        "unmatched": report.unmatched,
        "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let metadata_str = serde_json::to_string_pretty(&metadata)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    fs::write(file_path, metadata_str)
        .map_err(StorageError::IoError)?;

    tracing::info!("Saved run report to {}", file_path.display());

    Ok(file_path.to_path_buf())
}

/// Replaces path separators and control characters so an identifier maps to
/// a single file inside the output directory. Leading dots are dropped.
pub fn sanitize_file_stem(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    replaced.trim_start_matches('.').to_string()
}
