// src/manifest/mod.rs
//
// Manifest reconciliation: reads the materials CSV, points image-style
// `bio_name` values at `bio/<name>.txt`, and reports the candidate names the
// manifest expects a bio for. Unrelated columns and odd rows pass through.

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::utils::error::ManifestError;

const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Column holding the bio path.
    pub column: String,
    /// Directory prefix used in rewritten values, e.g. `bio`.
    pub bio_dir: String,
    /// Extensions (lower-case, no dot) that mark a value as an image path.
    pub image_extensions: Vec<String>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            column: "bio_name".to_string(),
            bio_dir: "bio".to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Shape of a `bio_name` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioValue {
    /// Already `bio/<name>.txt`.
    Bio(String),
    /// `.../<name>.<image-ext>`; needs rewriting.
    Image(String),
    Other,
}

pub fn classify_bio_value(value: &str, options: &ManifestOptions) -> BioValue {
    let value = value.trim();
    let file_name = value.rsplit(['/', '\\']).next().unwrap_or(value);
    let Some((stem, ext)) = file_name.rsplit_once('.') else {
        return BioValue::Other;
    };
    if stem.is_empty() {
        return BioValue::Other;
    }

    let ext = ext.to_lowercase();
    let bio_prefix = format!("{}/", options.bio_dir);
    if value.starts_with(&bio_prefix) && ext == "txt" {
        return BioValue::Bio(stem.to_string());
    }
    if options.image_extensions.iter().any(|e| *e == ext) {
        return BioValue::Image(stem.to_string());
    }
    BioValue::Other
}

/// Outcome of [`Manifest::reconcile`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Candidate names in row order, duplicates included.
    pub candidates: Vec<String>,
    /// Rows whose `bio_name` was rewritten from an image path.
    pub rewritten: usize,
    /// Rows left untouched because the value matched neither shape.
    pub passed_through: usize,
}

#[derive(Debug, Clone)]
pub struct Manifest {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    column: usize,
}

impl Manifest {
    pub fn read(path: &Path, options: &ManifestOptions) -> Result<Self, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::NotFound(path.display().to_string()));
        }
        let manifest = Self::from_reader(fs::File::open(path)?, options)?;
        tracing::info!("Read {} manifest rows from {}", manifest.rows.len(), path.display());
        Ok(manifest)
    }

    pub fn from_reader<R: Read>(reader: R, options: &ManifestOptions) -> Result<Self, ManifestError> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|h| h.trim() == options.column)
            .ok_or_else(|| ManifestError::MissingColumn(options.column.clone()))?;

        let rows = csv_reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows, column })
    }

    #[cfg(test)]
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Collects candidate names and rewrites image-style values in place.
    pub fn reconcile(&mut self, options: &ManifestOptions) -> Reconciliation {
        let mut outcome = Reconciliation::default();
        let column = self.column;

        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            let value = row.get(column).unwrap_or("");
            match classify_bio_value(value, options) {
                BioValue::Bio(name) => outcome.candidates.push(name),
                BioValue::Image(name) => {
                    let new_value = format!("{}/{}.txt", options.bio_dir, name);
                    tracing::debug!("Row {}: '{}' -> '{}'", row_idx + 1, value, new_value);
                    *row = replace_field(row, column, &new_value);
                    outcome.candidates.push(name);
                    outcome.rewritten += 1;
                }
                BioValue::Other => {
                    tracing::trace!("Row {}: leaving '{}' unchanged", row_idx + 1, value);
                    outcome.passed_through += 1;
                }
            }
        }

        outcome
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ManifestError> {
        let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Rewrites the manifest at `path`. Writes to a sibling temp file first
    /// so a failed write leaves the old manifest intact.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let tmp_path = temp_path_for(path);
        self.write_to(fs::File::create(&tmp_path)?)?;
        fs::rename(&tmp_path, path)?;
        tracing::info!("Rewrote manifest {}", path.display());
        Ok(())
    }
}

fn replace_field(record: &StringRecord, column: usize, value: &str) -> StringRecord {
    record
        .iter()
        .enumerate()
        .map(|(i, field)| if i == column { value } else { field })
        .collect()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "\
id,image,bio_name,party
1,image/Adam_Frisch.jpeg,image/Adam_Frisch.jpeg,D
2,image/Tom_Barrett.png,bio/Tom_Barrett.txt,D
3,,n/a,R
4,image/Jane_Doe.JPG,pictures\\Jane_Doe.JPG,\"Independent, Other\"
";

    fn load() -> Manifest {
        Manifest::from_reader(MANIFEST.as_bytes(), &ManifestOptions::default()).unwrap()
    }

    #[test]
    fn test_classify_bio_value() {
        let opts = ManifestOptions::default();
        assert_eq!(classify_bio_value("bio/Adam_Frisch.txt", &opts), BioValue::Bio("Adam_Frisch".into()));
        assert_eq!(classify_bio_value("bio/Adam_Frisch.TXT", &opts), BioValue::Bio("Adam_Frisch".into()));
        assert_eq!(classify_bio_value("image/Adam_Frisch.jpeg", &opts), BioValue::Image("Adam_Frisch".into()));
        assert_eq!(classify_bio_value("a/b/c/J.D._Vance.png", &opts), BioValue::Image("J.D._Vance".into()));
        assert_eq!(classify_bio_value("notes/Adam_Frisch.txt", &opts), BioValue::Other);
        assert_eq!(classify_bio_value("", &opts), BioValue::Other);
        assert_eq!(classify_bio_value("image/.png", &opts), BioValue::Other);
        assert_eq!(classify_bio_value("n/a", &opts), BioValue::Other);
    }

    #[test]
    fn test_reconcile_rewrites_image_rows_only() {
        let mut manifest = load();
        let outcome = manifest.reconcile(&ManifestOptions::default());

        assert_eq!(outcome.candidates, vec!["Adam_Frisch", "Tom_Barrett", "Jane_Doe"]);
        assert_eq!(outcome.rewritten, 2);
        assert_eq!(outcome.passed_through, 1);

        let values: Vec<&str> = manifest.rows().iter().map(|r| r.get(2).unwrap()).collect();
        assert_eq!(values, vec!["bio/Adam_Frisch.txt", "bio/Tom_Barrett.txt", "n/a", "bio/Jane_Doe.txt"]);
    }

    #[test]
    fn test_reconcile_preserves_other_columns_and_row_count() {
        let before = load();
        let mut after = load();
        after.reconcile(&ManifestOptions::default());

        assert_eq!(before.len(), after.len());
        assert_eq!(before.headers(), after.headers());
        for (b, a) in before.rows().iter().zip(after.rows()) {
            assert_eq!(b.len(), a.len());
            for col in [0, 1, 3] {
                assert_eq!(b.get(col), a.get(col));
            }
        }
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut manifest = load();
        manifest.reconcile(&ManifestOptions::default());
        let second = manifest.reconcile(&ManifestOptions::default());
        assert_eq!(second.rewritten, 0);
        assert_eq!(second.candidates.len(), 3);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let result = Manifest::from_reader("id,image\n1,a.png\n".as_bytes(), &ManifestOptions::default());
        assert!(matches!(result, Err(ManifestError::MissingColumn(col)) if col == "bio_name"));
    }

    #[test]
    fn test_short_rows_pass_through() {
        let mut manifest = Manifest::from_reader(
            "id,bio_name,extra\n1\n2,image/A_B.png,x\n".as_bytes(),
            &ManifestOptions::default(),
        )
        .unwrap();
        let outcome = manifest.reconcile(&ManifestOptions::default());
        assert_eq!(outcome.candidates, vec!["A_B"]);
        assert_eq!(manifest.rows()[0].len(), 1);
    }

    #[test]
    fn test_write_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("materials.csv");
        fs::write(&path, MANIFEST).unwrap();

        let options = ManifestOptions::default();
        let mut manifest = Manifest::read(&path, &options).unwrap();
        manifest.reconcile(&options);
        manifest.write(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("id,image,bio_name,party\n"));
        assert!(written.contains("1,image/Adam_Frisch.jpeg,bio/Adam_Frisch.txt,D\n"));
        assert!(written.contains("\"Independent, Other\""));
        assert!(!dir.path().join("materials.csv.tmp").exists());

        let reread = Manifest::read(&path, &options).unwrap();
        assert_eq!(reread.len(), 4);
    }

    #[test]
    fn test_missing_manifest_file() {
        let result = Manifest::read(Path::new("/no/such/materials.csv"), &ManifestOptions::default());
        assert!(matches!(result, Err(ManifestError::NotFound(_))));
    }
}
