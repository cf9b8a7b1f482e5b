use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use medbill_invoicing::InvoiceRecord;

use super::r#trait::{InvoiceSource, SourceError, ensure_unique};

/// Invoice source backed by a JSON array on disk.
///
/// A missing file reads as an empty list and is created on the first
/// append. Writes go to a sibling temp file which then replaces the original.
#[derive(Debug)]
pub struct JsonFileInvoiceSource {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileInvoiceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> SourceError {
        SourceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read(&self) -> Result<Vec<InvoiceRecord>, SourceError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "data file missing; treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };

        let records: Vec<InvoiceRecord> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| SourceError::Json {
                path: self.path.clone(),
                source,
            })?;

        for record in &records {
            for warning in record.milestone_warnings() {
                tracing::warn!(id = %record.id, "{warning}");
            }
        }
        Ok(records)
    }

    fn write(&self, records: &[InvoiceRecord]) -> Result<(), SourceError> {
        let tmp = self.path.with_extension("json.tmp");
        let result = self.write_to(&tmp, records);
        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp) {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %e, "could not remove temp file");
                }
            }
        }
        result
    }

    fn write_to(&self, tmp: &Path, records: &[InvoiceRecord]) -> Result<(), SourceError> {
        let file = File::create(tmp).map_err(|e| self.io_err(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| SourceError::Json {
            path: tmp.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|e| self.io_err(e))?;
        drop(writer);
        fs::rename(tmp, &self.path).map_err(|e| self.io_err(e))
    }
}

impl InvoiceSource for JsonFileInvoiceSource {
    fn list(&self) -> Result<Vec<InvoiceRecord>, SourceError> {
        self.read()
    }

    fn append(&self, record: InvoiceRecord) -> Result<(), SourceError> {
        let _guard = self.write_lock.lock().map_err(|_| SourceError::Poisoned)?;

        let mut records = self.read()?;
        ensure_unique(&records, &record)?;
        let id = record.id.clone();
        records.push(record);
        self.write(&records)?;

        tracing::info!(%id, path = %self.path.display(), total = records.len(), "invoice appended");
        Ok(())
    }
}
