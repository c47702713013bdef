mod parser;

use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

pub use parser::{AssignmentImport, RowSkipReason, SkippedRow};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    NotCsv(PathBuf),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read assignment file: {}", err),
            ImportError::Csv(err) => write!(f, "invalid assignment CSV data: {}", err),
            ImportError::NotCsv(path) => {
                write!(f, "please upload a CSV file ('{}' is not one)", path.display())
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::NotCsv(_) => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads headerless `employee,project,date_from,date_to` exports.
pub struct AssignmentImporter;

impl AssignmentImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<AssignmentImport, ImportError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err(ImportError::NotCsv(path.to_path_buf()));
        }

        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<AssignmentImport, ImportError> {
        let import = parser::parse_rows(reader)?;
        info!(
            assignments = import.assignments.len(),
            skipped = import.skipped.len(),
            "imported work assignments"
        );
        Ok(import)
    }
}
