use crate::core::models::types::AtomTypeTable;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomTypeLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io { path: String, source: io::Error },
    #[error("Invalid atom type '{token}' on line {line}: expected an integer")]
    Parse { line: usize, token: String },
}

/// Plain-text list of integer model types, whitespace separated, one per selected atom.
pub struct AtomTypeFile;

impl AtomTypeFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<AtomTypeTable, AtomTypeLoadError> {
        let mut types = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res.map_err(|e| AtomTypeLoadError::Io {
                path: "<reader>".to_string(),
                source: e,
            })?;
            for token in line.split_whitespace() {
                let value = token.parse::<i32>().map_err(|_| AtomTypeLoadError::Parse {
                    line: line_num + 1,
                    token: token.to_string(),
                })?;
                types.push(value);
            }
        }
        Ok(AtomTypeTable::new(types))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<AtomTypeTable, AtomTypeLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AtomTypeLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader).map_err(|e| match e {
            AtomTypeLoadError::Io { source, .. } => AtomTypeLoadError::Io {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }
}
