//! Numbering configuration
//!
//! Controls the fallback values used by `Book::next_number` when a
//! collection has no existing numbered entities to scan.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BookError, BookResult};

/// Entity kinds that carry a user-facing sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberedKind {
    Customer,
    Vendor,
    Job,
    Invoice,
}

/// Fallback numbering settings for freshly created entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingConfig {
    /// First number handed out when no entities of a kind exist yet
    #[serde(default = "default_start")]
    pub start: u64,

    /// Zero-padding width for numbers generated from the fallback
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,
}

fn default_start() -> u64 {
    1
}

fn default_pad_width() -> usize {
    6
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            pad_width: default_pad_width(),
        }
    }
}

impl NumberingConfig {
    /// Format the fallback starting number, e.g. "000001"
    pub fn first_number(&self) -> String {
        format!("{:0width$}", self.start, width = self.pad_width)
    }

    /// Load the configuration from a JSON file, falling back to defaults
    /// when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> BookResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(path)
            .map_err(|e| BookError::Io(format!("failed to open {}: {}", path.display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| BookError::Io(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Save the configuration as JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> BookResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| BookError::Io(format!("failed to create {}: {}", path.display(), e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| BookError::Io(format!("failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }
}
