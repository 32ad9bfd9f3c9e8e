//! XML file access: loading and saving whole books
//!
//! A book file is read and written as a unit. [`load_file`] pulls the
//! complete document into memory, parses it, and hands back an owned
//! [`Book`]; [`Book::write_file`] serializes every collection back out.
//! Writes go to a temp file in the destination directory followed by a
//! rename, so a failed write never leaves a half-written book behind.

mod reader;
mod writer;

use std::fs;
use std::path::Path;

use crate::book::Book;
use crate::error::{BookError, BookResult};

/// Load a book from an XML file on disk
pub fn load_file<P: AsRef<Path>>(path: P) -> BookResult<Book> {
    let path = path.as_ref();
    let input = fs::read_to_string(path)
        .map_err(|e| BookError::Io(format!("failed to read {}: {}", path.display(), e)))?;
    load_str(&input)
}

/// Load a book from an XML document held in memory
pub fn load_str(input: &str) -> BookResult<Book> {
    let root = reader::parse_document(input)?;
    reader::book_from_document(&root)
}

impl Book {
    /// Serialize the book to an XML string
    pub fn to_xml_string(&self) -> BookResult<String> {
        let bytes = writer::book_to_bytes(self)?;
        String::from_utf8(bytes).map_err(|e| BookError::Xml(e.to_string()))
    }

    /// Write the book to a file, replacing any existing content atomically
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> BookResult<()> {
        let path = path.as_ref();
        let bytes = writer::book_to_bytes(self)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    BookError::Io(format!(
                        "failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        // Temp file in the same directory so the rename stays on one filesystem
        let temp_path = path.with_extension("xml.tmp");
        fs::write(&temp_path, &bytes)
            .map_err(|e| BookError::Io(format!("failed to write {}: {}", temp_path.display(), e)))?;
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BookError::Io(format!("failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
