//! # Artifact Writers
//!
//! Tables are written fully quoted, comma separated, one `\n` terminated
//! record per row. Tabs inside merged cells are kept as is.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::data::Table;
use crate::error::{ParamergeError, Result};
use crate::io::ArtifactSink;

/// Write header and rows of `table` as quoted CSV
pub fn write_records<W: Write>(out: W, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for record in table.records() {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `<dir>/<nickname>_<artifact>` files
#[derive(Debug)]
pub struct OutputDir {
    dir: PathBuf,
    nickname: String,
    written: Vec<PathBuf>,
}

impl OutputDir {
    /// The directory is created on the first write
    pub fn new(dir: impl Into<PathBuf>, nickname: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            nickname: nickname.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of an artifact
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}_{}", self.nickname, name))
    }

    /// Files written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn create(&mut self, name: &str) -> Result<BufWriter<File>> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        let file = File::create(&path)?;
        debug!(path = ?path, "writing artifact");
        self.written.push(path);
        Ok(BufWriter::new(file))
    }
}

impl ArtifactSink for OutputDir {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        let out = self.create(name)?;
        write_records(out, table)
    }

    fn write_text(&mut self, name: &str, text: &str) -> Result<()> {
        let mut out = self.create(name)?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps every artifact as text, keyed by artifact name
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write_table(&mut self, name: &str, table: &Table) -> Result<()> {
        let mut buf = Vec::new();
        write_records(&mut buf, table)?;
        let text = String::from_utf8(buf)
            .map_err(|e| ParamergeError::invalid_data(format!("{} is not UTF-8: {}", name, e)))?;
        self.files.insert(name.to_string(), text);
        Ok(())
    }

    fn write_text(&mut self, name: &str, text: &str) -> Result<()> {
        self.files.insert(name.to_string(), text.to_string());
        Ok(())
    }
}
