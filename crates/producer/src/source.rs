//! Record sources
//!
//! [`LineSource`] reads line-delimited input and yields each line, terminator
//! included, as one [`Record`]. [`MemorySource`] replays a fixed list.

use courier_core::Record;
use courier_ports::RecordSource;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::ProducerError;

/// Line-delimited feed over any buffered reader
pub struct LineSource<R: BufRead> {
    reader: R,
    origin: String,
    exhausted: bool,
}

impl LineSource<BufReader<File>> {
    /// Open a data file
    pub fn open(path: &Path) -> Result<Self, ProducerError> {
        let file = File::open(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "data source unavailable");
            ProducerError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::from_reader(
            BufReader::new(file),
            path.display().to_string(),
        ))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn from_reader(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
            exhausted: false,
        }
    }
}

impl<R: BufRead> RecordSource for LineSource<R> {
    fn next_record(&mut self) -> io::Result<Option<Record>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut line = Vec::new();
        let read = self.reader.read_until(b'\n', &mut line)?;
        if read == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        Ok(Some(Record::new(line)))
    }

    fn describe(&self) -> String {
        self.origin.clone()
    }
}

/// In-memory feed, mostly for tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySource {
    records: VecDeque<Record>,
}

impl MemorySource {
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// One record per string, taken verbatim
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(Record::from))
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for MemorySource {
    fn next_record(&mut self) -> io::Result<Option<Record>> {
        Ok(self.records.pop_front())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
