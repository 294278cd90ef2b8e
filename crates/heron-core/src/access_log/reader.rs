use crate::{Error, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

pub struct LogReader;

impl LogReader {
    /// Open a log file for line-by-line reading
    ///
    /// Paths ending in `.gz` are decompressed transparently; anything else is
    /// read as plain UTF-8 text. The file handle is closed when the returned
    /// iterator is dropped.
    pub fn open(path: &Path) -> Result<LogLines> {
        tracing::debug!("Opening log file: {}", path.display());

        let file = File::open(path)?;

        let source: Box<dyn Read> = if is_gzip(path) {
            tracing::debug!("Reading {} as gzip", path.display());
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Self::from_reader(source))
    }

    /// Wrap an arbitrary byte source (already decompressed)
    pub fn from_reader<R: Read + 'static>(reader: R) -> LogLines {
        let source: Box<dyn Read> = Box::new(reader);
        LogLines {
            lines: BufReader::new(source).lines(),
        }
    }
}

/// Lazy, single-pass sequence of lines from a log file
pub struct LogLines {
    lines: Lines<BufReader<Box<dyn Read>>>,
}

impl Iterator for LogLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| line.map_err(Error::from))
    }
}

pub(crate) fn is_gzip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
