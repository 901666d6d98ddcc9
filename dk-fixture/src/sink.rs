use std::fs::File;
use std::io;
use std::path::Path;

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

use crate::encoding::FixtureLine;
use crate::error::FixtureError;

pub const COLUMN_DELIMITER: u8 = b'|';

#[cfg(windows)]
const LINE_TERMINATOR: Terminator = Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: Terminator = Terminator::Any(b'\n');

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .delimiter(COLUMN_DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(LINE_TERMINATOR);
    builder
}

/// Writes fixture rows, one per line, with no header.
///
/// Dropping the sink flushes on a best-effort basis; call [`FixtureSink::finish`] to see flush
/// errors.
pub struct FixtureSink<W: io::Write> {
    writer: Writer<W>,
    lines_written: usize,
}

impl FixtureSink<File> {
    /// Creates the file at `path`, truncating any previous content.
    ///
    /// # Errors
    /// Errors when the file cannot be created
    pub fn create(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Ok(FixtureSink {
            writer: writer_builder().from_path(path)?,
            lines_written: 0,
        })
    }
}

impl<W: io::Write> FixtureSink<W> {
    #[must_use]
    pub fn from_writer(writer: W) -> Self {
        FixtureSink {
            writer: writer_builder().from_writer(writer),
            lines_written: 0,
        }
    }

    /// # Errors
    /// Errors when the underlying writer fails
    pub fn write_line(&mut self, line: &FixtureLine) -> Result<(), FixtureError> {
        self.writer.serialize(line)?;
        self.lines_written += 1;
        Ok(())
    }

    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flushes every buffered line and hands back the underlying writer.
    ///
    /// # Errors
    /// Errors when the final flush fails
    pub fn finish(mut self) -> Result<W, FixtureError> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| FixtureError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{EncodedField, FixtureLine};

    fn line() -> FixtureLine {
        FixtureLine::from_fields([
            EncodedField::from_bytes(&[1, 2]),
            EncodedField::from_bytes(&[3]),
            EncodedField::from_bytes(&[4]),
            EncodedField::from_bytes(&[5]),
            EncodedField::from_items(["DE", "NL"]),
            EncodedField::from_items("DE".chars()),
            EncodedField::from_bytes(&[0, 0, 0, 1]),
            EncodedField::from_bytes(&[6]),
        ])
    }

    #[test]
    fn test_write_line_without_quoting() {
        let mut sink = FixtureSink::from_writer(vec![]);
        sink.write_line(&line()).unwrap();
        sink.write_line(&line()).unwrap();
        assert_eq!(sink.lines_written(), 2);

        let output = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1,2]|AQI=|[3]|Aw==|"));
        assert!(lines[0].contains("|[DE,NL]|REUsTkw=|[D,E]|RCxF|[0,0,0,1]|AAAAAQ==|[6]|Bg==|"));
        assert_eq!(lines[0].split('|').count(), 17);
        assert!(!output.contains('"'));
    }

    #[test]
    fn test_empty_sink() {
        let sink = FixtureSink::from_writer(vec![]);
        assert_eq!(sink.lines_written(), 0);
        assert!(sink.finish().unwrap().is_empty());
    }
}
