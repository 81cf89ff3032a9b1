use std::io::{BufRead, Write};

use crate::config::TableConfig;
use crate::errors::CsvlatexResult;
use crate::row;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const ROW_END: &str = " \\\\ ";

/// Whether the column spec block has been written yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatState {
    NotStarted,
    FormatEmitted,
}

/// Whether the first line has been consumed as the header yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    NotStarted,
    HeaderEmitted,
}

/// Writes a LaTeX table for the lines of a delimited text source
pub struct TableEmitter<'a, W: Write> {
    config: &'a TableConfig,
    out: W,
}

impl<'a, W: Write> TableEmitter<'a, W> {
    pub fn new(config: &'a TableConfig, out: W) -> Self {
        TableEmitter { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Emit the whole table for `reader`, returning the number of data rows written.
    ///
    /// The first line always determines the column count. It becomes the header if headers are
    /// enabled, and the first data row otherwise.
    pub fn emit<R: BufRead>(&mut self, mut reader: R) -> CsvlatexResult<usize> {
        if !self.config.data_only() {
            self.print_table_heading()?;
        }

        let mut format_state = FormatState::NotStarted;
        let mut header_state = HeaderState::NotStarted;
        let mut num_columns = 0;
        let mut num_rows = 0;

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            if format_state == FormatState::NotStarted {
                num_columns = row::column_count(self.config.delimiter(), &line);
                log::debug!("Derived {num_columns} columns from the first line");
                if !self.config.data_only() {
                    self.print_table_format(num_columns)?;
                }
                format_state = FormatState::FormatEmitted;
            }

            if self.config.has_header() && header_state == HeaderState::NotStarted {
                self.print_table_header(&line)?;
                header_state = HeaderState::HeaderEmitted;
            } else {
                let count = row::column_count(self.config.delimiter(), &line);
                if count != num_columns {
                    log::debug!(
                        "Row {} has {count} columns, expected {num_columns}",
                        num_rows + 1
                    );
                }
                self.print_line(&line)?;
                num_rows += 1;
            }
        }

        if !self.config.data_only() {
            self.print_table_ending()?;
        }
        self.out.flush()?;
        Ok(num_rows)
    }

    fn indent(&self, level: usize) -> String {
        if self.config.no_indent() {
            String::new()
        } else {
            "\t".repeat(level)
        }
    }

    fn write(&mut self, s: &str, level: usize) -> CsvlatexResult<()> {
        let indent = self.indent(level);
        write!(self.out, "{indent}{s}")?;
        Ok(())
    }

    fn writeln(&mut self, s: &str, level: usize) -> CsvlatexResult<()> {
        self.write(s, level)?;
        self.out.write_all(LINE_ENDING.as_bytes())?;
        Ok(())
    }

    fn write_position(&mut self) -> CsvlatexResult<()> {
        let config = self.config;
        if let Some(position) = config.position() {
            self.write(position, 0)?;
        }
        Ok(())
    }

    fn print_table_heading(&mut self) -> CsvlatexResult<()> {
        let config = self.config;
        if let Some(custom) = config.custom_environment() {
            let begin = format!("\\begin{{{custom}}}");
            self.write(&begin, 0)?;
            return self.write_position();
        }

        self.write("\\begin{table}", 0)?;
        self.write_position()?;
        self.writeln("", 0)?;
        if config.centered() {
            self.writeln("\\centering", 1)?;
        }
        let begin = format!("\\begin{{{}}}", config.environment());
        self.write(&begin, 1)
    }

    fn print_table_ending(&mut self) -> CsvlatexResult<()> {
        let config = self.config;
        self.writeln("\\hline", 2)?;
        if let Some(custom) = config.custom_environment() {
            let end = format!("\\end{{{custom}}}");
            return self.writeln(&end, 0);
        }

        let end = format!("\\end{{{}}}", config.environment());
        self.writeln(&end, 1)?;
        self.writeln("\\end{table}", 0)
    }

    /// Column spec block: either the full spec as given, or the per-column spec repeated once for
    /// each of the `count` columns of the first line
    fn print_table_format(&mut self, count: usize) -> CsvlatexResult<()> {
        let spec = if self.config.is_full_spec() {
            self.config.table_spec().to_owned()
        } else {
            let mut spec = format!("|{}", self.config.table_spec()).repeat(count);
            spec.push('|');
            spec
        };
        self.writeln(&format!("{{{spec}}}"), 0)
    }

    fn print_table_header(&mut self, line: &str) -> CsvlatexResult<()> {
        self.writeln("\\hline", 2)?;
        let mut header = row::get_line(
            self.config.delimiter(),
            line,
            &Default::default(),
            false,
        );
        if self.config.multiline_header() {
            header = row::wrap_multiline_header(&header);
        }
        // The joined header goes through the row pipeline once more, like any other row
        let header = row::get_line(
            self.config.delimiter(),
            &header,
            &Default::default(),
            false,
        );
        self.write_row(&header)?;
        self.writeln("\\hline", 2)
    }

    fn print_line(&mut self, line: &str) -> CsvlatexResult<()> {
        let formatted = row::get_line(
            self.config.delimiter(),
            line,
            self.config.cite_columns(),
            self.config.math_mode(),
        );
        self.write_row(&formatted)
    }

    fn write_row(&mut self, formatted: &str) -> CsvlatexResult<()> {
        self.write(formatted, 2)?;
        self.writeln(ROW_END, 0)
    }
}
