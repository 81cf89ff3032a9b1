use regex::Regex;

use crate::errors::{CsvlatexError, CsvlatexResult};

const DEFAULT_DELIMITER: &str = ",";

/// Column delimiter as specified in the command line
#[derive(Debug, Clone)]
pub struct Delimiter {
    text: String,
    collapse: Option<Regex>,
}

impl Delimiter {
    /// Create a Delimiter by parsing the command line arguments for the delimiter
    ///
    /// `tab_separation` takes priority over `delimiter_arg`. When `ignore_multiple` is set, runs
    /// of two or more delimiters are later collapsed into one before splitting.
    pub fn from_arg(
        delimiter_arg: &Option<String>,
        tab_separation: bool,
        ignore_multiple: bool,
    ) -> CsvlatexResult<Self> {
        let text = if tab_separation {
            "\t".to_owned()
        } else if let Some(s) = delimiter_arg {
            if s.is_empty() {
                return Err(CsvlatexError::DelimiterEmpty);
            }
            if s == r"\t" {
                "\t".to_owned()
            } else {
                s.clone()
            }
        } else {
            DEFAULT_DELIMITER.to_owned()
        };

        let collapse = if ignore_multiple {
            let escaped = regex::escape(&text);
            Some(Regex::new(&format!("(?:{escaped}){{2,}}"))?)
        } else {
            None
        };

        Ok(Delimiter { text, collapse })
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn collapses_runs(&self) -> bool {
        self.collapse.is_some()
    }

    /// Replace runs of consecutive delimiters with a single one, if enabled
    pub fn correct_multiple_columns<'a>(&self, line: &'a str) -> std::borrow::Cow<'a, str> {
        match &self.collapse {
            Some(re) => re.replace_all(line, regex::NoExpand(&self.text)),
            None => std::borrow::Cow::Borrowed(line),
        }
    }

    /// Split a line into its raw cells, collapsing delimiter runs first
    pub fn split(&self, line: &str) -> Vec<String> {
        self.correct_multiple_columns(line)
            .split(self.text.as_str())
            .map(|s| s.to_owned())
            .collect()
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter {
            text: DEFAULT_DELIMITER.to_owned(),
            collapse: None,
        }
    }
}
