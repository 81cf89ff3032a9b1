use std::collections::BTreeSet;

use crate::delimiter::Delimiter;
use crate::errors::CsvlatexResult;
use crate::runner::CsvlatexOptions;

const DEFAULT_TABLE_SPEC: &str = "l";
const MULTILINE_TABLE_SPEC: &str = "X";
const TABULAR: &str = "tabular";
const TABULARX: &str = "tabularx";

/// Fully resolved settings for emitting one table. Built once before any output is written.
#[derive(Debug, Clone)]
pub struct TableConfig {
    delimiter: Delimiter,
    has_header: bool,
    no_indent: bool,
    table_spec: String,
    environment: String,
    custom_environment: Option<String>,
    multiline_header: bool,
    centered: bool,
    position: Option<String>,
    data_only: bool,
    cite_columns: BTreeSet<usize>,
    math_mode: bool,
}

impl TableConfig {
    pub fn resolve(options: &CsvlatexOptions) -> CsvlatexResult<TableConfig> {
        let delimiter = Delimiter::from_arg(
            &options.delimiter,
            options.tab_separated,
            options.ignore_multiple,
        )?;

        let table_spec = match &options.table_spec {
            Some(spec) if !spec.is_empty() => spec.clone(),
            _ if options.multiline => MULTILINE_TABLE_SPEC.to_owned(),
            _ => DEFAULT_TABLE_SPEC.to_owned(),
        };

        let environment = match &options.environment {
            Some(env) if !env.is_empty() => env.clone(),
            _ if options.tabularx => TABULARX.to_owned(),
            _ => TABULAR.to_owned(),
        };

        let custom_environment = options.custom.clone().filter(|s| !s.is_empty());

        Ok(TableConfig {
            delimiter,
            has_header: !options.no_header,
            no_indent: options.no_format,
            table_spec,
            environment,
            custom_environment,
            multiline_header: options.multiline,
            centered: options.centering,
            position: options.position.as_deref().and_then(bracket_position),
            data_only: options.data_only,
            cite_columns: options.cite_columns.iter().copied().collect(),
            math_mode: options.math_mode,
        })
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    pub fn no_indent(&self) -> bool {
        self.no_indent
    }

    pub fn table_spec(&self) -> &str {
        self.table_spec.as_str()
    }

    /// Whether the table spec is a complete column spec rather than a per-column one
    pub fn is_full_spec(&self) -> bool {
        self.table_spec.contains('|')
    }

    pub fn environment(&self) -> &str {
        self.environment.as_str()
    }

    pub fn custom_environment(&self) -> Option<&str> {
        self.custom_environment.as_deref()
    }

    pub fn multiline_header(&self) -> bool {
        self.multiline_header
    }

    pub fn centered(&self) -> bool {
        self.centered
    }

    /// Float position, always in its bracketed form
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn data_only(&self) -> bool {
        self.data_only
    }

    pub fn cite_columns(&self) -> &BTreeSet<usize> {
        &self.cite_columns
    }

    pub fn math_mode(&self) -> bool {
        self.math_mode
    }
}

fn bracket_position(position: &str) -> Option<String> {
    if position.is_empty() {
        None
    } else if position.starts_with('[') && position.ends_with(']') {
        Some(position.to_owned())
    } else {
        Some(format!("[{position}]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = TableConfig::resolve(&CsvlatexOptions::default()).unwrap();
        assert_eq!(config.delimiter().as_str(), ",");
        assert!(config.has_header());
        assert!(!config.no_indent());
        assert_eq!(config.table_spec(), "l");
        assert!(!config.is_full_spec());
        assert_eq!(config.environment(), "tabular");
        assert_eq!(config.custom_environment(), None);
        assert_eq!(config.position(), None);
        assert!(config.cite_columns().is_empty());
        assert!(!config.math_mode());
        assert!(!config.data_only());
    }

    #[rstest]
    #[case(None, false, "l")]
    #[case(None, true, "X")]
    #[case(Some("c"), false, "c")]
    #[case(Some("c"), true, "c")]
    #[case(Some(""), false, "l")]
    #[case(Some("|l|r|"), false, "|l|r|")]
    fn test_table_spec(
        #[case] table_spec: Option<&str>,
        #[case] multiline: bool,
        #[case] expected: &str,
    ) {
        let options = CsvlatexOptions {
            table_spec: table_spec.map(|s| s.to_owned()),
            multiline,
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(config.table_spec(), expected);
    }

    #[rstest]
    #[case(None, false, "tabular")]
    #[case(None, true, "tabularx")]
    #[case(Some("tabulary"), false, "tabulary")]
    #[case(Some("tabulary"), true, "tabulary")]
    fn test_environment(
        #[case] environment: Option<&str>,
        #[case] tabularx: bool,
        #[case] expected: &str,
    ) {
        let options = CsvlatexOptions {
            environment: environment.map(|s| s.to_owned()),
            tabularx,
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(config.environment(), expected);
    }

    #[rstest]
    #[case("", None)]
    #[case("h", Some("[h]"))]
    #[case("H!", Some("[H!]"))]
    #[case("[htbp]", Some("[htbp]"))]
    #[case("[h", Some("[[h]"))]
    fn test_position(#[case] position: &str, #[case] expected: Option<&str>) {
        let options = CsvlatexOptions {
            position: Some(position.to_owned()),
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(config.position(), expected);
    }

    #[test]
    fn test_tab_overrides_delimiter() {
        let options = CsvlatexOptions {
            delimiter: Some(";".to_owned()),
            tab_separated: true,
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(config.delimiter().as_str(), "\t");
    }

    #[test]
    fn test_cite_columns_deduplicated() {
        let options = CsvlatexOptions {
            cite_columns: vec![3, 1, 3],
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(
            config.cite_columns().iter().copied().collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_custom_environment() {
        let options = CsvlatexOptions {
            custom: Some("longtable".to_owned()),
            ..Default::default()
        };
        let config = TableConfig::resolve(&options).unwrap();
        assert_eq!(config.custom_environment(), Some("longtable"));
    }
}
