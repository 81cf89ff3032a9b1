use crate::config::TableConfig;
use crate::emitter::TableEmitter;
use crate::errors::CsvlatexResult;
use crate::io::InputFile;

#[cfg(feature = "cli")]
use clap::{Parser, command};
use std::ffi::OsString;
use std::io::{BufWriter, Write};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(version, styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    /// Input filename. If several are given, the last one is used.
    files: Vec<String>,

    /// Specify the file to convert. Takes priority over the positional filename.
    #[clap(short, long, value_name = "path")]
    file: Option<String>,

    /// Do not treat the first row as the table header.
    #[clap(short = 'H', long)]
    no_header: bool,

    /// Delimiter used to split columns (comma by default). Can be longer than one character.
    #[clap(short, long, value_name = "string", allow_hyphen_values = true)]
    delimiter: Option<String>,

    /// Treat runs of consecutive delimiters as a single delimiter.
    #[clap(short = 'i', long = "ignore-multi")]
    ignore_multiple: bool,

    /// Use tab separation. Shortcut for -d '\t'.
    #[clap(short = 't', long = "tab")]
    tab_separated: bool,

    /// Do not indent the LaTeX written out.
    #[clap(short = 'n', long)]
    no_format: bool,

    /// Table spec to use for every column (such as l, c or X).
    ///
    /// A spec containing a pipe is used as the entire spec. Defaults to 'l', or 'X' with
    /// --multiline.
    #[arg(short = 'T', long, value_name = "spec")]
    table_spec: Option<String>,

    /// Table environment to use. Overrides --tabularx.
    #[arg(long, value_name = "name")]
    environment: Option<String>,

    /// Use the tabularx environment instead of the tabular environment.
    #[clap(short = 'x', long)]
    tabularx: bool,

    /// Use multiline headers with dynamic expanding.
    #[clap(short, long)]
    multiline: bool,

    /// Center the table.
    #[clap(short, long)]
    centering: bool,

    /// Float position of the table (h, H, H!), with or without brackets.
    #[arg(short, long, value_name = "position")]
    position: Option<String>,

    /// Wrap the rows in a self-contained environment such as longtable instead of table and
    /// tabular. Given without a value, longtable is used.
    #[arg(
        long,
        value_name = "environment",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "longtable"
    )]
    custom: Option<String>,

    /// Only write the rows, without wrapping them in any environment.
    #[clap(short = 'D', long)]
    data_only: bool,

    /// Comma separated, zero-based indices of columns to wrap in \cite{}.
    #[arg(short = 'C', long, value_name = "columns", value_delimiter = ',')]
    cite_columns: Vec<usize>,

    /// Wrap non-empty cells in math mode.
    #[clap(short = 'M', long)]
    math_mode: bool,

    /// Show debug logs on stderr
    #[clap(long)]
    debug: bool,
}

#[cfg(feature = "cli")]
impl From<Args> for CsvlatexOptions {
    fn from(args: Args) -> Self {
        Self {
            filename: args.files.last().cloned(),
            file: args.file,
            delimiter: args.delimiter,
            tab_separated: args.tab_separated,
            ignore_multiple: args.ignore_multiple,
            no_header: args.no_header,
            no_format: args.no_format,
            table_spec: args.table_spec,
            environment: args.environment,
            tabularx: args.tabularx,
            multiline: args.multiline,
            centering: args.centering,
            position: args.position,
            custom: args.custom,
            data_only: args.data_only,
            cite_columns: args.cite_columns,
            math_mode: args.math_mode,
        }
    }
}

// Struct for library usage without clap directives
#[derive(Debug, Default, Clone)]
pub struct CsvlatexOptions {
    pub filename: Option<String>,
    pub file: Option<String>,
    pub delimiter: Option<String>,
    pub tab_separated: bool,
    pub ignore_multiple: bool,
    pub no_header: bool,
    pub no_format: bool,
    pub table_spec: Option<String>,
    pub environment: Option<String>,
    pub tabularx: bool,
    pub multiline: bool,
    pub centering: bool,
    pub position: Option<String>,
    pub custom: Option<String>,
    pub data_only: bool,
    pub cite_columns: Vec<usize>,
    pub math_mode: bool,
}

impl CsvlatexOptions {
    /// The input path: --file if given, otherwise the positional filename
    pub fn input_filename(&self) -> Option<&str> {
        self.file
            .as_deref()
            .filter(|f| !f.is_empty())
            .or(self.filename.as_deref())
    }
}

/// Convert the input file named in `options` and write the LaTeX table to `out`.
///
/// The input path is checked before anything is written, so an invalid path leaves `out`
/// untouched.
pub fn run_csvlatex_with_writer<W: Write>(
    options: &CsvlatexOptions,
    out: W,
) -> CsvlatexResult<()> {
    let config = TableConfig::resolve(options)?;
    log::debug!("Resolved table config: {config:?}");

    let input = InputFile::open(options.input_filename())?;
    log::debug!("Reading {}", input.path().display());

    let mut emitter = TableEmitter::new(&config, out);
    let num_rows = emitter.emit(input.into_reader())?;
    log::debug!("Wrote {num_rows} rows");
    Ok(())
}

/// Run csvlatex with options provided in a `CsvlatexOptions` struct, writing to stdout.
///
/// Example:
///
/// ```
/// use csvlatex::{run_csvlatex_with_options, CsvlatexOptions};
///
/// let options = CsvlatexOptions {
///     filename: Some("/path/to/your.csv".to_string()),
///     ..Default::default()
/// };
/// if let Err(e) = run_csvlatex_with_options(options) {
///     eprintln!("Error: {:?}", e);
/// }
/// ```
pub fn run_csvlatex_with_options(options: CsvlatexOptions) -> CsvlatexResult<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_csvlatex_with_writer(&options, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run csvlatex with a list of arguments. The accepted arguments are the same as the command line
/// arguments for the csvlatex binary.
///
/// Example:
///
/// ```
/// use csvlatex::run_csvlatex;
///
/// if let Err(e) = run_csvlatex(&["--tab", "--centering", "/path/to/your.tsv"]) {
///     eprintln!("Error: {:?}", e);
/// }
/// ```
#[cfg(feature = "cli")]
pub fn run_csvlatex<I, T>(args: I) -> CsvlatexResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args_items = vec![OsString::from("csvlatex")];
    for item in args {
        args_items.push(item.into());
    }
    let args = Args::parse_from(args_items);
    init_logger(args.debug);
    run_csvlatex_with_options(args.into())
}

#[cfg(not(feature = "cli"))]
pub fn run_csvlatex<I, T>(_args: I) -> CsvlatexResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    eprintln!("Error: CLI is not enabled. Compile with the 'cli' feature to use this binary.");
    std::process::exit(1);
}

/// Log to stderr at warn level, or debug level with --debug. RUST_LOG is honoured otherwise.
#[cfg(feature = "cli")]
fn init_logger(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Warn);
    builder.parse_default_env();
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // Already initialized when called more than once in the same process
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::LINE_ENDING;
    use crate::errors::CsvlatexError;
    use tempfile::NamedTempFile;

    fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[cfg(feature = "cli")]
    fn parse(args: &[&str]) -> CsvlatexOptions {
        let mut items = vec!["csvlatex"];
        items.extend_from_slice(args);
        Args::parse_from(items).into()
    }

    #[test]
    fn test_run_with_writer() {
        let file = input_file("x,y\n1,2\n");
        let options = CsvlatexOptions {
            filename: Some(file.path().to_str().unwrap().to_owned()),
            no_format: true,
            data_only: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        run_csvlatex_with_writer(&options, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap().replace(LINE_ENDING, "\n");
        assert_eq!(out, "\\hline\nx & y \\\\ \n\\hline\n1 & 2 \\\\ \n");
    }

    #[test]
    fn test_file_option_takes_priority() {
        let file = input_file("a\n");
        let options = CsvlatexOptions {
            filename: Some("missing.csv".to_owned()),
            file: Some(file.path().to_str().unwrap().to_owned()),
            ..Default::default()
        };
        let mut out = Vec::new();
        assert!(run_csvlatex_with_writer(&options, &mut out).is_ok());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_invalid_file_writes_nothing() {
        let options = CsvlatexOptions {
            filename: Some("no/such/file.csv".to_owned()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let err = run_csvlatex_with_writer(&options, &mut out).unwrap_err();
        assert!(matches!(err, CsvlatexError::InvalidFile(_)));
        assert_eq!(
            err.to_string(),
            "no/such/file.csv is not a valid file name. The file name should be specified with the '-f' option, or be the last argument."
        );
        assert!(out.is_empty());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_args() {
        let options = parse(&[
            "-t", "-i", "-H", "-n", "-T", "c", "-x", "-m", "-c", "-p", "h", "-D", "-C", "0,2",
            "-M", "data.tsv",
        ]);
        assert_eq!(options.filename.as_deref(), Some("data.tsv"));
        assert!(options.tab_separated);
        assert!(options.ignore_multiple);
        assert!(options.no_header);
        assert!(options.no_format);
        assert_eq!(options.table_spec.as_deref(), Some("c"));
        assert!(options.tabularx);
        assert!(options.multiline);
        assert!(options.centering);
        assert_eq!(options.position.as_deref(), Some("h"));
        assert!(options.data_only);
        assert_eq!(options.cite_columns, vec![0, 2]);
        assert!(options.math_mode);
        assert_eq!(options.custom, None);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_last_positional_is_filename() {
        let options = parse(&["first.csv", "second.csv"]);
        assert_eq!(options.input_filename(), Some("second.csv"));

        let options = parse(&["-f", "given.csv", "other.csv"]);
        assert_eq!(options.input_filename(), Some("given.csv"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_custom() {
        let options = parse(&["--custom", "data.csv"]);
        assert_eq!(options.custom.as_deref(), Some("longtable"));
        assert_eq!(options.filename.as_deref(), Some("data.csv"));

        let options = parse(&["--custom=supertabular", "data.csv"]);
        assert_eq!(options.custom.as_deref(), Some("supertabular"));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_invalid_cite_columns() {
        let res = Args::try_parse_from(["csvlatex", "-C", "1,x", "data.csv"]);
        assert!(res.is_err());
    }
}
