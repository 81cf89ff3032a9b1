mod config;
mod delimiter;
mod emitter;
mod errors;
mod io;
mod row;
mod runner;

pub use config::TableConfig;
pub use delimiter::Delimiter;
pub use emitter::TableEmitter;
pub use errors::{CsvlatexError, CsvlatexResult};
pub use runner::{
    CsvlatexOptions, run_csvlatex, run_csvlatex_with_options, run_csvlatex_with_writer,
};
