use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::{CsvlatexError, CsvlatexResult};

/// An input file that has been checked to be an existing regular file
pub struct InputFile {
    path: PathBuf,
    reader: BufReader<File>,
}

impl InputFile {
    pub fn open(maybe_filename: Option<&str>) -> CsvlatexResult<InputFile> {
        let filename = maybe_filename.unwrap_or_default();
        let path = Path::new(filename);
        if !path.is_file() {
            return Err(CsvlatexError::InvalidFile(filename.to_owned()));
        }
        let f = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CsvlatexError::InvalidFile(filename.to_owned()),
            _ => e.into(),
        })?;

        Ok(InputFile {
            path: path.to_owned(),
            reader: BufReader::new(f),
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn into_reader(self) -> BufReader<File> {
        self.reader
    }
}
