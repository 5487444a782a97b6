use crate::ports::record_store::{LineIter, RecordStore as RecordStoreTrait, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Plain-text implementation of RecordStore
///
/// One UTF-8 record per line. Full rewrites go through a temporary file in
/// the same directory that is then renamed over the target, so a failed
/// write leaves the previous content in place.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

fn boxed(err: io::Error) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(err)
}

impl RecordStoreTrait for RecordStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    /// Streams the file through a buffered reader. A missing file has no lines.
    fn lines(&self) -> Result<LineIter<'_>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Box::new(std::iter::empty()));
            }
            Err(err) => return Err(boxed(err)),
        };

        Ok(Box::new(
            BufReader::new(file)
                .lines()
                .map(|line| line.map_err(boxed)),
        ))
    }

    fn replace_all(&self, lines: &[String]) -> Result<()> {
        let mut staged = NamedTempFile::new_in(self.directory())?;
        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            for line in lines {
                writer.write_all(line.as_bytes())?;
                writer.write_all(LINE_SEPARATOR.as_bytes())?;
            }
            writer.flush()?;
        }
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| boxed(err.error))?;
        Ok(())
    }

    fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(LINE_SEPARATOR.as_bytes())?;
        Ok(())
    }
}
