use crate::ports::record_store::{LineIter, RecordStore as RecordStoreTrait, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// In-memory implementation of RecordStore
///
/// Holds the lines in a vector. Writes can be switched to fail so callers
/// can observe what happens when persisting goes wrong.
pub struct RecordStore {
    name: String,
    lines: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
}

impl RecordStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Store pre-seeded with `lines`, as if read from an existing file
    pub fn with_lines<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new(name);
        *store.lines.lock().unwrap_or_else(PoisonError::into_inner) =
            lines.into_iter().map(Into::into).collect();
        store
    }

    /// Snapshot of the stored lines
    pub fn contents(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(format!("simulated write failure on {}", self.name).into());
        }
        Ok(())
    }
}

impl RecordStoreTrait for RecordStore {
    fn location(&self) -> String {
        self.name.clone()
    }

    fn lines(&self) -> Result<LineIter<'_>> {
        Ok(Box::new(self.contents().into_iter().map(Ok)))
    }

    fn replace_all(&self, lines: &[String]) -> Result<()> {
        self.check_writable()?;
        *self.lines.lock().unwrap_or_else(PoisonError::into_inner) = lines.to_vec();
        Ok(())
    }

    fn append(&self, line: &str) -> Result<()> {
        self.check_writable()?;
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
