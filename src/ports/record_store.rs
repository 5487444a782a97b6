pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Boxed iterator over stored lines.
pub type LineIter<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Line-oriented record storage port
///
/// Each component owns one store and keeps it in step with its in-memory
/// collection. A store that has never been written reads as empty.
pub trait RecordStore: Send + Sync {
    /// Human-readable location, used in error messages and logs.
    fn location(&self) -> String;

    /// Streams every line in file order, without line terminators.
    fn lines(&self) -> Result<LineIter<'_>>;

    /// Replaces the whole content with `lines`.
    fn replace_all(&self, lines: &[String]) -> Result<()>;

    /// Appends a single line, keeping everything already stored.
    fn append(&self, line: &str) -> Result<()>;
}
