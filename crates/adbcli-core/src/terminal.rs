use std::io;

/// Line-oriented interaction with the user.
///
/// Implementations report a user interrupt as
/// [`io::ErrorKind::Interrupted`] and closed input as
/// [`io::ErrorKind::UnexpectedEof`].
pub trait Terminal {
    /// Print a block of text followed by a newline.
    fn show(&mut self, text: &str) -> io::Result<()>;

    /// Read one line; empty input yields `default` when one is given.
    fn ask(&mut self, label: &str, default: Option<&str>) -> io::Result<String>;

    /// Yes/no question.
    fn confirm(&mut self, label: &str) -> io::Result<bool>;

    /// Wait for Enter.
    fn pause(&mut self, label: &str) -> io::Result<()>;

    fn clear(&mut self) -> io::Result<()>;
}
