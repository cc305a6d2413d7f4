/// Which screen the application is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Command deck: load a file, paste, or reopen history.
    Command,
    /// A reading session is active.
    Reading,
    Quit,
}
