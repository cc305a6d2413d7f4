pub mod command;
pub mod deck;
pub mod keymap;
pub mod reader;
pub mod terminal;
pub mod terminal_guard;
pub mod theme;

pub use command::{command_to_app_event, parse_command, Command};
pub use keymap::reader_action;
pub use terminal::TuiManager;
pub use terminal_guard::TerminalGuard;
