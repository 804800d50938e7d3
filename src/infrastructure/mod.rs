//! Infrastructure layer for filesystem and terminal interactions.

pub mod clipboard;
pub mod paths;

pub use clipboard::{Clipboard, MemoryClipboard, Osc52Clipboard};
pub use paths::{expand_tilde, get_data_dir};
