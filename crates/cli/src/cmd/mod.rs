mod dirs;
mod info;

pub use dirs::{DirKind, cmd_dirs};
pub use info::cmd_info;
