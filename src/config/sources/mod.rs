//! Configuration sources outside the workspace: the global file and the
//! environment. Workspace files are layered in between by the loader.

pub mod environment;
pub mod global_file;
