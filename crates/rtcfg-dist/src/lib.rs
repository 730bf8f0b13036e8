//! Distribution packaging dispatch for the M55M1 board support package.
//!
//! Packaging copies the minimal subset of a board-support tree into an output
//! directory. The copying itself is external: [`dispatch`] only locates the
//! shared `tools` directory next to the board-support tree and hands the
//! request to an injected [`Packager`].

pub mod dispatch;
pub mod error;
pub mod script;

pub use dispatch::{dispatch, tools_dir, DistRequest, Packager, TOOLS_DIR_NAME};
pub use error::{DistError, Result};
pub use script::{ScriptPackager, DEFAULT_ENTRY_POINT, DEFAULT_INTERPRETER};
