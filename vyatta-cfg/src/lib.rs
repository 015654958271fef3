//! Command line side of the EdgeOS/VyOS configuration tooling.
//!
//! [`vyatta_cfg_core`] parses and diffs configuration trees; this crate turns
//! the resulting paths into router commands and scripts.
//!
//! - [`input`] - Load trees from configuration text or JSON
//! - [`settings`] - TOML settings file
//! - [`script`] - `set`/`delete` rendering and wrapper scripts
//! - [`report`] - Colored terminal output
//! - [`inspect`] - Tree outline
//! - [`logging`] - Diagnostic output setup

pub mod input;
pub mod inspect;
pub mod logging;
pub mod report;
pub mod script;
pub mod settings;
