//! Output renderers for `--list`.
//!
//! - [`terminal`] — colored table for humans
//! - JSON output is produced directly via `serde_json` in `main`

pub mod terminal;
