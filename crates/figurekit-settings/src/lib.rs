//! figurekit Settings Crate
//!
//! Editor configuration: undo history depth, edit coalescing, hit-test
//! tolerance and curve sampling.

pub mod config;
pub mod error;

pub use config::{EditorSettings, GeometrySettings, HistorySettings, HitTestSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
