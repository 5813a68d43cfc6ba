//! # figurekit
//!
//! Editing core for structured vector drawings:
//! - Figures with typed attributes, grouped into composites
//! - Bezier paths with node splitting, joining and hit testing
//! - A transform engine that keeps transforms symbolic until flattened
//! - Undoable edits and an edit log with coalescing and gesture grouping
//!
//! ## Architecture
//!
//! figurekit is organized as a workspace with multiple crates:
//!
//! 1. **figurekit-core** - Figure ids, geometry aliases, error taxonomy
//! 2. **figurekit-settings** - Editor configuration files (TOML/JSON)
//! 3. **figurekit-figures** - Attributes, figures, drawing, edits, editor
//! 4. **figurekit** - This crate; re-exports and process-level setup

use std::path::Path;

use anyhow::Context;

pub use figurekit_core::{
    point, rect, vector, Angle, EditError, Error, FigureError, FigureId, PathError, Point, Rect,
    Result, Transform, Vector,
};

pub use figurekit_settings::{
    ConfigError, EditorSettings, GeometrySettings, HistorySettings, HitTestSettings,
    SettingsError,
};

pub use figurekit_figures::{
    keys, Attribute, AttributeChange, AttributeKey, AttributeRestoreData, AttributeStore,
    AttributeValue, BezierPath, Color, CompositeEdit, Direction, Drawing, DrawingEditor, EditLog,
    EllipseShape, FigureEvent, FigureListener, FigureShape, Geometry, Gradient, GradientKind,
    GradientStop, HitTest, ListenerHandle, Node, NodeMask, RectangleShape, Segment, SegmentKind,
    TextShape, TransformEdit, TransformRestoreData, UndoableEdit,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(())
}

/// Create an editor configured from the settings file at `path`.
///
/// A missing file yields default settings; an unreadable or invalid one is
/// an error.
pub fn open_editor(path: &Path) -> anyhow::Result<DrawingEditor> {
    let settings = EditorSettings::load_or_default(path)
        .with_context(|| format!("loading editor settings from {}", path.display()))?;
    tracing::info!(
        "figurekit {} (built {}): undo limit {}, tolerance {}",
        VERSION,
        BUILD_DATE,
        settings.history.undo_limit,
        settings.hit_testing.tolerance
    );
    Ok(DrawingEditor::with_settings(settings))
}
