//! Error type for drawing phylogenetic trees.
//!
//! All option validation errors are raised before the first drawing
//! primitive is issued, so a failed call leaves the drawing surface untouched.

use crate::plot::canvas::Projection;

/// Errors that can occur while configuring or rendering a tree drawing.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// Orientation other than `vertical`, `horizontal` or `circular`
    #[error("orient_tree must be one of 'horizontal', 'vertical' or 'circular', got '{0}'")]
    InvalidOrientation(String),

    /// Direction not matching the chosen orientation
    #[error("invalid direction '{direction}' for {orientation} tree (expected {expected})")]
    InvalidDirection {
        orientation: String,
        direction: String,
        expected: &'static str,
    },

    /// Angular span of a circular tree outside `(0, 360]` degrees
    #[error("circular_span must be within (0, 360] degrees, got {0}")]
    InvalidCircularSpan(f64),

    /// Drawing surface of the wrong projection for the orientation
    #[error("axes must have {expected:?} projection for this tree orientation, got {found:?}")]
    InvalidAxes {
        expected: Projection,
        found: Projection,
    },

    /// Passthrough option value that is neither an argument list nor a keyword mapping
    #[error(
        "option \"{name}={value}\" is not in the format name=[args], name={{kwargs}} or name=[[args], {{kwargs}}]"
    )]
    InvalidPassthrough { name: String, value: String },

    /// Passthrough option the drawing surface does not know
    #[error("drawing surface does not support option '{0}'")]
    UnsupportedOption(String),

    /// ASCII column width too narrow for labels plus the tree
    #[error("column width {column_width} too small, need at least {required}")]
    ColumnWidthTooSmall { column_width: usize, required: usize },

    /// Color string that is not `#rrggbb`
    #[error("invalid color '{0}', expected '#rrggbb'")]
    InvalidColor(String),

    /// Writing the drawing failed
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),

    /// Render configuration could not be read
    #[error("invalid render configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, DrawError>;
