//! Render configuration read from JSON.
//!
//! All fields are optional and fall back to the drawing defaults:
//! ```json
//! {
//!   "orient_tree": "circular",
//!   "circular_span": 300,
//!   "align_labels": true,
//!   "options": { "axvline": { "x": 0 } }
//! }
//! ```

use crate::ascii::DEFAULT_COLUMN_WIDTH;
use crate::error::Result;
use crate::plot::{DEFAULT_CIRCULAR_SPAN, DEFAULT_LINE_WIDTH, DrawOptions, Orientation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serializable subset of the drawing options.
///
/// Label functions and label color callbacks cannot be expressed in JSON;
/// set them on the [DrawOptions] returned by [RenderConfig::into_options].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// `vertical`, `horizontal` or `circular`
    pub orient_tree: String,
    /// `right` or `left`, read for vertical trees
    pub vertical_direction: String,
    /// `up` or `down`, read for horizontal trees
    pub horizontal_direction: String,
    /// Degrees, read for circular trees
    pub circular_span: f64,
    pub show_confidence: bool,
    pub draw_labels: bool,
    pub align_labels: bool,
    pub do_show: bool,
    /// Width of ASCII drawings
    pub column_width: usize,
    pub line_width: f64,
    /// Options forwarded to the drawing surface, in order of appearance
    pub options: Map<String, Value>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            orient_tree: "vertical".to_string(),
            vertical_direction: "right".to_string(),
            horizontal_direction: "down".to_string(),
            circular_span: DEFAULT_CIRCULAR_SPAN,
            show_confidence: true,
            draw_labels: true,
            align_labels: false,
            do_show: true,
            column_width: DEFAULT_COLUMN_WIDTH,
            line_width: DEFAULT_LINE_WIDTH,
            options: Map::new(),
        }
    }
}

impl RenderConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Example
    /// ```
    /// use phylodraw::config::RenderConfig;
    ///
    /// let config = RenderConfig::from_json(r#"{"orient_tree": "horizontal"}"#).unwrap();
    /// assert_eq!(config.orient_tree, "horizontal");
    /// assert_eq!(config.column_width, 80);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading render configuration");
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Returns the orientation described by this configuration.
    pub fn orientation(&self) -> Result<Orientation> {
        Orientation::parse(
            &self.orient_tree,
            &self.vertical_direction,
            &self.horizontal_direction,
            self.circular_span,
        )
    }

    /// Validates this configuration and converts it into [DrawOptions].
    ///
    /// # Errors
    /// Orientation, direction, span and passthrough errors, see
    /// [Orientation::parse] and [DrawOptions::validate].
    pub fn into_options(self) -> Result<DrawOptions> {
        let orientation = self.orientation()?;
        let options = DrawOptions {
            show_confidence: self.show_confidence,
            orientation,
            draw_labels: self.draw_labels,
            align_labels: self.align_labels,
            do_show: self.do_show,
            line_width: self.line_width,
            passthrough: self.options.into_iter().collect(),
            ..DrawOptions::default()
        };
        options.validate()?;
        Ok(options)
    }
}
