//! Drawing-primitive interface of plotting surfaces.
//!
//! The tree renderers only ever talk to a [Canvas]: line segments,
//! polylines, text, axis limits and decorations. Coordinates are data
//! coordinates; on a [Projection::Polar] surface a point is `(theta, r)`
//! with `theta` in radians, counter-clockwise from the positive x-axis.

use crate::error::{DrawError, Result};
use serde_json::{Map, Value};

/// Projection of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Plain x/y axes
    Cartesian,
    /// Angle/radius axes
    Polar,
}

/// Dash pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    /// Used for leaders to aligned tip labels
    DashDot,
}

/// How a line is painted.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Any color the surface understands, e.g. `black` or `#ff0000`
    pub color: String,
    /// Line width in points
    pub width: f64,
    pub style: LineStyle,
}

impl Stroke {
    /// Creates a solid stroke.
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Stroke {
            color: color.into(),
            width,
            style: LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    #[default]
    Normal,
    Small,
}

/// How a text is placed and painted.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: String,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// Counter-clockwise rotation in degrees around the anchor
    pub rotation: f64,
    pub size: FontSize,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            color: "black".to_string(),
            h_align: HAlign::Left,
            v_align: VAlign::Center,
            rotation: 0.0,
            size: FontSize::Normal,
        }
    }
}

// =#========================================================================#=
// PASSTHROUGH OPTIONS
// =#========================================================================#=
/// A named surface option with positional and keyword arguments,
/// forwarded verbatim to the drawing surface after the tree is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOption {
    pub name: String,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl PlotOption {
    /// Converts a JSON value into an option.
    ///
    /// Accepted shapes:
    /// * `[a, b, ...]` - positional arguments
    /// * `{"k": v, ...}` - keyword arguments
    /// * `[[a, b, ...], {"k": v, ...}]` - both
    ///
    /// # Errors
    /// [DrawError::InvalidPassthrough] for any other value.
    ///
    /// # Example
    /// ```
    /// use phylodraw::plot::PlotOption;
    /// use serde_json::json;
    ///
    /// let option = PlotOption::from_value("axhspan", &json!([[0.25, 7.75], {"facecolor": "0.5"}])).unwrap();
    /// assert_eq!(option.args.len(), 2);
    /// assert_eq!(option.kwargs["facecolor"], "0.5");
    ///
    /// assert!(PlotOption::from_value("axvline", &json!(3)).is_err());
    /// ```
    pub fn from_value(name: &str, value: &Value) -> Result<Self> {
        let invalid = || DrawError::InvalidPassthrough {
            name: name.to_string(),
            value: value.to_string(),
        };

        let (args, kwargs) = match value {
            Value::Object(kwargs) => (Vec::new(), kwargs.clone()),
            Value::Array(items) => match items.first() {
                Some(Value::Array(args)) => {
                    let kwargs = match items.get(1) {
                        Some(Value::Object(kwargs)) => kwargs.clone(),
                        None => Map::new(),
                        Some(_) => return Err(invalid()),
                    };
                    if items.len() > 2 {
                        return Err(invalid());
                    }
                    (args.clone(), kwargs)
                }
                _ => (items.clone(), Map::new()),
            },
            _ => return Err(invalid()),
        };

        Ok(PlotOption {
            name: name.to_string(),
            args,
            kwargs,
        })
    }

    /// Returns a numeric argument given either at `position` or as keyword `key`.
    pub fn number(&self, position: usize, key: &str) -> Option<f64> {
        self.kwargs
            .get(key)
            .or_else(|| self.args.get(position))
            .and_then(Value::as_f64)
    }

    /// Returns a string keyword argument.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.kwargs.get(key).and_then(Value::as_str)
    }

    /// Returns the error for a missing or malformed argument of this option.
    pub fn invalid(&self) -> DrawError {
        let mut value = Value::Array(self.args.clone());
        if !self.kwargs.is_empty() {
            value = Value::Array(vec![value, Value::Object(self.kwargs.clone())]);
        }
        DrawError::InvalidPassthrough {
            name: self.name.clone(),
            value: value.to_string(),
        }
    }
}

// =#========================================================================#=
// CANVAS (trait)
// =#========================================================================#=
/// A 2D drawing surface.
///
/// Implement this to draw trees with another backend; see
/// [SvgCanvas](crate::plot::SvgCanvas) for the built-in one. Renderers never
/// dispose a surface they were handed.
pub trait Canvas {
    /// Returns the projection of this surface.
    fn projection(&self) -> Projection;

    /// Draws a straight segment between two data points.
    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke);

    /// Draws connected segments through all points.
    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);

    /// Places a text anchored at a data point.
    fn text(&mut self, at: (f64, f64), text: &str, style: &TextStyle);

    /// Sets the visible x range (angle range on polar surfaces); `left > right` flips the axis.
    fn set_xlim(&mut self, left: f64, right: f64);

    /// Sets the visible y range (radius range on polar surfaces); `bottom > top` flips the axis.
    fn set_ylim(&mut self, bottom: f64, top: f64);

    fn set_xlabel(&mut self, label: &str);

    fn set_ylabel(&mut self, label: &str);

    fn set_title(&mut self, title: &str);

    /// Applies a passthrough option.
    ///
    /// # Errors
    /// [DrawError::UnsupportedOption] if the surface does not know the option,
    /// [DrawError::InvalidPassthrough] if its arguments do not fit.
    fn apply_option(&mut self, option: &PlotOption) -> Result<()>;

    /// Presents the finished drawing; does nothing by default.
    fn show(&mut self) -> Result<()> {
        Ok(())
    }
}
