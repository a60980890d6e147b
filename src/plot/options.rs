//! Options of the vector tree renderer.

use crate::error::{DrawError, Result};
use crate::model::{Clade, CladeIndex};
use crate::plot::canvas::{PlotOption, Projection};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Default angular span of circular trees in degrees, leaving a small gap.
pub const DEFAULT_CIRCULAR_SPAN: f64 = 355.0;

/// Default base line width of branches.
pub const DEFAULT_LINE_WIDTH: f64 = 1.5;

/// Label color used when no other is given.
pub const DEFAULT_LABEL_COLOR: &str = "black";

/// Produces an optional text for a clade.
pub type CladeLabelFn = Box<dyn Fn(&Clade) -> Option<String>>;

/// Produces a color for a tip label.
pub type LabelColorFn = Box<dyn Fn(&str) -> String>;

// =#========================================================================#=
// ORIENTATION
// =#========================================================================#=
/// Side on which the root of a vertically drawn tree sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalDirection {
    /// Root on the left, tips grow to the right
    #[default]
    Right,
    /// Root on the right, tips grow to the left
    Left,
}

/// Side towards which a horizontally drawn tree grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalDirection {
    /// Root at the bottom
    Up,
    /// Root at the top
    #[default]
    Down,
}

impl FromStr for VerticalDirection {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "right" => Ok(VerticalDirection::Right),
            "left" => Ok(VerticalDirection::Left),
            _ => Err(DrawError::InvalidDirection {
                orientation: "vertical".to_string(),
                direction: s.to_string(),
                expected: "'right' or 'left'",
            }),
        }
    }
}

impl FromStr for HorizontalDirection {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(HorizontalDirection::Up),
            "down" => Ok(HorizontalDirection::Down),
            _ => Err(DrawError::InvalidDirection {
                orientation: "horizontal".to_string(),
                direction: s.to_string(),
                expected: "'up' or 'down'",
            }),
        }
    }
}

/// How the tree is laid out on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Depth along the x-axis, tips stacked vertically
    Vertical(VerticalDirection),
    /// Depth along the y-axis, tips side by side
    Horizontal(HorizontalDirection),
    /// Depth as radius, tips spread over `span` degrees
    Circular { span: f64 },
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Vertical(VerticalDirection::Right)
    }
}

impl Orientation {
    /// Parses an orientation from its name and the direction flags.
    ///
    /// Only the direction belonging to the chosen orientation is read;
    /// `circular_span` only matters for `"circular"`.
    ///
    /// # Errors
    /// * [DrawError::InvalidOrientation] for names other than `vertical`,
    ///   `horizontal` and `circular`
    /// * [DrawError::InvalidDirection] for a direction not fitting the orientation
    /// * [DrawError::InvalidCircularSpan] for a span outside `(0, 360]`
    ///
    /// # Example
    /// ```
    /// use phylodraw::plot::{HorizontalDirection, Orientation};
    ///
    /// let orientation = Orientation::parse("horizontal", "right", "down", 355.0).unwrap();
    /// assert_eq!(orientation, Orientation::Horizontal(HorizontalDirection::Down));
    ///
    /// assert!(Orientation::parse("diagonal", "right", "up", 355.0).is_err());
    /// assert!(Orientation::parse("vertical", "up", "up", 355.0).is_err());
    /// ```
    pub fn parse(
        orient_tree: &str,
        vertical_direction: &str,
        horizontal_direction: &str,
        circular_span: f64,
    ) -> Result<Self> {
        let orientation = match orient_tree {
            "vertical" => Orientation::Vertical(vertical_direction.parse()?),
            "horizontal" => Orientation::Horizontal(horizontal_direction.parse()?),
            "circular" => Orientation::Circular {
                span: circular_span,
            },
            other => return Err(DrawError::InvalidOrientation(other.to_string())),
        };
        orientation.validate()?;
        Ok(orientation)
    }

    /// Returns a circular orientation with the default span.
    pub fn circular() -> Self {
        Orientation::Circular {
            span: DEFAULT_CIRCULAR_SPAN,
        }
    }

    /// Checks the angular span of circular orientations.
    pub fn validate(&self) -> Result<()> {
        if let Orientation::Circular { span } = *self {
            if !(span > 0.0 && span <= 360.0) {
                return Err(DrawError::InvalidCircularSpan(span));
            }
        }
        Ok(())
    }

    /// Returns the projection a drawing surface needs for this orientation.
    pub fn projection(&self) -> Projection {
        match self {
            Orientation::Circular { .. } => Projection::Polar,
            _ => Projection::Cartesian,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical(VerticalDirection::Right) => write!(f, "vertical (right)"),
            Orientation::Vertical(VerticalDirection::Left) => write!(f, "vertical (left)"),
            Orientation::Horizontal(HorizontalDirection::Up) => write!(f, "horizontal (up)"),
            Orientation::Horizontal(HorizontalDirection::Down) => write!(f, "horizontal (down)"),
            Orientation::Circular { span } => write!(f, "circular ({span} degrees)"),
        }
    }
}

// =#========================================================================#=
// LABEL SOURCES
// =#========================================================================#=
/// Source of the text drawn next to each branch.
#[derive(Default)]
pub enum BranchLabels {
    /// Confidence values, if shown (see [DrawOptions::show_confidence])
    #[default]
    Confidence,
    /// No branch labels at all
    Hidden,
    /// Fixed labels per clade
    Map(HashMap<CladeIndex, String>),
    /// Computed labels
    Func(CladeLabelFn),
}

impl fmt::Debug for BranchLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchLabels::Confidence => write!(f, "Confidence"),
            BranchLabels::Hidden => write!(f, "Hidden"),
            BranchLabels::Map(map) => f.debug_tuple("Map").field(map).finish(),
            BranchLabels::Func(_) => write!(f, "Func(..)"),
        }
    }
}

/// Source of the colors of tip labels.
#[derive(Default)]
pub enum LabelColors {
    /// Everything black
    #[default]
    Default,
    /// Colors per label text; missing labels are black
    Map(HashMap<String, String>),
    /// Computed colors per label text
    Func(LabelColorFn),
}

impl LabelColors {
    /// Returns the color of a label.
    pub fn color_of(&self, label: &str) -> String {
        match self {
            LabelColors::Default => DEFAULT_LABEL_COLOR.to_string(),
            LabelColors::Map(map) => map
                .get(label)
                .cloned()
                .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            LabelColors::Func(func) => func(label),
        }
    }
}

impl fmt::Debug for LabelColors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelColors::Default => write!(f, "Default"),
            LabelColors::Map(map) => f.debug_tuple("Map").field(map).finish(),
            LabelColors::Func(_) => write!(f, "Func(..)"),
        }
    }
}

/// Formats a confidence value; integral values print without decimals.
///
/// # Example
/// ```
/// use phylodraw::plot::format_confidence;
///
/// assert_eq!(format_confidence(95.0), "95");
/// assert_eq!(format_confidence(0.87), "0.87");
/// ```
pub fn format_confidence(confidence: f64) -> String {
    if confidence.is_finite() && confidence.fract() == 0.0 {
        format!("{}", confidence as i64)
    } else {
        format!("{}", confidence)
    }
}

// =#========================================================================#=
// DRAW OPTIONS
// =#========================================================================#=
/// All options of [draw](crate::plot::draw) and [draw_on](crate::plot::draw_on).
///
/// # Example
/// ```
/// use phylodraw::plot::{DrawOptions, Orientation};
/// use serde_json::json;
///
/// let options = DrawOptions::new()
///     .with_orientation(Orientation::circular())
///     .with_align_labels(true)
///     .with_do_show(false)
///     .with_option("axvline", json!({"x": 0}));
/// assert!(options.validate().is_ok());
/// ```
pub struct DrawOptions {
    /// Text drawn next to a clade; defaults to its name
    pub label_func: CladeLabelFn,
    /// Whether [BranchLabels::Confidence] draws anything
    pub show_confidence: bool,
    /// Source of the text drawn at the middle of each branch
    pub branch_labels: BranchLabels,
    /// Source of tip label colors
    pub label_colors: LabelColors,
    /// Layout of the drawing, also fixing the canvas projection
    pub orientation: Orientation,
    /// Whether clade labels are drawn at all
    pub draw_labels: bool,
    /// Whether tip labels share one column, reached by dash-dot leaders
    pub align_labels: bool,
    /// Whether [Canvas::show](crate::plot::Canvas::show) is called at the end
    pub do_show: bool,
    /// Base line width; clade widths scale it
    pub line_width: f64,
    /// Options forwarded to the drawing surface, in order
    pub passthrough: Vec<(String, Value)>,
}

impl Default for DrawOptions {
    fn default() -> Self {
        DrawOptions {
            label_func: Box::new(|clade: &Clade| clade.name().map(str::to_string)),
            show_confidence: true,
            branch_labels: BranchLabels::default(),
            label_colors: LabelColors::default(),
            orientation: Orientation::default(),
            draw_labels: true,
            align_labels: false,
            do_show: true,
            line_width: DEFAULT_LINE_WIDTH,
            passthrough: Vec::new(),
        }
    }
}

impl fmt::Debug for DrawOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawOptions")
            .field("show_confidence", &self.show_confidence)
            .field("branch_labels", &self.branch_labels)
            .field("label_colors", &self.label_colors)
            .field("orientation", &self.orientation)
            .field("draw_labels", &self.draw_labels)
            .field("align_labels", &self.align_labels)
            .field("do_show", &self.do_show)
            .field("line_width", &self.line_width)
            .field("passthrough", &self.passthrough)
            .finish_non_exhaustive()
    }
}

impl DrawOptions {
    /// Creates options with the defaults: vertical tree growing right,
    /// confidences shown, labels drawn but not aligned, canvas shown at the end.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function producing a clade's label; returning `None` draws none.
    ///
    /// # Example
    /// ```
    /// use phylodraw::plot::DrawOptions;
    ///
    /// let options = DrawOptions::new()
    ///     .with_label_func(|clade| clade.name().map(str::to_uppercase));
    /// # let _ = options;
    /// ```
    pub fn with_label_func<F>(mut self, label_func: F) -> Self
    where
        F: Fn(&Clade) -> Option<String> + 'static,
    {
        self.label_func = Box::new(label_func);
        self
    }

    /// Sets whether confidences are drawn as branch labels.
    pub fn with_show_confidence(mut self, show_confidence: bool) -> Self {
        self.show_confidence = show_confidence;
        self
    }

    /// Sets the source of branch labels, see [BranchLabels].
    pub fn with_branch_labels(mut self, branch_labels: BranchLabels) -> Self {
        self.branch_labels = branch_labels;
        self
    }

    /// Sets the source of tip label colors, see [LabelColors].
    pub fn with_label_colors(mut self, label_colors: LabelColors) -> Self {
        self.label_colors = label_colors;
        self
    }

    /// Sets the orientation.
    ///
    /// # Arguments
    /// * `orientation` - Vertical, horizontal or circular layout; checked by [Self::validate]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets whether any labels are drawn, tip and branch labels alike.
    pub fn with_draw_labels(mut self, draw_labels: bool) -> Self {
        self.draw_labels = draw_labels;
        self
    }

    /// Sets whether tip labels are moved into one common column.
    pub fn with_align_labels(mut self, align_labels: bool) -> Self {
        self.align_labels = align_labels;
        self
    }

    /// Sets whether the canvas is shown after drawing.
    pub fn with_do_show(mut self, do_show: bool) -> Self {
        self.do_show = do_show;
        self
    }

    /// Sets the base line width, scaled by each clade's own width.
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    /// Appends an option forwarded to the drawing surface.
    pub fn with_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.passthrough.push((name.into(), value));
        self
    }

    /// Validates orientation and passthrough options.
    pub fn validate(&self) -> Result<()> {
        self.orientation.validate()?;
        self.plot_options().map(|_| ())
    }

    /// Converts the passthrough values into [PlotOption]s.
    pub fn plot_options(&self) -> Result<Vec<PlotOption>> {
        self.passthrough
            .iter()
            .map(|(name, value)| PlotOption::from_value(name, value))
            .collect()
    }

    /// Returns the branch label of a clade, if any.
    pub fn branch_label(&self, clade: &Clade) -> Option<String> {
        match &self.branch_labels {
            BranchLabels::Hidden => None,
            BranchLabels::Map(map) => map.get(&clade.index()).cloned(),
            BranchLabels::Func(func) => func(clade),
            BranchLabels::Confidence if !self.show_confidence => None,
            BranchLabels::Confidence => {
                if let Some(confidences) = clade.confidences() {
                    let joined = confidences
                        .iter()
                        .map(|&c| format_confidence(c))
                        .collect::<Vec<_>>()
                        .join("/");
                    (!joined.is_empty()).then_some(joined)
                } else {
                    clade.confidence().map(format_confidence)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tree;

    #[test]
    fn test_circular_span_bounds() {
        assert!(Orientation::parse("circular", "right", "up", 360.0).is_ok());
        assert!(matches!(
            Orientation::parse("circular", "right", "up", 0.0),
            Err(DrawError::InvalidCircularSpan(_))
        ));
        assert!(matches!(
            Orientation::parse("circular", "right", "up", 400.0),
            Err(DrawError::InvalidCircularSpan(_))
        ));
    }

    #[test]
    fn test_unused_direction_is_not_checked() {
        let orientation = Orientation::parse("vertical", "left", "sideways", 355.0).unwrap();
        assert_eq!(orientation, Orientation::Vertical(VerticalDirection::Left));
    }

    #[test]
    fn test_branch_label_joins_confidences() {
        let mut tree = Tree::new();
        let a = tree.add_leaf("A", None);
        tree[a].set_confidences(Some(vec![95.0, 0.5]));
        let options = DrawOptions::new();
        assert_eq!(options.branch_label(&tree[a]).as_deref(), Some("95/0.5"));

        let hidden = DrawOptions::new().with_show_confidence(false);
        assert_eq!(hidden.branch_label(&tree[a]), None);
    }
}
