//! Built-in SVG drawing surface.
//!
//! Primitives are recorded in data coordinates and only mapped to pixels
//! when the document is rendered, so axis limits may be set after drawing.

use crate::error::{DrawError, Result};
use crate::plot::canvas::{
    Canvas, FontSize, HAlign, LineStyle, PlotOption, Projection, Stroke, TextStyle, VAlign,
};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_WIDTH: f64 = 640.0;
const DEFAULT_HEIGHT: f64 = 480.0;

// Margins of the plot area in pixels: left, right, top, bottom
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
enum Element {
    Path {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
    },
    Text {
        at: (f64, f64),
        text: String,
        style: TextStyle,
    },
    /// Horizontal line at `y` spanning the axes fractions `from..to`
    HLine {
        y: f64,
        from: f64,
        to: f64,
        color: String,
    },
    /// Vertical line at `x` spanning the axes fractions `from..to`
    VLine {
        x: f64,
        from: f64,
        to: f64,
        color: String,
    },
    HSpan {
        low: f64,
        high: f64,
        fill: String,
    },
    VSpan {
        low: f64,
        high: f64,
        fill: String,
    },
}

/// SVG drawing surface with Cartesian or polar axes.
///
/// # Example
/// ```
/// use phylodraw::plot::{Canvas, Projection, Stroke, SvgCanvas};
///
/// let mut canvas = SvgCanvas::new(Projection::Cartesian);
/// canvas.line((0.0, 0.0), (1.0, 1.0), &Stroke::solid("black", 1.5));
/// assert!(canvas.to_svg().contains("<path"));
/// ```
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    projection: Projection,
    width: f64,
    height: f64,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    elements: Vec<Element>,
    output: Option<PathBuf>,
}

impl SvgCanvas {
    /// Creates an empty 640x480 pixel surface.
    pub fn new(projection: Projection) -> Self {
        SvgCanvas {
            projection,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            xlim: None,
            ylim: None,
            title: None,
            xlabel: None,
            ylabel: None,
            elements: Vec::new(),
            output: None,
        }
    }

    /// Sets the size of the document in pixels.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the file [show](Canvas::show) writes the document to.
    pub fn with_output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Returns the current x limits, if set.
    pub fn xlim(&self) -> Option<(f64, f64)> {
        self.xlim
    }

    /// Returns the current y limits (radial limits when polar), if set.
    pub fn ylim(&self) -> Option<(f64, f64)> {
        self.ylim
    }

    /// Returns the title, if set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the number of recorded primitives.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Writes the SVG document to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_svg())?;
        Ok(())
    }

    /// Renders the SVG document.
    pub fn to_svg(&self) -> String {
        let frame = Frame::new(self);
        let mut out = String::with_capacity(256 + 96 * self.elements.len());

        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt(self.width),
            h = fmt(self.height)
        );
        out.push('\n');
        let _ = writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="white"/>"#
        );

        for element in &self.elements {
            frame.render(element, &mut out);
        }

        frame.render_decorations(self, &mut out);
        out.push_str("</svg>\n");
        out
    }

    fn push(&mut self, element: Element) {
        self.elements.push(element);
    }
}

impl Canvas for SvgCanvas {
    fn projection(&self) -> Projection {
        self.projection
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        self.push(Element::Path {
            points: vec![from, to],
            stroke: stroke.clone(),
        });
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.push(Element::Path {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, at: (f64, f64), text: &str, style: &TextStyle) {
        self.push(Element::Text {
            at,
            text: text.to_string(),
            style: style.clone(),
        });
    }

    fn set_xlim(&mut self, left: f64, right: f64) {
        self.xlim = Some((left, right));
    }

    fn set_ylim(&mut self, bottom: f64, top: f64) {
        self.ylim = Some((bottom, top));
    }

    fn set_xlabel(&mut self, label: &str) {
        self.xlabel = Some(label.to_string());
    }

    fn set_ylabel(&mut self, label: &str) {
        self.ylabel = Some(label.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    /// Supports `axhline`, `axvline`, `axhspan` and `axvspan` on Cartesian surfaces.
    fn apply_option(&mut self, option: &PlotOption) -> Result<()> {
        if self.projection == Projection::Polar {
            return Err(DrawError::UnsupportedOption(option.name.clone()));
        }

        let color = option.string("color").unwrap_or("black").to_string();
        let fill = option
            .string("facecolor")
            .or_else(|| option.string("color"))
            .map(fill_color)
            .unwrap_or_else(|| "#1f77b4".to_string());

        let element = match option.name.as_str() {
            "axhline" => Element::HLine {
                y: option.number(0, "y").unwrap_or(0.0),
                from: option.number(1, "xmin").unwrap_or(0.0),
                to: option.number(2, "xmax").unwrap_or(1.0),
                color,
            },
            "axvline" => Element::VLine {
                x: option.number(0, "x").unwrap_or(0.0),
                from: option.number(1, "ymin").unwrap_or(0.0),
                to: option.number(2, "ymax").unwrap_or(1.0),
                color,
            },
            "axhspan" => Element::HSpan {
                low: option.number(0, "ymin").ok_or_else(|| option.invalid())?,
                high: option.number(1, "ymax").ok_or_else(|| option.invalid())?,
                fill,
            },
            "axvspan" => Element::VSpan {
                low: option.number(0, "xmin").ok_or_else(|| option.invalid())?,
                high: option.number(1, "xmax").ok_or_else(|| option.invalid())?,
                fill,
            },
            _ => return Err(DrawError::UnsupportedOption(option.name.clone())),
        };

        self.push(element);
        Ok(())
    }

    /// Writes the document to the output file, if one was configured.
    fn show(&mut self) -> Result<()> {
        if let Some(path) = &self.output {
            debug!(path = %path.display(), "writing svg");
            self.save(path)?;
        }
        Ok(())
    }
}

// =#========================================================================#=
// DATA TO PIXEL MAPPING
// =#========================================================================#=
/// Resolved limits and plot area of a surface.
struct Frame {
    projection: Projection,
    xlim: (f64, f64),
    ylim: (f64, f64),
    left: f64,
    top: f64,
    plot_width: f64,
    plot_height: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(canvas: &SvgCanvas) -> Self {
        let (xs, ys) = canvas.data_extent();
        let ylim = match canvas.projection {
            // The radial axis always starts at the center
            Projection::Polar => canvas
                .ylim
                .unwrap_or((0.0, ys.1.max(0.0))),
            Projection::Cartesian => canvas.ylim.unwrap_or(ys),
        };
        Frame {
            projection: canvas.projection,
            xlim: non_degenerate(canvas.xlim.unwrap_or(xs)),
            ylim: non_degenerate(ylim),
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            plot_width: (canvas.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            plot_height: (canvas.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            width: canvas.width,
            height: canvas.height,
        }
    }

    /// Maps a data point to pixels.
    fn map(&self, (a, b): (f64, f64)) -> (f64, f64) {
        match self.projection {
            Projection::Cartesian => (self.map_x(a), self.map_y(b)),
            Projection::Polar => {
                let (cx, cy) = self.center();
                let radius = self.plot_width.min(self.plot_height) / 2.0;
                let r = (b - self.ylim.0) / (self.ylim.1 - self.ylim.0) * radius;
                (cx + r * a.cos(), cy - r * a.sin())
            }
        }
    }

    fn map_x(&self, x: f64) -> f64 {
        self.left + (x - self.xlim.0) / (self.xlim.1 - self.xlim.0) * self.plot_width
    }

    fn map_y(&self, y: f64) -> f64 {
        self.top + (self.ylim.1 - y) / (self.ylim.1 - self.ylim.0) * self.plot_height
    }

    fn center(&self) -> (f64, f64) {
        (
            self.left + self.plot_width / 2.0,
            self.top + self.plot_height / 2.0,
        )
    }

    fn render(&self, element: &Element, out: &mut String) {
        match element {
            Element::Path { points, stroke } => {
                out.push_str("<path d=\"");
                for (i, &point) in points.iter().enumerate() {
                    let (x, y) = self.map(point);
                    let _ = write!(out, "{}{},{}", if i == 0 { "M" } else { " L" }, fmt(x), fmt(y));
                }
                let _ = write!(
                    out,
                    r#"" fill="none" stroke="{}" stroke-width="{}""#,
                    escape_xml(&stroke.color),
                    fmt(stroke.width)
                );
                if stroke.style == LineStyle::DashDot {
                    out.push_str(r#" stroke-dasharray="6,3,1,3""#);
                }
                out.push_str("/>\n");
            }
            Element::Text { at, text, style } => {
                let (x, y) = self.map(*at);
                let anchor = match style.h_align {
                    HAlign::Left => "start",
                    HAlign::Center => "middle",
                    HAlign::Right => "end",
                };
                let baseline = match style.v_align {
                    VAlign::Top => "hanging",
                    VAlign::Center => "central",
                    VAlign::Bottom => "alphabetic",
                };
                let size = match style.size {
                    FontSize::Normal => 12,
                    FontSize::Small => 10,
                };
                let _ = write!(
                    out,
                    r#"<text x="{x}" y="{y}" fill="{color}" font-size="{size}" text-anchor="{anchor}" dominant-baseline="{baseline}" xml:space="preserve""#,
                    x = fmt(x),
                    y = fmt(y),
                    color = escape_xml(&style.color),
                );
                if style.rotation != 0.0 {
                    // SVG rotates clockwise
                    let _ = write!(
                        out,
                        r#" transform="rotate({} {} {})""#,
                        fmt(-style.rotation),
                        fmt(x),
                        fmt(y)
                    );
                }
                let _ = writeln!(out, ">{}</text>", escape_xml(text));
            }
            Element::HLine { y, from, to, color } => {
                let py = self.map_y(*y);
                let x0 = self.left + from * self.plot_width;
                let x1 = self.left + to * self.plot_width;
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                    fmt(x0),
                    fmt(py),
                    fmt(x1),
                    fmt(py),
                    escape_xml(color)
                );
            }
            Element::VLine { x, from, to, color } => {
                let px = self.map_x(*x);
                let y0 = self.top + (1.0 - from) * self.plot_height;
                let y1 = self.top + (1.0 - to) * self.plot_height;
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                    fmt(px),
                    fmt(y0),
                    fmt(px),
                    fmt(y1),
                    escape_xml(color)
                );
            }
            Element::HSpan { low, high, fill } => {
                let (a, b) = (self.map_y(*low), self.map_y(*high));
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="0.5"/>"#,
                    fmt(self.left),
                    fmt(a.min(b)),
                    fmt(self.plot_width),
                    fmt((a - b).abs()),
                    escape_xml(fill)
                );
            }
            Element::VSpan { low, high, fill } => {
                let (a, b) = (self.map_x(*low), self.map_x(*high));
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="0.5"/>"#,
                    fmt(a.min(b)),
                    fmt(self.top),
                    fmt((a - b).abs()),
                    fmt(self.plot_height),
                    escape_xml(fill)
                );
            }
        }
    }

    /// Frame, axis labels and title.
    fn render_decorations(&self, canvas: &SvgCanvas, out: &mut String) {
        match self.projection {
            Projection::Cartesian => {
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black"/>"#,
                    fmt(self.left),
                    fmt(self.top),
                    fmt(self.plot_width),
                    fmt(self.plot_height)
                );
            }
            Projection::Polar => {
                let (cx, cy) = self.center();
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="black"/>"#,
                    fmt(cx),
                    fmt(cy),
                    fmt(self.plot_width.min(self.plot_height) / 2.0)
                );
            }
        }

        if let Some(label) = &canvas.xlabel {
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
                fmt(self.left + self.plot_width / 2.0),
                fmt(self.height - MARGIN_BOTTOM / 3.0),
                escape_xml(label)
            );
        }
        if let Some(label) = &canvas.ylabel {
            let (x, y) = (MARGIN_LEFT / 3.0, self.top + self.plot_height / 2.0);
            let _ = writeln!(
                out,
                r#"<text x="{x}" y="{y}" font-size="12" text-anchor="middle" transform="rotate(-90 {x} {y})">{}</text>"#,
                escape_xml(label),
                x = fmt(x),
                y = fmt(y),
            );
        }
        if let Some(title) = &canvas.title {
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">{}</text>"#,
                fmt(self.width / 2.0),
                fmt(MARGIN_TOP / 2.0),
                escape_xml(title)
            );
        }
    }
}

impl SvgCanvas {
    /// Returns the x and y ranges covered by recorded points.
    fn data_extent(&self) -> ((f64, f64), (f64, f64)) {
        let mut xs = (f64::INFINITY, f64::NEG_INFINITY);
        let mut ys = (f64::INFINITY, f64::NEG_INFINITY);
        let mut include = |(x, y): (f64, f64)| {
            xs = (xs.0.min(x), xs.1.max(x));
            ys = (ys.0.min(y), ys.1.max(y));
        };

        for element in &self.elements {
            match element {
                Element::Path { points, .. } => points.iter().copied().for_each(&mut include),
                Element::Text { at, .. } => include(*at),
                _ => {}
            }
        }

        if xs.0 > xs.1 {
            return ((0.0, 1.0), (0.0, 1.0));
        }
        (xs, ys)
    }
}

/// Widens an empty range around its value.
fn non_degenerate((low, high): (f64, f64)) -> (f64, f64) {
    if (high - low).abs() < f64::EPSILON {
        (low - 0.5, high + 0.5)
    } else {
        (low, high)
    }
}

/// Grey levels may be given as numbers in `[0, 1]`, e.g. `"0.5"`.
fn fill_color(color: &str) -> String {
    match color.parse::<f64>() {
        Ok(level) if (0.0..=1.0).contains(&level) => {
            let v = (level * 255.0).round() as u8;
            format!("#{v:02x}{v:02x}{v:02x}")
        }
        _ => color.to_string(),
    }
}

/// Formats a pixel value with at most three decimals, avoiding `-0`.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_trims_noise() {
        assert_eq!(fmt(-0.0000001), "0");
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(1.23456), "1.235");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & <B>"), "A &amp; &lt;B&gt;");
    }

    #[test]
    fn test_fill_color_grey_level() {
        assert_eq!(fill_color("0.5"), "#808080");
        assert_eq!(fill_color("red"), "red");
    }

    #[test]
    fn test_inverted_y_axis_maps_low_values_to_top() {
        let mut canvas = SvgCanvas::new(Projection::Cartesian);
        canvas.set_xlim(0.0, 1.0);
        canvas.set_ylim(4.0, 0.0);
        let frame = Frame::new(&canvas);
        assert!(frame.map((0.0, 1.0)).1 < frame.map((0.0, 3.0)).1);
    }

    #[test]
    fn test_polar_origin_is_center() {
        let mut canvas = SvgCanvas::new(Projection::Polar);
        canvas.set_ylim(0.0, 2.0);
        let frame = Frame::new(&canvas);
        assert_eq!(frame.map((1.0, 0.0)), frame.center());
    }
}
