//! Vector rendering of trees onto a [Canvas].

use crate::error::{DrawError, Result};
use crate::layout::TreeLayout;
use crate::model::{CladeIndex, Tree};
use crate::plot::canvas::{
    Canvas, FontSize, HAlign, LineStyle, PlotOption, Stroke, TextStyle, VAlign,
};
use crate::plot::options::{DrawOptions, HorizontalDirection, Orientation, VerticalDirection};
use crate::plot::svg::SvgCanvas;
use tracing::{debug, trace};

/// Number of points of the polyline approximating an arc.
const ARC_POINTS: usize = 500;

const BRANCH_COLOR: &str = "black";

/// Draws `tree` onto a newly created [SvgCanvas].
///
/// See [draw_on] for the drawing itself; the canvas projection follows
/// the orientation of `options`.
///
/// # Example
/// ```
/// use phylodraw::model::Tree;
/// use phylodraw::plot::{DrawOptions, draw};
///
/// let mut tree = Tree::new().with_name("fruit");
/// let a = tree.add_leaf("Orange", None);
/// let b = tree.add_leaf("Apple", None);
/// tree.add_root(&[a, b]);
///
/// let canvas = draw(&mut tree, &DrawOptions::new().with_do_show(false)).unwrap();
/// assert_eq!(canvas.title(), Some("fruit"));
/// assert!(canvas.to_svg().contains("Orange"));
/// ```
pub fn draw(tree: &mut Tree, options: &DrawOptions) -> Result<SvgCanvas> {
    // Fail before creating anything
    options.validate()?;
    let mut canvas = SvgCanvas::new(options.orientation.projection());
    debug!(projection = ?canvas.projection(), "created svg canvas");
    draw_on(tree, options, &mut canvas)?;
    Ok(canvas)
}

/// Draws `tree` onto a caller-supplied canvas.
///
/// Each clade becomes one branch from its parent's depth to its own,
/// internal clades get a connector spanning their first to last child.
/// Afterwards axis limits, labels and the title are set, the passthrough
/// options applied in order and, with `do_show`, the canvas shown.
///
/// Colors and widths cascade: a clade without its own color or width takes
/// over that of its parent. This is written into `tree` and stays there.
///
/// # Errors
/// * Any validation error of `options`, raised before drawing anything
/// * [DrawError::InvalidAxes] if the canvas projection does not fit the orientation
/// * Errors of [Canvas::apply_option] and [Canvas::show]
pub fn draw_on<C: Canvas + ?Sized>(
    tree: &mut Tree,
    options: &DrawOptions,
    canvas: &mut C,
) -> Result<()> {
    options.orientation.validate()?;
    let plot_options = options.plot_options()?;
    let expected = options.orientation.projection();
    if canvas.projection() != expected {
        return Err(DrawError::InvalidAxes {
            expected,
            found: canvas.projection(),
        });
    }

    if !tree.is_root_set() {
        debug!("tree without root, nothing to draw");
        return finish(tree, options, canvas, &plot_options);
    }

    let layout = TreeLayout::new(tree);
    debug!(
        orientation = %options.orientation,
        num_clades = tree.num_clades(),
        max_x = layout.max_x(),
        max_y = layout.max_y(),
        "drawing tree"
    );

    match options.orientation {
        Orientation::Circular { span } => {
            draw_polar(tree, &layout, options, span, canvas);
            set_polar_limits(&layout, options, canvas);
        }
        orientation => {
            draw_cartesian(tree, &layout, options, orientation, canvas);
            set_cartesian_limits(&layout, options, orientation, canvas);
        }
    }

    finish(tree, options, canvas, &plot_options)
}

/// Title, passthrough options and show.
fn finish<C: Canvas + ?Sized>(
    tree: &Tree,
    options: &DrawOptions,
    canvas: &mut C,
    plot_options: &[PlotOption],
) -> Result<()> {
    if let Some(name) = tree.name() {
        canvas.set_title(name);
    }
    for option in plot_options {
        trace!(name = %option.name, "applying passthrough option");
        canvas.apply_option(option)?;
    }
    if options.do_show {
        canvas.show()?;
    }
    Ok(())
}

/// Stroke of a clade's branch: its color (or black) and its width scaling the base width.
fn branch_stroke(tree: &Tree, index: CladeIndex, options: &DrawOptions) -> Stroke {
    let clade = &tree[index];
    let color = clade
        .color()
        .map_or_else(|| BRANCH_COLOR.to_string(), |c| c.to_hex());
    let width = clade
        .width()
        .map_or(options.line_width, |w| w * options.line_width);
    Stroke::solid(color, width)
}

/// Stroke of the leader to an aligned tip label, thinner than its branch.
fn leader_stroke(branch: &Stroke) -> Stroke {
    Stroke {
        color: branch.color.clone(),
        width: (branch.width - 1.0).max(0.0),
        style: LineStyle::DashDot,
    }
}

/// Column where aligned tip labels are placed.
fn aligned_label_position(layout: &TreeLayout) -> f64 {
    layout.max_x() + layout.max_x() / 30.0
}

// =#========================================================================#=
// CARTESIAN
// =#========================================================================#=
fn draw_cartesian<C: Canvas + ?Sized>(
    tree: &mut Tree,
    layout: &TreeLayout,
    options: &DrawOptions,
    orientation: Orientation,
    canvas: &mut C,
) {
    let horizontal = matches!(orientation, Orientation::Horizontal(_));
    // (depth, height) to data point
    let point = |depth: f64, height: f64| {
        if horizontal {
            (height, depth)
        } else {
            (depth, height)
        }
    };
    let label_column = aligned_label_position(layout);

    let mut stack = vec![(tree.root_index(), 0.0)];
    while let Some((index, x_start)) = stack.pop() {
        tree.cascade_graphics(index);
        let stroke = branch_stroke(tree, index, options);
        let clade = &tree[index];
        let x_here = layout.x(index);
        let y_here = layout.y(index);

        canvas.line(point(x_start, y_here), point(x_here, y_here), &stroke);

        let mut label_x = x_here;
        if options.align_labels && clade.is_terminal() {
            canvas.line(
                point(x_here, y_here),
                point(label_column, y_here),
                &leader_stroke(&stroke),
            );
            label_x = label_column;
        }

        if options.draw_labels {
            if let Some(label) = (options.label_func)(clade) {
                let style = label_style(orientation, options.label_colors.color_of(&label));
                canvas.text(point(label_x, y_here), &format!(" {label}"), &style);
            }
        }

        if options.draw_labels {
            if let Some(branch_label) = options.branch_label(clade).filter(|l| !l.is_empty()) {
                let style = TextStyle {
                    h_align: HAlign::Center,
                    size: FontSize::Small,
                    ..TextStyle::default()
                };
                canvas.text(point(0.5 * (x_start + x_here), y_here), &branch_label, &style);
            }
        }

        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            canvas.line(
                point(x_here, layout.y(first)),
                point(x_here, layout.y(last)),
                &stroke,
            );
            for &child in clade.children().iter().rev() {
                stack.push((child, x_here));
            }
        }
    }
}

fn label_style(orientation: Orientation, color: String) -> TextStyle {
    match orientation {
        Orientation::Horizontal(direction) => TextStyle {
            color,
            h_align: HAlign::Center,
            v_align: match direction {
                HorizontalDirection::Up => VAlign::Bottom,
                HorizontalDirection::Down => VAlign::Top,
            },
            rotation: 90.0,
            ..TextStyle::default()
        },
        Orientation::Vertical(VerticalDirection::Left) => TextStyle {
            color,
            h_align: HAlign::Right,
            ..TextStyle::default()
        },
        _ => TextStyle {
            color,
            ..TextStyle::default()
        },
    }
}

fn set_cartesian_limits<C: Canvas + ?Sized>(
    layout: &TreeLayout,
    options: &DrawOptions,
    orientation: Orientation,
    canvas: &mut C,
) {
    let max_x = layout.max_x();
    // Tip axis inverted, so the first tip ends up at the top or the left
    let (tips_from, tips_to) = (layout.max_y() + 0.8, 0.2);

    match orientation {
        Orientation::Horizontal(direction) => {
            canvas.set_xlabel("taxa");
            canvas.set_ylabel("branch length");
            canvas.set_xlim(tips_from, tips_to);
            let factor = match (options.align_labels, direction) {
                (false, _) => 1.25,
                (true, HorizontalDirection::Up) => 1.6,
                (true, HorizontalDirection::Down) => 1.5,
            };
            let (low, high) = (-0.05 * max_x, factor * max_x);
            match direction {
                HorizontalDirection::Up => canvas.set_ylim(low, high),
                HorizontalDirection::Down => canvas.set_ylim(high, low),
            }
        }
        Orientation::Vertical(direction) => {
            canvas.set_xlabel("branch length");
            canvas.set_ylabel("taxa");
            canvas.set_ylim(tips_from, tips_to);
            let (low, high) = (-0.05 * max_x, 1.25 * max_x);
            match direction {
                VerticalDirection::Right => canvas.set_xlim(low, high),
                VerticalDirection::Left => canvas.set_xlim(high, low),
            }
        }
        Orientation::Circular { .. } => {}
    }
}

// =#========================================================================#=
// POLAR
// =#========================================================================#=
fn draw_polar<C: Canvas + ?Sized>(
    tree: &mut Tree,
    layout: &TreeLayout,
    options: &DrawOptions,
    span: f64,
    canvas: &mut C,
) {
    let max_y = layout.max_y();
    let radians_per_unit = if max_y > 0.0 {
        span.to_radians() / max_y
    } else {
        0.0
    };
    let angle = |index: CladeIndex| layout.y(index) * radians_per_unit;
    let label_radius = aligned_label_position(layout);

    let mut stack = vec![(tree.root_index(), 0.0)];
    while let Some((index, r_start)) = stack.pop() {
        tree.cascade_graphics(index);
        let stroke = branch_stroke(tree, index, options);
        let clade = &tree[index];
        let r_here = layout.x(index);
        let theta = angle(index);

        // Radial segment at the clade's own angle
        canvas.line((theta, r_start), (theta, r_here), &stroke);

        let mut label_r = r_here;
        if options.align_labels && clade.is_terminal() {
            canvas.line(
                (theta, r_here),
                (theta, label_radius),
                &leader_stroke(&stroke),
            );
            label_r = label_radius;
        }

        if options.draw_labels && clade.name().is_some() {
            if let Some(label) = (options.label_func)(clade) {
                let degrees = theta.to_degrees();
                let (h_align, rotation) = if degrees <= 90.0 {
                    (HAlign::Left, degrees)
                } else if degrees <= 270.0 {
                    (HAlign::Right, degrees - 180.0)
                } else {
                    (HAlign::Left, degrees)
                };
                let style = TextStyle {
                    color: options.label_colors.color_of(&label),
                    h_align,
                    v_align: VAlign::Center,
                    rotation,
                    size: FontSize::Normal,
                };
                canvas.text((theta, label_r), &label, &style);
            }
        }

        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            let points = arc(angle(last), angle(first), r_here);
            canvas.polyline(&points, &stroke);
            for &child in clade.children().iter().rev() {
                stack.push((child, r_here));
            }
        }
    }
}

/// Evenly spaced points from angle `from` to `to` at radius `r`.
fn arc(from: f64, to: f64, r: f64) -> Vec<(f64, f64)> {
    let step = (to - from) / (ARC_POINTS - 1) as f64;
    (0..ARC_POINTS)
        .map(|i| (from + step * i as f64, r))
        .collect()
}

fn set_polar_limits<C: Canvas + ?Sized>(layout: &TreeLayout, options: &DrawOptions, canvas: &mut C) {
    let max_x = layout.max_x();
    let top = if !options.draw_labels {
        max_x
    } else if options.align_labels {
        1.5 * max_x
    } else {
        1.25 * max_x
    };
    canvas.set_ylim(0.0, top);
}
