//! Vector drawing of trees as phylograms, cladograms and circular trees.
//!
//! [draw] creates an [SvgCanvas]; [draw_on] draws into any [Canvas], so
//! other backends only need to implement the few primitives of that trait.
//! Layout follows [crate::layout]: depth along one axis (or the radius),
//! tips evenly spaced along the other (or the angle).

pub mod canvas;
pub mod draw;
pub mod options;
pub mod svg;

pub use canvas::{
    Canvas, FontSize, HAlign, LineStyle, PlotOption, Projection, Stroke, TextStyle, VAlign,
};
pub use draw::{draw, draw_on};
pub use options::{
    BranchLabels, CladeLabelFn, DEFAULT_CIRCULAR_SPAN, DEFAULT_LINE_WIDTH, DrawOptions,
    HorizontalDirection, LabelColorFn, LabelColors, Orientation, VerticalDirection,
    format_confidence,
};
pub use svg::SvgCanvas;
