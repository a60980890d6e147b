//! ASCII-art phylograms.
//!
//! The printed result looks like:
//! ```text
//!                                     _________ Orange
//!                      ______________|
//!                     |              |______________ Tangerine
//!       ______________|
//!      |              |          _________________________ Grapefruit
//!     _|              |_________|
//!      |                        |______________ Pummelo
//!      |
//!      |__________________________________ Apple
//! ```
//! Tips occupy every other row, each followed by its label in the right margin.

use crate::error::{DrawError, Result};
use crate::layout::{GridLayout, fudge_margin};
use crate::model::Tree;
use std::io::{self, Write};
use tracing::debug;

/// Default total number of text columns used by a drawing.
pub const DEFAULT_COLUMN_WIDTH: usize = 80;

/// Label printed for tips without a name.
const UNNAMED_LABEL: &str = "Clade";

/// Draws an ASCII-art phylogram of `tree` into `out`.
///
/// # Arguments
/// * `tree` - Tree with at least one tip
/// * `out` - Destination of the newline-terminated lines
/// * `column_width` - Total number of text columns used by the drawing,
///   including the tip labels
///
/// # Errors
/// * [DrawError::ColumnWidthTooSmall] if labels leave no room for the tree
/// * [DrawError::Io] if writing fails
///
/// # Example
/// ```
/// use phylodraw::ascii::draw_ascii;
/// use phylodraw::model::Tree;
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf("A", None);
/// let b = tree.add_leaf("B", None);
/// tree.add_root(&[a, b]);
///
/// let mut out = Vec::new();
/// draw_ascii(&tree, &mut out, 20).unwrap();
/// let drawing = String::from_utf8(out).unwrap();
/// assert!(drawing.lines().next().unwrap().ends_with(" A"));
/// ```
pub fn draw_ascii<W: Write>(tree: &Tree, out: &mut W, column_width: usize) -> Result<()> {
    let taxa = tree.terminals();
    if taxa.is_empty() {
        return Ok(());
    }

    let labels: Vec<&str> = taxa
        .iter()
        .map(|&tip| tree[tip].name().unwrap_or(UNNAMED_LABEL))
        .collect();
    let max_label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    // At least one column of branch must remain after the rounding margin
    let required = max_label_width + 1 + fudge_margin(taxa.len()) + 1;
    if column_width < required {
        return Err(DrawError::ColumnWidthTooSmall {
            column_width,
            required,
        });
    }

    let drawing_width = column_width - max_label_width - 1;
    let drawing_height = 2 * taxa.len() - 1;
    debug!(
        num_terminals = taxa.len(),
        drawing_width, drawing_height, "drawing ascii tree"
    );

    let grid = GridLayout::new(tree, drawing_width);
    let matrix = draw_matrix(tree, &grid, drawing_width, drawing_height);

    for (idx, row) in matrix.iter().enumerate() {
        let line: String = row.iter().collect();
        let line = line.trim_end();
        if idx % 2 == 0 {
            writeln!(out, "{} {}", line, labels[idx / 2])?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out)?;

    Ok(())
}

/// Draws an ASCII-art phylogram of `tree` to standard output.
///
/// See [draw_ascii].
pub fn draw_ascii_stdout(tree: &Tree, column_width: usize) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    draw_ascii(tree, &mut handle, column_width)
}

/// Returns the ASCII-art phylogram of `tree` as a string.
///
/// See [draw_ascii].
pub fn ascii_string(tree: &Tree, column_width: usize) -> Result<String> {
    let mut out = Vec::new();
    draw_ascii(tree, &mut out, column_width)?;
    // Everything written came from &str, so nothing is replaced here
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Fills a character matrix with the line art of all branches.
///
/// Clades are drawn in pre-order; later clades overwrite shared cells.
fn draw_matrix(
    tree: &Tree,
    grid: &GridLayout,
    drawing_width: usize,
    drawing_height: usize,
) -> Vec<Vec<char>> {
    // A single clade or very short trees may reach one column beyond the drawing width
    let width = drawing_width.max(grid.max_col() + 1);
    let mut matrix = vec![vec![' '; width]; drawing_height];

    // (clade, column its horizontal line starts at)
    let mut stack = vec![(tree.root_index(), 0)];
    while let Some((index, start_col)) = stack.pop() {
        let clade = &tree[index];
        let this_col = grid.col(index);
        let this_row = grid.row(index);

        // Horizontal line from parent
        for col in start_col..this_col {
            matrix[this_row][col] = '_';
        }

        if let (Some(first), Some(last)) = (clade.first_child(), clade.last_child()) {
            // Vertical line spanning all children
            let top_row = grid.row(first);
            let bottom_row = grid.row(last);
            for row in matrix.iter_mut().take(bottom_row + 1).skip(top_row + 1) {
                row[this_col] = '|';
            }

            // Short first branches need a cell that survives trimming trailing whitespace
            if grid.col(first).saturating_sub(this_col) < 2 {
                matrix[top_row][this_col] = ',';
            }

            for &child in clade.children().iter().rev() {
                stack.push((child, this_col + 1));
            }
        }
    }

    matrix
}
