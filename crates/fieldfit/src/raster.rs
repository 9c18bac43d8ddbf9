//! Rasterization of a polygon into an occupancy grid, and the largest
//! all-occupied axis-aligned rectangle in such a grid.
//!
//! A cell is occupied iff its centre lies inside the polygon (single-sample
//! approximation). Cells are square; the longer bounding-box side gets
//! `resolution` cells. The approximation error of anything built on the grid
//! is therefore bounded by one cell.

use crate::geom::{bounds, Polygon, Vec2};

/// Binary occupancy grid with an affine map back to polygon coordinates.
///
/// Row `r`, column `c` covers `[origin.x + c·cell, origin.x + (c+1)·cell] ×
/// [origin.y + r·cell, origin.y + (r+1)·cell]`.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    pub rows: usize,
    pub cols: usize,
    pub origin: Vec2,
    pub cell: f64,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Continuous coordinates of the lower-left corner of cell `(row, col)`.
    #[inline]
    pub fn to_world(&self, row: usize, col: usize) -> Vec2 {
        self.origin + Vec2::new(col as f64 * self.cell, row as f64 * self.cell)
    }

    /// Corners of a grid rectangle in polygon coordinates (CCW).
    pub fn rect_corners(&self, r: &GridRect) -> [Vec2; 4] {
        let lo = self.to_world(r.row, r.col);
        let hi = self.to_world(r.row + r.height, r.col + r.width);
        [
            lo,
            Vec2::new(hi.x, lo.y),
            hi,
            Vec2::new(lo.x, hi.y),
        ]
    }
}

/// Rasterize `poly` at `resolution` cells along its longer bounding-box side.
///
/// Scanline form of the centre-in-polygon test: each row's centre line is
/// crossed against the edges (half-open rule) and the cells between crossing
/// pairs are filled.
pub fn rasterize(poly: &Polygon, resolution: usize) -> OccupancyGrid {
    rasterize_points(poly.points(), resolution)
}

pub(crate) fn rasterize_points(pts: &[Vec2], resolution: usize) -> OccupancyGrid {
    let resolution = resolution.max(1);
    let (lo, hi) = bounds(pts);
    let extent = hi - lo;
    let side = extent.x.max(extent.y);
    let cell = if side > 0.0 { side / resolution as f64 } else { 1.0 };
    let cols = ((extent.x / cell).ceil() as usize).clamp(1, resolution);
    let rows = ((extent.y / cell).ceil() as usize).clamp(1, resolution);
    let mut cells = vec![false; rows * cols];
    let n = pts.len();
    let mut xs: Vec<f64> = Vec::with_capacity(n);
    for r in 0..rows {
        let y = lo.y + (r as f64 + 0.5) * cell;
        xs.clear();
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            if (a.y > y) != (b.y > y) {
                xs.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        let row = &mut cells[r * cols..(r + 1) * cols];
        for pair in xs.chunks_exact(2) {
            // Columns whose centre x lies in [x0, x1].
            let c0 = ((pair[0] - lo.x) / cell - 0.5).ceil().max(0.0) as usize;
            let c1 = ((pair[1] - lo.x) / cell - 0.5).floor();
            if c1 < 0.0 {
                continue;
            }
            let c1 = (c1 as usize).min(cols - 1);
            if c0 <= c1 {
                row[c0..=c1].fill(true);
            }
        }
    }
    OccupancyGrid {
        rows,
        cols,
        origin: lo,
        cell,
        cells,
    }
}

/// Axis-aligned block of cells: rows `row..row+height`, cols `col..col+width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRect {
    pub row: usize,
    pub col: usize,
    pub height: usize,
    pub width: usize,
}

impl GridRect {
    #[inline]
    pub fn cells(&self) -> usize {
        self.height * self.width
    }
}

/// Largest all-occupied rectangle (by cell count) in `grid`.
///
/// Keeps a per-column histogram of consecutive occupied cells ending at the
/// current row; for each row a monotonic stack yields, for every bar, the
/// widest span in which it is the minimum. O(rows × cols) overall. Ties keep
/// the first rectangle found (lowest row, then lowest column).
pub fn largest_rectangle(grid: &OccupancyGrid) -> Option<GridRect> {
    let cols = grid.cols;
    let mut heights = vec![0usize; cols];
    let mut stack: Vec<usize> = Vec::with_capacity(cols + 1);
    let mut best: Option<GridRect> = None;
    let mut best_cells = 0usize;
    for r in 0..grid.rows {
        for (c, h) in heights.iter_mut().enumerate() {
            *h = if grid.get(r, c) { *h + 1 } else { 0 };
        }
        stack.clear();
        for c in 0..=cols {
            let cur = if c < cols { heights[c] } else { 0 };
            while let Some(&top) = stack.last() {
                if heights[top] <= cur {
                    break;
                }
                stack.pop();
                let h = heights[top];
                let left = stack.last().map_or(0, |&s| s + 1);
                let width = c - left;
                let area = h * width;
                if area > best_cells {
                    best_cells = area;
                    best = Some(GridRect {
                        row: r + 1 - h,
                        col: left,
                        height: h,
                        width,
                    });
                }
            }
            stack.push(c);
        }
    }
    best
}
