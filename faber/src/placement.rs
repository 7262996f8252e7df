// Copyright 2025 the Faber Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid item placement.
//!
//! Explicitly placed items keep their area. The remaining items are placed one cell at a
//! time in row-major order through the declared columns, skipping cells that explicit
//! items already occupy, and wrapping onto new rows. Rows and columns referenced past the
//! declared template become implicit tracks.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Range;

/// The cells an item occupies, as 1-indexed grid lines with exclusive ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridArea {
    /// Row start line.
    pub row_start: usize,
    /// Column start line.
    pub col_start: usize,
    /// Row end line (exclusive).
    pub row_end: usize,
    /// Column end line (exclusive).
    pub col_end: usize,
}

impl GridArea {
    /// The single cell at row 1, column 1.
    pub const ORIGIN: Self = Self {
        row_start: 1,
        col_start: 1,
        row_end: 2,
        col_end: 2,
    };

    /// Creates an area, clamping starts to line 1 and ends to at least one track past the start.
    pub fn new(row_start: usize, col_start: usize, row_end: usize, col_end: usize) -> Self {
        let row_start = row_start.max(1);
        let col_start = col_start.max(1);
        Self {
            row_start,
            col_start,
            row_end: row_end.max(row_start + 1),
            col_end: col_end.max(col_start + 1),
        }
    }

    /// The single cell at 1-indexed `(row, col)`.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, col, row + 1, col + 1)
    }

    /// Number of rows spanned.
    pub fn row_span(&self) -> usize {
        self.row_end - self.row_start
    }

    /// Number of columns spanned.
    pub fn col_span(&self) -> usize {
        self.col_end - self.col_start
    }

    /// Zero-based indices of the spanned row tracks.
    pub fn rows(&self) -> Range<usize> {
        self.row_start - 1..self.row_end - 1
    }

    /// Zero-based indices of the spanned column tracks.
    pub fn columns(&self) -> Range<usize> {
        self.col_start - 1..self.col_end - 1
    }

    /// Returns `true` if the area covers the 1-indexed cell `(row, col)`.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end).contains(&row)
            && (self.col_start..self.col_end).contains(&col)
    }

    /// Returns `true` if both areas share at least one cell.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.row_start < other.row_end
            && other.row_start < self.row_end
            && self.col_start < other.col_end
            && other.col_start < self.col_end
    }
}

/// The outcome of placing every child of a grid container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// One area per child, in child order.
    pub areas: Vec<GridArea>,
    /// Total row tracks needed (declared plus implicit).
    pub row_count: usize,
    /// Total column tracks needed (declared plus implicit).
    pub col_count: usize,
}

/// Places items given their explicit areas (`None` for auto placement).
///
/// Auto-placed items walk the declared columns (at least one) row by row. The cursor jumps
/// past an explicit area in one step, so the cost does not depend on how large areas are.
pub fn place_items(
    explicit: &[Option<GridArea>],
    declared_rows: usize,
    declared_cols: usize,
) -> Placement {
    let fixed: Vec<GridArea> = explicit.iter().flatten().copied().collect();
    let columns = declared_cols.max(1);
    let mut cursor = (1_usize, 1_usize);
    let wrap = |cursor: &mut (usize, usize)| {
        if cursor.1 > columns {
            cursor.1 = 1;
            cursor.0 += 1;
        }
    };

    let mut areas = Vec::with_capacity(explicit.len());
    for area in explicit {
        let area = match area {
            Some(area) => *area,
            None => {
                while let Some(taken) = fixed.iter().find(|a| a.contains(cursor.0, cursor.1)) {
                    cursor.1 = taken.col_end;
                    wrap(&mut cursor);
                }
                let cell = GridArea::cell(cursor.0, cursor.1);
                cursor.1 += 1;
                wrap(&mut cursor);
                cell
            }
        };
        areas.push(area);
    }

    let row_count = areas
        .iter()
        .map(|a| a.row_end - 1)
        .fold(declared_rows, usize::max);
    let col_count = areas
        .iter()
        .map(|a| a.col_end - 1)
        .fold(declared_cols, usize::max);

    Placement {
        areas,
        row_count,
        col_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_placement_wraps_rows() {
        let p = place_items(&[None, None, None, None], 0, 2);
        assert_eq!(
            p.areas,
            [
                GridArea::cell(1, 1),
                GridArea::cell(1, 2),
                GridArea::cell(2, 1),
                GridArea::cell(2, 2),
            ]
        );
        assert_eq!((p.row_count, p.col_count), (2, 2));
    }

    #[test]
    fn auto_placement_skips_explicit_cells() {
        let p = place_items(&[None, Some(GridArea::cell(1, 2)), None], 1, 2);
        assert_eq!(p.areas[0], GridArea::cell(1, 1));
        assert_eq!(p.areas[2], GridArea::cell(2, 1));
    }

    #[test]
    fn tall_explicit_area_is_skipped_row_by_row() {
        let tall = GridArea::new(1, 1, 1001, 3);
        let p = place_items(&[Some(tall), None], 0, 2);
        assert_eq!(p.areas[1], GridArea::cell(1001, 1));
        assert_eq!((p.row_count, p.col_count), (1001, 2));
    }

    #[test]
    fn explicit_areas_grow_the_grid() {
        let p = place_items(&[Some(GridArea::new(3, 2, 4, 5))], 1, 1);
        assert_eq!((p.row_count, p.col_count), (3, 4));
    }

    #[test]
    fn no_columns_places_one_per_row() {
        let p = place_items(&[None, None], 0, 0);
        assert_eq!(p.areas, [GridArea::cell(1, 1), GridArea::cell(2, 1)]);
        assert_eq!((p.row_count, p.col_count), (2, 1));
    }

    #[test]
    fn overlap_and_spans() {
        let a = GridArea::new(1, 1, 3, 3);
        assert_eq!((a.row_span(), a.col_span()), (2, 2));
        assert_eq!(a.columns(), 0..2);
        assert!(a.overlaps(&GridArea::cell(2, 2)));
        assert!(!a.overlaps(&GridArea::cell(3, 1)));
    }
}
