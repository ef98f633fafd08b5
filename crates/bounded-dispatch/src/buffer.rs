//! Zero-initialised row-major output grid.

use std::ops::Range;

use crate::domain::Domain;

/// Value held by every cell a dispatch has not written.
pub const SENTINEL: i32 = 0;

/// Row-major `dim_x * dim_y` grid of `i32` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    domain: Domain,
    cells: Vec<i32>,
}

impl OutputBuffer {
    /// Allocate a buffer with every cell set to [`SENTINEL`].
    #[must_use]
    pub fn zeroed(domain: Domain) -> Self {
        Self {
            domain,
            cells: vec![SENTINEL; domain.cell_count()],
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.cells[self.domain.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: i32) {
        let idx = self.domain.index(x, y);
        self.cells[idx] = value;
    }

    #[must_use]
    pub fn row(&self, y: u32) -> &[i32] {
        let w = self.domain.dim_x as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// Contiguous storage for rows `rows.start..rows.end`.
    ///
    /// Callers split the slice with `chunks_mut(dim_x)` to get one disjoint
    /// slice per row.
    pub fn rows_mut(&mut self, rows: Range<u32>) -> &mut [i32] {
        let w = self.domain.dim_x as usize;
        &mut self.cells[rows.start as usize * w..rows.end as usize * w]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }

    /// Count of cells that no longer hold [`SENTINEL`].
    #[must_use]
    pub fn written_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v != SENTINEL).count()
    }
}
