//! Iteration domain, active region, and launch-option clipping.
//!
//! A [`Domain`] is the full `[0, dim_x) x [0, dim_y)` grid. A [`Region`] is
//! the half-open sub-rectangle a dispatch is clipped to. Regions are checked
//! against their domain and rejected when they do not fit; they are never
//! clamped.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Grid axis, used in bounds diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Full iteration domain `[0, dim_x) x [0, dim_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub dim_x: u32,
    pub dim_y: u32,
}

impl Domain {
    /// Build a domain, rejecting grids with no cells.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidDomain`] if either dimension is zero.
    pub fn new(dim_x: u32, dim_y: u32) -> Result<Self, DispatchError> {
        let domain = Self { dim_x, dim_y };
        domain.check()?;
        Ok(domain)
    }

    /// Re-check a domain that may have been deserialized without going
    /// through [`Domain::new`].
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidDomain`] if either dimension is zero.
    pub fn check(&self) -> Result<(), DispatchError> {
        if self.dim_x == 0 || self.dim_y == 0 {
            return Err(DispatchError::InvalidDomain {
                dim_x: self.dim_x,
                dim_y: self.dim_y,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.dim_x as usize * self.dim_y as usize
    }

    /// Row-major linear index of `(x, y)`.
    #[inline]
    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.dim_x && y < self.dim_y);
        y as usize * self.dim_x as usize + x as usize
    }

    /// The region covering every cell of this domain.
    #[must_use]
    pub fn full_region(&self) -> Region {
        Region {
            x_start: 0,
            x_end: self.dim_x,
            y_start: 0,
            y_end: self.dim_y,
        }
    }
}

/// Half-open active region `[x_start, x_end) x [y_start, y_end)`.
///
/// The all-zero default is the "clip everything" region: it is empty and
/// fits inside every domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    #[serde(default)]
    pub x_start: u32,
    #[serde(default)]
    pub x_end: u32,
    #[serde(default)]
    pub y_start: u32,
    #[serde(default)]
    pub y_end: u32,
}

impl Region {
    #[must_use]
    pub const fn new(x_start: u32, x_end: u32, y_start: u32, y_end: u32) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// The empty region used when no bounds are supplied.
    #[must_use]
    pub const fn clip_all() -> Self {
        Self::new(0, 0, 0, 0)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x_start && x < self.x_end && y >= self.y_start && y < self.y_end
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_start >= self.x_end || self.y_start >= self.y_end
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.x_end.saturating_sub(self.x_start)
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y_end.saturating_sub(self.y_start)
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Check `0 <= start <= end <= dim` on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvertedRange`] when a start exceeds its end,
    /// or [`DispatchError::RegionOutOfBounds`] when an end exceeds the domain.
    pub fn check_within(&self, domain: &Domain) -> Result<(), DispatchError> {
        check_axis(Axis::X, self.x_start, self.x_end, domain.dim_x)?;
        check_axis(Axis::Y, self.y_start, self.y_end, domain.dim_y)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}) x [{}, {})",
            self.x_start, self.x_end, self.y_start, self.y_end
        )
    }
}

fn check_axis(axis: Axis, start: u32, end: u32, dim: u32) -> Result<(), DispatchError> {
    if start > end {
        return Err(DispatchError::InvertedRange { axis, start, end });
    }
    if end > dim {
        return Err(DispatchError::RegionOutOfBounds {
            axis,
            start,
            end,
            dim,
        });
    }
    Ok(())
}

/// Builder for a clip descriptor. An axis that is never set spans the
/// whole domain along that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    x: Option<(u32, u32)>,
    y: Option<(u32, u32)>,
}

impl LaunchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_x(mut self, start: u32, end: u32) -> Self {
        self.x = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_y(mut self, start: u32, end: u32) -> Self {
        self.y = Some((start, end));
        self
    }

    #[must_use]
    pub fn x_start(&self) -> Option<u32> {
        self.x.map(|(s, _)| s)
    }

    #[must_use]
    pub fn y_start(&self) -> Option<u32> {
        self.y.map(|(s, _)| s)
    }

    /// Resolve against a domain into a checked [`Region`].
    ///
    /// # Errors
    ///
    /// Propagates [`Domain::check`] and [`Region::check_within`] failures.
    pub fn resolve(&self, domain: &Domain) -> Result<Region, DispatchError> {
        domain.check()?;
        let (x_start, x_end) = self.x.unwrap_or((0, domain.dim_x));
        let (y_start, y_end) = self.y.unwrap_or((0, domain.dim_y));
        let region = Region::new(x_start, x_end, y_start, y_end);
        region.check_within(domain)?;
        Ok(region)
    }
}
