//! Per-cell kernels.
//!
//! A kernel is a pure function of its coordinate. The dispatcher is generic
//! over [`CellKernel`], so the cell-compute policy is injected rather than
//! baked into the dispatch loop.

use thiserror::Error;

/// Failure raised by a kernel for a single cell. Aborts the dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CellFault {
    message: String,
}

impl CellFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A per-coordinate computation. Implementations must be deterministic and
/// must not read other cells: dispatch order is unspecified.
pub trait CellKernel: Sync {
    /// Compute the value for `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns a [`CellFault`] to abort the enclosing dispatch.
    fn compute(&self, x: u32, y: u32) -> Result<i32, CellFault>;

    fn name(&self) -> &str;
}

/// `f(x, y) = x + y * dim_x`, the linear row-major index of the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearIndex {
    pub dim_x: u32,
}

impl LinearIndex {
    #[must_use]
    pub const fn new(dim_x: u32) -> Self {
        Self { dim_x }
    }

    /// Infallible form of [`CellKernel::compute`].
    // i32 wrap matches the 32-bit int arithmetic the kernel is defined over.
    #[allow(clippy::cast_possible_wrap)]
    #[inline]
    #[must_use]
    pub fn value(&self, x: u32, y: u32) -> i32 {
        x.wrapping_add(y.wrapping_mul(self.dim_x)) as i32
    }
}

impl CellKernel for LinearIndex {
    fn compute(&self, x: u32, y: u32) -> Result<i32, CellFault> {
        Ok(self.value(x, y))
    }

    fn name(&self) -> &str {
        "linear-index"
    }
}

/// Writes the same value to every cell. `Constant(0)` resets a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(pub i32);

impl CellKernel for Constant {
    fn compute(&self, _x: u32, _y: u32) -> Result<i32, CellFault> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Adapts a closure into a named kernel.
pub struct FnKernel<F> {
    name: String,
    f: F,
}

impl<F> FnKernel<F>
where
    F: Fn(u32, u32) -> Result<i32, CellFault> + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> CellKernel for FnKernel<F>
where
    F: Fn(u32, u32) -> Result<i32, CellFault> + Sync,
{
    fn compute(&self, x: u32, y: u32) -> Result<i32, CellFault> {
        (self.f)(x, y)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnKernel").field("name", &self.name).finish()
    }
}
