//! Host runtime primitives: allocation, clipped dispatch, element read-back.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::OutputBuffer;
use crate::domain::{Domain, Region};
use crate::error::DispatchError;
use crate::kernel::CellKernel;

/// Execution strategy for a clipped dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Row-by-row on the calling thread.
    #[default]
    Sequential,
    /// One rayon task per row of the active region.
    Parallel,
}

impl Backend {
    /// Parse a backend name as accepted on the command line.
    ///
    /// # Errors
    ///
    /// Returns a message naming the accepted values.
    pub fn from_name(s: &str) -> Result<Self, String> {
        match s {
            "sequential" => Ok(Self::Sequential),
            "parallel" => Ok(Self::Parallel),
            other => Err(format!(
                "unknown backend '{other}', expected 'sequential' or 'parallel'"
            )),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// Primitives a kernel runtime provides to the verifier.
///
/// `dispatch` must invoke the kernel exactly once per coordinate inside
/// `region` and never outside it, and every write must be visible to `read`
/// once it returns.
pub trait KernelRuntime {
    fn allocate(&self, domain: Domain) -> OutputBuffer {
        OutputBuffer::zeroed(domain)
    }

    /// Run `kernel` over `region`, writing each result into `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DispatchFailed`] for the first cell fault
    /// observed. Cells written before the fault keep their values.
    fn dispatch(
        &self,
        buffer: &mut OutputBuffer,
        region: Region,
        kernel: &dyn CellKernel,
    ) -> Result<(), DispatchError>;

    fn read(&self, buffer: &OutputBuffer, x: u32, y: u32) -> i32 {
        buffer.get(x, y)
    }
}

/// In-process runtime backed by either a plain loop or the rayon pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuRuntime {
    backend: Backend,
}

impl CpuRuntime {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }
}

impl KernelRuntime for CpuRuntime {
    fn dispatch(
        &self,
        buffer: &mut OutputBuffer,
        region: Region,
        kernel: &dyn CellKernel,
    ) -> Result<(), DispatchError> {
        debug!(
            backend = %self.backend,
            kernel = kernel.name(),
            %region,
            cells = region.cell_count(),
            "dispatching clipped kernel"
        );
        if region.is_empty() {
            return Ok(());
        }

        let width = buffer.domain().dim_x as usize;
        let rows = buffer.rows_mut(region.y_start..region.y_end);

        match self.backend {
            Backend::Sequential => rows
                .chunks_mut(width)
                .zip(region.y_start..)
                .try_for_each(|(row, y)| fill_row(row, y, region, kernel)),
            // Rows are disjoint slices; rayon's join publishes every write
            // before this call returns.
            Backend::Parallel => rows
                .par_chunks_mut(width)
                .zip(region.y_start..region.y_end)
                .try_for_each(|(row, y)| fill_row(row, y, region, kernel)),
        }
    }
}

fn fill_row(
    row: &mut [i32],
    y: u32,
    region: Region,
    kernel: &dyn CellKernel,
) -> Result<(), DispatchError> {
    for x in region.x_start..region.x_end {
        row[x as usize] = kernel
            .compute(x, y)
            .map_err(|source| DispatchError::DispatchFailed {
                kernel: kernel.name().to_string(),
                x,
                y,
                source,
            })?;
    }
    Ok(())
}
