//! Bounded dispatch verifier.
//!
//! Drives one test cycle: `configure` a domain and active region, `dispatch`
//! a kernel clipped to that region, then `verify` that every active cell
//! holds `x + y * dim_x` and every clipped cell still holds the sentinel.
//!
//! ```text
//! Unconfigured -> Configured -> Dispatched -> Verified
//!                                   \
//!                                    -> Aborted   (kernel fault)
//! ```
//!
//! Each instance runs exactly one cycle; a new cycle needs a new verifier.

use tracing::{debug, info, warn};

use crate::buffer::{OutputBuffer, SENTINEL};
use crate::domain::{Domain, LaunchOptions, Region};
use crate::error::DispatchError;
use crate::kernel::{CellKernel, LinearIndex};
use crate::report::{CellKind, Mismatch, VerificationReport};
use crate::reporter::{NullReporter, OutcomeReporter};
use crate::runtime::{Backend, CpuRuntime, KernelRuntime};

/// Lifecycle position of a [`BoundedDispatchVerifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierState {
    Unconfigured,
    Configured,
    Dispatched,
    Verified,
    Aborted,
}

impl std::fmt::Display for VerifierState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Dispatched => "dispatched",
            Self::Verified => "verified",
            Self::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy)]
struct Setup {
    domain: Domain,
    region: Region,
}

pub struct BoundedDispatchVerifier<R = CpuRuntime> {
    runtime: R,
    reporter: Box<dyn OutcomeReporter>,
    state: VerifierState,
    setup: Option<Setup>,
    buffer: Option<OutputBuffer>,
    kernel: String,
}

impl BoundedDispatchVerifier<CpuRuntime> {
    /// Verifier on the in-process runtime with signals discarded.
    #[must_use]
    pub fn cpu(backend: Backend) -> Self {
        Self::new(CpuRuntime::new(backend), NullReporter)
    }
}

impl<R: KernelRuntime> BoundedDispatchVerifier<R> {
    pub fn new(runtime: R, reporter: impl OutcomeReporter + 'static) -> Self {
        Self {
            runtime,
            reporter: Box::new(reporter),
            state: VerifierState::Unconfigured,
            setup: None,
            buffer: None,
            kernel: String::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> VerifierState {
        self.state
    }

    #[must_use]
    pub fn domain(&self) -> Option<Domain> {
        self.setup.map(|s| s.domain)
    }

    #[must_use]
    pub fn region(&self) -> Option<Region> {
        self.setup.map(|s| s.region)
    }

    /// The output buffer, once a dispatch has allocated it.
    #[must_use]
    pub fn buffer(&self) -> Option<&OutputBuffer> {
        self.buffer.as_ref()
    }

    /// Configure a `dim_x x dim_y` domain clipped to
    /// `[x_start, x_end) x [y_start, y_end)`.
    ///
    /// All-zero bounds give the empty "clip everything" region.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the domain is empty or the region
    /// does not fit inside it, and [`DispatchError::Sequencing`] if the
    /// verifier is already configured.
    pub fn configure(
        &mut self,
        dim_x: u32,
        dim_y: u32,
        x_start: u32,
        x_end: u32,
        y_start: u32,
        y_end: u32,
    ) -> Result<(), DispatchError> {
        let domain = Domain::new(dim_x, dim_y)?;
        self.configure_region(domain, Region::new(x_start, x_end, y_start, y_end))
    }

    /// Configure from launch options; unset axes span the domain.
    ///
    /// # Errors
    ///
    /// Same as [`Self::configure`].
    pub fn configure_launch(
        &mut self,
        domain: Domain,
        options: &LaunchOptions,
    ) -> Result<(), DispatchError> {
        self.expect_state("configure", VerifierState::Unconfigured)?;
        let region = options.resolve(&domain)?;
        self.configure_region(domain, region)
    }

    /// Configure from an explicit domain and region.
    ///
    /// # Errors
    ///
    /// Same as [`Self::configure`].
    pub fn configure_region(
        &mut self,
        domain: Domain,
        region: Region,
    ) -> Result<(), DispatchError> {
        self.expect_state("configure", VerifierState::Unconfigured)?;
        domain.check()?;
        region.check_within(&domain)?;
        debug!(
            dim_x = domain.dim_x,
            dim_y = domain.dim_y,
            %region,
            "verifier configured"
        );
        self.setup = Some(Setup { domain, region });
        self.state = VerifierState::Configured;
        Ok(())
    }

    /// Allocate the output buffer and run `kernel` over the active region.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Sequencing`] unless configured. A kernel
    /// fault is propagated and moves the verifier to
    /// [`VerifierState::Aborted`]; the partial buffer is kept for inspection
    /// but can no longer be verified.
    pub fn dispatch(&mut self, kernel: &dyn CellKernel) -> Result<(), DispatchError> {
        let setup = self.configured_setup("dispatch")?;
        let mut buffer = self.runtime.allocate(setup.domain);
        let result = self.runtime.dispatch(&mut buffer, setup.region, kernel);
        self.buffer = Some(buffer);
        self.kernel = kernel.name().to_string();
        match result {
            Ok(()) => {
                self.state = VerifierState::Dispatched;
                Ok(())
            }
            Err(e) => {
                warn!(kernel = kernel.name(), error = %e, "dispatch aborted");
                self.state = VerifierState::Aborted;
                Err(e)
            }
        }
    }

    /// Dispatch the reference kernel `x + y * dim_x`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::dispatch`].
    pub fn dispatch_reference(&mut self) -> Result<(), DispatchError> {
        let setup = self.configured_setup("dispatch")?;
        self.dispatch(&LinearIndex::new(setup.domain.dim_x))
    }

    /// Scan the whole domain and collect every deviating cell.
    ///
    /// Repeated calls rescan the same buffer and return the same report.
    /// The reporter is signalled once per call.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DispatchAborted`] after a failed dispatch and
    /// [`DispatchError::Sequencing`] before any dispatch.
    pub fn verify(&mut self) -> Result<VerificationReport, DispatchError> {
        match self.state {
            VerifierState::Dispatched | VerifierState::Verified => {}
            VerifierState::Aborted => return Err(DispatchError::DispatchAborted),
            state => {
                return Err(DispatchError::Sequencing {
                    operation: "verify",
                    state,
                });
            }
        }
        let (Some(setup), Some(buffer)) = (self.setup, self.buffer.as_ref()) else {
            return Err(DispatchError::Sequencing {
                operation: "verify",
                state: self.state,
            });
        };

        let mismatches = scan(&self.runtime, buffer, setup);
        let report = VerificationReport {
            domain: setup.domain,
            region: setup.region,
            kernel: self.kernel.clone(),
            cells_checked: setup.domain.cell_count(),
            mismatches,
        };

        if report.passed() {
            info!(region = %setup.region, "bounded dispatch verified");
        } else {
            warn!(
                region = %setup.region,
                active = report.active_errors().count(),
                clipped = report.clipped_writes().count(),
                "bounded dispatch verification failed"
            );
        }
        self.reporter.report(report.outcome());
        self.state = VerifierState::Verified;
        Ok(report)
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: VerifierState,
    ) -> Result<(), DispatchError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(DispatchError::Sequencing {
                operation,
                state: self.state,
            })
        }
    }

    fn configured_setup(&self, operation: &'static str) -> Result<Setup, DispatchError> {
        self.expect_state(operation, VerifierState::Configured)?;
        self.setup.ok_or(DispatchError::Sequencing {
            operation,
            state: self.state,
        })
    }
}

fn scan<R: KernelRuntime>(runtime: &R, buffer: &OutputBuffer, setup: Setup) -> Vec<Mismatch> {
    let expected_fn = LinearIndex::new(setup.domain.dim_x);
    let mut mismatches = Vec::new();
    for y in 0..setup.domain.dim_y {
        for x in 0..setup.domain.dim_x {
            let actual = runtime.read(buffer, x, y);
            let (expected, kind) = if setup.region.contains(x, y) {
                (expected_fn.value(x, y), CellKind::Active)
            } else {
                (SENTINEL, CellKind::Clipped)
            };
            if actual != expected {
                mismatches.push(Mismatch {
                    x,
                    y,
                    expected,
                    actual,
                    kind,
                });
            }
        }
    }
    mismatches
}
