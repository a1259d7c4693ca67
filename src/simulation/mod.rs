//! The flow simulation engine.
//!
//! A [`Simulator`] takes an immutable [`Funnel`] snapshot, compiles it into an
//! index-based plan, relaxes visitor flow over a bounded number of synchronous
//! passes and aggregates the result into a [`SimulationReport`].
//!
//! The engine is total: dangling edges, over-allocated branch weights, self-loops
//! and cycles are absorbed by the weighting and pass rules, and non-finite inputs
//! are read as zero. It never returns an error.

use crate::funnel::Funnel;
use tracing::debug_span;

mod engine;
mod plan;
mod report;
mod weights;

pub use report::{FunnelTotals, GrowthPoint, SimulatedStep, SimulationReport, StepMetrics};
pub use weights::{BranchSplit, connection_weight};

use engine::RelaxationEngine;
use plan::FlowPlan;

/// Number of relaxation passes used unless configured otherwise.
pub const DEFAULT_PASSES: usize = 5;

/// Tunables of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Upper bound on relaxation passes.
    pub passes: usize,
    /// Stop early once no step's outbound visitors moved by this much or more in a pass.
    /// `None` always runs all `passes`.
    pub tolerance: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
            tolerance: None,
        }
    }
}

/// Runs funnel simulations with a fixed configuration.
///
/// A `Simulator` holds no state between runs, so one instance can be shared
/// freely across threads to simulate several funnel variants.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

pub struct SimulatorBuilder {
    config: SimulationConfig,
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    pub fn passes(mut self, passes: usize) -> Self {
        self.config.passes = passes;
        self
    }

    /// Enables early stopping. Non-finite or negative tolerances are ignored.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = (tolerance.is_finite() && tolerance >= 0.0).then_some(tolerance);
        self
    }

    pub fn build(self) -> Simulator {
        Simulator {
            config: self.config,
        }
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulates `funnel`. Identical input always yields bit-identical output.
    pub fn simulate(&self, funnel: &Funnel) -> SimulationReport {
        let _span = debug_span!("simulate", steps = funnel.len(), passes = self.config.passes)
            .entered();

        let plan = FlowPlan::compile(funnel);
        let (state, passes_run) = RelaxationEngine::new(&plan, &self.config).run();
        let report = SimulationReport::assemble(funnel, state, passes_run);

        tracing::debug!(
            passes_run,
            revenue = report.totals.total_revenue,
            cost = report.totals.total_cost,
            "simulation finished"
        );
        report
    }
}

/// Simulates `funnel` with the default five-pass configuration.
pub fn simulate(funnel: &Funnel) -> SimulationReport {
    Simulator::default().simulate(funnel)
}

/// Reads `NaN` and infinities as zero so every figure stays a finite number.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
