use super::SimulationConfig;
use super::plan::{FlowPlan, PlanNode};
use tracing::{debug, trace};

/// Per-step flow figures while the relaxation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct FlowState {
    pub visitors_in: f64,
    pub visitors_out: f64,
    pub revenue: f64,
    pub cost: f64,
}

/// Runs bounded, synchronous relaxation passes over a compiled plan.
pub(crate) struct RelaxationEngine<'a> {
    plan: &'a FlowPlan,
    config: &'a SimulationConfig,
}

impl<'a> RelaxationEngine<'a> {
    pub(crate) fn new(plan: &'a FlowPlan, config: &'a SimulationConfig) -> Self {
        Self { plan, config }
    }

    /// Returns the final state of every node and the number of passes executed.
    pub(crate) fn run(&self) -> (Vec<FlowState>, usize) {
        let mut state = self.seed();
        let mut passes_run = 0;

        for pass in 0..self.config.passes {
            let snapshot: Vec<f64> = state.iter().map(|s| s.visitors_out).collect();
            let max_delta = self.relax(&snapshot, &mut state);
            passes_run += 1;
            trace!(pass, max_delta, "relaxation pass complete");

            if let Some(tolerance) = self.config.tolerance {
                if max_delta < tolerance {
                    debug!(passes_run, max_delta, "flow settled before the pass limit");
                    break;
                }
            }
        }

        (state, passes_run)
    }

    /// Sources emit their full traffic from the start; everything else begins empty.
    fn seed(&self) -> Vec<FlowState> {
        self.plan
            .nodes
            .iter()
            .map(|node| match node {
                PlanNode::Source { traffic, cost } => FlowState {
                    visitors_in: 0.0,
                    visitors_out: *traffic,
                    revenue: 0.0,
                    cost: *cost,
                },
                PlanNode::Stage { .. } => FlowState::default(),
            })
            .collect()
    }

    /// One pass. Every stage reads the previous pass's outputs from `snapshot`,
    /// never a value written earlier in the same pass.
    fn relax(&self, snapshot: &[f64], state: &mut [FlowState]) -> f64 {
        let mut max_delta: f64 = 0.0;

        for (index, node) in self.plan.nodes.iter().enumerate() {
            let PlanNode::Stage {
                conversion_rate,
                product_price,
                cost_per_acquisition,
                inbound,
            } = node
            else {
                continue;
            };

            let visitors_in: f64 = inbound
                .iter()
                .map(|link| snapshot[link.parent] * (link.weight / 100.0))
                .sum();
            let conversions = visitors_in * (conversion_rate / 100.0);

            max_delta = max_delta.max((conversions - snapshot[index]).abs());
            state[index] = FlowState {
                visitors_in,
                visitors_out: conversions,
                revenue: conversions * product_price,
                cost: conversions * cost_per_acquisition,
            };
        }

        max_delta
    }
}
