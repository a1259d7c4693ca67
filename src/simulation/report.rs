use super::engine::FlowState;
use super::finite_or_zero;
use crate::funnel::{Funnel, Step};
use serde::Serialize;

/// Flow figures computed for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetrics {
    pub visitors_in: f64,
    pub visitors_out: f64,
    pub revenue: f64,
    pub cost: f64,
    /// Running revenue total over all steps up to and including this one, in funnel order.
    pub cumulative_revenue: f64,
}

impl StepMetrics {
    pub fn profit(&self) -> f64 {
        self.revenue - self.cost
    }
}

/// A step paired with the metrics the simulation produced for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedStep {
    #[serde(flatten)]
    pub step: Step,
    pub metrics: StepMetrics,
}

/// Funnel-wide aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelTotals {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    /// Revenue over cost, `0` when nothing was spent.
    pub roas: f64,
    /// Revenue per originating visitor, `0` without traffic.
    pub epa: f64,
    pub initial_traffic: f64,
}

/// One point of the revenue growth series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub name: String,
    pub revenue: f64,
    pub profit: f64,
    pub cumulative_revenue: f64,
}

/// The output of a simulation run: every input step, in input order, with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub steps: Vec<SimulatedStep>,
    pub totals: FunnelTotals,
    pub passes_run: usize,
}

impl SimulationReport {
    pub(crate) fn assemble(funnel: &Funnel, state: Vec<FlowState>, passes_run: usize) -> Self {
        let mut totals = FunnelTotals::default();
        let mut cumulative_revenue = 0.0;

        let steps = funnel
            .iter()
            .zip(state)
            .map(|(step, flow)| {
                totals.total_revenue += flow.revenue;
                totals.total_cost += flow.cost;
                if step.is_entry() {
                    totals.initial_traffic += finite_or_zero(step.traffic_volume());
                }
                cumulative_revenue += flow.revenue;

                SimulatedStep {
                    step: step.clone(),
                    metrics: StepMetrics {
                        visitors_in: flow.visitors_in,
                        visitors_out: flow.visitors_out,
                        revenue: flow.revenue,
                        cost: flow.cost,
                        cumulative_revenue,
                    },
                }
            })
            .collect();

        totals.total_profit = totals.total_revenue - totals.total_cost;
        totals.roas = if totals.total_cost > 0.0 {
            totals.total_revenue / totals.total_cost
        } else {
            0.0
        };
        totals.epa = if totals.initial_traffic > 0.0 {
            totals.total_revenue / totals.initial_traffic
        } else {
            0.0
        };

        Self {
            steps,
            totals,
            passes_run,
        }
    }

    /// Metrics of the first step with `id`.
    pub fn step(&self, id: &str) -> Option<&SimulatedStep> {
        self.steps.iter().find(|s| s.step.id == id)
    }

    pub fn metrics(&self, id: &str) -> Option<&StepMetrics> {
        self.step(id).map(|s| &s.metrics)
    }

    /// Revenue, profit and cumulative revenue per step, for growth charts.
    pub fn growth_series(&self) -> Vec<GrowthPoint> {
        self.steps
            .iter()
            .map(|s| GrowthPoint {
                name: s.step.name.clone(),
                revenue: s.metrics.revenue,
                profit: s.metrics.profit(),
                cumulative_revenue: s.metrics.cumulative_revenue,
            })
            .collect()
    }
}
