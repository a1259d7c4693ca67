use super::finite_or_zero;
use super::weights::BranchSplit;
use crate::funnel::Funnel;

/// A weighted edge into a stage: `parent`'s output times `weight` percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InboundLink {
    pub parent: usize,
    pub weight: f64,
}

/// A funnel step reduced to the numbers the relaxation loop needs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlanNode {
    Source {
        traffic: f64,
        cost: f64,
    },
    Stage {
        conversion_rate: f64,
        product_price: f64,
        cost_per_acquisition: f64,
        inbound: Vec<InboundLink>,
    },
}

/// Index-based form of a funnel: all id lookups and branch normalisation happen
/// once here instead of on every pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlowPlan {
    pub nodes: Vec<PlanNode>,
}

impl FlowPlan {
    pub fn compile(funnel: &Funnel) -> Self {
        let mut nodes: Vec<PlanNode> = funnel
            .iter()
            .map(|step| {
                let cpa = finite_or_zero(step.cost_per_acquisition);
                if step.is_entry() {
                    let m = step.entry_metrics().copied().unwrap_or_default();
                    let traffic = finite_or_zero(m.traffic_volume);
                    PlanNode::Source {
                        traffic,
                        cost: traffic * finite_or_zero(m.cost_per_click)
                            + traffic * finite_or_zero(m.cost_per_lead),
                    }
                } else {
                    let m = step.stage_metrics().copied().unwrap_or_default();
                    PlanNode::Stage {
                        conversion_rate: finite_or_zero(m.conversion_rate),
                        product_price: finite_or_zero(m.product_price),
                        cost_per_acquisition: cpa,
                        inbound: Vec::new(),
                    }
                }
            })
            .collect();

        for (parent, step) in funnel.iter().enumerate() {
            let split = BranchSplit::of(funnel, step);
            for (target, weight) in split.iter() {
                let Some(child) = funnel.position(target) else {
                    continue;
                };
                if let PlanNode::Stage { inbound, .. } = &mut nodes[child] {
                    inbound.push(InboundLink { parent, weight });
                }
            }
        }

        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{Step, StepCategory};

    #[test]
    fn links_are_attached_to_children_only() {
        let funnel = Funnel::new(vec![
            Step::new("src", "Src", StepCategory::Traffic)
                .with_traffic(100.0, 2.0, 0.5)
                .with_next(["lp", "ghost"]),
            Step::new("lp", "Lp", StepCategory::Landing).with_next(["src", "lp"]),
        ]);
        let plan = FlowPlan::compile(&funnel);

        assert_eq!(plan.nodes.len(), 2);
        assert_eq!(
            plan.nodes[0],
            PlanNode::Source {
                traffic: 100.0,
                cost: 250.0,
            }
        );
        match &plan.nodes[1] {
            PlanNode::Stage { inbound, .. } => {
                // From the source, plus the self-loop; the back edge into the source is inert.
                assert_eq!(
                    inbound,
                    &vec![
                        InboundLink { parent: 0, weight: 100.0 },
                        InboundLink { parent: 1, weight: 50.0 },
                    ]
                );
            }
            other => panic!("expected a stage node, got {:?}", other),
        }
    }
}
