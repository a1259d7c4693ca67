//! Optional structural checks layered on top of the simulator.
//!
//! The simulator accepts anything and degrades gracefully; these checks exist so
//! editors and the CLI can tell a user *why* a funnel produces odd numbers.
//! Nothing here blocks a simulation.

use crate::funnel::{Funnel, Step};
use ahash::AHashSet;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// A single finding about a funnel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Issue {
    #[error("Step id '{id}' is used by {count} steps; only the first is reachable")]
    DuplicateId { id: String, count: usize },

    #[error("Step '{step}' links to unknown step '{target}'")]
    DanglingEdge { step: String, target: String },

    #[error("Step '{step}' links to itself")]
    SelfLoop { step: String },

    #[error("Branch weights of step '{step}' sum to {total}%; they will be scaled to 100%")]
    OverAllocatedWeights { step: String, total: f64 },

    #[error("Step '{step}' has a branch weight for '{target}', which it does not link to")]
    OrphanWeight { step: String, target: String },

    #[error("Conversion rate of step '{step}' is {rate}%, outside 0-100")]
    RateOutOfRange { step: String, rate: f64 },

    #[error("Field '{field}' of step '{step}' is negative ({value})")]
    NegativeValue {
        step: String,
        field: &'static str,
        value: f64,
    },

    #[error("Field '{field}' of step '{step}' is not a finite number; it will be read as 0")]
    NonFiniteValue { step: String, field: &'static str },

    #[error("Step '{step}' carries inputs that do not match its category {category}")]
    KindMismatch { step: String, category: String },

    #[error("Step '{step}' has no incoming links and is not a traffic source")]
    UnreachableStep { step: String },
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::DuplicateId { .. } | Issue::NonFiniteValue { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Id of the step the issue is about.
    pub fn step_id(&self) -> &str {
        match self {
            Issue::DuplicateId { id, .. } => id,
            Issue::DanglingEdge { step, .. }
            | Issue::SelfLoop { step }
            | Issue::OverAllocatedWeights { step, .. }
            | Issue::OrphanWeight { step, .. }
            | Issue::RateOutOfRange { step, .. }
            | Issue::NegativeValue { step, .. }
            | Issue::NonFiniteValue { step, .. }
            | Issue::KindMismatch { step, .. }
            | Issue::UnreachableStep { step } => step,
        }
    }
}

/// Runs every check over `funnel`, returning findings in step order.
pub fn validate(funnel: &Funnel) -> Vec<Issue> {
    let mut issues: Vec<Issue> = funnel
        .iter()
        .map(|s| s.id.as_str())
        .counts()
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .sorted_by_key(|(id, _)| funnel.position(id))
        .map(|(id, count)| Issue::DuplicateId {
            id: id.to_string(),
            count,
        })
        .collect();

    let linked: AHashSet<&str> = funnel
        .iter()
        .flat_map(|s| {
            s.next_steps
                .iter()
                .map(String::as_str)
                .filter(move |t| *t != s.id)
        })
        .collect();

    for step in funnel {
        check_edges(funnel, step, &mut issues);
        check_numbers(step, &mut issues);

        if !step.kind_matches_category() {
            issues.push(Issue::KindMismatch {
                step: step.id.clone(),
                category: step.category.to_string(),
            });
        }
        if !step.is_entry() && !linked.contains(step.id.as_str()) {
            issues.push(Issue::UnreachableStep {
                step: step.id.clone(),
            });
        }
    }

    issues
}

/// `true` when none of the findings is an error.
pub fn is_clean(issues: &[Issue]) -> bool {
    issues.iter().all(|i| i.severity() < Severity::Error)
}

fn check_edges(funnel: &Funnel, step: &Step, issues: &mut Vec<Issue>) {
    for target in step.next_steps.iter().unique() {
        if target == &step.id {
            issues.push(Issue::SelfLoop {
                step: step.id.clone(),
            });
        } else if !funnel.contains(target) {
            issues.push(Issue::DanglingEdge {
                step: step.id.clone(),
                target: target.clone(),
            });
        }
    }

    for target in step.branch_weights.keys().sorted() {
        if !step.links_to(target) {
            issues.push(Issue::OrphanWeight {
                step: step.id.clone(),
                target: target.clone(),
            });
        }
    }

    let total: f64 = funnel
        .outgoing_targets(step)
        .iter()
        .filter_map(|t| step.weight_for(t))
        .filter(|w| w.is_finite())
        .sum();
    if total > 100.0 {
        issues.push(Issue::OverAllocatedWeights {
            step: step.id.clone(),
            total,
        });
    }
}

fn check_numbers(step: &Step, issues: &mut Vec<Issue>) {
    let mut fields: Vec<(&'static str, f64)> = vec![("costPerAcquisition", step.cost_per_acquisition)];
    if let Some(m) = step.entry_metrics() {
        fields.push(("trafficVolume", m.traffic_volume));
        fields.push(("costPerClick", m.cost_per_click));
        fields.push(("costPerLead", m.cost_per_lead));
    }
    if let Some(m) = step.stage_metrics() {
        fields.push(("conversionRate", m.conversion_rate));
        fields.push(("productPrice", m.product_price));
    }
    fields.extend(
        step.branch_weights
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(_, w)| ("branchWeights", *w)),
    );

    for (field, value) in fields {
        if !value.is_finite() {
            issues.push(Issue::NonFiniteValue {
                step: step.id.clone(),
                field,
            });
        } else if value < 0.0 {
            issues.push(Issue::NegativeValue {
                step: step.id.clone(),
                field,
                value,
            });
        }
    }

    if let Some(m) = step.stage_metrics() {
        let rate = m.conversion_rate;
        if rate.is_finite() && !(0.0..=100.0).contains(&rate) {
            issues.push(Issue::RateOutOfRange {
                step: step.id.clone(),
                rate,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::StepCategory;

    #[test]
    fn sample_funnel_is_clean() {
        assert!(validate(&Funnel::sample()).is_empty());
    }

    #[test]
    fn reports_structural_problems() {
        let funnel = Funnel::new(vec![
            Step::new("src", "Src", StepCategory::Ad).with_next(["lp", "ghost"]),
            Step::new("lp", "Lp", StepCategory::Landing)
                .with_next(["lp", "src"])
                .with_weight("src", 90.0)
                .with_weight("lp", 30.0)
                .with_weight("nowhere", 5.0),
            Step::new("lonely", "Lonely", StepCategory::Sales),
        ]);
        let issues = validate(&funnel);

        assert!(issues.contains(&Issue::DanglingEdge {
            step: "src".into(),
            target: "ghost".into()
        }));
        assert!(issues.contains(&Issue::SelfLoop { step: "lp".into() }));
        assert!(issues.contains(&Issue::OrphanWeight {
            step: "lp".into(),
            target: "nowhere".into()
        }));
        assert!(issues.contains(&Issue::OverAllocatedWeights {
            step: "lp".into(),
            total: 120.0
        }));
        assert!(issues.contains(&Issue::UnreachableStep {
            step: "lonely".into()
        }));
        assert!(is_clean(&issues));
    }

    #[test]
    fn duplicates_and_non_finite_values_are_errors() {
        let mut mismatched = Step::new("m", "M", StepCategory::Sales);
        mismatched.kind = crate::funnel::StepKind::Entry(Default::default());
        let funnel = Funnel::new(vec![
            Step::new("a", "A", StepCategory::Sales).with_conversion(150.0, -4.0),
            Step::new("a", "Again", StepCategory::Sales),
            Step::new("nan", "NaN", StepCategory::Checkout)
                .with_conversion(f64::NAN, 0.0)
                .with_next(["m"]),
            mismatched,
        ]);
        let issues = validate(&funnel);

        assert_eq!(
            issues[0],
            Issue::DuplicateId {
                id: "a".into(),
                count: 2
            }
        );
        assert!(issues.contains(&Issue::RateOutOfRange {
            step: "a".into(),
            rate: 150.0
        }));
        assert!(issues.contains(&Issue::NegativeValue {
            step: "a".into(),
            field: "productPrice",
            value: -4.0
        }));

        let non_finite = Issue::NonFiniteValue {
            step: "nan".into(),
            field: "conversionRate",
        };
        assert!(issues.contains(&non_finite));
        assert_eq!(non_finite.severity(), Severity::Error);
        assert!(!issues.iter().any(|i| matches!(i, Issue::RateOutOfRange { step, .. } if step == "nan")));

        assert!(issues.contains(&Issue::KindMismatch {
            step: "m".into(),
            category: "SALES".into()
        }));
        assert!(!is_clean(&issues));
    }

    #[test]
    fn self_loop_alone_does_not_make_a_step_reachable() {
        let funnel = Funnel::new(vec![
            Step::new("src", "Src", StepCategory::Traffic).with_next(["lp"]),
            Step::new("lp", "Lp", StepCategory::Landing).with_next(["lp"]),
            Step::new("island", "Island", StepCategory::Sales).with_next(["island"]),
        ]);
        let issues = validate(&funnel);

        assert!(issues.contains(&Issue::UnreachableStep {
            step: "island".into()
        }));
        assert!(!issues.contains(&Issue::UnreachableStep { step: "lp".into() }));
        assert!(issues.contains(&Issue::SelfLoop {
            step: "island".into()
        }));
    }

    #[test]
    fn messages_name_the_step() {
        let issue = Issue::DanglingEdge {
            step: "lp".into(),
            target: "ghost".into(),
        };
        assert_eq!(issue.to_string(), "Step 'lp' links to unknown step 'ghost'");
        assert_eq!(issue.step_id(), "lp");
        assert_eq!(issue.severity(), Severity::Warning);
    }
}
