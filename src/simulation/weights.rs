use super::finite_or_zero;
use crate::funnel::{Funnel, Step};
use serde::Serialize;

/// The effective outbound split of one step across its live targets.
///
/// Explicit weights summing to at most 100 are used as stored and the remainder is
/// shared evenly by unweighted targets. Explicit weights summing to more than 100
/// are scaled down proportionally to exactly 100 and unweighted targets get nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSplit {
    pub parent: String,
    /// `(target id, effective percentage)` in outgoing-edge order.
    pub branches: Vec<(String, f64)>,
    /// Sum of the explicit weights that point at live targets.
    pub total_defined: f64,
}

impl BranchSplit {
    /// Computes the split of `parent` within `funnel`.
    pub fn of(funnel: &Funnel, parent: &Step) -> Self {
        let targets = funnel.outgoing_targets(parent);

        let total_defined: f64 = targets
            .iter()
            .filter_map(|t| parent.weight_for(t))
            .map(finite_or_zero)
            .sum();
        let undefined_count = targets
            .iter()
            .filter(|t| parent.weight_for(t).is_none())
            .count();
        let over_allocated = total_defined > 100.0;

        let branches = targets
            .iter()
            .map(|target| {
                let weight = match parent.weight_for(target).map(finite_or_zero) {
                    Some(w) if over_allocated => (w / total_defined) * 100.0,
                    Some(w) => w,
                    None if over_allocated => 0.0,
                    None => {
                        // Only reached for unweighted targets.
                        debug_assert!(undefined_count > 0);
                        (100.0 - total_defined) / undefined_count as f64
                    }
                };
                (target.to_string(), weight)
            })
            .collect();

        Self {
            parent: parent.id.clone(),
            branches,
            total_defined,
        }
    }

    pub fn is_over_allocated(&self) -> bool {
        self.total_defined > 100.0
    }

    /// Effective percentage sent to `target`, `0` when it is not a live target.
    pub fn weight_for(&self, target: &str) -> f64 {
        self.branches
            .iter()
            .find(|(t, _)| t == target)
            .map_or(0.0, |(_, w)| *w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.branches.iter().map(|(t, w)| (t.as_str(), *w))
    }
}

/// The percentage of `parent`'s outbound visitors routed to `target`.
///
/// Pure: derived from structural fields only, so presentation code can call it to
/// label edges and get the same figure the simulator used.
pub fn connection_weight(funnel: &Funnel, parent: &Step, target: &str) -> f64 {
    if !funnel.contains(target) || !parent.links_to(target) {
        return 0.0;
    }
    BranchSplit::of(funnel, parent).weight_for(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::StepCategory;
    use approx::assert_relative_eq;

    fn funnel_with(parent: Step) -> Funnel {
        let mut steps = vec![parent];
        for id in ["a", "b", "c"] {
            steps.push(Step::new(id, id, StepCategory::Sales));
        }
        Funnel::new(steps)
    }

    #[test]
    fn stored_weights_summing_to_100_are_untouched() {
        let funnel = funnel_with(
            Step::new("p", "P", StepCategory::Landing)
                .with_next(["a", "b"])
                .with_weight("a", 80.0)
                .with_weight("b", 20.0),
        );
        let parent = &funnel.steps()[0];
        assert_eq!(connection_weight(&funnel, parent, "a"), 80.0);
        assert_eq!(connection_weight(&funnel, parent, "b"), 20.0);
    }

    #[test]
    fn over_allocation_rescales_and_starves_unweighted() {
        let funnel = funnel_with(
            Step::new("p", "P", StepCategory::Landing)
                .with_next(["a", "b", "c"])
                .with_weight("a", 70.0)
                .with_weight("b", 50.0),
        );
        let parent = &funnel.steps()[0];
        assert_relative_eq!(connection_weight(&funnel, parent, "a"), 58.333333, epsilon = 1e-4);
        assert_relative_eq!(connection_weight(&funnel, parent, "b"), 41.666666, epsilon = 1e-4);
        assert_eq!(connection_weight(&funnel, parent, "c"), 0.0);
        assert!(BranchSplit::of(&funnel, parent).is_over_allocated());
    }

    #[test]
    fn remainder_is_split_evenly() {
        let funnel = funnel_with(
            Step::new("p", "P", StepCategory::Landing)
                .with_next(["a", "b", "c"])
                .with_weight("a", 30.0),
        );
        let parent = &funnel.steps()[0];
        assert_eq!(connection_weight(&funnel, parent, "b"), 35.0);
        assert_eq!(connection_weight(&funnel, parent, "c"), 35.0);
    }

    #[test]
    fn unconnected_and_dangling_targets_weigh_nothing() {
        let funnel = funnel_with(
            Step::new("p", "P", StepCategory::Landing)
                .with_next(["a", "ghost"])
                .with_weight("ghost", 60.0),
        );
        let parent = &funnel.steps()[0];
        assert_eq!(connection_weight(&funnel, parent, "b"), 0.0);
        assert_eq!(connection_weight(&funnel, parent, "ghost"), 0.0);
        // The weight on a dangling edge does not count towards the total.
        assert_eq!(connection_weight(&funnel, parent, "a"), 100.0);
    }

    #[test]
    fn duplicate_edges_count_once() {
        let funnel = funnel_with(Step::new("p", "P", StepCategory::Landing).with_next(["a", "a", "b"]));
        let parent = &funnel.steps()[0];
        assert_eq!(connection_weight(&funnel, parent, "a"), 50.0);
        assert_eq!(connection_weight(&funnel, parent, "b"), 50.0);
    }

    #[test]
    fn non_finite_weight_reads_as_zero() {
        let funnel = funnel_with(
            Step::new("p", "P", StepCategory::Landing)
                .with_next(["a", "b"])
                .with_weight("a", f64::NAN),
        );
        let parent = &funnel.steps()[0];
        assert_eq!(connection_weight(&funnel, parent, "a"), 0.0);
        assert_eq!(connection_weight(&funnel, parent, "b"), 100.0);
    }
}
