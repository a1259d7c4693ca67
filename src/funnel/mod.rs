//! The funnel graph: steps, their categories and the edge queries the simulator relies on.

mod category;
mod sample;
mod step;
mod template;

pub use category::StepCategory;
pub use step::{EntryMetrics, StageMetrics, Step, StepKind};
pub use template::Template;

use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Group name reported for steps without a `group_name`.
pub const UNGROUPED: &str = "Ungrouped";

/// An ordered, immutable snapshot of funnel steps.
///
/// Step order is significant: it drives cumulative revenue and display, not flow.
/// Ids resolve to their first occurrence when duplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Step>", into = "Vec<Step>")]
pub struct Funnel {
    steps: Vec<Step>,
    index: AHashMap<String, usize>,
}

impl From<Vec<Step>> for Funnel {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl From<Funnel> for Vec<Step> {
    fn from(funnel: Funnel) -> Self {
        funnel.steps
    }
}

impl FromIterator<Step> for Funnel {
    fn from_iter<T: IntoIterator<Item = Step>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Funnel {
    pub fn new(steps: Vec<Step>) -> Self {
        let mut index = AHashMap::with_capacity(steps.len());
        for (position, step) in steps.iter().enumerate() {
            index.entry(step.id.clone()).or_insert(position);
        }
        Self { steps, index }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Position of the step `id` resolves to.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn resolve_step(&self, id: &str) -> Option<&Step> {
        self.position(id).map(|i| &self.steps[i])
    }

    pub fn is_entry(&self, step: &Step) -> bool {
        step.is_entry()
    }

    /// The outgoing targets of `step` that exist in this funnel, without duplicates,
    /// in the order they were first listed.
    pub fn outgoing_targets<'a>(&self, step: &'a Step) -> Vec<&'a str> {
        step.next_steps
            .iter()
            .map(String::as_str)
            .filter(|id| self.contains(id))
            .unique()
            .collect()
    }

    /// Steps that list `id` among their live outgoing targets, in funnel order.
    pub fn parents_of(&self, id: &str) -> Vec<&Step> {
        if !self.contains(id) {
            return Vec::new();
        }
        self.steps.iter().filter(|s| s.links_to(id)).collect()
    }

    /// Step positions per group, groups in order of first appearance.
    pub fn groups(&self) -> Vec<(String, Vec<usize>)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, s)| (s.group_name.as_deref().unwrap_or(UNGROUPED), i))
            .into_group_map()
            .into_iter()
            .sorted_by_key(|(_, positions)| positions[0])
            .map(|(name, positions)| (name.to_string(), positions))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Funnel {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
