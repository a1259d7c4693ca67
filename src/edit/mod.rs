//! Structural edits as command objects over immutable funnel snapshots.
//!
//! Every command takes the current [`Funnel`] and returns a new one; the
//! simulator is then simply re-run on the result. [`History`] keeps the
//! snapshots needed for undo and redo.

mod history;

pub use history::History;

use crate::error::EditError;
use crate::funnel::{Funnel, Step, UNGROUPED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A single structural change to a funnel.
#[derive(Debug, Clone, PartialEq)]
pub enum FunnelCommand {
    /// Append a new step.
    AddStep(Step),
    /// Remove a step and every edge and weight pointing at it.
    RemoveStep { id: String },
    /// Insert an edge-less copy of `id` right after it.
    DuplicateStep { id: String, new_id: String },
    /// Swap the step at `index` with its neighbour. No-op at either end.
    MoveStep { index: usize, direction: Direction },
    /// Move the step at `from` so that it ends up at `to`.
    Reorder { from: usize, to: usize },
    Connect { from: String, to: String },
    /// Remove the edge and any weight attached to it.
    Disconnect { from: String, to: String },
    SetBranchWeight { from: String, to: String, weight: f64 },
    ClearBranchWeight { from: String, to: String },
    /// Rename every step in group `from`. Renaming to "Ungrouped" clears the group.
    RenameGroup { from: String, to: String },
    SetGroup { id: String, group: Option<String> },
    /// Swap in a whole new funnel, e.g. a template or a saved file.
    Replace(Funnel),
    Clear,
}

impl FunnelCommand {
    /// Applies the command to `funnel`, producing the next snapshot.
    pub fn apply(&self, funnel: &Funnel) -> Result<Funnel, EditError> {
        let mut steps = funnel.steps().to_vec();

        match self {
            FunnelCommand::AddStep(step) => {
                if funnel.contains(&step.id) {
                    return Err(EditError::DuplicateId(step.id.clone()));
                }
                steps.push(step.clone());
            }
            FunnelCommand::RemoveStep { id } => {
                require(funnel, id)?;
                steps.retain(|s| &s.id != id);
                for step in &mut steps {
                    step.next_steps.retain(|t| t != id);
                    step.branch_weights.remove(id);
                }
            }
            FunnelCommand::DuplicateStep { id, new_id } => {
                let index = require(funnel, id)?;
                if funnel.contains(new_id) {
                    return Err(EditError::DuplicateId(new_id.clone()));
                }
                let mut copy = steps[index].clone();
                copy.id = new_id.clone();
                copy.name = format!("{} (Copy)", copy.name);
                copy.next_steps.clear();
                copy.branch_weights.clear();
                steps.insert(index + 1, copy);
            }
            FunnelCommand::MoveStep { index, direction } => {
                check_index(*index, steps.len())?;
                match direction {
                    Direction::Up if *index > 0 => steps.swap(*index, index - 1),
                    Direction::Down if index + 1 < steps.len() => steps.swap(*index, index + 1),
                    _ => {}
                }
            }
            FunnelCommand::Reorder { from, to } => {
                check_index(*from, steps.len())?;
                check_index(*to, steps.len())?;
                let step = steps.remove(*from);
                steps.insert(*to, step);
            }
            FunnelCommand::Connect { from, to } => {
                let index = require(funnel, from)?;
                require(funnel, to)?;
                if from == to {
                    return Err(EditError::SelfConnection(from.clone()));
                }
                if !steps[index].links_to(to) {
                    steps[index].next_steps.push(to.clone());
                }
            }
            FunnelCommand::Disconnect { from, to } => {
                let index = require(funnel, from)?;
                let step = &mut steps[index];
                step.next_steps.retain(|t| t != to);
                step.branch_weights.remove(to);
            }
            FunnelCommand::SetBranchWeight { from, to, weight } => {
                let index = require(funnel, from)?;
                let step = &mut steps[index];
                if !step.links_to(to) {
                    return Err(EditError::NotConnected {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
                step.branch_weights.insert(to.clone(), *weight);
            }
            FunnelCommand::ClearBranchWeight { from, to } => {
                let index = require(funnel, from)?;
                steps[index].branch_weights.remove(to);
            }
            FunnelCommand::RenameGroup { from, to } => {
                let renamed = (to != UNGROUPED).then(|| to.clone());
                for step in &mut steps {
                    if step.group_name.as_deref().unwrap_or(UNGROUPED) == from {
                        step.group_name = renamed.clone();
                    }
                }
            }
            FunnelCommand::SetGroup { id, group } => {
                let index = require(funnel, id)?;
                steps[index].group_name = group.clone().filter(|g| !g.is_empty());
            }
            FunnelCommand::Replace(next) => return Ok(next.clone()),
            FunnelCommand::Clear => steps.clear(),
        }

        Ok(Funnel::new(steps))
    }
}

fn require(funnel: &Funnel, id: &str) -> Result<usize, EditError> {
    funnel
        .position(id)
        .ok_or_else(|| EditError::StepNotFound(id.to_string()))
}

fn check_index(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange { index, len })
    }
}
