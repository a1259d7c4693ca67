use super::FunnelCommand;
use crate::error::EditError;
use crate::funnel::Funnel;
use tracing::debug;

/// The current funnel snapshot plus undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
    current: Funnel,
    past: Vec<Funnel>,
    future: Vec<Funnel>,
}

impl History {
    pub fn new(initial: Funnel) -> Self {
        Self {
            current: initial,
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn current(&self) -> &Funnel {
        &self.current
    }

    /// Applies `command`, recording the previous snapshot and discarding the redo stack.
    /// On error nothing changes.
    pub fn apply(&mut self, command: &FunnelCommand) -> Result<&Funnel, EditError> {
        let next = command.apply(&self.current)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.past.push(previous);
        self.future.clear();
        debug!(
            undo_depth = self.past.len(),
            steps = self.current.len(),
            "funnel edit committed"
        );
        Ok(&self.current)
    }

    /// Steps back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(previous) => {
                let undone = std::mem::replace(&mut self.current, previous);
                self.future.push(undone);
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let replaced = std::mem::replace(&mut self.current, next);
                self.past.push(replaced);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funnel::{Step, StepCategory};

    #[test]
    fn undo_and_redo_walk_the_snapshots() {
        let mut history = History::new(Funnel::sample());
        history
            .apply(&FunnelCommand::AddStep(Step::new("7", "Survey", StepCategory::Survey)))
            .unwrap();
        history
            .apply(&FunnelCommand::RemoveStep { id: "1".into() })
            .unwrap();
        assert_eq!(history.current().len(), 6);

        assert!(history.undo());
        assert!(history.current().contains("1"));
        assert!(history.undo());
        assert_eq!(history.current(), &Funnel::sample());
        assert!(!history.undo());

        assert!(history.redo());
        assert!(history.current().contains("7"));
        assert!(history.can_redo());
    }

    #[test]
    fn new_edit_discards_redo() {
        let mut history = History::new(Funnel::sample());
        history.apply(&FunnelCommand::Clear).unwrap();
        history.undo();
        assert!(history.can_redo());

        history
            .apply(&FunnelCommand::SetGroup {
                id: "6".into(),
                group: Some("Done".into()),
            })
            .unwrap();
        assert!(!history.can_redo());
        assert!(!history.redo());
    }

    #[test]
    fn failed_edit_leaves_history_untouched() {
        let mut history = History::new(Funnel::sample());
        let err = history.apply(&FunnelCommand::RemoveStep { id: "nope".into() });
        assert!(err.is_err());
        assert!(!history.can_undo());
        assert_eq!(history.current(), &Funnel::sample());
    }
}
