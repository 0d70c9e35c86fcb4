//! Frame-driven state machine.
//!
//! Each frame the current state reports which state should run next; graphs usually feed that
//! decision through a `request_state` node writing into a host cell.

use thiserror::Error;

pub type StateId = i32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("state id {0} is out of range")]
    InvalidState(StateId),
}

pub trait StateNode<H> {
    /// Runs one frame and returns the id of the state to run next.
    fn advance_frame(&mut self, delta_ms: i32, host: &mut H) -> StateId;

    fn on_enter(&mut self, _previous: StateId, _host: &mut H) {}

    fn on_exit(&mut self, _next: StateId, _host: &mut H) {}
}

pub struct StateMachine<H> {
    states: Vec<Option<Box<dyn StateNode<H>>>>,
    current: StateId,
}

impl<H> StateMachine<H> {
    /// Creates a machine with `state_count` empty slots. It is done until a state is selected.
    pub fn new(state_count: usize) -> Self {
        Self {
            states: (0..state_count).map(|_| None).collect(),
            current: -1,
        }
    }

    pub fn assign_state(
        &mut self,
        id: StateId,
        state: Box<dyn StateNode<H>>,
    ) -> Result<(), StateMachineError> {
        let slot = self
            .slot(id)
            .ok_or(StateMachineError::InvalidState(id))?;
        self.states[slot] = Some(state);
        Ok(())
    }

    /// Switches to `new_id`, calling the exit/enter hooks only when the id actually changes.
    pub fn set_current_state_id(&mut self, new_id: StateId, host: &mut H) {
        if new_id == self.current {
            return;
        }

        let previous = self.current;
        if let Some(state) = self.state_mut(previous) {
            state.on_exit(new_id, host);
        }
        if let Some(state) = self.state_mut(new_id) {
            state.on_enter(previous, host);
        }
        log::debug!("state {previous} -> {new_id}");
        self.current = new_id;
    }

    pub fn advance_frame(&mut self, delta_ms: i32, host: &mut H) {
        let current = self.current;
        let Some(state) = self.state_mut(current) else {
            return;
        };
        let next = state.advance_frame(delta_ms, host);
        self.set_current_state_id(next, host);
    }

    pub fn current_state_id(&self) -> StateId {
        self.current
    }

    /// The machine is done once its current id falls outside the state range.
    pub fn is_done(&self) -> bool {
        self.slot(self.current).is_none()
    }

    fn slot(&self, id: StateId) -> Option<usize> {
        usize::try_from(id).ok().filter(|i| *i < self.states.len())
    }

    fn state_mut(&mut self, id: StateId) -> Option<&mut Box<dyn StateNode<H>>> {
        let slot = self.slot(id)?;
        self.states[slot].as_mut()
    }
}
