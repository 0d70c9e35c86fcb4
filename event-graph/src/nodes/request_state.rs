//! RequestState node.

use crate::{
    cells::CellId,
    error::ValidationError,
    model::Pulse,
    module::NodeBinding,
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};

/// Writes the integer on input 1 into the bound cell, telling the state machine which state it
/// should transition to next.
#[derive(Debug)]
pub struct RequestStateNode {
    state: CellId,
}

impl RequestStateNode {
    pub fn new(state: CellId) -> Self {
        Self { state }
    }

    pub fn state(&self) -> CellId {
        self.state
    }

    pub fn construct(binding: &NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError> {
        let state = binding.target.ok_or(ValidationError::MissingTarget)?;
        Ok(Box::new(Self::new(state)))
    }
}

impl RegisterNode for RequestStateNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<Pulse>();
        signature.add_input::<i32>();
    }
}

impl BaseNode for RequestStateNode {
    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        let Some(new_state) = args.input::<i32>(1) else {
            log::warn!("request_state: input 1 does not hold an integer");
            return;
        };
        if ctx.cells.set(self.state, new_state).is_none() {
            log::warn!("request_state: cell {:?} does not resolve", self.state);
        }
    }
}
