//! AdvanceFrame node.

use crate::{
    interpret::ADVANCE_FRAME_EVENT,
    model::Pulse,
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};

/// Fires its pulse output once per frame.
#[derive(Debug, Default)]
pub struct AdvanceFrameNode;

impl RegisterNode for AdvanceFrameNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_output::<Pulse>();
        signature.add_listener(ADVANCE_FRAME_EVENT);
    }
}

impl BaseNode for AdvanceFrameNode {
    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        args.set_output(0, Pulse);
    }
}
