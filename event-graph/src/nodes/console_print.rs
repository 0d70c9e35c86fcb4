//! ConsolePrint node.

use crate::{
    model::Pulse,
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};

/// Logs the string on input 1 and forwards it.
#[derive(Debug, Default)]
pub struct ConsolePrintNode;

impl RegisterNode for ConsolePrintNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<Pulse>();
        signature.add_input::<String>();
        signature.add_output::<String>();
    }
}

impl BaseNode for ConsolePrintNode {
    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let text = args.input::<String>(1).unwrap_or_default();
        log::info!("{text}");
        args.set_output(0, text);
    }
}
