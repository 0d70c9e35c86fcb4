//! Boolean logic nodes.

use crate::{
    error::ValidationError,
    model::Pulse,
    module::NodeBinding,
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
    Xor,
}

impl LogicOp {
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            LogicOp::And => a && b,
            LogicOp::Or => a || b,
            LogicOp::Xor => a ^ b,
        }
    }
}

/// `and`, `or` and `xor`: two booleans in, one out.
#[derive(Debug)]
pub struct LogicNode {
    op: LogicOp,
}

impl LogicNode {
    pub fn new(op: LogicOp) -> Self {
        Self { op }
    }

    pub fn and(_binding: &NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError> {
        Ok(Box::new(Self::new(LogicOp::And)))
    }

    pub fn or(_binding: &NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError> {
        Ok(Box::new(Self::new(LogicOp::Or)))
    }

    pub fn xor(_binding: &NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError> {
        Ok(Box::new(Self::new(LogicOp::Xor)))
    }
}

impl RegisterNode for LogicNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<bool>();
        signature.add_input::<bool>();
        signature.add_output::<bool>();
    }
}

impl BaseNode for LogicNode {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let a = args.input::<bool>(0).unwrap_or_default();
        let b = args.input::<bool>(1).unwrap_or_default();
        args.set_output(0, self.op.apply(a, b));
    }

    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        self.initialize(args, ctx);
    }
}

#[derive(Debug, Default)]
pub struct NotNode;

impl RegisterNode for NotNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<bool>();
        signature.add_output::<bool>();
    }
}

impl BaseNode for NotNode {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let value = args.input::<bool>(0).unwrap_or_default();
        args.set_output(0, !value);
    }

    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        self.initialize(args, ctx);
    }
}

/// Turns a boolean into a pulse: output 0 fires when true, output 1 when false.
#[derive(Debug, Default)]
pub struct BooleanPulseNode;

impl RegisterNode for BooleanPulseNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<bool>();
        signature.add_output::<Pulse>();
        signature.add_output::<Pulse>();
    }
}

impl BaseNode for BooleanPulseNode {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let value = args.input::<bool>(0).unwrap_or_default();
        args.set_output(if value { 0 } else { 1 }, Pulse);
    }

    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        self.initialize(args, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cells::CellStore, model::Value};

    fn eval(node: &mut dyn BaseNode, inputs: Vec<Value>, outputs: usize) -> Vec<(u32, Value)> {
        let mut cells = CellStore::new();
        let outputs = vec![crate::model::DataType::Bool; outputs];
        let mut args = NodeArguments::new(inputs, outputs);
        node.execute(&mut args, &mut ExecutionContext::new(&mut cells));
        args.take_outputs()
    }

    #[test]
    fn truth_tables() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let inputs = vec![Value::Bool(a), Value::Bool(b)];
            assert_eq!(
                eval(&mut LogicNode::new(LogicOp::And), inputs.clone(), 1),
                vec![(0, Value::Bool(a && b))]
            );
            assert_eq!(
                eval(&mut LogicNode::new(LogicOp::Or), inputs.clone(), 1),
                vec![(0, Value::Bool(a || b))]
            );
            assert_eq!(
                eval(&mut LogicNode::new(LogicOp::Xor), inputs, 1),
                vec![(0, Value::Bool(a != b))]
            );
        }
        assert_eq!(
            eval(&mut NotNode, vec![Value::Bool(true)], 1),
            vec![(0, Value::Bool(false))]
        );
    }

    #[test]
    fn boolean_pulse_picks_output() {
        let mut cells = CellStore::new();
        let mut node = BooleanPulseNode;
        let pulses = vec![crate::model::DataType::Pulse; 2];

        let mut args = NodeArguments::new(vec![Value::Bool(true)], pulses.clone());
        node.execute(&mut args, &mut ExecutionContext::new(&mut cells));
        assert_eq!(args.take_outputs(), vec![(0, Value::Pulse)]);

        let mut args = NodeArguments::new(vec![Value::Bool(false)], pulses);
        node.execute(&mut args, &mut ExecutionContext::new(&mut cells));
        assert_eq!(args.take_outputs(), vec![(1, Value::Pulse)]);
    }
}
