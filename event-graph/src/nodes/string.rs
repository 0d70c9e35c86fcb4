//! String nodes: comparison, number formatting and concatenation.

use crate::{
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};

#[derive(Debug, Default)]
pub struct StringEqualsNode;

impl RegisterNode for StringEqualsNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<String>();
        signature.add_input::<String>();
        signature.add_output::<bool>();
    }
}

impl BaseNode for StringEqualsNode {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let a = args.input::<String>(0).unwrap_or_default();
        let b = args.input::<String>(1).unwrap_or_default();
        args.set_output(0, a == b);
    }

    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        self.initialize(args, ctx);
    }
}

#[derive(Debug, Default)]
pub struct IntToStringNode;

impl RegisterNode for IntToStringNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<i32>();
        signature.add_output::<String>();
    }
}

impl BaseNode for IntToStringNode {
    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let value = args.input::<i32>(0).unwrap_or_default();
        args.set_output(0, value.to_string());
    }
}

/// Formats with the shortest representation that round-trips, so `2.0` prints as `2`.
#[derive(Debug, Default)]
pub struct FloatToStringNode;

impl RegisterNode for FloatToStringNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<f32>();
        signature.add_output::<String>();
    }
}

impl BaseNode for FloatToStringNode {
    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let value = args.input::<f32>(0).unwrap_or_default();
        args.set_output(0, value.to_string());
    }
}

#[derive(Debug, Default)]
pub struct ConcatNode;

impl RegisterNode for ConcatNode {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<String>();
        signature.add_input::<String>();
        signature.add_output::<String>();
    }
}

impl BaseNode for ConcatNode {
    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let mut text = args.input::<String>(0).unwrap_or_default();
        text.push_str(&args.input::<String>(1).unwrap_or_default());
        args.set_output(0, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cells::CellStore,
        model::{DataType, Value},
    };

    fn text(value: &str) -> Value {
        Value::String(value.to_string())
    }

    fn execute(node: &mut dyn BaseNode, inputs: Vec<Value>, output: DataType) -> Vec<(u32, Value)> {
        let mut cells = CellStore::new();
        let mut args = NodeArguments::new(inputs, vec![output]);
        node.execute(&mut args, &mut ExecutionContext::new(&mut cells));
        args.take_outputs()
    }

    #[test]
    fn equals_compares_text() {
        assert_eq!(
            execute(&mut StringEqualsNode, vec![text("menu"), text("menu")], DataType::Bool),
            vec![(0, Value::Bool(true))]
        );
        assert_eq!(
            execute(&mut StringEqualsNode, vec![text("menu"), text("Menu")], DataType::Bool),
            vec![(0, Value::Bool(false))]
        );
    }

    #[test]
    fn equals_is_computed_on_initialize() {
        let mut cells = CellStore::new();
        let mut args = NodeArguments::new(vec![text(""), text("")], vec![DataType::Bool]);
        StringEqualsNode.initialize(&mut args, &mut ExecutionContext::new(&mut cells));
        assert_eq!(args.take_outputs(), vec![(0, Value::Bool(true))]);
    }

    #[test]
    fn numbers_format_as_text() {
        assert_eq!(
            execute(&mut IntToStringNode, vec![Value::I32(-42)], DataType::String),
            vec![(0, text("-42"))]
        );
        assert_eq!(
            execute(&mut FloatToStringNode, vec![Value::F32(1.5)], DataType::String),
            vec![(0, text("1.5"))]
        );
        assert_eq!(
            execute(&mut FloatToStringNode, vec![Value::F32(2.0)], DataType::String),
            vec![(0, text("2"))]
        );
    }

    #[test]
    fn concat_joins_in_order_on_execute_only() {
        assert_eq!(
            execute(&mut ConcatNode, vec![text("state "), text("1")], DataType::String),
            vec![(0, text("state 1"))]
        );

        let mut cells = CellStore::new();
        let mut args = NodeArguments::new(vec![text("a"), text("b")], vec![DataType::String]);
        ConcatNode.initialize(&mut args, &mut ExecutionContext::new(&mut cells));
        assert!(args.take_outputs().is_empty());
    }
}
