use crate::{
    compile::{CompiledGraph, InputSource},
    error::{CompileError, RuntimeError},
    model::{NodeId, Value},
    runtime::{BaseNode, ExecutionContext, NodeArguments},
};
use std::collections::BTreeSet;

/// Broadcast by the host once per frame.
pub const ADVANCE_FRAME_EVENT: &str = "advance_frame";

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionEvent {
    EnterNode(NodeId),
    Output {
        node: NodeId,
        output: u32,
        value: Value,
    },
}

#[derive(Debug, Default, Clone)]
pub struct InterpreterOutput {
    pub events: Vec<ExecutionEvent>,
}

impl InterpreterOutput {
    pub fn entered(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ExecutionEvent::EnterNode(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

/// Pending executions, ordered by `(depth, id)` so sources always run before their consumers.
type Schedule = BTreeSet<(u32, NodeId)>;

/// A live instance of a compiled graph.
pub struct Interpreter {
    compiled: CompiledGraph,
    nodes: Vec<Box<dyn BaseNode>>,
    args: Vec<NodeArguments>,
}

impl Interpreter {
    /// Constructs every node and runs their `initialize` hooks in execution order.
    pub fn new(
        compiled: CompiledGraph,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<Self, CompileError> {
        let mut nodes = Vec::with_capacity(compiled.nodes.len());
        let mut args = Vec::with_capacity(compiled.nodes.len());

        for (index, node) in compiled.nodes.iter().enumerate() {
            let instance = (node.constructor)(&node.binding)
                .map_err(|kind| CompileError::new(kind).with_node(NodeId(index as u32)))?;

            let mut node_args = NodeArguments::for_signature(&node.signature);
            for (slot, source) in node.inputs.iter().enumerate() {
                if let InputSource::Default(value) = source {
                    node_args.write_input(slot as u32, value.clone(), false);
                }
            }

            nodes.push(instance);
            args.push(node_args);
        }

        let mut interpreter = Self {
            compiled,
            nodes,
            args,
        };
        interpreter.initialize(ctx);
        Ok(interpreter)
    }

    pub fn compiled(&self) -> &CompiledGraph {
        &self.compiled
    }

    pub fn arguments(&self, node_id: NodeId) -> Option<&NodeArguments> {
        self.args.get(node_id.0 as usize)
    }

    fn initialize(&mut self, ctx: &mut ExecutionContext<'_>) {
        for position in 0..self.compiled.order.len() {
            let node_id = self.compiled.order[position];
            let index = node_id.0 as usize;

            self.nodes[index].initialize(&mut self.args[index], ctx);

            // Values flow downstream but nothing is scheduled; consumers initialize later.
            for (output, value) in self.args[index].take_outputs() {
                if let Some(targets) = self.compiled.downstream.get(&(node_id, output)) {
                    for &(target, slot) in targets.iter() {
                        self.args[target.0 as usize].write_input(slot, value.clone(), false);
                    }
                }
            }
        }
    }

    /// Writes a host-provided value into an input and runs everything it triggers.
    pub fn set_input(
        &mut self,
        node_id: NodeId,
        input: u32,
        value: Value,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<InterpreterOutput, RuntimeError> {
        let node = self
            .compiled
            .node(node_id)
            .ok_or(RuntimeError::UnknownNode(node_id))?;
        let expected = node.signature.input(input).ok_or(RuntimeError::UnknownInput {
            node: node_id,
            input,
        })?;
        if value.data_type() != expected {
            return Err(RuntimeError::TypeMismatch {
                expected,
                actual: value.data_type(),
            });
        }

        let depth = node.depth;
        self.args[node_id.0 as usize].write_input(input, value, true);

        let mut schedule = Schedule::new();
        schedule.insert((depth, node_id));
        Ok(self.run(schedule, ctx))
    }

    pub fn pulse(
        &mut self,
        node_id: NodeId,
        input: u32,
        ctx: &mut ExecutionContext<'_>,
    ) -> Result<InterpreterOutput, RuntimeError> {
        self.set_input(node_id, input, Value::Pulse, ctx)
    }

    /// Runs every node listening for `event`.
    pub fn broadcast(&mut self, event: &str, ctx: &mut ExecutionContext<'_>) -> InterpreterOutput {
        let Some(listeners) = self.compiled.listeners.get(event) else {
            log::debug!("graph {:?}: no listeners for `{event}`", self.compiled.id);
            return InterpreterOutput::default();
        };

        let schedule = listeners
            .iter()
            .map(|id| (self.compiled.nodes[id.0 as usize].depth, *id))
            .collect();
        self.run(schedule, ctx)
    }

    pub fn advance_frame(&mut self, ctx: &mut ExecutionContext<'_>) -> InterpreterOutput {
        self.broadcast(ADVANCE_FRAME_EVENT, ctx)
    }

    fn run(&mut self, mut schedule: Schedule, ctx: &mut ExecutionContext<'_>) -> InterpreterOutput {
        let mut out = InterpreterOutput::default();

        while let Some((_, node_id)) = schedule.pop_first() {
            let index = node_id.0 as usize;
            let node = &self.compiled.nodes[index];
            log::debug!("executing {}.{} ({:?})", node.module, node.name, node_id);
            out.events.push(ExecutionEvent::EnterNode(node_id));

            self.nodes[index].execute(&mut self.args[index], ctx);
            self.args[index].clear_dirty();

            for (output, value) in self.args[index].take_outputs() {
                if let Some(targets) = self.compiled.downstream.get(&(node_id, output)) {
                    for &(target, slot) in targets.iter() {
                        let target_index = target.0 as usize;
                        self.args[target_index].write_input(slot, value.clone(), true);
                        schedule.insert((self.compiled.nodes[target_index].depth, target));
                    }
                }
                out.events.push(ExecutionEvent::Output {
                    node: node_id,
                    output,
                    value,
                });
            }
        }

        out
    }
}
