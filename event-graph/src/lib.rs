#![forbid(unsafe_code)]

pub mod cells;
pub mod compile;
pub mod error;
pub mod interpret;
pub mod model;
pub mod module;
pub mod nodes;
pub mod runtime;
pub mod signature;
pub mod state_machine;

pub use crate::{
    cells::{CellId, CellStore},
    compile::{compile, CompiledGraph},
    error::{CompileError, LoadError, RuntimeError, ValidationError},
    interpret::{ExecutionEvent, Interpreter, InterpreterOutput, ADVANCE_FRAME_EVENT},
    model::{DataType, GraphDef, GraphId, InputDef, NodeDef, NodeId, PinType, Pulse, Value},
    module::{Module, ModuleRegistry, NodeBinding, NodeConstructor},
    nodes::{initialize_state_module, register_builtin_modules, RequestStateNode},
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
    state_machine::{StateId, StateMachine, StateMachineError, StateNode},
};

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        register_builtin_modules(&mut registry).expect("register");
        registry
    }

    fn instantiate(def: &GraphDef, cells: &mut CellStore) -> Interpreter {
        let compiled = compile(def, &registry(), cells).expect("compile");
        Interpreter::new(compiled, &mut ExecutionContext::new(cells)).expect("instantiate")
    }

    #[test]
    fn request_state_scenario() {
        let mut cells = CellStore::new();
        let state = cells.insert("requested_state", 0);

        let mut def = GraphDef::new(GraphId("scenario".to_string()));
        let request = def.add_node(
            NodeDef::new("game_state", "request_state").with_target("requested_state"),
        );
        let mut graph = instantiate(&def, &mut cells);
        assert_eq!(cells.get(state), Some(0));

        let mut ctx = ExecutionContext::new(&mut cells);
        graph.set_input(request, 1, Value::I32(7), &mut ctx).unwrap();
        graph.pulse(request, 0, &mut ctx).unwrap();
        assert_eq!(cells.get(state), Some(7));

        let mut ctx = ExecutionContext::new(&mut cells);
        let out = graph.set_input(request, 1, Value::I32(-3), &mut ctx).unwrap();
        assert_eq!(out.entered(), vec![request]);
        assert_eq!(cells.get(state), Some(-3));
    }

    #[test]
    fn frame_pulse_requests_state() {
        let mut cells = CellStore::new();
        let state = cells.insert("requested_state", 0);

        let mut def = GraphDef::new(GraphId("frame".to_string()));
        let frame = def.add_node(NodeDef::new("frame", "advance_frame"));
        let request = def.add_node(
            NodeDef::new("game_state", "request_state")
                .with_target("requested_state")
                .with_edge(frame, 0)
                .with_default(Value::I32(2)),
        );

        let mut graph = instantiate(&def, &mut cells);
        // Initialization alone writes nothing.
        assert_eq!(cells.get(state), Some(0));

        let out = graph.advance_frame(&mut ExecutionContext::new(&mut cells));
        assert_eq!(out.entered(), vec![frame, request]);
        assert_eq!(cells.get(state), Some(2));
    }

    #[test]
    fn computed_state_flows_through_math() {
        let mut cells = CellStore::new();
        let state = cells.insert("requested_state", 0);

        let mut def = GraphDef::new(GraphId("math".to_string()));
        let add = def.add_node(
            NodeDef::new("integer_math", "add")
                .with_default(Value::I32(3))
                .with_default(Value::I32(4)),
        );
        let frame = def.add_node(NodeDef::new("frame", "advance_frame"));
        let request = def.add_node(
            NodeDef::new("game_state", "request_state")
                .with_target("requested_state")
                .with_edge(frame, 0)
                .with_edge(add, 0),
        );

        let mut graph = instantiate(&def, &mut cells);
        // `add` initialized its output and pushed it into request_state's input.
        assert_eq!(graph.arguments(request).unwrap().input::<i32>(1), Some(7));

        let mut ctx = ExecutionContext::new(&mut cells);
        graph.advance_frame(&mut ctx);
        assert_eq!(cells.get(state), Some(7));

        // Changing an operand re-runs the adder and the request in order.
        let mut ctx = ExecutionContext::new(&mut cells);
        let out = graph.set_input(add, 1, Value::I32(10), &mut ctx).unwrap();
        assert_eq!(out.entered(), vec![add, request]);
        assert_eq!(cells.get(state), Some(13));
    }

    #[test]
    fn computed_value_is_printed_as_text() {
        let mut cells = CellStore::new();

        let mut def = GraphDef::new(GraphId("print".to_string()));
        let frame = def.add_node(NodeDef::new("frame", "advance_frame"));
        let add = def.add_node(
            NodeDef::new("integer_math", "add")
                .with_default(Value::I32(3))
                .with_default(Value::I32(1)),
        );
        let to_string = def.add_node(NodeDef::new("string", "int_to_string").with_edge(add, 0));
        let print = def.add_node(
            NodeDef::new("debug", "console_print")
                .with_edge(frame, 0)
                .with_edge(to_string, 0),
        );

        let mut graph = instantiate(&def, &mut cells);

        let mut ctx = ExecutionContext::new(&mut cells);
        let out = graph.set_input(add, 1, Value::I32(4), &mut ctx).unwrap();
        assert_eq!(out.entered(), vec![add, to_string, print]);
        assert!(out.events.contains(&ExecutionEvent::Output {
            node: print,
            output: 0,
            value: Value::String("7".to_string()),
        }));

        // The converted text stays on the printer's input for later frames.
        let out = graph.advance_frame(&mut ExecutionContext::new(&mut cells));
        assert_eq!(out.entered(), vec![frame, print]);
        assert_eq!(
            out.events.last(),
            Some(&ExecutionEvent::Output {
                node: print,
                output: 0,
                value: Value::String("7".to_string()),
            })
        );
    }

    #[test]
    fn boolean_pulse_gates_request() {
        let mut cells = CellStore::new();
        let state = cells.insert("requested_state", 0);

        let mut def = GraphDef::new(GraphId("gate".to_string()));
        let gate = def.add_node(NodeDef::new("logic", "boolean_pulse"));
        let on_true = def.add_node(
            NodeDef::new("game_state", "request_state")
                .with_target("requested_state")
                .with_edge(gate, 0)
                .with_default(Value::I32(1)),
        );
        let on_false = def.add_node(
            NodeDef::new("game_state", "request_state")
                .with_target("requested_state")
                .with_edge(gate, 1)
                .with_default(Value::I32(2)),
        );

        let mut graph = instantiate(&def, &mut cells);

        let mut ctx = ExecutionContext::new(&mut cells);
        let out = graph.set_input(gate, 0, Value::Bool(true), &mut ctx).unwrap();
        assert_eq!(out.entered(), vec![gate, on_true]);
        assert_eq!(cells.get(state), Some(1));

        let mut ctx = ExecutionContext::new(&mut cells);
        let out = graph.set_input(gate, 0, Value::Bool(false), &mut ctx).unwrap();
        assert_eq!(out.entered(), vec![gate, on_false]);
        assert_eq!(cells.get(state), Some(2));
    }

    #[test]
    fn separate_targets_stay_separate() {
        let mut cells = CellStore::new();
        let a = cells.insert("a", 1);
        let b = cells.insert("b", 2);

        let mut def = GraphDef::new(GraphId("targets".to_string()));
        let set_a = def.add_node(NodeDef::new("game_state", "request_state").with_target("a"));
        def.add_node(NodeDef::new("game_state", "request_state").with_target("b"));

        let mut graph = instantiate(&def, &mut cells);
        let mut ctx = ExecutionContext::new(&mut cells);
        graph.set_input(set_a, 1, Value::I32(50), &mut ctx).unwrap();

        assert_eq!(cells.get(a), Some(50));
        assert_eq!(cells.get(b), Some(2));
    }

    #[test]
    fn missing_target_fails_instantiation() {
        let mut cells = CellStore::new();
        let mut def = GraphDef::new(GraphId("unbound".to_string()));
        def.add_node(NodeDef::new("frame", "advance_frame"));
        def.add_node(NodeDef::new("game_state", "request_state"));

        let compiled = compile(&def, &registry(), &cells).expect("compile");
        let err = Interpreter::new(compiled, &mut ExecutionContext::new(&mut cells))
            .err()
            .expect("missing target");
        assert_eq!(err.kind, ValidationError::MissingTarget);
        assert_eq!(err.node, Some(NodeId(1)));
    }

    #[test]
    fn host_inputs_are_checked() {
        let mut cells = CellStore::new();
        cells.insert("requested_state", 0);
        let mut def = GraphDef::new(GraphId("checks".to_string()));
        let request = def.add_node(
            NodeDef::new("game_state", "request_state").with_target("requested_state"),
        );
        let mut graph = instantiate(&def, &mut cells);
        let mut ctx = ExecutionContext::new(&mut cells);

        assert_eq!(
            graph.set_input(request, 1, Value::Bool(true), &mut ctx).err(),
            Some(RuntimeError::TypeMismatch {
                expected: DataType::I32,
                actual: DataType::Bool
            })
        );
        assert_eq!(
            graph.pulse(request, 2, &mut ctx).err(),
            Some(RuntimeError::UnknownInput {
                node: request,
                input: 2
            })
        );
        assert_eq!(
            graph.pulse(NodeId(9), 0, &mut ctx).err(),
            Some(RuntimeError::UnknownNode(NodeId(9)))
        );
    }

    #[test]
    fn graph_loaded_from_json_drives_state_machine() {
        struct Frames;

        impl StateNode<(Interpreter, CellStore)> for Frames {
            fn advance_frame(
                &mut self,
                _delta_ms: i32,
                (graph, cells): &mut (Interpreter, CellStore),
            ) -> StateId {
                graph.advance_frame(&mut ExecutionContext::new(cells));
                cells
                    .lookup("requested_state")
                    .and_then(|id| cells.get(id))
                    .unwrap_or(-1)
            }
        }

        let json = r#"{
            "id": "menu",
            "nodes": [
                { "module": "frame", "name": "advance_frame" },
                { "module": "game_state", "name": "request_state",
                  "target": "requested_state",
                  "inputs": [ { "Edge": { "node": 0, "output": 0 } },
                              { "Default": { "I32": 1 } } ] }
            ]
        }"#;
        let def = GraphDef::from_json(json).unwrap();
        let mut cells = CellStore::new();
        cells.insert("requested_state", 0);
        let graph = instantiate(&def, &mut cells);
        let mut host = (graph, cells);

        let mut machine = StateMachine::new(2);
        machine.assign_state(0, Box::new(Frames)).unwrap();
        machine.assign_state(1, Box::new(Frames)).unwrap();
        machine.set_current_state_id(0, &mut host);

        machine.advance_frame(16, &mut host);
        assert_eq!(machine.current_state_id(), 1);
    }
}
