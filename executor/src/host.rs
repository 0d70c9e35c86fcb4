use event_graph::{
    compile, CellId, CellStore, CompileError, ExecutionContext, GraphDef, Interpreter,
    ModuleRegistry, StateId, StateNode,
};

/// Cell the graphs write their state requests into.
pub const REQUESTED_STATE_CELL: &str = "requested_state";

/// Everything a state can touch while it runs.
pub struct Host {
    pub graph: Interpreter,
    pub cells: CellStore,
    requested_state: CellId,
}

impl Host {
    /// Compiles and instantiates `def`. `cells` must already contain every cell the graph binds.
    pub fn new(
        def: &GraphDef,
        registry: &ModuleRegistry,
        mut cells: CellStore,
        initial_state: StateId,
    ) -> Result<Self, CompileError> {
        let requested_state = cells.insert(REQUESTED_STATE_CELL, initial_state);
        let compiled = compile(def, registry, &cells)?;
        let graph = Interpreter::new(compiled, &mut ExecutionContext::new(&mut cells))?;
        Ok(Self {
            graph,
            cells,
            requested_state,
        })
    }

    pub fn requested_state(&self) -> StateId {
        // The handle was minted by this store.
        self.cells.get(self.requested_state).unwrap_or(-1)
    }
}

/// A state whose transitions are decided by the graph.
///
/// Entering resets the request to the state's own id, so the machine stays put until the graph
/// asks for something else.
pub struct GraphState {
    id: StateId,
}

impl GraphState {
    pub fn new(id: StateId) -> Self {
        Self { id }
    }
}

impl StateNode<Host> for GraphState {
    fn advance_frame(&mut self, _delta_ms: i32, host: &mut Host) -> StateId {
        host.graph
            .advance_frame(&mut ExecutionContext::new(&mut host.cells));
        host.requested_state()
    }

    fn on_enter(&mut self, previous: StateId, host: &mut Host) {
        log::info!("entering state {} (from {previous})", self.id);
        host.cells.set(host.requested_state, self.id);
    }

    fn on_exit(&mut self, next: StateId, _host: &mut Host) {
        log::info!("leaving state {} (to {next})", self.id);
    }
}
