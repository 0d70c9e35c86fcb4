//! Runtime side of a node: what the scheduler calls and what it hands over.

mod arguments;

pub use arguments::*;

use crate::{cells::CellStore, signature::NodeSignature};

/// Host state reachable from a node while it runs.
pub struct ExecutionContext<'a> {
    pub cells: &'a mut CellStore,
}

impl<'a> ExecutionContext<'a> {
    pub fn new(cells: &'a mut CellStore) -> Self {
        Self { cells }
    }
}

pub trait BaseNode: Send {
    /// Called once, in execution order, when the graph is instantiated.
    fn initialize(&mut self, _args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {}

    /// Called whenever an input became dirty or a listened event was broadcast.
    fn execute(&mut self, _args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {}
}

/// A node type that can be added to a [`Module`](crate::module::Module).
pub trait RegisterNode: BaseNode + 'static {
    fn on_register(signature: &mut NodeSignature);
}
