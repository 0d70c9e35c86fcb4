use crate::model::{DataType, NodeId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown module `{0}`")]
    UnknownModule(String),

    #[error("unknown node type `{module}.{name}`")]
    UnknownNodeType { module: String, name: String },

    #[error("module `{0}` is already registered")]
    DuplicateModule(String),

    #[error("node type `{0}` is already registered in this module")]
    DuplicateNodeType(String),

    #[error("node declares {given} inputs but its signature has {expected}")]
    TooManyInputs { given: usize, expected: usize },

    #[error("input type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch { expected: DataType, actual: DataType },

    #[error("edge refers to unknown node")]
    UnknownEdgeSource,

    #[error("edge refers to unknown output")]
    UnknownOutput,

    #[error("unknown cell `{0}`")]
    UnknownCell(String),

    #[error("node requires a target cell")]
    MissingTarget,

    #[error("edge cycle detected")]
    EdgeCycle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("compile failed: {kind} (node={node:?} input={input:?})")]
pub struct CompileError {
    pub kind: ValidationError,
    pub node: Option<NodeId>,
    pub input: Option<u32>,
}

impl CompileError {
    pub fn new(kind: ValidationError) -> Self {
        Self {
            kind,
            node: None,
            input: None,
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn with_input(mut self, input: u32) -> Self {
        self.input = Some(input);
        self
    }
}

impl From<ValidationError> for CompileError {
    fn from(kind: ValidationError) -> Self {
        Self::new(kind)
    }
}

/// Errors raised while the host drives an already compiled graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {node:?} has no input {input}")]
    UnknownInput { node: NodeId, input: u32 },

    #[error("input type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch { expected: DataType, actual: DataType },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed graph definition: {0}")]
    Json(#[from] serde_json::Error),
}
