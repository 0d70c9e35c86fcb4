//! Typed input/output declaration of a node type.

use crate::model::{DataType, PinType};

/// Declared once when a node type is registered, immutable afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeSignature {
    inputs: Vec<DataType>,
    outputs: Vec<DataType>,
    listeners: Vec<String>,
}

impl NodeSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input<T: PinType>(&mut self) -> &mut Self {
        self.inputs.push(T::data_type());
        self
    }

    pub fn add_output<T: PinType>(&mut self) -> &mut Self {
        self.outputs.push(T::data_type());
        self
    }

    /// Makes every instance of the node run when `event` is broadcast.
    pub fn add_listener(&mut self, event: impl Into<String>) -> &mut Self {
        self.listeners.push(event.into());
        self
    }

    pub fn inputs(&self) -> &[DataType] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[DataType] {
        &self.outputs
    }

    pub fn listeners(&self) -> &[String] {
        &self.listeners
    }

    pub fn input(&self, index: u32) -> Option<DataType> {
        self.inputs.get(index as usize).copied()
    }

    pub fn output(&self, index: u32) -> Option<DataType> {
        self.outputs.get(index as usize).copied()
    }
}
