use crate::{
    model::{DataType, PinType, Value},
    signature::NodeSignature,
};

/// Argument block of a single node instance.
///
/// Inputs are always populated: the scheduler fills them with the type's default when the graph
/// is instantiated and overwrites them as upstream outputs arrive.
#[derive(Debug, Clone)]
pub struct NodeArguments {
    inputs: Vec<Value>,
    dirty: Vec<bool>,
    outputs: Vec<DataType>,
    emitted: Vec<(u32, Value)>,
}

impl NodeArguments {
    pub fn new(inputs: Vec<Value>, outputs: Vec<DataType>) -> Self {
        let dirty = vec![false; inputs.len()];
        Self {
            inputs,
            dirty,
            outputs,
            emitted: Vec::new(),
        }
    }

    pub(crate) fn for_signature(signature: &NodeSignature) -> Self {
        Self::new(
            signature
                .inputs()
                .iter()
                .map(|ty| Value::default_for(*ty))
                .collect(),
            signature.outputs().to_vec(),
        )
    }

    /// Returns input `index` if it holds a `T`.
    pub fn input<T: PinType>(&self, index: u32) -> Option<T> {
        self.input_value(index).and_then(T::from_value)
    }

    pub fn input_value(&self, index: u32) -> Option<&Value> {
        self.inputs.get(index as usize)
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_input_dirty(&self, index: u32) -> bool {
        self.dirty.get(index as usize).copied().unwrap_or(false)
    }

    /// Overwrites input `index` and marks it dirty. Returns `false` if there is no such input.
    pub fn set_input(&mut self, index: u32, value: Value) -> bool {
        self.write_input(index, value, true)
    }

    pub(crate) fn write_input(&mut self, index: u32, value: Value, dirty: bool) -> bool {
        let index = index as usize;
        let Some(slot) = self.inputs.get_mut(index) else {
            return false;
        };
        *slot = value;
        self.dirty[index] |= dirty;
        true
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = false);
    }

    /// Emits `value` on output `index`. Mistyped or undeclared outputs are dropped.
    pub fn set_output<T: PinType>(&mut self, index: u32, value: T) {
        match self.outputs.get(index as usize) {
            Some(ty) if *ty == T::data_type() => self.emitted.push((index, value.into_value())),
            Some(ty) => log::warn!(
                "dropping output {index}: declared {ty:?}, got {:?}",
                T::data_type()
            ),
            None => log::warn!("dropping output {index}: not declared"),
        }
    }

    /// Drains the outputs emitted since the last call, in emission order.
    pub fn take_outputs(&mut self) -> Vec<(u32, Value)> {
        std::mem::take(&mut self.emitted)
    }
}
