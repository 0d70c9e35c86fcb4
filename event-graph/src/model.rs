use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphId(pub String);

/// Index of a node inside its graph definition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// A trigger. Carries no payload.
    Pulse,
    Bool,
    I32,
    F32,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Pulse,
    Bool(bool),
    I32(i32),
    F32(f32),
    String(String),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Pulse => DataType::Pulse,
            Value::Bool(_) => DataType::Bool,
            Value::I32(_) => DataType::I32,
            Value::F32(_) => DataType::F32,
            Value::String(_) => DataType::String,
        }
    }

    /// The value an input holds before anything has been written to it.
    pub fn default_for(data_type: DataType) -> Self {
        match data_type {
            DataType::Pulse => Value::Pulse,
            DataType::Bool => Value::Bool(false),
            DataType::I32 => Value::I32(0),
            DataType::F32 => Value::F32(0.0),
            DataType::String => Value::String(String::new()),
        }
    }
}

/// Marker type for pulse (trigger) pins.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Pulse;

/// Rust types that can travel along a pin.
pub trait PinType: Sized + 'static {
    fn data_type() -> DataType;

    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl PinType for Pulse {
    fn data_type() -> DataType {
        DataType::Pulse
    }

    fn from_value(value: &Value) -> Option<Self> {
        matches!(value, Value::Pulse).then_some(Pulse)
    }

    fn into_value(self) -> Value {
        Value::Pulse
    }
}

impl PinType for bool {
    fn data_type() -> DataType {
        DataType::Bool
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl PinType for i32 {
    fn data_type() -> DataType {
        DataType::I32
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::I32(i) => Some(*i),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::I32(self)
    }
}

impl PinType for f32 {
    fn data_type() -> DataType {
        DataType::F32
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::F32(f) => Some(*f),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::F32(self)
    }
}

impl PinType for String {
    fn data_type() -> DataType {
        DataType::String
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

/// Where an input slot gets its value from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputDef {
    /// A literal value set when the graph is instantiated.
    Default(Value),
    /// Connected to an output of another node.
    Edge { node: NodeId, output: u32 },
    /// Holds the default of the input's type.
    Unset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub module: String,
    pub name: String,
    /// Name of the host cell this node is bound to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputDef>,
}

impl NodeDef {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            target: None,
            inputs: Vec::new(),
        }
    }

    pub fn with_target(mut self, cell: impl Into<String>) -> Self {
        self.target = Some(cell.into());
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.inputs.push(InputDef::Default(value));
        self
    }

    pub fn with_edge(mut self, node: NodeId, output: u32) -> Self {
        self.inputs.push(InputDef::Edge { node, output });
        self
    }

    pub fn with_unset(mut self) -> Self {
        self.inputs.push(InputDef::Unset);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDef {
    pub id: GraphId,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

impl GraphDef {
    pub fn new(id: GraphId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: NodeDef) -> NodeId {
        let node_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        node_id
    }

    pub fn node(&self, node_id: NodeId) -> Option<&NodeDef> {
        self.nodes.get(node_id.0 as usize)
    }

    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
