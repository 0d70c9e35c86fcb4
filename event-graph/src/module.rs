//! Named modules of node types.
//!
//! Registration is an explicit step performed by the host during setup. There is no global
//! registry: every graph is compiled against the [`ModuleRegistry`] it is given.

use crate::{
    cells::CellId,
    error::ValidationError,
    runtime::{BaseNode, RegisterNode},
    signature::NodeSignature,
};
use std::collections::BTreeMap;

/// Per-instance binding handed to a node constructor.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    pub target: Option<CellId>,
}

impl NodeBinding {
    pub fn target(cell: CellId) -> Self {
        Self { target: Some(cell) }
    }
}

pub type NodeConstructor = fn(&NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError>;

fn construct_default<N: RegisterNode + Default>(
    _binding: &NodeBinding,
) -> Result<Box<dyn BaseNode>, ValidationError> {
    Ok(Box::new(N::default()))
}

pub struct NodeType {
    name: String,
    signature: NodeSignature,
    constructor: NodeConstructor,
}

impl NodeType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &NodeSignature {
        &self.signature
    }

    pub fn constructor(&self) -> NodeConstructor {
        self.constructor
    }

    pub fn construct(&self, binding: &NodeBinding) -> Result<Box<dyn BaseNode>, ValidationError> {
        (self.constructor)(binding)
    }
}

pub struct Module {
    name: String,
    node_types: BTreeMap<String, NodeType>,
}

impl Module {
    fn new(name: String) -> Self {
        Self {
            name,
            node_types: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `N` under `name`, declaring its signature through [`RegisterNode::on_register`].
    pub fn register_node<N: RegisterNode>(
        &mut self,
        name: &str,
        constructor: NodeConstructor,
    ) -> Result<&mut Self, ValidationError> {
        if self.node_types.contains_key(name) {
            return Err(ValidationError::DuplicateNodeType(name.to_string()));
        }

        let mut signature = NodeSignature::new();
        N::on_register(&mut signature);
        log::debug!(
            "registered node type {}.{name} ({} inputs, {} outputs)",
            self.name,
            signature.inputs().len(),
            signature.outputs().len()
        );

        self.node_types.insert(
            name.to_string(),
            NodeType {
                name: name.to_string(),
                signature,
                constructor,
            },
        );
        Ok(self)
    }

    /// Registers a node type that needs no binding.
    pub fn register_default_node<N: RegisterNode + Default>(
        &mut self,
        name: &str,
    ) -> Result<&mut Self, ValidationError> {
        self.register_node::<N>(name, construct_default::<N>)
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.get(name)
    }

    pub fn node_types(&self) -> impl Iterator<Item = &NodeType> {
        self.node_types.values()
    }
}

#[derive(Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_module(&mut self, name: &str) -> Result<&mut Module, ValidationError> {
        if self.modules.contains_key(name) {
            return Err(ValidationError::DuplicateModule(name.to_string()));
        }
        Ok(self
            .modules
            .entry(name.to_string())
            .or_insert_with(|| Module::new(name.to_string())))
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn node_type(&self, module: &str, name: &str) -> Result<&NodeType, ValidationError> {
        let m = self
            .module(module)
            .ok_or_else(|| ValidationError::UnknownModule(module.to_string()))?;
        m.node_type(name)
            .ok_or_else(|| ValidationError::UnknownNodeType {
                module: module.to_string(),
                name: name.to_string(),
            })
    }

    pub fn signature(&self, module: &str, name: &str) -> Result<&NodeSignature, ValidationError> {
        self.node_type(module, name).map(NodeType::signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataType, Pulse};

    #[derive(Default)]
    struct Probe;

    impl BaseNode for Probe {}

    impl RegisterNode for Probe {
        fn on_register(signature: &mut NodeSignature) {
            signature.add_input::<Pulse>().add_output::<f32>();
        }
    }

    #[test]
    fn registered_signature_is_queryable() {
        let mut registry = ModuleRegistry::new();
        registry
            .register_module("probe")
            .unwrap()
            .register_default_node::<Probe>("probe")
            .unwrap();

        let sig = registry.signature("probe", "probe").unwrap();
        assert_eq!(sig.inputs(), &[DataType::Pulse]);
        assert_eq!(sig.outputs(), &[DataType::F32]);
        assert!(registry
            .node_type("probe", "probe")
            .unwrap()
            .construct(&NodeBinding::default())
            .is_ok());
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut registry = ModuleRegistry::new();
        let module = registry.register_module("probe").unwrap();
        module.register_default_node::<Probe>("probe").unwrap();
        assert_eq!(
            module.register_default_node::<Probe>("probe").err(),
            Some(ValidationError::DuplicateNodeType("probe".to_string()))
        );
        assert_eq!(
            registry.register_module("probe").err(),
            Some(ValidationError::DuplicateModule("probe".to_string()))
        );
    }

    #[test]
    fn unknown_lookups() {
        let mut registry = ModuleRegistry::new();
        registry.register_module("probe").unwrap();

        assert_eq!(
            registry.signature("nope", "x").err(),
            Some(ValidationError::UnknownModule("nope".to_string()))
        );
        assert!(matches!(
            registry.signature("probe", "x"),
            Err(ValidationError::UnknownNodeType { .. })
        ));
    }
}
