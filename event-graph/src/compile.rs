use crate::{
    cells::CellStore,
    error::{CompileError, ValidationError},
    model::{GraphDef, GraphId, InputDef, NodeId, Value},
    module::{ModuleRegistry, NodeBinding, NodeConstructor},
    signature::NodeSignature,
};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
pub struct CompiledGraph {
    pub id: GraphId,
    /// Indexed by [`NodeId`].
    pub nodes: Vec<CompiledNode>,
    /// Node ids sorted by ascending `(depth, id)`.
    pub order: Vec<NodeId>,
    // Keyed by *output* (node, slot); an output may fan out to many inputs while every input has
    // at most one source.
    pub downstream: BTreeMap<(NodeId, u32), Vec<(NodeId, u32)>>,
    pub listeners: BTreeMap<String, Vec<NodeId>>,
}

impl CompiledGraph {
    pub fn node(&self, node_id: NodeId) -> Option<&CompiledNode> {
        self.nodes.get(node_id.0 as usize)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    Default(Value),
    Edge { node: NodeId, output: u32 },
}

#[derive(Clone)]
pub struct CompiledNode {
    pub module: String,
    pub name: String,
    pub signature: NodeSignature,
    pub constructor: NodeConstructor,
    pub binding: NodeBinding,
    /// One entry per declared input.
    pub inputs: Vec<InputSource>,
    pub depth: u32,
}

impl std::fmt::Debug for CompiledNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledNode")
            .field("module", &self.module)
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("binding", &self.binding)
            .field("inputs", &self.inputs)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

pub fn compile(
    graph: &GraphDef,
    registry: &ModuleRegistry,
    cells: &CellStore,
) -> Result<CompiledGraph, CompileError> {
    let mut nodes = Vec::with_capacity(graph.nodes.len());

    for (index, def) in graph.nodes.iter().enumerate() {
        let node_id = NodeId(index as u32);
        let node_type = registry
            .node_type(&def.module, &def.name)
            .map_err(|kind| CompileError::new(kind).with_node(node_id))?;
        let signature = node_type.signature();

        if def.inputs.len() > signature.inputs().len() {
            return Err(CompileError::new(ValidationError::TooManyInputs {
                given: def.inputs.len(),
                expected: signature.inputs().len(),
            })
            .with_node(node_id));
        }

        let binding = match def.target.as_deref() {
            Some(cell) => {
                let id = cells.lookup(cell).ok_or_else(|| {
                    CompileError::new(ValidationError::UnknownCell(cell.to_string()))
                        .with_node(node_id)
                })?;
                NodeBinding::target(id)
            }
            None => NodeBinding::default(),
        };

        let mut inputs = Vec::with_capacity(signature.inputs().len());
        for (slot, expected) in signature.inputs().iter().copied().enumerate() {
            let error = |kind: ValidationError| {
                CompileError::new(kind)
                    .with_node(node_id)
                    .with_input(slot as u32)
            };

            let source = match def.inputs.get(slot) {
                None | Some(InputDef::Unset) => InputSource::Default(Value::default_for(expected)),
                Some(InputDef::Default(value)) => {
                    if value.data_type() != expected {
                        return Err(error(ValidationError::TypeMismatch {
                            expected,
                            actual: value.data_type(),
                        }));
                    }
                    InputSource::Default(value.clone())
                }
                Some(InputDef::Edge { node, output }) => {
                    let source_def = graph
                        .node(*node)
                        .ok_or_else(|| error(ValidationError::UnknownEdgeSource))?;
                    let source_sig = registry
                        .signature(&source_def.module, &source_def.name)
                        .map_err(error)?;
                    let actual = source_sig
                        .output(*output)
                        .ok_or_else(|| error(ValidationError::UnknownOutput))?;
                    if actual != expected {
                        return Err(error(ValidationError::TypeMismatch { expected, actual }));
                    }
                    InputSource::Edge {
                        node: *node,
                        output: *output,
                    }
                }
            };
            inputs.push(source);
        }

        nodes.push(CompiledNode {
            module: def.module.clone(),
            name: def.name.clone(),
            signature: signature.clone(),
            constructor: node_type.constructor(),
            binding,
            inputs,
            depth: 0,
        });
    }

    let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    let mut downstream: BTreeMap<(NodeId, u32), Vec<(NodeId, u32)>> = BTreeMap::new();
    for (index, node) in nodes.iter().enumerate() {
        let node_id = NodeId(index as u32);
        for (slot, source) in node.inputs.iter().enumerate() {
            if let InputSource::Edge { node: from, output } = source {
                adjacency.entry(*from).or_default().push(node_id);
                downstream
                    .entry((*from, *output))
                    .or_default()
                    .push((node_id, slot as u32));
            }
        }
    }

    detect_cycles(nodes.len(), &adjacency)?;

    let mut depths = BTreeMap::new();
    for index in 0..nodes.len() {
        let depth = node_depth(NodeId(index as u32), &nodes, &mut depths);
        nodes[index].depth = depth;
    }

    let mut order: Vec<NodeId> = (0..nodes.len()).map(|i| NodeId(i as u32)).collect();
    order.sort_by_key(|id| (nodes[id.0 as usize].depth, *id));

    let mut listeners: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
    for node_id in order.iter().copied() {
        for event in nodes[node_id.0 as usize].signature.listeners() {
            listeners.entry(event.clone()).or_default().push(node_id);
        }
    }

    Ok(CompiledGraph {
        id: graph.id.clone(),
        nodes,
        order,
        downstream,
        listeners,
    })
}

fn node_depth(node: NodeId, nodes: &[CompiledNode], memo: &mut BTreeMap<NodeId, u32>) -> u32 {
    if let Some(depth) = memo.get(&node) {
        return *depth;
    }

    let mut depth = 0;
    for source in nodes[node.0 as usize].inputs.iter() {
        if let InputSource::Edge { node: from, .. } = source {
            depth = depth.max(node_depth(*from, nodes, memo) + 1);
        }
    }

    memo.insert(node, depth);
    depth
}

fn detect_cycles(
    node_count: usize,
    adjacency: &BTreeMap<NodeId, Vec<NodeId>>,
) -> Result<(), CompileError> {
    let mut visited = BTreeSet::new();
    let mut stack = BTreeSet::new();

    for node_id in (0..node_count).map(|i| NodeId(i as u32)) {
        if visited.contains(&node_id) {
            continue;
        }
        if let Some(on_cycle) = dfs_cycle(node_id, adjacency, &mut visited, &mut stack) {
            return Err(CompileError::new(ValidationError::EdgeCycle).with_node(on_cycle));
        }
    }

    Ok(())
}

/// Returns the node that closes a cycle, which is always part of it.
fn dfs_cycle(
    node: NodeId,
    adjacency: &BTreeMap<NodeId, Vec<NodeId>>,
    visited: &mut BTreeSet<NodeId>,
    stack: &mut BTreeSet<NodeId>,
) -> Option<NodeId> {
    visited.insert(node);
    stack.insert(node);

    if let Some(neighbors) = adjacency.get(&node) {
        for &next in neighbors.iter() {
            if stack.contains(&next) {
                return Some(next);
            }
            if !visited.contains(&next) {
                if let Some(on_cycle) = dfs_cycle(next, adjacency, visited, stack) {
                    return Some(on_cycle);
                }
            }
        }
    }

    stack.remove(&node);
    None
}
