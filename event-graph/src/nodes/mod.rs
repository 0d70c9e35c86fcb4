//! Built-in node types and the setup routines that register them.
//!
//! Every `initialize_*_module` call creates one named module in the given registry. The host
//! calls them explicitly during setup, or all at once through [`register_builtin_modules`].
//! To add a node type:
//! 1. Create a new file in this folder (e.g., `my_node.rs`)
//! 2. Implement `RegisterNode` and `BaseNode` for your node
//! 3. Register it from the module setup routine it belongs to

mod advance_frame;
mod console_print;
mod logic;
mod math;
mod request_state;
mod string;

pub use advance_frame::*;
pub use console_print::*;
pub use logic::*;
pub use math::*;
pub use request_state::*;
pub use string::*;

use crate::{error::ValidationError, module::ModuleRegistry};

/// Module `game_state`: `request_state`.
pub fn initialize_state_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    registry
        .register_module("game_state")?
        .register_node::<RequestStateNode>("request_state", RequestStateNode::construct)?;
    Ok(())
}

/// Module `frame`: `advance_frame`.
pub fn initialize_frame_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    registry
        .register_module("frame")?
        .register_default_node::<AdvanceFrameNode>("advance_frame")?;
    Ok(())
}

/// Module `logic`: `boolean_pulse`, `and`, `or`, `xor`, `not`.
pub fn initialize_logic_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    registry
        .register_module("logic")?
        .register_default_node::<BooleanPulseNode>("boolean_pulse")?
        .register_node::<LogicNode>("and", LogicNode::and)?
        .register_node::<LogicNode>("or", LogicNode::or)?
        .register_node::<LogicNode>("xor", LogicNode::xor)?
        .register_default_node::<NotNode>("not")?;
    Ok(())
}

/// Modules `integer_math` and `float_math`.
pub fn initialize_math_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    register_math_nodes::<i32>(registry.register_module("integer_math")?)?;
    register_math_nodes::<f32>(registry.register_module("float_math")?)?;
    Ok(())
}

/// Module `debug`: `console_print`.
pub fn initialize_debug_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    registry
        .register_module("debug")?
        .register_default_node::<ConsolePrintNode>("console_print")?;
    Ok(())
}

/// Module `string`: `equals`, `int_to_string`, `float_to_string`, `concat`.
pub fn initialize_string_module(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    registry
        .register_module("string")?
        .register_default_node::<StringEqualsNode>("equals")?
        .register_default_node::<IntToStringNode>("int_to_string")?
        .register_default_node::<FloatToStringNode>("float_to_string")?
        .register_default_node::<ConcatNode>("concat")?;
    Ok(())
}

pub fn register_builtin_modules(registry: &mut ModuleRegistry) -> Result<(), ValidationError> {
    initialize_frame_module(registry)?;
    initialize_logic_module(registry)?;
    initialize_math_module(registry)?;
    initialize_debug_module(registry)?;
    initialize_string_module(registry)?;
    initialize_state_module(registry)?;
    Ok(())
}
