//! Comparison and arithmetic nodes, instantiated for `i32` and `f32`.

use crate::{
    error::ValidationError,
    model::PinType,
    module::{Module, NodeBinding},
    runtime::{BaseNode, ExecutionContext, NodeArguments, RegisterNode},
    signature::NodeSignature,
};
use std::marker::PhantomData;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ComparisonOp {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEquals,
    LessThan,
    LessThanOrEquals,
}

impl ComparisonOp {
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            ComparisonOp::Equals => a == b,
            ComparisonOp::NotEquals => a != b,
            ComparisonOp::GreaterThan => a > b,
            ComparisonOp::GreaterThanOrEquals => a >= b,
            ComparisonOp::LessThan => a < b,
            ComparisonOp::LessThanOrEquals => a <= b,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Max,
    Min,
}

/// Operand types of the math modules.
pub trait Operand: PinType + Copy + Default + PartialOrd + Send {
    /// `None` when the result is undefined (integer division by zero).
    fn arithmetic(op: ArithmeticOp, a: Self, b: Self) -> Option<Self>;
}

impl Operand for i32 {
    fn arithmetic(op: ArithmeticOp, a: Self, b: Self) -> Option<Self> {
        match op {
            ArithmeticOp::Add => Some(a.wrapping_add(b)),
            ArithmeticOp::Subtract => Some(a.wrapping_sub(b)),
            ArithmeticOp::Multiply => Some(a.wrapping_mul(b)),
            ArithmeticOp::Divide => (b != 0).then(|| a.wrapping_div(b)),
            ArithmeticOp::Max => Some(a.max(b)),
            ArithmeticOp::Min => Some(a.min(b)),
        }
    }
}

impl Operand for f32 {
    fn arithmetic(op: ArithmeticOp, a: Self, b: Self) -> Option<Self> {
        Some(match op {
            ArithmeticOp::Add => a + b,
            ArithmeticOp::Subtract => a - b,
            ArithmeticOp::Multiply => a * b,
            ArithmeticOp::Divide => a / b,
            ArithmeticOp::Max => a.max(b),
            ArithmeticOp::Min => a.min(b),
        })
    }
}

fn operands<T: Operand>(args: &NodeArguments) -> (T, T) {
    (
        args.input::<T>(0).unwrap_or_default(),
        args.input::<T>(1).unwrap_or_default(),
    )
}

/// Two `T` in, one `bool` out.
#[derive(Debug)]
pub struct ComparisonNode<T> {
    op: ComparisonOp,
    _operand: PhantomData<fn() -> T>,
}

impl<T: Operand> ComparisonNode<T> {
    pub fn new(op: ComparisonOp) -> Self {
        Self {
            op,
            _operand: PhantomData,
        }
    }
}

impl<T: Operand> RegisterNode for ComparisonNode<T> {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<T>();
        signature.add_input::<T>();
        signature.add_output::<bool>();
    }
}

impl<T: Operand> BaseNode for ComparisonNode<T> {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        let (a, b) = operands::<T>(args);
        args.set_output(0, self.op.apply(a, b));
    }

    fn execute(&mut self, args: &mut NodeArguments, ctx: &mut ExecutionContext<'_>) {
        self.initialize(args, ctx);
    }
}

/// Two `T` in, one `T` out.
#[derive(Debug)]
pub struct ArithmeticNode<T> {
    op: ArithmeticOp,
    _operand: PhantomData<fn() -> T>,
}

impl<T: Operand> ArithmeticNode<T> {
    pub fn new(op: ArithmeticOp) -> Self {
        Self {
            op,
            _operand: PhantomData,
        }
    }

    fn compute(&self, args: &mut NodeArguments) {
        let (a, b) = operands::<T>(args);
        match T::arithmetic(self.op, a, b) {
            Some(result) => args.set_output(0, result),
            None => log::warn!("{:?}: undefined result, output left unchanged", self.op),
        }
    }
}

impl<T: Operand> RegisterNode for ArithmeticNode<T> {
    fn on_register(signature: &mut NodeSignature) {
        signature.add_input::<T>();
        signature.add_input::<T>();
        signature.add_output::<T>();
    }
}

impl<T: Operand> BaseNode for ArithmeticNode<T> {
    fn initialize(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        // max/min only produce a value once they run.
        if !matches!(self.op, ArithmeticOp::Max | ArithmeticOp::Min) {
            self.compute(args);
        }
    }

    fn execute(&mut self, args: &mut NodeArguments, _ctx: &mut ExecutionContext<'_>) {
        self.compute(args);
    }
}

macro_rules! constructor {
    ($node:ident, $op:expr) => {
        |_: &NodeBinding| -> Result<Box<dyn BaseNode>, ValidationError> {
            Ok(Box::new($node::<T>::new($op)))
        }
    };
}

/// Registers the comparison and arithmetic node types for `T` into `module`.
pub(crate) fn register_math_nodes<T: Operand>(module: &mut Module) -> Result<(), ValidationError> {
    use ArithmeticOp as A;
    use ComparisonOp as C;

    module
        .register_node::<ComparisonNode<T>>("equals", constructor!(ComparisonNode, C::Equals))?
        .register_node::<ComparisonNode<T>>("not_equals", constructor!(ComparisonNode, C::NotEquals))?
        .register_node::<ComparisonNode<T>>(
            "greater_than",
            constructor!(ComparisonNode, C::GreaterThan),
        )?
        .register_node::<ComparisonNode<T>>(
            "greater_than_or_equals",
            constructor!(ComparisonNode, C::GreaterThanOrEquals),
        )?
        .register_node::<ComparisonNode<T>>("less_than", constructor!(ComparisonNode, C::LessThan))?
        .register_node::<ComparisonNode<T>>(
            "less_than_or_equals",
            constructor!(ComparisonNode, C::LessThanOrEquals),
        )?
        .register_node::<ArithmeticNode<T>>("add", constructor!(ArithmeticNode, A::Add))?
        .register_node::<ArithmeticNode<T>>("subtract", constructor!(ArithmeticNode, A::Subtract))?
        .register_node::<ArithmeticNode<T>>("multiply", constructor!(ArithmeticNode, A::Multiply))?
        .register_node::<ArithmeticNode<T>>("divide", constructor!(ArithmeticNode, A::Divide))?
        .register_node::<ArithmeticNode<T>>("max", constructor!(ArithmeticNode, A::Max))?
        .register_node::<ArithmeticNode<T>>("min", constructor!(ArithmeticNode, A::Min))?;
    Ok(())
}
