use crate::error::Result;

/// Shapes of every argument and output of an operator, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferredShapes {
    pub arguments: Vec<Vec<usize>>,
    pub outputs: Vec<Vec<usize>>,
}

/// Contract between a custom operator and the graph that hosts it.
///
/// A host wires operators together by argument and output name, and runs
/// shape inference once per input shape to allocate buffers before any data
/// flows through the graph.
pub trait Operator {
    fn name(&self) -> &'static str;

    fn arguments(&self) -> &'static [&'static str];

    fn outputs(&self) -> &'static [&'static str];

    /// Infers the shapes of all arguments and outputs from the shapes known so far.
    ///
    /// `in_shapes` follows the order of [`Operator::arguments`]. An empty shape
    /// marks an argument whose shape is not known yet.
    fn infer_shape(&mut self, in_shapes: &[Vec<usize>]) -> Result<InferredShapes>;

    fn argument_index(&self, name: &str) -> Option<usize> {
        self.arguments().iter().position(|&a| a == name)
    }

    fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs().iter().position(|&o| o == name)
    }
}
