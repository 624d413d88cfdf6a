extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod assemble;
pub mod fe;
pub mod lse;
pub mod matrix;
pub mod mesh;
pub mod poisson;

pub type NodeIdx = usize;

/// Failure modes of the solver pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("invalid grid parameters: ncells_axis={ncells_axis}, side_length={side_length}")]
  InvalidParams {
    ncells_axis: usize,
    side_length: f64,
  },
  #[error("linear system is singular: {0}")]
  SingularSystem(String),
}
