//! The manufactured Poisson problem on the square.
//!
//! Solves $-Delta u = f$ with homogeneous Dirichlet boundary conditions for
//! the forcing $f(x, y) = 5 pi^2 sin(pi x) sin(2 pi y)$, whose closed-form
//! solution on the unit square is $u(x, y) = sin(pi x) sin(2 pi y)$.

use crate::{
  assemble,
  fe::{self, SourceElvec},
  lse,
  mesh::TriangleMesh,
  Error,
};

use std::f64::consts::PI;

pub fn source_term(x: f64, y: f64) -> f64 {
  5.0 * PI.powi(2) * (PI * x).sin() * (2.0 * PI * y).sin()
}

pub fn exact_solution(x: f64, y: f64) -> f64 {
  (PI * x).sin() * (2.0 * PI * y).sin()
}

/// Nodal solution vector together with the discretization error.
pub struct PoissonSolution {
  pub u: na::DVector<f64>,
  /// Sum of squared pointwise differences against the exact solution.
  pub error: f64,
}

/// Runs the full pipeline: assembly, boundary enforcement, solve, error
/// evaluation.
pub fn solve_poisson(mesh: &TriangleMesh) -> Result<PoissonSolution, Error> {
  let mut galmat = assemble::assemble_galmat(mesh, fe::laplacian_elmat);
  let mut galvec = assemble::assemble_galvec(mesh, SourceElvec::new(source_term));
  tracing::debug!(
    nnodes = mesh.nnodes(),
    ntriangles = mesh.ntriangles(),
    nnz = galmat.ntriplets(),
    "assembled galerkin system"
  );

  lse::enforce_homogeneous_dirichlet_bc(mesh, &mut galmat, &mut galvec);

  let u = lse::solve_lse(&galmat, &galvec)?;

  let error = fe::squared_error_sum(&u, &exact_solution_at_nodes(mesh));
  tracing::debug!(error, "solved poisson problem");

  Ok(PoissonSolution { u, error })
}

/// Exact solution sampled at every mesh node.
pub fn exact_solution_at_nodes(mesh: &TriangleMesh) -> na::DVector<f64> {
  na::DVector::from_iterator(
    mesh.nnodes(),
    (0..mesh.nnodes()).map(|inode| {
      let pos = mesh.node_pos(inode);
      exact_solution(pos.x, pos.y)
    }),
  )
}
