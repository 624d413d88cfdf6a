//! Dirichlet boundary enforcement and the linear system solve.

use crate::{
  matrix::{FaerLu, SparseMatrix},
  mesh::TriangleMesh,
  Error, NodeIdx,
};

/// Imposes $u = 0$ on every boundary node of the mesh.
///
/// This is the sole modification of the system after assembly.
pub fn enforce_homogeneous_dirichlet_bc(
  mesh: &TriangleMesh,
  galmat: &mut SparseMatrix,
  galvec: &mut na::DVector<f64>,
) {
  let boundary_nodes = mesh.boundary_nodes();
  fix_dofs_zero(&boundary_nodes, galmat, galvec);
}

/// Constrains the given DOFs to zero by strong imposition.
///
/// Drops the entire matrix row of every fixed DOF, puts a one on its
/// diagonal and zeros its load entry. Rows only; the columns of fixed DOFs
/// are left untouched, which makes the corrected matrix unsymmetric but
/// leaves the solution unchanged since the fixed values are zero.
pub fn fix_dofs_zero(dofs: &[NodeIdx], galmat: &mut SparseMatrix, galvec: &mut na::DVector<f64>) {
  let ndofs = galmat.nrows();
  let mut dof_flags = vec![false; ndofs];
  for &idof in dofs {
    dof_flags[idof] = true;
  }

  galmat.set_zero(|r, _| dof_flags[r]);
  for &idof in dofs {
    galmat.push(idof, idof, 1.0);
    galvec[idof] = 0.0;
  }
}

/// Solves the boundary-corrected system with a direct sparse LU solve.
///
/// A singular matrix surfaces as [`Error::SingularSystem`], either through a
/// failing factorization or through non-finite entries in the solution.
pub fn solve_lse(galmat: &SparseMatrix, galvec: &na::DVector<f64>) -> Result<na::DVector<f64>, Error> {
  let lu = FaerLu::new(galmat.to_nalgebra_csc())?;
  let solution = lu.solve(galvec);
  if !solution.iter().all(|v| v.is_finite()) {
    return Err(Error::SingularSystem(
      "solution contains non-finite entries".into(),
    ));
  }
  Ok(solution)
}
