extern crate nalgebra as na;

use planefem::{
  assemble, fe, lse,
  mesh::{GridParams, TriangleMesh},
  poisson,
};

#[test]
fn smallest_mesh_reduces_to_identity() {
  // With one box per axis all four nodes are boundary nodes, so the
  // corrected system is the identity with zero right-hand side.
  let mesh = TriangleMesh::structured(GridParams::new_unit(1).unwrap());
  let solution = poisson::solve_poisson(&mesh).unwrap();
  assert!(solution.u.iter().all(|&v| v == 0.0));
  // The exact solution vanishes at the corners only up to the rounding of
  // sin(pi), so the error is tiny but not bitwise zero.
  assert!(solution.error < 1e-60);
}

#[test]
fn boundary_values_are_zero() {
  let mesh = TriangleMesh::structured(GridParams::new_unit(8).unwrap());
  let solution = poisson::solve_poisson(&mesh).unwrap();
  for inode in mesh.boundary_nodes() {
    assert!(
      solution.u[inode].abs() <= 1e-12,
      "dirichlet constraint violated at node {inode}: {}",
      solution.u[inode]
    );
  }
  // The interior solution is nontrivial.
  assert!(solution.u.amax() > 0.1);
}

#[test]
fn convergence_under_refinement() {
  let errors: Vec<f64> = [5, 10, 20, 40]
    .iter()
    .map(|&ncells| {
      let mesh = TriangleMesh::structured(GridParams::new_unit(ncells).unwrap());
      poisson::solve_poisson(&mesh).unwrap().error
    })
    .collect();

  for pair in errors.windows(2) {
    assert!(
      pair[1] < pair[0],
      "error failed to decrease under refinement: {errors:?}"
    );
  }
  // Roughly second order in the mesh width; demand at least a modest
  // overall decay to catch gross regressions.
  assert!(errors[0] / errors[errors.len() - 1] > 4.0);
}

#[test]
fn partial_boundary_enforcement_is_detectable() {
  let ncells = 8;
  let mesh = TriangleMesh::structured(GridParams::new_unit(ncells).unwrap());
  // Bottom edge midpoint, a boundary node with interior neighbors.
  let skipped = ncells / 2;

  let mut galmat = assemble::assemble_galmat(&mesh, fe::laplacian_elmat);
  let mut galvec = assemble::assemble_galvec(&mesh, fe::SourceElvec::new(poisson::source_term));

  let enforced: Vec<_> = mesh
    .boundary_nodes()
    .into_iter()
    .filter(|&inode| inode != skipped)
    .collect();
  lse::fix_dofs_zero(&enforced, &mut galmat, &mut galvec);

  // The system stays solvable, but the solution disagrees with the
  // dirichlet constraint at the skipped node. It must not pass silently.
  let u = lse::solve_lse(&galmat, &galvec).unwrap();
  assert!(u[skipped].abs() > 1e-6);
}
