//! Assembly of the global Galerkin system from element contributions.

use crate::{
  fe::{ElmatProvider, ElvecProvider},
  matrix::SparseMatrix,
  mesh::TriangleMesh,
};

/// Assembles the global stiffness matrix in triplet form.
///
/// Element contributions are scattered additively through the local-to-global
/// node map of each triangle. The accumulation is commutative, so the element
/// order has no influence beyond rounding order.
pub fn assemble_galmat(mesh: &TriangleMesh, elmat: impl ElmatProvider) -> SparseMatrix {
  let mut galmat = SparseMatrix::zeros(mesh.nnodes(), mesh.nnodes());
  for (itri, tri) in mesh.triangles().iter().enumerate() {
    let geo = mesh.triangle_geometry(itri);
    let Some(elmat) = elmat.eval(&geo) else {
      tracing::warn!("skipping degenerate element {itri}");
      continue;
    };
    for (plocal, &pglobal) in tri.iter().enumerate() {
      for (qlocal, &qglobal) in tri.iter().enumerate() {
        galmat.push(pglobal, qglobal, elmat[(plocal, qlocal)]);
      }
    }
  }
  galmat
}

/// Assembles the global load vector.
pub fn assemble_galvec(mesh: &TriangleMesh, elvec: impl ElvecProvider) -> na::DVector<f64> {
  let mut galvec = na::DVector::zeros(mesh.nnodes());
  for (itri, tri) in mesh.triangles().iter().enumerate() {
    let geo = mesh.triangle_geometry(itri);
    let Some(elvec) = elvec.eval(&geo) else {
      tracing::warn!("skipping degenerate element {itri}");
      continue;
    };
    for (plocal, &pglobal) in tri.iter().enumerate() {
      galvec[pglobal] += elvec[plocal];
    }
  }
  galvec
}
