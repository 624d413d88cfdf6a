//! Sparse matrix storage and the direct solver backend.

use faer::solvers::SpSolver;
use itertools::Itertools;

use crate::Error;

/// Sparse matrix in triplet (COO) form.
///
/// Entries are accumulated additively, so pushing the same position twice
/// sums the values on conversion. Accumulation order is irrelevant up to
/// floating-point rounding.
#[derive(Default, Debug, Clone)]
pub struct SparseMatrix {
  nrows: usize,
  ncols: usize,
  triplets: Vec<(usize, usize, f64)>,
}

impl SparseMatrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self::from_triplets(nrows, ncols, Vec::new())
  }

  pub fn from_triplets(nrows: usize, ncols: usize, triplets: Vec<(usize, usize, f64)>) -> Self {
    Self {
      nrows,
      ncols,
      triplets,
    }
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }
  pub fn ncols(&self) -> usize {
    self.ncols
  }
  pub fn ntriplets(&self) -> usize {
    self.triplets.len()
  }
  pub fn triplets(&self) -> &[(usize, usize, f64)] {
    &self.triplets
  }

  pub fn push(&mut self, r: usize, c: usize, v: f64) {
    assert!(r < self.nrows && c < self.ncols);
    self.triplets.push((r, c, v));
  }

  /// Removes all triplets whose position satisfies the predicate.
  pub fn set_zero<F>(&mut self, predicate: F)
  where
    F: Fn(usize, usize) -> bool,
  {
    let mut i = 0;
    while i < self.triplets.len() {
      let (r, c, _) = self.triplets[i];
      if predicate(r, c) {
        self.triplets.swap_remove(i);
      } else {
        i += 1;
      }
    }
  }

  pub fn to_nalgebra_coo(&self) -> nas::CooMatrix<f64> {
    let (rows, cols, values): (Vec<_>, Vec<_>, Vec<_>) =
      self.triplets.iter().copied().multiunzip();
    nas::CooMatrix::try_from_triplets(self.nrows, self.ncols, rows, cols, values).unwrap()
  }

  pub fn to_nalgebra_csc(&self) -> nas::CscMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }

  pub fn to_nalgebra_dense(&self) -> na::DMatrix<f64> {
    (&self.to_nalgebra_coo()).into()
  }
}

type SparseMatrixFaer = faer::sparse::SparseColMat<usize, f64>;

pub fn nalgebra2faer(m: nas::CscMatrix<f64>) -> SparseMatrixFaer {
  let nrows = m.nrows();
  let ncols = m.ncols();
  let (col_ptrs, row_indices, values) = m.disassemble();

  let symbolic =
    faer::sparse::SymbolicSparseColMat::new_checked(nrows, ncols, col_ptrs, None, row_indices);
  faer::sparse::SparseColMat::new(symbolic, values)
}

/// Sparse LU factorization.
///
/// LU rather than Cholesky, because the boundary-corrected system is not
/// symmetric (only rows are replaced) and not definite. A failing
/// factorization surfaces as [`Error::SingularSystem`] instead of producing
/// garbage.
pub struct FaerLu {
  raw: faer::sparse::linalg::solvers::Lu<usize, f64>,
}
impl FaerLu {
  pub fn new(a: nas::CscMatrix<f64>) -> Result<Self, Error> {
    let raw = nalgebra2faer(a)
      .sp_lu()
      .map_err(|err| Error::SingularSystem(format!("sparse LU factorization failed: {err:?}")))?;
    Ok(Self { raw })
  }

  pub fn solve(&self, b: &na::DVector<f64>) -> na::DVector<f64> {
    let b = faer::col::from_slice(b.as_slice());
    na::DVector::from_vec(self.raw.solve(b).as_slice().to_vec())
  }
}

#[cfg(test)]
mod test {
  use super::SparseMatrix;
  use approx::assert_abs_diff_eq;

  #[test]
  fn duplicate_triplets_accumulate() {
    let mut sparse = SparseMatrix::zeros(2, 2);
    sparse.push(0, 0, 1.0);
    sparse.push(0, 0, 2.0);
    sparse.push(1, 0, -1.0);
    let dense = sparse.to_nalgebra_dense();
    let expected = na::DMatrix::from_row_slice(2, 2, &[3.0, 0.0, -1.0, 0.0]);
    assert_abs_diff_eq!(dense, expected);
  }

  #[test]
  fn set_zero_removes_rows() {
    let mut sparse = SparseMatrix::zeros(3, 3);
    for i in 0..3 {
      for j in 0..3 {
        sparse.push(i, j, 1.0);
      }
    }
    sparse.set_zero(|r, _| r == 1);
    assert_eq!(sparse.ntriplets(), 6);
    let dense = sparse.to_nalgebra_dense();
    assert_eq!(dense.row(1).sum(), 0.0);
    assert_eq!(dense.sum(), 6.0);
  }
}
