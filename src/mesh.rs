//! Structured triangle mesh of the square domain.
//!
//! The square $[0, a]^2$ is divided into a cartesian grid of boxes and every
//! box is split along its diagonal into two triangles. The diagonal convention
//! is fixed, since it determines the sparsity pattern and the numerical
//! results of everything downstream.

use crate::{fe::ElementGeometry, Error, NodeIdx};

/// Parameters of the structured grid.
///
/// Validated on construction, so every [`TriangleMesh`] is well-formed.
#[derive(Debug, Clone, Copy)]
pub struct GridParams {
  ncells_axis: usize,
  side_length: f64,
}

impl GridParams {
  pub fn new(ncells_axis: usize, side_length: f64) -> Result<Self, Error> {
    if ncells_axis < 1 || !(side_length > 0.0) {
      return Err(Error::InvalidParams {
        ncells_axis,
        side_length,
      });
    }
    Ok(Self {
      ncells_axis,
      side_length,
    })
  }
  pub fn new_unit(ncells_axis: usize) -> Result<Self, Error> {
    Self::new(ncells_axis, 1.0)
  }

  pub fn ncells_axis(&self) -> usize {
    self.ncells_axis
  }
  pub fn side_length(&self) -> f64 {
    self.side_length
  }
  pub fn nnodes_axis(&self) -> usize {
    self.ncells_axis + 1
  }
  pub fn nnodes(&self) -> usize {
    self.nnodes_axis().pow(2)
  }
  pub fn ntriangles(&self) -> usize {
    2 * self.ncells_axis.pow(2)
  }
  /// Side length of a single grid box.
  pub fn mesh_width(&self) -> f64 {
    self.side_length / self.ncells_axis as f64
  }
}

/// converts linear node index to cartesian grid index
pub fn linear_index2cartesian_index(lin_idx: usize, dim_len: usize) -> (usize, usize) {
  (lin_idx % dim_len, lin_idx / dim_len)
}

/// converts cartesian grid index to linear node index
pub fn cartesian_index2linear_index(cart_idx: (usize, usize), dim_len: usize) -> usize {
  cart_idx.0 + cart_idx.1 * dim_len
}

pub struct TriangleMesh {
  params: GridParams,
  /// Node coordinates as columns of a $2 times n_"nodes"$ matrix.
  coords: na::DMatrix<f64>,
  triangles: Vec<[NodeIdx; 3]>,
}

impl TriangleMesh {
  /// Builds the structured triangulation for the given grid parameters.
  ///
  /// Grid box $(i, j)$ with origin node `idx` yields the two triangles
  /// `[idx, idx+(n+1), idx+1]` and `[idx+1, idx+(n+1), idx+(n+2)]`,
  /// which share the box diagonal. Fully deterministic.
  pub fn structured(params: GridParams) -> Self {
    let nnodes_axis = params.nnodes_axis();
    let h = params.mesh_width();

    let mut coords = na::DMatrix::zeros(2, params.nnodes());
    for inode in 0..params.nnodes() {
      let (i, j) = linear_index2cartesian_index(inode, nnodes_axis);
      coords[(0, inode)] = h * i as f64;
      coords[(1, inode)] = h * j as f64;
    }

    let mut triangles = Vec::with_capacity(params.ntriangles());
    for j in 0..params.ncells_axis() {
      for i in 0..params.ncells_axis() {
        let idx = cartesian_index2linear_index((i, j), nnodes_axis);
        triangles.push([idx, idx + nnodes_axis, idx + 1]);
        triangles.push([idx + 1, idx + nnodes_axis, idx + nnodes_axis + 1]);
      }
    }

    Self {
      params,
      coords,
      triangles,
    }
  }

  pub fn params(&self) -> &GridParams {
    &self.params
  }
  pub fn nnodes(&self) -> usize {
    self.params.nnodes()
  }
  pub fn ntriangles(&self) -> usize {
    self.triangles.len()
  }
  pub fn coords(&self) -> &na::DMatrix<f64> {
    &self.coords
  }
  pub fn triangles(&self) -> &[[NodeIdx; 3]] {
    &self.triangles
  }

  pub fn node_pos(&self, inode: NodeIdx) -> na::Vector2<f64> {
    na::Vector2::new(self.coords[(0, inode)], self.coords[(1, inode)])
  }

  pub fn triangle_geometry(&self, itri: usize) -> ElementGeometry {
    ElementGeometry::new(self.triangles[itri].map(|inode| self.node_pos(inode)))
  }

  /// Whether the node lies on the boundary of the square.
  ///
  /// Decided on the cartesian grid index, which is exact, in contrast to a
  /// floating-point comparison of the coordinates.
  pub fn is_node_on_boundary(&self, inode: NodeIdx) -> bool {
    let (i, j) = linear_index2cartesian_index(inode, self.params.nnodes_axis());
    let last = self.params.nnodes_axis() - 1;
    i == 0 || i == last || j == 0 || j == last
  }

  /// All boundary nodes, each exactly once, in ascending index order.
  pub fn boundary_nodes(&self) -> Vec<NodeIdx> {
    (0..self.nnodes())
      .filter(|&inode| self.is_node_on_boundary(inode))
      .collect()
  }
}

#[cfg(test)]
mod test {
  use super::{GridParams, TriangleMesh};
  use crate::Error;

  #[test]
  fn unit_square_mesh() {
    let params = GridParams::new_unit(2).unwrap();
    let mesh = TriangleMesh::structured(params);
    #[rustfmt::skip]
    let expected_coords = na::DMatrix::from_column_slice(2, 9, &[
      0.0, 0.0,
      0.5, 0.0,
      1.0, 0.0,
      0.0, 0.5,
      0.5, 0.5,
      1.0, 0.5,
      0.0, 1.0,
      0.5, 1.0,
      1.0, 1.0,
    ]);
    assert_eq!(*mesh.coords(), expected_coords);
    let expected_triangles = vec![
      [0, 3, 1],
      [1, 3, 4],
      [1, 4, 2],
      [2, 4, 5],
      [3, 6, 4],
      [4, 6, 7],
      [4, 7, 5],
      [5, 7, 8],
    ];
    assert_eq!(mesh.triangles(), expected_triangles);
  }

  #[test]
  fn smallest_mesh() {
    let mesh = TriangleMesh::structured(GridParams::new_unit(1).unwrap());
    assert_eq!(mesh.nnodes(), 4);
    assert_eq!(mesh.triangles(), [[0, 2, 1], [1, 2, 3]]);
    assert!((0..4).all(|inode| mesh.is_node_on_boundary(inode)));
  }

  #[test]
  fn entity_counts() {
    for ncells_axis in 1..=6 {
      let params = GridParams::new_unit(ncells_axis).unwrap();
      let mesh = TriangleMesh::structured(params);
      assert_eq!(mesh.nnodes(), (ncells_axis + 1).pow(2));
      assert_eq!(mesh.ntriangles(), 2 * ncells_axis.pow(2));
      for tri in mesh.triangles() {
        assert!(tri.iter().all(|&inode| inode < mesh.nnodes()));
      }
    }
  }

  #[test]
  fn boundary_nodes() {
    let mesh = TriangleMesh::structured(GridParams::new_unit(2).unwrap());
    assert_eq!(mesh.boundary_nodes(), vec![0, 1, 2, 3, 5, 6, 7, 8]);
  }

  #[test]
  fn invalid_params_rejected() {
    assert!(matches!(
      GridParams::new(0, 1.0),
      Err(Error::InvalidParams { .. })
    ));
    assert!(matches!(
      GridParams::new(4, 0.0),
      Err(Error::InvalidParams { .. })
    ));
    assert!(matches!(
      GridParams::new(4, -2.0),
      Err(Error::InvalidParams { .. })
    ));
    assert!(matches!(
      GridParams::new(4, f64::NAN),
      Err(Error::InvalidParams { .. })
    ));
  }
}
