//! Element-local finite element kernels for linear (P1) triangles.

/// Tolerance below which the Jacobian determinant of an element counts as
/// numerically zero and the element is treated as degenerate.
///
/// A correctly generated structured mesh never produces such an element; the
/// guard only protects against accidental zero-area geometry.
pub const DEGENERACY_TOL: f64 = 1e-12;

/// Barycentric coordinates of the one-point quadrature rule.
///
/// The load is integrated with a single centroid evaluation. This is a
/// deliberately inexact rule and part of the contract, since it determines
/// the convergence behavior. Do not replace it with a higher-order rule.
pub const QUADRATURE_KSI: f64 = 1.0 / 3.0;
pub const QUADRATURE_ETA: f64 = 1.0 / 3.0;

/// Coordinates of the three vertices of a physical triangle element.
pub struct ElementGeometry {
  vertices: [na::Vector2<f64>; 3],
}

impl ElementGeometry {
  pub fn new(vertices: [na::Vector2<f64>; 3]) -> Self {
    Self { vertices }
  }

  pub fn vertices(&self) -> &[na::Vector2<f64>; 3] {
    &self.vertices
  }

  /// Jacobian of the affine map from the reference triangle to this element.
  pub fn jacobian(&self) -> na::Matrix2<f64> {
    let [r1, r2, r3] = &self.vertices;
    na::Matrix2::new(r2.x - r1.x, r2.y - r1.y, r3.x - r1.x, r3.y - r1.y)
  }

  /// Signed determinant of the Jacobian, twice the signed element area.
  pub fn det_jacobian(&self) -> f64 {
    self.jacobian().determinant()
  }

  pub fn is_degenerate(&self) -> bool {
    self.det_jacobian().abs() < DEGENERACY_TOL
  }

  /// Physical location of the barycentric point $(xi, eta)$.
  pub fn barycentric_point(&self, ksi: f64, eta: f64) -> na::Vector2<f64> {
    let [r1, r2, r3] = &self.vertices;
    r1 * (1.0 - ksi - eta) + r2 * ksi + r3 * eta
  }
}

pub trait ElmatProvider {
  /// Element matrix, or `None` for a degenerate element.
  fn eval(&self, geo: &ElementGeometry) -> Option<na::Matrix3<f64>>;
}
impl<F> ElmatProvider for F
where
  F: Fn(&ElementGeometry) -> Option<na::Matrix3<f64>>,
{
  fn eval(&self, geo: &ElementGeometry) -> Option<na::Matrix3<f64>> {
    self(geo)
  }
}

pub trait ElvecProvider {
  /// Element vector, or `None` for a degenerate element.
  fn eval(&self, geo: &ElementGeometry) -> Option<na::Vector3<f64>>;
}
impl<F> ElvecProvider for F
where
  F: Fn(&ElementGeometry) -> Option<na::Vector3<f64>>,
{
  fn eval(&self, geo: &ElementGeometry) -> Option<na::Vector3<f64>> {
    self(geo)
  }
}

/// Element Matrix Provider for the Laplacian.
///
/// Standard P1 stiffness kernel expressed through the edge vectors
/// $v_1 = r_2 - r_3$, $v_2 = r_3 - r_1$, $v_3 = r_1 - r_2$:
/// $A_(p q) = v_(p+1) dot v_(q+1) / (2 det J)$.
///
/// The determinant enters signed. On the structured mesh every element has
/// $det J = -h^2$, so the whole system is assembled negated; the sign cancels
/// in the solve.
pub fn laplacian_elmat(geo: &ElementGeometry) -> Option<na::Matrix3<f64>> {
  let detj = geo.det_jacobian();
  if detj.abs() < DEGENERACY_TOL {
    return None;
  }

  let [r1, r2, r3] = geo.vertices();
  let edges = [r2 - r3, r3 - r1, r1 - r2];

  let mut elmat = na::Matrix3::zeros();
  for p in 0..3 {
    for q in 0..3 {
      elmat[(p, q)] = edges[p].dot(&edges[q]) / (2.0 * detj);
    }
  }
  Some(elmat)
}

/// Element Vector Provider for a scalar source function.
///
/// One-point quadrature at the element centroid: the source is evaluated once
/// and distributed to the vertices with their barycentric weights, scaled by
/// $det J / 2$.
pub struct SourceElvec<F>
where
  F: Fn(f64, f64) -> f64,
{
  source: F,
}
impl<F> SourceElvec<F>
where
  F: Fn(f64, f64) -> f64,
{
  pub fn new(source: F) -> Self {
    Self { source }
  }
}
impl<F> ElvecProvider for SourceElvec<F>
where
  F: Fn(f64, f64) -> f64,
{
  fn eval(&self, geo: &ElementGeometry) -> Option<na::Vector3<f64>> {
    let detj = geo.det_jacobian();
    if detj.abs() < DEGENERACY_TOL {
      return None;
    }

    let point = geo.barycentric_point(QUADRATURE_KSI, QUADRATURE_ETA);
    let source_value = (self.source)(point.x, point.y);

    let weights = na::Vector3::new(
      1.0 - QUADRATURE_KSI - QUADRATURE_ETA,
      QUADRATURE_KSI,
      QUADRATURE_ETA,
    );
    Some(weights * (source_value * detj / 2.0))
  }
}

/// Sum of squared pointwise differences between a computed and an exact
/// nodal vector.
///
/// Deliberately unnormalized: no division by the node count and no square
/// root. This is the quantity whose decay under refinement is checked.
pub fn squared_error_sum(computed: &na::DVector<f64>, exact: &na::DVector<f64>) -> f64 {
  assert!(computed.len() == exact.len());
  computed
    .iter()
    .zip(exact.iter())
    .map(|(u, v)| (u - v).powi(2))
    .sum()
}
