//! Solves the manufactured poisson problem on a sequence of refined meshes
//! and reports the algebraic convergence of the discretization error.

extern crate nalgebra as na;

use planefem::{
  mesh::{GridParams, TriangleMesh},
  poisson,
};

fn main() {
  tracing_subscriber::fmt::init();

  fn print_seperator() {
    let nchar = 50;
    println!("{}", "-".repeat(nchar));
  }

  print_seperator();
  println!(
    "| {:>4} | {:>10} | {:>10} | {:>9} |",
    "n", "mesh width", "error", "conv rate"
  );
  print_seperator();

  let mut errors = Vec::new();
  for ncells in [5, 10, 20, 40, 80] {
    let params = GridParams::new_unit(ncells).unwrap();
    let mesh = TriangleMesh::structured(params);
    let solution = poisson::solve_poisson(&mesh).unwrap();

    let conv_rate = if let Some(&prev_error) = errors.last() {
      let quot: f64 = solution.error / prev_error;
      -quot.log2()
    } else {
      f64::INFINITY
    };
    errors.push(solution.error);

    println!(
      "| {:>4} | {:>10.3e} | {:>10.3e} | {:>9.2} |",
      ncells,
      params.mesh_width(),
      solution.error,
      conv_rate
    );
  }
  print_seperator();
}
