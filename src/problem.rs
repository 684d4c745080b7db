//! The external problem contract.

use rand::RngCore;

use crate::solution::Solution;

/// A multi-objective optimization problem.
///
/// The framework never defines problems itself; it only consumes this
/// contract. `V` is the decision variable encoding and `M` the number of
/// objectives, both fixed per problem. Objectives follow the
/// lower-is-better convention.
///
/// Randomized solution factories draw from the generator passed in
/// rather than a global one, so a whole run reproduces from a single
/// seed.
pub trait Problem<V, const M: usize> {
  /// Creates a fresh, unevaluated solution.
  fn create_solution(&self, rng: &mut dyn RngCore) -> Solution<V, M>;

  /// Evaluates a solution, populating its objective vector in place.
  fn evaluate(&self, solution: &mut Solution<V, M>);

  /// Returns `true` if the problem declares constraints. Evaluators call
  /// [`evaluate_constraints`](Problem::evaluate_constraints) right after
  /// [`evaluate`](Problem::evaluate) when this returns `true`.
  fn has_constraints(&self) -> bool {
    false
  }

  /// Evaluates a solution's constraints, populating its constraint
  /// violation degree in place. The default does nothing.
  fn evaluate_constraints(&self, _solution: &mut Solution<V, M>) {}
}
