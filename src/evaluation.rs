//! Whole-population evaluation strategies.

use rayon::prelude::*;

use crate::{problem::Problem, solution::Solution};

/// A strategy that evaluates a whole solution collection against a
/// problem.
///
/// Evaluation of distinct solutions is independent, which makes this the
/// single legitimate parallelism point of the framework: the control
/// loop hands the collection over and only proceeds once every solution
/// in it has been evaluated. Whether that happens sequentially or across
/// a worker pool is transparent to the loop.
pub trait Evaluator<V, const M: usize, P: Problem<V, M>> {
  /// Evaluates every solution in `solutions`, returning the same
  /// collection with objectives (and constraint violations, if the
  /// problem declares constraints) populated.
  fn evaluate(
    &self,
    solutions: Vec<Solution<V, M>>,
    problem: &P,
  ) -> Vec<Solution<V, M>>;
}

/// Evaluates solutions one by one on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEvaluator;

impl<V, const M: usize, P: Problem<V, M>> Evaluator<V, M, P>
  for SequentialEvaluator
{
  fn evaluate(
    &self,
    mut solutions: Vec<Solution<V, M>>,
    problem: &P,
  ) -> Vec<Solution<V, M>> {
    for solution in solutions.iter_mut() {
      problem.evaluate(solution);
      if problem.has_constraints() {
        problem.evaluate_constraints(solution);
      }
    }
    solutions
  }
}

/// Evaluates the whole collection concurrently on the rayon thread pool,
/// joining before it returns: the loop never observes a
/// partially-evaluated batch.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelEvaluator;

impl<V, const M: usize, P> Evaluator<V, M, P> for ParallelEvaluator
where
  V: Send,
  P: Problem<V, M> + Sync,
{
  fn evaluate(
    &self,
    mut solutions: Vec<Solution<V, M>>,
    problem: &P,
  ) -> Vec<Solution<V, M>> {
    solutions.par_iter_mut().for_each(|solution| {
      problem.evaluate(solution);
      if problem.has_constraints() {
        problem.evaluate_constraints(solution);
      }
    });
    solutions
  }
}

#[cfg(test)]
mod tests {
  use rand::RngCore;

  use super::*;

  struct Line;

  impl Problem<f64, 2> for Line {
    fn create_solution(&self, _: &mut dyn RngCore) -> Solution<f64, 2> {
      Solution::new(vec![0.0])
    }

    fn evaluate(&self, solution: &mut Solution<f64, 2>) {
      let x = solution.variables()[0];
      solution.set_objectives([x, -x]);
    }

    fn has_constraints(&self) -> bool {
      true
    }

    fn evaluate_constraints(&self, solution: &mut Solution<f64, 2>) {
      // x must not exceed 5
      let x = solution.variables()[0];
      solution.set_constraint_violation((x - 5.0).max(0.0));
    }
  }

  fn population() -> Vec<Solution<f64, 2>> {
    (0..64).map(|i| Solution::new(vec![f64::from(i)])).collect()
  }

  #[test]
  fn test_sequential_evaluation_populates_everything() {
    let evaluated = SequentialEvaluator.evaluate(population(), &Line);
    for (i, solution) in evaluated.iter().enumerate() {
      let x = f64::from(i as u32);
      assert_eq!(solution.objectives(), &[x, -x]);
      assert_eq!(solution.constraint_violation(), (x - 5.0).max(0.0));
    }
  }

  #[test]
  fn test_parallel_matches_sequential() {
    let sequential = SequentialEvaluator.evaluate(population(), &Line);
    let parallel = ParallelEvaluator.evaluate(population(), &Line);
    for (s, p) in sequential.iter().zip(&parallel) {
      assert_eq!(s.objectives(), p.objectives());
      assert_eq!(s.constraint_violation(), p.constraint_violation());
    }
  }
}
