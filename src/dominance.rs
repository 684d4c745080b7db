//! Dominance relations and the comparators built on them.

use std::cmp::Ordering;

use crate::solution::Solution;

/// Constraint-aware Pareto dominance over solutions.
///
/// `compare(a, b)` returns `Less` if `a` dominates `b`, `Greater` if `b`
/// dominates `a` and `Equal` if the two are mutually non-dominated. When
/// constraint handling is enabled (the default), any difference in
/// constraint violation decides the comparison outright: the solution
/// violating less wins, regardless of objective values. Otherwise plain
/// Pareto dominance applies: `a` dominates `b` iff it is no worse on
/// every objective and strictly better on at least one.
///
/// The comparison is a pure function of objective and constraint values
/// and costs O(M) per call.
#[derive(Clone, Copy, Debug)]
pub struct DominanceComparator {
  constraint_handling: bool,
}

impl DominanceComparator {
  /// Creates a comparator with constraint handling enabled.
  pub fn new() -> Self {
    Self {
      constraint_handling: true,
    }
  }

  /// Creates a comparator that never consults constraint violations.
  pub fn ignoring_constraints() -> Self {
    Self {
      constraint_handling: false,
    }
  }

  /// Compares two solutions, `Less` meaning `a` dominates `b`.
  pub fn compare<V, const M: usize>(
    &self,
    a: &Solution<V, M>,
    b: &Solution<V, M>,
  ) -> Ordering {
    if self.constraint_handling {
      let (va, vb) = (a.constraint_violation(), b.constraint_violation());
      if va != vb {
        return if va < vb {
          Ordering::Less
        } else {
          Ordering::Greater
        };
      }
    }
    pareto_dominance(a.objectives(), b.objectives())
  }
}

impl Default for DominanceComparator {
  fn default() -> Self {
    Self::new()
  }
}

/// Pareto dominance over raw objective vectors, lower is better.
fn pareto_dominance(a: &[f64], b: &[f64]) -> Ordering {
  let mut ord = Ordering::Equal;
  for (x, y) in a.iter().zip(b) {
    match (ord, x.partial_cmp(y).expect("NaN objective encountered")) {
      (Ordering::Equal, next_ord) => ord = next_ord,
      (Ordering::Greater, Ordering::Less)
      | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
      _ => {}
    }
  }
  ord
}

/// The crowded-comparison operator: ascending front rank first, then
/// descending crowding distance. Solutions that have not been ranked yet
/// read as rank 0 with distance 0.
///
/// `Less` means `a` is preferred over `b`.
pub fn rank_then_crowding<V, const M: usize>(
  a: &Solution<V, M>,
  b: &Solution<V, M>,
) -> Ordering {
  a.rank()
    .unwrap_or(0)
    .cmp(&b.rank().unwrap_or(0))
    .then_with(|| {
      b.crowding_distance()
        .unwrap_or(0.0)
        .total_cmp(&a.crowding_distance().unwrap_or(0.0))
    })
}

/// Returns clones of the mutually non-dominated members of `solutions`,
/// preserving their input order.
pub fn non_dominated<V, const M: usize>(
  solutions: &[Solution<V, M>],
) -> Vec<Solution<V, M>>
where
  V: Clone,
{
  let comparator = DominanceComparator::new();
  solutions
    .iter()
    .enumerate()
    .filter(|(i, s)| {
      solutions
        .iter()
        .enumerate()
        .all(|(j, other)| *i == j || comparator.compare(other, s) != Ordering::Less)
    })
    .map(|(_, s)| s.clone())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn solution(objectives: [f64; 2]) -> Solution<f64, 2> {
    Solution::with_objectives(vec![], objectives)
  }

  #[test]
  fn test_pareto_dominance() {
    let comparator = DominanceComparator::new();
    // (1, 1) dominates (2, 2)
    assert_eq!(
      comparator.compare(&solution([1.0, 1.0]), &solution([2.0, 2.0])),
      Ordering::Less
    );
    assert_eq!(
      comparator.compare(&solution([2.0, 2.0]), &solution([1.0, 1.0])),
      Ordering::Greater
    );
    // equal on one objective, better on the other still dominates
    assert_eq!(
      comparator.compare(&solution([1.0, 2.0]), &solution([1.0, 3.0])),
      Ordering::Less
    );
    // trade-offs are incomparable
    assert_eq!(
      comparator.compare(&solution([1.0, 5.0]), &solution([5.0, 1.0])),
      Ordering::Equal
    );
    // identical vectors do not dominate each other
    assert_eq!(
      comparator.compare(&solution([3.0, 3.0]), &solution([3.0, 3.0])),
      Ordering::Equal
    );
  }

  #[test]
  fn test_constraint_violation_wins_over_objectives() {
    let comparator = DominanceComparator::new();
    let feasible = solution([100.0, 100.0]);
    let mut infeasible = solution([1.0, 1.0]);
    infeasible.set_constraint_violation(2.5);

    assert_eq!(comparator.compare(&feasible, &infeasible), Ordering::Less);
    assert_eq!(comparator.compare(&infeasible, &feasible), Ordering::Greater);
  }

  #[test]
  fn test_equal_violations_fall_through_to_objectives() {
    let comparator = DominanceComparator::new();
    let mut a = solution([1.0, 1.0]);
    let mut b = solution([2.0, 2.0]);
    a.set_constraint_violation(1.0);
    b.set_constraint_violation(1.0);
    assert_eq!(comparator.compare(&a, &b), Ordering::Less);
  }

  #[test]
  fn test_ignoring_constraints() {
    let comparator = DominanceComparator::ignoring_constraints();
    let feasible = solution([100.0, 100.0]);
    let mut infeasible = solution([1.0, 1.0]);
    infeasible.set_constraint_violation(2.5);

    assert_eq!(comparator.compare(&infeasible, &feasible), Ordering::Less);
  }

  #[test]
  fn test_rank_then_crowding() {
    let mut a = solution([0.0, 0.0]);
    let mut b = solution([0.0, 0.0]);
    a.set_rank(0);
    b.set_rank(1);
    assert_eq!(rank_then_crowding(&a, &b), Ordering::Less);

    b.set_rank(0);
    a.set_crowding_distance(1.0);
    b.set_crowding_distance(2.0);
    assert_eq!(rank_then_crowding(&a, &b), Ordering::Greater);

    b.set_crowding_distance(1.0);
    assert_eq!(rank_then_crowding(&a, &b), Ordering::Equal);
  }

  #[test]
  fn test_unranked_solutions_compare_equal() {
    let a = solution([1.0, 2.0]);
    let b = solution([2.0, 1.0]);
    assert_eq!(rank_then_crowding(&a, &b), Ordering::Equal);
  }

  #[test]
  fn test_non_dominated_subset() {
    let solutions = vec![
      solution([1.0, 5.0]),
      solution([2.0, 4.0]),
      solution([3.0, 3.0]),
      solution([4.0, 4.0]), // dominated by (3, 3)
      solution([6.0, 6.0]), // dominated by everything above
    ];
    let front = non_dominated(&solutions);
    assert_eq!(front.len(), 3);
    assert_eq!(front[0].objectives(), &[1.0, 5.0]);
    assert_eq!(front[1].objectives(), &[2.0, 4.0]);
    assert_eq!(front[2].objectives(), &[3.0, 3.0]);
  }
}
