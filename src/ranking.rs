//! Ranking strategies that partition populations into ordered fronts.

use std::cmp::Ordering;

use crate::{dominance::DominanceComparator, error::Error, solution::Solution};

/// An ordered front of mutually non-dominated (or equal-utility)
/// solutions.
pub type Front<V, const M: usize> = Vec<Solution<V, M>>;

/// A strategy that partitions a solution collection into ordered fronts,
/// best front first.
///
/// Implementations must return a true partition: every input solution
/// appears in exactly one front, and solutions of equal standing keep
/// their relative input order. Each solution gets its front number
/// recorded in its `Rank` attribute. The generational engine is agnostic
/// to which ranking is plugged in; see [`DominanceRanking`] and
/// [`AchievementRanking`](crate::scalarizing::AchievementRanking).
pub trait Ranking<V, const M: usize> {
  /// Partitions `solutions` into fronts. Fails with
  /// [`Error::InvalidInput`] if the collection is empty.
  fn rank(
    &self,
    solutions: Vec<Solution<V, M>>,
  ) -> Result<Vec<Front<V, M>>, Error>;
}

// index of a solution in the input vector
type SolutionIndex = usize;
// number of solutions dominating a solution
type DominanceCounter = u32;
// indices of the solutions dominated by a solution
type DominanceList = Vec<SolutionIndex>;

/// Fast non-dominated sorting.
///
/// Domination counters and dominated-index lists are filled with one pass
/// over all unique solution pairs, then fronts are peeled off by
/// decrementing the counters of everything the current front dominates.
/// Already-assigned solutions are never rescanned, so the whole sort is
/// O(n^2 * M) in comparisons and O(n^2) in bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub struct DominanceRanking {
  comparator: DominanceComparator,
}

impl DominanceRanking {
  /// Creates a ranking backed by a constraint-aware dominance comparator.
  pub fn new() -> Self {
    Self {
      comparator: DominanceComparator::new(),
    }
  }

  /// Creates a ranking backed by the given comparator.
  pub fn with_comparator(comparator: DominanceComparator) -> Self {
    Self { comparator }
  }
}

impl<V, const M: usize> Ranking<V, M> for DominanceRanking {
  fn rank(
    &self,
    solutions: Vec<Solution<V, M>>,
  ) -> Result<Vec<Front<V, M>>, Error> {
    if solutions.is_empty() {
      return Err(Error::InvalidInput(
        "cannot rank an empty solution collection".into(),
      ));
    }

    let mut dominance_lists: Vec<DominanceList> =
      vec![Vec::new(); solutions.len()];
    let mut dominance_counters: Vec<DominanceCounter> =
      vec![0; solutions.len()];
    let mut current_front: Vec<SolutionIndex> = Vec::new();

    // fill dominance lists and counters for each unique pair
    for p in 0..solutions.len() {
      for q in (p + 1)..solutions.len() {
        match self.comparator.compare(&solutions[p], &solutions[q]) {
          Ordering::Less => {
            dominance_lists[p].push(q);
            dominance_counters[q] += 1;
          }
          Ordering::Greater => {
            dominance_lists[q].push(p);
            dominance_counters[p] += 1;
          }
          Ordering::Equal => {}
        }
      }
      // all pairs involving `p` have been seen at this point
      if dominance_counters[p] == 0 {
        current_front.push(p);
      }
    }

    debug_assert!(
      !current_front.is_empty(),
      "first front must have at least 1 solution"
    );

    let mut front_indices: Vec<Vec<SolutionIndex>> = Vec::new();
    while !current_front.is_empty() {
      let mut next_front = Vec::new();
      for p in current_front.iter() {
        for q in dominance_lists[*p].iter() {
          dominance_counters[*q] -= 1;
          if dominance_counters[*q] == 0 {
            next_front.push(*q);
          }
        }
      }
      // discovery order depends on decrement order; restore input order
      next_front.sort_unstable();
      front_indices.push(std::mem::replace(&mut current_front, next_front));
    }

    let mut slots: Vec<_> = solutions.into_iter().map(Some).collect();
    let fronts = front_indices
      .into_iter()
      .enumerate()
      .map(|(rank, indices)| {
        indices
          .into_iter()
          .map(|i| {
            let mut solution =
              slots[i].take().expect("solution already moved out");
            solution.set_rank(rank);
            solution
          })
          .collect()
      })
      .collect();
    Ok(fronts)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn solution(objectives: [f64; 2]) -> Solution<u32, 2> {
    Solution::with_objectives(vec![], objectives)
  }

  #[test]
  fn test_empty_collection_is_rejected() {
    let ranking = DominanceRanking::new();
    assert!(matches!(
      ranking.rank(Vec::<Solution<u32, 2>>::new()),
      Err(Error::InvalidInput(_))
    ));
  }

  #[test]
  fn test_mutually_non_dominated_collection_is_one_front() {
    let ranking = DominanceRanking::new();
    let solutions = vec![
      solution([1.0, 5.0]),
      solution([2.0, 4.0]),
      solution([3.0, 3.0]),
      solution([4.0, 2.0]),
      solution([5.0, 1.0]),
    ];
    let fronts = ranking.rank(solutions).unwrap();
    assert_eq!(fronts.len(), 1);
    assert_eq!(fronts[0].len(), 5);
    assert!(fronts[0].iter().all(|s| s.rank() == Some(0)));
  }

  #[test]
  fn test_layered_collection() {
    let ranking = DominanceRanking::new();
    let solutions = vec![
      solution([1.0, 5.0]),
      solution([3.0, 3.0]),
      solution([5.0, 1.0]),
      solution([4.0, 4.0]), // dominated by (3, 3)
      solution([5.0, 5.0]), // dominated by (3, 3) and (4, 4)
    ];
    let fronts = ranking.rank(solutions).unwrap();
    assert_eq!(fronts.len(), 3);
    assert_eq!(fronts[0].len(), 3);
    assert_eq!(fronts[1].len(), 1);
    assert_eq!(fronts[1][0].objectives(), &[4.0, 4.0]);
    assert_eq!(fronts[2][0].objectives(), &[5.0, 5.0]);
    assert_eq!(fronts[1][0].rank(), Some(1));
    assert_eq!(fronts[2][0].rank(), Some(2));
  }

  #[test]
  fn test_fronts_partition_the_input() {
    let ranking = DominanceRanking::new();
    let solutions: Vec<_> = (0..20)
      .map(|i| {
        let x = f64::from(i % 7);
        let y = f64::from(i % 5);
        solution([x, y])
      })
      .collect();
    let total = solutions.len();
    let fronts = ranking.rank(solutions).unwrap();

    let flattened: Vec<_> = fronts.iter().flatten().collect();
    assert_eq!(flattened.len(), total);

    // front 0 is exactly the non-dominated subset of the whole input;
    // every later front is dominated by someone in an earlier front
    let comparator = DominanceComparator::new();
    for (k, front) in fronts.iter().enumerate() {
      for s in front {
        let dominated_within = front
          .iter()
          .any(|other| comparator.compare(other, s) == Ordering::Less);
        assert!(!dominated_within, "front {k} is not an antichain");
        if k > 0 {
          let dominated_by_earlier = fronts[..k].iter().flatten().any(
            |earlier| comparator.compare(earlier, s) == Ordering::Less,
          );
          assert!(dominated_by_earlier, "front {k} member not dominated");
        }
      }
    }
  }

  #[test]
  fn test_equal_solutions_keep_input_order() {
    let ranking = DominanceRanking::new();
    let mut first = solution([1.0, 1.0]);
    first.set_attribute(
      crate::solution::AttributeKey::Tag,
      crate::solution::AttributeValue::Tag("first"),
    );
    let mut second = solution([1.0, 1.0]);
    second.set_attribute(
      crate::solution::AttributeKey::Tag,
      crate::solution::AttributeValue::Tag("second"),
    );

    let fronts = ranking.rank(vec![first, second]).unwrap();
    assert_eq!(fronts.len(), 1);
    assert_eq!(
      fronts[0][0].attribute(crate::solution::AttributeKey::Tag),
      Some(&crate::solution::AttributeValue::Tag("first"))
    );
    assert_eq!(
      fronts[0][1].attribute(crate::solution::AttributeKey::Tag),
      Some(&crate::solution::AttributeValue::Tag("second"))
    );
  }

  #[test]
  fn test_constraint_violations_layer_fronts() {
    let ranking = DominanceRanking::new();
    let feasible = solution([10.0, 10.0]);
    let mut infeasible = solution([0.0, 0.0]);
    infeasible.set_constraint_violation(1.0);

    let fronts = ranking.rank(vec![infeasible, feasible]).unwrap();
    assert_eq!(fronts.len(), 2);
    assert_eq!(fronts[0][0].objectives(), &[10.0, 10.0]);
  }
}
