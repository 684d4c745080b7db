//! A bounded archive of mutually non-dominated solutions.

use std::cmp::Ordering;

use itertools::Itertools;
use tracing::trace;

use crate::{
  density::{CrowdingDistance, DensityEstimator},
  dominance::DominanceComparator,
  error::Error,
  solution::Solution,
};

/// An online collection tracking the best-known front across a run,
/// independent of the working population.
///
/// The archive is an antichain under dominance at all times: a candidate
/// dominated by any member is rejected, a candidate that dominates
/// members evicts all of them, and a mutually non-dominated candidate is
/// inserted unconditionally. When an insertion pushes the archive over
/// its capacity, the most crowded member - the one with the smallest
/// crowding distance over the whole archive - is evicted until the bound
/// holds again.
///
/// Archived solutions are treated as immutable; callers inserting from
/// concurrent evaluation callbacks must serialize `add` externally, since
/// the dominance sweep and eviction are not safely interleavable.
#[derive(Clone, Debug)]
pub struct BoundedArchive<V, const M: usize> {
  capacity: usize,
  comparator: DominanceComparator,
  density: CrowdingDistance,
  solutions: Vec<Solution<V, M>>,
}

impl<V, const M: usize> BoundedArchive<V, M> {
  /// Creates an empty archive holding at most `capacity` solutions.
  /// Fails with [`Error::Configuration`] if `capacity` is 0.
  pub fn new(capacity: usize) -> Result<Self, Error> {
    if capacity == 0 {
      return Err(Error::Configuration(
        "archive capacity must be positive".into(),
      ));
    }
    Ok(Self {
      capacity,
      comparator: DominanceComparator::new(),
      density: CrowdingDistance,
      solutions: Vec::with_capacity(capacity),
    })
  }

  /// Offers a solution to the archive. Returns `true` if it was
  /// inserted, `false` if an existing member dominates it.
  pub fn add(&mut self, solution: Solution<V, M>) -> bool {
    for member in &self.solutions {
      if self.comparator.compare(member, &solution) == Ordering::Less {
        return false;
      }
    }
    let comparator = self.comparator;
    self
      .solutions
      .retain(|member| comparator.compare(&solution, member) != Ordering::Less);
    self.solutions.push(solution);

    while self.solutions.len() > self.capacity {
      self.density.compute(&mut self.solutions);
      let density = &self.density;
      let most_crowded = self
        .solutions
        .iter()
        .position_min_by(|a, b| density.density(a).total_cmp(&density.density(b)))
        .expect("archive cannot be empty during eviction");
      self.solutions.remove(most_crowded);
      trace!(index = most_crowded, "evicted most crowded archive member");
    }
    true
  }

  /// Returns the archived solutions in insertion order.
  pub fn solutions(&self) -> &[Solution<V, M>] {
    &self.solutions
  }

  /// Returns the number of archived solutions.
  pub fn len(&self) -> usize {
    self.solutions.len()
  }

  /// Returns `true` if the archive holds no solutions.
  pub fn is_empty(&self) -> bool {
    self.solutions.is_empty()
  }

  /// Returns the archive capacity.
  pub fn capacity(&self) -> usize {
    self.capacity
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn solution(objectives: [f64; 2]) -> Solution<u8, 2> {
    Solution::with_objectives(vec![], objectives)
  }

  fn assert_antichain(archive: &BoundedArchive<u8, 2>) {
    let comparator = DominanceComparator::new();
    for (i, a) in archive.solutions().iter().enumerate() {
      for (j, b) in archive.solutions().iter().enumerate() {
        if i != j {
          assert_ne!(comparator.compare(a, b), Ordering::Less);
        }
      }
    }
  }

  #[test]
  fn test_zero_capacity_is_rejected() {
    assert!(matches!(
      BoundedArchive::<u8, 2>::new(0),
      Err(Error::Configuration(_))
    ));
  }

  #[test]
  fn test_dominated_candidate_is_rejected() {
    let mut archive = BoundedArchive::new(10).unwrap();
    assert!(archive.add(solution([1.0, 1.0])));
    assert!(!archive.add(solution([2.0, 2.0])));
    assert_eq!(archive.len(), 1);
  }

  #[test]
  fn test_dominating_candidate_evicts_members() {
    let mut archive = BoundedArchive::new(10).unwrap();
    assert!(archive.add(solution([3.0, 5.0])));
    assert!(archive.add(solution([5.0, 3.0])));
    assert!(archive.add(solution([1.0, 6.0])));
    // dominates the first two but not the third
    assert!(archive.add(solution([2.0, 2.0])));

    assert_eq!(archive.len(), 2);
    assert_antichain(&archive);
    assert!(archive
      .solutions()
      .iter()
      .any(|s| s.objectives() == &[2.0, 2.0]));
    assert!(archive
      .solutions()
      .iter()
      .any(|s| s.objectives() == &[1.0, 6.0]));
  }

  #[test]
  fn test_capacity_evicts_most_crowded_member() {
    let mut archive = BoundedArchive::new(4).unwrap();
    archive.add(solution([0.0, 8.0]));
    archive.add(solution([8.0, 0.0]));
    archive.add(solution([4.0, 4.0]));
    archive.add(solution([5.0, 3.0]));
    // the insertion overflows; (4, 4) and (5, 3) crowd each other the
    // most while the boundaries are untouchable
    archive.add(solution([3.0, 5.0]));

    assert_eq!(archive.len(), 4);
    assert_antichain(&archive);
    assert!(archive
      .solutions()
      .iter()
      .any(|s| s.objectives() == &[0.0, 8.0]));
    assert!(archive
      .solutions()
      .iter()
      .any(|s| s.objectives() == &[8.0, 0.0]));
  }

  #[test]
  fn test_antichain_under_random_pressure() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(7);
    let mut archive = BoundedArchive::new(8).unwrap();
    for _ in 0..200 {
      let x: f64 = rng.gen_range(0.0..10.0);
      let y: f64 = rng.gen_range(0.0..10.0);
      archive.add(solution([x, y]));
      assert!(archive.len() <= archive.capacity());
      assert_antichain(&archive);
    }
    assert!(!archive.is_empty());
  }

  #[test]
  fn test_incomparable_candidate_is_inserted() {
    let mut archive = BoundedArchive::new(10).unwrap();
    archive.add(solution([1.0, 5.0]));
    assert!(archive.add(solution([5.0, 1.0])));
    assert!(archive.add(solution([3.0, 3.0])));
    assert_eq!(archive.len(), 3);
  }
}
