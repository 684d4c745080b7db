//! Environmental replacement policies.

use std::cmp::Ordering;

use crate::{
  density::DensityEstimator,
  dominance::DominanceComparator,
  error::Error,
  ranking::Ranking,
  solution::Solution,
};

/// A policy that merges parents and offspring into the next population.
///
/// `replace` always returns exactly `target` solutions or fails; the
/// engine never receives a population of the wrong size.
pub trait Replacement<V, const M: usize> {
  /// Builds the next population of exactly `target` solutions out of the
  /// current `population` and its evaluated `offspring`.
  fn replace(
    &self,
    population: Vec<Solution<V, M>>,
    offspring: Vec<Solution<V, M>>,
    target: usize,
  ) -> Result<Vec<Solution<V, M>>, Error>;
}

/// The generational policy of NSGA-II: rank the union of parents and
/// offspring, admit whole fronts while they fit, and fill the remainder
/// from the first overflowing front in descending density order.
///
/// Density is estimated for every front, not only the overflowing one,
/// so the surviving solutions carry fresh rank and density attributes
/// into the next round of tournaments.
#[derive(Clone, Copy, Debug, Default)]
pub struct RankingAndDensity<Rk, De> {
  ranking: Rk,
  density: De,
}

impl<Rk, De> RankingAndDensity<Rk, De> {
  /// Creates the policy from a ranking and a density estimator.
  pub fn new(ranking: Rk, density: De) -> Self {
    Self { ranking, density }
  }
}

impl<V, const M: usize, Rk, De> Replacement<V, M> for RankingAndDensity<Rk, De>
where
  Rk: Ranking<V, M>,
  De: DensityEstimator<V, M>,
{
  fn replace(
    &self,
    mut population: Vec<Solution<V, M>>,
    mut offspring: Vec<Solution<V, M>>,
    target: usize,
  ) -> Result<Vec<Solution<V, M>>, Error> {
    population.append(&mut offspring);
    rank_and_truncate(&self.ranking, &self.density, population, target)
  }
}

/// The steady-state policy of GDE3: each offspring meets the incumbent
/// it was derived from through the raw dominance comparator. A dominated
/// offspring is discarded, a dominating offspring replaces its
/// incumbent, and an incomparable pair keeps both solutions. Only when
/// the survivors overflow `target` does a rank-and-density truncation
/// run; if no pair was incomparable, no ranking happens at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct PairwiseDominance<Rk, De> {
  comparator: DominanceComparator,
  ranking: Rk,
  density: De,
}

impl<Rk, De> PairwiseDominance<Rk, De> {
  /// Creates the policy from the ranking and density estimator used to
  /// truncate overflowing survivor sets.
  pub fn new(ranking: Rk, density: De) -> Self {
    Self {
      comparator: DominanceComparator::new(),
      ranking,
      density,
    }
  }
}

impl<V, const M: usize, Rk, De> Replacement<V, M> for PairwiseDominance<Rk, De>
where
  Rk: Ranking<V, M>,
  De: DensityEstimator<V, M>,
{
  fn replace(
    &self,
    population: Vec<Solution<V, M>>,
    offspring: Vec<Solution<V, M>>,
    target: usize,
  ) -> Result<Vec<Solution<V, M>>, Error> {
    if population.len() != offspring.len() {
      return Err(Error::InvalidInput(format!(
        "pairwise replacement needs one offspring per incumbent, got {} \
         incumbents and {} offspring",
        population.len(),
        offspring.len()
      )));
    }

    let mut survivors = Vec::with_capacity(population.len() * 2);
    for (incumbent, child) in population.into_iter().zip(offspring) {
      match self.comparator.compare(&incumbent, &child) {
        Ordering::Less => survivors.push(incumbent),
        Ordering::Greater => survivors.push(child),
        Ordering::Equal => {
          survivors.push(incumbent);
          survivors.push(child);
        }
      }
    }

    if survivors.len() > target {
      rank_and_truncate(&self.ranking, &self.density, survivors, target)
    } else {
      Ok(survivors)
    }
  }
}

/// Ranks `solutions` and keeps the best `target` of them: whole fronts
/// while they fit, then the least crowded members of the first front
/// that does not.
fn rank_and_truncate<V, const M: usize, Rk, De>(
  ranking: &Rk,
  density: &De,
  solutions: Vec<Solution<V, M>>,
  target: usize,
) -> Result<Vec<Solution<V, M>>, Error>
where
  Rk: Ranking<V, M>,
  De: DensityEstimator<V, M>,
{
  if solutions.len() < target {
    return Err(Error::InvalidInput(format!(
      "cannot build a population of {target} from {} solutions",
      solutions.len()
    )));
  }

  let mut next = Vec::with_capacity(target);
  for mut front in ranking.rank(solutions)? {
    density.compute(&mut front);
    let remaining = target - next.len();
    if front.len() <= remaining {
      next.append(&mut front);
    } else {
      front.sort_by(|a, b| density.density(b).total_cmp(&density.density(a)));
      next.extend(front.into_iter().take(remaining));
    }
    if next.len() == target {
      break;
    }
  }
  Ok(next)
}
