//! Variation operator contracts.
//!
//! The crate defines no crossover or mutation bodies of its own:
//! **variation operators must be tailored to each problem to solve**.
//! A ready-made operator will almost certainly fit your encoding worse
//! than one written against it, and a poorly fitting operator degrades
//! the whole algorithm to random search. Only the contracts live here;
//! the engine consumes them without knowing anything about the encoding.

use rand::RngCore;

use crate::{error::Error, solution::Solution};

/// An operator that creates offspring from a group of parents.
///
/// Every crossover declares how many parents one application consumes
/// and how many offspring it yields; the engine sizes its mating pool
/// from these. [`cross`](Crossover::cross) must be handed exactly
/// [`number_of_parents`](Crossover::number_of_parents) solutions and
/// fails with [`Error::InvalidArity`] otherwise - implementations can
/// discharge that check with [`check_arity`](Crossover::check_arity).
///
/// Offspring should start from [`Solution::child`] copies of their
/// parents so that parental rank and crowding attributes do not leak
/// into the next generation.
pub trait Crossover<V, const M: usize> {
  /// Number of parents one `cross` call consumes.
  fn number_of_parents(&self) -> usize;

  /// Number of offspring one `cross` call yields.
  fn number_of_offspring(&self) -> usize;

  /// Creates offspring from exactly
  /// [`number_of_parents`](Crossover::number_of_parents) parents.
  fn cross(
    &self,
    parents: &[Solution<V, M>],
    rng: &mut dyn RngCore,
  ) -> Result<Vec<Solution<V, M>>, Error>;

  /// Fails with [`Error::InvalidArity`] unless `parents` matches the
  /// declared parent count.
  fn check_arity(&self, parents: &[Solution<V, M>]) -> Result<(), Error> {
    if parents.len() != self.number_of_parents() {
      return Err(Error::invalid_arity(
        "crossover",
        self.number_of_parents(),
        parents.len(),
      ));
    }
    Ok(())
  }
}

/// An operator that perturbs a single solution in place.
///
/// Mutation runs after crossover on every offspring. Any closure of
/// type `Fn(&mut Solution<V, M>, &mut dyn RngCore)` is a `Mutation`:
///
/// ```
/// # use moea::{solution::Solution, variation::Mutation};
/// # use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
/// let creep = |solution: &mut Solution<f64, 2>, rng: &mut dyn RngCore| {
///   for variable in solution.variables_mut() {
///     *variable += rng.gen_range(-0.1..0.1);
///   }
/// };
/// # let mut rng = StdRng::seed_from_u64(0);
/// # let mut s = Solution::new(vec![0.5]);
/// # creep.mutate(&mut s, &mut rng);
/// ```
pub trait Mutation<V, const M: usize> {
  /// Mutates `solution` in place.
  fn mutate(&self, solution: &mut Solution<V, M>, rng: &mut dyn RngCore);
}

impl<V, const M: usize, F> Mutation<V, M> for F
where
  F: Fn(&mut Solution<V, M>, &mut dyn RngCore),
{
  fn mutate(&self, solution: &mut Solution<V, M>, rng: &mut dyn RngCore) {
    self(solution, rng)
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::*;

  /// Averages two real-coded parents into one offspring.
  struct Midpoint;

  impl Crossover<f64, 2> for Midpoint {
    fn number_of_parents(&self) -> usize {
      2
    }

    fn number_of_offspring(&self) -> usize {
      1
    }

    fn cross(
      &self,
      parents: &[Solution<f64, 2>],
      _: &mut dyn RngCore,
    ) -> Result<Vec<Solution<f64, 2>>, Error> {
      self.check_arity(parents)?;
      let mut offspring = parents[0].child();
      for (variable, other) in offspring
        .variables_mut()
        .iter_mut()
        .zip(parents[1].variables())
      {
        *variable = (*variable + other) / 2.0;
      }
      Ok(vec![offspring])
    }
  }

  #[test]
  fn test_crossover_produces_declared_offspring() {
    let mut rng = StdRng::seed_from_u64(0);
    let parents = vec![
      Solution::new(vec![0.0, 2.0]),
      Solution::new(vec![4.0, 6.0]),
    ];
    let offspring = Midpoint.cross(&parents, &mut rng).unwrap();
    assert_eq!(offspring.len(), Midpoint.number_of_offspring());
    assert_eq!(offspring[0].variables(), &[2.0, 4.0]);
  }

  #[test]
  fn test_arity_mismatch_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let parents = vec![Solution::<f64, 2>::new(vec![0.0])];
    assert!(matches!(
      Midpoint.cross(&parents, &mut rng),
      Err(Error::InvalidArity(_))
    ));
  }

  #[test]
  fn test_offspring_start_without_attributes() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut parent = Solution::new(vec![1.0]);
    parent.set_rank(2);
    parent.set_crowding_distance(0.5);
    let parents = vec![parent.clone(), parent];

    let offspring = Midpoint.cross(&parents, &mut rng).unwrap();
    assert_eq!(offspring[0].rank(), None);
    assert_eq!(offspring[0].crowding_distance(), None);
  }

  #[test]
  fn test_closure_is_a_mutation() {
    let mut rng = StdRng::seed_from_u64(3);
    let creep = |solution: &mut Solution<f64, 2>, rng: &mut dyn RngCore| {
      for variable in solution.variables_mut() {
        *variable += rng.gen_range(0.0..1.0);
      }
    };

    let mut solution = Solution::new(vec![1.0, 2.0]);
    creep.mutate(&mut solution, &mut rng);
    assert!(solution.variables()[0] > 1.0);
    assert!(solution.variables()[1] > 2.0);
  }
}
