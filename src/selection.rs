//! Selection operators picking parents for reproduction.
//!
//! The crate ships selection strategies but no crossover or mutation
//! bodies: variation must be tailored to each problem, while parent
//! selection only looks at ranks and densities the framework itself
//! maintains.

use rand::{seq::index, Rng, RngCore};

use crate::{
  dominance::rank_then_crowding,
  error::Error,
  solution::Solution,
};

/// An operator that picks one parent from a population.
///
/// The generational engine calls it repeatedly to fill a mating pool.
/// Implementations draw from the generator passed in, never from a
/// global one.
pub trait Selection<V, const M: usize> {
  /// Picks a parent from `population`. Fails with
  /// [`Error::InvalidInput`] if the population is empty.
  fn select<'a>(
    &mut self,
    population: &'a [Solution<V, M>],
    rng: &mut dyn RngCore,
  ) -> Result<&'a Solution<V, M>, Error>;
}

/// Binary tournament over the crowded-comparison operator.
///
/// Two distinct solutions are drawn at random and the one with the
/// better front rank wins; equal ranks fall back to the larger crowding
/// distance, and a full tie is resolved by a coin flip. Populations of
/// size one yield their only member. Before the first replacement has
/// attached rank and crowding attributes, every comparison ties and the
/// tournament degrades to a uniform random draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryTournament;

impl<V, const M: usize> Selection<V, M> for BinaryTournament {
  fn select<'a>(
    &mut self,
    population: &'a [Solution<V, M>],
    rng: &mut dyn RngCore,
  ) -> Result<&'a Solution<V, M>, Error> {
    match population {
      [] => Err(Error::InvalidInput(
        "cannot select from an empty population".into(),
      )),
      [single] => Ok(single),
      _ => {
        let drawn = index::sample(rng, population.len(), 2);
        let (a, b) = (&population[drawn.index(0)], &population[drawn.index(1)]);
        Ok(match rank_then_crowding(a, b) {
          std::cmp::Ordering::Less => a,
          std::cmp::Ordering::Greater => b,
          std::cmp::Ordering::Equal => {
            if rng.gen_bool(0.5) {
              a
            } else {
              b
            }
          }
        })
      }
    }
  }
}

/// Uniform random selection, used by algorithms whose selection pressure
/// comes entirely from replacement.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSelection;

impl<V, const M: usize> Selection<V, M> for RandomSelection {
  fn select<'a>(
    &mut self,
    population: &'a [Solution<V, M>],
    rng: &mut dyn RngCore,
  ) -> Result<&'a Solution<V, M>, Error> {
    if population.is_empty() {
      return Err(Error::InvalidInput(
        "cannot select from an empty population".into(),
      ));
    }
    Ok(&population[rng.gen_range(0..population.len())])
  }
}
