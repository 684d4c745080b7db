//! The generational evolutionary loop.

use rand::RngCore;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::{
  archive::BoundedArchive,
  dominance::non_dominated,
  error::Error,
  evaluation::Evaluator,
  problem::Problem,
  replacement::Replacement,
  selection::Selection,
  solution::Solution,
  termination::{Progress, StoppingCondition},
  variation::{Crossover, Mutation},
};

/// The skeleton of an evolutionary algorithm.
///
/// Implementors supply the primitive operations; the provided
/// [`run`](EvolutionaryAlgorithm::run) drives them through the
/// generational state machine: create, evaluate, then loop over
/// selection, reproduction, offspring evaluation, replacement and
/// progress bookkeeping until the stopping condition holds. Each
/// transition completes fully before the next begins; nothing inside the
/// loop suspends.
pub trait EvolutionaryAlgorithm<V, const M: usize> {
  /// Requests fresh, unevaluated solutions from the problem factory.
  fn create_initial_population(&mut self) -> Vec<Solution<V, M>>;

  /// Evaluates a whole collection, returning it with objectives and
  /// constraint violations populated.
  fn evaluate_population(
    &mut self,
    population: Vec<Solution<V, M>>,
  ) -> Vec<Solution<V, M>>;

  /// Resets progress counters right after the initial evaluation.
  fn init_progress(&mut self);

  /// Advances progress counters after a cycle that evaluated `evaluated`
  /// solutions.
  fn update_progress(&mut self, evaluated: usize);

  /// Returns `true` once the loop should stop.
  fn is_stopping_condition_reached(&mut self) -> bool;

  /// Fills a mating pool with parents picked from `population`.
  fn selection(
    &mut self,
    population: &[Solution<V, M>],
  ) -> Result<Vec<Solution<V, M>>, Error>;

  /// Produces unevaluated offspring from a mating pool.
  fn reproduction(
    &mut self,
    mating_pool: Vec<Solution<V, M>>,
  ) -> Result<Vec<Solution<V, M>>, Error>;

  /// Merges parents and evaluated offspring into the next population.
  fn replacement(
    &mut self,
    population: Vec<Solution<V, M>>,
    offspring: Vec<Solution<V, M>>,
  ) -> Result<Vec<Solution<V, M>>, Error>;

  /// Stores the working population between cycles.
  fn store_population(&mut self, population: Vec<Solution<V, M>>);

  /// Takes the working population out for the next cycle.
  fn take_population(&mut self) -> Vec<Solution<V, M>>;

  /// Runs the algorithm to completion.
  fn run(&mut self) -> Result<(), Error> {
    let population = self.create_initial_population();
    let population = self.evaluate_population(population);
    self.init_progress();
    self.store_population(population);

    while !self.is_stopping_condition_reached() {
      let population = self.take_population();
      let mating_pool = self.selection(&population)?;
      let offspring = self.reproduction(mating_pool)?;
      let offspring = self.evaluate_population(offspring);
      let evaluated = offspring.len();
      let population = self.replacement(population, offspring)?;
      self.update_progress(evaluated);
      self.store_population(population);
    }
    Ok(())
  }
}

/// Configuration of a [`GenerationalEngine`], built with a typed
/// builder and validated by [`GenerationalEngine::new`].
///
/// `offspring_size` defaults to the population size;
/// `archive_capacity` turns on the bounded archive tracking the
/// best-known front independently of the working population.
#[derive(TypedBuilder, Debug)]
pub struct GenerationalConfig<P, Sel, Crs, Mut, Ev, Rep, Stop, R> {
  /// The problem to optimize.
  pub problem: P,
  /// Working population size, also the replacement target.
  pub population_size: usize,
  /// Offspring produced per cycle. Defaults to `population_size`.
  #[builder(default, setter(strip_option))]
  pub offspring_size: Option<usize>,
  /// Parent selection operator.
  pub selection: Sel,
  /// Crossover operator.
  pub crossover: Crs,
  /// Mutation operator.
  pub mutation: Mut,
  /// Whole-population evaluation strategy.
  pub evaluator: Ev,
  /// Environmental replacement policy.
  pub replacement: Rep,
  /// Loop termination predicate.
  pub stopping_condition: Stop,
  /// Seedable random source; a run reproduces from its seed.
  pub rng: R,
  /// Capacity of the optional bounded archive.
  #[builder(default, setter(strip_option))]
  pub archive_capacity: Option<usize>,
}

/// A generic generational evolutionary algorithm.
///
/// One engine covers the NSGA-II family, GDE3-style differential
/// schemes and preference-based variants: the ranking, density and
/// replacement strategies plugged into it decide which algorithm it
/// actually is. The control loop itself is single-threaded; the only
/// parallelism lives behind the [`Evaluator`].
pub struct GenerationalEngine<
  V,
  const M: usize,
  P,
  Sel,
  Crs,
  Mut,
  Ev,
  Rep,
  Stop,
  R,
> {
  problem: P,
  population_size: usize,
  offspring_size: usize,
  selection: Sel,
  crossover: Crs,
  mutation: Mut,
  evaluator: Ev,
  replacement: Rep,
  stopping_condition: Stop,
  rng: R,
  archive: Option<BoundedArchive<V, M>>,
  population: Vec<Solution<V, M>>,
  progress: Progress,
}

impl<V, const M: usize, P, Sel, Crs, Mut, Ev, Rep, Stop, R>
  GenerationalEngine<V, M, P, Sel, Crs, Mut, Ev, Rep, Stop, R>
where
  V: Clone,
  P: Problem<V, M>,
  Sel: Selection<V, M>,
  Crs: Crossover<V, M>,
  Mut: Mutation<V, M>,
  Ev: Evaluator<V, M, P>,
  Rep: Replacement<V, M>,
  Stop: StoppingCondition,
  R: RngCore,
{
  /// Validates `config` and creates the engine. Fails with
  /// [`Error::Configuration`] on a zero population or offspring size, a
  /// crossover declaring a zero arity, or a zero archive capacity.
  pub fn new(
    config: GenerationalConfig<P, Sel, Crs, Mut, Ev, Rep, Stop, R>,
  ) -> Result<Self, Error> {
    if config.population_size == 0 {
      return Err(Error::Configuration(
        "population size must be positive".into(),
      ));
    }
    let offspring_size = config.offspring_size.unwrap_or(config.population_size);
    if offspring_size == 0 {
      return Err(Error::Configuration(
        "offspring size must be positive".into(),
      ));
    }
    if config.crossover.number_of_parents() == 0 {
      return Err(Error::Configuration(
        "crossover must consume at least one parent".into(),
      ));
    }
    if config.crossover.number_of_offspring() == 0 {
      return Err(Error::Configuration(
        "crossover must yield at least one offspring".into(),
      ));
    }
    let archive = config.archive_capacity.map(BoundedArchive::new).transpose()?;

    Ok(Self {
      problem: config.problem,
      population_size: config.population_size,
      offspring_size,
      selection: config.selection,
      crossover: config.crossover,
      mutation: config.mutation,
      evaluator: config.evaluator,
      replacement: config.replacement,
      stopping_condition: config.stopping_condition,
      rng: config.rng,
      archive,
      population: Vec::new(),
      progress: Progress::default(),
    })
  }

  /// Returns the non-dominated outcome of the run: the archive contents
  /// when an archive is configured, the non-dominated subset of the
  /// final population otherwise.
  pub fn result(&self) -> Vec<Solution<V, M>> {
    match &self.archive {
      Some(archive) => archive.solutions().to_vec(),
      None => non_dominated(&self.population),
    }
  }

  /// Returns the current working population.
  pub fn population(&self) -> &[Solution<V, M>] {
    &self.population
  }

  /// Returns the progress counters.
  pub fn progress(&self) -> &Progress {
    &self.progress
  }
}

impl<V, const M: usize, P, Sel, Crs, Mut, Ev, Rep, Stop, R>
  EvolutionaryAlgorithm<V, M>
  for GenerationalEngine<V, M, P, Sel, Crs, Mut, Ev, Rep, Stop, R>
where
  V: Clone,
  P: Problem<V, M>,
  Sel: Selection<V, M>,
  Crs: Crossover<V, M>,
  Mut: Mutation<V, M>,
  Ev: Evaluator<V, M, P>,
  Rep: Replacement<V, M>,
  Stop: StoppingCondition,
  R: RngCore,
{
  fn create_initial_population(&mut self) -> Vec<Solution<V, M>> {
    (0..self.population_size)
      .map(|_| self.problem.create_solution(&mut self.rng))
      .collect()
  }

  fn evaluate_population(
    &mut self,
    population: Vec<Solution<V, M>>,
  ) -> Vec<Solution<V, M>> {
    let evaluated = self.evaluator.evaluate(population, &self.problem);
    if let Some(archive) = self.archive.as_mut() {
      for solution in &evaluated {
        archive.add(solution.clone());
      }
    }
    evaluated
  }

  fn init_progress(&mut self) {
    self.progress = Progress {
      evaluations: self.population_size,
      iterations: 0,
    };
  }

  fn update_progress(&mut self, evaluated: usize) {
    self.progress.evaluations += evaluated;
    self.progress.iterations += 1;
    debug!(
      iterations = self.progress.iterations,
      evaluations = self.progress.evaluations,
      "generation completed"
    );
  }

  fn is_stopping_condition_reached(&mut self) -> bool {
    self.stopping_condition.is_reached(&self.progress)
  }

  fn selection(
    &mut self,
    population: &[Solution<V, M>],
  ) -> Result<Vec<Solution<V, M>>, Error> {
    // enough parent groups to cover the offspring size, possibly with a
    // few offspring to spare; reproduction truncates the excess
    let groups = self
      .offspring_size
      .div_ceil(self.crossover.number_of_offspring());
    let pool_size = groups * self.crossover.number_of_parents();

    let mut mating_pool = Vec::with_capacity(pool_size);
    while mating_pool.len() < pool_size {
      let parent = self.selection.select(population, &mut self.rng)?;
      mating_pool.push(parent.clone());
    }
    Ok(mating_pool)
  }

  fn reproduction(
    &mut self,
    mating_pool: Vec<Solution<V, M>>,
  ) -> Result<Vec<Solution<V, M>>, Error> {
    let mut offspring = Vec::with_capacity(self.offspring_size);
    for parents in mating_pool.chunks_exact(self.crossover.number_of_parents())
    {
      offspring.extend(self.crossover.cross(parents, &mut self.rng)?);
      if offspring.len() >= self.offspring_size {
        break;
      }
    }
    offspring.truncate(self.offspring_size);

    for solution in offspring.iter_mut() {
      self.mutation.mutate(solution, &mut self.rng);
    }
    Ok(offspring)
  }

  fn replacement(
    &mut self,
    population: Vec<Solution<V, M>>,
    offspring: Vec<Solution<V, M>>,
  ) -> Result<Vec<Solution<V, M>>, Error> {
    self
      .replacement
      .replace(population, offspring, self.population_size)
  }

  fn store_population(&mut self, population: Vec<Solution<V, M>>) {
    self.population = population;
  }

  fn take_population(&mut self) -> Vec<Solution<V, M>> {
    std::mem::take(&mut self.population)
  }
}
