//! **moea** is a multi-objective evolutionary optimization framework. It
//! evolves a population of candidate solutions toward the Pareto-optimal
//! trade-off surface of a problem with several conflicting objectives,
//! and it is built around the computational core every such algorithm
//! shares: dominance ranking, density estimation and generational
//! replacement.
//!
//! The crate defines a few abstractions that concrete algorithms are
//! assembled from:
//! - [`Solution`] - decision variables, an objective vector, a
//!   constraint violation degree and a typed attribute store for
//!   transient algorithm state
//! - [`Ranking`] - partitions a population into ordered fronts, either
//!   by Pareto dominance ([`DominanceRanking`]) or by an achievement
//!   scalarizing function relative to a reference point
//!   ([`AchievementRanking`])
//! - [`DensityEstimator`] - scores how crowded each solution of a front
//!   is; [`CrowdingDistance`] is the classic estimator of NSGA-II
//! - [`Replacement`] - merges parents and offspring into the next
//!   population: [`RankingAndDensity`] is the generational NSGA-II
//!   policy, [`PairwiseDominance`] the steady-state GDE3 one
//! - [`BoundedArchive`] - a size-bounded, mutually non-dominated
//!   collection tracking the best-known front across a run
//! - [`GenerationalEngine`] - the loop tying selection, reproduction,
//!   evaluation and replacement together
//!
//! Which concrete algorithm the engine becomes - NSGA-II, GDE3, a
//! preference-based WASF-GA-style method - is decided entirely by the
//! strategies plugged into it; the loop never branches on algorithm
//! identity.
//!
//! # Operators
//!
//! The crate ships [selection operators](crate::selection) and the
//! [`Crossover`]/[`Mutation`] contracts, but no crossover or mutation
//! bodies. The reason for this is that **variation operators must be
//! tailored to each problem to solve**. Fail to do that - and this crate
//! will do no better than random search. A predefined set of operators
//! will almost certainly prompt you to choose a less suitable, but
//! ready-made option.
//!
//! Simple mutations fit in a closure: any
//! `Fn(&mut Solution<V, M>, &mut dyn RngCore)` is a [`Mutation`].
//! Crossovers declare their parent and offspring counts and are checked
//! against them, so a mismatched mating pool fails fast instead of
//! silently recombining the wrong parents.
//!
//! # Parallelization
//!
//! The evolutionary loop is deliberately single-threaded: ranking,
//! density estimation and replacement always see a complete, settled
//! population. The one legitimate parallelism point is evaluation -
//! objective functions of distinct solutions are independent - so the
//! [`Evaluator`] is pluggable: [`SequentialEvaluator`] iterates on the
//! calling thread, [`ParallelEvaluator`] fans the batch out over rayon
//! and joins before returning. The engine never observes a
//! partially-evaluated population either way. Benchmark before reaching
//! for the parallel one; cheap objective functions usually lose more to
//! coordination than they gain.
//!
//! # Determinism
//!
//! Nothing in the crate touches a global random source. Every randomized
//! component draws from the generator you hand the engine, so a run
//! reproduces exactly from its seed - handy when a "stochastic" bug
//! needs pinning down.
//!
//! # Example
//!
//! The textbook *Schaffer's Problem No.1*, solved NSGA-II style:
//! ```no_run
//! use moea::{
//!   density::CrowdingDistance,
//!   engine::{EvolutionaryAlgorithm, GenerationalConfig, GenerationalEngine},
//!   error::Error,
//!   evaluation::SequentialEvaluator,
//!   problem::Problem,
//!   ranking::DominanceRanking,
//!   replacement::RankingAndDensity,
//!   selection::BinaryTournament,
//!   solution::Solution,
//!   termination::MaxEvaluations,
//!   variation::Crossover,
//! };
//! use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
//!
//! // minimize f1(x) = x^2 and f2(x) = (x - 2)^2
//! struct Schaffer;
//!
//! impl Problem<f64, 2> for Schaffer {
//!   fn create_solution(&self, rng: &mut dyn RngCore) -> Solution<f64, 2> {
//!     Solution::new(vec![rng.gen_range(-10.0..10.0)])
//!   }
//!
//!   fn evaluate(&self, solution: &mut Solution<f64, 2>) {
//!     let x = solution.variables()[0];
//!     solution.set_objectives([x * x, (x - 2.0) * (x - 2.0)]);
//!   }
//! }
//!
//! // for parents `x` and `y`, create the offspring `x + r * (y - x)`
//! // where `r` is a random value between -1 and 2
//! struct Blend;
//!
//! impl Crossover<f64, 2> for Blend {
//!   fn number_of_parents(&self) -> usize {
//!     2
//!   }
//!
//!   fn number_of_offspring(&self) -> usize {
//!     1
//!   }
//!
//!   fn cross(
//!     &self,
//!     parents: &[Solution<f64, 2>],
//!     rng: &mut dyn RngCore,
//!   ) -> Result<Vec<Solution<f64, 2>>, Error> {
//!     self.check_arity(parents)?;
//!     let mut child = parents[0].child();
//!     let r: f64 = rng.gen_range(-1.0..2.0);
//!     let x = child.variables()[0];
//!     let y = parents[1].variables()[0];
//!     child.variables_mut()[0] = x + r * (y - x);
//!     Ok(vec![child])
//!   }
//! }
//!
//! // a `Mutation` that nudges the decision variable a little
//! let mutation = |solution: &mut Solution<f64, 2>, rng: &mut dyn RngCore| {
//!   solution.variables_mut()[0] += rng.gen_range(-0.1..0.1);
//! };
//!
//! let mut engine = GenerationalEngine::new(
//!   GenerationalConfig::builder()
//!     .problem(Schaffer)
//!     .population_size(100)
//!     .selection(BinaryTournament)
//!     .crossover(Blend)
//!     .mutation(mutation)
//!     .evaluator(SequentialEvaluator)
//!     .replacement(RankingAndDensity::new(
//!       DominanceRanking::new(),
//!       CrowdingDistance,
//!     ))
//!     .stopping_condition(MaxEvaluations(25_000))
//!     .rng(StdRng::seed_from_u64(42))
//!     .build(),
//! )?;
//! engine.run()?;
//!
//! // the non-dominated front the run converged to
//! let front = engine.result();
//! assert!(!front.is_empty());
//! # Ok::<(), moea::error::Error>(())
//! ```
//!
//! To track the best-known front independently of the working
//! population, give the engine an archive with
//! `.archive_capacity(n)` -
//! [`result`](crate::engine::GenerationalEngine::result) then returns the
//! archive contents instead.
//!
//! [`Solution`]: crate::solution::Solution
//! [`Ranking`]: crate::ranking::Ranking
//! [`DominanceRanking`]: crate::ranking::DominanceRanking
//! [`AchievementRanking`]: crate::scalarizing::AchievementRanking
//! [`DensityEstimator`]: crate::density::DensityEstimator
//! [`CrowdingDistance`]: crate::density::CrowdingDistance
//! [`Replacement`]: crate::replacement::Replacement
//! [`RankingAndDensity`]: crate::replacement::RankingAndDensity
//! [`PairwiseDominance`]: crate::replacement::PairwiseDominance
//! [`BoundedArchive`]: crate::archive::BoundedArchive
//! [`GenerationalEngine`]: crate::engine::GenerationalEngine
//! [`Crossover`]: crate::variation::Crossover
//! [`Mutation`]: crate::variation::Mutation
//! [`Evaluator`]: crate::evaluation::Evaluator
//! [`SequentialEvaluator`]: crate::evaluation::SequentialEvaluator
//! [`ParallelEvaluator`]: crate::evaluation::ParallelEvaluator

#![warn(missing_docs)]

pub mod archive;
pub mod density;
pub mod dominance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod problem;
pub mod ranking;
pub mod replacement;
pub mod scalarizing;
pub mod selection;
pub mod solution;
pub mod termination;
pub mod variation;
