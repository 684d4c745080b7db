//! Schaffer's Problem No.1 solved NSGA-II style.

use std::{fs::File, io::Write, path::Path};

use moea::{
  density::CrowdingDistance,
  engine::{EvolutionaryAlgorithm, GenerationalConfig, GenerationalEngine},
  error::Error,
  evaluation::SequentialEvaluator,
  problem::Problem,
  ranking::DominanceRanking,
  replacement::RankingAndDensity,
  selection::BinaryTournament,
  solution::Solution,
  termination::MaxEvaluations,
  variation::Crossover,
};
use rand::{rngs::StdRng, seq::IteratorRandom, Rng, RngCore, SeedableRng};

/// Minimize `f1(x) = x^2` and `f2(x) = (x - 2)^2`. The Pareto-optimal
/// decision values lie between 0 and 2.
struct Schaffer;

impl Problem<f64, 2> for Schaffer {
  fn create_solution(&self, rng: &mut dyn RngCore) -> Solution<f64, 2> {
    Solution::new(vec![rng.gen_range(-100.0..100.0)])
  }

  fn evaluate(&self, solution: &mut Solution<f64, 2>) {
    let x = solution.variables()[0];
    solution.set_objectives([x * x, (x - 2.0) * (x - 2.0)]);
  }
}

/// For parents `x` and `y` creates the offspring `x + r * (y - x)` where
/// `r` is a random value between -1 and 2.
struct Blend;

impl Crossover<f64, 2> for Blend {
  fn number_of_parents(&self) -> usize {
    2
  }

  fn number_of_offspring(&self) -> usize {
    1
  }

  fn cross(
    &self,
    parents: &[Solution<f64, 2>],
    rng: &mut dyn RngCore,
  ) -> Result<Vec<Solution<f64, 2>>, Error> {
    self.check_arity(parents)?;
    let mut child = parents[0].child();
    let r: f64 = rng.gen_range(-1.0..2.0);
    let x = child.variables()[0];
    let y = parents[1].variables()[0];
    child.variables_mut()[0] = x + r * (y - x);
    Ok(vec![child])
  }
}

fn main() -> Result<(), Error> {
  // nudge the decision variable a little
  let mutation = |solution: &mut Solution<f64, 2>, rng: &mut dyn RngCore| {
    solution.variables_mut()[0] += rng.gen_range(-0.1..0.1);
  };

  let mut engine = GenerationalEngine::new(
    GenerationalConfig::builder()
      .problem(Schaffer)
      .population_size(100)
      .selection(BinaryTournament)
      .crossover(Blend)
      .mutation(mutation)
      .evaluator(SequentialEvaluator)
      .replacement(RankingAndDensity::new(
        DominanceRanking::new(),
        CrowdingDistance,
      ))
      .stopping_condition(MaxEvaluations(25_000))
      // the whole run reproduces from this seed
      .rng(StdRng::seed_from_u64(42))
      .build(),
  )?;
  engine.run()?;

  // upon termination the engine returns the non-dominated front it found
  let solutions = engine.result();

  // write objective vectors to file in demos/nsga2_schaffer_n1.csv
  let _ = File::create(Path::new(file!()).with_file_name("nsga2_schaffer_n1.csv"))
    .unwrap()
    .write_all(
      solutions
        .iter()
        .map(|s| {
          let [f1, f2] = s.objectives();
          format!("{} {}", f1, f2)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .as_bytes(),
    );

  // print 10 random solutions
  let mut rng = StdRng::seed_from_u64(0);
  for s in solutions.iter().choose_multiple(&mut rng, 10) {
    println!("{:.4}", s.variables()[0]);
  }
  println!("  ...  ");
  Ok(())
}
