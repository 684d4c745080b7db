//! Binh and Korn's constrained problem solved NSGA-II style, with the
//! evaluation fanned out over rayon and an archive tracking the front.

use std::{fs::File, io::Write, path::Path};

use moea::{
  density::CrowdingDistance,
  engine::{EvolutionaryAlgorithm, GenerationalConfig, GenerationalEngine},
  error::Error,
  evaluation::ParallelEvaluator,
  problem::Problem,
  ranking::DominanceRanking,
  replacement::RankingAndDensity,
  selection::BinaryTournament,
  solution::Solution,
  termination::MaxEvaluations,
  variation::Crossover,
};
use rand::{rngs::StdRng, seq::IteratorRandom, Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Minimize `f1(x, y) = 4x^2 + 4y^2` and `f2(x, y) = (x - 5)^2 + (y - 5)^2`
/// subject to `(x - 5)^2 + y^2 <= 25` and `(x - 8)^2 + (y + 3)^2 >= 7.7`,
/// with `x` in `[0, 5]` and `y` in `[0, 3]`.
struct BinhKorn;

impl Problem<f64, 2> for BinhKorn {
  fn create_solution(&self, rng: &mut dyn RngCore) -> Solution<f64, 2> {
    Solution::new(vec![rng.gen_range(0.0..5.0), rng.gen_range(0.0..3.0)])
  }

  fn evaluate(&self, solution: &mut Solution<f64, 2>) {
    let (x, y) = (solution.variables()[0], solution.variables()[1]);
    solution.set_objectives([
      4.0 * x * x + 4.0 * y * y,
      (x - 5.0).powi(2) + (y - 5.0).powi(2),
    ]);
  }

  fn has_constraints(&self) -> bool {
    true
  }

  fn evaluate_constraints(&self, solution: &mut Solution<f64, 2>) {
    let (x, y) = (solution.variables()[0], solution.variables()[1]);
    let g1 = ((x - 5.0).powi(2) + y * y - 25.0).max(0.0);
    let g2 = (7.7 - ((x - 8.0).powi(2) + (y + 3.0).powi(2))).max(0.0);
    solution.set_constraint_violation(g1 + g2);
  }
}

/// SBX for a pair of floating point values.
fn sbx(a: f64, b: f64, rng: &mut dyn RngCore) -> (f64, f64) {
  let n = 2.0;
  let r: f64 = rng.gen_range(0.0..1.0);
  let beta = if r <= 0.5 {
    (2.0 * r).powf(1.0 / (n + 1.0))
  } else {
    (1.0 / (2.0 * (1.0 - r))).powf(1.0 / (n + 1.0))
  };
  let p = 0.5 * ((a + b) - beta * (b - a));
  let q = 0.5 * ((a + b) + beta * (b - a));
  (p, q)
}

/// Simulated binary crossover applied to both decision variables,
/// yielding two offspring per pair of parents.
struct Sbx;

impl Crossover<f64, 2> for Sbx {
  fn number_of_parents(&self) -> usize {
    2
  }

  fn number_of_offspring(&self) -> usize {
    2
  }

  fn cross(
    &self,
    parents: &[Solution<f64, 2>],
    rng: &mut dyn RngCore,
  ) -> Result<Vec<Solution<f64, 2>>, Error> {
    self.check_arity(parents)?;
    let mut first = parents[0].child();
    let mut second = parents[1].child();
    for i in 0..first.variables().len() {
      let (p, q) = sbx(first.variables()[i], second.variables()[i], rng);
      first.variables_mut()[i] = p;
      second.variables_mut()[i] = q;
    }
    Ok(vec![first, second])
  }
}

fn main() -> Result<(), Error> {
  // creep mutation from a normal distribution, clamped into the bounds
  let normal = Normal::new(0.0, 0.25).unwrap();
  let mutation = move |solution: &mut Solution<f64, 2>,
                       rng: &mut dyn RngCore| {
    let step = normal.sample(rng);
    let variables = solution.variables_mut();
    variables[0] = (variables[0] + step).clamp(0.0, 5.0);
    variables[1] = (variables[1] + normal.sample(rng)).clamp(0.0, 3.0);
  };

  let mut engine = GenerationalEngine::new(
    GenerationalConfig::builder()
      .problem(BinhKorn)
      .population_size(100)
      .selection(BinaryTournament)
      .crossover(Sbx)
      .mutation(mutation)
      // objective evaluation runs concurrently for the whole batch
      .evaluator(ParallelEvaluator)
      .replacement(RankingAndDensity::new(
        DominanceRanking::new(),
        CrowdingDistance,
      ))
      .stopping_condition(MaxEvaluations(50_000))
      .rng(StdRng::seed_from_u64(7))
      // track the best-known front independently of the population
      .archive_capacity(100)
      .build(),
  )?;
  engine.run()?;

  // with an archive configured, `result` returns its contents
  let solutions = engine.result();

  // write objective vectors to file in demos/nsga2_binh_korn.csv
  let _ = File::create(Path::new(file!()).with_file_name("nsga2_binh_korn.csv"))
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
  println!("   x    |   y    ");
  for s in solutions.iter().choose_multiple(&mut rng, 10) {
    println!("{:.4} | {:.4}", s.variables()[0], s.variables()[1]);
  }
  println!("  ...   |  ...   ");
  Ok(())
}
