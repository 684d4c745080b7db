//! The candidate solution entity and its attribute store.

use std::collections::HashMap;

/// Keys of the per-solution attribute store.
///
/// The set of keys is closed on purpose: algorithms attach transient state
/// to solutions through a fixed, typed vocabulary instead of an open-ended
/// string map. `Tag` is the single free slot for algorithm-specific
/// markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AttributeKey {
  /// Index of the dominance front a solution was assigned to, 0 = best.
  Rank,
  /// Crowding distance within a front, larger = less crowded.
  CrowdingDistance,
  /// Scalarized utility assigned by preference-based rankings.
  Utility,
  /// Free-form algorithm marker.
  Tag,
}

/// Values of the per-solution attribute store.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AttributeValue {
  /// An index-like value, e.g. a front number.
  Index(usize),
  /// A scalar value, e.g. a crowding distance or utility.
  Scalar(f64),
  /// A static marker string.
  Tag(&'static str),
}

/// A candidate solution of a multi-objective problem.
///
/// `V` is the decision variable encoding (`f64` for real-coded problems,
/// `bool` for binary ones, `usize` for permutations, and so on), `M` is
/// the number of objectives. Objective values follow the lower-is-better
/// convention. A solution is only rankable once its objectives have been
/// populated by an evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<V, const M: usize> {
  variables: Vec<V>,
  objectives: [f64; M],
  constraint_violation: f64,
  attributes: HashMap<AttributeKey, AttributeValue>,
}

impl<V, const M: usize> Solution<V, M> {
  /// Creates a fresh, unevaluated solution from its decision variables.
  pub fn new(variables: Vec<V>) -> Self {
    Self {
      variables,
      objectives: [0.0; M],
      constraint_violation: 0.0,
      attributes: HashMap::new(),
    }
  }

  /// Creates an already-evaluated solution. Mostly useful for feeding
  /// rankings and archives directly, without a problem evaluator.
  pub fn with_objectives(variables: Vec<V>, objectives: [f64; M]) -> Self {
    Self {
      variables,
      objectives,
      constraint_violation: 0.0,
      attributes: HashMap::new(),
    }
  }

  /// Returns the decision variables.
  pub fn variables(&self) -> &[V] {
    &self.variables
  }

  /// Returns the decision variables mutably.
  pub fn variables_mut(&mut self) -> &mut Vec<V> {
    &mut self.variables
  }

  /// Returns the objective vector.
  pub fn objectives(&self) -> &[f64; M] {
    &self.objectives
  }

  /// Overwrites the objective vector.
  pub fn set_objectives(&mut self, objectives: [f64; M]) {
    self.objectives = objectives;
  }

  /// Returns the constraint violation degree. 0 means feasible.
  pub fn constraint_violation(&self) -> f64 {
    self.constraint_violation
  }

  /// Sets the constraint violation degree. Must not be negative.
  pub fn set_constraint_violation(&mut self, violation: f64) {
    debug_assert!(violation >= 0.0, "constraint violation must be >= 0");
    self.constraint_violation = violation;
  }

  /// Returns an independent copy for reproduction: variables, objectives
  /// and constraint violation are cloned, the attribute store starts
  /// empty. Rank and crowding values describe the parent's standing in
  /// its population and must not leak into offspring.
  pub fn child(&self) -> Self
  where
    V: Clone,
  {
    Self {
      variables: self.variables.clone(),
      objectives: self.objectives,
      constraint_violation: self.constraint_violation,
      attributes: HashMap::new(),
    }
  }

  /// Reads an attribute.
  pub fn attribute(&self, key: AttributeKey) -> Option<&AttributeValue> {
    self.attributes.get(&key)
  }

  /// Writes an attribute, replacing any previous value under `key`.
  pub fn set_attribute(&mut self, key: AttributeKey, value: AttributeValue) {
    self.attributes.insert(key, value);
  }

  /// Returns the front number assigned by the last ranking, if any.
  pub fn rank(&self) -> Option<usize> {
    match self.attributes.get(&AttributeKey::Rank) {
      Some(AttributeValue::Index(rank)) => Some(*rank),
      _ => None,
    }
  }

  /// Records the front number assigned by a ranking.
  pub fn set_rank(&mut self, rank: usize) {
    self
      .attributes
      .insert(AttributeKey::Rank, AttributeValue::Index(rank));
  }

  /// Returns the crowding distance assigned by the last density
  /// estimation, if any.
  pub fn crowding_distance(&self) -> Option<f64> {
    match self.attributes.get(&AttributeKey::CrowdingDistance) {
      Some(AttributeValue::Scalar(distance)) => Some(*distance),
      _ => None,
    }
  }

  /// Records a crowding distance.
  pub fn set_crowding_distance(&mut self, distance: f64) {
    self
      .attributes
      .insert(AttributeKey::CrowdingDistance, AttributeValue::Scalar(distance));
  }

  /// Returns the scalarized utility assigned by a preference-based
  /// ranking, if any.
  pub fn utility(&self) -> Option<f64> {
    match self.attributes.get(&AttributeKey::Utility) {
      Some(AttributeValue::Scalar(utility)) => Some(*utility),
      _ => None,
    }
  }

  /// Records a scalarized utility.
  pub fn set_utility(&mut self, utility: f64) {
    self
      .attributes
      .insert(AttributeKey::Utility, AttributeValue::Scalar(utility));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_solution_is_unevaluated() {
    let s = Solution::<f64, 2>::new(vec![1.0, 2.0]);
    assert_eq!(s.variables(), &[1.0, 2.0]);
    assert_eq!(s.objectives(), &[0.0, 0.0]);
    assert_eq!(s.constraint_violation(), 0.0);
    assert_eq!(s.rank(), None);
    assert_eq!(s.crowding_distance(), None);
  }

  #[test]
  fn test_attribute_round_trip() {
    let mut s = Solution::<f64, 2>::new(vec![0.0]);
    s.set_rank(3);
    s.set_crowding_distance(0.5);
    s.set_utility(1.25);
    s.set_attribute(AttributeKey::Tag, AttributeValue::Tag("nsga2"));
    assert_eq!(s.rank(), Some(3));
    assert_eq!(s.crowding_distance(), Some(0.5));
    assert_eq!(s.utility(), Some(1.25));
    assert_eq!(
      s.attribute(AttributeKey::Tag),
      Some(&AttributeValue::Tag("nsga2"))
    );
  }

  #[test]
  fn test_child_drops_attributes() {
    let mut s = Solution::<f64, 2>::with_objectives(vec![1.0], [3.0, 4.0]);
    s.set_constraint_violation(0.25);
    s.set_rank(1);
    s.set_crowding_distance(f64::INFINITY);

    let child = s.child();
    assert_eq!(child.variables(), s.variables());
    assert_eq!(child.objectives(), s.objectives());
    assert_eq!(child.constraint_violation(), s.constraint_violation());
    assert_eq!(child.rank(), None);
    assert_eq!(child.crowding_distance(), None);
  }
}
