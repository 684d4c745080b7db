//! Crate error type.

/// Errors produced by the framework.
///
/// Construction-time misconfiguration and malformed inputs are the only
/// failures this crate reports itself. Failures raised by external
/// collaborators - problems, evaluators, operator bodies - are not caught
/// or retried: masking a skipped evaluation would silently corrupt the
/// evolutionary trajectory.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Invalid constructor arguments: zero-sized populations, empty weight
  /// sets, operator arities that cannot be satisfied.
  #[error("invalid configuration: {0}")]
  Configuration(String),
  /// An empty or malformed solution collection was passed to a ranking,
  /// selection or replacement routine.
  #[error("invalid input: {0}")]
  InvalidInput(String),
  /// An operator received a different number of solutions than the arity
  /// it declares.
  #[error("invalid operator arity: {0}")]
  InvalidArity(String),
}

impl Error {
  /// Shorthand for the arity mismatch raised by variation operators.
  pub fn invalid_arity(operator: &str, expected: usize, actual: usize) -> Self {
    Self::InvalidArity(format!(
      "{operator} expects {expected} parents but received {actual}"
    ))
  }
}
