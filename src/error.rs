use thiserror::Error;

/// Failures raised while wiring or resolving the agent's object graph.
///
/// Every failure in this crate surfaces to the caller. There are no silent
/// defaults and no partial graphs; the agent embedding this crate is expected
/// to abort attachment on any of these rather than run half-wired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
  /// Bad or missing launch input, or a required binding that was never
  /// registered before the freeze.
  #[error("configuration error: {0}")]
  Configuration(String),

  /// The same binding key was registered twice during wiring.
  #[error("duplicate binding: {key}")]
  DuplicateBinding { key: String },

  /// Resolving a key transitively required that same key again.
  #[error("cyclic binding detected while resolving: {key}")]
  CyclicBinding { key: String },

  /// A registration was attempted after the registry was frozen.
  #[error("registry is frozen, cannot bind: {key}")]
  AlreadyFrozen { key: String },

  /// A singleton provider failed during first materialization. The key stays
  /// poisoned: later resolutions return this same error without re-running
  /// the provider.
  #[error("failed to materialize binding {key}: {reason}")]
  Resolution { key: String, reason: String },
}

/// A specialized `Result` type for wiring operations.
pub type Result<T, E = WiringError> = std::result::Result<T, E>;
