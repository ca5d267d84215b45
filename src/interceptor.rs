//! External collaborator interface for the interceptor registry.

/// Publishes and retracts the process-wide interceptor registry used by
/// instrumented code.
///
/// Implementations live with the instrumentation engine. Wiring constructs
/// exactly one binder, lazily, through the factory supplied at wire time, and
/// shares it as a singleton.
pub trait InterceptorRegistryBinder: Send + Sync + 'static {
  /// Publishes this binder's registry as the process-wide lookup target.
  fn bind(&self);

  /// Detaches the registry again; used when agent attach is aborted.
  fn unbind(&self);
}
