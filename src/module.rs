//! The wiring orchestrator.

use crate::binder::{ConstantBinder, IdentityBinder};
use crate::core::BindingKey;
use crate::error::{Result, WiringError};
use crate::interceptor::InterceptorRegistryBinder;
use crate::options::{AgentOptions, Instrumentation, ProfilerConfig};
use crate::registry::BindingRegistry;
use crate::tags;

use log::{debug, info};
use std::sync::Arc;

/// One-shot bootstrap of the agent's object graph.
///
/// Construction validates the launch options; [`wire`](WiringModule::wire)
/// then populates a fresh [`BindingRegistry`] and freezes it. Every binding
/// is registered explicitly, in code, during this single pass: there is no
/// discovery, no injection by type alone, and a resolution chain that loops
/// back on itself fails instead of being papered over with a proxy.
///
/// The module moves through three states: unconfigured (before `new`),
/// configuring (between `new` and the end of `wire`), and frozen (the
/// returned registry). The transition to frozen is irreversible for the life
/// of the process.
pub struct WiringModule {
  options: AgentOptions,
  config: Arc<dyn ProfilerConfig>,
}

impl WiringModule {
  /// Validates the launch options.
  ///
  /// Fails with [`WiringError::Configuration`] before any binding occurs when
  /// the profiling configuration is absent; no side effects happen until
  /// validation passes.
  pub fn new(options: AgentOptions) -> Result<Self> {
    let config = options
      .profiler_config()
      .cloned()
      .ok_or_else(|| WiringError::Configuration("missing required launch option: profiler config".to_owned()))?;
    Ok(Self { options, config })
  }

  /// Builds and freezes the object graph.
  ///
  /// `interceptor_registry` is stored un-invoked and runs at most once, on
  /// first resolution of the [`InterceptorRegistryBinder`] binding. Before
  /// the registry freezes, every required key is verified to be present; a
  /// bind call dropped by a refactor surfaces here as a
  /// [`WiringError::Configuration`] naming the missing key.
  pub fn wire<F>(self, interceptor_registry: F) -> Result<BindingRegistry>
  where
    F: Fn() -> Arc<dyn InterceptorRegistryBinder> + Send + Sync + 'static,
  {
    let registry = BindingRegistry::new();

    registry.bind_shared::<dyn ProfilerConfig>(None, Arc::clone(&self.config))?;

    let constants = ConstantBinder::new(&registry);
    constants.bind_profiler_constants(self.config.as_ref())?;

    registry.bind_shared::<dyn Instrumentation>(None, Arc::clone(self.options.instrumentation()))?;

    registry
      .bind_shared_singleton::<dyn InterceptorRegistryBinder, _>(None, move |_| Ok(interceptor_registry()))?;

    registry.bind_value(Some(tags::PLUGIN_JAR_PATHS), self.options.plugin_jar_paths().to_vec())?;
    registry.bind_value(
      Some(tags::BOOTSTRAP_JAR_PATHS),
      self.options.bootstrap_jar_paths().to_vec(),
    )?;

    let identity = IdentityBinder::new(&registry);
    identity.bind_identity(self.options.agent_id(), self.options.application_name())?;
    debug!(
      "bound agent identity: id='{}', application='{}'",
      self.options.agent_id(),
      self.options.application_name()
    );

    registry.freeze_verified(&required_keys())?;
    info!("agent wiring frozen with {} bindings", registry.len());

    Ok(registry)
  }
}

/// The keys the rest of the agent depends on. Verified at the freeze.
fn required_keys() -> Vec<BindingKey> {
  vec![
    BindingKey::of::<dyn ProfilerConfig>(None),
    BindingKey::of::<bool>(Some(tags::TRACE_AGENT_ACTIVE_THREAD)),
    BindingKey::of::<bool>(Some(tags::DEADLOCK_MONITOR_ENABLE)),
    BindingKey::of::<u64>(Some(tags::DEADLOCK_MONITOR_INTERVAL)),
    BindingKey::of::<dyn Instrumentation>(None),
    BindingKey::of::<dyn InterceptorRegistryBinder>(None),
    BindingKey::of::<Vec<String>>(Some(tags::PLUGIN_JAR_PATHS)),
    BindingKey::of::<Vec<String>>(Some(tags::BOOTSTRAP_JAR_PATHS)),
    BindingKey::of::<String>(Some(tags::AGENT_ID)),
    BindingKey::of::<String>(Some(tags::APPLICATION_NAME)),
    BindingKey::of::<u64>(Some(tags::AGENT_START_TIME)),
  ]
}
