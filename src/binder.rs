//! Projection of launch options into individual bindings.

use crate::error::{Result, WiringError};
use crate::options::ProfilerConfig;
use crate::registry::BindingRegistry;
use crate::tags;

use std::time::{SystemTime, UNIX_EPOCH};

/// Projects scalar profiling settings into named constant bindings, so that
/// consumers depend on a narrow named value instead of the whole config
/// object.
pub(crate) struct ConstantBinder<'a> {
  registry: &'a BindingRegistry,
}

impl<'a> ConstantBinder<'a> {
  pub(crate) fn new(registry: &'a BindingRegistry) -> Self {
    Self { registry }
  }

  pub(crate) fn bind_boolean(&self, tag: &str, value: bool) -> Result<()> {
    self.registry.bind_value(Some(tag), value)
  }

  pub(crate) fn bind_integer(&self, tag: &str, value: u64) -> Result<()> {
    self.registry.bind_value(Some(tag), value)
  }

  pub(crate) fn bind_profiler_constants(&self, config: &dyn ProfilerConfig) -> Result<()> {
    self.bind_boolean(tags::TRACE_AGENT_ACTIVE_THREAD, config.trace_agent_active_thread())?;

    self.bind_boolean(tags::DEADLOCK_MONITOR_ENABLE, config.deadlock_monitor_enable())?;
    self.bind_integer(tags::DEADLOCK_MONITOR_INTERVAL, config.deadlock_monitor_interval())
  }
}

/// Registers the agent's identity triple.
pub(crate) struct IdentityBinder<'a> {
  registry: &'a BindingRegistry,
}

impl<'a> IdentityBinder<'a> {
  pub(crate) fn new(registry: &'a BindingRegistry) -> Self {
    Self { registry }
  }

  /// Agent id and application name are copied in as direct values. The start
  /// time is a deferred singleton: the clock is read once, when the value is
  /// first observed by a consumer, and every later read sees that instant.
  pub(crate) fn bind_identity(&self, agent_id: &str, application_name: &str) -> Result<()> {
    self.registry.bind_value(Some(tags::AGENT_ID), agent_id.to_owned())?;
    self
      .registry
      .bind_value(Some(tags::APPLICATION_NAME), application_name.to_owned())?;

    self
      .registry
      .bind_singleton(Some(tags::AGENT_START_TIME), |_| epoch_millis())
  }
}

fn epoch_millis() -> Result<u64> {
  let elapsed = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map_err(|err| WiringError::Configuration(format!("system clock before unix epoch: {err}")))?;
  Ok(elapsed.as_millis() as u64)
}
