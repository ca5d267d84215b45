//! Launch-time options handed over by the host process, plus the collaborator
//! interfaces the wiring layer binds by reference.

use std::fmt;
use std::sync::Arc;

/// Read access to the profiling configuration.
///
/// The configuration itself (file format, parsing, defaulting) belongs to the
/// bootstrap layer; wiring only projects scalar fields into named constants.
pub trait ProfilerConfig: Send + Sync + 'static {
  fn trace_agent_active_thread(&self) -> bool;
  fn deadlock_monitor_enable(&self) -> bool;
  /// Deadlock monitor polling interval in milliseconds.
  fn deadlock_monitor_interval(&self) -> u64;
}

/// Opaque handle to the host's bytecode instrumentation engine.
///
/// Wiring never drives instrumentation itself; it stores the handle and hands
/// it to downstream components.
pub trait Instrumentation: Send + Sync + 'static {}

/// The immutable launch-time option bundle, supplied exactly once by the host
/// embedding the agent.
///
/// The profiler config slot is optional at the type level because the host
/// owns construction; its presence is enforced by
/// [`WiringModule::new`](crate::WiringModule::new) before any binding occurs.
#[derive(Clone)]
pub struct AgentOptions {
  agent_id: String,
  application_name: String,
  instrumentation: Arc<dyn Instrumentation>,
  profiler_config: Option<Arc<dyn ProfilerConfig>>,
  plugin_jar_paths: Vec<String>,
  bootstrap_jar_paths: Vec<String>,
}

impl AgentOptions {
  pub fn builder(
    agent_id: impl Into<String>,
    application_name: impl Into<String>,
    instrumentation: Arc<dyn Instrumentation>,
  ) -> AgentOptionsBuilder {
    AgentOptionsBuilder {
      agent_id: agent_id.into(),
      application_name: application_name.into(),
      instrumentation,
      profiler_config: None,
      plugin_jar_paths: Vec::new(),
      bootstrap_jar_paths: Vec::new(),
    }
  }

  pub fn agent_id(&self) -> &str {
    &self.agent_id
  }

  pub fn application_name(&self) -> &str {
    &self.application_name
  }

  pub fn instrumentation(&self) -> &Arc<dyn Instrumentation> {
    &self.instrumentation
  }

  pub fn profiler_config(&self) -> Option<&Arc<dyn ProfilerConfig>> {
    self.profiler_config.as_ref()
  }

  pub fn plugin_jar_paths(&self) -> &[String] {
    &self.plugin_jar_paths
  }

  pub fn bootstrap_jar_paths(&self) -> &[String] {
    &self.bootstrap_jar_paths
  }
}

impl fmt::Debug for AgentOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AgentOptions")
      .field("agent_id", &self.agent_id)
      .field("application_name", &self.application_name)
      .field("profiler_config", &self.profiler_config.is_some())
      .field("plugin_jar_paths", &self.plugin_jar_paths)
      .field("bootstrap_jar_paths", &self.bootstrap_jar_paths)
      .finish_non_exhaustive()
  }
}

/// Builder for [`AgentOptions`]; identity and the instrumentation handle are
/// required up front, everything else is optional.
pub struct AgentOptionsBuilder {
  agent_id: String,
  application_name: String,
  instrumentation: Arc<dyn Instrumentation>,
  profiler_config: Option<Arc<dyn ProfilerConfig>>,
  plugin_jar_paths: Vec<String>,
  bootstrap_jar_paths: Vec<String>,
}

impl AgentOptionsBuilder {
  pub fn profiler_config(mut self, config: Arc<dyn ProfilerConfig>) -> Self {
    self.profiler_config = Some(config);
    self
  }

  pub fn plugin_jar_paths(mut self, paths: Vec<String>) -> Self {
    self.plugin_jar_paths = paths;
    self
  }

  pub fn bootstrap_jar_paths(mut self, paths: Vec<String>) -> Self {
    self.bootstrap_jar_paths = paths;
    self
  }

  pub fn build(self) -> AgentOptions {
    AgentOptions {
      agent_id: self.agent_id,
      application_name: self.application_name,
      instrumentation: self.instrumentation,
      profiler_config: self.profiler_config,
      plugin_jar_paths: self.plugin_jar_paths,
      bootstrap_jar_paths: self.bootstrap_jar_paths,
    }
  }
}
