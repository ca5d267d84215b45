//! Qualifier tags for the bindings the wiring module registers.
//!
//! A qualifier distinguishes multiple bindings that share an underlying type;
//! consumers resolve by `(type, tag)`.

/// Agent identifier (`String`).
pub const AGENT_ID: &str = "agent.id";

/// Application name (`String`).
pub const APPLICATION_NAME: &str = "agent.application.name";

/// Agent start time in epoch milliseconds (`u64`), captured once on first
/// resolution.
pub const AGENT_START_TIME: &str = "agent.start.time";

/// Whether tracing of the agent's own threads is active (`bool`).
pub const TRACE_AGENT_ACTIVE_THREAD: &str = "profiler.trace.agent.active.thread";

/// Whether the deadlock monitor runs (`bool`).
pub const DEADLOCK_MONITOR_ENABLE: &str = "profiler.deadlock.monitor.enable";

/// Deadlock monitor polling interval in milliseconds (`u64`).
pub const DEADLOCK_MONITOR_INTERVAL: &str = "profiler.deadlock.monitor.interval";

/// Plugin jar locations, in load order (`Vec<String>`).
pub const PLUGIN_JAR_PATHS: &str = "agent.plugin.jar.paths";

/// Bootstrap jar locations, in load order (`Vec<String>`).
pub const BOOTSTRAP_JAR_PATHS: &str = "agent.bootstrap.jar.paths";
