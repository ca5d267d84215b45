//! # Agent Wiring
//!
//! Startup-time wiring for a bytecode-instrumentation agent: one immutable
//! bundle of launch options goes in, a frozen, singleton-scoped
//! [`BindingRegistry`] comes out.
//!
//! This is not a general-purpose dependency-injection framework. It is a
//! fixed, one-shot bootstrap procedure for exactly one process lifetime, and
//! it encodes the startup invariants the rest of the agent relies on:
//!
//! - every binding is registered explicitly during a single wiring pass;
//!   nothing is discovered or resolved implicitly by type alone,
//! - each binding key (type plus optional qualifier tag) exists at most once,
//! - deferred singletons materialize at most once, even under concurrent
//!   first access, and a failed provider poisons its key instead of being
//!   silently re-run,
//! - circular provider chains fail with an error instead of hanging,
//! - once frozen, the registry is read-only for the rest of the process.
//!
//! ## Quick Start
//!
//! ```
//! use agent_wiring::{tags, AgentOptions, WiringModule};
//! use agent_wiring::{Instrumentation, InterceptorRegistryBinder, ProfilerConfig};
//! use std::sync::Arc;
//!
//! struct FixedConfig;
//! impl ProfilerConfig for FixedConfig {
//!   fn trace_agent_active_thread(&self) -> bool {
//!     true
//!   }
//!   fn deadlock_monitor_enable(&self) -> bool {
//!     true
//!   }
//!   fn deadlock_monitor_interval(&self) -> u64 {
//!     5000
//!   }
//! }
//!
//! struct VmHandle;
//! impl Instrumentation for VmHandle {}
//!
//! struct RegistryBinder;
//! impl InterceptorRegistryBinder for RegistryBinder {
//!   fn bind(&self) {}
//!   fn unbind(&self) {}
//! }
//!
//! let options = AgentOptions::builder("agent-0001", "order-service", Arc::new(VmHandle))
//!   .profiler_config(Arc::new(FixedConfig))
//!   .plugin_jar_paths(vec!["plugins/redis.jar".into()])
//!   .build();
//!
//! let registry = WiringModule::new(options)
//!   .and_then(|module| module.wire(|| Arc::new(RegistryBinder)))
//!   .unwrap();
//!
//! let agent_id = registry.resolve::<String>(Some(tags::AGENT_ID)).unwrap();
//! assert_eq!(*agent_id, "agent-0001");
//!
//! let interval = registry
//!   .resolve::<u64>(Some(tags::DEADLOCK_MONITOR_INTERVAL))
//!   .unwrap();
//! assert_eq!(*interval, 5000);
//! ```

mod binder;
mod core;
mod error;
mod interceptor;
mod module;
mod options;
mod registry;
pub mod tags;

pub use error::{Result, WiringError};
pub use interceptor::InterceptorRegistryBinder;
pub use module::WiringModule;
pub use options::{AgentOptions, AgentOptionsBuilder, Instrumentation, ProfilerConfig};
pub use registry::BindingRegistry;
