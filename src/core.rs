//! Core, non-public data structures for the binding registry.

use crate::error::WiringError;
use crate::registry::BindingRegistry;

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

thread_local! {
  // The set of keys currently being resolved on this thread. A key that is
  // re-entered while still in flight means a provider chain loops back on
  // itself.
  static RESOLVING_STACK: RefCell<HashSet<BindingKey>> = RefCell::new(HashSet::new());
}

/// An RAII guard tracking in-flight resolutions on the current thread.
///
/// Creating the guard pushes the key onto the thread-local resolution stack
/// and fails with [`WiringError::CyclicBinding`] if the key is already there,
/// before the resolution can block on its own singleton cell. Dropping the
/// guard pops the key again.
pub(crate) struct ResolutionGuard {
  key: BindingKey,
}

impl ResolutionGuard {
  pub(crate) fn new(key: BindingKey) -> Result<Self, WiringError> {
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the key was already present.
      if stack.borrow_mut().insert(key.clone()) {
        Ok(())
      } else {
        Err(WiringError::CyclicBinding { key: key.to_string() })
      }
    })?;
    Ok(Self { key })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// Composite lookup key: type identity plus an optional qualifier tag.
///
/// The qualifier distinguishes multiple bindings that share an underlying
/// type, such as the boolean constants projected out of the profiler config.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BindingKey {
  type_id: TypeId,
  type_name: &'static str,
  tag: Option<String>,
}

impl BindingKey {
  pub(crate) fn of<T: ?Sized + Any>(tag: Option<&str>) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      tag: tag.map(str::to_owned),
    }
  }
}

impl fmt::Display for BindingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.tag {
      Some(tag) => write!(f, "{} [{}]", self.type_name, tag),
      None => write!(f, "{}", self.type_name),
    }
  }
}

impl fmt::Debug for BindingKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "BindingKey({})", self)
  }
}

/// A registered value, stored as the `Arc` it will be resolved as.
pub(crate) type BoxedValue = Box<dyn Any + Send + Sync>;

/// A deferred construction function. Dependencies are resolved through the
/// registry reference it is handed, never through hidden global state.
pub(crate) type ProviderFn =
  Box<dyn Fn(&BindingRegistry) -> Result<BoxedValue, WiringError> + Send + Sync>;

pub(crate) enum Binding {
  /// Materialized at registration time.
  Value(BoxedValue),
  /// Deferred, at-most-once. The cell also records a provider failure so the
  /// key stays poisoned instead of silently re-running the provider.
  Singleton {
    cell: once_cell::sync::OnceCell<Result<BoxedValue, WiringError>>,
    provider: ProviderFn,
  },
}
