//! The `BindingRegistry` struct and its associated methods.

use crate::core::{Binding, BindingKey, BoxedValue, ResolutionGuard};
use crate::error::{Result, WiringError};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The resolved object graph of the agent.
///
/// The registry is populated synchronously during wiring and then frozen:
/// after the freeze no entry may be added, removed, or replaced, and
/// [`resolve`](BindingRegistry::resolve) may be called from any number of
/// consumer threads. Singleton bindings materialize at most once; each entry
/// carries its own once-cell, so unrelated resolutions never serialize on a
/// registry-wide lock.
#[derive(Default)]
pub struct BindingRegistry {
  bindings: DashMap<BindingKey, Binding>,
  frozen: AtomicBool,
}

impl BindingRegistry {
  /// Creates a new, empty registry in the accepting-registrations state.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of registered bindings.
  pub fn len(&self) -> usize {
    self.bindings.len()
  }

  pub fn is_empty(&self) -> bool {
    self.bindings.is_empty()
  }

  /// Whether the registry has reached the read-only state.
  pub fn is_frozen(&self) -> bool {
    self.frozen.load(Ordering::Acquire)
  }

  // --- REGISTRATION ---

  /// Registers an already-materialized value under `(T, tag)`.
  pub fn bind_value<T: Any + Send + Sync>(&self, tag: Option<&str>, value: T) -> Result<()> {
    self.insert(
      BindingKey::of::<T>(tag),
      Binding::Value(Box::new(Arc::new(value))),
    )
  }

  /// Registers a value that is already shared, preserving its `Arc` identity.
  /// This is also the way trait objects enter the registry.
  pub fn bind_shared<T: ?Sized + Any + Send + Sync>(
    &self,
    tag: Option<&str>,
    value: Arc<T>,
  ) -> Result<()> {
    self.insert(BindingKey::of::<T>(tag), Binding::Value(Box::new(value)))
  }

  /// Registers a deferred singleton. The provider is stored un-invoked; it
  /// runs at most once, on first resolution of the key, and its dependencies
  /// come from the registry reference it is handed.
  pub fn bind_singleton<T, F>(&self, tag: Option<&str>, provider: F) -> Result<()>
  where
    T: Any + Send + Sync,
    F: Fn(&BindingRegistry) -> Result<T> + Send + Sync + 'static,
  {
    self.insert(
      BindingKey::of::<T>(tag),
      Binding::Singleton {
        cell: once_cell::sync::OnceCell::new(),
        provider: Box::new(move |registry| {
          provider(registry).map(|value| Box::new(Arc::new(value)) as BoxedValue)
        }),
      },
    )
  }

  /// Trait-object flavor of [`bind_singleton`](BindingRegistry::bind_singleton):
  /// the provider hands back the `Arc<dyn Trait>` itself.
  pub fn bind_shared_singleton<I, F>(&self, tag: Option<&str>, provider: F) -> Result<()>
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&BindingRegistry) -> Result<Arc<I>> + Send + Sync + 'static,
  {
    self.insert(
      BindingKey::of::<I>(tag),
      Binding::Singleton {
        cell: once_cell::sync::OnceCell::new(),
        provider: Box::new(move |registry| {
          provider(registry).map(|shared| Box::new(shared) as BoxedValue)
        }),
      },
    )
  }

  fn insert(&self, key: BindingKey, binding: Binding) -> Result<()> {
    if self.is_frozen() {
      return Err(WiringError::AlreadyFrozen {
        key: key.to_string(),
      });
    }
    match self.bindings.entry(key) {
      Entry::Occupied(occupied) => Err(WiringError::DuplicateBinding {
        key: occupied.key().to_string(),
      }),
      Entry::Vacant(vacant) => {
        vacant.insert(binding);
        Ok(())
      }
    }
  }

  // --- FREEZE ---

  /// Transitions the registry to read-only. Idempotent; there is no way back.
  pub fn freeze(&self) {
    self.frozen.store(true, Ordering::Release);
  }

  /// Verifies that every `required` key is present, then freezes. A missing
  /// key means a bind call was dropped from the wiring definition; the error
  /// names the key and the registry stays unfrozen.
  pub(crate) fn freeze_verified(&self, required: &[BindingKey]) -> Result<()> {
    for key in required {
      if !self.bindings.contains_key(key) {
        return Err(WiringError::Configuration(format!(
          "required binding was never registered: {key}"
        )));
      }
    }
    self.freeze();
    Ok(())
  }

  // --- RESOLUTION ---

  /// Resolves the binding registered under `(T, tag)`.
  ///
  /// The first resolution of a singleton key invokes its provider; concurrent
  /// callers of the same key block until that single materialization
  /// completes and then all observe the identical value. A provider failure
  /// poisons the key: every later call returns the recorded error without
  /// running the provider again.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self, tag: Option<&str>) -> Result<Arc<T>> {
    let key = BindingKey::of::<T>(tag);

    // The guard catches a provider chain that loops back onto `key` before
    // the resolution can block on its own cell.
    let _guard = ResolutionGuard::new(key.clone())?;

    let entry = self
      .bindings
      .get(&key)
      .ok_or_else(|| WiringError::Configuration(format!("no binding registered for: {key}")))?;

    match entry.value() {
      Binding::Value(value) => downcast::<T>(&key, value),
      Binding::Singleton { cell, provider } => {
        let materialized = cell.get_or_init(|| {
          provider(self).map_err(|err| match err {
            cyclic @ WiringError::CyclicBinding { .. } => cyclic,
            other => WiringError::Resolution {
              key: key.to_string(),
              reason: other.to_string(),
            },
          })
        });
        match materialized {
          Ok(value) => downcast::<T>(&key, value),
          Err(err) => Err(err.clone()),
        }
      }
    }
  }
}

fn downcast<T: ?Sized + Any + Send + Sync>(key: &BindingKey, value: &BoxedValue) -> Result<Arc<T>> {
  value
    .downcast_ref::<Arc<T>>()
    .cloned()
    .ok_or_else(|| WiringError::Configuration(format!("binding has unexpected type: {key}")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn freeze_verified_names_the_missing_key() {
    let registry = BindingRegistry::new();
    registry.bind_value(Some("present"), 1_u64).unwrap();

    let required = vec![
      BindingKey::of::<u64>(Some("present")),
      BindingKey::of::<bool>(Some("absent")),
    ];
    let err = registry.freeze_verified(&required).unwrap_err();

    match err {
      WiringError::Configuration(message) => assert!(message.contains("absent")),
      other => panic!("expected Configuration, got {other:?}"),
    }
    // The failed verification must not freeze the registry.
    assert!(!registry.is_frozen());
  }

  #[test]
  fn freeze_verified_freezes_when_all_keys_are_present() {
    let registry = BindingRegistry::new();
    registry.bind_value(Some("present"), 1_u64).unwrap();

    let required = vec![BindingKey::of::<u64>(Some("present"))];
    registry.freeze_verified(&required).unwrap();
    assert!(registry.is_frozen());
  }
}
