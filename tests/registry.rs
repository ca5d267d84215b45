use agent_wiring::{BindingRegistry, WiringError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// --- Registration Tests ---

#[test]
fn test_duplicate_key_is_rejected() {
  let registry = BindingRegistry::new();

  registry.bind_value(Some("interval"), 1000_u64).unwrap();
  let err = registry.bind_value(Some("interval"), 2000_u64).unwrap_err();

  assert!(matches!(err, WiringError::DuplicateBinding { .. }));
}

#[test]
fn test_same_tag_under_different_types_is_two_keys() {
  // The key is composite: type identity plus qualifier tag.
  let registry = BindingRegistry::new();

  registry.bind_value(Some("flag"), true).unwrap();
  registry.bind_value(Some("flag"), 42_u64).unwrap();
  registry.freeze();

  assert!(*registry.resolve::<bool>(Some("flag")).unwrap());
  assert_eq!(*registry.resolve::<u64>(Some("flag")).unwrap(), 42);
}

#[test]
fn test_resolving_an_unregistered_key_fails() {
  let registry = BindingRegistry::new();
  registry.freeze();

  let err = registry.resolve::<u64>(Some("never.bound")).unwrap_err();
  assert!(matches!(err, WiringError::Configuration(_)));
}

// --- Singleton Tests ---

#[test]
fn test_singleton_resolves_to_the_same_instance() {
  struct Expensive {
    id: u32,
  }

  let registry = BindingRegistry::new();
  registry.bind_singleton(None, |_| Ok(Expensive { id: 7 })).unwrap();
  registry.freeze();

  let first = registry.resolve::<Expensive>(None).unwrap();
  let second = registry.resolve::<Expensive>(None).unwrap();

  assert_eq!(first.id, 7);
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_provider_resolves_its_dependencies_through_the_registry() {
  struct Endpoint {
    address: String,
  }

  let registry = BindingRegistry::new();
  registry
    .bind_value(Some("collector.address"), "10.0.0.5:9994".to_string())
    .unwrap();
  registry
    .bind_singleton(None, |r| {
      let address = r.resolve::<String>(Some("collector.address"))?;
      Ok(Endpoint {
        address: (*address).clone(),
      })
    })
    .unwrap();
  registry.freeze();

  let endpoint = registry.resolve::<Endpoint>(None).unwrap();
  assert_eq!(endpoint.address, "10.0.0.5:9994");
}

#[test]
fn test_self_referential_provider_fails_instead_of_hanging() {
  let registry = BindingRegistry::new();
  registry
    .bind_singleton::<u64, _>(Some("cyclic"), |r| {
      r.resolve::<u64>(Some("cyclic")).map(|value| *value)
    })
    .unwrap();
  registry.freeze();

  let err = registry.resolve::<u64>(Some("cyclic")).unwrap_err();
  assert!(matches!(err, WiringError::CyclicBinding { .. }));
}

#[test]
fn test_failed_provider_poisons_its_key() {
  static PROVIDER_RUNS: AtomicUsize = AtomicUsize::new(0);

  #[derive(Debug)]
  struct Unbuildable;

  let registry = BindingRegistry::new();
  registry
    .bind_singleton::<Unbuildable, _>(None, |_| {
      PROVIDER_RUNS.fetch_add(1, Ordering::SeqCst);
      Err(WiringError::Configuration("collector unreachable".to_string()))
    })
    .unwrap();
  registry.freeze();

  let first = registry.resolve::<Unbuildable>(None).unwrap_err();
  let second = registry.resolve::<Unbuildable>(None).unwrap_err();

  assert!(matches!(first, WiringError::Resolution { .. }));
  assert_eq!(first, second);
  // The provider never runs again for a poisoned key.
  assert_eq!(PROVIDER_RUNS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_first_resolution_materializes_once() {
  // This test is critical for the at-most-once guarantee under concurrent
  // first access.
  static PROVIDER_RUNS: AtomicUsize = AtomicUsize::new(0);

  struct Shared {
    id: u32,
  }

  let registry = BindingRegistry::new();
  registry
    .bind_singleton(None, |_| {
      PROVIDER_RUNS.fetch_add(1, Ordering::SeqCst);
      // Widen the race window; a broken implementation would run twice.
      thread::sleep(Duration::from_millis(50));
      Ok(Shared { id: 7 })
    })
    .unwrap();
  registry.freeze();

  thread::scope(|s| {
    for _ in 0..20 {
      s.spawn(|| {
        let value = registry.resolve::<Shared>(None).unwrap();
        assert_eq!(value.id, 7);
      });
    }
  });

  assert_eq!(PROVIDER_RUNS.load(Ordering::SeqCst), 1);

  let first = registry.resolve::<Shared>(None).unwrap();
  let second = registry.resolve::<Shared>(None).unwrap();
  assert!(Arc::ptr_eq(&first, &second));
}

// --- Freeze Tests ---

#[test]
fn test_freeze_is_irreversible_for_every_bind_flavor() {
  struct Late;

  let registry = BindingRegistry::new();
  registry.freeze();

  let value_err = registry.bind_value(Some("late"), 1_u64).unwrap_err();
  let singleton_err = registry.bind_singleton::<Late, _>(None, |_| Ok(Late)).unwrap_err();

  assert!(matches!(value_err, WiringError::AlreadyFrozen { .. }));
  assert!(matches!(singleton_err, WiringError::AlreadyFrozen { .. }));
}

#[test]
fn test_registry_starts_empty_and_unfrozen() {
  let registry = BindingRegistry::new();
  assert!(registry.is_empty());
  assert!(!registry.is_frozen());
}
