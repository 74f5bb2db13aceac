//! Deferred activation and end-to-end serving over the in-process transport.

mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{CountingMonitor, RecordingRegistry, write_default_config};
use power_hint_daemon::core::selector::SelectionMode;
use power_hint_daemon::daemon::bootstrap::{self, Deps};
use power_hint_daemon::daemon::deferred::{READY_PROPERTY, READY_SENTINEL};
use power_hint_daemon::platform::properties::{InMemoryPropertyStore, PropertyStore};
use power_hint_daemon::platform::registry::{LocalRegistry, ServeOutcome};
use power_hint_daemon::platform::shutdown::shutdown_pair;

const POWER_INSTANCE: &str = "powerhint.IPower/default";

fn wait_for<F: Fn() -> bool>(deadline: Duration, condition: F) -> bool {
    let end = Instant::now() + deadline;
    while Instant::now() < end {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}

#[test]
fn readiness_sentinel_activates_hints_after_registration() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_default_config(dir.path(), false);
    let store: Arc<dyn PropertyStore> = Arc::new(InMemoryPropertyStore::new());
    let deps = Deps {
        store: Arc::clone(&store),
        registry: Arc::new(RecordingRegistry::default()),
        monitor: Arc::new(CountingMonitor::default()),
        selection: SelectionMode::NamedConfig,
        config_dir: dir.path().to_path_buf(),
    };
    let (handle, token) = shutdown_pair();

    let brought_up = bootstrap::bring_up(&deps, &token).expect("bootstrap succeeds");
    assert!(!brought_up.manager.is_active());

    store.set(READY_PROPERTY, READY_SENTINEL);
    let manager = Arc::clone(&brought_up.manager);
    assert!(
        wait_for(Duration::from_secs(2), || manager.is_active()),
        "activation must follow the readiness sentinel"
    );
    brought_up.deferred.join().expect("deferred task exits");
    handle.shutdown();
}

#[test]
fn non_sentinel_readiness_value_never_activates() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_default_config(dir.path(), false);
    let store: Arc<dyn PropertyStore> = Arc::new(InMemoryPropertyStore::new());
    let deps = Deps {
        store: Arc::clone(&store),
        registry: Arc::new(RecordingRegistry::default()),
        monitor: Arc::new(CountingMonitor::default()),
        selection: SelectionMode::NamedConfig,
        config_dir: dir.path().to_path_buf(),
    };
    let (handle, token) = shutdown_pair();

    let brought_up = bootstrap::bring_up(&deps, &token).expect("bootstrap succeeds");
    store.set(READY_PROPERTY, "starting");

    assert!(
        !wait_for(Duration::from_millis(200), || brought_up.manager.is_active()),
        "a non-sentinel value must never activate hints"
    );

    handle.shutdown();
    brought_up.deferred.join().expect("deferred task exits");
    assert!(!brought_up.manager.is_active());
}

#[test]
fn daemon_serves_requests_before_and_after_activation() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_default_config(dir.path(), true);
    let store: Arc<dyn PropertyStore> = Arc::new(InMemoryPropertyStore::new());
    let registry = Arc::new(LocalRegistry::new());
    let monitor = Arc::new(CountingMonitor::default());
    let client = registry.client().expect("intake open");
    let deps = Deps {
        store: Arc::clone(&store),
        registry: registry.clone(),
        monitor: monitor.clone(),
        selection: SelectionMode::NamedConfig,
        config_dir: dir.path().to_path_buf(),
    };
    let (handle, token) = shutdown_pair();

    let server = {
        let token = token.clone();
        thread::spawn(move || bootstrap::run(&deps, &token))
    };

    // The service becomes discoverable while enforcement is still inactive.
    assert!(
        wait_for(Duration::from_secs(2), || registry.has_service(POWER_INSTANCE)),
        "service must be published"
    );
    assert_eq!(
        client
            .call(POWER_INSTANCE, "hintEnforcementActive", "")
            .expect("request served"),
        "false"
    );
    assert_eq!(monitor.start_count(), 1);

    store.set(READY_PROPERTY, READY_SENTINEL);
    assert!(
        wait_for(Duration::from_secs(2), || {
            client
                .call(POWER_INSTANCE, "hintEnforcementActive", "")
                .is_ok_and(|active| active == "true")
        }),
        "activation must become observable over IPC"
    );

    handle.shutdown();
    let outcome = server.join().expect("server thread").expect("no bootstrap error");
    assert_eq!(outcome, ServeOutcome::Shutdown);
}

#[test]
fn closed_intake_is_an_unexpected_serve_return() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_default_config(dir.path(), false);
    let registry = Arc::new(LocalRegistry::new());
    let deps = Deps {
        store: Arc::new(InMemoryPropertyStore::new()),
        registry: registry.clone(),
        monitor: Arc::new(CountingMonitor::default()),
        selection: SelectionMode::NamedConfig,
        config_dir: dir.path().to_path_buf(),
    };
    let (_handle, token) = shutdown_pair();

    // Simulate the transport dying: no clients, intake closed.
    registry.close_intake();
    let outcome = bootstrap::run(&deps, &token).expect("bootstrap itself succeeds");
    assert_eq!(outcome, ServeOutcome::Disconnected);
}
