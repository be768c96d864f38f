use std::sync::Arc;
use std::time::{Duration, Instant};

use netprof_core::{ProfileError, SessionConfig, SessionManager};
use tokio::time::timeout;

mod common;
use common::fake_daemon::{Behaviour, FakeDaemon};
use common::init_test_logging;

const BOUND: Duration = Duration::from_millis(100);

fn manager(daemon: &Arc<FakeDaemon>) -> SessionManager {
    SessionManager::new(daemon.clone(), SessionConfig::default().with_rpc_timeout(BOUND))
}

#[tokio::test]
async fn hanging_list_times_out_and_keeps_the_cache() {
    init_test_logging();
    let daemon = FakeDaemon::with_profiles(&[("default", true), ("work", false)]);
    let session = manager(&daemon);
    let before = session.list_profiles().await.unwrap();

    daemon.set_get(Behaviour::Hang);
    let started = Instant::now();
    // A generous outer timeout turns a hang into a readable failure.
    let result = timeout(Duration::from_secs(2), session.list_profiles())
        .await
        .expect("the session manager must enforce its own bound");

    assert!(matches!(
        result,
        Err(ProfileError::Timeout { op: "get profiles", after }) if after == BOUND
    ));
    assert!(started.elapsed() >= BOUND);
    assert_eq!(session.profiles(), before);
}

#[tokio::test]
async fn hanging_switch_and_remove_time_out() {
    init_test_logging();
    let daemon = FakeDaemon::with_profiles(&[("default", true), ("work", false)]);
    let session = manager(&daemon);
    session.list_profiles().await.unwrap();

    daemon.set_switch(Behaviour::Hang);
    daemon.set_remove(Behaviour::Hang);

    let switch = timeout(Duration::from_secs(2), session.switch_active("work"))
        .await
        .expect("switch must be bounded");
    let remove = timeout(Duration::from_secs(2), session.remove_profile("work"))
        .await
        .expect("remove must be bounded");

    assert!(matches!(switch, Err(ProfileError::Timeout { op: "switch profile", .. })));
    assert!(matches!(remove, Err(ProfileError::Timeout { op: "remove profile", .. })));
}

#[tokio::test]
async fn snapshot_stays_readable_while_a_call_hangs() {
    init_test_logging();
    let daemon = FakeDaemon::with_profiles(&[("default", true)]);
    let session = manager(&daemon);
    session.list_profiles().await.unwrap();

    daemon.set_get(Behaviour::Hang);
    let entered = daemon.entered.notified();
    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.list_profiles().await })
    };
    entered.await;

    // The cache lock is not held across the remote call.
    assert_eq!(session.profiles().len(), 1);

    let result = pending.await.expect("task panicked");
    assert!(matches!(result, Err(ProfileError::Timeout { .. })));
}
