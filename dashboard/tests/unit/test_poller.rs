//! Poller worker tests

use std::sync::Arc;
use std::time::Duration;

use swarmcd_dashboard::sync::{Controller, SyncPhase};
use swarmcd_dashboard::workers::poller;
use tokio::sync::oneshot;

use crate::support::{three_stacks, wait_until, ScriptedSource};

#[tokio::test]
async fn test_poller_checks_until_shutdown() {
    let mut changed = three_stacks();
    changed[2].error = String::new();

    let source = Arc::new(ScriptedSource::new(vec![Ok(three_stacks()), Ok(changed)]));
    let controller = Controller::new(source.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move {
            let options = poller::Options {
                interval: Duration::from_secs(5),
                initial_delay: Duration::ZERO,
            };
            poller::run(
                &options,
                &controller,
                |_| tokio::task::yield_now(),
                Box::pin(async move {
                    let _ = shutdown_rx.await;
                }),
            )
            .await;
        }
    });

    wait_until(|| source.calls() >= 3).await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();

    // first poll loaded, second staged the change, later polls matched it
    let view = controller.view();
    assert_eq!(view.phase, SyncPhase::UpdateAvailable);
    assert_eq!(view.stacks[2].error, "Oh no!!!");
}

#[tokio::test]
async fn test_poller_stops_when_controller_closed() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(three_stacks())]));
    let controller = Controller::new(source.clone());
    controller.shutdown();

    poller::run(
        &poller::Options::default(),
        &controller,
        |_| tokio::task::yield_now(),
        Box::pin(std::future::pending::<()>()),
    )
    .await;

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_poller_survives_panicking_fetch() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(three_stacks())]).panicking_on(2));
    let controller = Controller::new(source.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move {
            let options = poller::Options {
                interval: Duration::from_millis(1),
                initial_delay: Duration::ZERO,
            };
            poller::run(
                &options,
                &controller,
                |_| tokio::task::yield_now(),
                Box::pin(async move {
                    let _ = shutdown_rx.await;
                }),
            )
            .await;
        }
    });

    wait_until(|| source.calls() >= 4).await;
    assert!(!handle.is_finished());
    let _ = shutdown_tx.send(());
    handle.await.unwrap();
    wait_until(|| !controller.is_checking()).await;

    // polls after the panic recovered the error
    let view = controller.view();
    assert_eq!(view.phase, SyncPhase::Displaying);
    assert!(view.error.is_none());
    assert!(!controller.is_closed());
}
