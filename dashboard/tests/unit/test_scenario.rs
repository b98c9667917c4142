//! End-to-end scenario: poll, filter, stage, apply

use std::sync::Arc;

use swarmcd_dashboard::filter::filter_statuses;
use swarmcd_dashboard::sync::{CheckOutcome, Controller};

use crate::support::{status, three_stacks, ScriptedSource};

fn visible(controller: &Controller, query: &str) -> Vec<String> {
    let view = controller.view();
    filter_statuses(&view.stacks, query)
        .into_iter()
        .map(|s| s.name.clone())
        .collect()
}

#[tokio::test]
async fn test_three_stack_scenario() {
    let mut next = three_stacks();
    next.push(status("Zed", "", "3.0.0", "https://www.url4.com"));

    let source = Arc::new(ScriptedSource::new(vec![Ok(three_stacks()), Ok(next)]));
    let controller = Controller::new(source);

    assert_eq!(controller.check_for_update().await, CheckOutcome::Loaded);

    assert_eq!(visible(&controller, "Foo"), vec!["Foobar", "FooFoo"]);
    assert_eq!(visible(&controller, "2.0.0"), vec!["FooFoo", "Boobaz"]);
    assert_eq!(visible(&controller, "Oh no!"), vec!["Boobaz"]);
    assert!(visible(&controller, "zzz").is_empty());
    assert_eq!(visible(&controller, "").len(), 3);

    // a new stack shows up only after apply
    assert_eq!(controller.check_for_update().await, CheckOutcome::UpdateAvailable);
    assert!(visible(&controller, "Zed").is_empty());

    controller.apply_update();
    assert_eq!(visible(&controller, "Zed"), vec!["Zed"]);
    assert_eq!(visible(&controller, "").len(), 4);
}
