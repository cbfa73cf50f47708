use std::time::Duration;

use inventario_api::storefront::notify::{
    DEFAULT_CAPACITY, DISPLAY_FOR, EXIT_TRANSITION, Notifier, Phase, Severity,
};

async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[test]
fn severity_defaults_to_success() {
    assert_eq!(Severity::default(), Severity::Success);
    assert_eq!(Severity::Error.to_string(), "error");
}

#[test]
fn display_timings_match_the_storefront() {
    assert_eq!(DISPLAY_FOR, Duration::from_millis(2000));
    assert_eq!(EXIT_TRANSITION, Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn notification_leaves_after_display_then_disappears() {
    let notifier = Notifier::new();
    let id = notifier.success("Producto agregado");

    let active = notifier.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, id);
    assert_eq!(active[0].severity, Severity::Success);
    assert_eq!(active[0].phase, Phase::Visible);

    wait(1990).await;
    assert_eq!(notifier.active()[0].phase, Phase::Visible);

    wait(20).await;
    assert_eq!(notifier.active()[0].phase, Phase::Leaving);

    wait(200).await;
    assert!(notifier.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn notifications_stack_and_expire_independently() {
    let notifier = Notifier::new();
    notifier.info("uno");
    wait(1000).await;
    notifier.error("dos");

    let messages: Vec<String> = notifier.active().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, vec!["uno", "dos"]);

    wait(1300).await;
    let remaining = notifier.active();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].message, "dos");
    assert_eq!(remaining[0].severity, Severity::Error);

    wait(1000).await;
    assert!(notifier.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn full_stack_evicts_the_oldest() {
    let notifier = Notifier::with_capacity(2);
    let first = notifier.show("a", Severity::Info);
    notifier.show("b", Severity::Info);
    notifier.show("c", Severity::Info);

    let active = notifier.active();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|n| n.id != first));
    assert_eq!(active[0].message, "b");

    // the evicted toast's timer must not disturb the others
    wait(2100).await;
    assert!(notifier.active().iter().all(|n| n.phase == Phase::Leaving));
    wait(200).await;
    assert!(notifier.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn default_capacity_bounds_rapid_fire_calls() {
    let notifier = Notifier::new();
    for i in 0..50 {
        notifier.show(format!("mensaje {i}"), Severity::default());
    }
    let active = notifier.active();
    assert_eq!(active.len(), DEFAULT_CAPACITY);
    assert_eq!(active.last().map(|n| n.message.as_str()), Some("mensaje 49"));
}
