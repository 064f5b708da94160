use super::*;

#[test]
fn new_notifier_shows_nothing() {
    let n = Notifier::new();
    assert!(n.current_at(Instant::now()).is_none());
}

#[test]
fn notification_visible_until_ttl() {
    let mut n = Notifier::new();
    let t0 = Instant::now();
    n.notify_at("saved", true, t0);

    let shown = n.current_at(t0 + Duration::from_secs(2)).unwrap();
    assert_eq!(shown.message, "saved");
    assert!(shown.success);
    assert_eq!(shown.visible_until, t0 + NOTIFICATION_TTL);

    assert!(n.current_at(t0 + NOTIFICATION_TTL).is_none());
}

#[test]
fn newer_notification_wins_and_restarts_timer() {
    let mut n = Notifier::new();
    let t0 = Instant::now();
    n.notify_at("first", true, t0);
    n.notify_at("second", false, t0 + Duration::from_secs(2));

    let shown = n.current_at(t0 + Duration::from_secs(4)).unwrap();
    assert_eq!(shown.message, "second");
    assert!(!shown.success);
    assert!(n.current_at(t0 + Duration::from_secs(5)).is_none());
}

#[test]
fn sweep_clears_only_expired() {
    let mut n = Notifier::new();
    let t0 = Instant::now();
    n.notify_at("saved", true, t0);

    assert!(!n.sweep_at(t0 + Duration::from_secs(1)));
    assert!(n.current_at(t0 + Duration::from_secs(1)).is_some());

    assert!(n.sweep_at(t0 + Duration::from_secs(3)));
    assert!(!n.sweep_at(t0 + Duration::from_secs(4)));
}

#[test]
fn custom_ttl_and_dismiss() {
    let mut n = Notifier::with_ttl(Duration::from_millis(10));
    let t0 = Instant::now();
    n.notify_at("quick", true, t0);
    assert!(n.current_at(t0 + Duration::from_millis(11)).is_none());

    n.notify_at("again", true, t0);
    n.dismiss();
    assert!(n.current_at(t0).is_none());
}
