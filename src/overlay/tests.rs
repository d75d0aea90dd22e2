use super::*;

#[test]
fn first_raise_activates_and_later_ones_queue() {
    let mut q = ErrorOverlayQueue::new();
    assert_eq!(q.raise(ErrorEvent::recoverable("A")), Raised::Activated);
    assert_eq!(q.raise(ErrorEvent::recoverable("B")), Raised::Queued);
    assert_eq!(q.active().map(|e| e.message.as_str()), Some("A"));
    assert_eq!(q.pending_len(), 1);
}

#[test]
fn events_are_shown_in_fifo_order_and_fatal_terminates() {
    let mut q = ErrorOverlayQueue::new();
    q.raise(ErrorEvent::recoverable("A"));
    q.raise(ErrorEvent::recoverable("B"));
    q.raise(ErrorEvent::fatal("C"));

    assert_eq!(q.active().unwrap().message, "A");
    assert_eq!(q.acknowledge(), Acknowledgement::Next);
    assert_eq!(q.active().unwrap().message, "B");
    assert_eq!(q.acknowledge(), Acknowledgement::Next);
    assert_eq!(q.active().unwrap().message, "C");
    assert!(q.active().unwrap().is_fatal());
    assert_eq!(q.acknowledge(), Acknowledgement::Terminate { discarded: 0 });

    assert!(!q.is_active());
    assert_eq!(q.acknowledge(), Acknowledgement::Nothing);
}

#[test]
fn fatal_is_not_promoted_ahead_of_earlier_events() {
    let mut q = ErrorOverlayQueue::new();
    q.raise(ErrorEvent::recoverable("A"));
    q.raise(ErrorEvent::recoverable("B"));
    q.raise(ErrorEvent::fatal("F"));

    q.acknowledge();
    assert_eq!(q.active().unwrap().message, "B");
}

#[test]
fn fatal_acknowledgment_discards_the_remaining_queue() {
    let mut q = ErrorOverlayQueue::new();
    q.raise(ErrorEvent::fatal("F"));
    q.raise(ErrorEvent::recoverable("late 1"));
    q.raise(ErrorEvent::recoverable("late 2"));

    assert_eq!(q.acknowledge(), Acknowledgement::Terminate { discarded: 2 });
    assert_eq!(q.pending_len(), 0);
    assert!(q.active().is_none());
}

#[test]
fn recoverable_acknowledgment_with_empty_queue_resumes() {
    let mut q = ErrorOverlayQueue::new();
    q.raise(ErrorEvent::recoverable("A"));
    assert_eq!(q.acknowledge(), Acknowledgement::Resumed);
    assert!(!q.is_active());

    // A new error after resuming activates immediately again.
    assert_eq!(q.raise(ErrorEvent::recoverable("B")), Raised::Activated);
}

#[test]
fn a_long_error_storm_drains_without_recursion() {
    let mut q = ErrorOverlayQueue::new();
    for i in 0..10_000 {
        q.raise(ErrorEvent::recoverable(format!("e{i}")));
    }
    let mut shown = 1;
    while q.acknowledge() == Acknowledgement::Next {
        shown += 1;
    }
    assert_eq!(shown, 10_000);
    assert!(!q.is_active());
}
