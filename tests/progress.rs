//! Progress notification and cancellation behavior.

use std::cell::RefCell;
use std::rc::Rc;

use ged_parse::{CancelFlag, GedcomBuilder, GedcomError};

fn sample_with_records(count: usize) -> Vec<u8> {
    let mut text = String::from("0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR ASCII\n");
    for i in 0..count {
        text.push_str(&format!("0 @I{i}@ INDI\n1 NAME Person{i} //\n"));
    }
    text.push_str("0 TRLR\n");
    text.into_bytes()
}

#[test]
fn test_file_observer_sees_rate_and_completion() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let seen = events.clone();

    let outcome = GedcomBuilder::new()
        .read_notification_rate(10)
        .file_observer(move |event| seen.borrow_mut().push(*event))
        .build_from_bytes(&sample_with_records(20))
        .unwrap();
    assert!(outcome.errors.is_empty());

    let events = events.borrow();
    assert!(!events.is_empty());
    // Intermediate events fire every 10 lines, in order.
    let intermediate: Vec<usize> = events
        .iter()
        .filter(|e| !e.complete)
        .map(|e| e.lines_read)
        .collect();
    assert_eq!(intermediate, vec![10, 20, 30, 40]);
    // Exactly one completion event, last, with the full count (45 logical
    // lines: 4 header lines + 2 per individual + TRLR).
    let last = events.last().unwrap();
    assert!(last.complete);
    assert_eq!(last.lines_read, 45);
    assert_eq!(events.iter().filter(|e| e.complete).count(), 1);
}

#[test]
fn test_multiple_file_observers_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let first = log.clone();
    let second = log.clone();

    GedcomBuilder::new()
        .read_notification_rate(0)
        .file_observer(move |_| first.borrow_mut().push("first"))
        .file_observer(move |_| second.borrow_mut().push("second"))
        .build_from_bytes(&sample_with_records(1))
        .unwrap();

    // Only the completion event fires at rate 0.
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn test_record_observer_fires_per_record() {
    let tags = Rc::new(RefCell::new(Vec::new()));
    let seen = tags.clone();

    GedcomBuilder::new()
        .record_observer(move |event| seen.borrow_mut().push(event.tag.clone()))
        .build_from_bytes(&sample_with_records(2))
        .unwrap();

    assert_eq!(*tags.borrow(), vec!["HEAD", "INDI", "INDI", "TRLR"]);
}

#[test]
fn test_record_observer_counts_and_xrefs() {
    let last = Rc::new(RefCell::new(None));
    let seen = last.clone();

    GedcomBuilder::new()
        .record_observer(move |event| *seen.borrow_mut() = Some(event.clone()))
        .build_from_bytes(&sample_with_records(2))
        .unwrap();

    let event = last.borrow().clone().unwrap();
    assert_eq!(event.tag, "TRLR");
    assert_eq!(event.xref, None);
    assert_eq!(event.records_processed, 4);
}

#[test]
fn test_pre_set_cancel_flag_aborts() {
    let cancel = CancelFlag::new();
    cancel.cancel();

    let failure = GedcomBuilder::new()
        .cancel_flag(cancel)
        .build_from_bytes(&sample_with_records(5))
        .unwrap_err();
    assert!(failure.is_cancelled());
    assert!(matches!(failure.error, GedcomError::Cancelled { .. }));
}

#[test]
fn test_cancel_from_observer_stops_mid_read() {
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();

    let failure = GedcomBuilder::new()
        .read_notification_rate(10)
        .cancel_flag(cancel)
        .file_observer(move |event| {
            if event.lines_read >= 20 {
                trigger.cancel();
            }
        })
        .build_from_bytes(&sample_with_records(100))
        .unwrap_err();

    match failure.error {
        GedcomError::Cancelled { lines_read } => {
            // Cancellation observed within one line of the trigger.
            assert!(lines_read >= 20 && lines_read < 25, "{lines_read}");
        }
        other => panic!("expected Cancelled, got {other:?}"),
    }
}
