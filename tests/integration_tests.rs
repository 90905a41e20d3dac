//! Integration tests for tts-sync

use tts_sync::{
    estimate, resolve, segment, BoundaryPolicy, Config, Dispatch, Interval, PlaybackEvent,
    PlaybackSignal, PresentationAdapter, SessionId, SyncController, SyncError, SyncEvent,
    TextUnit,
};

/// Sample article text with mixed punctuation and spacing
const ARTICLE: &str = "The quick brown fox jumps over the lazy dog.  Did it land?\n\
    It did! Then it ran   off into the woods, never to be seen again.";

fn durations(intervals: &[Interval]) -> Vec<f64> {
    intervals.iter().map(Interval::duration).collect()
}

fn started_controller(text: &str, duration: Option<f64>) -> (SyncController, tts_sync::Subscription, SessionId) {
    let mut controller = SyncController::default();
    let events = controller.subscribe();
    let session = controller.start_session(text);
    controller
        .duration_known(duration)
        .expect("session is live");
    (controller, events, session)
}

#[test]
fn test_segmentation_is_stable_when_rejoined() {
    let units = segment(ARTICLE);
    assert_eq!(units.len(), 4);

    let rejoined = segment(&units.join(""));
    assert_eq!(rejoined, units);

    let spaced = segment(&units.join(" "));
    assert_eq!(spaced, units);
}

#[test]
fn test_intervals_contiguous_for_any_hint() {
    let units = segment(ARTICLE);
    let hints = [
        None,
        Some(0.0),
        Some(-4.0),
        Some(f64::NAN),
        Some(f64::INFINITY),
        Some(0.5),
        Some(12.0),
        Some(600.0),
    ];

    for hint in hints {
        let intervals = estimate(&units, hint);
        assert_eq!(intervals.len(), units.len(), "hint {:?}", hint);
        assert_eq!(intervals[0].start, 0.0, "hint {:?}", hint);

        for pair in intervals.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "hint {:?}", hint);
        }
        for interval in &intervals {
            assert!(interval.start <= interval.end);
            assert!(
                interval.duration() >= 0.35 - 1e-9,
                "unit shorter than floor with hint {:?}: {:?}",
                hint,
                interval
            );
        }
    }
}

#[test]
fn test_durations_proportional_to_length() {
    let intervals = estimate(&["abcdefghij", "abcde"], Some(30.0));
    let d = durations(&intervals);
    assert!((d[0] - 2.0 * d[1]).abs() < 1e-9, "{:?}", d);
    assert!((intervals[1].end - 30.0).abs() < 1e-9);
}

#[test]
fn test_resolution_on_fixed_intervals() {
    let intervals = vec![
        Interval::new(0.0, 2.0),
        Interval::new(2.0, 5.0),
        Interval::new(5.0, 8.0),
    ];

    assert_eq!(resolve(&intervals, 1.0, BoundaryPolicy::Later), Some(0));
    // A shared boundary belongs to the unit that starts there
    assert_eq!(resolve(&intervals, 2.0, BoundaryPolicy::Later), Some(1));
    assert_eq!(resolve(&intervals, 9.0, BoundaryPolicy::Later), None);

    // The inclusive rule hands the same boundary to the earlier unit
    assert_eq!(resolve(&intervals, 2.0, BoundaryPolicy::Inclusive), Some(0));
}

#[test]
fn test_repeated_positions_do_not_reemit() {
    let (mut controller, events, session) = started_controller("First one. Second one.", Some(10.0));
    events.drain();

    for _ in 0..5 {
        controller.position(1.0).unwrap();
    }
    assert_eq!(
        events.drain(),
        vec![SyncEvent::Activate { session, index: 0 }]
    );

    for t in [1.1, 1.2, 2.0, 3.3] {
        controller.position(t).unwrap();
    }
    assert!(events.drain().is_empty());

    for _ in 0..3 {
        controller.position(100.0).unwrap();
    }
    assert_eq!(
        events.drain(),
        vec![SyncEvent::Deactivate { session, index: 0 }]
    );
}

#[test]
fn test_new_session_isolated_from_old() {
    let (mut controller, events, a) = started_controller("Alpha one. Alpha two.", Some(4.0));
    controller.position(3.0).unwrap();
    events.drain();

    let b = controller.start_session("Beta one. Beta two. Beta three.");
    assert_ne!(a, b);

    let emitted = events.drain();
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0], SyncEvent::Deactivate { session: a, index: 1 });
    assert!(matches!(emitted[1], SyncEvent::Rendered { session, .. } if session == b));

    // Queued events from the old session must have no effect
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(a, PlaybackSignal::DurationKnown(Some(9.0)))),
        Ok(Dispatch::Stale)
    );
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(a, PlaybackSignal::Position(0.1))),
        Ok(Dispatch::Stale)
    );
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(a, PlaybackSignal::Ended)),
        Ok(Dispatch::Stale)
    );
    assert!(events.drain().is_empty());
    assert!(!controller.session().unwrap().has_timings());

    controller
        .dispatch(PlaybackEvent::new(b, PlaybackSignal::DurationKnown(Some(3.0))))
        .unwrap();
    controller
        .dispatch(PlaybackEvent::new(b, PlaybackSignal::Position(0.0)))
        .unwrap();
    assert_eq!(
        events.drain(),
        vec![SyncEvent::Activate { session: b, index: 0 }]
    );
}

#[test]
fn test_positions_queued_after_end_are_ignored() {
    let (mut controller, events, session) = started_controller("One. Two.", Some(2.0));

    assert_eq!(
        controller.dispatch(PlaybackEvent::new(session, PlaybackSignal::Position(1.5))),
        Ok(Dispatch::Applied)
    );
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(session, PlaybackSignal::Ended)),
        Ok(Dispatch::Applied)
    );
    events.drain();

    // A late position report for the finished playback must not relight a unit
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(session, PlaybackSignal::Position(0.5))),
        Ok(Dispatch::Stale)
    );
    assert!(events.drain().is_empty());
    assert_eq!(controller.active_index(), None);

    // The next session is unaffected
    let next = controller.start_session("Three.");
    controller
        .dispatch(PlaybackEvent::new(next, PlaybackSignal::DurationKnown(Some(1.0))))
        .unwrap();
    assert_eq!(
        controller.dispatch(PlaybackEvent::new(next, PlaybackSignal::Position(0.5))),
        Ok(Dispatch::Applied)
    );
    assert_eq!(controller.active_index(), Some(0));
}

#[test]
fn test_new_session_without_highlight_emits_no_deactivate() {
    let (mut controller, events, _a) = started_controller("Alpha.", Some(1.0));
    events.drain();

    let b = controller.start_session("Beta.");
    let emitted = events.drain();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].session(), b);
}

#[test]
fn test_empty_text_end_to_end() {
    assert!(segment("").is_empty());
    assert!(estimate::<&str>(&[], Some(5.0)).is_empty());
    assert!(estimate::<&str>(&[], None).is_empty());

    let (mut controller, events, session) = started_controller("", Some(5.0));
    match events.drain().as_slice() {
        [SyncEvent::Rendered { session: s, units }] => {
            assert_eq!(*s, session);
            assert!(units.is_empty());
        }
        other => panic!("unexpected events: {:?}", other),
    }

    for t in [0.0, 1.0, 5.0, -1.0, f64::NAN] {
        assert_eq!(controller.position(t).unwrap(), None);
    }
    assert!(events.drain().is_empty());
}

#[test]
fn test_position_before_any_session_fails() {
    let mut controller = SyncController::new(&Config::default());
    assert_eq!(controller.position(0.0), Err(SyncError::NoActiveSession));
}

#[test]
fn test_unknown_duration_still_highlights() {
    let (mut controller, events, session) = started_controller("Short. Also short.", None);
    events.drain();

    // 6 + 11 chars => fallback max(5.0, 17 * 0.35) = 5.95s
    let end = controller.session().unwrap().intervals().last().unwrap().end;
    assert!((end - 5.95).abs() < 1e-9);

    assert_eq!(controller.position(5.0).unwrap(), Some(1));
    assert_eq!(
        events.drain(),
        vec![SyncEvent::Activate { session, index: 1 }]
    );
}

#[test]
fn test_adapter_sees_full_lifecycle() {
    #[derive(Default)]
    struct Highlights {
        rendered: Vec<String>,
        active: Option<usize>,
        history: Vec<usize>,
    }

    impl PresentationAdapter for Highlights {
        fn render(&mut self, units: &[TextUnit]) {
            self.rendered = units.iter().map(|u| u.text.clone()).collect();
            self.active = None;
        }

        fn activate(&mut self, index: usize) {
            assert!(self.active.is_none(), "two units active at once");
            self.active = Some(index);
            self.history.push(index);
        }

        fn deactivate(&mut self, index: usize) {
            assert_eq!(self.active, Some(index));
            self.active = None;
        }
    }

    let (mut controller, events, _) = started_controller(ARTICLE, Some(20.0));
    let mut adapter = Highlights::default();

    let mut t = 0.0;
    while t <= 25.0 {
        controller.position(t).unwrap();
        events.drain_into(&mut adapter);
        t += 0.25;
    }
    controller.reset();
    events.drain_into(&mut adapter);

    assert_eq!(adapter.rendered.len(), 4);
    assert_eq!(adapter.history, vec![0, 1, 2, 3]);
    assert_eq!(adapter.active, None);
}
