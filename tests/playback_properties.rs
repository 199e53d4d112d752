// Property tests: invariants hold for any sequence of transport operations

use conceptty::playback::{ManualClock, PlaybackController, Speed};
use conceptty::topic::{Step, StepSequence};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Op {
    Play,
    Pause,
    Toggle,
    Next,
    Prev,
    Reset,
    Seek(usize),
    SetSpeed(Speed),
    Wait(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Play),
        Just(Op::Pause),
        Just(Op::Toggle),
        Just(Op::Next),
        Just(Op::Prev),
        Just(Op::Reset),
        (0usize..12).prop_map(Op::Seek),
        prop::sample::select(Speed::ALL.to_vec()).prop_map(Op::SetSpeed),
        (0u64..8000).prop_map(Op::Wait),
    ]
}

proptest! {
    #[test]
    fn cursor_and_timer_invariants_hold(
        durations in prop::collection::vec(1u64..3000, 1..8),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let steps = durations
            .iter()
            .map(|&ms| Step::new("step", ms, ()))
            .collect();
        let seq = Arc::new(StepSequence::new(steps).unwrap());
        let len = seq.len();
        let clock = ManualClock::new();
        let mut c = PlaybackController::with_clock(seq, clock.clone());

        for op in ops {
            let before = c.current_index();
            match op {
                Op::Play => c.play(),
                Op::Pause => c.pause(),
                Op::Toggle => c.toggle(),
                Op::Next => { c.next(); }
                Op::Prev => { c.prev(); }
                Op::Reset => c.reset(),
                Op::Seek(n) => {
                    let reached = c.seek(n);
                    prop_assert_eq!(reached, n.clamp(1, len));
                    prop_assert!(!c.is_playing());
                }
                Op::SetSpeed(s) => c.set_speed(s),
                Op::Wait(ms) => {
                    let was_playing = c.is_playing();
                    clock.advance_ms(ms);
                    c.poll();
                    // Autoplay only ever moves forward
                    prop_assert!(c.current_index() >= before);
                    if !was_playing {
                        prop_assert_eq!(c.current_index(), before);
                    }
                }
            }

            prop_assert!(c.current_index() >= 1 && c.current_index() <= len);
            let expected = if c.is_playing() { 1 } else { 0 };
            prop_assert_eq!(c.pending_advances(), expected);
            prop_assert_eq!(c.pending_token().is_some(), c.is_playing());
        }
    }
}
