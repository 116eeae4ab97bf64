//! Navigation target computation
//!
//! Pure functions from (queue length, current index, policy) to a
//! navigation plan. Both manual skips and natural end-of-track use the
//! same computation; policy never mutates the queue itself.

use crate::types::RepeatMode;
use rand::Rng;

/// What the engine should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPlan {
    /// Load and play the track at this index
    Play(usize),

    /// Stop playback and return to idle with current cleared
    Stop,

    /// Nothing to navigate to
    Nothing,
}

/// Compute the forward navigation target
///
/// Single-track queues replay regardless of policy, and repeat-one always
/// re-targets the current track. With shuffle off the target is
/// `(i + 1) mod n`, except that running past the last track with repeat
/// off stops instead of wrapping. With shuffle on the target is a random
/// index that is never the immediate same track when `n > 1`.
pub fn next(
    len: usize,
    current: Option<usize>,
    repeat: RepeatMode,
    shuffle: bool,
    rng: &mut impl Rng,
) -> NavPlan {
    if len == 0 {
        return NavPlan::Nothing;
    }
    if len == 1 {
        return NavPlan::Play(0);
    }

    let Some(i) = current else {
        return NavPlan::Play(0);
    };

    if repeat == RepeatMode::One {
        return NavPlan::Play(i);
    }

    if shuffle {
        return NavPlan::Play(random_excluding(len, i, rng));
    }

    if i + 1 < len {
        NavPlan::Play(i + 1)
    } else if repeat == RepeatMode::All {
        NavPlan::Play(0)
    } else {
        NavPlan::Stop
    }
}

/// Compute the backward navigation target
///
/// Always wraps at the front boundary; repeat-off stopping applies only
/// to running forward past the tail.
pub fn previous(
    len: usize,
    current: Option<usize>,
    shuffle: bool,
    rng: &mut impl Rng,
) -> NavPlan {
    if len == 0 {
        return NavPlan::Nothing;
    }
    if len == 1 {
        return NavPlan::Play(0);
    }

    let Some(i) = current else {
        return NavPlan::Play(len - 1);
    };

    if shuffle {
        return NavPlan::Play(random_excluding(len, i, rng));
    }

    NavPlan::Play((i + len - 1) % len)
}

// No history-aware shuffling: only the immediate same-track repeat is
// avoided, runs may still revisit tracks before exhausting the queue.
fn random_excluding(len: usize, exclude: usize, rng: &mut impl Rng) -> usize {
    let pick = rng.gen_range(0..len - 1);
    if pick >= exclude {
        pick + 1
    } else {
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn rng() -> StepRng {
        StepRng::new(0, 1)
    }

    #[test]
    fn empty_queue_navigates_nowhere() {
        assert_eq!(next(0, None, RepeatMode::Off, false, &mut rng()), NavPlan::Nothing);
        assert_eq!(previous(0, None, false, &mut rng()), NavPlan::Nothing);
    }

    #[test]
    fn single_track_always_replays() {
        for repeat in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(next(1, Some(0), repeat, false, &mut rng()), NavPlan::Play(0));
        }
        assert_eq!(previous(1, Some(0), true, &mut rng()), NavPlan::Play(0));
    }

    #[test]
    fn linear_next_increments_mod_n() {
        assert_eq!(next(3, Some(0), RepeatMode::Off, false, &mut rng()), NavPlan::Play(1));
        assert_eq!(next(3, Some(1), RepeatMode::Off, false, &mut rng()), NavPlan::Play(2));
    }

    #[test]
    fn tail_with_repeat_off_stops() {
        assert_eq!(next(3, Some(2), RepeatMode::Off, false, &mut rng()), NavPlan::Stop);
    }

    #[test]
    fn tail_with_repeat_all_wraps() {
        assert_eq!(next(3, Some(2), RepeatMode::All, false, &mut rng()), NavPlan::Play(0));
    }

    #[test]
    fn repeat_one_retargets_current() {
        assert_eq!(next(3, Some(1), RepeatMode::One, false, &mut rng()), NavPlan::Play(1));
        assert_eq!(next(3, Some(1), RepeatMode::One, true, &mut rng()), NavPlan::Play(1));
    }

    #[test]
    fn previous_wraps_at_front() {
        assert_eq!(previous(3, Some(0), false, &mut rng()), NavPlan::Play(2));
        assert_eq!(previous(3, Some(2), false, &mut rng()), NavPlan::Play(1));
    }

    #[test]
    fn no_current_starts_at_boundary() {
        assert_eq!(next(3, None, RepeatMode::Off, false, &mut rng()), NavPlan::Play(0));
        assert_eq!(previous(3, None, false, &mut rng()), NavPlan::Play(2));
    }

    #[test]
    fn shuffle_never_picks_current_immediately() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let NavPlan::Play(target) = next(5, Some(2), RepeatMode::Off, true, &mut rng) else {
                panic!("shuffle must always produce a target");
            };
            assert!(target < 5);
            assert_ne!(target, 2);
        }
    }
}
