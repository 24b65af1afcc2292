use std::time::{Duration, Instant};

use crate::types::{ActionEvent, InstantGesture};

pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Cooling,
}

/// Rate limits smoothed gestures into discrete actions.
///
/// An action fires only when strictly more than `cooldown` has passed since the
/// previous one. Gestures that arrive while cooling are dropped, not queued.
#[derive(Clone, Debug)]
pub struct ActionDispatcher {
    cooldown: Duration,
    last_trigger: Option<Instant>,
}

impl ActionDispatcher {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_trigger: None,
        }
    }

    pub fn phase(&self, now: Instant) -> DispatchPhase {
        match self.last_trigger {
            Some(last) if now.saturating_duration_since(last) <= self.cooldown => {
                DispatchPhase::Cooling
            }
            _ => DispatchPhase::Idle,
        }
    }

    pub fn dispatch(
        &mut self,
        smoothed: Option<InstantGesture>,
        now: Instant,
    ) -> Option<ActionEvent> {
        let action = smoothed?.action()?;
        if self.phase(now) == DispatchPhase::Cooling {
            log::trace!("dropping {} during cooldown", action.display_name());
            return None;
        }

        self.last_trigger = Some(now);
        Some(action)
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn test_first_gesture_fires_immediately() {
        let mut dispatcher = ActionDispatcher::default();
        let now = Instant::now();
        assert_eq!(dispatcher.phase(now), DispatchPhase::Idle);
        assert_eq!(
            dispatcher.dispatch(Some(InstantGesture::Left), now),
            Some(ActionEvent::MoveLeft)
        );
        assert_eq!(dispatcher.phase(now), DispatchPhase::Cooling);
    }

    #[test]
    fn test_none_never_fires_or_arms_cooldown() {
        let mut dispatcher = ActionDispatcher::default();
        let base = Instant::now();
        assert_eq!(dispatcher.dispatch(Some(InstantGesture::None), base), None);
        assert_eq!(dispatcher.dispatch(None, at(base, 10)), None);
        assert_eq!(
            dispatcher.dispatch(Some(InstantGesture::Jump), at(base, 20)),
            Some(ActionEvent::Jump)
        );
    }

    #[test]
    fn test_jump_every_100ms_is_rate_limited() {
        let mut dispatcher = ActionDispatcher::default();
        let base = Instant::now();

        let fired: Vec<u64> = [0, 100, 200, 300, 400, 500, 600, 700, 800]
            .into_iter()
            .filter(|&ms| {
                dispatcher
                    .dispatch(Some(InstantGesture::Jump), at(base, ms))
                    .is_some()
            })
            .collect();

        // 300ms after a trigger is still cooling; the boundary is strict.
        assert_eq!(fired, vec![0, 400, 800]);
    }

    #[test]
    fn test_boundary_is_strictly_greater() {
        let mut dispatcher = ActionDispatcher::default();
        let base = Instant::now();
        dispatcher.dispatch(Some(InstantGesture::Down), base);

        assert_eq!(
            dispatcher.dispatch(Some(InstantGesture::Down), at(base, 300)),
            None
        );
        assert_eq!(
            dispatcher.dispatch(
                Some(InstantGesture::Down),
                base + Duration::from_millis(300) + Duration::from_nanos(1)
            ),
            Some(ActionEvent::Slide)
        );
    }

    #[test]
    fn test_suppressed_gesture_is_not_deferred() {
        let mut dispatcher = ActionDispatcher::default();
        let base = Instant::now();
        dispatcher.dispatch(Some(InstantGesture::Left), base);
        assert_eq!(
            dispatcher.dispatch(Some(InstantGesture::Right), at(base, 100)),
            None
        );
        assert_eq!(dispatcher.dispatch(None, at(base, 500)), None);
    }

    #[test]
    fn test_time_going_backwards_keeps_cooling() {
        let mut dispatcher = ActionDispatcher::default();
        let base = Instant::now();
        dispatcher.dispatch(Some(InstantGesture::Jump), at(base, 1_000));
        assert_eq!(dispatcher.phase(at(base, 500)), DispatchPhase::Cooling);
        assert_eq!(
            dispatcher.dispatch(Some(InstantGesture::Jump), at(base, 500)),
            None
        );
    }

    #[test]
    fn test_each_gesture_maps_to_its_action() {
        let base = Instant::now();
        for (gesture, action) in [
            (InstantGesture::Left, ActionEvent::MoveLeft),
            (InstantGesture::Right, ActionEvent::MoveRight),
            (InstantGesture::Down, ActionEvent::Slide),
            (InstantGesture::Jump, ActionEvent::Jump),
        ] {
            let mut dispatcher = ActionDispatcher::new(Duration::from_millis(50));
            assert_eq!(dispatcher.dispatch(Some(gesture), base), Some(action));
        }
    }
}
