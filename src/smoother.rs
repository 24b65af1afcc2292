use std::collections::VecDeque;

use crate::types::InstantGesture;

pub const DEFAULT_HISTORY_LEN: usize = 5;

/// Last `capacity` per-frame gestures, oldest first.
#[derive(Clone, Debug)]
pub struct GestureHistory {
    window: VecDeque<InstantGesture>,
    capacity: usize,
}

impl GestureHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, gesture: InstantGesture) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(gesture);
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Most frequent gesture in the window. On a tie the value seen first
    /// (oldest) wins, so the result never depends on hashing order.
    pub fn mode(&self) -> Option<InstantGesture> {
        let mut best: Option<(InstantGesture, usize)> = None;
        for (pos, &candidate) in self.window.iter().enumerate() {
            if self.window.iter().take(pos).any(|&seen| seen == candidate) {
                continue;
            }
            let count = self.window.iter().filter(|&&g| g == candidate).count();
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((candidate, count));
            }
        }
        best.map(|(gesture, _)| gesture)
    }
}

impl Default for GestureHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

/// Majority vote over the recent per-frame verdicts.
#[derive(Clone, Debug, Default)]
pub struct GestureSmoother {
    history: GestureHistory,
}

impl GestureSmoother {
    pub fn new(history_len: usize) -> Self {
        Self {
            history: GestureHistory::new(history_len),
        }
    }

    pub fn update(&mut self, gesture: InstantGesture) -> Option<InstantGesture> {
        self.history.push(gesture);
        self.history.mode()
    }

    pub fn history(&self) -> &GestureHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InstantGesture::*;

    fn history_of(gestures: &[InstantGesture]) -> GestureHistory {
        let mut history = GestureHistory::default();
        for &gesture in gestures {
            history.push(gesture);
        }
        history
    }

    #[test]
    fn test_empty_history_has_no_mode() {
        let smoother = GestureSmoother::default();
        assert!(smoother.history().is_empty());
        assert_eq!(smoother.history().mode(), Option::None);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let history = history_of(&[Jump, Left, Left, Right, Right, Right]);
        assert_eq!(history.len(), 5);
        assert_eq!(history.mode(), Some(Right));
    }

    #[test]
    fn test_single_outlier_is_rejected() {
        let history = history_of(&[Left, Left, Left, Jump, Left]);
        assert_eq!(history.mode(), Some(Left));
    }

    #[test]
    fn test_five_repeats_override_any_history() {
        for prior in [Left, Right, Down, Jump, None] {
            let mut smoother = GestureSmoother::default();
            for _ in 0..5 {
                smoother.update(prior);
            }
            let mut last = Option::None;
            for _ in 0..5 {
                last = smoother.update(Down);
            }
            assert_eq!(last, Some(Down), "prior {prior:?}");
        }
    }

    #[test]
    fn test_tie_goes_to_oldest_value() {
        assert_eq!(history_of(&[Right, Left, Left, Right]).mode(), Some(Right));
        assert_eq!(history_of(&[Left, Right, Right, Left]).mode(), Some(Left));
        assert_eq!(
            history_of(&[Jump, None, Down, None, Jump]).mode(),
            Some(Jump)
        );
    }

    #[test]
    fn test_none_can_win() {
        let history = history_of(&[None, Left, None, None, Right]);
        assert_eq!(history.mode(), Some(None));
    }

    #[test]
    fn test_first_frame_is_its_own_mode() {
        let mut smoother = GestureSmoother::new(3);
        assert_eq!(smoother.update(Jump), Some(Jump));
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut smoother = GestureSmoother::new(0);
        smoother.update(Left);
        assert_eq!(smoother.update(Right), Some(Right));
        assert_eq!(smoother.history().len(), 1);
    }
}
