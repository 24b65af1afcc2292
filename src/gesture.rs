use crate::{
    landmarks::LandmarkLayout,
    types::{FrameObservations, HandObservation, Handedness, InstantGesture, Point2D},
};

/// Extension flags in `[thumb, index, middle, ring, pinky]` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerStates(pub [bool; 5]);

impl FingerStates {
    pub fn index_up(&self) -> bool {
        self.0[1]
    }

    /// Open palm.
    pub fn all_up(&self) -> bool {
        self.0.iter().all(|&up| up)
    }
}

pub fn extract_finger_states(hand: &HandObservation, layout: &LandmarkLayout) -> FingerStates {
    let points = &hand.landmarks;
    let [index, middle, ring, pinky] =
        layout.fingers.map(|(tip, pip)| finger_up(points[tip], points[pip]));

    FingerStates([
        thumb_up(points[layout.thumb_tip], points[layout.thumb_ip], hand.handedness),
        index,
        middle,
        ring,
        pinky,
    ])
}

// Smaller y is higher in the image.
fn finger_up(tip: Point2D, pip: Point2D) -> bool {
    tip.y < pip.y
}

// The thumb opens sideways, towards opposite image edges on each hand.
fn thumb_up(tip: Point2D, ip: Point2D, handedness: Handedness) -> bool {
    match handedness {
        Handedness::Right => tip.x > ip.x,
        Handedness::Left => tip.x < ip.x,
    }
}

/// Predicates one side contributes to a frame; an absent hand contributes all `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SideFlags {
    index_up: bool,
    all_up: bool,
}

impl SideFlags {
    fn from_states(states: FingerStates) -> Self {
        Self {
            index_up: states.index_up(),
            all_up: states.all_up(),
        }
    }
}

/// Stateless two-hand classifier.
#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    layout: LandmarkLayout,
}

impl GestureClassifier {
    pub fn with_layout(layout: LandmarkLayout) -> Self {
        Self { layout }
    }

    pub fn classify(&self, frame: &FrameObservations) -> InstantGesture {
        let left = self.side_flags(frame.hand(Handedness::Left));
        let right = self.side_flags(frame.hand(Handedness::Right));
        detect_instant_gesture(left, right)
    }

    fn side_flags(&self, hand: Option<&HandObservation>) -> SideFlags {
        hand.map(|hand| SideFlags::from_states(extract_finger_states(hand, &self.layout)))
            .unwrap_or_default()
    }
}

// Jump beats Down beats a single-side move.
fn detect_instant_gesture(left: SideFlags, right: SideFlags) -> InstantGesture {
    if left.all_up || right.all_up {
        InstantGesture::Jump
    } else if left.index_up && right.index_up {
        InstantGesture::Down
    } else if right.index_up && !right.all_up {
        InstantGesture::Right
    } else if left.index_up && !left.all_up {
        InstantGesture::Left
    } else {
        InstantGesture::None
    }
}

/// Fixed guide text shown next to the camera feed.
pub fn gesture_guide() -> [&'static str; 4] {
    [
        "RIGHT HAND : Index Up = RIGHT MOVE",
        "LEFT HAND  : Index Up = LEFT MOVE",
        "EITHER HAND OPEN = JUMP",
        "BOTH INDEX UP = SLIDE",
    ]
}
