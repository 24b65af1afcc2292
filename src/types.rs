use std::time::Instant;

use serde::Deserialize;

use crate::landmarks::LANDMARK_COUNT;

/// Image-space point in pixels. Origin is top-left, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn label(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// One validated hand for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub handedness: Handedness,
    pub landmarks: [Point2D; LANDMARK_COUNT],
}

/// At most one hand per side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameObservations {
    pub left: Option<HandObservation>,
    pub right: Option<HandObservation>,
}

impl FrameObservations {
    pub fn hand(&self, side: Handedness) -> Option<&HandObservation> {
        match side {
            Handedness::Left => self.left.as_ref(),
            Handedness::Right => self.right.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Per-frame verdict of the classifier, before smoothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstantGesture {
    None,
    Left,
    Right,
    Down,
    Jump,
}

impl InstantGesture {
    /// Overlay text. `None` has nothing to show.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            InstantGesture::None => None,
            InstantGesture::Left => Some("LEFT"),
            InstantGesture::Right => Some("RIGHT"),
            InstantGesture::Down => Some("DOWN"),
            InstantGesture::Jump => Some("JUMP"),
        }
    }

    pub fn action(&self) -> Option<ActionEvent> {
        match self {
            InstantGesture::None => None,
            InstantGesture::Left => Some(ActionEvent::MoveLeft),
            InstantGesture::Right => Some(ActionEvent::MoveRight),
            InstantGesture::Down => Some(ActionEvent::Slide),
            InstantGesture::Jump => Some(ActionEvent::Jump),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionEvent {
    MoveLeft,
    MoveRight,
    Slide,
    Jump,
}

impl ActionEvent {
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionEvent::MoveLeft => "move left",
            ActionEvent::MoveRight => "move right",
            ActionEvent::Slide => "slide",
            ActionEvent::Jump => "jump",
        }
    }
}

/// A single hand as reported by the upstream detector, coordinates normalized to [0, 1].
#[derive(Clone, Debug, Deserialize)]
pub struct RawDetection {
    pub handedness: String,
    pub landmarks: Vec<[f32; 2]>,
}

/// One line of detector output.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDetectionFrame {
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub hands: Vec<RawDetection>,
}

/// Detector output stamped with the instant the core should use for it.
#[derive(Clone, Debug)]
pub struct DetectionFrame {
    pub hands: Vec<RawDetection>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Instant,
}

/// What the core decided for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    pub instant: InstantGesture,
    pub smoothed: Option<InstantGesture>,
    pub action: Option<ActionEvent>,
}

impl FrameOutcome {
    pub fn display_text(&self) -> Option<String> {
        self.smoothed
            .and_then(|gesture| gesture.label())
            .map(|label| format!("Detected: {label}"))
    }
}
