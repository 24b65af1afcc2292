use thiserror::Error;

use crate::types::{FrameObservations, HandObservation, Handedness, Point2D, RawDetection};

pub const LANDMARK_COUNT: usize = 21;

pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// Where the joints used for finger extension live in a detector's output.
/// A detector with a different point ordering only needs a new table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandmarkLayout {
    pub thumb_tip: usize,
    pub thumb_ip: usize,
    /// `(tip, pip)` for index, middle, ring and pinky, in that order.
    pub fingers: [(usize, usize); 4],
}

pub const HANDPOSE_21: LandmarkLayout = LandmarkLayout {
    thumb_tip: THUMB_TIP,
    thumb_ip: THUMB_IP,
    fingers: [
        (INDEX_TIP, INDEX_PIP),
        (MIDDLE_TIP, MIDDLE_PIP),
        (RING_TIP, RING_PIP),
        (PINKY_TIP, PINKY_PIP),
    ],
};

impl Default for LandmarkLayout {
    fn default() -> Self {
        HANDPOSE_21
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ObservationError {
    #[error("expected {expected} landmarks, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },
    #[error("unknown handedness label {0:?}")]
    UnknownHandedness(String),
    #[error("landmark {index} is not finite")]
    NonFiniteLandmark { index: usize },
}

pub fn parse_handedness(label: &str) -> Result<Handedness, ObservationError> {
    let trimmed = label.trim();
    if trimmed.eq_ignore_ascii_case("left") {
        Ok(Handedness::Left)
    } else if trimmed.eq_ignore_ascii_case("right") {
        Ok(Handedness::Right)
    } else {
        Err(ObservationError::UnknownHandedness(label.to_string()))
    }
}

/// Validates one detection and scales its normalized coordinates into pixel space.
pub fn adapt_hand(
    detection: &RawDetection,
    width: u32,
    height: u32,
) -> Result<HandObservation, ObservationError> {
    let handedness = parse_handedness(&detection.handedness)?;
    if detection.landmarks.len() != LANDMARK_COUNT {
        return Err(ObservationError::LandmarkCount {
            expected: LANDMARK_COUNT,
            actual: detection.landmarks.len(),
        });
    }

    let (w, h) = (width as f32, height as f32);
    let mut landmarks = [Point2D::default(); LANDMARK_COUNT];
    for (index, (slot, [x, y])) in landmarks.iter_mut().zip(&detection.landmarks).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(ObservationError::NonFiniteLandmark { index });
        }
        *slot = Point2D::new(x * w, y * h);
    }

    Ok(HandObservation {
        handedness,
        landmarks,
    })
}

/// Builds the per-side view of a frame. Invalid detections are dropped so that
/// side counts as absent; a later detection for the same side replaces an earlier one.
pub fn adapt_frame(detections: &[RawDetection], width: u32, height: u32) -> FrameObservations {
    let mut frame = FrameObservations::default();

    for (slot, detection) in detections.iter().enumerate() {
        match adapt_hand(detection, width, height) {
            Ok(hand) => {
                let side = match hand.handedness {
                    Handedness::Left => &mut frame.left,
                    Handedness::Right => &mut frame.right,
                };
                if side.is_some() {
                    log::debug!(
                        "duplicate {} hand in detection {slot}, keeping the later one",
                        hand.handedness.label()
                    );
                }
                *side = Some(hand);
            }
            Err(err) => {
                log::warn!("dropping detection {slot}: {err}");
            }
        }
    }

    frame
}

#[cfg(test)]
pub(crate) fn normalized_hand(label: &str, y_offset: f32) -> RawDetection {
    RawDetection {
        handedness: label.to_string(),
        landmarks: (0..LANDMARK_COUNT)
            .map(|i| [i as f32 / 40.0, y_offset + i as f32 / 100.0])
            .collect(),
    }
}
