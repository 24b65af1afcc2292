mod keys;
mod source;

pub use keys::{KeySink, StdoutKeySink};
pub use source::start_detection_reader;

use std::time::Instant;

use crossbeam_channel::Receiver;

use crate::{
    config::{Config, KeyBindings},
    dispatcher::ActionDispatcher,
    gesture::GestureClassifier,
    landmarks::{LandmarkLayout, adapt_frame},
    smoother::GestureSmoother,
    types::{DetectionFrame, FrameObservations, FrameOutcome},
};

/// Per-player state: one smoothing window and one cooldown timer.
/// Frames must be fed in arrival order.
pub struct GestureController {
    classifier: GestureClassifier,
    smoother: GestureSmoother,
    dispatcher: ActionDispatcher,
}

impl GestureController {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: GestureClassifier::with_layout(LandmarkLayout::default()),
            smoother: GestureSmoother::new(config.history_len),
            dispatcher: ActionDispatcher::new(config.cooldown()),
        }
    }

    pub fn process_frame(&mut self, frame: &FrameObservations, now: Instant) -> FrameOutcome {
        let instant = self.classifier.classify(frame);
        let smoothed = self.smoother.update(instant);
        let action = self.dispatcher.dispatch(smoothed, now);

        FrameOutcome {
            instant,
            smoothed,
            action,
        }
    }

    pub fn process_detections(&mut self, frame: &DetectionFrame) -> FrameOutcome {
        let observations = adapt_frame(&frame.hands, frame.width, frame.height);
        self.process_frame(&observations, frame.timestamp)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub actions: usize,
}

/// Drives the controller until the frame channel closes. Key sink failures are
/// logged and the run continues.
pub fn run_controller_loop<S: KeySink>(
    mut controller: GestureController,
    frame_rx: Receiver<DetectionFrame>,
    keys: &KeyBindings,
    sink: &mut S,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for frame in frame_rx.iter() {
        let outcome = controller.process_detections(&frame);
        summary.frames += 1;

        log::debug!(
            "frame {}: instant {:?}, smoothed {:?}",
            summary.frames,
            outcome.instant,
            outcome.smoothed
        );

        if let Some(action) = outcome.action {
            summary.actions += 1;
            let key = keys.key_for(action);
            log::info!(
                "{} ({})",
                action.display_name(),
                outcome.display_text().unwrap_or_default()
            );
            if let Err(err) = sink.press_and_release(key) {
                log::warn!("failed to send key {key:?}: {err:?}");
            }
        }
    }

    summary
}
