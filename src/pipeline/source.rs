use std::{
    io::BufRead,
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossbeam_channel::Sender;

use crate::{
    config::Config,
    types::{DetectionFrame, RawDetectionFrame},
};

/// Parses one line of detector output. `origin` anchors `timestamp_ms`;
/// frames without one are stamped on arrival.
pub(crate) fn decode_line(
    line: &str,
    config: &Config,
    origin: Instant,
) -> Result<Option<DetectionFrame>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let raw: RawDetectionFrame =
        serde_json::from_str(line).context("malformed detection frame")?;
    let timestamp = match raw.timestamp_ms {
        Some(ms) => origin + Duration::from_millis(ms),
        None => Instant::now(),
    };

    Ok(Some(DetectionFrame {
        hands: raw.hands,
        width: raw.width.unwrap_or(config.frame_width),
        height: raw.height.unwrap_or(config.frame_height),
        timestamp,
    }))
}

/// Reads JSON-lines detections on a dedicated thread. Sends block, so every
/// frame reaches the controller in the order it was read.
pub fn start_detection_reader<R>(
    reader: R,
    config: Config,
    frame_tx: Sender<DetectionFrame>,
) -> thread::JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        let origin = Instant::now();

        for (number, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::error!("failed to read detections: {err:?}");
                    break;
                }
            };

            match decode_line(&line, &config, origin) {
                Ok(Some(frame)) => {
                    if frame_tx.send(frame).is_err() {
                        log::debug!("controller stopped, closing detection reader");
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    log::warn!("skipping line {}: {err:#}", number + 1);
                }
            }
        }
    })
}
