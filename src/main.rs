mod config;
mod dispatcher;
mod gesture;
mod landmarks;
mod pipeline;
mod smoother;
mod types;

use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use crossbeam_channel::bounded;

use config::Config;
use pipeline::{GestureController, StdoutKeySink};

const FRAME_QUEUE_DEPTH: usize = 8;

struct Args {
    config_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        config_path: None,
        input_path: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("usage: gesture-runner [--config <file.toml>] [<detections.jsonl>]");
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown option {other}"),
            other => {
                if parsed.input_path.replace(PathBuf::from(other)).is_some() {
                    bail!("only one detections file may be given");
                }
            }
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    log::info!(
        "cooldown {:?}, smoothing over {} frames, frame size {}x{}",
        config.cooldown(),
        config.history_len,
        config.frame_width,
        config.frame_height
    );
    for line in gesture::gesture_guide() {
        log::info!("{line}");
    }

    let (frame_tx, frame_rx) = bounded(FRAME_QUEUE_DEPTH);
    let reader = match &args.input_path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open detections {}", path.display()))?;
            pipeline::start_detection_reader(BufReader::new(file), config.clone(), frame_tx)
        }
        None => pipeline::start_detection_reader(
            BufReader::new(io::stdin()),
            config.clone(),
            frame_tx,
        ),
    };

    let controller = GestureController::new(&config);
    let mut sink = StdoutKeySink::new(io::stdout().lock());
    let summary = pipeline::run_controller_loop(controller, frame_rx, &config.keys, &mut sink);

    if reader.join().is_err() {
        log::error!("detection reader panicked");
    }
    log::info!(
        "processed {} frames, emitted {} actions",
        summary.frames,
        summary.actions
    );

    Ok(())
}
