//! A crop session: the controller plus off-thread decode and encode.
//!
//! Decoding and encoding run on a single worker thread. Each request carries
//! a generation number; results are applied on the caller's thread from
//! [`CropSession::poll`] and dropped when a newer request of the same kind
//! was made in the meantime, or when the session was closed.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::CropConfig;
use crate::crop::aspect::AspectMode;
use crate::crop::controller::{CropController, TouchEvent};
use crate::crop::extract::extract;
use crate::error::{MediaPickError, Result};
use crate::io::image_io::{load_and_downscale, save_cropped};
use crate::media::MediaResult;

/// Outcome of a background request, as seen by the session's owner.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    ImageLoaded { width: u32, height: u32 },
    Saved(MediaResult),
    Failed(String),
}

enum WorkerCommand {
    Load {
        generation: u64,
        path: PathBuf,
        max_dimension: u32,
    },
    Save {
        generation: u64,
        image: DynamicImage,
        destination: PathBuf,
    },
}

enum WorkerResult {
    Loaded {
        generation: u64,
        result: std::result::Result<DynamicImage, String>,
    },
    Saved {
        generation: u64,
        result: std::result::Result<MediaResult, String>,
    },
}

fn spawn_worker(result_tx: mpsc::Sender<WorkerResult>) -> Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("mediapick-worker".into())
        .spawn(move || worker_loop(cmd_rx, result_tx))?;

    Ok(cmd_tx)
}

fn worker_loop(cmd_rx: mpsc::Receiver<WorkerCommand>, tx: mpsc::Sender<WorkerResult>) {
    while let Ok(cmd) = cmd_rx.recv() {
        let result = match cmd {
            WorkerCommand::Load {
                generation,
                path,
                max_dimension,
            } => WorkerResult::Loaded {
                generation,
                result: load_and_downscale(&path, max_dimension).map_err(|e| e.to_string()),
            },
            WorkerCommand::Save {
                generation,
                image,
                destination,
            } => WorkerResult::Saved {
                generation,
                result: save_cropped(&image, &destination)
                    .map(|()| MediaResult::image(destination, image.width(), image.height()))
                    .map_err(|e| e.to_string()),
            },
        };
        // the session may already be gone
        if tx.send(result).is_err() {
            break;
        }
    }
}

pub struct CropSession {
    controller: CropController,
    image: Option<DynamicImage>,
    cmd_tx: mpsc::Sender<WorkerCommand>,
    result_rx: mpsc::Receiver<WorkerResult>,
    next_generation: u64,
    load_generation: u64,
    save_generation: u64,
    in_flight: usize,
    closed: bool,
}

impl CropSession {
    pub fn new(config: CropConfig, view_width: f32, view_height: f32) -> Result<Self> {
        config.validate()?;
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = spawn_worker(result_tx)?;
        Ok(Self {
            controller: CropController::new(config, view_width, view_height),
            image: None,
            cmd_tx,
            result_rx,
            next_generation: 0,
            load_generation: 0,
            save_generation: 0,
            in_flight: 0,
            closed: false,
        })
    }

    pub fn controller(&self) -> &CropController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CropController {
        &mut self.controller
    }

    /// Pixels of the image currently being edited.
    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// True when no background request is outstanding.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    fn send(&mut self, cmd: WorkerCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| MediaPickError::SessionClosed)?;
        self.in_flight += 1;
        Ok(())
    }

    /// Start decoding `path`. Supersedes any load still in flight.
    pub fn request_load(&mut self, path: &Path) -> Result<()> {
        if self.closed {
            return Err(MediaPickError::SessionClosed);
        }
        let generation = self.bump_generation();
        self.load_generation = generation;
        debug!(generation, path = %path.display(), "Load requested");
        let max_dimension = self.controller.config().max_decode_dimension;
        self.send(WorkerCommand::Load {
            generation,
            path: path.to_path_buf(),
            max_dimension,
        })
    }

    /// Extract the current crop and start encoding it to `destination`.
    pub fn request_save(&mut self, destination: &Path) -> Result<()> {
        if self.closed {
            return Err(MediaPickError::SessionClosed);
        }
        let source = self.image.as_ref().ok_or(MediaPickError::NoImageLoaded)?;
        let cropped = extract(&self.controller, source)?;
        let generation = self.bump_generation();
        self.save_generation = generation;
        debug!(generation, destination = %destination.display(), "Save requested");
        self.send(WorkerCommand::Save {
            generation,
            image: cropped,
            destination: destination.to_path_buf(),
        })
    }

    pub fn select_aspect(&mut self, mode: AspectMode) {
        if !self.closed {
            self.controller.set_aspect_mode(mode);
        }
    }

    pub fn handle_touch(&mut self, event: TouchEvent) {
        if !self.closed {
            self.controller.handle(event);
        }
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.controller.advance(dt)
    }

    /// Stop accepting requests. Results still in flight are discarded.
    pub fn close(&mut self) {
        if !self.closed {
            info!(in_flight = self.in_flight, "Session closed");
        }
        self.closed = true;
    }

    /// Apply every result the worker has delivered so far.
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(result) = self.result_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            events.extend(self.apply(result));
        }
        events
    }

    /// Block until no request is in flight or `timeout` passes, applying
    /// results as they arrive.
    pub fn wait_idle(&mut self, timeout: Duration) -> Vec<SessionEvent> {
        let deadline = Instant::now() + timeout;
        let mut events = self.poll();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(in_flight = self.in_flight, "Timed out waiting for worker");
                break;
            }
            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => {
                    self.in_flight -= 1;
                    events.extend(self.apply(result));
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    warn!(in_flight = self.in_flight, "Timed out waiting for worker");
                    break;
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.in_flight = 0;
                    break;
                }
            }
        }
        events
    }

    fn apply(&mut self, result: WorkerResult) -> Option<SessionEvent> {
        match result {
            WorkerResult::Loaded { generation, result } => {
                if self.closed || generation != self.load_generation {
                    debug!(generation, current = self.load_generation, "Dropping stale load");
                    return None;
                }
                match result {
                    Ok(image) => {
                        let (width, height) = (image.width(), image.height());
                        if let Err(e) = self.controller.load_image(width, height) {
                            return Some(SessionEvent::Failed(e.to_string()));
                        }
                        self.image = Some(image);
                        Some(SessionEvent::ImageLoaded { width, height })
                    }
                    Err(message) => {
                        warn!(%message, "Load failed");
                        Some(SessionEvent::Failed(message))
                    }
                }
            }
            WorkerResult::Saved { generation, result } => {
                if self.closed || generation != self.save_generation {
                    debug!(generation, current = self.save_generation, "Dropping stale save");
                    return None;
                }
                match result {
                    Ok(media) => Some(SessionEvent::Saved(media)),
                    Err(message) => {
                        warn!(%message, "Save failed");
                        Some(SessionEvent::Failed(message))
                    }
                }
            }
        }
    }
}
