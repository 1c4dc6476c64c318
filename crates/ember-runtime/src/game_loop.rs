//! Single-threaded fixed-period loop
//!
//! The simpler scheduler variant: update and draw run sequentially on the
//! same worker thread, paced by [`FrameTimer`]. Used for handlers that do
//! not hand frames off to a platform render callback.

use crate::clock::FrameTimer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

/// A handler stepped by [`GameLoop`]: update then draw, once per period.
pub trait StepHandler: Send {
    fn update(&mut self, dt: f32);
    fn draw(&mut self);
}

/// Runs a [`StepHandler`] at a fixed target rate on a dedicated thread.
///
/// `pause` stops the worker cooperatively and blocks until it has fully
/// exited; `resume` starts a fresh worker. Both are idempotent.
pub struct GameLoop<H: StepHandler + 'static> {
    handler: Arc<Mutex<H>>,
    running: Arc<AtomicBool>,
    target_fps: u32,
    worker: Option<JoinHandle<()>>,
}

impl<H: StepHandler + 'static> GameLoop<H> {
    pub fn new(target_fps: u32, handler: H) -> Self {
        Self {
            handler: Arc::new(Mutex::new(handler)),
            running: Arc::new(AtomicBool::new(false)),
            target_fps,
            worker: None,
        }
    }

    /// Shared access to the handler (the worker locks it once per step)
    pub fn handler(&self) -> Arc<Mutex<H>> {
        self.handler.clone()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Start the update/draw thread. No-op if already running.
    pub fn resume(&mut self) {
        if self.worker.is_some() {
            return;
        }
        self.running.store(true, Ordering::SeqCst);

        let handler = self.handler.clone();
        let running = self.running.clone();
        let target_fps = self.target_fps;

        let worker = std::thread::Builder::new()
            .name("ember-game-loop".into())
            .spawn(move || {
                let mut timer = FrameTimer::new(target_fps);
                while running.load(Ordering::SeqCst) {
                    let dt = timer.begin_step();
                    {
                        let mut handler =
                            handler.lock().unwrap_or_else(PoisonError::into_inner);
                        handler.update(dt);
                        handler.draw();
                    }
                    timer.sleep_remainder();
                }
            });

        match worker {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                log::error!("failed to spawn game loop thread: {err}");
            }
        }
    }

    /// Stop the loop, returning only once the worker thread has exited.
    /// No further `update` calls occur until `resume` is called again.
    pub fn pause(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("game loop worker panicked");
            }
        }
    }
}

impl<H: StepHandler + 'static> Drop for GameLoop<H> {
    fn drop(&mut self) {
        self.pause();
    }
}
