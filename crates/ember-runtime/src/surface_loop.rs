//! Worker-updated, callback-drawn loop with a draw rendezvous
//!
//! The update thread owns simulation state mutation; the platform invokes
//! the render callback on its own thread. Between the two sits a guarded
//! frame-ready/frame-consumed handshake: after each update the worker
//! publishes the frame, asks the platform to schedule a draw, and blocks
//! until the draw has consumed the world state. The next update can then
//! proceed without the draw side ever observing a half-stepped world.

use crate::clock::FrameTimer;
use crate::input::PointerState;
use crate::surface::RenderTarget;
use crate::system::Simulation;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;

/// Frame handshake state guarded by [`DrawGate`]
struct FrameState {
    /// True from frame publication until the render callback consumes it
    frame_ready: bool,
    /// dt of the published frame, forwarded to the draw call
    frame_dt: f32,
}

/// Condition-variable rendezvous between the update thread and the render
/// callback.
struct DrawGate {
    state: Mutex<FrameState>,
    consumed: Condvar,
}

impl DrawGate {
    fn new() -> Self {
        Self {
            state: Mutex::new(FrameState {
                frame_ready: false,
                frame_dt: 0.0,
            }),
            consumed: Condvar::new(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FrameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a freshly updated frame
    fn publish(&self, dt: f32) {
        let mut state = self.lock();
        state.frame_ready = true;
        state.frame_dt = dt;
    }

    /// Block until the published frame is consumed, or until `running` is
    /// cleared (a paused loop must not wait on a draw that will never come).
    fn wait_consumed(&self, running: &AtomicBool) {
        let mut state = self.lock();
        while state.frame_ready && running.load(Ordering::SeqCst) {
            state = self
                .consumed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn frame_dt(&self) -> f32 {
        self.lock().frame_dt
    }

    /// Mark the frame consumed and wake the update thread
    fn complete(&self) {
        let mut state = self.lock();
        state.frame_ready = false;
        drop(state);
        self.consumed.notify_all();
    }
}

/// Handle given to the platform's render callback.
///
/// Cheap to clone; draws the current world state and completes the
/// rendezvous so the update thread can begin the next step.
pub struct RenderHandle<W: Simulation> {
    world: Arc<Mutex<W>>,
    gate: Arc<DrawGate>,
}

impl<W: Simulation> Clone for RenderHandle<W> {
    fn clone(&self) -> Self {
        Self {
            world: self.world.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<W: Simulation> RenderHandle<W> {
    /// Draw the world, then signal frame consumption.
    ///
    /// Safe to call even when no frame is pending (platforms redraw for
    /// their own reasons); the latest stable state is drawn either way.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        let dt = self.gate.frame_dt();
        {
            let mut world = self.world.lock().unwrap_or_else(PoisonError::into_inner);
            world.draw(target, dt);
        }
        self.gate.complete();
    }
}

/// Fixed-rate scheduler with a dedicated update thread and a
/// platform-driven draw callback, synchronized by a draw rendezvous.
pub struct SurfaceLoop<W: Simulation + 'static> {
    world: Arc<Mutex<W>>,
    pointer: Arc<PointerState>,
    gate: Arc<DrawGate>,
    running: Arc<AtomicBool>,
    redraw: Arc<dyn Fn() + Send + Sync>,
    target_fps: u32,
    worker: Option<JoinHandle<()>>,
}

impl<W: Simulation + 'static> SurfaceLoop<W> {
    /// `redraw` is invoked once per update to ask the platform to schedule
    /// a call into [`RenderHandle::render`].
    pub fn new(
        target_fps: u32,
        world: W,
        pointer: Arc<PointerState>,
        redraw: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
            pointer,
            gate: Arc::new(DrawGate::new()),
            running: Arc::new(AtomicBool::new(false)),
            redraw: Arc::new(redraw),
            target_fps,
            worker: None,
        }
    }

    /// Shared access to the world (the worker locks it once per step)
    pub fn world(&self) -> Arc<Mutex<W>> {
        self.world.clone()
    }

    /// Handle for the platform's render callback
    pub fn render_handle(&self) -> RenderHandle<W> {
        RenderHandle {
            world: self.world.clone(),
            gate: self.gate.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Start the update thread. No-op if already running.
    pub fn resume(&mut self) {
        if self.worker.is_some() {
            return;
        }
        self.running.store(true, Ordering::SeqCst);
        // Clear any rendezvous left over from before the last pause
        self.gate.complete();

        let world = self.world.clone();
        let pointer = self.pointer.clone();
        let gate = self.gate.clone();
        let running = self.running.clone();
        let redraw = self.redraw.clone();
        let target_fps = self.target_fps;

        let worker = std::thread::Builder::new()
            .name("ember-surface-loop".into())
            .spawn(move || {
                let mut timer = FrameTimer::new(target_fps);
                while running.load(Ordering::SeqCst) {
                    let dt = timer.begin_step();
                    {
                        let mut world = world.lock().unwrap_or_else(PoisonError::into_inner);
                        world.update(dt, pointer.latest());
                    }

                    gate.publish(dt);
                    (redraw)();
                    gate.wait_consumed(&running);

                    timer.sleep_remainder();
                }
            });

        match worker {
            Ok(handle) => self.worker = Some(handle),
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                log::error!("failed to spawn surface loop thread: {err}");
            }
        }
    }

    /// Stop the loop, returning only once the update thread has exited.
    ///
    /// A worker blocked on the draw rendezvous is woken so the join cannot
    /// hang; leaking a live update thread would corrupt later
    /// resume/pause cycles.
    pub fn pause(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.gate.complete();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("surface loop worker panicked");
            }
        }
    }
}

impl<W: Simulation + 'static> Drop for SurfaceLoop<W> {
    fn drop(&mut self) {
        self.pause();
    }
}
