//! Scene: the root group bound to one drawing surface, plus its render loop.
//!
//! Loop contract, per iteration:
//! - wait for the refresh source's next frame
//! - dispatch input collected since the previous frame
//! - tick the frame clock and fire `render` on the root
//! - update and draw the whole tree into the surface, then flip
//!
//! The `animating` flag is checked only between iterations, so a `stop()`
//! issued mid-frame takes effect once the frame completes.

use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;

use log::{debug, trace};

use crate::config::SceneConfig;
use crate::coords::Transform;
use crate::easing::EasingTable;
use crate::error::SceneError;
use crate::event::{Event, EventKind};
use crate::group::GroupRef;
use crate::input::InputEvent;
use crate::listener::Listener;
use crate::shape::{FrameCtx, ShapeOptions, ShapeRef};
use crate::surface::{DrawingSurface, FrameBuffer};
use crate::time::{FrameClock, FrameInfo, RefreshSource};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SceneState {
    #[default]
    Stopped,
    Animating,
}

/// Cheap handle for stopping a scene from inside its own handlers.
#[derive(Debug, Clone)]
pub struct SceneControl {
    root: ShapeRef,
    state: Rc<Cell<SceneState>>,
}

impl SceneControl {
    /// Fires `stop` on the root and marks the scene stopped.
    pub fn stop(&self) -> anyhow::Result<()> {
        stop_scene(&self.root, &self.state)
    }

    pub fn state(&self) -> SceneState {
        self.state.get()
    }

    pub fn is_animating(&self) -> bool {
        self.state.get() == SceneState::Animating
    }
}

fn stop_scene(root: &ShapeRef, state: &Cell<SceneState>) -> anyhow::Result<()> {
    root.trigger(EventKind::Stop, &mut Event::new(EventKind::Stop))?;
    state.set(SceneState::Stopped);
    debug!("scene stopped");
    Ok(())
}

/// Root of a scene graph.
///
/// Derefs to its root [`GroupRef`], so shapes are added and handlers
/// registered directly on the scene.
pub struct Scene<S: DrawingSurface = FrameBuffer> {
    root: GroupRef,
    surface: Option<S>,
    listener: Listener,
    clock: FrameClock,
    easings: EasingTable,
    state: Rc<Cell<SceneState>>,
}

impl Scene<FrameBuffer> {
    /// Scene over a double-buffered surface of the configured size.
    pub fn with_config(config: &SceneConfig) -> Result<Self, SceneError> {
        let mut scene = Self::new(FrameBuffer::new(config.width, config.height)?)?;
        scene.listener.set_capture(config.capture_events);
        Ok(scene)
    }
}

impl<S: DrawingSurface> Scene<S> {
    /// Binds a new, stopped scene to `surface`.
    ///
    /// Fails if the surface has no usable area.
    pub fn new(surface: S) -> Result<Self, SceneError> {
        let (w, h) = (surface.width(), surface.height());
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(SceneError::InvalidSurface(format!("surface size {w}x{h}")));
        }
        debug!("scene created on a {w}x{h} surface");
        Ok(Self {
            root: GroupRef::new(ShapeOptions::default()),
            surface: Some(surface),
            listener: Listener::default(),
            clock: FrameClock::new(),
            easings: EasingTable::default(),
            state: Rc::new(Cell::new(SceneState::Stopped)),
        })
    }

    pub fn root(&self) -> &GroupRef {
        &self.root
    }

    pub fn control(&self) -> SceneControl {
        SceneControl { root: self.root.as_shape().clone(), state: Rc::clone(&self.state) }
    }

    pub fn state(&self) -> SceneState {
        self.state.get()
    }

    pub fn is_animating(&self) -> bool {
        self.state.get() == SceneState::Animating
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut Listener {
        &mut self.listener
    }

    pub fn easings(&self) -> &EasingTable {
        &self.easings
    }

    pub fn easings_mut(&mut self) -> &mut EasingTable {
        &mut self.easings
    }

    /// `None` once the scene is destroyed.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Timing of the last processed frame.
    pub fn frame_info(&self) -> Option<FrameInfo> {
        self.clock.info()
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    /// Fires `start` and marks the scene animating. No-op if already running.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.is_animating() {
            return Ok(());
        }
        self.root.trigger(EventKind::Start, &mut Event::new(EventKind::Start))?;
        self.state.set(SceneState::Animating);
        debug!("scene started");
        Ok(())
    }

    /// Fires `stop` and marks the scene stopped.
    pub fn stop(&mut self) -> anyhow::Result<()> {
        stop_scene(self.root.as_shape(), &self.state)
    }

    /// Stops the scene and releases its surface.
    ///
    /// The surface is released even if a `stop` handler fails; that failure
    /// is returned afterwards.
    pub fn destroy(&mut self) -> anyhow::Result<()> {
        let stopped = self.stop();
        self.release_surface();
        stopped
    }

    fn release_surface(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.destroy();
            debug!("scene surface released");
        }
    }

    // ── frames ───────────────────────────────────────────────────────────

    /// Processes one frame at `now` (ms) if the scene is animating.
    ///
    /// Returns whether the scene is still animating afterwards. For hosts that
    /// own their own refresh signal.
    pub fn frame_at(&mut self, now: f64) -> anyhow::Result<bool> {
        if !self.is_animating() {
            return Ok(false);
        }
        self.render_frame(now)?;
        Ok(self.is_animating())
    }

    /// One loop body: tick, fire `render`, draw the tree, flip.
    fn render_frame(&mut self, now: f64) -> anyhow::Result<()> {
        if self.surface.is_none() {
            return Err(SceneError::SurfaceReleased.into());
        }

        let info = self.clock.tick_at(now);
        trace!("frame {} elapsed={}ms fps={}", info.frame, info.elapsed, info.fps);

        let mut event = Event::new(EventKind::Render).with_frame(info);
        self.root.trigger(EventKind::Render, &mut event)?;

        let Some(surface) = self.surface.as_mut() else {
            return Err(SceneError::SurfaceReleased.into());
        };
        let mut ctx = FrameCtx { list: surface.context(), info, easings: &self.easings };
        self.root.render(&mut ctx, &Transform::identity());
        surface.flip();
        Ok(())
    }

    /// Drives the loop from `refresh` until the scene stops.
    ///
    /// Call [`Scene::start`] first. A handler error ends the loop and is
    /// returned; the loop is not resumed.
    pub fn run<R: RefreshSource + ?Sized>(&mut self, refresh: &mut R) -> anyhow::Result<()> {
        while self.is_animating() {
            let now = refresh.next_frame();
            for input in refresh.drain_input() {
                self.handle_input(input)?;
            }
            self.render_frame(now)?;
        }
        Ok(())
    }

    /// Dispatches one input sample through the listener.
    pub fn handle_input(&mut self, input: InputEvent) -> anyhow::Result<Option<Event>> {
        self.listener.dispatch(self.root.as_shape(), input)
    }
}

impl<S: DrawingSurface> Deref for Scene<S> {
    type Target = GroupRef;

    fn deref(&self) -> &GroupRef {
        &self.root
    }
}

impl<S: DrawingSurface> Drop for Scene<S> {
    fn drop(&mut self) {
        self.release_surface();
    }
}
