//! Standalone demo window backed by winit.
//!
//! Owns the window, renderer, camera, and input state, and dispatches
//! window events into camera mutators each frame:
//!
//! - mouse movement looks around, the scroll wheel zooms
//! - `W`/`A`/`S`/`D` move, `E`/`Q` go up/down
//! - `Tab` hot swaps the shaders, holding `Shift` shows the shadow map
//! - `Escape` quits

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Fullscreen, Window, WindowId},
};

use crate::camera::Camera;
use crate::error::GloamError;
use crate::input::{KeyboardState, MouseTracker};
use crate::math::Vec3;
use crate::options::Options;
use crate::renderer::Renderer;
use crate::util::frame_timing::{FpsCounter, FrameClock};

const WINDOW_TITLE: &str = "gloam";
const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 3.0);

/// A standalone window that runs the demo scene.
///
/// Construct with [`Viewer::new`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// A viewer configured by `options`.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`GloamError::Viewer`] for event-loop failures and
    /// propagates renderer initialization errors.
    pub fn run(self) -> Result<(), GloamError> {
        let event_loop =
            EventLoop::new().map_err(|e| GloamError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut camera = Camera::new(CAMERA_START);
        self.options.camera.configure(&mut camera);

        let mut app = ViewerApp {
            options: self.options,
            window: None,
            renderer: None,
            camera,
            keys: KeyboardState::new(),
            mouse: MouseTracker::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            show_debug_quad: false,
            init_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GloamError::Viewer(e.to_string()))?;

        // Initialization failures exit the loop; surface them here.
        app.init_error.map_or(Ok(()), Err)
    }
}

/// Internal winit application handler.
struct ViewerApp {
    options: Options,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    keys: KeyboardState,
    mouse: MouseTracker,
    clock: FrameClock,
    fps: FpsCounter,
    show_debug_quad: bool,
    init_error: Option<GloamError>,
}

impl ViewerApp {
    fn create_window(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<Arc<Window>, GloamError> {
        let mut attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(
                self.options.window.width,
                self.options.window.height,
            ));
        if self.options.window.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| GloamError::Viewer(e.to_string()))?,
        );

        // Mouse-look wants a captured cursor; fall back gracefully where
        // the platform cannot lock it.
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            log::warn!("cursor grab unavailable: {e}");
        }
        window.set_cursor_visible(false);

        Ok(window)
    }

    fn redraw(&mut self) {
        let (Some(window), Some(renderer)) =
            (self.window.as_ref(), self.renderer.as_mut())
        else {
            return;
        };

        let delta_time = self.clock.tick();
        for movement in self.keys.movements() {
            self.camera.update_position(movement, delta_time);
        }

        match renderer.render(&self.camera, self.show_debug_quad) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = window.inner_size();
                renderer.resize(inner.width, inner.height);
                self.camera.aspect = renderer.aspect();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        if let Some(rate) = self.fps.tick() {
            window.set_title(&format!("{WINDOW_TITLE} | {rate} fps"));
        }
        window.request_redraw();
    }

    fn handle_key(
        &mut self,
        event_loop: &ActiveEventLoop,
        code: KeyCode,
        state: ElementState,
    ) {
        match state {
            ElementState::Pressed => {
                let newly_pressed = self.keys.press(code);
                match code {
                    KeyCode::Escape => event_loop.exit(),
                    KeyCode::Tab if newly_pressed => {
                        if let Some(renderer) = self.renderer.as_mut() {
                            renderer.reload_shaders();
                        }
                    }
                    _ => {}
                }
            }
            ElementState::Released => self.keys.release(code),
        }

        self.show_debug_quad = self.keys.is_held(KeyCode::ShiftLeft)
            || self.keys.is_held(KeyCode::ShiftRight);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let renderer = match pollster::block_on(Renderer::new(
            window.clone(),
            (size.width, size.height),
            &self.options,
        )) {
            Ok(renderer) => renderer,
            Err(e) => {
                self.init_error = Some(e);
                event_loop.exit();
                return;
            }
        };

        self.camera.aspect = renderer.aspect();
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                    self.camera.aspect = renderer.aspect();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(event_loop, code, event.state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let delta = self
                    .mouse
                    .offset(position.x as f32, position.y as f32);
                self.camera.update_angles(delta);
            }

            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => {
                    self.camera.update_fovy(y);
                }
                MouseScrollDelta::PixelDelta(pos) => {
                    self.camera.update_fovy(pos.y as f32 * 0.01);
                }
            },

            // Forget the latched cursor position so regaining focus does
            // not whip the camera around.
            WindowEvent::Focused(false) => self.mouse.reset(),

            _ => (),
        }
    }
}
