use std::{sync::Arc, time::Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gfx::{render_engine::RenderEngine, scene::Scene};

/// The interactive viewer: one window, the demo scene and a fly camera.
///
/// Click to capture the mouse and look around, WASD or the arrow keys to
/// move, Escape to release the cursor and Escape again to quit.
pub struct ViewerApp {
    config: ViewerConfig,
    scene: Scene,
}

struct AppState {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    last_frame: Instant,
    error: Option<ViewerError>,
}

impl ViewerApp {
    /// Validates `config` and builds the demo scene.
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;
        let scene =
            Scene::with_default_objects(&config, config.window.width, config.window.height);
        Ok(Self { config, scene })
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Runs the event loop until the window closes.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState {
            config: self.config,
            window: None,
            render_engine: None,
            scene: self.scene,
            last_frame: Instant::now(),
            error: None,
        };
        event_loop.run_app(&mut state)?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_config = &self.config.window;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(window_config.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        window_config.width,
                        window_config.height,
                    )),
            )?,
        );

        let PhysicalSize { width, height } = window.inner_size();
        let clear_color = self.config.clear_color;
        let window_clone = window.clone();
        let render_engine = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, clear_color).await
        })?;

        render_engine.prepare_scene(&mut self.scene);
        self.scene.camera_manager.resize(width, height);

        self.window = Some(window);
        self.render_engine = Some(render_engine);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn grab_cursor(&mut self, grab: bool) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let result = if grab {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };

        match result {
            Ok(()) => {
                window.set_cursor_visible(!grab);
                self.scene.camera_manager.controller.set_cursor_grabbed(grab);
            }
            Err(err) => log::warn!("cursor grab unavailable: {err}"),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let is_escape = event.physical_key == PhysicalKey::Code(KeyCode::Escape);
        if is_escape && event.state == ElementState::Pressed {
            if self.scene.camera_manager.controller.is_cursor_grabbed() {
                self.grab_cursor(false);
            } else {
                event_loop.exit();
            }
            return;
        }

        self.scene.camera_manager.controller.process_keyboard(event);
    }

    fn redraw(&mut self) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.scene.update(delta_time);
        render_engine.update(&mut self.scene);

        match render_engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => log::warn!("surface timeout, skipping frame"),
            Err(err) => log::error!("failed to render frame: {err}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("{err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.render_engine.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.scene
                    .camera_manager
                    .controller
                    .process_mouse_button(button, state);
                if state == ElementState::Pressed
                    && !self.scene.camera_manager.controller.is_cursor_grabbed()
                {
                    self.grab_cursor(true);
                }
            }
            WindowEvent::Focused(false) => {
                self.scene.camera_manager.controller.reset();
                if self.scene.camera_manager.controller.is_cursor_grabbed() {
                    self.grab_cursor(false);
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera_manager.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.scene
            .camera_manager
            .controller
            .process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("viewer closed after {:.1}s", self.scene.time());
    }
}
