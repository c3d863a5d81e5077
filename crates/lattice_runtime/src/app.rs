//! Viewer application
//!
//! Owns the time store, scene, camera and renderer and drives them from the
//! winit event loop. One frame: tick the clock, step the driver, update the
//! scene and camera, then render.

use crate::input::{key_action, Pointer, PointerEffect};
use anyhow::{Context, Result};
use lattice_asset::{survey_counts, GalaxyLoader, Survey};
use lattice_core::driver::FrameDriver;
use lattice_core::scene::Scene;
use lattice_core::time::{FrameClock, TimeStore};
use lattice_metrics::{FrameTimer, PhaseProfiler};
use lattice_render::window::window_attributes;
use lattice_render::{wgpu, OrbitCamera, RenderError, SceneRenderer, WindowConfig};
use lattice_services::hud::{window_title, HudLayout};
use lattice_services::{ControlAction, Scrubber, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

const METRICS_INTERVAL: Duration = Duration::from_secs(1);

pub struct App {
    window_config: WindowConfig,
    time: TimeStore,
    driver: FrameDriver,
    clock: FrameClock,
    scrubber: Scrubber,
    scene: Scene,
    camera: OrbitCamera,
    loader: GalaxyLoader,

    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    hud: HudLayout,
    pointer: Pointer,
    modifiers: ModifiersState,
    title: String,

    frame_timer: FrameTimer,
    phases: PhaseProfiler,
    /// Fatal setup error, surfaced after the event loop returns.
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => {
                tracing::info!(seed, "Seeded decorative generation");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let scene = Scene::new(&settings.scene_spec(), &mut rng);
        tracing::info!(
            constellations = scene.constellations.len(),
            stars = scene.starfield.len(),
            "Scene generated"
        );

        let loader = GalaxyLoader::spawn(settings.dataset.path.clone());
        let window_config = WindowConfig::from(&settings.window);

        Self {
            hud: HudLayout::new(window_config.height, 1.0),
            window_config,
            time: TimeStore::with_playing(settings.playback.start_playing),
            driver: FrameDriver::new(settings.playback.days_per_second),
            clock: FrameClock::new(),
            scrubber: Scrubber::default(),
            scene,
            camera: OrbitCamera::from_settings(&settings.camera),
            loader,
            window: None,
            renderer: None,
            pointer: Pointer::default(),
            modifiers: ModifiersState::empty(),
            title: String::new(),
            frame_timer: FrameTimer::new(120),
            phases: PhaseProfiler::new(),
            error: None,
        }
    }

    /// Result of the run: the setup error if one stopped the loop.
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => {
                tracing::info!(frames = self.clock.frame_count(), "Viewer closed");
                Ok(())
            }
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop
                .create_window(window_attributes(&self.window_config))
                .context("failed to create window")?,
        );
        let renderer = pollster::block_on(SceneRenderer::new(window.clone(), &self.scene))
            .context("failed to initialise renderer")?;

        let size = window.inner_size();
        self.camera.set_viewport(size.width, size.height);
        self.hud = HudLayout::new(size.height, window.scale_factor() as f32);

        self.window = Some(window);
        self.renderer = Some(renderer);
        if self.scene.galaxies.is_ready() {
            self.upload_galaxies();
        }
        Ok(())
    }

    fn apply(&mut self, action: ControlAction) {
        action.apply(&self.scrubber, &mut self.time);
    }

    fn upload_galaxies(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.upload_galaxies(&self.scene.galaxies);
        }
    }

    fn poll_dataset(&mut self) {
        let Some(points) = self.loader.poll() else {
            return;
        };
        let counts = survey_counts(&points);
        for survey in Survey::LEGEND {
            tracing::info!(survey = %survey, galaxies = counts.get(survey), "Survey loaded");
        }
        if counts.other > 0 {
            tracing::info!(galaxies = counts.other, "Galaxies outside the survey legend");
        }
        self.scene.galaxies.populate(&points);
        self.upload_galaxies();
    }

    fn refresh_title(&mut self, day: f32) {
        let title = window_title(day);
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();

        let (driver, time, scene, camera) =
            (&self.driver, &mut self.time, &mut self.scene, &mut self.camera);
        let signals = self.phases.time_phase("update", || {
            let signals = driver.step(time, frame);
            scene.update(&signals);
            camera.update();
            signals
        });

        self.poll_dataset();
        self.refresh_title(signals.day);

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let shapes = self
            .hud
            .shapes(self.scrubber.fraction_of(signals.day), self.time.is_playing());
        let (scene, camera) = (&self.scene, &self.camera);
        let result = self
            .phases
            .time_phase("render", || renderer.render(scene, camera, &shapes));

        match result {
            Ok(()) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::debug!("Surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(err) => tracing::warn!("Frame skipped: {err}"),
        }

        self.frame_timer.frame();
        if self.frame_timer.report_due(METRICS_INTERVAL) {
            let (min_ms, max_ms) = self.frame_timer.frame_time_range_ms();
            tracing::debug!(
                fps = self.frame_timer.fps(),
                frame_ms = self.frame_timer.frame_time_ms(),
                min_ms,
                max_ms,
                update_ms = self.phases.average_ms("update"),
                render_ms = self.phases.average_ms("render"),
                day = signals.day,
                "Frame stats"
            );
            self.phases.reset();
        }
    }

    fn viewport_height(&self) -> f32 {
        self.renderer
            .as_ref()
            .map_or(self.window_config.height, |r| r.size().1) as f32
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            tracing::error!("{err:#}");
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
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                self.camera.set_viewport(size.width, size.height);
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.hud = HudLayout::new(size.height, scale as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let (_, height) = self.renderer.as_ref().map_or((0, 0), |r| r.size());
                self.hud = HudLayout::new(height, scale_factor as f32);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Some(action) =
                    key_action(&event.logical_key, self.modifiers.shift_key(), &self.scrubber)
                {
                    self.apply(action);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let effect = self
                    .pointer
                    .moved(position.x as f32, position.y as f32, &self.hud);
                let height = self.viewport_height();
                match effect {
                    Some(PointerEffect::Rotate { dx, dy }) => self.camera.rotate(dx, dy, height),
                    Some(PointerEffect::Pan { dx, dy }) => self.camera.pan(dx, dy, height),
                    Some(PointerEffect::Control(action)) => self.apply(action),
                    None => {}
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    if let Some(action) = self.pointer.pressed(button, &self.hud) {
                        self.apply(action);
                    }
                }
                ElementState::Released => self.pointer.released(button),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(lines) = self.pointer.wheel(delta, &self.hud) {
                    self.camera.zoom(lines);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
