use anyhow::{Context, Result, anyhow};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::GpuInit;
use crate::input::platform::translate_window_event;
use crate::input::{InputEvent, InputState, Key};
use crate::present::{FramePresenter, FrameStatus, WgpuBackend};
use crate::scene::{Scene, SceneCtx};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, presents `S` into it every frame and returns once the
/// window is closed, Escape is pressed, or a frame fails fatally. A fatal
/// error is returned after every GPU object has been released.
pub struct Runtime;

impl Runtime {
    pub fn run<S, F>(config: RuntimeConfig, gpu_init: GpuInit, build_scene: F) -> Result<()>
    where
        S: Scene + 'static,
        F: FnOnce(&SceneCtx<'_>) -> Result<S>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, build_scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        // Anything still alive is torn down before the error surfaces.
        state.entry = None;

        match state.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry<S: Scene + 'static> {
    input_state: InputState,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[not_covariant]
    presenter: FramePresenter<WgpuBackend<'this, S>>,
}

struct AppState<S, F>
where
    S: Scene + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    build_scene: Option<F>,

    entry: Option<WindowEntry<S>>,
    fatal: Option<anyhow::Error>,
}

impl<S, F> AppState<S, F>
where
    S: Scene + 'static,
    F: FnOnce(&SceneCtx<'_>) -> Result<S>,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, build_scene: F) -> Self {
        Self {
            config,
            gpu_init,
            build_scene: Some(build_scene),
            entry: None,
            fatal: None,
        }
    }

    /// Records `err`, releases the window and its GPU state, and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal.get_or_insert(err);
        self.entry = None;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry<S>> {
        let build_scene = self
            .build_scene
            .take()
            .ok_or_else(|| anyhow!("scene was already built"))?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = &self.gpu_init;

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            clock: FrameClock::default(),
            window,
            presenter_builder: |w| {
                let backend = WgpuBackend::new(w, gpu_init, build_scene)?;
                if let Some(gpu) = backend.gpu() {
                    let info = gpu.adapter_info();
                    log::info!(
                        "using adapter {:?} ({:?}, {:?})",
                        info.name,
                        info.backend,
                        info.device_type
                    );
                }
                let config = backend.initial_config()?;
                FramePresenter::new(backend, config)
            },
        }
        .try_build()
    }

    fn resize(&mut self, event_loop: &ActiveEventLoop, size: PhysicalSize<u32>) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let result = entry.with_presenter_mut(|p| p.reconfigure(size.width, size.height));
        match result {
            Ok(()) => entry.with_window(|w| w.request_redraw()),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, ev: InputEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if ev.is_press_of(Key::Escape) {
            log::info!("escape pressed; exiting");
            event_loop.exit();
            return;
        }

        entry.with_mut(|fields| {
            fields.input_state.apply_event(&ev);

            if ev.is_press_of(Key::R) {
                if let Some(gpu) = fields.presenter.backend().gpu() {
                    gpu.log_resource_report();
                }
            }
        });
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let result = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let config = *fields.presenter.config();
            fields
                .presenter
                .backend_mut()
                .update(config, time, fields.input_state);

            fields.presenter.tick()
        });

        match result {
            Ok(FrameStatus::Suspended) => {
                // Do not accumulate a huge delta while minimized.
                entry.with_clock_mut(|c| c.reset());
            }
            Ok(status) => log::trace!("frame {status:?}"),
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl<S, F> ApplicationHandler for AppState<S, F>
where
    S: Scene + 'static,
    F: FnOnce(&SceneCtx<'_>) -> Result<S>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.fatal.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => self.fail(event_loop, err.context("failed to initialize window")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw, paused while minimized. The next Resized
        // event requests a redraw itself.
        if let Some(entry) = self.entry.as_ref() {
            if !entry.with_presenter(|p| p.is_suspended()) {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(ev) = translate_window_event(&event) {
            self.handle_input(event_loop, ev);
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(event_loop, *new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.entry.as_ref().map(|e| e.with_window(|w| w.inner_size()));
                if let Some(size) = size {
                    self.resize(event_loop, size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Presenter shutdown runs in drop, while the window is still alive.
        self.entry = None;
    }
}
