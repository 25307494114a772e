use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, CancelToken, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Stops the loop before the next frame once cancelled.
    pub cancel: CancelToken,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "spritewalk".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            cancel: CancelToken::new(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `app` until the window closes, the app returns
    /// `Exit`, or `config.cancel` is cancelled.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        log::info!("runtime stopped after {} frames", state.frames);
        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    /// `None` when the drawing context could not be acquired. The window stays
    /// open and keeps processing input; frames are skipped.
    #[borrows(window)]
    #[covariant]
    gpu: Option<Gpu<'this>>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
    frames: u64,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            frames: 0,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryBuilder {
            window,
            gpu_builder: |w| match pollster::block_on(Gpu::new(w, gpu_init)) {
                Ok(gpu) => Some(gpu),
                Err(e) => {
                    log::error!("unable to initialize the drawing context: {e:#}");
                    None
                }
            },
        }
        .build();

        let app = &mut self.app;
        entry.with(|fields| {
            let Some(gpu) = fields.gpu.as_ref() else { return };
            let window = WindowCtx {
                window: fields.window,
            };
            app.on_start(&gpu.render_ctx(window.viewport().at_least_one_px()));
        });

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (app, frames) = (&mut self.app, &mut self.frames);
        let Some(entry) = self.window.as_mut() else { return };

        let mut app_control = AppControl::Continue;

        entry.with_mut(|fields| {
            // No drawing context: the frame is skipped, input keeps flowing.
            let Some(gpu) = fields.gpu.as_mut() else { return };

            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu,
            };

            app_control = app.on_frame(&mut ctx);
            *frames += 1;
        });

        if app_control == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.config.cancel.is_cancelled() {
            log::debug!("frame loop cancelled");
            self.request_exit(event_loop);
        }

        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: every frame schedules the next one.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let control = match translate_window_event(&event) {
            Some(ev) => self.app.on_input(&ev),
            None => AppControl::Continue,
        };

        if control == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| {
                    if let Some(gpu) = gpu.as_mut() {
                        gpu.resize(*new_size);
                    }
                });
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| {
                    if let Some(gpu) = gpu.as_mut() {
                        gpu.resize(new_size);
                    }
                });
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                if self.config.cancel.is_cancelled() {
                    self.request_exit(event_loop);
                    return;
                }
                self.redraw(event_loop);
            }

            _ => {}
        }
    }
}
