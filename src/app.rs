use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::animation::Clock;
use crate::color::Color;
use crate::controls::ControlPanel;
use crate::error::InitError;
use crate::gpu::GpuContext;
use crate::graphics::DrawList;
use crate::input::{Input, KEY_BINDINGS};
use crate::overlay::{OverlayPass, Quads};
use crate::render::{self, StatusDisplay};
use crate::shape_pass::ShapePass;
use crate::state::SceneState;

/// Configuration for the app window and the initial scene.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub state: SceneState,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Aviary".to_string(),
            width: 600,
            height: 600,
            clear_color: Color::BLACK,
            state: SceneState::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Starting angles, flags and view.
    pub fn state(mut self, state: SceneState) -> Self {
        self.state = state;
        self
    }
}

/// Shows the status line in the window title, after the base title.
struct TitleStatus {
    window: Arc<Window>,
    base: String,
}

impl StatusDisplay for TitleStatus {
    fn show_status(&mut self, status: &str) {
        self.window.set_title(&format!("{} | {}", self.base, status));
    }
}

/// Run the bird viewer until the window closes.
///
/// # Example
/// ```no_run
/// use aviary::{AnimationFlags, AppConfig, SceneState};
///
/// let state = SceneState::new().with_flags(AnimationFlags::ALL);
/// aviary::run(AppConfig::new().title("Flapping").state(state))?;
/// # Ok::<(), aviary::InitError>(())
/// ```
///
/// # Errors
///
/// Returns the first startup failure: event loop, window, surface, adapter
/// or device. Nothing fails once frames are being drawn.
pub fn run(config: AppConfig) -> Result<(), InitError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = AviaryApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        AviaryApp::Failed(e) => Err(e),
        _ => Ok(()),
    }
}

enum AviaryApp {
    Pending { config: AppConfig },
    Running(Box<Running>),
    Failed(InitError),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    shape_pass: ShapePass,
    overlay_pass: OverlayPass,
    draw_list: DrawList,
    quads: Quads,
    input: Input,
    state: SceneState,
    clock: Clock,
    status: TitleStatus,
    clear_color: Color,
}

impl Running {
    fn new(event_loop: &ActiveEventLoop, config: AppConfig) -> Result<Self, InitError> {
        let window_attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let shape_pass = ShapePass::new(&gpu);
        let overlay_pass = OverlayPass::new(&gpu);

        for (key, _, description) in KEY_BINDINGS {
            log::info!("{key:?}: {description}");
        }
        log::info!("drag with the left mouse button to rotate the bird");

        Ok(Self {
            status: TitleStatus {
                window: window.clone(),
                base: config.title,
            },
            window,
            gpu,
            shape_pass,
            overlay_pass,
            draw_list: DrawList::new(),
            quads: Quads::new(),
            input: Input::new(ControlPanel::default()),
            state: config.state,
            clock: Clock::new(),
            clear_color: config.clear_color,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let time = self.clock.tick();

        self.draw_list.reset();
        let report = render::tick(&mut self.state, &time, &mut self.draw_list);

        self.quads.clear();
        self.input.panel().draw(&self.state, &mut self.quads);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.shape_pass.render(
            &self.gpu,
            &mut encoder,
            &view,
            &self.draw_list,
            self.clear_color,
        );
        self.overlay_pass
            .render(&self.gpu, &mut encoder, &view, &self.quads);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        report.report_to(&mut self.status);
    }
}

impl ApplicationHandler for AviaryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let AviaryApp::Pending { config } = self else {
            return;
        };

        *self = match Running::new(event_loop, config.clone()) {
            Ok(running) => {
                running.window.request_redraw();
                AviaryApp::Running(Box::new(running))
            }
            Err(e) => {
                event_loop.exit();
                AviaryApp::Failed(e)
            }
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let AviaryApp::Running(app) = self else {
            return;
        };

        let response = app.input.handle_event(&event, &mut app.state);
        if response.exit {
            event_loop.exit();
            return;
        }
        if response.redraw {
            app.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app.gpu.resize(size.width, size.height);
                app.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                app.redraw(event_loop);
                app.window.request_redraw();
            }
            _ => {}
        }
    }
}
