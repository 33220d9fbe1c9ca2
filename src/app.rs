use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::{CStr, CString};
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::renderer::GlRenderer;

use crate::demo::Demo;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Experiments".to_owned(),
            vsync: true,
        }
    }
}

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    renderer: GlRenderer,
}

impl App {
    /// Opens the window and makes a GL 3.3 core context current on this thread.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                config.width,
                config.height,
            )))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(&config.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        // the picker has to return a config, an empty list unwinds out of `build` instead
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            display_builder.build(&event_loop, template, |configs| {
                match pick_config(configs, |a, b| a.num_samples() > b.num_samples()) {
                    Some(config) => config,
                    None => panic::resume_unwind(Box::new(AppError::NoConfig.to_string())),
                }
            })
        }));

        let (window, gl_config) = match built {
            Ok(result) => result.map_err(|e| AppError::Display(e.to_string()))?,
            Err(_) => return Err(AppError::NoConfig),
        };

        let window = window.ok_or(AppError::NoWindow)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if config.vsync {
            let interval = SwapInterval::Wait(NonZeroU32::MIN);
            if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
                log::warn!("could not enable vsync: {e}");
            }
        }

        log::info!("OpenGL {}", gl_version());

        let renderer = GlRenderer::new();
        let size = gl_window.window.inner_size();
        renderer.resize(size.width, size.height);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            renderer,
        })
    }

    /// Drives `demo` until the window is closed or Escape is pressed.
    ///
    /// Exits the process with code 1 when a frame fails.
    pub fn run(self, mut demo: Box<dyn Demo>) -> ! {
        let Self {
            event_loop,
            gl_context,
            gl_window,
            mut renderer,
        } = self;

        let mut start = Instant::now();

        event_loop.run(move |event, _window_target, control_flow| match event {
            Event::NewEvents(StartCause::Init) => {
                control_flow.set_poll();
                start = Instant::now();
            }
            Event::MainEventsCleared => {
                gl_window.window.request_redraw();
            }
            Event::RedrawRequested(_) => {
                if let Err(e) = demo.frame(&mut renderer, start.elapsed().as_secs_f32()) {
                    log::error!("frame failed: {e}");
                    control_flow.set_exit_with_code(1);
                    return;
                }

                if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                    log::error!("could not swap buffers: {e}");
                    control_flow.set_exit_with_code(1);
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                        (Some(width), Some(height)) => {
                            gl_window.surface.resize(&gl_context, width, height);
                            renderer.resize(size.width, size.height);
                        }
                        _ => log::warn!("ignoring resize to {}x{}", size.width, size.height),
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                }
                | WindowEvent::CloseRequested => {
                    log::info!("exiting");
                    control_flow.set_exit();
                }
                _ => (),
            },
            _ => (),
        })
    }
}

fn gl_version() -> String {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if version.is_null() {
            return "unknown version".to_owned();
        }

        CStr::from_ptr(version.cast()).to_string_lossy().into_owned()
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let (width, height) = match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(AppError::ZeroSize),
        };

        let raw_window_handle = window.raw_window_handle();
        let attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

/// Keeps the first of the best items, `better(a, b)` tells whether `a` beats `b`.
fn pick_config<T>(configs: impl Iterator<Item = T>, better: impl Fn(&T, &T) -> bool) -> Option<T> {
    configs.reduce(|best, config| if better(&config, &best) { config } else { best })
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create GL display: {0}")]
    Display(String),
    #[error("no GL config matches the requested template")]
    NoConfig,
    #[error("display builder did not create a window")]
    NoWindow,
    #[error("window has zero size")]
    ZeroSize,
    #[error("GL context error: {0}")]
    Context(#[from] glutin::error::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window() {
        let config = WindowConfig::default();

        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "Experiments");
        assert!(config.vsync);
    }

    #[test]
    fn picks_most_samples() {
        let samples = [0_u8, 4, 2, 4];
        let picked = pick_config(samples.iter().enumerate(), |a, b| a.1 > b.1);

        assert_eq!(picked, Some((1, &4)));
    }

    #[test]
    fn no_configs_is_an_error() {
        let picked = pick_config(std::iter::empty::<u8>(), |a, b| a > b);
        assert_eq!(picked, None);

        assert_eq!(
            AppError::NoConfig.to_string(),
            "no GL config matches the requested template"
        );
    }
}
