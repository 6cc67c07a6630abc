//! On-screen presentation through `winit` + `wgpu`.
//!
//! The CPU backbuffer is copied straight into the swapchain image, so the surface must
//! support `COPY_DST` and an 8-bit RGBA or BGRA format. Window events are pumped after
//! each present and otherwise ignored.

use std::{sync::Arc, time::Duration};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    foundation::{
        core::{Placement, ScreenDimensions},
        error::{BackendError, BackendResult},
    },
    present::Presenter,
    render::FrameRGBA,
};

const CREATE_ATTEMPTS: u32 = 200;
const CREATE_POLL: Duration = Duration::from_millis(10);

/// The windowing subsystem: owns the event loop.
pub struct WindowSystem {
    event_loop: EventLoop<()>,
}

impl WindowSystem {
    pub fn init() -> BackendResult<Self> {
        let event_loop = EventLoop::new().map_err(|e| BackendError::new(e.to_string()))?;
        Ok(Self { event_loop })
    }

    pub fn create_window(
        mut self,
        title: &str,
        position: Placement,
        screen: ScreenDimensions,
    ) -> BackendResult<OpenWindow> {
        let attributes = Window::default_attributes()
            .with_title(title)
            .with_position(PhysicalPosition::new(position.x, position.y))
            .with_inner_size(PhysicalSize::new(screen.width, screen.height))
            .with_resizable(false);
        let mut shell = WindowShell {
            attributes: Some(attributes),
            window: None,
            error: None,
        };

        // Windows can only be created from inside the loop, once it has resumed.
        for _ in 0..CREATE_ATTEMPTS {
            let status = self
                .event_loop
                .pump_app_events(Some(CREATE_POLL), &mut shell);
            if let Some(err) = shell.error.take() {
                return Err(BackendError::new(err));
            }
            if shell.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(BackendError::new(format!(
                    "event loop exited with code {code} before the window opened"
                )));
            }
        }

        let window = shell
            .window
            .clone()
            .ok_or_else(|| BackendError::new("window did not open"))?;
        tracing::info!(title, width = screen.width, height = screen.height, "window opened");

        Ok(OpenWindow {
            event_loop: self.event_loop,
            shell,
            window,
        })
    }
}

struct WindowShell {
    attributes: Option<WindowAttributes>,
    window: Option<Arc<Window>>,
    error: Option<String>,
}

impl ApplicationHandler for WindowShell {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(attributes) = self.attributes.take() else {
            return;
        };
        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // No input handling: close requests included, the frame loop always runs to the end.
        tracing::trace!(?event, "window event ignored");
    }
}

/// A visible window that has no rendering context yet.
pub struct OpenWindow {
    event_loop: EventLoop<()>,
    shell: WindowShell,
    window: Arc<Window>,
}

impl OpenWindow {
    pub fn into_presenter(self) -> BackendResult<WindowPresenter> {
        WindowPresenter::new(self)
    }
}

pub struct WindowPresenter {
    // Field order is drop order: the surface must go before the window.
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    swap_rb: bool,
    staging: Vec<u8>,
    window: Arc<Window>,
    shell: WindowShell,
    event_loop: EventLoop<()>,
}

impl WindowPresenter {
    fn new(open: OpenWindow) -> BackendResult<Self> {
        let OpenWindow {
            event_loop,
            shell,
            window,
        } = open;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| BackendError::new(format!("create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| BackendError::new(format!("request adapter: {e}")))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("tileshow device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| BackendError::new(format!("request device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(BackendError::new(
                "surface does not accept copies into its textures",
            ));
        }
        let (format, swap_rb) = caps
            .formats
            .iter()
            .find_map(|f| match f {
                wgpu::TextureFormat::Rgba8Unorm => Some((*f, false)),
                wgpu::TextureFormat::Bgra8Unorm => Some((*f, true)),
                _ => None,
            })
            .ok_or_else(|| BackendError::new("no 8-bit rgba/bgra surface format"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            width = config.width,
            height = config.height,
            ?format,
            "window renderer ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            swap_rb,
            staging: Vec::new(),
            window,
            shell,
            event_loop,
        })
    }

    fn acquire(&mut self) -> BackendResult<wgpu::SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.config.width = size.width.max(1);
                self.config.height = size.height.max(1);
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| BackendError::new(format!("acquire frame: {e}")))
            }
            Err(e) => Err(BackendError::new(format!("acquire frame: {e}"))),
        }
    }
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &FrameRGBA) -> BackendResult<()> {
        let target = self.acquire()?;

        self.staging.clear();
        self.staging.extend_from_slice(&frame.data);
        if self.swap_rb {
            for px in self.staging.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
        }

        let width = frame.width.min(target.texture.width());
        let height = frame.height.min(target.texture.height());
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.staging,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(frame.width * 4),
                rows_per_image: Some(frame.height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::empty());
        self.window.pre_present_notify();
        target.present();

        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.shell)
        {
            tracing::warn!(code, "event loop asked to exit; ignoring until the frame loop ends");
        }
        Ok(())
    }
}
