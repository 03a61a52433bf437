//! GPU context for the deck renderer.
//!
//! Owns the wgpu instance/adapter/device/queue and the window surface. One
//! context serves the whole deck; segment units never talk to wgpu directly
//! (they emit billboards, the deck renderer batches and draws them).

use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

pub struct Gpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,

    /// Tied to the window; kept 'static by the window living in the app state.
    pub surface: wgpu::Surface<'static>,
    pub surface_format: wgpu::TextureFormat,
    pub size: winit::dpi::PhysicalSize<u32>,

    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: None,
                ..Default::default()
            })
            .await
            .context("wgpu: failed to request adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .context("wgpu: failed to request device")?;

        let size = window.inner_size();
        let surface = instance
            .create_surface(window)
            .context("wgpu: failed to create surface")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .first()
            .copied()
            .context("wgpu: surface reported no supported formats")?;

        let config = Self::surface_config(size, surface_format);
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            surface_format,
            size,
            config,
        })
    }

    /// Width / height of the current surface; feeds the camera projection.
    pub fn aspect(&self) -> f32 {
        let w = self.size.width.max(1) as f32;
        let h = self.size.height.max(1) as f32;
        w / h
    }

    /// Reconfigure for a new window size (call on `WindowEvent::Resized`).
    ///
    /// A zero-sized surface (minimized window) is recorded but not
    /// configured; wgpu rejects zero extents.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            self.config.width = 0;
            self.config.height = 0;
            return;
        }

        self.config = Self::surface_config(new_size, self.surface_format);
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next frame and an SRGB view of it.
    ///
    /// Surface errors are returned as-is so the caller can decide between
    /// reconfigure, retry, and exit.
    pub fn acquire_frame(
        &self,
    ) -> Result<(wgpu::SurfaceTexture, wgpu::TextureView), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                format: Some(self.surface_format.add_srgb_suffix()),
                ..Default::default()
            });
        Ok((surface_texture, view))
    }

    fn surface_config(
        size: winit::dpi::PhysicalSize<u32>,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            view_formats: vec![surface_format.add_srgb_suffix()],
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            width: size.width,
            height: size.height,
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::AutoVsync,
        }
    }
}
