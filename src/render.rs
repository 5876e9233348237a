use crate::camera;
use crate::core::{CurveManager, DrawList, ShapeFunction};
use glam::Mat4;
use rand::Rng;
use web_sys as web;

mod helpers;
mod post;
mod snow;
mod targets;
mod tubes;

use snow::SnowResources;
use targets::RenderTargets;
use tubes::{GeometryUploads, TubeBatch};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    // x = time, yz = resolution, w unused
    misc: [f32; 4],
}

/// Viewport context: owns the surface, the offscreen scene target, the
/// per-shape tube batches and the snow layer. `resize_if_needed` rebuilds
/// everything resolution-dependent (surface config, scene target, composite
/// input, projection).
pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    bg_scene: wgpu::BindGroup,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    curve_bgl: wgpu::BindGroupLayout,

    batches: Vec<TubeBatch>,
    geometry_uploads: GeometryUploads,
    snow: SnowResources,

    width: u32,
    height: u32,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new<R: Rng>(
        canvas: &'a web::HtmlCanvasElement,
        shapes: &[ShapeFunction],
        snow_count: usize,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits on web to avoid passing unknown fields to
                    // older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, format);
        let bg_scene =
            post::scene_bind_group(&device, &post.bgl, &targets.scene_view, &linear_sampler);

        let frame_bgl =
            helpers::uniform_bind_group_layout(&device, "frame_bgl", wgpu::ShaderStages::VERTEX);
        let curve_bgl = helpers::uniform_bind_group_layout(
            &device,
            "curve_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group =
            helpers::uniform_bind_group(&device, "frame_bg", &frame_bgl, &frame_buffer);

        let batches = shapes
            .iter()
            .map(|&shape| TubeBatch::new(&device, &frame_bgl, &curve_bgl, shape))
            .collect();
        let snow = snow::create_snow_resources(&device, &frame_bgl, snow_count, rng);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            bg_scene,
            frame_buffer,
            frame_bind_group,
            curve_bgl,
            batches,
            geometry_uploads: GeometryUploads::default(),
            snow,
            width,
            height,
            time_accum: 0.0,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.bg_scene = post::scene_bind_group(
                &self.device,
                &self.post.bgl,
                &self.targets.scene_view,
                &self.linear_sampler,
            );
        }
    }

    /// Draw one frame: tubes and snow accumulate into the scene target, then
    /// the composite pass blits to the swapchain. `scenes` pairs each manager
    /// with its draw list, in the order the batches were created.
    pub fn render(
        &mut self,
        dt_sec: f32,
        view: Mat4,
        scenes: &[(&CurveManager, &DrawList)],
    ) -> Result<(), wgpu::SurfaceError> {
        debug_assert_eq!(scenes.len(), self.batches.len());
        self.time_accum += dt_sec.max(0.0);

        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let proj = camera::projection(self.width, self.height);
        let uniforms = FrameUniforms {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            misc: [self.time_accum, self.width as f32, self.height as f32, 0.0],
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));

        for (batch, (manager, draw_list)) in self.batches.iter_mut().zip(scenes) {
            debug_assert_eq!(batch.shape(), manager.shape());
            batch.prepare(
                &self.device,
                &self.queue,
                &self.curve_bgl,
                &mut self.geometry_uploads,
                manager,
                draw_list,
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            for batch in &self.batches {
                batch.draw(&mut rpass);
            }
            self.snow.draw(&mut rpass);
        }

        post::blit(
            &mut encoder,
            "composite",
            &surface_view,
            &self.post.pipeline,
            &self.bg_scene,
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
