use super::helpers;
use super::targets::SCENE_FORMAT;
use rand::Rng;
use wgpu::util::DeviceExt;

/// Particle snow: fixed random seed positions in [-1, 1]³, animated entirely
/// in the vertex shader (the fall cycle wraps z with time). One instanced
/// quad per flake.
pub(crate) struct SnowResources {
    pipeline: wgpu::RenderPipeline,
    instance_buf: wgpu::Buffer,
    count: u32,
}

pub(crate) fn create_snow_resources<R: Rng>(
    device: &wgpu::Device,
    frame_bgl: &wgpu::BindGroupLayout,
    count: usize,
    rng: &mut R,
) -> SnowResources {
    let seeds: Vec<[f32; 3]> = (0..count)
        .map(|_| {
            [
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ]
        })
        .collect();
    let instance_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("snow_seeds"),
        contents: bytemuck::cast_slice(&seeds),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("snow_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SNOW_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("snow_pl"),
        bind_group_layouts: &[frame_bgl],
        push_constant_ranges: &[],
    });
    let attrs = wgpu::vertex_attr_array![0 => Float32x3];
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("snow_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_snow"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &attrs,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_snow"),
            targets: &[Some(wgpu::ColorTargetState {
                format: SCENE_FORMAT,
                blend: Some(helpers::additive_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    SnowResources {
        pipeline,
        instance_buf,
        count: count as u32,
    }
}

impl SnowResources {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.instance_buf.slice(..));
        rpass.draw(0..6, 0..self.count);
    }
}
