use super::helpers;
use super::targets::SCENE_FORMAT;
use crate::core::{assemble_tube_shader, CurveManager, CurveUniforms, DrawList, ShapeFunction, TubeGeometry};
use fnv::FnvHashMap;
use std::rc::Rc;
use wgpu::util::DeviceExt;

/// GPU copy of a cached tube mesh. Uploaded once per distinct tessellation
/// and shared by every batch drawing at that tessellation, mirroring the
/// CPU-side `GeometryCache`.
pub(crate) struct GpuGeometry {
    pub(crate) vertex_buf: wgpu::Buffer,
    pub(crate) index_buf: wgpu::Buffer,
    pub(crate) index_count: u32,
}

pub(crate) type GeometryUploads = FnvHashMap<(u32, u32), Rc<GpuGeometry>>;

pub(crate) fn ensure_geometry(
    uploads: &mut GeometryUploads,
    device: &wgpu::Device,
    geometry: &TubeGeometry,
) -> Rc<GpuGeometry> {
    uploads
        .entry((geometry.lon_segments, geometry.rad_segments))
        .or_insert_with(|| {
            let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tube_vertices"),
                contents: bytemuck::cast_slice(&geometry.positions),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tube_indices"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            Rc::new(GpuGeometry {
                vertex_buf,
                index_buf,
                index_count: geometry.indices.len() as u32,
            })
        })
        .clone()
}

struct CurveSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Render-side counterpart of one `CurveManager`: a pipeline for the bound
/// shape function plus grow-only per-curve uniform slots. Slots track the
/// manager's pool: they are reused across `reset`/`acquire` cycles and never
/// freed.
pub(crate) struct TubeBatch {
    shape: ShapeFunction,
    pipeline: wgpu::RenderPipeline,
    slots: Vec<CurveSlot>,
    frame_geometry: Option<Rc<GpuGeometry>>,
    draw_count: usize,
}

impl TubeBatch {
    pub(crate) fn new(
        device: &wgpu::Device,
        frame_bgl: &wgpu::BindGroupLayout,
        curve_bgl: &wgpu::BindGroupLayout,
        shape: ShapeFunction,
    ) -> Self {
        let source = assemble_tube_shader(crate::core::TUBE_WGSL, shape);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(shape.label()),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tube_pl"),
            bind_group_layouts: &[frame_bgl, curve_bgl],
            push_constant_ranges: &[],
        });
        let attrs = wgpu::vertex_attr_array![0 => Float32x3];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tube_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_tube"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attrs,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            // Double-sided: back faces contribute the negative half of the
            // glow, so nothing may be culled. Tubes neither occlude nor get
            // occluded; there is no depth buffer.
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_tube"),
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
        Self {
            shape,
            pipeline,
            slots: Vec::new(),
            frame_geometry: None,
            draw_count: 0,
        }
    }

    pub(crate) fn shape(&self) -> ShapeFunction {
        self.shape
    }

    /// Stage this frame's uniforms and geometry before the render pass.
    /// Curves are updated by the manager before rendering; an unprimed curve
    /// ends the batch.
    pub(crate) fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        curve_bgl: &wgpu::BindGroupLayout,
        uploads: &mut GeometryUploads,
        manager: &CurveManager,
        draw_list: &DrawList,
    ) {
        self.draw_count = 0;
        self.frame_geometry = None;
        for (slot, id) in draw_list.iter().enumerate() {
            let curve = manager.curve(id);
            let Some(geometry) = curve.geometry() else {
                break;
            };
            if slot == self.slots.len() {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("curve_uniforms"),
                    size: std::mem::size_of::<CurveUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = helpers::uniform_bind_group(device, "curve_bg", curve_bgl, &buffer);
                self.slots.push(CurveSlot { buffer, bind_group });
            }
            queue.write_buffer(&self.slots[slot].buffer, 0, bytemuck::bytes_of(curve.uniforms()));
            if self.frame_geometry.is_none() {
                self.frame_geometry = Some(ensure_geometry(uploads, device, geometry));
            }
            self.draw_count = slot + 1;
        }
    }

    /// Draw the staged curves, strictly in draw-list order.
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let Some(geometry) = &self.frame_geometry else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, geometry.vertex_buf.slice(..));
        rpass.set_index_buffer(geometry.index_buf.slice(..), wgpu::IndexFormat::Uint32);
        for slot in &self.slots[..self.draw_count] {
            rpass.set_bind_group(1, &slot.bind_group, &[]);
            rpass.draw_indexed(0..geometry.index_count, 0, 0..1);
        }
    }
}
