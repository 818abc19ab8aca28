//! GPU-instanced particle render pipeline
//!
//! Draws each particle as a circle cut out of an instanced quad.
//! Instance data comes from a storage buffer; positions are y-up pixel
//! coordinates mapped to clip space against the current surface size.

use crate::context::RenderContext;
use bytemuck::{Pod, Zeroable};
use cinder_core::Color;

/// GPU instance data for a single particle — matches the WGSL
/// `ParticleInstance` struct. 32 bytes, 16-byte aligned (2 x vec4).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstanceGpu {
    /// xy = position in pixels (y-up), z = radius, w unused
    pub pos_radius: [f32; 4],
    /// rgba
    pub color: [f32; 4],
}

impl ParticleInstanceGpu {
    pub fn new(position: [f32; 2], radius: f32, color: [f32; 4]) -> Self {
        Self {
            pos_radius: [position[0], position[1], radius, 0.0],
            color,
        }
    }
}

/// Viewport uniforms shared by every particle draw in a frame
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ViewportUniforms {
    /// xy = surface size in pixels, zw unused
    screen_size: [f32; 4],
}

const INITIAL_INSTANCE_CAPACITY: usize = 1024;

/// The particle rendering pipeline
pub struct ParticleRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    instance_bind_group_layout: wgpu::BindGroupLayout,
    instance_buffer: wgpu::Buffer,
    instance_bind_group: wgpu::BindGroup,
    instance_capacity: usize,
}

impl ParticleRenderer {
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("particle_shader.wgsl").into()),
        });

        // Group 0: viewport uniforms
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Particle Uniform Bind Group Layout"),
            });

        // Group 1: instance storage buffer (read-only)
        let instance_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("Particle Instance Bind Group Layout"),
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &instance_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_particle"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_particle"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Particle Uniform Buffer"),
            size: std::mem::size_of::<ViewportUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Particle Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (instance_buffer, instance_bind_group) = create_instance_buffer(
            device,
            &instance_bind_group_layout,
            INITIAL_INSTANCE_CAPACITY,
        );

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            instance_bind_group_layout,
            instance_buffer,
            instance_bind_group,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
        }
    }

    /// Draw one frame of particles into `view`, clearing to `clear_color`.
    pub fn render(
        &mut self,
        context: &RenderContext,
        view: &wgpu::TextureView,
        instances: &[ParticleInstanceGpu],
        clear_color: Color,
    ) {
        let uniforms = ViewportUniforms {
            screen_size: [
                context.config.width as f32,
                context.config.height as f32,
                0.0,
                0.0,
            ],
        };
        context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if instances.len() > self.instance_capacity {
            let capacity = instances.len().next_power_of_two();
            let (buffer, bind_group) =
                create_instance_buffer(&context.device, &self.instance_bind_group_layout, capacity);
            self.instance_buffer = buffer;
            self.instance_bind_group = bind_group;
            self.instance_capacity = capacity;
        }
        if !instances.is_empty() {
            context.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(instances),
            );
        }

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear_color.r as f64,
                            g: clear_color.g as f64,
                            b: clear_color.b as f64,
                            a: clear_color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !instances.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_bind_group(1, &self.instance_bind_group, &[]);
                pass.draw(0..6, 0..instances.len() as u32);
            }
        }

        context.queue.submit(std::iter::once(encoder.finish()));
    }
}

fn create_instance_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    capacity: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Particle Instance Buffer"),
        size: (capacity * std::mem::size_of::<ParticleInstanceGpu>()) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Particle Instance Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (buffer, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstanceGpu>(), 32);
        assert_eq!(std::mem::align_of::<ParticleInstanceGpu>(), 4);
    }

    #[test]
    fn instance_packs_position_and_radius() {
        let instance = ParticleInstanceGpu::new([10.0, 20.0], 4.0, [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(instance.pos_radius, [10.0, 20.0, 4.0, 0.0]);
        assert_eq!(instance.color, [1.0, 0.5, 0.25, 1.0]);
    }
}
