use crate::mesh::{self, MeshData, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use starlane_camera::FlyCamera;
use starlane_scene::{PointLight, Scene, Shape};
use std::collections::HashMap;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz = light position, w = light range.
    light_pos: [f32; 4],
    /// rgb = light color, w = intensity.
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// A mesh uploaded to the GPU.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, data: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

const SPHERE_SEGMENTS: (u32, u32) = (32, 16);
const TORUS_SEGMENTS: (u32, u32) = (48, 24);

/// wgpu-based scene renderer: instanced shapes plus hyperlane lines.
pub struct WgpuRenderer {
    shape_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sphere_mesh: GpuMesh,
    cube_mesh: GpuMesh,
    /// Torus meshes keyed by (radius, tube) bit patterns; generated on first
    /// sight of each parameter pair.
    torus_meshes: HashMap<(u32, u32), GpuMesh>,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    line_buffer: wgpu::Buffer,
    max_line_vertices: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_pos: [10.0, 10.0, 10.0, 100.0],
                light_color: [1.0, 1.0, 1.0, 1.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shape_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shape_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHAPE_SHADER.into()),
        });

        let shape_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shape_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shape_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shape_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let sphere_mesh = GpuMesh::upload(
            device,
            &mesh::uv_sphere(SPHERE_SEGMENTS.0, SPHERE_SEGMENTS.1),
            "sphere",
        );
        let cube_mesh = GpuMesh::upload(device, &mesh::cube(), "cube");

        let max_instances = 1024u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let max_line_vertices = 4096u32;
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line_buffer"),
            size: (max_line_vertices as u64) * std::mem::size_of::<LineVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            shape_pipeline,
            line_pipeline,
            uniform_buffer,
            uniform_bind_group,
            sphere_mesh,
            cube_mesh,
            torus_meshes: HashMap::new(),
            instance_buffer,
            max_instances,
            line_buffer,
            max_line_vertices,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame of the scene through the fly camera.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
        camera: &FlyCamera,
    ) {
        let light = scene
            .lights()
            .first()
            .copied()
            .unwrap_or(PointLight::white(Vec3::new(10.0, 10.0, 10.0)));
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                view_proj: camera.view_projection().to_cols_array_2d(),
                light_pos: [
                    light.position.x,
                    light.position.y,
                    light.position.z,
                    light.range,
                ],
                light_color: [light.color.r, light.color.g, light.color.b, light.intensity],
            }),
        );

        // Batch instances by mesh and collect line vertices.
        let mut spheres: Vec<InstanceData> = Vec::new();
        let mut cubes: Vec<InstanceData> = Vec::new();
        let mut tori: HashMap<(u32, u32), Vec<InstanceData>> = HashMap::new();
        let mut line_verts: Vec<LineVertex> = Vec::new();

        for node in scene.nodes().values() {
            let t = &node.transform;
            let color = node.color.to_rgba();
            match &node.shape {
                Shape::Sphere { radius } => {
                    spheres.push(instance(t.scale * *radius, t.rotation, t.position, color));
                }
                Shape::Cube { half_extent } => {
                    // The unit cube spans ±0.5, so a half-extent is a scale of 2h.
                    cubes.push(instance(
                        t.scale * (half_extent * 2.0),
                        t.rotation,
                        t.position,
                        color,
                    ));
                }
                Shape::Torus { radius, tube } => {
                    let key = (radius.to_bits(), tube.to_bits());
                    self.torus_meshes.entry(key).or_insert_with(|| {
                        GpuMesh::upload(
                            device,
                            &mesh::torus(*radius, *tube, TORUS_SEGMENTS.0, TORUS_SEGMENTS.1),
                            "torus",
                        )
                    });
                    tori.entry(key).or_default().push(instance(
                        t.scale,
                        t.rotation,
                        t.position,
                        color,
                    ));
                }
                Shape::Lines { points } => {
                    for pair in points.chunks_exact(2) {
                        for p in pair {
                            let world = t.position + *p * t.scale;
                            line_verts.push(LineVertex {
                                position: [world.x, world.y, world.z],
                                color,
                            });
                        }
                    }
                }
            }
        }

        // One upload for all batches, drawn by instance range.
        let mut all_instances: Vec<InstanceData> = Vec::new();
        let sphere_range = push_batch(&mut all_instances, spheres);
        let cube_range = push_batch(&mut all_instances, cubes);
        let torus_ranges: Vec<((u32, u32), std::ops::Range<u32>)> = tori
            .into_iter()
            .map(|(key, batch)| (key, push_batch(&mut all_instances, batch)))
            .collect();

        if all_instances.len() > self.max_instances as usize {
            tracing::warn!(
                instances = all_instances.len(),
                max = self.max_instances,
                "instance overflow, truncating"
            );
            all_instances.truncate(self.max_instances as usize);
        }
        if !all_instances.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&all_instances),
            );
        }

        if line_verts.len() > self.max_line_vertices as usize {
            tracing::warn!(
                vertices = line_verts.len(),
                max = self.max_line_vertices,
                "line overflow, truncating"
            );
            line_verts.truncate(self.max_line_vertices as usize);
        }
        if !line_verts.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&line_verts));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.01,
                            g: 0.01,
                            b: 0.03,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Hyperlanes first, shapes over them.
            if !line_verts.is_empty() {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                pass.draw(0..line_verts.len() as u32, 0..1);
            }

            pass.set_pipeline(&self.shape_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            // Ranges past the truncation point draw nothing.
            let cap = self.max_instances;
            for (mesh, range) in [
                (&self.sphere_mesh, sphere_range),
                (&self.cube_mesh, cube_range),
            ] {
                let range = range.start.min(cap)..range.end.min(cap);
                if !range.is_empty() {
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, range);
                }
            }
            for (key, range) in &torus_ranges {
                if let Some(mesh) = self.torus_meshes.get(key) {
                    let range = range.start.min(cap)..range.end.min(cap);
                    if !range.is_empty() {
                        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                        pass.set_index_buffer(
                            mesh.index_buffer.slice(..),
                            wgpu::IndexFormat::Uint32,
                        );
                        pass.draw_indexed(0..mesh.index_count, 0, range);
                    }
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

fn instance(scale: Vec3, rotation: glam::Quat, position: Vec3, color: [f32; 4]) -> InstanceData {
    let model = Mat4::from_scale_rotation_translation(scale, rotation, position);
    let cols = model.to_cols_array_2d();
    InstanceData {
        model_0: cols[0],
        model_1: cols[1],
        model_2: cols[2],
        model_3: cols[3],
        color,
    }
}

fn push_batch(all: &mut Vec<InstanceData>, batch: Vec<InstanceData>) -> std::ops::Range<u32> {
    let start = all.len() as u32;
    all.extend(batch);
    start..all.len() as u32
}
