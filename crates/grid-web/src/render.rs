use glam::Mat4;
use wgpu::util::DeviceExt;
use web_sys as web;

use grid_core::constants::TILE_PLANE_Y;
use grid_core::TileGrid;

use crate::constants::{CROSS_ARM_FRACTION, CROSS_RGBA, GRID_LINE_RGBA};

static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    tile_size: f32,
    _pad: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TileInstance {
    pub center: [f32; 2],
    pub color: [f32; 4],
}

/// Collect one instance per cell that is currently visible (hovered or
/// fading); resting cells draw nothing.
pub fn tile_instances(grid: &TileGrid) -> Vec<TileInstance> {
    grid.cells()
        .iter()
        .filter(|c| c.opacity > 0.0)
        .filter_map(|c| {
            c.highlight.map(|rgb| TileInstance {
                center: [c.center.x, c.center.y],
                color: [rgb[0], rgb[1], rgb[2], c.opacity],
            })
        })
        .collect()
}

/// Static line-list geometry: main grid lines plus a small cross at every
/// line intersection.
fn grid_line_vertices(size: f32, divisions: usize) -> Vec<LineVertex> {
    let half = size / 2.0;
    let pitch = size / divisions as f32;
    let mut verts = Vec::new();

    let mut push_segment = |a: [f32; 3], b: [f32; 3], color: [f32; 4]| {
        verts.push(LineVertex { pos: a, color });
        verts.push(LineVertex { pos: b, color });
    };

    for i in 0..=divisions {
        let p = (i as f32 / divisions as f32 - 0.5) * size;
        push_segment([p, 0.0, -half], [p, 0.0, half], GRID_LINE_RGBA);
        push_segment([-half, 0.0, p], [half, 0.0, p], GRID_LINE_RGBA);
    }

    let arm = pitch * CROSS_ARM_FRACTION;
    for i in 0..=divisions {
        for j in 0..=divisions {
            let x = (i as f32 / divisions as f32 - 0.5) * size;
            let z = (j as f32 / divisions as f32 - 0.5) * size;
            push_segment([x - arm, TILE_PLANE_Y, z], [x + arm, TILE_PLANE_Y, z], CROSS_RGBA);
            push_segment([x, TILE_PLANE_Y, z - arm], [x, TILE_PLANE_Y, z + arm], CROSS_RGBA);
        }
    }

    verts
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    line_pipeline: wgpu::RenderPipeline,
    line_vertices: wgpu::Buffer,
    line_vertex_count: u32,

    tile_pipeline: wgpu::RenderPipeline,
    tile_instances: wgpu::Buffer,
    tile_capacity: u32,
    tile_size: f32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, grid: &TileGrid) -> anyhow::Result<Self> {
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

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
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
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let line_verts = grid_line_vertices(
            grid.pitch() * grid.divisions() as f32,
            grid.divisions(),
        );
        let line_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_lines"),
            contents: bytemuck::cast_slice(&line_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_line"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_line"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let tile_capacity = (grid.divisions() * grid.divisions()) as u32;
        let tile_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tile_instances"),
            size: (tile_capacity as usize * std::mem::size_of::<TileInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let tile_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tile_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_tile"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<TileInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_tile"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            globals_buffer,
            globals_bind_group,
            line_pipeline,
            line_vertices,
            line_vertex_count: line_verts.len() as u32,
            tile_pipeline,
            tile_instances,
            tile_capacity,
            tile_size: grid.tile_size(),
            width,
            height,
            clear_color: wgpu::Color::BLACK,
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
        }
    }

    /// Draw one frame: grid lines, then visible tile quads, under the given
    /// view-projection combined with the scene rotation.
    pub fn render(
        &mut self,
        view_proj: Mat4,
        scene_rotation_y: f32,
        instances: &[TileInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view_proj: (view_proj * Mat4::from_rotation_y(scene_rotation_y)).to_cols_array_2d(),
            tile_size: self.tile_size,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let count = (instances.len() as u32).min(self.tile_capacity);
        if count > 0 {
            self.queue.write_buffer(
                &self.tile_instances,
                0,
                bytemuck::cast_slice(&instances[..count as usize]),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_vertex_buffer(0, self.line_vertices.slice(..));
            rpass.draw(0..self.line_vertex_count, 0..1);

            if count > 0 {
                rpass.set_pipeline(&self.tile_pipeline);
                rpass.set_vertex_buffer(0, self.tile_instances.slice(..));
                rpass.draw(0..4, 0..count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
