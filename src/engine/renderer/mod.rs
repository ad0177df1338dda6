// Rendering system using wgpu

mod camera;
mod mesh;
pub mod scene;
mod shadow;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use mesh::{GpuMesh, MeshKind};
pub use scene::{DirectionalLight, Geometry, Mesh, MeshHandle, MeshMaterial, Scene};
pub use vertex::{InstanceRaw, Vertex};

use log::{info, warn};
use std::ops::Range;
use std::sync::Arc;
use winit::window::Window;

use shadow::ShadowMap;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface has no supported format")]
    UnsupportedSurface,

    #[error("Failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Anything that can draw a scene through a camera
///
/// The frame driver renders through this trait so it can be exercised
/// without a GPU.
pub trait SceneRenderer {
    /// Draw the scene as it currently stands
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError>;

    /// Resize the drawing surface (physical pixels)
    fn set_size(&mut self, width: u32, height: u32);
}

/// Instances of one unit mesh, as a range into the instance buffer
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBatch {
    pub kind: MeshKind,
    pub instances: Range<u32>,
}

/// Group scene meshes by unit mesh kind, appending instance data to
/// `instances`; meshes rejected by `filter` are skipped
pub fn batch_instances<F>(
    meshes: &[Mesh],
    instances: &mut Vec<InstanceRaw>,
    filter: F,
) -> Vec<InstanceBatch>
where
    F: Fn(&Mesh) -> bool,
{
    let mut batches = Vec::with_capacity(MeshKind::ALL.len());

    for kind in MeshKind::ALL {
        let start = instances.len() as u32;
        instances.extend(
            meshes
                .iter()
                .filter(|m| MeshKind::of(&m.geometry) == kind && filter(m))
                .map(InstanceRaw::from_mesh),
        );
        let end = instances.len() as u32;

        if end > start {
            batches.push(InstanceBatch {
                kind,
                instances: start..end,
            });
        }
    }

    batches
}

/// Main renderer responsible for initializing wgpu and coordinating rendering
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shadow_map: ShadowMap,
    shadows_enabled: bool,
    meshes: Vec<(MeshKind, GpuMesh)>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<InstanceRaw>,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>, shadows_enabled: bool) -> Result<Self, RenderError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, config.width, config.height);

        // Per-frame uniforms
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
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

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shadow_map = ShadowMap::new(&device, &globals_layout);
        let pipeline = create_scene_pipeline(
            &device,
            surface_format,
            &globals_layout,
            shadow_map.bind_group_layout(),
        );

        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| (kind, GpuMesh::new(&device, kind)))
            .collect();

        let instance_capacity = 64;
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        info!(
            "Renderer initialized with {}x{} resolution (shadows {})",
            config.width,
            config.height,
            if shadows_enabled { "on" } else { "off" }
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            pipeline,
            globals_buffer,
            globals_bind_group,
            shadow_map,
            shadows_enabled,
            meshes,
            instance_buffer,
            instance_capacity,
            instances: Vec::new(),
        })
    }

    fn gpu_mesh(&self, kind: MeshKind) -> Option<&GpuMesh> {
        self.meshes.iter().find(|(k, _)| *k == kind).map(|(_, m)| m)
    }

    fn upload_instances(&mut self) {
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !self.instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
        }
    }

    fn draw_batches<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>, batches: &[InstanceBatch]) {
        for batch in batches {
            if let Some(mesh) = self.gpu_mesh(batch.kind) {
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }
    }

    fn frame_uniform(&self, scene: &Scene, camera: &Camera) -> CameraUniform {
        let mut uniform = CameraUniform::new(camera);
        if let Some(light) = scene.light() {
            let towards_light = -light.direction();
            let shadows = self.shadows_enabled && light.cast_shadow;
            uniform.light_view_proj = shadow::light_view_proj(light).to_cols_array_2d();
            uniform.light_dir = [
                towards_light.x,
                towards_light.y,
                towards_light.z,
                if shadows { 1.0 } else { 0.0 },
            ];
            uniform.light_color = [
                light.color[0] * light.intensity,
                light.color[1] * light.intensity,
                light.color[2] * light.intensity,
                1.0,
            ];
        }
        uniform
    }
}

impl SceneRenderer for Renderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface texture acquisition timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Scene instances first, shadow casters appended after them
        let mut instances = std::mem::take(&mut self.instances);
        instances.clear();
        let scene_batches = batch_instances(scene.meshes(), &mut instances, |_| true);
        let caster_batches = batch_instances(scene.meshes(), &mut instances, |m| m.cast_shadow);
        self.instances = instances;
        self.upload_instances();

        let uniform = self.frame_uniform(scene, camera);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[uniform]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            // Always clear the shadow map so a disabled pass reads as fully lit
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.shadow_map.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if uniform.light_dir[3] > 0.0 && !caster_batches.is_empty() {
                shadow_pass.set_pipeline(self.shadow_map.pipeline());
                shadow_pass.set_bind_group(0, &self.globals_bind_group, &[]);
                shadow_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                self.draw_batches(&mut shadow_pass, &caster_batches);
            }
        }

        {
            let [r, g, b, a] = scene.clear_color();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !scene_batches.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.globals_bind_group, &[]);
                render_pass.set_bind_group(1, self.shadow_map.bind_group(), &[]);
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                self.draw_batches(&mut render_pass, &scene_batches);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
            info!("Renderer resized to {}x{}", width, height);
        }
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_scene_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    globals_layout: &wgpu::BindGroupLayout,
    shadow_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Scene Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Scene Pipeline Layout"),
        bind_group_layouts: &[globals_layout, shadow_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Scene Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[Vertex::desc(), InstanceRaw::desc()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Planes are visible from both sides
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
