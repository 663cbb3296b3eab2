use crate::{
    compose_frame, missing_uniforms, EngineError, EngineResult, KeyBindings, SceneState,
    UNIFORM_BLOCK_SIZE,
};
use lib_geometry::Viewport;
use lib_teapot_mesh::{Mesh, MeshData, Vertex, DEFAULT_DETAIL};
use log::{debug, error, info, warn};
use std::{
    borrow::Cow,
    fs::read_to_string,
    path::{Path, PathBuf},
};
use teapot_framework::{renderer, FrameControl, InputState};
use winit::event::MouseButton;

pub const VERTEX_SHADER: &str = "blinn_phong.vert.wgsl";
pub const FRAGMENT_SHADER: &str = "blinn_phong.frag.wgsl";

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

pub struct RendererBuilder {
    shader_dir: PathBuf,
    key_bindings: KeyBindings,
    mesh_detail: u32,
}

impl RendererBuilder {
    #[must_use]
    pub fn new(shader_dir: impl Into<PathBuf>, key_bindings: KeyBindings) -> Self {
        Self {
            shader_dir: shader_dir.into(),
            key_bindings,
            mesh_detail: DEFAULT_DETAIL,
        }
    }

    /// Number of segments around the teapot's body.
    #[must_use]
    pub fn with_mesh_detail(mut self, mesh_detail: u32) -> Self {
        self.mesh_detail = mesh_detail;
        self
    }
}

impl renderer::RendererBuilder for RendererBuilder {
    type Renderer = Renderer;
    type Error = EngineError;

    fn build(
        self,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        _queue: &wgpu::Queue,
        surface: &wgpu::SurfaceConfiguration,
    ) -> EngineResult<Renderer> {
        let adapter_info = adapter.get_info();
        info!(
            "Graphics backend {:?} on {} ({:?})",
            adapter_info.backend, adapter_info.name, adapter_info.device_type
        );

        let vertex_source = read_shader(&self.shader_dir, VERTEX_SHADER)?;
        let fragment_source = read_shader(&self.shader_dir, FRAGMENT_SHADER)?;
        for name in missing_uniforms(&[&vertex_source, &fragment_source]) {
            warn!("uniform {name} is not declared in the shader sources");
        }

        let scene = SceneState::initial()?;
        let viewport = Viewport::new((surface.width, surface.height));
        let view_format = surface
            .view_formats
            .first()
            .copied()
            .unwrap_or(surface.format);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let depth_texture = DepthTexture::new(device, surface, "depth texture");
        let shader_program = ShaderProgram::new(device, vertex_source, fragment_source, view_format);
        let mesh = Mesh::new(device, &MeshData::teapot(self.mesh_detail), "teapot");
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(EngineError::Validation(error));
        }
        info!("Shader program built from {VERTEX_SHADER} and {FRAGMENT_SHADER}.");

        Ok(Renderer {
            scene,
            key_bindings: self.key_bindings,
            viewport,
            depth_texture,
            shader_program,
            mesh,
        })
    }
}

fn read_shader(shader_dir: &Path, name: &str) -> EngineResult<String> {
    let path = shader_dir.join(name);
    debug!("reading shader source {}", path.display());
    read_to_string(&path).map_err(|source| EngineError::ReadShader { path, source })
}

pub struct Renderer {
    scene: SceneState,
    key_bindings: KeyBindings,
    viewport: Viewport,
    depth_texture: DepthTexture,
    shader_program: ShaderProgram,
    mesh: Mesh,
}

impl Renderer {
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    fn draw(&self, texture_view: &wgpu::TextureView, encoder: &mut wgpu::CommandEncoder) {
        let render_pass_color_attachment = wgpu::RenderPassColorAttachment {
            view: texture_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                store: wgpu::StoreOp::Store,
            },
        };
        let color_attachments = [Some(render_pass_color_attachment)];
        let render_pass_depth_stencil_attachment = wgpu::RenderPassDepthStencilAttachment {
            view: &self.depth_texture.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        };
        let render_pass_descriptor = wgpu::RenderPassDescriptor {
            label: Some("teapot"),
            color_attachments: &color_attachments,
            depth_stencil_attachment: Some(render_pass_depth_stencil_attachment),
            timestamp_writes: None,
            occlusion_query_set: None,
        };

        let mut render_pass = encoder.begin_render_pass(&render_pass_descriptor);
        render_pass.set_pipeline(&self.shader_program.pipeline);
        render_pass.set_bind_group(0, &self.shader_program.bind_group, &[]);
        self.mesh.draw(&mut render_pass);
    }
}

/// Print which mouse button is down, together with the cursor's movement.
fn log_mouse_buttons(input: &InputState) {
    let button = if input.is_mouse_button_pressed(MouseButton::Left) {
        "Left"
    } else if input.is_mouse_button_pressed(MouseButton::Right) {
        "Right"
    } else {
        return;
    };

    debug!(
        "{button} mouse button is down; current mouse position: {:?}, previous mouse position: {:?}",
        input.cursor_position(),
        input.previous_cursor_position()
    );
}

impl renderer::Renderer for Renderer {
    type Error = EngineError;

    fn update(&mut self, input: &mut InputState) -> FrameControl {
        log_mouse_buttons(input);

        self.key_bindings
            .take_action(input)
            .map_or(FrameControl::Continue, |action| self.scene.apply(action))
    }

    fn resize(
        &mut self,
        device: &wgpu::Device,
        _queue: &wgpu::Queue,
        surface: &wgpu::SurfaceConfiguration,
    ) {
        self.viewport
            .set_surface_dimensions((surface.width, surface.height));

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let depth_texture = DepthTexture::new(device, surface, "depth texture");
        match pollster::block_on(device.pop_error_scope()) {
            Some(error) => error!("failed to resize the depth texture: {error}"),
            None => self.depth_texture = depth_texture,
        }
    }

    fn render(
        &mut self,
        texture_view: &wgpu::TextureView,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> EngineResult<()> {
        let uniforms = compose_frame(&self.scene, self.viewport.aspect_ratio());

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        queue.write_buffer(
            &self.shader_program.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("teapot frame"),
        });
        self.draw(texture_view, &mut encoder);
        queue.submit(Some(encoder.finish()));

        match pollster::block_on(device.pop_error_scope()) {
            Some(error) => Err(EngineError::Validation(error)),
            None => Ok(()),
        }
    }
}

/// Linked vertex and fragment stage together with their uniform block.
struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    fn new(
        device: &wgpu::Device,
        vertex_source: String,
        fragment_source: String,
        view_format: wgpu::TextureFormat,
    ) -> Self {
        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(VERTEX_SHADER),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(vertex_source)),
        });
        let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(FRAGMENT_SHADER),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(fragment_source)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform block layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(UNIFORM_BLOCK_SIZE),
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniform block buffer"),
            size: UNIFORM_BLOCK_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform block"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let vertex = wgpu::VertexState {
            module: &vertex_shader,
            entry_point: "vs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[Vertex::buffer_layout()],
        };

        let fragment_state = wgpu::FragmentState {
            module: &fragment_shader,
            entry_point: "fs_main",
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(view_format.into())],
        };

        // the spout's opening and the lid seam show back faces
        let primitive = wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blinn phong"),
            layout: Some(&pipeline_layout),
            vertex,
            fragment: Some(fragment_state),
            primitive,
            depth_stencil: Some(DepthTexture::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }
}

struct DepthTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTexture {
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            _texture: texture,
            view,
        }
    }

    fn depth_stencil_state() -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: Self::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}
