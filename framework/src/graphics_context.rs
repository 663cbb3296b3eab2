use crate::{FrameworkError, FrameworkResult};
use log::{debug, info};
use std::{env, path::Path};

/// Context containing global wgpu resources.
pub(crate) struct GraphicsContext {
    pub(crate) instance: wgpu::Instance,
    pub(crate) adapter: wgpu::Adapter,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
}

impl GraphicsContext {
    /// Set up instance, adapter and device.
    ///
    /// The backend can be selected with `WGPU_BACKEND`, a specific adapter with `WGPU_ADAPTER_NAME`.
    pub(crate) async fn init_async() -> FrameworkResult<Self> {
        info!("Initializing wgpu...");

        let backends = wgpu::util::backend_bits_from_env().unwrap_or_default();
        let dx12_shader_compiler = wgpu::util::dx12_shader_compiler_from_env().unwrap_or_default();
        let gles_minor_version = wgpu::util::gles_minor_version_from_env().unwrap_or_default();
        debug!("requested backends: {backends:?}");

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            flags: wgpu::InstanceFlags::from_build_config().with_env(),
            dx12_shader_compiler,
            gles_minor_version,
        });

        // the surface is created later on, once the window exists
        let adapter = wgpu::util::initialize_adapter_from_env_or_default(&instance, None)
            .await
            .ok_or(FrameworkError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!(
            "Using {} ({:?}, driver {} {})",
            adapter_info.name, adapter_info.backend, adapter_info.driver, adapter_info.driver_info
        );

        // Make sure we use the texture resolution limits from the adapter, so we can support images the size of the surface.
        let required_limits =
            wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());

        let trace_dir = env::var("WGPU_TRACE");
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                },
                trace_dir.ok().as_ref().map(Path::new),
            )
            .await?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}
