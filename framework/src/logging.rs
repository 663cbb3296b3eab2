use log::LevelFilter;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Installs the global logger.
///
/// `RUST_LOG` is applied on top of the built-in filters.
pub fn init_logger() {
    env_logger::builder()
        .filter_level(DEFAULT_LEVEL)
        // wgpu is very noisy
        .filter_module("wgpu_core", LevelFilter::Warn)
        // Workaround for https://github.com/gfx-rs/wgpu/issues/6043
        .filter_module("wgpu_core::device::resource", LevelFilter::Warn)
        .filter_module("wgpu_hal", LevelFilter::Error)
        .filter_module("naga", LevelFilter::Error)
        .filter_module("calloop", LevelFilter::Info)
        .parse_default_env()
        .init();
}
