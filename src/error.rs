use thiserror::Error;

/// Startup failures. Any of these ends the process.
#[derive(Debug, Error)]
pub enum NekoError {
    #[error("failed to decode sprite sheet: {0}")]
    SpriteDecode(#[from] image::ImageError),

    #[error("sprite sheet is {width}x{height}, expected a grid of at least {cols}x{rows} cells of {cell_width}x{cell_height}")]
    SpriteGeometry {
        width: u32,
        height: u32,
        cell_width: u32,
        cell_height: u32,
        cols: u32,
        rows: u32,
    },

    #[error("no global cursor source: {0}")]
    Platform(#[from] crate::platform::PlatformError),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
