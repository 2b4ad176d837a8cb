//! Startup errors.
//!
//! Everything that can go wrong happens before the first frame: the event loop,
//! the window, the surface, the adapter or the device. Once [`run`](crate::run)
//! reaches the render loop, per-frame work is infallible.

/// Errors that abort application startup.
#[derive(Debug)]
pub enum InitError {
    /// The platform event loop could not be created or exited abnormally.
    EventLoop(winit::error::EventLoopError),
    /// The OS refused to create a window.
    Window(winit::error::OsError),
    /// wgpu could not create a surface for the window.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter is compatible with the window surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused to create a logical device.
    Device(wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    NoSurfaceFormat,
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::EventLoop(e) => write!(f, "event loop error: {}", e),
            InitError::Window(e) => write!(f, "failed to create window: {}", e),
            InitError::Surface(e) => write!(f, "failed to create surface: {}", e),
            InitError::Adapter(e) => write!(f, "no suitable GPU adapter: {}", e),
            InitError::Device(e) => write!(f, "failed to create device: {}", e),
            InitError::NoSurfaceFormat => write!(f, "surface reports no supported formats"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitError::EventLoop(e) => Some(e),
            InitError::Window(e) => Some(e),
            InitError::Surface(e) => Some(e),
            InitError::Adapter(e) => Some(e),
            InitError::Device(e) => Some(e),
            InitError::NoSurfaceFormat => None,
        }
    }
}

impl From<winit::error::EventLoopError> for InitError {
    fn from(e: winit::error::EventLoopError) -> Self {
        InitError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for InitError {
    fn from(e: winit::error::OsError) -> Self {
        InitError::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for InitError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        InitError::Surface(e)
    }
}

impl From<wgpu::RequestAdapterError> for InitError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        InitError::Adapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for InitError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        InitError::Device(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_stage() {
        let msg = InitError::NoSurfaceFormat.to_string();
        assert!(msg.contains("surface"));
    }

    #[test]
    fn no_surface_format_has_no_source() {
        use std::error::Error;
        assert!(InitError::NoSurfaceFormat.source().is_none());
    }
}
