//! WebGPU rendering module
//!
//! Uses SDF (Signed Distance Fields) for all rendering in the fragment shader.
//! `frame` packs the app state into plain GPU structs, `sdf_pipeline` owns the
//! device and uploads them.

pub mod frame;
pub mod sdf_pipeline;

use thiserror::Error;

pub use frame::{FrameData, build_frame};
pub use sdf_pipeline::SdfRenderState;

/// Failures while bringing up the canvas and GPU
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no browser window")]
    NoWindow,
    #[error("canvas element #{0} not found")]
    NoCanvas(&'static str),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
