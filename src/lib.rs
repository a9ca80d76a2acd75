//! Outline Renderer - a command-recording screen-space outline pipeline
//!
//! Renders a colored silhouette highlight around arbitrary sets of host
//! renderables in three recorded GPU passes:
//! 1. **Mask pass** - rasterize the group's silhouette into a temporary
//!    single-channel target
//! 2. **Horizontal blur** - grow the mask along X with a separable
//!    Gaussian kernel
//! 3. **Vertical blur + composite** - grow along Y and blend the colored
//!    outline over the destination
//!
//! # Features
//! - Deferred command recording behind [`CommandRecorder`]; the host owns
//!   actual GPU execution
//! - Solid and blurred outlines through one composite code path,
//!   parameterized by intensity
//! - Shared [`OutlineResources`] with lazily built programs, fullscreen
//!   mesh, and a cached per-width Gaussian kernel table
//! - Scoped [`OutlineRenderer`] sessions with guaranteed, idempotent
//!   release of temporary targets

pub mod command;
pub mod math;
pub mod object;
pub mod renderable;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod shaders;

pub use command::{
    Command, CommandList, CommandRecorder, DepthAttachment, LoadOp, MeshHandle, ProgramHandle,
    RendererHandle, ShaderHandle, StoreOp, TargetDescriptor, TargetFormat, TargetId, TargetSize,
};
pub use object::RenderObject;
pub use renderable::Renderable;
pub use renderer::{
    DepthSource, OutlineError, OutlineRenderer, OutlineRendererDesc, OutlineResult,
    MASK_CLEAR_COLOR,
};
pub use resources::{
    FullscreenVertex, OutlineProperties, OutlineResources, ResourceFactory, FULLSCREEN_TRIANGLE,
};
pub use settings::{
    DelegatingSettings, OutlineSettings, RenderFlags, SettingsProvider, MAX_INTENSITY, MAX_WIDTH,
    MIN_INTENSITY, MIN_WIDTH, SOLID_INTENSITY,
};
