//! Common types shared between the recorder abstraction and its consumers

/// Handle to a shader supplied by the host's asset layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(u64);

/// Handle to an instantiated GPU program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(u64);

/// Handle to a GPU mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(u64);

/// Handle identifying one renderable object owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RendererHandle(u64);

/// Identifier of a render target known to the command recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

macro_rules! impl_raw_handle {
    ($($ty:ident),*) => {
        $(impl $ty {
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            pub fn raw(&self) -> u64 {
                self.0
            }
        })*
    };
}

impl_raw_handle!(ShaderHandle, ProgramHandle, MeshHandle, RendererHandle, TargetId);

/// Load action for a render-target attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOp {
    /// Clear the attachment to the given color before rendering
    Clear([f32; 4]),
    /// Preserve the existing contents
    Load,
    /// Existing contents are irrelevant (every pixel will be written)
    DontCare,
}

/// Store action for a render-target attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Store,
    Discard,
}

/// Depth attachment for a render-target binding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthAttachment {
    pub target: TargetId,
    pub load_op: LoadOp,
}

/// Pixel format requested for a temporary render target.
///
/// The host allocator may substitute a wider default format when the
/// requested one is unsupported; consumers must not depend on the exact
/// channel count of the allocated target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Single 8-bit channel, the preferred mask/blur format
    R8Unorm,
    /// Four 8-bit channels, the universal fallback
    Rgba8Unorm,
}

impl Default for TargetFormat {
    fn default() -> Self {
        TargetFormat::R8Unorm
    }
}

/// Dimensions of a temporary render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetSize {
    /// Match the destination target (screen/camera size)
    MatchDestination,
    /// Absolute size in pixels
    Explicit { width: u32, height: u32 },
}

impl Default for TargetSize {
    fn default() -> Self {
        TargetSize::MatchDestination
    }
}

/// Descriptor for allocating a temporary render target
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDescriptor {
    pub label: String,
    pub size: TargetSize,
    pub format: TargetFormat,
}
