//! Shared outline resources
//!
//! One [`OutlineResources`] instance is created at startup and borrowed by
//! every renderer session afterwards. Programs, the fullscreen mesh, and
//! the blur-kernel table are built lazily on first use and then reused for
//! the lifetime of the set.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use parking_lot::Mutex;

use crate::command::{MeshHandle, ProgramHandle, ShaderHandle};
use crate::math;
use crate::settings::{RenderFlags, SettingsProvider, MAX_WIDTH, MIN_WIDTH, SOLID_INTENSITY};

/// Factory supplied by the host asset layer.
///
/// Instantiates GPU programs from validated shader handles and uploads
/// meshes. The outline core never creates GPU objects any other way.
pub trait ResourceFactory {
    fn instantiate_program(&self, shader: ShaderHandle) -> ProgramHandle;
    fn create_mesh(&self, vertices: &[FullscreenVertex]) -> MeshHandle;
}

/// Clip-space vertex of the fullscreen triangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FullscreenVertex {
    pub position: Vec2,
}

/// Oversized clip-space triangle covering the whole viewport.
///
/// Fallback geometry for platforms without shader-stage vertex generation.
pub const FULLSCREEN_TRIANGLE: [FullscreenVertex; 3] = [
    FullscreenVertex {
        position: Vec2::new(-1.0, -1.0),
    },
    FullscreenVertex {
        position: Vec2::new(3.0, -1.0),
    },
    FullscreenVertex {
        position: Vec2::new(-1.0, 3.0),
    },
];

/// Per-invocation shader parameters derived from settings.
///
/// Reused for every draw instead of instantiating per-object programs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OutlineProperties {
    pub color: Vec4,
    pub width: f32,
    pub intensity: f32,
    pub _padding: [f32; 2],
}

/// Shared programs, fullscreen mesh, and cached blur kernels.
pub struct OutlineResources {
    factory: Arc<dyn ResourceFactory>,
    mask_shader: Option<ShaderHandle>,
    outline_shader: Option<ShaderHandle>,
    mask_program: Mutex<Option<ProgramHandle>>,
    outline_program: Mutex<Option<ProgramHandle>>,
    fullscreen_mesh: Mutex<Option<MeshHandle>>,
    gauss_cache: Mutex<[Option<Arc<[f32]>>; MAX_WIDTH as usize]>,
}

impl OutlineResources {
    pub fn new(
        factory: Arc<dyn ResourceFactory>,
        mask_shader: Option<ShaderHandle>,
        outline_shader: Option<ShaderHandle>,
    ) -> Self {
        Self {
            factory,
            mask_shader,
            outline_shader,
            mask_program: Mutex::new(None),
            outline_program: Mutex::new(None),
            fullscreen_mesh: Mutex::new(None),
            gauss_cache: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    /// Whether both shader handles are set. Integration code checks this
    /// before opening a renderer session.
    pub fn is_valid(&self) -> bool {
        self.mask_shader.is_some() && self.outline_shader.is_some()
    }

    /// Program used to rasterize silhouettes into the mask target.
    ///
    /// Instantiated once on first access. An unset shader handle is a host
    /// configuration error: reported loudly, never a panic.
    pub fn mask_program(&self) -> Option<ProgramHandle> {
        Self::program(&self.mask_program, self.mask_shader, &*self.factory, "mask")
    }

    /// Program holding the horizontal and vertical blur/composite sub-passes
    pub fn outline_program(&self) -> Option<ProgramHandle> {
        Self::program(
            &self.outline_program,
            self.outline_shader,
            &*self.factory,
            "outline",
        )
    }

    fn program(
        slot: &Mutex<Option<ProgramHandle>>,
        shader: Option<ShaderHandle>,
        factory: &dyn ResourceFactory,
        what: &str,
    ) -> Option<ProgramHandle> {
        let mut slot = slot.lock();
        if slot.is_none() {
            let Some(shader) = shader else {
                log::error!("outline resources: {what} shader handle is unset");
                return None;
            };
            *slot = Some(factory.instantiate_program(shader));
        }
        *slot
    }

    /// Cached fullscreen-triangle mesh, uploaded on first use
    pub fn fullscreen_mesh(&self) -> MeshHandle {
        let mut slot = self.fullscreen_mesh.lock();
        *slot.get_or_insert_with(|| self.factory.create_mesh(&FULLSCREEN_TRIANGLE))
    }

    /// Blur-kernel weights for the given width.
    ///
    /// Width is clamped into `[MIN_WIDTH, MAX_WIDTH]` before indexing. Each
    /// entry is computed once and never evicted, so repeated calls return
    /// bit-identical values.
    pub fn gauss_samples(&self, width: i32) -> Arc<[f32]> {
        let width = width.clamp(MIN_WIDTH, MAX_WIDTH) as usize;
        let mut cache = self.gauss_cache.lock();
        cache[width - 1]
            .get_or_insert_with(|| math::gauss_samples(width).into())
            .clone()
    }

    /// Populate the reusable property block from settings.
    ///
    /// Without the `BLURRED` flag the user intensity is replaced by
    /// [`SOLID_INTENSITY`]; solid and blurred outlines share one composite
    /// code path parameterized by intensity.
    pub fn properties(&self, settings: &dyn SettingsProvider) -> OutlineProperties {
        let intensity = if settings.render_flags().contains(RenderFlags::BLURRED) {
            settings.intensity()
        } else {
            SOLID_INTENSITY
        };
        OutlineProperties {
            color: settings.color(),
            width: settings.width() as f32,
            intensity,
            _padding: [0.0; 2],
        }
    }
}
