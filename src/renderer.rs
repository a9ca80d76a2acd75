//! The outline renderer session
//!
//! [`OutlineRenderer`] records the three-pass outline pipeline for one
//! camera/viewport: rasterize silhouettes into a temporary mask target,
//! blur the mask horizontally into an intermediate target, then blur
//! vertically while compositing the colored outline over the destination.
//! A session owns its two temporary targets for its whole lifetime and
//! releases them exactly once on disposal.

use thiserror::Error;

use crate::command::{
    CommandRecorder, DepthAttachment, LoadOp, ProgramHandle, StoreOp, TargetDescriptor,
    TargetFormat, TargetId, TargetSize,
};
use crate::object::RenderObject;
use crate::renderable::Renderable;
use crate::resources::OutlineResources;
use crate::settings::{RenderFlags, SettingsProvider};
use crate::shaders::{self, mask_pass, outline_pass, param};

/// Mask targets are cleared to fully transparent black
pub const MASK_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Session error type
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutlineError {
    #[error("render called on a disposed outline renderer")]
    Disposed,
    #[error("invalid explicit target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

pub type OutlineResult<T> = Result<T, OutlineError>;

/// Which depth buffer the mask pass tests against when depth testing is
/// enabled. Forward-style camera depth is the default; deferred-style hosts
/// hand over their resolved depth target instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthSource {
    Forward(TargetId),
    Deferred(TargetId),
}

impl DepthSource {
    pub fn target(&self) -> TargetId {
        match self {
            DepthSource::Forward(target) | DepthSource::Deferred(target) => *target,
        }
    }
}

/// Construction-time options for a renderer session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineRendererDesc {
    /// Size of the temporary targets; defaults to the destination size
    pub size: TargetSize,
    /// Requested mask/blur target format; hosts may substitute a fallback
    pub mask_format: TargetFormat,
    /// Always draw fullscreen passes through the cached triangle mesh,
    /// even when procedural draws are supported
    pub force_mesh_fallback: bool,
}

impl Default for OutlineRendererDesc {
    fn default() -> Self {
        Self {
            size: TargetSize::MatchDestination,
            mask_format: TargetFormat::R8Unorm,
            force_mesh_fallback: false,
        }
    }
}

/// Short-lived session recording outline passes into one command recorder.
///
/// Single-owner, single-use: construct, call render zero or more times,
/// dispose. Disposal is idempotent and also runs on drop.
pub struct OutlineRenderer<'a, C: CommandRecorder> {
    commands: &'a mut C,
    resources: &'a OutlineResources,
    destination: TargetId,
    depth: DepthSource,
    mask_target: TargetId,
    blur_target: TargetId,
    force_mesh_fallback: bool,
    disposed: bool,
}

impl<'a, C: CommandRecorder> OutlineRenderer<'a, C> {
    /// Open a session against the frame's destination and depth targets,
    /// recording the allocation of both temporary targets.
    pub fn new(
        commands: &'a mut C,
        resources: &'a OutlineResources,
        destination: TargetId,
        depth: DepthSource,
    ) -> OutlineResult<Self> {
        Self::with_desc(
            commands,
            resources,
            destination,
            depth,
            OutlineRendererDesc::default(),
        )
    }

    pub fn with_desc(
        commands: &'a mut C,
        resources: &'a OutlineResources,
        destination: TargetId,
        depth: DepthSource,
        desc: OutlineRendererDesc,
    ) -> OutlineResult<Self> {
        if let TargetSize::Explicit { width, height } = desc.size {
            if width == 0 || height == 0 {
                return Err(OutlineError::InvalidSize { width, height });
            }
        }

        let mask_target = commands.allocate_target(TargetDescriptor {
            label: "outline_mask".to_string(),
            size: desc.size,
            format: desc.mask_format,
        });
        let blur_target = commands.allocate_target(TargetDescriptor {
            label: "outline_blur".to_string(),
            size: desc.size,
            format: desc.mask_format,
        });
        log::trace!("outline session opened, size {:?}", desc.size);

        Ok(Self {
            commands,
            resources,
            destination,
            depth,
            mask_target,
            blur_target,
            force_mesh_fallback: desc.force_mesh_fallback,
            disposed: false,
        })
    }

    /// Record the full outline pipeline for one renderer group.
    ///
    /// An empty group is a no-op. Inactive renderers in a non-empty group
    /// are skipped; the pass sequence still runs and blurs an empty mask.
    pub fn render(
        &mut self,
        renderers: &[&dyn Renderable],
        settings: &dyn SettingsProvider,
        tag: Option<&str>,
    ) -> OutlineResult<()> {
        if self.disposed {
            return Err(OutlineError::Disposed);
        }
        if renderers.is_empty() {
            log::trace!("outline: empty renderer group, tag {:?}", tag);
            return Ok(());
        }

        let (Some(mask_program), Some(outline_program)) =
            (self.resources.mask_program(), self.resources.outline_program())
        else {
            // Resource validity is the integration layer's check; an
            // invalid set records nothing rather than corrupting the list.
            log::error!("outline: resources are invalid, skipping group, tag {:?}", tag);
            return Ok(());
        };

        let flags = settings.render_flags();

        // Mask pass
        let depth = flags
            .contains(RenderFlags::DEPTH_TESTING)
            .then(|| DepthAttachment {
                target: self.depth.target(),
                load_op: LoadOp::Load,
            });
        self.commands
            .set_render_target(self.mask_target, LoadOp::DontCare, StoreOp::Store, depth);
        self.commands.clear(MASK_CLEAR_COLOR);

        let mut draws = 0u32;
        for renderer in renderers {
            if !renderer.is_active() {
                continue;
            }
            // A renderer with no bound materials still draws once with the
            // default slot; "no materials" must not vanish the outline.
            let slots = renderer.submaterial_count().max(1);
            for slot in 0..slots {
                let pass = if flags.contains(RenderFlags::ALPHA_TESTING) {
                    let cutoff = renderer
                        .alpha_cutoff(slot)
                        .unwrap_or_else(|| settings.alpha_cutoff());
                    self.commands.set_float(param::ALPHA_CUTOFF, cutoff);
                    mask_pass::ALPHA_TEST
                } else {
                    mask_pass::DEFAULT
                };
                self.commands
                    .draw_renderer(renderer.handle(), slot, mask_program, pass);
                draws += 1;
            }
        }
        log::debug!("outline: {} mask draws, tag {:?}", draws, tag);

        // Shared blur/composite parameters
        let props = self.resources.properties(settings);
        self.commands.set_color(param::COLOR, props.color);
        self.commands.set_float(param::WIDTH, props.width);
        self.commands.set_float(param::INTENSITY, props.intensity);
        let gauss = self.resources.gauss_samples(settings.width());
        self.commands.set_float_array(param::GAUSS_SAMPLES, &gauss);

        // Horizontal blur pass
        self.commands
            .set_render_target(self.blur_target, LoadOp::DontCare, StoreOp::Store, None);
        self.commands
            .set_texture(param::SOURCE_TEXTURE, self.mask_target);
        self.fullscreen_draw(outline_program, outline_pass::HORIZONTAL);

        // Vertical blur plus composite over the existing destination
        self.commands
            .set_render_target(self.destination, LoadOp::Load, StoreOp::Store, None);
        self.commands
            .set_texture(param::SOURCE_TEXTURE, self.blur_target);
        self.fullscreen_draw(outline_program, outline_pass::VERTICAL);

        Ok(())
    }

    /// Record the outline pipeline for a single renderer
    pub fn render_one(
        &mut self,
        renderer: &dyn Renderable,
        settings: &dyn SettingsProvider,
        tag: Option<&str>,
    ) -> OutlineResult<()> {
        self.render(&[renderer], settings, tag)
    }

    /// Record the outline pipeline for one render object
    pub fn render_object(&mut self, object: &RenderObject<'_>) -> OutlineResult<()> {
        self.render(object.renderers(), object.settings(), object.tag())
    }

    /// Record each object in list order. No merging or batching happens
    /// here; every object runs the full pass sequence independently.
    pub fn render_objects<'o>(
        &mut self,
        objects: impl IntoIterator<Item = &'o RenderObject<'o>>,
    ) -> OutlineResult<()> {
        for object in objects {
            self.render_object(object)?;
        }
        Ok(())
    }

    fn fullscreen_draw(&mut self, program: ProgramHandle, pass: u32) {
        if self.commands.supports_procedural_draw() && !self.force_mesh_fallback {
            self.commands
                .draw_procedural(program, pass, shaders::FULLSCREEN_VERTEX_COUNT);
        } else {
            let mesh = self.resources.fullscreen_mesh();
            self.commands.draw_mesh(mesh, program, pass);
        }
    }

    /// Release both temporary targets. Safe to call more than once; later
    /// calls record nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.commands.release_target(self.blur_target);
        self.commands.release_target(self.mask_target);
        self.disposed = true;
        log::trace!("outline session disposed");
    }
}

impl<C: CommandRecorder> Drop for OutlineRenderer<'_, C> {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("outline session dropped without dispose, releasing targets");
            self.dispose();
        }
    }
}
