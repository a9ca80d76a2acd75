//! Host-owned renderable objects

use crate::command::RendererHandle;

/// One renderable object the host wants outlined.
///
/// The core never inspects geometry or materials directly; it records draws
/// by handle and reads only the state needed to drive the mask pass.
pub trait Renderable {
    /// Stable handle the host resolves at command playback time
    fn handle(&self) -> RendererHandle;

    /// Whether the renderer currently contributes to the frame (enabled,
    /// visible, and in an active hierarchy). Inactive renderers are skipped
    /// silently, never an error.
    fn is_active(&self) -> bool;

    /// Number of bound submaterial slots
    fn submaterial_count(&self) -> u32;

    /// Alpha-cutoff exposed by the material in the given slot, if any.
    /// Used only when alpha testing is enabled; absent values fall back to
    /// the settings cutoff.
    fn alpha_cutoff(&self, submaterial: u32) -> Option<f32> {
        let _ = submaterial;
        None
    }
}
