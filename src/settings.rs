//! Outline appearance settings

use std::sync::Arc;

use glam::Vec4;

/// Smallest valid outline width in pixels
pub const MIN_WIDTH: i32 = 1;

/// Largest valid outline width in pixels
pub const MAX_WIDTH: i32 = 32;

/// Smallest valid blur intensity
pub const MIN_INTENSITY: f32 = 1.0;

/// Largest valid blur intensity
pub const MAX_INTENSITY: f32 = 64.0;

/// Sentinel intensity meaning "no blur, solid fill".
///
/// Deliberately outside the `[MIN_INTENSITY, MAX_INTENSITY]` clamp range:
/// the composite shader treats it as a mode switch, not as a very strong
/// blur. It must never be folded into the clamp.
pub const SOLID_INTENSITY: f32 = 100.0;

/// Tolerance used when comparing intensity and alpha-cutoff values
pub const EQUALITY_EPSILON: f32 = 1e-4;

/// Outline feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderFlags(u32);

impl RenderFlags {
    pub const NONE: Self = Self(0);
    /// Soft-edged outline using the user intensity instead of solid fill
    pub const BLURRED: Self = Self(1 << 0);
    /// Depth-test the mask pass against existing scene geometry
    pub const DEPTH_TESTING: Self = Self(1 << 1);
    /// Alpha-test mask draws against a per-material cutoff
    pub const ALPHA_TESTING: Self = Self(1 << 2);

    pub fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}

impl std::ops::BitOr for RenderFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Outline appearance for one outlined group.
///
/// All numeric fields are clamped on write, never on read: a stored value
/// is always in range, whichever path set it.
#[derive(Debug, Clone, Copy)]
pub struct OutlineSettings {
    color: Vec4,
    width: i32,
    intensity: f32,
    alpha_cutoff: f32,
    render_flags: RenderFlags,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            color: Vec4::new(1.0, 0.0, 0.0, 1.0),
            width: 4,
            intensity: 2.0,
            alpha_cutoff: 0.9,
            render_flags: RenderFlags::NONE,
        }
    }
}

impl OutlineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
    }

    pub fn alpha_cutoff(&self) -> f32 {
        self.alpha_cutoff
    }

    pub fn set_alpha_cutoff(&mut self, cutoff: f32) {
        self.alpha_cutoff = cutoff.clamp(0.0, 1.0);
    }

    pub fn render_flags(&self) -> RenderFlags {
        self.render_flags
    }

    pub fn set_render_flags(&mut self, flags: RenderFlags) {
        self.render_flags = flags;
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_width(mut self, width: i32) -> Self {
        self.set_width(width);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.set_intensity(intensity);
        self
    }

    pub fn with_alpha_cutoff(mut self, cutoff: f32) -> Self {
        self.set_alpha_cutoff(cutoff);
        self
    }

    pub fn with_render_flags(mut self, flags: RenderFlags) -> Self {
        self.set_render_flags(flags);
        self
    }
}

impl PartialEq for OutlineSettings {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.width == other.width
            && self.render_flags == other.render_flags
            && (self.intensity - other.intensity).abs() < EQUALITY_EPSILON
            && (self.alpha_cutoff - other.alpha_cutoff).abs() < EQUALITY_EPSILON
    }
}

/// Read-only view of outline settings.
///
/// A settings source may own its values or delegate to a shared asset; the
/// renderer only ever reads through this capability.
pub trait SettingsProvider {
    fn color(&self) -> Vec4;
    fn width(&self) -> i32;
    fn intensity(&self) -> f32;
    fn alpha_cutoff(&self) -> f32;
    fn render_flags(&self) -> RenderFlags;
}

impl SettingsProvider for OutlineSettings {
    fn color(&self) -> Vec4 {
        self.color
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn intensity(&self) -> f32 {
        self.intensity
    }

    fn alpha_cutoff(&self) -> f32 {
        self.alpha_cutoff
    }

    fn render_flags(&self) -> RenderFlags {
        self.render_flags
    }
}

/// Settings source that prefers a shared settings object when one is set
/// and falls back to locally stored values otherwise.
#[derive(Debug, Clone, Default)]
pub struct DelegatingSettings {
    shared: Option<Arc<OutlineSettings>>,
    local: OutlineSettings,
}

impl DelegatingSettings {
    pub fn new(local: OutlineSettings) -> Self {
        Self {
            shared: None,
            local,
        }
    }

    /// Delegate reads to a shared settings object; `None` reverts to the
    /// local values
    pub fn set_shared(&mut self, shared: Option<Arc<OutlineSettings>>) {
        self.shared = shared;
    }

    pub fn shared(&self) -> Option<&Arc<OutlineSettings>> {
        self.shared.as_ref()
    }

    pub fn local(&self) -> &OutlineSettings {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut OutlineSettings {
        &mut self.local
    }

    fn active(&self) -> &OutlineSettings {
        match &self.shared {
            Some(shared) => shared,
            None => &self.local,
        }
    }
}

impl SettingsProvider for DelegatingSettings {
    fn color(&self) -> Vec4 {
        self.active().color()
    }

    fn width(&self) -> i32 {
        self.active().width()
    }

    fn intensity(&self) -> f32 {
        self.active().intensity()
    }

    fn alpha_cutoff(&self) -> f32 {
        self.active().alpha_cutoff()
    }

    fn render_flags(&self) -> RenderFlags {
        self.active().render_flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_clamped_on_write() {
        let mut settings = OutlineSettings::default();
        settings.set_width(0);
        assert_eq!(settings.width(), MIN_WIDTH);
        settings.set_width(-10);
        assert_eq!(settings.width(), MIN_WIDTH);
        settings.set_width(33);
        assert_eq!(settings.width(), MAX_WIDTH);
        settings.set_width(1000);
        assert_eq!(settings.width(), MAX_WIDTH);
        settings.set_width(16);
        assert_eq!(settings.width(), 16);
    }

    #[test]
    fn intensity_is_clamped_on_write() {
        let mut settings = OutlineSettings::default();
        settings.set_intensity(0.0);
        assert_eq!(settings.intensity(), MIN_INTENSITY);
        settings.set_intensity(1000.0);
        assert_eq!(settings.intensity(), MAX_INTENSITY);
        // The solid sentinel is above the clamp range on purpose; it is a
        // shader mode switch, not a user-settable intensity.
        settings.set_intensity(SOLID_INTENSITY);
        assert_eq!(settings.intensity(), MAX_INTENSITY);
    }

    #[test]
    fn alpha_cutoff_is_clamped_to_unit_range() {
        let mut settings = OutlineSettings::default();
        settings.set_alpha_cutoff(-0.5);
        assert_eq!(settings.alpha_cutoff(), 0.0);
        settings.set_alpha_cutoff(1.5);
        assert_eq!(settings.alpha_cutoff(), 1.0);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric() {
        let a = OutlineSettings::default();
        let b = OutlineSettings::default();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
    }

    #[test]
    fn equality_tolerates_tiny_intensity_difference() {
        let a = OutlineSettings::default().with_intensity(2.0);
        let mut b = a;
        b.intensity = 2.0 + EQUALITY_EPSILON * 0.5;
        assert_eq!(a, b);
    }

    #[test]
    fn changing_one_field_breaks_equality() {
        let base = OutlineSettings::default();
        assert_ne!(base, base.with_color(Vec4::new(0.0, 1.0, 0.0, 1.0)));
        assert_ne!(base, base.with_width(7));
        assert_ne!(base, base.with_render_flags(RenderFlags::BLURRED));
        assert_ne!(base, base.with_intensity(10.0));
    }

    #[test]
    fn delegating_settings_prefer_the_shared_object() {
        let local = OutlineSettings::default().with_width(3);
        let shared = Arc::new(OutlineSettings::default().with_width(9));

        let mut settings = DelegatingSettings::new(local);
        assert_eq!(SettingsProvider::width(&settings), 3);

        settings.set_shared(Some(shared));
        assert_eq!(SettingsProvider::width(&settings), 9);

        settings.set_shared(None);
        assert_eq!(SettingsProvider::width(&settings), 3);
    }
}
