//! Per-frame outline units

use crate::renderable::Renderable;
use crate::settings::SettingsProvider;

/// One outlined unit: a renderer group plus the settings used to outline it.
///
/// Built fresh each frame by the host's collection layer, consumed
/// immediately by the renderer, never persisted. Everything is borrowed.
pub struct RenderObject<'a> {
    renderers: &'a [&'a dyn Renderable],
    settings: &'a dyn SettingsProvider,
    tag: Option<&'a str>,
}

impl<'a> RenderObject<'a> {
    pub fn new(
        renderers: &'a [&'a dyn Renderable],
        settings: &'a dyn SettingsProvider,
        tag: Option<&'a str>,
    ) -> Self {
        Self {
            renderers,
            settings,
            tag,
        }
    }

    /// Renderers in the group, in host-supplied order
    pub fn renderers(&self) -> &'a [&'a dyn Renderable] {
        self.renderers
    }

    pub fn settings(&self) -> &'a dyn SettingsProvider {
        self.settings
    }

    /// Diagnostic tag carried through to log output
    pub fn tag(&self) -> Option<&'a str> {
        self.tag
    }
}
