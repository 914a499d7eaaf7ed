//! Display surface abstraction
//!
//! The widget owns four display regions (phase name, countdown, ritual
//! list, image) plus a single banner slot and a busy indicator. Anything
//! that can show those implements [`DisplaySurface`]; the engine never
//! talks to a concrete output directly.

/// Visual flavor of the banner slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    /// Informational (local-calculation notice)
    Info,
    /// Warning (remote fetch failed, or no content could be rendered)
    Warning,
}

/// The fixed display regions the renderer mutates.
///
/// Methods take `&self`: implementations use interior mutability so the
/// renderer and its spawned dismiss timers can share one surface.
pub trait DisplaySurface: Send + Sync {
    fn set_busy(&self, busy: bool);
    fn set_phase_name(&self, name: &str);
    fn set_countdown(&self, text: &str);
    fn set_rituals(&self, items: &[&str]);
    fn set_image(&self, path: &str);
    fn show_banner(&self, kind: BannerKind, message: &str);
    fn clear_banner(&self);
}
