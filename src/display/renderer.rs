//! Display state renderer
//!
//! Drives the `Idle -> Loading -> (Success | Error)` display machine over a
//! [`DisplaySurface`]. Loading overwrites all three text regions with a
//! placeholder before any async work starts, and stays visible for a
//! minimum floor duration so a fast fetch does not flash. Banners
//! auto-dismiss on spawned timers; a generation counter keeps stale timers
//! and stale async completions from touching a newer render.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration, Instant};

use crate::core::config::EngineConfig;
use crate::core::error::FetchError;
use crate::core::types::{Countdown, Language, MoonPhase};
use crate::display::surface::{BannerKind, DisplaySurface};

/// Literal placeholder shown in every text region while loading.
pub const LOADING_PLACEHOLDER: &str = "...";

/// Finite display state. `Error` is terminal only for the local-calculation
/// tier; remote failures continue into a fallback `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Loading,
    Success { fallback: bool },
    Error,
}

/// Timer durations lifted out of [`EngineConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RenderTimings {
    pub loading_floor: Duration,
    pub info_banner: Duration,
    pub warn_banner: Duration,
}

impl RenderTimings {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            loading_floor: Duration::from_millis(config.loading_floor_ms),
            info_banner: Duration::from_secs(config.info_banner_secs),
            warn_banner: Duration::from_secs(config.warn_banner_secs),
        }
    }
}

pub struct DisplayRenderer<D: DisplaySurface + 'static> {
    surface: Arc<D>,
    timings: RenderTimings,
    generation: Arc<AtomicU64>,
    loading_entered: Mutex<Option<Instant>>,
    state: Mutex<DisplayState>,
}

impl<D: DisplaySurface + 'static> DisplayRenderer<D> {
    pub fn new(surface: Arc<D>, timings: RenderTimings) -> Self {
        Self {
            surface,
            timings,
            generation: Arc::new(AtomicU64::new(0)),
            loading_entered: Mutex::new(None),
            state: Mutex::new(DisplayState::Idle),
        }
    }

    pub fn state(&self) -> DisplayState {
        *self.state.lock().unwrap()
    }

    /// Start a new orchestration pass. Completions and timers carrying an
    /// older generation are ignored once a newer pass begins.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Enter the loading state: busy indicator on, all three text regions
    /// overwritten with the placeholder. Called before any async work so
    /// the UI never shows a mix of stale and loading content.
    pub fn enter_loading(&self) {
        *self.state.lock().unwrap() = DisplayState::Loading;
        *self.loading_entered.lock().unwrap() = Some(Instant::now());
        self.surface.set_busy(true);
        self.surface.set_phase_name(LOADING_PLACEHOLDER);
        self.surface.set_countdown(LOADING_PLACEHOLDER);
        self.surface.set_rituals(&[LOADING_PLACEHOLDER]);
    }

    /// Await whatever remains of the minimum loading floor.
    async fn await_loading_floor(&self) {
        let entered = *self.loading_entered.lock().unwrap();
        if let Some(entered) = entered {
            let elapsed = entered.elapsed();
            if elapsed < self.timings.loading_floor {
                sleep(self.timings.loading_floor - elapsed).await;
            }
        }
    }

    /// Render a successful remote result: banner cleared, full content.
    pub async fn render_remote(
        &self,
        generation: u64,
        phase: MoonPhase,
        language: Language,
        countdown: Countdown,
    ) {
        self.await_loading_floor().await;
        if self.is_stale(generation) {
            tracing::debug!("suppressing stale remote render (gen {})", generation);
            return;
        }
        self.surface.clear_banner();
        self.write_content(phase, language, countdown);
        self.surface.set_busy(false);
        *self.state.lock().unwrap() = DisplayState::Success { fallback: false };
    }

    /// Render the local-calculation fallback: same content, plus a banner.
    ///
    /// A preceding fetch failure shows a warning with the classified cause;
    /// a deliberate local pass (offline, no credential) shows the quieter
    /// informational notice. Both auto-dismiss.
    pub async fn render_fallback(
        &self,
        generation: u64,
        phase: MoonPhase,
        language: Language,
        countdown: Countdown,
        cause: Option<&FetchError>,
    ) {
        self.await_loading_floor().await;
        if self.is_stale(generation) {
            tracing::debug!("suppressing stale fallback render (gen {})", generation);
            return;
        }
        self.write_content(phase, language, countdown);
        self.surface.set_busy(false);
        match cause {
            Some(error) => {
                let message = format!("{}: {}", fetch_failed_notice(language), error);
                self.surface.show_banner(BannerKind::Warning, &message);
                self.schedule_dismiss(self.timings.warn_banner, generation);
            }
            None => {
                self.surface
                    .show_banner(BannerKind::Info, fallback_notice(language));
                self.schedule_dismiss(self.timings.info_banner, generation);
            }
        }
        *self.state.lock().unwrap() = DisplayState::Success { fallback: true };
    }

    /// Bare error banner with no content fallback. Only the local
    /// calculation tier ends here (there is nothing further to fall back
    /// to).
    pub async fn render_error(&self, generation: u64, message: &str) {
        self.await_loading_floor().await;
        if self.is_stale(generation) {
            return;
        }
        self.surface.set_busy(false);
        self.surface.show_banner(BannerKind::Warning, message);
        *self.state.lock().unwrap() = DisplayState::Error;
    }

    fn write_content(&self, phase: MoonPhase, language: Language, countdown: Countdown) {
        self.surface.set_phase_name(phase.name(language));
        self.surface.set_image(phase.image_path());
        self.surface.set_countdown(&format_countdown(countdown, language));
        self.surface.set_rituals(phase.rituals(language));
    }

    /// Spawn a banner dismiss timer. The generation check keeps a timer
    /// from an earlier render from clearing a banner set by a later one.
    fn schedule_dismiss(&self, after: Duration, generation: u64) {
        let surface = Arc::clone(&self.surface);
        let counter = Arc::clone(&self.generation);
        tokio::spawn(async move {
            sleep(after).await;
            if counter.load(Ordering::SeqCst) == generation {
                surface.clear_banner();
            }
        });
    }
}

/// Countdown text for the "time until next phase" slot.
pub fn format_countdown(countdown: Countdown, language: Language) -> String {
    match language {
        Language::Ru => format!(
            "{} д. {} ч. {} мин.",
            countdown.days, countdown.hours, countdown.minutes
        ),
        Language::Lt => format!(
            "{} d. {} val. {} min.",
            countdown.days, countdown.hours, countdown.minutes
        ),
    }
}

fn fallback_notice(language: Language) -> &'static str {
    match language {
        Language::Ru => "Использован локальный расчёт фазы",
        Language::Lt => "Naudojamas vietinis fazės skaičiavimas",
    }
}

fn fetch_failed_notice(language: Language) -> &'static str {
    match language {
        Language::Ru => "Не удалось получить данные о луне",
        Language::Lt => "Nepavyko gauti mėnulio duomenų",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records every mutation for assertions.
    #[derive(Default)]
    struct MockSurface {
        busy: Mutex<bool>,
        phase_name: Mutex<String>,
        countdown: Mutex<String>,
        rituals: Mutex<Vec<String>>,
        image: Mutex<String>,
        banner: Mutex<Option<(BannerKind, String)>>,
        writes: Mutex<u64>,
    }

    impl DisplaySurface for MockSurface {
        fn set_busy(&self, busy: bool) {
            *self.busy.lock().unwrap() = busy;
        }
        fn set_phase_name(&self, name: &str) {
            *self.phase_name.lock().unwrap() = name.to_string();
            *self.writes.lock().unwrap() += 1;
        }
        fn set_countdown(&self, text: &str) {
            *self.countdown.lock().unwrap() = text.to_string();
        }
        fn set_rituals(&self, items: &[&str]) {
            *self.rituals.lock().unwrap() = items.iter().map(|s| s.to_string()).collect();
        }
        fn set_image(&self, path: &str) {
            *self.image.lock().unwrap() = path.to_string();
        }
        fn show_banner(&self, kind: BannerKind, message: &str) {
            *self.banner.lock().unwrap() = Some((kind, message.to_string()));
        }
        fn clear_banner(&self) {
            *self.banner.lock().unwrap() = None;
        }
    }

    fn renderer(surface: &Arc<MockSurface>) -> DisplayRenderer<MockSurface> {
        DisplayRenderer::new(
            Arc::clone(surface),
            RenderTimings::from_config(&EngineConfig::default()),
        )
    }

    fn sample_countdown() -> Countdown {
        Countdown { days: 2, hours: 5, minutes: 30 }
    }

    #[test]
    fn test_loading_overwrites_all_regions() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);
        r.next_generation();
        r.enter_loading();

        assert!(*surface.busy.lock().unwrap());
        assert_eq!(*surface.phase_name.lock().unwrap(), LOADING_PLACEHOLDER);
        assert_eq!(*surface.countdown.lock().unwrap(), LOADING_PLACEHOLDER);
        assert_eq!(*surface.rituals.lock().unwrap(), vec![LOADING_PLACEHOLDER]);
        assert_eq!(r.state(), DisplayState::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_render_clears_banner_and_busy() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);
        surface.show_banner(BannerKind::Info, "leftover");

        let generation = r.next_generation();
        r.enter_loading();
        r.render_remote(generation, MoonPhase::FullMoon, Language::Ru, sample_countdown())
            .await;

        assert!(!*surface.busy.lock().unwrap());
        assert!(surface.banner.lock().unwrap().is_none());
        assert_eq!(*surface.phase_name.lock().unwrap(), "Полнолуние");
        assert_eq!(r.state(), DisplayState::Success { fallback: false });
    }

    #[tokio::test(start_paused = true)]
    async fn test_rendering_twice_is_idempotent() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);

        let generation = r.next_generation();
        r.render_remote(generation, MoonPhase::NewMoon, Language::Ru, sample_countdown())
            .await;
        let first = surface.phase_name.lock().unwrap().clone();
        r.render_remote(generation, MoonPhase::NewMoon, Language::Ru, sample_countdown())
            .await;

        // Second invocation re-writes identical content, nothing accumulates
        assert_eq!(*surface.phase_name.lock().unwrap(), first);
        assert_eq!(surface.rituals.lock().unwrap().len(), 3);
        assert_eq!(r.state(), DisplayState::Success { fallback: false });
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_floor_holds_busy_for_fast_resolutions() {
        let surface = Arc::new(MockSurface::default());
        let r = Arc::new(renderer(&surface));

        let generation = r.next_generation();
        r.enter_loading();
        assert!(*surface.busy.lock().unwrap());

        // The underlying operation resolves instantly; only the floor is
        // left to wait out
        let render = {
            let r = Arc::clone(&r);
            tokio::spawn(async move {
                r.render_remote(generation, MoonPhase::FullMoon, Language::Ru, sample_countdown())
                    .await;
            })
        };
        tokio::task::yield_now().await;

        // 400ms in: still inside the 500ms floor, busy stays up
        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(*surface.busy.lock().unwrap());
        assert_eq!(*surface.phase_name.lock().unwrap(), LOADING_PLACEHOLDER);

        // Past the floor: the render lands and busy clears
        tokio::time::advance(Duration::from_millis(200)).await;
        render.await.unwrap();
        assert!(!*surface.busy.lock().unwrap());
        assert_eq!(*surface.phase_name.lock().unwrap(), "Полнолуние");
        assert_eq!(r.state(), DisplayState::Success { fallback: false });
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_suppressed() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);

        let old = r.next_generation();
        let _new = r.next_generation();
        r.render_remote(old, MoonPhase::FullMoon, Language::Ru, sample_countdown())
            .await;

        // The stale completion never touched the surface
        assert_eq!(*surface.phase_name.lock().unwrap(), "");
        assert_eq!(*surface.writes.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_banner_auto_dismisses() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);

        let generation = r.next_generation();
        r.render_fallback(
            generation,
            MoonPhase::WaningMoon,
            Language::Lt,
            sample_countdown(),
            None,
        )
        .await;
        assert!(matches!(
            *surface.banner.lock().unwrap(),
            Some((BannerKind::Info, _))
        ));

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(surface.banner.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_dismiss_timer_keeps_newer_banner() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);

        let first = r.next_generation();
        r.render_fallback(first, MoonPhase::NewMoon, Language::Ru, sample_countdown(), None)
            .await;

        // A newer pass sets its own banner before the first timer fires
        let second = r.next_generation();
        r.render_fallback(
            second,
            MoonPhase::NewMoon,
            Language::Ru,
            sample_countdown(),
            Some(&FetchError::AuthRejected),
        )
        .await;

        // First timer (3s) fires, but its generation is stale
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(matches!(
            *surface.banner.lock().unwrap(),
            Some((BannerKind::Warning, _))
        ));

        // The second pass's own timer (5s) eventually clears it
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(surface.banner.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_render_has_banner_but_no_content() {
        let surface = Arc::new(MockSurface::default());
        let r = renderer(&surface);

        let generation = r.next_generation();
        r.enter_loading();
        r.render_error(generation, "clock is invalid").await;

        assert_eq!(r.state(), DisplayState::Error);
        assert!(matches!(
            *surface.banner.lock().unwrap(),
            Some((BannerKind::Warning, _))
        ));
        // Content regions still hold the loading placeholder
        assert_eq!(*surface.phase_name.lock().unwrap(), LOADING_PLACEHOLDER);
    }
}
