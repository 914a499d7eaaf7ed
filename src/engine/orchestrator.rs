//! Network-aware orchestrator
//!
//! Decides remote-vs-local at initialization and reacts to connectivity
//! changes. Every remote-path failure stops here: it is logged, shown as a
//! transient banner, and converted into a local-calculation fallback
//! render. The user always ends up with some phase displayed; only a
//! failure of the local tier itself (invalid system clock) leaves a bare
//! error banner.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::core::astronomy::{compute_local_phase, countdown_to_next};
use crate::core::config::EngineConfig;
use crate::core::error::FetchError;
use crate::display::renderer::{DisplayRenderer, RenderTimings};
use crate::display::surface::DisplaySurface;
use crate::remote::client::PhaseSource;

/// The moon-phase engine: one instance per page, constructed once and
/// shared by reference with whatever dispatches connectivity events.
pub struct MoonPhaseEngine<S: PhaseSource, D: DisplaySurface + 'static> {
    config: EngineConfig,
    /// Absent when no credential is configured; the engine then runs
    /// local-only, same as offline.
    source: Option<S>,
    renderer: DisplayRenderer<D>,
}

impl<S: PhaseSource, D: DisplaySurface + 'static> MoonPhaseEngine<S, D> {
    pub fn new(config: EngineConfig, source: Option<S>, surface: Arc<D>) -> Self {
        let timings = RenderTimings::from_config(&config);
        Self {
            config,
            source,
            renderer: DisplayRenderer::new(surface, timings),
        }
    }

    pub fn renderer(&self) -> &DisplayRenderer<D> {
        &self.renderer
    }

    pub fn source_ref(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// First render after construction.
    pub async fn initialize(&self, online: bool) {
        if !online {
            tracing::info!("offline at startup - skipping remote fetch");
        }
        self.refresh(online).await;
    }

    /// One full orchestration pass. Offline (or credential-less) goes
    /// straight to the local calculation; otherwise the remote source is
    /// attempted and any classified failure falls back locally.
    pub async fn refresh(&self, online: bool) {
        let generation = self.renderer.next_generation();
        self.renderer.enter_loading();

        if !online {
            self.render_local(generation, None).await;
            return;
        }

        let Some(source) = &self.source else {
            tracing::warn!("no API credential configured - using local calculation");
            self.render_local(generation, None).await;
            return;
        };

        let today = Utc::now().date_naive();
        match source.fetch_phase(&self.config.location, today).await {
            Ok(remote) => {
                tracing::info!(
                    "remote phase: {} ({:.0}% illuminated)",
                    remote.sub_phase.label(),
                    remote.illumination
                );
                // The provider reports no boundary timing; the countdown
                // always comes from the local cycle position
                match compute_local_phase(Utc::now(), self.config.reference_new_moon) {
                    Ok(local) => {
                        let countdown = countdown_to_next(local.cycle_position);
                        self.renderer
                            .render_remote(
                                generation,
                                remote.phase,
                                self.config.language,
                                countdown,
                            )
                            .await;
                    }
                    Err(error) => {
                        tracing::error!("local calculation failed: {}", error);
                        self.renderer
                            .render_error(generation, &error.to_string())
                            .await;
                    }
                }
            }
            Err(error) => {
                tracing::warn!("remote fetch failed: {}", error);
                self.render_local(generation, Some(error)).await;
            }
        }
    }

    /// Immediate switch to the local calculation, used on connectivity
    /// loss. Does not wait for any in-flight request; the generation bump
    /// makes a late remote completion a no-op.
    pub async fn handle_offline(&self) {
        self.refresh(false).await;
    }

    /// Full remote re-attempt on connectivity restoration.
    pub async fn handle_online(&self) {
        self.refresh(true).await;
    }

    /// Drive the engine from a connectivity channel until it closes.
    pub async fn run(&self, mut connectivity: watch::Receiver<bool>) {
        let online = *connectivity.borrow();
        self.initialize(online).await;

        while connectivity.changed().await.is_ok() {
            let online = *connectivity.borrow();
            if online {
                tracing::info!("connectivity restored - refreshing from remote");
                self.handle_online().await;
            } else {
                tracing::info!("connectivity lost - switching to local calculation");
                self.handle_offline().await;
            }
        }
    }

    async fn render_local(&self, generation: u64, cause: Option<FetchError>) {
        match compute_local_phase(Utc::now(), self.config.reference_new_moon) {
            Ok(local) => {
                tracing::debug!(
                    "local phase: {} at cycle day {:.2} ({:.0}% illuminated)",
                    local.sub_phase.label(),
                    local.cycle_position,
                    local.illumination
                );
                let countdown = countdown_to_next(local.cycle_position);
                self.renderer
                    .render_fallback(
                        generation,
                        local.phase,
                        self.config.language,
                        countdown,
                        cause.as_ref(),
                    )
                    .await;
            }
            Err(error) => {
                tracing::error!("local calculation failed: {}", error);
                self.renderer
                    .render_error(generation, &error.to_string())
                    .await;
            }
        }
    }
}
