//! Scan-and-rewrite orchestration and the host-facing hooks.
//!
//! All trigger paths (render completion, layout change, debounced scroll,
//! visibility notifications) converge on the same idempotent scan: find
//! unprocessed SVG elements and SVG data-URL images, recolor each exactly
//! once against a freshly resolved background, and mark it. The processed
//! marker is the only guard needed; execution is single-threaded and
//! cooperative.

use std::time::Instant;

use crate::dom::ElementHandle;
use crate::error::RecolorError;
use crate::models::RecolorConfig;
use crate::rewrite::{
    is_processed, is_svg_data_url, mark_processed, rewrite_data_url, rewrite_element,
};

use super::background::{resolve_background, BackgroundProbe};
use super::scheduler::{Registration, Scheduler, VisibilityEvent, VisibilityTracker};

/// The recoloring engine a host embeds: owns the scheduler, the background
/// probe and the list of known content containers.
pub struct RecolorPipeline<H, T, B> {
    config: RecolorConfig,
    scheduler: Scheduler<H, T>,
    probe: B,
    containers: Vec<H>,
    torn_down: bool,
}

impl<H, T, B> RecolorPipeline<H, T, B>
where
    H: ElementHandle,
    T: VisibilityTracker<H>,
    B: BackgroundProbe,
{
    /// `tracker = None` disables visibility gating: every discovered element
    /// is recolored synchronously during the scan.
    pub fn new(config: RecolorConfig, tracker: Option<T>, probe: B) -> Self {
        let scroll_quiet = std::time::Duration::from_millis(config.scroll_quiet_ms);
        Self {
            config,
            scheduler: Scheduler::new(tracker, scroll_quiet),
            probe,
            containers: Vec::new(),
            torn_down: false,
        }
    }

    pub fn config(&self) -> &RecolorConfig {
        &self.config
    }

    /// The host rendered new content into `container`: remember it and scan
    /// it for unprocessed candidates.
    pub fn on_render(&mut self, container: &H) {
        if self.torn_down {
            return;
        }
        if !self.containers.contains(container) {
            self.containers.push(container.clone());
        }
        self.scan(container);
    }

    /// The document layout changed: rescan every known container now.
    pub fn on_layout_change(&mut self) {
        if self.torn_down {
            return;
        }
        self.rescan_all();
    }

    /// Scroll activity: the rescan is trailing-edge debounced, so it runs
    /// from [`Self::tick`] once the quiet window elapses.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.scheduler.note_scroll(now);
    }

    /// Host-driven time signal; fires the pending debounced rescan.
    pub fn tick(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        if self.scheduler.scroll_due(now) {
            self.rescan_all();
        }
    }

    /// A visibility notification batch; entries are handled synchronously in
    /// delivery order.
    pub fn on_visibility(&mut self, events: &[VisibilityEvent<H>]) {
        if self.torn_down {
            return;
        }
        for event in events {
            if !event.intersecting || event.ratio < self.config.visibility_threshold {
                continue;
            }
            if is_processed(&event.element) {
                continue;
            }
            self.process(&event.element);
        }
    }

    /// The host is unloading: disconnect visibility tracking and cancel the
    /// pending debounce. Later hook calls are no-ops.
    pub fn teardown(&mut self) {
        self.scheduler.teardown();
        self.containers.clear();
        self.torn_down = true;
        tracing::info!("Recolor pipeline torn down");
    }

    fn rescan_all(&mut self) {
        let containers = self.containers.clone();
        for container in &containers {
            self.scan(container);
        }
    }

    fn scan(&mut self, container: &H) {
        let mut discovered = 0usize;
        let mut deferred = 0usize;

        for element in candidates(container) {
            if is_processed(&element) {
                continue;
            }
            discovered += 1;
            match self.scheduler.register(&element) {
                Registration::ProcessNow => self.process(&element),
                Registration::Observed => deferred += 1,
                Registration::AlreadyTracked => {}
            }
        }

        if discovered > 0 {
            tracing::debug!(discovered, deferred, "Scanned container for SVG candidates");
        }
    }

    fn process(&mut self, element: &H) {
        // The marker is checked before every rewrite attempt, including
        // redundant notifications.
        if is_processed(element) {
            return;
        }

        // Resolved fresh per element so a theme switch is picked up
        // immediately.
        let background = resolve_background(&self.probe, &self.config);

        if element.tag_name().eq_ignore_ascii_case("svg") {
            rewrite_element(element, &background);
            return;
        }

        let Some(src) = element.attr("src") else {
            return;
        };
        match rewrite_data_url(&src, &background) {
            Ok(rewritten) => {
                element.set_attr("src", &rewritten);
                mark_processed(element);
            }
            Err(e @ RecolorError::UnsupportedEncoding(_)) => {
                tracing::debug!(%e, "Skipping SVG image");
            }
            Err(e) => {
                // Left unmarked; the next scan pass may try again.
                tracing::warn!(%e, "Failed to recolor SVG data URL");
            }
        }
    }
}

/// Unprocessed-candidate selector: inline `svg` elements and `img` elements
/// backed by an SVG data URL.
fn candidates<H: ElementHandle>(container: &H) -> Vec<H> {
    container
        .descendants()
        .into_iter()
        .filter(|element| {
            let tag = element.tag_name();
            if tag.eq_ignore_ascii_case("svg") {
                return true;
            }
            tag.eq_ignore_ascii_case("img")
                && element
                    .attr("src")
                    .is_some_and(|src| is_svg_data_url(&src))
        })
        .collect()
}
