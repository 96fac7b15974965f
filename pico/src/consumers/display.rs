//! OLED bar-graph display with timed alert overlays.
//!
//! Per sample: draw the bars and flush. If an overlay applies, hold the bars
//! for [`OVERLAY_LEAD_MS`], then draw and flush the overlay and hold it for
//! [`OVERLAY_DWELL_MS`]. The next sample redraws the bars.

use embedded_hal_async::delay::DelayNs;
use rainwatch_common::bus::Published;
use rainwatch_common::render::{
    AlertOverlay,
    DashboardView,
    OVERLAY_DWELL_MS,
    OVERLAY_LEAD_MS,
    draw_alert_overlay,
    draw_dashboard,
};

use super::Consumer;
use crate::hal::Panel;

pub struct DisplayConsumer<P> {
    panel: P,
    overlay: Option<AlertOverlay>,
}

impl<P: Panel> DisplayConsumer<P> {
    pub fn new(panel: P) -> Self { Self { panel, overlay: None } }

    /// Draw one sample, including any overlay and its dwell.
    pub async fn show<D: DelayNs>(
        &mut self,
        view: &DashboardView,
        delay: &mut D,
    ) {
        draw_dashboard(&mut self.panel, view);
        self.panel.flush().await;

        if view.overlay != self.overlay {
            match view.overlay {
                Some(overlay) => log_info!("display: {} overlay", overlay.label()),
                None => log_info!("display: overlay cleared"),
            }
            self.overlay = view.overlay;
        }

        if let Some(overlay) = view.overlay {
            delay.delay_ms(OVERLAY_LEAD_MS).await;
            draw_alert_overlay(&mut self.panel, overlay);
            self.panel.flush().await;
            delay.delay_ms(OVERLAY_DWELL_MS).await;
        }
    }

    /// Overlay shown for the most recent sample.
    #[inline]
    pub const fn overlay(&self) -> Option<AlertOverlay> { self.overlay }

    #[inline]
    pub fn panel(&self) -> &P { &self.panel }
}

impl<P: Panel> Consumer for DisplayConsumer<P> {
    const NAME: &'static str = "display";

    async fn handle<D: DelayNs>(
        &mut self,
        published: Published,
        delay: &mut D,
    ) {
        let view = DashboardView::from_sample(published.sample);
        self.show(&view, delay).await;
    }
}
