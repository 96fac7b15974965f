//! 5x5 LED matrix animation.

use embedded_hal_async::delay::DelayNs;
use rainwatch_common::bus::Published;
use rainwatch_common::classify;
use rainwatch_common::matrix::{MatrixAnimator, Pattern};

use super::{Consumer, SeverityTracker};
use crate::hal::PixelStrip;

pub struct MatrixConsumer<S> {
    strip: S,
    animator: MatrixAnimator,
    tracker: SeverityTracker,
}

impl<S: PixelStrip> MatrixConsumer<S> {
    pub fn new(strip: S) -> Self {
        Self {
            strip,
            animator: MatrixAnimator::new(),
            tracker: SeverityTracker::default(),
        }
    }

    /// Pattern currently on the matrix.
    #[inline]
    pub const fn pattern(&self) -> Pattern { self.animator.current() }

    #[inline]
    pub fn strip(&self) -> &S { &self.strip }
}

impl<S: PixelStrip> Consumer for MatrixConsumer<S> {
    const NAME: &'static str = "matrix";

    async fn handle<D: DelayNs>(
        &mut self,
        published: Published,
        delay: &mut D,
    ) {
        let severity = classify(published.sample).combined;
        self.tracker.update(Self::NAME, severity);

        for step in self.animator.cycle(severity) {
            self.strip.write(&step.frame()).await;
            delay.delay_ms(step.dwell_ms).await;
        }
    }
}
