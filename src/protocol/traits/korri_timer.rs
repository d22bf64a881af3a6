//! Asynchronous timer abstraction providing the delays required by the
//! session's bounded waits and inter-command spacing.

/// Source of cooperative delays. Each call yields to the executor for
/// the requested duration; the session owns its timer exclusively.
pub trait KorriTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + 'a;
}

/// Ready-made timer backed by `embassy-time`, for firmware running on an
/// Embassy executor. Enabled with the `embassy` cargo feature.
#[cfg(feature = "embassy")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

#[cfg(feature = "embassy")]
impl KorriTimer for EmbassyTimer {
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + 'a {
        embassy_time::Timer::after_millis(u64::from(millis))
    }
}
