// ============================================================================
// TIMERS - Espera asíncrona inyectable
// ============================================================================

use gloo_timers::future::TimeoutFuture;

/// Capacidad de espera; los tests la sustituyen por una que no duerme
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn sleep(&self, millis: u32);
}

/// Espera real sobre `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooDelay;

impl Delay for GlooDelay {
    async fn sleep(&self, millis: u32) {
        TimeoutFuture::new(millis).await;
    }
}
