pub mod telegram;

use async_trait::async_trait;

use crate::models::delivery::DeliveryResult;

pub use telegram::TelegramClient;

/// Delivers a rendered message to the shop owner.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> DeliveryResult;

    /// Whether everything needed to attempt a delivery is in place.
    fn is_configured(&self) -> bool;
}
