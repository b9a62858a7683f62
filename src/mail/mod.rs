pub mod confirmation;
mod resend;

pub use resend::ResendMailer;

use async_trait::async_trait;

use crate::error::Result;

/// A fully assembled outbound message.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Provider acknowledgement for a dispatched message.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub id: String,
}

/// Remote mail capability. Implementations dispatch a rendered HTML
/// document to a single recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt>;
}
