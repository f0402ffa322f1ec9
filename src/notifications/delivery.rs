// Delivery provider seam for outbound notifications
// The actual transport (SMTP, WhatsApp API) lives behind this trait

use axum::async_trait;

use crate::notifications::models::NotificationType;

/// Outbound delivery transport
///
/// Implementations perform exactly one delivery attempt and report failure
/// through the error string; retry policy belongs to the caller.
#[async_trait]
pub trait DeliveryProvider: Send + Sync {
    /// The subject is present for email and absent for phone channels.
    async fn deliver(
        &self,
        channel: NotificationType,
        recipient: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<(), String>;
}

/// Default provider: records the delivery in the log and reports success
///
/// Stands in for the real mail/WhatsApp integration in development and tests.
pub struct LogDeliveryProvider;

#[async_trait]
impl DeliveryProvider for LogDeliveryProvider {
    async fn deliver(
        &self,
        channel: NotificationType,
        recipient: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<(), String> {
        tracing::info!(
            "Delivering {} notification to {} (subject: {:?}, {} chars)",
            channel.as_str(),
            recipient,
            subject,
            message.len()
        );
        Ok(())
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;

    /// Provider that always fails, for exercising the failure path
    pub struct FailingProvider(pub String);

    #[async_trait]
    impl DeliveryProvider for FailingProvider {
        async fn deliver(
            &self,
            _channel: NotificationType,
            _recipient: &str,
            _subject: Option<&str>,
            _message: &str,
        ) -> Result<(), String> {
            Err(self.0.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_provider_always_succeeds() {
        let provider = LogDeliveryProvider;
        let result = provider
            .deliver(
                NotificationType::Email,
                "ana@example.com",
                Some("Repair update"),
                "Your bike is ready",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_provider_accepts_subjectless_channels() {
        let provider = LogDeliveryProvider;
        let result = provider
            .deliver(
                NotificationType::Whatsapp,
                "+34 612 345 678",
                None,
                "Your bike is ready",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failing_provider_reports_its_error() {
        let provider = test_support::FailingProvider("SMTP timeout".to_string());
        let result = provider
            .deliver(NotificationType::Email, "ana@example.com", None, "hi")
            .await;
        assert_eq!(result.unwrap_err(), "SMTP timeout");
    }
}
