// Notification dispatch logic
// Every attempt leaves a Notification row regardless of delivery outcome

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;

use crate::customers::models::Customer;
use crate::error::ApiError;
use crate::notifications::delivery::DeliveryProvider;
use crate::notifications::models::{
    EmailNotificationRequest, Notification, NotificationListParams, NotificationStatus,
    NotificationType, WhatsAppNotificationRequest,
};
use crate::query::{pagination_or, Paginated, SqlQueryBuilder};

/// Service that records and dispatches customer notifications
#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    provider: Arc<dyn DeliveryProvider>,
}

impl NotificationService {
    pub fn new(pool: PgPool, provider: Arc<dyn DeliveryProvider>) -> Self {
        Self { pool, provider }
    }

    /// Send an email notification to a customer
    ///
    /// The customer must have an email address on file.
    pub async fn send_email(
        &self,
        request: EmailNotificationRequest,
    ) -> Result<Notification, ApiError> {
        let customer = self.load_customer(request.customer_id).await?;
        let email = customer.email.clone().ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Customer {} has no email address on file",
                customer.id
            ))
        })?;

        if let Some(order_id) = request.repair_order_id {
            self.check_order(order_id).await?;
        }

        self.dispatch(
            NotificationType::Email,
            &customer,
            request.repair_order_id,
            &email,
            Some(&request.subject),
            &request.message,
        )
        .await
    }

    /// Send a WhatsApp notification to a customer's phone
    pub async fn send_whatsapp(
        &self,
        request: WhatsAppNotificationRequest,
    ) -> Result<Notification, ApiError> {
        let customer = self.load_customer(request.customer_id).await?;
        let phone = customer.phone.clone();

        if let Some(order_id) = request.repair_order_id {
            self.check_order(order_id).await?;
        }

        self.dispatch(
            NotificationType::Whatsapp,
            &customer,
            request.repair_order_id,
            &phone,
            None,
            &request.message,
        )
        .await
    }

    /// List notifications, newest first
    pub async fn list(
        &self,
        params: NotificationListParams,
    ) -> Result<Paginated<Notification>, ApiError> {
        let (limit, offset) = pagination_or(params.limit, params.offset, 10);

        let mut builder = SqlQueryBuilder::new("notifications");
        if let Some(customer_id) = params.customer_id {
            builder.add_eq_int("customer_id", customer_id);
        }
        if let Some(notification_type) = params.notification_type {
            builder.add_eq_text("notification_type", notification_type.as_str());
        }
        if let Some(status) = params.status {
            builder.add_eq_text("status", status.as_str());
        }
        builder.set_order("created_at DESC");
        builder.set_pagination(limit, offset);

        let (count_sql, count_params) = builder.build_count();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for param in &count_params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let (sql, query_params) = builder.build();
        let mut query = sqlx::query_as::<_, Notification>(&sql);
        for param in &query_params {
            query = query.bind(param);
        }
        let items = query.fetch_all(&self.pool).await?;

        Ok(Paginated {
            total,
            items,
            limit,
            offset,
        })
    }

    /// Record the notification, attempt delivery once, persist the outcome
    ///
    /// The stored row carries the message alone; the subject only travels to
    /// the transport. The pending row is committed before the delivery
    /// attempt so a crash or provider failure still leaves an audit trail.
    async fn dispatch(
        &self,
        channel: NotificationType,
        customer: &Customer,
        repair_order_id: Option<i32>,
        recipient: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<Notification, ApiError> {
        let pending = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (customer_id, repair_order_id, notification_type, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(customer.id)
        .bind(repair_order_id)
        .bind(channel)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        match self
            .provider
            .deliver(channel, recipient, subject, message)
            .await
        {
            Ok(()) => {
                let sent = sqlx::query_as::<_, Notification>(
                    r#"
                    UPDATE notifications
                    SET status = 'sent', sent_at = $1, updated_at = NOW()
                    WHERE id = $2
                    RETURNING *
                    "#,
                )
                .bind(Utc::now())
                .bind(pending.id)
                .fetch_one(&self.pool)
                .await?;

                if let Some(order_id) = repair_order_id {
                    sqlx::query(
                        "UPDATE repair_orders SET customer_notified = TRUE, updated_at = NOW() \
                         WHERE id = $1",
                    )
                    .bind(order_id)
                    .execute(&self.pool)
                    .await?;
                }

                tracing::info!(
                    "Sent {} notification {} to customer {}",
                    channel.as_str(),
                    sent.id,
                    customer.id
                );
                Ok(sent)
            }
            Err(provider_error) => {
                sqlx::query(
                    r#"
                    UPDATE notifications
                    SET status = 'failed', error_message = $1, updated_at = NOW()
                    WHERE id = $2
                    "#,
                )
                .bind(&provider_error)
                .bind(pending.id)
                .execute(&self.pool)
                .await?;

                tracing::warn!(
                    "Delivery of notification {} failed: {}",
                    pending.id,
                    provider_error
                );
                Err(ApiError::InternalError(format!(
                    "Notification delivery failed: {}",
                    provider_error
                )))
            }
        }
    }

    async fn load_customer(&self, customer_id: i32) -> Result<Customer, ApiError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("Customer", customer_id))
    }

    async fn check_order(&self, order_id: i32) -> Result<(), ApiError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM repair_orders WHERE id = $1)")
                .bind(order_id)
                .fetch_one(&self.pool)
                .await?;
        if exists.unwrap_or(false) {
            Ok(())
        } else {
            Err(ApiError::not_found("Repair order", order_id))
        }
    }
}
