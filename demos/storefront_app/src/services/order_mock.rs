// demos/storefront_app/src/services/order_mock.rs
use anyhow::bail;
use async_trait::async_trait;
use std::time::Duration;
use tote::{OrderDraft, OrderGateway, OrderReceipt};
use tracing::{info, instrument};
use uuid::Uuid;

/// Stands in for the remote orders endpoint.
#[derive(Debug, Clone)]
pub struct MockOrderGateway {
  latency: Duration,
}

impl MockOrderGateway {
  pub fn new(latency_ms: u64) -> Self {
    Self {
      latency: Duration::from_millis(latency_ms),
    }
  }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
  #[instrument(skip_all, fields(reference = %draft.reference, total = draft.total_amount))]
  async fn submit_order(&self, draft: &OrderDraft) -> anyhow::Result<OrderReceipt> {
    info!(
      user_id = %draft.user_id,
      lines = draft.items.len(),
      created_at = %draft.created_at.to_rfc3339(),
      "Simulating order submission"
    );
    tokio::time::sleep(self.latency).await; // Simulate network latency

    // Arbitrary failure condition so the failure path can be exercised by hand
    if draft.shipping_address.contains("fail_test") {
      info!("Mock order service REJECTED order {}", draft.reference);
      bail!("Network response was not ok (503 Service Unavailable)");
    }

    let receipt = OrderReceipt {
      order_id: format!("mock_order_{}", Uuid::new_v4()),
      status: "pending".to_string(),
    };
    info!(order_id = %receipt.order_id, accepted_at = %chrono::Utc::now().to_rfc3339(), "Mock order service ACCEPTED order");
    Ok(receipt)
  }
}
