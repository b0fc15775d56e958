use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub connections_opened: u64,
    pub connections_active: u64,
    pub messages_total: u64,
    pub errors_total: u64,
    pub intent_usage: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn connection_opened(&self) {
        let mut data = self.inner.write().await;
        data.connections_opened += 1;
        data.connections_active += 1;
    }

    pub async fn connection_closed(&self) {
        let mut data = self.inner.write().await;
        data.connections_active = data.connections_active.saturating_sub(1);
    }

    pub async fn increment_intent(&self, intent: &str) {
        let mut data = self.inner.write().await;
        data.messages_total += 1;
        *data.intent_usage.entry(intent.to_string()).or_insert(0) += 1;
    }

    pub async fn increment_errors(&self) {
        self.inner.write().await.errors_total += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
