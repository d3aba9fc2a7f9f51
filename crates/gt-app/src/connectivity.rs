//! Online/offline indicator.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use gt_core::{NodeStatus, Subscribers, Subscription};

/// Tracks [`NodeStatus`] and notifies subscribers when it flips.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    status: Arc<RwLock<NodeStatus>>,
    subscribers: Subscribers<NodeStatus>,
}

impl std::fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityMonitor")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(NodeStatus::Online)
    }
}

impl ConnectivityMonitor {
    #[must_use]
    pub fn new(initial: NodeStatus) -> Self {
        Self {
            status: Arc::new(RwLock::new(initial)),
            subscribers: Subscribers::new(),
        }
    }

    #[must_use]
    pub fn status(&self) -> NodeStatus {
        *self.status.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Watch for status changes until the guard drops.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&NodeStatus) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Record `status`; subscribers hear about it only if it changed.
    pub fn set(&self, status: NodeStatus) {
        let changed = {
            let mut current = self.status.write().unwrap_or_else(PoisonError::into_inner);
            let changed = *current != status;
            *current = status;
            changed
        };
        if changed {
            tracing::debug!(%status, "connectivity changed");
            self.subscribers.notify(&status);
        }
    }

    /// Probe `url` once and record the result. Any HTTP response counts as
    /// online; a transport failure counts as offline.
    pub async fn probe(&self, client: &reqwest::Client, url: &str, timeout: Duration) -> NodeStatus {
        let status = match client.head(url).timeout(timeout).send().await {
            Ok(_) => NodeStatus::Online,
            Err(error) => {
                tracing::debug!(%error, url, "connectivity probe failed");
                NodeStatus::Offline
            }
        };
        self.set(status);
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn notifies_only_on_change() {
        let monitor = ConnectivityMonitor::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = monitor.on_change(move |s| sink.lock().unwrap().push(*s));

        monitor.set(NodeStatus::Online);
        monitor.set(NodeStatus::Offline);
        monitor.set(NodeStatus::Offline);
        monitor.set(NodeStatus::Online);

        assert_eq!(*seen.lock().unwrap(), vec![NodeStatus::Offline, NodeStatus::Online]);
    }

    #[test]
    fn subscription_is_scoped() {
        let monitor = ConnectivityMonitor::default();
        {
            let _sub = monitor.on_change(|_| {});
            assert_eq!(monitor.subscribers.len(), 1);
        }
        assert!(monitor.subscribers.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_offline() {
        let monitor = ConnectivityMonitor::default();
        let client = reqwest::Client::new();
        let status = monitor
            .probe(&client, "http://127.0.0.1:9", Duration::from_millis(500))
            .await;
        assert_eq!(status, NodeStatus::Offline);
        assert_eq!(monitor.status(), NodeStatus::Offline);
    }
}
