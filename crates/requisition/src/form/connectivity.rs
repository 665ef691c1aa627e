//! Passive online/offline tracking, independent of submissions.

use tokio::sync::watch;

pub const OFFLINE_MESSAGE: &str = "You are offline. Changes cannot be sent until the connection returns.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Publishes connectivity changes from the platform to any number of views.
pub struct ConnectivityMonitor {
    tx: watch::Sender<Connectivity>,
}

impl ConnectivityMonitor {
    pub fn new(initial: Connectivity) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Records a platform connectivity event. Repeated events are coalesced.
    pub fn report(&self, status: Connectivity) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }

    pub fn current(&self) -> Connectivity {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.tx.subscribe()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(Connectivity::Online)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_updates_current() {
        let monitor = ConnectivityMonitor::default();
        assert_eq!(monitor.current(), Connectivity::Online);
        monitor.report(Connectivity::Offline);
        assert_eq!(monitor.current(), Connectivity::Offline);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_once() {
        let monitor = ConnectivityMonitor::default();
        let mut rx = monitor.subscribe();

        monitor.report(Connectivity::Offline);
        monitor.report(Connectivity::Offline);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Connectivity::Offline);
        assert!(!rx.has_changed().unwrap());

        monitor.report(Connectivity::Online);
        assert!(rx.has_changed().unwrap());
    }
}
