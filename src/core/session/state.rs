use std::time::{Duration, SystemTime};

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Constructed, nothing touched yet
    Idle,
    /// Opening the device
    Opening,
    /// Applying line settings
    Configuring,
    /// Reader and/or writer running
    Active,
    /// Ordered teardown in progress
    ShuttingDown,
    /// Teardown finished
    Terminated,
}

/// Observable lifecycle steps, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    PortOpened,
    LineConfigured,
    ReaderStarted,
    Transmitted { transmissions: u64, bytes: u64 },
    ReaderCancelled,
    ReaderJoined,
    PortClosed,
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatistics {
    /// Total bytes accepted by the device
    pub bytes_sent: u64,
    /// Total bytes echoed by the reader
    pub bytes_received: u64,
    /// Number of write calls
    pub transmissions: u64,
}

/// Session state information
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Current status
    pub status: SessionStatus,
    /// Creation timestamp
    pub created_at: SystemTime,
    /// Session statistics
    pub statistics: SessionStatistics,
    events: Vec<LifecycleEvent>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            created_at: SystemTime::now(),
            statistics: SessionStatistics::default(),
            events: Vec::new(),
        }
    }

    /// Update session status
    pub fn update_status(&mut self, status: SessionStatus) {
        tracing::debug!("Session {:?} -> {:?}", self.status, status);
        self.status = status;
    }

    pub fn record(&mut self, event: LifecycleEvent) {
        if let LifecycleEvent::Transmitted { transmissions, bytes } = event {
            self.statistics.transmissions += transmissions;
            self.statistics.bytes_sent += bytes;
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Events recorded once shutdown started
    pub fn shutdown_events(&self) -> Vec<LifecycleEvent> {
        self.events
            .iter()
            .copied()
            .filter(|event| {
                matches!(
                    event,
                    LifecycleEvent::ReaderCancelled
                        | LifecycleEvent::ReaderJoined
                        | LifecycleEvent::PortClosed
                )
            })
            .collect()
    }

    /// Get session uptime
    pub fn get_uptime(&self) -> Duration {
        SystemTime::now()
            .duration_since(self.created_at)
            .unwrap_or_default()
    }

    pub fn is_terminated(&self) -> bool {
        self.status == SessionStatus::Terminated
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(state.events().is_empty());
        assert!(!state.is_terminated());
    }

    #[test]
    fn test_transmissions_update_statistics() {
        let mut state = SessionState::new();
        state.record(LifecycleEvent::PortOpened);
        state.record(LifecycleEvent::Transmitted { transmissions: 3, bytes: 3 });
        state.record(LifecycleEvent::Transmitted { transmissions: 1, bytes: 2 });

        assert_eq!(state.statistics.transmissions, 4);
        assert_eq!(state.statistics.bytes_sent, 5);
        assert_eq!(state.events().len(), 3);
    }

    #[test]
    fn test_shutdown_events_filter() {
        let mut state = SessionState::new();
        state.record(LifecycleEvent::PortOpened);
        state.record(LifecycleEvent::ReaderStarted);
        state.record(LifecycleEvent::ReaderCancelled);
        state.record(LifecycleEvent::ReaderJoined);
        state.record(LifecycleEvent::PortClosed);

        assert_eq!(
            state.shutdown_events(),
            vec![
                LifecycleEvent::ReaderCancelled,
                LifecycleEvent::ReaderJoined,
                LifecycleEvent::PortClosed,
            ]
        );
    }
}
