//! Bounded in-process analytics log.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ANALYTICS_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEventKind {
    SearchPerformed,
    CvSaved,
    MessageSent,
    InterviewRequested,
    ReportFiled,
    FeedbackSubmitted,
}

impl AnalyticsEventKind {
    pub const fn label(self) -> &'static str {
        match self {
            AnalyticsEventKind::SearchPerformed => "search_performed",
            AnalyticsEventKind::CvSaved => "cv_saved",
            AnalyticsEventKind::MessageSent => "message_sent",
            AnalyticsEventKind::InterviewRequested => "interview_requested",
            AnalyticsEventKind::ReportFiled => "report_filed",
            AnalyticsEventKind::FeedbackSubmitted => "feedback_submitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub kind: AnalyticsEventKind,
    pub actor_id: Option<String>,
    pub subject_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub metadata: BTreeMap<String, String>,
}

impl AnalyticsEvent {
    pub fn new(kind: AnalyticsEventKind, occurred_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            actor_id: None,
            subject_id: None,
            occurred_at,
            metadata: BTreeMap::new(),
        }
    }

    pub fn actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    pub fn subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }
}

/// Outbound hook for usage events.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}

/// Ring buffer keeping the newest `capacity` events.
#[derive(Debug)]
pub struct RingBufferAnalytics {
    capacity: usize,
    events: Mutex<VecDeque<AnalyticsEvent>>,
}

impl RingBufferAnalytics {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> Vec<AnalyticsEvent> {
        self.snapshot().into_iter().rev().take(limit).collect()
    }

    pub fn counts_by_kind(&self) -> BTreeMap<AnalyticsEventKind, usize> {
        let mut counts = BTreeMap::new();
        for event in self.snapshot() {
            *counts.entry(event.kind).or_insert(0) += 1;
        }
        counts
    }

    fn snapshot(&self) -> Vec<AnalyticsEvent> {
        let guard = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.iter().cloned().collect()
    }
}

impl Default for RingBufferAnalytics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ANALYTICS_CAPACITY)
    }
}

impl AnalyticsSink for RingBufferAnalytics {
    fn record(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AnalyticsError::Unavailable("analytics buffer poisoned".to_string()))?;
        if guard.len() == self.capacity {
            guard.pop_front();
        }
        guard.push_back(event);
        Ok(())
    }
}
