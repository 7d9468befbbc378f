//! Sliding-window counters guarding user-initiated actions.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitedAction {
    SendMessage,
    RequestInterview,
    FileReport,
    SubmitFeedback,
    Search,
}

impl RateLimitedAction {
    pub const fn label(self) -> &'static str {
        match self {
            RateLimitedAction::SendMessage => "send_message",
            RateLimitedAction::RequestInterview => "request_interview",
            RateLimitedAction::FileReport => "file_report",
            RateLimitedAction::SubmitFeedback => "submit_feedback",
            RateLimitedAction::Search => "search",
        }
    }
}

/// At most `max_attempts` within any trailing `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub max_attempts: u32,
    pub window: Duration,
}

impl RateLimitRule {
    pub const fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
        }
    }
}

/// Rule table keyed by action. Actions without a rule are unlimited.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    rules: HashMap<RateLimitedAction, RateLimitRule>,
}

impl RateLimitPolicy {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, action: RateLimitedAction, rule: RateLimitRule) -> Self {
        self.rules.insert(action, rule);
        self
    }

    pub fn rule(&self, action: RateLimitedAction) -> Option<RateLimitRule> {
        self.rules.get(&action).copied()
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::empty()
            .with_rule(
                RateLimitedAction::SendMessage,
                RateLimitRule::new(30, Duration::hours(1)),
            )
            .with_rule(
                RateLimitedAction::RequestInterview,
                RateLimitRule::new(10, Duration::days(1)),
            )
            .with_rule(
                RateLimitedAction::FileReport,
                RateLimitRule::new(5, Duration::days(1)),
            )
            .with_rule(
                RateLimitedAction::SubmitFeedback,
                RateLimitRule::new(5, Duration::hours(1)),
            )
            .with_rule(
                RateLimitedAction::Search,
                RateLimitRule::new(60, Duration::minutes(1)),
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Attempts left in the current window after this one.
    pub remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<i64>,
}

impl RateLimitDecision {
    fn unlimited() -> Self {
        Self {
            allowed: true,
            remaining: u32::MAX,
            retry_after_seconds: None,
        }
    }
}

/// Decide whether one more attempt fits, given earlier attempts in ascending time order.
pub fn evaluate_window(
    history: &[DateTime<Utc>],
    rule: RateLimitRule,
    now: DateTime<Utc>,
) -> RateLimitDecision {
    let window_start = now - rule.window;
    let in_window: Vec<&DateTime<Utc>> = history
        .iter()
        .filter(|attempt| **attempt > window_start)
        .collect();
    let used = u32::try_from(in_window.len()).unwrap_or(u32::MAX);

    if used < rule.max_attempts {
        return RateLimitDecision {
            allowed: true,
            remaining: rule.max_attempts - used - 1,
            retry_after_seconds: None,
        };
    }

    // The window frees a slot once the oldest counted attempt ages out.
    let retry_after_seconds = in_window
        .first()
        .map(|oldest| (**oldest + rule.window - now).num_seconds().max(1))
        .unwrap_or_else(|| rule.window.num_seconds().max(1));

    RateLimitDecision {
        allowed: false,
        remaining: 0,
        retry_after_seconds: Some(retry_after_seconds),
    }
}

type AttemptHistory = HashMap<(String, RateLimitedAction), VecDeque<DateTime<Utc>>>;

/// Process-local limiter keyed by (user, action).
#[derive(Debug, Default)]
pub struct RateLimiter {
    policy: RateLimitPolicy,
    history: Mutex<AttemptHistory>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            history: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Evaluate an attempt and count it if allowed. Rejected attempts are not recorded.
    pub fn check_and_record(
        &self,
        user_id: &str,
        action: RateLimitedAction,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let Some(rule) = self.policy.rule(action) else {
            return RateLimitDecision::unlimited();
        };

        let mut guard = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.forget_idle(&mut guard, now);
        let key = (user_id.to_string(), action);
        let attempts = guard.entry(key.clone()).or_default();

        let window_start = now - rule.window;
        while attempts.front().is_some_and(|attempt| *attempt <= window_start) {
            attempts.pop_front();
        }

        let decision = evaluate_window(attempts.make_contiguous(), rule, now);
        if decision.allowed {
            attempts.push_back(now);
        } else {
            warn!(
                user_id,
                action = action.label(),
                retry_after_seconds = decision.retry_after_seconds,
                "rate limit exceeded"
            );
            if attempts.is_empty() {
                guard.remove(&key);
            }
        }
        decision
    }

    /// Drop (user, action) keys whose newest attempt has left its window.
    fn forget_idle(&self, history: &mut AttemptHistory, now: DateTime<Utc>) {
        history.retain(|(_, action), attempts| {
            match (attempts.back(), self.policy.rule(*action)) {
                (Some(latest), Some(rule)) => *latest > now - rule.window,
                _ => false,
            }
        });
    }
}
