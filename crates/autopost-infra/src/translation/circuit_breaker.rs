//! Consecutive-failure circuit breaker guarding the translation backend.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub failure_threshold: u32,
    /// How long the circuit stays open before a trial call is let through.
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::from_secs(60),
        }
    }
}

struct Inner {
    state: CircuitState,
    failure_count: u32,
    opened_at: Option<Instant>,
    trial_started_at: Option<Instant>,
}

pub struct CircuitBreaker {
    inner: RwLock<Inner>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: CircuitState::Closed,
                failure_count: 0,
                opened_at: None,
                trial_started_at: None,
            }),
            config,
        }
    }

    /// Whether a call may go out now. An open circuit whose cooldown has
    /// elapsed moves to half-open and admits exactly one trial call. A trial
    /// that never reports back is replaced after another cooldown.
    pub async fn try_acquire(&self) -> bool {
        if self.inner.read().await.state == CircuitState::Closed {
            return true;
        }

        let cooldown = self.config.cooldown;
        let mut inner = self.inner.write().await;
        let state = inner.state;
        match state {
            CircuitState::Closed => true,
            CircuitState::Open if inner.opened_at.is_some_and(|at| at.elapsed() < cooldown) => {
                false
            }
            CircuitState::Open => {
                inner.state = CircuitState::HalfOpen;
                inner.trial_started_at = Some(Instant::now());
                tracing::info!("Translation circuit half-open, sending trial request");
                true
            }
            CircuitState::HalfOpen
                if inner
                    .trial_started_at
                    .is_some_and(|at| at.elapsed() < cooldown) =>
            {
                false
            }
            CircuitState::HalfOpen => {
                inner.trial_started_at = Some(Instant::now());
                tracing::warn!("Translation trial request never completed, admitting another");
                true
            }
        }
    }

    pub async fn on_success(&self) {
        let mut inner = self.inner.write().await;
        if inner.state != CircuitState::Closed {
            tracing::info!("Translation circuit closed");
        }
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.opened_at = None;
        inner.trial_started_at = None;
    }

    pub async fn on_failure(&self) {
        let mut inner = self.inner.write().await;
        match inner.state {
            CircuitState::Closed => {
                inner.failure_count += 1;
                if inner.failure_count >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    tracing::warn!(
                        failures = inner.failure_count,
                        cooldown_secs = self.config.cooldown.as_secs(),
                        "Translation circuit opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                inner.trial_started_at = None;
                tracing::warn!("Translation circuit reopened after failed trial");
            }
            CircuitState::Open => {}
        }
    }

    pub async fn state(&self) -> CircuitState {
        self.inner.read().await.state
    }
}
