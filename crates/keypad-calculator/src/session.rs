//! Calculator session: the single owner of engine, timers and config
//!
//! Every adapter holds one session and talks to it through [`Action`]s.
//! The host loop calls [`CalculatorSession::tick`] so the error auto-clear
//! can fire.

use tracing::{info, warn};

use crate::config::CalculatorConfig;
use crate::core::{
    dispatch, Action, CalcError, CalcResult, CalculatorEngine, CalculatorState, Clock,
    ErrorRecovery, SystemClock,
};
use crate::display::{DisplayFormat, DisplaySnapshot};

/// Composition root for one calculator widget
#[derive(Debug)]
pub struct CalculatorSession<C: Clock = SystemClock> {
    engine: CalculatorEngine,
    recovery: ErrorRecovery,
    clock: C,
    config: CalculatorConfig,
    format: DisplayFormat,
    error: Option<CalcError>,
}

impl CalculatorSession<SystemClock> {
    /// Creates a session with default config on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a session with the given config on the system clock
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl Default for CalculatorSession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CalculatorSession<C> {
    /// Creates a session reading time from `clock`
    #[must_use]
    pub fn with_clock(config: CalculatorConfig, clock: C) -> Self {
        Self {
            engine: CalculatorEngine::with_precision(config.precision),
            recovery: ErrorRecovery::new(config.recovery_delay()),
            format: DisplayFormat::from(&config),
            clock,
            config,
            error: None,
        }
    }

    /// Handles one action
    ///
    /// A visible error indicator is dismissed first. A failed calculation
    /// shows the indicator and schedules the auto-clear.
    pub fn handle(&mut self, action: Action) -> CalcResult<Option<f64>> {
        self.error = None;
        let result = dispatch(&mut self.engine, action);
        if let Err(err) = result {
            let now = self.clock.now_ms();
            let deadline_ms = self.recovery.schedule(now, err);
            warn!(error = %err, deadline_ms, "showing error indicator");
            self.error = Some(err);
        }
        result
    }

    /// Handles a browser-style key name; returns `false` for unknown keys
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Action::from_key(key) {
            Some(action) => {
                let _ = self.handle(action);
                true
            }
            None => false,
        }
    }

    /// Fires the auto-clear once due; returns `true` if it did
    pub fn tick(&mut self) -> bool {
        let Some(err) = self.recovery.poll(self.clock.now_ms()) else {
            return false;
        };
        self.engine.clear();
        self.error = None;
        info!(error = %err, "recovered from error");
        true
    }

    /// What the display should show right now
    #[must_use]
    pub fn display(&self) -> DisplaySnapshot {
        match self.error {
            Some(err) => DisplaySnapshot::error(err, self.engine.operation()),
            None => self
                .format
                .snapshot(self.engine.state(), self.engine.preview_result()),
        }
    }

    /// Engine state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        self.engine.state()
    }

    /// The engine itself
    #[must_use]
    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Clock driving the timers
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current time on the session clock
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Error shown by the indicator, if any
    #[must_use]
    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    /// Whether the error indicator is showing
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Deadline of the pending auto-clear
    #[must_use]
    pub fn recovery_deadline_ms(&self) -> Option<u64> {
        self.recovery.deadline_ms()
    }

    /// JSON snapshot of the engine state
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn state_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.engine.state())
    }
}
