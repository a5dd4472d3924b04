//! Transition state machine between playing styles.
//!
//! Expressions are switched hub-and-spoke: going from one playing style to
//! another always stops the current one (ramping it down to NONE) before the
//! new one starts. A stop can be deferred until the running processor reaches
//! a point where stopping sounds natural (a bow turn, the gap after the upper
//! trill note), bounded by [`WAIT_TIMEOUT_SECS`].
//!
//! ```text
//!            request(other)            can_stop / timeout
//!   IDLE ───────────────────▶ WAITING ───────────────────▶ STOPPING
//!    ▲  │                       │ request(current)            │
//!    │  │ from NONE             ▼                             │ reversal
//!    │  └──────────────────▶ STARTING ◀────────────────────────┘
//!    │                          │
//!    └────────── done ──────────┘     (STOPPING done → IDLE at NONE)
//! ```

use arco_core::{ExpressionKind, TransitionConfig};

/// Longest time a stop request waits for the processor's stop point.
pub const WAIT_TIMEOUT_SECS: f32 = 0.25;

const ENTRY_CURVE: f32 = 0.7;
const EXIT_CURVE: f32 = 0.5;
const RATE_CURVE: f32 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// Stop requested, waiting for the processor's stop point
    Waiting,
    Stopping,
    Starting,
}

/// Observable expression state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpressionState {
    /// Expression currently producing modulation
    pub current: ExpressionKind,
    /// Where the current ramp is heading
    pub target: ExpressionKind,
    /// Expression to start once the current one has stopped
    pub final_target: Option<ExpressionKind>,
    pub phase: TransitionPhase,
    /// 0-1 while stopping
    pub stop_progress: f32,
    /// 0-1 while starting
    pub start_progress: f32,
}

impl ExpressionState {
    /// Expression the machine will settle on if no further request arrives.
    pub fn destination(&self) -> ExpressionKind {
        self.final_target.unwrap_or(self.target)
    }
}

#[derive(Debug, Clone)]
pub struct TransitionMachine {
    state: ExpressionState,
    config: TransitionConfig,
    wait_elapsed: f32,
    sample_period: f32,
}

impl TransitionMachine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            state: ExpressionState::default(),
            config: TransitionConfig::default(),
            wait_elapsed: 0.0,
            sample_period: 1.0 / sample_rate,
        }
    }

    pub fn configure(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    pub fn state(&self) -> ExpressionState {
        self.state
    }

    #[inline]
    pub fn current(&self) -> ExpressionKind {
        self.state.current
    }

    /// Ask for `kind` to become the playing style.
    pub fn request(&mut self, kind: ExpressionKind) {
        let current = self.state.current;
        match self.state.phase {
            TransitionPhase::Idle => {
                if kind == current {
                    // Also drops a start still pending from a completed stop.
                    self.state.target = kind;
                    return;
                }
                if current.is_none() {
                    self.begin_start(kind);
                } else {
                    self.state.target = ExpressionKind::None;
                    self.state.final_target = Self::hop(kind);
                    self.state.phase = TransitionPhase::Waiting;
                    self.wait_elapsed = 0.0;
                }
            }
            TransitionPhase::Waiting => {
                if kind == current {
                    // Stop never began; keep playing.
                    self.state.target = current;
                    self.state.final_target = None;
                    self.state.phase = TransitionPhase::Idle;
                } else {
                    self.state.final_target = Self::hop(kind);
                }
            }
            TransitionPhase::Stopping => {
                if kind == current {
                    let depth = (1.0 - self.state.stop_progress).powf(EXIT_CURVE);
                    self.state.start_progress = depth.powf(1.0 / ENTRY_CURVE);
                    self.state.stop_progress = 0.0;
                    self.state.target = current;
                    self.state.final_target = None;
                    self.state.phase = TransitionPhase::Starting;
                } else {
                    self.state.final_target = Self::hop(kind);
                }
            }
            TransitionPhase::Starting => {
                if kind == current {
                    self.state.final_target = None;
                    return;
                }
                let depth = self.state.start_progress.powf(ENTRY_CURVE);
                self.state.stop_progress = 1.0 - depth.powf(1.0 / EXIT_CURVE);
                self.state.start_progress = 0.0;
                self.state.target = ExpressionKind::None;
                self.state.final_target = Self::hop(kind);
                self.state.phase = TransitionPhase::Stopping;
            }
        }
    }

    fn hop(kind: ExpressionKind) -> Option<ExpressionKind> {
        (!kind.is_none()).then_some(kind)
    }

    fn begin_start(&mut self, kind: ExpressionKind) {
        self.state.current = kind;
        self.state.target = kind;
        self.state.final_target = None;
        self.state.start_progress = 0.0;
        self.state.stop_progress = 0.0;
        self.state.phase = TransitionPhase::Starting;
    }

    /// Advance by one sample. `can_stop` is the current processor's stop policy.
    #[inline]
    pub fn tick(&mut self, can_stop: bool) {
        match self.state.phase {
            TransitionPhase::Idle => {
                // A stop just completed with a remembered target: `current`
                // has spent one sample at NONE, start the next expression.
                if self.state.current.is_none() && !self.state.target.is_none() {
                    self.begin_start(self.state.target);
                }
            }
            TransitionPhase::Waiting => {
                self.wait_elapsed += self.sample_period;
                if can_stop || self.wait_elapsed >= WAIT_TIMEOUT_SECS {
                    self.state.phase = TransitionPhase::Stopping;
                    self.state.stop_progress = 0.0;
                }
            }
            TransitionPhase::Stopping => {
                let secs = self.config.resolve(self.state.current).stop_secs;
                self.state.stop_progress += self.sample_period / secs;
                if self.state.stop_progress >= 1.0 {
                    self.state.current = ExpressionKind::None;
                    self.state.stop_progress = 0.0;
                    self.state.target = self.state.final_target.take().unwrap_or_default();
                    self.state.phase = TransitionPhase::Idle;
                }
            }
            TransitionPhase::Starting => {
                let secs = self.config.resolve(self.state.current).start_secs;
                self.state.start_progress += self.sample_period / secs;
                if self.state.start_progress >= 1.0 {
                    self.state.start_progress = 1.0;
                    self.state.phase = TransitionPhase::Idle;
                }
            }
        }
    }

    /// Overall presence of the current expression, 0-1.
    #[inline]
    pub fn progress(&self) -> f32 {
        match self.state.phase {
            TransitionPhase::Idle => {
                if self.state.current.is_none() {
                    0.0
                } else {
                    1.0
                }
            }
            TransitionPhase::Waiting => 1.0,
            TransitionPhase::Stopping => 1.0 - self.state.stop_progress,
            TransitionPhase::Starting => self.state.start_progress,
        }
    }

    /// Depth leads the rate on entry and lags it on exit.
    #[inline]
    pub fn depth_curve(&self) -> f32 {
        let progress = self.progress();
        match self.state.phase {
            TransitionPhase::Starting => progress.powf(ENTRY_CURVE),
            TransitionPhase::Stopping => progress.powf(EXIT_CURVE),
            _ => progress,
        }
    }

    #[inline]
    pub fn rate_factor(&self) -> f32 {
        self.progress().powf(RATE_CURVE)
    }
}
