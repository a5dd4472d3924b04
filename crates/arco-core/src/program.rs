//! Expression vocabulary and performance programs.

use crate::ParamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shortest ramp a transition override may request.
pub const MIN_TRANSITION_SECS: f32 = 0.001;

/// Playing style layered on the sustained tone.
///
/// At most one non-`None` kind is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionKind {
    #[default]
    None,
    Vibrato,
    Tremolo,
    Trill,
}

impl ExpressionKind {
    /// The three playable kinds, in processor order.
    pub const PLAYABLE: [ExpressionKind; 3] = [
        ExpressionKind::Vibrato,
        ExpressionKind::Tremolo,
        ExpressionKind::Trill,
    ];

    #[inline]
    pub fn is_none(self) -> bool {
        self == ExpressionKind::None
    }

    /// Built-in ramp times for this kind.
    pub fn default_timing(self) -> TransitionTiming {
        match self {
            ExpressionKind::Vibrato => TransitionTiming::new(0.5, 0.35),
            ExpressionKind::Tremolo => TransitionTiming::new(0.15, 0.12),
            ExpressionKind::Trill => TransitionTiming::new(0.12, 0.1),
            // NONE never ramps itself; the neighbour's timing applies.
            ExpressionKind::None => TransitionTiming::new(0.1, 0.1),
        }
    }
}

/// Resolved ramp times, in seconds for a full 0→1 ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTiming {
    pub start_secs: f32,
    pub stop_secs: f32,
}

impl TransitionTiming {
    pub const fn new(start_secs: f32, stop_secs: f32) -> Self {
        Self {
            start_secs,
            stop_secs,
        }
    }
}

/// Optional overrides for the transition ramps.
///
/// `None` keeps the per-kind default. An override applies to every kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionConfig {
    pub start_secs: Option<f32>,
    pub stop_secs: Option<f32>,
}

impl TransitionConfig {
    pub fn new(start_secs: Option<f32>, stop_secs: Option<f32>) -> Self {
        Self {
            start_secs,
            stop_secs,
        }
    }

    /// Ramp times for `kind` with these overrides applied.
    ///
    /// Non-finite overrides fall back to the default; tiny or negative ones
    /// are raised to [`MIN_TRANSITION_SECS`].
    pub fn resolve(&self, kind: ExpressionKind) -> TransitionTiming {
        let defaults = kind.default_timing();
        TransitionTiming {
            start_secs: resolve_override(self.start_secs, defaults.start_secs),
            stop_secs: resolve_override(self.stop_secs, defaults.stop_secs),
        }
    }
}

fn resolve_override(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(secs) if secs.is_finite() => secs.max(MIN_TRANSITION_SECS),
        _ => default,
    }
}

/// A named set of parameter values plus an expression target.
///
/// This is what a control surface distributes to performers. Parameters
/// missing from the map keep their current value when the program loads.
///
/// ```
/// use arco_core::{ExpressionKind, ParamId, Program};
///
/// let program = Program::new("sul tasto")
///     .with_parameter(ParamId::BowPosition, 0.85)
///     .with_parameter(ParamId::Brightness, 0.2)
///     .with_expression(ExpressionKind::Vibrato);
///
/// assert_eq!(program.parameters.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    pub name: String,
    pub parameters: BTreeMap<ParamId, f32>,
    pub expression: ExpressionKind,
    pub transition: TransitionConfig,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, id: ParamId, value: f32) -> Self {
        self.parameters.insert(id, value);
        self
    }

    pub fn with_expression(mut self, expression: ExpressionKind) -> Self {
        self.expression = expression;
        self
    }

    pub fn with_transition(mut self, transition: TransitionConfig) -> Self {
        self.transition = transition;
        self
    }

    /// Number of control messages needed to apply this program.
    pub fn message_count(&self) -> usize {
        self.parameters.len() + 2
    }
}
