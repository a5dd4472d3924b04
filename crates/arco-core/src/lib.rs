//! Core types for the Arco bowed-string engine.
//!
//! # Primary API
//!
//! - [`EngineConfig`]: fixed engine configuration
//! - [`ParamId`] / [`ParameterStore`]: the performance parameter surface
//! - [`Program`]: a named parameter set plus expression target
//! - [`control_channel`]: bounded lock-free queue into the audio thread
//! - [`LinearGlide`], [`ExponentialSmoother`]: per-sample smoothing

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{EngineConfig, MAX_BLOCK_SIZE, MAX_MODES};

pub mod parameter;
pub use parameter::{Granularity, ParamId, ParameterRange, ParameterScale, ParameterStore};

pub mod smooth;
pub use smooth::{one_pole_coefficient, slew, ExponentialSmoother, LinearGlide};

pub mod program;
pub use program::{ExpressionKind, Program, TransitionConfig, TransitionTiming};

pub mod control;
pub use control::{control_channel, ControlConsumer, ControlMessage, ControlProducer};
