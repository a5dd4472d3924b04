//! # Arco - Real-time Bowed-String Synthesis
//!
//! A single bowed-string voice: bow excitation driving a modal string,
//! shaped by a tone filter and an instrument body, with vibrato, tremolo
//! and trill expressions that cross-fade through a hub-and-spoke state
//! machine.
//!
//! ## Architecture
//!
//! Arco is an umbrella crate that coordinates:
//! - **arco-core** - Config, parameters, smoothing, programs, lock-free control queue
//! - **arco-dsp** - Biquads, modal string bank, bow excitation, body, tone filter
//! - **arco-synth** - Expression processors, transition machine, per-sample voice
//!
//! ## Quick Start
//!
//! ```
//! use arco::prelude::*;
//!
//! let (mut engine, mut handle) = ArcoEngine::builder()
//!     .sample_rate(48000.0)
//!     .build()?;
//!
//! // Control side (any thread)
//! handle.set_parameter(ParamId::FundamentalFrequency, 196.0)?;
//! handle.set_expression(ExpressionKind::Vibrato)?;
//! handle.start_sounding()?;
//!
//! // Audio side
//! let mut block = [0.0f32; 128];
//! engine.process(&mut block);
//! # Ok::<(), arco::Error>(())
//! ```

/// Re-export of arco-core for direct access
pub use arco_core as core;

/// Re-export of arco-dsp for direct access
pub use arco_dsp as dsp;

/// Re-export of arco-synth for direct access
pub use arco_synth as synth;

pub use arco_core::{
    ControlMessage, EngineConfig, ExpressionKind, Granularity, ParamId, ParameterRange,
    ParameterScale, ParameterStore, Program, TransitionConfig, TransitionTiming,
};

pub use arco_dsp::{BodyPreset, BowState, StringMaterial};

pub use arco_synth::{ExpressionOutput, ExpressionState, TransitionPhase};

mod error;
pub use error::{Error, Result};

mod builder;
mod engine;

pub use builder::ArcoEngineBuilder;
pub use engine::{ArcoEngine, ArcoHandle};

/// Convenience prelude for common imports
pub mod prelude {
    // Engine
    pub use crate::{ArcoEngine, ArcoEngineBuilder, ArcoHandle};

    // Control surface
    pub use crate::{ExpressionKind, ParamId, Program, TransitionConfig};

    // Presets
    pub use crate::{BodyPreset, StringMaterial};

    // Inspection
    pub use crate::{ExpressionState, TransitionPhase};

    pub use crate::{Error, Result};
}
