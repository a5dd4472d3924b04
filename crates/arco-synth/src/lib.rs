//! Bowed-string voice for Arco.
//!
//! - **[`Engine`]** - per-sample composition of bow, string, tone and body
//! - **[`ExpressionEngine`]** - vibrato, tremolo and trill with smooth
//!   hub-and-spoke transitions
//!
//! # Quick Start
//!
//! ```
//! use arco_core::{EngineConfig, ExpressionKind, ParamId};
//! use arco_synth::Engine;
//!
//! let mut engine = Engine::new(&EngineConfig::default())?;
//! engine.set_parameter(ParamId::FundamentalFrequency, 196.0);
//! engine.set_expression(ExpressionKind::Vibrato);
//! engine.start_sounding();
//!
//! let mut block = [0.0f32; 128];
//! engine.process_block(&mut block);
//! # Ok::<(), arco_core::Error>(())
//! ```

pub mod engine;
pub use engine::{Engine, FUNDAMENTAL_GLIDE_SECS};

pub mod expression;
pub use expression::{
    ExpressionEngine, ExpressionOutput, ExpressionParams, ExpressionState, TransitionMachine,
    TransitionPhase,
};
