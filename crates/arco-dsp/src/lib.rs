//! DSP stages of the Arco bowed-string engine.
//!
//! Signal path per sample: [`BowExcitationGenerator`] →
//! [`ModalStringResonatorBank`] → [`ToneFilter`] → [`BodyResonatorBank`].
//! Every stage is allocation-free after construction and has no dynamic
//! dispatch; coefficients are only recomputed when their inputs change.

pub mod biquad;
pub use biquad::{BiquadCoefficients, BiquadState};

pub mod cache;
pub use cache::CoefficientCache;

pub mod string_bank;
pub use string_bank::{Mode, ModalStringResonatorBank, StringMaterial, StringSettings};

pub mod bow;
pub use bow::{BowExcitationGenerator, BowState};

pub mod body;
pub use body::{BodyMode, BodyPreset, BodyResonatorBank, BODY_OUTPUT_GAIN, NUM_BODY_MODES};

pub mod tone;
pub use tone::{ToneControls, ToneFilter};

pub mod noise;
pub use noise::NoiseSource;

pub mod util;
pub use util::{soft_clip, soft_limit};
