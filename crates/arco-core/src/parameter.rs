//! Parameter surface of the bowed-string engine.
//!
//! Every performance control has a [`ParamId`], a declared [`ParameterRange`]
//! and a [`Granularity`]. Values coming from the control side are clamped to
//! the declared range before they are applied; they are never rejected.
//!
//! # Example
//!
//! ```
//! use arco_core::{ParamId, ParameterStore};
//!
//! let mut params = ParameterStore::default();
//! assert_eq!(params.set(ParamId::BowForce, 1.7), 1.0);
//! assert_eq!(params.set(ParamId::StringMaterial, 2.6), 3.0);
//! ```

use serde::{Deserialize, Serialize};

/// How a parameter value is bounded and quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterScale {
    /// Continuous value between `min` and `max`
    #[default]
    Linear,

    /// Discrete integer steps between `min` and `max`
    Integer,

    /// On/off flag (values >= midpoint are on)
    ///
    /// Resolves to `min` (off) or `max` (on).
    Toggle,
}

/// How often the engine looks at a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Glided sample by sample inside a block
    PerSample,
    /// Read once at each block boundary
    PerBlock,
    /// Not read as a value at all: interpreted as an expression-target request
    TransitionTarget,
}

/// Declared range of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
    /// Quantization
    pub scale: ParameterScale,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        Self {
            min,
            max,
            default,
            scale,
        }
    }

    pub const fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub const fn integer(min: i32, max: i32, default: i32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Integer,
        )
    }

    pub const fn toggle(default_on: bool) -> Self {
        Self::new(
            0.0,
            1.0,
            if default_on { 1.0 } else { 0.0 },
            ParameterScale::Toggle,
        )
    }

    /// Bound a raw value to this range.
    ///
    /// Infinities clamp to the nearest end, NaN resolves to the default.
    /// Integer parameters round to the nearest step, toggles snap to 0 or 1.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = value.clamp(self.min, self.max);
        match self.scale {
            ParameterScale::Linear => value,
            ParameterScale::Integer => value.round(),
            ParameterScale::Toggle => {
                if value >= (self.min + self.max) * 0.5 {
                    self.max
                } else {
                    self.min
                }
            }
        }
    }

    /// Check if a real value is within range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Get the range span (max - min).
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Identifier for every engine parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamId {
    FundamentalFrequency,
    BowForce,
    BowPosition,
    BowSpeed,
    StringDamping,
    Brightness,
    StringMaterial,
    BodyType,
    BodyResonance,
    MasterGain,
    VibratoRate,
    VibratoDepth,
    TremoloSpeed,
    TremoloDepth,
    TremoloArticulation,
    TrillInterval,
    TrillSpeed,
    TrillArticulation,
    VibratoEnabled,
    TremoloEnabled,
    TrillEnabled,
}

impl ParamId {
    /// Number of parameters.
    pub const COUNT: usize = 21;

    /// Every parameter, in storage order.
    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::FundamentalFrequency,
        ParamId::BowForce,
        ParamId::BowPosition,
        ParamId::BowSpeed,
        ParamId::StringDamping,
        ParamId::Brightness,
        ParamId::StringMaterial,
        ParamId::BodyType,
        ParamId::BodyResonance,
        ParamId::MasterGain,
        ParamId::VibratoRate,
        ParamId::VibratoDepth,
        ParamId::TremoloSpeed,
        ParamId::TremoloDepth,
        ParamId::TremoloArticulation,
        ParamId::TrillInterval,
        ParamId::TrillSpeed,
        ParamId::TrillArticulation,
        ParamId::VibratoEnabled,
        ParamId::TremoloEnabled,
        ParamId::TrillEnabled,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn range(self) -> ParameterRange {
        match self {
            ParamId::FundamentalFrequency => ParameterRange::linear(20.0, 4000.0, 220.0),
            ParamId::BowForce => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::BowPosition => ParameterRange::linear(0.0, 1.0, 0.3),
            ParamId::BowSpeed => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::StringDamping => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::Brightness => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::StringMaterial => ParameterRange::integer(0, 4, 0),
            ParamId::BodyType => ParameterRange::integer(0, 4, 0),
            ParamId::BodyResonance => ParameterRange::linear(0.0, 1.0, 0.4),
            ParamId::MasterGain => ParameterRange::linear(0.0, 1.0, 0.7),
            ParamId::VibratoRate => ParameterRange::linear(0.5, 12.0, 5.5),
            ParamId::VibratoDepth => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::TremoloSpeed => ParameterRange::linear(2.0, 20.0, 8.0),
            ParamId::TremoloDepth => ParameterRange::linear(0.0, 1.0, 0.7),
            ParamId::TremoloArticulation => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::TrillInterval => ParameterRange::integer(1, 12, 2),
            ParamId::TrillSpeed => ParameterRange::linear(1.0, 12.0, 5.0),
            ParamId::TrillArticulation => ParameterRange::linear(0.0, 1.0, 0.5),
            ParamId::VibratoEnabled | ParamId::TremoloEnabled | ParamId::TrillEnabled => {
                ParameterRange::toggle(false)
            }
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            ParamId::FundamentalFrequency => Granularity::PerSample,
            ParamId::VibratoEnabled | ParamId::TremoloEnabled | ParamId::TrillEnabled => {
                Granularity::TransitionTarget
            }
            _ => Granularity::PerBlock,
        }
    }

    /// Name as it appears in serialized programs.
    pub fn name(self) -> &'static str {
        match self {
            ParamId::FundamentalFrequency => "fundamentalFrequency",
            ParamId::BowForce => "bowForce",
            ParamId::BowPosition => "bowPosition",
            ParamId::BowSpeed => "bowSpeed",
            ParamId::StringDamping => "stringDamping",
            ParamId::Brightness => "brightness",
            ParamId::StringMaterial => "stringMaterial",
            ParamId::BodyType => "bodyType",
            ParamId::BodyResonance => "bodyResonance",
            ParamId::MasterGain => "masterGain",
            ParamId::VibratoRate => "vibratoRate",
            ParamId::VibratoDepth => "vibratoDepth",
            ParamId::TremoloSpeed => "tremoloSpeed",
            ParamId::TremoloDepth => "tremoloDepth",
            ParamId::TremoloArticulation => "tremoloArticulation",
            ParamId::TrillInterval => "trillInterval",
            ParamId::TrillSpeed => "trillSpeed",
            ParamId::TrillArticulation => "trillArticulation",
            ParamId::VibratoEnabled => "vibratoEnabled",
            ParamId::TremoloEnabled => "tremoloEnabled",
            ParamId::TrillEnabled => "trillEnabled",
        }
    }
}

/// Current value of every parameter, always within its declared range.
///
/// Fixed-size storage; reading and writing never allocates.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    values: [f32; ParamId::COUNT],
}

impl Default for ParameterStore {
    fn default() -> Self {
        let mut values = [0.0; ParamId::COUNT];
        for id in ParamId::ALL {
            values[id.index()] = id.range().default;
        }
        Self { values }
    }
}

impl ParameterStore {
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Clamp `value` to the parameter's range, store it and return what was stored.
    #[inline]
    pub fn set(&mut self, id: ParamId, value: f32) -> f32 {
        let clamped = id.range().clamp(value);
        self.values[id.index()] = clamped;
        clamped
    }

    /// Integer parameters as an index (material, body type, interval).
    #[inline]
    pub fn get_index(&self, id: ParamId) -> usize {
        self.get(id).max(0.0) as usize
    }

    /// Toggle parameters as a flag.
    #[inline]
    pub fn get_flag(&self, id: ParamId) -> bool {
        self.get(id) >= 0.5
    }
}
