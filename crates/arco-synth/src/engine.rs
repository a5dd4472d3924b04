//! Bowed-string voice.
//!
//! Per sample: glided fundamental → expression → bow excitation → string
//! modes → tone filter → body mix → master gain → soft clip. The body bank
//! is reconfigured once per block. The string bank is tuned to the block's
//! fundamental times the fingered trill note and only recomputes when that
//! product or a string parameter changes.

use crate::expression::{ExpressionEngine, ExpressionParams, ExpressionState};
use arco_core::{
    ControlMessage, EngineConfig, ExpressionKind, Granularity, LinearGlide, ParamId,
    ParameterStore, Program, Result, TransitionConfig,
};
use arco_dsp::{
    soft_clip, BodyPreset, BodyResonatorBank, BowExcitationGenerator, BowState,
    ModalStringResonatorBank, StringMaterial, StringSettings, ToneControls, ToneFilter,
};

/// Glide time for fundamental changes.
pub const FUNDAMENTAL_GLIDE_SECS: f32 = 0.005;

/// Block-rate values read from the parameter store.
#[derive(Debug, Clone, Copy)]
struct BlockControls {
    bow_force: f32,
    bow_speed: f32,
    brightness: f32,
    body_mix: f32,
    master_gain: f32,
    /// String settings at the unmodulated fundamental
    string: StringSettings,
    expression: ExpressionParams,
}

pub struct Engine {
    config: EngineConfig,
    params: ParameterStore,
    fundamental: LinearGlide,
    bow: BowExcitationGenerator,
    strings: ModalStringResonatorBank,
    tone: ToneFilter,
    body: BodyResonatorBank,
    expression: ExpressionEngine,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let sample_rate = config.sample_rate_f32();
        let params = ParameterStore::default();
        let engine = Self {
            config: config.clone(),
            fundamental: LinearGlide::new(
                params.get(ParamId::FundamentalFrequency),
                FUNDAMENTAL_GLIDE_SECS,
                sample_rate,
            ),
            params,
            bow: BowExcitationGenerator::new(sample_rate),
            strings: ModalStringResonatorBank::new(config.num_modes, config.sample_rate)?,
            tone: ToneFilter::new(sample_rate),
            body: BodyResonatorBank::new(config.sample_rate),
            expression: ExpressionEngine::new(sample_rate),
        };

        tracing::debug!(
            "Created bowed-string engine: {} Hz, {} modes, block {}",
            config.sample_rate,
            config.num_modes,
            config.block_size
        );
        Ok(engine)
    }

    pub fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::StartSounding => self.start_sounding(),
            ControlMessage::StopSounding => self.stop_sounding(),
            ControlMessage::SetParameter { id, value } => {
                self.set_parameter(id, value);
            }
            ControlMessage::SetExpression(kind) => self.set_expression(kind),
            ControlMessage::ConfigureTransition(config) => self.configure_transition(config),
        }
    }

    pub fn start_sounding(&mut self) {
        self.bow.start();
    }

    pub fn stop_sounding(&mut self) {
        self.bow.stop();
    }

    /// Clamp and apply a parameter. Returns the value actually applied.
    ///
    /// Enable toggles become expression requests: switching one on requests
    /// its expression, switching it off releases it if it is the one playing
    /// or about to play.
    pub fn set_parameter(&mut self, id: ParamId, value: f32) -> f32 {
        let applied = self.params.set(id, value);
        match id.granularity() {
            Granularity::PerSample => self.fundamental.glide_to(applied),
            Granularity::TransitionTarget => {
                let kind = toggle_kind(id);
                if applied >= 0.5 {
                    self.set_expression(kind);
                } else if self.expression.state().destination() == kind {
                    self.set_expression(ExpressionKind::None);
                }
            }
            Granularity::PerBlock => {}
        }
        applied
    }

    pub fn set_expression(&mut self, kind: ExpressionKind) {
        self.expression.request(kind);
        for toggle in [
            ParamId::VibratoEnabled,
            ParamId::TremoloEnabled,
            ParamId::TrillEnabled,
        ] {
            let on = toggle_kind(toggle) == kind;
            self.params.set(toggle, if on { 1.0 } else { 0.0 });
        }
    }

    pub fn configure_transition(&mut self, config: TransitionConfig) {
        self.expression.configure_transition(config);
    }

    /// Apply a whole program directly (outside the audio thread).
    pub fn load_program(&mut self, program: &Program) {
        tracing::debug!(
            "Loading program '{}' ({} parameters, expression {:?})",
            program.name,
            program.parameters.len(),
            program.expression
        );
        self.configure_transition(program.transition);
        for (&id, &value) in &program.parameters {
            self.set_parameter(id, value);
        }
        self.set_expression(program.expression);
    }

    /// Render one block of mono output in place.
    pub fn process_block(&mut self, output: &mut [f32]) {
        let controls = self.update_block();

        for sample in output.iter_mut() {
            let fundamental = self.fundamental.next_sample();
            let modulation = self.expression.process(&controls.expression);

            self.strings.update(StringSettings {
                fundamental: controls.string.fundamental * modulation.string_pitch,
                ..controls.string
            });

            self.bow.set_noise_boost(modulation.noise_boost);
            let excitation = self.bow.process_sample(
                controls.bow_force,
                controls.bow_speed,
                fundamental,
                modulation.pitch,
                modulation.amplitude,
            );
            let string = self.strings.process_sample(excitation);

            self.tone.set_controls(&ToneControls {
                brightness: controls.brightness,
                bow_force: controls.bow_force,
                trill_onset: modulation.trill_onset,
                tremolo_bow_speed: modulation.bow_speed,
                darkening: modulation.darkening,
            });
            let toned = self.tone.process_sample(string);
            let bodied = self.body.process_sample(toned);
            let mixed = toned + (bodied - toned) * controls.body_mix;

            *sample = soft_clip(mixed * controls.master_gain);
        }
    }

    /// Block-boundary work: body reconfiguration and control snapshot.
    fn update_block(&mut self) -> BlockControls {
        let p = &self.params;
        self.body
            .update(BodyPreset::from_index(p.get_index(ParamId::BodyType)));

        BlockControls {
            bow_force: p.get(ParamId::BowForce),
            bow_speed: p.get(ParamId::BowSpeed),
            brightness: p.get(ParamId::Brightness),
            body_mix: p.get(ParamId::BodyResonance),
            master_gain: p.get(ParamId::MasterGain),
            string: StringSettings {
                fundamental: self.fundamental.current(),
                damping: p.get(ParamId::StringDamping),
                brightness: p.get(ParamId::Brightness),
                bow_position: p.get(ParamId::BowPosition),
                material: StringMaterial::from_index(p.get_index(ParamId::StringMaterial)),
            },
            expression: ExpressionParams {
                vibrato_rate: p.get(ParamId::VibratoRate),
                vibrato_depth: p.get(ParamId::VibratoDepth),
                tremolo_speed: p.get(ParamId::TremoloSpeed),
                tremolo_depth: p.get(ParamId::TremoloDepth),
                tremolo_articulation: p.get(ParamId::TremoloArticulation),
                trill_interval: p.get(ParamId::TrillInterval),
                trill_speed: p.get(ParamId::TrillSpeed),
                trill_articulation: p.get(ParamId::TrillArticulation),
            },
        }
    }

    pub fn expression_state(&self) -> ExpressionState {
        self.expression.state()
    }

    pub fn expression(&self) -> &ExpressionEngine {
        &self.expression
    }

    pub fn bow_state(&self) -> BowState {
        self.bow.state()
    }

    pub fn parameters(&self) -> &ParameterStore {
        &self.params
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn strings(&self) -> &ModalStringResonatorBank {
        &self.strings
    }

    pub fn tone(&self) -> &ToneFilter {
        &self.tone
    }
}

fn toggle_kind(id: ParamId) -> ExpressionKind {
    match id {
        ParamId::VibratoEnabled => ExpressionKind::Vibrato,
        ParamId::TremoloEnabled => ExpressionKind::Tremolo,
        ParamId::TrillEnabled => ExpressionKind::Trill,
        _ => ExpressionKind::None,
    }
}
