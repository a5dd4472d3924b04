//! Expression engine: the three processors, their mix levels and the
//! transition machine, combined into one set of modulation signals.

use super::transition::{ExpressionState, TransitionMachine};
use super::{ExpressionOutput, TremoloProcessor, TrillProcessor, VibratoProcessor};
use arco_core::{ExponentialSmoother, ExpressionKind, TransitionConfig};

/// Time constant of the mix-level smoothers (~100 ms to full level).
pub const MIX_SMOOTHING_SECS: f32 = 0.0217;

/// Mix levels below this skip the processor's contribution.
const MIN_MIX: f32 = 0.001;

/// Per-block expression controls, taken from the parameter store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionParams {
    pub vibrato_rate: f32,
    pub vibrato_depth: f32,
    pub tremolo_speed: f32,
    pub tremolo_depth: f32,
    pub tremolo_articulation: f32,
    pub trill_interval: f32,
    pub trill_speed: f32,
    pub trill_articulation: f32,
}

impl Default for ExpressionParams {
    fn default() -> Self {
        Self {
            vibrato_rate: 5.5,
            vibrato_depth: 0.5,
            tremolo_speed: 8.0,
            tremolo_depth: 0.7,
            tremolo_articulation: 0.5,
            trill_interval: 2.0,
            trill_speed: 5.0,
            trill_articulation: 0.5,
        }
    }
}

pub struct ExpressionEngine {
    vibrato: VibratoProcessor,
    tremolo: TremoloProcessor,
    trill: TrillProcessor,
    /// Indexed like [`ExpressionKind::PLAYABLE`]
    mix: [ExponentialSmoother; 3],
    machine: TransitionMachine,
    /// Scale applied to the current processor on the last sample
    scale: f32,
}

impl ExpressionEngine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            vibrato: VibratoProcessor::new(sample_rate),
            tremolo: TremoloProcessor::new(sample_rate),
            trill: TrillProcessor::new(sample_rate),
            mix: core::array::from_fn(|_| {
                ExponentialSmoother::new(0.0, MIX_SMOOTHING_SECS, sample_rate)
            }),
            machine: TransitionMachine::new(sample_rate),
            scale: 0.0,
        }
    }

    pub fn request(&mut self, kind: ExpressionKind) {
        self.machine.request(kind);
    }

    pub fn configure_transition(&mut self, config: TransitionConfig) {
        self.machine.configure(config);
    }

    pub fn state(&self) -> ExpressionState {
        self.machine.state()
    }

    /// Contribution scale of the current processor on the last sample.
    pub fn modulation_scale(&self) -> f32 {
        self.scale
    }

    pub fn mix_level(&self, kind: ExpressionKind) -> f32 {
        slot(kind).map_or(0.0, |i| self.mix[i].current())
    }

    pub fn vibrato(&self) -> &VibratoProcessor {
        &self.vibrato
    }

    pub fn tremolo(&self) -> &TremoloProcessor {
        &self.tremolo
    }

    pub fn trill(&self) -> &TrillProcessor {
        &self.trill
    }

    /// Advance everything by one sample and return the combined modulation.
    #[inline]
    pub fn process(&mut self, params: &ExpressionParams) -> ExpressionOutput {
        let can_stop = match self.machine.current() {
            ExpressionKind::None => true,
            ExpressionKind::Vibrato => self.vibrato.can_stop(),
            ExpressionKind::Tremolo => self.tremolo.can_stop(),
            ExpressionKind::Trill => self.trill.can_stop(),
        };
        self.machine.tick(can_stop);

        let current = self.machine.current();
        let rate_factor = self.machine.rate_factor();
        let rate = |kind: ExpressionKind| if kind == current { rate_factor } else { 1.0 };

        for (i, kind) in ExpressionKind::PLAYABLE.iter().enumerate() {
            self.mix[i].set_target(if *kind == current { 1.0 } else { 0.0 });
            self.mix[i].next_sample();
        }

        // Every processor advances every sample, whether it is heard or not.
        self.vibrato
            .advance(params.vibrato_rate * rate(ExpressionKind::Vibrato));
        self.tremolo.advance(
            params.tremolo_speed * rate(ExpressionKind::Tremolo),
            params.tremolo_articulation,
        );
        self.trill.advance(
            params.trill_speed * rate(ExpressionKind::Trill),
            params.trill_interval,
            params.trill_articulation,
        );

        let Some(index) = slot(current) else {
            self.scale = 0.0;
            return ExpressionOutput::NEUTRAL;
        };
        let mix = self.mix[index].current();
        if mix < MIN_MIX {
            self.scale = 0.0;
            return ExpressionOutput::NEUTRAL;
        }

        let (raw, depth) = match current {
            ExpressionKind::Vibrato => (self.vibrato.output(), params.vibrato_depth),
            ExpressionKind::Tremolo => (self.tremolo.output(), params.tremolo_depth),
            ExpressionKind::Trill => (self.trill.output(), 1.0),
            ExpressionKind::None => (ExpressionOutput::NEUTRAL, 0.0),
        };
        self.scale = mix * depth * self.machine.depth_curve();
        raw.scaled(self.scale)
    }
}

fn slot(kind: ExpressionKind) -> Option<usize> {
    match kind {
        ExpressionKind::None => None,
        ExpressionKind::Vibrato => Some(0),
        ExpressionKind::Tremolo => Some(1),
        ExpressionKind::Trill => Some(2),
    }
}
