//! # Render Phrase
//!
//! Play a short cello phrase through all three expressions and write it to a
//! stereo WAV file.
//!
//! **Concepts:** `ArcoEngine::builder()`, `ArcoHandle`, `Program`, `process_channels`
//!
//! ```bash
//! RUST_LOG=debug cargo run --example render_phrase -- /tmp/arco_phrase.wav
//! ```

use arco::prelude::*;
use hound::{SampleFormat, WavSpec, WavWriter};

const SAMPLE_RATE: u32 = 48000;
const BUFFER: usize = 512;

/// One step of the phrase: what to change, then how long to play.
enum Step {
    Note(f32),
    Expression(ExpressionKind),
    Release,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/arco_phrase.wav".to_string());

    let cello = Program::new("cello a string")
        .with_parameter(ParamId::StringMaterial, StringMaterial::Wound as usize as f32)
        .with_parameter(ParamId::BodyType, BodyPreset::Cello as usize as f32)
        .with_parameter(ParamId::BodyResonance, 0.6)
        .with_parameter(ParamId::BowPosition, 0.2)
        .with_parameter(ParamId::Brightness, 0.4)
        .with_parameter(ParamId::VibratoRate, 5.0)
        .with_parameter(ParamId::TrillInterval, 2.0);

    let (mut engine, mut handle) = ArcoEngine::builder()
        .sample_rate(SAMPLE_RATE as f64)
        .modes(24)
        .channels(2)
        .program(cello)
        .build()?;

    let phrase = [
        (Step::Note(110.0), 1.0),
        (Step::Expression(ExpressionKind::Vibrato), 1.5),
        (Step::Note(130.81), 1.0),
        (Step::Expression(ExpressionKind::Trill), 1.5),
        (Step::Note(146.83), 0.5),
        (Step::Expression(ExpressionKind::Tremolo), 1.5),
        (Step::Expression(ExpressionKind::None), 0.5),
        (Step::Release, 1.0),
    ];

    let spec = WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec)?;

    let mut left = vec![0.0f32; BUFFER];
    let mut right = vec![0.0f32; BUFFER];
    let mut started = false;

    for (step, seconds) in phrase {
        match step {
            Step::Note(hz) => {
                handle.set_parameter(ParamId::FundamentalFrequency, hz)?;
                if !started {
                    handle.start_sounding()?;
                    started = true;
                }
            }
            Step::Expression(kind) => handle.set_expression(kind)?,
            Step::Release => handle.stop_sounding()?,
        }

        let frames = (seconds * SAMPLE_RATE as f32) as usize;
        for _ in 0..frames.div_ceil(BUFFER) {
            engine.process_channels(&mut [&mut left[..], &mut right[..]]);
            for (l, r) in left.iter().zip(&right) {
                writer.write_sample(*l)?;
                writer.write_sample(*r)?;
            }
        }

        let state = engine.expression_state();
        println!(
            "{:>8.2}s  {:?} ({:?})",
            seconds, state.current, state.phase
        );
    }

    writer.finalize()?;
    println!("Wrote {}", path);
    Ok(())
}
