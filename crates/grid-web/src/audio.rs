use web_sys as web;

use grid_core::{db_to_gain, midi_to_hz, note_to_midi, LiveChanges, ReverbParams, EIGHTH_NOTE_SEC};

use crate::constants::{
    IR_DECAY_MAX_SEC, IR_DECAY_MIN_SEC, NOTE_ATTACK_SEC, NOTE_GAIN, PRE_DELAY_MAX_SEC,
};

/// The reverb effect instance. Rebuilt as a unit when the impulse response
/// must change; wet and pre-delay are live audio params.
pub struct ReverbNodes {
    pub input: web::GainNode,
    pub pre_delay: web::DelayNode,
    pub convolver: web::ConvolverNode,
    pub wet: web::GainNode,
}

/// Full audio graph: one-shot voices sum into `synth_bus`, which feeds the
/// master directly (dry) and the reverb send in parallel.
pub struct AudioChain {
    pub ctx: web::AudioContext,
    pub master: web::GainNode,
    pub synth_bus: web::GainNode,
    pub reverb: ReverbNodes,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub fn build_chain(params: &ReverbParams, volume_db: f32) -> Result<AudioChain, ()> {
    let ctx = web::AudioContext::new().map_err(|e| {
        log::error!("AudioContext error: {:?}", e);
    })?;
    _ = ctx.resume();

    let master = create_gain(&ctx, db_to_gain(volume_db), "Master")?;
    _ = master.connect_with_audio_node(&ctx.destination());

    let synth_bus = create_gain(&ctx, 1.0, "Synth bus")?;
    _ = synth_bus.connect_with_audio_node(&master);

    let reverb = build_reverb(&ctx, params)?;
    _ = synth_bus.connect_with_audio_node(&reverb.input);
    _ = reverb.wet.connect_with_audio_node(&master);

    Ok(AudioChain {
        ctx,
        master,
        synth_bus,
        reverb,
    })
}

fn build_reverb(ctx: &web::AudioContext, params: &ReverbParams) -> Result<ReverbNodes, ()> {
    let input = create_gain(ctx, 1.0, "Reverb in")?;

    let pre_delay = ctx
        .create_delay_with_max_delay_time(PRE_DELAY_MAX_SEC)
        .map_err(|e| {
            log::error!("DelayNode error: {:?}", e);
        })?;
    pre_delay
        .delay_time()
        .set_value(params.pre_delay.clamp(0.0, PRE_DELAY_MAX_SEC) as f32);

    let convolver = web::ConvolverNode::new(ctx).map_err(|e| {
        log::error!("ConvolverNode error: {:?}", e);
    })?;
    convolver.set_normalize(true);
    if let Some(ir) = render_impulse_response(ctx, params.decay) {
        convolver.set_buffer(Some(&ir));
    }

    let wet = create_gain(ctx, params.wet as f32, "Reverb wet")?;

    _ = input.connect_with_audio_node(&pre_delay);
    _ = pre_delay.connect_with_audio_node(&convolver);
    _ = convolver.connect_with_audio_node(&wet);

    Ok(ReverbNodes {
        input,
        pre_delay,
        convolver,
        wet,
    })
}

/// Swap the reverb for a fresh instance built from `params`.
///
/// The synth bus is disconnected from the old instance first and reconnected
/// to the new one, so in-flight notes keep playing dry through the swap.
pub fn rebuild_reverb(chain: &mut AudioChain, params: &ReverbParams) {
    let old = &chain.reverb;
    _ = chain.synth_bus.disconnect_with_audio_node(&old.input);
    _ = old.input.disconnect();
    _ = old.pre_delay.disconnect();
    _ = old.convolver.disconnect();
    _ = old.wet.disconnect();

    match build_reverb(&chain.ctx, params) {
        Ok(reverb) => {
            _ = chain.synth_bus.connect_with_audio_node(&reverb.input);
            _ = reverb.wet.connect_with_audio_node(&chain.master);
            chain.reverb = reverb;
        }
        Err(()) => log::error!("[audio] reverb rebuild failed; running dry"),
    }
}

/// Apply the live-settable portion of a parameter update to the running
/// reverb instance.
pub fn apply_live_changes(chain: &AudioChain, live: &LiveChanges) {
    if let Some(pre_delay) = live.pre_delay {
        chain
            .reverb
            .pre_delay
            .delay_time()
            .set_value(pre_delay.clamp(0.0, PRE_DELAY_MAX_SEC) as f32);
    }
    if let Some(wet) = live.wet {
        chain.reverb.wet.gain().set_value(wet as f32);
    }
}

pub fn set_volume_db(chain: &AudioChain, db: f32) {
    chain.master.gain().set_value(db_to_gain(db));
}

/// Play a set of simultaneous notes from string note names, fire-and-forget.
pub fn trigger_note_burst(chain: &AudioChain, notes: &[&str]) {
    let now = chain.ctx.current_time();
    let t0 = now + 0.005;
    for name in notes {
        let midi = match note_to_midi(name) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[audio] skipping note: {e}");
                continue;
            }
        };
        let Ok(src) = web::OscillatorNode::new(&chain.ctx) else {
            continue;
        };
        src.set_type(web::OscillatorType::Triangle);
        src.frequency().set_value(midi_to_hz(midi as f32));
        let Ok(env) = web::GainNode::new(&chain.ctx) else {
            continue;
        };
        env.gain().set_value(0.0);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(NOTE_GAIN, t0 + NOTE_ATTACK_SEC);
        _ = env
            .gain()
            .linear_ramp_to_value_at_time(0.0, t0 + EIGHTH_NOTE_SEC);
        _ = src.connect_with_audio_node(&env);
        _ = env.connect_with_audio_node(&chain.synth_bus);
        _ = src.start_with_when(t0);
        _ = src.stop_with_when(t0 + EIGHTH_NOTE_SEC + 0.05);
    }
}

/// Render a stereo impulse response: deterministic xorshift noise under an
/// exponential envelope that reaches -60 dB at `decay` seconds.
fn render_impulse_response(ctx: &web::AudioContext, decay: f64) -> Option<web::AudioBuffer> {
    let sr = ctx.sample_rate();
    let seconds = decay.clamp(IR_DECAY_MIN_SEC, IR_DECAY_MAX_SEC) as f32;
    let len = (sr * seconds) as u32;
    let ir = ctx.create_buffer(2, len.max(1), sr).ok()?;

    let mut seed_l: u32 = 0x1234_ABCD;
    let mut seed_r: u32 = 0x7890_FEDC;
    for ch in 0..2 {
        let mut buf: Vec<f32> = vec![0.0; len as usize];
        let mut t = 0.0_f32;
        let dt = 1.0_f32 / sr;
        for sample in buf.iter_mut() {
            let s = if ch == 0 { &mut seed_l } else { &mut seed_r };
            let mut x = *s;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            *s = x;
            let n = (x as f32 / u32::MAX as f32) * 2.0 - 1.0;
            // -60 dB at the tail end, with a gentle dark tilt
            let env = (-6.908 * t / seconds).exp();
            let dark = (1.0 - t / seconds).max(0.0);
            *sample = n * env * (0.7 + 0.3 * dark);
            t += dt;
        }
        _ = ir.copy_to_channel(&mut buf, ch);
    }
    Some(ir)
}
