use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Measure an audio asset's duration in seconds.
///
/// This is the authoritative timing source for clip assembly: the image
/// never dictates how long a scene stays on screen. WAV files take the
/// cheap header path; everything else goes through a format probe.
pub fn duration_seconds(path: &Path) -> Result<f64> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("wav") => wav_duration(path),
        _ => probe_duration(path),
    }
}

fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;
    let spec = reader.spec();
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}

fn probe_duration(path: &Path) -> Result<f64> {
    let src = File::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .context("Unsupported audio format")?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No supported audio track found")?;

    let params = track.codec_params.clone();
    let track_id = track.id;

    // Declared frame count when the container carries one
    if let (Some(frames), Some(rate)) = (params.n_frames, params.sample_rate) {
        return Ok(frames as f64 / rate as f64);
    }

    // Otherwise walk the packets and sum their durations
    let time_base = params.time_base.context("Audio track has no time base")?;
    let mut total_dur = 0u64;
    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }
        total_dur += packet.dur();
    }

    let time = time_base.calc_time(total_dur);
    Ok(time.seconds as f64 + time.frac)
}
