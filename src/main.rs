use std::env;
use std::process;

use blund::{ChannelMode, Engine, Pcm, PlaybackConfig, ToneParams};

/// Internal base volume the `-v` multiplier is applied to.
const BASE_VOLUME: f64 = 0.25;

fn usage(program: &str) -> ! {
    eprintln!(
        "usage: {program} [-v volume] [-t base-tone] [-g gap] [-m] [-n blocks] [-D device]"
    );
    process::exit(1);
}

/// Pulls and parses the value following a flag, or exits through usage.
fn value<T: std::str::FromStr>(args: &mut env::Args, program: &str, flag: &str) -> T {
    let raw = match args.next() {
        Some(raw) => raw,
        None => {
            eprintln!("{program}: {flag} requires an argument");
            usage(program);
        }
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("{program}: invalid argument for {flag}: {raw}");
            usage(program);
        }
    }
}

fn frequency(value: i64, what: &str, program: &str) -> u32 {
    if value <= 0 || value > u32::MAX as i64 {
        eprintln!("{program}: {what} out of range: {value}");
        usage(program);
    }
    value as u32
}

fn main() {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "blund".to_string());

    let mut playback = PlaybackConfig::default();
    let mut volume = BASE_VOLUME;
    let mut base: i64 = 100;
    let mut gap: i64 = 10;
    let mut blocks = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" => volume *= value::<f64>(&mut args, &program, "-v"),
            "-t" => base = value(&mut args, &program, "-t"),
            "-g" => gap = value(&mut args, &program, "-g"),
            "-m" => playback.channels = ChannelMode::Mono,
            "-n" => blocks = Some(value(&mut args, &program, "-n")),
            "-D" => playback.device = value(&mut args, &program, "-D"),
            _ => usage(&program),
        }
    }

    let tone = ToneParams {
        volume,
        tone1: frequency(base, "base tone", &program),
        tone2: frequency(base + gap, "offset tone", &program),
    };

    log::info!(
        "streaming {} Hz + {} Hz at volume {} on {} ({} ch)",
        tone.tone1,
        tone.tone2,
        tone.volume,
        playback.device,
        playback.channels.count()
    );

    let result = Engine::<Pcm>::open(&playback, &tone).and_then(|engine| engine.run(blocks));
    if let Err(error) = result {
        eprintln!("{program}: {error}");
        process::exit(1);
    }
}
