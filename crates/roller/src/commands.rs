//! Command execution.
//!
//! Results go to the given writer; diagnostics go through tracing.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use knucklebones_domain::{Coin, Die, FaceCount, Polyhedral, RandomPort};

use crate::cli::Commands;
use crate::config::{OutputFormat, RollerConfig};

/// Run one command, drawing randomness from `rng`
pub fn run<R, W>(
    command: &Commands,
    config: &RollerConfig,
    output: OutputFormat,
    rng: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RandomPort + Copy,
    W: Write,
{
    match command {
        Commands::Roll { die, times } => {
            let faces = match die {
                Some(spec) => FaceCount::try_from(spec.as_str())
                    .with_context(|| format!("cannot roll '{spec}'"))?,
                None => config.default_die,
            };
            roll(faces, *times, output, rng, out)
        }
        Commands::Flip { times } => flip(*times, output, rng, out),
        Commands::Standard => standard(output, rng, out),
    }
}

fn roll<R, W>(
    faces: FaceCount,
    times: u32,
    output: OutputFormat,
    rng: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    R: RandomPort + Copy,
    W: Write,
{
    tracing::info!(faces = faces.get(), times, "Rolling");

    // The constructor rolls once, so that counts as the first result
    let mut die = Die::from_face_count(faces, rng);
    for i in 0..times {
        if i > 0 {
            die.roll();
        }
        tracing::debug!(value = die.value(), "Rolled");
        match output {
            OutputFormat::Text => writeln!(out, "{die}")?,
            OutputFormat::Json => write_json(out, &die.snapshot())?,
        }
    }
    Ok(())
}

fn flip<R, W>(times: u32, output: OutputFormat, rng: R, out: &mut W) -> anyhow::Result<()>
where
    R: RandomPort + Copy,
    W: Write,
{
    tracing::info!(times, "Flipping");

    let mut coin = Coin::with_source(rng);
    for i in 0..times {
        let face = if i > 0 { coin.flip() } else { coin.result() };
        tracing::debug!(%face, "Flipped");
        match output {
            OutputFormat::Text => writeln!(out, "{face}")?,
            OutputFormat::Json => write_json(out, &face)?,
        }
    }
    Ok(())
}

fn standard<R, W>(output: OutputFormat, rng: R, out: &mut W) -> anyhow::Result<()>
where
    R: RandomPort + Copy,
    W: Write,
{
    tracing::info!("Rolling the standard set");

    for kind in Polyhedral::ALL {
        let die = Die::from_face_count(kind.face_count(), rng);
        match output {
            OutputFormat::Text => writeln!(out, "{die}")?,
            OutputFormat::Json => write_json(out, &die.snapshot())?,
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value).context("writing JSON output")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use knucklebones_domain::{DiceError, DieSnapshot, FixedRandomPort, ThreadRandom};

    fn run_to_string(
        command: Commands,
        config: &RollerConfig,
        output: OutputFormat,
        rng: &FixedRandomPort,
    ) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(&command, config, output, rng, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_roll_text_output() {
        let rng = FixedRandomPort::new(vec![0.0, 0.5, 0.99]);
        let command = Commands::Roll {
            die: Some("d6".to_string()),
            times: 3,
        };
        let text = run_to_string(command, &RollerConfig::default(), OutputFormat::Text, &rng).unwrap();
        assert_eq!(text, "d6 = 1\nd6 = 4\nd6 = 6\n");
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_roll_uses_configured_default_die() {
        let rng = FixedRandomPort::constant(0.999);
        let config = RollerConfig {
            default_die: FaceCount::new(12).unwrap(),
            ..RollerConfig::default()
        };
        let command = Commands::Roll { die: None, times: 1 };
        let text = run_to_string(command, &config, OutputFormat::Text, &rng).unwrap();
        assert_eq!(text, "d12 = 12\n");
    }

    #[test]
    fn test_roll_json_output() {
        let rng = FixedRandomPort::constant(0.0);
        let command = Commands::Roll {
            die: Some("20".to_string()),
            times: 2,
        };
        let text = run_to_string(command, &RollerConfig::default(), OutputFormat::Json, &rng).unwrap();
        let snapshots: Vec<DieSnapshot> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            snapshots,
            vec![DieSnapshot { faces: 20, value: 1 }; 2]
        );
    }

    #[test]
    fn test_roll_rejects_invalid_die() {
        let rng = FixedRandomPort::constant(0.0);
        for (spec, expected) in [
            ("abc", DiceError::type_mismatch("a number of faces", "abc")),
            ("1", DiceError::out_of_range(1)),
        ] {
            let command = Commands::Roll {
                die: Some(spec.to_string()),
                times: 1,
            };
            let err = run_to_string(command, &RollerConfig::default(), OutputFormat::Text, &rng)
                .unwrap_err();
            assert_eq!(err.downcast_ref::<DiceError>(), Some(&expected));
        }
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_flip_text_output() {
        let rng = FixedRandomPort::new(vec![0.1, 0.9, 0.4]);
        let text = run_to_string(
            Commands::Flip { times: 3 },
            &RollerConfig::default(),
            OutputFormat::Text,
            &rng,
        )
        .unwrap();
        assert_eq!(text, "heads\ntails\nheads\n");
    }

    #[test]
    fn test_flip_json_output() {
        let rng = FixedRandomPort::constant(0.75);
        let text = run_to_string(
            Commands::Flip { times: 1 },
            &RollerConfig::default(),
            OutputFormat::Json,
            &rng,
        )
        .unwrap();
        assert_eq!(text, "\"tails\"\n");
    }

    #[test]
    fn test_standard_rolls_every_die() {
        let rng = FixedRandomPort::constant(0.0);
        let text = run_to_string(
            Commands::Standard,
            &RollerConfig::default(),
            OutputFormat::Text,
            &rng,
        )
        .unwrap();
        assert_eq!(
            text,
            "d4 = 1\nd6 = 1\nd8 = 1\nd10 = 1\nd12 = 1\nd20 = 1\nd100 = 1\n"
        );
    }

    #[test]
    fn test_roll_with_thread_random_stays_in_range() {
        let mut out = Vec::new();
        let command = Commands::Roll {
            die: Some("d8".to_string()),
            times: 50,
        };
        run(
            &command,
            &RollerConfig::default(),
            OutputFormat::Json,
            ThreadRandom,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 50);
        for line in text.lines() {
            let snapshot: DieSnapshot = serde_json::from_str(line).unwrap();
            assert_eq!(snapshot.faces, 8);
            assert!((1..=8).contains(&snapshot.value));
        }
    }
}
