//! Writes a synthetic launch-records CSV with the columns the dashboard reads.
//!
//! Usage: `generate_sample [OUTPUT]` (default `spacex_launch_dash.csv`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "generate_sample", version, about = "Write a synthetic launch-records CSV")]
struct Args {
    /// Output CSV path
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        let idx = (self.next_f64() * items.len() as f64) as usize;
        items[idx.min(items.len() - 1)]
    }
}

#[derive(Serialize)]
struct LaunchRow<'a> {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: &'a str,
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'a str,
}

/// One booster generation: how many flights it flew, from where, with what
/// payloads and how reliably.
struct Generation {
    category: &'static str,
    flights: u32,
    sites: &'static [&'static str],
    payload_mean: f64,
    payload_sd: f64,
    success_rate: f64,
}

const GENERATIONS: &[Generation] = &[
    Generation {
        category: "v1.0",
        flights: 5,
        sites: &["CCAFS LC-40"],
        payload_mean: 400.0,
        payload_sd: 300.0,
        success_rate: 0.2,
    },
    Generation {
        category: "v1.1",
        flights: 15,
        sites: &["CCAFS LC-40", "VAFB SLC-4E"],
        payload_mean: 2500.0,
        payload_sd: 1200.0,
        success_rate: 0.4,
    },
    Generation {
        category: "FT",
        flights: 24,
        sites: &["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"],
        payload_mean: 4500.0,
        payload_sd: 2000.0,
        success_rate: 0.7,
    },
    Generation {
        category: "B4",
        flights: 11,
        sites: &["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"],
        payload_mean: 4800.0,
        payload_sd: 1800.0,
        success_rate: 0.75,
    },
    Generation {
        category: "B5",
        flights: 6,
        sites: &["KSC LC-39A", "CCAFS SLC-40"],
        payload_mean: 6000.0,
        payload_sd: 2500.0,
        success_rate: 0.9,
    },
];

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = args.output.display().to_string();

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {output_path}"))?;

    let mut flight_number = 0u32;
    for generation in GENERATIONS {
        for serial in 0..generation.flights {
            flight_number += 1;
            let payload = rng
                .gauss(generation.payload_mean, generation.payload_sd)
                .clamp(0.0, 9600.0)
                .round();
            let class = u8::from(rng.next_f64() < generation.success_rate);

            writer
                .serialize(LaunchRow {
                    flight_number,
                    launch_site: rng.pick(generation.sites),
                    class,
                    payload_kg: payload,
                    booster_version: format!("F9 {} B{}", generation.category, 1001 + serial),
                    booster_category: generation.category,
                })
                .with_context(|| format!("writing flight {flight_number}"))?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {flight_number} launches to {output_path}");
    Ok(())
}
