//! Writes deterministic sample thermal logs (one per vendor family) for
//! manual testing of the dashboard. Output layout mirrors the real exports:
//! HW64 and PTAT carry vendor metadata rows around the data, GPUmon carries
//! a fixed preamble ahead of the header line.

use std::fs;
use std::path::Path;

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
}

/// One noisy channel around a setpoint that drifts toward a steady state.
fn channel(rng: &mut SimpleRng, rows: usize, start: f64, steady: f64, noise: f64) -> Vec<f64> {
    (0..rows)
        .map(|i| {
            let t = (i as f64 / rows as f64).min(1.0);
            let setpoint = start + (steady - start) * t;
            rng.gauss(setpoint, noise)
        })
        .collect()
}

/// The dashboard expects the vendor encoding, so samples are written as
/// cp950/Big5 bytes, not UTF-8.
fn write_cp950(path: &Path, text: &str) -> std::io::Result<()> {
    let (bytes, _, _) = encoding_rs::BIG5.encode(text);
    fs::write(path, bytes)
}

fn timestamp(i: usize) -> String {
    let h = 10 + i / 3600;
    let m = (i / 60) % 60;
    let s = i % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

fn write_hw64(path: &Path, rng: &mut SimpleRng, rows: usize) -> std::io::Result<()> {
    let mut text = String::new();
    text.push_str("Time,Total System Power [W],CPU Package Power [W],IA Cores Power [W],GT Cores Power [W],CPU Package [蚓],Temp0 [°C]\n");
    // Five vendor metadata rows between the header and the data proper,
    // dropped by the strict trimmer.
    text.push_str("HWiNFO64 v7.40 sensor log,,,,,,\n");
    text.push_str("Machine: DEMO-RIG-01,,,,,,\n");
    text.push_str("Logging interval: 1s,,,,,,\n");
    text.push_str("Session: burn-in,,,,,,\n");
    text.push_str("----,,,,,,\n");

    let system = channel(rng, rows, 45.0, 88.0, 1.5);
    let package = channel(rng, rows, 18.0, 55.0, 1.2);
    let ia = channel(rng, rows, 12.0, 45.0, 1.0);
    let gt = channel(rng, rows, 1.0, 4.0, 0.3);
    let temp = channel(rng, rows, 42.0, 92.0, 0.8);
    let skin = channel(rng, rows, 28.0, 41.0, 0.4);

    for i in 0..rows {
        text.push_str(&format!(
            "{},{:.3},{:.3},{:.3},{:.3},{:.1},{:.1}\n",
            timestamp(i),
            system[i],
            package[i],
            ia[i],
            gt[i],
            temp[i],
            skin[i]
        ));
    }
    // Trailing average + footer pair.
    let avg: f64 = package.iter().sum::<f64>() / rows as f64;
    text.push_str(&format!("Average:,,{avg:.3},,,,\n"));
    text.push_str("Logging stopped\n");

    write_cp950(path, &text)
}

fn write_ptat(path: &Path, rng: &mut SimpleRng, rows: usize) -> std::io::Result<()> {
    let mut text = String::new();
    text.push_str("Time,CPU Temperature(°C),System Power(W),CPU Package(C),Charger In(W)\n");
    // Five vendor metadata rows ahead of the data proper.
    for key in ["Version", "Platform", "Profile", "Mode", "Interval"] {
        text.push_str(&format!("{key},,,,\n"));
    }

    let temp = channel(rng, rows, 40.0, 85.0, 1.0);
    let power = channel(rng, rows, 40.0, 90.0, 2.0);
    let package = channel(rng, rows, 38.0, 82.0, 1.0);
    let charger = channel(rng, rows, 60.0, 60.0, 0.5);

    for i in 0..rows {
        text.push_str(&format!(
            "{},{:.1},{:.2},{:.1},{:.2}\n",
            timestamp(i),
            temp[i],
            power[i],
            package[i],
            charger[i]
        ));
    }
    write_cp950(path, &text)
}

fn write_gpumon(path: &Path, rng: &mut SimpleRng, rows: usize) -> std::io::Result<()> {
    let mut text = String::new();
    // Fixed preamble the loader skips before the header line.
    for i in 0..35 {
        text.push_str(&format!("# gpumon setup line {i}\n"));
    }
    text.push_str("Time, 1:TGP (W), 1:NVVDD Power (W), 1:FBVDD Power (W), 1:Temperature GPU (C), 1:Temperature Memory (C)\n");

    let tgp = channel(rng, rows, 30.0, 140.0, 2.5);
    let nvvdd = channel(rng, rows, 15.0, 70.0, 1.5);
    let fbvdd = channel(rng, rows, 5.0, 20.0, 0.8);
    let gpu_temp = channel(rng, rows, 38.0, 78.0, 0.7);
    let mem_temp = channel(rng, rows, 36.0, 84.0, 0.9);

    for i in 0..rows {
        text.push_str(&format!(
            "{},{:.2},{:.2},{:.2},{:.1},{:.1}\n",
            timestamp(i),
            tgp[i],
            nvvdd[i],
            fbvdd[i],
            gpu_temp[i],
            mem_temp[i]
        ));
    }
    write_cp950(path, &text)
}

fn main() -> std::io::Result<()> {
    let out_dir = std::env::args().nth(1).unwrap_or_else(|| "sample_logs".to_string());
    let out_dir = Path::new(&out_dir);
    fs::create_dir_all(out_dir)?;

    let mut rng = SimpleRng::new(42);
    let rows = 600;

    write_hw64(&out_dir.join("HW64_sample.csv"), &mut rng, rows)?;
    write_ptat(&out_dir.join("PTAT_sample.csv"), &mut rng, rows)?;
    write_gpumon(&out_dir.join("GPUmon_sample.csv"), &mut rng, rows)?;

    println!(
        "Wrote 3 sample logs ({rows} data rows each) to {}",
        out_dir.display()
    );
    Ok(())
}
