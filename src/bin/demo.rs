//! Focksim Demonstration Suite

use focksim::{
    run_tests, CircuitConfig, DeutschJozsa, NoiseParameters, PhotonicCircuit, StateTomography,
};

use std::f64::consts::PI;
use std::time::Instant;

fn demo_qrng() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: Quantum Random Number Generation");
    println!("{}", "=".repeat(60));

    let mut circuit = PhotonicCircuit::new(2, 3).expect("circuit construction");
    circuit
        .add_phase_shifter(0, PI / 4.0)
        .expect("phase shifter");

    let bits = circuit.generate_random_bits(100).expect("bit generation");
    let shown: Vec<u8> = bits.as_slice().iter().take(10).copied().collect();

    println!("  Generated random bits: {:?}...", shown);
    println!("  Bias: {:.3}", bits.bias());
    println!("  Shannon entropy: {:.3} bits", bits.shannon_entropy());
}

fn demo_randomness_tests() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: Randomness Test Suite (1000 bits)");
    println!("{}", "=".repeat(60));

    let mut circuit = PhotonicCircuit::new(2, 3).expect("circuit construction");
    circuit
        .add_phase_shifter(0, PI / 4.0)
        .expect("phase shifter");
    let bits = circuit.generate_random_bits(1000).expect("bit generation");

    let report = run_tests(&bits);
    println!("  Frequency p-value:  {:.4}", report.frequency_pvalue);
    println!("  Runs count:         {}", report.runs_count);
    println!("  Serial correlation: {:.4}", report.serial_correlation);
}

fn demo_state_analysis() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: State Analysis");
    println!("{}", "=".repeat(60));

    let mut circuit = PhotonicCircuit::new(2, 3).expect("circuit construction");
    for _ in 0..5 {
        circuit
            .add_phase_shifter(0, PI / 6.0)
            .expect("phase shifter");
    }

    let analysis = circuit.analyze();
    println!("  Purity: {:.4}", analysis.purity);
    println!("  Photon distribution: {:?}", analysis.photon_distribution);
}

fn demo_wigner() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: Wigner Quasi-Probability Grid");
    println!("{}", "=".repeat(60));

    let circuit = PhotonicCircuit::new(1, 3).expect("circuit construction");
    let resolution = 32;
    let grid = circuit.wigner_grid(resolution).expect("wigner grid");

    let min = grid.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = grid.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!("  Grid: {}x{} over x, p in [-5, 5]", resolution, resolution);
    println!("  Value range: [{:.4}, {:.4}]", min, max);
    println!("  (simplified displaced-parity proxy, not physically exact)");
}

fn demo_tomography() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: State Tomography (mode 0)");
    println!("{}", "=".repeat(60));

    let config = CircuitConfig::default().with_noise(NoiseParameters::noiseless());
    let circuit = PhotonicCircuit::with_config(2, 3, &config).expect("circuit construction");

    let rho = StateTomography::new(1000)
        .expect("estimator")
        .reconstruct(&circuit, 0)
        .expect("reconstruction");

    println!("  Reconstructed 2x2 density matrix:");
    for i in 0..2 {
        println!(
            "    [{:>6.3}{:+.3}i  {:>6.3}{:+.3}i]",
            rho[[i, 0]].re,
            rho[[i, 0]].im,
            rho[[i, 1]].re,
            rho[[i, 1]].im
        );
    }
}

fn demo_deutsch_jozsa() {
    println!("\n{}", "=".repeat(60));
    println!("DEMO: Deutsch-Jozsa (phase-encoded demonstration)");
    println!("{}", "=".repeat(60));

    let mut constant = DeutschJozsa::new(|_| 0).expect("constant circuit");
    let mut balanced = DeutschJozsa::new(|x| x).expect("balanced circuit");

    println!(
        "  Constant oracle judged constant: {}",
        constant.run().expect("run")
    );
    println!(
        "  Balanced oracle judged constant: {}",
        balanced.run().expect("run")
    );
}

fn benchmark_bit_generation() {
    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK: Bit Generation Throughput");
    println!("{}", "=".repeat(60));

    let configs = [(1usize, 3usize), (2, 3), (3, 2)];

    for &(num_modes, max_photons) in &configs {
        let mut circuit =
            PhotonicCircuit::new(num_modes, max_photons).expect("circuit construction");

        // Warm up
        let _ = circuit.generate_random_bits(100).expect("warm up");

        let n_bits = 10_000;
        let start = Instant::now();
        let _ = circuit.generate_random_bits(n_bits).expect("bit generation");
        let elapsed = start.elapsed().as_secs_f64();

        println!(
            "  {} modes, {} photons: {:.1} kbit/s",
            num_modes,
            max_photons,
            n_bits as f64 / elapsed / 1e3
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("\n{}", "#".repeat(60));
    println!("#  Focksim Photonic QRNG Demonstration Suite");
    println!("{}", "#".repeat(60));

    demo_qrng();
    demo_randomness_tests();
    demo_state_analysis();
    demo_wigner();
    demo_tomography();
    demo_deutsch_jozsa();
    benchmark_bit_generation();

    println!("\n{}", "=".repeat(60));
    println!("DEMO COMPLETE");
    println!("{}", "=".repeat(60));
}
