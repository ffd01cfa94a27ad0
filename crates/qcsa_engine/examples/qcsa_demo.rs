//! QCSA Demo
//!
//! Builds a carry-select adder, prints its structure and QASM, simulates it
//! and checks the decoded sum.
//!
//! Usage: `cargo run -p qcsa_engine --example qcsa_demo [config.json] [a b c_in]`

use anyhow::{bail, Context, Result};
use qcsa_core::OperandBits;
use qcsa_engine::prelude::*;
use std::env;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (config, operands) = match args.as_slice() {
        [path, rest @ ..] if path.ends_with(".json") => (
            QcsaConfig::load(path).with_context(|| format!("loading {}", path))?,
            rest.to_vec(),
        ),
        rest => (QcsaConfig::new(8, 4).with_seed(42), rest.to_vec()),
    };

    let (a, b, c_in) = match operands.as_slice() {
        [a, b, c] => (a.clone(), b.clone(), c.clone()),
        [] => (
            OperandBits::from_value(0b1011_0110, config.n).to_string(),
            OperandBits::from_value(0b0101_1101, config.n).to_string(),
            "1".to_string(),
        ),
        _ => bail!("expected operands `a b c_in`, got {} arguments", operands.len()),
    };

    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║                 Quantum Carry-Select Adder Demo                      ║");
    println!("╚══════════════════════════════════════════════════════════════════════╝\n");

    println!("Configuration:");
    println!("  • {}", config);
    println!("  • Blocks: {} x {} bits", config.num_blocks(), config.k);
    println!("  • Operands: a={} b={} c_in={}", a, b, c_in);
    println!();

    let runner = QcsaRunner::new(config);
    let composed = runner.compose(&a, &b, &c_in)?;

    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  CIRCUIT");
    println!("═══════════════════════════════════════════════════════════════════════\n");
    println!("{}", composed.circuit);
    for (block, register) in composed.layout.sum_registers.iter().enumerate() {
        println!("  block {} sum -> {}", block, register);
    }
    println!(
        "  carry-out -> {}\n",
        composed.circuit.qubit_label(composed.layout.carry_out)
    );
    println!("{}\n", composed.circuit.to_qasm());

    println!("═══════════════════════════════════════════════════════════════════════");
    println!("  SIMULATION");
    println!("═══════════════════════════════════════════════════════════════════════\n");

    let report = runner.run(&a, &b, &c_in)?;
    println!("  {}", report);
    println!("  measured: {}", report.bitstring);
    println!(
        "  depth: {}, cswaps: {}, time: {}ms",
        report.metrics.depth, report.metrics.cswaps, report.metrics.total_time_ms
    );

    if !report.is_correct() {
        bail!("decoded sum {} does not match integer addition", report.sum);
    }
    println!("\n  ✓ sum matches integer addition");

    Ok(())
}
