/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Main executable for kkr-rs

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = kkr_rs::cli::Cli::parse();
    log::info!("kkr-rs v{}", kkr_rs::VERSION);

    let report = kkr_rs::cli::run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
