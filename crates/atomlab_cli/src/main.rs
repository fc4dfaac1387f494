//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `atomlab_core` linkage with a deterministic walkthrough.
//! - Print the electron cloud radius table for quick visual checks.
//!
//! Logging is enabled when `ATOMLAB_LOG_DIR` is set; the level comes from
//! `ATOMLAB_LOG_LEVEL` or the build default.

use atomlab_core::{
    core_version, default_log_level, init_logging, radius_for, AtomResult, NumberAtom,
    MAX_SUPPORTED_ELECTRONS,
};
use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;

const LOG_DIR_ENV: &str = "ATOMLAB_LOG_DIR";
const LOG_LEVEL_ENV: &str = "ATOMLAB_LOG_LEVEL";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let level =
            std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("atomlab_core version={}", core_version());

    if let Err(err) = walkthrough() {
        log::error!("event=cli_walkthrough module=cli status=error error={err}");
        eprintln!("walkthrough failed: {err}");
        return ExitCode::FAILURE;
    }
    print_radius_table();
    ExitCode::SUCCESS
}

fn walkthrough() -> AtomResult<()> {
    let atom = NumberAtom::new();
    let notifications = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&notifications);
    atom.on_change(move || counter.set(counter.get() + 1))?;

    for (protons, neutrons, electrons) in [(6, 6, 6), (6, 6, 5)] {
        atom.set_counts(protons, neutrons, electrons)?;
        let symbol = atom.element().map_or("?", |element| element.symbol);
        println!(
            "atom element={symbol} charge={} mass_number={} particles={} notifications={}",
            atom.charge(),
            atom.mass_number(),
            atom.total_particle_count(),
            notifications.get()
        );
    }

    atom.dispose()
}

fn print_radius_table() {
    for electrons in 0..=MAX_SUPPORTED_ELECTRONS {
        match radius_for(electrons) {
            Ok(radius) => println!("cloud electrons={electrons} radius={radius:.3}"),
            Err(err) => println!("cloud electrons={electrons} error={err}"),
        }
    }
}
