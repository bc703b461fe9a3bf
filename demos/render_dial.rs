//! Walk a dial through a few states and print the SVG after each one.
//!
//! Run with `RUST_LOG=thermodial=debug` to see the render passes.

use thermodial::{DialOptions, SizePreset, SvgBuffer, create_dial};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = DialOptions::new()
        .size(SizePreset::Medium)
        .embed_style(true)
        .on_target_temperature_change(|t| eprintln!("user picked {t}"));
    let mut dial = create_dial(SvgBuffer::new(), options)?;

    // Heating towards a half-degree target
    dial.set_name("Hallway");
    dial.set_ambient_temperature(66.0);
    dial.set_target_temperature(70.5);
    dial.set_hvac_state("heating");
    println!("=== Heating ===");
    println!("{}", dial.container().latest().unwrap_or_default());

    // A drag to 3 o'clock
    let picked = dial.set_target_from_pointer(290.0, 150.0);
    eprintln!("pointer -> {picked:?}");

    // Leaving the house
    dial.set_hvac_state("off");
    dial.set_has_leaf(true);
    dial.set_away(true);
    println!("\n=== Away ===");
    println!("{}", dial.container().latest().unwrap_or_default());

    eprintln!("{} render passes", dial.render_count());
    Ok(())
}
