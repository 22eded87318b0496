use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{Cli, ColorArgs};

pub fn run(cli: &Cli, args: &ColorArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    super::apply_overrides(&mut config, &args.coloring);
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from("./colored.geojson"));

    let layer = super::load_layer(&args.input, &config)?;
    let colored = layer.color(&config.coloring)?;

    citymap::write_colored_geojson(&out_path, &colored)?;
    Ok(())
}
