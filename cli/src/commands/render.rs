use std::path::PathBuf;

use anyhow::Result;

use crate::cli::{Cli, RenderArgs};

pub fn run(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    super::apply_extent(&mut config, &args.extent);
    super::apply_overrides(&mut config, &args.coloring);
    let out_path: PathBuf = args.output.clone().unwrap_or_else(|| {
        args.input.with_extension("svg").file_name().map_or_else(|| PathBuf::from("poster.svg"), PathBuf::from)
    });

    let layer = super::load_layer(&args.input, &config)?;
    let bounds = layer.poster_bounds(&config.bounds)?;
    let colored = layer.color(&config.coloring)?;

    citymap::write_poster_svg_file(&out_path, &colored, &bounds, &config.style)?;
    Ok(())
}
