use anyhow::Result;

use crate::cli::{BoundsArgs, Cli};

pub fn run(cli: &Cli, args: &BoundsArgs) -> Result<()> {
    let mut config = super::load_config(cli)?;
    super::apply_extent(&mut config, &args.extent);

    let layer = super::load_layer(&args.input, &config)?;
    let bounds = layer.poster_bounds(&config.bounds)?;

    println!("{:.5} {:.5} {:.5} {:.5}", bounds.west, bounds.south, bounds.east, bounds.north);
    Ok(())
}
