use std::path::PathBuf;

/// Neighborhood poster CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "citymap", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON config file; defaults apply to anything it leaves out
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the poster bounds (west south east north) for a neighborhoods file
    Bounds(BoundsArgs),

    /// Assign colors to neighborhoods and write them as GeoJSON
    Color(ColorArgs),

    /// Color neighborhoods and draw them as an SVG poster
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct BoundsArgs {
    /// Neighborhoods GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    #[command(flatten)]
    pub extent: ExtentArgs,
}

/// Overrides for the bounds section of the config.
#[derive(clap::Args, Debug)]
pub struct ExtentArgs {
    /// Use the raw bounds with no padding or ratio adjustment
    #[arg(long)]
    pub tight: bool,
}

/// Overrides for the coloring section of the config.
#[derive(clap::Args, Debug)]
pub struct ColoringArgs {
    /// Coloring strategy: random, constrained, greedy, or none
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability of coloring a neighborhood
    #[arg(long)]
    pub color_prob: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct ColorArgs {
    /// Neighborhoods GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output GeoJSON file, defaults to "./colored.geojson"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub coloring: ColoringArgs,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Neighborhoods GeoJSON file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output SVG file, defaults to "./<input stem>.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub extent: ExtentArgs,

    #[command(flatten)]
    pub coloring: ColoringArgs,
}
