use anyhow::Result;
use structopt::StructOpt;

use geom::Distance;

use convert_curblr::zones::{RandomIds, SystemClock, DEFAULT_ZONE_WIDTH};

#[derive(StructOpt)]
#[structopt(
    name = "convert_curblr",
    about = "Converts a CurbLR feed into curb zone polygons"
)]
struct Flags {
    /// CurbLR GeoJSON file to read
    #[structopt(long = "input")]
    input: String,

    /// GeoJSON file to write the zones to
    #[structopt(long = "output", default_value = "zones-dump.geojson")]
    output: String,

    /// Sideways extent of each zone polygon, in meters
    #[structopt(long = "width")]
    width: Option<f64>,
}

fn main() -> Result<()> {
    let flags = Flags::from_args();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let width = flags
        .width
        .map(Distance::meters)
        .unwrap_or(DEFAULT_ZONE_WIDTH);
    convert_curblr::convert(
        &flags.input,
        &flags.output,
        width,
        &mut RandomIds,
        &SystemClock,
    )
}
