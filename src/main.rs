#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

mod error;
mod geo;
mod openair;
mod report;

use openair::{OpenAirStream, ParseOptions, ParserContext};

#[derive(StructOpt)]
struct Args {
    #[structopt(name = "input", parse(from_os_str))]
    input: PathBuf,
    /// Write the listing here instead of stdout
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Only list records with these class tokens (e.g. CTR, R, GP)
    #[structopt(short = "c", long = "class")]
    classes: Vec<String>,
    /// Do not carry the last `V X=` center into the next record
    #[structopt(long = "reset-center")]
    reset_center: bool,
    /// Fail if any field had to be degraded
    #[structopt(long = "strict")]
    strict: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::from_args();

    info!("Reading {}...", args.input.display());
    let mut stream = OpenAirStream::new(BufReader::new(File::open(&args.input)?));
    let mut ctx = ParserContext::new(ParseOptions {
        reset_center: args.reset_center,
    });
    let airspaces = stream
        .records(&mut ctx)
        .collect::<error::Result<Vec<_>>>()?;
    info!(
        "Parsed {} airspace records from {} lines",
        airspaces.len(),
        stream.line()
    );

    let airspaces = report::select(airspaces, &ctx, &args.classes, args.strict)?;
    let listing = report::listing(&airspaces, ctx.diagnostics());

    match args.output {
        Some(path) => {
            info!("Writing listing to {}...", path.display());
            let mut output = File::create(path)?;
            output.write_all(listing.as_bytes())?;
        }
        None => std::io::stdout().write_all(listing.as_bytes())?,
    }
    Ok(())
}
