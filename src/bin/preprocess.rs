use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use venue_pathfinder::infrastructure::{read_map_data, save_snapshot};
use venue_pathfinder::MapData;

#[derive(Parser, Debug)]
#[command(version, about = "Preprocess a venue JSON document into a binary snapshot")]
struct Args {
    #[arg(short, long)]
    input: PathBuf,
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let raw = read_map_data(&args.input)?;
    let data = MapData::process(&raw);
    info!(
        "processed {} hallways and {} landmarks",
        data.hallways().len(),
        data.landmarks().len()
    );
    save_snapshot(&data, &args.output)?;
    println!("Preprocessed venue saved to {:?}", args.output);
    Ok(())
}
