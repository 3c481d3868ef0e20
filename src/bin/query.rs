use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use venue_pathfinder::infrastructure::{load_snapshot, read_map_data};
use venue_pathfinder::{MapData, Point, RouteRequest};

#[derive(Parser, Debug)]
#[command(version, about = "Find the shortest walking route through a venue")]
struct Args {
    /// Venue JSON document, or a snapshot written by `preprocess` with --snapshot
    #[arg(short, long)]
    input: PathBuf,
    #[arg(long, help = "Treat the input as a preprocessed binary snapshot")]
    snapshot: bool,
    #[arg(long, help = "Starting landmark name", requires = "to")]
    from: Option<String>,
    #[arg(long, help = "Destination landmark name", requires = "from")]
    to: Option<String>,
    #[arg(long, help = "Starting point as X,Y in scaled map units", conflicts_with_all = ["from", "to"], requires = "to_xy")]
    from_xy: Option<String>,
    #[arg(long, help = "Destination point as X,Y in scaled map units", conflicts_with_all = ["from", "to"], requires = "from_xy")]
    to_xy: Option<String>,
    #[arg(long, help = "List landmarks and exit")]
    list: bool,
}

fn parse_point(s: &str) -> Result<Point> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid point '{s}'"))?;
    match parts[..] {
        [x, y] => Ok(Point::new(x, y)),
        _ => bail!("point must be X,Y, got '{s}'"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let data = if args.snapshot {
        load_snapshot(&args.input)?
    } else {
        MapData::process(&read_map_data(&args.input)?)
    };

    if args.list {
        for landmark in data.sorted_landmarks() {
            println!(
                "{}\tlabel {}\tentrance {}",
                landmark.name, landmark.label_position, landmark.entrance_point
            );
        }
        return Ok(());
    }

    let route = match (&args.from, &args.to, &args.from_xy, &args.to_xy) {
        (Some(from), Some(to), _, _) => {
            let start = data
                .landmark_named(from)
                .ok_or_else(|| anyhow!("unknown landmark '{from}'"))?;
            let end = data
                .landmark_named(to)
                .ok_or_else(|| anyhow!("unknown landmark '{to}'"))?;
            data.route_between(&RouteRequest::new(start.clone(), end.clone()))?
        }
        (_, _, Some(from), Some(to)) => {
            data.find_shortest_route(parse_point(from)?, parse_point(to)?)
        }
        _ => bail!("give either --from/--to landmark names or --from-xy/--to-xy points"),
    };

    match route {
        Some(route) => {
            println!("{route}");
            for point in &route.path {
                println!("  {point}");
            }
        }
        None => println!("no route available"),
    }
    Ok(())
}
