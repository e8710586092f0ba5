use clap::Args;
use comfy_table::Table;
use odos_distance::{
    distance_query::{DistanceQuery, DistanceQueryBuilder},
    google_api::{GoogleMatrixClient, GoogleMatrixClientParams},
};

fn parse_timestamp(input: &str) -> Result<jiff::Timestamp, String> {
    input
        .parse::<jiff::Timestamp>()
        .map_err(|error| error.to_string())
}

#[derive(Args)]
pub struct DistanceArgs {
    /// Origin address or "lat,lng" pair (repeat for a batched query)
    #[arg(short = 'o', long = "origin", required = true)]
    origins: Vec<String>,

    /// Destination address or "lat,lng" pair (repeat for a batched query)
    #[arg(short = 'd', long = "destination", required = true)]
    destinations: Vec<String>,

    /// Travel mode (e.g. driving, walking, bicycling, transit)
    #[arg(short, long)]
    mode: Option<String>,

    /// Departure time as an ISO timestamp (default: now)
    #[arg(long, value_parser = parse_timestamp)]
    departure_time: Option<jiff::Timestamp>,

    /// Traffic model (e.g. best_guess, pessimistic, optimistic)
    #[arg(long)]
    traffic_model: Option<String>,

    /// Unit system (metric or imperial)
    #[arg(short, long)]
    units: Option<String>,

    /// Response language code
    #[arg(short, long)]
    language: Option<String>,

    /// Route features to avoid (e.g. tolls, highways, ferries)
    #[arg(long)]
    avoid: Option<String>,

    #[arg(long)]
    sensor: bool,

    /// Correlation tag echoed into every record
    #[arg(short, long)]
    index: Option<String>,

    /// Print raw JSON instead of a table
    #[arg(short, long)]
    json: bool,
}

fn build_query(args: &DistanceArgs) -> DistanceQuery {
    let mut builder = DistanceQueryBuilder::default();

    builder = if let [origin] = args.origins.as_slice() {
        builder.with_origin(origin.as_str())
    } else {
        builder.with_origins(args.origins.clone())
    };

    builder = if let [destination] = args.destinations.as_slice() {
        builder.with_destination(destination.as_str())
    } else {
        builder.with_destinations(args.destinations.clone())
    };

    if let Some(mode) = &args.mode {
        builder = builder.with_mode(mode.as_str());
    }
    if let Some(departure_time) = args.departure_time {
        builder = builder.with_departure_time(departure_time);
    }
    if let Some(traffic_model) = &args.traffic_model {
        builder = builder.with_traffic_model(traffic_model.as_str());
    }
    if let Some(units) = &args.units {
        builder = builder.with_units(units.as_str());
    }
    if let Some(language) = &args.language {
        builder = builder.with_language(language.as_str());
    }
    if let Some(avoid) = &args.avoid {
        builder = builder.with_avoid(avoid.as_str());
    }
    if args.sensor {
        builder = builder.with_sensor(true);
    }
    if let Some(index) = &args.index {
        builder = builder.with_index(index.as_str());
    }

    builder.build()
}

pub async fn run(args: DistanceArgs) -> anyhow::Result<()> {
    let client = GoogleMatrixClient::new(GoogleMatrixClientParams {
        api_key: std::env::var("GOOGLE_API_KEY").ok(),
        client_id: std::env::var("GOOGLE_CLIENT_ID").ok(),
        signature: std::env::var("GOOGLE_SIGNATURE").ok(),
        ..GoogleMatrixClientParams::default()
    });

    let query = build_query(&args);
    let results = client.fetch_distance(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Origin",
        "Destination",
        "Distance",
        "Duration",
        "In traffic",
    ]);

    for record in results.records() {
        table.add_row(vec![
            record.origin.as_str(),
            record.destination.as_str(),
            record.distance.as_str(),
            record.duration.as_str(),
            record.duration_in_traffic.as_str(),
        ]);
    }

    println!("{table}");

    Ok(())
}
