use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::fetcher::{DEFAULT_OSRM_URL, RouteFetcher};
use client::location::{FixedLocation, LocationProvider};
use shared::state::TripState;
use shared::{Coordinate, catalog};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Preview a driving route from a fix to a catalog destination"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in destinations
    Destinations,
    /// Fetch and print the route from a coordinate to a destination
    Route {
        /// Latitude of the current fix
        #[arg(long)]
        lat: f64,
        /// Longitude of the current fix
        #[arg(long)]
        lon: f64,
        /// Destination name, as printed by `destinations`
        #[arg(long)]
        to: String,
        /// Base URL of the OSRM-compatible routing service
        #[arg(long, default_value = DEFAULT_OSRM_URL)]
        osrm_url: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Destinations => {
            for name in catalog::names() {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Command::Route {
            lat,
            lon,
            to,
            osrm_url,
        } => run_route(Coordinate { lat, lon }, &to, &osrm_url).await,
    }
}

async fn run_route(fix: Coordinate, to: &str, osrm_url: &str) -> ExitCode {
    let mut trip = TripState::default();

    let provider = FixedLocation::new(fix);
    match provider.current_location().await {
        Ok(coord) => trip.location_fixed(coord),
        Err(err) => {
            trip.location_failed(&err);
            eprintln!("{}", trip.error().unwrap_or("location unavailable"));
            return ExitCode::FAILURE;
        }
    }

    let Some(query) = trip.select_destination(to) else {
        eprintln!("{}", trip.error().unwrap_or("no fix for route lookup"));
        return ExitCode::FAILURE;
    };

    let fetcher = match RouteFetcher::new(osrm_url) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let result = fetcher.fetch_route(query.start, query.end).await;
    trip.route_resolved(query.generation, result);

    if let Some(err) = trip.error() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match (trip.route(), trip.distance_label(), trip.duration_label()) {
        (Some(route), Some(distance), Some(duration)) => {
            println!("Route to {to}: {} points", route.path.len());
            println!("Distance: {distance}");
            println!("Estimated Time: {duration}");
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("route lookup produced no result");
            ExitCode::FAILURE
        }
    }
}
