mod export;
mod fuel;
mod location;
mod render;
mod search;
mod status;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use gasrec_client::BackendClient;
use gasrec_core::{
    Coordinates, FuelInputType, LocationRequest, LocationResolver, PositionOptions,
    ResultPresenter,
};
use tracing_subscriber::EnvFilter;

use crate::location::BackendPositionSource;
use crate::search::{FuelAmount, SearchOptions, SearchSession};
use crate::status::{StatusKind, StatusReporter};

#[derive(Debug, Parser)]
#[command(name = "gasrec")]
#[command(about = "Find and rank gas stations worth the detour")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show backend defaults and API availability
    Config,
    /// Calculate how many gallons are needed
    Fuel {
        /// How the current reading is expressed
        #[arg(long, value_enum, default_value_t = FuelInputArg::Percent)]
        input_type: FuelInputArg,
        /// Percent of the tank, or gallons
        #[arg(long)]
        value: Option<String>,
        /// Tank capacity in gallons
        #[arg(long)]
        tank_size: Option<String>,
    },
    /// Search for stations and rank them
    Search(SearchArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FuelInputArg {
    Percent,
    #[value(alias = "gallon")]
    Volume,
}

impl From<FuelInputArg> for FuelInputType {
    fn from(arg: FuelInputArg) -> Self {
        match arg {
            FuelInputArg::Percent => FuelInputType::Percent,
            FuelInputArg::Volume => FuelInputType::Volume,
        }
    }
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("location").required(true).args(["address", "current", "coords"])))]
#[command(group(ArgGroup::new("fuel").required(true).args(["fuel_needed", "fuel_percent"])))]
struct SearchArgs {
    /// Street address to search around
    #[arg(long)]
    address: Option<String>,
    /// Use the current position
    #[arg(long)]
    current: bool,
    /// Explicit position as LAT,LNG
    #[arg(long, value_parser = parse_coords, allow_hyphen_values = true)]
    coords: Option<Coordinates>,
    /// Gallons to buy
    #[arg(long)]
    fuel_needed: Option<f64>,
    /// Percent of the tank to fill
    #[arg(long)]
    fuel_percent: Option<f64>,
    /// Vehicle fuel economy (backend default when omitted)
    #[arg(long)]
    mpg: Option<f64>,
    /// Tank capacity in gallons (backend default when omitted)
    #[arg(long)]
    tank_size: Option<f64>,
    /// Fuel grade, e.g. 87, 89, 91
    #[arg(long)]
    grade: Option<String>,
    /// Search radius in miles (backend default when omitted)
    #[arg(long)]
    radius: Option<f64>,
    /// Write map markers to this GeoJSON file
    #[arg(long)]
    geojson: Option<PathBuf>,
}

impl SearchArgs {
    fn into_options(self) -> SearchOptions {
        let location = match (self.address, self.coords) {
            (Some(address), _) => LocationRequest::Address(address),
            (None, Some(coords)) => LocationRequest::Coordinates(coords),
            (None, None) => LocationRequest::CurrentPosition,
        };
        let fuel = match self.fuel_needed {
            Some(gallons) => FuelAmount::Gallons(gallons),
            None => FuelAmount::TankPercent(self.fuel_percent.unwrap_or_default()),
        };
        SearchOptions {
            location,
            fuel,
            mpg: self.mpg,
            tank_size: self.tank_size,
            fuel_grade: self.grade,
            radius_miles: self.radius,
            geojson: self.geojson,
        }
    }
}

fn parse_coords(raw: &str) -> Result<Coordinates, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{raw}'"))?;
    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let longitude: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
    Ok(Coordinates::new(latitude, longitude))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = gasrec_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = BackendClient::new(
        &config.backend_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    tracing::debug!(backend = %client.base_url(), env = ?config.env, "client ready");
    let reporter = StatusReporter::stderr();

    let ok = match cli.command {
        Commands::Config => match client.get_config().await {
            Ok(backend) => {
                print!("{}", render::render_backend_config(&backend, &config));
                reporter.report(StatusKind::Success, "Configuration loaded");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load backend config");
                reporter.report(StatusKind::Error, "Failed to load configuration");
                false
            }
        },
        Commands::Fuel {
            input_type,
            value,
            tank_size,
        } => {
            fuel::run_fuel(
                &client,
                &reporter,
                input_type.into(),
                value.as_deref(),
                tank_size.as_deref(),
            )
            .await;
            true
        }
        Commands::Search(args) => {
            let options = PositionOptions {
                high_accuracy: true,
                timeout: config.geolocation_timeout(),
                max_cached_age: config.geolocation_max_age(),
            };
            let mut resolver = LocationResolver::new(BackendPositionSource::new(&client), options);
            let mut presenter = ResultPresenter::new(config.max_map_zoom);
            let mut session = SearchSession {
                client: &client,
                resolver: &mut resolver,
                presenter: &mut presenter,
                reporter: &reporter,
                config: &config,
            };
            session
                .run(&args.into_options(), &mut std::io::stdout().lock())
                .await?
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
