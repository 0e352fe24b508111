use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use fuel_prices::api::{ApiClient, ApiConfig, DEFAULT_TIMEOUT_SECS, FetchError};
use fuel_prices::cache::ReferenceCache;
use fuel_prices::domain::{Matches, PriceList, Product, ZoneLevel};
use fuel_prices::prices::PriceService;
use fuel_prices::resolve::Resolver;

/// Format of the publication timestamp in the header line.
const DATE_DISPLAY: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Parser)]
#[command(name = "fuel-prices")]
#[command(about = "Precios de carburantes en estaciones de servicio de España")]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("zona").args(["ccaa", "provincia", "municipio"])))]
struct Cli {
    /// Comunidad autónoma
    #[arg(short = 'c', long, value_name = "NOMBRE")]
    ccaa: Option<String>,

    /// Provincia
    #[arg(short = 'p', long, value_name = "NOMBRE")]
    provincia: Option<String>,

    /// Municipio
    #[arg(short = 'm', long, value_name = "NOMBRE")]
    municipio: Option<String>,

    /// Restrict to one product (abbreviation or part of its name)
    #[arg(short = 'P', long, value_name = "NOMBRE")]
    producto: Option<String>,

    /// List the available products
    #[arg(short = 'C', long)]
    carburantes: bool,

    /// List the autonomous communities
    #[arg(long)]
    comunidades: bool,

    /// Request timeout in seconds
    #[arg(
        long,
        value_name = "SEGUNDOS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no {level} named {name:?}")]
    NotFound { level: &'static str, name: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = ApiClient::new(ApiConfig::new().with_timeout(cli.timeout))?;
    let reference = Arc::new(ReferenceCache::new(client));
    let resolver = Resolver::new(reference.clone());
    let service = PriceService::new(resolver.clone());

    if cli.carburantes {
        for product in reference.products().await?.iter() {
            println!("{:<8} {}", product.abbreviation(), product.description());
        }
    }

    if cli.comunidades {
        for ccaa in reference.autonomous_communities().await? {
            println!("{:02} {}", ccaa.code(), ccaa);
        }
    }

    let product = match &cli.producto {
        Some(name) => Some(pick_product(resolver.find_product(&[name]).await?, name)?),
        None => None,
    };

    let list = if let Some(name) = &cli.municipio {
        let found = resolver.find_by_name(name).await?;
        let m = found
            .first_municipality()
            .ok_or_else(|| not_found(ZoneLevel::Municipality, name))?;
        match &product {
            Some(p) => service.by_municipality_and_product(m, p).await,
            None => service.by_municipality(m).await,
        }
    } else if let Some(name) = &cli.provincia {
        let found = resolver.find_by_name(name).await?;
        let p = found
            .first_province()
            .ok_or_else(|| not_found(ZoneLevel::Province, name))?;
        match &product {
            Some(product) => service.by_province_and_product(p, product).await,
            None => service.by_province(p).await,
        }
    } else if let Some(name) = &cli.ccaa {
        let found = resolver.find_by_name(name).await?;
        let c = found
            .first_ccaa()
            .ok_or_else(|| not_found(ZoneLevel::Ccaa, name))?;
        match &product {
            Some(p) => service.by_ccaa_and_product(c, p).await,
            None => service.by_ccaa(c).await,
        }
    } else if let Some(p) = &product {
        service.by_product(p).await
    } else {
        return Ok(());
    };

    print_prices(&list);
    Ok(())
}

/// An exact abbreviation wins; otherwise the first match.
fn pick_product(found: Matches<Product>, name: &str) -> Result<Product, CliError> {
    let exact = found
        .iter()
        .find(|p| p.abbreviation().eq_ignore_ascii_case(name.trim()))
        .cloned();
    exact
        .or_else(|| found.first().cloned())
        .ok_or_else(|| CliError::NotFound {
            level: "producto",
            name: name.to_string(),
        })
}

fn not_found(level: ZoneLevel, name: &str) -> CliError {
    CliError::NotFound {
        level: level.label(),
        name: name.to_string(),
    }
}

fn print_prices(list: &PriceList) {
    if let Some(date) = list.published_at {
        println!("Precios publicados el {}", date.format(DATE_DISPLAY));
    }

    for station in list {
        let price = station
            .price
            .map_or_else(|| "  -  ".to_string(), |p| format!("{p:.3}"));
        let locality = station.locality.as_deref().unwrap_or_default();
        match &station.address {
            Some(address) => println!("{price} {} {address}, {locality}", station.label),
            None => println!("{price} {} {locality}", station.label),
        }
    }
}
