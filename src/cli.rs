use crate::{
    config::{self, Config},
    gateways,
    host::Host,
    settings::ConfigFileSettings,
    store::JsonRecordStore,
};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use geocoder_core::{
    entities::*,
    repositories::{RecordRepo, SaveScope},
    usecases::{self, AddressGeocoding, BatchItem, BatchOptions, BatchReport, InvocationMode},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geocoder", version, about = "Geocode the addresses of CRM records")]
pub struct Args {
    /// Configuration file
    #[arg(long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geocode all records with an address but without coordinates
    GeocodeRecords {
        /// Number of records to process before the cache is released
        #[arg(long, default_value_t = usecases::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
        /// Maximum number of records to process (0 = unlimited)
        #[arg(long, default_value_t = 0)]
        limit: usize,
        /// Geocode records that already have coordinates
        #[arg(long)]
        force: bool,
        /// Show what would be geocoded without saving anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Look up a single address
    Lookup {
        #[arg(long)]
        zipcode: Option<String>,
        #[arg(long)]
        house_number: Option<String>,
        #[arg(long)]
        addition: Option<String>,
        /// Street and house number
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Change the fields of a record and geocode it if the address changed
    UpdateRecord {
        #[arg(long)]
        id: u64,
        /// Field values, e.g. `zipcode=1338ZA`
        #[arg(value_name = "ALIAS=VALUE", value_parser = parse_field_value, required = true)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field_value(s: &str) -> Result<(String, String), String> {
    let (alias, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Missing '=' in '{s}'"))?;
    let alias = alias.trim();
    if alias.is_empty() {
        return Err(format!("Missing field alias in '{s}'"));
    }
    Ok((alias.to_owned(), value.trim().to_owned()))
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config_file = config::file_path_or_default(args.config_file.as_ref());
    let cfg = Config::try_load_from_file_or_default(Some(&config_file))?;
    let settings = ConfigFileSettings::new(&config_file);
    let geocoder = gateways::geocoder(&cfg, settings)?;

    match args.command {
        Command::GeocodeRecords {
            batch_size,
            limit,
            force,
            dry_run,
        } => {
            let store = open_store(&cfg)?;
            let host = Host::new(&store, &geocoder);
            let opts = BatchOptions {
                batch_size,
                limit: (limit > 0).then_some(limit),
                force,
                dry_run,
            };
            let print_progress = |id: RecordId, item: &BatchItem| match item {
                BatchItem::Pending(address) => println!("{id}: would geocode {address}"),
                BatchItem::Failed => println!("{id}: failed"),
                BatchItem::Skipped | BatchItem::Geocoded(_) => {}
            };
            let report =
                usecases::geocode_records_with_progress(&host, &geocoder, &opts, print_progress)?;
            print!("{}", report_table(&report));
        }
        Command::Lookup {
            zipcode,
            house_number,
            addition,
            address,
            city,
            country,
        } => {
            let non_empty = |s: Option<String>| s.as_deref().and_then(non_empty_trimmed);
            let addr = AddressInput {
                zipcode: non_empty(zipcode),
                house_number: non_empty(house_number),
                house_number_addition: non_empty(addition),
                address_line: non_empty(address),
                city: non_empty(city),
                country: non_empty(country),
            };
            if addr.is_empty() {
                return Err(anyhow!("Missing address"));
            }
            match geocoder.geocode(&addr, InvocationMode::Interactive) {
                Some(res) => {
                    println!("{}", serde_json::to_string_pretty(&result_to_json(&res))?);
                }
                None => println!("No position found"),
            }
        }
        Command::UpdateRecord { id, fields } => {
            let store = open_store(&cfg)?;
            let host = Host::new(&store, &geocoder);
            let id = RecordId::from(id);
            let mut record = store.get_record(id)?.unwrap_or_else(|| Record::new(id));
            for (alias, value) in fields {
                record.set_pending(&alias, value);
            }
            let outcome = host.save(&mut record, SaveScope::Default)?;
            log::info!("Saved record {id}: {outcome:?}");
            store.clear_cache();
            if let Some(record) = store.get_record(id)? {
                println!("{}", serde_json::to_string_pretty(record.fields())?);
            }
        }
    }
    Ok(())
}

fn open_store(cfg: &Config) -> Result<JsonRecordStore> {
    log::info!("Open record store {}", cfg.store.dir.display());
    Ok(JsonRecordStore::try_new(&cfg.store.dir)?)
}

fn result_to_json(res: &GeocodeResult) -> serde_json::Value {
    let details = res.details.as_ref().map(|d| {
        serde_json::json!({
            "street_name": d.street_name,
            "house_number": d.house_number,
            "house_number_addition": d.house_number_addition,
            "postal_code": d.postal_code,
            "city": d.city,
            "municipality_code": d.municipality_code,
            "municipality_name": d.municipality_name,
            "province_code": d.province_code,
            "province_name": d.province_name,
        })
    });
    serde_json::json!({
        "latitude": res.lat(),
        "longitude": res.lng(),
        "details": details,
    })
}

fn report_table(report: &BatchReport) -> String {
    let BatchReport {
        total,
        geocoded,
        failed,
        skipped,
    } = report;
    let rows = [
        ("Total", total),
        ("Geocoded", geocoded),
        ("Failed", failed),
        ("Skipped", skipped),
    ];
    let separator = format!("+{}+{}+\n", "-".repeat(10), "-".repeat(9));
    let mut table = separator.clone();
    table.push_str(&format!("| {:<8} | {:>7} |\n", "Metric", "Count"));
    table.push_str(&separator);
    for (name, count) in rows {
        table.push_str(&format!("| {name:<8} | {count:>7} |\n"));
    }
    table.push_str(&separator);
    table
}
