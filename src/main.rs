mod cli;

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ContentKind};
use showroom::api::ApiEnvelope;
use showroom::config::ShowroomConfig;
use showroom::mapping::{job_posting_from_raw, news_article_from_raw, product_from_raw};
use showroom::media::resolve_media_path;
use showroom::raw::RawRecord;
use showroom::Showroom;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ShowroomConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve { path, origin } => {
            let config = with_origin(config, origin.as_deref())?;
            println!("{}", resolve_media_path(Some(path.as_str()), &config.backend_origin));
        }
        Commands::Normalize { kind, file, origin } => {
            let config = with_origin(config, origin.as_deref())?;
            let data = read_payload(&file)?;
            // offline: the source is never queried
            let showroom = Showroom::connect(&config)?;
            print_json(&normalize(&showroom, kind, data.as_ref())?)?;
        }
        Commands::Fetch { kind, id, page } => {
            let showroom = Showroom::connect(&config)?;
            print_json(&fetch(&showroom, kind, id.as_deref(), page).await?)?;
        }
    }
    Ok(())
}

fn with_origin(config: ShowroomConfig, origin: Option<&str>) -> Result<ShowroomConfig> {
    match origin {
        Some(o) => config.with_origin(o),
        None => Ok(config),
    }
}

fn read_payload(file: &Path) -> Result<Option<Value>> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let value: Value = serde_json::from_str(&text).with_context(|| format!("parsing JSON in {}", file.display()))?;
    ApiEnvelope::from_json(value).into_data()
}

fn normalize(showroom: &Showroom, kind: ContentKind, data: Option<&Value>) -> Result<Value> {
    let defaults = showroom.defaults();
    let origin = showroom.origin();
    let raw = RawRecord::from(data);
    let out = match kind {
        ContentKind::Product => to_json(product_from_raw(raw, &defaults.product, origin))?,
        ContentKind::Products => to_json(showroom.product_page(data))?,
        ContentKind::Facilities => to_json(showroom.facility_list(data))?,
        ContentKind::News => to_json(showroom.news_page(data))?,
        ContentKind::Article => to_json(news_article_from_raw(raw, &defaults.news, origin))?,
        ContentKind::Jobs => to_json(showroom.job_list(data))?,
        ContentKind::Job => to_json(job_posting_from_raw(raw, &defaults.job, &defaults.employment_type, origin))?,
        ContentKind::Banners => to_json(showroom.banner_list(data))?,
        ContentKind::Home => return Err(anyhow!("`home` is assembled from several endpoints; use `fetch home`")),
    };
    Ok(out)
}

async fn fetch(showroom: &Showroom, kind: ContentKind, id: Option<&str>, page: Option<u32>) -> Result<Value> {
    let id = match (kind.needs_id(), id) {
        (true, Some(id)) => id,
        (true, None) => return Err(anyhow!("{kind:?} needs --id")),
        (false, _) => "",
    };
    let out = match kind {
        ContentKind::Product => to_json(showroom.product(id).await?)?,
        ContentKind::Products => to_json(showroom.products(page).await?)?,
        ContentKind::Facilities => to_json(showroom.facility_features().await?)?,
        ContentKind::News => to_json(showroom.news(page).await?)?,
        ContentKind::Article => to_json(showroom.news_article(id).await?)?,
        ContentKind::Jobs => to_json(showroom.jobs().await?)?,
        ContentKind::Job => to_json(showroom.job(id).await?)?,
        ContentKind::Banners => to_json(showroom.banners().await?)?,
        ContentKind::Home => to_json(showroom.home().await?)?,
    };
    Ok(out)
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).context("serializing normalized content")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
