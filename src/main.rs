mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Cli, Commands};
use wonderwise::catalog::RemoteCatalog;
use wonderwise::config::Config;
use wonderwise::error::CatalogError;
use wonderwise::mapping::translate_endpoint;
use wonderwise::types::{format_date_id, CategorySet, ContentItem};
use wonderwise::Wonderwise;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wonderwise=info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { bind, strict_status } => {
            if let Some(bind) = bind { config.server.bind = bind; }
            if strict_status { config.server.strict_status = true; }
            wonderwise::server::serve(Wonderwise::new(config)?).await?;
        }
        Commands::Fetch { endpoint } => {
            let app = Wonderwise::new(config)?;
            let reply = app.proxy(Some(&endpoint)).await;
            println!("{}", serde_json::to_string_pretty(&reply.into_body())?);
        }
        Commands::Landing { proxy } => {
            let landing = match proxy {
                Some(url) => RemoteCatalog::new(url)?.landing().await,
                None => Wonderwise::new(config)?.landing().await,
            };
            match landing {
                Ok(set) => print_landing(&set),
                Err(CatalogError::NoData) => eprintln!("{}", CatalogError::NoData),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Detail { category, id, proxy } => {
            let item = match proxy {
                Some(url) => RemoteCatalog::new(url)?.detail(&category, &id).await?,
                None => Wonderwise::new(config)?.detail(&category, &id).await?,
            };
            match item {
                Some(item) => print_detail(&item),
                None => eprintln!("No item {id} in {category}"),
            }
        }
        Commands::Translate { endpoint } => {
            println!("{}", translate_endpoint(&endpoint));
        }
    }
    Ok(())
}

fn print_landing(set: &CategorySet) {
    for (category, items) in set.iter() {
        println!("{} ({})", category, items.len());
        for item in items {
            println!("  [{}] {}", item.id, item.title);
        }
    }
}

fn print_detail(item: &ContentItem) {
    println!("{} (ID: {})", item.title, item.id);
    if !item.image.is_empty() { println!("{}", item.image); }
    println!();
    println!("{}", item.sanitized_description());
    if let Some(date) = item.updated_on() {
        println!();
        println!("Diperbarui: {}", format_date_id(date));
    }
}
