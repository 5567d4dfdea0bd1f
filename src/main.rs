use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use json2rss::config::Config;

#[derive(Parser, Debug)]
#[command(name = "json2rss", about = "Generate an RSS 2.0 feed from a JSON array of blog posts")]
struct Args {
    /// Path of the JSON feed-data file to read
    #[arg(long = "in", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path of the RSS XML file to write
    #[arg(long = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Site base URL; channel link and base for the feed self link
    #[arg(long, value_name = "URL")]
    site: Option<String>,

    /// Channel title
    #[arg(long)]
    title: Option<String>,

    /// Channel description
    #[arg(long)]
    desc: Option<String>,

    /// Channel language code
    #[arg(long)]
    lang: Option<String>,

    /// Channel time-to-live in minutes
    #[arg(long)]
    ttl: Option<u32>,

    /// Maximum number of feed items
    #[arg(long)]
    limit: Option<usize>,

    /// TOML config file (CLI flags override its values)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(site) = args.site {
        config.site_url = site;
    }
    if let Some(title) = args.title {
        config.feed_title = title;
    }
    if let Some(desc) = args.desc {
        config.feed_description = desc;
    }
    if let Some(lang) = args.lang {
        config.feed_language = lang;
    }
    if let Some(ttl) = args.ttl {
        config.ttl_minutes = ttl;
    }
    if let Some(limit) = args.limit {
        config.max_items = limit;
    }

    json2rss::run(&config)?;

    println!("RSS written to {}", config.output.display());
    Ok(())
}
