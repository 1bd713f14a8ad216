use std::path::PathBuf;

use clap::{Parser, Subcommand};
use url::Url;

/// Wonderwise proxy server and catalog tools
#[derive(Parser)]
#[command(name = "wonderwise")]
#[command(about = "Category-translating proxy for the Wonderwise tourism API", long_about = None)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP proxy
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:3000
        #[arg(short, long)]
        bind: Option<String>,
        /// Report failures with 4xx/5xx statuses instead of always 200
        #[arg(long)]
        strict_status: bool,
    },
    /// Answer one proxy request and print the JSON body
    Fetch {
        /// `all`, `<category>` or `<category>/<id>`
        endpoint: String,
    },
    /// Show every category with its items
    Landing {
        /// Read through a running proxy instead of the upstream directly
        #[arg(long, value_name = "URL")]
        proxy: Option<Url>,
    },
    /// Show a single item
    Detail {
        category: String,
        id: String,
        /// Read through a running proxy instead of the upstream directly
        #[arg(long, value_name = "URL")]
        proxy: Option<Url>,
    },
    /// Print the upstream path for an endpoint
    Translate {
        endpoint: String,
    },
}
