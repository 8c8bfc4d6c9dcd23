//! `ellipsomap` CLI - Parse ellipsometer reports and interpolate thickness maps

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ellipsomap::{Config, GridFormat, ReportFormat};

mod cmd;

#[derive(Parser)]
#[command(name = "ellipsomap")]
#[command(about = "Film-thickness maps from ellipsometer scan reports")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/ellipsomap/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse reports and print the extracted sites
    Parse {
        /// Report documents (.pdf, .txt)
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportOutputFormat,
    },

    /// Interpolate thickness onto a P×P mesh
    Grid {
        /// Report documents (.pdf, .txt)
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        /// Mesh points per axis
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Emit mesh coordinates as (r, theta)
        #[arg(long)]
        polar: bool,

        /// Emit mesh coordinates as (x, y), overriding the config file
        #[arg(long, conflicts_with = "polar")]
        cartesian: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<GridOutputFormat>,

        /// Output file (directory when several documents are given)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportOutputFormat {
    Json,
    Markdown,
}

impl From<ReportOutputFormat> for ReportFormat {
    fn from(format: ReportOutputFormat) -> Self {
        match format {
            ReportOutputFormat::Json => ReportFormat::Json,
            ReportOutputFormat::Markdown => ReportFormat::Markdown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GridOutputFormat {
    Json,
    Csv,
}

impl From<GridOutputFormat> for GridFormat {
    fn from(format: GridOutputFormat) -> Self {
        match format {
            GridOutputFormat::Json => GridFormat::Json,
            GridOutputFormat::Csv => GridFormat::Csv,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for data
    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let ok = match cli.command {
        Commands::Parse { documents, format } => {
            cmd::parse::cmd_parse(documents, format.into()).await?
        }
        Commands::Grid {
            documents,
            points,
            polar,
            cartesian,
            format,
            output,
        } => {
            let options = cmd::grid::GridOptions {
                points: points.unwrap_or(config.grid.points),
                polar: !cartesian && (polar || config.grid.polar),
                format: format.map_or(config.grid.format, Into::into),
                output,
            };
            cmd::grid::cmd_grid(documents, options).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
