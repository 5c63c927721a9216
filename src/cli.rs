use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and normalize showcase-site content from the command line
#[derive(Parser)]
#[command(name = "showroom")]
#[command(about = "Normalize backend content records into display-ready JSON", long_about = None)]
pub struct Cli {
    /// Config file (defaults to showroom.toml in the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a media path against the backend origin
    Resolve {
        path: String,
        /// Override the configured backend origin
        #[arg(long)]
        origin: Option<String>,
    },
    /// Normalize a saved API response (envelope or bare payload)
    Normalize {
        #[arg(value_enum)]
        kind: ContentKind,
        file: PathBuf,
        /// Override the configured backend origin
        #[arg(long)]
        origin: Option<String>,
    },
    /// Fetch from the backend and print normalized content
    Fetch {
        #[arg(value_enum)]
        kind: ContentKind,
        /// Record id or slug, for single-record kinds
        #[arg(long)]
        id: Option<String>,
        /// Listing page
        #[arg(long)]
        page: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentKind {
    Product,
    Products,
    Facilities,
    News,
    Article,
    Jobs,
    Job,
    Banners,
    Home,
}

impl ContentKind {
    pub fn needs_id(self) -> bool {
        matches!(self, Self::Product | Self::Article | Self::Job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fetch_with_id() {
        let cli = Cli::parse_from(["showroom", "fetch", "product", "--id", "p1"]);
        match cli.command {
            Commands::Fetch { kind, id, page } => {
                assert_eq!(kind, ContentKind::Product);
                assert_eq!(id.as_deref(), Some("p1"));
                assert_eq!(page, None);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["showroom", "resolve", "/uploads/a.png", "--config", "x.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
