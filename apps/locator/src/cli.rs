use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "warehouse-locator", version, about = "Find warehouses by state and district")]
pub struct CliArgs {
    /// Override the location CSV (path or URL)
    #[arg(long, value_name = "PATH", global = true)]
    pub csv: Option<String>,

    /// Override the warehouse API endpoint
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List states from the location data
    States,

    /// List the districts of a state
    Districts {
        /// State name as it appears in the location data
        state: String,
    },

    /// Search warehouses by state and/or district
    Search {
        #[arg(long, default_value = "")]
        state: String,

        #[arg(long, default_value = "")]
        district: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Write the rendered page to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Show the popular warehouses panel
    Popular {
        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Write the rendered page to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(csv) = &self.csv {
            std::env::set_var("LOCATION_CSV", csv);
        }
        if let Some(url) = &self.api_url {
            std::env::set_var("WAREHOUSE_API_URL", url);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_search_with_global_flags() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "warehouse-locator",
            "search",
            "--state",
            "Karnataka",
            "--csv",
            "locations.csv",
            "--json",
        ])?;

        assert_eq!(args.csv.as_deref(), Some("locations.csv"));
        match args.command {
            Command::Search {
                state,
                district,
                json,
                out,
            } => {
                assert_eq!(state, "Karnataka");
                assert_eq!(district, "");
                assert!(json);
                assert!(out.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_districts_requires_state() {
        assert!(CliArgs::try_parse_from(["warehouse-locator", "districts"]).is_err());
    }
}
