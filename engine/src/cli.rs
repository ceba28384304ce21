//! CLI interface for StoryMap
//!
//! Each subcommand maps onto one orchestrator operation and stands in for
//! the UI event that would trigger it (a search box, a marker click, a tab).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// StoryMap engine
///
/// Fetches stories, cultural insights and climate events for Australian
/// locations, falling back to built-in content when a provider is missing
/// or slow.
#[derive(Parser, Debug)]
#[command(name = "storymap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a place name to coordinates and a short description
    Search {
        /// Free-text location query
        query: String,
    },

    /// Short heritage story for a location card
    Story {
        location: String,
    },

    /// Generate a single themed narrative
    Narrative {
        location: String,

        /// Narrative theme (default: cultural heritage)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Generate one narrative for each story theme
    Stories {
        location: String,
    },

    /// Music, art, food and events for a location
    Insights {
        location: String,
    },

    /// Music, film and book recommendations
    Recommendations {
        location: String,
    },

    /// Climate map events, with weather when a location is given
    Climate {
        /// Selected location name
        #[arg(long)]
        location: Option<String>,

        /// Latitude of the selected location
        #[arg(long, allow_negative_numbers = true, requires = "location")]
        lat: Option<f64>,

        /// Longitude of the selected location
        #[arg(long, allow_negative_numbers = true, requires = "location")]
        lng: Option<f64>,
    },

    /// Show which provider credentials are configured
    Providers,
}
