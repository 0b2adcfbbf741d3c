use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "X/Twitter search & analysis via Grok", long_about = None)]
pub struct Cli {
    /// Model id to use instead of the configured one
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Config file (defaults to <config dir>/x-search/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search tweets on a topic
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },

    /// Topic analysis with side classification
    Topic {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Two labels, 'SideA|SideB'
        #[arg(long)]
        sides: String,

        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
    },

    /// Analyze an account across topics
    Account {
        handle: String,

        /// Comma-separated topics
        #[arg(long)]
        topics: String,
    },

    /// Freeform question about an account
    Ask {
        handle: String,

        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}
