pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod report;
pub mod twitter_message;
pub mod twitter_parser;
