use crate::cli::Command;
use crate::client::ModelClient;
use crate::error::XSearchError;
use crate::prompts;
use crate::report;
use crate::twitter_message::{normalize_handle, Sides};
use crate::twitter_parser::{extract_json, parse_classifications, parse_topic_stances, parse_tweets};
use anyhow::Result;

/// A validated command, ready to run against a model.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Search {
        query: String,
        limit: u32,
    },
    Topic {
        query: String,
        sides: Sides,
        limit: u32,
    },
    Account {
        handle: String,
        topics: Vec<String>,
    },
    Ask {
        handle: String,
        question: String,
    },
}

impl TryFrom<Command> for Operation {
    type Error = XSearchError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::Search { query, limit } => Operation::Search {
                query: query.join(" "),
                limit,
            },
            Command::Topic {
                query,
                sides,
                limit,
            } => Operation::Topic {
                query: query.join(" "),
                sides: sides.parse()?,
                limit,
            },
            Command::Account { handle, topics } => Operation::Account {
                handle: normalize_handle(&handle),
                topics: topics
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            Command::Ask { handle, question } => Operation::Ask {
                handle: normalize_handle(&handle),
                question: question.join(" "),
            },
        })
    }
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Search { .. } => "search",
            Operation::Topic { .. } => "topic",
            Operation::Account { .. } => "account",
            Operation::Ask { .. } => "ask",
        }
    }

    /// Run the pipeline and return the markdown report. `stamp` is the
    /// generation time shown in the report.
    pub async fn run<C: ModelClient + ?Sized>(&self, client: &C, stamp: &str) -> Result<String> {
        tracing::debug!(operation = self.name(), "running");
        match self {
            Operation::Search { query, limit } => {
                eprintln!("🔍 Searching X for: {}", query);
                let raw = client.chat(&prompts::search_prompt(query, *limit), &[]).await?;
                let tweets = extract_json(&raw).and_then(|v| parse_tweets(&v));
                Ok(report::render_search(query, &raw, tweets.as_deref(), stamp))
            }
            Operation::Topic {
                query,
                sides,
                limit,
            } => run_topic(client, query, sides, *limit, stamp).await,
            Operation::Account { handle, topics } => {
                eprintln!("🔍 Analyzing @{} across {} topics", handle, topics.len());
                let handles = [handle.clone()];
                let raw = client
                    .chat(&prompts::account_prompt(handle, topics), &handles)
                    .await?;
                let stances = extract_json(&raw).and_then(|v| parse_topic_stances(&v));
                Ok(report::render_account(
                    handle,
                    topics.len(),
                    &raw,
                    stances.as_deref(),
                    stamp,
                ))
            }
            Operation::Ask { handle, question } => {
                eprintln!("🔍 Asking about @{}: {}", handle, question);
                let handles = [handle.clone()];
                let raw = client
                    .chat(&prompts::ask_prompt(handle, question), &handles)
                    .await?;
                Ok(report::render_ask(handle, question, &raw, stamp))
            }
        }
    }
}

/// Search, then classify the found tweets in a second call built from the
/// first call's results.
async fn run_topic<C: ModelClient + ?Sized>(
    client: &C,
    query: &str,
    sides: &Sides,
    limit: u32,
    stamp: &str,
) -> Result<String> {
    eprintln!("🔍 Finding tweets about: {}", query);
    let raw = client
        .chat(&prompts::topic_search_prompt(query, limit), &[])
        .await?;
    let Some(tweets) = extract_json(&raw).and_then(|v| parse_tweets(&v)) else {
        return Ok(report::render_topic_unavailable(query, &raw));
    };

    let classification = if tweets.is_empty() {
        Default::default()
    } else {
        eprintln!("📊 Classifying into: {} vs {}", sides.a, sides.b);
        let raw = client
            .chat(&prompts::classify_prompt(sides, &tweets), &[])
            .await?;
        extract_json(&raw)
            .map(|v| parse_classifications(&v))
            .unwrap_or_default()
    };

    let (markdown, counts) = report::render_topic(query, sides, &tweets, &classification, stamp);
    tracing::debug!(a = counts.a, b = counts.b, neutral = counts.neutral, "topic tally");
    Ok(markdown)
}
