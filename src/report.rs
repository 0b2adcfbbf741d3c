//! Markdown rendering for each operation.
//!
//! Renderers are pure: they take the parsed reply (or `None` when the reply
//! had no usable JSON), the raw reply text and a preformatted timestamp.

use crate::twitter_message::{Classification, Side, SideCounts, Sides, TopicStance, Tweet};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render_search(query: &str, raw: &str, tweets: Option<&[Tweet]>, stamp: &str) -> String {
    let mut out = format!("# X Search: {}\n\n", query);

    let Some(tweets) = tweets else {
        out.push_str(raw);
        out.push('\n');
        return out;
    };

    out.push_str(&format!("*{} results · {}*\n\n", tweets.len(), stamp));
    for (i, t) in tweets.iter().enumerate() {
        out.push_str(&format!(
            "**{}. {}**\n",
            i + 1,
            t.author.as_deref().unwrap_or("???")
        ));
        out.push_str(&blockquote(t.text.as_deref().unwrap_or("")));
        out.push_str(&format!(
            "📊 {} · [Link]({})\n\n",
            t.engagement.as_deref().unwrap_or(""),
            t.url.as_deref().unwrap_or("")
        ));
    }
    out
}

/// The search step of a topic analysis came back without a tweet list.
pub fn render_topic_unavailable(query: &str, raw: &str) -> String {
    format!(
        "# Topic Analysis: {}\n\nCould not find tweets. Raw response:\n\n{}\n",
        query, raw
    )
}

/// Render the classified tweets and tally the sides in the same pass.
///
/// Tweets with no verdict are labelled `?` and left out of every bucket.
pub fn render_topic(
    query: &str,
    sides: &Sides,
    tweets: &[Tweet],
    classification: &Classification,
    stamp: &str,
) -> (String, SideCounts) {
    let mut out = format!("# Topic Analysis: {}\n\n", query);
    out.push_str(&format!(
        "**{}** vs **{}** · {} tweets · {}\n\n",
        sides.a,
        sides.b,
        tweets.len(),
        stamp
    ));

    let mut counts = SideCounts::default();
    for (i, t) in tweets.iter().enumerate() {
        let index = i + 1;
        let (label, reason) = match classification.get(&index) {
            Some(verdict) => {
                counts.record(verdict.side);
                let label = match verdict.side {
                    Side::A => sides.a.as_str(),
                    Side::B => sides.b.as_str(),
                    Side::Neutral | Side::Unknown => "Neutral",
                };
                (label, verdict.reason.as_str())
            }
            None => ("?", ""),
        };

        out.push_str(&format!(
            "### {}. {} — *{}*\n",
            index,
            t.author.as_deref().unwrap_or("?"),
            label
        ));
        out.push_str(&blockquote(t.text.as_deref().unwrap_or("")));
        out.push_str(&format!(
            "*{}* · [Link]({})\n\n",
            reason,
            t.url.as_deref().unwrap_or("")
        ));
    }

    out.push_str("---\n## Summary\n");
    out.push_str(&format!("- **{}**: {} tweets\n", sides.a, counts.a));
    out.push_str(&format!("- **{}**: {} tweets\n", sides.b, counts.b));
    out.push_str(&format!("- **Neutral**: {} tweets\n", counts.neutral));

    (out, counts)
}

pub fn render_account(
    handle: &str,
    topic_count: usize,
    raw: &str,
    stances: Option<&[TopicStance]>,
    stamp: &str,
) -> String {
    let mut out = format!("# Account Analysis: @{}\n\n", handle);
    out.push_str(&format!("*{} topics · {}*\n\n", topic_count, stamp));

    let Some(stances) = stances else {
        out.push_str(raw);
        out.push('\n');
        return out;
    };

    for stance in stances {
        let marker = if stance.active { "✅" } else { "❌" };
        out.push_str(&format!("## {} {}\n", marker, stance.topic));
        out.push_str(&format!(
            "{}\n\n",
            stance.position.as_deref().unwrap_or("No data")
        ));
        if !stance.examples.is_empty() {
            for url in &stance.examples {
                out.push_str(&format!("- [{}]({})\n", url, url));
            }
            out.push('\n');
        }
    }
    out
}

pub fn render_ask(handle: &str, question: &str, raw: &str, stamp: &str) -> String {
    format!("# @{}: {}\n\n*{}*\n\n{}\n", handle, question, stamp, raw)
}

/// Quote every line so multi-line tweets stay inside the blockquote.
fn blockquote(text: &str) -> String {
    if text.is_empty() {
        return "> \n".to_string();
    }
    text.lines().map(|line| format!("> {}\n", line)).collect()
}
