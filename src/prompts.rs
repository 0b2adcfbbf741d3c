//! Prompt templates for each operation. Every structured prompt spells out
//! the JSON shape it expects back and insists on real x.com links.

use crate::twitter_message::{Sides, Tweet};

pub fn search_prompt(query: &str, limit: u32) -> String {
    format!(
        r#"Find the top {limit} most popular/viral tweets about: "{query}"

Return results as JSON:
{{
  "tweets": [
    {{
      "url": "https://x.com/username/status/...",
      "author": "@username",
      "text": "tweet text (first 280 chars)",
      "engagement": "likes/retweets summary"
    }}
  ]
}}

IMPORTANT: Every tweet MUST include its real x.com URL. Use x_search to find them. Focus on high engagement."#
    )
}

pub fn topic_search_prompt(query: &str, limit: u32) -> String {
    format!(
        r#"Find the top {limit} most popular/viral tweets about: "{query}"

Return as JSON:
{{
  "tweets": [
    {{
      "url": "https://x.com/username/status/...",
      "author": "@username",
      "text": "full tweet text",
      "engagement": "likes/retweets summary"
    }}
  ]
}}

IMPORTANT: Every tweet MUST include its real x.com URL. Use x_search. Focus on high-engagement tweets that express opinions."#
    )
}

/// Tweets are numbered from 1 in the order given; the model answers by index.
pub fn classify_prompt(sides: &Sides, tweets: &[Tweet]) -> String {
    let tweets_text = tweets
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "Tweet {} by {}:\n{}",
                i + 1,
                t.author.as_deref().unwrap_or("?"),
                t.text.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Classify each tweet into one of two sides. Only use "neutral" if truly impossible to classify.

Side A = "{side_a}"
Side B = "{side_b}"

Tweets:
{tweets_text}

Return JSON:
{{
  "classifications": [
    {{"index": 1, "side": "a" or "b" or "neutral", "reason": "brief reason"}}
  ]
}}

Be decisive. Most tweets should clearly fall into side A or B."#,
        side_a = sides.a,
        side_b = sides.b,
    )
}

pub fn account_prompt(handle: &str, topics: &[String]) -> String {
    let topic_list = topics
        .iter()
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Analyze the Twitter/X account @{handle} and determine their position on each topic:

{topic_list}

For each topic:
1. "active": true if they've discussed it, false otherwise
2. "position": brief description of their stance (max 1 sentence)
3. "examples": up to 3 REAL tweet URLs (https://x.com/username/status/ID) showing their position

IMPORTANT: Every claim must be backed by a real tweet URL. Use x_search to find relevant tweets.

Return JSON:
{{
  "account": "@{handle}",
  "topics": {{
    "Topic Name": {{
      "active": true/false,
      "position": "their stance",
      "examples": ["https://x.com/..."]
    }}
  }}
}}"#
    )
}

pub fn ask_prompt(handle: &str, question: &str) -> String {
    format!(
        r#"Answer this question about the Twitter/X account @{handle}:

"{question}"

CITATION RULES (mandatory):
- Use x_search to find relevant tweets
- EVERY claim must link to a specific tweet: [text](https://x.com/user/status/ID)
- Include at least one tweet URL per key point
- Format: markdown with inline links
- If you cannot find a source tweet, say so explicitly

Be concise and factual."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_prompt_embeds_query_and_limit() {
        let prompt = search_prompt("rust async", 7);
        assert!(prompt.starts_with("Find the top 7 most popular/viral tweets about: \"rust async\""));
        assert!(prompt.contains("\"tweets\": ["));
        assert!(prompt.contains("real x.com URL"));
    }

    #[test]
    fn test_classify_prompt_enumerates_in_order() {
        let sides = Sides {
            a: "Pro".to_string(),
            b: "Con".to_string(),
        };
        let tweets = vec![
            Tweet {
                author: Some("@first".to_string()),
                text: Some("one".to_string()),
                ..Tweet::default()
            },
            Tweet {
                text: Some("two".to_string()),
                ..Tweet::default()
            },
        ];
        let prompt = classify_prompt(&sides, &tweets);
        assert!(prompt.contains("Side A = \"Pro\""));
        assert!(prompt.contains("Side B = \"Con\""));
        assert!(prompt.contains("Tweet 1 by @first:\none\n\nTweet 2 by ?:\ntwo"));
    }

    #[test]
    fn test_account_prompt_lists_topics() {
        let topics = vec!["AI".to_string(), "Crypto".to_string()];
        let prompt = account_prompt("someuser", &topics);
        assert!(prompt.contains("account @someuser"));
        assert!(prompt.contains("- AI\n- Crypto"));
        assert!(prompt.contains("\"account\": \"@someuser\""));
    }

    #[test]
    fn test_ask_prompt_quotes_question() {
        let prompt = ask_prompt("someuser", "what do they ship?");
        assert!(prompt.contains("@someuser"));
        assert!(prompt.contains("\"what do they ship?\""));
        assert!(prompt.contains("CITATION RULES"));
    }
}
