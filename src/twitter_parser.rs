use crate::twitter_message::{Classification, Side, TopicStance, Tweet, Verdict};
use serde_json::Value;

const MAX_EXAMPLES: usize = 3;

/// Pull a JSON value out of a model reply.
///
/// Looks inside the first ```json fence, falling back to the first generic
/// ``` fence, falling back to the whole text. Returns `None` when the chosen
/// text does not parse; callers render the raw reply instead.
///
/// Only the first fence pair is considered, so a JSON string value that itself
/// contains ``` gets cut short.
pub fn extract_json(text: &str) -> Option<Value> {
    let candidate = fenced_body(text).unwrap_or(text).trim();
    match serde_json::from_str(candidate) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("no structured data in reply: {}", e);
            None
        }
    }
}

fn fenced_body(text: &str) -> Option<&str> {
    let (_, after) = text
        .split_once("```json")
        .or_else(|| text.split_once("```"))?;
    Some(after.split_once("```").map_or(after, |(body, _)| body))
}

/// Parse `{"tweets": [...]}`. `None` if there is no tweet array at all.
pub fn parse_tweets(value: &Value) -> Option<Vec<Tweet>> {
    let tweets = value.get("tweets")?.as_array()?;
    Some(
        tweets
            .iter()
            .map(|t| Tweet {
                url: field_text(t, "url"),
                author: field_text(t, "author"),
                text: field_text(t, "text"),
                engagement: field_text(t, "engagement"),
            })
            .collect(),
    )
}

/// Parse `{"classifications": [{"index", "side", "reason"}]}` into a map keyed
/// by tweet index. Entries without a usable index are dropped.
pub fn parse_classifications(value: &Value) -> Classification {
    let mut classification = Classification::new();
    let Some(entries) = value.get("classifications").and_then(Value::as_array) else {
        return classification;
    };

    for entry in entries {
        let Some(index) = entry.get("index").and_then(index_value) else {
            continue;
        };
        let side = entry
            .get("side")
            .and_then(Value::as_str)
            .map(Side::from_label)
            .unwrap_or(Side::Unknown);
        let reason = field_text(entry, "reason").unwrap_or_default();
        classification.insert(index, Verdict { side, reason });
    }

    classification
}

/// Parse `{"topics": {"Name": {"active", "position", "examples"}}}`, keeping
/// the order the model listed the topics in.
pub fn parse_topic_stances(value: &Value) -> Option<Vec<TopicStance>> {
    let topics = value.get("topics")?.as_object()?;
    Some(
        topics
            .iter()
            .map(|(topic, info)| TopicStance {
                topic: topic.clone(),
                active: info.get("active").is_some_and(truthy),
                position: field_text(info, "position"),
                examples: info
                    .get("examples")
                    .and_then(Value::as_array)
                    .map(|urls| {
                        urls.iter()
                            .filter_map(Value::as_str)
                            .take(MAX_EXAMPLES)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect(),
    )
}

/// Strings as-is, other scalars in their JSON form, null/missing as `None`.
fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn index_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_bare_json() {
        let text = r#"{"tweets": [{"author": "@a"}]}"#;
        assert_eq!(
            extract_json(text),
            Some(json!({"tweets": [{"author": "@a"}]}))
        );
    }

    #[test]
    fn test_extract_json_fence() {
        let text = "Here you go:\n```json\n{\"a\":1}\n```\nEnjoy.";
        assert_eq!(extract_json(text), Some(json!({"a": 1})));
    }

    #[test]
    fn test_extract_generic_fence() {
        let text = "```\n{\"a\": [1, 2]}\n```";
        assert_eq!(extract_json(text), Some(json!({"a": [1, 2]})));
    }

    #[test]
    fn test_extract_json_fence_wins_over_earlier_generic_fence() {
        let text = "```\nnot this\n```\n```json\n{\"b\": true}\n```";
        assert_eq!(extract_json(text), Some(json!({"b": true})));
    }

    #[test]
    fn test_extract_first_json_fence_only() {
        let text = "```json\n{\"first\": 1}\n```\n```json\n{\"second\": 2}\n```";
        assert_eq!(extract_json(text), Some(json!({"first": 1})));
    }

    #[test]
    fn test_extract_unclosed_fence_takes_rest() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(text), Some(json!({"a": 1})));
    }

    #[test]
    fn test_extract_not_json() {
        assert_eq!(extract_json("not json at all"), None);
    }

    #[test]
    fn test_extract_empty_fence() {
        assert_eq!(extract_json("```json\n```"), None);
    }

    #[test]
    fn test_extract_truncates_at_inner_fence() {
        // The first closing fence ends extraction even inside a string value.
        let text = "```json\n{\"code\": \"```rust\"}\n```";
        assert_eq!(extract_json(text), None);
    }

    #[test]
    fn test_parse_tweets_with_missing_fields() {
        let value = json!({
            "tweets": [
                {"url": "https://x.com/a/status/1", "author": "@a", "text": "hi", "engagement": "5 likes"},
                {"text": "no author", "engagement": 42}
            ]
        });
        let tweets = parse_tweets(&value).unwrap();
        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0].author.as_deref(), Some("@a"));
        assert_eq!(tweets[1].author, None);
        assert_eq!(tweets[1].engagement.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_tweets_requires_array() {
        assert!(parse_tweets(&json!({"results": []})).is_none());
        assert!(parse_tweets(&json!({"tweets": "none"})).is_none());
        assert!(parse_tweets(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_parse_classifications() {
        let value = json!({
            "classifications": [
                {"index": 1, "side": "a", "reason": "supports"},
                {"index": "2", "side": "b"},
                {"index": 3},
                {"side": "a", "reason": "no index"}
            ]
        });
        let map = parse_classifications(&value);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&1].side, Side::A);
        assert_eq!(map[&1].reason, "supports");
        assert_eq!(map[&2].side, Side::B);
        assert_eq!(map[&2].reason, "");
        assert_eq!(map[&3].side, Side::Unknown);
    }

    #[test]
    fn test_parse_classifications_missing_key() {
        assert!(parse_classifications(&json!({"other": 1})).is_empty());
    }

    #[test]
    fn test_parse_topic_stances_keeps_order_and_caps_examples() {
        let value = json!({
            "account": "@someone",
            "topics": {
                "Zebra": {"active": true, "position": "likes them", "examples": ["u1", "u2", "u3", "u4"]},
                "Apple": {"active": false}
            }
        });
        let stances = parse_topic_stances(&value).unwrap();
        assert_eq!(stances.len(), 2);
        assert_eq!(stances[0].topic, "Zebra");
        assert!(stances[0].active);
        assert_eq!(stances[0].examples, vec!["u1", "u2", "u3"]);
        assert_eq!(stances[1].topic, "Apple");
        assert!(!stances[1].active);
        assert_eq!(stances[1].position, None);
        assert!(stances[1].examples.is_empty());
    }

    #[test]
    fn test_parse_topic_stances_requires_object() {
        assert!(parse_topic_stances(&json!({"topics": ["a", "b"]})).is_none());
    }
}
