use crate::error::XSearchError;
use std::collections::HashMap;
use std::str::FromStr;

/// A tweet as reported back by the model. Every field is optional because the
/// model is free to omit or mangle any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tweet {
    pub url: Option<String>,
    pub author: Option<String>,
    pub text: Option<String>,
    pub engagement: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
    Neutral,
    Unknown,
}

impl Side {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "a" => Side::A,
            "b" => Side::B,
            "neutral" => Side::Neutral,
            _ => Side::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub side: Side,
    pub reason: String,
}

/// Verdicts keyed by 1-based tweet index.
pub type Classification = HashMap<usize, Verdict>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicStance {
    pub topic: String,
    pub active: bool,
    pub position: Option<String>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideCounts {
    pub a: usize,
    pub b: usize,
    pub neutral: usize,
}

impl SideCounts {
    pub fn record(&mut self, side: Side) {
        match side {
            Side::A => self.a += 1,
            Side::B => self.b += 1,
            Side::Neutral | Side::Unknown => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.a + self.b + self.neutral
    }
}

/// The two labels a topic gets split into, parsed from `"A|B"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sides {
    pub a: String,
    pub b: String,
}

impl FromStr for Sides {
    type Err = XSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').map(str::trim).collect();
        match parts.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => Ok(Sides {
                a: a.to_string(),
                b: b.to_string(),
            }),
            _ => Err(XSearchError::InvalidSides(s.to_string())),
        }
    }
}

/// Strip leading `@`s so `@user` and `user` are the same account.
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_string()
}
