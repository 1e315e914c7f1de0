//! Rule-based conversation extraction.
//!
//! Keyword and phrase matching only — no language model in the loop:
//! - draft phrases ("draft to me", "send a draft") → route to requester
//! - approval phrases ("approved", "send it") → promote a pending draft
//! - team names from the configured directory
//! - clock + relative-day expressions ("10 AM" + "tomorrow")
//! - event keywords (meeting, deploy, release, incident, …)
//!
//! Extraction is best-effort and never fails: entities that don't match
//! fall back to configured defaults. Ambiguous phrasing (e.g. "to me
//! first" without the word "draft") is not detected.

use regex::Regex;
use tracing::debug;

use crate::config::NotifyConfig;
use crate::dispatch::SEND_NOTIFICATION;
use crate::pipeline::types::{NotificationRequest, ParsedAction};

/// A phrase rule with a compiled regex.
#[derive(Debug, Clone)]
struct PhraseRule {
    /// Human-readable pattern description.
    pattern: String,
    /// Compiled regex for matching.
    regex: Regex,
}

impl PhraseRule {
    fn new(pattern: &str, regex: &str) -> Self {
        Self {
            pattern: pattern.into(),
            regex: Regex::new(regex).unwrap(),
        }
    }
}

/// An event keyword mapped to its canonical subject noun.
#[derive(Debug, Clone)]
struct EventRule {
    regex: Regex,
    canonical: &'static str,
}

/// A team name compiled into a word-boundary matcher.
#[derive(Debug, Clone)]
struct TeamPattern {
    name: String,
    regex: Regex,
}

/// Fallback values used when extraction finds no matching entity.
#[derive(Debug, Clone)]
pub struct ExtractDefaults {
    pub event: String,
    pub time: String,
    pub team: String,
    pub channel: String,
}

impl ExtractDefaults {
    pub fn from_config(config: &NotifyConfig) -> Self {
        Self {
            event: config.default_event.clone(),
            time: config.default_time.clone(),
            team: config.default_team.clone(),
            channel: config.default_channel.clone(),
        }
    }
}

/// Rule-based extractor: conversation string → notification parameters.
pub struct Extractor {
    intent_phrases: Vec<PhraseRule>,
    draft_phrases: Vec<PhraseRule>,
    approval_phrases: Vec<PhraseRule>,
    event_keywords: Vec<EventRule>,
    clock: Regex,
    relative_day: Regex,
    channel_hint: Regex,
    teams: Vec<TeamPattern>,
    defaults: ExtractDefaults,
}

impl Extractor {
    /// Create an extractor with the default phrase rules and the team
    /// directory from `config`.
    pub fn from_config(config: &NotifyConfig) -> Self {
        let mut extractor = Self::default_rules(ExtractDefaults::from_config(config));
        for name in config.teams.keys() {
            extractor.add_team(name);
        }
        extractor
    }

    /// Create an extractor with the default phrase rules and no teams.
    pub fn default_rules(defaults: ExtractDefaults) -> Self {
        let intent_phrases = vec![
            PhraseRule::new("notify", r"(?i)\bnotify\b"),
            PhraseRule::new("alert", r"(?i)\balert\b"),
            PhraseRule::new("remind", r"(?i)\bremind\b"),
            PhraseRule::new("tell ... about", r"(?i)\btell\b.*\babout\b"),
        ];

        let draft_phrases = vec![
            PhraseRule::new("draft to me", r"(?i)\bdraft\s+(?:it\s+)?to\s+me\b"),
            PhraseRule::new("send a draft", r"(?i)\bsend\s+(?:me\s+)?a\s+draft\b"),
            PhraseRule::new("as a draft", r"(?i)\bas\s+a\s+draft\b"),
            PhraseRule::new("draft first", r"(?i)\bdraft\s+first\b"),
        ];

        let approval_phrases = vec![
            PhraseRule::new("approve/approved", r"(?i)\bapproved?\b"),
            PhraseRule::new("looks good", r"(?i)\blooks\s+good\b"),
            PhraseRule::new("send it", r"(?i)\bsend\s+it\b"),
            PhraseRule::new("go ahead", r"(?i)\bgo\s+ahead\b"),
        ];

        let event_keywords = vec![
            EventRule {
                regex: Regex::new(r"(?i)\bmeeting\b").unwrap(),
                canonical: "Meeting",
            },
            EventRule {
                regex: Regex::new(r"(?i)\bdeploy(?:ment)?\b").unwrap(),
                canonical: "Deployment",
            },
            EventRule {
                regex: Regex::new(r"(?i)\brelease\b").unwrap(),
                canonical: "Release",
            },
            EventRule {
                regex: Regex::new(r"(?i)\bincident\b").unwrap(),
                canonical: "Incident",
            },
            EventRule {
                regex: Regex::new(r"(?i)\boutage\b").unwrap(),
                canonical: "Outage",
            },
            EventRule {
                regex: Regex::new(r"(?i)\bstand-?up\b").unwrap(),
                canonical: "Standup",
            },
            EventRule {
                regex: Regex::new(r"(?i)\breview\b").unwrap(),
                canonical: "Review",
            },
        ];

        Self {
            intent_phrases,
            draft_phrases,
            approval_phrases,
            event_keywords,
            clock: Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)\b").unwrap(),
            relative_day: Regex::new(r"(?i)\b(?:tomorrow|today|tonight)\b").unwrap(),
            channel_hint: Regex::new(r"(?i)\b(?:via|by|over|on)\s+(email|sms|slack)\b").unwrap(),
            teams: Vec::new(),
            defaults,
        }
    }

    /// Add a team name to match against (word-boundary, case-insensitive).
    pub fn add_team(&mut self, name: &str) {
        // Escaped names always compile.
        let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name))).unwrap();
        self.teams.push(TeamPattern {
            name: name.to_string(),
            regex,
        });
    }

    /// Detect whether the conversation asks for a draft first.
    pub fn detects_draft(&self, conversation: &str) -> bool {
        for rule in &self.draft_phrases {
            if rule.regex.is_match(conversation) {
                debug!(rule = %rule.pattern, "Conversation matched draft phrase");
                return true;
            }
        }
        false
    }

    /// Detect an approval in a follow-up conversation turn.
    pub fn detects_approval(&self, conversation: &str) -> bool {
        for rule in &self.approval_phrases {
            if rule.regex.is_match(conversation) {
                debug!(rule = %rule.pattern, "Conversation matched approval phrase");
                return true;
            }
        }
        false
    }

    /// Extract notification parameters from a conversation snapshot.
    ///
    /// Never fails — entities that don't match any rule fall back to the
    /// configured defaults.
    pub fn extract(&self, conversation: &str) -> NotificationRequest {
        let draft_requested = self.detects_draft(conversation);

        let team = self
            .teams
            .iter()
            .find(|t| t.regex.is_match(conversation))
            .map(|t| t.name.clone())
            .unwrap_or_else(|| self.defaults.team.clone());

        let event = self
            .event_keywords
            .iter()
            .find(|r| r.regex.is_match(conversation))
            .map(|r| r.canonical.to_string())
            .unwrap_or_else(|| self.defaults.event.clone());

        let clock = self.clock.find(conversation).map(|m| m.as_str().to_string());
        let day = self
            .relative_day
            .find(conversation)
            .map(|m| m.as_str().to_string());
        let time = match (clock, day) {
            (Some(clock), Some(day)) => format!("{clock} {day}"),
            (Some(clock), None) => clock,
            (None, Some(day)) => day,
            (None, None) => self.defaults.time.clone(),
        };

        let channel = self
            .channel_hint
            .captures(conversation)
            .map(|caps| caps[1].to_lowercase())
            .unwrap_or_else(|| self.defaults.channel.clone());

        debug!(
            event = %event,
            time = %time,
            team = %team,
            channel = %channel,
            draft = draft_requested,
            "Extracted notification parameters"
        );

        NotificationRequest {
            event,
            time,
            team,
            draft_requested,
            channel,
            received_at: chrono::Utc::now(),
        }
    }

    /// Parse entry point: returns a named action when the conversation
    /// carries notify intent, `None` otherwise.
    pub fn parse(&self, conversation: &str) -> Option<ParsedAction> {
        let intent = self
            .intent_phrases
            .iter()
            .find(|r| r.regex.is_match(conversation))?;
        debug!(rule = %intent.pattern, "Conversation matched notify intent");

        Some(ParsedAction {
            action: SEND_NOTIFICATION.to_string(),
            request: self.extract(conversation),
        })
    }
}
