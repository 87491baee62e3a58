//! View model for the chat panel.
//!
//! Everything here is derived from a [`ChatSession`]; nothing is stored.

use crate::session::ChatSession;
use crate::types::{ChatMessage, Role};
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

pub const WAITING_TEXT: &str = "🤖 조금만 기다려주세요... 노피가 답변을 준비하고 있어요..";
pub const AUTO_SELECTED_TEXT: &str = "자동선택";

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
}

impl Align {
    pub fn class(self) -> &'static str {
        match self {
            Align::Start => "align-start",
            Align::End => "align-end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    High,
    Medium,
    Low,
    Neutral,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::High => "tone-high",
            Tone::Medium => "tone-medium",
            Tone::Low => "tone-low",
            Tone::Neutral => "tone-neutral",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Badge {
    Complexity { value: String, tone: Tone },
    QuestionType { icon: &'static str, value: String },
    Urgency { icon: &'static str, value: String },
    Quality { value: String },
}

impl Badge {
    pub fn text(&self) -> String {
        match self {
            Badge::Complexity { value, .. } => format!("복잡도: {value}"),
            Badge::QuestionType { icon, value } | Badge::Urgency { icon, value } => {
                if icon.is_empty() {
                    value.clone()
                } else {
                    format!("{icon} {value}")
                }
            }
            Badge::Quality { value } => format!("품질: {value}"),
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Badge::Complexity { tone, .. } => tone.class(),
            Badge::QuestionType { .. } => "badge-type",
            Badge::Urgency { .. } => "badge-urgency",
            Badge::Quality { .. } => "badge-quality",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeBadge {
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleView {
    pub role: Role,
    pub align: Align,
    pub content: String,
    pub timestamp: Option<String>,
    pub mode_badge: Option<ModeBadge>,
    pub detail_badges: Vec<Badge>,
    pub selection_note: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
    pub bubbles: Vec<BubbleView>,
    pub waiting: bool,
    pub show_details: bool,
    pub input_disabled: bool,
    pub send_disabled: bool,
}

pub fn mode_icon(mode: Option<&str>) -> &'static str {
    match mode {
        Some("basic") => "💬",
        Some("thinking") => "🧠",
        Some("enhanced") => "⚡",
        Some("auto") => "🎯",
        _ => "🤖",
    }
}

pub fn mode_label(mode: Option<&str>) -> &'static str {
    match mode {
        Some("basic") => "기본 모드",
        Some("thinking") => "추론 모드",
        Some("enhanced") => "고급 모드",
        Some("auto") => "자동 선택",
        _ => "자동",
    }
}

pub fn complexity_tone(complexity: Option<&str>) -> Tone {
    match complexity {
        Some("high") => Tone::High,
        Some("medium") => Tone::Medium,
        Some("low") => Tone::Low,
        _ => Tone::Neutral,
    }
}

pub fn urgency_icon(urgency: Option<&str>) -> &'static str {
    match urgency {
        Some("high") => "🚨",
        Some("medium") => "⚠️",
        Some("low") => "📝",
        _ => "",
    }
}

pub fn question_type_icon(kind: Option<&str>) -> &'static str {
    match kind {
        Some("complaint") => "😤",
        Some("inquiry") => "❓",
        Some("request") => "🙏",
        Some("greeting") => "👋",
        _ => "💬",
    }
}

pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

/// Whether an Enter keypress sends. Shift+Enter and the Enter that commits an
/// IME composition do not.
pub fn enter_submits(shift: bool, composing: bool) -> bool {
    !shift && !composing
}

/// An annotation counts only when it carries text; empty strings are absent.
fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn detail_badges(msg: &ChatMessage) -> Vec<Badge> {
    let notes = &msg.annotations;
    let Some(complexity) = filled(&notes.complexity) else {
        return Vec::new();
    };
    let mut badges = vec![Badge::Complexity {
        value: complexity.to_string(),
        tone: complexity_tone(Some(complexity)),
    }];
    if let Some(kind) = filled(&notes.question_type) {
        badges.push(Badge::QuestionType {
            icon: question_type_icon(Some(kind)),
            value: kind.to_string(),
        });
    }
    if let Some(urgency) = filled(&notes.urgency) {
        badges.push(Badge::Urgency {
            icon: urgency_icon(Some(urgency)),
            value: urgency.to_string(),
        });
    }
    if let Some(score) = filled(&notes.quality_score) {
        badges.push(Badge::Quality {
            value: score.to_string(),
        });
    }
    badges
}

fn selection_note(msg: &ChatMessage) -> Option<String> {
    let notes = &msg.annotations;
    let mode = filled(&notes.selected_mode).filter(|mode| *mode != "auto")?;
    let complexity = filled(&notes.complexity)?;
    let kind = filled(&notes.question_type)?;
    Some(format!(
        "'{complexity}' 복잡도의 '{kind}' 유형으로 분석하여 '{}'를 선택했습니다.",
        mode_label(Some(mode))
    ))
}

pub fn present_message(msg: &ChatMessage, show_details: bool) -> BubbleView {
    let is_bot = msg.role == Role::Bot;
    let mode_badge = (is_bot && msg.annotations.auto_selection == Some(true)).then(|| {
        let mode = filled(&msg.annotations.selected_mode);
        ModeBadge {
            icon: mode_icon(mode),
            label: mode_label(mode),
        }
    });
    let details = is_bot && show_details;

    BubbleView {
        role: msg.role,
        align: if is_bot { Align::Start } else { Align::End },
        content: msg.content.clone(),
        timestamp: format_message_timestamp(msg.created_at),
        mode_badge,
        detail_badges: if details {
            detail_badges(msg)
        } else {
            Vec::new()
        },
        selection_note: if details { selection_note(msg) } else { None },
    }
}

pub fn present(session: &ChatSession) -> PanelView {
    let show_details = session.show_details();
    PanelView {
        bubbles: session
            .messages()
            .iter()
            .map(|msg| present_message(msg, show_details))
            .collect(),
        waiting: session.is_busy(),
        show_details,
        input_disabled: session.is_busy(),
        send_disabled: !session.can_send(),
    }
}
