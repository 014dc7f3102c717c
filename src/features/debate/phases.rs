//! # Phase & Status Presentation
//!
//! Fixed labels and colors for the debate phases and statuses. Derived from
//! the tag on demand, never stored. Unknown phase tags display as their raw
//! value with a neutral color instead of failing.

use crate::api::DebateStatus;

/// Neutral fallback color for unknown tags
const GRAY: u32 = 0x6B7280;

/// The four fixed debate phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebatePhase {
    Opening,
    Questioning,
    FreeDebate,
    Closing,
}

impl DebatePhase {
    /// Parse a wire phase tag; `None` for anything outside the fixed set
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "opening" => Some(DebatePhase::Opening),
            "questioning" => Some(DebatePhase::Questioning),
            "free_debate" => Some(DebatePhase::FreeDebate),
            "closing" => Some(DebatePhase::Closing),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DebatePhase::Opening => "opening",
            DebatePhase::Questioning => "questioning",
            DebatePhase::FreeDebate => "free_debate",
            DebatePhase::Closing => "closing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DebatePhase::Opening => "开场发言",
            DebatePhase::Questioning => "质询交锋",
            DebatePhase::FreeDebate => "自由辩论",
            DebatePhase::Closing => "总结陈词",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            DebatePhase::Opening => 0x10B981,     // emerald
            DebatePhase::Questioning => 0xF59E0B, // amber
            DebatePhase::FreeDebate => 0x3B82F6,  // blue
            DebatePhase::Closing => 0xEC4899,     // pink
        }
    }
}

/// Human label for a wire phase tag, falling back to the raw tag
pub fn phase_label(tag: &str) -> &str {
    DebatePhase::from_tag(tag).map_or(tag, |p| p.label())
}

/// Color for a wire phase tag, falling back to gray
pub fn phase_color(tag: &str) -> u32 {
    DebatePhase::from_tag(tag).map_or(GRAY, |p| p.color())
}

/// Human label for a debate status
pub fn status_label(status: DebateStatus) -> &'static str {
    match status {
        DebateStatus::Pending => "等待中",
        DebateStatus::Running => "进行中",
        DebateStatus::Completed => "已完成",
        DebateStatus::Failed => "失败",
    }
}

/// Badge color for a debate status
pub fn status_color(status: DebateStatus) -> u32 {
    match status {
        DebateStatus::Pending => GRAY,
        DebateStatus::Running => 0xF59E0B,   // amber
        DebateStatus::Completed => 0x10B981, // emerald
        DebateStatus::Failed => 0xEF4444,    // red
    }
}
