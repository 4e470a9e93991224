//! Common types and data structures

use std::fmt;

/// Top-level dashboard panels, one per navigation button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Overview,
    Trends,
    Family,
    Media,
}

impl Panel {
    /// Navigation order
    pub const ALL: [Panel; 4] = [Panel::Overview, Panel::Trends, Panel::Family, Panel::Media];

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "概览",
            Panel::Trends => "趋势",
            Panel::Family => "亲友",
            Panel::Media => "视频",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Panel::Overview => egui_phosphor::regular::HOUSE,
            Panel::Trends => egui_phosphor::regular::CHART_LINE,
            Panel::Family => egui_phosphor::regular::USERS,
            Panel::Media => egui_phosphor::regular::PLAY_CIRCLE,
        }
    }
}

/// Assessment attached to a vital reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Normal,
    Suggestion,
    Abnormal,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Normal => "正常",
            HealthStatus::Suggestion => "建议",
            HealthStatus::Abnormal => "异常",
        }
    }
}

/// Day-over-day direction of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "↑ 比昨日上升",
            Trend::Down => "↓ 比昨日下降",
            Trend::Stable => "→ 数据稳定",
        }
    }

    /// Wording used when describing the trend to the assistant
    pub fn describe(self) -> &'static str {
        match self {
            Trend::Up => "比昨日上升",
            Trend::Down => "比昨日下降",
            Trend::Stable => "数据稳定",
        }
    }
}

/// Reading value: most vitals are numeric, some are free text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VitalValue {
    Number(f64),
    Text(&'static str),
}

impl fmt::Display for VitalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalValue::Number(n) => write!(f, "{}", n),
            VitalValue::Text(t) => f.write_str(t),
        }
    }
}

/// One health metric card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalReading {
    pub id: &'static str,
    pub label: &'static str,
    pub value: VitalValue,
    pub unit: &'static str,
    pub status: HealthStatus,
    pub trend: Trend,
}

/// Recommended health video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoRecommendation {
    pub id: &'static str,
    pub title: &'static str,
    pub source: &'static str,
    pub thumbnail: &'static str,
    pub duration: &'static str,
}

/// Sample on the 24h trend chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub time: &'static str,
    pub systolic: f32,
    pub heart_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTone {
    Positive,
    Warning,
}

/// AI risk prediction card on the trends panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insight {
    pub title: &'static str,
    pub body: &'static str,
    pub tone: InsightTone,
}

/// Entry in the family circle feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyMessage {
    pub sender: &'static str,
    pub text: &'static str,
    pub time: &'static str,
}
