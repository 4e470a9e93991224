//! Built-in mock datasets shown on the dashboard

use crate::types::*;

pub const PATIENT_NAME: &str = "王志强 爷爷";
pub const PATIENT_AVATAR: &str = "https://picsum.photos/seed/elderly/100";
pub const ROBOT_STATUS: &str = "康养机器人已在线 • 守护中";

pub const BRIEFING_TITLE: &str = "今日健康简报";
pub const BRIEFING_BODY: &str = "AI 检测到您的血脂偏高，已自动为您排期社区上门检查。";

pub const FAMILY_CONTACT_NAME: &str = "儿子 (王小明)";
pub const FAMILY_CONTACT_STATUS: &str = "实时连接中 • 在线";
pub const FAMILY_CONTACT_AVATAR: &str = "https://picsum.photos/seed/son/200";

pub const VITALS: [VitalReading; 6] = [
    VitalReading {
        id: "blood_pressure",
        label: "血压 (收缩压)",
        value: VitalValue::Number(128.0),
        unit: "mmHg",
        status: HealthStatus::Normal,
        trend: Trend::Stable,
    },
    VitalReading {
        id: "heart_rate",
        label: "静息心率",
        value: VitalValue::Number(72.0),
        unit: "bpm",
        status: HealthStatus::Normal,
        trend: Trend::Down,
    },
    VitalReading {
        id: "blood_sugar",
        label: "空腹血糖",
        value: VitalValue::Number(6.8),
        unit: "mmol/L",
        status: HealthStatus::Suggestion,
        trend: Trend::Up,
    },
    VitalReading {
        id: "blood_oxygen",
        label: "血氧饱和度",
        value: VitalValue::Number(98.0),
        unit: "%",
        status: HealthStatus::Normal,
        trend: Trend::Stable,
    },
    VitalReading {
        id: "sleep",
        label: "深度睡眠",
        value: VitalValue::Number(2.5),
        unit: "小时",
        status: HealthStatus::Normal,
        trend: Trend::Up,
    },
    VitalReading {
        id: "lipids",
        label: "总胆固醇",
        value: VitalValue::Number(5.4),
        unit: "mmol/L",
        status: HealthStatus::Abnormal,
        trend: Trend::Up,
    },
];

pub const CHART_DATA: [ChartPoint; 7] = [
    ChartPoint { time: "08:00", systolic: 120.0, heart_rate: 70.0 },
    ChartPoint { time: "10:00", systolic: 125.0, heart_rate: 75.0 },
    ChartPoint { time: "12:00", systolic: 130.0, heart_rate: 72.0 },
    ChartPoint { time: "14:00", systolic: 128.0, heart_rate: 74.0 },
    ChartPoint { time: "16:00", systolic: 126.0, heart_rate: 71.0 },
    ChartPoint { time: "18:00", systolic: 132.0, heart_rate: 78.0 },
    ChartPoint { time: "20:00", systolic: 128.0, heart_rate: 73.0 },
];

pub const VIDEOS: [VideoRecommendation; 3] = [
    VideoRecommendation {
        id: "1",
        title: "三分钟降压养生操",
        source: "人民医院康复科",
        thumbnail: "https://picsum.photos/seed/health1/400/225",
        duration: "03:45",
    },
    VideoRecommendation {
        id: "2",
        title: "老年人晚餐禁忌与建议",
        source: "社区健康中心",
        thumbnail: "https://picsum.photos/seed/health2/400/225",
        duration: "05:20",
    },
    VideoRecommendation {
        id: "3",
        title: "如何改善失眠：专家讲堂",
        source: "省中医院",
        thumbnail: "https://picsum.photos/seed/health3/400/225",
        duration: "08:15",
    },
];

pub const INSIGHTS: [Insight; 2] = [
    Insight {
        title: "心血管风险预测",
        body: "根据近期数据分析，您的心脏功能保持良好，未来一个月风险评级为：低",
        tone: InsightTone::Positive,
    },
    Insight {
        title: "血糖波动预警",
        body: "最近3日餐后血糖略有超标。AI 建议您减少含糖主食，多摄入膳食纤维。",
        tone: InsightTone::Warning,
    },
];

pub const FAMILY_MESSAGES: [FamilyMessage; 1] = [FamilyMessage {
    sender: "王小明",
    text: "爸，您的体检报告我收到了。AI 说指标还不错，记得按时吃降压药，我这周末带孩子去看您！",
    time: "10:45 AM",
}];

/// Every remote image the dashboard may display
pub fn remote_images() -> Vec<&'static str> {
    let mut urls = vec![PATIENT_AVATAR, FAMILY_CONTACT_AVATAR];
    urls.extend(VIDEOS.iter().map(|v| v.thumbnail));
    urls
}
