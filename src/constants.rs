//! Application constants and configuration

pub const APP_NAME: &str = "Care Companion";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const GEMINI_TIMEOUT_SECS: u64 = 60;

/// Environment variables checked (in order) for the Gemini credential
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Sampling temperature for every outbound generation call
pub const GENERATION_TEMPERATURE: f32 = 0.7;

pub const CHAT_PERSONA: &str = "你是一个智能康养机器人，名字叫'小悦'。你负责监测老年人的健康并提供暖心对话。保持简洁、温馨且关注健康细节。";
pub const ADVICE_PERSONA: &str = "你是一个专业的AI康养助理，专门为老年人及其家属提供健康建议。语气要亲切、耐心、通俗易懂。如果用户咨询紧急医疗状况，必须提示立即就医。";

/// Max concurrent image downloads during prefetch
pub const IMAGE_PREFETCH_CONCURRENCY: usize = 4;

/// System fonts tried in order for CJK glyph coverage
pub const CJK_FONT_CANDIDATES: &[&str] = &[
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\simsun.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
];
