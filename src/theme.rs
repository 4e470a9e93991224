//! Centralized theme constants for Care Companion
//! All colors, sizes, and styling should reference these constants

use crate::types::{HealthStatus, InsightTone, Trend};
use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0xf9, 0xfa, 0xfb); // gray-50
pub const BG_CARD: Color32 = Color32::WHITE;
pub const BG_INPUT: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6); // gray-100
pub const BG_NAV: Color32 = Color32::from_rgba_premultiplied(0xf2, 0xf2, 0xf2, 0xf2); // white @ 95%

// =============================================================================
// COLORS - Accent (Indigo)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x4f, 0x46, 0xe5); // indigo-600
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x43, 0x38, 0xca); // indigo-700
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(0xee, 0xf2, 0xff); // indigo-50
pub const ACCENT_LIGHT: Color32 = Color32::from_rgb(0xe0, 0xe7, 0xff); // indigo-100
pub const ACCENT_DEEP: Color32 = Color32::from_rgb(0x31, 0x2e, 0x81); // indigo-900
pub const BANNER_END: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6); // blue-500

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x11, 0x18, 0x27); // gray-900
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37); // gray-800
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80); // gray-500
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf); // gray-400
pub const TEXT_ON_ACCENT: Color32 = Color32::WHITE;

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6); // gray-100
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb); // gray-200

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x22, 0xc5, 0x5e); // green-500
pub const STATUS_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600
pub const STATUS_DANGER_SOFT: Color32 = Color32::from_rgb(0xfe, 0xf2, 0xf2); // red-50

pub const TREND_UP: Color32 = Color32::from_rgb(0xef, 0x44, 0x44); // red-500
pub const TREND_DOWN: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6); // blue-500

pub const CHART_GRID: Color32 = Color32::from_rgb(0xf1, 0xf5, 0xf9); // slate-100
pub const CHART_AXIS: Color32 = Color32::from_rgb(0x94, 0xa3, 0xb8); // slate-400

/// Returns (chip background, chip text, card border) for a reading's status
pub fn status_colors(status: HealthStatus) -> (Color32, Color32, Color32) {
    match status {
        HealthStatus::Normal => (
            Color32::from_rgb(0xdc, 0xfc, 0xe7), // green-100
            Color32::from_rgb(0x15, 0x80, 0x3d), // green-700
            Color32::from_rgb(0xbb, 0xf7, 0xd0), // green-200
        ),
        HealthStatus::Suggestion => (
            Color32::from_rgb(0xfe, 0xf9, 0xc3), // yellow-100
            Color32::from_rgb(0xa1, 0x62, 0x07), // yellow-700
            Color32::from_rgb(0xfe, 0xf0, 0x8a), // yellow-200
        ),
        HealthStatus::Abnormal => (
            Color32::from_rgb(0xfe, 0xe2, 0xe2), // red-100
            Color32::from_rgb(0xb9, 0x1c, 0x1c), // red-700
            Color32::from_rgb(0xfe, 0xca, 0xca), // red-200
        ),
    }
}

pub fn trend_color(trend: Trend) -> Color32 {
    match trend {
        Trend::Up => TREND_UP,
        Trend::Down => TREND_DOWN,
        Trend::Stable => TEXT_DIM,
    }
}

/// Returns (fill, border, title, body, icon) for an insight card
pub fn insight_colors(tone: InsightTone) -> (Color32, Color32, Color32, Color32, Color32) {
    match tone {
        InsightTone::Positive => (
            ACCENT_SOFT,
            ACCENT_LIGHT,
            ACCENT_DEEP,
            Color32::from_rgb(0x43, 0x38, 0xca), // indigo-700
            ACCENT,
        ),
        InsightTone::Warning => (
            Color32::from_rgb(0xfe, 0xfc, 0xe8), // yellow-50
            Color32::from_rgb(0xfe, 0xf9, 0xc3), // yellow-100
            Color32::from_rgb(0x71, 0x3f, 0x12), // yellow-900
            Color32::from_rgb(0xa1, 0x62, 0x07), // yellow-700
            Color32::from_rgb(0xca, 0x8a, 0x04), // yellow-600
        ),
    }
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_DISPLAY: f32 = 24.0;
pub const FONT_TITLE: f32 = 20.0;
pub const FONT_HEADING: f32 = 18.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_SMALL: f32 = 12.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS
// =============================================================================
pub const WINDOW_SIZE: [f32; 2] = [480.0, 860.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [380.0, 640.0];
pub const NAV_HEIGHT: f32 = 68.0;
pub const CHART_HEIGHT: f32 = 250.0;
pub const CHAT_WINDOW_SIZE: (f32, f32) = (360.0, 500.0);
pub const CHAT_FAB_SIZE: f32 = 56.0;
pub const VIDEO_STRIP_WIDTH: f32 = 280.0;
pub const AVATAR_SIZE: f32 = 64.0;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_SMALL: f32 = 4.0;
pub const RADIUS_DEFAULT: f32 = 8.0;
pub const RADIUS_MEDIUM: f32 = 12.0;
pub const RADIUS_LARGE: f32 = 16.0;
pub const RADIUS_XL: f32 = 24.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_CHART: f32 = 3.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;
pub const SPACING_XXL: f32 = 24.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    ctx.set_visuals(egui::Visuals {
        dark_mode: false,
        panel_fill: BG_BASE,
        window_fill: BG_CARD,
        extreme_bg_color: BG_INPUT,
        faint_bg_color: BG_BASE,
        hyperlink_color: ACCENT,
        selection: egui::style::Selection {
            bg_fill: ACCENT_LIGHT,
            stroke: egui::Stroke::new(STROKE_DEFAULT, ACCENT),
        },
        window_stroke: egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE),
        window_corner_radius: egui::CornerRadius::same(16),
        menu_corner_radius: egui::CornerRadius::same(8),
        popup_shadow: egui::epaint::Shadow {
            offset: [0, 4],
            blur: 16,
            spread: 0,
            color: Color32::from_black_alpha(30),
        },
        interact_cursor: Some(egui::CursorIcon::PointingHand),
        ..egui::Visuals::light()
    });

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 4.0;
        style.spacing.scroll.floating = true;
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================

/// White rounded card with a faint outline
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_CARD)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(egui::Margin::same(16))
        .shadow(egui::epaint::Shadow {
            offset: [0, 1],
            blur: 2,
            spread: 0,
            color: Color32::from_black_alpha(10),
        })
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_CARD)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL)
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default light button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_SECONDARY))
        .fill(BG_CARD)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_MEDIUM)
}

/// Accent indigo button (for primary actions)
pub fn button_accent(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.into()).color(TEXT_ON_ACCENT).strong())
        .fill(ACCENT)
        .corner_radius(RADIUS_MEDIUM)
}

/// Returns (fill, draw_rect) for a custom-painted button with hover/press effects.
/// Darkens on hover, slightly darkens + shrinks on press.
pub fn button_visual(
    response: &egui::Response,
    base_fill: Color32,
    rect: egui::Rect,
) -> (Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (darken(base_fill, 0.12), rect.shrink(1.5))
    } else if response.hovered() {
        (darken(base_fill, 0.06), rect)
    } else {
        (base_fill, rect)
    }
}

/// Same color with its alpha scaled by `factor`
pub fn with_alpha(c: Color32, factor: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), (c.a() as f32 * factor) as u8)
}

fn darken(c: Color32, amount: f32) -> Color32 {
    let r = (c.r() as f32 * (1.0 - amount)) as u8;
    let g = (c.g() as f32 * (1.0 - amount)) as u8;
    let b = (c.b() as f32 * (1.0 - amount)) as u8;
    Color32::from_rgba_unmultiplied(r, g, b, c.a())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_status_has_its_own_palette() {
        let normal = status_colors(HealthStatus::Normal);
        let suggestion = status_colors(HealthStatus::Suggestion);
        let abnormal = status_colors(HealthStatus::Abnormal);
        assert_ne!(normal, suggestion);
        assert_ne!(suggestion, abnormal);
        assert_ne!(normal, abnormal);
    }

    #[test]
    fn darken_keeps_alpha() {
        let c = darken(Color32::from_rgb(200, 100, 50), 0.5);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (100, 50, 25, 255));
    }

    #[test]
    fn with_alpha_scales_opacity() {
        assert_eq!(with_alpha(ACCENT, 0.0).a(), 0);
        assert_eq!(with_alpha(ACCENT, 1.0).a(), 255);
    }
}
