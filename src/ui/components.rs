//! Reusable UI components
//!
//! Stateless widgets shared by the dashboard panels and the chat widget.

use crate::chat::{Role, Turn};
use crate::theme;
use crate::types::{ChartPoint, Insight, VideoRecommendation, VitalReading};
use eframe::egui;
use egui_phosphor::regular as icons;

/// Icon for a vital reading id; unknown ids get the generic pulse icon
pub fn vital_icon(id: &str) -> &'static str {
    match id {
        "blood_pressure" => icons::PULSE,
        "heart_rate" => icons::HEART,
        "blood_sugar" => icons::DROP,
        "blood_oxygen" => icons::LIGHTNING,
        "sleep" => icons::MOON,
        "lipids" => icons::THERMOMETER,
        _ => icons::PULSE,
    }
}

/// Section heading with an optional right-aligned link. Returns true if the link was clicked.
pub fn section_header(ui: &mut egui::Ui, title: &str, link: Option<&str>) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(title)
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::TEXT_SECONDARY),
        );
        if let Some(link) = link {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let resp = ui.add(
                    egui::Label::new(
                        egui::RichText::new(link)
                            .size(theme::FONT_BODY)
                            .color(theme::ACCENT),
                    )
                    .sense(egui::Sense::click()),
                );
                clicked = resp.clicked();
            });
        }
    });
    clicked
}

/// Square icon button with a tinted background
pub fn icon_button(
    ui: &mut egui::Ui,
    icon: &str,
    fg: egui::Color32,
    bg: egui::Color32,
    size: f32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let (fill, draw_rect) = theme::button_visual(&response, bg, rect);
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_MEDIUM, fill);
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(size * 0.5),
            fg,
        );
    }
    response
}

/// Rounded pill with text
pub fn chip(ui: &mut egui::Ui, text: &str, fg: egui::Color32, bg: egui::Color32) {
    egui::Frame::new()
        .fill(bg)
        .corner_radius(theme::RADIUS_XL)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(theme::FONT_SMALL).color(fg));
        });
}

/// Card for one vital reading
pub fn vital_card(ui: &mut egui::Ui, vital: &VitalReading) {
    let (chip_bg, chip_fg, border) = theme::status_colors(vital.status);

    theme::card_frame()
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, border))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                egui::Frame::new()
                    .fill(chip_bg)
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(vital_icon(vital.id)).size(22.0).color(chip_fg));
                    });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    chip(ui, vital.status.label(), chip_fg, chip_bg);
                });
            });
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new(vital.label)
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_MUTED),
            );
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                ui.label(
                    egui::RichText::new(vital.value.to_string())
                        .size(theme::FONT_DISPLAY)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new(vital.unit)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_DIM),
                );
            });
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(vital.trend.label())
                    .size(theme::FONT_SMALL)
                    .color(theme::trend_color(vital.trend)),
            );
        });
}

/// Thumbnail with dimmed overlay, play button and optional duration badge
pub fn video_thumbnail(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    width: f32,
    duration: Option<&str>,
    play_size: f32,
) -> egui::Response {
    let size = egui::vec2(width, width * 9.0 / 16.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    match texture {
        Some(tex) => {
            egui::Image::new(egui::load::SizedTexture::new(tex.id(), size)).paint_at(ui, rect);
        }
        None => {
            ui.painter().rect_filled(rect, 0.0, theme::BORDER_DEFAULT);
        }
    }

    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(50));
    painter.circle_filled(
        rect.center(),
        play_size / 2.0,
        egui::Color32::from_white_alpha(80),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icons::PLAY_CIRCLE,
        egui::FontId::proportional(play_size * 0.7),
        egui::Color32::WHITE,
    );

    if let Some(duration) = duration {
        let font = egui::FontId::proportional(theme::FONT_CAPTION);
        let galley = painter.layout_no_wrap(duration.to_string(), font, egui::Color32::WHITE);
        let badge = egui::Rect::from_min_size(
            rect.right_bottom() - galley.size() - egui::vec2(16.0, 12.0),
            galley.size() + egui::vec2(8.0, 4.0),
        );
        painter.rect_filled(badge, theme::RADIUS_SMALL, egui::Color32::from_black_alpha(150));
        painter.galley(badge.min + egui::vec2(4.0, 2.0), galley, egui::Color32::WHITE);
    }

    response
}

/// Compact video card for the horizontal recommendation strip
pub fn video_strip_card(
    ui: &mut egui::Ui,
    video: &VideoRecommendation,
    texture: Option<&egui::TextureHandle>,
) -> egui::Response {
    let width = theme::VIDEO_STRIP_WIDTH;
    theme::card_frame()
        .inner_margin(egui::Margin::same(0))
        .show(ui, |ui| {
            ui.set_width(width);
            ui.spacing_mut().item_spacing.y = 0.0;
            let resp = video_thumbnail(ui, texture, width, Some(video.duration), 40.0);
            egui::Frame::new()
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(width - 24.0);
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(video.title)
                                .size(theme::FONT_BODY)
                                .strong()
                                .color(theme::TEXT_SECONDARY),
                        )
                        .truncate(),
                    );
                    ui.add_space(theme::SPACING_SM);
                    ui.label(
                        egui::RichText::new(video.source)
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                    );
                });
            resp
        })
        .inner
}

/// Full-width video card for the media panel
pub fn video_list_card(
    ui: &mut egui::Ui,
    video: &VideoRecommendation,
    texture: Option<&egui::TextureHandle>,
) -> egui::Response {
    theme::card_frame()
        .inner_margin(egui::Margin::same(0))
        .corner_radius(theme::RADIUS_XL)
        .show(ui, |ui| {
            let width = ui.available_width();
            ui.set_width(width);
            ui.spacing_mut().item_spacing.y = 0.0;
            let resp = video_thumbnail(ui, texture, width, None, 64.0);
            egui::Frame::new()
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(width - 32.0);
                    ui.label(
                        egui::RichText::new(video.title)
                            .size(theme::FONT_HEADING)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.add_space(theme::SPACING_SM);
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(video.source)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_MUTED),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(video.duration)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                    });
                });
            resp
        })
        .inner
}

/// AI prediction card with a round icon badge
pub fn insight_card(ui: &mut egui::Ui, insight: &Insight, icon: &str) {
    let (fill, border, title, body, icon_color) = theme::insight_colors(insight.tone);
    egui::Frame::new()
        .fill(fill)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, border))
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal_top(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(44.0, 44.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, theme::BG_CARD);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icon,
                    egui::FontId::proportional(22.0),
                    icon_color,
                );
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(insight.title).strong().color(title));
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(insight.body)
                                .size(theme::FONT_BODY)
                                .color(body),
                        )
                        .wrap(),
                    );
                });
            });
        });
}

/// Value range shown on the chart's y axis: data extent padded and snapped to tens
pub fn chart_range(values: &[f32]) -> (f32, f32) {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let lo = ((min - 5.0) / 10.0).floor() * 10.0;
    let hi = ((max + 5.0) / 10.0).ceil() * 10.0;
    if hi > lo {
        (lo, hi)
    } else {
        (lo, lo + 10.0)
    }
}

/// Area chart of systolic pressure, painted directly
pub fn area_chart(ui: &mut egui::Ui, points: &[ChartPoint], height: f32) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), height),
        egui::Sense::hover(),
    );
    if points.len() < 2 || !ui.is_rect_visible(rect) {
        return;
    }

    let painter = ui.painter_at(rect);
    let axis_font = egui::FontId::proportional(theme::FONT_SMALL);
    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(36.0, 8.0),
        rect.max - egui::vec2(8.0, 24.0),
    );

    let values: Vec<f32> = points.iter().map(|p| p.systolic).collect();
    let (lo, hi) = chart_range(&values);
    let to_screen = |i: usize, v: f32| {
        let x = plot.left() + plot.width() * i as f32 / (points.len() - 1) as f32;
        let y = plot.bottom() - plot.height() * (v - lo) / (hi - lo);
        egui::pos2(x, y)
    };

    // Horizontal dashed grid with y labels
    let steps = 4;
    for s in 0..=steps {
        let v = lo + (hi - lo) * s as f32 / steps as f32;
        let y = plot.bottom() - plot.height() * s as f32 / steps as f32;
        let dashes = egui::Shape::dashed_line(
            &[egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::CHART_GRID),
            3.0,
            3.0,
        );
        painter.extend(dashes);
        painter.text(
            egui::pos2(plot.left() - 8.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{:.0}", v),
            axis_font.clone(),
            theme::CHART_AXIS,
        );
    }

    // X labels
    for (i, p) in points.iter().enumerate() {
        let x = to_screen(i, lo).x;
        painter.text(
            egui::pos2(x, plot.bottom() + 6.0),
            egui::Align2::CENTER_TOP,
            p.time,
            axis_font.clone(),
            theme::CHART_AXIS,
        );
    }

    // Gradient fill under the line, one quad per segment
    let top = theme::with_alpha(theme::ACCENT, 0.12);
    let bottom = theme::with_alpha(theme::ACCENT, 0.0);
    let mut mesh = egui::Mesh::default();
    for i in 0..points.len() - 1 {
        let a = to_screen(i, values[i]);
        let b = to_screen(i + 1, values[i + 1]);
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(a, top);
        mesh.colored_vertex(b, top);
        mesh.colored_vertex(egui::pos2(b.x, plot.bottom()), bottom);
        mesh.colored_vertex(egui::pos2(a.x, plot.bottom()), bottom);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(egui::Shape::mesh(mesh));

    let line: Vec<egui::Pos2> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| to_screen(i, v))
        .collect();
    painter.add(egui::Shape::line(
        line.clone(),
        egui::Stroke::new(theme::STROKE_CHART, theme::ACCENT),
    ));

    // Hover tooltip on nearest sample
    if let Some(pointer) = ui.ctx().pointer_hover_pos().filter(|p| plot.contains(*p)) {
        let nearest = line
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.x - pointer.x).abs().total_cmp(&(b.x - pointer.x).abs())
            })
            .map(|(i, _)| i);
        if let Some(i) = nearest {
            painter.circle_filled(line[i], 5.0, theme::ACCENT);
            painter.circle_filled(line[i], 2.5, egui::Color32::WHITE);
            painter.text(
                line[i] - egui::vec2(0.0, 12.0),
                egui::Align2::CENTER_BOTTOM,
                format!("{}  {:.0} mmHg", points[i].time, points[i].systolic),
                egui::FontId::proportional(theme::FONT_SMALL),
                theme::TEXT_SECONDARY,
            );
        }
    }
}

/// Bottom navigation item: icon above a small label
pub fn nav_button(ui: &mut egui::Ui, icon: &str, label: &str, active: bool, width: f32) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(width, theme::NAV_HEIGHT - 16.0), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let color = if active {
            theme::ACCENT
        } else if response.hovered() {
            theme::TEXT_MUTED
        } else {
            theme::TEXT_DIM
        };
        let painter = ui.painter();
        painter.text(
            rect.center() - egui::vec2(0.0, 8.0),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(24.0),
            color,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 14.0),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_CAPTION),
            color,
        );
    }
    response
}

/// One transcript turn as a bubble with an avatar
pub fn chat_bubble(ui: &mut egui::Ui, turn: &Turn) {
    let is_user = turn.role == Role::User;
    let layout = if is_user {
        egui::Layout::right_to_left(egui::Align::Min)
    } else {
        egui::Layout::left_to_right(egui::Align::Min)
    };
    let max_bubble = ui.available_width() * 0.8 - 40.0;

    ui.with_layout(layout, |ui| {
        let (avatar_icon, avatar_bg) = if is_user {
            (icons::USER, theme::ACCENT_LIGHT)
        } else {
            (icons::ROBOT, theme::BG_CARD)
        };
        let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 16.0, avatar_bg);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            avatar_icon,
            egui::FontId::proportional(16.0),
            theme::ACCENT,
        );

        let (fill, fg, stroke) = if is_user {
            (theme::ACCENT, theme::TEXT_ON_ACCENT, egui::Stroke::NONE)
        } else {
            (
                theme::BG_CARD,
                theme::TEXT_SECONDARY,
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE),
            )
        };
        let corner = if is_user {
            egui::CornerRadius { nw: 16, ne: 0, sw: 16, se: 16 }
        } else {
            egui::CornerRadius { nw: 0, ne: 16, sw: 16, se: 16 }
        };
        egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(corner)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_max_width(max_bubble);
                ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&turn.text)
                                .size(theme::FONT_BODY)
                                .color(fg),
                        )
                        .wrap(),
                    )
                    .on_hover_text(turn.created_at.format("%H:%M").to_string());
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CHART_DATA, VITALS};

    #[test]
    fn every_builtin_vital_has_a_dedicated_icon() {
        for v in &VITALS {
            let icon = vital_icon(v.id);
            if v.id != "blood_pressure" {
                assert_ne!(icon, icons::PULSE, "{} fell back", v.id);
            }
        }
        assert_eq!(vital_icon("unknown"), icons::PULSE);
    }

    #[test]
    fn chart_range_pads_to_tens() {
        let values: Vec<f32> = CHART_DATA.iter().map(|p| p.systolic).collect();
        assert_eq!(chart_range(&values), (110.0, 140.0));
    }

    #[test]
    fn chart_range_handles_flat_and_empty_series() {
        assert_eq!(chart_range(&[]), (0.0, 1.0));
        let (lo, hi) = chart_range(&[100.0, 100.0]);
        assert!(hi > lo);
        assert!(lo <= 100.0 && hi >= 100.0);
    }
}
