//! Panel rendering (overview, trends, family, media)

use super::App;
use crate::data::*;
use crate::theme;
use crate::types::InsightTone;
use crate::ui::components::{
    area_chart, icon_button, insight_card, section_header, video_list_card, video_strip_card,
    vital_card,
};
use eframe::egui;
use egui_phosphor::regular as icons;

const NOT_CONNECTED: &str = "该功能暂未接入，敬请期待";

impl App {
    pub(crate) fn render_overview(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.spacing_mut().item_spacing.y = theme::SPACING_XXL;

        // Header profile
        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                self.avatar(ui, ctx, PATIENT_AVATAR, theme::AVATAR_SIZE, theme::RADIUS_LARGE);
                ui.vertical(|ui| {
                    ui.add_space(theme::SPACING_MD);
                    ui.label(
                        egui::RichText::new(PATIENT_NAME)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.label(
                        egui::RichText::new(ROBOT_STATUS)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_MUTED),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if icon_button(ui, icons::BELL, theme::ACCENT, theme::ACCENT_SOFT, 48.0).clicked() {
                        self.show_toast("暂无新的提醒");
                    }
                    if icon_button(
                        ui,
                        icons::SHIELD_WARNING,
                        theme::STATUS_DANGER,
                        theme::STATUS_DANGER_SOFT,
                        48.0,
                    )
                    .clicked()
                    {
                        self.show_toast(format!("紧急呼叫：{}", NOT_CONNECTED));
                    }
                });
            });
        });

        // Daily briefing
        self.render_briefing(ui, ctx);

        // Vital grid, two columns
        ui.columns(2, |cols| {
            for (i, vital) in VITALS.iter().enumerate() {
                let col = &mut cols[i % 2];
                vital_card(col, vital);
                col.add_space(theme::SPACING_LG);
            }
        });

        // Recommended videos
        ui.vertical(|ui| {
            ui.spacing_mut().item_spacing.y = theme::SPACING_LG;
            if section_header(ui, "为您推荐", Some("换一换")) {
                self.show_toast("已为您刷新推荐");
            }
            egui::ScrollArea::horizontal()
                .id_salt("video_strip")
                .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = theme::SPACING_XL;
                        for video in &VIDEOS {
                            let texture = self.load_image(ctx, video.thumbnail);
                            if video_strip_card(ui, video, texture.as_ref()).clicked() {
                                self.show_toast(format!("即将播放：{}", video.title));
                            }
                        }
                    });
                });
        });
        ui.add_space(theme::SPACING_XXL * 2.0);
    }

    fn render_briefing(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let frame = egui::Frame::new()
            .corner_radius(theme::RADIUS_LARGE)
            .inner_margin(egui::Margin::same(16));

        // Gradient background painted under the frame contents
        let where_to_paint = ui.painter().add(egui::Shape::Noop);
        let resp = frame.show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(BRIEFING_TITLE)
                    .size(theme::FONT_HEADING)
                    .strong()
                    .color(theme::TEXT_ON_ACCENT),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new(BRIEFING_BODY)
                        .size(theme::FONT_BODY)
                        .color(theme::ACCENT_SOFT),
                )
                .wrap(),
            );
            ui.add_space(theme::SPACING_LG);
            let button = egui::Button::new(
                egui::RichText::new("查看详情建议")
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_ON_ACCENT),
            )
            .fill(egui::Color32::from_white_alpha(50))
            .stroke(egui::Stroke::NONE)
            .corner_radius(theme::RADIUS_DEFAULT);
            ui.add(button).clicked()
        });

        let rect = resp.response.rect;
        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(rect.left_top(), theme::ACCENT);
        mesh.colored_vertex(rect.right_top(), theme::BANNER_END);
        mesh.colored_vertex(rect.right_bottom(), theme::BANNER_END);
        mesh.colored_vertex(rect.left_bottom(), theme::ACCENT);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        ui.painter().set(where_to_paint, egui::Shape::mesh(mesh));

        if resp.inner {
            self.request_advice(ctx);
        }
    }

    pub(crate) fn render_trends(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing.y = theme::SPACING_XXL;

        theme::card_frame()
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new("血压趋势 (24小时)")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_XL);
                area_chart(ui, &CHART_DATA, theme::CHART_HEIGHT);
            });

        theme::card_frame()
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new("AI 慢病预测分析")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_XL);
                ui.spacing_mut().item_spacing.y = theme::SPACING_XL;
                for insight in &INSIGHTS {
                    let icon = match insight.tone {
                        InsightTone::Positive => icons::HEART,
                        InsightTone::Warning => icons::DROP,
                    };
                    insight_card(ui, insight, icon);
                }
            });
        ui.add_space(theme::SPACING_XXL * 2.0);
    }

    pub(crate) fn render_family(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.spacing_mut().item_spacing.y = theme::SPACING_XXL;

        theme::card_frame()
            .corner_radius(theme::RADIUS_XL)
            .inner_margin(egui::Margin::same(32))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let size = 128.0;
                    let resp = self.avatar(ui, ctx, FAMILY_CONTACT_AVATAR, size, size / 2.0);
                    // Online dot
                    let dot = resp.rect.right_bottom() - egui::vec2(16.0, 16.0);
                    ui.painter().circle_filled(dot, 12.0, egui::Color32::WHITE);
                    ui.painter().circle_filled(dot, 8.0, theme::STATUS_SUCCESS);

                    ui.add_space(theme::SPACING_XL);
                    ui.label(
                        egui::RichText::new(FAMILY_CONTACT_NAME)
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.label(egui::RichText::new(FAMILY_CONTACT_STATUS).color(theme::TEXT_MUTED));
                    ui.add_space(theme::SPACING_XXL);
                });
                ui.columns(2, |cols| {
                    let width = cols[0].available_width();
                    let call = cols[0].add_sized(
                        [width, 52.0],
                        theme::button_accent(format!("{}  语音通话", icons::PHONE_CALL)),
                    );
                    let monitor = cols[1].add_sized(
                        [width, 52.0],
                        theme::button(format!("{}  实时监控", icons::VIDEO_CAMERA)),
                    );
                    if call.clicked() {
                        self.show_toast(format!("语音通话：{}", NOT_CONNECTED));
                    }
                    if monitor.clicked() {
                        self.show_toast(format!("实时监控：{}", NOT_CONNECTED));
                    }
                });
            });

        theme::card_frame()
            .corner_radius(theme::RADIUS_XL)
            .inner_margin(egui::Margin::same(24))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.label(
                    egui::RichText::new("亲友圈消息")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_XL);
                for msg in &FAMILY_MESSAGES {
                    ui.horizontal_top(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            rect.center(),
                            20.0,
                            egui::Color32::from_rgb(0xdb, 0xea, 0xfe),
                        );
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            icons::USERS,
                            egui::FontId::proportional(20.0),
                            egui::Color32::from_rgb(0x25, 0x63, 0xeb),
                        );
                        egui::Frame::new()
                            .fill(theme::BG_BASE)
                            .corner_radius(egui::CornerRadius { nw: 0, ne: 16, sw: 16, se: 16 })
                            .inner_margin(egui::Margin::same(16))
                            .show(ui, |ui| {
                                ui.set_min_width(ui.available_width());
                                ui.label(
                                    egui::RichText::new(format!("{} 留言：", msg.sender))
                                        .size(theme::FONT_BODY)
                                        .strong()
                                        .color(theme::TEXT_PRIMARY),
                                );
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(msg.text)
                                            .size(theme::FONT_BODY)
                                            .color(theme::TEXT_MUTED),
                                    )
                                    .wrap(),
                                );
                                ui.add_space(theme::SPACING_MD);
                                ui.label(
                                    egui::RichText::new(msg.time)
                                        .size(theme::FONT_CAPTION)
                                        .color(theme::TEXT_DIM),
                                );
                            });
                    });
                }
            });
        ui.add_space(theme::SPACING_XXL * 2.0);
    }

    pub(crate) fn render_media(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.spacing_mut().item_spacing.y = theme::SPACING_XXL;
        ui.label(
            egui::RichText::new("健康视频")
                .size(theme::FONT_DISPLAY)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );

        // The catalogue is short, so it is shown twice to fill the page
        for video in VIDEOS.iter().chain(VIDEOS.iter()) {
            let texture = self.load_image(ctx, video.thumbnail);
            if video_list_card(ui, video, texture.as_ref()).clicked() {
                self.show_toast(format!("即将播放：{}", video.title));
            }
        }
        ui.add_space(theme::SPACING_XXL * 2.0);
    }

    /// Rounded avatar image, or a tinted placeholder until it has downloaded
    fn avatar(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        url: &str,
        size: f32,
        radius: f32,
    ) -> egui::Response {
        match self.load_image(ctx, url) {
            Some(tex) => ui.add(
                egui::Image::new(egui::load::SizedTexture::new(tex.id(), egui::vec2(size, size)))
                    .corner_radius(radius),
            ),
            None => {
                let (rect, resp) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
                ui.painter().rect_filled(rect, radius, theme::ACCENT_SOFT);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icons::USER,
                    egui::FontId::proportional(size * 0.5),
                    theme::ACCENT,
                );
                resp
            }
        }
    }
}
