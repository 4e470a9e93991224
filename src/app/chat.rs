//! Floating chat widget and its background exchange

use super::App;
use crate::chat::BUSY_FALLBACK;
use crate::theme;
use crate::ui::components::{chat_bubble, icon_button};
use eframe::egui;
use egui_phosphor::regular as icons;
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

impl App {
    /// Send the input box contents. Blank input or a pending reply makes this a no-op.
    pub(crate) fn submit_chat(&mut self, ctx: &egui::Context) {
        let Some(exchange) = self.chat.begin(&self.chat_input) else {
            return;
        };
        self.chat_input.clear();
        self.chat_scroll_to_bottom = true;

        debug!(history = exchange.history().len(), "Submitting chat message");

        let (tx, rx) = oneshot::channel();
        let generator = Arc::clone(&self.generator);
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let reply = exchange.run(generator.as_ref()).await;
            tx.send(reply).ok();
            ctx.request_repaint();
        });
        self.pending_reply = Some(rx);
    }

    /// Move a finished reply into the transcript
    pub(crate) fn poll_chat(&mut self) {
        let Some(rx) = self.pending_reply.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(reply) => {
                self.pending_reply = None;
                self.chat.finish(reply);
                self.chat_scroll_to_bottom = true;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                warn!("Chat task ended without a reply");
                self.pending_reply = None;
                self.chat.finish(BUSY_FALLBACK.to_string());
                self.chat_scroll_to_bottom = true;
            }
        }
    }

    pub(crate) fn render_chat_widget(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let margin = 24.0;

        if !self.chat_open {
            // Floating toggle button above the nav bar
            egui::Area::new(egui::Id::new("chat_fab"))
                .order(egui::Order::Foreground)
                .fixed_pos(egui::pos2(
                    screen.right() - margin - theme::CHAT_FAB_SIZE,
                    screen.bottom() - theme::NAV_HEIGHT - margin - theme::CHAT_FAB_SIZE,
                ))
                .show(ctx, |ui| {
                    let (rect, resp) = ui.allocate_exact_size(
                        egui::vec2(theme::CHAT_FAB_SIZE, theme::CHAT_FAB_SIZE),
                        egui::Sense::click(),
                    );
                    let (fill, draw_rect) = theme::button_visual(&resp, theme::ACCENT, rect);
                    let painter = ui.painter();
                    painter.circle_filled(
                        draw_rect.center() + egui::vec2(0.0, 3.0),
                        draw_rect.width() / 2.0,
                        egui::Color32::from_black_alpha(30),
                    );
                    painter.circle_filled(draw_rect.center(), draw_rect.width() / 2.0, fill);
                    painter.text(
                        draw_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        icons::CHAT_CIRCLE,
                        egui::FontId::proportional(28.0),
                        theme::TEXT_ON_ACCENT,
                    );
                    if resp.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if resp.clicked() {
                        self.chat_open = true;
                        self.chat_scroll_to_bottom = true;
                    }
                });
            return;
        }

        let (w, h) = theme::CHAT_WINDOW_SIZE;
        let width = w.min(screen.width() * 0.9);
        let height = h.min(screen.height() - 2.0 * margin);

        egui::Area::new(egui::Id::new("chat_window"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(
                screen.right() - margin - width,
                screen.bottom() - margin - height,
            ))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_CARD)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                    .corner_radius(theme::RADIUS_LARGE)
                    .shadow(egui::epaint::Shadow {
                        offset: [0, 8],
                        blur: 32,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(50),
                    })
                    .show(ui, |ui| {
                        ui.set_width(width);
                        ui.set_height(height);
                        ui.spacing_mut().item_spacing.y = 0.0;
                        self.render_chat_header(ui, width);
                        self.render_chat_messages(ui, height - 72.0 - 68.0);
                        self.render_chat_input(ui, ctx);
                    });
            });
    }

    fn render_chat_header(&mut self, ui: &mut egui::Ui, width: f32) {
        egui::Frame::new()
            .fill(theme::ACCENT)
            .corner_radius(egui::CornerRadius { nw: 16, ne: 16, sw: 0, se: 0 })
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.set_width(width - 32.0);
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 20.0, egui::Color32::from_rgb(0x81, 0x8c, 0xf8));
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        icons::ROBOT,
                        egui::FontId::proportional(22.0),
                        theme::TEXT_ON_ACCENT,
                    );
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new("AI 康养助手").strong().color(theme::TEXT_ON_ACCENT));
                        ui.label(
                            egui::RichText::new("为您全天候待命")
                                .size(theme::FONT_SMALL)
                                .color(theme::ACCENT_LIGHT),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let close = icon_button(ui, icons::X, theme::TEXT_ON_ACCENT, theme::ACCENT, 28.0);
                        if close.clicked() {
                            self.chat_open = false;
                        }
                    });
                });
            });
    }

    fn render_chat_messages(&mut self, ui: &mut egui::Ui, height: f32) {
        egui::Frame::new()
            .fill(theme::BG_BASE)
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("chat_messages")
                    .max_height(height - 32.0)
                    .min_scrolled_height(height - 32.0)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.spacing_mut().item_spacing.y = theme::SPACING_XL;
                        for turn in self.chat.transcript() {
                            chat_bubble(ui, turn);
                        }
                        if self.chat.is_busy() {
                            ui.horizontal(|ui| {
                                ui.spinner();
                                ui.label(
                                    egui::RichText::new("正在思考中...")
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_DIM),
                                );
                            });
                        }
                        if self.chat_scroll_to_bottom {
                            self.chat_scroll_to_bottom = false;
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });
            });
    }

    fn render_chat_input(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::Frame::new()
            .fill(theme::BG_CARD)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
            .inner_margin(egui::Margin::same(16))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let busy = self.chat.is_busy();
                    let send_width = 36.0;
                    let input = egui::Frame::new()
                        .fill(theme::BG_INPUT)
                        .corner_radius(theme::RADIUS_MEDIUM)
                        .inner_margin(egui::Margin::symmetric(12, 8))
                        .show(ui, |ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut self.chat_input)
                                    .hint_text("问问您的健康助手...")
                                    .frame(false)
                                    .desired_width(ui.available_width() - send_width - 24.0),
                            )
                        })
                        .inner;

                    let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let send = ui.add_enabled_ui(!busy, |ui| {
                        icon_button(
                            ui,
                            icons::PAPER_PLANE_RIGHT,
                            theme::TEXT_ON_ACCENT,
                            if busy { theme::ACCENT_LIGHT } else { theme::ACCENT },
                            send_width,
                        )
                    });

                    if enter || send.inner.clicked() {
                        self.submit_chat(ctx);
                        input.request_focus();
                    }
                });
            });
    }
}
