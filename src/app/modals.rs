//! Health-advice modal and toast notifications

use super::App;
use crate::chat::{advice_prompt, health_advice, ADVICE_ERROR_FALLBACK};
use crate::data::VITALS;
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, warn};

const TOAST_VISIBLE_SECS: f32 = 3.0;
const TOAST_FADE_SECS: f32 = 0.5;

impl App {
    /// Open the advice modal and ask the generator about today's readings.
    /// A request already in flight is left alone.
    pub(crate) fn request_advice(&mut self, ctx: &egui::Context) {
        self.show_advice = true;
        if self.pending_advice.is_some() {
            return;
        }
        self.advice_text = None;

        let prompt = advice_prompt(&VITALS);
        debug!(readings = VITALS.len(), "Requesting health advice");

        let (tx, rx) = oneshot::channel();
        let generator = Arc::clone(&self.generator);
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let advice = health_advice(generator.as_ref(), &prompt).await;
            tx.send(advice).ok();
            ctx.request_repaint();
        });
        self.pending_advice = Some(rx);
    }

    pub(crate) fn poll_advice(&mut self) {
        let Some(rx) = self.pending_advice.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(text) => {
                self.pending_advice = None;
                self.advice_text = Some(text);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                warn!("Advice task ended without a result");
                self.pending_advice = None;
                self.advice_text = Some(ADVICE_ERROR_FALLBACK.to_string());
            }
        }
    }

    pub(crate) fn render_advice_modal(&mut self, ctx: &egui::Context) {
        if !self.show_advice {
            return;
        }

        let width = (ctx.screen_rect().width() - 48.0).clamp(280.0, 400.0);
        let mut close = false;
        let modal = egui::Modal::new(egui::Id::new("advice_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_width(width);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(icons::SPARKLE)
                        .size(theme::FONT_TITLE)
                        .color(theme::ACCENT),
                );
                ui.label(
                    egui::RichText::new("AI 健康建议")
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
            });
            ui.add_space(theme::SPACING_LG);

            match &self.advice_text {
                Some(text) => {
                    egui::ScrollArea::vertical()
                        .id_salt("advice_text")
                        .max_height(ctx.screen_rect().height() * 0.5)
                        .show(ui, |ui| {
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(text)
                                        .size(theme::FONT_BODY)
                                        .color(theme::TEXT_SECONDARY),
                                )
                                .wrap(),
                            );
                        });
                }
                None => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(egui::RichText::new("正在分析您的健康数据...").color(theme::TEXT_MUTED));
                    });
                }
            }

            ui.add_space(theme::SPACING_XL);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme::button_accent("知道了")).clicked() {
                    close = true;
                }
            });
        });

        if close || response.should_close() {
            self.show_advice = false;
        }
    }

    /// Bottom toast: three seconds visible, then a short fade. Hovering holds it.
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let total = TOAST_VISIBLE_SECS + TOAST_FADE_SECS;
        let screen = ctx.screen_rect();
        let pos = egui::pos2(
            screen.center().x,
            screen.bottom() - theme::NAV_HEIGHT - theme::SPACING_XL,
        );

        let response = egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Tooltip)
            .fixed_pos(pos)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = if elapsed > TOAST_VISIBLE_SECS {
                    ((total - elapsed) / TOAST_FADE_SECS).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(theme::with_alpha(theme::TEXT_SECONDARY, 0.9 * alpha))
                    .corner_radius(theme::RADIUS_XL)
                    .inner_margin(egui::Margin::symmetric(18, 10))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(msg)
                                .size(theme::FONT_BODY)
                                .color(theme::with_alpha(theme::TEXT_ON_ACCENT, alpha)),
                        );
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::fake::ScriptedGenerator;
    use crate::settings::Settings;
    use std::time::Duration;

    fn test_app(generator: Arc<ScriptedGenerator>) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_parts(
            Settings::default(),
            generator,
            dir.path().to_path_buf(),
            dir.path().join("cache"),
        )
        .unwrap();
        app.prefetch_started = true;
        (app, dir)
    }

    fn wait_for_advice(app: &mut App) {
        for _ in 0..200 {
            app.poll_advice();
            if app.pending_advice.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("advice never arrived");
    }

    #[test]
    fn failing_backend_shows_connection_fallback() {
        let (mut app, _dir) = test_app(Arc::new(ScriptedGenerator::failing()));
        let ctx = egui::Context::default();
        app.request_advice(&ctx);
        wait_for_advice(&mut app);
        assert_eq!(app.advice_text.as_deref(), Some(ADVICE_ERROR_FALLBACK));
    }

    #[test]
    fn reopening_while_pending_does_not_send_twice() {
        let gate = Arc::new(tokio::sync::Semaphore::new(0));
        let generator = Arc::new(ScriptedGenerator::replying("多喝水。").gated(gate.clone()));
        let (mut app, _dir) = test_app(generator.clone());
        let ctx = egui::Context::default();

        app.request_advice(&ctx);
        app.show_advice = false;
        app.request_advice(&ctx);
        assert!(app.show_advice);

        gate.add_permits(1);
        wait_for_advice(&mut app);
        assert_eq!(generator.request_count(), 1);
        assert_eq!(app.advice_text.as_deref(), Some("多喝水。"));
    }

    #[test]
    fn prompt_carries_every_reading() {
        let generator = Arc::new(ScriptedGenerator::replying("好"));
        let (mut app, _dir) = test_app(generator.clone());
        let ctx = egui::Context::default();
        app.request_advice(&ctx);
        wait_for_advice(&mut app);

        let requests = generator.requests.lock().unwrap();
        for vital in &VITALS {
            assert!(requests[0].message.contains(vital.label));
        }
    }

    #[test]
    fn toast_expires_after_its_duration() {
        let (mut app, _dir) = test_app(Arc::new(ScriptedGenerator::replying("")));
        let ctx = egui::Context::default();
        app.show_toast("已为您刷新推荐");
        app.toast_start = Some(std::time::Instant::now() - Duration::from_secs(5));
        let _ = ctx.run(Default::default(), |ctx| app.render_toast(ctx));
        assert!(app.toast_message.is_none());
    }
}
