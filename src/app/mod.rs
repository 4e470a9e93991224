//! App module - contains the main application state and logic

mod chat;
mod modals;
mod thumbnails;
mod views;

use crate::chat::{ChatSession, TextGenerator};
use crate::settings::Settings;
use crate::theme;
use crate::types::Panel;
use crate::utils::{get_cache_dir, load_cjk_font};
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // View shell
    pub(crate) active_panel: Panel,
    // Chat widget
    pub(crate) chat: ChatSession,
    pub(crate) chat_open: bool,
    pub(crate) chat_input: String,
    pub(crate) chat_scroll_to_bottom: bool,
    pub(crate) pending_reply: Option<oneshot::Receiver<String>>,
    // Health advice modal
    pub(crate) show_advice: bool,
    pub(crate) advice_text: Option<String>,
    pub(crate) pending_advice: Option<oneshot::Receiver<String>>,
    // Assistant backend
    pub(crate) generator: Arc<dyn TextGenerator>,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Remote image cache
    pub(crate) image_cache: HashMap<String, Option<egui::TextureHandle>>,
    pub(crate) prefetch_started: bool,
    pub(crate) cache_dir: PathBuf,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Settings
    pub(crate) settings: Settings,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        generator: Arc<dyn TextGenerator>,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        cc.egui_ctx.set_theme(egui::Theme::Light);
        setup_fonts(&cc.egui_ctx, settings.font_path.as_deref());
        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir();
        std::fs::create_dir_all(&cache_dir).ok();

        Self::with_parts(settings, generator, data_dir, cache_dir)
    }

    /// Build the app state without touching the window context
    pub(crate) fn with_parts(
        settings: Settings,
        generator: Arc<dyn TextGenerator>,
        data_dir: PathBuf,
        cache_dir: PathBuf,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;

        Ok(Self {
            active_panel: Panel::Overview,
            chat: ChatSession::new(),
            chat_open: false,
            chat_input: String::new(),
            chat_scroll_to_bottom: false,
            pending_reply: None,
            show_advice: false,
            advice_text: None,
            pending_advice: None,
            generator,
            runtime,
            image_cache: HashMap::new(),
            prefetch_started: false,
            cache_dir,
            toast_message: None,
            toast_start: None,
            settings,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            ..self.settings.clone()
        };
        settings.save(&self.data_dir);
    }

    /// Switch the visible panel. Nothing else changes.
    pub fn select_panel(&mut self, panel: Panel) {
        if self.active_panel != panel {
            debug!(from = ?self.active_panel, to = ?panel, "Panel selected");
            self.active_panel = panel;
        }
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    /// Render one frame of the whole dashboard
    pub fn ui(&mut self, ctx: &egui::Context) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Start image prefetch on first frame
        if !self.prefetch_started {
            self.prefetch_started = true;
            self.start_image_prefetch(ctx);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Collect results from background requests
        self.poll_chat();
        self.poll_advice();

        self.render_nav_bar(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(("panel_scroll", self.active_panel))
                    .auto_shrink([false, false])
                    .show(ui, |ui| match self.active_panel {
                        Panel::Overview => self.render_overview(ui, ctx),
                        Panel::Trends => self.render_trends(ui),
                        Panel::Family => self.render_family(ui, ctx),
                        Panel::Media => self.render_media(ui, ctx),
                    });
            });

        self.render_chat_widget(ctx);
        self.render_advice_modal(ctx);
        self.render_toast(ctx);
    }

    fn render_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("nav_bar")
            .exact_height(theme::NAV_HEIGHT)
            .show_separator_line(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_NAV)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                    .inner_margin(egui::Margin::symmetric(24, 8)),
            )
            .show(ctx, |ui| {
                let width = ui.available_width() / Panel::ALL.len() as f32;
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for panel in Panel::ALL {
                        let active = self.active_panel == panel;
                        let resp = crate::ui::components::nav_button(
                            ui,
                            panel.icon(),
                            panel.label(),
                            active,
                            width,
                        );
                        if resp.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if resp.clicked() {
                            self.select_panel(panel);
                        }
                    }
                });
            });
    }
}

/// Register phosphor icons and, when available, a system CJK font
fn setup_fonts(ctx: &egui::Context, preferred: Option<&str>) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    if let Some((path, bytes)) = load_cjk_font(preferred) {
        info!(path = %path.display(), "Using CJK font");
        fonts
            .font_data
            .insert("cjk".to_owned(), Arc::new(egui::FontData::from_owned(bytes)));
        // After the default Latin font so ASCII keeps its usual look
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            let list = fonts.families.entry(family).or_default();
            let at = list.len().min(1);
            list.insert(at, "cjk".to_owned());
        }
    }

    ctx.set_fonts(fonts);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::fake::ScriptedGenerator;
    use crate::chat::{Role, BUSY_FALLBACK};
    use crate::data::{VIDEOS, VITALS};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn test_app(generator: Arc<dyn TextGenerator>) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::with_parts(
            Settings::default(),
            generator,
            dir.path().to_path_buf(),
            dir.path().join("cache"),
        )
        .unwrap();
        // Keep tests off the network
        app.prefetch_started = true;
        (app, dir)
    }

    fn run_frame(ctx: &egui::Context, app: &mut App) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    }

    fn wait_for_reply(app: &mut App) {
        for _ in 0..200 {
            app.poll_chat();
            if !app.chat.is_busy() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("reply never arrived");
    }

    #[test]
    fn every_panel_renders_without_touching_the_transcript() {
        let (mut app, _dir) = test_app(Arc::new(ScriptedGenerator::replying("ok")));
        let ctx = egui::Context::default();
        let before = app.chat.transcript().to_vec();

        for panel in Panel::ALL {
            app.select_panel(panel);
            run_frame(&ctx, &mut app);
            assert_eq!(app.active_panel, panel);
            assert_eq!(app.chat.transcript(), before.as_slice());
        }
        assert_eq!(VITALS.len(), 6);
        assert_eq!(VIDEOS.len(), 3);
    }

    #[test]
    fn chat_round_trip_through_background_task() {
        let generator = Arc::new(ScriptedGenerator::replying("记得按时吃药哦。"));
        let (mut app, _dir) = test_app(generator.clone());
        let ctx = egui::Context::default();

        app.chat_input = "提醒我吃药".into();
        app.submit_chat(&ctx);
        assert!(app.chat_input.is_empty());
        assert!(app.chat.is_busy());

        wait_for_reply(&mut app);
        let transcript = app.chat.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, Role::User);
        assert_eq!(transcript[2].text, "记得按时吃药哦。");
        assert_eq!(generator.request_count(), 1);
    }

    #[test]
    fn duplicate_submission_while_pending_is_dropped() {
        let gate = Arc::new(Semaphore::new(0));
        let generator = Arc::new(ScriptedGenerator::replying("好的").gated(gate.clone()));
        let (mut app, _dir) = test_app(generator.clone());
        let ctx = egui::Context::default();

        app.chat_input = "第一次".into();
        app.submit_chat(&ctx);
        app.chat_input = "第二次".into();
        app.submit_chat(&ctx);

        // Second message stays in the input box and never reaches the transcript
        assert_eq!(app.chat_input, "第二次");
        assert_eq!(app.chat.transcript().len(), 2);

        gate.add_permits(1);
        wait_for_reply(&mut app);
        assert_eq!(app.chat.transcript().len(), 3);
        assert_eq!(generator.request_count(), 1);
    }

    #[test]
    fn failing_backend_appends_fallback() {
        let (mut app, _dir) = test_app(Arc::new(ScriptedGenerator::failing()));
        let ctx = egui::Context::default();

        app.chat_input = "我血压有点高".into();
        app.submit_chat(&ctx);
        wait_for_reply(&mut app);

        let transcript = app.chat.transcript();
        assert_eq!(transcript[transcript.len() - 2].text, "我血压有点高");
        assert_eq!(transcript[transcript.len() - 1].text, BUSY_FALLBACK);
    }

    #[test]
    fn blank_input_does_not_start_a_request() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let (mut app, _dir) = test_app(generator.clone());
        let ctx = egui::Context::default();

        app.chat_input = "   ".into();
        app.submit_chat(&ctx);

        assert!(app.pending_reply.is_none());
        assert!(!app.chat.is_busy());
        assert_eq!(app.chat.transcript().len(), 1);
        assert_eq!(generator.request_count(), 0);
    }

    #[test]
    fn advice_request_fills_modal_text() {
        let (mut app, _dir) = test_app(Arc::new(ScriptedGenerator::replying("少吃油腻。")));
        let ctx = egui::Context::default();

        app.request_advice(&ctx);
        assert!(app.show_advice);
        for _ in 0..200 {
            app.poll_advice();
            if app.advice_text.is_some() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(app.advice_text.as_deref(), Some("少吃油腻。"));
        assert!(app.pending_advice.is_none());
        // Advice never lands in the chat transcript
        assert_eq!(app.chat.transcript().len(), 1);
    }
}
