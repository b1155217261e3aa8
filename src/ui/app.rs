//! Main application struct and eframe integration
//!
//! MurmurApp owns the session handle, the event adapter, and the store
//! bindings, and drives them from the eframe update loop.

use crate::adapter::{EventAdapter, WaveSurface};
use crate::amplitude::FrameTicker;
use crate::config::AppConfig;
use crate::session::SessionHandle;
use crate::state::{StateStore, StateUpdate, ThemeMode};
use crate::ui::bindings::UiBindings;
use crate::ui::components::{
    CallButton, CallButtonState, DebugPanel, StatusBadge, TranscriptCard, WaveView,
};
use crate::ui::theme::Theme;
use crate::utils::{FrameStats, UserPrefs};
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::path::PathBuf;
use std::thread::JoinHandle;
use tracing::{error, info, warn};

/// Main Murmur application
pub struct MurmurApp {
    /// Application configuration
    config: AppConfig,
    /// Shared assistant state
    store: StateStore,
    /// Command side of the session backend
    session: SessionHandle,
    /// Session event to store/renderer bridge
    adapter: EventAdapter,
    /// Shared frame read by the waveform view
    surface: WaveSurface,
    /// Store subscriptions backing the widgets
    bindings: UiBindings,
    /// Visual theme
    theme: Theme,
    /// Animation clock, running while the window lives
    ticker: FrameTicker,
    /// Frame time bookkeeping for the FPS readout
    stats: FrameStats,
    /// Where the theme preference is persisted
    prefs_path: PathBuf,
    /// Set between a start request and the backend reporting the call live
    pending_call: bool,
    /// Whether the debug side panel is open
    show_debug: bool,
    /// Whether the first-frame setup has run
    initialized: bool,
    /// Session worker thread, joined on exit
    worker: Option<JoinHandle<()>>,
}

impl MurmurApp {
    /// Create a new Murmur application from pre-wired parts
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        store: StateStore,
        session: SessionHandle,
        adapter: EventAdapter,
        surface: WaveSurface,
        worker: Option<JoinHandle<()>>,
    ) -> Self {
        let theme = Theme::for_mode(store.snapshot().theme);
        theme.apply(&cc.egui_ctx);

        let bindings = UiBindings::new(store.clone(), config.error_display_secs);

        Self {
            config,
            store,
            session,
            adapter,
            surface,
            bindings,
            theme,
            ticker: FrameTicker::new(),
            stats: FrameStats::default(),
            prefs_path: UserPrefs::default_path(),
            pending_call: false,
            show_debug: false,
            initialized: false,
            worker,
        }
    }

    /// First-frame setup, anchored to the egui clock
    fn initialize(&mut self, now: f64) {
        if self.initialized {
            return;
        }

        self.ticker.start(now);
        info!("Murmur UI initialized");
        self.initialized = true;
    }

    /// Start or stop the call, depending on where it currently is
    fn toggle_call(&mut self, call_active: bool) {
        if call_active || self.pending_call {
            self.end_call();
        } else {
            self.start_call();
        }
    }

    fn start_call(&mut self) {
        match self.session.start_call(&self.config.session) {
            Ok(()) => {
                info!("Call requested");
                self.pending_call = true;
            }
            Err(err) => {
                error!("Failed to request call: {err}");
                self.store.update(
                    StateUpdate::default().error(Some(format!("Failed to start call: {err}"))),
                );
            }
        }
    }

    fn end_call(&mut self) {
        if let Err(err) = self.session.stop_call() {
            error!("Failed to request hang up: {err}");
        }
        self.pending_call = false;
    }

    /// Flip the theme, restyle the context, and persist the choice
    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let mode = self.store.toggle_theme();
        self.theme = Theme::for_mode(mode);
        self.theme.apply(ctx);

        let prefs = UserPrefs { theme: mode };
        if let Err(err) = prefs.save(&self.prefs_path) {
            warn!("Failed to persist theme preference: {err}");
        }
    }

    /// Keyboard shortcuts, suppressed while a widget has focus
    fn handle_keys(&mut self, ctx: &egui::Context, call_active: bool) {
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.toggle_call(call_active);
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape))
            && (call_active || self.pending_call)
        {
            self.end_call();
        }
    }

    /// Show the top header bar
    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    // App title
                    ui.label(
                        RichText::new("Murmur")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.label(
                        RichText::new("Voice Assistant")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // Theme toggle
                        let theme_icon = match self.theme.mode {
                            ThemeMode::Dark => "☀",
                            ThemeMode::Light => "🌙",
                        };
                        if ui.button(theme_icon).on_hover_text("Toggle Theme").clicked() {
                            self.toggle_theme(ctx);
                        }

                        // Debug toggle
                        if ui.button("🔍").on_hover_text("Toggle Debug Panel").clicked() {
                            self.show_debug = !self.show_debug;
                        }

                        // FPS indicator
                        ui.label(
                            RichText::new(format!("{:.0} FPS", self.stats.fps()))
                                .size(11.0)
                                .family(egui::FontFamily::Monospace)
                                .color(self.theme.text_muted),
                        );
                    });
                });
            });
    }

    /// Show the debug panel on the side
    fn show_debug_panel(&mut self, ctx: &egui::Context, now: f64) {
        if !self.show_debug {
            return;
        }

        SidePanel::right("debug_panel")
            .resizable(true)
            .default_width(300.0)
            .min_width(250.0)
            .max_width(500.0)
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                DebugPanel::new(&self.store, &self.theme)
                    .fps(self.stats.fps())
                    .amplitude(self.adapter.amplitude())
                    .uptime(self.ticker.uptime(now).unwrap_or(0.0))
                    .show(ui);
            });
    }

    /// Show the main content area
    fn show_content(&mut self, ctx: &egui::Context, call_active: bool) {
        let button_state = if call_active {
            CallButtonState::Active
        } else if self.pending_call {
            CallButtonState::Connecting
        } else {
            CallButtonState::Idle
        };

        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing);

                    let status_line = self.bindings.status_line();
                    StatusBadge::new(&status_line, self.bindings.status_kind(), &self.theme)
                        .show(ui);

                    ui.add_space(self.theme.spacing);

                    WaveView::new(&self.surface, &self.theme, &self.config.waveform).show(ui);

                    ui.add_space(self.theme.spacing_lg);

                    let response = CallButton::new(button_state, &self.theme).show(ui);
                    if response.clicked() {
                        self.toggle_call(call_active);
                    }

                    ui.add_space(self.theme.spacing_lg);

                    let transcript = self.bindings.transcript();
                    let error = self.bindings.error_message();
                    TranscriptCard::new(&transcript, self.bindings.speaker(), &self.theme)
                        .error(error.as_deref())
                        .show(ui);

                    ui.add_space(self.theme.spacing_sm);

                    ui.label(
                        RichText::new("Space to start or end a call")
                            .size(11.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }
}

impl eframe::App for MurmurApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.stats.on_frame(now);

        self.initialize(now);

        // Drain session events and advance the animation
        if self.ticker.is_running() {
            self.adapter.pump(now);
        }
        self.bindings.tick(now);

        let snapshot = self.store.snapshot();
        if self.pending_call && (snapshot.is_active || self.bindings.has_error()) {
            self.pending_call = false;
        }

        self.handle_keys(ctx, snapshot.is_active);

        self.show_header(ctx);
        self.show_debug_panel(ctx, now);
        self.show_content(ctx, snapshot.is_active);

        // Keep draining the event channel even while visually idle
        if snapshot.is_active || self.pending_call || self.bindings.has_error() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Murmur shutting down");

        self.ticker.cancel();
        if let Err(err) = self.session.shutdown() {
            warn!("Session already gone during shutdown: {err}");
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Session worker panicked before exit");
            }
        }
    }
}
