//! Debug panel component
//!
//! Displays internal state, amplitude internals, and the recent update
//! history for debugging.

use crate::amplitude::AmplitudeController;
use crate::state::{HistoryEntry, StateStore};
use crate::ui::theme::Theme;
use egui::{self, RichText, ScrollArea};

/// History entries listed in the panel
const HISTORY_ROWS: usize = 12;

/// Debug panel component
pub struct DebugPanel<'a> {
    store: &'a StateStore,
    theme: &'a Theme,
    fps: f64,
    amplitude: Option<&'a AmplitudeController>,
    uptime_secs: f64,
}

impl<'a> DebugPanel<'a> {
    pub fn new(store: &'a StateStore, theme: &'a Theme) -> Self {
        Self {
            store,
            theme,
            fps: 0.0,
            amplitude: None,
            uptime_secs: 0.0,
        }
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    pub fn amplitude(mut self, controller: &'a AmplitudeController) -> Self {
        self.amplitude = Some(controller);
        self
    }

    pub fn uptime(mut self, secs: f64) -> Self {
        self.uptime_secs = secs;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let snapshot = self.store.snapshot();

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    // Header
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Debug Panel")
                                .strong()
                                .color(self.theme.text_primary),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{:.1} FPS", self.fps))
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(self.fps_color()),
                            );
                        });
                    });

                    ui.separator();

                    // Stats grid
                    egui::Grid::new("debug_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            self.stat_row(
                                ui,
                                "Session",
                                if snapshot.is_active { "Active" } else { "Idle" },
                            );
                            self.stat_row(ui, "Status", snapshot.status_text());
                            self.stat_row(
                                ui,
                                "Speaker",
                                snapshot.current_speaker.map_or("—", |s| s.label()),
                            );
                            self.stat_row(ui, "Volume", &format!("{:.2}", snapshot.volume));
                            if let Some(amplitude) = self.amplitude {
                                self.stat_row(
                                    ui,
                                    "Amplitude",
                                    &format!(
                                        "{:.2} → {:.2}",
                                        amplitude.displayed(),
                                        amplitude.target()
                                    ),
                                );
                                self.stat_row(
                                    ui,
                                    "Wave Mode",
                                    if amplitude.is_idle() { "breathing" } else { "live" },
                                );
                            }
                            self.stat_row(ui, "History", &self.store.history_len().to_string());
                            self.stat_row(ui, "Uptime", &format!("{:.0}s", self.uptime_secs));
                        });

                    if let Some(error) = &snapshot.error {
                        ui.add_space(self.theme.spacing_sm);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("⚠").color(self.theme.error));
                            ui.label(RichText::new(error).size(12.0).color(self.theme.error));
                        });
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.separator();

                    // Recent state changes
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new("Recent Updates")
                                .size(12.0)
                                .strong()
                                .color(self.theme.text_secondary),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Clear").clicked() {
                                self.store.clear_history();
                            }
                        });
                    });

                    let history = self.store.history();
                    ScrollArea::vertical()
                        .max_height(140.0)
                        .auto_shrink([false, false])
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            ui.vertical(|ui| {
                                let start = history.len().saturating_sub(HISTORY_ROWS);
                                for entry in &history[start..] {
                                    ui.label(
                                        RichText::new(format!(
                                            "{} {}",
                                            entry.timestamp.format("%H:%M:%S"),
                                            change_summary(entry)
                                        ))
                                        .size(11.0)
                                        .family(egui::FontFamily::Monospace)
                                        .color(self.theme.text_muted),
                                    );
                                }

                                if history.is_empty() {
                                    ui.label(
                                        RichText::new("No updates yet")
                                            .size(11.0)
                                            .color(self.theme.text_muted)
                                            .italics(),
                                    );
                                }
                            });
                        });
                });
            });
    }

    fn stat_row(&self, ui: &mut egui::Ui, label: &str, value: &str) {
        ui.label(RichText::new(label).size(12.0).color(self.theme.text_muted));

        let display_value = if value.is_empty() { "—" } else { value };

        ui.label(
            RichText::new(display_value)
                .size(12.0)
                .family(egui::FontFamily::Monospace)
                .color(self.theme.text_primary),
        );

        ui.end_row();
    }

    fn fps_color(&self) -> egui::Color32 {
        if self.fps >= 55.0 {
            self.theme.success
        } else if self.fps >= 30.0 {
            self.theme.warning
        } else {
            self.theme.error
        }
    }
}

/// Compact description of what an update changed
fn change_summary(entry: &HistoryEntry) -> String {
    let prev = &entry.previous;
    let curr = &entry.current;
    let mut parts = Vec::new();

    if prev.is_active != curr.is_active {
        parts.push(format!("active={}", curr.is_active));
    }
    if prev.is_speaking != curr.is_speaking {
        parts.push(format!("speaking={}", curr.is_speaking));
    }
    if prev.is_listening != curr.is_listening {
        parts.push(format!("listening={}", curr.is_listening));
    }
    if prev.current_transcript != curr.current_transcript {
        parts.push(format!("transcript({} chars)", curr.current_transcript.len()));
    }
    if prev.current_speaker != curr.current_speaker {
        parts.push(format!(
            "speaker={}",
            curr.current_speaker.map_or("none", |s| s.label())
        ));
    }
    if prev.theme != curr.theme {
        parts.push("theme".to_string());
    }
    if prev.volume != curr.volume {
        parts.push(format!("volume={:.2}", curr.volume));
    }
    if prev.error != curr.error {
        parts.push(if curr.error.is_some() {
            "error set".to_string()
        } else {
            "error cleared".to_string()
        });
    }

    if parts.is_empty() {
        "(no change)".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{StateUpdate, ThemeMode};

    #[test]
    fn test_change_summary_names_changed_fields() {
        let store = StateStore::new(ThemeMode::Dark);
        store.update(StateUpdate::default().active(true).volume(0.5));

        let history = store.history();
        let summary = change_summary(&history[0]);
        assert!(summary.contains("active=true"));
        assert!(summary.contains("volume=0.50"));
    }

    #[test]
    fn test_change_summary_flags_noop_updates() {
        let store = StateStore::new(ThemeMode::Dark);
        store.update(StateUpdate::default().active(false));

        let history = store.history();
        assert_eq!(change_summary(&history[0]), "(no change)");
    }
}
