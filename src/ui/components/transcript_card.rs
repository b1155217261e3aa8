//! Transcript card component
//!
//! Shows the live transcript with speaker attribution, a placeholder
//! before the first call, and the error override while one is flashing.

use crate::state::Speaker;
use crate::ui::theme::Theme;
use egui::{RichText, ScrollArea};

/// Transcript placeholder shown when there is nothing to display
pub const PLACEHOLDER_TEXT: &str = "Click the button to start";

/// Card presenting transcript text, placeholder, or a flashed error
pub struct TranscriptCard<'a> {
    transcript: &'a str,
    speaker: Option<Speaker>,
    error: Option<&'a str>,
    theme: &'a Theme,
    min_height: f32,
}

impl<'a> TranscriptCard<'a> {
    pub fn new(transcript: &'a str, speaker: Option<Speaker>, theme: &'a Theme) -> Self {
        Self {
            transcript,
            speaker,
            error: None,
            theme,
            min_height: 96.0,
        }
    }

    /// Override the card with an error message
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.set_min_height(self.min_height);

                if let Some(error) = self.error {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("⚠").size(16.0).color(self.theme.error));
                        ui.label(RichText::new(error).size(14.0).color(self.theme.error));
                    });
                    return;
                }

                if self.transcript.is_empty() {
                    ui.label(
                        RichText::new(PLACEHOLDER_TEXT)
                            .size(14.0)
                            .italics()
                            .color(self.theme.text_muted),
                    );
                    return;
                }

                if let Some(speaker) = self.speaker {
                    ui.label(
                        RichText::new(speaker.label())
                            .size(12.0)
                            .strong()
                            .color(self.theme.speaker_color(speaker)),
                    );
                    ui.add_space(self.theme.spacing_sm / 2.0);
                }

                ScrollArea::vertical()
                    .max_height(120.0)
                    .auto_shrink([false, true])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(self.transcript)
                                .size(16.0)
                                .color(self.theme.text_primary),
                        );
                    });
            });
    }
}
