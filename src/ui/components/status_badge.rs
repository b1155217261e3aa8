//! Status badge component

use crate::state::StatusKind;
use crate::ui::theme::Theme;
use egui::{RichText, Sense, Vec2};

/// Colored-dot status line driven by the binding cache
pub struct StatusBadge<'a> {
    text: &'a str,
    kind: StatusKind,
    theme: &'a Theme,
}

impl<'a> StatusBadge<'a> {
    pub fn new(text: &'a str, kind: StatusKind, theme: &'a Theme) -> Self {
        Self { text, kind, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let color = self.theme.status_color(self.kind);
        let speaking = matches!(
            self.kind,
            StatusKind::UserSpeaking | StatusKind::AssistantSpeaking
        );

        ui.horizontal(|ui| {
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
            let center = rect.center();
            let painter = ui.painter();

            if speaking {
                // Pulse while someone is talking
                let t = ui.ctx().input(|i| i.time);
                let pulse = ((t * 4.0).sin() * 0.5 + 0.5) as f32;
                painter.circle_filled(center, 4.0 + pulse * 3.0, color.gamma_multiply(0.35));
                ui.ctx().request_repaint();
            }
            painter.circle_filled(center, 4.0, color);

            ui.label(RichText::new(self.text).size(14.0).color(color));

            response
        })
        .inner
    }
}
