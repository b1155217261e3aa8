//! Call button component
//!
//! The single round button that starts and ends a voice call, with a
//! connecting state while the session is being established.

use crate::ui::theme::Theme;
use egui::{Color32, Rect, RichText, Sense, Vec2};

/// What the button currently offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallButtonState {
    /// No call; clicking starts one
    Idle,
    /// Start requested, waiting for the session to connect
    Connecting,
    /// Call live; clicking hangs up
    Active,
}

/// Round call toggle button with a label underneath
pub struct CallButton<'a> {
    state: CallButtonState,
    theme: &'a Theme,
    size: f32,
}

impl<'a> CallButton<'a> {
    pub fn new(state: CallButtonState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            size: 72.0,
        }
    }

    /// Set custom button size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Show the button centered with its label, returning the click
    /// response of the circle
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        ui.vertical_centered(|ui| {
            let (label, label_color, a11y_label) = match self.state {
                CallButtonState::Idle => ("Start Call", self.theme.text_muted, "Start a call"),
                CallButtonState::Connecting => ("Loading...", self.theme.warning, "Connecting"),
                CallButtonState::Active => ("End Call", self.theme.call_active, "End the call"),
            };

            let size = Vec2::splat(self.size);
            let (rect, response) = ui.allocate_exact_size(size, Sense::click());
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, a11y_label)
            });

            if ui.is_rect_visible(rect) {
                self.paint_button(ui, rect, &response);
            }

            self.show_tooltip(&response);

            ui.add_space(8.0);
            ui.label(RichText::new(label).size(12.0).color(label_color));

            response
        })
        .inner
    }

    fn paint_button(&self, ui: &mut egui::Ui, rect: Rect, response: &egui::Response) {
        let painter = ui.painter();
        let center = rect.center();
        let radius = self.size / 2.0 - 4.0;

        let bg_color = match self.state {
            CallButtonState::Active => self.theme.call_active,
            CallButtonState::Connecting => self.theme.warning.gamma_multiply(0.8),
            CallButtonState::Idle if response.hovered() => self.theme.primary.gamma_multiply(1.2),
            CallButtonState::Idle => self.theme.primary,
        };

        painter.circle_filled(center, radius, bg_color);

        if response.hovered() && self.state == CallButtonState::Idle {
            painter.circle_stroke(
                center,
                radius + 1.0,
                egui::Stroke::new(2.0, self.theme.primary.gamma_multiply(0.6)),
            );
        }

        match self.state {
            CallButtonState::Idle => self.draw_mic_icon(painter, center),
            CallButtonState::Connecting => self.draw_connecting_dots(ui, painter, center),
            CallButtonState::Active => {
                self.draw_stop_icon(painter, center);
                self.draw_pulsing_rings(ui, painter, center, radius);
            }
        }
    }

    /// Draw the stop square icon (call live)
    fn draw_stop_icon(&self, painter: &egui::Painter, center: egui::Pos2) {
        let stop_size = 18.0;
        painter.rect_filled(
            Rect::from_center_size(center, Vec2::splat(stop_size)),
            2.0,
            Color32::WHITE,
        );
    }

    /// Draw the rotating connecting indicator
    fn draw_connecting_dots(&self, ui: &egui::Ui, painter: &egui::Painter, center: egui::Pos2) {
        let t = ui.ctx().input(|i| i.time);
        let angle = t * 3.0;

        for i in 0..3 {
            let dot_angle = angle + (i as f64 * std::f64::consts::TAU / 3.0);
            let radius = 10.0;
            let dot_pos = egui::pos2(
                center.x + (dot_angle.cos() as f32 * radius),
                center.y + (dot_angle.sin() as f32 * radius),
            );

            let alpha = 1.0 - (i as f32 * 0.3);
            let color = Color32::from_white_alpha((255.0 * alpha) as u8);
            painter.circle_filled(dot_pos, 3.5, color);
        }

        ui.ctx().request_repaint();
    }

    /// Draw the microphone icon (no call)
    fn draw_mic_icon(&self, painter: &egui::Painter, center: egui::Pos2) {
        let color = Color32::WHITE;

        // Mic body
        let mic_rect = Rect::from_center_size(
            egui::pos2(center.x, center.y - 4.0),
            Vec2::new(10.0, 16.0),
        );
        painter.rect_filled(mic_rect, 5.0, color);

        // Cradle arc, approximated with short segments
        let arc_center = egui::pos2(center.x, center.y + 2.0);
        let arc_radius = 12.0;
        let num_segments = 8;
        for i in 0..num_segments {
            let start_angle = std::f32::consts::PI * (i as f32 / num_segments as f32);
            let end_angle = std::f32::consts::PI * ((i + 1) as f32 / num_segments as f32);

            let start = egui::pos2(
                arc_center.x - arc_radius * start_angle.cos(),
                arc_center.y + arc_radius * start_angle.sin(),
            );
            let end = egui::pos2(
                arc_center.x - arc_radius * end_angle.cos(),
                arc_center.y + arc_radius * end_angle.sin(),
            );

            painter.line_segment([start, end], egui::Stroke::new(2.0, color));
        }

        // Stem
        painter.line_segment(
            [
                egui::pos2(center.x, arc_center.y + arc_radius),
                egui::pos2(center.x, arc_center.y + arc_radius + 5.0),
            ],
            egui::Stroke::new(2.0, color),
        );
    }

    /// Draw expanding pulse rings while the call is live
    fn draw_pulsing_rings(
        &self,
        ui: &egui::Ui,
        painter: &egui::Painter,
        center: egui::Pos2,
        radius: f32,
    ) {
        let t = ui.ctx().input(|i| i.time);

        let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
        painter.circle_stroke(
            center,
            radius + 2.0 + pulse * 8.0,
            egui::Stroke::new(
                2.0 + pulse * 2.0,
                self.theme.call_active.gamma_multiply((1.0 - pulse) * 0.6),
            ),
        );

        // Second ring, opposite phase
        let pulse2 = (((t * 3.0) + std::f64::consts::PI).sin() * 0.5 + 0.5) as f32;
        painter.circle_stroke(
            center,
            radius + 2.0 + pulse2 * 8.0,
            egui::Stroke::new(
                1.5 + pulse2 * 1.5,
                self.theme.call_active.gamma_multiply((1.0 - pulse2) * 0.4),
            ),
        );

        ui.ctx().request_repaint();
    }

    fn show_tooltip(&self, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let tooltip_text = match self.state {
            CallButtonState::Idle => "Start a call (Space)",
            CallButtonState::Connecting => "Connecting...",
            CallButtonState::Active => "End the call (Space or Esc)",
        };

        response.clone().on_hover_text(tooltip_text);
    }
}
