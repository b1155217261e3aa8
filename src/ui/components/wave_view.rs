//! Waveform visualization component
//!
//! Paints the layered traveling-wave curve from the shared render
//! surface. Amplitude and color come from the event bridge; this widget
//! only draws what it is told.

use crate::adapter::WaveSurface;
use crate::config::WaveformConfig;
use crate::ui::theme::Theme;
use egui::{Pos2, Sense, Shape, Stroke, Vec2};

/// Full sine cycles across the widget width
const WAVE_CYCLES: f32 = 2.5;

/// Curve sampling resolution
const SEGMENTS: usize = 96;

/// Animated waveform fed by the render surface
pub struct WaveView<'a> {
    surface: &'a WaveSurface,
    theme: &'a Theme,
    config: &'a WaveformConfig,
}

impl<'a> WaveView<'a> {
    pub fn new(surface: &'a WaveSurface, theme: &'a Theme, config: &'a WaveformConfig) -> Self {
        Self {
            surface,
            theme,
            config,
        }
    }

    /// Show the waveform and return the response
    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = Vec2::new(ui.available_width(), self.config.height);
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::hover());

        let frame = self.surface.frame();

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, self.theme.card_rounding, self.theme.bg_secondary);

            let draw_rect = rect.shrink(8.0);
            if frame.running {
                let time = ui.ctx().input(|i| i.time);
                let phase = (time * self.config.speed as f64 * std::f64::consts::TAU) as f32;
                let color = self.theme.wave_color(frame.color);
                // Drawing amplitude normalized so a shouting-level signal
                // just reaches the widget edge
                let amplitude = frame.amplitude * self.config.master_amplitude / 10.0;
                let half_height = draw_rect.height() / 2.0;

                // Back-to-front layers, dimmer and flatter behind
                for (attenuation, brightness, offset) in
                    [(0.4, 0.25, 1.6), (0.65, 0.5, 0.8), (1.0, 1.0, 0.0)]
                {
                    let mut points = Vec::with_capacity(SEGMENTS + 1);
                    for i in 0..=SEGMENTS {
                        let rel = i as f32 / SEGMENTS as f32;
                        let x = draw_rect.left() + rel * draw_rect.width();
                        // Taper toward the edges so the curve pins at both ends
                        let envelope = (rel * std::f32::consts::PI).sin();
                        let y = draw_rect.center().y
                            - (rel * WAVE_CYCLES * std::f32::consts::TAU + phase + offset).sin()
                                * envelope
                                * amplitude
                                * attenuation
                                * half_height;
                        points.push(Pos2::new(x, y));
                    }
                    painter.add(Shape::line(
                        points,
                        Stroke::new(2.0, color.gamma_multiply(brightness)),
                    ));
                }
            } else {
                // Resting line between calls
                let center_y = rect.center().y;
                painter.line_segment(
                    [
                        Pos2::new(draw_rect.left(), center_y),
                        Pos2::new(draw_rect.right(), center_y),
                    ],
                    Stroke::new(1.0, self.theme.waveform_idle),
                );
            }
        }

        // Keep the curve moving while the renderer is running
        if frame.running {
            ui.ctx().request_repaint();
        }

        response
    }
}
