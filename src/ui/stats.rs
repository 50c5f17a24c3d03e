use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use std::collections::VecDeque;

use super::ui::UIState;

const BEST_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 80);
const MEAN_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);
const SCORE_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 220, 120);

fn line<'a>(history: &VecDeque<(f64, f64)>, color: egui::Color32, name: &'a str) -> Line<'a> {
    let points: PlotPoints = history.iter().map(|&(x, y)| [x, y]).collect();
    Line::new(points).color(color).name(name)
}

pub(super) fn draw_stats_window(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    generation: u32,
    score: u32,
) {
    egui::Window::new("Training")
        .default_pos([10.0, 110.0])
        .default_width(300.0)
        .default_open(false)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.label(format!("Generation: {generation}"));
            ui.label(format!("Alive: {}", state.alive));
            ui.label(format!("Score: {score}"));

            if let Some(last) = state.last_generation {
                ui.separator();
                ui.label(format!(
                    "Last generation: best={:.1} mean={:.1} score={} ticks={}",
                    last.best_fitness, last.mean_fitness, last.score, last.ticks
                ));
            }

            ui.separator();

            ui.horizontal(|ui| {
                let pause_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(pause_text).clicked() {
                    state.paused = !state.paused;
                }
                let render_text = if state.rendering_enabled {
                    "🎨 Rendering: ON"
                } else {
                    "🎨 Rendering: OFF"
                };
                if ui.button(render_text).clicked() {
                    state.rendering_enabled = !state.rendering_enabled;
                }
            });

            ui.add(egui::Slider::new(&mut state.ticks_per_frame, 1..=200).text("Ticks per frame"));

            ui.separator();
            ui.label("Fitness per generation");
            Plot::new("fitness_plot")
                .height(140.0)
                .show_axes([true, true])
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(line(&state.best_fitness_history, BEST_COLOR, "Best"));
                    plot_ui.line(line(&state.mean_fitness_history, MEAN_COLOR, "Mean"));
                });

            ui.label("Score per generation");
            Plot::new("score_plot")
                .height(100.0)
                .show_axes([true, true])
                .show(ui, |plot_ui| {
                    plot_ui.line(line(&state.score_history, SCORE_COLOR, "Score"));
                });
        });
}
