use egui_macroquad::egui;
use flappy_evo::simulation::evolution::GenerationStats;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UIState {
    pub best_fitness_history: VecDeque<(f64, f64)>,
    pub mean_fitness_history: VecDeque<(f64, f64)>,
    pub score_history: VecDeque<(f64, f64)>,
    pub last_generation: Option<GenerationStats>,
    pub ticks_per_frame: u32,
    pub rendering_enabled: bool,
    pub paused: bool,
    pub alive: usize,
}

impl UIState {
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            best_fitness_history: VecDeque::new(),
            mean_fitness_history: VecDeque::new(),
            score_history: VecDeque::new(),
            last_generation: None,
            ticks_per_frame: ticks_per_frame.max(1),
            rendering_enabled: true,
            paused: false,
            alive: 0,
        }
    }

    pub fn record_generation(&mut self, stats: GenerationStats) {
        let generation = f64::from(stats.generation);
        push_bounded(
            &mut self.best_fitness_history,
            (generation, f64::from(stats.best_fitness)),
        );
        push_bounded(
            &mut self.mean_fitness_history,
            (generation, f64::from(stats.mean_fitness)),
        );
        push_bounded(&mut self.score_history, (generation, f64::from(stats.score)));
        self.last_generation = Some(stats);
    }
}

fn push_bounded(history: &mut VecDeque<(f64, f64)>, point: (f64, f64)) {
    history.push_back(point);
    if history.len() > MAX_HISTORY_POINTS {
        history.pop_front();
    }
}

pub fn draw_ui(state: &mut UIState, generation: u32, score: u32) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.window_fill = egui::Color32::from_rgba_unmultiplied(20, 20, 20, 200);
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_window(egui_ctx, state, generation, score);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
