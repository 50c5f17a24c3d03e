use egui_macroquad::egui;
use flappy_evo::simulation::params::Config;
use macroquad::prelude::*;

/// Lets the user tune the run before training starts. Returns `true` once started.
pub fn draw_genesis_screen(config: &mut Config, problem: Option<&str>) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_training = false;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Flappy Evo - Configuration");
                ui.add_space(10.0);

                let evolution = &mut config.evolution;
                ui.collapsing("Population", |ui| {
                    ui.add(
                        egui::Slider::new(&mut evolution.population_size, 1..=200)
                            .text("Birds per generation"),
                    );
                    ui.add(
                        egui::Slider::new(&mut evolution.generations, 1..=500).text("Generations"),
                    );
                    ui.add(
                        egui::Slider::new(&mut evolution.fitness_threshold, 1.0..=1000.0)
                            .text("Fitness threshold")
                            .logarithmic(true),
                    );
                    ui.add(egui::Slider::new(&mut evolution.elitism, 0..=20).text("Elitism"));
                    ui.add(
                        egui::Slider::new(&mut evolution.survival_fraction, 0.05..=1.0)
                            .text("Survival fraction"),
                    );
                });

                ui.collapsing("Brain", |ui| {
                    ui.add(egui::Slider::new(&mut evolution.hidden_size, 1..=32).text("Hidden neurons"));
                    ui.add(
                        egui::Slider::new(&mut evolution.weight_scale, 0.1..=5.0)
                            .text("Initial weight scale"),
                    );
                    ui.add(
                        egui::Slider::new(&mut evolution.mutation_scale, 0.0..=2.0)
                            .text("Mutation scale"),
                    );
                });

                let simulation = &mut config.simulation;
                ui.collapsing("Game", |ui| {
                    ui.add(egui::Slider::new(&mut simulation.pipe_gap, 100.0..=400.0).text("Pipe gap"));
                    ui.add(
                        egui::Slider::new(&mut simulation.pipe_velocity, 1.0..=15.0)
                            .text("Pipe velocity"),
                    );
                    ui.add(egui::Slider::new(&mut simulation.score_cap, 1..=500).text("Score cap"));
                    ui.add(
                        egui::Slider::new(&mut simulation.jump_threshold, -1.0..=1.0)
                            .text("Jump threshold"),
                    );
                });

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                if let Some(problem) = problem {
                    ui.colored_label(egui::Color32::from_rgb(200, 40, 40), problem);
                }

                ui.horizontal(|ui| {
                    if ui.button("Start Training").clicked() {
                        start_training = true;
                    }
                    ui.label("or press Enter");
                });
            });
        });
    });

    egui_macroquad::draw();

    start_training || is_key_pressed(KeyCode::Enter)
}
