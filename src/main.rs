use clap::Parser;
use flappy_evo::cli::{Cli, init_tracing};
use flappy_evo::simulation::episode::{AbortHandle, Episode, SceneRenderer};
use flappy_evo::simulation::evolution::{GenerationOutcome, Population};
use macroquad::prelude::*;
use tracing::{error, info};

mod graphics;
mod ui;

fn window_conf() -> Conf {
    Conf {
        window_title: "Flappy Evo".to_owned(),
        window_width: 500,
        window_height: 800,
        window_resizable: false,
        ..Default::default()
    }
}

fn quit_requested() -> bool {
    is_quit_requested() || is_key_pressed(KeyCode::Escape)
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            return;
        }
    };

    prevent_quit();

    let mut problem: Option<String> = None;
    loop {
        if quit_requested() {
            return;
        }
        if ui::draw_genesis_screen(&mut config, problem.as_deref()) {
            match config.validate() {
                Ok(()) => break,
                Err(err) => problem = Some(err.to_string()),
            }
        }
        next_frame().await;
    }

    info!(
        population = config.evolution.population_size,
        generations = config.evolution.generations,
        seed = cli.seed,
        "starting training"
    );

    let mut population = Population::new(&config.evolution, cli.seed);
    let mut renderer = graphics::MacroquadRenderer::new();
    let mut state = ui::UIState::new(cli.ticks_per_frame);
    let abort = AbortHandle::new();
    let mut winner = None;

    for _ in 0..config.evolution.generations {
        let generation = population.generation();
        let seed = population.episode_seed();

        let summary = {
            let mut episode = Episode::new(
                &config.simulation,
                population.contestants(),
                generation,
                seed,
            )
            .with_abort_handle(abort.clone());

            loop {
                if quit_requested() {
                    abort.abort();
                }

                if !state.paused || abort.is_aborted() {
                    for _ in 0..state.ticks_per_frame {
                        if !episode.tick().is_running() {
                            break;
                        }
                    }
                }
                state.alive = episode.alive();

                if state.rendering_enabled {
                    renderer.render(&episode.frame());
                } else {
                    clear_background(DARKGRAY);
                }
                ui::draw_ui(&mut state, generation, episode.score);
                ui::process_egui();
                next_frame().await;

                if !episode.status().is_running() {
                    break;
                }
            }
            episode.summary()
        };

        let outcome = population.finish_generation(&summary);
        state.record_generation(outcome.stats());

        match outcome {
            GenerationOutcome::Evolved(_) => {}
            GenerationOutcome::Solved { winner: genome, .. } => {
                winner = Some(genome);
                break;
            }
            GenerationOutcome::Aborted(_) => return,
        }
    }

    let message = match &winner {
        Some(genome) => format!("Genome {} reached {:.1}", genome.id, genome.fitness),
        None => "Out of generations".to_owned(),
    };
    info!(%message, "training finished");

    while !quit_requested() {
        clear_background(LIGHTGRAY);
        let font_size = 30.0;
        for (line, text) in ["Training finished", message.as_str(), "Press Escape to quit"]
            .iter()
            .enumerate()
        {
            let text_size = measure_text(text, None, font_size as _, 1.0);
            draw_text(
                text,
                screen_width() / 2. - text_size.width / 2.,
                screen_height() / 2. + line as f32 * 40.0 - 40.0,
                font_size,
                DARKGRAY,
            );
        }
        next_frame().await;
    }
}
