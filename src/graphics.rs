use flappy_evo::simulation::bird::WingPose;
use flappy_evo::simulation::episode::{Frame, SceneRenderer};
use flappy_evo::simulation::sprites::{self, Sprite};
use macroquad::prelude::*;

const SKY: Color = Color::new(0.44, 0.77, 0.81, 1.0);
const SKY_LOW: Color = Color::new(0.70, 0.89, 0.93, 1.0);
const HILLS: Color = Color::new(0.47, 0.76, 0.29, 1.0);
const FONT_SIZE: f32 = 40.0;

fn upload(sprite: &Sprite) -> Texture2D {
    let texture = Texture2D::from_rgba8(sprite.width as u16, sprite.height as u16, &sprite.rgba);
    texture.set_filter(FilterMode::Nearest);
    texture
}

/// Draws episodes with macroquad, using the same sprite art the collisions use.
pub struct MacroquadRenderer {
    birds: [Texture2D; 3],
    pipe_top: Texture2D,
    pipe_bottom: Texture2D,
    ground: Texture2D,
}

impl MacroquadRenderer {
    pub fn new() -> Self {
        let pipe = sprites::pipe();
        Self {
            birds: WingPose::ALL.map(|pose| upload(&sprites::bird(pose))),
            pipe_top: upload(&pipe.flipped_vertically()),
            pipe_bottom: upload(&pipe),
            ground: upload(&sprites::ground()),
        }
    }
}

impl SceneRenderer for MacroquadRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        draw_background();

        for pipe in frame.pipes {
            draw_texture(&self.pipe_top, pipe.x, pipe.top, WHITE);
            draw_texture(&self.pipe_bottom, pipe.x, pipe.bottom, WHITE);
        }

        draw_texture(&self.ground, frame.ground.x1, frame.ground.y, WHITE);
        draw_texture(&self.ground, frame.ground.x2, frame.ground.y, WHITE);

        for bird in &frame.birds {
            // sprite rotates around its centre; positive tilt is nose up
            draw_texture_ex(
                &self.birds[bird.pose.index()],
                bird.x,
                bird.y,
                WHITE,
                DrawTextureParams {
                    rotation: -bird.tilt.to_radians(),
                    ..Default::default()
                },
            );
        }

        draw_hud(frame);
    }
}

fn draw_background() {
    clear_background(SKY);
    let height = screen_height();
    draw_rectangle(0.0, height * 0.55, screen_width(), height * 0.45, SKY_LOW);
    for i in 0..6 {
        let x = i as f32 * 110.0 - 30.0;
        draw_circle(x, height * 0.86, 90.0, HILLS);
    }
}

fn draw_hud(frame: &Frame<'_>) {
    let score = format!("Score: {}", frame.score);
    let size = measure_text(&score, None, FONT_SIZE as u16, 1.0);
    draw_text_outlined(&score, screen_width() - 10.0 - size.width, 10.0 + size.offset_y);

    let generation = format!("Gen: {}", frame.generation);
    let size = measure_text(&generation, None, FONT_SIZE as u16, 1.0);
    draw_text_outlined(&generation, 10.0, 10.0 + size.offset_y);

    let alive = format!("Alive: {}", frame.alive);
    draw_text_outlined(&alive, 10.0, 20.0 + size.offset_y * 2.0);
}

fn draw_text_outlined(text: &str, x: f32, y: f32) {
    draw_text(text, x + 2.0, y + 2.0, FONT_SIZE, BLACK);
    draw_text(text, x, y, FONT_SIZE, WHITE);
}
