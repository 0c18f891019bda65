//! polyspin: grab a polyhedron and fling it
//!
//! A single lit solid spins in the window. Dragging with mouse or touch
//! rotates it directly; letting go hands the gesture's speed to a decaying
//! idle spin. The interesting machinery is in `spin` - everything else is
//! a small software rasterizer and input plumbing around it.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod mesh;
mod pointer;
mod raster;
mod spin;

use macroquad::prelude::*;

use config::load_tuning;
use mesh::{Mesh, ModelDef};
use pointer::PointerAdapter;
use raster::{render_model, Framebuffer};
use spin::Spinner;

/// Side length of the square render target, in pixels
const CANVAS_SIZE: usize = 480;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("polyspin v{}", VERSION),
        window_width: 640,
        window_height: 640,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let tuning = load_tuning();
    let models = ModelDef::all();
    let mut model_index = 0;
    let mut mesh = Mesh::build(models[model_index].solid);
    let mut spinner = Spinner::new(&models[model_index], tuning.clone());
    let mut adapter = PointerAdapter::new(tuning.pointer_throttle_ms);
    let mut fb = Framebuffer::new(CANVAS_SIZE, CANVAS_SIZE);

    println!("polyspin v{} - drag to spin, 1/2/3 to switch solids", VERSION);

    loop {
        // Switching solids rebuilds the spinner at the new rest pose
        let requested = if is_key_pressed(KeyCode::Key1) {
            Some(0)
        } else if is_key_pressed(KeyCode::Key2) {
            Some(1)
        } else if is_key_pressed(KeyCode::Key3) {
            Some(2)
        } else {
            None
        };
        if let Some(i) = requested {
            if i != model_index {
                model_index = i;
                mesh = Mesh::build(models[i].solid);
                spinner = Spinner::new(&models[i], tuning.clone());
                println!("Switched to {}", models[i].label);
            }
        }

        // Pointer events first, then the per-frame tick, then one read of
        // the orientation for rendering
        adapter.update(&mut spinner);
        spinner.advance(get_frame_time());

        fb.clear(255, 255, 255);
        render_model(&mut fb, &mesh, spinner.orientation());

        clear_background(WHITE);
        let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        texture.set_filter(FilterMode::Linear);
        let side = screen_width().min(screen_height());
        draw_texture_ex(
            &texture,
            (screen_width() - side) / 2.0,
            (screen_height() - side) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(side, side)),
                ..Default::default()
            },
        );

        let caption = format!("{} - {} faces", models[model_index].label, mesh.face_count());
        draw_text(&caption, 16.0, 28.0, 24.0, DARKGRAY);
        draw_text("drag to spin - 1/2/3 to switch", 16.0, 50.0, 18.0, GRAY);
        let status = format!("spin: {:+.4} rad/frame", spinner.velocity());
        draw_text(&status, 16.0, screen_height() - 16.0, 18.0, GRAY);

        next_frame().await;
    }
}
