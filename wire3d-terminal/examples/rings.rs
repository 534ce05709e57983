/// Example: Build a scene in code and save it as an image
///
/// Usage: cargo run --example rings -- [output.png]

use std::env;
use wire3d_core::{curve, Axis, Scene, Transform};
use wire3d_terminal::{RenderConfig, Screen};

fn main() -> wire3d_core::Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "rings.png".to_string());
    let config = RenderConfig::default();

    // Twelve rings tilted about x, each turned a further 15 degrees about y
    let mut scene = Scene::new();
    for i in 0..12 {
        let mut ring = Scene::new();
        curve::add_circle(ring.edges_mut(), 0.0, 0.0, 0.0, 150.0);
        ring.push_transform(&Transform::rotate(Axis::X, 60.0))?;
        ring.push_transform(&Transform::rotate(Axis::Y, 15.0 * i as f64))?;
        ring.push_transform(&Transform::translate(250.0, 250.0, 0.0))?;
        ring.apply()?;
        scene.edges_mut().extend(ring.edges());
    }

    let mut screen = Screen::new(config.width, config.height);
    screen.draw_edges(scene.edges(), config.color);
    screen
        .save(&path)
        .map_err(|e| wire3d_core::Error::Output(Box::new(e)))?;

    println!("Saved {} segments to {}", scene.edges().segments().count(), path);
    Ok(())
}
