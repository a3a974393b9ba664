//! Cube render example.
//!
//! Builds a lit, rotated cube with a coloured texture per face, renders it
//! and saves the result as PNG.

use std::sync::Arc;

use anyhow::Result;
use bmr_core::{color, ArgbImage, BlendMode, Cuboid, Direction, Model};
use bmr_math::{DAffine2, DVec2, Point3D, Vector};
use bmr_renderer::{render, RenderConfig, WorkerPool};

const SIZE: u32 = 256;
const TEXTURE_SIZE: u32 = 16;

fn main() -> Result<()> {
    env_logger::init();

    println!("BMR Rasterizer - Cube Example");
    println!("=============================");

    let start = std::time::Instant::now();
    let model = build_model()?;
    println!("Model built in {:?} ({} faces)", start.elapsed(), model.face_count());

    // Model units are texels; centre the cube and scale it up
    let base = DAffine2::from_translation(DVec2::new(SIZE as f64 / 2.0, SIZE as f64 / 2.0))
        * DAffine2::from_scale(DVec2::splat(6.0));

    let pool = WorkerPool::new(0)?;
    let config = RenderConfig::default();

    let start = std::time::Instant::now();
    let background = ArgbImage::filled(SIZE, SIZE, color::pack(40, 44, 52, 255));
    let image = render(&model, background, base, &config, &pool)?.join()?;
    println!("Rendered {}x{} in {:?}", SIZE, SIZE, start.elapsed());

    let filename = "cube.png";
    image.to_rgba_image().save(filename)?;
    println!("Saved to {}", filename);

    pool.shutdown();
    Ok(())
}

fn build_model() -> Result<Model> {
    let palette = [
        (Direction::Up, [236, 240, 241]),
        (Direction::Down, [52, 73, 94]),
        (Direction::North, [231, 76, 60]),
        (Direction::East, [46, 204, 113]),
        (Direction::South, [52, 152, 219]),
        (Direction::West, [241, 196, 15]),
    ];

    let mut images = vec![None; 6];
    for (direction, [r, g, b]) in palette {
        images[direction.index()] = Some(Arc::new(checker(r, g, b)));
    }

    let half = TEXTURE_SIZE as f64 / 2.0;
    let mut cube = Cuboid::from_corners(
        Point3D::new(-half, -half, -half),
        Point3D::new(half, half, half),
        &images,
    )?;

    // A glint streak across the top face
    let mut glint = ArgbImage::new(TEXTURE_SIZE, TEXTURE_SIZE);
    for i in 0..TEXTURE_SIZE {
        glint.set(i, i, color::pack(96, 96, 96, 255));
    }
    let mut overlays = vec![Vec::new(); 6];
    overlays[Direction::Up.index()] = vec![Arc::new(glint)];
    cube.set_overlays(&overlays)?;
    let mut modes = vec![Vec::new(); 6];
    modes[Direction::Up.index()] = vec![Some(BlendMode::GLINT)];
    cube.set_overlay_blend_modes(&modes)?;

    let mut model = Model::new(vec![cube]);
    model.rotate(-30.0, 45.0, 0.0, false);
    model.update_lighting(Vector::new(-0.4, -1.0, -0.6), 0.45, 1.0);
    Ok(model)
}

/// Two-tone checkerboard in the given colour.
fn checker(r: u8, g: u8, b: u8) -> ArgbImage {
    let mut image = ArgbImage::filled(TEXTURE_SIZE, TEXTURE_SIZE, color::pack(r as u32, g as u32, b as u32, 255));
    let dark = color::pack(r as u32 * 3 / 4, g as u32 * 3 / 4, b as u32 * 3 / 4, 255);
    for y in 0..TEXTURE_SIZE {
        for x in 0..TEXTURE_SIZE {
            if (x / 4 + y / 4) % 2 == 1 {
                image.set(x, y, dark);
            }
        }
    }
    image
}
