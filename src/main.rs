use std::error::Error;
use std::path::PathBuf;

use image::Rgba;
use rusty_pixel::utils::exporter::{ExportFormat, export_canvas};
use rusty_pixel::{
    BrushSettings, BrushShape, BrushTip, FillRequest, FloodFillEngine, History, Layer, MirrorSymmetry,
    PainterKind, ShapeFillRenderer, ShapeFillRequest, StrokeSession,
};

const CANVAS_SIZE: u32 = 64;

/// Points of a filled ellipse inscribed in the given box.
fn ellipse_points(cx: i32, cy: i32, rx: i32, ry: i32) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    for y in -ry..=ry {
        for x in -rx..=rx {
            let (nx, ny) = (x as f32 / rx as f32, y as f32 / ry as f32);
            if nx * nx + ny * ny <= 1.0 {
                points.push((cx + x, cy + y));
            }
        }
    }
    points
}

fn paint_demo(layer: &mut Layer, history: &mut History) -> Result<(), Box<dyn Error>> {
    let mut session = StrokeSession::new();
    let settings = session
        .settings()
        .clone()
        .with_foreground(Rgba([20, 20, 40, 255]))
        .with_brush(BrushSettings::new(3, BrushTip::CIRCLE).with_density(160));
    *session.settings_mut() = settings;
    session.set_symmetry(Some(Box::new(MirrorSymmetry::new(true, false))));

    session.begin_tool(PainterKind::Brush, layer)?;
    session.stamp_line(layer, 6, 6, 26, 30)?;
    session.stamp_line(layer, 26, 30, 10, 56)?;
    if let Some(set) = session.commit("Brush")? {
        history.push_action(set);
    }

    let mut fill = FloodFillEngine::new();
    let request = FillRequest::new(Rgba([240, 230, 200, 255])).with_tolerance(8);
    if let Some(set) = fill.fill(layer.edit_surface_mut()?, 0, 0, &request) {
        history.push_action(set);
    }

    let shapes = ShapeFillRenderer::default();
    let request = ShapeFillRequest::new(Rgba([200, 40, 40, 255]), 4)
        .with_shape(BrushShape::Circle)
        .with_density(96)
        .filled();
    let points = ellipse_points(32, 40, 9, 6);
    if let Some(set) = shapes.render(layer.edit_surface_mut()?, &points, &request) {
        history.push_action(set);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rusty-pixel-demo.png"));

    let mut layer = Layer::new("Background", CANVAS_SIZE, CANVAS_SIZE);
    let mut history = History::new();
    if let Err(err) = paint_demo(&mut layer, &mut history) {
        log::error!("demo painting failed: {err}");
        std::process::exit(1);
    }

    match export_canvas(layer.pixels(), &path, ExportFormat::from_path(&path)) {
        Ok(()) => println!("Wrote {}", path.display()),
        Err(err) => {
            log::error!("{err}");
            eprintln!("Failed to export: {err}");
            std::process::exit(1);
        }
    }
}
