use criterion::{Criterion, criterion_group, criterion_main};
use image::Rgba;
use rusty_pixel::{
    BrushSettings, BrushShape, BrushTip, Canvas, FillRequest, FloodFillEngine, Layer, PainterKind,
    StrokeSession,
};

fn bench_soft_line(c: &mut Criterion) {
    let mut session = StrokeSession::new();
    session.settings_mut().brush = BrushSettings::new(24, BrushTip::CIRCLE).with_density(64);
    let mut layer = Layer::new("bench", 512, 512);

    // Warm the footprint cache so the measurement focuses on per-stamp work.
    session.footprints().offsets(BrushShape::Circle, 24);

    c.bench_function("soft_line_512px", |b| {
        b.iter(|| {
            session.begin_tool(PainterKind::Brush, &layer).unwrap();
            session.stamp_line(&mut layer, 40, 256, 470, 256).unwrap();
            session.commit("bench").unwrap()
        });
    });
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut engine = FloodFillEngine::new();
    let colors = [Rgba([200, 0, 0, 255]), Rgba([0, 0, 200, 255])];
    let mut canvas = Canvas::filled(512, 512, Rgba([255, 255, 255, 255]));
    let mut turn = 0;

    c.bench_function("flood_fill_512px", |b| {
        b.iter(|| {
            turn ^= 1;
            let request = FillRequest::new(colors[turn]);
            engine.fill(&mut canvas, 0, 0, &request)
        });
    });
}

criterion_group!(benches, bench_soft_line, bench_flood_fill);
criterion_main!(benches);
