// File: crates/chart-render-skia/tests/render.rs
// Purpose: Validate raster output of grid and series batches, plus the golden snapshot flow.

use chart_core::headless::HeadlessCanvas;
use chart_core::{Chart, ChartOptions, LineRenderer, Rgba, Series, SeriesOptions, Size};
use chart_render_skia::SkiaLineRenderer;

/// Shares one skia renderer between the chart and the test body.
#[derive(Clone)]
struct Shared(std::rc::Rc<std::cell::RefCell<SkiaLineRenderer>>);

impl LineRenderer for Shared {
    fn clear(&mut self, size: Size, color: Rgba) -> anyhow::Result<()> {
        self.0.borrow_mut().clear(size, color)
    }
    fn render(&mut self, lines: &[chart_core::Line]) -> anyhow::Result<()> {
        self.0.borrow_mut().render(lines)
    }
}

fn shared() -> Shared {
    Shared(std::rc::Rc::new(std::cell::RefCell::new(SkiaLineRenderer::new().with_anti_alias(false))))
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn grid_pixels_land_on_expected_rows_and_columns() {
    let backend = shared();
    let options = ChartOptions {
        background: Rgba::WHITE,
        foreground: Rgba::BLACK,
        ..ChartOptions::default()
    };
    let mut chart = Chart::new(HeadlessCanvas::new(20, 10), backend.clone(), options).unwrap();
    // Window [9800, 10200]: one tick at 10000, 10 px from the left.
    chart.render(10_350.0);

    let img = decode(&backend.0.borrow_mut().png_bytes().unwrap());
    assert_eq!(img.dimensions(), (20, 10));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(19, 9).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(0, 4).0, [0, 0, 0, 255], "horizontal grid line");
    assert_eq!(img.get_pixel(10, 0).0, [0, 0, 0, 255], "vertical grid line");
}

#[test]
fn zero_sized_canvas_fails_softly() {
    let mut renderer = SkiaLineRenderer::new();
    assert!(renderer.clear(Size::new(0, 10), Rgba::WHITE).is_err());

    let mut chart = Chart::new(HeadlessCanvas::new(0, 0), SkiaLineRenderer::new(), ChartOptions::default()).unwrap();
    chart.add_series(Series::default());
    chart.render(1_000.0);
}

#[test]
fn render_before_clear_is_an_error() {
    let mut renderer = SkiaLineRenderer::new();
    assert!(renderer.render(&[]).is_err());
    assert!(renderer.png_bytes().is_err());
}

const RED: [u8; 4] = [255, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

/// 20x20 stacked chart over window [0, 200] with an invisible grid; series 1 is red.
fn stacked_pair() -> (Shared, Chart, chart_core::SeriesHandle) {
    let backend = shared();
    let options = ChartOptions {
        stack: true,
        sections: 1,
        scale: 10.0,
        offset: 0.0,
        background: Rgba::WHITE,
        foreground: Rgba::WHITE,
        ..ChartOptions::default()
    };
    let mut chart = Chart::new(HeadlessCanvas::new(20, 20), backend.clone(), options).unwrap();
    let red = SeriesOptions { color: Rgba::from_rgb8(255, 0, 0), thickness: 2.0, ..SeriesOptions::default() };
    let first = chart.add_series(Series::new(red).unwrap());
    chart.add_series(Series::default());
    (backend, chart, first)
}

fn red_rows(img: &image::RgbaImage, x: u32) -> Vec<u32> {
    (0..img.height()).filter(|&y| img.get_pixel(x, y).0 == RED).collect()
}

#[test]
fn first_stacked_series_draws_in_bottom_band() {
    let (backend, mut chart, first) = stacked_pair();
    first.extend((0..=20).map(|i| (i as f64 * 10.0, 0.0))).unwrap();
    chart.render(200.0);

    let img = decode(&backend.0.borrow_mut().png_bytes().unwrap());
    // Bottom band spans rows 10..20; value 0 sits at its middle (y = 15).
    for x in [1, 10, 18] {
        assert_eq!(red_rows(&img, x), vec![14, 15], "column {x}");
    }
    assert!((0..20).all(|x| (0..10).all(|y| img.get_pixel(x, y).0 == WHITE)), "top band untouched");
}

#[test]
fn larger_values_draw_higher() {
    let (backend, mut chart, first) = stacked_pair();
    first.extend((0..=20).map(|i| (i as f64 * 10.0, 0.6))).unwrap();
    chart.render(200.0);

    let img = decode(&backend.0.borrow_mut().png_bytes().unwrap());
    // 0.6 is 80% up the band: y = 20 - 8.
    assert_eq!(red_rows(&img, 10), vec![11, 12]);
}

#[test]
fn out_of_range_values_are_clipped_to_their_band() {
    let (backend, mut chart, first) = stacked_pair();
    // 2.0 would land at y = 5, inside the other series' band.
    first.extend((0..=20).map(|i| (i as f64 * 10.0, 2.0))).unwrap();
    chart.render(200.0);

    let img = decode(&backend.0.borrow_mut().png_bytes().unwrap());
    assert!(img.pixels().all(|p| p.0 != RED), "clipped line leaked outside its viewport");

    // 5.0 rises straight out of the canvas; the ramp up to it stays inside the band.
    let (backend, mut chart, first) = stacked_pair();
    first.append(0.0, -1.0).unwrap();
    first.append(200.0, 5.0).unwrap();
    chart.render(200.0);
    let img = decode(&backend.0.borrow_mut().png_bytes().unwrap());
    assert!((0..20).all(|x| (0..10).all(|y| img.get_pixel(x, y).0 != RED)));
    assert!(img.pixels().any(|p| p.0 == RED), "ramp drawn inside the bottom band");
}

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

#[test]
fn golden_stacked_chart() {
    let backend = shared();
    let options = ChartOptions { stack: true, scale: 10.0, offset: 0.0, tick: 500.0, ..ChartOptions::default() };
    let mut chart = Chart::new(HeadlessCanvas::new(160, 120), backend.clone(), options).unwrap();
    let colors = ["#D62728", "#1F77B4"];
    let handles: Vec<_> = colors
        .iter()
        .map(|c| {
            let opts = SeriesOptions { color: Rgba::parse(c).unwrap(), ..SeriesOptions::default() };
            chart.add_series(Series::new(opts).unwrap())
        })
        .collect();
    for i in 0..200 {
        let t = i as f64 * 10.0;
        handles[0].append(t, (t * 0.005).sin()).unwrap();
        handles[1].append(t, (t * 0.003).cos() * 0.8).unwrap();
    }
    chart.render(2_000.0);
    let bytes = backend.0.borrow_mut().png_bytes().unwrap();

    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__/stacked.png");
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        assert_eq!(decode(&bytes).as_raw(), decode(&want).as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}
