// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `glint_charts`.
mod html;

use glint_charts::{
    Chart, ChartConfig, ChartKind, ColorScheme, DataSet, Encoding, FieldEncoding, FieldType,
    Interpolation, LegendPosition, Row, StaticPalettes, Value,
};
use glint_raster::Pixmap;
use glint_scene::Scene;
use kurbo::Point;

fn main() {
    let sections = vec![
        bar_demo(),
        stacked_bar_demo(),
        grouped_bar_demo(),
        line_demo(),
        stacked_area_demo(),
        donut_demo(),
        scatter_demo(),
        radar_demo(),
        heatmap_demo(),
        histogram_demo(),
        tooltip_demo(),
    ];

    let html = html::render_report("Glint charts demo", &sections);
    std::fs::write("glint_charts_demo.html", html).expect("write glint_charts_demo.html");
    println!("wrote glint_charts_demo.html");

    write_raster_sample();
}

/// One full scene pass, serialized to SVG.
fn render_svg(config: &ChartConfig, data: &DataSet, width: f64, height: f64) -> String {
    let palettes = StaticPalettes::default();
    let mut scene = Scene::new(width, height);
    Chart::new(config, data, &palettes).render_scene(&mut scene);
    scene.to_svg()
}

/// The same bar chart through the raster backend, written as a PPM.
fn write_raster_sample() {
    let (config, data) = quarterly_sales();
    let palettes = StaticPalettes::default();
    let mut pixmap = Pixmap::new(480, 320);
    pixmap.fill(peniko::Color::WHITE);
    Chart::new(&config, &data, &palettes).render_pixmap(&mut pixmap);
    std::fs::write("glint_charts_demo.ppm", pixmap.to_ppm()).expect("write glint_charts_demo.ppm");
    println!("wrote glint_charts_demo.ppm");
}

fn quarterly_sales() -> (ChartConfig, DataSet) {
    let mut config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("quarter"))
            .with_y(FieldEncoding::quantitative("sales")),
    );
    config.layout.title = Some("Quarterly sales".to_string());
    config.mark.corner_radius = 3.0;
    let data = DataSet::from_rows([
        Row::new().with("quarter", "Q1").with("sales", 120.0),
        Row::new().with("quarter", "Q2").with("sales", 180.0),
        Row::new().with("quarter", "Q3").with("sales", 140.0),
        Row::new().with("quarter", "Q4").with("sales", 210.0),
    ]);
    (config, data)
}

fn bar_demo() -> html::HtmlSection {
    let (config, data) = quarterly_sales();
    html::HtmlSection {
        title: "Bar",
        description: "One nominal x field, one quantitative y field, rounded bar tops.",
        svg: render_svg(&config, &data, 420.0, 280.0),
    }
}

fn stacked_bar_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("quarter"))
            .with_y(FieldEncoding::quantitative("hardware").with_title("Hardware"))
            .with_y(FieldEncoding::quantitative("software").with_title("Software"))
            .with_y(FieldEncoding::quantitative("services").with_title("Services")),
    );
    config.layout.title = Some("Revenue by segment".to_string());
    config.mark.data_labels = true;
    let data = DataSet::from_rows([
        Row::new()
            .with("quarter", "Q1")
            .with("hardware", 40.0)
            .with("software", 55.0)
            .with("services", 25.0),
        Row::new()
            .with("quarter", "Q2")
            .with("hardware", 48.0)
            .with("software", 70.0)
            .with("services", 30.0),
        Row::new()
            .with("quarter", "Q3")
            .with("hardware", 35.0)
            .with("software", 62.0)
            .with("services", 41.0),
    ]);
    html::HtmlSection {
        title: "Stacked bars",
        description: "Multiple y fields stack per category; the stack total is labeled.",
        svg: render_svg(&config, &data, 420.0, 280.0),
    }
}

fn grouped_bar_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Bar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("region"))
            .with_y(FieldEncoding::quantitative("plan").with_title("Plan"))
            .with_y(FieldEncoding::quantitative("actual").with_title("Actual")),
    );
    config.layout.title = Some("Plan vs actual".to_string());
    config.mark.stacked = Some(false);
    let data = DataSet::from_rows([
        Row::new().with("region", "North").with("plan", 80.0).with("actual", 95.0),
        Row::new().with("region", "South").with("plan", 60.0).with("actual", 52.0),
        Row::new().with("region", "West").with("plan", 70.0).with("actual", 88.0),
    ]);
    html::HtmlSection {
        title: "Grouped bars",
        description: "The same multi-series encoding with stacking disabled splits the band.",
        svg: render_svg(&config, &data, 420.0, 280.0),
    }
}

fn line_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Line,
        Encoding::new()
            .with_x(FieldEncoding::new("t", FieldType::Temporal))
            .with_y(FieldEncoding::quantitative("cpu").with_title("CPU"))
            .with_y(FieldEncoding::quantitative("memory").with_title("Memory")),
    );
    config.layout.title = Some("Host utilization".to_string());
    config.mark.interpolation = Interpolation::Monotone;
    config.mark.points = true;
    config.layout.y_axis.grid = true;
    let day = 86_400.0;
    let start = 1_755_000_000.0;
    let cpu = [32.0, 45.0, 41.0, 58.0, 72.0, 66.0, 49.0];
    let memory = [61.0, 63.0, 66.0, 64.0, 70.0, 74.0, 71.0];
    let data = DataSet::from_rows((0..7).map(|i| {
        Row::new()
            .with("t", Value::Timestamp(start + i as f64 * day))
            .with("cpu", cpu[i])
            .with("memory", memory[i])
    }));
    html::HtmlSection {
        title: "Line",
        description: "A temporal x axis, smoothed multi-series lines with point markers.",
        svg: render_svg(&config, &data, 460.0, 260.0),
    }
}

fn stacked_area_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Area,
        Encoding::new()
            .with_x(FieldEncoding::quantitative("week"))
            .with_y(FieldEncoding::quantitative("web").with_title("Web"))
            .with_y(FieldEncoding::quantitative("mobile").with_title("Mobile"))
            .with_y(FieldEncoding::quantitative("api").with_title("API")),
    );
    config.layout.title = Some("Traffic by channel".to_string());
    config.layout.legend_position = LegendPosition::Bottom;
    let web = [10.0, 14.0, 13.0, 18.0, 22.0, 20.0];
    let mobile = [6.0, 7.0, 9.0, 9.0, 12.0, 15.0];
    let api = [3.0, 4.0, 4.0, 6.0, 5.0, 7.0];
    let data = DataSet::from_rows((0..6).map(|i| {
        Row::new()
            .with("week", i as f64)
            .with("web", web[i])
            .with("mobile", mobile[i])
            .with("api", api[i])
    }));
    html::HtmlSection {
        title: "Stacked area",
        description: "Per-series bands stack on a shared baseline; legend below the plot.",
        svg: render_svg(&config, &data, 460.0, 260.0),
    }
}

fn donut_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Pie,
        Encoding::new()
            .with_x(FieldEncoding::nominal("browser"))
            .with_y(FieldEncoding::quantitative("share")),
    );
    config.layout.title = Some("Browser share".to_string());
    config.mark.inner_radius = 0.55;
    config.mark.data_labels = true;
    let data = DataSet::from_rows([
        Row::new().with("browser", "Chrome").with("share", 64.0),
        Row::new().with("browser", "Safari").with("share", 19.0),
        Row::new().with("browser", "Firefox").with("share", 8.0),
        Row::new().with("browser", "Other").with("share", 9.0),
    ]);
    html::HtmlSection {
        title: "Donut",
        description: "Pie slices with an inner radius; percent labels on each slice.",
        svg: render_svg(&config, &data, 360.0, 300.0),
    }
}

fn scatter_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Scatter,
        Encoding::new()
            .with_x(FieldEncoding::quantitative("age"))
            .with_y(FieldEncoding::quantitative("income"))
            .with_color(FieldEncoding::nominal("segment"))
            .with_size(FieldEncoding::quantitative("spend")),
    );
    config.layout.title = Some("Customers".to_string());
    config.layout.x_axis.label = Some("age".to_string());
    config.layout.y_axis.label = Some("income (k)".to_string());
    let rows = [
        (23.0, 31.0, "new", 2.0),
        (29.0, 48.0, "new", 6.0),
        (35.0, 55.0, "returning", 12.0),
        (41.0, 72.0, "returning", 18.0),
        (47.0, 64.0, "returning", 9.0),
        (52.0, 81.0, "loyal", 25.0),
        (58.0, 77.0, "loyal", 21.0),
    ];
    let data = DataSet::from_rows(rows.iter().map(|(age, income, segment, spend)| {
        Row::new()
            .with("age", *age)
            .with("income", *income)
            .with("segment", *segment)
            .with("spend", *spend)
    }));
    html::HtmlSection {
        title: "Scatter",
        description: "Color splits series by category; point radius encodes a fourth field.",
        svg: render_svg(&config, &data, 420.0, 300.0),
    }
}

fn radar_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Radar,
        Encoding::new()
            .with_x(FieldEncoding::nominal("skill"))
            .with_y(FieldEncoding::quantitative("alice").with_title("Alice"))
            .with_y(FieldEncoding::quantitative("bo").with_title("Bo")),
    );
    config.layout.title = Some("Skill profile".to_string());
    let rows = [
        ("speed", 8.0, 6.0),
        ("accuracy", 6.0, 9.0),
        ("stamina", 7.0, 5.0),
        ("strategy", 5.0, 8.0),
        ("teamwork", 9.0, 7.0),
    ];
    let data = DataSet::from_rows(rows.iter().map(|(skill, alice, bo)| {
        Row::new()
            .with("skill", *skill)
            .with("alice", *alice)
            .with("bo", *bo)
    }));
    html::HtmlSection {
        title: "Radar",
        description: "Two overlaid polygons on a polar category grid with level rings.",
        svg: render_svg(&config, &data, 380.0, 320.0),
    }
}

fn heatmap_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Heatmap,
        Encoding::new()
            .with_x(FieldEncoding::nominal("day"))
            .with_y(FieldEncoding::nominal("hour"))
            .with_color(FieldEncoding::quantitative("commits")),
    );
    config.layout.title = Some("Commit activity".to_string());
    config.mark.scheme = ColorScheme::Viridis;
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri"];
    let hours = ["morning", "afternoon", "evening"];
    let counts = [
        [4.0, 9.0, 2.0],
        [6.0, 12.0, 3.0],
        [5.0, 14.0, 6.0],
        [7.0, 11.0, 4.0],
        [3.0, 8.0, 1.0],
    ];
    let mut rows = Vec::new();
    for (d, day) in days.iter().enumerate() {
        for (h, hour) in hours.iter().enumerate() {
            rows.push(
                Row::new()
                    .with("day", *day)
                    .with("hour", *hour)
                    .with("commits", counts[d][h]),
            );
        }
    }
    let data = DataSet::from_rows(rows);
    html::HtmlSection {
        title: "Heatmap",
        description: "A cell matrix over two nominal axes; the color field drives a Viridis ramp.",
        svg: render_svg(&config, &data, 420.0, 260.0),
    }
}

fn histogram_demo() -> html::HtmlSection {
    let mut config = ChartConfig::new(
        ChartKind::Histogram,
        Encoding::new().with_x(FieldEncoding::quantitative("latency").binned()),
    );
    config.layout.title = Some("Request latency (ms)".to_string());
    config.mark.bins = 8;
    let values = [
        12.0, 14.0, 15.0, 16.0, 18.0, 18.0, 19.0, 21.0, 22.0, 22.0, 23.0, 25.0, 27.0, 28.0, 31.0,
        33.0, 36.0, 41.0, 47.0, 63.0,
    ];
    let data = DataSet::from_rows(values.iter().map(|v| Row::new().with("latency", *v)));
    html::HtmlSection {
        title: "Histogram",
        description: "Equal-width bins over a numeric field; x ticks sit on the bin edges.",
        svg: render_svg(&config, &data, 420.0, 260.0),
    }
}

fn tooltip_demo() -> html::HtmlSection {
    let (config, data) = quarterly_sales();
    let palettes = StaticPalettes::default();
    let mut scene = Scene::new(420.0, 280.0);

    // First pass finds a bar, the second hovers it so the tooltip overlay is
    // part of the serialized output.
    let report = Chart::new(&config, &data, &palettes).render_scene(&mut scene);
    let pointer = report
        .hits
        .iter()
        .find_map(|h| match &h.shape {
            glint_charts::HitShape::Rect(r) => Some(r.center()),
            _ => None,
        })
        .unwrap_or(Point::new(210.0, 140.0));
    Chart::new(&config, &data, &palettes)
        .with_hover(pointer)
        .render_scene(&mut scene);

    html::HtmlSection {
        title: "Hover tooltip",
        description: "A pass with a hover pointer draws the tooltip box into the overlay layer.",
        svg: scene.to_svg(),
    }
}
