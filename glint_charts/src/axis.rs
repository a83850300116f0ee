// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cartesian axes and gridlines.

use alloc::string::String;
use alloc::vec::Vec;

use glint_text::{TextAnchor, TextBaseline, TextStyle, fit_label};
use kurbo::{BezPath, Point};
use peniko::Color;

use crate::config::Channel;
use crate::context::{Label, RenderContext, StrokeOptions};
use crate::format::{format_number, format_time};
use crate::layout::{AXIS_LABEL_BAND, X_AXIS_BAND, Y_AXIS_BAND};
use crate::scale::Scale;
use crate::z_order;

/// Tick mark length in pixels.
pub(crate) const TICK_SIZE: f64 = 4.0;

/// Tick label font size.
pub(crate) const TICK_FONT_SIZE: f64 = 11.0;

/// Axis title font size.
pub(crate) const AXIS_TITLE_FONT_SIZE: f64 = 12.0;

/// Gap between a tick mark and its label.
const TICK_LABEL_GAP: f64 = 3.0;

/// Continuous axes aim for this many ticks.
const TICK_COUNT: usize = 5;

/// Gridlines never exceed this many rules per axis.
const GRID_TICK_CAP: usize = 5;

/// Axis colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisTheme {
    /// Axis rule and tick mark color.
    pub rule: Color,
    /// Gridline color.
    pub grid: Color,
    /// Tick label color.
    pub label: Color,
    /// Axis title color.
    pub title: Color,
}

impl Default for AxisTheme {
    fn default() -> Self {
        Self {
            rule: Color::from_rgb8(0x6b, 0x72, 0x80),
            grid: Color::from_rgb8(0xd1, 0xd5, 0xdb),
            label: Color::from_rgb8(0x4b, 0x55, 0x63),
            title: Color::from_rgb8(0x37, 0x41, 0x51),
        }
    }
}

/// A positioned tick: a pixel coordinate along the axis plus its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position along the axis, in pixels.
    pub pos: f64,
    /// The formatted label.
    pub label: String,
}

/// Ticks for a scale: band centers with category labels, or nice round
/// values formatted by scale type.
pub(crate) fn ticks_for(scale: &Scale) -> Vec<Tick> {
    match scale {
        Scale::Band(s) => s
            .domain()
            .iter()
            .filter_map(|cat| {
                Some(Tick {
                    pos: s.position(cat)? + s.bandwidth() / 2.0,
                    label: cat.clone(),
                })
            })
            .collect(),
        Scale::Linear(s) => s
            .ticks(TICK_COUNT)
            .into_iter()
            .map(|v| Tick {
                pos: s.position(v),
                label: format_number(v),
            })
            .collect(),
        Scale::Time(s) => {
            let granularity = s.granularity();
            s.linear()
                .ticks(TICK_COUNT)
                .into_iter()
                .map(|v| Tick {
                    pos: s.linear().position(v),
                    label: format_time(v, granularity),
                })
                .collect()
        }
    }
}

fn line(from: Point, to: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    path
}

/// Draws the dashed background grid.
///
/// Gridlines follow the axis ticks but are capped at [`GRID_TICK_CAP`] rules
/// so dense categorical axes do not fill the plot with dashes. Drawn before
/// marks.
pub(crate) fn render_grid(ctx: &mut RenderContext<'_>, theme: &AxisTheme) {
    let area = ctx.area;
    if !area.is_valid() || area.width() <= 0.0 || area.height() <= 0.0 {
        return;
    }
    let opts = || StrokeOptions {
        width: 1.0,
        dash: alloc::vec![3.0, 3.0],
        z: z_order::GRID_LINES,
        ..StrokeOptions::default()
    };

    if ctx.config.layout.y_axis.grid {
        if let Some(scale) = ctx.scales.get(Channel::Y) {
            for tick in capped(ticks_for(scale)) {
                let path = line(
                    Point::new(area.left, tick.pos),
                    Point::new(area.right, tick.pos),
                );
                ctx.stroke_path(&path, theme.grid, opts());
            }
        }
    }
    if ctx.config.layout.x_axis.grid {
        if let Some(scale) = ctx.scales.get(Channel::X) {
            for tick in capped(ticks_for(scale)) {
                let path = line(
                    Point::new(tick.pos, area.top),
                    Point::new(tick.pos, area.bottom),
                );
                ctx.stroke_path(&path, theme.grid, opts());
            }
        }
    }
}

fn capped(mut ticks: Vec<Tick>) -> Vec<Tick> {
    if ticks.len() > GRID_TICK_CAP {
        let keep_every = ticks.len().div_ceil(GRID_TICK_CAP);
        ticks = ticks
            .into_iter()
            .enumerate()
            .filter_map(|(i, t)| (i % keep_every == 0).then_some(t))
            .collect();
    }
    ticks
}

/// Draws both axes: rules, tick marks, tick labels and axis titles.
///
/// When a continuous domain reaches below zero, that axis' crossing rule
/// moves to the zero line (the x rule for a sign-spanning y domain, the y
/// rule for a sign-spanning x domain); tick marks and labels stay in their
/// edge bands either way.
///
/// `x_ticks` overrides the x tick list (histograms label bin edges).
pub(crate) fn render_axes(ctx: &mut RenderContext<'_>, theme: &AxisTheme, x_ticks: Option<Vec<Tick>>) {
    let area = ctx.area;
    if !area.is_valid() || area.width() <= 0.0 || area.height() <= 0.0 {
        return;
    }

    if ctx.config.layout.x_axis.show {
        let baseline = zero_line_y(ctx).unwrap_or(area.bottom);
        let rule = line(
            Point::new(area.left, baseline),
            Point::new(area.right, baseline),
        );
        ctx.stroke_path(
            &rule,
            theme.rule,
            StrokeOptions {
                z: z_order::AXIS_RULES,
                ..StrokeOptions::default()
            },
        );

        if ctx.config.layout.x_axis.show_ticks {
            let ticks = x_ticks.unwrap_or_else(|| {
                ctx.scales
                    .get(Channel::X)
                    .map(ticks_for)
                    .unwrap_or_default()
            });
            let max_label = ctx
                .scales
                .get(Channel::X)
                .and_then(Scale::bandwidth)
                .unwrap_or(f64::INFINITY);
            for tick in ticks {
                if tick.pos < area.left - 1e-9 || tick.pos > area.right + 1e-9 {
                    continue;
                }
                let mark = line(
                    Point::new(tick.pos, area.bottom),
                    Point::new(tick.pos, area.bottom + TICK_SIZE),
                );
                ctx.stroke_path(
                    &mark,
                    theme.rule,
                    StrokeOptions {
                        z: z_order::AXIS_RULES,
                        ..StrokeOptions::default()
                    },
                );
                let style = TextStyle::new(TICK_FONT_SIZE);
                let fit = fit_label(ctx.measurer, &tick.label, style, max_label);
                let title = fit.truncated.then_some(tick.label.as_str());
                ctx.draw_text(
                    Label::new(
                        Point::new(tick.pos, area.bottom + TICK_SIZE + TICK_LABEL_GAP),
                        fit.text,
                        TICK_FONT_SIZE,
                        theme.label,
                    )
                    .anchored(TextAnchor::Middle)
                    .baselined(TextBaseline::Hanging),
                    z_order::AXIS_LABELS,
                    title,
                );
            }
        }

        if ctx.config.layout.x_axis.wants_label() {
            if let Some(text) = ctx.config.layout.x_axis.label.clone() {
                ctx.draw_text(
                    Label::new(
                        Point::new(
                            (area.left + area.right) / 2.0,
                            area.bottom + X_AXIS_BAND + AXIS_LABEL_BAND / 2.0,
                        ),
                        text,
                        AXIS_TITLE_FONT_SIZE,
                        theme.title,
                    )
                    .anchored(TextAnchor::Middle)
                    .baselined(TextBaseline::Middle),
                    z_order::AXIS_TITLES,
                    None,
                );
            }
        }
    }

    if ctx.config.layout.y_axis.show {
        let baseline = zero_line_x(ctx).unwrap_or(area.left);
        let rule = line(
            Point::new(baseline, area.top),
            Point::new(baseline, area.bottom),
        );
        ctx.stroke_path(
            &rule,
            theme.rule,
            StrokeOptions {
                z: z_order::AXIS_RULES,
                ..StrokeOptions::default()
            },
        );

        if ctx.config.layout.y_axis.show_ticks {
            let ticks = ctx
                .scales
                .get(Channel::Y)
                .map(ticks_for)
                .unwrap_or_default();
            for tick in ticks {
                if tick.pos < area.top - 1e-9 || tick.pos > area.bottom + 1e-9 {
                    continue;
                }
                let mark = line(
                    Point::new(area.left - TICK_SIZE, tick.pos),
                    Point::new(area.left, tick.pos),
                );
                ctx.stroke_path(
                    &mark,
                    theme.rule,
                    StrokeOptions {
                        z: z_order::AXIS_RULES,
                        ..StrokeOptions::default()
                    },
                );
                ctx.draw_text(
                    Label::new(
                        Point::new(area.left - TICK_SIZE - TICK_LABEL_GAP, tick.pos),
                        tick.label,
                        TICK_FONT_SIZE,
                        theme.label,
                    )
                    .anchored(TextAnchor::End)
                    .baselined(TextBaseline::Middle),
                    z_order::AXIS_LABELS,
                    None,
                );
            }
        }

        if ctx.config.layout.y_axis.wants_label() {
            if let Some(text) = ctx.config.layout.y_axis.label.clone() {
                ctx.draw_text(
                    Label::new(
                        Point::new(
                            area.left - Y_AXIS_BAND - AXIS_LABEL_BAND / 2.0,
                            (area.top + area.bottom) / 2.0,
                        ),
                        text,
                        AXIS_TITLE_FONT_SIZE,
                        theme.title,
                    )
                    .anchored(TextAnchor::Middle)
                    .baselined(TextBaseline::Middle)
                    .rotated(-90.0),
                    z_order::AXIS_TITLES,
                    None,
                );
            }
        }
    }
}

/// The pixel y of the zero line, when the y domain reaches below zero.
///
/// For an entirely non-positive domain this is the far edge of the plot (the
/// domain maximum), so the rule still reads as the baseline rather than
/// crossing the marks.
pub(crate) fn zero_line_y(ctx: &RenderContext<'_>) -> Option<f64> {
    zero_line(ctx, Channel::Y)
}

/// The pixel x the y-axis rule moves to, when the x domain reaches below
/// zero. Same far-edge rule as [`zero_line_y`].
pub(crate) fn zero_line_x(ctx: &RenderContext<'_>) -> Option<f64> {
    zero_line(ctx, Channel::X)
}

fn zero_line(ctx: &RenderContext<'_>, channel: Channel) -> Option<f64> {
    let scale = ctx.scales.get(channel)?;
    let (d0, d1) = scale.numeric_domain()?;
    if d0 >= 0.0 {
        return None;
    }
    let anchor = if d1 >= 0.0 { 0.0 } else { d1 };
    scale.position(&crate::data::Value::Number(anchor))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use glint_scene::{NodeKind, Scene};
    use glint_text::HeuristicTextMeasurer;

    use super::*;
    use crate::config::{ChartConfig, ChartKind, Encoding, FieldEncoding};
    use crate::context::Backend;
    use crate::data::DataSet;
    use crate::layout::GraphArea;
    use crate::palette::{ColorResolver, StaticPalettes};
    use crate::scale::{ScaleBand, ScaleLinear, ScaleSet, ScaleTime};

    fn scales_xy() -> ScaleSet {
        let mut set = ScaleSet::new();
        set.insert(
            Channel::X,
            Scale::Band(ScaleBand::new(
                std::vec!["a".to_string(), "b".to_string()],
                (40.0, 360.0),
            )),
        );
        set.insert(
            Channel::Y,
            Scale::Linear(ScaleLinear::new((-5.0, 10.0), (260.0, 20.0))),
        );
        set
    }

    fn render_into(config: &ChartConfig, scales: &ScaleSet) -> Scene {
        let data = DataSet::new();
        let palettes = StaticPalettes::default();
        let measurer = HeuristicTextMeasurer;
        let mut scene = Scene::new(400.0, 300.0);
        let mut ctx = RenderContext::new(
            Backend::Scene(&mut scene),
            &data,
            scales,
            config,
            GraphArea::new(40.0, 20.0, 360.0, 260.0),
            ColorResolver::new(&palettes, config),
            &measurer,
        );
        render_grid(&mut ctx, &AxisTheme::default());
        render_axes(&mut ctx, &AxisTheme::default(), None);
        scene
    }

    fn config() -> ChartConfig {
        ChartConfig::new(
            ChartKind::Bar,
            Encoding::new()
                .with_x(FieldEncoding::nominal("cat"))
                .with_y(FieldEncoding::quantitative("v")),
        )
    }

    #[test]
    fn zero_spanning_domain_moves_the_x_rule() {
        let scales = scales_xy();
        let scene = render_into(&config(), &scales);
        // position(0) on (-5, 10) -> (260, 20) is 260 - 5/15*240 = 180.
        let found = scene.content().iter().any(|n| match &n.kind {
            NodeKind::Path(p) => p.path.elements().iter().any(|el| match el {
                kurbo::PathEl::MoveTo(p0) => {
                    (p0.y - 180.0).abs() < 1e-9 && (p0.x - 40.0).abs() < 1e-9
                }
                _ => false,
            }),
            _ => false,
        });
        assert!(found, "x axis rule sits on the zero line");
    }

    fn rule_through(scene: &Scene, probe: impl Fn(kurbo::Point) -> bool) -> bool {
        scene.content().iter().any(|n| match &n.kind {
            NodeKind::Path(p) => p.path.elements().iter().any(|el| match el {
                kurbo::PathEl::MoveTo(p0) => probe(*p0),
                _ => false,
            }),
            _ => false,
        })
    }

    #[test]
    fn all_negative_domain_puts_the_x_rule_on_the_far_edge() {
        let mut scales = scales_xy();
        scales.insert(
            Channel::Y,
            Scale::Linear(ScaleLinear::new((-10.0, -2.0), (260.0, 20.0))),
        );
        let scene = render_into(&config(), &scales);
        let found = rule_through(&scene, |p0| {
            (p0.y - 20.0).abs() < 1e-9 && (p0.x - 40.0).abs() < 1e-9
        });
        assert!(found, "x axis rule sits at the top of the plot");
        let at_bottom = rule_through(&scene, |p0| {
            (p0.y - 260.0).abs() < 1e-9 && (p0.x - 40.0).abs() < 1e-9
        });
        assert!(!at_bottom, "no rule left at the domain minimum");
    }

    #[test]
    fn zero_spanning_x_domain_moves_the_y_rule() {
        let mut scales = scales_xy();
        scales.insert(
            Channel::X,
            Scale::Linear(ScaleLinear::new((-5.0, 15.0), (40.0, 360.0))),
        );
        scales.insert(
            Channel::Y,
            Scale::Linear(ScaleLinear::new((0.0, 10.0), (260.0, 20.0))),
        );
        let scene = render_into(&config(), &scales);
        // position(0) on (-5, 15) -> (40, 360) is 40 + 5/20*320 = 120.
        let found = rule_through(&scene, |p0| {
            (p0.x - 120.0).abs() < 1e-9 && (p0.y - 20.0).abs() < 1e-9
        });
        assert!(found, "y axis rule sits on the zero line");
    }

    #[test]
    fn band_ticks_label_each_category() {
        let scales = scales_xy();
        let scene = render_into(&config(), &scales);
        let labels: std::vec::Vec<_> = scene
            .content()
            .iter()
            .filter_map(|n| match &n.kind {
                NodeKind::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert!(labels.iter().any(|l| l == "a"));
        assert!(labels.iter().any(|l| l == "b"));
        assert!(labels.iter().any(|l| l == "0"), "y ticks include zero");
    }

    #[test]
    fn grid_is_dashed_and_capped() {
        let mut cfg = config();
        cfg.layout.y_axis.grid = true;
        let mut scales = scales_xy();
        // A fine-grained domain that would produce many ticks.
        scales.insert(
            Channel::Y,
            Scale::Linear(ScaleLinear::new((0.0, 100.0), (260.0, 20.0))),
        );
        let scene = render_into(&cfg, &scales);
        let dashed = scene
            .content()
            .iter()
            .filter(|n| match &n.kind {
                NodeKind::Path(p) => p.stroke.as_ref().is_some_and(|s| !s.dash.is_empty()),
                _ => false,
            })
            .count();
        assert!(dashed >= 2);
        assert!(dashed <= 5, "grid capped at five rules, got {dashed}");
    }

    #[test]
    fn time_ticks_use_granular_labels() {
        // Two years of seconds: year granularity.
        let scale = Scale::Time(ScaleTime::new((0.0, 2.0 * 365.25 * 86_400.0), (0.0, 100.0)));
        let ticks = ticks_for(&scale);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().any(|t| t.label.contains("19")));
    }

    #[test]
    fn hidden_axes_draw_nothing() {
        let mut cfg = config();
        cfg.layout.x_axis.show = false;
        cfg.layout.y_axis.show = false;
        let scales = scales_xy();
        let scene = render_into(&cfg, &scales);
        assert!(scene.content().is_empty());
    }
}
