use maud::{Markup, PreEscaped, html};

use super::canvas::{Canvas, Fill, Rgb, Stroke, TextAnchor, TextStyle};
use crate::geometry::{Point, Viewport};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// [`Canvas`] that records one frame as an SVG document.
///
/// Elements are written in their non-void form so the output is well-formed
/// XML as well as valid inline HTML.
#[derive(Debug, Default)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    elements: Vec<Markup>,
}

impl SvgCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn to_markup(&self) -> Markup {
        html! {
            svg xmlns=(SVG_NS) width=(fmt(self.width)) height=(fmt(self.height))
                viewBox=(format!("0 0 {} {}", fmt(self.width), fmt(self.height))) {
                @for element in &self.elements {
                    (element)
                }
            }
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.to_markup().into_string()
    }
}

fn fmt(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == rounded.trunc() {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt(p.x), fmt(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

struct StrokeAttrs {
    color: String,
    width: String,
    opacity: String,
    dash: String,
}

fn stroke_attrs(stroke: Option<Stroke>) -> StrokeAttrs {
    match stroke {
        Some(s) => StrokeAttrs {
            color: s.color.hex(),
            width: fmt(s.width),
            opacity: fmt(s.opacity),
            dash: s
                .dash
                .map_or_else(|| "none".to_string(), |(on, off)| format!("{} {}", fmt(on), fmt(off))),
        },
        None => StrokeAttrs {
            color: "none".to_string(),
            width: "0".to_string(),
            opacity: "1".to_string(),
            dash: "none".to_string(),
        },
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self, viewport: Viewport, background: Rgb) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.elements.clear();
        self.fill_rect(
            Point::new(0.0, 0.0),
            viewport.width,
            viewport.height,
            Fill::solid(background),
        );
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, fill: Fill) {
        self.elements.push(html! {
            rect x=(fmt(origin.x)) y=(fmt(origin.y)) width=(fmt(width)) height=(fmt(height))
                fill=(fill.color.hex()) fill-opacity=(fmt(fill.opacity)) {}
        });
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Fill, stroke: Option<Stroke>) {
        let s = stroke_attrs(stroke);
        self.elements.push(html! {
            polygon points=(points_attr(points))
                fill=(fill.color.hex()) fill-opacity=(fmt(fill.opacity))
                stroke=(s.color) stroke-width=(s.width) stroke-opacity=(s.opacity)
                stroke-dasharray=(s.dash) {}
        });
    }

    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke) {
        let s = stroke_attrs(Some(stroke));
        self.elements.push(html! {
            polygon points=(points_attr(points)) fill="none"
                stroke=(s.color) stroke-width=(s.width) stroke-opacity=(s.opacity)
                stroke-dasharray=(s.dash) {}
        });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Fill, stroke: Option<Stroke>) {
        let s = stroke_attrs(stroke);
        self.elements.push(html! {
            circle cx=(fmt(center.x)) cy=(fmt(center.y)) r=(fmt(radius))
                fill=(fill.color.hex()) fill-opacity=(fmt(fill.opacity))
                stroke=(s.color) stroke-width=(s.width) stroke-opacity=(s.opacity) {}
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let s = stroke_attrs(Some(stroke));
        self.elements.push(html! {
            line x1=(fmt(from.x)) y1=(fmt(from.y)) x2=(fmt(to.x)) y2=(fmt(to.y))
                stroke=(s.color) stroke-width=(s.width) stroke-opacity=(s.opacity)
                stroke-dasharray=(s.dash) stroke-linecap="round" {}
        });
    }

    fn text(&mut self, at: Point, content: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if style.bold { "bold" } else { "normal" };
        let halo = stroke_attrs(style.halo);
        self.elements.push(html! {
            text x=(fmt(at.x)) y=(fmt(at.y)) font-family="sans-serif" font-size=(fmt(style.size))
                font-weight=(weight) text-anchor=(anchor) dominant-baseline="middle"
                fill=(style.color.hex()) stroke=(halo.color) stroke-width=(halo.width)
                paint-order="stroke" {
                (content)
            }
        });
    }
}

impl maud::Render for SvgCanvas {
    fn render(&self) -> Markup {
        self.to_markup()
    }
}

/// Full standalone document with XML prolog, for writing to disk.
#[must_use]
pub fn svg_document(canvas: &SvgCanvas) -> String {
    let body = canvas.to_markup();
    html! {
        (PreEscaped("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"))
        (body)
    }
    .into_string()
}
