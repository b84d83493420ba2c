use crate::geometry::{Point, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);

    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: Rgb,
    pub opacity: f64,
}

impl Fill {
    #[must_use]
    pub const fn solid(color: Rgb) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
    pub opacity: f64,
    /// Dash and gap length in pixels.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    #[must_use]
    pub const fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgb,
    pub size: f64,
    pub anchor: TextAnchor,
    pub bold: bool,
    /// Outline drawn behind the glyphs.
    pub halo: Option<Stroke>,
}

/// Immediate-mode drawing surface in screen space.
pub trait Canvas {
    /// Starts a new frame of the given size.
    fn clear(&mut self, viewport: Viewport, background: Rgb);
    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, fill: Fill);
    fn fill_polygon(&mut self, points: &[Point], fill: Fill, stroke: Option<Stroke>);
    fn stroke_polygon(&mut self, points: &[Point], stroke: Stroke);
    fn circle(&mut self, center: Point, radius: f64, fill: Fill, stroke: Option<Stroke>);
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);
    fn text(&mut self, at: Point, content: &str, style: &TextStyle);
}
