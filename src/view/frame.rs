use std::time::Instant;

use super::canvas::{Canvas, Fill, Stroke, TextAnchor, TextStyle};
use super::style::RenderStyle;
use crate::geometry::{CourseTransform, Point, TransformConfig, Viewport, convex_hull};
use crate::interpolation::InterpolationTracker;
use crate::model::{CourseData, Hole, Wind};
use crate::store::StateStore;

const PLAYER_RADIUS: f64 = 12.0;
const BALL_RADIUS: f64 = 6.0;
const GREENKEEPER_RADIUS: f64 = 14.0;
const FLAG_POLE_HEIGHT: f64 = 40.0;
const FLAG_WIDTH: f64 = 24.0;
const FLAG_HEIGHT: f64 = 14.0;
const LABEL_SIZE: f64 = 26.0;
const WIND_MARGIN: f64 = 70.0;
const WIND_ARROW_LENGTH: f64 = 40.0;
const WIND_HEAD_LENGTH: f64 = 10.0;

/// What a frame ended up showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Disconnected: only the modal overlay was drawn.
    ErrorOverlay,
    /// No course yet: background only.
    Idle,
    Course,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    pub viewport: Viewport,
    pub transform: TransformConfig,
    pub style: RenderStyle,
}

impl Renderer {
    #[must_use]
    pub fn new(viewport: Viewport, transform: TransformConfig, style: RenderStyle) -> Self {
        Self {
            viewport,
            transform,
            style,
        }
    }

    /// Draws one complete frame for time `now`.
    pub fn draw_frame<C: Canvas>(
        &self,
        canvas: &mut C,
        store: &StateStore,
        tracker: &InterpolationTracker,
        now: Instant,
    ) -> FrameOutcome {
        canvas.clear(self.viewport, self.style.background);

        if let Some(message) = store.connection_error() {
            self.draw_error_overlay(canvas, message);
            return FrameOutcome::ErrorOverlay;
        }

        let Some(course) = store.course() else {
            return FrameOutcome::Idle;
        };
        let Some(bounds) = course.bounds() else {
            return FrameOutcome::Idle;
        };
        let transform = CourseTransform::new(&bounds, self.viewport, &self.transform);

        self.draw_course(canvas, course, &transform);

        let tick_interval = store.tick_interval();
        let game = store.game();
        let player_radius = PLAYER_RADIUS * self.style.player_size_scale;
        let ball_radius = BALL_RADIUS * self.style.ball_size_scale;
        let outline = Some(Stroke::solid(self.style.outline, 1.5));
        for player in &game.players {
            let Some(blended) = tracker.player(player.id, now, tick_interval) else {
                continue;
            };
            canvas.circle(
                transform.apply(blended.position),
                player_radius,
                Fill::solid(self.style.player_color(player.id)),
                outline,
            );
            canvas.circle(
                transform.apply(blended.ball_position),
                ball_radius,
                Fill::solid(self.style.ball),
                outline,
            );
        }

        if game.greenkeeper().is_some() {
            if let Some(position) = tracker.greenkeeper(now, tick_interval) {
                canvas.circle(
                    transform.apply(position),
                    GREENKEEPER_RADIUS * self.style.greenkeeper_size_scale,
                    Fill::solid(self.style.greenkeeper),
                    outline,
                );
            }
        }

        self.draw_wind(canvas, game.weather.wind);
        FrameOutcome::Course
    }

    fn draw_error_overlay<C: Canvas>(&self, canvas: &mut C, message: &str) {
        canvas.fill_rect(
            Point::new(0.0, 0.0),
            self.viewport.width,
            self.viewport.height,
            self.style.overlay,
        );
        canvas.text(
            self.viewport.center(),
            message,
            &TextStyle {
                color: self.style.overlay_text,
                size: 24.0,
                anchor: TextAnchor::Middle,
                bold: true,
                halo: None,
            },
        );
    }

    fn draw_course<C: Canvas>(&self, canvas: &mut C, course: &CourseData, t: &CourseTransform) {
        let style = &self.style;
        let water = course
            .water
            .iter()
            .chain(course.holes.iter().flat_map(|h| h.water.iter()));
        for polygon in water {
            fill_shape(canvas, t, polygon, style.water);
        }
        for polygon in &course.bridges {
            fill_shape(canvas, t, polygon, style.bridge);
        }

        for (idx, hole) in course.holes.iter().enumerate() {
            self.draw_hole(canvas, hole, idx + 1, t);
        }
    }

    fn draw_hole<C: Canvas>(&self, canvas: &mut C, hole: &Hole, number: usize, t: &CourseTransform) {
        let style = &self.style;

        let outline: Vec<Point> = hole.points().copied().collect();
        let hull = convex_hull(&outline);
        if hull.len() >= 3 {
            canvas.stroke_polygon(
                &t.apply_all(&hull),
                Stroke {
                    color: style.boundary,
                    width: 2.0,
                    opacity: style.boundary_opacity,
                    dash: Some((8.0, 6.0)),
                },
            );
        }

        fill_shape(canvas, t, &hole.fairway, style.fairway);
        for bunker in &hole.bunkers {
            fill_shape(canvas, t, bunker, style.bunker);
        }
        fill_shape(canvas, t, &hole.green, style.green);
        for tee in &hole.tees {
            fill_shape(canvas, t, tee, style.tee);
        }

        self.draw_flag(canvas, t.apply(hole.flag), number);
    }

    fn draw_flag<C: Canvas>(&self, canvas: &mut C, base: Point, number: usize) {
        let scale = self.style.flag_size_scale;
        let top = Point::new(base.x, base.y - FLAG_POLE_HEIGHT * scale);
        canvas.line(base, top, Stroke::solid(self.style.flag_pole, 2.0));
        canvas.fill_polygon(
            &[
                top,
                Point::new(top.x + FLAG_WIDTH * scale, top.y + FLAG_HEIGHT * scale / 2.0),
                Point::new(top.x, top.y + FLAG_HEIGHT * scale),
            ],
            Fill::solid(self.style.flag),
            None,
        );
        canvas.text(
            Point::new(top.x, top.y - LABEL_SIZE * scale),
            &number.to_string(),
            &TextStyle {
                color: self.style.label,
                size: LABEL_SIZE * scale,
                anchor: TextAnchor::Middle,
                bold: true,
                halo: Some(Stroke::solid(self.style.outline, 3.0)),
            },
        );
    }

    /// Fixed indicator in the top-right corner. The arrow points where the
    /// wind blows to, i.e. 180 degrees from where it comes from.
    fn draw_wind<C: Canvas>(&self, canvas: &mut C, wind: Wind) {
        let center = Point::new(self.viewport.width - WIND_MARGIN, WIND_MARGIN);
        let heading = (wind.direction + 180.0).to_radians();
        // Compass bearing: 0 is up, clockwise, in y-down screen space.
        let (ux, uy) = (heading.sin(), -heading.cos());
        let half = WIND_ARROW_LENGTH / 2.0;
        let tail = Point::new(center.x - ux * half, center.y - uy * half);
        let head = Point::new(center.x + ux * half, center.y + uy * half);
        let stroke = Stroke::solid(self.style.wind, 3.0);

        canvas.circle(
            center,
            WIND_ARROW_LENGTH * 0.75,
            Fill {
                color: self.style.outline,
                opacity: 0.25,
            },
            None,
        );
        canvas.line(tail, head, stroke);
        for barb in [150.0_f64, -150.0] {
            let (sin, cos) = barb.to_radians().sin_cos();
            let bx = ux * cos - uy * sin;
            let by = ux * sin + uy * cos;
            canvas.line(
                head,
                Point::new(head.x + bx * WIND_HEAD_LENGTH, head.y + by * WIND_HEAD_LENGTH),
                stroke,
            );
        }

        let text = TextStyle {
            color: self.style.wind,
            size: 14.0,
            anchor: TextAnchor::Middle,
            bold: false,
            halo: Some(Stroke::solid(self.style.outline, 2.0)),
        };
        canvas.text(
            Point::new(center.x, center.y + WIND_ARROW_LENGTH),
            &format!("{:.1} m/s", wind.speed),
            &text,
        );
        canvas.text(
            Point::new(center.x, center.y + WIND_ARROW_LENGTH + 18.0),
            &format!("{:.0}°", wind.direction),
            &text,
        );
    }
}

/// Fills a course-space polygon; anything under three vertices is skipped.
fn fill_shape<C: Canvas>(canvas: &mut C, t: &CourseTransform, polygon: &[Point], fill: Fill) {
    if polygon.len() < 3 {
        return;
    }
    canvas.fill_polygon(&t.apply_all(polygon), fill, None);
}
