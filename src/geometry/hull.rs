use super::Point;

/// Graham scan. Output is counter-clockwise starting at the lowest point
/// (lowest x on ties). Fewer than three points come back unchanged.
///
/// Only used for the decorative course outline, so collinear runs on the last
/// edge are not specially treated.
#[must_use]
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let Some((pivot_idx, pivot)) = points
        .iter()
        .copied()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then_with(|| a.x.total_cmp(&b.x)))
    else {
        return points.to_vec();
    };

    let mut rest: Vec<Point> = points
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != pivot_idx)
        .map(|(_, p)| *p)
        .collect();

    rest.sort_by(|a, b| {
        polar_angle(pivot, *a)
            .total_cmp(&polar_angle(pivot, *b))
            .then_with(|| {
                pivot
                    .distance_squared(*a)
                    .total_cmp(&pivot.distance_squared(*b))
            })
    });

    let mut hull: Vec<Point> = Vec::with_capacity(points.len());
    hull.push(pivot);
    for candidate in rest {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], candidate) <= 0.0
        {
            hull.pop();
        }
        hull.push(candidate);
    }
    hull
}

fn polar_angle(pivot: Point, p: Point) -> f64 {
    (p.y - pivot.y).atan2(p.x - pivot.x)
}

/// z-component of (a - o) x (b - a); positive means a strict left turn.
fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - a.y) - (a.y - o.y) * (b.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn fewer_than_three_points_pass_through() {
        let two = pts(&[(4.0, 4.0), (1.0, 1.0)]);
        assert_eq!(convex_hull(&two), two);
        assert!(convex_hull(&[]).is_empty());
    }

    #[test]
    fn square_with_interior_point() {
        let input = pts(&[(10.0, 10.0), (0.0, 0.0), (5.0, 5.0), (10.0, 0.0), (0.0, 10.0)]);
        assert_eq!(
            convex_hull(&input),
            pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
        );
    }

    #[test]
    fn collinear_edge_point_is_dropped() {
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (5.0, 8.0)]);
        assert_eq!(
            convex_hull(&input),
            pts(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)])
        );
    }
}
