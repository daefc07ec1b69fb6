// src/art/primitives.rs

//! Resolution-independent draw commands.
//!
//! Generators never touch pixels. They record [`Primitive`]s into a
//! [`Sketch`], which stamps each one with the active symmetry frame and maps
//! its coordinates through that frame's [`Transform`]. The resulting command
//! list is what determinism and symmetry are checked against.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Transform};
use super::palette::Rgba;

/// A colour stop of a radial gradient; `offset` runs from 0 (inner radius)
/// to 1 (outer radius).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// How an area is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Rgba },
    Radial {
        center: Point,
        inner: f64,
        outer: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn solid(color: Rgba) -> Self {
        Paint::Solid { color }
    }

    /// Radial gradient from `center` fading out at `outer`.
    pub fn radial(center: Point, inner: f64, outer: f64, stops: Vec<GradientStop>) -> Self {
        Paint::Radial {
            center,
            inner,
            outer,
            stops,
        }
    }

    /// Colour of the paint at `p`. Outside the gradient ring the nearest end
    /// stop is extended.
    pub fn color_at(&self, p: Point) -> Rgba {
        match self {
            Paint::Solid { color } => *color,
            Paint::Radial {
                center,
                inner,
                outer,
                stops,
            } => {
                let span = (outer - inner).max(f64::EPSILON);
                let t = ((p.distance(*center) - inner) / span).clamp(0.0, 1.0);
                sample_stops(stops, t)
            }
        }
    }

    fn transformed(&self, transform: &Transform) -> Paint {
        match self {
            Paint::Solid { color } => Paint::Solid { color: *color },
            Paint::Radial {
                center,
                inner,
                outer,
                stops,
            } => Paint::Radial {
                center: transform.apply(*center),
                inner: *inner,
                outer: *outer,
                stops: stops.clone(),
            },
        }
    }

    fn approx_eq(&self, other: &Paint, tol: f64) -> bool {
        match (self, other) {
            (Paint::Solid { color: a }, Paint::Solid { color: b }) => a == b,
            (
                Paint::Radial {
                    center: c1,
                    inner: i1,
                    outer: o1,
                    stops: s1,
                },
                Paint::Radial {
                    center: c2,
                    inner: i2,
                    outer: o2,
                    stops: s2,
                },
            ) => c1.approx_eq(*c2, tol) && (i1 - i2).abs() <= tol && (o1 - o2).abs() <= tol && s1 == s2,
            _ => false,
        }
    }
}

fn sample_stops(stops: &[GradientStop], t: f64) -> Rgba {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::from_hex(0).with_alpha(0);
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f64::EPSILON);
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    last.color
}

/// Outline settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Geometric primitive in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled circle, optionally outlined.
    Disc {
        center: Point,
        radius: f64,
        paint: Paint,
        stroke: Option<Stroke>,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<Point>,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    /// Open polyline.
    Path { points: Vec<Point>, stroke: Stroke },
}

impl Primitive {
    /// The primitive mapped through a rigid `transform`.
    pub fn transformed(&self, transform: &Transform) -> Primitive {
        if transform.is_identity() {
            return self.clone();
        }
        let map = |points: &[Point]| points.iter().map(|p| transform.apply(*p)).collect::<Vec<_>>();
        match self {
            Primitive::Disc {
                center,
                radius,
                paint,
                stroke,
            } => Primitive::Disc {
                center: transform.apply(*center),
                radius: *radius,
                paint: paint.transformed(transform),
                stroke: *stroke,
            },
            Primitive::Polygon { points, fill, stroke } => Primitive::Polygon {
                points: map(points),
                fill: fill.as_ref().map(|f| f.transformed(transform)),
                stroke: *stroke,
            },
            Primitive::Path { points, stroke } => Primitive::Path {
                points: map(points),
                stroke: *stroke,
            },
        }
    }

    /// Structural equality with coordinates compared within `tol`.
    pub fn approx_eq(&self, other: &Primitive, tol: f64) -> bool {
        let points_eq = |a: &[Point], b: &[Point]| {
            a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(*q, tol))
        };
        match (self, other) {
            (
                Primitive::Disc {
                    center: c1,
                    radius: r1,
                    paint: p1,
                    stroke: s1,
                },
                Primitive::Disc {
                    center: c2,
                    radius: r2,
                    paint: p2,
                    stroke: s2,
                },
            ) => c1.approx_eq(*c2, tol) && (r1 - r2).abs() <= tol && p1.approx_eq(p2, tol) && s1 == s2,
            (
                Primitive::Polygon {
                    points: a,
                    fill: f1,
                    stroke: s1,
                },
                Primitive::Polygon {
                    points: b,
                    fill: f2,
                    stroke: s2,
                },
            ) => {
                let fills_eq = match (f1, f2) {
                    (Some(x), Some(y)) => x.approx_eq(y, tol),
                    (None, None) => true,
                    _ => false,
                };
                points_eq(a, b) && fills_eq && s1 == s2
            }
            (Primitive::Path { points: a, stroke: s1 }, Primitive::Path { points: b, stroke: s2 }) => {
                points_eq(a, b) && s1 == s2
            }
            _ => false,
        }
    }
}

/// Shapes of the minimal style, chosen by `value mod 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub fn for_value(value: u64) -> Self {
        match value % 3 {
            0 => ShapeKind::Circle,
            1 => ShapeKind::Square,
            _ => ShapeKind::Triangle,
        }
    }
}

/// What a primitive depicts. Lets callers and tests pick commands out of a
/// scene without reverse-engineering geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motif {
    Particle,
    Glow,
    Layer,
    Vertex,
    Wave,
    Echo,
    Halo,
    Shape(ShapeKind),
    Blob,
    Clock,
    Hand,
    Facet,
    Eye,
    Ring,
    Line,
    Drip,
    Splatter,
    Cell,
    FlowStroke,
    Swirl,
    Tile,
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Index of the symmetry frame the command was recorded under.
    pub frame: usize,
    /// Index of the ranked outcome the command was derived from.
    pub outcome: usize,
    pub motif: Motif,
    pub primitive: Primitive,
}

/// Records primitives under the active coordinate frame.
#[derive(Debug, Default)]
pub struct Sketch {
    frame: usize,
    transform: Transform,
    commands: Vec<DrawCommand>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to frame `frame`; subsequent primitives go through `transform`.
    pub fn begin_frame(&mut self, frame: usize, transform: Transform) {
        self.frame = frame;
        self.transform = transform;
    }

    pub fn draw(&mut self, outcome: usize, motif: Motif, primitive: Primitive) {
        self.commands.push(DrawCommand {
            frame: self.frame,
            outcome,
            motif,
            primitive: primitive.transformed(&self.transform),
        });
    }

    /// Solid disc.
    pub fn disc(&mut self, outcome: usize, motif: Motif, center: Point, radius: f64, color: Rgba) {
        self.draw(
            outcome,
            motif,
            Primitive::Disc {
                center,
                radius,
                paint: Paint::solid(color),
                stroke: None,
            },
        );
    }

    /// Disc filled by a gradient that fades from `stops[0]` at the centre to
    /// the last stop at `radius`.
    pub fn glow(&mut self, outcome: usize, motif: Motif, center: Point, radius: f64, stops: Vec<GradientStop>) {
        self.draw(
            outcome,
            motif,
            Primitive::Disc {
                center,
                radius,
                paint: Paint::radial(center, 0.0, radius, stops),
                stroke: None,
            },
        );
    }

    pub fn polygon(&mut self, outcome: usize, motif: Motif, points: Vec<Point>, fill: Option<Paint>, stroke: Option<Stroke>) {
        self.draw(outcome, motif, Primitive::Polygon { points, fill, stroke });
    }

    pub fn path(&mut self, outcome: usize, motif: Motif, points: Vec<Point>, stroke: Stroke) {
        self.draw(outcome, motif, Primitive::Path { points, stroke });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
