//! Geometry value types produced by the builders.
//!
//! Constructors check the structural invariants of each shape (path length,
//! ring closure, member counts) and nothing else; there is no topology here.
//!
//! Invariants
//! - `LineString`: at least 2 positions.
//! - `LinearRing`: at least 4 positions and `first == last` exactly.
//! - `Multi<T>`: at least 2 members.
//! - `Circle`: finite, strictly positive radius.
//!
//! `Positions` walks every stored position of a shape; builders use it to
//! reject caller-supplied NaN or infinite ordinates before emitting anything.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// A position with optional elevation `z` and measure `m`.
///
/// Each optional ordinate is present only when its generation is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
}

impl Coord {
    #[inline]
    pub const fn xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }
    #[inline]
    pub const fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }
    #[inline]
    pub const fn xym(x: f64, y: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: Some(m),
        }
    }
    #[inline]
    pub const fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }
    #[inline]
    pub fn to_vector2(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Present ordinates in x, y, z, m order.
    pub fn ordinates(&self) -> impl Iterator<Item = f64> {
        [Some(self.x), Some(self.y), self.z, self.m]
            .into_iter()
            .flatten()
    }
}

impl From<Vector2<f64>> for Coord {
    fn from(v: Vector2<f64>) -> Self {
        Self::xy(v.x, v.y)
    }
}

impl From<Vector3<f64>> for Coord {
    fn from(v: Vector3<f64>) -> Self {
        Self::xyz(v.x, v.y, v.z)
    }
}

/// Visits every stored position of a shape in storage order.
pub trait Positions {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord));

    /// First NaN or infinite ordinate, reported as `NonFinite` under `field`.
    fn check_finite(&self, field: &'static str) -> Result<(), GenError> {
        let mut bad = None;
        self.for_each_coord(&mut |c: &Coord| {
            if bad.is_none() {
                bad = c.ordinates().find(|v| !v.is_finite());
            }
        });
        match bad {
            Some(value) => Err(GenError::NonFinite { field, value }),
            None => Ok(()),
        }
    }
}

impl Positions for Coord {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        f(self)
    }
}

impl<T: Positions> Positions for [T] {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        for item in self {
            item.for_each_coord(f);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point(pub Coord);

impl Point {
    #[inline]
    pub fn coord(&self) -> Coord {
        self.0
    }
}

/// Open path; insertion order defines the shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineString {
    coords: Vec<Coord>,
}

impl LineString {
    pub const MIN_POSITIONS: usize = 2;

    pub fn new(coords: Vec<Coord>) -> Result<Self, GenError> {
        if coords.len() < Self::MIN_POSITIONS {
            return Err(GenError::malformed(
                "line string",
                format!("need at least 2 positions, got {}", coords.len()),
            ));
        }
        Ok(Self { coords })
    }
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Closed path: first and last positions coincide.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinearRing {
    coords: Vec<Coord>,
}

impl LinearRing {
    pub const MIN_POSITIONS: usize = 4;

    /// Strict constructor: the sequence must already be closed.
    pub fn new(coords: Vec<Coord>) -> Result<Self, GenError> {
        if coords.len() < Self::MIN_POSITIONS {
            return Err(GenError::malformed(
                "linear ring",
                format!("need at least 4 positions, got {}", coords.len()),
            ));
        }
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        if first != last {
            return Err(GenError::malformed("linear ring", "first position != last"));
        }
        Ok(Self { coords })
    }

    /// Appends a copy of the first position when the sequence is open.
    pub fn closing(mut coords: Vec<Coord>) -> Result<Self, GenError> {
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last()) {
            if first != *last {
                coords.push(first);
            }
        }
        Self::new(coords)
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }
    pub fn len(&self) -> usize {
        self.coords.len()
    }
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    exterior: LinearRing,
    holes: Vec<LinearRing>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { exterior, holes }
    }
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }
    pub fn holes(&self) -> &[LinearRing] {
        &self.holes
    }
}

/// Homogeneous multi-geometry with at least two members.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Multi<T> {
    members: Vec<T>,
}

impl<T> Multi<T> {
    pub const MIN_MEMBERS: usize = 2;

    pub fn new(members: Vec<T>) -> Result<Self, GenError> {
        if members.len() < Self::MIN_MEMBERS {
            return Err(GenError::malformed(
                "multi-geometry",
                format!("need at least 2 members, got {}", members.len()),
            ));
        }
        Ok(Self { members })
    }
    pub fn members(&self) -> &[T] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub type MultiPoint = Multi<Point>;
pub type MultiLineString = Multi<LineString>;
pub type MultiPolygon = Multi<Polygon>;

/// Any member of a heterogeneous collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

/// Heterogeneous collection; same member-count rule as [`Multi`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeometryCollection {
    members: Vec<Geometry>,
}

impl GeometryCollection {
    pub const MIN_MEMBERS: usize = 2;

    pub fn new(members: Vec<Geometry>) -> Result<Self, GenError> {
        if members.len() < Self::MIN_MEMBERS {
            return Err(GenError::malformed(
                "geometry collection",
                format!("need at least 2 members, got {}", members.len()),
            ));
        }
        Ok(Self { members })
    }
    pub fn members(&self) -> &[Geometry] {
        &self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Two positions in draw order; not a box, so no corner normalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LineSegment {
    pub start: Coord,
    pub end: Coord,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Triangle {
    pub vertices: [Coord; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    center: Coord,
    radius: f64,
}

impl Circle {
    pub fn new(center: Coord, radius: f64) -> Result<Self, GenError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GenError::NonPositiveRadius {
                field: "radius",
                value: radius,
            });
        }
        Ok(Self { center, radius })
    }
    pub fn center(&self) -> Coord {
        self.center
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Positions for Point {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        f(&self.0)
    }
}

impl Positions for LineString {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        self.coords.for_each_coord(f)
    }
}

impl Positions for LinearRing {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        self.coords.for_each_coord(f)
    }
}

impl Positions for Polygon {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        self.exterior.for_each_coord(f);
        self.holes.for_each_coord(f);
    }
}

impl<T: Positions> Positions for Multi<T> {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        self.members.for_each_coord(f)
    }
}

impl Positions for Geometry {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        match self {
            Geometry::Point(g) => g.for_each_coord(f),
            Geometry::LineString(g) => g.for_each_coord(f),
            Geometry::Polygon(g) => g.for_each_coord(f),
            Geometry::MultiPoint(g) => g.for_each_coord(f),
            Geometry::MultiLineString(g) => g.for_each_coord(f),
            Geometry::MultiPolygon(g) => g.for_each_coord(f),
        }
    }
}

impl Positions for GeometryCollection {
    fn for_each_coord(&self, f: &mut dyn FnMut(&Coord)) {
        self.members.for_each_coord(f)
    }
}
