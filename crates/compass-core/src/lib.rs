//! Compass Core Geometry
//!
//! This crate provides the shape model and the pure geometry algorithms behind
//! the Compass construction language. It includes:
//!
//! - **Geometry**: Coordinate value types ([`geometry`] module)
//! - **Shapes**: Resolved 2D shapes and capability traits ([`shape`] module)
//! - **Space**: 3D points, lines, planes and their distances ([`space`] module)
//! - **Intersection**: Line, segment, circle and polygon intersections ([`intersection`] module)
//! - **Lines and vectors**: Projection, reflection and vector arithmetic ([`line`], [`vector`])
//! - **Circles and triangles**: Constructions and centers ([`circle`], [`triangle`])
//! - **Transforms**: Rotate, scale, translate and reflect ([`transform`] module)
//! - **Roots**: Numeric plot-vs-plot intersection ([`roots`] module)
//! - **Identifiers** and **colors** used by the evaluation engine ([`identifier::Id`], [`color::Color`])

pub mod circle;
pub mod color;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod intersection;
pub mod line;
pub mod roots;
pub mod shape;
pub mod space;
pub mod transform;
pub mod triangle;
pub mod vector;
