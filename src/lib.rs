//! *Datum shifts and grid projection for Sabah and Sarawak*.
//!
//! Transformations between the global WGS84 frame, the Malaysian GDM2000
//! datum, and the classical Timbalai 1948 datum, together with the Hotine
//! Oblique Mercator (Rectified Skew Orthomorphic, RSO) grid used across
//! Borneo.
//!
//! The crate can be used at two levels:
//!
//! * The typed API in [`transform`]: plain functions over coordinates that
//!   carry their [`Datum`](datum::Datum) in their type, so that projecting
//!   un-shifted WGS84 coordinates with a Timbalai 1948 grid does not compile.
//! * The operator API: textual definitions such as
//!   `"geo | borneo:wgs84_rso"`, instantiated through a [`Context`] and applied
//!   to any [`CoordinateSet`], in the forward or inverse direction.
//!
//! Both levels share one computational kernel.

mod context;
mod coordinate;
pub mod datum;
mod ellipsoid;
mod inner_op;
mod math;
mod op;
pub mod projection;
mod token;
pub mod transform;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::context::Context;
    pub use crate::context::Minimal;
    pub use crate::coordinate::typed::Cartesian;
    pub use crate::coordinate::typed::Geodetic;
    pub use crate::coordinate::typed::Planar;
    pub use crate::coordinate::AngularUnits;
    pub use crate::coordinate::Coor4D;
    pub use crate::coordinate::CoordinateSet;
    pub use crate::datum::Datum;
    pub use crate::datum::Gdm2000;
    pub use crate::datum::HelmertParameters;
    pub use crate::datum::MolodenskyParameters;
    pub use crate::datum::Timbalai1948;
    pub use crate::datum::Wgs84;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::op::OpHandle;
    pub use crate::projection::HotineVariant;
    pub use crate::projection::ProjectionParameters;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
}

/// Prelude for authors of user defined operators and contexts
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::inner_op::InnerOp;
    pub use crate::inner_op::OpConstructor;
    pub use crate::op::Op;
    pub use crate::op::OpDescriptor;
    pub use crate::op::OpParameter;
    pub use crate::op::ParsedParameters;
    pub use crate::op::RawParameters;
    pub use crate::token::Tokenize;

    pub use crate::math::angular;
    pub use log::debug;
    pub use log::error;
    pub use log::info;
    pub use log::trace;
    pub use log::warn;
    pub use std::collections::BTreeMap;
}

// The crate-internal kitchen sink
pub(crate) mod internal {
    pub use crate::authoring::*;
    pub use crate::context::builtin_resources;
    pub use std::collections::BTreeSet;
}

pub use crate::math::angular::decimal_to_dms;
pub use crate::math::angular::dms_to_dd;
pub use crate::prelude::*;

/// The *Rust Geodesy* style error messaging enumeration. Extended with the
/// three error categories of the coordinate kernel: domain errors on input,
/// numerical degeneracies on output, and (by way of the type system)
/// parameter inconsistencies, which therefore have no runtime variant.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("{0}: {1}")]
    Operator(&'static str, &'static str),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("recursion too deep for {0}, at {1}")]
    Recursion(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("operator {0} is not invertible")]
    NonInvertible(String),

    #[error("{0} = {1} is outside the valid range {2}")]
    Domain(&'static str, f64, &'static str),

    #[error("numerically degenerate {0}")]
    Degenerate(&'static str),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}
