//! Grade-recovery analysis of mineral resources.
//!
//! A [`Resource`] sorts its weight/grade fractions by descending grade, builds
//! cumulative mass, grade and recovery columns and derives the constitutional
//! heterogeneity. A [`Grouping`] collects resources and renders their
//! grade-recovery curves as one stacked [`Figure`].

pub mod config;
pub mod curve;
pub mod error;
pub mod figure;
pub mod fraction;
pub mod grouping;
pub mod heterogeneity;
pub mod resource;
pub mod surface;

pub use config::PlotConfig;
pub use curve::InflectionPoint;
pub use error::{HeterogeneityError, Result};
pub use figure::Figure;
pub use fraction::{columns, Fraction};
pub use grouping::Grouping;
pub use resource::{Resource, ResourceSummary};
pub use surface::{Panel, Surface};
