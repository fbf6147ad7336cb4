//! Dose-effect aggregation: turns discrete dose events into a uniformly
//! sampled combined-effect series, plus the owned day store that feeds it.

pub mod aggregation;
pub mod analysis;
pub mod error;
pub mod input;
pub mod logger;
pub mod store;

pub use aggregation::{
    builder::AggregatorBuilder,
    compute_effect_series,
    engine::EffectAggregator,
    series::{EffectSample, EffectSeries},
};
pub use error::EffectError;
