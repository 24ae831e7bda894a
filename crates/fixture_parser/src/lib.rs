//! Weekend home fixtures of one team, read out of a scheduling site's HTML.
//!
//! [`FixtureExtractor`] runs the whole pipeline over a raw document and a pair
//! of [`TargetDates`]. It performs no I/O and never reads the clock.

pub mod dedupe;
pub mod error;
pub mod extractors;
pub mod home_filter;
pub mod locator;
pub mod markup;
pub mod pipeline;
pub mod schema;
pub mod segmenter;

pub use dedupe::DedupeKey;
pub use error::ExtractError;
pub use extractors::DivisionSource;
pub use pipeline::{ExtractorConfig, FixtureExtractor, Stage};
pub use schema::{GameRecord, TargetDates, LEAGUE, TBD};
pub use segmenter::SegmentStrategy;
