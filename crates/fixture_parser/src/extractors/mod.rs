//! Field extractors.
//!
//! Each extractor reads one field out of a narrow context by walking an ordered
//! list of strategies and stopping at the first hit. None of them fail: a miss
//! is `None` (or the field's sentinel) and the record is still assembled.

pub mod date;
pub mod division;
pub mod opponent;
pub mod team;
pub mod time;
pub mod venue;

pub use date::{parse_date, resolve_date, DateResolution};
pub use division::{resolve_division, DivisionInputs, DivisionSource, DEFAULT_DIVISION_ORDER};
pub use opponent::find_opponent;
pub use team::{away_team, away_team_in_line, home_team, home_team_in_line, team_name};
pub use time::{find_time, schedule_cell_time};
pub use venue::{find_location, location_from_cell};
