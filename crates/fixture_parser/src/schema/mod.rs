pub mod game_record;
pub mod target_dates;

pub use game_record::*;
pub use target_dates::*;
