pub mod day_record;
pub mod locale;
pub mod trade;

pub use day_record::*;
pub use locale::*;
pub use trade::*;
