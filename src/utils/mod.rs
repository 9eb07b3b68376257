mod time_utils;

pub use time_utils::{STANDARD_DAY_FORMAT, format_day, parse_day};
