//! Compact style skeletons (`{n, number, ::percent}`, `{d, date, ::yMMMd}`).
//!
//! Both parsers work standalone; the grammar parser calls them when a style
//! argument starts with `::`.

mod datetime;
mod error;
mod number;

pub use datetime::parse_date_time_skeleton;
pub use error::SkeletonError;
pub use number::{NumberSkeletonToken, parse_number_skeleton, parse_number_skeleton_tokens};
