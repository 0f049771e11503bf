pub mod builder;
pub mod window;

pub use builder::SearchQuery;
pub use window::{monday_on_or_before, weekly_windows, DateWindow, WeekSlot};
