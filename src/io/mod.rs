/// CSV export of the hourly trace and monthly table.
pub mod export;
