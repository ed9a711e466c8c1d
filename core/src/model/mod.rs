pub mod daily_record;
pub mod dataset;
pub mod month;
pub mod plant;
pub mod series;
pub mod summary;
