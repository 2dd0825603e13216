pub mod limits;
pub mod merge;
pub mod model;
pub mod observability;
pub mod session;
pub mod timestamp;
