pub mod bone;
pub mod ik;
pub mod model;
