pub mod clip;
pub mod ease;
pub mod track;
