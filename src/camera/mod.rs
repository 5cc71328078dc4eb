pub mod parallax;
pub mod rig;
pub mod shake;
