pub mod projection;
pub mod transform;
