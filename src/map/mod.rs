pub mod geometry;
pub mod projection;
pub mod renderer;
mod spatial;

pub use projection::Viewport;
pub use renderer::{CountryShape, MapRenderer};
