pub mod camera;
pub mod constants;
pub mod drag;
pub mod fade;
pub mod grid;
pub mod hover;
pub mod music;
pub mod reverb;
pub mod slider;

pub use camera::*;
pub use drag::*;
pub use fade::*;
pub use grid::*;
pub use hover::*;
pub use music::*;
pub use reverb::*;
pub use slider::*;
