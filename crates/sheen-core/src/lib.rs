pub mod anim;
pub mod math;
pub mod shader;
pub mod text;

mod color;
mod error;
mod image;
mod path;
mod shiny_text;
mod surface;
#[cfg(test)]
mod test_util;

pub use self::color::*;
pub use self::error::*;
pub use self::image::*;
pub use self::path::*;
pub use self::shiny_text::*;
pub use self::surface::*;
