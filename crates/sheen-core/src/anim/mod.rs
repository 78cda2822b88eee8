//! Frame-clock animation of the highlight: the sweep and the staggered
//! per-glyph hops.

mod animator;
mod easing;
mod stagger;
mod tween;

pub use self::animator::*;
pub use self::easing::*;
pub use self::stagger::*;
pub use self::tween::*;
