mod auto_hide;
mod backend;
mod controls;
mod fullscreen;
mod media;
mod signal;
mod simulated;
#[cfg(feature = "video")]
mod video;

pub use auto_hide::*;
pub use backend::*;
pub use controls::*;
pub use fullscreen::*;
pub use media::*;
pub use signal::*;
pub use simulated::*;
#[cfg(feature = "video")]
pub use video::*;

#[cfg(test)]
pub(crate) use media::testing;
