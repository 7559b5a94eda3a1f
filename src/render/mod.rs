//! Presentation models shared by the terminal board and CLI output.
//!
//! Nothing here depends on a terminal backend: the renderers compute what to
//! show (positions, colours, labels, styled text) and the front ends draw it.

pub mod card;
pub mod markup;
pub mod palette;
pub mod timeline;

pub use card::{Card, CardContent};
pub use palette::Swatch;
pub use timeline::TimelineMarker;
