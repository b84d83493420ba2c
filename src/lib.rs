pub mod args;
pub mod error;
pub mod frame_loop;
pub mod geometry;
pub mod interpolation;
pub mod model;
pub mod store;
pub mod controller {
    pub mod bootstrap;
    pub mod connection;
    pub mod transport;
}
pub mod mvu {
    pub mod runtime;
    pub mod spectator;
}
pub mod view {
    pub mod canvas;
    pub mod frame;
    pub mod style;
    pub mod svg;

    pub use canvas::{Canvas, Fill, Rgb, Stroke, TextAnchor, TextStyle};
    pub use frame::{FrameOutcome, Renderer};
    pub use style::RenderStyle;
    pub use svg::{SvgCanvas, svg_document};
}

pub use error::SpectatorError;
