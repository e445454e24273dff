pub mod plot;
pub mod render;
pub mod writer;

pub use plot::{Series, TrajectoryPlot};
pub use render::GraphvizRenderer;
pub use writer::{ArtifactManifest, ArtifactOptions, ArtifactWriter};
