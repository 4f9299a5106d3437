pub mod layout;
pub mod model;
pub mod series;

pub use layout::{AxisSpec, LegendAnchor, LegendOrientation, LegendSpec};
pub use model::{render, FigureModel};
pub use series::{LineStyle, SeriesTrace};
