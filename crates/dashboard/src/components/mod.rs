//! View components shared by the dashboard templates.

pub mod data_table;
pub mod scatter_plot;

pub use data_table::{FilterOption, TableColumn, availability_options, batch_columns};
pub use scatter_plot::{AxisTick, PlotPoint, ScatterPlot};
