pub mod bracket_loader;
pub mod csv_loader;
pub mod decimal;
pub mod logging;
pub mod params;

pub use bracket_loader::{BracketLoadError, BracketLoader};
pub use csv_loader::CsvLoadError;
pub use params::{ParameterLoadError, ParameterLoader};
