pub mod csv;
pub mod iris;
pub mod series;

pub use csv::{parse_csv, LabelMode};
pub use iris::iris;
pub use series::abstract_series;
