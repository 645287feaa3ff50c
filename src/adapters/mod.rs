// Adapters layer: concrete readers for external inputs.

pub mod spreadsheet;

pub use spreadsheet::{load_records, RawTable};
