mod renderer;
mod writer;

pub use renderer::{ReportRenderer, TABLE_PLACEHOLDER};
pub use writer::ReportWriter;
