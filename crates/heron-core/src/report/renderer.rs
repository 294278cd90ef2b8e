use crate::analysis::EndpointStats;
use crate::{Error, Result};

/// Token in the HTML template replaced by the report data
pub const TABLE_PLACEHOLDER: &str = "$table_json";

pub struct ReportRenderer;

impl ReportRenderer {
    /// Serialize ranked endpoints as the JSON array the template expects
    pub fn to_json(entries: &[EndpointStats]) -> Result<String> {
        tracing::debug!("Serializing {} report rows", entries.len());

        let json = serde_json::to_string(entries)?;
        Ok(json)
    }

    /// Substitute the report data into an HTML template
    pub fn render(template: &str, entries: &[EndpointStats]) -> Result<String> {
        if !template.contains(TABLE_PLACEHOLDER) {
            return Err(Error::Template(format!(
                "placeholder {TABLE_PLACEHOLDER} not found"
            )));
        }

        let json = Self::to_json(entries)?;
        Ok(template.replace(TABLE_PLACEHOLDER, &json))
    }
}
