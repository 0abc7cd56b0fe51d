use mouser_api::{ComplianceEntry, Part, ProductAttribute};

/// One exported row, copied field for field from an API part entry
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    pub mpn: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub lifecycle_status: Option<String>,
    pub lead_time: Option<String>,
    pub rohs_status: Option<String>,
    pub suggested_replacement: Option<String>,
    pub product_compliance: Vec<ComplianceEntry>,
    pub product_attributes: Vec<ProductAttribute>,
}

impl From<&Part> for PartRecord {
    fn from(part: &Part) -> Self {
        Self {
            mpn: part.manufacturer_part_number.clone(),
            description: part.description.clone(),
            category: part.category.clone(),
            manufacturer: part.manufacturer.clone(),
            lifecycle_status: part.lifecycle_status.clone(),
            lead_time: part.lead_time.clone(),
            rohs_status: part.rohs_status.clone(),
            suggested_replacement: part.suggested_replacement.clone(),
            product_compliance: part.product_compliance.clone(),
            product_attributes: part.product_attributes.clone(),
        }
    }
}

impl PartRecord {
    /// Cells in [`crate::EXPORT_HEADER`] order. Lists are rendered as compact JSON.
    pub fn to_row(&self) -> Result<[String; 10], serde_json::Error> {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Ok([
            text(&self.mpn),
            text(&self.description),
            text(&self.category),
            text(&self.manufacturer),
            text(&self.lifecycle_status),
            text(&self.lead_time),
            text(&self.rohs_status),
            text(&self.suggested_replacement),
            serde_json::to_string(&self.product_compliance)?,
            serde_json::to_string(&self.product_attributes)?,
        ])
    }
}
