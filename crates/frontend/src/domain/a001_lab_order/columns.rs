use crate::shared::export::CsvExportable;
use crate::shared::list_utils::Searchable;
use contracts::domain::a001_lab_order::LabOrder;

/// Display columns of the order table: (field key, header label)
pub const COLUMNS: [(&str, &str); 9] = [
    ("orderid", "Order ID"),
    ("order_date", "Date"),
    ("status", "Status"),
    ("file_name", "File Name"),
    ("tat", "TAT"),
    ("unit", "Unit"),
    ("tooth", "Tooth"),
    ("lab_name", "Lab Name"),
    ("message_count", "Messages"),
];

/// Columns the datatable search looks at
pub const SEARCH_FIELDS: [&str; 7] = [
    "orderid",
    "order_date",
    "status",
    "file_name",
    "unit",
    "tooth",
    "lab_name",
];

impl Searchable for LabOrder {
    fn get_field_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "orderid" => self.orderid.clone(),
            "order_date" => self.order_date.clone(),
            "status" => self.status.label().to_string(),
            "file_name" => self.file_name.clone(),
            "tat" => self.tat.clone(),
            "unit" => self.unit.clone(),
            "tooth" => self.tooth.clone(),
            "lab_name" => self.lab_name.clone(),
            "message_count" => self.message_count.to_string(),
            "file_path" => self.file_path.clone(),
            _ => return None,
        };
        Some(value)
    }
}

impl CsvExportable for LabOrder {
    fn headers() -> Vec<&'static str> {
        COLUMNS.iter().map(|(_, label)| *label).collect()
    }

    fn to_csv_row(&self) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|(field, _)| self.get_field_value(field).unwrap_or_default())
            .collect()
    }
}
