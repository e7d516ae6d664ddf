//! Typed view over the JSON payload of an export.
//!
//! Payloads come in three recognized shapes, told apart by which nested field
//! carries the export's name:
//!
//! | Kind       | Marker field                |
//! |------------|-----------------------------|
//! | Dashboard  | `DashboardDefinition.Name`  |
//! | Report     | `ReportDefinition.Name`     |
//! | Data Model | `name`                      |
//!
//! The first match wins in the order above, so a payload that carries both a
//! dashboard and a report definition is a dashboard.
//!
//! ```
//! use biexport::export::{export_title, ExportKind, ExportPayload};
//!
//! let value = serde_json::json!({
//!     "ReportDefinition": { "Name": "Q1 Sales", "Id": "r1" }
//! });
//! assert_eq!(ExportKind::classify(&value), ExportKind::Report);
//!
//! assert_eq!(export_title(&value).as_deref(), Some("Q1 Sales"));
//!
//! let payload = ExportPayload::from_value(value);
//! assert_eq!(payload.kind(), ExportKind::Report);
//! ```
//!
//! The page title is looked up in a different order than the kind: a report
//! name wins over a dashboard name, which wins over a data model name.
//!
//! Every field of the typed payload is optional. A field that is missing, is
//! `null`, or holds a value of the wrong shape is treated as absent, so
//! building a payload never fails.

mod lenient;
mod model;

pub use lenient::Text;
pub use model::*;

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// The kind of export a payload represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// A dashboard and the reports it embeds
    Dashboard,

    /// A single report
    Report,

    /// A data model and its source connections
    DataModel,

    /// Anything else
    Unknown,
}

impl ExportKind {
    /// Classifies a parsed payload by its shape
    pub fn classify(value: &Value) -> ExportKind {
        let present = |pointer: &str| value.pointer(pointer).is_some_and(|x| !x.is_null());
        if present("/DashboardDefinition/Name") {
            ExportKind::Dashboard
        } else if present("/ReportDefinition/Name") {
            ExportKind::Report
        } else if present("/name") {
            ExportKind::DataModel
        } else {
            ExportKind::Unknown
        }
    }

    /// Returns the human readable name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Dashboard => "Dashboard",
            ExportKind::Report => "Report",
            ExportKind::DataModel => "Data Model",
            ExportKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload decoded into one of the recognized export shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ExportPayload {
    Dashboard(DashboardExport),
    Report(ReportExport),
    DataModel(DataModelExport),
    Unknown,
}

impl ExportPayload {
    /// Classifies the value and decodes it into the matching shape
    pub fn from_value(value: Value) -> ExportPayload {
        let kind = ExportKind::classify(&value);
        let payload = match kind {
            ExportKind::Dashboard => {
                DashboardExport::deserialize(value).map(ExportPayload::Dashboard)
            }
            ExportKind::Report => ReportExport::deserialize(value).map(ExportPayload::Report),
            ExportKind::DataModel => {
                DataModelExport::deserialize(value).map(ExportPayload::DataModel)
            }
            ExportKind::Unknown => Ok(ExportPayload::Unknown),
        };

        payload.unwrap_or_else(|e| {
            warn!(kind = %kind, error = %e, "unable to decode export payload");
            ExportPayload::Unknown
        })
    }

    /// Returns the kind of export
    pub fn kind(&self) -> ExportKind {
        match self {
            ExportPayload::Dashboard(_) => ExportKind::Dashboard,
            ExportPayload::Report(_) => ExportKind::Report,
            ExportPayload::DataModel(_) => ExportKind::DataModel,
            ExportPayload::Unknown => ExportKind::Unknown,
        }
    }

}

/// Returns the title of an export: the first non-null of
/// `ReportDefinition.Name`, `DashboardDefinition.Name`, and `name`.
///
/// Strings are taken as is and other values are written out as JSON.
pub fn export_title(value: &Value) -> Option<String> {
    ["/ReportDefinition/Name", "/DashboardDefinition/Name", "/name"]
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find(|x| !x.is_null())
        .map(|x| match x {
            Value::String(s) => s.clone(),
            x => x.to_string(),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;
    use serde_json::json;

    #[rstest]
    #[case(json!({"DashboardDefinition": {"Name": "d"}}), ExportKind::Dashboard)]
    #[case(json!({"ReportDefinition": {"Name": "r"}}), ExportKind::Report)]
    #[case(json!({"name": "m"}), ExportKind::DataModel)]
    #[case(json!({"foo": 1}), ExportKind::Unknown)]
    #[case(json!({}), ExportKind::Unknown)]
    #[case(json!([1, 2, 3]), ExportKind::Unknown)]
    #[case(json!("name"), ExportKind::Unknown)]
    #[case(json!({"DashboardDefinition": {"Id": "d"}}), ExportKind::Unknown)]
    #[case(json!({"DashboardDefinition": {"Name": null}}), ExportKind::Unknown)]
    #[case(json!({"ReportDefinition": "Name"}), ExportKind::Unknown)]
    #[case(json!({"DashboardDefinition": {"Name": 0}}), ExportKind::Dashboard)]
    fn test_classify(#[case] value: Value, #[case] expected: ExportKind) {
        assert_eq!(ExportKind::classify(&value), expected);
    }

    #[rstest]
    #[case(json!({
        "DashboardDefinition": {"Name": "d"},
        "ReportDefinition": {"Name": "r"},
        "name": "m"
    }), ExportKind::Dashboard)]
    #[case(json!({
        "ReportDefinition": {"Name": "r"},
        "name": "m"
    }), ExportKind::Report)]
    #[case(json!({
        "DashboardDefinition": {"Name": null},
        "ReportDefinition": {"Name": "r"}
    }), ExportKind::Report)]
    fn test_classify_precedence(#[case] value: Value, #[case] expected: ExportKind) {
        assert_eq!(ExportKind::classify(&value), expected);
        assert_eq!(ExportPayload::from_value(value).kind(), expected);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ExportKind::DataModel.to_string(), "Data Model");
        assert_eq!(ExportKind::Dashboard.to_string(), "Dashboard");
    }

    #[rstest]
    #[case(json!({"name": "Warehouse"}), Some("Warehouse"))]
    #[case(json!({"DashboardDefinition": {"Name": 7}}), Some("7"))]
    #[case(json!({"foo": 1}), None)]
    #[case(json!({
        "DashboardDefinition": {"Name": "Dash"},
        "ReportDefinition": {"Name": "Rep"}
    }), Some("Rep"))]
    #[case(json!({
        "ReportDefinition": {"Name": null},
        "DashboardDefinition": {"Name": "Dash"},
        "name": "m"
    }), Some("Dash"))]
    #[case(json!({"ReportDefinition": {"Id": "r"}, "name": "m"}), Some("m"))]
    fn test_title(#[case] value: Value, #[case] expected: Option<&str>) {
        assert_eq!(export_title(&value).as_deref(), expected);
    }

    #[test]
    fn test_decode_report() {
        let payload = ExportPayload::from_value(json!({
            "ReportDefinition": {
                "Name": "Q1 Sales",
                "Created": "2024-01-01",
                "Id": "r1",
                "Accesses": [{"AccessRight": "Read", "AccessorNames": ["Finance", "Sales"]}],
                "Connections": [{
                    "Name": "warehouse",
                    "QuerySourceCategories": [
                        {"Name": "Tables", "QuerySources": [{"Name": "orders"}]}
                    ]
                }]
            },
            "Version": 3
        }));

        let ExportPayload::Report(report) = payload else {
            panic!("expected report");
        };
        let definition = report.definition.unwrap();
        assert_eq!(definition.id, Some(Text::new("r1")));
        assert_eq!(definition.accesses[0].accessor_names.len(), 2);
        assert_eq!(definition.connections[0].query_source_categories.len(), 1);
        assert_eq!(report.version, Some(Text::new("3")));
    }
}
