use crate::export::{
    Access, DashboardExport, DataModelExport, Definition, ExportPayload, ReportExport,
    SourceConnection, Text,
};
use crate::render::escape::{write_joined, Escaped};
use std::fmt::{self, Display, Formatter};

/// Rendered in place of a table when the payload isn't recognized
pub const UNKNOWN_EXPORT: &str = "Unknown Type of Exported File";

/// Placeholder cell for a section without any entries
pub const NONE_FOUND: &str = "None Found";

/// The summary table rows of an export, written when formatted.
///
/// Unknown payloads are written as [`UNKNOWN_EXPORT`] instead of rows.
#[derive(Debug, Clone, Copy)]
pub struct SummaryTable<'a> {
    payload: &'a ExportPayload,
}

impl<'a> SummaryTable<'a> {
    pub fn new(payload: &'a ExportPayload) -> Self {
        SummaryTable { payload }
    }
}

impl Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.payload {
            ExportPayload::Dashboard(x) => dashboard(f, x),
            ExportPayload::Report(x) => report(f, x),
            ExportPayload::DataModel(x) => data_model(f, x),
            ExportPayload::Unknown => f.write_str(UNKNOWN_EXPORT),
        }
    }
}

/// Renders the summary table rows of a payload
pub fn render_summary(payload: &ExportPayload) -> String {
    SummaryTable::new(payload).to_string()
}

fn text(x: &Option<Text>) -> Escaped<'_> {
    Escaped(x.as_ref().map_or("", |x| x.as_str()))
}

fn header_row(f: &mut Formatter<'_>, label: &str, columns: [&str; 3]) -> fmt::Result {
    write!(f, "<tr><th scope=\"row\">{}</th>", label)?;
    for column in columns {
        write!(f, "<th scope=\"row\">{}</th>", column)?;
    }
    f.write_str("</tr>\n")
}

fn none_found_row(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(
        f,
        "<tr><th scope=\"row\"></th><td>{}</td><td></td><td></td></tr>",
        NONE_FOUND
    )
}

fn spacer_row(f: &mut Formatter<'_>) -> fmt::Result {
    header_row(f, "", ["", "", ""])
}

fn created_row(f: &mut Formatter<'_>, definition: &Definition) -> fmt::Result {
    writeln!(
        f,
        "<tr><th scope=\"row\">Created:</th><td>{}</td><th scope=\"row\">ID:</th><td>{}</td></tr>",
        text(&definition.created),
        text(&definition.id)
    )
}

fn access_rows(f: &mut Formatter<'_>, accesses: &[Access]) -> fmt::Result {
    header_row(f, "Access:", ["Right", "", "Role(s)"])?;
    if accesses.is_empty() {
        return none_found_row(f);
    }

    for access in accesses {
        write!(
            f,
            "<tr><th scope=\"row\"></th><td>{}</td><td>=&gt;</td><td>",
            text(&access.access_right)
        )?;
        write_joined(f, access.accessor_names.iter().map(|x| x.as_str()), ", ")?;
        f.write_str("</td></tr>\n")?;
    }

    Ok(())
}

fn exported_caption(
    f: &mut Formatter<'_>,
    modified: &Option<Text>,
    version: &Option<Text>,
) -> fmt::Result {
    writeln!(
        f,
        "<caption>Last exported at {} from API v{}</caption>",
        text(modified),
        text(version)
    )
}

fn dashboard(f: &mut Formatter<'_>, export: &DashboardExport) -> fmt::Result {
    let default = Definition::default();
    let definition = export.definition.as_ref().unwrap_or(&default);
    created_row(f, definition)?;
    access_rows(f, &definition.accesses)?;

    header_row(f, "Reports:", ["Category", "", "Name"])?;
    if export.report_definitions.is_empty() {
        none_found_row(f)?;
    }
    for report in &export.report_definitions {
        let category = report.category.as_ref().and_then(|x| x.name.as_ref());
        writeln!(
            f,
            "<tr><th scope=\"row\"></th><td>{}</td><td>/</td><td>{}</td></tr>",
            Escaped(category.map_or("", |x| x.as_str())),
            text(&report.name)
        )?;
    }

    header_row(f, "Mappings:", ["Name", "", "Source Name(s)"])?;
    if definition.connections.is_empty() {
        none_found_row(f)?;
    }
    for connection in &definition.connections {
        write!(
            f,
            "<tr><th scope=\"row\">{}</th><td></td><td>To:</td><td>",
            text(&connection.name)
        )?;
        write_joined(f, connection.source_names().map(|x| x.as_str()), ", ")?;
        f.write_str("</td></tr>\n")?;
    }

    exported_caption(f, &definition.modified, &export.version)
}

fn report(f: &mut Formatter<'_>, export: &ReportExport) -> fmt::Result {
    let default = Definition::default();
    let definition = export.definition.as_ref().unwrap_or(&default);
    created_row(f, definition)?;
    access_rows(f, &definition.accesses)?;

    header_row(f, "Connections:", ["Connection", "", "Source"])?;
    if definition.connections.is_empty() {
        none_found_row(f)?;
    }
    for connection in &definition.connections {
        if connection.query_source_categories.is_empty() {
            writeln!(
                f,
                "<tr><th scope=\"row\">DB:</th><td>{}</td><td></td><td></td></tr>",
                text(&connection.name)
            )?;
        }

        for category in &connection.query_source_categories {
            write!(
                f,
                "<tr><th scope=\"row\">DB:</th><td>{}</td><td>[{}]</td><td>",
                text(&connection.name),
                text(&category.name)
            )?;
            write_joined(f, category.source_names().map(|x| x.as_str()), ", ")?;
            f.write_str("</td></tr>\n")?;
        }
    }

    exported_caption(f, &definition.modified, &export.version)
}

fn data_model(f: &mut Formatter<'_>, export: &DataModelExport) -> fmt::Result {
    writeln!(
        f,
        "<tr><th scope=\"col\">Connections:</th><th></th><th></th><th></th></tr>"
    )?;
    if export.source_connections.is_empty() {
        none_found_row(f)?;
    }
    for connection in &export.source_connections {
        source_connection(f, connection)?;
    }

    writeln!(
        f,
        "<caption>Last exported from API v{}</caption>",
        text(&export.version)
    )
}

fn source_connection(f: &mut Formatter<'_>, connection: &SourceConnection) -> fmt::Result {
    write!(
        f,
        "<tr><th scope=\"col\">Name:</th><td>{}</td><th scope=\"col\">Modified:</th><td>",
        text(&connection.name)
    )?;
    match connection.latest_modified() {
        Some(x) => write!(f, "{}", x.format("%Y-%m-%d %H:%M:%S UTC"))?,
        None => f.write_str("Unknown")?,
    }
    f.write_str("</td></tr>\n")?;

    let schemas = connection.schemas();
    f.write_str("<tr><th scope=\"col\">Schema:</th><td>")?;
    let names = schemas.iter().filter_map(|x| x.name.as_ref()).map(|x| x.as_str());
    write_joined(f, names, ", ")?;
    f.write_str("</td><th scope=\"col\">Sources:</th><td>")?;

    let mut first = true;
    for schema in schemas {
        for (kind, count) in schema.type_counts() {
            if !first {
                f.write_str("<br>")?;
            }
            first = false;
            write!(f, "{} {}s", count, Escaped(kind))?;
        }
    }
    f.write_str("</td></tr>\n")?;

    spacer_row(f)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn summary(value: serde_json::Value) -> String {
        render_summary(&ExportPayload::from_value(value))
    }

    #[test]
    fn test_unknown_is_fallback_only() {
        assert_eq!(summary(json!({"foo": 1})), UNKNOWN_EXPORT);
    }

    #[test]
    fn test_dashboard_without_accesses() {
        let out = summary(json!({"DashboardDefinition": {"Name": "d"}}));
        let access = out.find("Access:").unwrap();
        let reports = out.find("Reports:").unwrap();
        assert!(out[access..reports].contains(NONE_FOUND));
        assert_eq!(out.matches(NONE_FOUND).count(), 3);
    }

    #[test]
    fn test_dashboard_with_empty_accesses() {
        let out = summary(json!({"DashboardDefinition": {"Name": "d", "Accesses": []}}));
        let access = out.find("Access:").unwrap();
        let reports = out.find("Reports:").unwrap();
        assert!(out[access..reports].contains(NONE_FOUND));
    }

    #[test]
    fn test_dashboard_rows() {
        let out = summary(json!({
            "DashboardDefinition": {
                "Name": "Sales",
                "Created": "2024-01-01",
                "Modified": "2024-02-01",
                "Id": "d1",
                "Accesses": [{"AccessRight": "Edit", "AccessorNames": ["Admins", "Ops"]}],
                "Connections": [{
                    "Name": "Warehouse",
                    "QuerySourceCategories": {
                        "QuerySources": [{"Name": "orders"}, {"Name": "items"}]
                    }
                }]
            },
            "ReportDefinitions": [
                {"Name": "Monthly", "Category": {"Name": "Finance"}},
                {"Name": "Uncategorized"}
            ],
            "Version": "2"
        }));

        assert!(out.contains("<td>2024-01-01</td>"));
        assert!(out.contains("<td>d1</td>"));
        assert!(out.contains("<td>Edit</td><td>=&gt;</td><td>Admins, Ops</td>"));
        assert!(out.contains("<td>Finance</td><td>/</td><td>Monthly</td>"));
        assert!(out.contains("<td></td><td>/</td><td>Uncategorized</td>"));
        assert!(out.contains("<th scope=\"row\">Warehouse</th><td></td><td>To:</td><td>orders, items</td>"));
        assert!(out.contains("<caption>Last exported at 2024-02-01 from API v2</caption>"));
        assert!(!out.contains(NONE_FOUND));
    }

    #[test]
    fn test_report_connections_by_category() {
        let out = summary(json!({
            "ReportDefinition": {
                "Name": "r",
                "Connections": [
                    {
                        "Name": "warehouse",
                        "QuerySourceCategories": [
                            {"Name": "Tables", "QuerySources": [{"Name": "orders"}, {"Name": "items"}]},
                            {"Name": "Views", "QuerySources": [{"Name": "v_sales"}]}
                        ]
                    },
                    {"Name": "empty"}
                ]
            }
        }));

        assert!(out.contains("<td>warehouse</td><td>[Tables]</td><td>orders, items</td>"));
        assert!(out.contains("<td>warehouse</td><td>[Views]</td><td>v_sales</td>"));
        assert!(out.contains("<td>empty</td><td></td><td></td>"));
    }

    #[test]
    fn test_data_model_rows() {
        let out = summary(json!({
            "name": "Warehouse Model",
            "version": "5",
            "sourceConnections": [{
                "name": "pg",
                "dbSource": {
                    "querySources": [
                        {"name": "public", "querySources": [
                            {"type": "table", "modified": "2024-01-01T00:00:00Z"},
                            {"type": "table", "modified": "2024-03-01T08:30:00Z"},
                            {"type": "view", "modified": "2023-01-01T00:00:00Z"}
                        ]},
                        {"name": "audit", "querySources": [
                            {"type": "table", "modified": "2024-02-01T00:00:00Z"}
                        ]}
                    ]
                }
            }]
        }));

        assert!(out.contains("<td>pg</td>"));
        assert!(out.contains("<td>2024-03-01 08:30:00 UTC</td>"));
        assert!(out.contains("<td>public, audit</td>"));
        assert!(out.contains("<td>2 tables<br>1 views<br>1 tables</td>"));
        assert!(out.contains("<caption>Last exported from API v5</caption>"));
    }

    #[test]
    fn test_data_model_missing_everything() {
        let out = summary(json!({"name": "m", "sourceConnections": [{"name": "bare"}]}));
        assert!(out.contains("<td>bare</td>"));
        assert!(out.contains("<td>Unknown</td>"));

        let out = summary(json!({"name": "m"}));
        assert!(out.contains(NONE_FOUND));
    }

    #[test]
    fn test_values_are_escaped() {
        let out = summary(json!({
            "ReportDefinition": {
                "Name": "r",
                "Id": "<script>alert(1)</script>",
                "Accesses": [{"AccessRight": "Read", "AccessorNames": ["<b>"]}]
            }
        }));
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(out.contains("<td>&lt;b&gt;</td>"));
    }
}
