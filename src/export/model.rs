use crate::export::lenient::{lenient, lenient_list, lenient_one_or_many, Text};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// A dashboard export: the dashboard definition and the reports it embeds
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DashboardExport {
    #[serde(rename = "DashboardDefinition", default, deserialize_with = "lenient")]
    pub definition: Option<Definition>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub report_definitions: Vec<ReportSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<Text>,
}

/// A report export
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportExport {
    #[serde(rename = "ReportDefinition", default, deserialize_with = "lenient")]
    pub definition: Option<Definition>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<Text>,
}

/// The definition shared by dashboards and reports
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Definition {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub created: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub modified: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Text>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub accesses: Vec<Access>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub connections: Vec<Connection>,
}

/// An access control entry: a right and who holds it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Access {
    #[serde(default, deserialize_with = "lenient")]
    pub access_right: Option<Text>,
    #[serde(default, deserialize_with = "lenient_one_or_many")]
    pub accessor_names: Vec<Text>,
}

/// A data connection of a dashboard or report
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Connection {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,

    /// Dashboards store a single category object here, reports a list
    #[serde(default, deserialize_with = "lenient_one_or_many")]
    pub query_source_categories: Vec<QuerySourceCategory>,
}

impl Connection {
    /// Iterates the names of every query source across all categories
    pub fn source_names(&self) -> impl Iterator<Item = &Text> + '_ {
        self.query_source_categories
            .iter()
            .flat_map(|category| category.source_names())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuerySourceCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub query_sources: Vec<QuerySource>,
}

impl QuerySourceCategory {
    /// Iterates the names of the category's query sources
    pub fn source_names(&self) -> impl Iterator<Item = &Text> + '_ {
        self.query_sources.iter().filter_map(|x| x.name.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuerySource {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
}

/// A report as listed inside a dashboard export
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<ReportCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportCategory {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
}

/// A data model export
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModelExport {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<Text>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub source_connections: Vec<SourceConnection>,
}

/// A database connection feeding a data model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConnection {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub db_source: Option<DbSource>,
}

impl SourceConnection {
    /// Returns the schemas of the connection
    pub fn schemas(&self) -> &[Schema] {
        self.db_source
            .as_ref()
            .map(|x| x.query_sources.as_slice())
            .unwrap_or_default()
    }

    /// Returns the most recent modification time among all the connection's
    /// query sources. Timestamps that can't be parsed are ignored.
    pub fn latest_modified(&self) -> Option<DateTime<Utc>> {
        self.schemas()
            .iter()
            .flat_map(|schema| schema.query_sources.iter())
            .filter_map(|source| source.modified.as_ref())
            .filter_map(|x| parse_timestamp(x.as_str()))
            .max()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbSource {
    #[serde(default, deserialize_with = "lenient_list")]
    pub query_sources: Vec<Schema>,
}

/// A schema of a source connection and the objects (tables, views) it holds
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub query_sources: Vec<SourceObject>,
}

impl Schema {
    /// Counts the schema's objects by type, in the order each type is first
    /// seen. Objects without a type are counted as `Unknown`.
    pub fn type_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for source in &self.query_sources {
            let kind = source.kind.as_ref().map_or("Unknown", |x| x.as_str());
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((kind, 1)),
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceObject {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Text>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<Text>,
    #[serde(default, deserialize_with = "lenient")]
    pub modified: Option<Text>,
}

/// Parses the timestamp formats seen in exports: RFC 3339, a date time
/// without an offset (taken as UTC), a bare date, or epoch milliseconds.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(x) = DateTime::parse_from_rfc3339(s) {
        return Some(x.with_timezone(&Utc));
    }

    if let Ok(x) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(x.and_utc());
    }

    if let Ok(x) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return x.and_hms_opt(0, 0, 0).map(|x| x.and_utc());
    }

    s.parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}
