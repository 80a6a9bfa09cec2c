//! Advisory (errata) queries.

use diesel::{
    prelude::*,
    sql_types::{Bool, Text},
};
use tracing::trace;

use super::SortDirection;
use crate::{
    entities::errata,
    expr::{AnyOf, Col},
    membership::MembershipPredicate,
    models::{types::string_list, ErrataItem},
    query::SelectQuery,
    traits::Expression,
};

/// Types an advisory can be classified as.
pub const KNOWN_TYPES: [&str; 3] = ["security", "bugfix", "enhancement"];
/// Type filter value matching every advisory outside [`KNOWN_TYPES`].
pub const OTHER_TYPE: &str = "other";

/// Severities an advisory can be rated with.
pub const KNOWN_SEVERITIES: [&str; 4] = ["Critical", "Important", "Moderate", "Low"];
/// Severity filter value matching every advisory outside [`KNOWN_SEVERITIES`].
pub const UNKNOWN_SEVERITY: &str = "Unknown";

#[derive(Debug, QueryableByName)]
struct ErrataRow {
    #[diesel(sql_type = Text)]
    content_ptr_id: String,
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Text)]
    title: String,
    #[diesel(sql_type = Text)]
    summary: String,
    #[diesel(sql_type = Text)]
    description: String,
    #[diesel(sql_type = Text)]
    issued_date: String,
    #[diesel(sql_type = Text)]
    updated_date: String,
    #[diesel(sql_type = Text)]
    errata_type: String,
    #[diesel(sql_type = Text)]
    errata_severity: String,
    #[diesel(sql_type = Bool)]
    reboot_suggested: bool,
    #[diesel(sql_type = Text)]
    cves: String,
}

impl From<ErrataRow> for ErrataItem {
    fn from(row: ErrataRow) -> Self {
        Self {
            content_id: row.content_ptr_id,
            id: row.id,
            title: row.title,
            summary: row.summary,
            description: row.description,
            issued_date: row.issued_date,
            updated_date: row.updated_date,
            errata_type: row.errata_type,
            severity: row.errata_severity,
            reboot_suggested: row.reboot_suggested,
            cves: string_list(&row.cves),
        }
    }
}

/// Field an advisory listing can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrataSortField {
    #[default]
    IssuedDate,
    UpdatedDate,
    Type,
    Severity,
}

impl ErrataSortField {
    /// Parses a field name; anything unrecognized yields `None`.
    pub fn parse(field: &str) -> Option<Self> {
        match field.trim() {
            "issued_date" => Some(Self::IssuedDate),
            "updated_date" => Some(Self::UpdatedDate),
            "type" => Some(Self::Type),
            "severity" => Some(Self::Severity),
            _ => None,
        }
    }

    fn order_expr(self) -> String {
        match self {
            Self::IssuedDate => errata::ISSUED_DATE.name.to_string(),
            Self::UpdatedDate => errata::UPDATED_DATE.name.to_string(),
            Self::Type => format!("COALESCE({}, '')", errata::TYPE.name),
            Self::Severity => format!("COALESCE({}, '')", errata::SEVERITY.name),
        }
    }
}

/// Filters, ordering and page bounds of an advisory listing.
#[derive(Debug, Clone)]
pub struct ErrataQuery<'a> {
    /// Case-insensitive substring of the advisory id or summary.
    pub search: Option<&'a str>,
    /// Exact types to keep; [`OTHER_TYPE`] keeps unclassified advisories.
    pub types: &'a [String],
    /// Exact severities to keep; [`UNKNOWN_SEVERITY`] keeps unrated advisories.
    pub severities: &'a [String],
    pub sort_field: ErrataSortField,
    pub direction: SortDirection,
    pub offset: i64,
    pub limit: i64,
}

impl Default for ErrataQuery<'_> {
    fn default() -> Self {
        Self {
            search: None,
            types: &[],
            severities: &[],
            sort_field: ErrataSortField::IssuedDate,
            direction: SortDirection::Desc,
            offset: 0,
            limit: 0,
        }
    }
}

/// Matches `selected` values exactly, and everything outside `known` (missing
/// included) when `sentinel` is among them.
fn enumerated_filter(
    col: Col<Option<String>>,
    selected: &[String],
    known: &[&str],
    sentinel: &str,
) -> AnyOf {
    let mut any = AnyOf::new();

    let exact = selected
        .iter()
        .filter(|value| value.as_str() != sentinel)
        .cloned()
        .collect::<Vec<_>>();
    if !exact.is_empty() {
        any.push(col.in_(exact));
    }

    if selected.iter().any(|value| value == sentinel) {
        any.push(col.null().or(col.not_in(known.iter().copied())));
    }

    any
}

/// Repository for advisories.
pub struct ErrataRepository;

impl ErrataRepository {
    /// Lists visible advisories with a total that ignores pagination.
    pub fn list(
        conn: &mut SqliteConnection,
        membership: MembershipPredicate,
        query: &ErrataQuery<'_>,
    ) -> QueryResult<(Vec<ErrataItem>, i64)> {
        let mut select = SelectQuery::<ErrataRow>::from(errata::TABLE)
            .select(&[
                errata::CONTENT_ID,
                errata::ID,
                errata::TITLE,
                errata::SUMMARY,
                errata::DESCRIPTION,
                errata::ISSUED_DATE,
                errata::UPDATED_DATE,
            ])
            .select_raw(format!("COALESCE({}, '') AS errata_type", errata::TYPE.name))
            .select_raw(format!(
                "COALESCE({}, '') AS errata_severity",
                errata::SEVERITY.name
            ))
            .select(&[errata::REBOOT_SUGGESTED])
            .select_raw(format!(
                "(SELECT json_group_array(uref.ref_id) FROM rpm_updatereference uref \
                 WHERE uref.update_record_id = {} AND uref.ref_type = 'cve') AS cves",
                errata::CONTENT_ID.name
            ))
            .filter(membership);

        if let Some(search) = query.search.filter(|s| !s.is_empty()) {
            select = select.filter(errata::ID.ilike(search).or(errata::SUMMARY.ilike(search)));
        }

        if !query.types.is_empty() {
            select = select.filter(enumerated_filter(
                errata::TYPE,
                query.types,
                &KNOWN_TYPES,
                OTHER_TYPE,
            ));
        }

        if !query.severities.is_empty() {
            select = select.filter(enumerated_filter(
                errata::SEVERITY,
                query.severities,
                &KNOWN_SEVERITIES,
                UNKNOWN_SEVERITY,
            ));
        }

        let total = select.count(conn)?;

        let rows = select
            .order_by_raw(query.sort_field.order_expr(), query.direction.is_desc())
            .order_by(errata::ID, false)
            .order_by(errata::CONTENT_ID, false)
            .limit(query.limit)
            .offset(query.offset)
            .fetch(conn)?;

        trace!(rows = rows.len(), total, "errata list");

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }
}
