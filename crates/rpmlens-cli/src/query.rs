//! Handlers of the content query subcommands.

use nu_ansi_term::Color::{Blue, Cyan, Green, LightRed, Magenta, Yellow};
use rpmlens_core::{
    options::{ErrataFilters, ModuleStreamFilters, PackageListFilters, PageOptions},
    ContentIndex,
};
use rpmlens_db::models::{
    EnvironmentItem, ErrataItem, ModuleStreamItem, PackageGroupItem, PackageListItem,
    PackageSearchItem,
};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{themes::BorderCorrection, Panel, Style},
};
use tracing::{debug, info};

use crate::utils::{join_or_dash, print_json, Colored};

/// Output mode shared by every query subcommand.
#[derive(Clone, Copy)]
pub struct Output {
    pub json: bool,
}

/// A page of results with the number of matches ignoring pagination.
#[derive(Serialize)]
struct Page<'a, T> {
    total: i64,
    offset: i64,
    items: &'a [T],
}

fn render(header: &str, columns: &[&str], rows: Vec<Vec<String>>, footer: String) {
    let mut builder = Builder::new();
    builder.push_record(columns.iter().map(|c| c.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let table = builder
        .build()
        .with(Panel::header(header))
        .with(Panel::footer(footer))
        .with(Style::rounded())
        .with(BorderCorrection {})
        .to_string();

    info!("\n{table}");
}

pub fn search_packages(
    index: &ContentIndex,
    versions: &[String],
    search: &str,
    limit: i64,
    output: Output,
) -> miette::Result<()> {
    let items: Vec<PackageSearchItem> = index.package_search(versions, search, limit)?;
    debug!(count = items.len(), "package search finished");

    if output.json {
        return print_json(&items);
    }

    let count = items.len();
    let rows = items
        .into_iter()
        .map(|item| vec![format!("{}", Colored(Blue, &item.name)), item.summary])
        .collect();
    render(
        "Packages",
        &["Name", "Summary"],
        rows,
        format!("{} found", Colored(Cyan, count)),
    );
    Ok(())
}

pub fn search_groups(
    index: &ContentIndex,
    versions: &[String],
    search: &str,
    limit: i64,
    output: Output,
) -> miette::Result<()> {
    let items: Vec<PackageGroupItem> = index.package_group_search(versions, search, limit)?;

    if output.json {
        return print_json(&items);
    }

    let count = items.len();
    let rows = items
        .into_iter()
        .map(|group| {
            vec![
                format!("{}", Colored(Blue, &group.name)),
                format!("{}", Colored(Cyan, &group.id)),
                join_or_dash(&group.packages),
            ]
        })
        .collect();
    render(
        "Package Groups",
        &["Name", "Id", "Packages"],
        rows,
        format!("{} found", Colored(Cyan, count)),
    );
    Ok(())
}

pub fn search_environments(
    index: &ContentIndex,
    versions: &[String],
    search: &str,
    limit: i64,
    output: Output,
) -> miette::Result<()> {
    let items: Vec<EnvironmentItem> = index.environment_search(versions, search, limit)?;

    if output.json {
        return print_json(&items);
    }

    let count = items.len();
    let rows = items
        .into_iter()
        .map(|env| {
            vec![
                format!("{}", Colored(Blue, &env.name)),
                format!("{}", Colored(Cyan, &env.id)),
                join_or_dash(&env.groups),
            ]
        })
        .collect();
    render(
        "Environments",
        &["Name", "Id", "Groups"],
        rows,
        format!("{} found", Colored(Cyan, count)),
    );
    Ok(())
}

pub fn list_packages(
    index: &ContentIndex,
    versions: &[String],
    filters: &PackageListFilters,
    page: &PageOptions,
    output: Output,
) -> miette::Result<()> {
    let (items, total): (Vec<PackageListItem>, i64) =
        index.package_list(versions, filters, page)?;

    if output.json {
        return print_json(&Page {
            total,
            offset: page.offset(),
            items: &items,
        });
    }

    let shown = items.len();
    let rows = items
        .into_iter()
        .map(|pkg| {
            let evr = if pkg.epoch == "0" || pkg.epoch.is_empty() {
                format!("{}-{}", pkg.version, pkg.release)
            } else {
                format!("{}:{}-{}", pkg.epoch, pkg.version, pkg.release)
            };
            vec![
                format!("{}", Colored(Blue, &pkg.name)),
                format!("{}", Colored(LightRed, evr)),
                format!("{}", Colored(Magenta, &pkg.arch)),
                pkg.summary,
            ]
        })
        .collect();
    render(
        "Package List",
        &["Name", "Version", "Arch", "Summary"],
        rows,
        format!(
            "showing {} of {} from offset {}",
            Colored(Green, shown),
            Colored(Cyan, total),
            page.offset()
        ),
    );
    Ok(())
}

pub fn list_modules(
    index: &ContentIndex,
    versions: &[String],
    filters: &ModuleStreamFilters,
    sort_by: &str,
    output: Output,
) -> miette::Result<()> {
    let items: Vec<ModuleStreamItem> = index.module_stream_list(versions, filters, sort_by)?;

    if output.json {
        return print_json(&items);
    }

    let count = items.len();
    let rows = items
        .into_iter()
        .map(|module| {
            vec![
                format!("{}", Colored(Blue, &module.name)),
                format!("{}", Colored(Cyan, &module.stream)),
                format!("{}", Colored(LightRed, &module.version)),
                module.context,
                module.arch,
                join_or_dash(&module.packages),
            ]
        })
        .collect();
    render(
        "Module Streams",
        &["Name", "Stream", "Version", "Context", "Arch", "Packages"],
        rows,
        format!("{} found", Colored(Cyan, count)),
    );
    Ok(())
}

fn severity_color(severity: &str) -> nu_ansi_term::Color {
    match severity {
        "Critical" => LightRed,
        "Important" => Yellow,
        "Moderate" => Cyan,
        _ => Green,
    }
}

pub fn list_errata(
    index: &ContentIndex,
    versions: &[String],
    filters: &ErrataFilters,
    page: &PageOptions,
    output: Output,
) -> miette::Result<()> {
    let (items, total): (Vec<ErrataItem>, i64) = index.errata_list(versions, filters, page)?;

    if output.json {
        return print_json(&Page {
            total,
            offset: page.offset(),
            items: &items,
        });
    }

    let shown = items.len();
    let rows = items
        .into_iter()
        .map(|advisory| {
            let severity = if advisory.severity.is_empty() {
                "-".to_string()
            } else {
                format!(
                    "{}",
                    Colored(severity_color(&advisory.severity), &advisory.severity)
                )
            };
            vec![
                format!("{}", Colored(Blue, &advisory.id)),
                advisory.errata_type,
                severity,
                advisory.issued_date,
                join_or_dash(&advisory.cves),
                advisory.summary,
            ]
        })
        .collect();
    render(
        "Errata",
        &["Id", "Type", "Severity", "Issued", "CVEs", "Summary"],
        rows,
        format!(
            "showing {} of {} from offset {}",
            Colored(Green, shown),
            Colored(Cyan, total),
            page.offset()
        ),
    );
    Ok(())
}
