use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use recordkit_core::{App, Record, Schema, SortDirection, SortSpec};
use recordkit_search::{CategoryFilter, ViewQuery};
use recordkit_service::RecordService;
use recordkit_storage::StorageBackend;

pub(crate) struct ListOptions<'a> {
    pub query: Option<&'a str>,
    pub category: Option<&'a str>,
    pub sort: Option<&'a str>,
    pub desc: bool,
    pub json: bool,
}

/// `field=value` argument parser for clap.
pub(crate) fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_owned(), value.to_owned()))
        },
        _ => Err(format!("expected field=value, got `{raw}`")),
    }
}

fn open(storage: Arc<StorageBackend>, app: App) -> Result<RecordService> {
    Ok(RecordService::open_app(storage, app)?)
}

fn pairs(fields: &[(String, String)]) -> impl Iterator<Item = (&str, &str)> {
    fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
}

pub(crate) fn run_apps() -> Result<()> {
    for app in App::ALL {
        let schema = app.schema();
        let fields: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        println!("{:<10} {}  [{}]", app.as_str(), app.description(), fields.join(", "));
    }
    Ok(())
}

pub(crate) fn run_list(storage: Arc<StorageBackend>, app: App, options: &ListOptions<'_>) -> Result<()> {
    let service = open(storage, app)?;

    let mut query = ViewQuery::new()
        .text(options.query.unwrap_or_default())
        .category(CategoryFilter::from(options.category));
    if let Some(key) = options.sort {
        let direction =
            if options.desc { SortDirection::Descending } else { SortDirection::Ascending };
        query = query.sort(SortSpec { key: key.to_owned(), direction });
    }

    let records = service.view(&query)?;
    if options.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", render_table(service.schema(), &records));
    }
    Ok(())
}

pub(crate) fn run_add(storage: Arc<StorageBackend>, app: App, fields: &[(String, String)]) -> Result<()> {
    let mut service = open(storage, app)?;
    let record = service.add_from_input(pairs(fields))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub(crate) fn run_edit(
    storage: Arc<StorageBackend>,
    app: App,
    id: &str,
    fields: &[(String, String)],
) -> Result<()> {
    let mut service = open(storage, app)?;
    let record = service.edit_from_input(id, pairs(fields))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub(crate) fn run_toggle(storage: Arc<StorageBackend>, app: App, id: &str, field: &str) -> Result<()> {
    let mut service = open(storage, app)?;
    let record = service.toggle(id, field)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub(crate) fn run_delete(storage: Arc<StorageBackend>, app: App, id: &str) -> Result<()> {
    let mut service = open(storage, app)?;
    let removed = service.remove(id)?;
    println!("Deleted {} from {}", removed.id, app);
    Ok(())
}

pub(crate) fn run_summary(storage: Arc<StorageBackend>, app: App, field: &str) -> Result<()> {
    let service = open(storage, app)?;
    let summary = service.summary(field)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Plain-text table: one column per schema field, `id` first.
fn render_table(schema: &Schema, records: &[Record]) -> String {
    let mut header = vec!["id".to_owned()];
    header.extend(schema.fields.iter().map(|f| f.name.clone()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            let mut row = vec![r.id.to_string()];
            row.extend(
                schema.fields.iter().map(|f| r.get(&f.name).map(ToString::to_string).unwrap_or_default()),
            );
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> =
            row.iter().zip(&widths).map(|(cell, &w)| format!("{cell:<w$}")).collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    if records.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}
