use std::cmp::Ordering;

use recordkit_core::{App, Record, SortSpec};

use crate::{CategoryFilter, Comparator, SearchError, ViewQuery, apply, fold};

fn orders() -> Vec<Record> {
    let rows = [
        ("1", "Office chairs", "Acme Furniture", 12, "Approved", "2024-03-04"),
        ("2", "Printer paper", "PaperCo", 40, "Pending", "2024-03-11"),
        ("3", "Standing desk", "Acme Furniture", 2, "Shipped", "2024-02-20"),
        ("4", "Toner", "printworks", 6, "Pending", "2024-03-11"),
        ("5", "Whiteboard", "Office Depot", 1, "Delivered", "2023-12-01"),
    ];
    rows.iter()
        .map(|&(id, item, supplier, quantity, status, date)| {
            Record::builder(id)
                .field("item", item)
                .field("supplier", supplier)
                .field("quantity", quantity)
                .field("unit_price", 1.0)
                .field("status", status)
                .field("order_date", date)
                .build()
        })
        .collect()
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn text_filter_is_exact_over_search_fields() {
    let schema = App::Orders.schema();
    let records = orders();
    for query in ["acme", "PRINT", "o", "desk", "zzz", "Office"] {
        let view = apply(&schema, &records, &ViewQuery::new().text(query)).expect("view");
        let needle = fold(query);
        let expected: Vec<&str> = records
            .iter()
            .filter(|r| {
                schema.search_fields.iter().any(|f| {
                    r.text(f).is_some_and(|v| fold(v).contains(&needle))
                })
            })
            .map(|r| r.id.as_str())
            .collect();
        let mut got = ids(&view);
        got.sort_unstable();
        assert_eq!(got, expected, "query {query}");
    }
}

#[test]
fn category_filter_keeps_only_equal_values() {
    let schema = App::Orders.schema();
    let records = orders();
    let view = apply(
        &schema,
        &records,
        &ViewQuery::new().category(CategoryFilter::parse("Pending")),
    )
    .expect("view");
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|r| r.text("status") == Some("Pending")));
}

#[test]
fn all_sentinel_returns_everything() {
    let schema = App::Orders.schema();
    let records = orders();
    for raw in ["", "All", "all"] {
        let view =
            apply(&schema, &records, &ViewQuery::new().category(CategoryFilter::parse(raw)))
                .expect("view");
        assert_eq!(view.len(), records.len());
    }
}

#[test]
fn sorted_output_is_ordered_and_reversible() {
    let schema = App::Orders.schema();
    let records = orders();
    for key in ["item", "supplier", "quantity", "status", "order_date"] {
        let asc_spec = SortSpec::ascending(key);
        let desc_spec = SortSpec::descending(key);
        let asc = apply(&schema, &records, &ViewQuery::new().sort(asc_spec.clone())).expect("asc");
        let desc = apply(&schema, &records, &ViewQuery::new().sort(desc_spec.clone())).expect("desc");

        let asc_cmp = Comparator::new(&schema, &asc_spec).expect("key");
        let desc_cmp = Comparator::new(&schema, &desc_spec).expect("key");
        assert!(asc.windows(2).all(|w| asc_cmp.compare(&w[0], &w[1]) != Ordering::Greater));
        assert!(desc.windows(2).all(|w| desc_cmp.compare(&w[0], &w[1]) != Ordering::Greater));

        for (i, a) in asc.iter().enumerate() {
            for b in &asc[i + 1..] {
                if asc_cmp.compare(a, b) == Ordering::Less {
                    let pa = desc.iter().position(|r| r.id == a.id);
                    let pb = desc.iter().position(|r| r.id == b.id);
                    assert!(pb < pa, "{key}: {} should precede {} when descending", b.id, a.id);
                }
            }
        }
    }
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let schema = App::Orders.schema();
    let records = orders();
    let view =
        apply(&schema, &records, &ViewQuery::new().sort(SortSpec::ascending("order_date")))
            .expect("view");
    // "2" and "4" share a date and keep list order.
    assert_eq!(ids(&view), vec!["5", "3", "1", "2", "4"]);
}

#[test]
fn default_sort_applies_without_explicit_sort() {
    let schema = App::Orders.schema();
    let view = apply(&schema, &orders(), &ViewQuery::new()).expect("view");
    assert_eq!(view.first().map(|r| r.id.as_str()), Some("2"));
    assert_eq!(view.last().map(|r| r.id.as_str()), Some("5"));
}

#[test]
fn stages_compose() {
    let schema = App::Orders.schema();
    let query = ViewQuery::new()
        .text("acme")
        .category(CategoryFilter::Only("Shipped".to_owned()))
        .sort(SortSpec::ascending("item"));
    let view = apply(&schema, &orders(), &query).expect("view");
    assert_eq!(ids(&view), vec!["3"]);
}

#[test]
fn category_filter_without_category_field_fails() {
    let schema = App::Todo.schema();
    let err = apply(&schema, &[], &ViewQuery::new().category(CategoryFilter::parse("Work")))
        .unwrap_err();
    assert_eq!(err, SearchError::NoCategoryField("todo".to_owned()));
}

#[test]
fn empty_result_is_not_an_error() {
    let schema = App::Orders.schema();
    let view = apply(&schema, &orders(), &ViewQuery::new().text("nothing matches")).expect("view");
    assert!(view.is_empty());
}
