//! Built-in app schemas and their seed data.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::Record;
use crate::schema::{FieldSchema, Schema, SortSpec};

/// The demo apps recordkit ships schemas for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum App {
    Todo,
    Orders,
    Expenses,
    Shipments,
    Students,
}

impl App {
    pub const ALL: &'static [App] =
        &[App::Todo, App::Orders, App::Expenses, App::Shipments, App::Students];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Todo => "todo",
            Self::Orders => "orders",
            Self::Expenses => "expenses",
            Self::Shipments => "shipments",
            Self::Students => "students",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match *self {
            Self::Todo => "To-do list with completion flags",
            Self::Orders => "Procurement orders by supplier and status",
            Self::Expenses => "Expenses by category and date",
            Self::Shipments => "Shipment tracking by carrier and status",
            Self::Students => "Student roster with grades per course",
        }
    }

    #[must_use]
    pub fn schema(&self) -> Schema {
        match *self {
            Self::Todo => todo_schema(),
            Self::Orders => orders_schema(),
            Self::Expenses => expenses_schema(),
            Self::Shipments => shipments_schema(),
            Self::Students => students_schema(),
        }
    }

    /// Records used when nothing is persisted yet.
    #[must_use]
    pub fn seed(&self) -> Vec<Record> {
        match *self {
            Self::Todo => vec![
                Record::builder("1").field("text", "Buy milk").field("completed", false).build(),
            ],
            Self::Orders => vec![
                Record::builder("1")
                    .field("item", "Office chairs")
                    .field("supplier", "Acme Furniture")
                    .field("quantity", 12)
                    .field("unit_price", 89.5)
                    .field("status", "Approved")
                    .field("order_date", "2024-03-04")
                    .build(),
                Record::builder("2")
                    .field("item", "Printer paper")
                    .field("supplier", "PaperCo")
                    .field("quantity", 40)
                    .field("unit_price", 4.25)
                    .field("status", "Pending")
                    .field("order_date", "2024-03-11")
                    .build(),
            ],
            Self::Expenses => vec![
                Record::builder("1")
                    .field("description", "Groceries")
                    .field("amount", 54.3)
                    .field("category", "Food")
                    .field("date", "2024-05-02")
                    .build(),
                Record::builder("2")
                    .field("description", "Bus pass")
                    .field("amount", 30)
                    .field("category", "Transport")
                    .field("date", "2024-05-01")
                    .build(),
            ],
            Self::Shipments => vec![
                Record::builder("1")
                    .field("tracking_number", "TRK-100234")
                    .field("origin", "Rotterdam")
                    .field("destination", "Berlin")
                    .field("carrier", "DHL")
                    .field("status", "In Transit")
                    .field("ship_date", "2024-06-10")
                    .build(),
            ],
            Self::Students => vec![
                Record::builder("1")
                    .field("name", "Ada Lovelace")
                    .field("email", "ada@example.edu")
                    .field("grade", 97)
                    .field("course", "Mathematics")
                    .build(),
                Record::builder("2")
                    .field("name", "Alan Turing")
                    .field("email", "alan@example.edu")
                    .field("grade", 93)
                    .field("course", "Computer Science")
                    .build(),
            ],
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for App {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" | "todos" | "tasks" => Ok(Self::Todo),
            "orders" | "order" => Ok(Self::Orders),
            "expenses" | "expense" => Ok(Self::Expenses),
            "shipments" | "shipment" => Ok(Self::Shipments),
            "students" | "student" => Ok(Self::Students),
            other => Err(CoreError::UnknownApp(other.to_owned())),
        }
    }
}

fn todo_schema() -> Schema {
    Schema::new("todo", "todos")
        .field(FieldSchema::text("text").label("Task").required().max_len(200))
        .field(FieldSchema::boolean("completed"))
        .search(&["text"])
}

fn orders_schema() -> Schema {
    Schema::new("orders", "orders")
        .field(FieldSchema::text("item").required())
        .field(FieldSchema::text("supplier").required())
        .field(FieldSchema::number("quantity").required().min(1.0))
        .field(FieldSchema::number("unit_price").required().min(0.0))
        .field(
            FieldSchema::options(
                "status",
                &["Pending", "Approved", "Shipped", "Delivered", "Cancelled"],
            )
            .default_value("Pending"),
        )
        .field(FieldSchema::date("order_date"))
        .search(&["item", "supplier"])
        .category("status")
        .sort(SortSpec::descending("order_date"))
}

fn expenses_schema() -> Schema {
    Schema::new("expenses", "expenses")
        .field(FieldSchema::text("description").required())
        .field(FieldSchema::number("amount").required().min(0.0))
        .field(
            FieldSchema::options(
                "category",
                &["Food", "Transport", "Utilities", "Entertainment", "Health", "Other"],
            )
            .default_value("Other"),
        )
        .field(FieldSchema::date("date").required())
        .search(&["description"])
        .category("category")
        .sort(SortSpec::descending("date"))
}

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static TRACKING_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}-?[0-9]{4,12}$").unwrap());

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

fn shipments_schema() -> Schema {
    Schema::new("shipments", "shipments")
        .field(
            FieldSchema::text("tracking_number")
                .required()
                .pattern(TRACKING_NUMBER_REGEX.clone()),
        )
        .field(FieldSchema::text("origin"))
        .field(FieldSchema::text("destination"))
        .field(FieldSchema::text("carrier"))
        .field(
            FieldSchema::options(
                "status",
                &["Processing", "In Transit", "Out for Delivery", "Delivered", "Returned"],
            )
            .default_value("Processing"),
        )
        .field(FieldSchema::date("ship_date"))
        .search(&["tracking_number", "origin", "destination"])
        .category("status")
        .sort(SortSpec::descending("ship_date"))
}

fn students_schema() -> Schema {
    Schema::new("students", "students")
        .field(FieldSchema::text("name").required())
        .field(FieldSchema::text("email").pattern(EMAIL_REGEX.clone()))
        .field(FieldSchema::number("grade").min(0.0).max(100.0))
        .field(FieldSchema::options(
            "course",
            &["Mathematics", "Computer Science", "Physics", "Literature", "History"],
        ))
        .search(&["name", "email"])
        .category("course")
        .sort(SortSpec::ascending("name"))
}
