use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use money::{Money, ParseMoneyError};

pub mod dates;
mod money;

/// Unknown fields of a record, kept so they survive a read-modify-write.
pub type Extra = Map<String, Value>;

/// Status enum whose unlisted wire values decode into `Other` and are written
/// back unchanged.
macro_rules! open_status {
    (
        $(#[$meta:meta])*
        $name:ident (default $default:ident) {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(value) => value.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                match status {
                    $name::Other(value) => value,
                    known => known.as_str().to_string(),
                }
            }
        }
    };
}

pub mod page {
    use super::*;

    /// The single list shape every list operation hands to its callers.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaginatedCollection<T> {
        pub content: Vec<T>,
        pub total_pages: u32,
        pub total_elements: u64,
        pub size: u32,
        /// 0-based page index.
        pub number: u32,
        pub first: bool,
        pub last: bool,
    }

    impl<T> PaginatedCollection<T> {
        /// Wraps a bare array as the only page of a collection.
        pub fn single_page(content: Vec<T>, page: u32, size: u32) -> Self {
            Self {
                total_elements: content.len() as u64,
                content,
                total_pages: 1,
                size,
                number: page,
                first: page == 0,
                last: true,
            }
        }
    }

    /// List bodies as the budget service actually sends them: some endpoints
    /// answer with a bare array, others with a Spring-style page envelope.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RawListResponse<T> {
        Array(Vec<T>),
        Paginated(PaginatedCollection<T>),
    }

    impl<T> RawListResponse<T> {
        /// Resolves either shape into a [`PaginatedCollection`].
        ///
        /// `page` and `size` are the request parameters; they are only used
        /// when the body is a bare array.
        pub fn into_page(self, page: u32, size: u32) -> PaginatedCollection<T> {
            match self {
                Self::Array(items) => PaginatedCollection::single_page(items, page, size),
                Self::Paginated(collection) => collection,
            }
        }
    }
}

pub mod budget {
    use super::*;

    use crate::event::EventId;

    open_status! {
        BudgetStatus (default Active) {
            Active => "ACTIVE",
            Draft => "DRAFT",
            Completed => "COMPLETED",
            Archived => "ARCHIVED",
            Closed => "CLOSED",
            Deleted => "DELETED",
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        pub name: String,
        #[serde(default)]
        pub event_id: Option<EventId>,
        pub total_budget: Money,
        #[serde(default)]
        pub current_expenses: Money,
        #[serde(default)]
        pub current_income: Money,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default)]
        pub categories: Vec<String>,
        #[serde(default)]
        pub status: BudgetStatus,
        #[serde(flatten)]
        pub extra: Extra,
    }

    /// Envelope returned once a budget deletion went through.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DeleteConfirmation {
        pub success: bool,
        pub message: String,
        pub data: Option<Value>,
    }
}

pub mod transaction {
    use chrono::NaiveDateTime;

    use super::*;

    open_status! {
        ExpenseStatus (default Pending) {
            Pending => "PENDING",
            Paid => "PAID",
            Cancelled => "CANCELLED",
            Approved => "APPROVED",
            Rejected => "REJECTED",
            Refunded => "REFUNDED",
        }
    }

    open_status! {
        IncomeStatus (default Pending) {
            Pending => "PENDING",
            Received => "RECEIVED",
            Cancelled => "CANCELLED",
            Expected => "EXPECTED",
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(default)]
        pub budget_id: Option<i64>,
        #[serde(default)]
        pub category: Option<String>,
        pub amount: Money,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default, with = "crate::dates")]
        pub date: Option<NaiveDateTime>,
        #[serde(default)]
        pub vendor: Option<String>,
        #[serde(default)]
        pub status: ExpenseStatus,
        #[serde(flatten)]
        pub extra: Extra,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Income {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<i64>,
        #[serde(default)]
        pub budget_id: Option<i64>,
        #[serde(default)]
        pub category: Option<String>,
        pub amount: Money,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default, with = "crate::dates")]
        pub date: Option<NaiveDateTime>,
        #[serde(default)]
        pub source: Option<String>,
        #[serde(default)]
        pub status: IncomeStatus,
        #[serde(flatten)]
        pub extra: Extra,
    }
}

pub mod event {
    use std::fmt;

    use super::*;

    /// Event identifier as the services send it: document ids are strings,
    /// older budget records reference events by number.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum EventId {
        Number(i64),
        Text(String),
    }

    impl fmt::Display for EventId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Number(id) => write!(f, "{id}"),
                Self::Text(id) => f.write_str(id),
            }
        }
    }

    impl From<i64> for EventId {
        fn from(id: i64) -> Self {
            Self::Number(id)
        }
    }

    impl From<&str> for EventId {
        fn from(id: &str) -> Self {
            Self::Text(id.to_string())
        }
    }

    impl From<String> for EventId {
        fn from(id: String) -> Self {
            Self::Text(id)
        }
    }

    /// Event record from the event service.
    ///
    /// Only the fields the budgeting views read are typed; the rest is kept
    /// in `extra`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Event {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub id: Option<EventId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub status: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub organizer_id: Option<EventId>,
        #[serde(flatten)]
        pub extra: Extra,
    }

    impl Event {
        /// Name shown next to a budget: `name`, then `title`, then `Event {id}`.
        pub fn display_name(&self) -> String {
            self.name
                .as_deref()
                .filter(|name| !name.is_empty())
                .or(self.title.as_deref().filter(|title| !title.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| match &self.id {
                    Some(id) => format!("Event {id}"),
                    None => "Unknown Event".to_string(),
                })
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventStatusUpdate {
        pub status: String,
    }
}
