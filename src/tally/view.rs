//! # Inventory View
//!
//! Turns a raw snapshot of the store into the ordered list a user sees.
//!
//! The derivation is a pure function of three inputs:
//!
//! 1. **Filter**: keep items whose name contains the search term,
//!    case-insensitively. An empty term keeps everything.
//! 2. **Sort** by the active [`SortDirective`]:
//!    - by name, ignoring case and accents first (so `éclair` sorts among
//!      the `e`s), then case and accents, then the raw text
//!    - by count, numerically, keeping the input order for equal counts
//!    - `None` keeps the store's enumeration order untouched
//!
//! [`ViewState`] holds the search term and directive as a UI would, and
//! implements the header-click rules: clicking an inactive column sorts it
//! ascending, clicking the active column flips the order, and there is no
//! per-column "off" state. Only [`ViewState::clear`] returns to `None`.

use crate::error::TallyError;
use crate::model::Item;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Count,
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::Name => write!(f, "Name"),
            SortField::Count => write!(f, "Count"),
        }
    }
}

impl FromStr for SortField {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "count" | "quantity" => Ok(SortField::Count),
            other => Err(TallyError::Api(format!(
                "Unknown sort field: {} (expected name or count)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirective {
    #[default]
    None,
    NameAsc,
    NameDesc,
    CountAsc,
    CountDesc,
}

impl SortDirective {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        match (field, order) {
            (SortField::Name, SortOrder::Asc) => SortDirective::NameAsc,
            (SortField::Name, SortOrder::Desc) => SortDirective::NameDesc,
            (SortField::Count, SortOrder::Asc) => SortDirective::CountAsc,
            (SortField::Count, SortOrder::Desc) => SortDirective::CountDesc,
        }
    }

    pub fn field(&self) -> Option<SortField> {
        match self {
            SortDirective::None => None,
            SortDirective::NameAsc | SortDirective::NameDesc => Some(SortField::Name),
            SortDirective::CountAsc | SortDirective::CountDesc => Some(SortField::Count),
        }
    }

    pub fn order(&self) -> Option<SortOrder> {
        match self {
            SortDirective::None => None,
            SortDirective::NameAsc | SortDirective::CountAsc => Some(SortOrder::Asc),
            SortDirective::NameDesc | SortDirective::CountDesc => Some(SortOrder::Desc),
        }
    }

    /// The directive after a click on `field`'s column header.
    pub fn toggled(self, field: SortField) -> Self {
        match (self.field(), self.order()) {
            (Some(active), Some(SortOrder::Asc)) if active == field => {
                SortDirective::new(field, SortOrder::Desc)
            }
            _ => SortDirective::new(field, SortOrder::Asc),
        }
    }

    /// Column header text: "Name", "Name (↓)" when ascending, "Name (↑)" when descending.
    pub fn label_for(&self, field: SortField) -> String {
        if self.field() != Some(field) {
            return field.to_string();
        }
        match self.order() {
            Some(SortOrder::Asc) => format!("{} (↓)", field),
            _ => format!("{} (↑)", field),
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortDirective::None => "none",
            SortDirective::NameAsc => "name-asc",
            SortDirective::NameDesc => "name-desc",
            SortDirective::CountAsc => "count-asc",
            SortDirective::CountDesc => "count-desc",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SortDirective {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(SortDirective::None),
            "name" | "name-asc" => Ok(SortDirective::NameAsc),
            "name-desc" => Ok(SortDirective::NameDesc),
            "count" | "count-asc" => Ok(SortDirective::CountAsc),
            "count-desc" => Ok(SortDirective::CountDesc),
            other => Err(TallyError::Api(format!(
                "Unknown sort directive: {} (expected none, name-asc, name-desc, count-asc or count-desc)",
                other
            ))),
        }
    }
}

/// Case-insensitive substring match. An empty term matches every name.
pub fn matches_search(name: &str, search_term: &str) -> bool {
    search_term.is_empty() || name.to_lowercase().contains(&search_term.to_lowercase())
}

/// Base letters only: NFD, combining marks dropped, lowercased.
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation for name sorting. Base letters decide first, then the
/// lowercased text (unaccented before accented), then the raw text.
fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Derives the display sequence from a store snapshot.
///
/// Pure and total. `slice::sort_by` is stable, so equal keys keep their input order.
pub fn derive_view(records: &[Item], search_term: &str, sort: SortDirective) -> Vec<Item> {
    let mut visible: Vec<Item> = records
        .iter()
        .filter(|item| matches_search(&item.name, search_term))
        .cloned()
        .collect();

    match sort {
        SortDirective::None => {}
        SortDirective::NameAsc => visible.sort_by(|a, b| collate(&a.name, &b.name)),
        SortDirective::NameDesc => visible.sort_by(|a, b| collate(&b.name, &a.name)),
        SortDirective::CountAsc => visible.sort_by(|a, b| a.quantity.cmp(&b.quantity)),
        SortDirective::CountDesc => visible.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
    }

    visible
}

/// Search and sort state of a view, as driven by a UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub sort: SortDirective,
}

impl ViewState {
    pub fn new(search_term: impl Into<String>, sort: SortDirective) -> Self {
        Self {
            search_term: search_term.into(),
            sort,
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_term = text.into();
    }

    pub fn click_sort(&mut self, field: SortField) {
        self.sort = self.sort.toggled(field);
    }

    pub fn clear(&mut self) {
        self.search_term.clear();
        self.sort = SortDirective::None;
    }

    pub fn derive(&self, records: &[Item]) -> Vec<Item> {
        derive_view(records, &self.search_term, self.sort)
    }

    /// Autocomplete options for the search box: names of the visible items.
    pub fn suggestions(&self, records: &[Item]) -> Vec<String> {
        self.derive(records).into_iter().map(|item| item.name).collect()
    }
}
