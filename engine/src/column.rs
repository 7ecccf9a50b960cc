//! Sortable columns and their sort directions.
//!
//! Each column resolves to a typed accessor over [`Record`]; there is no
//! dynamic field-path lookup. The picture and actions columns of the table
//! are not sortable and do not appear here.

use crate::{Error, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accessor extracting the sort key of a column.
pub type Accessor = fn(&Record) -> &str;

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    First,
    Last,
    Country,
}

impl Column {
    /// Every sortable column, in header order.
    pub const ALL: [Column; 3] = [Column::First, Column::Last, Column::Country];

    /// Stable key used by callers to name the column.
    pub fn key(self) -> &'static str {
        match self {
            Column::First => "first",
            Column::Last => "last",
            Column::Country => "country",
        }
    }

    /// Header text.
    pub fn label(self) -> &'static str {
        match self {
            Column::First => "Nombre",
            Column::Last => "Apellido",
            Column::Country => "Pais",
        }
    }

    pub fn accessor(self) -> Accessor {
        match self {
            Column::First => first_name,
            Column::Last => last_name,
            Column::Country => country,
        }
    }
}

fn first_name(record: &Record) -> &str {
    &record.name.first
}

fn last_name(record: &Record) -> &str {
    &record.name.last
}

fn country(record: &Record) -> &str {
    &record.location.country
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Column::First),
            "last" => Ok(Column::Last),
            "country" => Ok(Column::Country),
            other => Err(Error::InvalidColumn(other.to_string())),
        }
    }
}

/// Direction the next sort on a column will use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sortable_keys() {
        for column in Column::ALL {
            assert_eq!(column.key().parse::<Column>().unwrap(), column);
        }
    }

    #[test]
    fn reject_unsortable_keys() {
        for key in ["thumbnail", "actions", "Country", ""] {
            assert_eq!(
                key.parse::<Column>(),
                Err(Error::InvalidColumn(key.to_string()))
            );
        }
    }

    #[test]
    fn accessors_read_nested_fields() {
        let record = Record::new(1, "Ana", "Ruiz", "Spain");
        assert_eq!(Column::First.accessor()(&record), "Ana");
        assert_eq!(Column::Last.accessor()(&record), "Ruiz");
        assert_eq!(Column::Country.accessor()(&record), "Spain");
    }

    #[test]
    fn header_labels() {
        let labels: Vec<_> = Column::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Nombre", "Apellido", "Pais"]);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(SortDirection::default(), SortDirection::Asc);
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled().toggled(), SortDirection::Desc);
    }

    #[test]
    fn serialization_format() {
        assert_eq!(serde_json::to_string(&Column::Country).unwrap(), "\"country\"");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
    }
}
