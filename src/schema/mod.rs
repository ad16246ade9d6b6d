//! Positional schema descriptors for roster input files.
//!
//! Every supported input layout is one member of a small closed set of
//! variants. Column names are assigned positionally; the first row of any raw
//! table is a header and is discarded before binding. Selecting a variant at
//! load time replaces ad hoc column-count branching.

use crate::error::{Result, RosterError};

/// The nine-column staff/dependent layout (no relationship column in source)
const STAFF_DEPENDENT_COLUMNS: &[&str] = &[
    "Member Number",
    "Surname",
    "Other Name(s)",
    "CAT",
    "P/Cont",
    "Birth Date",
    "Sex",
    "Entry Date",
    "Status",
];

/// The eleven-column full-list layout carrying a pre-supplied relationship
/// column (overridden during normalization) and a location column
const FULL_LIST_COLUMNS: &[&str] = &[
    "Member Number",
    "Surname",
    "Other Name(s)",
    "Relationship",
    "CAT",
    "P/Cont",
    "Birth Date",
    "Sex",
    "Entry Date",
    "Status",
    "Location",
];

/// The five-column leavers layout
const LEAVERS_COLUMNS: &[&str] = &[
    "Names",
    "Date of Birth",
    "Sex",
    "Relationship",
    "CAT",
];

/// A named positional input schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// 9 columns; relationship role is derived from flag, sex and age
    StaffDependent,
    /// 11 columns; the source relationship column is overridden by the
    /// binary member/dependent classification
    FullList,
    /// 5 columns; the relationship label is taken from the source as-is
    Leavers,
}

impl SchemaVariant {
    /// Human-readable schema name used in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StaffDependent => "staff/dependent",
            Self::FullList => "full list",
            Self::Leavers => "leavers",
        }
    }

    /// Column names in positional order
    #[must_use]
    pub const fn column_names(self) -> &'static [&'static str] {
        match self {
            Self::StaffDependent => STAFF_DEPENDENT_COLUMNS,
            Self::FullList => FULL_LIST_COLUMNS,
            Self::Leavers => LEAVERS_COLUMNS,
        }
    }

    /// Number of columns the variant declares
    #[must_use]
    pub fn column_count(self) -> usize {
        self.column_names().len()
    }

    /// Bind a raw row to this schema, validating its width.
    ///
    /// A width mismatch is fatal for the whole load: no partial table may be
    /// published from a file that does not match its declared layout.
    pub fn bind<'a>(self, cells: &'a [String], row: usize) -> Result<BoundRow<'a>> {
        if cells.len() != self.column_count() {
            return Err(RosterError::SchemaMismatch {
                schema: self.name(),
                expected: self.column_count(),
                found: cells.len(),
                row,
            });
        }
        Ok(BoundRow {
            variant: self,
            cells,
        })
    }
}

/// A raw row bound to a schema variant, addressable by column name
#[derive(Debug)]
pub struct BoundRow<'a> {
    variant: SchemaVariant,
    cells: &'a [String],
}

impl BoundRow<'_> {
    /// Look up a cell by declared column name
    pub fn get(&self, column: &str) -> Result<&str> {
        let idx = self
            .variant
            .column_names()
            .iter()
            .position(|c| *c == column)
            .ok_or_else(|| RosterError::UnknownColumn {
                schema: self.variant.name(),
                column: column.to_string(),
            })?;
        Ok(self.cells[idx].as_str())
    }
}
