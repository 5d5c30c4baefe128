//! Value maps bound to statements: whole-row records for insert/replace and
//! assignment maps for update.

use mysql_async::Value;

/// An insertion-ordered field-to-value map representing one row.
///
/// A `Record` is bound to the single `?` of an `insert into ... set ?` or
/// `replace into ... set ?` statement and expanded into positional form
/// just before execution (see [`crate::params`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((field.into(), value.into()));
        self
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The ordered field entries.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub(crate) fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

impl<F: Into<String>, V: Into<Value>> FromIterator<(F, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(f, v)| (f.into(), v.into()))
                .collect(),
        }
    }
}

/// One assignment inside an [`Assignments`] map.
#[derive(Debug, Clone, PartialEq)]
pub enum Assign {
    /// Direct assignment: `field = ?`
    Set(Value),
    /// Increment directive: `field = field + ?`
    Add(Value),
}

/// An insertion-ordered assignment map for UPDATE statements.
///
/// # Example
/// ```ignore
/// use myorm::Assignments;
///
/// let values = Assignments::new()
///     .increment("age", 1)
///     .set("addr", "xiamen");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    entries: Vec<(String, Assign)>,
}

impl Assignments {
    /// Create an empty assignment map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a field: `field = ?`.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((field.into(), Assign::Set(value.into())));
        self
    }

    /// Increment a field: `field = field + ?`.
    pub fn increment(mut self, field: impl Into<String>, amount: impl Into<Value>) -> Self {
        self.entries.push((field.into(), Assign::Add(amount.into())));
        self
    }

    /// Whether the map has no assignments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The ordered assignment entries.
    pub fn entries(&self) -> &[(String, Assign)] {
        &self.entries
    }
}
