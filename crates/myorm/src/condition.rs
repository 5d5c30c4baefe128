//! Filter condition types for dynamic WHERE clauses.
//!
//! This module provides [`Op`] (operator) and [`Where`] primitives that the
//! statement builders in [`crate::stmt`] turn into `where ...` fragments
//! with aligned positional arguments.

use mysql_async::Value;

/// A single comparison operator with its bound operand.
///
/// # Example
/// ```ignore
/// use myorm::Op;
///
/// // Comparison
/// Op::gt(100)
/// Op::gte(100)
/// Op::lt(100)
/// Op::lte(100)
///
/// // Pattern matching
/// Op::like("%pattern%")
///
/// // List membership
/// Op::in_list(vec![1, 2, 3])
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Equal: field = value
    Eq(Value),
    /// Not equal: field != value
    Ne(Value),
    /// Greater than: field > value
    Gt(Value),
    /// Greater than or equal: field >= value
    Gte(Value),
    /// Less than: field < value
    Lt(Value),
    /// Less than or equal: field <= value
    Lte(Value),
    /// LIKE pattern match
    Like(Value),
    /// IN (list)
    In(Vec<Value>),
}

impl Op {
    /// Create an equality operator.
    pub fn eq(val: impl Into<Value>) -> Self {
        Op::Eq(val.into())
    }

    /// Create a not-equal operator.
    pub fn ne(val: impl Into<Value>) -> Self {
        Op::Ne(val.into())
    }

    /// Create a greater-than operator.
    pub fn gt(val: impl Into<Value>) -> Self {
        Op::Gt(val.into())
    }

    /// Create a greater-than-or-equal operator.
    pub fn gte(val: impl Into<Value>) -> Self {
        Op::Gte(val.into())
    }

    /// Create a less-than operator.
    pub fn lt(val: impl Into<Value>) -> Self {
        Op::Lt(val.into())
    }

    /// Create a less-than-or-equal operator.
    pub fn lte(val: impl Into<Value>) -> Self {
        Op::Lte(val.into())
    }

    /// Create a LIKE pattern operator.
    pub fn like(val: impl Into<Value>) -> Self {
        Op::Like(val.into())
    }

    /// Create an IN (list) operator.
    pub fn in_list<I>(vals: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Op::In(vals.into_iter().map(Into::into).collect())
    }
}

/// One field's constraint inside a [`Where`].
///
/// A bare scalar means equality; an operator list carries one or more
/// comparisons against the same field, all ANDed with the rest of the
/// filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    /// Equality shorthand: `field = ?`
    Value(Value),
    /// Explicit operator list for the field
    Ops(Vec<Op>),
}

/// An insertion-ordered filter over fields.
///
/// An empty `Where` produces no `where` clause at all; entry order
/// determines clause order in the generated SQL.
///
/// # Example
/// ```ignore
/// use myorm::{Op, Where};
///
/// let filter = Where::new()
///     .eq("status", "active")
///     .ops("age", [Op::gte(18), Op::lt(60)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    entries: Vec<(String, Cond)>,
}

impl Where {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality constraint: `field = ?`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((field.into(), Cond::Value(value.into())));
        self
    }

    /// Add a single-operator constraint.
    pub fn op(self, field: impl Into<String>, op: Op) -> Self {
        self.ops(field, [op])
    }

    /// Add a multi-operator constraint for one field.
    ///
    /// Operators are processed in the given order. An [`Op::In`] emits its
    /// clause and stops processing the remaining operators of the same
    /// field, so do not mix `In` with other operators on one field unless
    /// you want the rest dropped. This is a kept compatibility quirk.
    pub fn ops<I>(mut self, field: impl Into<String>, ops: I) -> Self
    where
        I: IntoIterator<Item = Op>,
    {
        self.entries
            .push((field.into(), Cond::Ops(ops.into_iter().collect())));
        self
    }

    /// Whether the filter has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of field entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The ordered field entries.
    pub fn entries(&self) -> &[(String, Cond)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let w = Where::new().eq("b", 1).eq("a", 2).op("c", Op::gt(3));
        let fields: Vec<&str> = w.entries().iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_filter_is_empty() {
        assert!(Where::new().is_empty());
        assert!(!Where::new().eq("id", 1).is_empty());
    }
}
