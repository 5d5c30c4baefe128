//! Normalized query results.

use mysql_async::Value;
use std::sync::Arc;

/// One result row: column names plus values, positionally aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row from a shared column list and its values.
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Look up a value by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.values.get(idx))
    }

    /// The column names, in result-set order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The values, in result-set order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the row, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// The normalized outcome of one statement execution.
///
/// `rows` and `fields` carry the result set (empty for mutations);
/// `affected_rows` and `last_insert_id` carry the mutation metadata the
/// server reported. Nothing is reshaped beyond this normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutput {
    /// Result rows, possibly empty
    pub rows: Vec<Row>,
    /// Column names of the result set (empty when there are no rows)
    pub fields: Vec<String>,
    /// Rows affected by a mutation
    pub affected_rows: u64,
    /// Server-assigned id of the last inserted row, if any
    pub last_insert_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_column_name() {
        let columns = Arc::new(vec!["id".to_string(), "name".to_string()]);
        let row = Row::new(columns, vec![Value::from(7), Value::from("bruce")]);
        assert_eq!(row.get("id"), Some(&Value::from(7)));
        assert_eq!(row.get("name"), Some(&Value::from("bruce")));
        assert_eq!(row.get("missing"), None);
    }
}
