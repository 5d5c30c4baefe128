//! Statement argument binding and pre-execution expansion.
//!
//! The builders in [`crate::stmt`] emit `insert into t set ?` and
//! `insert into t (...) values ?` with the whole row (or row batch) as a
//! single bound parameter. `mysql_async` binds scalars only, so [`expand`]
//! rewrites those statements into plain positional form before they reach a
//! connection. Expansion is pure and happens before any I/O.

use crate::record::Record;
use mysql_async::Value;

/// Arguments bound to one statement execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BindArgs {
    /// No bound arguments
    #[default]
    None,
    /// Plain positional arguments, one per `?`
    Positional(Vec<Value>),
    /// A whole row bound to the single `?` of a `set ?` statement
    Record(Record),
    /// A row batch bound to the single `?` of a `values ?` statement
    Rows(Vec<Vec<Value>>),
}

impl From<Vec<Value>> for BindArgs {
    fn from(args: Vec<Value>) -> Self {
        BindArgs::Positional(args)
    }
}

impl From<Record> for BindArgs {
    fn from(record: Record) -> Self {
        BindArgs::Record(record)
    }
}

impl From<Vec<Vec<Value>>> for BindArgs {
    fn from(rows: Vec<Vec<Value>>) -> Self {
        BindArgs::Rows(rows)
    }
}

/// Expand row-shaped bindings into positional form.
///
/// For [`BindArgs::Record`] the first `?` in `sql` becomes
/// `f1 = ?, f2 = ?, ...`; for [`BindArgs::Rows`] it becomes
/// `(?,?,..),(?,?,..)` with row-major flattened args. Positional and empty
/// bindings pass through untouched. An empty record or batch erases the
/// placeholder; the resulting malformed statement is sent as-is and the
/// server rejects it.
pub(crate) fn expand(sql: &str, args: BindArgs) -> (String, Vec<Value>) {
    match args {
        BindArgs::None => (sql.to_string(), Vec::new()),
        BindArgs::Positional(args) => (sql.to_string(), args),
        BindArgs::Record(record) => {
            let entries = record.into_entries();
            let assignments: Vec<String> =
                entries.iter().map(|(field, _)| format!("{field} = ?")).collect();
            let sql = sql.replacen('?', &assignments.join(", "), 1);
            (sql, entries.into_iter().map(|(_, v)| v).collect())
        }
        BindArgs::Rows(rows) => {
            let groups: Vec<String> = rows
                .iter()
                .map(|row| format!("({})", vec!["?"; row.len()].join(",")))
                .collect();
            let sql = sql.replacen('?', &groups.join(","), 1);
            (sql, rows.into_iter().flatten().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt;

    #[test]
    fn positional_passes_through() {
        let (sql, args) = expand("select * from t where id = ?", vec![Value::from(1)].into());
        assert_eq!(sql, "select * from t where id = ?");
        assert_eq!(args, vec![Value::from(1)]);
    }

    #[test]
    fn record_expands_insert() {
        let record = Record::new().set("name", "bruce").set("age", 30);
        let (sql, args) = expand(&stmt::insert("users"), record.into());
        assert_eq!(sql, "insert into users set name = ?, age = ?");
        assert_eq!(args, vec![Value::from("bruce"), Value::from(30)]);
    }

    #[test]
    fn rows_expand_batch_insert() {
        let rows = vec![
            vec![Value::from("a"), Value::from(1)],
            vec![Value::from("b"), Value::from(2)],
        ];
        let (sql, args) = expand(&stmt::batch_insert("users", &["name", "age"]), rows.into());
        assert_eq!(sql, "insert into users (name,age) values (?,?),(?,?)");
        assert_eq!(
            args,
            vec![
                Value::from("a"),
                Value::from(1),
                Value::from("b"),
                Value::from(2),
            ]
        );
    }

    #[test]
    fn expansion_keeps_placeholders_aligned() {
        let record = Record::new().set("a", 1).set("b", "x").set("c", true);
        let (sql, args) = expand(&stmt::replace("t"), record.into());
        assert_eq!(sql.matches('?').count(), args.len());
    }

    #[test]
    fn empty_record_erases_placeholder() {
        let (sql, args) = expand(&stmt::insert("t"), Record::new().into());
        assert_eq!(sql, "insert into t set ");
        assert!(args.is_empty());
    }
}
