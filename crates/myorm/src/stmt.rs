//! Pure statement builders.
//!
//! Every function here is a deterministic, side-effect-free translation from
//! structured inputs to SQL text plus a positional argument list. Nothing in
//! this module touches a connection; execution lives in [`crate::client`].
//!
//! Condition *values* are always bound through `?` placeholders. Table and
//! field identifiers are interpolated verbatim and must come from trusted
//! callers.

use crate::condition::{Cond, Op, Where};
use crate::order::OrderBy;
use crate::record::{Assign, Assignments};
use mysql_async::Value;

/// SQL text paired with its positional arguments.
///
/// Invariant: the number of `?` placeholders in `sql` equals `args.len()`,
/// and their left-to-right order matches the argument order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub args: Vec<Value>,
}

impl Fragment {
    fn new(sql: String, args: Vec<Value>) -> Self {
        Self { sql, args }
    }
}

/// Build an INSERT statement.
///
/// The single `?` is later bound to a whole [`crate::Record`]:
///
/// ```ignore
/// assert_eq!(myorm::stmt::insert("users"), "insert into users set ?");
/// ```
pub fn insert(table: &str) -> String {
    format!("insert into {table} set ?")
}

/// Build a batch INSERT statement.
///
/// The single `?` is later bound to a sequence of row-value sequences.
///
/// ```ignore
/// assert_eq!(
///     myorm::stmt::batch_insert("users", &["name", "age"]),
///     "insert into users (name,age) values ?",
/// );
/// ```
pub fn batch_insert(table: &str, fields: &[&str]) -> String {
    format!("insert into {table} ({}) values ?", fields.join(","))
}

/// Build a REPLACE statement, same binding semantics as [`insert`].
pub fn replace(table: &str) -> String {
    format!("replace into {table} set ?")
}

/// Build a SELECT statement.
///
/// Fields are joined with `", "`. Clause order is fixed: `where`, then
/// `order by`, then `limit`. An empty filter or ordering contributes no
/// clause; a zero limit is treated as absent.
pub fn select(
    table: &str,
    fields: &[&str],
    filter: &Where,
    limit: Option<u64>,
    order: &OrderBy,
) -> Fragment {
    let mut sql = format!("select {} from {table}", fields.join(", "));
    let mut args = Vec::new();
    if let Some(w) = where_clause(filter) {
        sql.push(' ');
        sql.push_str(&w.sql);
        args.extend(w.args);
    }
    if let Some(o) = order_clause(order) {
        sql.push(' ');
        sql.push_str(&o);
    }
    if let Some(n) = limit.filter(|n| *n > 0) {
        sql.push_str(&format!(" limit {n}"));
    }
    Fragment::new(sql, args)
}

/// Build an UPDATE statement.
///
/// Assignment clauses appear in the map's insertion order; assignment args
/// come first, condition args after. An empty assignment map still emits the
/// bare `set` keyword rather than failing; the malformed statement is
/// rejected by the server at execution time.
pub fn update(table: &str, values: &Assignments, filter: &Where) -> Fragment {
    let mut sql = format!("update {table} set");
    let mut args = Vec::new();
    if !values.is_empty() {
        let parts: Vec<String> = values
            .entries()
            .iter()
            .map(|(field, assign)| match assign {
                Assign::Set(_) => format!("{field} = ?"),
                Assign::Add(_) => format!("{field} = {field} + ?"),
            })
            .collect();
        sql.push(' ');
        sql.push_str(&parts.join(", "));
        args.extend(values.entries().iter().map(|(_, assign)| match assign {
            Assign::Set(v) | Assign::Add(v) => v.clone(),
        }));
    }
    if let Some(w) = where_clause(filter) {
        sql.push(' ');
        sql.push_str(&w.sql);
        args.extend(w.args);
    }
    Fragment::new(sql, args)
}

/// Build a DELETE statement.
pub fn delete(table: &str, filter: &Where, limit: Option<u64>) -> Fragment {
    let mut sql = format!("delete from {table}");
    let mut args = Vec::new();
    if let Some(w) = where_clause(filter) {
        sql.push(' ');
        sql.push_str(&w.sql);
        args.extend(w.args);
    }
    if let Some(n) = limit.filter(|n| *n > 0) {
        sql.push_str(&format!(" limit {n}"));
    }
    Fragment::new(sql, args)
}

/// Build an increment UPDATE: `update <t> set <f> = <f> + ? where ...`.
///
/// The amount is always the first argument.
pub fn increment(table: &str, field: &str, amount: impl Into<Value>, filter: &Where) -> Fragment {
    let mut sql = format!("update {table} set {field} = {field} + ?");
    let mut args = vec![amount.into()];
    if let Some(w) = where_clause(filter) {
        sql.push(' ');
        sql.push_str(&w.sql);
        args.extend(w.args);
    }
    Fragment::new(sql, args)
}

/// Build a `where ...` fragment from a filter.
///
/// Returns `None` for an empty filter; callers omit the clause entirely
/// rather than emitting an always-true `where`. Fields are processed in
/// insertion order and joined with `" and "`.
///
/// Inside one field's operator list, [`Op::In`] emits its clause and stops
/// processing the remaining operators of that field. An `In` with an empty
/// list contributes no clause but still short-circuits.
pub fn where_clause(filter: &Where) -> Option<Fragment> {
    if filter.is_empty() {
        return None;
    }
    let mut clauses = Vec::new();
    let mut args = Vec::new();
    for (field, cond) in filter.entries() {
        match cond {
            Cond::Value(v) => {
                clauses.push(format!("{field} = ?"));
                args.push(v.clone());
            }
            Cond::Ops(ops) => {
                for op in ops {
                    match op {
                        Op::In(values) => {
                            if let Some(frag) = in_clause(values.iter().cloned()) {
                                clauses.push(format!("{field} {}", frag.sql));
                                args.extend(frag.args);
                            }
                            break;
                        }
                        Op::Eq(v) => {
                            clauses.push(format!("{field} = ?"));
                            args.push(v.clone());
                        }
                        Op::Ne(v) => {
                            clauses.push(format!("{field} != ?"));
                            args.push(v.clone());
                        }
                        Op::Gt(v) => {
                            clauses.push(format!("{field} > ?"));
                            args.push(v.clone());
                        }
                        Op::Gte(v) => {
                            clauses.push(format!("{field} >= ?"));
                            args.push(v.clone());
                        }
                        Op::Lt(v) => {
                            clauses.push(format!("{field} < ?"));
                            args.push(v.clone());
                        }
                        Op::Lte(v) => {
                            clauses.push(format!("{field} <= ?"));
                            args.push(v.clone());
                        }
                        Op::Like(v) => {
                            clauses.push(format!("{field} like ?"));
                            args.push(v.clone());
                        }
                    }
                }
            }
        }
    }
    if clauses.is_empty() {
        return None;
    }
    Some(Fragment::new(
        format!("where {}", clauses.join(" and ")),
        args,
    ))
}

/// Build an `in (?,?,...)` fragment with one placeholder per element.
///
/// Returns `None` for an empty sequence. Args are the elements unchanged,
/// in order.
pub fn in_clause<I>(values: I) -> Option<Fragment>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let args: Vec<Value> = values.into_iter().map(Into::into).collect();
    if args.is_empty() {
        return None;
    }
    let placeholders = vec!["?"; args.len()].join(",");
    Some(Fragment::new(format!("in ({placeholders})"), args))
}

/// Build an `order by ...` clause.
///
/// Returns `None` for an empty ordering. Fields appear in insertion order,
/// joined with `,` (no space, by contract).
pub fn order_clause(order: &OrderBy) -> Option<String> {
    if order.is_empty() {
        return None;
    }
    let parts: Vec<String> = order
        .entries()
        .iter()
        .map(|(field, dir)| format!("{field} {}", dir.token()))
        .collect();
    Some(format!("order by {}", parts.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        sql.matches('?').count()
    }

    #[test]
    fn insert_binds_whole_row() {
        assert_eq!(insert("users"), "insert into users set ?");
        assert_eq!(replace("users"), "replace into users set ?");
    }

    #[test]
    fn batch_insert_lists_fields() {
        assert_eq!(
            batch_insert("users", &["name", "age", "addr"]),
            "insert into users (name,age,addr) values ?"
        );
    }

    #[test]
    fn scalar_conditions_become_equality() {
        let w = Where::new().eq("name", "bruce").eq("age", 30);
        let frag = where_clause(&w).unwrap();
        assert_eq!(frag.sql, "where name = ? and age = ?");
        assert_eq!(frag.args, vec![Value::from("bruce"), Value::from(30)]);
    }

    #[test]
    fn empty_filter_yields_no_clause() {
        assert_eq!(where_clause(&Where::new()), None);
    }

    #[test]
    fn operator_conditions() {
        let w = Where::new().ops("age", [Op::gte(18), Op::lt(60)]);
        let frag = where_clause(&w).unwrap();
        assert_eq!(frag.sql, "where age >= ? and age < ?");
        assert_eq!(frag.args, vec![Value::from(18), Value::from(60)]);
    }

    #[test]
    fn in_takes_precedence_and_drops_later_operators() {
        let w = Where::new().ops("id", [Op::in_list([1, 2]), Op::gt(5)]);
        let frag = where_clause(&w).unwrap();
        assert_eq!(frag.sql, "where id in (?,?)");
        assert_eq!(frag.args, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn operators_before_in_still_emit() {
        let w = Where::new().ops("id", [Op::gt(5), Op::in_list([1, 2]), Op::lt(9)]);
        let frag = where_clause(&w).unwrap();
        assert_eq!(frag.sql, "where id > ? and id in (?,?)");
        assert_eq!(frag.args, vec![Value::from(5), Value::from(1), Value::from(2)]);
    }

    #[test]
    fn empty_in_list_contributes_nothing() {
        let w = Where::new().op("id", Op::in_list(Vec::<i32>::new()));
        assert_eq!(where_clause(&w), None);

        // still short-circuits the rest of that field's operators
        let w = Where::new()
            .ops("id", [Op::in_list(Vec::<i32>::new()), Op::gt(5)])
            .eq("name", "bruce");
        let frag = where_clause(&w).unwrap();
        assert_eq!(frag.sql, "where name = ?");
        assert_eq!(frag.args, vec![Value::from("bruce")]);
    }

    #[test]
    fn in_clause_golden() {
        assert_eq!(in_clause(Vec::<i32>::new()), None);
        let frag = in_clause([1, 3, 5]).unwrap();
        assert_eq!(frag.sql, "in (?,?,?)");
        assert_eq!(
            frag.args,
            vec![Value::from(1), Value::from(3), Value::from(5)]
        );
    }

    #[test]
    fn order_clause_golden() {
        assert_eq!(order_clause(&OrderBy::new()), None);
        assert_eq!(
            order_clause(&OrderBy::new().by("username", "desc")).unwrap(),
            "order by username desc"
        );
        assert_eq!(
            order_clause(&OrderBy::new().by("username", "down")).unwrap(),
            "order by username asc"
        );
        assert_eq!(
            order_clause(&OrderBy::new().desc("age").asc("name")).unwrap(),
            "order by age desc,name asc"
        );
    }

    #[test]
    fn select_golden() {
        let frag = select(
            "myTable",
            &["name", "age", "addr"],
            &Where::new().op("id", Op::in_list([1, 3, 5])),
            None,
            &OrderBy::new().desc("age"),
        );
        assert_eq!(
            frag.sql,
            "select name, age, addr from myTable where id in (?,?,?) order by age desc"
        );
        assert_eq!(
            frag.args,
            vec![Value::from(1), Value::from(3), Value::from(5)]
        );
    }

    #[test]
    fn select_clause_order_is_where_order_limit() {
        let frag = select(
            "t",
            &["a"],
            &Where::new().eq("b", 1),
            Some(10),
            &OrderBy::new().asc("a"),
        );
        assert_eq!(frag.sql, "select a from t where b = ? order by a asc limit 10");
    }

    #[test]
    fn select_without_clauses() {
        let frag = select("t", &["a", "b"], &Where::new(), None, &OrderBy::new());
        assert_eq!(frag.sql, "select a, b from t");
        assert!(frag.args.is_empty());
    }

    #[test]
    fn update_golden() {
        let frag = update(
            "myTable",
            &Assignments::new().increment("age", 1).set("addr", "xiamen"),
            &Where::new().eq("id", 1),
        );
        assert_eq!(
            frag.sql,
            "update myTable set age = age + ?, addr = ? where id = ?"
        );
        assert_eq!(
            frag.args,
            vec![Value::from(1), Value::from("xiamen"), Value::from(1)]
        );
    }

    #[test]
    fn update_with_empty_values_keeps_bare_set() {
        let frag = update("t", &Assignments::new(), &Where::new().eq("id", 1));
        assert_eq!(frag.sql, "update t set where id = ?");
        assert_eq!(frag.args, vec![Value::from(1)]);
    }

    #[test]
    fn delete_golden() {
        let frag = delete("myTable", &Where::new().eq("name", "bruce"), Some(5));
        assert_eq!(frag.sql, "delete from myTable where name = ? limit 5");
        assert_eq!(frag.args, vec![Value::from("bruce")]);
    }

    #[test]
    fn delete_without_filter_or_limit() {
        let frag = delete("t", &Where::new(), None);
        assert_eq!(frag.sql, "delete from t");
        assert!(frag.args.is_empty());
    }

    #[test]
    fn increment_amount_is_first_arg() {
        let frag = increment("counters", "hits", 3, &Where::new().eq("id", 7));
        assert_eq!(frag.sql, "update counters set hits = hits + ? where id = ?");
        assert_eq!(frag.args, vec![Value::from(3), Value::from(7)]);
    }

    #[test]
    fn placeholder_count_matches_args() {
        let cases = vec![
            select(
                "t",
                &["a"],
                &Where::new()
                    .eq("x", 1)
                    .ops("y", [Op::gte(2), Op::lte(3)])
                    .op("z", Op::in_list(["a", "b", "c"])),
                Some(4),
                &OrderBy::new().desc("a"),
            ),
            update(
                "t",
                &Assignments::new().set("a", 1).increment("b", 2),
                &Where::new().op("c", Op::ne(3)),
            ),
            delete("t", &Where::new().op("a", Op::like("%x%")), None),
            increment("t", "n", 1, &Where::new()),
        ];
        for frag in cases {
            assert_eq!(placeholders(&frag.sql), frag.args.len(), "{}", frag.sql);
        }
    }
}
