//! SELECT statement assembly.

use tracing::debug;

use crate::ast::{Column, Limit, SelectQuery};
use crate::error::{SphinxqlError, SphinxqlResult};
use crate::escape::Escaper;
use crate::render::conditions::{Binder, compile_condition};

/// Assemble the full statement in fixed clause order.
pub fn build_select(query: &SelectQuery, escaper: &dyn Escaper) -> SphinxqlResult<String> {
    if let (Some(offset), Some(Limit::Paged { offset: limit_offset, count })) =
        (query.offset, query.limit)
    {
        return Err(SphinxqlError::ConflictingPaging {
            offset,
            limit_offset,
            limit_count: count,
        });
    }

    let mut sql = String::from("SELECT ");
    sql.push_str(&columns_clause(&query.columns));

    if !query.indices.is_empty() {
        sql.push_str(" FROM ");
        sql.push_str(&query.indices.join(", "));
    }

    let wheres = where_clause(query, escaper)?;
    if !wheres.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&wheres);
    }

    if let Some(group) = &query.group_by {
        sql.push_str(" GROUP BY ");
        sql.push_str(group);
    }

    if let Some(order) = &query.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(order);
    }

    if let Some(order) = &query.group_order_by {
        sql.push_str(" WITHIN GROUP ORDER BY ");
        sql.push_str(order);
    }

    match query.limit {
        Some(Limit::Count(count)) => sql.push_str(&format!(" LIMIT {}", count)),
        Some(Limit::Paged { offset, count }) => {
            sql.push_str(&format!(" LIMIT {},{}", offset, count))
        }
        None => {}
    }

    if let Some(offset) = query.offset {
        sql.push_str(&format!(" OFFSET {}", offset));
    }

    if !query.options.is_empty() {
        let opts: Vec<String> = query
            .options
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        sql.push_str(" OPTION ");
        sql.push_str(&opts.join(", "));
    }

    debug!(statement = %sql, "rendered sphinxql select");
    Ok(sql)
}

/// Flatten column entries, drop empty tokens, default to `*`.
fn columns_clause(columns: &[Column]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|c| c.to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if cols.is_empty() {
        "*".to_string()
    } else {
        cols.join(", ")
    }
}

/// Match fragments first, then compiled conditions in append order.
/// Fragments that compile to empty text are dropped before joining.
fn where_clause(query: &SelectQuery, escaper: &dyn Escaper) -> SphinxqlResult<String> {
    let mut binder = Binder::new(&query.bindings);

    let mut fragments: Vec<String> = query
        .match_terms
        .iter()
        .map(|term| format!("MATCH('{}')", escaper.escape_match(term)))
        .collect();

    for condition in &query.conditions {
        let fragment = compile_condition(condition, &mut binder, escaper)?;
        if !fragment.is_empty() {
            fragments.push(fragment);
        }
    }

    Ok(fragments.join(" AND "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::builders::{attr, between, eq, is_in, range, template};
    use crate::ast::{Column, SelectQuery};
    use crate::escape::SphinxEscaper;

    fn render(query: &SelectQuery) -> SphinxqlResult<String> {
        build_select(query, &SphinxEscaper)
    }

    #[test]
    fn test_select_star_default() {
        let query = SelectQuery::new().from(["products"]);
        assert_eq!(render(&query).unwrap(), "SELECT * FROM products");
    }

    #[test]
    fn test_select_without_indices() {
        let query = SelectQuery::new();
        assert_eq!(render(&query).unwrap(), "SELECT *");
    }

    #[test]
    fn test_columns_and_aliases() {
        let query = SelectQuery::new()
            .columns(["id", "title"])
            .column(Column::aliased("weight()", "w"))
            .from(["products"]);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT id, title, weight() AS `w` FROM products"
        );
    }

    #[test]
    fn test_empty_column_tokens_dropped() {
        let query = SelectQuery::new().columns(["", ""]).from(["products"]);
        assert_eq!(render(&query).unwrap(), "SELECT * FROM products");
    }

    #[test]
    fn test_match_terms_come_first() {
        let query = SelectQuery::new()
            .from(["products"])
            .matching("foo")
            .matching("bar")
            .filter(eq("class_id", 4));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE MATCH('foo') AND MATCH('bar') AND class_id = 4"
        );
    }

    #[test]
    fn test_match_term_escaped() {
        let query = SelectQuery::new().from(["products"]).matching("c@t-5");
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE MATCH('c\\@t\\-5')"
        );
    }

    #[test]
    fn test_match_term_quote_cannot_close_literal() {
        let query = SelectQuery::new().from(["products"]).matching("o'brien");
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE MATCH('o\\'brien')"
        );
    }

    #[test]
    fn test_eq_with_string_value_is_escaped() {
        let query = SelectQuery::new().from(["products"]).filter(eq("name", "bob"));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE name = 'bob'"
        );
    }

    #[test]
    fn test_template_binding() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(template("attr != :v"))
            .bind("v", 5);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE attr != 5"
        );
    }

    #[test]
    fn test_consumed_binding_not_rerendered_as_attribute() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(template("attr != :v"))
            .filter(attr("v", 9))
            .bind("v", 5);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE attr != 5"
        );
    }

    #[test]
    fn test_in_set() {
        let query = SelectQuery::new().from(["products"]).filter(is_in("id", [1, 2, 3]));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE id IN (1, 2, 3)"
        );
    }

    #[test]
    fn test_in_set_of_strings_escaped() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(is_in("tag", ["a'b", "c"]));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE tag IN ('a\\'b', 'c')"
        );
    }

    #[test]
    fn test_closed_range_renders_between() {
        let query = SelectQuery::new().from(["products"]).filter(between("kine", 3.0, 4.0));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE kine BETWEEN 3.0 AND 4.0"
        );
    }

    #[test]
    fn test_half_open_range_renders_pair() {
        let query = SelectQuery::new().from(["products"]).filter(range("kine", 3.0, 4.0));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE kine >= 3.0 AND kine < 4.0"
        );
    }

    #[test]
    fn test_range_shape_inference() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(attr("kine", 3.0..4.0))
            .filter(attr("lat", 1..=5));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE kine >= 3.0 AND kine < 4.0 AND lat BETWEEN 1 AND 5"
        );
    }

    #[test]
    fn test_numeric_equality() {
        let query = SelectQuery::new().from(["products"]).filter(eq("class_id", 4));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE class_id = 4"
        );
    }

    #[test]
    fn test_attribute_operator_template() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(attr("lng", "> :lngval"))
            .bind("lngval", 2.8173);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE lng > 2.8173"
        );
    }

    #[test]
    fn test_missing_binding_aborts_render() {
        let query = SelectQuery::new().from(["products"]).filter(template("a = :missing"));
        let err = render(&query).unwrap_err();
        assert!(matches!(err, SphinxqlError::MissingBinding { .. }));
    }

    #[test]
    fn test_empty_conditions_leave_no_stray_and() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(is_in("id", Vec::<i64>::new()))
            .filter(eq("class_id", 4))
            .filter(is_in("tag", Vec::<i64>::new()));
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products WHERE class_id = 4"
        );
    }

    #[test]
    fn test_all_conditions_empty_omits_where() {
        let query = SelectQuery::new()
            .from(["products"])
            .filter(is_in("id", Vec::<i64>::new()));
        assert_eq!(render(&query).unwrap(), "SELECT * FROM products");
    }

    #[test]
    fn test_grouping_and_ordering_clause_order() {
        let query = SelectQuery::new()
            .from(["products"])
            .group_by("class_id")
            .order_by("created_at DESC")
            .group_order_by("weight() DESC");
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products GROUP BY class_id ORDER BY created_at DESC \
             WITHIN GROUP ORDER BY weight() DESC"
        );
    }

    #[test]
    fn test_limit_forms() {
        let query = SelectQuery::new().from(["products"]).limit(5);
        assert_eq!(render(&query).unwrap(), "SELECT * FROM products LIMIT 5");

        let query = SelectQuery::new().from(["products"]).limit((10, 5));
        assert_eq!(render(&query).unwrap(), "SELECT * FROM products LIMIT 10,5");
    }

    #[test]
    fn test_offset_with_scalar_limit() {
        let query = SelectQuery::new().from(["products"]).limit(5).offset(20);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products LIMIT 5 OFFSET 20"
        );
    }

    #[test]
    fn test_offset_with_paged_limit_is_an_error() {
        let query = SelectQuery::new().from(["products"]).limit((10, 5)).offset(20);
        let err = render(&query).unwrap_err();
        assert!(matches!(err, SphinxqlError::ConflictingPaging { .. }));
    }

    #[test]
    fn test_options_render_in_insertion_order() {
        let query = SelectQuery::new()
            .from(["products"])
            .with_options([("ranker", "bm25")])
            .with_option("max_matches", 1000);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT * FROM products OPTION ranker=bm25, max_matches=1000"
        );
    }

    #[test]
    fn test_render_is_pure() {
        let query = SelectQuery::new()
            .from(["products"])
            .matching("foo")
            .filter(template("attr != :v"))
            .filter(attr("v", 9))
            .bind("v", 5)
            .limit(5);
        let first = render(&query).unwrap();
        let second = render(&query).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_statement() {
        let query = SelectQuery::new()
            .columns(["id", "title"])
            .column(Column::aliased("weight()", "w"))
            .from(["products", "products_delta"])
            .matching("sphinx")
            .filter(is_in("id", [1, 2, 3]))
            .filter(attr("lng", "> :lngval"))
            .bind("lngval", 2.8173)
            .group_by("class_id")
            .order_by("w DESC")
            .limit(20)
            .with_options([("ranker", "bm25")]);
        assert_eq!(
            render(&query).unwrap(),
            "SELECT id, title, weight() AS `w` FROM products, products_delta \
             WHERE MATCH('sphinx') AND id IN (1, 2, 3) AND lng > 2.8173 \
             GROUP BY class_id ORDER BY w DESC LIMIT 20 OPTION ranker=bm25"
        );
    }
}
