//! Placeholder numbering through the public API.

use sqlweave::{
    PlaceholderFormat, Sqlizer, StatementBuilder, Value, and, args, case, coalesce, debug_sqlizer,
    eq, exists, expr, gt, in_, not, or, select, update,
};

#[test]
fn deeply_nested_fragments_are_numbered_left_to_right() {
    let newest = select(["max(created_at)"])
        .from("orders o2")
        .where_sql("o2.user_id = ?", args![7]);
    let big_orders = select(["1"])
        .from("orders o")
        .where_sql("o.user_id = u.id", args![])
        .where_(gt("o.total", 100))
        .where_(expr("o.created_at = (?)", args![newest]));

    let (sql, args) = select(["u.id"])
        .column(coalesce(args![expr("u.nick", args![])], "anonymous"))
        .from("users u")
        .where_(or![eq("u.role", "admin"), exists(big_orders)])
        .where_(not(in_("u.id", vec![1, 2, 3])))
        .placeholder_format(PlaceholderFormat::Dollar)
        .to_sql()
        .unwrap();

    assert_eq!(
        sql,
        "SELECT u.id, COALESCE((u.nick),$1) FROM users u \
         WHERE (u.role = $2 OR EXISTS (SELECT 1 FROM orders o WHERE o.user_id = u.id \
         AND o.total > $3 AND o.created_at = (SELECT max(created_at) FROM orders o2 \
         WHERE o2.user_id = $4))) AND NOT (u.id=ANY($5))"
    );
    assert_eq!(args.len(), 5);
    assert_eq!(args[0], Value::from("anonymous"));
    assert_eq!(args[3], Value::I32(7));
}

#[test]
fn nested_statement_format_is_ignored() {
    let inner = select(["id"])
        .from("t")
        .where_sql("a = ?", args![1])
        .placeholder_format(PlaceholderFormat::AtP);
    let (sql, _) = update("u")
        .set("x", 2)
        .where_(in_("id", inner))
        .placeholder_format(PlaceholderFormat::Colon)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "UPDATE u SET x = :1 WHERE id IN (SELECT id FROM t WHERE a = :2)");
}

#[test]
fn escaped_markers_survive_every_dialect() {
    for (format, expected) in [
        (PlaceholderFormat::Question, "SELECT data ? 'k' FROM t WHERE id = ?"),
        (PlaceholderFormat::Dollar, "SELECT data ? 'k' FROM t WHERE id = $1"),
        (PlaceholderFormat::Colon, "SELECT data ? 'k' FROM t WHERE id = :1"),
        (PlaceholderFormat::AtP, "SELECT data ? 'k' FROM t WHERE id = @p1"),
    ] {
        let (sql, _) = select(["data ?? 'k'"])
            .from("t")
            .where_sql("id = ?", args![1])
            .placeholder_format(format)
            .to_sql()
            .unwrap();
        assert_eq!(sql, expected);
    }
}

#[test]
fn case_inside_statement() {
    let pg = StatementBuilder::new().placeholder_format(PlaceholderFormat::Dollar);
    let label = case()
        .when(and![gt("score", 90)], "gold")
        .else_("none");
    let (sql, args) = pg
        .select(["id"])
        .column(sqlweave::alias(label, "tier"))
        .from("players")
        .where_sql("team = ?", args!["red"])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT id, (CASE WHEN (score > $1) THEN CAST($2 AS text) ELSE $3 END) AS tier \
         FROM players WHERE team = $4"
    );
    assert_eq!(
        args,
        vec![
            Value::I32(90),
            Value::from("gold"),
            Value::from("none"),
            Value::from("red"),
        ]
    );
}

#[test]
fn debug_output_inlines_arguments() {
    let sb = select(["id"])
        .from("users")
        .where_(eq("name", "O'Brien"))
        .placeholder_format(PlaceholderFormat::Dollar);
    assert_eq!(
        debug_sqlizer(&sb),
        "SELECT id FROM users WHERE name = 'O''Brien'"
    );
}
