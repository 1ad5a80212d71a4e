use mongo2sql::ast::Projection;
use mongo2sql::{parse, translate};
use proptest::prelude::*;

fn table_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

fn field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}"
}

proptest! {
    #[test]
    fn find_without_arguments_selects_everything(table in table_name()) {
        let sql = translate(&format!("db.{}.find();", table)).unwrap();
        prop_assert_eq!(sql, format!("SELECT * FROM {};", table));
    }

    #[test]
    fn inclusion_flags_are_always_a_projection(
        fields in prop::collection::vec((field_name(), any::<bool>()), 1..8)
    ) {
        let body: Vec<String> = fields
            .iter()
            .map(|(f, on)| format!("{}: {}", f, if *on { 1 } else { 0 }))
            .collect();
        let query = parse(&format!("db.t.find({{{}}})", body.join(", "))).unwrap();

        prop_assert!(query.filter.is_empty());
        match query.projection {
            Projection::Columns(columns) => prop_assert_eq!(columns.len(), fields.len()),
            Projection::All => prop_assert!(false, "expected a projection"),
        }
    }

    #[test]
    fn first_of_two_groups_is_the_filter(
        filter_field in field_name(),
        column in field_name(),
        value in 0u8..2,
    ) {
        let sql = translate(&format!(
            "db.t.find({{{}: {}}}, {{{}: 1}})",
            filter_field, value, column
        ))
        .unwrap();
        prop_assert_eq!(
            sql,
            format!("SELECT {} FROM t WHERE {} = {};", column, filter_field, value)
        );
    }

    #[test]
    fn no_where_without_filter(table in table_name(), column in field_name()) {
        let sql = translate(&format!("db.{}.find({{{}: 1}})", table, column)).unwrap();
        prop_assert!(!sql.contains("WHERE"));
    }
}
