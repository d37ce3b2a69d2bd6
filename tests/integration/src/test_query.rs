//! Query statements against the in-memory store.

#[cfg(test)]
mod tests {
    use dsql_core::{Connection, DsqlConfig, Param, Value};

    use crate::{connect, drain, test_table_name, text};

    /// Helper: create a message table with a composite key and a few rows.
    fn seed(conn: &Connection) -> String {
        let table = test_table_name("messages");
        conn.query(
            &format!("create table {table} (group string hash, id number range)"),
            &[],
        )
        .unwrap();
        for (group, id, body) in [("g1", 1, "hello"), ("g1", 2, "again"), ("g2", 1, "other")] {
            conn.query(
                &format!("insert into {table} (group, id, body) values (?, ?, ?)"),
                &[Param::from(group), Param::from(id), Param::from(body)],
            )
            .unwrap();
        }
        table
    }

    #[test]
    fn test_should_query_by_hash_key() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = seed(&conn);

        let mut rows = conn
            .query(&format!("select id, body from {table} where group = 'g1'"), &[])
            .unwrap();
        assert_eq!(rows.columns(), ["id", "body"]);
        assert_eq!(
            drain(&mut rows),
            vec![
                vec![Value::Int(1), text("hello")],
                vec![Value::Int(2), text("again")],
            ]
        );
    }

    #[test]
    fn test_should_union_columns_for_wildcard() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = seed(&conn);
        conn.query(
            &format!("insert into {table} (group, id, tag) values ('g1', 3, 'x')"),
            &[],
        )
        .unwrap();

        let mut rows = conn
            .query(&format!("select * from {table} where group = 'g1'"), &[])
            .unwrap();
        assert_eq!(rows.columns(), ["group", "id", "body", "tag"]);
        let all = drain(&mut rows);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0][3], Value::Null);
        assert_eq!(all[2][2], Value::Null);
        assert_eq!(all[2][3], text("x"));
    }

    #[test]
    fn test_should_apply_range_condition_and_order() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = seed(&conn);

        let mut rows = conn
            .query(
                &format!(
                    "select id from {table} where group = 'g1' and id between (1, 2) order by id desc"
                ),
                &[],
            )
            .unwrap();
        assert_eq!(drain(&mut rows), vec![vec![Value::Int(2)], vec![Value::Int(1)]]);

        let mut rows = conn
            .query(
                &format!("select id from {table} where group = 'g1' and id > 1"),
                &[],
            )
            .unwrap();
        assert_eq!(drain(&mut rows), vec![vec![Value::Int(2)]]);
    }

    #[test]
    fn test_should_honor_limit() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = seed(&conn);

        let mut rows = conn
            .query(&format!("select id from {table} limit 1 where group = 'g1'"), &[])
            .unwrap();
        assert_eq!(drain(&mut rows).len(), 1);
    }

    #[test]
    fn test_should_send_query_wire_shape() {
        let (conn, store) = connect(DsqlConfig::default());
        let table = seed(&conn);

        conn.query(&format!("select id from {table} where group = 'g2' limit 5"), &[])
            .unwrap();
        let (target, body) = store.requests().pop().unwrap();
        assert_eq!(target, "DynamoDB_20120810.Query");
        assert_eq!(
            body,
            serde_json::json!({
                "TableName": table,
                "AttributesToGet": ["id"],
                "KeyConditions": {
                    "group": {"ComparisonOperator": "EQ", "AttributeValueList": [{"S": "g2"}]}
                },
                "Limit": 5
            })
        );
    }

    #[test]
    fn test_should_repeat_end_of_data() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = seed(&conn);

        let mut rows = conn
            .query(&format!("select id from {table} where group = 'none'"), &[])
            .unwrap();
        let mut buf = vec![Value::Int(7)];
        for _ in 0..3 {
            assert_eq!(rows.advance(&mut buf).unwrap(), dsql_core::Advance::EndOfData);
        }
        assert_eq!(buf, vec![Value::Int(7)]);
        rows.close();
        rows.close();
    }

    #[test]
    fn test_should_use_custom_target_prefix() {
        let config = DsqlConfig {
            target_prefix: "DynamoDB_Local".to_owned(),
            ..DsqlConfig::default()
        };
        let (conn, store) = connect(config);
        let _ = conn.query("select * from missing", &[]);
        let requests = store.requests();
        assert_eq!(requests[0].0, "DynamoDB_Local.Query");
    }
}
