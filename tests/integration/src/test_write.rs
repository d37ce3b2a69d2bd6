//! Table management and item writes against the in-memory store.

#[cfg(test)]
mod tests {
    use dsql_core::{DsqlConfig, Value};

    use crate::{connect, drain, test_table_name, text};

    #[test]
    fn test_should_create_table_with_throughput() {
        let (conn, store) = connect(DsqlConfig::default());
        let table = test_table_name("users");

        let rows = conn
            .query(
                &format!("create table {table} (id number hash, name string) with (read = 5, write = 2);"),
                &[],
            )
            .unwrap();
        assert!(rows.columns().is_empty());

        let (target, body) = store.requests().pop().unwrap();
        assert_eq!(target, "DynamoDB_20120810.CreateTable");
        assert_eq!(
            body,
            serde_json::json!({
                "TableName": table,
                "AttributeDefinitions": [
                    {"AttributeName": "id", "AttributeType": "N"},
                    {"AttributeName": "name", "AttributeType": "S"}
                ],
                "KeySchema": [{"AttributeName": "id", "KeyType": "HASH"}],
                "ProvisionedThroughput": {"ReadCapacityUnits": 5, "WriteCapacityUnits": 2}
            })
        );
    }

    #[test]
    fn test_should_insert_update_and_delete_item() {
        let (conn, store) = connect(DsqlConfig::default());
        let table = test_table_name("users");
        conn.query(&format!("create table {table} (id number hash)"), &[])
            .unwrap();

        conn.query(
            &format!(r#"insert into {table} (id, name) values (1, "ann")"#),
            &[],
        )
        .unwrap();
        assert_eq!(store.item_count(&table), 1);

        conn.query(
            &format!("update {table} set name = 'bea', age = 30 where id = 1"),
            &[],
        )
        .unwrap();
        let (_, body) = store.requests().pop().unwrap();
        assert_eq!(
            body["AttributeUpdates"]["name"],
            serde_json::json!({"Value": {"S": "bea"}, "Action": "PUT"})
        );

        let mut rows = conn
            .query(&format!("select name, age from {table} where id = 1"), &[])
            .unwrap();
        assert_eq!(drain(&mut rows), vec![vec![text("bea"), Value::Int(30)]]);

        conn.query(&format!("delete from {table} where id = 1;"), &[])
            .unwrap();
        assert_eq!(store.item_count(&table), 0);
        let (target, body) = store.requests().pop().unwrap();
        assert_eq!(target, "DynamoDB_20120810.DeleteItem");
        assert_eq!(
            body,
            serde_json::json!({"TableName": table, "Key": {"id": {"N": "1"}}})
        );
    }

    #[test]
    fn test_should_replace_item_with_same_key() {
        let (conn, store) = connect(DsqlConfig::default());
        let table = test_table_name("users");
        conn.query(&format!("create table {table} (id number hash)"), &[])
            .unwrap();
        for name in ["a", "b"] {
            conn.query(
                &format!("insert into {table} (id, name) values (1, ?)"),
                &[name.into()],
            )
            .unwrap();
        }
        assert_eq!(store.item_count(&table), 1);
    }

    #[test]
    fn test_should_drop_table() {
        let (conn, store) = connect(DsqlConfig::default());
        let table = test_table_name("users");
        conn.query(&format!("create table {table} (id number hash)"), &[])
            .unwrap();
        conn.query(&format!("drop table {table}"), &[]).unwrap();

        let (target, body) = store.requests().pop().unwrap();
        assert_eq!(target, "DynamoDB_20120810.DeleteTable");
        assert_eq!(body, serde_json::json!({"TableName": table}));
        assert!(conn.query(&format!("drop table {table}"), &[]).is_err());
    }
}
