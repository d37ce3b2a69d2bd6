//! Error propagation through a connection.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use bytes::Bytes;
    use dsql_core::{
        BindError, Connection, DsqlConfig, DsqlError, Param, RowsError, SyntaxError, Transport,
        TransportError, Value,
    };
    use dsql_model::ServiceErrorCode;

    use crate::{connect, test_table_name};

    #[derive(Debug)]
    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, _target: &str, _body: Bytes) -> Result<Bytes, TransportError> {
            Err(TransportError::Other(anyhow!("connection refused")))
        }
    }

    #[derive(Debug)]
    struct Garbled;

    impl Transport for Garbled {
        fn send(&self, _target: &str, _body: Bytes) -> Result<Bytes, TransportError> {
            Ok(Bytes::from_static(b"<html>"))
        }
    }

    #[test]
    fn test_should_return_syntax_error_without_sending() {
        let (conn, store) = connect(DsqlConfig::default());
        let err = conn.query("selects", &[]).unwrap_err();
        assert!(matches!(
            err,
            DsqlError::Syntax(SyntaxError::UnknownStatement { .. })
        ));
        assert!(store.requests().is_empty());
    }

    #[test]
    fn test_should_report_missing_table() {
        let (conn, _store) = connect(DsqlConfig::default());
        let err = conn.query("select * from nowhere", &[]).unwrap_err();
        match err {
            DsqlError::Transport(TransportError::Service(e)) => {
                assert_eq!(e.code, ServiceErrorCode::ResourceNotFoundException);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_should_report_existing_table() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = test_table_name("dup");
        let create = format!("create table {table} (id number hash)");
        conn.query(&create, &[]).unwrap();
        let err = conn.query(&create, &[]).unwrap_err();
        assert!(matches!(
            err,
            DsqlError::Transport(TransportError::Service(ref e))
                if e.code == ServiceErrorCode::ResourceInUseException
        ));
    }

    #[test]
    fn test_should_report_bind_errors() {
        let (conn, _store) = connect(DsqlConfig::default());
        let err = conn
            .query("select * from t where id = ?", &[])
            .unwrap_err();
        assert!(matches!(
            err,
            DsqlError::Bind(BindError::MissingParameter { index: 0 })
        ));

        let err = conn
            .query("drop table t", &[Param::from(1)])
            .unwrap_err();
        assert!(matches!(err, DsqlError::Bind(BindError::ExtraParameters { .. })));
    }

    #[test]
    fn test_should_propagate_transport_failure() {
        let conn = Connection::new(Arc::new(Unreachable), DsqlConfig::default());
        let err = conn.query("drop table t", &[]).unwrap_err();
        assert!(matches!(err, DsqlError::Transport(TransportError::Other(_))));
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_should_report_undecodable_response() {
        let conn = Connection::new(Arc::new(Garbled), DsqlConfig::default());
        let err = conn.query("select * from t", &[]).unwrap_err();
        assert!(matches!(err, DsqlError::Codec(_)));
    }

    #[test]
    fn test_should_fail_rows_on_bad_number_when_strict() {
        let config = DsqlConfig {
            strict_numbers: true,
            ..DsqlConfig::default()
        };
        let (conn, _store) = connect(config);
        let table = test_table_name("nums");
        conn.query(&format!("create table {table} (id number hash)"), &[])
            .unwrap();
        conn.query(
            &format!("insert into {table} (id, score) values (1, 2.5)"),
            &[],
        )
        .unwrap();

        let mut rows = conn
            .query(&format!("select score from {table} where id = 1"), &[])
            .unwrap();
        let mut buf = vec![Value::Null];
        assert!(matches!(
            rows.advance(&mut buf),
            Err(RowsError::InvalidNumber { ref text, .. }) if text == "2.5"
        ));
    }

    #[test]
    fn test_should_coerce_bad_number_when_lenient() {
        let (conn, _store) = connect(DsqlConfig::default());
        let table = test_table_name("nums");
        conn.query(&format!("create table {table} (id number hash)"), &[])
            .unwrap();
        conn.query(
            &format!("insert into {table} (id, score) values (1, 2.5)"),
            &[],
        )
        .unwrap();

        let mut rows = conn
            .query(&format!("select score from {table} where id = 1"), &[])
            .unwrap();
        let mut buf = vec![Value::Null];
        rows.advance(&mut buf).unwrap();
        assert_eq!(buf, vec![Value::Int(0)]);
    }
}
