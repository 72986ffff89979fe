use std::io::Write;
use std::net::SocketAddr;

use super::*;

#[test]
fn empty_configuration_uses_defaults() {
    let configuration = validate_configuration("").expect("empty configuration is valid");
    assert_eq!(configuration.server, Server::default());
    assert_eq!(configuration.graphql, GraphQL::default());

    let configuration = validate_configuration("\n  \n").expect("blank configuration is valid");
    assert_eq!(configuration.server.path, "/");
}

#[test]
fn full_configuration() {
    let configuration: Configuration = r#"
server:
  listen: 0.0.0.0:4001
  path: /graphql
  landing_page: false
graphql:
  introspection: false
  max_depth: 8
"#
    .parse()
    .expect("configuration is valid");

    assert_eq!(
        configuration.server.listen,
        "0.0.0.0:4001".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(configuration.server.path, "/graphql");
    assert!(!configuration.server.landing_page);
    assert!(!configuration.graphql.introspection);
    assert_eq!(configuration.graphql.max_depth, Some(8));
}

#[test]
fn partial_sections_keep_their_defaults() {
    let configuration = validate_configuration("server:\n  path: /books\n")
        .expect("configuration is valid");
    assert_eq!(configuration.server.path, "/books");
    assert_eq!(
        configuration.server.listen,
        "127.0.0.1:4000".parse::<SocketAddr>().unwrap()
    );
    assert!(configuration.server.landing_page);
    assert!(configuration.graphql.introspection);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = validate_configuration("server:\n  port: 4000\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::InvalidConfiguration {
            message: "failed to parse yaml",
            ..
        }
    ));

    assert!(validate_configuration("plugins: {}\n").is_err());
}

#[test]
fn invalid_values_are_rejected() {
    assert!(validate_configuration("server:\n  listen: not-an-address\n").is_err());

    let err = validate_configuration("server:\n  path: graphql\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid 'server.path' attribute: 'graphql' must start with '/'"
    );
}

#[test]
fn configuration_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "graphql:\n  max_depth: 3").unwrap();

    let configuration = Configuration::from_file(file.path()).expect("configuration is valid");
    assert_eq!(configuration.graphql.max_depth, Some(3));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");
    let err = Configuration::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigurationError::CannotReadFile { .. }));
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn builder_matches_defaults() {
    let configuration = Configuration::builder().build();
    assert_eq!(configuration.server, Server::default());
    assert_eq!(configuration.graphql, GraphQL::default());
}

#[test]
fn schema_generation() {
    let schema = serde_json::to_value(generate_config_schema()).unwrap();
    let properties = &schema["properties"];
    assert!(properties.get("server").is_some());
    assert!(properties.get("graphql").is_some());
    assert_eq!(schema["additionalProperties"], serde_json::json!(false));
}
