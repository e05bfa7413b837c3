use fibre_autowire::{Container, ContainerConfig, DEFAULT_MAX_DEPTH};
use pretty_assertions::assert_eq;

#[test]
fn test_config_deserializes_with_defaults() {
  let empty: ContainerConfig = serde_json::from_str("{}").unwrap();
  assert_eq!(empty, ContainerConfig::default());
  assert_eq!(empty.max_depth, DEFAULT_MAX_DEPTH);

  let tuned: ContainerConfig = serde_json::from_str(r#"{ "max_depth": 8 }"#).unwrap();
  assert_eq!(tuned, ContainerConfig::new().with_max_depth(8));
}

#[test]
fn test_config_round_trips_through_container() {
  let config = ContainerConfig::new().with_max_depth(16);
  let container = Container::with_config(config.clone());

  assert_eq!(container.config(), &config);
  assert_eq!(
    serde_json::to_value(container.config()).unwrap(),
    serde_json::json!({ "max_depth": 16 })
  );
}
