pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use plinth_domain::registry::{Dimension, Metadata};
    use plinth_domain::value::{ConfigMap, Value};
    use plinth_hub::{
        ComponentDescriptor, FromConfig, Hub, HubError, Registry, SharedComponent,
        discover_components, install_entry_point,
    };
    use serial_test::serial;
    use std::sync::Arc;

    #[test]
    fn higher_priority_source_wins_resolution() {
        let hub = Hub::new();
        hub.add_config_source(MapSource::new("defaults", &[("log_level", "info")]), 5);
        hub.add_config_source(MapSource::new("overrides", &[("log_level", "debug")]), 10);

        assert_eq!(hub.resolve_config_value("log_level"), Some(Value::from("debug")));
    }

    #[test]
    fn failing_source_is_skipped_during_resolution() {
        let hub = Hub::new();
        hub.add_config_source(BrokenSource, 10);
        hub.add_config_source(MapSource::new("defaults", &[("log_level", "info")]), 5);

        assert_eq!(hub.resolve_config_value("log_level"), Some(Value::from("info")));
    }

    #[test]
    fn unknown_key_resolves_to_none() {
        let hub = Hub::new();
        hub.add_config_source(MapSource::new("defaults", &[("log_level", "info")]), 5);

        assert_eq!(hub.resolve_config_value("absent"), None);
    }

    #[test]
    fn chain_orders_by_priority_then_name() {
        let hub = Hub::new();
        hub.add_config_source(MapSource::new("b", &[]), 5);
        hub.add_config_source(MapSource::new("a", &[]), 5);
        hub.add_config_source(MapSource::new("c", &[]), 10);

        let chain = hub.config_chain();
        let order: Vec<&str> = chain.iter().map(|source| source.name.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn bulk_load_lets_lowest_priority_win_collisions() {
        let hub = Hub::new();
        hub.add_config_source(
            MapSource::new("high", &[("shared", "from-high"), ("only_high", "x")]),
            10,
        );
        hub.add_async_config_source(
            AsyncMapSource::new("low", &[("shared", "from-low"), ("only_low", "y")]),
            5,
        );

        let merged = hub.load_all_configs().await;
        assert_eq!(merged.get("shared"), Some(&Value::from("from-low")));
        assert_eq!(merged.get("only_high"), Some(&Value::from("x")));
        assert_eq!(merged.get("only_low"), Some(&Value::from("y")));
    }

    #[tokio::test]
    async fn bulk_load_skips_failing_sources() {
        let hub = Hub::new();
        hub.add_config_source(BrokenSource, 10);
        hub.add_async_config_source(AsyncMapSource::new("low", &[("port", "8080")]), 5);

        let merged = hub.load_all_configs().await;
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("port"), Some(&Value::from("8080")));
    }

    #[derive(Debug)]
    struct AppSettings {
        log_level: String,
    }

    impl FromConfig for AppSettings {
        fn from_config_map(map: &ConfigMap) -> Result<Self, HubError> {
            let log_level = map
                .get("log_level")
                .and_then(Value::as_str)
                .ok_or_else(|| HubError::InvalidConfig {
                    message: "log_level is required".into(),
                    context: None,
                })?;
            Ok(Self { log_level: log_level.to_owned() })
        }
    }

    #[test]
    fn typed_load_skips_async_sources() {
        let hub = Hub::new();
        hub.add_async_config_source(AsyncMapSource::new("remote", &[("log_level", "trace")]), 10);
        hub.add_config_source(MapSource::new("local", &[("log_level", "warn")]), 5);

        let settings: AppSettings = hub.load_config_into().unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn typed_load_surfaces_invalid_config() {
        let hub = Hub::new();
        hub.add_config_source(MapSource::new("local", &[]), 5);

        let error = hub.load_config_into::<AppSettings>().unwrap_err();
        assert_eq!(error.code(), "CONFIG_INVALID");
        assert!(matches!(error, HubError::InvalidConfig { .. }));
    }

    #[test]
    fn dependencies_resolve_same_dimension_first() {
        let hub = Hub::new();
        let registry = hub.registry();
        registry.register("db", Dimension::COMPONENT, 1_u32, Metadata::default());
        registry.register("db", Dimension::COMMAND, 2_u32, Metadata::default());
        registry.register("cache", Dimension::COMMAND, 3_u32, Metadata::default());
        registry.register(
            "svc",
            Dimension::COMPONENT,
            0_u32,
            Metadata::with_dependencies(0, ["db", "cache"]),
        );

        let deps = hub.resolve_component_dependencies("svc", &Dimension::COMPONENT);
        assert_eq!(deps.len(), 2);
        assert_eq!(*deps["db"].clone().downcast::<u32>().unwrap(), 1);
        assert_eq!(*deps["cache"].clone().downcast::<u32>().unwrap(), 3);
    }

    #[test]
    fn unresolved_dependencies_are_omitted() {
        let hub = Hub::new();
        hub.registry().register(
            "svc",
            Dimension::COMPONENT,
            0_u32,
            Metadata::with_dependencies(0, ["ghost"]),
        );

        let deps = hub.resolve_component_dependencies("svc", &Dimension::COMPONENT);
        assert!(deps.is_empty());
    }

    #[test]
    fn dependencies_of_unregistered_entry_are_empty() {
        let hub = Hub::new();
        let deps = hub.resolve_component_dependencies("missing", &Dimension::COMPONENT);
        assert!(deps.is_empty());
    }

    fn answer_component() -> Result<SharedComponent, String> {
        Ok(Arc::new(41_u32))
    }

    fn failing_component() -> Result<SharedComponent, String> {
        Err("init failed".into())
    }

    #[test]
    fn discovery_registers_installed_components() {
        install_entry_point(ComponentDescriptor {
            group: "test.discovery.ok".into(),
            name: "answer".into(),
            module: module_path!().into(),
            constructor: answer_component,
        });

        let registry = Registry::new();
        let count = discover_components("test.discovery.ok", &Dimension::COMPONENT, &registry);
        assert_eq!(count, 1);

        let entry = registry.get_entry("answer", &Dimension::COMPONENT).unwrap();
        assert!(entry.metadata.discovered);
        assert_eq!(entry.metadata.entry_point.as_deref(), Some("answer"));
        assert!(entry.metadata.module.as_deref().unwrap().contains("integration"));
        assert_eq!(*registry.get_as::<u32>("answer", &Dimension::COMPONENT).unwrap(), 41);
    }

    #[test]
    fn discovery_skips_failing_constructors() {
        install_entry_point(ComponentDescriptor {
            group: "test.discovery.partial".into(),
            name: "good".into(),
            module: module_path!().into(),
            constructor: answer_component,
        });
        install_entry_point(ComponentDescriptor {
            group: "test.discovery.partial".into(),
            name: "bad".into(),
            module: module_path!().into(),
            constructor: failing_component,
        });

        let registry = Registry::new();
        let count = discover_components("test.discovery.partial", &Dimension::COMPONENT, &registry);
        assert_eq!(count, 1);
        assert!(registry.contains("good", &Dimension::COMPONENT));
        assert!(!registry.contains("bad", &Dimension::COMPONENT));
    }

    #[test]
    fn discovery_of_unknown_group_registers_nothing() {
        let registry = Registry::new();
        let count = discover_components("test.discovery.empty", &Dimension::COMPONENT, &registry);
        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }

    #[test]
    #[serial]
    fn global_hub_is_shared() {
        let dimension = Dimension::custom("integration_global");
        Hub::global()
            .registry()
            .register("probe", dimension.clone(), 9_u32, Metadata::default());

        assert!(Hub::global().registry().contains("probe", &dimension));
    }
}
