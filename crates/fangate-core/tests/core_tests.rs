use figment::providers::{Format, Toml};
use figment::Figment;

use fangate_core::config::{
    resolve_with_base, BackendConfig, Config, LookupConfig, SearchConfig, ServerConfig,
};

#[test]
fn missing_sections_fall_back_to_defaults() {
    let config = Config::from_figment(Figment::new());

    let server: ServerConfig = config.section("server").expect("server");
    assert_eq!(server.port, 8000);

    let backend: BackendConfig = config.section("backend").expect("backend");
    assert_eq!(backend.url, "http://localhost:8080");
    assert_eq!(backend.timeout_secs, 30);
    assert_eq!(backend.consistency_level, "ONE");
    assert!(!backend.embeds_queries);

    let search: SearchConfig = config.section("search").expect("search");
    assert_eq!(search.collections.len(), 9);
    assert_eq!(search.default_limit, 200);
    assert_eq!(search.properties, vec!["title", "lyrics"]);

    let lookup: LookupConfig = config.section("lookup").expect("lookup");
    assert!(lookup.queries_file.is_none());
}

#[test]
fn toml_overrides_merge_over_defaults() {
    let figment = Figment::new().merge(Toml::string(
        r#"
        [backend]
        url = "http://weaviate.internal:8080"
        timeout_secs = 5

        [search]
        collections = ["Docs", "Docs_small"]
        default_limit = 50
        "#,
    ));
    let config = Config::from_figment(figment);

    let backend: BackendConfig = config.section("backend").expect("backend");
    assert_eq!(backend.url, "http://weaviate.internal:8080");
    assert_eq!(backend.timeout_secs, 5);
    // Untouched keys keep their defaults within an overridden section.
    assert_eq!(backend.consistency_level, "ONE");

    let search: SearchConfig = config.section("search").expect("search");
    let targets = search.targets().expect("valid names");
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].as_str(), "Docs");
}

#[test]
fn invalid_collection_names_are_rejected_at_load() {
    let figment = Figment::new().merge(Toml::string(
        r#"
        [search]
        collections = ["Fine", "not fine"]
        "#,
    ));
    let config = Config::from_figment(figment);
    let search: SearchConfig = config.section("search").expect("search");
    assert!(search.targets().is_err());
}

#[test]
fn empty_collection_list_is_rejected() {
    let figment = Figment::new().merge(Toml::string("[search]\ncollections = []\n"));
    let config = Config::from_figment(figment);
    let search: SearchConfig = config.section("search").expect("search");
    assert!(search.targets().is_err());
}

#[test]
fn default_limit_outside_bounds_is_rejected() {
    let figment = Figment::new().merge(Toml::string("[search]\ndefault_limit = 2000\n"));
    let config = Config::from_figment(figment);
    let search: SearchConfig = config.section("search").expect("search");
    assert!(search.targets().is_err());
}

#[test]
fn resolve_with_base_keeps_absolute_paths() {
    let base = std::path::Path::new("/srv/fangate");
    assert_eq!(
        resolve_with_base(base, "/etc/queries.json"),
        std::path::PathBuf::from("/etc/queries.json")
    );
    assert_eq!(
        resolve_with_base(base, "queries.json"),
        std::path::PathBuf::from("/srv/fangate/queries.json")
    );
}
