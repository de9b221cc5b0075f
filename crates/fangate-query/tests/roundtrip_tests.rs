use fangate_core::types::{CollectionTarget, ResultLimit, SearchMode, SearchQuery};
use fangate_query::{
    build_collection_query, check_mode_markers, extract_limit, extract_query_text,
    extract_vector, FieldSelection,
};

fn fields() -> FieldSelection {
    FieldSelection {
        properties: vec!["title".to_string(), "lyrics".to_string()],
        return_fields: vec![
            "title".to_string(),
            "artist".to_string(),
            "year".to_string(),
        ],
    }
}

#[test]
fn keyword_build_round_trips_text_and_limit() {
    let q = SearchQuery::new(
        "love and heartbreak",
        ResultLimit::new(10).expect("limit"),
        SearchMode::Keyword,
    )
    .expect("query");
    let target = CollectionTarget::new("SongLyrics_50k").expect("name");
    let built = build_collection_query(&q, &target, &fields());

    assert_eq!(extract_query_text(&built.graphql).as_deref(), Some("love and heartbreak"));
    assert_eq!(extract_limit(&built.graphql), Some(10));
    assert_eq!(extract_vector(&built.graphql), None);
}

#[test]
fn blended_build_round_trips_vector_exactly() {
    let vector = vec![0.1, 0.2, 0.3, -0.4, 0.5];
    let mode = SearchMode::from_parts(Some(0.9), Some(vector.clone()), false).expect("mode");
    let q = SearchQuery::new("desert blues", ResultLimit::new(200).expect("limit"), mode)
        .expect("query");
    let target = CollectionTarget::new("SongLyrics").expect("name");
    let built = build_collection_query(&q, &target, &fields());

    assert_eq!(extract_query_text(&built.graphql).as_deref(), Some("desert blues"));
    assert_eq!(extract_limit(&built.graphql), Some(200));
    assert_eq!(extract_vector(&built.graphql), Some(vector));
}

#[test]
fn escaped_text_round_trips_to_the_original() {
    let original = r#"a "quoted" phrase with a \ backslash"#;
    let q = SearchQuery::new(original, ResultLimit::default(), SearchMode::Keyword)
        .expect("query");
    let target = CollectionTarget::new("SongLyrics").expect("name");
    let built = build_collection_query(&q, &target, &fields());
    assert_eq!(extract_query_text(&built.graphql).as_deref(), Some(original));
}

#[test]
fn every_mode_passes_its_marker_check_for_every_target() {
    let targets = ["SongLyrics", "SongLyrics_400k", "SongLyrics_10k"];
    let keyword = SearchQuery::new("q", ResultLimit::default(), SearchMode::Keyword)
        .expect("query");
    let blended_mode =
        SearchMode::from_parts(Some(0.5), Some(vec![1.0, 2.0]), false).expect("mode");
    let blended = SearchQuery::new("q", ResultLimit::default(), blended_mode).expect("query");

    for name in targets {
        let target = CollectionTarget::new(name).expect("name");
        let built = build_collection_query(&keyword, &target, &fields());
        check_mode_markers(&built, &keyword.mode).expect("keyword marker check");
        let built = build_collection_query(&blended, &target, &fields());
        check_mode_markers(&built, &blended.mode).expect("blended marker check");
    }
}
