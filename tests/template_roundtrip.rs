use greatcard::{CardError, LayoutStore, EditMode, TemplateDocument, TemplateMetadata};

#[test]
fn fixture_loads_and_round_trips() {
    let s = include_str!("data/holiday_template.json");
    let doc = TemplateDocument::from_json(s).unwrap();
    assert_eq!(doc.metadata.name, "Winter Holiday");
    assert_eq!(doc.layers.len(), 4);

    let json = doc.to_json().unwrap();
    let back = TemplateDocument::from_json(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn fixture_feeds_an_editing_session_and_saves_back() {
    let s = include_str!("data/holiday_template.json");
    let doc = TemplateDocument::from_json(s).unwrap();

    let mut store = LayoutStore::new(EditMode::Builder);
    store.set_layers(doc.layers.clone()).unwrap();
    assert_eq!(store.layers().len(), 4);

    let saved = TemplateDocument::new(
        TemplateMetadata {
            name: doc.metadata.name.clone(),
            dimensions: doc.metadata.dimensions,
            categories: doc.metadata.categories.clone(),
            version: TemplateDocument::FORMAT_VERSION.to_string(),
        },
        store.layers().to_vec(),
    )
    .unwrap();
    assert_eq!(saved.layers, doc.layers);
}

#[test]
fn foreign_files_are_rejected_loudly() {
    for bad in [
        r#"{"widgets": []}"#,
        r#"{"layers": "nope"}"#,
        r#"{"layers": 42}"#,
    ] {
        assert!(matches!(
            TemplateDocument::from_json(bad),
            Err(CardError::MalformedLayout(_))
        ));
    }
}
