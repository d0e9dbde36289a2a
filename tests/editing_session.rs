//! End-to-end editing workflow: load a template, edit under end-user
//! permissions, preview against recipient data, export per row.

use greatcard::{
    BatchData, Direction, EditMode, InputContext, InputMode, LayerUpdate, LayoutStore,
    MutationOutcome, Row, StyleUpdate, TemplateDocument, resolve_cards, resolve_layer,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn load_session() -> LayoutStore {
    let doc = TemplateDocument::from_json(include_str!("data/holiday_template.json")).unwrap();
    let mut store = LayoutStore::new(EditMode::EndUser);
    store.set_layers(doc.layers).unwrap();
    store
}

#[test]
fn end_user_session_honors_locks_and_constraints() {
    init_tracing();
    let mut store = load_session();

    // The background ships locked: dragging it is a silent no-op.
    assert_eq!(
        store.update_layer("bg-1", LayerUpdate::position(50.0, 50.0)),
        MutationOutcome::Rejected
    );
    assert_eq!(store.layers()[0].x, 0.0);

    // The greeting is position-constrained but otherwise editable.
    assert_eq!(
        store.update_layer("greeting-1", LayerUpdate::position(0.0, 0.0)),
        MutationOutcome::Rejected
    );
    assert!(
        store
            .update_layer("greeting-1", LayerUpdate::content("Warm wishes, {Name}!"))
            .is_applied()
    );
    assert!(
        store
            .update_layer_style("greeting-1", StyleUpdate::color("#fde68a"))
            .is_applied()
    );

    let greeting = &store.layers()[1];
    assert_eq!((greeting.x, greeting.y), (540.0, 400.0));
    assert_eq!(greeting.content, "Warm wishes, {Name}!");
    assert_eq!(greeting.style.color.as_deref(), Some("#fde68a"));
    // Untouched style fields survive the merge.
    assert_eq!(greeting.style.font.as_deref(), Some("Playfair Display"));
}

#[test]
fn edits_undo_and_redo_across_the_session() {
    init_tracing();
    let mut store = load_session();

    assert!(
        store
            .update_layer("role-1", LayerUpdate::position(540.0, 600.0))
            .is_applied()
    );
    assert!(store.reorder("role-1", Direction::Front).is_applied());
    assert!(store.duplicate_layer("role-1").is_applied());
    assert_eq!(store.selected_id(), Some("role-1-copy"));
    let final_state = store.layers().to_vec();

    for _ in 0..3 {
        assert!(store.undo());
    }
    assert_eq!(store.layers()[2].id, "role-1");
    assert_eq!(store.layers()[2].y, 520.0);
    assert_eq!(store.selected_id(), None);

    for _ in 0..3 {
        assert!(store.redo());
    }
    assert_eq!(store.layers(), &final_state[..]);
}

#[test]
fn preview_resolves_row_zero_and_export_resolves_all_rows() {
    init_tracing();
    let store = load_session();

    let mut ctx = InputContext::new();
    ctx.set_mode(InputMode::Batch);
    ctx.set_batch_data(BatchData {
        row_count: 2,
        headers: vec!["Name".to_string(), "Position".to_string()],
        preview: vec![row(&[("Name", "Ada"), ("Position", "Engineer")])],
        rows: vec![
            row(&[("Name", "Ada"), ("Position", "Engineer")]),
            row(&[("Name", "Grace"), ("Position", "Admiral")]),
        ],
    });
    assert!(ctx.is_ready_for_resolution());

    // Editor preview always reads row 0.
    let greeting = &store.layers()[1];
    let preview = resolve_layer(greeting, &ctx);
    assert_eq!(preview.text, "Happy Holidays, Ada!");
    assert!(!preview.unresolved);

    // Export iterates every row with the same resolver.
    let cards = resolve_cards(store.layers(), &ctx);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].layers[1].content, "Happy Holidays, Ada!");
    assert_eq!(cards[1].layers[1].content, "Happy Holidays, Grace!");
    assert_eq!(cards[1].layers[2].content, "Admiral");

    // Logo URL passes through untouched.
    assert_eq!(
        cards[0].layers[3].content,
        "https://cdn.greatcard.dev/brand/acme.png"
    );
}

#[test]
fn manual_mode_with_missing_fields_keeps_tokens_visible() {
    init_tracing();
    let store = load_session();

    let mut ctx = InputContext::new();
    ctx.set_manual_field("name", "Alice");
    // "position" deliberately left unset.

    let cards = resolve_cards(store.layers(), &ctx);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].layers[1].content, "Happy Holidays, Alice!");
    assert_eq!(cards[0].layers[2].content, "{Position}");
    assert!(cards[0].unresolved);
}

#[test]
fn async_callback_mutations_use_the_same_surface() {
    init_tracing();
    // An upload completion callback is just another synchronous caller.
    let mut ctx = InputContext::new();
    let mut store = load_session();

    let uploaded = BatchData {
        row_count: 1,
        headers: vec!["Name".to_string()],
        preview: vec![row(&[("Name", "Zoe")])],
        rows: vec![row(&[("Name", "Zoe")])],
    };
    ctx.set_batch_data(uploaded);
    ctx.set_mode(InputMode::Batch);

    let rev = store.revision();
    assert!(
        store
            .update_layer(
                "logo-1",
                LayerUpdate {
                    visible: Some(false),
                    ..LayerUpdate::default()
                }
            )
            .is_applied()
    );
    assert!(store.revision() > rev);

    let cards = resolve_cards(store.layers(), &ctx);
    assert!(cards[0].layers.iter().all(|l| l.id != "logo-1"));
}
