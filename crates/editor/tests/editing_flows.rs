use pageblocks_core::{
    Block, Content, Direction, EditorOptions, Family, SequentialIds, Tab, siblings, tree,
};
use pageblocks_editor::{BlockRef, DetailForm, Editor, Mode, Picker, TabEditor};
use pageblocks_render::{IdentityResolver, RenderOptions, Renderer};
use serde_json::json;

fn text(id: &str, html: &str, order: usize) -> Block {
    let mut content = Content::new();
    content.insert("html".into(), json!(html));
    Block::new(id, "TX01", content).with_order(order)
}

fn editor(blocks: Vec<Block>) -> Editor {
    Editor::with_id_source(blocks, EditorOptions::default(), SequentialIds::new("g"))
}

fn tabbed(id: &str, block_type: &str, tabs: &[(&str, Vec<Block>)]) -> Block {
    let tabs = tabs
        .iter()
        .map(|(tab, children)| Tab::new(*tab, tab.to_uppercase()).with_children(children.clone()))
        .collect();
    Block::new(id, block_type, Content::new()).with_tabs(tabs)
}

fn ids(blocks: &[Block]) -> Vec<&str> {
    blocks.iter().map(|b| b.id.as_str()).collect()
}

#[test]
fn test_remove_then_add_keeps_orders_dense() {
    let mut ed = editor(vec![text("b1", "A", 0), text("b2", "B", 1)]);

    assert!(ed.remove_block("b1"));
    assert_eq!(ids(ed.blocks()), ["b2"]);
    assert_eq!(ed.blocks()[0].order, 0);

    let added = ed.add_block(Family::Text, "TX01").unwrap();
    assert_eq!(ed.blocks().len(), 2);
    assert_eq!(ed.blocks()[1].id, added);
    assert_eq!(ed.blocks()[1].order, 1);
    assert_ne!(added, "b2");
    assert_ne!(added, "b1");
}

#[test]
fn test_nested_operations_stay_in_their_tab() {
    let container = tabbed(
        "c",
        "TB01",
        &[("t1", vec![text("n1", "one", 0), text("n2", "two", 1)]), ("t2", vec![])],
    );
    let mut ed = editor(vec![text("a", "A", 0), container.with_order(1)]);

    let added = ed.add_block_to_container("c", "t2", Family::Image, "IM01").unwrap();
    assert!(ed.move_nested_block("c", "t1", "n2", Direction::Up));
    assert!(!ed.move_nested_block("c", "t1", "n2", Direction::Up));
    assert!(ed.update_nested_block("c", "t1", "n1", &json!({ "html": "edited" }).as_object().cloned().unwrap()));
    assert!(!ed.remove_nested_block("c", "t2", "n1"));

    let t1 = tree::find_tab(ed.blocks(), "c", "t1").unwrap();
    assert_eq!(ids(&t1.children), ["n2", "n1"]);
    assert_eq!(t1.children[1].content["html"], "edited");
    assert!(siblings::is_dense(&t1.children));

    let t2 = tree::find_tab(ed.blocks(), "c", "t2").unwrap();
    assert_eq!(ids(&t2.children), [added.as_str()]);
    assert_eq!(ed.blocks()[0], text("a", "A", 0));
    assert!(tree::validate(ed.blocks()).is_clean());
}

#[test]
fn test_stale_targets_are_noops() {
    let container = tabbed("c", "TB01", &[("t1", vec![])]);
    let mut ed = editor(vec![container]);
    let before = ed.blocks().to_vec();

    assert!(ed.add_block_to_container("c", "gone", Family::Text, "TX01").is_none());
    assert!(ed.add_block_to_container("gone", "t1", Family::Text, "TX01").is_none());
    assert!(!ed.remove_block("gone"));
    assert!(!ed.move_block("gone", Direction::Down));
    assert!(!ed.rename_tab("c", "gone", "x"));
    assert!(!ed.remove_tab("c", "gone"));
    assert!(ed.add_tab("gone").is_none());

    assert_eq!(ed.blocks(), before.as_slice());
    assert_eq!(ed.version(), 0);
}

#[test]
fn test_tabs_do_not_nest_in_tabs() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![])])]);
    assert!(ed.add_block_to_container("c", "t1", Family::Tabs, "TB02").is_none());
    assert!(!ed.tab_families("c").contains(&Family::Tabs));
    assert!(ed.tab_families("c").contains(&Family::Gallery));
}

#[test]
fn test_removing_selected_tab_falls_back_to_first() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![]), ("t2", vec![]), ("t3", vec![])])]);

    assert!(ed.select_tab("c", "t3"));
    assert_eq!(ed.view().selected_tab("c").map(|t| t.as_str()), Some("t3"));

    assert!(ed.remove_tab("c", "t3"));
    assert_eq!(ed.tab_editor("c"), Some(&TabEditor::viewing("t1".into())));
    assert_eq!(ed.view().selected_tab("c").map(|t| t.as_str()), Some("t1"));

    assert!(ed.remove_tab("c", "t1"));
    assert!(ed.remove_tab("c", "t2"));
    assert_eq!(ed.tab_editor("c"), Some(&TabEditor::NoTabSelected));
    assert!(!ed.begin_add_in_tab("c"));
}

#[test]
fn test_tab_add_flow_and_cancel() {
    let mut ed = editor(vec![tabbed("c", "TB02", &[("t1", vec![]), ("t2", vec![])])]);
    assert!(ed.select_tab("c", "t2"));

    assert!(ed.begin_add_in_tab("c"));
    assert!(!ed.choose_family_in_tab("c", Family::Tabs));
    assert!(ed.choose_family_in_tab("c", Family::Note));
    assert!(ed.cancel_add_in_tab("c"));
    assert_eq!(ed.version(), 0);
    assert_eq!(ed.tab_editor("c"), Some(&TabEditor::viewing("t2".into())));

    assert!(ed.begin_add_in_tab("c"));
    assert!(ed.choose_family_in_tab("c", Family::Note));
    let added = ed.choose_variant_in_tab("c", "NT03").unwrap();
    assert_eq!(ed.tab_editor("c").unwrap().picker(), Picker::Closed);

    let t2 = tree::find_tab(ed.blocks(), "c", "t2").unwrap();
    assert_eq!(t2.children[0].id, added);
    assert_eq!(t2.children[0].block_type, "NT03");
}

#[test]
fn test_add_rename_and_move_tabs() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![])])]);

    let new_tab = ed.add_tab("c").unwrap();
    assert!(ed.rename_tab("c", new_tab.as_str(), "Specs"));
    assert!(ed.can_move_tab("c", new_tab.as_str(), Direction::Left));
    assert!(ed.move_tab("c", new_tab.as_str(), Direction::Left));
    assert!(!ed.move_tab("c", new_tab.as_str(), Direction::Left));

    let titles: Vec<&str> = ed.blocks()[0].tabs().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Specs", "T1"]);
}

#[test]
fn test_gallery_form_commit_replaces_images() {
    let mut content = Content::new();
    content.insert("images".into(), json!([{ "src": "a.png" }, { "src": "b.png" }]));
    let gallery = Block::new("g", "GL02", content);
    let mut ed = editor(vec![gallery]);

    assert!(ed.open_detail(BlockRef::page("g")));
    match ed.detail_mut() {
        Some(DetailForm::Gallery(form)) => {
            assert!(form.move_image(1, Direction::Up));
            assert!(form.remove_image(1));
        }
        other => panic!("unexpected form {:?}", other),
    }
    assert!(ed.commit_detail());

    let images = ed.blocks()[0].content["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["src"], "b.png");
}

#[test]
fn test_tabs_form_commit_updates_tab_list() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![text("n", "x", 0)]), ("t2", vec![])])]);

    assert!(ed.open_detail(BlockRef::page("c")));
    if let Some(DetailForm::Tabs(form)) = ed.detail_mut() {
        assert!(form.rename("t1", "Overview"));
        assert!(form.remove_tab("t2"));
    }
    assert!(ed.commit_detail());

    let tabs = ed.blocks()[0].tabs();
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs[0].title, "Overview");
    assert_eq!(ids(&tabs[0].children), ["n"]);
    assert!(!ed.blocks()[0].content.contains_key("tabs"));
}

#[test]
fn test_tabs_form_survives_edits_made_while_open() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![]), ("t2", vec![])])]);

    assert!(ed.open_detail(BlockRef::page("c")));
    if let Some(DetailForm::Tabs(form)) = ed.detail_mut() {
        assert!(form.rename("t1", "Overview"));
    }
    let added = ed.add_block_to_container("c", "t1", Family::Text, "TX01").unwrap();
    assert!(ed.remove_tab("c", "t2"));
    let extra = ed.add_tab("c").unwrap();

    assert!(ed.detail().is_some());
    assert!(ed.commit_detail());

    let tabs = ed.blocks()[0].tabs();
    let tab_ids: Vec<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(tab_ids, ["t1", extra.as_str()]);
    assert_eq!(tabs[0].title, "Overview");
    assert_eq!(ids(&tabs[0].children), [added.as_str()]);
    assert!(tree::validate(ed.blocks()).is_clean());
}

#[test]
fn test_nested_detail_form() {
    let mut ed = editor(vec![tabbed("c", "TB01", &[("t1", vec![text("n", "x", 0)])])]);
    assert!(ed.open_detail(BlockRef::nested("c", "t1", "n")));
    if let Some(DetailForm::Text(form)) = ed.detail_mut() {
        form.set_html("<p>nested</p>");
    }
    assert!(ed.commit_detail());
    assert_eq!(tree::find_block(ed.blocks(), "n").unwrap().content["html"], "<p>nested</p>");
}

#[test]
fn test_preview_matches_public_render() {
    let container = tabbed("c", "TB02", &[("t1", vec![text("n", "<p>inside</p>", 0)])]);
    let mut ed = editor(vec![text("a", "<p>top</p>", 0), container.with_order(1)]);
    let renderer = Renderer::with_options(IdentityResolver, RenderOptions::published());

    let collapsed = ed.preview(&renderer);
    assert!(!collapsed.html.contains("inside"));

    ed.set_mode(Mode::Preview);
    assert!(ed.toggle_section("c", "t1"));
    let open = ed.preview(&renderer);
    assert!(open.html.contains("<p>inside</p>"));
    assert_eq!(open, renderer.render(ed.blocks(), ed.view()));
}

#[test]
fn test_json_round_trip_through_editor() {
    let json = r#"[
        {"id": "b", "type": "TX01", "content": {"html": "B"}, "order": 3},
        {"id": "a", "type": "TX01", "content": {"html": "A"}, "order": 1}
    ]"#;
    let ed = Editor::from_json(json, EditorOptions::default()).unwrap();
    assert_eq!(ids(ed.blocks()), ["a", "b"]);

    let saved = ed.to_json().unwrap();
    let reopened = Editor::from_json(&saved, EditorOptions::default()).unwrap();
    assert_eq!(reopened.blocks(), ed.blocks());
}

#[test]
fn test_uuid_ids_carry_prefix() {
    let options = EditorOptions {
        id_prefix: "pg".to_string(),
        ..EditorOptions::default()
    };
    let mut ed = Editor::with_options(Vec::new(), options);
    let id = ed.add_block(Family::Table, "TA01").unwrap();
    assert!(id.as_str().starts_with("pg-"));
}

#[test]
fn test_saved_payload_after_remove_and_add() {
    let mut ed = editor(vec![text("b1", "A", 0), text("b2", "B", 1)]);
    ed.remove_block("b1");
    ed.add_block(Family::Text, "TX01");

    insta::assert_snapshot!(ed.to_json().unwrap(), @r#"[{"id":"b2","type":"TX01","content":{"html":"B"},"order":0},{"id":"g-1","type":"TX01","content":{"html":"","variant":"TX01"},"order":1}]"#);
}
