//! Mount-level behavior against an in-memory document.

use std::cell::Cell;
use std::rc::Rc;

use spark_html::{
    batch, children, component, create_element, fragment, mount, observe, reset_all,
    set_handler_prefix, text, DomEvent, Document, MemoryDocument, MountHandle, Node, Props, Style,
};
use tracing_subscriber::EnvFilter;

fn setup() -> MemoryDocument {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    reset_all();
    MemoryDocument::new().with_container("app")
}

fn html(doc: &MemoryDocument) -> String {
    doc.inner_html("#app").unwrap_or_default()
}

/// Handler tokens in markup order, taken from `on...="token(event)"`.
fn tokens(markup: &str) -> Vec<String> {
    markup
        .split("(event)")
        .filter_map(|chunk| chunk.rsplit_once('"').map(|(_, token)| token.to_string()))
        .filter(|token| {
            !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
        .collect()
}

fn click(handle: &MountHandle, token: &str) -> Option<bool> {
    handle.dispatch_event(token, &mut DomEvent::new("click"))
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn test_mount_writes_tree_into_container() {
    let doc = setup();
    let _handle = mount(doc.clone(), "#app", || {
        create_element(
            "div",
            Props::new().attr("title", "Hello"),
            children![create_element("span", Props::new(), children!["content ", "bar"])],
        )
    })
    .unwrap();

    assert_eq!(html(&doc), r#"<div title="Hello"><span >content bar</span></div>"#);
}

#[test]
fn test_text_escaping_is_minimal_by_default() {
    let doc = setup();
    let _handle = mount(doc.clone(), "#app", || text("a < b & \"c\"\u{a0}")).unwrap();
    assert_eq!(html(&doc), "a &lt; b & \"c\"&nbsp;");
}

#[test]
fn test_style_and_class() {
    let doc = setup();
    let _handle = mount(doc.clone(), "#app", || {
        create_element(
            "span",
            Props::new()
                .class("thing")
                .style(Style::new().prop("backgroundColor", "#bada55").prop("padding", "5px")),
            vec![],
        )
    })
    .unwrap();

    assert_eq!(
        html(&doc),
        r#"<span class="thing" style="background-color: #bada55; padding: 5px"></span>"#
    );
}

#[test]
fn test_keyed_list_flattens_in_order() {
    let doc = setup();
    let _handle = mount(doc.clone(), "#app", || {
        let items = ["a", "b"]
            .into_iter()
            .map(|name| create_element("h2", Props::new().key(name), children![name]));
        create_element("div", Props::new(), vec![fragment(items)])
    })
    .unwrap();

    assert_eq!(html(&doc), "<div ><h2 >a</h2><h2 >b</h2></div>");
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn test_handler_token_dispatch() {
    let doc = setup();
    let calls = Rc::new(Cell::new(0));

    let calls_clone = calls.clone();
    let handle = mount(doc.clone(), "#app", move || {
        let calls = calls_clone.clone();
        create_element(
            "button",
            Props::new().on("Click", move |_| calls.set(calls.get() + 1)),
            children!["go"],
        )
    })
    .unwrap();

    assert_eq!(html(&doc), r#"<button onclick="_event0(event)">go</button>"#);

    let mut event = DomEvent::new("click");
    assert_eq!(handle.dispatch_event("_event0", &mut event), Some(false));
    assert!(event.is_default_prevented());
    assert_eq!(calls.get(), 1);

    assert_eq!(click(&handle, "_event99"), None);
}

#[test]
fn test_handlers_are_swapped_each_pass() {
    let doc = setup();
    let handle = mount(doc.clone(), "#app", || {
        create_element("a", Props::new().on("click", |_| {}), vec![])
    })
    .unwrap();
    let first = tokens(&html(&doc));

    handle.rerender();
    let second = tokens(&html(&doc));

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first, second);
    assert_eq!(handle.handler_count(), 1);
    assert_eq!(click(&handle, &first[0]), None);
    assert_eq!(click(&handle, &second[0]), Some(false));
}

#[test]
fn test_custom_handler_prefix() {
    let doc = setup();
    set_handler_prefix("__h");
    let _handle = mount(doc.clone(), "#app", || {
        create_element("input", Props::new().on("input", |_| {}), vec![])
    })
    .unwrap();

    assert_eq!(tokens(&html(&doc)), vec!["__h0".to_string()]);
}

// =============================================================================
// Re-rendering
// =============================================================================

fn counter_app() -> Node {
    let state = observe(0u32);
    let handle = state.clone();
    create_element(
        "button",
        Props::new().on("click", move |_| handle.update(|n| *n += 1)),
        children![format!("count {}", state.get())],
    )
}

#[test]
fn test_one_rerender_per_mutation() {
    let doc = setup();
    let handle = mount(doc.clone(), "#app", counter_app).unwrap();
    assert_eq!(handle.render_count(), 1);

    for expected in 1..=3u32 {
        let token = tokens(&html(&doc)).remove(0);
        click(&handle, &token);
        assert!(html(&doc).contains(&format!("count {expected}")));
        assert_eq!(handle.render_count(), 1 + u64::from(expected));
    }
}

#[test]
fn test_multiple_writes_rerender_each_unless_batched() {
    let doc = setup();
    let handle = mount(doc.clone(), "#app", || {
        let a = observe(0);
        let b = observe(0);
        let (a2, b2) = (a.clone(), b.clone());
        let (a3, b3) = (a.clone(), b.clone());
        create_element(
            "div",
            Props::new(),
            children![
                create_element(
                    "button",
                    Props::new().on("click", move |_| {
                        a2.set(1);
                        b2.set(1);
                    }),
                    vec![],
                ),
                create_element(
                    "button",
                    Props::new().on("click", move |_| batch(|| {
                        a3.update(|n| *n += 1);
                        b3.update(|n| *n += 1);
                    })),
                    vec![],
                ),
                format!("{}/{}", a.get(), b.get())
            ],
        )
    })
    .unwrap();

    let t = tokens(&html(&doc));
    click(&handle, &t[0]);
    assert_eq!(handle.render_count(), 3);
    assert!(html(&doc).ends_with("1/1</div>"));

    let t = tokens(&html(&doc));
    click(&handle, &t[1]);
    assert_eq!(handle.render_count(), 4);
    assert!(html(&doc).ends_with("2/2</div>"));
}

#[test]
fn test_write_during_render_does_not_loop() {
    let doc = setup();
    let handle = mount(doc.clone(), "#app", || {
        let renders = observe(0u32);
        renders.update(|n| *n += 1);
        text(renders.get().to_string())
    })
    .unwrap();

    assert_eq!(handle.render_count(), 1);
    assert_eq!(html(&doc), "1");

    handle.rerender();
    assert_eq!(handle.render_count(), 2);
    assert_eq!(html(&doc), "2");
}

// =============================================================================
// State Identity
// =============================================================================

fn row(props: Props) -> Node {
    let name = props.get("name").unwrap_or_default().to_string();
    let clicks = observe(0u32);
    let handle = clicks.clone();
    create_element(
        "li",
        Props::new().on("click", move |_| handle.update(|n| *n += 1)),
        children![format!("{name}:{}", clicks.get())],
    )
}

#[test]
fn test_keyed_component_state_follows_key() {
    let doc = setup();
    let handle = mount(doc.clone(), "#app", || {
        let names = observe(vec!["a".to_string(), "b".to_string()]);
        let reverse = names.clone();
        let rows = names.get().into_iter().map(|name| {
            create_element(component(row), Props::new().key(&name).attr("name", &name), vec![])
        });
        create_element(
            "ul",
            Props::new(),
            children![
                create_element(
                    "button",
                    Props::new().on("click", move |_| reverse.update(|v| v.reverse())),
                    children!["rev"],
                ),
                fragment(rows)
            ],
        )
    })
    .unwrap();

    // [reverse, row a, row b]
    let t = tokens(&html(&doc));
    assert_eq!(t.len(), 3);
    click(&handle, &t[1]);
    assert!(html(&doc).contains(">a:1</li>"));
    assert!(html(&doc).contains(">b:0</li>"));

    let t = tokens(&html(&doc));
    click(&handle, &t[0]);
    let markup = html(&doc);
    let b = markup.find(">b:0</li>").unwrap();
    let a = markup.find(">a:1</li>").unwrap();
    assert!(b < a);
}

#[test]
fn test_swapped_closure_components_keep_separate_state() {
    let doc = setup();
    let show_b = Rc::new(Cell::new(false));

    let show_b_clone = show_b.clone();
    let handle = mount(doc.clone(), "#app", move || {
        let a = component(|_: Props| {
            let value = observe(0u32);
            if value.get() == 0 {
                value.set(100);
            }
            text(format!("A{}", value.get()))
        });
        let b = component(|_: Props| {
            let value = observe(0u32);
            text(format!("B{}", value.get()))
        });
        let chosen = if show_b_clone.get() { b } else { a };
        create_element(chosen, Props::new(), vec![])
    })
    .unwrap();
    assert_eq!(html(&doc), "A100");

    show_b.set(true);
    handle.rerender();
    assert_eq!(html(&doc), "B0");
}

#[test]
fn test_mounts_are_independent() {
    let doc = setup();
    doc.add_container("other");

    let first = mount(doc.clone(), "#app", counter_app).unwrap();
    let second = mount(doc.clone(), "#other", counter_app).unwrap();

    let token = tokens(&html(&doc)).remove(0);
    click(&first, &token);

    assert!(html(&doc).contains("count 1"));
    assert!(doc.inner_html("#other").unwrap().contains("count 0"));
    assert_eq!(first.render_count(), 2);
    assert_eq!(second.render_count(), 1);

    drop(first);
    let other_token = tokens(&doc.inner_html("#other").unwrap()).remove(0);
    click(&second, &other_token);
    assert!(doc.inner_html("#other").unwrap().contains("count 1"));
}
