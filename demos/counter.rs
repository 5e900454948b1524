//! Counter Example - Components, observed state and inline handlers
//!
//! This example mounts a small app into an in-memory document:
//! - A heading component with a default title
//! - A span whose click handler bumps an observed counter
//! - A keyed list of names
//!
//! Run with: cargo run --example counter
//! Set `RUST_LOG=spark_html=debug` to see every render pass.

use spark_html::{
    children, component, create_element, fragment, mount, observe, Document, DomEvent,
    MemoryDocument, Node, Props, RenderError, Style,
};
use tracing_subscriber::EnvFilter;

const NAMES: [&str; 3] = ["Wonjae", "foo", "bar"];

fn heading(props: Props) -> Node {
    let title = props.get("title").unwrap_or("<Untitled>").to_string();
    create_element("h1", Props::new(), children![title])
}

fn root() -> Node {
    let counter = observe(0u32);
    let handle = counter.clone();

    create_element(
        "div",
        Props::new().attr("title", "Hello"),
        children![
            create_element(
                "span",
                Props::new()
                    .class("thing")
                    .style(Style::new().prop("backgroundColor", "#bada55").prop("padding", "5px"))
                    .on("click", move |_| handle.update(|n| *n += 1)),
                children!["content ", NAMES[2]],
            ),
            create_element(
                component(heading),
                Props::new().attr("title", format!("State: {}", counter.get())),
                vec![],
            ),
            create_element(component(heading), Props::new(), vec![]),
            fragment(
                NAMES
                    .iter()
                    .map(|name| create_element("h2", Props::new().key(name), children![*name])),
            )
        ],
    )
}

fn main() -> Result<(), RenderError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-html Counter Example ===\n");

    let document = MemoryDocument::new().with_container("app");
    let handle = mount(document.clone(), "#app", root)?;
    let show = || println!("{}\n", document.inner_html("#app").unwrap_or_default());

    println!("Initial render:");
    show();

    // The host would call this from onclick="_event0(event)".
    for _ in 0..2 {
        let markup = document.inner_html("#app").unwrap_or_default();
        let Some(token) = markup
            .split("onclick=\"")
            .nth(1)
            .and_then(|rest| rest.split('(').next())
        else {
            break;
        };
        let mut event = DomEvent::new("click");
        handle.dispatch_event(token, &mut event);
        println!("After click on {token}:");
        show();
    }

    println!("Render passes: {}", handle.render_count());
    if let Some(stats) = handle.last_stats() {
        println!(
            "Last pass: {} nodes, {} handlers, {} bytes",
            stats.nodes_visited, stats.handlers, stats.bytes
        );
    }

    handle.unmount();
    Ok(())
}
