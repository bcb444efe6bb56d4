use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pageblocks_core::{Block, Content, Tab};
use pageblocks_render::{BaseUrlResolver, RenderOptions, ViewState, render};
use serde_json::{Value, json};

fn content(value: Value) -> Content {
    match value {
        Value::Object(map) => map,
        _ => Content::new(),
    }
}

fn leaf(n: usize) -> Block {
    let (block_type, value) = match n % 5 {
        0 => ("TX01", json!({ "html": "<p>Lorem ipsum dolor sit amet</p>" })),
        1 => ("IM02", json!({ "src": "uploads/a.png", "alt": "A", "html": "<p>side</p>" })),
        2 => ("TA02", json!({ "rows": [["a", "b", "c"], ["1", "2", "3"], ["4", "5", "6"]] })),
        3 => ("QA02", json!({ "items": [{ "question": "Q?", "answer": "<p>A</p>" }] })),
        _ => ("GL01", json!({ "images": [{ "src": "g1.png" }, { "src": "g2.png" }] })),
    };
    Block::new(format!("b{}", n), block_type, content(value)).with_order(n)
}

fn large_page() -> Vec<Block> {
    let mut blocks: Vec<Block> = (0..200).map(leaf).collect();
    for c in 0..20 {
        let tabs = (0..3)
            .map(|t| {
                let children = (0..10).map(|n| leaf(1000 + c * 100 + t * 10 + n).with_order(n)).collect();
                Tab::new(format!("t{}-{}", c, t), format!("Tab {}", t)).with_children(children)
            })
            .collect();
        blocks.push(
            Block::new(format!("c{}", c), if c % 2 == 0 { "TB01" } else { "TB02" }, Content::new())
                .with_order(200 + c)
                .with_tabs(tabs),
        );
    }
    blocks
}

fn bench_render(c: &mut Criterion) {
    let blocks = large_page();
    let view = ViewState::new();
    let resolver = BaseUrlResolver::new("https://cdn.example.com");
    let options = RenderOptions::published();

    c.bench_function("render_large_page", |b| {
        b.iter(|| render(black_box(&blocks), &view, &resolver, &options))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
