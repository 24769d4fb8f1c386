//! Benchmarks for the markup render pipeline.

use std::fmt::Write;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use wl_markup::Renderer;

/// Generate an article with `sections` sections of mixed markup.
fn generate_article(sections: usize) -> String {
    let mut markup = String::from("'''Dwarf''' is the playable race. {{stub}}\n");
    for i in 0..sections {
        write!(
            markup,
            "=={i} Section==\n\
             A [[Dwarf|dwarf]] may carry a [[Pick]] and an _axe_ (see [https://example.com/{i} notes]).\n\
             [[File:Item {i}.png|32px]]\n\
             - **first** item\n\
             - second item with `code`\n\
             {{| {{{{prettytable}}}}\n\
             ! Name !! Value\n\
             |-\n\
             | LAND_HOLDER || {i}\n\
             |}}\n\
             > quoted line\n\n"
        )
        .unwrap();
    }
    markup
}

fn bench_render_small(c: &mut Criterion) {
    let renderer = Renderer::new();
    let markup = "'''Hello''' [[Dwarf|dwarves]] see [[File:Pick.png|32px]]";

    c.bench_function("render_small", |b| b.iter(|| renderer.render(markup)));
}

fn bench_render_article(c: &mut Criterion) {
    let renderer = Renderer::new();
    let mut group = c.benchmark_group("render_article");

    for sections in [10, 100] {
        let markup = generate_article(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &markup, |b, markup| {
            b.iter(|| renderer.render(markup));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_small, bench_render_article);
criterion_main!(benches);
