use criterion::{black_box, criterion_group, criterion_main, Criterion};

use triolingo_core::glossary::parse_prompt;
use triolingo_core::model::LessonSetMeta;
use triolingo_core::parser::parse_lesson_set;

fn bench_parse_prompt(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_prompt");

    let plain = "What does 'Hola' mean in English?";
    let single = "What does '[Hola](hello)' mean in English?";
    let dense = "[Je](I) [suis](am) [très](very) [fatigué](tired) [aujourd'hui](today).";
    let broken = "[[[ ]]] ((( ))) [a] (b) [c](";

    let large = {
        let mut s = String::new();
        for i in 0..200 {
            s.push_str(&format!("word{i} [glossed{i}](definition {i}) "));
        }
        s
    };

    group.bench_function("plain", |b| b.iter(|| parse_prompt(black_box(plain))));
    group.bench_function("single", |b| b.iter(|| parse_prompt(black_box(single))));
    group.bench_function("dense", |b| b.iter(|| parse_prompt(black_box(dense))));
    group.bench_function("broken", |b| b.iter(|| parse_prompt(black_box(broken))));
    group.bench_function("200_spans", |b| b.iter(|| parse_prompt(black_box(&large))));

    group.finish();
}

fn bench_lesson_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("lesson_parsing");

    let meta = LessonSetMeta {
        id: "bench".into(),
        title: "Benchmark".into(),
    };

    for n in [5, 50, 500] {
        let doc = generate_lesson_set_json(n);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| parse_lesson_set(black_box("es"), black_box(&meta), black_box(&doc)))
        });
    }

    group.finish();
}

fn generate_lesson_set_json(n: usize) -> String {
    let lessons: Vec<String> = (0..n)
        .map(|i| {
            if i % 2 == 0 {
                format!(
                    r#"{{"question":"What does '[palabra{i}](word {i})' mean?","options":["word {i}","thing","place","time"],"correct":"word {i}","type":"multiple-choice"}}"#
                )
            } else {
                format!(r#"{{"question":"Complete: ___ {i}","correct":"answer {i}","type":"fill-blank"}}"#)
            }
        })
        .collect();
    format!(r#"{{"lessons":[{}]}}"#, lessons.join(","))
}

criterion_group!(benches, bench_parse_prompt, bench_lesson_parsing);
criterion_main!(benches);
