use criterion::{black_box, criterion_group, criterion_main, Criterion};

use triolingo_core::model::{LessonSet, Question, QuestionKind};
use triolingo_core::quiz::{Advance, QuizSession};
use triolingo_core::score::{MemoryStorage, ScoreStore};

fn make_question(kind: QuestionKind, i: usize) -> Question {
    Question {
        prompt: format!("Question {i}"),
        kind,
        options: match kind {
            QuestionKind::MultipleChoice => vec![
                format!("Answer {i}"),
                "Wrong".into(),
                "Also wrong".into(),
            ],
            QuestionKind::FillBlank => vec![],
        },
        correct_answer: format!("Answer {i}"),
    }
}

fn bench_is_correct(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_correct");

    let mc = make_question(QuestionKind::MultipleChoice, 1);
    let fb = make_question(QuestionKind::FillBlank, 1);

    group.bench_function("multiple_choice", |b| {
        b.iter(|| mc.is_correct(black_box("ANSWER 1")))
    });

    group.bench_function("fill_blank_padded", |b| {
        b.iter(|| fb.is_correct(black_box("    answer 1   ")))
    });

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    let set = LessonSet {
        id: "bench".into(),
        title: "Benchmark".into(),
        questions: (0..100)
            .map(|i| {
                let kind = if i % 2 == 0 {
                    QuestionKind::MultipleChoice
                } else {
                    QuestionKind::FillBlank
                };
                make_question(kind, i)
            })
            .collect(),
    };

    group.bench_function("100_questions", |b| {
        b.iter(|| {
            let mut store = ScoreStore::open(Box::new(MemoryStorage::default()));
            let mut session = QuizSession::new("es", set.clone());
            loop {
                let answer = session.current_question().correct_answer.clone();
                session.set_input(&answer).unwrap();
                session.submit(&mut store).unwrap();
                if let Advance::Completed(summary) = session.advance().unwrap() {
                    break black_box(summary);
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_is_correct, bench_session);
criterion_main!(benches);
