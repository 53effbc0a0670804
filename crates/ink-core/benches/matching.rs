use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ink_core::matcher::sentence_words;
use ink_core::{check, normalize, normalize_pinyin, PinyinTable, Target, Transliterator};

const SENTENCES: &[(&str, &str)] = &[
    ("你好", "Hello"),
    ("今天天气很好。", "The weather is nice today."),
    (
        "我想喝一杯咖啡，你呢？",
        "I would like a cup of coffee, how about you?",
    ),
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for (zh, en) in SENTENCES {
        group.bench_with_input(BenchmarkId::new("english", en.len()), en, |b, en| {
            b.iter(|| normalize(black_box(en)))
        });
        let toned = PinyinTable::global().to_display(zh);
        group.bench_with_input(BenchmarkId::new("pinyin", zh.len()), &toned, |b, toned| {
            b.iter(|| normalize_pinyin(black_box(toned)))
        });
    }
    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let table = PinyinTable::global();
    let mut group = c.benchmark_group("check");
    for (zh, en) in SENTENCES {
        let pinyin = Target::Pinyin(table.to_syllables(zh));
        let typed: Vec<String> = table
            .to_display(zh)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        group.bench_with_input(BenchmarkId::new("pinyin", zh.len()), &typed, |b, typed| {
            b.iter(|| check(black_box(&pinyin), black_box(typed.as_slice())))
        });

        let words = sentence_words(en);
        let sentence = Target::Sentence(words.clone());
        group.bench_with_input(BenchmarkId::new("sentence", en.len()), &words, |b, typed| {
            b.iter(|| check(black_box(&sentence), black_box(typed.as_slice())))
        });
    }
    group.finish();
}

fn bench_transliterate(c: &mut Criterion) {
    let table = PinyinTable::global();
    c.bench_function("to_syllables", |b| {
        b.iter(|| table.to_syllables(black_box("我想喝一杯咖啡，你呢？")))
    });
}

criterion_group!(benches, bench_normalize, bench_check, bench_transliterate);
criterion_main!(benches);
