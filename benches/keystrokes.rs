//! Benchmarks for modal_field keystroke throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use modal_field::{Config, Engine, KeyCode, KeyEvent, MemoryBuffer, TextBuffer};
use std::time::{Duration, Instant};

fn generate_sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!(
            "This is line {} with some sample text for benchmarking vim operations.\n",
            i + 1
        ));
        if i % 10 == 0 {
            text.push('\n');
        }
    }
    text
}

/// Feeds keys spaced well inside the chord window, typing whatever the
/// engine lets through like a text widget would.
struct Driver {
    engine: Engine,
    buffer: MemoryBuffer,
    now: Instant,
}

impl Driver {
    fn new(text: &str, at: usize) -> Self {
        let config = Config::builder()
            .mode_switch_delay(Duration::ZERO)
            .build()
            .expect("default config is valid");
        Self {
            engine: Engine::builder()
                .config(config)
                .build()
                .expect("default config is valid"),
            buffer: MemoryBuffer::new(text).with_selection(at, at + 1),
            now: Instant::now(),
        }
    }

    fn press(&mut self, event: KeyEvent) {
        self.now += Duration::from_millis(5);
        let outcome = self.engine.key_down(&mut self.buffer, event, self.now);
        if !outcome.suppress_default
            && let KeyCode::Char(c) = event.code
        {
            self.buffer.replace_selection(c.encode_utf8(&mut [0; 4]));
        }
        self.engine.poll_timers(&mut self.buffer, self.now);
    }

    fn keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.press(black_box(KeyEvent::from(c)));
        }
    }
}

fn benchmark_simple_movements(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut driver = Driver::new(&text, 0);

    c.bench_function("simple movements (hjkl)", |b| {
        b.iter(|| driver.keys("jjllhk"));
    });
}

fn benchmark_word_movements(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut driver = Driver::new(&text, 0);

    c.bench_function("word movements (w)", |b| {
        b.iter(|| {
            driver.keys("www");
            driver.keys("gg");
        });
    });
}

fn benchmark_delete_operations(c: &mut Criterion) {
    let text = generate_sample_text(1000);

    c.bench_function("delete operations (dw, dd)", |b| {
        b.iter_batched(
            || Driver::new(&text, 3000),
            |mut driver| {
                driver.keys("dw");
                driver.keys("dd");
                driver
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn benchmark_line_yank(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut driver = Driver::new(&text, 0);

    c.bench_function("counted line yank (20yy)", |b| {
        b.iter(|| driver.keys("20yy"));
    });
}

fn benchmark_visual_selection(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut driver = Driver::new(&text, 3000);

    c.bench_function("visual selection", |b| {
        b.iter(|| {
            driver.keys("v");
            driver.keys("lllllj");
            driver.press(KeyEvent::plain(KeyCode::Esc));
        });
    });
}

fn benchmark_complex_sequence(c: &mut Criterion) {
    let text = generate_sample_text(1000);

    c.bench_function("complex keystroke sequence", |b| {
        b.iter_batched(
            || Driver::new(&text, 0),
            |mut driver| {
                // A realistic editing sequence
                driver.keys("5jwwdwi");
                driver.keys("hello world");
                driver.press(KeyEvent::plain(KeyCode::Esc));
                driver.keys("yyp");
                driver
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_simple_movements,
              benchmark_word_movements,
              benchmark_delete_operations,
              benchmark_line_yank,
              benchmark_visual_selection,
              benchmark_complex_sequence
}
criterion_main!(benches);
