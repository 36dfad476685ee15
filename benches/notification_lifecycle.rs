// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use social_toasts::config::NotificationSettings;
use social_toasts::notifications::{IdGenerator, ManualClock, NotificationProvider};
use std::hint::black_box;
use std::time::Duration;

fn id_generation_benchmark(c: &mut Criterion) {
    let ids = IdGenerator::default();
    c.bench_function("next_id", |b| b.iter(|| black_box(ids.next_id())));
}

fn lifecycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_lifecycle");

    group.bench_function("show_and_expire_100", |b| {
        b.iter_batched(
            || {
                let clock = ManualClock::new();
                let provider =
                    NotificationProvider::with_clock(NotificationSettings::default(), clock.clone());
                (provider, clock)
            },
            |(provider, clock)| {
                let handle = provider.handle();
                for i in 0..100 {
                    let _ = handle.show_info(format!("toast {i}"), None);
                }
                clock.advance(Duration::from_secs(10));
                black_box(handle.tick().unwrap_or_default());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("dismiss_in_crowded_store", |b| {
        let clock = ManualClock::new();
        let provider = NotificationProvider::with_clock(NotificationSettings::default(), clock);
        let handle = provider.handle();
        for i in 0..1000 {
            let _ = handle.show_warning(format!("background {i}"), None);
        }
        b.iter(|| {
            if let Ok(id) = handle.show_error("transient", None) {
                black_box(handle.dismiss(&id).unwrap_or(false));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, id_generation_benchmark, lifecycle_benchmark);
criterion_main!(benches);
