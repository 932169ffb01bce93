/*!
 * Signal Resolution Benchmarks
 *
 * Measures catalog lookups and identifier resolution on the name and number paths.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use posix_timer::signals::{self, SignalId};

fn bench_catalog_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("signals/lookup");

    for name in ["HUP", "USR1", "WINCH", "RT3", "NOPE"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| black_box(signals::lookup(black_box(name))))
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let named = SignalId::from("SIGUSR1");
    let bare = SignalId::from("USR1");
    let numeric = SignalId::from(10);

    c.bench_function("signals/resolve_prefixed", |b| {
        b.iter(|| black_box(signals::resolve(black_box(&named))))
    });
    c.bench_function("signals/resolve_bare", |b| {
        b.iter(|| black_box(signals::resolve(black_box(&bare))))
    });
    c.bench_function("signals/resolve_number", |b| {
        b.iter(|| black_box(signals::resolve(black_box(&numeric))))
    });
}

criterion_group!(benches, bench_catalog_lookup, bench_resolve);
criterion_main!(benches);
