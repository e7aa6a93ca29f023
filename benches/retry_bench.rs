// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quietretry::split::{SplitOptions, split_literal};
use quietretry::{ErrorHost, Retrier, RetryPolicy, Sleeper, did_error_occur, invoke_suppressed};
use std::time::Duration;

struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");
    let host = ErrorHost::new();
    let before = host.record("before");
    let after = host.record("after");

    group.bench_function("did_error_occur", |b| {
        b.iter(|| did_error_occur(black_box(&before), black_box(&after)))
    });

    group.bench_function("invoke_suppressed_success", |b| {
        b.iter(|| invoke_suppressed(&host, |_| Ok::<_, String>(black_box(1))))
    });

    group.finish();
}

fn bench_retry(c: &mut Criterion) {
    let mut group = c.benchmark_group("retry");
    let retrier = Retrier::with_sleeper(RetryPolicy::new(4).unwrap(), NoSleep);

    group.bench_function("exhaust_four_attempts", |b| {
        let host = ErrorHost::with_capacity(16);
        b.iter(|| retrier.run(&host, |_| Err::<(), _>(black_box("fail"))))
    });

    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    let input = "alpha::beta::gamma::delta::epsilon".repeat(16);
    let insensitive = SplitOptions::default().ignoring_case();

    group.bench_function("case_sensitive", |b| {
        b.iter(|| split_literal(black_box(&input), "::", &SplitOptions::default()))
    });

    group.bench_function("ignore_case", |b| {
        b.iter(|| split_literal(black_box(&input), "::", &insensitive))
    });

    group.finish();
}

criterion_group!(benches, bench_detection, bench_retry, bench_split);
criterion_main!(benches);
