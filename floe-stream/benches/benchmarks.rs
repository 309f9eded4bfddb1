// Copyright 2026 the floe authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0


use criterion::{criterion_group, criterion_main};
use freeze_bench::bench_freeze;

criterion_group!(stream_benches, bench_freeze);
criterion_main!(stream_benches);
