use bytes::Bytes;
use chunkpump::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");

    for size in [1_000usize, 100_000, 1_000_000].iter() {
        let data = Bytes::from(vec![b'x'; *size]);
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("null_sink", size), &data, |b, data| {
            b.iter(|| {
                let mut source = StringSource::new(data.clone());
                let mut sink = NullSink::new();
                black_box(pump::drain(&mut source, &mut sink))
            });
        });

        group.bench_with_input(BenchmarkId::new("collect", size), &data, |b, data| {
            b.iter(|| {
                let mut source = StringSource::new(data.clone());
                let mut sink = CollectSink::new();
                pump::drain(&mut source, &mut sink);
                black_box(sink.concat())
            });
        });
    }

    group.finish();
}

fn bench_filter_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_chain");
    let data = Bytes::from(vec![b'a'; 256 * 1024]);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for depth in [1usize, 4, 16].iter() {
        group.bench_with_input(BenchmarkId::new("identity", depth), depth, |b, &depth| {
            b.iter(|| {
                let mut chain = FilterChain::new();
                for _ in 0..depth {
                    chain = chain.add_filter(IdentityFilter::new());
                }
                let mut source = StringSource::new(data.clone()).chain(chain);
                black_box(pump::drain(&mut source, &mut NullSink::new()))
            });
        });

        group.bench_with_input(BenchmarkId::new("cycle", depth), depth, |b, &depth| {
            b.iter(|| {
                let mut chain = FilterChain::new();
                for _ in 0..depth {
                    chain = chain.add_filter(Cycle::new(0usize, (), count_bytes));
                }
                let mut source = StringSource::new(data.clone()).chain(chain);
                black_box(pump::drain(&mut source, &mut NullSink::new()))
            });
        });
    }

    group.finish();
}

fn count_bytes(seen: &mut usize, input: Bytes, _: &()) -> Chunk {
    *seen += input.len();
    Chunk::Data(input)
}

criterion_group!(benches, bench_drain, bench_filter_chain);
criterion_main!(benches);
