use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use texcomp_api::{compress_image, CompressionSettings, ExecutionStrategy, PixelBuffer};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

const WIDTH: usize = 128;
const HEIGHT: usize = 128;
const THREADS: usize = 4;

fn generate_image() -> Vec<u8> {
    let mut data = Vec::with_capacity(WIDTH * HEIGHT * 4);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let seed = (x * 31 + y * 17) as u8;
            data.extend_from_slice(&[x as u8 * 2, y as u8 * 2, seed, 255 - (seed >> 2)]);
        }
    }
    data
}

fn settings_for(strategy: ExecutionStrategy, quality: i32) -> CompressionSettings {
    let builder = CompressionSettings::builder().quality(quality);
    match strategy {
        ExecutionStrategy::Serial => builder.threads(1),
        ExecutionStrategy::AtomicBarrier => builder.threads(THREADS).use_atomics(true),
        ExecutionStrategy::ThreadGroup => builder.threads(THREADS),
        ExecutionStrategy::WorkerQueue => builder.threads(THREADS).job_size(16),
    }
    .build()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compress 128x128 RGBA8888 -> BC7");
    let data = generate_image();
    let pixels = PixelBuffer::new(&data, WIDTH, HEIGHT).expect("valid dimensions");
    let mut output = vec![0u8; pixels.block_count() * 16];
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    for quality in [0, 50] {
        for strategy in ExecutionStrategy::all_values() {
            let settings = settings_for(*strategy, quality);
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), quality),
                &settings,
                |b, settings| {
                    b.iter(|| {
                        black_box(compress_image(&pixels, &mut output, settings).ok());
                    })
                },
            );
        }
    }

    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
