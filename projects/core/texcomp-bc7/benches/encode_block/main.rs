use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use texcomp_bc7::{Bc7Encoder, Bc7Kernel};
use texcomp_common::color_8888::Color8888;
use texcomp_common::pixel_block::PixelBlock;
use texcomp_common::quality::QualityLevel;

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

/// Gradient blocks with a bit of per-block variation, so the search does real work.
fn generate_blocks(count: usize) -> Vec<PixelBlock> {
    (0..count)
        .map(|index| {
            let mut block = PixelBlock::new(Color8888::default());
            for y in 0..4 {
                for x in 0..4 {
                    let seed = (index * 31 + x * 17 + y * 59) as u8;
                    block.set_pixel(
                        x,
                        y,
                        Color8888::new(seed, seed.wrapping_mul(3), 255 - seed, 255 - (x * 20) as u8),
                    );
                }
            }
            block
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("BC7 Encode Blocks (RGBA8888 -> BC7)");
    let blocks = generate_blocks(256);
    group.throughput(Throughput::Bytes((blocks.len() * 64) as u64));

    for quality in [0, 50, 128, 256] {
        for kernel in Bc7Kernel::all_values() {
            let encoder = Bc7Encoder::new(QualityLevel::new(quality), *kernel);
            group.bench_with_input(
                BenchmarkId::new(format!("{kernel:?}"), quality),
                &blocks,
                |b, blocks| {
                    b.iter(|| {
                        for block in blocks {
                            black_box(encoder.encode_block(black_box(block)));
                        }
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
