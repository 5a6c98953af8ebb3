#![no_main]

// Every execution strategy must write the same bytes as the serial one.

use libfuzzer_sys::{arbitrary, fuzz_target};
use texcomp_api::{compress_image_data, CompressionSettings, ExecutionStrategy};
use texcomp_common::format::CompressionFormat;

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub format: u8,
    pub quality: u8,
    pub threads: u8,
    pub job_size: u8,
    pub pixels: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let len = input.pixels.len() / 64 * 64;
    if len == 0 {
        return;
    }
    let pixels = &input.pixels[..len];
    let format = CompressionFormat::all_values()[input.format as usize % 3];
    let threads = (input.threads % 8) as usize + 2;
    let size = format.required_output_size(len);

    let base = || {
        CompressionSettings::builder()
            .format(format)
            .quality(input.quality as i32 % 101)
    };
    let mut serial = vec![0u8; size];
    compress_image_data(pixels, &mut serial, &base().build()).unwrap();

    for strategy in ExecutionStrategy::all_values().iter().copied() {
        let settings = match strategy {
            ExecutionStrategy::Serial => continue,
            ExecutionStrategy::AtomicBarrier => base().threads(threads).use_atomics(true),
            ExecutionStrategy::ThreadGroup => base().threads(threads),
            ExecutionStrategy::WorkerQueue => base()
                .threads(threads)
                .job_size(input.job_size as usize % 16 + 1),
        }
        .build();
        let mut output = vec![0u8; size];
        compress_image_data(pixels, &mut output, &settings).unwrap();
        assert_eq!(output, serial, "{strategy} differs from Serial");
    }
});
