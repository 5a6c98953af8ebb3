//! Invalid input is rejected before any block is written.

mod common;

use common::test_image;
use rstest::rstest;
use texcomp_api::{
    compress_image, compress_image_data, resolve_codec_with, CompressError, CompressionSettings,
    PixelBuffer,
};
use texcomp_common::cpu_detect::has_sse41;
use texcomp_common::format::CompressionFormat;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const UNTOUCHED: u8 = 0xCD;

fn untouched(output: &[u8]) -> bool {
    output.iter().all(|&b| b == UNTOUCHED)
}

#[test]
fn empty_input() {
    let mut output = vec![UNTOUCHED; 16];
    let result = compress_image_data(&[], &mut output, &CompressionSettings::default());
    assert!(matches!(result, Err(CompressError::EmptyInput)));
    assert!(untouched(&output));
}

#[test]
fn partial_block_input() {
    let data = vec![0u8; 80];
    let mut output = vec![UNTOUCHED; 32];
    let result = compress_image_data(&data, &mut output, &CompressionSettings::default());
    assert!(matches!(result, Err(CompressError::InvalidInputLength { .. })));
    assert!(untouched(&output));
}

#[rstest]
#[case(CompressionFormat::Bptc, 63)]
#[case(CompressionFormat::Dxt1, 31)]
#[case(CompressionFormat::Dxt5, 0)]
fn output_too_small(#[case] format: CompressionFormat, #[case] output_len: usize) {
    let data = test_image(8, 8);
    let pixels = PixelBuffer::new(&data, 8, 8).unwrap();
    let settings = CompressionSettings::builder()
        .format(format)
        .threads(4)
        .build();
    let mut output = vec![UNTOUCHED; output_len];
    let result = compress_image(&pixels, &mut output, &settings);
    assert!(matches!(result, Err(CompressError::OutputBufferTooSmall { .. })));
    assert!(untouched(&output));
}

#[test]
fn simd_on_platform_without_support() {
    let settings = CompressionSettings::builder().use_simd(true).build();
    assert!(matches!(
        resolve_codec_with(&settings, false),
        Err(CompressError::SimdUnsupported)
    ));

    if !has_sse41() {
        let data = test_image(4, 4);
        let mut output = vec![UNTOUCHED; 16];
        let result = compress_image_data(&data, &mut output, &settings);
        assert!(matches!(result, Err(CompressError::SimdUnsupported)));
        assert!(untouched(&output));
    }
}

#[test]
fn simd_checked_before_input() {
    if has_sse41() {
        return;
    }
    let settings = CompressionSettings::builder().use_simd(true).build();
    let mut output = vec![UNTOUCHED; 16];
    let result = compress_image_data(&[], &mut output, &settings);
    assert!(matches!(result, Err(CompressError::SimdUnsupported)));
}

#[rstest]
#[case(CompressionFormat::Dxt1)]
#[case(CompressionFormat::Dxt5)]
fn simd_dxt_is_unimplemented(#[case] format: CompressionFormat) {
    let data = test_image(4, 4);
    let pixels = PixelBuffer::new(&data, 4, 4).unwrap();
    let settings = CompressionSettings::builder()
        .format(format)
        .use_simd(true)
        .build();
    let mut output = vec![UNTOUCHED; 16];
    let result = compress_image(&pixels, &mut output, &settings);
    if has_sse41() {
        assert!(matches!(result, Err(CompressError::UnimplementedCodec { .. })));
    } else {
        assert!(matches!(result, Err(CompressError::SimdUnsupported)));
    }
    assert!(untouched(&output));
}

#[test]
fn simd_bc7_matches_portable() {
    if !has_sse41() {
        return;
    }
    let data = test_image(16, 8);
    let pixels = PixelBuffer::new(&data, 16, 8).unwrap();
    let mut portable = vec![0u8; 128];
    let mut simd = vec![0u8; 128];
    let builder = CompressionSettings::builder().quality(70).threads(2);
    compress_image(&pixels, &mut portable, &builder.clone().build()).unwrap();
    compress_image(&pixels, &mut simd, &builder.use_simd(true).build()).unwrap();
    assert_eq!(simd, portable);
}

#[test]
fn unknown_format_id() {
    let err: CompressError = CompressionFormat::try_from(3u32).unwrap_err().into();
    assert!(matches!(err, CompressError::UnknownFormat(_)));
}

/// Counts `ERROR` level events.
struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_errors(f: impl FnOnce()) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(count.clone()));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}

#[rstest]
#[case(CompressionFormat::Bptc, true)]
#[case(CompressionFormat::Dxt1, true)]
#[case(CompressionFormat::Bptc, false)]
fn failures_are_logged_once(#[case] format: CompressionFormat, #[case] use_simd: bool) {
    let data = test_image(4, 4);
    let pixels = PixelBuffer::new(&data, 4, 4).unwrap();
    let settings = CompressionSettings::builder()
        .format(format)
        .use_simd(use_simd)
        .build();
    // BC7 with SIMD only fails where SSE4.1 is missing; use a short output otherwise.
    let mut output = vec![UNTOUCHED; if use_simd { 16 } else { 8 }];
    let errors = count_errors(|| {
        let result = compress_image(&pixels, &mut output, &settings);
        if format == CompressionFormat::Bptc && use_simd && has_sse41() {
            assert!(result.is_ok());
        } else {
            assert!(result.is_err());
        }
    });

    let failed = !(format == CompressionFormat::Bptc && use_simd && has_sse41());
    assert_eq!(errors, usize::from(failed));
}
