//! Every block on the calling thread.

use super::{CompressionJob, ExecutionJob};
use crate::timing::StopWatch;

pub(super) fn run(job: &CompressionJob<'_>, output: &mut [u8]) -> f64 {
    let all_blocks = ExecutionJob::new(0, job.block_count());
    let mut total_ms = 0.0;
    for _ in 0..job.repetitions() {
        let mut stopwatch = StopWatch::new();
        stopwatch.start();
        job.encode_blocks(all_blocks, output, true);
        stopwatch.stop();
        total_ms += stopwatch.time_in_milliseconds();
    }
    total_ms / job.repetitions() as f64
}
