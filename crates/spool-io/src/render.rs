//! Block-wise offline rendering.

use crate::{Error, Result, StereoSamples};
use spool_core::Effect;

/// Run `effect` over `input` in blocks of `block_size` frames.
///
/// Each block goes through [`Effect::process_block_stereo`], so effects
/// that update parameters per block see the same cadence a host would
/// give them. The final block may be shorter. `on_block` is called after
/// every block with the number of frames rendered so far.
pub fn render_stereo<E: Effect + ?Sized>(
    effect: &mut E,
    input: &StereoSamples,
    block_size: usize,
    mut on_block: impl FnMut(usize),
) -> Result<StereoSamples> {
    if block_size == 0 {
        return Err(Error::InvalidBlockSize);
    }

    let frames = input.len();
    let mut left = vec![0.0f32; frames];
    let mut right = vec![0.0f32; frames];

    tracing::debug!(frames, block_size, latency = effect.latency_samples(), "render start");

    let mut done = 0;
    for ((in_l, in_r), (out_l, out_r)) in input
        .left
        .chunks(block_size)
        .zip(input.right.chunks(block_size))
        .zip(left.chunks_mut(block_size).zip(right.chunks_mut(block_size)))
    {
        effect.process_block_stereo(in_l, in_r, out_l, out_r);
        done += in_l.len();
        on_block(done);
    }

    tracing::debug!(frames = done, "render finished");
    Ok(StereoSamples { left, right })
}
