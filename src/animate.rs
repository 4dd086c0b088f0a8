use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use gif::{Encoder, Frame, Repeat};

// ---------------------------------------------------------------------------
// GIF assembly from per-measure frame files
// ---------------------------------------------------------------------------

/// Per-frame display time.
pub const FRAME_DELAY_MS: u16 = 1000;

/// How many times the sequence replays before stopping.
pub const REPLAY_COUNT: u16 = 3;

/// Encode the given frame files, in order, into one animated GIF.
///
/// Frames are read back from disk rather than kept in memory: frame
/// generation and sequence assembly are two independent steps, and the
/// intermediate PNGs are a deliberate artifact of their own.
pub fn assemble(frames: &[PathBuf], dest: &Path, delay_ms: u16, replays: u16) -> Result<()> {
    if frames.is_empty() {
        bail!("no frames to assemble into {}", dest.display());
    }

    let mut images = Vec::with_capacity(frames.len());
    for path in frames {
        let img = image::open(path)
            .with_context(|| format!("decoding frame {}", path.display()))?
            .to_rgb8();
        images.push(img);
    }

    let (width, height) = images[0].dimensions();
    for (img, path) in images.iter().zip(frames) {
        if img.dimensions() != (width, height) {
            bail!(
                "frame {} is {}x{}, expected {width}x{height}",
                path.display(),
                img.dimensions().0,
                img.dimensions().1
            );
        }
    }

    let file = File::create(dest)
        .with_context(|| format!("creating animation {}", dest.display()))?;
    let mut encoder = Encoder::new(file, width as u16, height as u16, &[])
        .context("creating GIF encoder")?;
    encoder
        .set_repeat(Repeat::Finite(replays))
        .context("setting GIF repeat count")?;

    for img in &images {
        let mut frame = Frame::from_rgb_speed(width as u16, height as u16, img.as_raw(), 10);
        frame.delay = delay_ms / 10;
        encoder.write_frame(&frame).context("writing GIF frame")?;
    }

    log::debug!("wrote {} ({} frames)", dest.display(), frames.len());
    Ok(())
}
