//! Frame persistence and MP4 encoding.
//!
//! Frames are written as numbered PNGs and handed to `ffmpeg` in one shot
//! once the whole sequence exists. A run that dies mid-sequence therefore
//! never leaves a playable-looking but truncated video behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

pub struct VideoEncoder {
    frames_dir: PathBuf,
    output: PathBuf,
    fps: u32,
}

impl VideoEncoder {
    /// Prepares the frames directory, clearing anything a previous run left
    /// behind, including the output video itself.
    pub fn new(frames_dir: &Path, output: &Path, fps: u32) -> Result<Self> {
        fs::create_dir_all(frames_dir)
            .with_context(|| format!("creating {}", frames_dir.display()))?;
        for entry in fs::read_dir(frames_dir)
            .with_context(|| format!("reading {}", frames_dir.display()))?
        {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)
                    .with_context(|| format!("removing stale {}", path.display()))?;
            }
        }
        if output.exists() {
            fs::remove_file(output)
                .with_context(|| format!("removing stale {}", output.display()))?;
        }
        Ok(Self {
            frames_dir: frames_dir.to_path_buf(),
            output: output.to_path_buf(),
            fps,
        })
    }

    /// Persists one rendered frame as `frame_<index:06>.png`.
    pub fn write_frame(&self, index: usize, rgb: &[u8], width: u32, height: u32) -> Result<()> {
        let path = self.frames_dir.join(format!("frame_{index:06}.png"));
        let img = image::RgbImage::from_raw(width, height, rgb.to_vec())
            .context("frame buffer does not match the configured dimensions")?;
        img.save(&path)
            .with_context(|| format!("saving {}", path.display()))?;
        Ok(())
    }

    /// Encodes the written frames into the output video.
    ///
    /// Anything short of a clean ffmpeg exit is fatal; a missing encoder is
    /// an error, not a warning.
    pub fn finish(&self) -> Result<()> {
        let pattern = self.frames_dir.join("frame_%06d.png");
        let status = Command::new("ffmpeg")
            .arg("-y")
            .arg("-framerate")
            .arg(self.fps.to_string())
            .arg("-i")
            .arg(&pattern)
            .arg("-c:v")
            .arg("libx264")
            .arg("-pix_fmt")
            .arg("yuv420p")
            .arg(&self.output)
            .status()
            .context("running ffmpeg (is it installed and on PATH?)")?;
        if !status.success() {
            bail!(
                "ffmpeg exited with {} while encoding {}",
                status,
                self.output.display()
            );
        }
        Ok(())
    }
}
