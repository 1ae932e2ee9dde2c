use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use minifb::{Key, Window, WindowOptions};

use pf_animator::config::VizConfig;
use pf_animator::frames;
use pf_animator::render::FrameRenderer;
use pf_animator::video::VideoEncoder;

/// Render particle-filter results into an animated video.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the per-timestep result CSVs
    #[arg(long, default_value = "results")]
    results_root: PathBuf,

    /// Path of the encoded video
    #[arg(long, default_value = "particle_filter_animation.mp4")]
    output: PathBuf,

    /// Encoding frame rate
    #[arg(long, default_value_t = 5)]
    fps: u32,

    /// Show each frame in a window while rendering
    #[arg(long)]
    preview: bool,
}

struct Animator {
    config: VizConfig,
    renderer: FrameRenderer,
    encoder: VideoEncoder,
    preview: Option<Window>,
}

impl Animator {
    fn new(config: VizConfig, preview: bool) -> Result<Self> {
        let renderer = FrameRenderer::new(&config);
        let encoder = VideoEncoder::new(
            &config.frames_dir,
            &config.output_path,
            config.frames_per_second,
        )?;
        let preview = if preview {
            Some(
                Window::new(
                    "Particle filter animation",
                    config.frame_width as usize,
                    config.frame_height as usize,
                    WindowOptions::default(),
                )
                .context("creating preview window")?,
            )
        } else {
            None
        };

        Ok(Self {
            config,
            renderer,
            encoder,
            preview,
        })
    }

    fn run(&mut self) -> Result<()> {
        let last = frames::max_frame_index(&self.config.results_root)?;
        info!(
            "rendering {} frames from {}",
            last + 1,
            self.config.results_root.display()
        );

        for index in 0..=last {
            let frame = frames::load_frame(&self.config.results_root, index)
                .with_context(|| format!("loading data for frame {index}"))?;
            // Rough error metric: estimate against truth only, not the full
            // particle population.
            info!(
                "Error at frame[{index}] : {}",
                frame.truth.distance_to(&frame.estimate)
            );
            self.renderer
                .render(&self.config, index, &frame)
                .with_context(|| format!("rendering frame {index}"))?;
            self.encoder
                .write_frame(
                    index,
                    self.renderer.buffer(),
                    self.renderer.width(),
                    self.renderer.height(),
                )
                .with_context(|| format!("writing frame {index}"))?;
            self.update_preview()?;
        }

        self.encoder.finish()?;
        info!("wrote {}", self.config.output_path.display());
        Ok(())
    }

    fn update_preview(&mut self) -> Result<()> {
        let Some(window) = self.preview.as_mut() else {
            return Ok(());
        };
        if !window.is_open() || window.is_key_down(Key::Escape) {
            self.preview = None;
            return Ok(());
        }
        let pixels = rgb_to_argb(self.renderer.buffer());
        window
            .update_with_buffer(
                &pixels,
                self.renderer.width() as usize,
                self.renderer.height() as usize,
            )
            .context("updating preview window")?;
        thread::sleep(Duration::from_millis(self.config.preview_interval_ms));
        Ok(())
    }
}

fn rgb_to_argb(rgb: &[u8]) -> Vec<u32> {
    rgb.chunks_exact(3)
        .map(|p| (255u32 << 24) | (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = VizConfig {
        results_root: cli.results_root,
        output_path: cli.output,
        frames_per_second: cli.fps,
        ..VizConfig::default()
    };

    Animator::new(config, cli.preview)?.run()
}
