use std::path::PathBuf;

/// Visualization parameters. `Default` reproduces the constants the tool has
/// always used; the CLI only overrides paths and the frame rate.
#[derive(Debug, Clone)]
pub struct VizConfig {
    /// Directory holding the per-timestep CSVs written by the filter run.
    pub results_root: PathBuf,
    pub spatial_x_limits: (f64, f64),
    pub spatial_y_limits: (f64, f64),
    pub sensor_x_limits: (f64, f64),
    pub sensor_y_limits: (f64, f64),
    /// Opacity of the heaviest particle; everything else scales below it.
    pub particle_max_opacity: f64,
    pub frames_per_second: u32,
    /// Pause between frames when a preview window is up.
    pub preview_interval_ms: u64,
    pub output_path: PathBuf,
    /// Intermediate PNG frames land here before encoding.
    pub frames_dir: PathBuf,
    // libx264 with yuv420p needs even frame dimensions.
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("results"),
            spatial_x_limits: (0.0, 100.0),
            spatial_y_limits: (0.0, 100.0),
            sensor_x_limits: (0.0, 150.0),
            sensor_y_limits: (-3.0, 10.0),
            particle_max_opacity: 0.05,
            frames_per_second: 5,
            preview_interval_ms: 200,
            output_path: PathBuf::from("particle_filter_animation.mp4"),
            frames_dir: PathBuf::from("animation_frames"),
            frame_width: 600,
            frame_height: 800,
        }
    }
}
