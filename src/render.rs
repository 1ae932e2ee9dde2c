//! Two-panel frame rendering: spatial state on top, sensor strip below.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::full_palette::ORANGE;

use crate::config::VizConfig;
use crate::frames::FrameData;

/// Render target reused across frames. Every frame repaints the whole
/// buffer, so nothing from the previous timestep can bleed through.
pub struct FrameRenderer {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
}

impl FrameRenderer {
    pub fn new(config: &VizConfig) -> Self {
        Self {
            width: config.frame_width,
            height: config.frame_height,
            buffer: vec![0; (config.frame_width * config.frame_height * 3) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB8 pixels of the last rendered frame.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn render(&mut self, config: &VizConfig, index: usize, frame: &FrameData) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let root = BitMapBackend::with_buffer(&mut self.buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        // Spatial panel gets 4/5 of the height, the sensor strip the rest.
        let (spatial, sensor) = root.split_vertically(height * 4 / 5);
        draw_spatial_panel(&spatial, config, index, frame)?;
        draw_sensor_panel(&sensor, config, frame)?;
        root.present()?;
        Ok(())
    }
}

/// Per-particle opacity: weights scaled against the frame maximum, so the
/// heaviest particle renders at `max_opacity` and everything else below it.
///
/// When no weight is finite and positive the scaling is undefined; every
/// particle then gets 0.0, the same opacity a zero-weight particle gets on
/// the normal path. Never NaN.
pub fn particle_opacities(weights: &[f64], max_opacity: f64) -> Vec<f64> {
    let max_w = weights
        .iter()
        .copied()
        .filter(|w| w.is_finite())
        .fold(0.0_f64, f64::max);
    if max_w <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights
        .iter()
        .map(|&w| {
            if w.is_finite() && w > 0.0 {
                max_opacity * (w / max_w)
            } else {
                0.0
            }
        })
        .collect()
}

/// Where the legend proxy marker for the particle cloud is parked.
///
/// Translucent scatter points make an unreadable legend swatch, so one extra
/// marker at fixed 0.5 opacity carries the legend entry. Its position is
/// derived from the view bounds, never from the data, so it stays out of
/// frame no matter where the particles are.
pub fn legend_marker_position(config: &VizConfig) -> (f64, f64) {
    (
        config.spatial_x_limits.0 - 100.0,
        config.spatial_y_limits.0 - 100.0,
    )
}

fn draw_spatial_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    config: &VizConfig,
    index: usize,
    frame: &FrameData,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(format!("Particle filter at time {index}"), ("sans-serif", 22))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(44)
        .build_cartesian_2d(
            config.spatial_x_limits.0..config.spatial_x_limits.1,
            config.spatial_y_limits.0..config.spatial_y_limits.1,
        )?;
    chart.configure_mesh().x_desc("x (m)").y_desc("y (m)").draw()?;

    // Cloud first so both state markers stay on top of it.
    let weights: Vec<f64> = frame.particles.iter().map(|p| p.w).collect();
    let alphas = particle_opacities(&weights, config.particle_max_opacity);
    chart.draw_series(
        frame
            .particles
            .iter()
            .zip(&alphas)
            .map(|(p, &alpha)| Circle::new((p.x, p.y), 3, RED.mix(alpha).filled())),
    )?;

    let proxy = legend_marker_position(config);
    chart
        .draw_series(std::iter::once(Circle::new(proxy, 3, RED.mix(0.5).filled())))?
        .label("Particles")
        .legend(|(x, y)| Circle::new((x, y), 3, RED.mix(0.5).filled()));

    chart
        .draw_series(std::iter::once(Circle::new(
            (frame.truth.x, frame.truth.y),
            5,
            GREEN.filled(),
        )))?
        .label("True state")
        .legend(|(x, y)| Circle::new((x, y), 5, GREEN.filled()));

    // Estimate last: it draws above the true state.
    chart
        .draw_series(std::iter::once(Circle::new(
            (frame.estimate.x, frame.estimate.y),
            5,
            BLUE.filled(),
        )))?
        .label("Estimated state")
        .legend(|(x, y)| Circle::new((x, y), 5, BLUE.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn draw_sensor_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    config: &VizConfig,
    frame: &FrameData,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption("Sensor readings visualized", ("sans-serif", 18))
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(44)
        .build_cartesian_2d(
            config.sensor_x_limits.0..config.sensor_x_limits.1,
            config.sensor_y_limits.0..config.sensor_y_limits.1,
        )?;
    // The y dimension is layout only; no ticks, no horizontal grid.
    chart
        .configure_mesh()
        .y_labels(0)
        .disable_y_mesh()
        .x_desc("Sensor reading (m)")
        .draw()?;

    let actual = frame.actual_reading;
    let noisy = frame.noisy_reading;
    chart
        .draw_series(LineSeries::new(vec![(0.0, 1.0), (actual, 1.0)], &BLUE))?
        .label(format!("Actual sensor reading: {actual:.2}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    chart
        .draw_series(LineSeries::new(vec![(0.0, 0.0), (noisy, 0.0)], &ORANGE))?
        .label(format!("Noisy sensor reading: {noisy:.2}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &ORANGE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}
