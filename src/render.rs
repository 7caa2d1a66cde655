use std::io::{self, stdout, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand};
use image::{ImageBuffer, Rgb};
use log::{info, warn};

use crate::camera::{Camera, RaySetup};
use crate::constants::AIR_INDEX_OF_REFRACTION;
use crate::error::{Error, Result};
use crate::render_objects::Scene;
use crate::vector::{Color, Optics};

pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Incremental output is written on every n-th progress update.
const INCREMENTAL_SAVE_EVERY: usize = 8;

pub struct RenderSettings<'a> {
    pub max_depth: u32,
    pub show_progress: bool,
    pub incremental: Option<&'a Path>,
    /// Minimum time between progress updates.
    pub progress_interval: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Complete,
    Interrupted { rows_done: u32 },
}

pub struct RenderImage {
    width: u32,
    height: u32,
    buffer: ImageBuffer<Rgb<u8>, Vec<u8>>,
}

impl RenderImage {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize { width, height });
        }
        Ok(Self {
            width,
            height,
            buffer: ImageBuffer::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.buffer.get_pixel(x, y)
    }

    fn render_row(&mut self, scene: &Scene, setup: &RaySetup, y: u32, max_depth: u32) {
        for x in 0..self.width {
            let ray = setup.compute_ray(x, y);
            let color = scene.trace_ray(&ray, AIR_INDEX_OF_REFRACTION, max_depth);
            self.buffer.put_pixel(x, y, color_to_rgb(color));
        }
    }

    pub fn save(&self, output_path: &Path) -> Result<()> {
        self.buffer.save(output_path)?;
        Ok(())
    }
}

/// Clamp to the displayable range and quantize to 8 bits per channel.
pub fn color_to_rgb(color: Color) -> Rgb<u8> {
    let color = color.clamped_channels(0.0, 1.0);
    Rgb([
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ])
}

struct Progress<W: Write> {
    total_rows: u32,
    interval: Duration,
    start_time: Instant,
    last_update: Instant,
    updates: usize,
    out: Option<W>,
}

impl<W: Write> Progress<W> {
    fn new(total_rows: u32, interval: Duration, mut out: Option<W>) -> io::Result<Self> {
        if let Some(out) = out.as_mut() {
            out.execute(cursor::Hide)?;
        }
        let now = Instant::now();
        Ok(Self {
            total_rows,
            interval,
            start_time: now,
            last_update: now,
            updates: 0,
            out,
        })
    }

    /// Returns true when a periodic update was due.
    fn tick(&mut self, rows_done: u32) -> io::Result<bool> {
        if self.last_update.elapsed() < self.interval {
            return Ok(false);
        }
        self.last_update = Instant::now();
        self.updates += 1;
        self.draw(rows_done)?;
        Ok(true)
    }

    fn draw(&mut self, rows_done: u32) -> io::Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let total_rows = self.total_rows;
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let total = (elapsed / rows_done as f32) * total_rows as f32;

        let term_width = terminal::size().map(|(w, _)| w).unwrap_or(32) as usize;
        let msg_time = format!("{rows_done}/{total_rows} Rows in {elapsed:0.2}s / {total:0.2}s");
        let progress_width = term_width.saturating_sub(msg_time.len() + 3).max(8);
        let render_progress =
            (progress_width as f32 * rows_done as f32 / total_rows as f32).ceil() as usize;

        let msg_progress = (0..progress_width)
            .map(|i| if i <= render_progress { '#' } else { ' ' })
            .collect::<String>();

        out.queue(cursor::SavePosition)?;
        out.write_all(format!("{msg_time} [{msg_progress}]").as_bytes())?;
        out.queue(cursor::RestorePosition)?;
        out.flush()?;

        out.queue(cursor::RestorePosition)?;
        out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for Progress<W> {
    // Also reached when `render` returns early with an error
    fn drop(&mut self) {
        if let Some(out) = self.out.as_mut() {
            let _ = out.execute(cursor::Show);
        }
    }
}

/// Shade every pixel of `image`, one row at a time, until done or `exit_flag` is raised.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    image: &mut RenderImage,
    exit_flag: &AtomicBool,
) -> Result<RenderStatus> {
    let setup = camera.ray_setup(image.width(), image.height());

    info!("Starting render");
    info!("\tImage size: {}x{}", image.width(), image.height());
    info!("\tDepth:      {}", settings.max_depth);
    info!("\tSpheres:    {}", scene.spheres().len());

    let mut progress = Progress::new(
        image.height(),
        settings.progress_interval,
        settings.show_progress.then(stdout),
    )?;
    let mut status = RenderStatus::Complete;

    for y in 0..image.height() {
        if exit_flag.load(Ordering::Relaxed) {
            warn!("Interrupt received after {y} rows");
            status = RenderStatus::Interrupted { rows_done: y };
            break;
        }

        image.render_row(scene, &setup, y, settings.max_depth);

        if progress.tick(y + 1)? && progress.updates % INCREMENTAL_SAVE_EVERY == 0 {
            if let Some(output_path) = settings.incremental {
                image.save(output_path)?;
            }
        }
    }

    progress.finish()?;
    Ok(status)
}
