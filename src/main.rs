use std::io::stdout;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::{cursor, ExecutableCommand};
use log::{info, warn};

use whitted::config::{self, CliArguments};
use whitted::render::{
    render, RenderImage, RenderSettings, RenderStatus, DEFAULT_PROGRESS_INTERVAL,
};

fn main() -> whitted::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArguments::parse();
    let output_path = args.output.as_path();

    let exit_flag = Arc::new(AtomicBool::new(false));
    {
        let handler_exit_flag = exit_flag.clone();
        ctrlc::set_handler(move || {
            let _ = stdout().execute(cursor::Show);
            handler_exit_flag.store(true, Ordering::Relaxed)
        })?;
    }

    let (scene, camera) = config::load(&args)?;
    let mut render_image = RenderImage::new(args.width, args.height)?;

    let settings = RenderSettings {
        max_depth: args.depth,
        show_progress: true,
        incremental: args.incremental.then_some(output_path),
        progress_interval: DEFAULT_PROGRESS_INTERVAL,
    };

    let start_time = Instant::now();
    let status = render(&scene, &camera, &settings, &mut render_image, &exit_flag)?;
    let duration = start_time.elapsed().as_secs_f32();

    match status {
        RenderStatus::Complete => {
            info!("Rendered {} rows in {duration:0.2}s", render_image.height());
        }
        RenderStatus::Interrupted { rows_done } => {
            warn!(
                "Render interrupted after {rows_done}/{} rows in {duration:0.2}s, saving partial image",
                render_image.height()
            );
        }
    }

    render_image.save(output_path)?;
    info!("Image saved to \"{}\"", output_path.display());
    Ok(())
}
