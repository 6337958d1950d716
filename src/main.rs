//! ascii-cube: a sphere-traced cube spinning in your terminal
//!
//! Controls:
//! - Space: Pause
//! - M: Toggle reduced motion (freezes the spin, keeps the bounce)
//! - Q or Escape: Quit
//!
//! Usage:
//!   ascii-cube                      - Run interactive mode
//!   ascii-cube snapshot --frames 10 - Render frames to ./debug/frame_XXX.txt files

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ascii_cube::calibration::CellSize;
use ascii_cube::terminal::{parse_key_event, Action};
use ascii_cube::{Animator, AppConfig, InitError, Renderer, TerminalDisplay};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii-cube")]
#[command(version = "0.1.0")]
#[command(about = "Sphere-traced rotating cube rendered as ASCII art")]
struct Cli {
    /// Path to config file (defaults to ./ascii-cube.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the cube in the terminal (default)
    Run {
        /// Freeze the spin
        #[arg(long)]
        reduced_motion: bool,
    },

    /// Render frames headlessly to text files
    Snapshot {
        /// Number of frames to write
        #[arg(short, long, default_value_t = 10)]
        frames: u32,
        /// Output grid width in characters
        #[arg(long, default_value_t = 120)]
        cols: u32,
        /// Output grid height in characters
        #[arg(long, default_value_t = 36)]
        rows: u32,
        /// Directory to write frame_XXX.txt files into
        #[arg(short, long, default_value = "debug")]
        out: PathBuf,
    },

    /// Validate configuration file
    CheckConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_or_default(cli.config.as_deref()).map_err(InitError::from)?;

    match cli.command {
        None => run_interactive(config, false)?,
        Some(Commands::Run { reduced_motion }) => run_interactive(config, reduced_motion)?,
        Some(Commands::Snapshot {
            frames,
            cols,
            rows,
            out,
        }) => run_snapshot(&config, frames, cols, rows, &out)?,
        Some(Commands::CheckConfig) => check_config(&config),
    }

    Ok(())
}

/// Recalibrate the renderer against the terminal's current size and font
fn fit_to_terminal(renderer: &mut Renderer, terminal: &TerminalDisplay) {
    let cell = terminal.cell_size();
    let (width_px, height_px) = terminal.surface_pixels(cell);
    renderer.resize(width_px, height_px, cell.width, cell.height);
}

fn status_line(renderer: &Renderer, animator: &Animator, paused: bool) -> String {
    format!(
        "{}x{} | Motion: {}{} | [SPACE] Pause  [M]otion  [Q]uit",
        renderer.cols(),
        renderer.rows(),
        if animator.reduced_motion() { "reduced" } else { "full" },
        if paused { " | PAUSED" } else { "" },
    )
}

fn run_interactive(config: AppConfig, reduced_motion: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fallback = CellSize::new(config.terminal.cell_width, config.terminal.cell_height);
    let mut terminal = TerminalDisplay::new(fallback)?;

    let mut options = config.render_options();
    options.respect_reduced_motion |= reduced_motion;

    let mut renderer = Renderer::new(config.to_scene(), options, config.grid_limits());
    let mut animator = Animator::new(config.motion(), &options);
    fit_to_terminal(&mut renderer, &terminal);

    let poll = Duration::from_millis(config.terminal.poll_ms);
    let mut last_tick = Instant::now();
    let mut paused = false;

    'main_loop: loop {
        if terminal.check_resize() {
            fit_to_terminal(&mut renderer, &terminal);
            // A grid pinned at its minimum yields no new frame, so repaint the last one
            terminal.render(renderer.buffer(), &status_line(&renderer, &animator, paused))?;
        }

        match terminal.poll_input(poll) {
            Ok(Some(key_event)) => match parse_key_event(key_event) {
                Action::Quit => break 'main_loop,
                Action::Pause => {
                    paused = !paused;
                    terminal.render_status(&status_line(&renderer, &animator, paused))?;
                }
                Action::ToggleMotion => {
                    let enabled = !animator.reduced_motion();
                    animator.set_reduced_motion(enabled);
                    terminal.render_status(&status_line(&renderer, &animator, paused))?;
                }
                Action::None => {}
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Input error");
            }
        }

        let now = Instant::now();
        let dt = now - last_tick;
        last_tick = now;

        // Time spent paused is dropped rather than caught up
        if paused {
            continue;
        }

        let Some(pose) = animator.tick(dt) else {
            continue;
        };

        let status = status_line(&renderer, &animator, paused);
        if let Some(frame) = renderer.render(pose.rotation, pose.z_offset) {
            if let Err(e) = terminal.render(frame, &status) {
                if e.kind() == std::io::ErrorKind::BrokenPipe {
                    break;
                }
                tracing::error!(error = %e, "Render error");
            }
        }
    }

    Ok(())
}

/// Render `frames` frames to `out/frame_XXX.txt` without touching the terminal
fn run_snapshot(
    config: &AppConfig,
    frames: u32,
    cols: u32,
    rows: u32,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out)?;

    let options = config.render_options();
    let mut renderer = Renderer::new(config.to_scene(), options, config.grid_limits());
    let mut animator = Animator::new(config.motion(), &options);

    let cell = CellSize::new(config.terminal.cell_width, config.terminal.cell_height);
    renderer.resize(
        cols as f32 * cell.width,
        rows as f32 * cell.height,
        cell.width,
        cell.height,
    );
    println!(
        "Rendering {} frames at {}x{} to {}",
        frames,
        renderer.cols(),
        renderer.rows(),
        out.display()
    );

    let step = if options.target_frame_interval.is_zero() {
        Duration::from_millis(33)
    } else {
        options.target_frame_interval
    };

    for frame in 0..frames {
        let pose = animator.tick(step).unwrap_or_else(|| animator.pose());
        renderer.render(pose.rotation, pose.z_offset);

        let filename = out.join(format!("frame_{:03}.txt", frame));
        std::fs::write(&filename, renderer.buffer())?;
        println!("Wrote {}", filename.display());
    }

    Ok(())
}

/// Print the effective configuration
fn check_config(config: &AppConfig) {
    println!("✓ Configuration is valid\n");
    println!("Scene:");
    println!("  Camera: {:?}", config.scene.camera);
    println!("  Half extent: {:?}", config.scene.half_extent);
    println!("  Light: {:?}", config.scene.light_dir);
    println!("  Ramp: {:?}", config.scene.ramp);
    println!("\nRender:");
    println!("  Max steps: {}", config.render.max_steps);
    println!("  Target FPS: {}", config.render.target_fps);
    println!("  Reduced motion: {}", config.render.reduced_motion);
    println!(
        "  Minimum grid: {}x{}",
        config.render.min_cols, config.render.min_rows
    );
    println!("\nAnimation:");
    println!("  Spin: {} rad/s", config.animation.rot_speed);
    println!(
        "  Bounce: {} @ {} Hz",
        config.animation.bounce_amp, config.animation.bounce_hz
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ascii_cube::RenderOptions;

    #[test]
    fn test_cli_parses_snapshot() {
        let cli = Cli::try_parse_from(["ascii-cube", "snapshot", "--frames", "3", "--cols", "40"]).unwrap();
        match cli.command {
            Some(Commands::Snapshot { frames, cols, rows, .. }) => {
                assert_eq!(frames, 3);
                assert_eq!(cols, 40);
                assert_eq!(rows, 36);
            }
            _ => panic!("expected snapshot command"),
        }
    }

    #[test]
    fn test_cli_defaults_to_run() {
        let cli = Cli::try_parse_from(["ascii-cube", "--log-level", "debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.log_level, Some(LogLevel::Debug)));
    }

    #[test]
    fn test_snapshot_writes_frames() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::default();
        run_snapshot(&config, 3, 60, 32, temp_dir.path()).unwrap();

        for i in 0..3 {
            let path = temp_dir.path().join(format!("frame_{:03}.txt", i));
            let text = std::fs::read_to_string(path).unwrap();
            assert_eq!(text.lines().count(), 32);
            assert!(text.chars().any(|c| c != ' ' && c != '\n'));
        }
    }

    #[test]
    fn test_status_line() {
        let renderer = Renderer::new(
            AppConfig::default().to_scene(),
            RenderOptions::default(),
            Default::default(),
        );
        let animator = Animator::new(Default::default(), &RenderOptions::default());
        let status = status_line(&renderer, &animator, true);
        assert!(status.contains("PAUSED"));
        assert!(status.contains("full"));
    }
}
