//! This binary crate runs a Tinsel scene without a window. Every frame is logged by the debug
//! renderer, and the scene can be driven by typing commands on stdin.

mod logging;
mod parse;

use clap::Parser;
use color_eyre::Result;
use debug_renderer::DebugRenderer;
use parse::parse_command;
use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
    thread,
};
use tinsel_formations::SceneMode;
use tinsel_scene::{run_animation_loop, PhotoPayload, Scene, SceneConfig, SceneHandle};
use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};
use tracing_unwrap::ResultExt;

const HELP_TEXT: &str = r#"Commands:

    move <x> <y>    -  Move the pointer to pixel (x, y) from the top left
    click           -  Click to advance the mode
    mode <mode>     -  Jump straight to TREE, SCATTER, or FOCUS
    photo <path>    -  Add the image at the given path to the scene
    resize <w> <h>  -  Resize the viewport
    hide            -  Toggle the overlay
    quit            -  Stop the scene"#;

/// Run a Tinsel scene headlessly, logging every frame.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The RON config file for the scene. It gets created with the defaults if it doesn't exist.
    #[arg(short, long, default_value = "tinsel.ron")]
    config: PathBuf,

    /// Stop after this many frames.
    #[arg(short, long)]
    frames: Option<u64>,

    /// The directory to write log files to.
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

/// A command typed on stdin.
#[derive(Clone, Debug, PartialEq)]
pub enum Command<'s> {
    /// Move the pointer to this pixel position.
    Move(f32, f32),

    /// Click without dragging.
    Click,

    /// Set the mode directly.
    Mode(SceneMode),

    /// Add a photo from a file.
    Photo(&'s str),

    /// Resize the viewport.
    Resize(u32, u32),

    /// Toggle the overlay.
    Hide,

    /// Stop the scene.
    Quit,
}

impl<'s> Command<'s> {
    /// Send this command to the scene. Returns `false` if the scene should stop.
    fn execute(self, handle: &SceneHandle) -> bool {
        match self {
            Command::Move(x, y) => handle.pointer_moved(x, y),
            Command::Click => handle.click(),
            Command::Mode(mode) => handle.set_mode(mode),
            Command::Photo(path) => {
                handle.add_photo_to_scene(PhotoPayload::File(Path::new(path).to_path_buf()));
            }
            Command::Resize(width, height) => handle.resize(width, height),
            Command::Hide => handle.toggle_overlay(),
            Command::Quit => return false,
        }
        true
    }
}

/// Read commands from stdin until EOF or `quit`, sending them to the scene.
#[instrument(skip_all)]
fn read_stdin_commands(handle: SceneHandle, quit: oneshot::Sender<()>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!(?error, "Failed to read from stdin");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok((_, command)) => {
                debug!(?command, "Read command");
                if !command.execute(&handle) {
                    let _ = quit.send(());
                    return;
                }
            }
            Err(_) => println!("Unrecognised command {line:?}\n\n{HELP_TEXT}"),
        }
    }

    debug!("Stdin closed");
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let _guard = logging::init_tracing(&args.log_dir);
    info!(?args, "Starting headless scene");

    let config = SceneConfig::from_file(&args.config);
    let (mut scene, handle) = Scene::new(config);

    let (quit_tx, quit_rx) = oneshot::channel();
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || read_stdin_commands(handle, quit_tx))
        .unwrap_or_log();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let kill = async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Received Ctrl+C"),
                Err(error) => warn!(%error, "Failed to listen for Ctrl+C"),
            },
            Ok(()) = quit_rx => info!("Quit requested"),
        }
    };

    let mut renderer = DebugRenderer::new();
    let ticks = runtime.block_on(run_animation_loop(
        &mut scene,
        &mut renderer,
        kill,
        args.frames,
    ));

    info!(ticks, photos = scene.store().photo_count(), "Scene stopped");
    Ok(())
}
