//! Command-line argument definitions for smartcrop.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Crop images and videos around their most salient content.
#[derive(Debug, Parser)]
#[command(name = "smartcrop", author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crop a `.jpg` image or `.mp4` video to a target size.
    Crop(CropArgs),
    /// Print dimensions, shape and face presence as JSON.
    Info(InfoArgs),
}

#[derive(Debug, Args)]
pub struct CropArgs {
    /// Source file (`.jpg` or `.mp4`).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination file; overwritten if it exists.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target width in pixels.
    #[arg(long)]
    pub width: u32,

    /// Target height in pixels.
    #[arg(long)]
    pub height: u32,

    /// Skip detection and scoring; centred crop-and-fill (still images only).
    #[arg(long, action = ArgAction::SetTrue)]
    pub stupid: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// File to inspect.
    pub file: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Overrides for values otherwise read from the environment.
#[derive(Debug, Default, Args)]
pub struct EngineArgs {
    /// Frames sampled per second of video (overrides SMARTCROP_FPS).
    #[arg(long, value_name = "N")]
    pub fps: Option<f64>,

    /// Parent directory for frame scratch directories (overrides SMARTCROP_WORK_DIR).
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop() {
        let cli = Cli::try_parse_from([
            "smartcrop", "crop", "--input", "in.mp4", "--output", "out.mp4", "--width", "640",
            "--height", "360", "--fps", "2",
        ])
        .unwrap();

        match cli.command {
            Command::Crop(args) => {
                assert_eq!(args.input, PathBuf::from("in.mp4"));
                assert_eq!(args.output, PathBuf::from("out.mp4"));
                assert_eq!((args.width, args.height), (640, 360));
                assert!(!args.stupid);
                assert_eq!(args.engine.fps, Some(2.0));
                assert!(args.engine.work_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_info() {
        let cli = Cli::try_parse_from(["smartcrop", "info", "photo.jpg", "--work-dir", "/scratch"])
            .unwrap();

        match cli.command {
            Command::Info(args) => {
                assert_eq!(args.file, PathBuf::from("photo.jpg"));
                assert_eq!(args.engine.work_dir, Some(PathBuf::from("/scratch")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_crop_requires_dimensions() {
        assert!(Cli::try_parse_from(["smartcrop", "crop", "-i", "a.jpg", "-o", "b.jpg"]).is_err());
    }
}
