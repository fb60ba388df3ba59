use clap::{Parser, Subcommand};
use glam::Vec3;
use horizon_common::{FrameState, VertexInput};
use horizon_config::SceneConfig;
use horizon_kernel::{ParConfig, transform_vertex, world_position};
use horizon_render::{DebugTextRenderer, Renderer, SKY_CUBE_VERTICES};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "horizon-cli", about = "CLI tool for horizon sky rendering")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the byte layout of the frame uniform block
    Layout,
    /// Transform a single local-space position
    Transform {
        /// Scene file (.json, .yaml, .yml); built-in default if omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Local-space position as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        position: Vec3,
    },
    /// Run the sky stage over the sky cube and print every vertex
    Dump {
        /// Scene file (.json, .yaml, .yml); built-in default if omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Worker threads for dispatch (default: available parallelism)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let parse = |v: &str| {
        v.parse::<f32>()
            .map_err(|e| format!("invalid component {v:?}: {e}"))
    };
    Ok(Vec3::new(parse(*x)?, parse(*y)?, parse(*z)?))
}

fn load_scene(path: Option<PathBuf>) -> anyhow::Result<SceneConfig> {
    match path {
        Some(path) => {
            let scene = SceneConfig::load(&path)?;
            tracing::debug!(path = %path.display(), ?scene, "scene loaded");
            Ok(scene)
        }
        None => {
            tracing::debug!("using built-in default scene");
            Ok(SceneConfig::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("horizon-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: distance_scale={}", horizon_kernel::DISTANCE_SCALE);
            println!("render: {}", horizon_render::crate_info());
            println!("frame block: {} bytes", FrameState::SIZE);
        }
        Commands::Layout => {
            println!("FrameState ({} bytes)", FrameState::SIZE);
            for field in FrameState::LAYOUT {
                println!(
                    "  {:<18} offset={:>3} size={:>2}",
                    field.name, field.offset, field.size
                );
            }
        }
        Commands::Transform { scene, position } => {
            let frame = load_scene(scene)?.to_frame_state();
            let out = transform_vertex(&frame, VertexInput::from(position));
            let w = world_position(position, frame.camera_origin());
            let clip = out.clip_position;
            let f = out.forwarded_position;
            println!("forwarded: ({}, {}, {})", f.x, f.y, f.z);
            println!("world:     ({}, {}, {})", w.x, w.y, w.z);
            println!("clip:      ({}, {}, {}, {})", clip.x, clip.y, clip.z, clip.w);
        }
        Commands::Dump { scene, threads } => {
            let frame = load_scene(scene)?.to_frame_state();
            let renderer = DebugTextRenderer::with_dispatch(ParConfig {
                num_threads: threads,
                ..ParConfig::default()
            });
            print!("{}", renderer.render(&frame, &SKY_CUBE_VERTICES));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vec3_accepts_spaces_and_signs() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
    }

    #[test]
    fn parse_vec3_rejects_wrong_arity() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,3,4").is_err());
    }

    #[test]
    fn parse_vec3_rejects_garbage() {
        let err = parse_vec3("1,two,3").unwrap_err();
        assert!(err.contains("two"));
    }

    #[test]
    fn cli_parses_transform() {
        let cli = Cli::try_parse_from(["horizon-cli", "transform", "--position", "0,0,1"]).unwrap();
        match cli.command {
            Commands::Transform { scene, position } => {
                assert!(scene.is_none());
                assert_eq!(position, Vec3::Z);
            }
            _ => panic!("expected transform"),
        }
    }

    #[test]
    fn cli_parses_negative_position() {
        let cli = Cli::try_parse_from(["horizon-cli", "transform", "-p", "-1,0,0"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Transform { position, .. } if position == Vec3::NEG_X
        ));
    }

    #[test]
    fn load_scene_defaults_without_path() {
        assert_eq!(load_scene(None).unwrap(), SceneConfig::default());
    }

    #[test]
    fn load_scene_reports_missing_file() {
        let err = load_scene(Some(PathBuf::from("does/not/exist.yaml"))).unwrap_err();
        assert!(err.downcast_ref::<horizon_config::ConfigError>().is_some());
    }

    #[test]
    fn cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
