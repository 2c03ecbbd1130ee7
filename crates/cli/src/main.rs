#![deny(unsafe_code)]
//! CLI binary for inspecting hexgl geometry without a GL context.
//!
//! Subcommands:
//! - `hex` -- tessellate one hexagon and print its vertices
//! - `tiles` -- build a filled tile grid batch and print its size
//! - `camera` -- replay pan/zoom input and print the resulting projection

mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::CliError;
use glam::{Vec3, Vec4};
use hexgl_core::{Batch, Camera, CameraKey, RenderConfig, Stopwatch, TileMap, Vertex};
use std::process;
use std::sync::Once;

#[derive(Parser)]
#[command(name = "hexgl", about = "Inspect batched 2D geometry and camera math")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Render configuration as a JSON string.
    #[arg(long, global = true, default_value = "{}")]
    config: String,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tessellate one hexagon and print its 18 vertices.
    Hex {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f32,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f32,

        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        z: f32,

        /// Distance from center to each corner.
        #[arg(short, long, default_value_t = 0.1)]
        radius: f32,

        /// Base color as r,g,b or r,g,b,a with components in [0, 1].
        #[arg(short, long, default_value = "0.2,0.4,0.6")]
        color: String,
    },
    /// Build a fully occupied tile grid and print the batch size.
    Tiles {
        #[arg(long, default_value_t = 8)]
        columns: usize,

        #[arg(long, default_value_t = 8)]
        rows: usize,

        /// Tile edge length in normalized device units.
        #[arg(long, default_value_t = 0.25)]
        tile_size: f32,
    },
    /// Hold a pan key for N frames, apply K scroll steps, print the camera.
    Camera {
        #[arg(long, value_enum)]
        pan: Option<Pan>,

        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Net scroll steps; negative zooms out.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        scroll: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Pan {
    Up,
    Down,
    Left,
    Right,
}

impl From<Pan> for CameraKey {
    fn from(pan: Pan) -> Self {
        match pan {
            Pan::Up => CameraKey::Up,
            Pan::Down => CameraKey::Down,
            Pan::Left => CameraKey::Left,
            Pan::Right => CameraKey::Right,
        }
    }
}

static LOGGER: Once = Once::new();

fn init_logging(verbose: bool) {
    LOGGER.call_once(|| {
        let default = if verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
            .format_timestamp(None)
            .init();
    });
}

/// Parses `r,g,b` or `r,g,b,a`. A missing alpha is opaque.
fn parse_color(s: &str) -> Result<Vec4, CliError> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::Input(format!("invalid --color '{s}': {e}")))?;
    match parts[..] {
        [r, g, b] => Ok(Vec4::new(r, g, b, 1.0)),
        [r, g, b, a] => Ok(Vec4::new(r, g, b, a)),
        _ => Err(CliError::Input(format!(
            "invalid --color '{s}': expected 3 or 4 components, got {}",
            parts.len()
        ))),
    }
}

fn vertex_json(v: &Vertex) -> serde_json::Value {
    serde_json::json!({
        "position": v.position().to_array(),
        "color": v.color().to_array(),
        "tex_coord": v.tex_coord().to_array(),
        "textured": v.is_textured(),
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = RenderConfig::from_json(&cli.config)?;

    match cli.command {
        Command::Hex {
            x,
            y,
            z,
            radius,
            color,
        } => {
            let color = parse_color(&color)?;
            let mut batch = Batch::with_config(&config);
            batch.push_hex_at(Vec3::new(x, y, z), color, radius);

            if cli.json {
                let vertices: Vec<_> = batch.vertices().iter().map(vertex_json).collect();
                let info = serde_json::json!({
                    "triangles": batch.triangle_count(),
                    "vertices": vertices,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (i, v) in batch.vertices().iter().enumerate() {
                    let p = v.position();
                    let c = v.color();
                    println!(
                        "{i:2}  pos ({:.4}, {:.4}, {:.4})  rgba ({:.3}, {:.3}, {:.3}, {:.3})",
                        p.x, p.y, p.z, c.x, c.y, c.z, c.w
                    );
                }
            }
        }
        Command::Tiles {
            columns,
            rows,
            tile_size,
        } => {
            let timer = Stopwatch::new();
            let map = TileMap::filled(columns, rows, 1)?;
            let mut batch = Batch::with_config(&config);
            let quads = map.push_into(&mut batch, tile_size, 0.0);
            let bytes = std::mem::size_of_val(batch.vertices());
            log::debug!("built {quads} tile quads in {} us", timer.elapsed_us());

            if cli.json {
                let info = serde_json::json!({
                    "columns": columns,
                    "rows": rows,
                    "tile_size": tile_size,
                    "cells": quads,
                    "vertices": batch.len(),
                    "bytes": bytes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{columns}x{rows} tiles of {tile_size}: {quads} cells, {} vertices, {bytes} bytes",
                    batch.len()
                );
            }
        }
        Command::Camera {
            pan,
            frames,
            scroll,
        } => {
            let mut camera = Camera::with_config(config.camera);
            camera.scroll(scroll);
            if let Some(pan) = pan {
                camera.keydown(pan.into());
            }
            for _ in 0..frames {
                camera.update_camera();
            }

            let translate = camera.translate();
            let projection = camera.projection().to_cols_array_2d();
            if cli.json {
                let info = serde_json::json!({
                    "frames": frames,
                    "translate": translate.to_array(),
                    "zoom_level": camera.zoom_level(),
                    "projection": projection,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("translate ({:.4}, {:.4})", translate.x, translate.y);
                println!("zoom      {:.4}", camera.zoom_level());
                println!("projection (column-major):");
                for col in projection {
                    println!(
                        "  [{:8.4} {:8.4} {:8.4} {:8.4}]",
                        col[0], col[1], col[2], col[3]
                    );
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_color_rgb_is_opaque() {
        let c = parse_color("0.1, 0.2, 0.3").unwrap();
        assert_eq!(c, Vec4::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn parse_color_rgba() {
        let c = parse_color("1,0,0,0.5").unwrap();
        assert_eq!(c, Vec4::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn parse_color_wrong_arity_is_input_error() {
        let err = parse_color("1,0").unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn parse_color_garbage_is_input_error() {
        let err = parse_color("red").unwrap_err();
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn bad_config_exits_with_input_code() {
        let cli = Cli::parse_from(["hexgl", "--config", "{nope", "camera"]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn zero_column_grid_exits_with_render_code() {
        let cli = Cli::parse_from(["hexgl", "tiles", "--columns", "0"]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn overflowing_grid_exits_with_render_code() {
        let cli = Cli::parse_from([
            "hexgl",
            "tiles",
            "--columns",
            "18446744073709551615",
            "--rows",
            "2",
        ]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn subcommands_succeed_with_defaults() {
        for args in [
            vec!["hexgl", "hex"],
            vec!["hexgl", "--json", "tiles"],
            vec!["hexgl", "camera", "--pan", "left", "--frames", "3", "--scroll", "-2"],
        ] {
            run(Cli::parse_from(args)).unwrap();
        }
    }

    #[test]
    fn pan_maps_to_camera_key() {
        assert_eq!(CameraKey::from(Pan::Up), CameraKey::Up);
        assert_eq!(CameraKey::from(Pan::Right), CameraKey::Right);
    }
}
