//! Shapes command implementation.
//!
//! Prints the built-in shape catalog, optionally with each frame drawn out.

use clap::Args;

use crate::error::{Result, WiggleError};
use crate::output::{plural, Printer};
use crate::types::{Frame, Shape, ShapeLibrary};

/// List the built-in wiggle shapes
#[derive(Args, Debug)]
pub struct ShapesArgs {
    /// Only show this shape
    pub name: Option<String>,

    /// Draw every frame as ASCII art
    #[arg(long)]
    pub frames: bool,
}

pub fn run(args: ShapesArgs, printer: &Printer) -> Result<()> {
    let shapes: Vec<&'static Shape> = match &args.name {
        Some(name) => vec![ShapeLibrary::get(name).ok_or_else(|| WiggleError::Parse {
            message: format!("Unknown shape: {}", name),
            help: Some(format!(
                "Available shapes: {}",
                ShapeLibrary::all().iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
            )),
        })?],
        None => ShapeLibrary::all().to_vec(),
    };

    for shape in shapes {
        printer.info(
            "Shape",
            &format!(
                "{} {}",
                shape.name,
                printer.dim(&format!(
                    "({}, {} per frame)",
                    plural(shape.frame_count(), "frame", "frames"),
                    plural(shape.cell_count(), "cell", "cells")
                ))
            ),
        );
        println!("{}", shape.name);

        if args.frames {
            let art: Vec<Vec<String>> = shape.frames().iter().copied().map(frame_art).collect();
            let rows = art.iter().map(|a| a.len()).max().unwrap_or(0);
            for row in 0..rows {
                let line: Vec<String> = art
                    .iter()
                    .map(|a| {
                        let width = a.first().map_or(0, |r| r.len());
                        format!("{:<width$}", a.get(row).map_or("", |s| s.as_str()))
                    })
                    .collect();
                println!("  {}", line.join("  "));
            }
        }
    }

    Ok(())
}

/// Draw one frame on a grid spanning its offsets, origin marked `o`.
fn frame_art(frame: Frame) -> Vec<String> {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (0, 0, 0, 0);
    for &(dx, dy) in frame {
        min_x = min_x.min(dx);
        max_x = max_x.max(dx);
        min_y = min_y.min(dy);
        max_y = max_y.max(dy);
    }

    (min_y..=max_y)
        .map(|y| {
            (min_x..=max_x)
                .map(|x| match (frame.contains(&(x, y)), (x, y) == (0, 0)) {
                    (true, _) => '#',
                    (false, true) => 'o',
                    (false, false) => '.',
                })
                .collect()
        })
        .collect()
}
