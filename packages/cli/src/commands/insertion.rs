use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pageblocks_geometry::{insertion_index as index_for, marker_position, Rect};

#[derive(Args, Debug)]
pub struct InsertionArgs {
    /// Pointer y position in px
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: f64,

    /// Child rect as top:bottom, in document order (repeatable)
    #[arg(short, long = "rect", value_name = "TOP:BOTTOM")]
    pub rects: Vec<Rect>,

    /// Container rect as top:bottom (defaults to the span of the children)
    #[arg(short, long, value_name = "TOP:BOTTOM")]
    pub container: Option<Rect>,

    /// Marker offset in px (defaults to the config value)
    #[arg(short, long)]
    pub offset: Option<f64>,
}

/// Drop index and marker position for the given geometry
fn compute(args: &InsertionArgs, default_offset: f64) -> (usize, f64) {
    let container = args.container.unwrap_or_else(|| {
        match (args.rects.first(), args.rects.last()) {
            (Some(first), Some(last)) => Rect::new(first.top, last.bottom),
            _ => Rect::new(0.0, 0.0),
        }
    });
    let offset = args.offset.unwrap_or(default_offset);

    let index = index_for(args.y, &args.rects);
    let marker = marker_position(index, &args.rects, &container, offset);
    (index, marker)
}

pub fn insertion_index(args: InsertionArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let (index, marker) = compute(&args, config.marker_offset);

    println!(
        "{} {} of {}",
        "Index:".bright_white().bold(),
        index,
        args.rects.len()
    );
    println!("{} {}", "Marker:".bright_white().bold(), marker);

    Ok(())
}
