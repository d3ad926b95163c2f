use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use civic_compass::projector::{
    to_political_compass, CanvasFrame, ChartFrame, CompassAnimator, SphereLayout, ViewAngle,
};
use civic_compass::snapshot::{diff_scores, SnapshotHistory};
use civic_compass::{Axis, CompassConfig, CompassError, CompassReading, Result};

#[derive(Parser)]
#[command(name = "civic-compass")]
#[command(about = "Project 8-axis political compass scores and compare snapshots")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Classic two-axis position and quadrant
    civic-compass political compass.json

    # 3D layout at the export angle
    civic-compass sphere compass.json --format json

    # Step the rotating view for 10 frames
    civic-compass animate compass.json --frames 10

    # Save a snapshot and compare it later
    civic-compass snapshot save compass.json --name "Before election"
    civic-compass snapshot list
    civic-compass snapshot diff <ID1> <ID2>
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the snapshot store
    #[arg(long, default_value = ".civic-compass.json")]
    pub store: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the two-axis political compass position
    Political {
        /// Compass reading (JSON with `dimensions` and `confidence`)
        reading: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compute the 3D sphere layout
    Sphere {
        /// Compass reading (JSON with `dimensions` and `confidence`)
        reading: PathBuf,

        /// Yaw in radians (defaults to the export angle)
        #[arg(long, allow_hyphen_values = true)]
        yaw: Option<f64>,

        /// Pitch in radians (defaults to the export angle)
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f64>,

        /// Available canvas width in pixels
        #[arg(long, default_value = "520")]
        width: f64,

        /// Available canvas height in pixels (defaults to the width)
        #[arg(long)]
        height: Option<f64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Step the rotating view and print each frame
    Animate {
        /// Compass reading (JSON with `dimensions` and `confidence`)
        reading: PathBuf,

        /// Number of frames to render
        #[arg(long, default_value = "5")]
        frames: usize,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Available canvas width in pixels
        #[arg(long, default_value = "520")]
        width: f64,
    },

    /// Show per-axis confidence
    Confidence {
        /// Compass reading (JSON with `dimensions` and `confidence`)
        reading: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Diff two compass readings
    Diff {
        /// Earlier reading
        from: PathBuf,

        /// Later reading
        to: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Manage saved snapshots
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },
}

#[derive(Subcommand)]
pub enum SnapshotCommands {
    /// Save a reading as a new snapshot
    Save {
        /// Compass reading (JSON with `dimensions` and `confidence`)
        reading: PathBuf,

        /// Snapshot name
        #[arg(long)]
        name: Option<String>,

        /// Questionnaire the reading belongs to
        #[arg(long)]
        questionnaire: Option<String>,
    },

    /// List snapshots, newest first
    List {
        /// Filter by questionnaire
        #[arg(long)]
        questionnaire: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show one snapshot
    Show {
        /// Snapshot ID
        id: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Diff two snapshots
    Diff {
        /// Earlier snapshot ID
        from: String,

        /// Later snapshot ID
        to: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Delete a snapshot
    Delete {
        /// Snapshot ID
        id: String,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_scores(reading: &CompassReading) {
    for (axis, value) in reading.dimensions.iter() {
        match value {
            Some(v) => println!("  {:<16} {:+.2}", axis.label(), v),
            None => println!("  {:<16} unscored", axis.label()),
        }
    }
}

/// Shows the political compass point, its quadrant and chart position.
pub fn political(reading_path: &Path, config: &CompassConfig, format: &str) -> Result<()> {
    let reading = CompassReading::from_path(reading_path)?;
    let point = to_political_compass(&reading.dimensions);
    let quadrant = point.quadrant();
    let (x, y) = ChartFrame::from(&config.chart).place(&point);

    if format == "json" {
        print_json(&serde_json::json!({
            "economic": point.economic,
            "social": point.social,
            "quadrant": quadrant,
            "chart": { "x": x, "y": y },
        }))?;
    } else {
        println!("Economic: {:+.2}", point.economic);
        println!("Social:   {:+.2}", point.social);
        println!("Quadrant: {}", quadrant);
        println!("Chart:    ({:.1}, {:.1})", x, y);
    }

    Ok(())
}

/// Prints the 3D layout at a fixed view angle.
pub fn sphere(
    reading_path: &Path,
    config: &CompassConfig,
    yaw: Option<f64>,
    pitch: Option<f64>,
    width: f64,
    height: Option<f64>,
    format: &str,
) -> Result<()> {
    let reading = CompassReading::from_path(reading_path)?;
    let view = ViewAngle::new(
        yaw.unwrap_or(config.export.yaw),
        pitch.unwrap_or(config.export.pitch),
    );
    let frame = CanvasFrame::fit_within(width, height.unwrap_or(f64::INFINITY), &config.render);
    let layout = SphereLayout::compute(&reading, view, frame, config);

    if format == "json" {
        print_json(&layout)?;
    } else {
        print_layout(&layout);
    }

    Ok(())
}

fn print_layout(layout: &SphereLayout) {
    println!(
        "Canvas {:.0}x{:.0}, radius {:.1}, yaw {:.3}, pitch {:.3}",
        layout.frame.width,
        layout.frame.height,
        layout.frame.scale,
        layout.view.yaw,
        layout.view.pitch
    );
    println!("Axes (back to front):");
    for axis in &layout.draw_order {
        let spoke = layout.spoke(*axis);
        let marker = spoke
            .label
            .confidence
            .marker()
            .map(|c| format!(" {}", c))
            .unwrap_or_default();
        println!(
            "  {:<16} tip ({:>6.1}, {:>6.1})  data ({:>6.1}, {:>6.1})  depth {:+.2}{}",
            axis.label(),
            spoke.axis_end.x,
            spoke.axis_end.y,
            spoke.data_end.x,
            spoke.data_end.y,
            spoke.depth,
            marker
        );
    }
}

/// Steps the animator and prints a line per frame.
pub fn animate(
    reading_path: &Path,
    config: &CompassConfig,
    frames: usize,
    fps: f64,
    width: f64,
) -> Result<()> {
    if fps <= 0.0 || !fps.is_finite() {
        return Err(CompassError::InvalidArgument(format!(
            "fps must be positive, got {}",
            fps
        )));
    }
    let dt = Duration::try_from_secs_f64(1.0 / fps).map_err(|e| {
        CompassError::InvalidArgument(format!("fps {} gives no usable frame interval: {}", fps, e))
    })?;

    let reading = CompassReading::from_path(reading_path)?;
    let mut animator = CompassAnimator::new(reading, width, config.clone());

    for i in 0..frames {
        let layout = animator.frame();
        let nearest = layout.draw_order.last().copied().unwrap_or(Axis::Economy);
        println!(
            "frame {:>4}  yaw {:.4}  nearest {}",
            i,
            animator.yaw(),
            nearest.label()
        );
        animator.advance(dt);
    }
    animator.stop();

    Ok(())
}

/// Lists each axis with its response count and confidence level.
pub fn confidence(reading_path: &Path, config: &CompassConfig, format: &str) -> Result<()> {
    let reading = CompassReading::from_path(reading_path)?;
    let threshold = config.confidence.low_threshold;

    if format == "json" {
        let rows: Vec<_> = Axis::ALL
            .iter()
            .map(|axis| {
                serde_json::json!({
                    "axis": axis,
                    "responses": reading.confidence.get(*axis),
                    "level": reading.confidence.level(*axis, threshold),
                })
            })
            .collect();
        print_json(&rows)?;
    } else {
        for axis in Axis::ALL {
            let level = reading.confidence.level(axis, threshold);
            let marker = level.marker().map(String::from).unwrap_or_default();
            println!(
                "  {:<16} {:>3} responses {}",
                axis.label(),
                reading.confidence.get(axis),
                marker
            );
        }
        let low = reading.confidence.low_confidence_axes(threshold);
        if !low.is_empty() {
            println!("{} axis(es) below {} responses", low.len(), threshold);
        }
    }

    Ok(())
}

/// Diffs two reading files.
pub fn diff_readings(from: &Path, to: &Path, format: &str) -> Result<()> {
    let from = CompassReading::from_path(from)?;
    let to = CompassReading::from_path(to)?;
    let result = diff_scores(&from.dimensions, &to.dimensions);

    if format == "json" {
        print_json(&result)?;
    } else {
        println!("{}", result);
    }

    Ok(())
}

// === Snapshot Commands ===

pub fn snapshot_save(
    store: &Path,
    reading_path: &Path,
    name: Option<String>,
    questionnaire: Option<String>,
) -> Result<()> {
    let reading = CompassReading::from_path(reading_path)?;
    let mut history = SnapshotHistory::load(store)?;
    let snapshot = history.save(name, &reading, questionnaire);
    println!("Saved '{}' as {}", snapshot.name, snapshot.id);
    history.persist(store)?;
    Ok(())
}

pub fn snapshot_list(store: &Path, questionnaire: Option<&str>, format: &str) -> Result<()> {
    let history = SnapshotHistory::load(store)?;
    let snapshots = history.list(questionnaire);

    if format == "json" {
        return print_json(&snapshots);
    }

    if snapshots.is_empty() {
        println!("No snapshots saved");
        return Ok(());
    }

    println!("Snapshots ({}):", snapshots.len());
    for snapshot in snapshots {
        let questionnaire = snapshot
            .questionnaire_id
            .as_deref()
            .map(|q| format!(" [{}]", q))
            .unwrap_or_default();
        println!(
            "  {}  {}  {}{}",
            snapshot.id, snapshot.created_at, snapshot.name, questionnaire
        );
    }

    Ok(())
}

pub fn snapshot_show(store: &Path, id: &str, format: &str) -> Result<()> {
    let history = SnapshotHistory::load(store)?;
    let snapshot = history.get(id)?;

    if format == "json" {
        return print_json(snapshot);
    }

    println!("{} ({})", snapshot.name, snapshot.id);
    println!("Created: {}", snapshot.created_at);
    if let Some(ref q) = snapshot.questionnaire_id {
        println!("Questionnaire: {}", q);
    }
    print_scores(&snapshot.reading());
    Ok(())
}

pub fn snapshot_diff(store: &Path, from: &str, to: &str, format: &str) -> Result<()> {
    let history = SnapshotHistory::load(store)?;
    let result = history.diff(from, to)?;

    if format == "json" {
        print_json(&result)?;
    } else {
        println!(
            "{} -> {}",
            history.get(from)?.name,
            history.get(to)?.name
        );
        println!("{}", result);
    }

    Ok(())
}

pub fn snapshot_delete(store: &Path, id: &str) -> Result<()> {
    let mut history = SnapshotHistory::load(store)?;
    let removed = history.remove(id)?;
    history.persist(store)?;
    println!("Deleted '{}'", removed.name);
    Ok(())
}
