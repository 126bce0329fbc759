//! Builds the Iris scatter plot in the headless host and replays a few
//! selection gestures.
//!
//! Run with: cargo run --bin iris_scatter -- --click 0,0 --wand 12

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::Rng;
use scattercube_core::{Category, Dataset, Point2f, Point3f, Ray, Record, SceneHost};
use scattercube_io::{iris, DatasetReader};
use scattercube_visualization::{
    scatter_dataset, HeadlessHost, InputEvent, PointerButton, SceneConfig, SelectOutcome,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "iris_scatter", about = "3D scatter plot with point picking")]
struct Args {
    /// Dataset file (delimited text, label in the last column); defaults to Iris
    #[arg(long)]
    data: Option<PathBuf>,

    /// Feature columns to plot
    #[arg(long, value_delimiter = ',', default_values_t = iris::DEFAULT_FEATURES)]
    features: Vec<usize>,

    /// Generate a random clustered dataset with this many points instead
    #[arg(long, conflicts_with = "data")]
    synthetic: Option<usize>,

    /// Scene configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Mouse clicks at normalized device coordinates, e.g. `--click 0.1,-0.2`
    #[arg(long, value_parser = parse_cursor)]
    click: Vec<Point2f>,

    /// Wand triggers aimed at the given point indices
    #[arg(long)]
    wand: Vec<usize>,

    /// Detach the wand before replaying triggers
    #[arg(long)]
    hide_wand: bool,

    /// Print the final point colors as JSON
    #[arg(long)]
    json: bool,
}

fn parse_cursor(s: &str) -> std::result::Result<Point2f, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {:?}", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("{}", e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("{}", e))?;
    Ok(Point2f::new(x, y))
}

/// Three gaussian-ish blobs, one per category
fn synthetic_dataset(count: usize) -> Result<Dataset> {
    if count == 0 {
        bail!("--synthetic needs at least one point");
    }
    let mut rng = rand::thread_rng();
    let centers = [[0.0, 0.0, 0.0], [4.0, 1.0, 2.0], [1.0, 5.0, 4.0]];
    let records: Vec<Record> = (0..count)
        .map(|i| {
            let c = i % centers.len();
            let features = centers[c]
                .iter()
                .map(|&m| m + rng.gen_range(-1.0..1.0) + rng.gen_range(-1.0..1.0))
                .collect();
            Record::new(features, Category(c))
        })
        .collect();
    let names = (0..centers.len()).map(|i| format!("cluster {}", i)).collect();
    Ok(Dataset::from_records(&records, names)?)
}

fn load_dataset(args: &Args) -> Result<Dataset> {
    if let Some(count) = args.synthetic {
        return synthetic_dataset(count);
    }
    let dataset = match &args.data {
        Some(path) => DatasetReader::new()
            .read_path(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => iris::load_iris()?,
    };
    Ok(dataset.select_features(&args.features)?)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SceneConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let dataset = load_dataset(&args)?;
    info!(
        rows = dataset.len(),
        features = ?dataset.feature_names(),
        categories = ?dataset.category_names(),
        "dataset loaded"
    );

    let mut host = HeadlessHost::new();
    let wand = host.add_proxy("wand");
    let (mut scene, mut selector) = scatter_dataset(&mut host, &dataset, config)?;

    for cursor in &args.click {
        let event = InputEvent::PointerDown {
            button: PointerButton::Left,
            cursor: *cursor,
        };
        let outcome = selector.handle_event(&mut scene, &mut host, &event);
        info!(x = cursor.x, y = cursor.y, ?outcome, "mouse click");
    }

    if args.hide_wand {
        selector.hide(&mut host);
    }

    for &index in &args.wand {
        let Some(point) = scene.points().get(index) else {
            bail!("--wand {} out of range ({} points)", index, scene.points().len());
        };
        let target = host
            .world_position(point.handle())
            .context("point missing from host")?;
        // Stand in front of the plot and aim at the point
        let origin = Point3f::new(0.0, target.y, 3.0);
        let ray = Ray::new(origin, target - origin);

        let outcome = match host.proxy(wand).and_then(|p| p.trigger(ray)) {
            Some(event) => selector.handle_event(&mut scene, &mut host, &event),
            None => SelectOutcome::Ignored,
        };
        info!(point = index, ?outcome, "wand trigger");
    }

    match scene.selection().highlighted() {
        Some(id) => {
            let point = scene.point(id).context("highlighted point missing")?;
            let name = dataset
                .category_names()
                .get(point.category().index())
                .map(String::as_str)
                .unwrap_or("?");
            println!(
                "selected {} ({}) at {:?}, color {}",
                id,
                name,
                point.position(),
                host.color(point.handle()).unwrap_or_default()
            );
        }
        None => println!("nothing selected"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(scene.points())?);
    }

    scene.teardown(&mut host);
    Ok(())
}
