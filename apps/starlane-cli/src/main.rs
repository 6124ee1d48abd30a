use clap::{Parser, Subcommand};
use glam::Vec2;
use starlane_camera::{FlyCamera, apply_input};
use starlane_input::{InputState, Key};
use starlane_nav::SceneNavigator;
use starlane_pick::{cast_screen, resolve_hover};
use starlane_render::{DebugTextRenderer, RenderView, Renderer};
use starlane_scene::{StarChart, factory};
use starlane_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "starlane-cli", about = "Headless tools for the starlane viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Star chart JSON file (defaults to the built-in cluster)
    #[arg(long)]
    chart: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the chart and every scene it produces
    Info,
    /// Simulate held keys for a number of frames and print the camera track
    Fly {
        /// Comma-separated key names (w, s, a, d, q, e, ArrowLeft, ...)
        #[arg(short, long, default_value = "w")]
        keys: String,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
    },
    /// Cast a pick ray at a screen position and report what it hits
    Pick {
        /// Normalized device X in [-1, 1]
        #[arg(short, long, default_value = "0.0")]
        x: f32,
        /// Normalized device Y in [-1, 1]
        #[arg(short, long, default_value = "0.0")]
        y: f32,
        /// Click the nearest hit: enter its inner scene, then return
        #[arg(long)]
        click: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let chart = match &cli.chart {
        Some(path) => StarChart::load(path)?,
        None => StarChart::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("starlane-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "Chart: {} stars, {} lanes",
                chart.stars.len(),
                chart.lanes.len()
            );
            let set = factory::universe(&chart);
            for (_, scene) in set.iter() {
                println!("  {}", SceneInspector::describe(scene));
            }

            let camera = FlyCamera::default();
            let view = RenderView::looking(camera.position, camera.position + camera.forward());
            let outer = set.get(set.outer()).expect("outer scene");
            println!();
            print!("{}", DebugTextRenderer::new().render(outer, &view));
        }
        Commands::Fly { keys, frames, dt } => {
            let mut input = InputState::new();
            for name in keys.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match Key::from_name(name) {
                    Some(key) => input.on_key(key, true),
                    None => tracing::warn!("unrecognized key {name:?}, ignoring"),
                }
            }

            let mut camera = FlyCamera::default();
            let start = camera.position;
            println!(
                "Simulating {} frames at dt={dt} with {} key(s) held",
                frames,
                input.pressed_count()
            );
            for _ in 0..frames {
                apply_input(&mut camera, &mut input, dt);
            }

            let moved = camera.position - start;
            println!(
                "Start:  ({:.2}, {:.2}, {:.2})",
                start.x, start.y, start.z
            );
            println!(
                "End:    ({:.2}, {:.2}, {:.2})  yaw={:.3} pitch={:.3}",
                camera.position.x,
                camera.position.y,
                camera.position.z,
                camera.yaw,
                camera.pitch
            );
            println!("Moved:  {:.3} units", moved.length());
        }
        Commands::Pick { x, y, click } => {
            let mut set = factory::universe(&chart);
            let mut nav = SceneNavigator::new(set.outer());
            let camera = FlyCamera::default();
            let ndc = Vec2::new(x, y);

            let outer_id = set.outer();
            let hits = {
                let outer = set.get(outer_id).expect("outer scene");
                cast_screen(outer, &camera, ndc)
            };
            println!("Ray at NDC ({x}, {y}): {} hit(s)", hits.len());
            for hit in &hits {
                let label = set
                    .get(outer_id)
                    .and_then(|s| s.node(hit.node))
                    .and_then(|n| n.label.clone())
                    .unwrap_or_else(|| "<unnamed>".into());
                println!(
                    "  {label} at distance {:.2}, point ({:.2}, {:.2}, {:.2})",
                    hit.distance, hit.point.x, hit.point.y, hit.point.z
                );
            }

            let hover = set
                .get_mut(outer_id)
                .and_then(|scene| resolve_hover(scene, &hits));
            match &hover {
                Some(h) => println!("Hover: {}", h.label.as_deref().unwrap_or("<unnamed>")),
                None => println!("Hover: none"),
            }

            if click {
                match hits.first() {
                    Some(nearest) => {
                        if nav.enter_portal(&set, nearest.node) {
                            println!("Entered: {}", SceneInspector::summary(&set, &nav));
                            let view = RenderView::default();
                            let inner = set.get(nav.active()).expect("inner scene");
                            print!("{}", DebugTextRenderer::new().render(inner, &view));
                            nav.back();
                            println!("Returned: {}", SceneInspector::summary(&set, &nav));
                        } else {
                            println!("Nearest hit has no inner scene");
                        }
                    }
                    None => println!("Nothing to click"),
                }
            }
        }
    }

    Ok(())
}
