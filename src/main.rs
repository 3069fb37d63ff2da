use std::path::PathBuf;

use clap::Parser;
use garden_packer::catalog;
use garden_packer::config::{PlanConfig, PlanRequest};
use garden_packer::render;
use garden_packer::solver::Planner;
use garden_packer::types::Requirement;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "garden_packer",
    about = "Plans circular-spaced crops into fixed-width bed rows"
)]
struct Cli {
    /// Crops as radius:count[:name] (e.g. 6:40:kale 1.5:120:carrots)
    #[arg(long = "items", num_args = 1..)]
    items: Vec<String>,

    /// JSON file with strip_height, capacity, available_containers and items
    #[arg(long)]
    input: Option<PathBuf>,

    /// Strip (bed) height, overrides the input file
    #[arg(long)]
    height: Option<f64>,

    /// Bed row width, overrides the input file
    #[arg(long)]
    capacity: Option<f64>,

    /// Number of bed rows available
    #[arg(long)]
    beds: Option<usize>,

    /// Crop names grown on a trellis in a single row
    #[arg(long, num_args = 1..)]
    trellis: Vec<String>,

    /// Scale every count by the largest multiplier that fits --beds
    #[arg(long, requires = "beds")]
    scale: bool,

    /// Show ASCII layout of each bed row
    #[arg(long)]
    layout: bool,

    /// Print the whole plan as JSON
    #[arg(long)]
    json: bool,

    /// Log planning steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_item(s: &str) -> Result<Requirement, String> {
    let mut parts = s.splitn(3, ':');
    let radius = parts
        .next()
        .unwrap_or_default()
        .parse::<f64>()
        .map_err(|_| format!("invalid radius in '{}'", s))?;
    let count = parts
        .next()
        .ok_or_else(|| format!("invalid item '{}', expected radius:count[:name]", s))?
        .parse::<u32>()
        .map_err(|_| format!("invalid count in '{}'", s))?;
    let name = parts.next().unwrap_or_default();
    if radius <= 0.0 {
        return Err(format!("radius must be positive in '{}'", s));
    }
    if count == 0 {
        return Err(format!("count must be non-zero in '{}'", s));
    }
    Ok(Requirement::new(name, radius, count))
}

fn load_request(cli: &Cli) -> Result<PlanRequest, String> {
    let mut request = match &cli.input {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            PlanRequest::from_json(&json).map_err(|e| e.to_string())?
        }
        None => PlanRequest::default(),
    };

    let items = cli
        .items
        .iter()
        .map(|s| parse_item(s))
        .collect::<Result<Vec<_>, _>>()?;
    request.items.extend(items);
    if request.items.is_empty() {
        request.items = catalog::default_crops();
    }

    if let Some(height) = cli.height {
        request.config.strip_height = height;
    }
    if let Some(capacity) = cli.capacity {
        request.config.capacity = capacity;
    }
    if cli.beds.is_some() {
        request.config.available_containers = cli.beds;
    }
    if cli.scale {
        request.scale_to_budget = true;
    }

    for name in &cli.trellis {
        let crop = request
            .items
            .iter_mut()
            .find(|c| &c.name == name)
            .ok_or_else(|| format!("no crop named '{}' to trellis", name))?;
        crop.trellised = true;
    }
    Ok(request)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let request = load_request(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let config: PlanConfig = request.config;

    let planner = Planner::new(config, request.items);
    let (plan, multiplier) = if request.scale_to_budget {
        match planner.max_multiplier() {
            Ok(Some(scaling)) => (scaling.plan, Some(scaling.multiplier)),
            Ok(None) => {
                eprintln!("Error: not even one plant of every crop fits the available beds");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let plan = planner.solve().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        (plan, None)
    };

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if let Some(multiplier) = multiplier {
        println!("Largest multiplier: {:.4}", multiplier);
        println!();
    }

    println!("Best strip widths (height {}):", config.strip_height);
    for (req, est) in plan.requirements.iter().zip(&plan.estimates) {
        println!("  {}: {} packing, width={:.3}", req, est.strategy, est.width);
    }
    println!();

    let report = &plan.report;
    for (i, container) in report.containers.iter().enumerate() {
        println!(
            "Bed {}: used {:.2}, remaining {:.2}",
            i + 1,
            container.used(),
            container.remaining
        );
        for s in &container.segments {
            println!("  {} {:.2}", plan.segment_label(s), s.width);
        }
        if cli.layout {
            print!("{}", render::render_container(&plan, container));
        }
        println!();
    }

    println!(
        "Summary: {} segments in {} bed{} of {}, {:.2} wasted ({:.2}% waste)",
        report.segment_count(),
        report.container_count(),
        if report.container_count() == 1 { "" } else { "s" },
        report.capacity,
        report.total_waste,
        report.waste_percent(),
    );
    if let Some(short) = plan.shortfall() {
        println!(
            "Warning: {} more bed{} needed than available",
            short,
            if short == 1 { "" } else { "s" }
        );
    }
}
