use schemacanvas::config::DiagramConfig;
use schemacanvas::diagram::Diagram;
use schemacanvas::drag::PointerTarget;
use schemacanvas::viewport::Point;
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <schema.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>       Output SVG file (default: stdout)");
    eprintln!("  -c, --config <file>       Diagram config JSON");
    eprintln!("      --zoom-in <n>         Zoom in n steps");
    eprintln!("      --zoom-out <n>        Zoom out n steps");
    eprintln!("      --pan <dx,dy>         Pan by a screen-space drag");
    eprintln!("      --move <table:dx,dy>  Drag a table's header by a screen-space delta");
    eprintln!("  -e, --export <project>    Write schema-<project>.json");
    eprintln!("      --export-dir <dir>    Directory for the export (default: .)");
    process::exit(1);
}

enum Gesture {
    ZoomIn(u32),
    ZoomOut(u32),
    Pan(f64, f64),
    Move(String, f64, f64),
}

fn parse_delta(s: &str) -> Option<(f64, f64)> {
    let (dx, dy) = s.split_once(',')?;
    Some((dx.trim().parse().ok()?, dy.trim().parse().ok()?))
}

fn fail(msg: String) -> ! {
    eprintln!("{}", msg);
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut export_project: Option<String> = None;
    let mut export_dir = String::from(".");
    let mut gestures: Vec<Gesture> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let Some(value) = args.get(i).cloned() else {
            fail(format!("Missing value for {}", flag));
        };
        match flag {
            "-o" | "--output" => output_path = Some(value),
            "-c" | "--config" => config_path = Some(value),
            "-e" | "--export" => export_project = Some(value),
            "--export-dir" => export_dir = value,
            "--zoom-in" | "--zoom-out" => {
                let n: u32 = value
                    .parse()
                    .unwrap_or_else(|_| fail(format!("Invalid step count: {}", value)));
                gestures.push(if flag == "--zoom-in" {
                    Gesture::ZoomIn(n)
                } else {
                    Gesture::ZoomOut(n)
                });
            }
            "--pan" => {
                let (dx, dy) =
                    parse_delta(&value).unwrap_or_else(|| fail(format!("Invalid delta: {}", value)));
                gestures.push(Gesture::Pan(dx, dy));
            }
            "--move" => {
                let parsed = value
                    .split_once(':')
                    .and_then(|(table, delta)| Some((table.to_string(), parse_delta(delta)?)));
                let Some((table, (dx, dy))) = parsed else {
                    fail(format!("Invalid move: {}", value));
                };
                gestures.push(Gesture::Move(table, dx, dy));
            }
            _ => fail(format!("Unknown option: {}", flag)),
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => DiagramConfig::load(Path::new(&path))
            .unwrap_or_else(|e| fail(format!("Config error: {}", e))),
        None => DiagramConfig::default(),
    };

    let input = fs::read_to_string(input_path)
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", input_path, e)));

    let mut diagram = Diagram::from_json(&input, config)
        .unwrap_or_else(|e| fail(format!("Failed to load {}: {}", input_path, e)));

    for gesture in gestures {
        replay(&mut diagram, gesture);
    }

    // Export failures are reported but the diagram is still rendered.
    if let Some(project) = export_project {
        match diagram
            .export(&project)
            .and_then(|artifact| artifact.write_to(Path::new(&export_dir)))
        {
            Ok(path) => eprintln!("Exported {}", path.display()),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                eprintln!("Export failed: {}", e);
            }
        }
    }

    let svg = diagram.render();

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                fail(format!("Failed to write {}: {}", path, e));
            }
        }
        None => print!("{}", svg),
    }
}

/// Drive the diagram through the same pointer protocol a browser host uses.
fn replay(diagram: &mut Diagram, gesture: Gesture) {
    match gesture {
        Gesture::ZoomIn(n) => (0..n).for_each(|_| diagram.zoom_in()),
        Gesture::ZoomOut(n) => (0..n).for_each(|_| diagram.zoom_out()),
        Gesture::Pan(dx, dy) => {
            diagram.pointer_down_on(PointerTarget::Background, Point::ZERO);
            diagram.pointer_move(Point::new(dx, dy));
            diagram.pointer_up();
        }
        Gesture::Move(table, dx, dy) => {
            if diagram.table(&table).is_none() {
                eprintln!("Unknown table: {}", table);
                return;
            }
            diagram.pointer_down_on(PointerTarget::TableHeader(table), Point::ZERO);
            diagram.pointer_move(Point::new(dx, dy));
            diagram.pointer_up();
        }
    }
}
