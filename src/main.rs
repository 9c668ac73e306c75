use clap::Parser;
use strokematch::{csv_data, data, socket_service};
use strokematch::{MatchConfig, match_character, rng_from_seed};

/// Stroke-matching service for logographic character handwriting feedback.
#[derive(Parser)]
#[command(name = "strokematch")]
#[command(about = "Detects missing, extra, misordered, misdirected, and broken strokes", long_about = None)]
#[command(version = env!("GIT_VERSION"))]
struct Args {
    /// Path to the reference character database (JSON or CSV format)
    #[arg(short = 'd', long, default_value = "graphics.csv")]
    data_file: String,

    /// Unix socket path for the matching service
    #[arg(short = 's', long)]
    socket_path: Option<String>,

    /// Path to a JSON file holding the written character's strokes. Combined
    /// with `--reference`, runs a single one-shot match and prints the result
    /// instead of starting the socket service.
    #[arg(long)]
    written: Option<String>,

    /// Reference character to match against: either a character name looked
    /// up in the loaded database, or a path to a JSON strokes file.
    #[arg(long)]
    reference: Option<String>,

    /// RNG seed for the one-shot match, for reproducible results.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    println!("Stroke Matching Service");
    println!("Version: {}", env!("GIT_VERSION"));
    println!("Loading character database from {}...", args.data_file);

    let corpus = if args.data_file.ends_with(".csv") {
        csv_data::load_graphics_csv(&args.data_file)?
    } else {
        data::load_graphics_json(&args.data_file)?
    };

    println!("Loaded {} characters", corpus.len());

    if let (Some(written_path), Some(reference)) = (&args.written, &args.reference) {
        return run_one_shot(&corpus, written_path, reference, args.seed);
    }

    let socket_path = args
        .socket_path
        .unwrap_or_else(socket_service::default_socket_path);

    println!("Starting Unix socket service at {socket_path}");
    let service = socket_service::SocketService::new(corpus, socket_path);
    service.start()?;

    Ok(())
}

fn run_one_shot(
    corpus: &data::CharacterCorpus,
    written_path: &str,
    reference: &str,
    seed: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let written = data::load_character_json(written_path)?;

    let reference_strokes = if let Some(strokes) = data::find(corpus, reference) {
        strokes.clone()
    } else {
        data::load_character_json(reference)?
    };

    let mut rng = rng_from_seed(seed);
    let result = match_character(&written, &reference_strokes, &MatchConfig::default(), &mut rng)?;

    println!("fitness: {:.6}", result.fitness);
    println!("generations: {}", result.generations);
    println!("assignment: {:?}", result.assignment);
    for error in &result.errors {
        println!("{error:?}");
    }

    Ok(())
}
