use clap::Parser;
use rand::RngCore;
use std::path::PathBuf;
use terrain_gen::{Envelope, WorldRequest, generate_world};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Генератор карт местности
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Название мира (перекрывает конфиг)
    #[arg(long)]
    name: Option<String>,

    /// Ширина карты в тайлах (перекрывает конфиг)
    #[arg(long)]
    width: Option<u32>,

    /// Высота карты в тайлах (перекрывает конфиг)
    #[arg(long)]
    height: Option<u32>,

    /// Сид (если не задан, выбирается случайно и выводится в лог)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Путь для сохранения превью в PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Размер тайла на превью в пикселях
    #[arg(long, default_value_t = 8)]
    tile_size: u32,

    /// Путь для сохранения JSON-ответа с метаданными
    #[arg(long)]
    json: Option<PathBuf>,

    /// Подробный лог
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // RUST_LOG перекрывает уровень по умолчанию.
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut request = match &cli.config {
        Some(path) => {
            tracing::info!("Загрузка конфигурации из {}", path.display());
            WorldRequest::from_toml_file(&path.to_string_lossy())?
        }
        None => WorldRequest::default(),
    };
    if let Some(name) = cli.name {
        request.name = name;
    }
    if let Some(width) = cli.width {
        request.map_size.width = width;
    }
    if let Some(height) = cli.height {
        request.map_size.height = height;
    }
    if cli.seed.is_some() {
        request.settings.seed = cli.seed;
    }

    tracing::info!(
        "Генерация карты (размер: {}×{})...",
        request.map_size.width,
        request.map_size.height
    );
    let entropy = rand::thread_rng().next_u32();
    let world = generate_world(&request, entropy)?;

    for (terrain, count) in world.metadata.terrain_stats.iter() {
        tracing::info!(
            "{terrain:>8}: {count:>7} ({:.1}%)",
            world.metadata.terrain_stats.share(terrain)
        );
    }

    if let Some(path) = &cli.output {
        tracing::info!("Сохранение превью в {}", path.display());
        world
            .map
            .save_as_png(&path.to_string_lossy(), cli.tile_size)?;
    }

    if let Some(path) = &cli.json {
        tracing::info!("Сохранение метаданных в {}", path.display());
        std::fs::write(path, Envelope::success(&world).to_json_pretty()?)?;
    }

    tracing::info!(
        "Готово! Сид {} (повторить: --seed {})",
        world.metadata.generation_seed,
        world.metadata.generation_seed
    );
    Ok(())
}
