mod app;
mod controller;
mod setup;

use clap::Parser;
use eawase_core::Board;
use eawase_image_pipeline::{generate_image_url, load_image};
use eframe::egui;
use log::info;

#[derive(Parser)]
#[command(
    name = "eawase",
    version,
    about = "Rebuild an AI-generated picture from scrambled tiles"
)]
struct Cli {
    /// Text prompt for the generated puzzle image. Asked interactively
    /// when omitted.
    #[arg(long)]
    prompt: Option<String>,

    /// Number of tile rows. Asked interactively when omitted.
    #[arg(long)]
    rows: Option<String>,

    /// Number of tile columns. Asked interactively when omitted.
    #[arg(long)]
    cols: Option<String>,

    /// Scramble seed; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u32>,

    /// Skip image generation and load this URL or file instead.
    #[arg(long)]
    image_url: Option<String>,

    #[arg(long, env = "OPENAI_API_URL", default_value = "", hide_default_value = true)]
    api_url: String,

    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_default_value = true)]
    api_key: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let raw_prompt = match cli.prompt {
        Some(prompt) => prompt,
        None => setup::ask("Enter a prompt for the image: ")?,
    };
    let Some(prompt) = setup::valid_prompt(&raw_prompt) else {
        eprintln!("Prompt cannot be empty.");
        return Ok(());
    };
    let prompt = prompt.to_string();

    let raw_rows = match cli.rows {
        Some(rows) => rows,
        None => setup::ask("Enter number of rows for the puzzle: ")?,
    };
    let Some(rows) = setup::parse_grid_value(&raw_rows) else {
        eprintln!("Rows must be a positive integer, got {raw_rows:?}.");
        return Ok(());
    };
    let raw_cols = match cli.cols {
        Some(cols) => cols,
        None => setup::ask("Enter number of columns for the puzzle: ")?,
    };
    let Some(cols) = setup::parse_grid_value(&raw_cols) else {
        eprintln!("Columns must be a positive integer, got {raw_cols:?}.");
        return Ok(());
    };

    let locator = match cli.image_url {
        Some(url) => url,
        None => match generate_image_url(&cli.api_url, &cli.api_key, &prompt) {
            Ok(url) => {
                println!("Generated image URL: {url}");
                url
            }
            Err(err) => {
                eprintln!("Could not generate an image: {err}");
                return Ok(());
            }
        },
    };

    // Never fails: unreachable or undecodable images become the placeholder.
    let source = load_image(&locator);

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("building a {rows}x{cols} board with seed {seed:#010x}");
    let board = match Board::new_shuffled(rows, cols, source, seed) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("Could not build the puzzle: {err}");
            return Ok(());
        }
    };

    let window = app::window_size(&board);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window)
            .with_resizable(false)
            .with_title("Eawase"),
        ..Default::default()
    };
    eframe::run_native(
        "eawase",
        options,
        Box::new(|_cc| Ok(Box::new(app::EawaseApp::new(board)))),
    )?;
    Ok(())
}
