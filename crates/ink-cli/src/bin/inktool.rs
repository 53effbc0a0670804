use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use ink_cli::commands::{config_ops, drill, practice_ops};
use ink_cli::trace_init::init_tracing;
use ink_core::{Direction, PracticeMode};

#[derive(Parser)]
#[command(name = "inktool", about = "InkWords answer checking and practice tool")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write JSON trace logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Custom settings TOML (see settings-export)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom pinyin table TOML (see pinyin-export)
    #[arg(long, global = true)]
    pinyin_table: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized form of a text
    Normalize {
        text: String,
        /// Also fold pinyin tone marks
        #[arg(long)]
        pinyin: bool,
    },
    /// Show the pinyin reading of Chinese text
    Pinyin {
        text: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check an answer against a target (exit 0 when correct, 2 when wrong)
    Check {
        /// Learning direction: "en" (answers in English) or "zh" (answers in pinyin)
        #[arg(long, default_value = "en")]
        direction: Direction,
        /// Expected text: English word/sentence or Chinese text
        #[arg(long)]
        target: String,
        /// Answer tokens, one per slot, or a single line to split
        #[arg(required = true)]
        input: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Practice items from a JSON file interactively
    Drill {
        /// JSON array of tagged word/sentence items
        items_file: PathBuf,
        #[arg(long, default_value = "en")]
        direction: Direction,
        /// "spelling" or "dictation"
        #[arg(long, default_value = "spelling")]
        mode: PracticeMode,
        /// Only practice words in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Print default settings TOML to stdout
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate { file: String },
    /// Print default pinyin table TOML to stdout
    PinyinExport,
    /// Validate a pinyin table TOML file
    PinyinValidate { file: String },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_deref());
    config_ops::install_overrides(cli.settings.as_deref(), cli.pinyin_table.as_deref());

    match cli.command {
        Command::Normalize { text, pinyin } => practice_ops::normalize_text(&text, pinyin),
        Command::Pinyin { text, json } => practice_ops::pinyin(&text, json),
        Command::Check {
            direction,
            target,
            input,
            json,
        } => {
            let code = practice_ops::check(direction, &target, &input, json);
            process::exit(code);
        }
        Command::Drill {
            items_file,
            direction,
            mode,
            category,
        } => {
            if let Err(e) = drill::drill(&items_file, direction, mode, category.as_deref()) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::PinyinExport => config_ops::pinyin_export(),
        Command::PinyinValidate { file } => config_ops::pinyin_validate(&file),
    }
}
