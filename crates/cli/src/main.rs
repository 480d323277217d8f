mod render;
mod terminal;

use anyhow::Context;
use borderlands_core::{
    run_game, Checkpoint, Console, Event, GameConfig, LineInput, MinigameTable, RngState, RunOutcome, RunState,
};
use borderlands_data::{
    load_game_config_or_default, load_run, resolve_config_path, resolve_save_path, save_snapshot,
    SnapshotError,
};
use std::path::{Path, PathBuf};
use terminal::TerminalConsole;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "BORDERLANDS_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    seed: Option<u64>,
    save: Option<PathBuf>,
    config: Option<PathBuf>,
    fast: bool,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--save" => {
                if let Some(value) = args.get(idx + 1) {
                    options.save = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--config" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--fast" => options.fast = true,
            _ => {}
        }
        idx += 1;
    }
    options
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    init_logging();

    let config_path = resolve_config_path(options.config.clone());
    let mut config = load_game_config_or_default(&config_path)
        .with_context(|| format!("load config from {}", config_path.display()))?;
    if options.fast {
        config.timing = config.timing.without_pauses();
    }
    let save_path = resolve_save_path(options.save.clone());
    let mut rng = options
        .seed
        .map(RngState::from_seed)
        .unwrap_or_else(RngState::from_entropy);
    info!(seed = rng.seed(), save = %save_path.display(), "session started");

    let mut console = TerminalConsole::spawn();
    loop {
        console.print(&render::welcome());
        let Some(choice) = console.read_line("Your choice (1-4): ") else {
            break;
        };
        match choice.trim() {
            "1" => {
                let state = RunState::shuffled(&mut rng);
                play(state, &config, &mut rng, &mut console, &save_path);
            }
            "2" => match load_run(&save_path) {
                Ok(state) => play(state, &config, &mut rng, &mut console, &save_path),
                Err(err) => report_load_error(&mut console, &err),
            },
            "3" => match load_run(&save_path) {
                Ok(state) => console.print(&render::cleared_cards(&state)),
                Err(err) => {
                    report_load_error(&mut console, &err);
                    console.print("Start a new game to collect cards!");
                }
            },
            "4" => {
                console.print("\n👋 Goodbye!");
                return Ok(());
            }
            _ => console.print("\n❌ Invalid choice! Please enter a number between 1-4."),
        }
        if console.read_line("\nPress Enter to continue...").is_none() {
            break;
        }
        console.clear_screen();
    }
    Ok(())
}

fn play(
    mut state: RunState,
    config: &GameConfig,
    rng: &mut RngState,
    console: &mut TerminalConsole,
    save_path: &Path,
) {
    let mut table = MinigameTable::new(config, rng);
    let mut checkpoint = SavePrompt { path: save_path };
    let outcome = run_game(
        &mut state,
        &mut table,
        console,
        &mut checkpoint,
        config.timing.card_reveal(),
    );
    if outcome == RunOutcome::Aborted {
        console.print("\nRun abandoned.");
    }
}

fn report_load_error(console: &mut TerminalConsole, err: &SnapshotError) {
    match err {
        SnapshotError::Missing(_) => console.print("\n❌ No saved game found!"),
        other => {
            warn!(%other, "save could not be loaded");
            console.print(&format!("\n❌ Could not load the saved game: {other}"));
        }
    }
}

/// Asks after each cleared card whether to write the snapshot.
struct SavePrompt<'a> {
    path: &'a Path,
}

impl Checkpoint for SavePrompt<'_> {
    fn card_cleared(&mut self, state: &RunState, console: &mut dyn Console) {
        let Some(answer) = console.read_line("\nDo you want to save the game? (Y/N): ") else {
            return;
        };
        if !wants_save(&answer) {
            return;
        }
        match save_snapshot(state, self.path) {
            Ok(()) => console.emit(Event::RunSaved {
                position: state.position(),
            }),
            Err(err) => {
                warn!(%err, "save failed");
                console.emit(Event::SaveFailed {
                    reason: err.to_string(),
                });
            }
        }
    }
}

fn wants_save(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use borderlands_core::{Deck, ScriptedConsole};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "borderlands_cli_{}_{}_{}.json",
            tag,
            std::process::id(),
            nanos
        ))
    }

    fn one_cleared() -> RunState {
        let mut state = RunState::new(Deck::standard24());
        state.advance().expect("card");
        state
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_cli_options(&args(&[
            "--seed", "42", "--save", "run.json", "--config", "cfg.json", "--fast",
        ]));
        assert_eq!(
            options,
            CliOptions {
                seed: Some(42),
                save: Some(PathBuf::from("run.json")),
                config: Some(PathBuf::from("cfg.json")),
                fast: true,
            }
        );
    }

    #[test]
    fn ignores_unknown_and_dangling_flags() {
        let options = parse_cli_options(&args(&["--bogus", "--seed", "nope", "--save"]));
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn only_yes_saves() {
        assert!(wants_save("y"));
        assert!(wants_save(" Y "));
        assert!(!wants_save("n"));
        assert!(!wants_save("yes please"));
        assert!(!wants_save(""));
    }

    #[test]
    fn save_prompt_reports_through_the_console() {
        let path = unique_temp_file("prompt");
        let state = one_cleared();
        let mut console = ScriptedConsole::with_lines(["y"]);
        SavePrompt { path: &path }.card_cleared(&state, &mut console);
        assert_eq!(console.events(), [Event::RunSaved { position: 1 }]);
        assert_eq!(load_run(&path).expect("saved run").position(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn save_prompt_reports_write_failures() {
        let path = std::env::temp_dir()
            .join("borderlands_cli_missing_dir")
            .join("nested")
            .join("save.json");
        let mut console = ScriptedConsole::with_lines(["Y"]);
        SavePrompt { path: &path }.card_cleared(&one_cleared(), &mut console);
        assert!(matches!(console.events(), [Event::SaveFailed { .. }]));
    }

    #[test]
    fn declining_writes_nothing() {
        let path = unique_temp_file("declined");
        let mut console = ScriptedConsole::with_lines(["n"]);
        SavePrompt { path: &path }.card_cleared(&one_cleared(), &mut console);
        assert!(console.events().is_empty());
        assert!(!path.exists());
    }
}
