//! charbldr - resolve a character draft from the command line.
//!
//! ```text
//! charbldr resolve [catalog.json] <draft.json | draft-id>
//! charbldr check   [catalog.json] <draft.json | draft-id>
//! ```
//!
//! Without a catalog argument `CHARBLDR_CATALOG_PATH` is used. A draft id is
//! looked up in the JSON draft store under `CHARBLDR_DATA_DIR`.
//! Output is pretty JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::{bail, Context};
use charbldr_domain::{CharacterDraft, DraftId};
use charbldr_engine::infrastructure::{logging, EngineSettings};
use charbldr_engine::App;

const USAGE: &str = "usage: charbldr <resolve|check> [catalog.json] <draft.json | draft-id>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the full resolved character.
    Resolve,
    /// Print only the choices still missing.
    Check,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DraftSource {
    File(PathBuf),
    Stored(DraftId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    command: Command,
    catalog: Option<PathBuf>,
    draft: DraftSource,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads .env.local / .env from the repo root first.
    let settings = EngineSettings::from_env();
    logging::init(&settings.log_filter);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args)?;
    tracing::debug!(?invocation, "Running charbldr");

    let output = run(&invocation, &settings).await?;
    println!("{output}");
    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Invocation> {
    let (command, catalog, draft) = match args {
        [command, draft] => (command, None, draft),
        [command, catalog, draft] => (command, Some(PathBuf::from(catalog)), draft),
        _ => bail!(USAGE),
    };
    let command = match command.as_str() {
        "resolve" => Command::Resolve,
        "check" => Command::Check,
        other => bail!("unknown command '{other}'\n{USAGE}"),
    };
    let draft = match draft.parse::<DraftId>() {
        Ok(id) => DraftSource::Stored(id),
        Err(_) => DraftSource::File(PathBuf::from(draft)),
    };
    Ok(Invocation {
        command,
        catalog,
        draft,
    })
}

async fn run(invocation: &Invocation, settings: &EngineSettings) -> anyhow::Result<String> {
    let Some(catalog) = invocation.catalog.clone().or_else(|| settings.catalog_path.clone()) else {
        bail!("no catalog given and CHARBLDR_CATALOG_PATH is unset\n{USAGE}");
    };
    let settings = EngineSettings {
        catalog_path: Some(catalog.clone()),
        ..settings.clone()
    };
    let app = App::from_settings(settings)
        .await
        .with_context(|| format!("loading catalog {}", catalog.display()))?;
    let draft = load_draft(&app, &invocation.draft).await?;

    let json = match invocation.command {
        Command::Resolve => serde_json::to_string_pretty(&app.engine.resolve(&draft))?,
        Command::Check => serde_json::to_string_pretty(&app.engine.check_completeness(&draft))?,
    };
    Ok(json)
}

async fn load_draft(app: &App, source: &DraftSource) -> anyhow::Result<CharacterDraft> {
    match source {
        DraftSource::File(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading draft {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing draft {}", path.display()))
        }
        DraftSource::Stored(id) => app
            .repo
            .load(*id)
            .await?
            .with_context(|| format!("no draft {id} in {}", app.settings.data_dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use charbldr_engine::infrastructure::{DraftRepo, JsonFileDraftRepo};

    use super::*;

    fn test_data(path: &str) -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join(path)
            .to_string_lossy()
            .into_owned()
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_file_and_id_drafts() {
        let invocation = parse_args(&args(&["check", "srd.json", "draft.json"])).expect("args");
        assert_eq!(invocation.command, Command::Check);
        assert_eq!(invocation.catalog, Some(PathBuf::from("srd.json")));
        assert_eq!(invocation.draft, DraftSource::File(PathBuf::from("draft.json")));

        let invocation = parse_args(&args(&["check", "draft.json"])).expect("args");
        assert_eq!(invocation.catalog, None);

        let id = DraftId::new();
        let invocation =
            parse_args(&args(&["resolve", "srd.json", &id.to_string()])).expect("args");
        assert_eq!(invocation.draft, DraftSource::Stored(id));
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(parse_args(&args(&["resolve"])).is_err());
        assert!(parse_args(&args(&["resolve", "a", "b", "c"])).is_err());
        let err = parse_args(&args(&["level-up", "a", "b"])).expect_err("unknown command");
        assert!(err.to_string().contains("level-up"));
    }

    #[tokio::test]
    async fn resolve_prints_the_sheet() {
        let invocation = parse_args(&args(&[
            "resolve",
            &test_data("catalog/elf_rogue.json"),
            &test_data("drafts/elf_rogue.json"),
        ]))
        .expect("args");
        let output = run(&invocation, &EngineSettings::default()).await.expect("run");

        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json["name"], "Shava");
        assert_eq!(json["maxHitPoints"], 10);
        assert_eq!(json["incomplete"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn check_prints_missing_choices() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let draft = CharacterDraft::new();
        let path = temp_dir.path().join("blank.json");
        std::fs::write(&path, serde_json::to_string(&draft).expect("serialize")).expect("write");

        let invocation = parse_args(&args(&[
            "check",
            &test_data("catalog/elf_rogue.json"),
            &path.to_string_lossy(),
        ]))
        .expect("args");
        let output = run(&invocation, &EngineSettings::default()).await.expect("run");

        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn stored_drafts_come_from_the_data_dir() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let settings = EngineSettings {
            data_dir: temp_dir.path().to_path_buf(),
            catalog_path: Some(PathBuf::from(test_data("catalog/elf_rogue.json"))),
            ..EngineSettings::default()
        };
        let draft = CharacterDraft::new().with_name("Stored");
        JsonFileDraftRepo::new(&settings.data_dir).save(&draft).await.expect("save");

        // No catalog argument: the configured path is used.
        let invocation = parse_args(&args(&["resolve", &draft.id().to_string()])).expect("args");
        let output = run(&invocation, &settings).await.expect("run");
        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json["name"], "Stored");

        let missing = parse_args(&args(&["resolve", &DraftId::new().to_string()])).expect("args");
        assert!(run(&missing, &settings).await.is_err());
    }

    #[tokio::test]
    async fn missing_catalog_is_an_error() {
        let invocation = parse_args(&args(&["check", "draft.json"])).expect("args");
        let err = run(&invocation, &EngineSettings::default()).await.expect_err("no catalog");
        assert!(err.to_string().contains("CHARBLDR_CATALOG_PATH"));
    }
}
