// Command-line interface for mdlive
//
// This binary provides commands for converting, previewing and inspecting markdown files, and
// for managing the persisted draft.
//
// The core capabilities use the mdlive-babel crate. This crate is an interface for it: it reads
// files, layers configuration and writes results, while parsing, rendering and encoding stay in the
// library.
//
// Usage:
//  mdlive <input> --to <format> [--output <file>]          - Convert markdown (default)
//  mdlive convert <input> --to <format> [--output <file>]  - Same as above (explicit)
//  mdlive preview <input> [--output <file>] [--watch]      - Standalone preview page
//  mdlive inspect <path> [<transform>]                     - Execute a transform (defaults to "ast-treeviz")
//  mdlive draft show|save <input>|export --to <format>|clear
//  mdlive highlight-css [<theme>]                          - Stylesheet for highlighted code
//  mdlive --list-formats                                   - List formats and transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. View keys (theme, dark-mode, view-font-size, highlight)
// adjust the configuration; everything else is passed to the format as an option.
// Example:
//  mdlive notes.md --to pdf -o notes.pdf --extra-font-size 12

use mdlive_cli::cli::build_cli;
use mdlive_cli::transforms;
use mdlive_cli::watch::watch_file;
use mdlive_cli::CliError;

use clap::ArgMatches;
use mdlive_babel::export::encode_with;
use mdlive_babel::formats::pdf::layout::PageGeometry;
use mdlive_babel::formats::{HtmlFormat, HtmlOptions, MarkdownFormat, PdfFormat, TextFormat};
use mdlive_babel::highlight::highlight_css;
use mdlive_babel::preview::preview_page;
use mdlive_babel::{
    Artifact, EditSession, ExportFormat, ExportRequest, FileStore, FormatRegistry, Highlighter,
    LivePreview, MemoryStore, Persistence, PlainHighlighter, SyntectHighlighter, Theme,
    ViewSettings,
};
use mdlive_config::{Loader, MdliveConfig, LOCAL_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "preview",
    "inspect",
    "draft",
    "highlight-css",
    "help",
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A first argument that is not a subcommand is taken as the input of "convert"
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    if let Err(err) = run(&matches, &mut extra_params) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches, extra_params: &mut HashMap<String, String>) -> Result<(), CliError> {
    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()))?;
    apply_config_overrides(&mut config, extra_params)?;

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config)?;
        return Ok(());
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let source = read_source(input)?;
            handle_export(&source, to, output, extra_params, &config)
        }
        Some(("preview", sub_matches)) => {
            let input = required(sub_matches, "input");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_preview_command(input, output, sub_matches.get_flag("watch"), &config)
        }
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &config)
        }
        Some(("draft", sub_matches)) => handle_draft_command(sub_matches, extra_params, &config),
        Some(("highlight-css", sub_matches)) => {
            let theme = sub_matches.get_one::<String>("theme").map(|s| s.as_str());
            handle_highlight_css_command(theme, &config)
        }
        _ => Err(CliError::Transform(
            "Unknown subcommand. Use --help for usage information.".to_string(),
        )),
    }
}

/// Clap enforces `required(true)` before a handler runs.
fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(|s| s.as_str())
        .unwrap_or_default()
}

fn read_source(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Encode `source` as `to` and write it to `output`, or stdout for text formats.
fn handle_export(
    source: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MdliveConfig,
) -> Result<(), CliError> {
    let format = to.parse::<ExportFormat>()?;
    if output.is_none() && format.is_binary() {
        return Err(CliError::BinaryToStdout);
    }

    let registry = registry_from_config(config)?;
    let request = ExportRequest::new(format, source).with_options(extra_params.clone());
    let artifact = encode_with(&registry, &request)?;
    tracing::info!(
        format = %format,
        bytes = artifact.bytes.len(),
        suggested = %artifact.suggested_filename,
        "exported"
    );

    write_artifact(&artifact, output)
}

fn write_artifact(artifact: &Artifact, output: Option<&str>) -> Result<(), CliError> {
    match (output, artifact.text()) {
        (Some(path), _) => artifact.write_to(path).map_err(|source| CliError::Write {
            path: path.to_string(),
            source,
        }),
        (None, Some(text)) => {
            print!("{text}");
            Ok(())
        }
        (None, None) => Err(CliError::BinaryToStdout),
    }
}

/// Handle the preview command
fn handle_preview_command(
    input: &str,
    output: Option<&str>,
    watch: bool,
    config: &MdliveConfig,
) -> Result<(), CliError> {
    let settings = ViewSettings::from(&config.view);
    let highlighter = highlighter_from_config(config);
    let css = preview_css(config, &settings)?;

    // The preview never persists: the file on disk is the source of truth.
    let mut session = EditSession::start(MemoryStore::new(), "preview");
    let mut preview = LivePreview::new();

    let mut refresh = |session: &mut EditSession<MemoryStore>| -> Result<(), CliError> {
        session.set_text(read_source(input)?);
        let snapshot = session.snapshot();
        if preview.update(&snapshot, highlighter.as_ref()) {
            if let Some(view) = preview.view() {
                let page = preview_page(&view, &settings, css.as_deref())?;
                write_page(&page, output)?;
                tracing::info!(revision = snapshot.revision, "preview written");
            }
        }
        Ok(())
    };

    refresh(&mut session)?;
    if watch {
        watch_file(Path::new(input), || refresh(&mut session))?;
    }
    Ok(())
}

fn write_page(page: &str, output: Option<&str>) -> Result<(), CliError> {
    match output {
        Some(path) => mdlive_babel::storage::write_atomic(Path::new(path), page.as_bytes())
            .map_err(|source| CliError::Write {
                path: path.to_string(),
                source,
            }),
        None => {
            print!("{page}");
            Ok(())
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    config: &MdliveConfig,
) -> Result<(), CliError> {
    let source = read_source(path)?;
    let highlighter = highlighter_from_config(config);
    let output = transforms::execute_transform(&source, transform, highlighter.as_ref())
        .map_err(CliError::Transform)?;
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

/// Handle the draft subcommands
fn handle_draft_command(
    matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &MdliveConfig,
) -> Result<(), CliError> {
    let key = config.storage.draft_key.as_str();
    let mut store = FileStore::new(&config.storage.directory);

    match matches.subcommand() {
        Some(("show", _)) => {
            print!("{}", store.load(key)?.unwrap_or_default());
            Ok(())
        }
        Some(("save", sub_matches)) => {
            let text = read_source(required(sub_matches, "input"))?;
            store.path_for(key)?;
            let mut session = EditSession::start(store, key);
            match session.set_text(text) {
                mdlive_babel::BufferState::Clean => {
                    tracing::info!(key, "draft saved");
                    Ok(())
                }
                mdlive_babel::BufferState::Dirty => Err(CliError::DraftNotSaved(key.to_string())),
            }
        }
        Some(("export", sub_matches)) => {
            let session = EditSession::start(store, key);
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_export(session.text(), to, output, extra_params, config)
        }
        Some(("clear", _)) => {
            store.remove(key)?;
            tracing::info!(key, "draft cleared");
            Ok(())
        }
        _ => Err(CliError::Transform(
            "Unknown draft command. Use --help for usage information.".to_string(),
        )),
    }
}

/// Handle the highlight-css command
fn handle_highlight_css_command(
    theme: Option<&str>,
    config: &MdliveConfig,
) -> Result<(), CliError> {
    let theme = theme.unwrap_or_else(|| config.highlight.theme_for(config.view.dark_mode));
    print!("{}", highlight_css(theme)?);
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &MdliveConfig) -> Result<(), CliError> {
    let registry = registry_from_config(config)?;
    println!("Export formats:\n");
    for name in registry.list_formats() {
        let format = registry.get(&name)?;
        println!(
            "  {:<10} {} (.{})",
            name,
            format.description(),
            format.file_extensions().join(", .")
        );
    }

    println!("\nInspect transforms:\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
    Ok(())
}

fn load_cli_config(explicit_path: Option<&str>) -> Result<MdliveConfig, CliError> {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    Ok(loader.build()?)
}

/// Move view overrides from the extras into the config; the rest stay format options.
fn apply_config_overrides(
    config: &mut MdliveConfig,
    extra_params: &mut HashMap<String, String>,
) -> Result<(), CliError> {
    if let Some(raw) = extra_params.remove("theme") {
        config.view.theme = raw.parse::<Theme>()?;
    }
    if let Some(raw) = take_override(extra_params, &["dark-mode", "dark"]) {
        config.view.dark_mode = parse_bool_arg("dark-mode", &raw)?;
    }
    if let Some(raw) = take_override(extra_params, &["highlight"]) {
        config.highlight.enabled = parse_bool_arg("highlight", &raw)?;
    }
    if let Some(raw) = extra_params.remove("view-font-size") {
        config.view.font_size = raw.parse().map_err(|_| CliError::InvalidExtra {
            flag: "view-font-size".to_string(),
            value: raw.clone(),
        })?;
    }
    Ok(())
}

/// Formats configured from `config`: PDF geometry, HTML highlighting and embedded CSS.
fn registry_from_config(config: &MdliveConfig) -> Result<FormatRegistry, CliError> {
    let mut registry = FormatRegistry::new();
    registry.register(MarkdownFormat);
    registry.register(TextFormat);

    let mut html_options = HtmlOptions::default();
    if config.highlight.enabled && config.convert.html.embed_highlight_css {
        let theme = config.highlight.theme_for(config.view.dark_mode);
        html_options = html_options.with_stylesheet(highlight_css(theme)?);
    }
    let html = if config.highlight.enabled {
        HtmlFormat::new(SyntectHighlighter::new())
    } else {
        HtmlFormat::new(PlainHighlighter)
    };
    registry.register(html.with_options(html_options));

    registry.register(PdfFormat::new(PageGeometry::from(&config.convert.pdf)));
    Ok(registry)
}

fn highlighter_from_config(config: &MdliveConfig) -> Box<dyn Highlighter> {
    if config.highlight.enabled {
        Box::new(SyntectHighlighter::new())
    } else {
        Box::new(PlainHighlighter)
    }
}

fn preview_css(config: &MdliveConfig, settings: &ViewSettings) -> Result<Option<String>, CliError> {
    if !config.highlight.enabled {
        return Ok(None);
    }
    let theme = config.highlight.theme_for(settings.dark_mode);
    Ok(Some(highlight_css(theme)?))
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, CliError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(CliError::InvalidExtra {
            flag: flag.to_string(),
            value: other.to_string(),
        }),
    }
}
