// Command-line definition for mdlive
//
// Shared by the binary and by build.rs, which includes this file to generate shell
// completions. It may only depend on clap.

use clap::{Arg, ArgAction, Command, ValueHint};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-treeviz", "ast-json", "view-json"];

/// Names accepted by --to, aliases included
pub const FORMAT_NAMES: &[&str] = &["markdown", "md", "html", "htm", "text", "txt", "pdf"];

pub fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

pub fn to_arg() -> Arg {
    Arg::new("to")
        .long("to")
        .help("Target format (required)")
        .long_help(format!(
            "Target format to export to.\n\nAvailable formats: {}",
            FORMAT_NAMES.join(", ")
        ))
        .required(true)
        .value_hint(ValueHint::Other)
}

pub fn build_cli() -> Command {
    Command::new("mdlive")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert, preview and inspect markdown documents")
        .long_about(
            "mdlive is a command-line tool for working with markdown documents.\n\n\
            Commands:\n  \
            - convert: Export markdown as markdown, HTML, plain text or PDF\n  \
            - preview: Write a themed preview page, optionally re-rendering on change\n  \
            - inspect: View the parsed tree or the rendered view\n  \
            - draft:   Show, save, export or clear the persisted draft\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdlive notes.md --to html -o notes.html        # Convert to HTML file\n  \
            mdlive notes.md --to pdf -o notes.pdf          # Paginated PDF\n  \
            mdlive preview notes.md -o preview.html --watch\n  \
            mdlive inspect notes.md ast-json               # Parsed tree as JSON",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an mdlive.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline steps to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Export a markdown file (default command)")
                .long_about(
                    "Export a markdown file to another format.\n\n\
                    Supported formats:\n  \
                    - markdown: the source, unchanged (.md)\n  \
                    - text:     the source, unchanged (.txt)\n  \
                    - html:     standalone HTML5 document with highlighted code (.html)\n  \
                    - pdf:      the source laid out as plain text on A4 pages (.pdf)\n\n\
                    Text formats go to stdout by default; PDF needs -o.\n\n\
                    Examples:\n  \
                    mdlive convert notes.md --to html -o notes.html\n  \
                    mdlive convert notes.md --to pdf -o notes.pdf --extra-margin 40\n  \
                    mdlive notes.md --to text                     # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(to_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("preview")
                .about("Write a standalone preview page")
                .long_about(
                    "Render a markdown file into a themed HTML page.\n\n\
                    Theme, dark mode and font size come from the [view] section of the\n\
                    configuration, or from --extra-theme, --extra-dark-mode and\n\
                    --extra-view-font-size.\n\n\
                    With --watch the page is rewritten every time the input changes.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(output_arg())
                .arg(
                    Arg::new("watch")
                        .long("watch")
                        .short('w')
                        .help("Re-render whenever the input changes (requires -o)")
                        .requires("output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the parsed document or the rendered view")
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'ast-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("draft")
                .about("Manage the persisted draft")
                .long_about(
                    "The draft lives in the [storage] directory under the configured key\n\
                    (.mdlive/markdown.md by default) and is written atomically.",
                )
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Print the draft"))
                .subcommand(
                    Command::new("save")
                        .about("Replace the draft with the contents of a file")
                        .arg(
                            Arg::new("input")
                                .help("Markdown file to store")
                                .required(true)
                                .index(1)
                                .value_hint(ValueHint::FilePath),
                        ),
                )
                .subcommand(
                    Command::new("export")
                        .about("Export the draft")
                        .arg(to_arg())
                        .arg(output_arg()),
                )
                .subcommand(Command::new("clear").about("Delete the draft")),
        )
        .subcommand(
            Command::new("highlight-css")
                .about("Output the stylesheet for highlighted code blocks")
                .long_about(
                    "Outputs the class-based CSS matching the spans of exported HTML.\n\n\
                    Without a theme, the configured light or dark theme is used,\n\
                    following view.dark_mode.",
                )
                .arg(
                    Arg::new("theme")
                        .help("syntect theme name (e.g. 'InspiredGitHub')")
                        .required(false)
                        .index(1)
                        .value_hint(ValueHint::Other),
                ),
        )
}
