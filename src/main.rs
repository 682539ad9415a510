use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use redline_trace::areas::session::Session;
use redline_trace::artifacts::core::init_logging;
use redline_trace::artifacts::diff::tokenizer::TokenizeMode;
use redline_trace::commands::extract::{ExtractFormat, ExtractOptions};
use redline_trace::commands::trace::{
    DEFAULT_MAX_MATRIX_TOKENS, DEFAULT_MAX_SIDE_BY_SIDE, TraceInput, TraceOptions,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "redline-trace",
    version = "0.1.0",
    about = "Trace the LCS alignment behind a tracked-changes comparison",
    long_about = "This tool shows, step by step, how two texts or two sections of .docx \
    documents are tokenized, aligned with a longest common subsequence and grouped \
    into the insertions and deletions a redline would contain.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "trace",
        about = "Trace the alignment between two inputs",
        long_about = "This command compares two .docx files on the section designated by the query, \
        or two raw strings when --text is given, and prints every stage of the alignment."
    )]
    Trace {
        #[arg(index = 1, help = "The old document (or text with --text)")]
        input1: String,
        #[arg(index = 2, help = "The new document (or text with --text)")]
        input2: String,
        #[arg(index = 3, help = "The section query, e.g. '3.1' or \"para 'The Tenant'\"")]
        query: Option<String>,
        #[arg(long, help = "Treat the inputs as raw text")]
        text: bool,
        #[arg(long, help = "Compare character by character instead of word by word")]
        chars: bool,
        #[arg(long, help = "Print the LCS matrix")]
        matrix: bool,
        #[arg(long, help = "Print every backtracking step")]
        trace: bool,
        #[arg(long = "no-coalesce", help = "Print the raw edit script")]
        no_coalesce: bool,
        #[arg(long, default_value_t = DEFAULT_MAX_MATRIX_TOKENS, help = "Largest token count whose matrix is printed")]
        max_matrix_tokens: usize,
        #[arg(long, default_value_t = DEFAULT_MAX_SIDE_BY_SIDE, help = "Largest group count shown side by side")]
        max_side_by_side: usize,
    },
    #[command(
        name = "extract",
        about = "Print what a query designates in a document",
        long_about = "This command resolves a section, paragraph, footnote, endnote or element query \
        in a .docx file and prints the matched XML, or its text with --text."
    )]
    Extract {
        #[arg(index = 1, help = "The document to search")]
        file: PathBuf,
        #[arg(index = 2, help = "The query to resolve")]
        query: String,
        #[arg(long, help = "A second document to resolve the same query in")]
        compare: Option<PathBuf>,
        #[arg(long, help = "Print the matched text instead of the XML")]
        text: bool,
        #[arg(long, requires = "compare", help = "Print a unified diff of the two extractions")]
        diff: bool,
        #[arg(short, long, help = "Write the output to a file")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let session = Session::new(Box::new(std::io::stdout()))?;

    match cli.command {
        Commands::Trace {
            input1,
            input2,
            query,
            text,
            chars,
            matrix,
            trace,
            no_coalesce,
            max_matrix_tokens,
            max_side_by_side,
        } => {
            let input = TraceInput::from_args(input1, input2, query, text)?;
            let options = TraceOptions {
                mode: if chars {
                    TokenizeMode::Char
                } else {
                    TokenizeMode::Word
                },
                show_matrix: matrix,
                show_backtrack: trace,
                coalesce: !no_coalesce,
                max_matrix_tokens,
                max_side_by_side,
            };

            session.trace(&input, &options)?
        }
        Commands::Extract {
            file,
            query,
            compare,
            text,
            diff,
            output,
        } => {
            let files = std::iter::once(file).chain(compare).collect::<Vec<_>>();
            let options = ExtractOptions {
                format: if text {
                    ExtractFormat::Text
                } else {
                    ExtractFormat::Xml
                },
                diff,
                output,
            };

            session.extract(&files, &query, &options)?
        }
    }

    Ok(())
}
