//! bookpath - book-path arithmetic from the command line

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use bookpath::{
    build_book_path, build_relative_path, group_for_media_type, longest_common_path,
    media_type_for_path, quote_url, resolve_segments, starting_dir, unquote_url,
};

#[derive(Parser)]
#[command(name = "bookpath")]
#[command(version, about = "Book-path arithmetic for ebook packages", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookpath relative OEBPS/package.opf OEBPS/Text/ch1.xhtml    Href from the OPF to a chapter
    bookpath join ../Images/a.png OEBPS/Text                    Book path of an href
    bookpath --json common OEBPS/Text/a.xhtml OEBPS/Styles/b.css")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collapse `.` and `..` segments
    Resolve { path: String },
    /// Relative href from one book path to another
    Relative { from: String, to: String },
    /// Rebase a relative reference onto a start directory
    Join {
        #[arg(value_name = "REF")]
        reference: String,
        start_dir: String,
    },
    /// Directory containing a book path
    Dir { path: String },
    /// Longest common directory of several book paths
    Common {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Percent-encode an href as an IRI
    Quote { href: String },
    /// Decode percent-escapes in an href
    Unquote { href: String },
    /// Media type of a book path, by extension
    MediaType { path: String },
    /// Resource group of a media type
    Group { media_type: String },
    /// Run the built-in examples
    Demo,
}

/// Result of one function call, as printed.
#[derive(Serialize)]
struct Outcome {
    function: &'static str,
    inputs: Vec<String>,
    output: String,
}

impl Outcome {
    fn new(function: &'static str, inputs: &[&str], output: String) -> Self {
        Self {
            function,
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output,
        }
    }

    fn print_text(&self, verbose_inputs: bool) {
        if verbose_inputs {
            println!("{}({})", self.function, self.inputs.join(", "));
        }
        if self.output.is_empty() {
            println!("\"\"");
        } else {
            println!("{}", self.output);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let outcomes = match &cli.command {
        Command::Demo => demo()?,
        command => vec![evaluate(command)?],
    };
    tracing::info!("evaluated {} call(s)", outcomes.len());

    if cli.json {
        let json = match outcomes.as_slice() {
            [single] => serde_json::to_string_pretty(single),
            many => serde_json::to_string_pretty(many),
        }
        .map_err(|e| e.to_string())?;
        println!("{json}");
    } else if matches!(cli.command, Command::Demo) {
        for outcome in &outcomes {
            outcome.print_text(true);
            println!();
        }
    } else {
        for outcome in &outcomes {
            outcome.print_text(false);
        }
    }

    Ok(())
}

fn evaluate(command: &Command) -> Result<Outcome, String> {
    let outcome = match command {
        Command::Resolve { path } => Outcome::new(
            "resolve_segments",
            &[path.as_str()],
            resolve_segments(path).map_err(|e| e.to_string())?,
        ),
        Command::Relative { from, to } => Outcome::new(
            "build_relative_path",
            &[from.as_str(), to.as_str()],
            build_relative_path(from, to),
        ),
        Command::Join {
            reference,
            start_dir,
        } => Outcome::new(
            "build_book_path",
            &[reference.as_str(), start_dir.as_str()],
            build_book_path(reference, start_dir).map_err(|e| e.to_string())?,
        ),
        Command::Dir { path } => Outcome::new("starting_dir", &[path.as_str()], starting_dir(path)),
        Command::Common { paths } => {
            let inputs: Vec<&str> = paths.iter().map(String::as_str).collect();
            Outcome::new("longest_common_path", &inputs, longest_common_path(paths.as_slice()))
        }
        Command::Quote { href } => Outcome::new("quote_url", &[href.as_str()], quote_url(href)),
        Command::Unquote { href } => {
            Outcome::new("unquote_url", &[href.as_str()], unquote_url(href))
        }
        Command::MediaType { path } => {
            let media_type = media_type_for_path(path)
                .ok_or_else(|| format!("no media type known for {path:?}"))?;
            Outcome::new("media_type_for_path", &[path.as_str()], media_type.to_string())
        }
        Command::Group { media_type } => {
            let group = group_for_media_type(media_type)
                .ok_or_else(|| format!("no resource group known for {media_type:?}"))?;
            Outcome::new("group_for_media_type", &[media_type.as_str()], group.to_string())
        }
        Command::Demo => return Err("demo is not a single call".to_string()),
    };
    Ok(outcome)
}

fn demo() -> Result<Vec<Outcome>, String> {
    let calls = [
        Command::Resolve {
            path: "This/is/the/../../end.txt".into(),
        },
        Command::Relative {
            from: "hello.txt".into(),
            to: "goodbye.txt".into(),
        },
        Command::Relative {
            from: "OEBPS/Text/book1/chapter1.xhtml".into(),
            to: "OEBPS/Text/book2/chapter1.xhtml".into(),
        },
        Command::Relative {
            from: "OEBPS/package.opf".into(),
            to: "OEBPS/Text/book1/chapter1.xhtml".into(),
        },
        Command::Join {
            reference: "../../Images/image.png".into(),
            start_dir: "OEBPS/Text/book1/".into(),
        },
        Command::Join {
            reference: "image.png".into(),
            start_dir: String::new(),
        },
        Command::Dir {
            path: "content.opf".into(),
        },
        Command::Common {
            paths: vec![
                "OEBPS/book1/text/chapter1.xhtml".into(),
                "OEBPS/book1/html/chapter2.xhtml".into(),
                "OEBPS/book2/text/chapter3.xhtml".into(),
            ],
        },
        Command::Quote {
            href: "Text/chapter one.xhtml#note 1".into(),
        },
        Command::MediaType {
            path: "OEBPS/Fonts/serif.woff2".into(),
        },
        Command::Group {
            media_type: "application/x-font-ttf".into(),
        },
    ];

    calls.iter().map(evaluate).collect()
}
