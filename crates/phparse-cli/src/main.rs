mod diagnostics;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;

use phparse_lexer::Lexer;
use phparse_parser::Parser;
use phparse_syntax::ast::Program;
use phparse_syntax::error::Error;
use phparse_syntax::token::{Item, TokenKind};

use diagnostics::render_error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(ClapParser, Debug)]
#[command(name = "phparse", version, about = "Scan and parse PHP source")]
struct Cli {
    /// PHP file to read. Reads standard input when omitted or `-`.
    file: Option<PathBuf>,

    /// Print the token stream instead of the syntax tree
    #[arg(short = 't', long = "tokens")]
    tokens: bool,

    /// Include whitespace and comment tokens in --tokens output
    #[arg(long = "trivia", requires = "tokens")]
    trivia: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text, env = "PHPARSE_FORMAT")]
    format: Format,

    /// Print stage summaries to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Serialize)]
struct TokensDoc<'a, 'src> {
    file: &'a str,
    tokens: &'a [Item<'src>],
}

#[derive(Serialize)]
struct ParseDoc<'a> {
    file: &'a str,
    program: &'a Program,
    errors: &'a [Error],
}

fn fail(msg: String) -> ! {
    eprintln!("{}: {}", "error".red().bold(), msg.red());
    std::process::exit(1);
}

/// Returns the source text and the name used to label positions.
fn read_source(path: Option<&PathBuf>) -> (String, String) {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            if !p.exists() {
                fail(format!("File not found: {}", p.display()));
            }
            match fs::read_to_string(p) {
                Ok(s) => (s, p.display().to_string()),
                Err(e) => fail(format!("Failed to read {}: {}", p.display(), e)),
            }
        }
        _ => {
            let mut s = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut s) {
                fail(format!("Failed to read standard input: {}", e));
            }
            (s, "<stdin>".to_string())
        }
    }
}

fn print_json<T: Serialize>(doc: &T) {
    match serde_json::to_string_pretty(doc) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(format!("Failed to serialize output: {}", e)),
    }
}

fn verbose(msg: String) {
    eprintln!("{}", msg.bright_black());
}

fn run_tokens(cli: &Cli, src: &str, name: &str) -> bool {
    let items: Vec<Item> = Lexer::new(src, name)
        .filter(|i| cli.trivia || !i.kind.is_trivia())
        .collect();
    if cli.verbose {
        verbose(format!("scanned {} tokens", items.len()));
    }

    match cli.format {
        Format::Text => {
            for item in &items {
                println!(
                    "{}:{}\t{:?}\t{:?}",
                    item.begin.line, item.begin.offset, item.kind, item.text
                );
            }
        }
        Format::Json => print_json(&TokensDoc {
            file: name,
            tokens: &items,
        }),
    }

    match items.iter().find(|i| i.kind == TokenKind::Error) {
        Some(item) => {
            let err = Error::at(&*item.text, &item.begin);
            render_error("Lex error", src, name, &err);
            false
        }
        None => true,
    }
}

fn run_parse(cli: &Cli, src: &str, name: &str) -> bool {
    let mut parser = Parser::new(src, name);
    let program = parser.parse_program();
    let errors = parser.errors();
    if cli.verbose {
        verbose(format!(
            "parsed {} top-level nodes, {} errors",
            program.nodes.len(),
            errors.len()
        ));
    }

    match cli.format {
        Format::Text => println!("{:#?}", program),
        Format::Json => print_json(&ParseDoc {
            file: name,
            program: &program,
            errors,
        }),
    }

    for err in errors {
        render_error("Parse error", src, name, err);
    }
    errors.is_empty()
}

fn main() {
    let cli = Cli::parse();
    let (src, name) = read_source(cli.file.as_ref());

    let ok = if cli.tokens {
        run_tokens(&cli, &src, &name)
    } else {
        run_parse(&cli, &src, &name)
    };
    if !ok {
        std::process::exit(1);
    }
}
