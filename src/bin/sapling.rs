// SPDX-License-Identifier: Unlicense
use std::{
    env,
    io::{self, BufRead, Write},
    path::Path,
    process,
};

use anyhow::{anyhow, Result};
use log::{error, info};
use sapling::{
    check::{self, Report},
    driver::{self, Compilation, Options, Reply, Session},
    parser, pretty,
};

static USAGE: &str = r#"
usage: sapling [--tree] [--bound] [CMD [ARG]]

commands:
    repl            Read expressions from the terminal, one per line (default)
    eval EXPR       Evaluate one expression
    tree EXPR       Print the syntax tree of an expression
    run FILE        Evaluate every line of a file
    check FILE      Run a file of `<expression> => <value>` cases

flags:
    --tree          Print the syntax tree before each result
    --bound         Print the bound tree before each result

examples:
    sapling eval "4 + (1 + 2) * 3"
    sapling --tree run sums.txt
    sapling check cases.txt
"#;

enum Cmd {
    Repl,
    Eval { text: String },
    Tree { text: String },
    Run { filepath: String },
    Check { filepath: String },
}

fn parse_args() -> Option<(Cmd, Options)> {
    let mut options = Options::default();
    let mut rest = vec![];
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--tree" => options.show_tree = true,
            "--bound" => options.show_bound = true,
            _ => rest.push(arg),
        }
    }

    let mut args = rest.into_iter();
    let cmd = match args.next().as_deref() {
        None | Some("repl") => Cmd::Repl,
        Some("eval") => Cmd::Eval { text: args.next()? },
        Some("tree") => Cmd::Tree { text: args.next()? },
        Some("run") => Cmd::Run {
            filepath: args.next()?,
        },
        Some("check") => Cmd::Check {
            filepath: args.next()?,
        },
        Some(_) => return None,
    };
    Some((cmd, options))
}

fn repl(options: Options) -> Result<()> {
    let mut session = Session::new(options);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match session.submit(&line) {
            Reply::Exit => break,
            Reply::Output(out) if out.is_empty() => {}
            Reply::Output(out) => writeln!(stdout, "{out}")?,
        }
    }

    Ok(())
}

fn run_file(filepath: &str, options: Options) -> Result<bool> {
    let src = driver::read_file(Path::new(filepath))?;
    let mut ok = true;
    for (line_no, compilation) in driver::compile_lines(&src) {
        ok &= compilation.evaluate().value().is_some();
        println!("{line_no}: {}", driver::render(&compilation, options));
    }
    Ok(ok)
}

fn run_check(filepath: &str) -> Result<bool> {
    let cases = check::load_cases(Path::new(filepath))?;
    info!("running {} cases from {}", cases.len(), filepath);
    let report = Report::run(cases);
    println!("{report}");
    Ok(report.is_success())
}

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .env()
        .init()
        .map_err(|e| anyhow!("failed to set up logging: {}", e))?;

    let Some((cmd, options)) = parse_args() else {
        println!("sapling v{}", env!("CARGO_PKG_VERSION"));
        println!("{USAGE}");
        // FreeBSD EX_USAGE (64)
        process::exit(64)
    };

    let ok = match cmd {
        Cmd::Repl => repl(options).map(|_| true),
        Cmd::Eval { text } => {
            let compilation = Compilation::new(&text);
            println!("{}", driver::render(&compilation, options));
            Ok(compilation.evaluate().value().is_some())
        }
        Cmd::Tree { text } => {
            let tree = parser::parse(&text);
            print!("{}", pretty::prettify(&tree.root_node()));
            for diagnostic in tree.diagnostics() {
                println!("{diagnostic}");
            }
            Ok(tree.diagnostics().is_empty())
        }
        Cmd::Run { filepath } => run_file(&filepath, options),
        Cmd::Check { filepath } => run_check(&filepath),
    };

    match ok {
        Ok(true) => Ok(()),
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err:#}");
            Err(err)
        }
    }
}
