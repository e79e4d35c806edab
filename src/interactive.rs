use std::io::Write as _;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt as _, BufReader};

use crate::app::navigate::{BrowserNavigator, Navigator};
use crate::app::view::SearchView;
use crate::cli::InteractiveArgs;

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Search(&'a str),
    Open(usize),
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input<'_> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Input::Search(line);
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q" | "quit"), None, None) => Input::Quit,
        (Some("open"), Some(row), None) => match row.parse::<usize>() {
            Ok(row) if row > 0 => Input::Open(row),
            _ => Input::Invalid(format!("invalid row: {row}")),
        },
        _ => Input::Invalid(format!("unknown command: :{command}")),
    }
}

/// Every line from stdin is a search, except `:open N` and `:quit`.
///
/// This loop is the only writer of the view. When stdin closes, searches already
/// dispatched are still awaited and drawn before returning.
pub async fn run(args: InteractiveArgs) -> anyhow::Result<()> {
    let (dispatcher, mut completions) = crate::search::dispatcher_for(&args.fetch)?;
    let navigator = BrowserNavigator;
    let mut view = SearchView::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut outstanding = 0usize;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                match parse_input(&line) {
                    Input::Search(keyword) => {
                        dispatcher.search(keyword);
                        outstanding += 1;
                    }
                    Input::Open(row) => open_row(&view, row, &navigator),
                    Input::Quit => return Ok(()),
                    Input::Invalid(message) => eprintln!("{message}"),
                }
            }
            Some(completion) = completions.recv() => {
                outstanding = outstanding.saturating_sub(1);
                view.apply(completion);
                redraw(&view)?;
            }
        }
    }

    while outstanding > 0 {
        let Some(completion) = completions.recv().await else {
            break;
        };
        outstanding -= 1;
        view.apply(completion);
        redraw(&view)?;
    }

    Ok(())
}

fn open_row(view: &SearchView, row: usize, navigator: &dyn Navigator) {
    let Some(request) = view.tap(row - 1) else {
        eprintln!("no row {row}");
        return;
    };
    if let Err(err) = navigator.navigate(&request) {
        eprintln!("{err:#}");
    }
}

fn redraw(view: &SearchView) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", view.render()).context("write stdout")?;
    stdout.flush().context("flush stdout")
}
