use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::mpsc;

use crate::app::dispatcher::{QueryDispatcher, SearchCompletion};
use crate::app::navigate::{BrowserNavigator, Navigator as _};
use crate::app::view::SearchView;
use crate::cli::{FetchArgs, SearchArgs};
use crate::config::FetchConfig;
use crate::fetch::FetchPipeline;

pub fn dispatcher_for(
    args: &FetchArgs,
) -> anyhow::Result<(QueryDispatcher, mpsc::UnboundedReceiver<SearchCompletion>)> {
    let config = FetchConfig::resolve(
        args.api_base.as_deref(),
        args.lenient,
        args.thumbnail_workers,
    )
    .context("resolve fetch config")?;
    tracing::debug!(?config, "fetch config");

    let pipeline = FetchPipeline::new(config);
    let api_base = pipeline.config().api_base.clone();
    Ok(QueryDispatcher::new(Arc::new(pipeline), api_base))
}

pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    let (dispatcher, mut completions) = dispatcher_for(&args.fetch)?;
    dispatcher.search(&args.keyword.join(" "));
    drop(dispatcher);

    let completion = completions
        .recv()
        .await
        .context("search task ended without a result")?;
    let mut view = SearchView::new();
    view.apply(completion);

    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, view.books()).context("write json")?;
        writeln!(stdout).context("write stdout")?;
        if let Some(message) = view.message() {
            eprintln!("{message}");
        }
    } else {
        write!(stdout, "{}", view.render()).context("write stdout")?;
    }
    stdout.flush().context("flush stdout")?;
    drop(stdout);

    if let Some(row) = args.open {
        let request = row
            .checked_sub(1)
            .and_then(|index| view.tap(index))
            .ok_or_else(|| anyhow::anyhow!("no row {row} to open"))?;
        BrowserNavigator.navigate(&request)?;
    }

    Ok(())
}
