use std::io;

use anyhow::Result;
use block_insights::{
    chain::{Chain, UnsupportedChain},
    client::InsightsClient,
    config::ViewConfig,
    receipt::{BlockQuery, TransactionReceipt},
    view::{render, Action, InsightsState, RequestId},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

const HELP: &str = "Enter a block hash to search. Commands: n(ext), p(rev), chain <NAME>, q(uit)";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Next,
    Prev,
    SwitchChain(Chain),
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Result<Command, UnsupportedChain> {
    let line = line.trim();

    let command = match line {
        "" => Command::Nothing,
        "n" | "next" => Command::Next,
        "p" | "prev" => Command::Prev,
        "q" | "quit" => Command::Quit,
        _ => match line.strip_prefix("chain ") {
            Some(name) => Command::SwitchChain(name.trim().parse()?),
            None => Command::Search(line.to_string()),
        },
    };

    Ok(command)
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    Unreadable,
    Closed,
}

/// Lines that are not valid UTF-8 are skipped; other read errors end the view.
fn read_input(line: io::Result<Option<String>>) -> io::Result<Input> {
    match line {
        Ok(Some(line)) => Ok(Input::Line(line)),
        Ok(None) => Ok(Input::Closed),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            println!("Unreadable input: {err}");
            Ok(Input::Unreadable)
        }
        Err(err) => Err(err),
    }
}

type SearchResult = (RequestId, Result<Vec<TransactionReceipt>>);

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ViewConfig::init()?;
    tracing::info!("{config:#?}");

    let client = InsightsClient::new(config.url);
    let mut chain = config.chain;
    // Chain of the receipts on screen, used for explorer links.
    let mut shown_chain = chain;
    let mut state = InsightsState::new();
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<SearchResult>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match read_input(line)? {
                    Input::Line(line) => line,
                    Input::Unreadable => continue,
                    Input::Closed => break,
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Nothing) => continue,
                    Ok(Command::Next) => state = state.next_page(),
                    Ok(Command::Prev) => state = state.prev_page(),
                    Ok(Command::SwitchChain(new_chain)) => {
                        chain = new_chain;
                        println!("Searching on {chain}");
                        continue;
                    }
                    Ok(Command::Search(block_hash)) => {
                        let request;
                        (state, request) = state.begin_search();
                        shown_chain = chain;

                        let client = client.clone();
                        let results_tx = results_tx.clone();
                        let query = BlockQuery::new(block_hash, chain);
                        tokio::spawn(async move {
                            let result = client.search(&query).await;
                            let _ = results_tx.send((request, result));
                        });
                    }
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
            }
            Some((request, result)) = results_rx.recv() => {
                let action = match result {
                    Ok(receipts) => Action::SearchFinished { request, receipts },
                    Err(err) => {
                        tracing::warn!("Search failed: {err:#}");
                        Action::SearchFailed { request, message: err.to_string() }
                    }
                };
                state = state.apply(action);
            }
        }

        println!("{}", render(&state, shown_chain));
    }

    Ok(())
}
