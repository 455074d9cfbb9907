//! Точка входа `bq`.
//!
//! - парсинг CLI
//! - `bank` работает с локальным файлом, без сети
//! - остальные команды создают `QuoteClient` и ходят на сайт
//! - `Ctrl+C` поднимает флаг shutdown: паузы и оставшиеся запросы прерываются

mod bank;
mod cli;
mod output;

use std::sync::{Arc, atomic::AtomicBool, atomic::Ordering};

use anyhow::Context;
use brainyquote_fetch::{QuoteClient, TopicFilter, Transport};
use clap::Parser;
use log::info;

use crate::cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug
    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));

    // Ctrl+C => ставим shutdown=true
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
            info!("shutting down...");
        })?;
    }

    let args = Args::parse();
    args.validate()?;

    let out = match &args.command {
        Command::Bank {
            file,
            topic,
            random,
        } => {
            let quotes = if *random {
                vec![bank::pick_random(file, topic.as_deref())?]
            } else {
                bank::load_bank(file, topic.as_deref())?
            };
            output::render_all(&quotes, args.format, args.escape)
        }
        _ => {
            let cfg = args.client_config();
            info!("using {} (retry {:?})", cfg.base_url, cfg.retry);
            let client = QuoteClient::connect(cfg)
                .context("failed to create client")?
                .with_shutdown(shutdown);
            run_remote(&args, &client)?
        }
    };

    println!("{out}");
    Ok(())
}

fn run_remote<T: Transport>(args: &Args, client: &QuoteClient<T>) -> anyhow::Result<String> {
    let render_one = |q| output::render(&q, args.format, args.escape);

    let out = match &args.command {
        Command::Today { topic } => render_one(client.today(topic)),
        Command::Find(filter) => render_one(client.find(&filter.query())?),
        Command::Random(filter) => render_one(client.random(&filter.query())?),
        Command::All { filter, workers } => {
            let query = filter.query();
            let quotes = match &query.topic {
                TopicFilter::Many(topics) if *workers > 1 => {
                    client.find_all_concurrent(topics, query.author.as_deref(), *workers)?
                }
                _ => client.find_all(&query)?,
            };
            info!("{} quotes", quotes.len());
            output::render_all(&quotes, args.format, args.escape)
        }
        Command::Topics { popular: false } => client.topics()?.join("\n"),
        Command::Topics { popular: true } => client.popular_topics()?.join("\n"),
        Command::Authors => client.authors()?.join("\n"),
        Command::Bank { .. } => anyhow::bail!("bank is a local command"),
    };

    Ok(out)
}
