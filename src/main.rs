// src/main.rs
use std::env;
use std::error::Error;
use std::time::Instant;

use alfred::AlfredItem;
use backend::{BackendClient, ResultProvider};
use config::Config;
use error::SearchError;
use history::{FileHistoryStore, HistoryStore};
use search::Source;
use session::SearchSession;

mod alfred;
mod backend;
mod config;
mod error;
mod export;
mod history;
mod language;
mod mock;
mod pipeline;
mod score;
mod search;
mod session;
mod utils;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let start = Instant::now();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(|s| s.as_str()).unwrap_or("");
    let rest = args.get(1..).unwrap_or(&[]);
    log::debug!("command {:?}, args {:?}", command, rest);

    let config = Config::from_env();

    // Failures become a notification item; the process itself never fails on them
    let items = match run(command, rest, &config) {
        Ok(items) => items,
        Err(e) => {
            log::error!("{} failed: {}", command, e);
            vec![alfred::error_item(&e)]
        }
    };

    alfred::output_items(items)?;
    log::debug!("Completed in {:?}", start.elapsed());
    Ok(())
}

fn run(command: &str, args: &[String], config: &Config) -> Result<Vec<AlfredItem>, SearchError> {
    match command {
        "search" => {
            let (source, keyword, page) = parse_search_args(args)?;
            let provider = provider(config)?;
            let mut session =
                SearchSession::new(provider, FileHistoryStore::in_data_dir()?, config.num_products);
            let processed = session.search(&keyword, source)?;
            Ok(alfred::result_items(
                processed,
                page,
                config.page_size,
                config.show_score,
            ))
        }
        "export" => {
            let (source, keyword, _) = parse_search_args(args)?;
            let provider = provider(config)?;
            let mut session =
                SearchSession::new(provider, FileHistoryStore::in_data_dir()?, config.num_products);
            let processed = session.search(&keyword, source)?;
            let path = export::export_to_dir(
                &processed.results,
                source,
                &keyword,
                chrono::Local::now().date_naive(),
                &env::current_dir()?,
            )?;

            let mut item = AlfredItem::message(
                format!("Exported {} results", processed.results.len()),
                path.display().to_string(),
            );
            item.arg = Some(path.display().to_string());
            item.valid = Some(true);
            Ok(vec![item])
        }
        "history" => {
            let entries = FileHistoryStore::in_data_dir()?.load()?;
            if entries.is_empty() {
                return Ok(vec![AlfredItem::message("No recent searches", "Searches you run show up here")]);
            }
            Ok(entries.iter().map(AlfredItem::from).collect())
        }
        "detect" => {
            let text = args.join(" ");
            let language = language::detect_language(&text);
            Ok(vec![AlfredItem::message(
                language.name(),
                format!("{} · {}", language.code(), language.marketplace()),
            )])
        }
        "score" => {
            let price = parse_number::<f64>(args.first(), "price")?;
            let rating = parse_number::<f64>(args.get(1), "rating")?;
            let reviews = parse_number::<u64>(args.get(2), "review count")?;
            let value = score::winning_score(price, rating, reviews)?;
            Ok(vec![AlfredItem::message(
                format!("Winning score: {}", score::round2(value)),
                format!("price {} · rating {} · {} reviews", price, rating, reviews),
            )])
        }
        other => Err(SearchError::InvalidInput(format!(
            "unknown command {:?} (expected search, export, history, detect or score)",
            other
        ))),
    }
}

fn provider(config: &Config) -> Result<Box<dyn ResultProvider>, SearchError> {
    if config.offline_mode {
        log::debug!("Offline mode, using mock results");
        return Ok(Box::new(mock::MockProvider::new(config.mock_delay)));
    }
    Ok(Box::new(BackendClient::new(
        &config.backend_url,
        config.request_timeout,
    )?))
}

/// `<source> <keyword...> [--page N]`
fn parse_search_args(args: &[String]) -> Result<(Source, String, usize), SearchError> {
    let source: Source = args
        .first()
        .ok_or_else(|| SearchError::InvalidInput("missing source".to_string()))?
        .parse()?;

    let mut page = 1;
    let mut words = Vec::new();
    let mut rest = args[1..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--page" {
            page = parse_number::<usize>(rest.next(), "page")?;
        } else {
            words.push(arg.as_str());
        }
    }

    Ok((source, words.join(" "), page))
}

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, what: &str) -> Result<T, SearchError> {
    let raw = arg.ok_or_else(|| SearchError::InvalidInput(format!("missing {}", what)))?;
    raw.trim()
        .parse()
        .map_err(|_| SearchError::InvalidInput(format!("invalid {}: {:?}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_search_args() {
        let (source, keyword, page) =
            parse_search_args(&args(&["amazon", "smart", "watch", "--page", "3"])).unwrap();
        assert_eq!(source, Source::Amazon);
        assert_eq!(keyword, "smart watch");
        assert_eq!(page, 3);

        let (_, keyword, page) = parse_search_args(&args(&["ebay"])).unwrap();
        assert_eq!(keyword, "");
        assert_eq!(page, 1);
    }

    #[test]
    fn test_parse_search_args_errors() {
        assert!(matches!(parse_search_args(&[]), Err(SearchError::InvalidInput(_))));
        assert!(matches!(
            parse_search_args(&args(&["amazon", "watch", "--page", "x"])),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_run_score_and_detect() {
        let config = Config::default();
        let items = run("score", &args(&["50", "4.4", "13973"]), &config).unwrap();
        assert_eq!(items[0].title, "Winning score: 79.33");

        let items = run("detect", &args(&["coque", "iPhone"]), &config).unwrap();
        assert_eq!(items[0].title, "French");
    }

    #[test]
    fn test_run_rejects_bad_input() {
        let config = Config::default();
        assert!(matches!(
            run("score", &args(&["-5", "4", "1"]), &config),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(matches!(
            run("frobnicate", &[], &config),
            Err(SearchError::InvalidInput(_))
        ));
    }
}
