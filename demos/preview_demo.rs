use clap::{Arg, Command};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use link_preview_card::{
    log_preview_card, setup_logging, CardLabels, FetcherConfig, LogConfig, MetadataFetcher,
    PreviewCard, PreviewCardConfig, PreviewState,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("Link Preview Demo")
        .version("0.1")
        .about("Fetch link previews from the website metadata service")
        .arg(
            Arg::new("urls")
                .help("URLs to preview")
                .required(true)
                .num_args(1..),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help("Print the rendered card markup instead of the fields")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("locale")
                .short('l')
                .long("locale")
                .help("JSON file with card labels")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log fetch cycles to the console")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    if verbose {
        setup_logging(LogConfig {
            log_level: "debug".into(),
            file_output: false,
            ..Default::default()
        });
    }

    let labels = match matches.get_one::<String>("locale") {
        Some(path) => CardLabels::from_locale_file(path)?,
        None => CardLabels::default(),
    };

    let fetcher = MetadataFetcher::new_with_config(FetcherConfig::from_env()?)?;
    let card = PreviewCard::new_with_config(
        PreviewCardConfig::new()
            .with_fetcher(fetcher)
            .with_labels(labels),
    );

    println!("{}", "Link Preview Demo".bold().green());
    println!("{}", "=================".green());

    let urls: Vec<&String> = matches
        .get_many::<String>("urls")
        .map(|values| values.collect())
        .unwrap_or_default();

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    for url in urls {
        if let Some(cycle) = card.set_href(url.as_str()) {
            cycle.await?;
        }
        pb.inc(1);

        if verbose {
            log_preview_card(&card.state());
        }

        if matches.get_flag("html") {
            pb.println(card.render());
        } else {
            pb.println(describe(&card.state()));
        }
    }

    pb.finish_with_message("done");
    Ok(())
}

fn describe(state: &PreviewState) -> String {
    let mut lines = vec![
        format!("\n{}", "Link Preview".bold().blue()),
        format!("{}", "---------------".blue()),
        format!("{}: {}", "URL".bold(), state.input_url),
        format!("{}: {}", "Title".bold(), state.title),
    ];

    if !state.description.is_empty() {
        let description = if state.description.chars().count() > 100 {
            format!("{}...", state.description.chars().take(100).collect::<String>())
        } else {
            state.description.clone()
        };
        lines.push(format!("{}: {}", "Description".bold(), description));
    }
    if !state.image_url.is_empty() {
        lines.push(format!("{}: {}", "Image".bold(), state.image_url));
    }
    if !state.canonical_link.is_empty() {
        lines.push(format!("{}: {}", "Link".bold(), state.canonical_link));
    }
    lines.push(format!("{}: {}", "Theme".bold(), state.theme_color));

    lines.join("\n")
}
