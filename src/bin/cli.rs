//! Digital library catalog CLI
//!
//! Local entry point over the bundled fixture in `{data_dir}/db.json`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use catalog::{
    config,
    error::{AppError, Result},
    models::{ArticleFilters, NewReview, QueryParams, SortOption},
    pipeline::{ArticleFeed, fetch_articles},
    services::{
        ArticleDetails, CitationStyle, ReadingHistory, ReviewService, Translator, citation_data,
        plain_text, query::enrich,
    },
    storage::{LibraryStorage, LocalStorage},
};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

/// Catalog - University Digital Library
#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    version,
    about = "Search, cite and review articles in a digital library"
)]
struct Cli {
    /// Directory holding config.toml, db.json and reader state
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search, filter and sort articles
    Search(SearchArgs),

    /// Show one article and record it in the reading history
    Show {
        id: String,

        /// Translate title and abstract to this language (en, ar, ha, fr, ch)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Cite an article
    Cite {
        id: String,

        /// APA, MLA, Chicago, Harvard, BibTeX or IEEE (default from config)
        #[arg(short, long)]
        style: Option<String>,

        /// Strip markup from the citation
        #[arg(long)]
        plain: bool,

        /// Write the citation to a .txt file in this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Articles related to one article
    Related {
        id: String,

        /// Maximum number of articles (default from config)
        #[arg(long)]
        max: Option<usize>,
    },

    /// List filter values: categories, authors and years
    Facets,

    /// Add or list reviews
    #[command(subcommand)]
    Review(ReviewCommand),

    /// Show recently viewed articles
    History {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Translate text
    Translate {
        text: Vec<String>,

        /// Target language
        #[arg(short, long)]
        to: String,

        /// Source language (default from config)
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Validate configuration and fixture
    Validate,

    /// Show data directory info
    Info,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Text to find in titles and abstracts
    term: Option<String>,

    /// relevance, date-desc, date-asc, title-asc, title-desc, author-asc, author-desc
    #[arg(short, long)]
    sort: Option<SortOption>,

    /// Item type name, e.g. Thesis ("all" for any)
    #[arg(long)]
    category: Option<String>,

    /// Part of an attached file's MIME type, e.g. pdf
    #[arg(long)]
    file_type: Option<String>,

    /// Part of the submitter's full name
    #[arg(long)]
    author: Option<String>,

    #[arg(long, requires = "year_max")]
    year_min: Option<i32>,

    #[arg(long, requires = "year_min")]
    year_max: Option<i32>,

    #[arg(short, long, default_value_t = 1)]
    page: u32,

    /// Page size (default from config)
    #[arg(short, long)]
    limit: Option<u32>,

    /// Walk every page instead of one
    #[arg(long)]
    all: bool,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Add a review
    Add {
        id: String,

        /// Rating from 1 to 5
        #[arg(short, long)]
        rating: u8,

        #[arg(short, long, default_value = "")]
        comment: String,
    },

    /// List reviews and the average rating
    List { id: String },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, default_level: &str) {
    let level = if verbose { "debug" } else { default_level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config(&cli.data_dir);
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loading catalog from {}", cli.data_dir.display());
    let (config, catalog) = config::load_all_with(config, &cli.data_dir)?;
    let catalog = Arc::new(catalog);
    let storage: Arc<dyn LibraryStorage> = Arc::new(LocalStorage::new(&cli.data_dir));

    match cli.command {
        Command::Search(args) => {
            let mut filter = ArticleFilters {
                category: args.category.unwrap_or_default(),
                file_type: args.file_type.unwrap_or_default(),
                author: args.author.unwrap_or_default(),
                ..ArticleFilters::default()
            };
            if let (Some(min), Some(max)) = (args.year_min, args.year_max) {
                filter.year = Some((min, max));
            }

            let mut params = QueryParams::default()
                .with_sort(args.sort.unwrap_or(config.query.sort_by))
                .with_filter(filter)
                .with_page(args.page)
                .with_limit(args.limit.unwrap_or(config.query.page_size));
            if let Some(term) = args.term {
                params = params.with_term(term);
            }

            let latency = Duration::from_millis(config.catalog.latency_ms);
            if args.all {
                let feed = ArticleFeed::new(Arc::clone(&catalog), params).with_latency(latency);
                let articles = feed.collect_all().await?;
                if args.json {
                    print_json(&articles)?;
                } else {
                    for article in &articles {
                        println!(
                            "{}  {}  ({})",
                            article.article.id, article.article.title, article.item_type_name
                        );
                    }
                    log::info!("{} articles", articles.len());
                }
            } else {
                let page = fetch_articles(&catalog, &params, latency).await?;
                if args.json {
                    print_json(&page)?;
                } else {
                    for article in &page.articles {
                        println!(
                            "{}  {}  ({}, {})",
                            article.article.id,
                            article.article.title,
                            article.item_type_name,
                            article.submitter
                        );
                    }
                    log::info!(
                        "Page {} of {} matches (more: {}, digest {})",
                        page.page,
                        page.total,
                        page.has_more,
                        page.digest()?
                    );
                }
            }
        }

        Command::Show { id, lang } => {
            let details =
                ArticleDetails::load(&catalog, &id, config.reading.words_per_minute)?;

            let (mut title, mut abstract_text) = (
                details.article.title.clone(),
                details.article.abstract_text.clone(),
            );
            if let Some(lang) = lang {
                let translator = Translator::new(&config.translation)?;
                let translated = translator
                    .translate_batch(&[title.clone(), abstract_text.clone()], &lang)
                    .await;
                if let [t, a] = translated.as_slice() {
                    title = t.clone();
                    abstract_text = a.clone();
                }
            }

            println!("{title}");
            println!(
                "{} · {} · {}",
                details.item_type_name, details.collection_name, details.community_name
            );
            if let Some(author) = details.author {
                println!("by {}", author.full_name);
            }
            println!("Reading time: {}", details.reading_time.label());
            println!();
            println!("{abstract_text}");
            for viewer in &details.viewers {
                println!("[{:?}] {}", viewer.kind, viewer.file.file_path);
            }

            let summary = ReviewService::new(Arc::clone(&catalog), Arc::clone(&storage))
                .summary(&id)
                .await;
            println!("Rating: {:.1} ({} reviews)", summary.avg, summary.reviews.len());

            let history = ReadingHistory::new(Arc::clone(&storage), config.history.max_entries);
            history.record(enrich(&catalog, details.article)).await?;
        }

        Command::Cite {
            id,
            style,
            plain,
            save,
        } => {
            let article = catalog
                .article(&id)
                .ok_or_else(|| AppError::not_found("article", &id))?;
            let style = style
                .as_deref()
                .map(CitationStyle::from_label)
                .unwrap_or(config.citation.default_style);

            let data = citation_data(&catalog, article, &config.citation.base_url)?;
            let citation = style.format(&data);
            let text = if plain || save.is_some() {
                plain_text(&citation)
            } else {
                citation
            };

            match save {
                Some(dir) => {
                    let path = dir.join(style.filename(&article.title));
                    tokio::fs::write(&path, &text).await?;
                    log::info!("{} citation saved to {}", style, path.display());
                }
                None => println!("{text}"),
            }
        }

        Command::Related { id, max } => {
            let max = max.unwrap_or(config.related.max_items);
            for related in catalog.related(&id, max, Utc::now())? {
                println!(
                    "{}  {}  ({} · {} views)",
                    related.article.id,
                    related.article.title,
                    related.date_label,
                    related.views_label
                );
            }
        }

        Command::Facets => {
            println!("Categories: {}", catalog.categories().join(", "));
            println!("Authors: {}", catalog.authors().join(", "));
            let years: Vec<String> = catalog.years().iter().map(|y| y.to_string()).collect();
            println!("Years: {}", years.join(", "));
            println!(
                "Sort options: {}",
                SortOption::ALL.map(|s| s.as_str()).join(", ")
            );
        }

        Command::Review(command) => {
            let reviews = ReviewService::new(Arc::clone(&catalog), Arc::clone(&storage));
            match command {
                ReviewCommand::Add {
                    id,
                    rating,
                    comment,
                } => {
                    let review = reviews
                        .submit(NewReview {
                            article_id: id,
                            rating,
                            comment,
                        })
                        .await?;
                    log::info!("Review {} added", review.id);
                }
                ReviewCommand::List { id } => {
                    let summary = reviews.summary(&id).await;
                    println!("Average {:.1} from {} reviews", summary.avg, summary.reviews.len());
                    for review in &summary.reviews {
                        println!(
                            "{}/5  {}  {}",
                            review.rating,
                            review.created_at.format("%Y-%m-%d"),
                            review.comment
                        );
                    }
                }
            }
        }

        Command::History { page, limit } => {
            if page == 0 || limit == 0 {
                return Err(AppError::validation("page and limit must be at least 1"));
            }
            let history = ReadingHistory::new(Arc::clone(&storage), config.history.max_entries);
            let entries = history.page(page, limit).await?;
            for article in &entries.items {
                println!("{}  {}", article.article.id, article.article.title);
            }
            log::info!("{} viewed articles (more: {})", entries.total, entries.has_more);
        }

        Command::Translate { text, to, from } => {
            let translator = Translator::new(&config.translation)?;
            let source = from.unwrap_or_else(|| translator.source_lang().to_string());
            let text = text.join(" ");
            println!("{}", translator.translate_from(&text, &to, &source).await);
        }

        Command::Info => {
            log::info!("Data directory: {}", cli.data_dir.display());
            log::info!("Fixture: {}", config.fixture_path(&cli.data_dir).display());
            log::info!(
                "Articles: {}, users: {}, files: {}",
                catalog.articles().len(),
                catalog.fixture().users.len(),
                catalog.fixture().files.len()
            );
            log::info!("History entries: {}", storage.load_history().await?.len());
            log::info!("Reviews: {}", storage.load_reviews().await?.len());
        }

        Command::Validate => {
            // load_all has already validated both files
            log::info!("✓ Config OK");
            log::info!("✓ Fixture OK ({} articles)", catalog.articles().len());
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
