//! # Numo CLI
//!
//! Command-line access to the language switcher.
//!
//! ## Usage
//!
//! ```bash
//! # Translate a page description into the stored language
//! numo render demos/home.yaml
//!
//! # Preview another language without changing the stored preference
//! numo render demos/home.yaml --lang fr
//!
//! # Manage the stored preference
//! numo lang set fr
//! numo lang current
//! numo lang list
//!
//! # Find keys missing from a language table
//! numo check
//! ```

use std::sync::Arc;

use clap::Parser;
use numo_i18n::{
    Document, I18nError, LanguageCode, Numo, NumoOptions, PageSpec, Settings, TranslationCatalog,
    adapter::storage::{InMemoryPreferenceStore, PreferenceStoreFactory},
    config,
    domain::{
        command::{LangCommands, NumoCli, NumoCliCommand, RenderFormat},
        constant::defaults
    },
    i18n::LanguageState,
    port::PreferenceStore
};
use tabled::Table;

#[tokio::main]
async fn main() -> Result<(), I18nError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "numo_i18n=info".parse().map_err(|e| I18nError::Configuration(format!("Invalid log filter: {}", e)))?
            )
        )
        .init();

    let cli = NumoCli::parse();
    let settings = match &cli.config {
        Some(path) => config::load_settings_from(path)?,
        None => config::load_settings()?
    };
    let catalog = Arc::new(settings.catalog_loader().load());

    match cli.command {
        NumoCliCommand::Render { page, lang, format } => {
            let store = match lang {
                Some(code) => {
                    let preview = InMemoryPreferenceStore::new();
                    preview.set(defaults::STORAGE_KEY, &code).await?;
                    Arc::new(preview) as Arc<dyn PreferenceStore>
                }
                None => preference_store(&settings)?
            };
            let document = PageSpec::from_path(&page)?.build()?;
            let numo = Numo::mount(document, catalog, store, NumoOptions::from(&settings)).await;

            match format {
                RenderFormat::Html => println!("{}", numo.with_document(Document::to_html).await),
                RenderFormat::Report => println!("{}", serde_json::to_string_pretty(&numo.translate_page().await?)?)
            }
            numo.unmount().await?;
        }
        NumoCliCommand::Lang { command } => match command {
            LangCommands::Set { language } => {
                let language = LanguageCode::from(language);
                if !catalog.contains_language(&language) {
                    return Err(I18nError::catalog_missing(language.as_str()));
                }
                let mut scratch = Document::new();
                let mut state = LanguageState::initialize(
                    preference_store(&settings)?,
                    settings.default_language.clone(),
                    &mut scratch
                )
                .await;
                if state.set_current(&language, &mut scratch).await? {
                    println!("Language set to {}", language);
                } else {
                    println!("Language is already {}", language);
                }
            }
            LangCommands::Current => {
                println!("{}", stored_language(&settings).await?);
            }
            LangCommands::List => {
                let current = stored_language(&settings).await?;
                for language in catalog.languages() {
                    let marker = if language == current { "*" } else { " " };
                    println!("{} {} ({})", marker, language, language.indicator_label());
                }
            }
        },
        NumoCliCommand::Check => check(&catalog)?
    }

    Ok(())
}

fn preference_store(settings: &Settings) -> Result<Arc<dyn PreferenceStore>, I18nError> {
    Ok(PreferenceStoreFactory::create(settings.storage, config::get_data_dir()?))
}

async fn stored_language(settings: &Settings) -> Result<LanguageCode, I18nError> {
    let mut scratch = Document::new();
    let state =
        LanguageState::initialize(preference_store(settings)?, settings.default_language.clone(), &mut scratch).await;
    Ok(state.current().clone())
}

fn check(catalog: &TranslationCatalog) -> Result<(), I18nError> {
    println!("{}", Table::new(catalog.coverage_rows()));

    let gaps = catalog.coverage_gaps();
    if gaps.is_empty() {
        Ok(())
    } else {
        Err(I18nError::Configuration(format!("{} language table(s) are missing keys", gaps.len())))
    }
}
