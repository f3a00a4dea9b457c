//! `reelscope history` / `reelscope categories` — saved-analysis management.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::Subcommand;

use reelscope_core::Category;
use reelscope_storage::HistoryStore;

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved analyses, newest first
    List {
        /// Only show analyses in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Print one saved analysis as JSON
    Show { id: String },
    /// Delete a saved analysis
    Delete { id: String },
    /// Assign a saved analysis to a category (omit --category to clear)
    Assign {
        id: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Write a versioned backup of everything to a JSON file
    Export { path: PathBuf },
    /// Merge a backup file into the store (imported records win on id clash)
    Import { path: PathBuf },
}

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories
    List,
    /// Create or rename a category
    Add {
        name: String,
        /// Reuse an existing id to rename; otherwise one is generated
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete a category; its analyses become uncategorized
    Delete { id: String },
}

pub fn run_history(command: HistoryCommand) -> Result<()> {
    let store = HistoryStore::open_default()?;
    match command {
        HistoryCommand::List { category } => {
            let categories = store.categories();
            let history = store.history();
            let mut shown = 0usize;
            for item in &history {
                if let Some(wanted) = &category {
                    if item.category_id.as_deref() != Some(wanted.as_str()) {
                        continue;
                    }
                }
                let when = Local
                    .timestamp_millis_opt(item.timestamp)
                    .single()
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| item.timestamp.to_string());
                let category_name = item
                    .category_id
                    .as_ref()
                    .and_then(|id| categories.iter().find(|c| &c.id == id))
                    .map(|c| c.name.as_str())
                    .unwrap_or("未分类");
                println!("{}  {}  [{}]  {}", item.id, when, category_name, item.title);
                shown += 1;
            }
            if shown == 0 {
                println!("(no saved analyses)");
            }
        }
        HistoryCommand::Show { id } => {
            let item = store
                .history()
                .into_iter()
                .find(|item| item.id == id)
                .ok_or_else(|| anyhow::anyhow!("no saved analysis with id {id}"))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        HistoryCommand::Delete { id } => {
            store.delete(&id)?;
            println!("deleted {id}");
        }
        HistoryCommand::Assign { id, category } => {
            let mut item = store
                .history()
                .into_iter()
                .find(|item| item.id == id)
                .ok_or_else(|| anyhow::anyhow!("no saved analysis with id {id}"))?;
            if let Some(category_id) = &category {
                if !store.categories().iter().any(|c| &c.id == category_id) {
                    anyhow::bail!("no category with id {category_id}");
                }
            }
            item.category_id = category;
            store.save(item)?;
            println!("updated {id}");
        }
        HistoryCommand::Export { path } => {
            let json = store.export_backup_json()?;
            std::fs::write(&path, json)?;
            println!("exported to {}", path.display());
        }
        HistoryCommand::Import { path } => {
            let json = std::fs::read_to_string(&path)?;
            let imported = store.import_backup_json(&json)?;
            println!("imported {imported} analyses from {}", path.display());
        }
    }
    Ok(())
}

pub fn run_categories(command: CategoryCommand) -> Result<()> {
    let store = HistoryStore::open_default()?;
    match command {
        CategoryCommand::List => {
            let categories = store.categories();
            if categories.is_empty() {
                println!("(no categories)");
            }
            for category in categories {
                println!("{}  {}", category.id, category.name);
            }
        }
        CategoryCommand::Add { name, id } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            store.save_category(Category {
                id: id.clone(),
                name,
            })?;
            println!("saved category {id}");
        }
        CategoryCommand::Delete { id } => {
            store.delete_category(&id)?;
            println!("deleted category {id}");
        }
    }
    Ok(())
}
