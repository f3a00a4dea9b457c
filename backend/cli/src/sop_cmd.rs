//! `reelscope generate-sop` — regenerate the 8-step script formulas.

use anyhow::Result;
use chrono::Utc;
use clap::Args;

use reelscope_config::ProviderConfig;
use reelscope_core::{merge_sop, DashboardState, SavedAnalysis};
use reelscope_providers::generate_sop_script;
use reelscope_storage::HistoryStore;

#[derive(Args)]
pub struct SopArgs {
    /// The account niche, e.g. "家居博主"
    #[arg(long)]
    pub niche: String,

    /// The video topic/title to script
    #[arg(long)]
    pub topic: String,

    /// Optional reference script or analysis context to imitate
    #[arg(long, default_value = "")]
    pub context: String,

    /// Start from an existing saved analysis instead of a fresh dashboard
    #[arg(long)]
    pub id: Option<String>,

    /// Save the updated dashboard back to history
    #[arg(long)]
    pub save: bool,

    /// Print the SOP steps as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &ProviderConfig, args: SopArgs) -> Result<()> {
    let store = HistoryStore::open_default()?;

    let mut state = match &args.id {
        Some(id) => {
            let existing = store
                .history()
                .into_iter()
                .find(|item| &item.id == id)
                .ok_or_else(|| anyhow::anyhow!("no saved analysis with id {id}"))?;
            DashboardState::restore(&existing)
        }
        None => DashboardState::default(),
    };

    state.inputs.niche = args.niche.clone();
    state.inputs.topic = args.topic.clone();
    if !args.context.trim().is_empty() {
        state.inputs.context = args.context.clone();
    }

    let result =
        generate_sop_script(config, &args.niche, &args.topic, &state.inputs.context).await?;
    merge_sop(&mut state, result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state.sop_data)?);
    } else {
        for (number, step) in &state.sop_data {
            println!("{number}. {} — {}", step.step, step.title);
            println!("   {}", step.desc);
            if !step.original.trim().is_empty() {
                println!("   原片: {}", step.original);
            }
            println!("   公式: {}", step.formula.replace("<br>", " / "));
        }
    }

    if args.save {
        let id = args
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let category_id = store
            .history()
            .iter()
            .find(|item| item.id == id)
            .and_then(|item| item.category_id.clone());
        let snapshot =
            SavedAnalysis::snapshot(&id, Utc::now().timestamp_millis(), category_id, &state);
        store.save(snapshot)?;
        println!("saved as {id}");
    }

    Ok(())
}
