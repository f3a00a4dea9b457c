//! `reelscope analyze` — upload, analyze, merge, optionally save.

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use tracing::info;

use reelscope_config::ProviderConfig;
use reelscope_core::{merge_analysis, AnalysisProgress, DashboardState, ProviderKind, SavedAnalysis};
use reelscope_providers::{analyze_video, VideoSource};
use reelscope_sampler::{encode_file, validate_size};
use reelscope_storage::HistoryStore;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the video file (≤ 1 GiB)
    pub file: PathBuf,

    /// Merge the result into an existing saved analysis instead of a fresh one
    #[arg(long)]
    pub id: Option<String>,

    /// Save the merged dashboard to history
    #[arg(long)]
    pub save: bool,

    /// Print the merged dashboard as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &ProviderConfig, args: AnalyzeArgs) -> Result<()> {
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

    let metadata = tokio::fs::metadata(&args.file).await?;
    validate_size(metadata.len())?;

    // Only the native path ships the file inline; the frame-sampling path
    // reads it through the decoder, so skip the in-memory encode there.
    let source = match config.provider {
        ProviderKind::Gemini => {
            eprint!("reading   0%");
            let payload = encode_file(&args.file, |percent| {
                eprint!("\rreading {percent:3}%");
                let _ = std::io::stderr().flush();
            })
            .await?;
            eprintln!();
            VideoSource::with_payload(args.file.clone(), payload)
        }
        ProviderKind::OpenAiCompatible => VideoSource::new(args.file.clone()),
    };

    let result = with_synthetic_progress(analyze_video(config, &source)).await?;
    info!(
        rows = result.script_table.len(),
        topic = %result.meta.topic,
        "analysis complete"
    );

    merge_analysis(&mut state, result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state);
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

/// Drive the cosmetic analyzing-phase progress while the call is in flight.
async fn with_synthetic_progress<T, F>(call: F) -> F::Output
where
    F: Future<Output = T>,
{
    let mut progress = AnalysisProgress::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    tokio::pin!(call);

    loop {
        tokio::select! {
            output = &mut call => {
                progress.finish();
                eprintln!("\ranalyzing 100%");
                return output;
            }
            _ = ticker.tick() => {
                let percent = progress.tick();
                eprint!("\ranalyzing {percent:3.0}%");
                let _ = std::io::stderr().flush();
            }
        }
    }
}

fn print_summary(state: &DashboardState) {
    println!("赛道: {}", state.inputs.niche);
    println!("标题: {}", state.inputs.topic);
    println!("总结: {}", state.header_meta.summary);
    println!(
        "时长 {} · 关键帧 {} · 情绪 {}",
        state.header_meta.stats.duration,
        state.header_meta.stats.shots,
        state.header_meta.stats.emotions
    );
    println!();
    println!("叙事结构:");
    for stage in [
        &state.logic_details.hook,
        &state.logic_details.turn,
        &state.logic_details.hunt,
        &state.logic_details.meta,
    ] {
        println!("  {} — {}", stage.title, stage.action);
    }
    println!();
    println!("脚本拆解 ({} 行):", state.script_table.len());
    for row in &state.script_table {
        println!("  [{}] {} | {} | {}", row.id, row.time, row.shot, row.dialogue);
    }
}
