//! Layering parsed model output onto dashboard state.
//!
//! The rule everywhere is merge-don't-clobber: a field the model supplied
//! (non-empty) replaces the current value; a field it omitted keeps whatever
//! the dashboard already holds. Applied independently per field, so a reply
//! carrying only a script table cannot blank out chart data.

use tracing::debug;

use crate::state::DashboardState;
use crate::types::{AnalysisResult, SopResult, Stage};

fn set_if_present(dst: &mut String, src: String) {
    if !src.trim().is_empty() {
        *dst = src;
    }
}

fn set_stage_if_present(dst: &mut Stage, src: Stage) {
    if !src.is_empty() {
        *dst = src;
    }
}

/// Merge an analysis reply into the dashboard, field by field.
pub fn merge_analysis(state: &mut DashboardState, result: AnalysisResult) {
    set_if_present(&mut state.inputs.niche, result.meta.niche);
    set_if_present(&mut state.inputs.topic, result.meta.topic);
    set_if_present(&mut state.inputs.context, result.sop_context);

    set_if_present(&mut state.header_meta.summary, result.meta.summary);
    if !result.meta.tags.is_empty() {
        state.header_meta.tags = result.meta.tags;
    }
    set_if_present(&mut state.header_meta.deep_analysis, result.meta.deep_analysis);
    set_if_present(&mut state.header_meta.stats.duration, result.meta.stats.duration);
    set_if_present(&mut state.header_meta.stats.shots, result.meta.stats.shots);
    set_if_present(&mut state.header_meta.stats.emotions, result.meta.stats.emotions);
    set_if_present(&mut state.header_meta.stats.model, result.meta.stats.model);

    if let Some(structure) = result.logic_structure {
        set_stage_if_present(&mut state.logic_details.hook, structure.hook);
        set_stage_if_present(&mut state.logic_details.turn, structure.turn);
        set_stage_if_present(&mut state.logic_details.hunt, structure.hunt);
        set_stage_if_present(&mut state.logic_details.meta, structure.meta);
    }

    if let Some(charts) = result.charts {
        if !charts.pacing.is_empty() {
            state.pacing_data = charts.pacing;
        }
        set_if_present(&mut state.pacing_insight, charts.pacing_insight);
        if !charts.persona.is_empty() {
            state.persona_data = charts.persona;
        }
        if !charts.persona_traits.is_empty() {
            state.persona_traits = charts.persona_traits;
        }
    }

    if !result.script_table.is_empty() {
        debug!(rows = result.script_table.len(), "replacing script table");
        state.script_table = result.script_table;
    }
}

/// Merge generated SOP steps into the dashboard, one step at a time.
///
/// A step missing from the reply keeps its prior formula and description;
/// a present step overwrites them, with newlines converted to the `<br>`
/// display marker. Steps outside 1-8 are ignored.
pub fn merge_sop(state: &mut DashboardState, result: SopResult) {
    for (key, patch) in result {
        let number: u8 = match key.parse() {
            Ok(n @ 1..=8) => n,
            _ => {
                debug!(key = %key, "ignoring out-of-range SOP step");
                continue;
            }
        };
        if let Some(step) = state.sop_data.get_mut(&number) {
            if !patch.formula.trim().is_empty() {
                step.formula = patch.formula.replace('\n', "<br>");
            }
            set_if_present(&mut step.desc, patch.desc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChartBundle, PersonaPoint, ScriptRow, SopPatch};

    fn script_only_result() -> AnalysisResult {
        AnalysisResult {
            script_table: vec![ScriptRow {
                id: "01".to_string(),
                time: "00:00 - 00:02".to_string(),
                dialogue: "这是全网首发".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn partial_result_does_not_clobber_charts() {
        let mut state = DashboardState::default();
        let persona_before = state.persona_data.clone();
        let pacing_before = state.pacing_data.clone();

        merge_analysis(&mut state, script_only_result());

        assert_eq!(state.persona_data, persona_before);
        assert_eq!(state.pacing_data, pacing_before);
        assert_eq!(state.script_table.len(), 1);
        assert_eq!(state.script_table[0].dialogue, "这是全网首发");
    }

    #[test]
    fn empty_stats_fields_keep_defaults() {
        let mut state = DashboardState::default();
        let mut result = AnalysisResult::default();
        result.meta.stats.duration = "01:23".to_string();
        // shots / emotions / model left empty by the model.

        merge_analysis(&mut state, result);

        assert_eq!(state.header_meta.stats.duration, "01:23");
        assert_eq!(state.header_meta.stats.shots, "0");
        assert_eq!(state.header_meta.stats.emotions, "4重");
    }

    #[test]
    fn empty_persona_dataset_is_ignored() {
        let mut state = DashboardState::default();
        let before = state.persona_data.clone();
        let result = AnalysisResult {
            charts: Some(ChartBundle {
                persona: Vec::new(),
                pacing_insight: "节奏前快后慢".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        merge_analysis(&mut state, result);

        assert_eq!(state.persona_data, before);
        assert_eq!(state.pacing_insight, "节奏前快后慢");
    }

    #[test]
    fn supplied_persona_dataset_replaces() {
        let mut state = DashboardState::default();
        let result = AnalysisResult {
            charts: Some(ChartBundle {
                persona: vec![PersonaPoint {
                    subject: "真实感".to_string(),
                    a: 88.0,
                    full_mark: 100.0,
                }],
                ..Default::default()
            }),
            ..Default::default()
        };

        merge_analysis(&mut state, result);

        assert_eq!(state.persona_data.len(), 1);
        assert_eq!(state.persona_data[0].subject, "真实感");
    }

    #[test]
    fn empty_logic_stage_keeps_prior_content() {
        let mut state = DashboardState::default();
        let hook_before = state.logic_details.hook.clone();
        let result = AnalysisResult {
            logic_structure: Some(crate::types::LogicStructure {
                turn: Stage {
                    title: "转折".to_string(),
                    desc: "质疑轻松赚钱的可持续性".to_string(),
                    action: "表情特写".to_string(),
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        merge_analysis(&mut state, result);

        assert_eq!(state.logic_details.hook, hook_before);
        assert_eq!(state.logic_details.turn.title, "转折");
    }

    #[test]
    fn sop_merge_touches_only_present_steps() {
        let mut state = DashboardState::default();
        let desc_before = state.sop_data[&2].desc.clone();
        let formula_before = state.sop_data[&2].formula.clone();

        let mut result = SopResult::new();
        result.insert(
            "1".to_string(),
            SopPatch {
                formula: "说实话\n我发现做猫咖这件事真的挺简单的".to_string(),
                desc: "数字冲击开场".to_string(),
            },
        );

        merge_sop(&mut state, result);

        assert_eq!(
            state.sop_data[&1].formula,
            "说实话<br>我发现做猫咖这件事真的挺简单的"
        );
        assert_eq!(state.sop_data[&1].desc, "数字冲击开场");
        // Step 2 was absent from the reply: untouched.
        assert_eq!(state.sop_data[&2].desc, desc_before);
        assert_eq!(state.sop_data[&2].formula, formula_before);
    }

    #[test]
    fn sop_merge_ignores_out_of_range_keys() {
        let mut state = DashboardState::default();
        let before = state.sop_data.clone();

        let mut result = SopResult::new();
        result.insert("9".to_string(), SopPatch::default());
        result.insert("0".to_string(), SopPatch::default());
        result.insert("not-a-number".to_string(), SopPatch::default());

        merge_sop(&mut state, result);
        assert_eq!(state.sop_data, before);
    }

    #[test]
    fn empty_sop_reply_resets_nothing() {
        let mut state = DashboardState::default();
        state.sop_data.get_mut(&3).unwrap().formula = "已经改过的公式".to_string();
        let before = state.sop_data.clone();

        merge_sop(&mut state, SopResult::new());
        assert_eq!(state.sop_data, before);
    }
}
