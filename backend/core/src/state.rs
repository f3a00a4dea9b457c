//! Long-lived editable dashboard state and its persisted snapshots.
//!
//! `DashboardState` is what the pipeline merges results into; it ships with
//! the template content a fresh dashboard shows. `SavedAnalysis` is the
//! snapshot form the history store persists (camelCase on disk, matching the
//! v1 backup file format).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{LogicStructure, PacingPoint, PersonaPoint, ScriptRow, Stage};

/// User-editable inputs that feed the SOP generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptInputs {
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub context: String,
}

/// Header statistics shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderStats {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub shots: String,
    #[serde(default)]
    pub emotions: String,
    #[serde(default)]
    pub model: String,
}

impl Default for HeaderStats {
    fn default() -> Self {
        Self {
            duration: "00:00".to_string(),
            shots: "0".to_string(),
            emotions: "4重".to_string(),
            model: "AI ✨".to_string(),
        }
    }
}

/// Header metadata: summary, tags, and the deep-analysis blurb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMeta {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deep_analysis: String,
    #[serde(default)]
    pub stats: HeaderStats,
}

impl Default for HeaderMeta {
    fn default() -> Self {
        Self {
            summary: String::new(),
            tags: vec![
                "#标签1".to_string(),
                "#标签2".to_string(),
                "#标签3".to_string(),
                "#标签4".to_string(),
            ],
            deep_analysis: "“[在此处填写核心选题分析，例如：普通人如何通过...实现...]”".to_string(),
            stats: HeaderStats::default(),
        }
    }
}

/// One of the eight SOP script steps shown in the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SopStep {
    pub step: String,
    pub title: String,
    pub desc: String,
    pub original: String,
    pub formula: String,
}

/// Everything the dashboard edits, in one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub inputs: ScriptInputs,
    pub header_meta: HeaderMeta,
    pub logic_details: LogicStructure,
    pub pacing_data: Vec<PacingPoint>,
    pub pacing_insight: String,
    pub persona_data: Vec<PersonaPoint>,
    pub persona_traits: Vec<String>,
    pub script_table: Vec<ScriptRow>,
    pub sop_data: BTreeMap<u8, SopStep>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            inputs: ScriptInputs::default(),
            header_meta: HeaderMeta::default(),
            logic_details: default_logic_details(),
            pacing_data: default_pacing_data(),
            pacing_insight: "[在此处分析视频的节奏快慢、剪辑密度和情绪起伏]".to_string(),
            persona_data: default_persona_data(),
            persona_traits: vec!["极致细节控".to_string(), "人文关怀".to_string()],
            script_table: default_script_table(),
            sop_data: default_sop_data(),
        }
    }
}

impl DashboardState {
    /// Restore the dashboard from a saved snapshot.
    pub fn restore(item: &SavedAnalysis) -> Self {
        Self {
            inputs: item.inputs.clone(),
            header_meta: item.header_meta.clone(),
            logic_details: item.logic_details.clone(),
            pacing_data: item.pacing_data.clone(),
            pacing_insight: item.pacing_insight.clone(),
            persona_data: item.persona_data.clone(),
            persona_traits: item.persona_traits.clone(),
            script_table: item.script_table.clone(),
            sop_data: item.sop_data.clone(),
        }
    }
}

/// A snapshot of the dashboard, as stored in the history list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Base64-encoded thumbnail image, when one was captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub title: String,
    #[serde(default)]
    pub inputs: ScriptInputs,
    #[serde(default)]
    pub header_meta: HeaderMeta,
    #[serde(default)]
    pub logic_details: LogicStructure,
    #[serde(default)]
    pub pacing_data: Vec<PacingPoint>,
    #[serde(default)]
    pub pacing_insight: String,
    #[serde(default)]
    pub persona_data: Vec<PersonaPoint>,
    #[serde(default)]
    pub persona_traits: Vec<String>,
    #[serde(default)]
    pub script_table: Vec<ScriptRow>,
    #[serde(default)]
    pub sop_data: BTreeMap<u8, SopStep>,
}

impl SavedAnalysis {
    /// Snapshot the current dashboard under the given id and timestamp.
    pub fn snapshot(
        id: impl Into<String>,
        timestamp: i64,
        category_id: Option<String>,
        state: &DashboardState,
    ) -> Self {
        let title = if state.inputs.topic.trim().is_empty() {
            "未命名分析".to_string()
        } else {
            state.inputs.topic.clone()
        };
        Self {
            id: id.into(),
            category_id,
            thumbnail: None,
            timestamp,
            title,
            inputs: state.inputs.clone(),
            header_meta: state.header_meta.clone(),
            logic_details: state.logic_details.clone(),
            pacing_data: state.pacing_data.clone(),
            pacing_insight: state.pacing_insight.clone(),
            persona_data: state.persona_data.clone(),
            persona_traits: state.persona_traits.clone(),
            script_table: state.script_table.clone(),
            sop_data: state.sop_data.clone(),
        }
    }
}

/// A user-defined history category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

fn stage(title: &str, desc: &str, action: &str) -> Stage {
    Stage {
        title: title.to_string(),
        desc: desc.to_string(),
        action: action.to_string(),
    }
}

fn default_logic_details() -> LogicStructure {
    LogicStructure {
        hook: stage(
            "阶段 01: 黄金开场 (0-5s)",
            "策略：<b>高颜值空镜 + 认知定义</b><br>目的：利用视觉冲击和暴论快速筛选目标人群。",
            "推轨镜头进入",
        ),
        turn: stage(
            "阶段 02: 细节展开 (5-20s)",
            "策略：<b>工艺特写 + 仪式感</b><br>目的：通过非常规细节展示差异化，建立专业人设。",
            "细节特写展示",
        ),
        hunt: stage(
            "阶段 03: 功能反转 (20-40s)",
            "策略：<b>隐形收纳 + 人文关怀</b><br>目的：展示“好看且实用”，用具体爽点解决实际痛点。",
            "真人交互演示",
        ),
        meta: stage(
            "阶段 04: 钩子结尾 (40-50s)",
            "策略：<b>未完待续 + 场景留白</b><br>目的：展示一角但不完全展示，引导点击主页关注。",
            "全景后退/黑屏",
        ),
    }
}

fn default_pacing_data() -> Vec<PacingPoint> {
    let points = [
        ("0s", 60.0),
        ("10s", 75.0),
        ("25s", 55.0),
        ("35s", 85.0),
        ("50s", 90.0),
    ];
    points
        .iter()
        .map(|(time, value)| PacingPoint {
            time: time.to_string(),
            value: *value,
        })
        .collect()
}

fn default_persona_data() -> Vec<PersonaPoint> {
    let axes = [
        ("专业度", 90.0),
        ("审美力", 95.0),
        ("亲和力", 75.0),
        ("逻辑性", 85.0),
        ("创新度", 80.0),
    ];
    axes.iter()
        .map(|(subject, a)| PersonaPoint {
            subject: subject.to_string(),
            a: *a,
            full_mark: 100.0,
        })
        .collect()
}

fn default_script_table() -> Vec<ScriptRow> {
    vec![
        ScriptRow {
            id: "01".to_string(),
            time: "00:00 - 00:02".to_string(),
            shot: "推轨/特写".to_string(),
            visual: "场景：电梯门缓缓打开，展示入户长廊；【花字】：真正的高级。".to_string(),
            ai_prompt: "Cinematic shot, elevator doors opening, revealing a luxury minimalist hallway.".to_string(),
            dialogue: "真正高级的家".to_string(),
            logic: "黄金3秒：利用【花字】定义概念，配合高颜值画面吸引注意。".to_string(),
        },
        ScriptRow {
            id: "02".to_string(),
            time: "00:02 - 00:03".to_string(),
            shot: "推轨/跟拍".to_string(),
            visual: "场景：镜头继续向前推进，展示长廊的景深；【字幕】：从你走出电梯。".to_string(),
            ai_prompt: "Camera moving forward into the luxury hallway, soft lighting.".to_string(),
            dialogue: "是从你走出电梯的那一刻".to_string(),
            logic: "承接上文，制造场景代入感。".to_string(),
        },
        ScriptRow {
            id: "03".to_string(),
            time: "00:03 - 00:05".to_string(),
            shot: "固定/全景".to_string(),
            visual: "场景：展示完整的电梯厅空间；【字幕】：就开始设计了。".to_string(),
            ai_prompt: "Wide shot of the elevator hall, marble floor, minimalist design.".to_string(),
            dialogue: "就开始设计了".to_string(),
            logic: "完成第一句完整的观点输出，确立视频基调。".to_string(),
        },
        ScriptRow {
            id: "04".to_string(),
            time: "00:05 - 00:07".to_string(),
            shot: "中景/平移".to_string(),
            visual: "场景：白色烤漆墙板；【字幕】：L型圆弧包裹；【MG】：白色虚线勾勒圆弧轨迹。".to_string(),
            ai_prompt: "White wall paneling, dotted lines tracing the curved corner animation.".to_string(),
            dialogue: "从电梯出来 我们用一整面的烤漆墙板".to_string(),
            logic: "视觉可视化：开始介绍具体工艺，MG动画辅助理解。".to_string(),
        },
        ScriptRow {
            id: "05".to_string(),
            time: "00:07 - 00:09".to_string(),
            shot: "特写/旋转".to_string(),
            visual: "场景：镜头围绕圆弧转角旋转；【字幕】：L型圆弧。".to_string(),
            ai_prompt: "Close up of curved wall corner, smooth surface.".to_string(),
            dialogue: "做了一个L型的圆弧".to_string(),
            logic: "特写镜头展示细节质感。".to_string(),
        },
        ScriptRow {
            id: "06".to_string(),
            time: "00:09 - 00:11".to_string(),
            shot: "中景".to_string(),
            visual: "场景：展示墙板包裹住电梯门；【字幕】：包裹电梯。".to_string(),
            ai_prompt: "Wall paneling wrapping around elevator door.".to_string(),
            dialogue: "把整个电梯包裹起来".to_string(),
            logic: "通过画面语言解释“包裹感”。".to_string(),
        },
        ScriptRow {
            id: "07".to_string(),
            time: "00:11 - 00:13".to_string(),
            shot: "特写".to_string(),
            visual: "场景：内凹斜口按钮特写；【表情】：😱 惊讶贴纸；【MG】：箭头指向内凹处。".to_string(),
            ai_prompt: "Close up of recessed button, arrow pointing to it, shock emoji overlay.".to_string(),
            dialogue: "电梯显示屏移到了侧面".to_string(),
            logic: "情绪引导：利用【表情包】和【箭头指示】引导观众关注微小的设计亮点。".to_string(),
        },
        ScriptRow {
            id: "08".to_string(),
            time: "00:13 - 00:15".to_string(),
            shot: "特写".to_string(),
            visual: "场景：手指按下按钮；【字幕】：内凹斜口。".to_string(),
            ai_prompt: "Finger pressing the recessed elevator button.".to_string(),
            dialogue: "并在墙板上开了一个内凹斜口 把按钮嵌进去".to_string(),
            logic: "展示交互细节，体现“定制化”。".to_string(),
        },
    ]
}

/// The eight-step SOP template a fresh dashboard starts from.
pub fn default_sop_data() -> BTreeMap<u8, SopStep> {
    let steps = [
        (1u8, "第一步", "黄金开头", "利用视听刺激或痛点前置，在3秒内留住用户。"),
        (2, "第二步", "引入主题", "快速交代背景，建立信任或抛出悬念。"),
        (3, "第三步", "情绪铺垫", "通过细节描写或场景渲染，调动观众情绪。"),
        (4, "第四步", "核心转折", "打破预期，制造反差或提出新观点。"),
        (5, "第五步", "价值输出", "提供干货、情绪价值或爽点。"),
        (6, "第六步", "信任验证", "通过第三方视角、数据或细节证明真实性。"),
        (7, "第七步", "高潮/升华", "将具体事件上升到普世价值或情感共鸣。"),
        (8, "第八步", "行动呼吁", "引导关注、点赞或转化。"),
    ];
    steps
        .iter()
        .map(|(n, step, title, desc)| {
            (
                *n,
                SopStep {
                    step: step.to_string(),
                    title: title.to_string(),
                    desc: desc.to_string(),
                    original: "[原片案例台词]".to_string(),
                    formula: "\" [万能公式] \"".to_string(),
                },
            )
        })
        .collect()
}
