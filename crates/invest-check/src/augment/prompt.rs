use std::fmt::Write as _;

use super::{AugmentationInputs, AugmentationKind};
use crate::lang::Language;

/// Composes the deterministic natural-language request for one analysis
/// kind. Same inputs, same prompt; the template is fixed per kind and
/// localized by the language flag.
pub(super) fn build_prompt(
    kind: AugmentationKind,
    inputs: &AugmentationInputs,
    language: Language,
) -> String {
    let mut prompt = String::new();

    match language {
        Language::En => {
            prompt.push_str(
                "You are reviewing one investment decision checkpoint. Respond with a single JSON \
                 object only: {\"consistency_score\": <0-10>, \"conflict_points\": [..], \
                 \"suggestions\": [..], \"reasoning_path\": \"..\"}.\n",
            );
        }
        Language::Zh => {
            prompt.push_str(
                "你正在审查一份投资决策检查单。请只回复一个 JSON 对象：{\"consistency_score\": \
                 <0-10>, \"conflict_points\": [..], \"suggestions\": [..], \
                 \"reasoning_path\": \"..\"}。\n",
            );
        }
    }

    match kind {
        AugmentationKind::LogicConsistency => {
            section(&mut prompt, language, "Task", "任务");
            line(
                &mut prompt,
                language,
                "Judge whether the entry, exit, and stop-loss rules are mutually consistent and executable.",
                "判断买入、卖出与止损规则之间是否一致且可执行。",
            );
            field(&mut prompt, language, "Goal", "目标", inputs.goal.as_deref());
            field(&mut prompt, language, "Entry rule", "买入规则", inputs.entry_rule.as_deref());
            field(&mut prompt, language, "Exit rule", "卖出规则", inputs.exit_rule.as_deref());
            field(
                &mut prompt,
                language,
                "Stop-loss rule",
                "止损规则",
                inputs.stop_loss_rule.as_deref(),
            );
        }
        AugmentationKind::RiskConsistency => {
            section(&mut prompt, language, "Task", "任务");
            line(
                &mut prompt,
                language,
                "Judge whether the risk controls match the stated appetite and horizon.",
                "判断风险控制措施是否与所述风险偏好和投资期限匹配。",
            );
            field(
                &mut prompt,
                language,
                "Risk appetite",
                "风险偏好",
                inputs.risk_appetite.as_deref(),
            );
            field(&mut prompt, language, "Horizon", "投资期限", inputs.horizon.as_deref());
            field(
                &mut prompt,
                language,
                "Position size",
                "仓位",
                inputs.position_size.as_deref(),
            );
            field(
                &mut prompt,
                language,
                "Drawdown tolerance",
                "回撤容忍度",
                inputs.drawdown_tolerance.as_deref(),
            );
            list(&mut prompt, language, "Mitigations", "风控措施", &inputs.mitigations);
        }
        AugmentationKind::CognitiveBias => {
            section(&mut prompt, language, "Task", "任务");
            line(
                &mut prompt,
                language,
                "Identify cognitive biases likely to be driving this decision.",
                "识别可能影响该决策的认知偏差。",
            );
            field(&mut prompt, language, "Goal", "目标", inputs.goal.as_deref());
            list(
                &mut prompt,
                language,
                "Biases already reviewed",
                "已自查的偏差",
                &inputs.biases_reviewed,
            );
            field(
                &mut prompt,
                language,
                "Contrarian view sought",
                "是否寻求反方观点",
                inputs.contrarian_view.as_deref(),
            );
            field(
                &mut prompt,
                language,
                "Emotional state",
                "情绪状态",
                inputs.emotional_state.as_deref(),
            );
        }
    }

    prompt
}

fn section(prompt: &mut String, language: Language, en: &str, zh: &str) {
    let title = match language {
        Language::En => en,
        Language::Zh => zh,
    };
    writeln!(prompt, "## {title}").expect("write to string");
}

fn line(prompt: &mut String, language: Language, en: &str, zh: &str) {
    let text = match language {
        Language::En => en,
        Language::Zh => zh,
    };
    writeln!(prompt, "{text}").expect("write to string");
}

fn field(prompt: &mut String, language: Language, en: &str, zh: &str, value: Option<&str>) {
    let name = match language {
        Language::En => en,
        Language::Zh => zh,
    };
    let missing = match language {
        Language::En => "(not provided)",
        Language::Zh => "（未填写）",
    };
    writeln!(prompt, "- {name}: {}", value.unwrap_or(missing)).expect("write to string");
}

fn list(prompt: &mut String, language: Language, en: &str, zh: &str, values: &[String]) {
    let name = match language {
        Language::En => en,
        Language::Zh => zh,
    };
    if values.is_empty() {
        field(prompt, language, en, zh, None);
    } else {
        writeln!(prompt, "- {name}: {}", values.join(", ")).expect("write to string");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> AugmentationInputs {
        AugmentationInputs {
            goal: Some("Grow retirement savings".to_string()),
            entry_rule: Some("Buy below 15x earnings".to_string()),
            stop_loss_rule: Some("Sell at -8%".to_string()),
            ..AugmentationInputs::default()
        }
    }

    #[test]
    fn prompts_are_deterministic() {
        let first = build_prompt(AugmentationKind::LogicConsistency, &inputs(), Language::En);
        let second = build_prompt(AugmentationKind::LogicConsistency, &inputs(), Language::En);
        assert_eq!(first, second);
    }

    #[test]
    fn prompt_embeds_the_relevant_answers() {
        let prompt = build_prompt(AugmentationKind::LogicConsistency, &inputs(), Language::En);
        assert!(prompt.contains("Buy below 15x earnings"));
        assert!(prompt.contains("Sell at -8%"));
        assert!(prompt.contains("consistency_score"));
    }

    #[test]
    fn chinese_template_is_selected_by_language_flag() {
        let prompt = build_prompt(AugmentationKind::RiskConsistency, &inputs(), Language::Zh);
        assert!(prompt.contains("风险偏好"));
        assert!(!prompt.contains("Risk appetite:"));
    }

    #[test]
    fn missing_fields_are_marked_not_provided() {
        let prompt = build_prompt(
            AugmentationKind::CognitiveBias,
            &AugmentationInputs::default(),
            Language::En,
        );
        assert!(prompt.contains("(not provided)"));
    }
}
