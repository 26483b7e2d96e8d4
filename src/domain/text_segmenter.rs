//! 文本分割器
//!
//! 将长文本按句读切分为适合单次合成的片段：
//! - 外层阈值 `gate_chars`：文本不超过该长度时不分割
//! - 内层阈值 `max_chars`：单个片段的软上限，单个句读单元超长时允许溢出，绝不在单元内部截断

use super::voice::Language;

/// 默认分割门限（超过该字符数才启用分割）
pub const DEFAULT_GATE_CHARS: usize = 120;

/// 默认单片段最大字符数
pub const DEFAULT_MAX_CHARS: usize = 100;

/// 文本分割配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentConfig {
    /// 是否启用分割（关闭时整段文本作为一个片段）
    pub enabled: bool,
    /// 外层门限
    pub gate_chars: usize,
    /// 单片段最大字符数（软上限）
    pub max_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gate_chars: DEFAULT_GATE_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl SegmentConfig {
    /// 文本是否需要分割
    pub fn should_split(&self, text: &str) -> bool {
        self.enabled && text.chars().count() > self.gate_chars
    }
}

/// 句读单元：单元文本 + 结束它的分隔符（末尾单元可能没有）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Unit<'a> {
    body: &'a str,
    delimiter: Option<char>,
}

impl Unit<'_> {
    fn char_count(&self) -> usize {
        self.body.chars().count() + usize::from(self.delimiter.is_some())
    }
}

/// 按分隔符切分为 (单元, 分隔符) 序列
///
/// 末尾总会产出一个不带分隔符的单元（可能为空串）
fn split_units<'a>(text: &'a str, delimiters: &[char]) -> Vec<Unit<'a>> {
    let mut units = Vec::new();
    let mut start = 0;

    for (pos, ch) in text.char_indices() {
        if delimiters.contains(&ch) {
            units.push(Unit {
                body: &text[start..pos],
                delimiter: Some(ch),
            });
            start = pos + ch.len_utf8();
        }
    }

    units.push(Unit {
        body: &text[start..],
        delimiter: None,
    });

    units
}

/// 贪心合并句读单元
///
/// 追加下一个单元会使缓冲区超过 `max_chars` 且缓冲区非空时，先输出缓冲区（trim 后），
/// 再以该单元开启新缓冲区。没有产出任何片段时返回原文本。
pub fn segment(text: &str, max_chars: usize, delimiters: &[char]) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for unit in split_units(text, delimiters) {
        let unit_chars = unit.char_count();

        if current_chars + unit_chars > max_chars && !current.is_empty() {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                segments.push(trimmed.to_string());
            }
            current.clear();
            current_chars = 0;
        }

        current.push_str(unit.body);
        if let Some(delimiter) = unit.delimiter {
            current.push(delimiter);
        }
        current_chars += unit_chars;
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }

    if segments.is_empty() {
        return vec![text.to_string()];
    }

    segments
}

/// 对请求文本进行分段
///
/// 未超过门限（或分割关闭）时返回 trim 后的整段文本；
/// 否则使用语言对应的分隔符集合进行分割。
pub fn segment_text(text: &str, language: Language, config: &SegmentConfig) -> Vec<String> {
    if !config.should_split(text) {
        return vec![text.trim().to_string()];
    }

    segment(text, config.max_chars, language.delimiters())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JA: &[char] = &['。', '、', '！', '？', '\n'];

    fn strip_whitespace(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_split_units_keeps_delimiters() {
        let units = split_units("あ。い、う", JA);
        assert_eq!(units.len(), 3);
        assert_eq!(units[0], Unit { body: "あ", delimiter: Some('。') });
        assert_eq!(units[1], Unit { body: "い", delimiter: Some('、') });
        assert_eq!(units[2], Unit { body: "う", delimiter: None });
    }

    #[test]
    fn test_split_units_trailing_delimiter_yields_empty_tail() {
        let units = split_units("あ。", JA);
        assert_eq!(units.len(), 2);
        assert_eq!(units[1], Unit { body: "", delimiter: None });
    }

    #[test]
    fn test_greeting_then_oversized_run() {
        let long_run = "A".repeat(150);
        let text = format!("こんにちは。{}。", long_run);

        let segments = segment(&text, 100, JA);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], "こんにちは。");
        assert_eq!(segments[1], format!("{}。", long_run));
    }

    #[test]
    fn test_oversized_unit_is_not_truncated() {
        let long_unit = "長".repeat(130);
        let text = format!("短い。{}！最後。", long_unit);

        let segments = segment(&text, 100, JA);

        assert!(segments.contains(&format!("{}！", long_unit)));
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_greedy_accumulation_respects_budget() {
        // 10 个 20 字的句子，预算 50 → 每段 2 句
        let sentence = format!("{}。", "あ".repeat(19));
        let text = sentence.repeat(10);

        let segments = segment(&text, 50, JA);

        assert_eq!(segments.len(), 5);
        for seg in &segments {
            assert!(seg.chars().count() <= 50, "segment too long: {}", seg);
        }
    }

    #[test]
    fn test_segments_reconstruct_original() {
        let text = "吾輩は猫である。名前はまだ無い。\nどこで生れたかとんと見当がつかぬ。\
                    何でも薄暗いじめじめした所で、ニャーニャー泣いていた事だけは記憶している！\
                    吾輩はここで始めて人間というものを見た？しかもあとで聞くとそれは書生という人間中で一番獰悪な種族であったそうだ。";

        let segments = segment(text, 40, JA);

        assert!(segments.len() > 1);
        assert_eq!(strip_whitespace(&segments.concat()), strip_whitespace(text));
    }

    #[test]
    fn test_no_segment_is_empty() {
        let text = "。。。\n\n、、あ。\n\n  \n";
        let segments = segment(text, 2, JA);

        assert!(!segments.is_empty());
        for seg in &segments {
            assert!(!seg.is_empty());
            assert_eq!(seg.trim(), seg);
        }
    }

    #[test]
    fn test_empty_text_falls_back_to_original() {
        assert_eq!(segment("", 100, JA), vec![String::new()]);
    }

    #[test]
    fn test_whitespace_only_falls_back_to_original() {
        assert_eq!(segment("  \n ", 100, JA), vec!["  \n ".to_string()]);
    }

    #[test]
    fn test_lengths_are_counted_in_chars() {
        // 30 个多字节字符 + 分隔符，字节数远超 40 但字符数不超
        let text = format!("{}。{}。", "あ".repeat(15), "い".repeat(15));
        let segments = segment(&text, 40, JA);
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_short_text_bypasses_segmenter() {
        let config = SegmentConfig::default();
        let text = "  こんにちは。これは短いテキストです。  ";

        let segments = segment_text(text, Language::Japanese, &config);

        assert_eq!(segments, vec![text.trim().to_string()]);
    }

    #[test]
    fn test_text_between_budget_and_gate_is_one_segment() {
        let config = SegmentConfig::default();
        // 110 字：超过 max_chars(100) 但未超过 gate(120)
        let text = format!("{}。{}。", "あ".repeat(54), "い".repeat(54));
        assert_eq!(text.chars().count(), 110);

        let segments = segment_text(&text, Language::Japanese, &config);

        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_text_over_gate_is_split() {
        let config = SegmentConfig::default();
        let text = format!("{}。{}。", "あ".repeat(70), "い".repeat(70));

        let segments = segment_text(&text, Language::Japanese, &config);

        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_delimiter_free_short_text() {
        let config = SegmentConfig::default();
        let segments = segment_text(" no punctuation here ", Language::AmericanEnglish, &config);
        assert_eq!(segments, vec!["no punctuation here".to_string()]);
    }

    #[test]
    fn test_disabled_config_never_splits() {
        let config = SegmentConfig {
            enabled: false,
            ..Default::default()
        };
        let text = "Sentence one. ".repeat(40);

        let segments = segment_text(&text, Language::English, &config);

        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_english_delimiters() {
        let config = SegmentConfig {
            enabled: true,
            gate_chars: 30,
            max_chars: 25,
        };
        let text = "The quick brown fox jumps. Over the lazy dog! And then, it rests?";

        let segments = segment_text(text, Language::AmericanEnglish, &config);

        assert_eq!(
            segments,
            vec![
                "The quick brown fox jumps.".to_string(),
                "Over the lazy dog!".to_string(),
                "And then, it rests?".to_string(),
            ]
        );
    }
}
