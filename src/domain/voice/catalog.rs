//! Voice Context - 服务档案与音色目录
//!
//! 每个 TTS 服务（Kokoro / Qwen3）有自己的默认参数、支持语言和音色目录，
//! 请求参数在这里补全默认值并校验。

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::{Language, Speed, SpeechParams, VoiceError, VoiceName};

/// Qwen3-TTS CustomVoice 默认说话人
pub const DEFAULT_QWEN3_SPEAKERS: &[&str] = &[
    "Aiden", "Dylan", "Eric", "Ono_anna", "Ryan", "Serena", "Sohee", "Uncle_fu", "Vivian",
];

/// Qwen3 默认指令
pub const DEFAULT_QWEN3_INSTRUCT: &str = "落ち着いた声で、はっきりとした発音。";

/// 服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Kokoro,
    Qwen3,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kokoro => "kokoro",
            Self::Qwen3 => "qwen3",
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 音色目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCatalog {
    /// 按语言分组（Kokoro）
    ByLanguage(Vec<(Language, Vec<String>)>),
    /// 说话人列表（Qwen3）
    Speakers(Vec<String>),
}

impl VoiceCatalog {
    /// 目录中的音色总数
    pub fn len(&self) -> usize {
        match self {
            Self::ByLanguage(groups) => groups.iter().map(|(_, voices)| voices.len()).sum(),
            Self::Speakers(speakers) => speakers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// 保持目录顺序输出（不经过 BTreeMap 排序）
impl Serialize for VoiceCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ByLanguage(groups) => {
                let mut map = serializer.serialize_map(Some(groups.len()))?;
                for (language, voices) in groups {
                    map.serialize_entry(language.name(), voices)?;
                }
                map.end()
            }
            Self::Speakers(speakers) => {
                let mut seq = serializer.serialize_seq(Some(speakers.len()))?;
                for speaker in speakers {
                    seq.serialize_element(speaker)?;
                }
                seq.end()
            }
        }
    }
}

fn voices(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// 服务档案
#[derive(Debug, Clone)]
pub struct ServiceProfile {
    kind: ServiceKind,
    default_voice: String,
    default_language: Language,
    languages: Vec<Language>,
    /// None 表示该服务不使用语速参数
    default_speed: Option<Speed>,
    /// None 表示该服务不使用指令参数
    default_instruct: Option<String>,
    catalog: VoiceCatalog,
}

impl ServiceProfile {
    /// Kokoro-82M：多语言、支持语速、支持服务端播放
    pub fn kokoro() -> Self {
        Self {
            kind: ServiceKind::Kokoro,
            default_voice: "jf_alpha".to_string(),
            default_language: Language::Japanese,
            languages: vec![
                Language::Japanese,
                Language::AmericanEnglish,
                Language::BritishEnglish,
                Language::Chinese,
            ],
            default_speed: Some(Speed::default()),
            default_instruct: None,
            catalog: VoiceCatalog::ByLanguage(vec![
                (Language::Japanese, voices(&["jf_alpha", "jm_kumo"])),
                (
                    Language::AmericanEnglish,
                    voices(&["af_heart", "af_bella", "af_nova", "af_sky", "am_adam", "am_echo"]),
                ),
                (
                    Language::BritishEnglish,
                    voices(&["bf_alice", "bf_emma", "bm_daniel", "bm_george"]),
                ),
                (Language::Chinese, voices(&["zf_xiaobei", "zm_yunxi"])),
            ]),
        }
    }

    /// Qwen3-TTS CustomVoice：说话人 + 指令
    pub fn qwen3(speakers: Vec<String>) -> Self {
        Self {
            kind: ServiceKind::Qwen3,
            default_voice: "Aiden".to_string(),
            default_language: Language::Japanese,
            languages: vec![Language::Japanese, Language::Chinese, Language::English],
            default_speed: None,
            default_instruct: Some(DEFAULT_QWEN3_INSTRUCT.to_string()),
            catalog: VoiceCatalog::Speakers(speakers),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// 是否提供服务端播放
    pub fn supports_stream_play(&self) -> bool {
        self.kind == ServiceKind::Kokoro
    }

    /// 补全默认值并校验请求参数
    pub fn resolve(
        &self,
        voice: Option<String>,
        language: Option<String>,
        speed: Option<f32>,
        instruct: Option<String>,
    ) -> Result<SpeechParams, VoiceError> {
        let voice = VoiceName::new(voice.unwrap_or_else(|| self.default_voice.clone()))?;

        let language = match language {
            Some(name) => {
                let language: Language = name.parse()?;
                if !self.languages.contains(&language) {
                    return Err(VoiceError::UnsupportedLanguage(name));
                }
                language
            }
            None => self.default_language,
        };

        let speed = match (self.default_speed, speed) {
            (Some(_), Some(value)) => Some(Speed::new(value)?),
            (default, _) => default,
        };

        let instruct = match (&self.default_instruct, instruct) {
            (Some(_), Some(text)) => Some(text.trim().to_string()).filter(|s| !s.is_empty()),
            (default, _) => default.clone(),
        };

        Ok(SpeechParams {
            voice,
            language,
            speed,
            instruct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qwen3() -> ServiceProfile {
        ServiceProfile::qwen3(voices(DEFAULT_QWEN3_SPEAKERS))
    }

    #[test]
    fn test_kokoro_defaults() {
        let params = ServiceProfile::kokoro().resolve(None, None, None, None).unwrap();
        assert_eq!(params.voice.as_str(), "jf_alpha");
        assert_eq!(params.language, Language::Japanese);
        assert_eq!(params.speed, Some(Speed::default()));
        assert_eq!(params.instruct, None);
    }

    #[test]
    fn test_kokoro_ignores_instruct() {
        let params = ServiceProfile::kokoro()
            .resolve(None, None, None, Some("whisper".to_string()))
            .unwrap();
        assert_eq!(params.instruct, None);
    }

    #[test]
    fn test_kokoro_rejects_out_of_range_speed() {
        let err = ServiceProfile::kokoro()
            .resolve(None, None, Some(3.0), None)
            .unwrap_err();
        assert!(matches!(err, VoiceError::InvalidSpeed(_)));
    }

    #[test]
    fn test_qwen3_defaults() {
        let params = qwen3().resolve(None, None, None, None).unwrap();
        assert_eq!(params.voice.as_str(), "Aiden");
        assert_eq!(params.speed, None);
        assert_eq!(params.instruct.as_deref(), Some(DEFAULT_QWEN3_INSTRUCT));
    }

    #[test]
    fn test_qwen3_ignores_speed_and_keeps_custom_instruct() {
        let params = qwen3()
            .resolve(
                Some("Vivian".to_string()),
                Some("Chinese".to_string()),
                Some(1.5),
                Some("开心的语气".to_string()),
            )
            .unwrap();
        assert_eq!(params.voice.as_str(), "Vivian");
        assert_eq!(params.language, Language::Chinese);
        assert_eq!(params.speed, None);
        assert_eq!(params.instruct.as_deref(), Some("开心的语气"));
    }

    #[test]
    fn test_language_outside_service_is_rejected() {
        let err = qwen3()
            .resolve(None, Some("British English".to_string()), None, None)
            .unwrap_err();
        assert!(matches!(err, VoiceError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_only_kokoro_supports_stream_play() {
        assert!(ServiceProfile::kokoro().supports_stream_play());
        assert!(!qwen3().supports_stream_play());
    }

    #[test]
    fn test_grouped_catalog_serializes_in_order() {
        let json = serde_json::to_string(ServiceProfile::kokoro().catalog()).unwrap();
        let japanese = json.find("\"Japanese\"").unwrap();
        let american = json.find("\"American English\"").unwrap();
        let chinese = json.find("\"Chinese\"").unwrap();
        assert!(japanese < american && american < chinese);
        assert!(json.contains("\"jf_alpha\",\"jm_kumo\""));
    }

    #[test]
    fn test_speaker_catalog_serializes_as_list() {
        let value = serde_json::to_value(qwen3().catalog()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), DEFAULT_QWEN3_SPEAKERS.len());
        assert_eq!(qwen3().catalog().len(), 9);
    }
}
