//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

use super::VoiceError;

/// 合成语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "Japanese")]
    Japanese,
    #[serde(rename = "American English")]
    AmericanEnglish,
    #[serde(rename = "British English")]
    BritishEnglish,
    #[serde(rename = "English")]
    English,
    #[serde(rename = "Chinese")]
    Chinese,
}

const JAPANESE_DELIMITERS: &[char] = &['。', '、', '！', '？', '\n'];
const CHINESE_DELIMITERS: &[char] = &['。', '，', '！', '？', '；', '\n'];
const ENGLISH_DELIMITERS: &[char] = &['.', ',', '!', '?', ';', '\n'];

impl Language {
    /// 请求/界面中使用的语言名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Japanese => "Japanese",
            Self::AmericanEnglish => "American English",
            Self::BritishEnglish => "British English",
            Self::English => "English",
            Self::Chinese => "Chinese",
        }
    }

    /// Kokoro 使用的单字母语言代码
    pub fn lang_code(&self) -> &'static str {
        match self {
            Self::Japanese => "j",
            Self::AmericanEnglish | Self::English => "a",
            Self::BritishEnglish => "b",
            Self::Chinese => "z",
        }
    }

    /// 分段用的分隔符集合
    pub fn delimiters(&self) -> &'static [char] {
        match self {
            Self::Japanese => JAPANESE_DELIMITERS,
            Self::Chinese => CHINESE_DELIMITERS,
            Self::AmericanEnglish | Self::BritishEnglish | Self::English => ENGLISH_DELIMITERS,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Language {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Japanese" => Ok(Self::Japanese),
            "American English" => Ok(Self::AmericanEnglish),
            "British English" => Ok(Self::BritishEnglish),
            "English" => Ok(Self::English),
            "Chinese" => Ok(Self::Chinese),
            other => Err(VoiceError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// 音色 / 说话人名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, VoiceError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(VoiceError::InvalidName("音色名称不能为空".to_string()));
        }
        if name.chars().count() > 100 {
            return Err(VoiceError::InvalidName(
                "音色名称长度不能超过100字符".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语速 (0.5 - 2.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(f32);

impl Speed {
    pub const MIN: f32 = 0.5;
    pub const MAX: f32 = 2.0;

    pub fn new(value: f32) -> Result<Self, VoiceError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(VoiceError::InvalidSpeed(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(1.0)
    }
}

/// 单次请求的合成参数
///
/// 同一请求内的所有片段共用同一组参数
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechParams {
    pub voice: VoiceName,
    pub language: Language,
    pub speed: Option<Speed>,
    pub instruct: Option<String>,
}
