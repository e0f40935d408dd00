use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Lenient parse used for spreadsheet cells and model output.
    /// Accepts the English labels in any case and the Chinese labels; anything
    /// else falls back to `Medium`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" | "简单" => Difficulty::Easy,
            "medium" | "中等" => Difficulty::Medium,
            "hard" | "困难" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label_zh(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unchecked question fields as they arrive from a client or a parser.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionDraft {
    pub title: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
    #[serde(default)]
    pub explanation: String,
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A validated multiple-choice question.
///
/// Only obtainable through [`QuestionRecord::new`] (deserialization goes
/// through the same path), so every instance satisfies:
/// - `title` and `topic` are non-empty after trimming
/// - `options` holds 2..=4 non-empty, trimmed entries
/// - `correct_answer` indexes into `options`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "QuestionDraft")]
pub struct QuestionRecord {
    pub title: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuestionRecord {
    pub fn new(draft: QuestionDraft) -> Result<Self, String> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err("题目内容不能为空".to_string());
        }

        let options: Vec<String> = draft
            .options
            .iter()
            .map(|opt| opt.trim())
            .filter(|opt| !opt.is_empty())
            .map(str::to_string)
            .collect();
        if options.len() < MIN_OPTIONS {
            return Err("至少需要2个有效选项".to_string());
        }
        if options.len() > MAX_OPTIONS {
            return Err(format!("最多只能有{}个选项", MAX_OPTIONS));
        }

        if draft.correct_answer < 0 || draft.correct_answer as usize >= options.len() {
            return Err(format!(
                "正确答案必须是0-{}之间的整数或对应字母",
                options.len() - 1
            ));
        }

        let topic = draft.topic.trim();
        if topic.is_empty() {
            return Err("主题不能为空".to_string());
        }

        Ok(QuestionRecord {
            title: title.to_string(),
            correct_answer: draft.correct_answer as usize,
            options,
            explanation: draft.explanation.trim().to_string(),
            topic: topic.to_string(),
            difficulty: draft.difficulty,
            source: draft.source.trim().to_string(),
            created_at: draft.created_at,
        })
    }
}

impl TryFrom<QuestionDraft> for QuestionRecord {
    type Error = String;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        QuestionRecord::new(draft)
    }
}

impl From<QuestionRecord> for QuestionDraft {
    fn from(record: QuestionRecord) -> Self {
        QuestionDraft {
            title: record.title,
            options: record.options,
            correct_answer: record.correct_answer as i64,
            explanation: record.explanation,
            topic: record.topic,
            difficulty: record.difficulty,
            source: record.source,
            created_at: record.created_at,
        }
    }
}

/// A question as stored in the question bank.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub title: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub source: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Question {
    pub fn from_record(record: QuestionRecord) -> Self {
        let now = Utc::now();
        Question {
            id: Uuid::new_v4().to_string(),
            title: record.title,
            options: record.options,
            correct_answer: record.correct_answer,
            explanation: record.explanation,
            topic: record.topic,
            difficulty: record.difficulty,
            source: record.source,
            is_active: true,
            created_at: record.created_at.unwrap_or(now),
            modified_at: now,
        }
    }

    /// Replaces the question content, keeping identity, status and creation time.
    pub fn apply_record(&mut self, record: QuestionRecord) {
        self.title = record.title;
        self.options = record.options;
        self.correct_answer = record.correct_answer;
        self.explanation = record.explanation;
        self.topic = record.topic;
        self.difficulty = record.difficulty;
        self.source = record.source;
        self.modified_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            title: " 孩子哭闹时应该怎么做？ ".to_string(),
            options: vec![
                "批评".to_string(),
                "  ".to_string(),
                "倾听".to_string(),
            ],
            correct_answer: 1,
            explanation: "先共情".to_string(),
            topic: "情绪管理".to_string(),
            difficulty: Difficulty::Easy,
            source: "书籍A".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn difficulty_normalize_accepts_english_and_chinese_labels() {
        assert_eq!(Difficulty::normalize("EASY"), Difficulty::Easy);
        assert_eq!(Difficulty::normalize(" hard "), Difficulty::Hard);
        assert_eq!(Difficulty::normalize("简单"), Difficulty::Easy);
        assert_eq!(Difficulty::normalize("中等"), Difficulty::Medium);
        assert_eq!(Difficulty::normalize("困难"), Difficulty::Hard);
    }

    #[test]
    fn difficulty_normalize_falls_back_to_medium() {
        assert_eq!(Difficulty::normalize(""), Difficulty::Medium);
        assert_eq!(Difficulty::normalize("extreme"), Difficulty::Medium);
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        assert!(serde_json::from_str::<Difficulty>("\"Hard\"").is_err());
    }

    #[test]
    fn record_new_trims_and_drops_empty_options() {
        let record = QuestionRecord::new(draft()).unwrap();

        assert_eq!(record.title, "孩子哭闹时应该怎么做？");
        assert_eq!(record.options, vec!["批评", "倾听"]);
        assert_eq!(record.correct_answer, 1);
    }

    #[test]
    fn record_new_rejects_out_of_range_answer() {
        let mut d = draft();
        d.correct_answer = 2;
        assert!(QuestionRecord::new(d).is_err());

        let mut d = draft();
        d.correct_answer = -1;
        assert!(QuestionRecord::new(d).is_err());
    }

    #[test]
    fn record_new_rejects_blank_topic_and_title() {
        let mut d = draft();
        d.topic = "   ".to_string();
        assert_eq!(QuestionRecord::new(d).unwrap_err(), "主题不能为空");

        let mut d = draft();
        d.title = String::new();
        assert_eq!(QuestionRecord::new(d).unwrap_err(), "题目内容不能为空");
    }

    #[test]
    fn record_new_rejects_too_many_options() {
        let mut d = draft();
        d.options = (0..5).map(|i| format!("选项{}", i)).collect();
        assert!(QuestionRecord::new(d).is_err());
    }

    #[test]
    fn record_deserialization_enforces_invariants() {
        let invalid = serde_json::json!({
            "title": "Q",
            "options": ["only one"],
            "correct_answer": 0,
            "topic": "t"
        });
        assert!(serde_json::from_value::<QuestionRecord>(invalid).is_err());

        let valid = serde_json::json!({
            "title": "Q",
            "options": ["a", "b"],
            "correct_answer": 1,
            "topic": "t",
            "difficulty": "hard"
        });
        let record: QuestionRecord = serde_json::from_value(valid).unwrap();
        assert_eq!(record.difficulty, Difficulty::Hard);
        assert_eq!(record.explanation, "");
    }

    #[test]
    fn question_apply_record_keeps_identity() {
        let mut question = Question::from_record(QuestionRecord::new(draft()).unwrap());
        let id = question.id.clone();
        let created_at = question.created_at;
        question.is_active = false;

        let mut d = draft();
        d.title = "新题目".to_string();
        question.apply_record(QuestionRecord::new(d).unwrap());

        assert_eq!(question.id, id);
        assert_eq!(question.created_at, created_at);
        assert!(!question.is_active);
        assert_eq!(question.title, "新题目");
    }
}
