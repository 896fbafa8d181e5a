/**
 * AI Agent Service
 *
 * Local AI-assisted operations over a user's notes: assisted note
 * creation with randomized placement, and the scan analysis (counts,
 * word frequencies, keyword categories, templated insights). The
 * analysis itself is plain aggregation; generative responses live in
 * the Gemini client.
 */
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};

use crate::backend::notes::db::{self, NewNote, NoteFilter};
use crate::shared::note::Note;

/// How many words the word cloud keeps
const WORD_CLOUD_LIMIT: usize = 20;

/// Words at or below this length are dropped from the word cloud
const MIN_WORD_LENGTH: usize = 3;

/// A word and how often it appears across note bodies
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Fixed priority buckets
///
/// Notes carry no priority field; the distribution is reported as a
/// placeholder of zeroes until one exists.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// A note flagged as needing attention
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: i64,
    pub text: String,
    pub username: String,
    pub done: bool,
    pub is_private: bool,
    pub board_type: String,
}

impl NoteSummary {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            text: note.text.clone(),
            username: note.username.clone(),
            done: note.is_done(),
            is_private: note.is_private,
            board_type: note.board_type.as_str().to_string(),
        }
    }
}

/// The nested scan analysis returned by GET /api/ai/scan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub total_notes: usize,
    pub completed_notes: usize,
    pub active_notes: usize,
    pub old_notes: Vec<NoteSummary>,
    pub priority_distribution: PriorityDistribution,
    pub word_cloud: Vec<WordFrequency>,
    pub categories: BTreeMap<String, usize>,
    pub productivity_insights: Vec<String>,
    pub scan_time_ms: u64,
    pub scan_timestamp: DateTime<Utc>,
}

/// Create a note with AI assistance
///
/// The note lands on the public main board with a randomized default
/// position (each coordinate is 100 or 200).
pub async fn create_note_with_ai(
    pool: &PgPool,
    text: &str,
    username: &str,
) -> Result<Note, sqlx::Error> {
    // Scoped so the thread-local rng is dropped before the insert await
    let (x, y) = {
        let mut rng = rand::rng();
        let x = if rng.random_bool(0.5) { 100 } else { 200 };
        let y = if rng.random_bool(0.5) { 100 } else { 200 };
        (x, y)
    };

    tracing::info!("[AI] Creating note for {} at ({}, {})", username, x, y);

    let new_note = NewNote::new(text, username, x, y);
    db::create_note(pool, &new_note).await
}

/// Fetch the notes the scan operates on: the user's own notes, or all
/// public notes for anonymous callers
pub async fn notes_for_analysis(
    pool: &PgPool,
    username: Option<&str>,
) -> Result<Vec<Note>, sqlx::Error> {
    let filter = match username {
        Some(username) => NoteFilter {
            username: Some(username.to_string()),
            ..Default::default()
        },
        None => NoteFilter {
            is_private: Some(false),
            ..Default::default()
        },
    };
    db::list_notes(pool, &filter).await
}

/// Scan and analyze a set of notes
pub fn scan_notes(notes: &[Note]) -> ScanReport {
    let started = std::time::Instant::now();

    let total_notes = notes.len();
    let completed_notes = notes.iter().filter(|n| n.is_done()).count();
    let active_notes = total_notes - completed_notes;

    let old_notes: Vec<NoteSummary> = notes
        .iter()
        .filter(|n| !n.is_done())
        .map(NoteSummary::from_note)
        .collect();

    let word_cloud = word_cloud(notes);
    let categories = categorize(notes);
    let productivity_insights =
        productivity_insights(total_notes, completed_notes, old_notes.len(), &categories);

    ScanReport {
        total_notes,
        completed_notes,
        active_notes,
        old_notes,
        priority_distribution: PriorityDistribution::default(),
        word_cloud,
        categories,
        productivity_insights,
        scan_time_ms: started.elapsed().as_millis() as u64,
        scan_timestamp: Utc::now(),
    }
}

/// Top words across note bodies
///
/// Words longer than `MIN_WORD_LENGTH` characters are counted
/// case-insensitively; the top `WORD_CLOUD_LIMIT` are kept, ordered by
/// count descending with alphabetical tie-break.
pub fn word_cloud(notes: &[Note]) -> Vec<WordFrequency> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for note in notes {
        for word in note.text.to_lowercase().split_whitespace() {
            if word.len() > MIN_WORD_LENGTH {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut frequencies: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, count)| WordFrequency { word, count })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    frequencies.truncate(WORD_CLOUD_LIMIT);
    frequencies
}

/// Bucket notes into the fixed category set by keyword
///
/// The first matching bucket wins per note: meetings, then shopping,
/// then work, then personal. Notes matching nothing are not counted.
pub fn categorize(notes: &[Note]) -> BTreeMap<String, usize> {
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();
    for note in notes {
        let text = note.text.to_lowercase();
        let bucket = if text.contains("meeting") || text.contains("call") || text.contains("appointment")
        {
            Some("meetings")
        } else if text.contains("buy") || text.contains("purchase") || text.contains("shop") {
            Some("shopping")
        } else if text.contains("project") || text.contains("task") || text.contains("work") {
            Some("work")
        } else if text.contains("personal") || text.contains("home") || text.contains("family") {
            Some("personal")
        } else {
            None
        };

        if let Some(bucket) = bucket {
            *categories.entry(bucket.to_string()).or_insert(0) += 1;
        }
    }
    categories
}

/// Template-based textual insights over the aggregates
pub fn productivity_insights(
    total: usize,
    completed: usize,
    needing_attention: usize,
    categories: &BTreeMap<String, usize>,
) -> Vec<String> {
    let mut insights = Vec::new();
    if total == 0 {
        return insights;
    }

    let completion_rate = completed as f64 / total as f64 * 100.0;
    insights.push(format!("Completion rate: {:.1}%", completion_rate));

    if needing_attention > 0 {
        insights.push(format!("{} notes need attention", needing_attention));
    }

    if total > 10 {
        insights.push(format!("High activity: {} total notes", total));
    }

    if let Some((top_category, _)) = categories.iter().max_by_key(|(_, count)| **count) {
        insights.push(format!("Most active category: {}", top_category));
    }

    insights
}

/// Incomplete notes older than the given number of days
pub fn old_notes(notes: &[Note], days_old: i64, now: DateTime<Utc>) -> Vec<NoteSummary> {
    let cutoff = now - Duration::days(days_old);
    notes
        .iter()
        .filter(|n| !n.is_done() && n.created_at <= cutoff)
        .map(NoteSummary::from_note)
        .collect()
}

/// Template suggestions based on the user's note patterns
pub fn note_suggestions(notes: &[Note]) -> Vec<String> {
    let mut suggestions = Vec::new();

    if notes.is_empty() {
        suggestions.push("Start by creating your first note!".to_string());
        suggestions.push("Consider setting up daily reminders".to_string());
        suggestions.push("Try organizing notes by categories".to_string());
        return suggestions;
    }

    let incomplete_count = notes.iter().filter(|n| !n.is_done()).count();
    if incomplete_count > 5 {
        suggestions.push(format!(
            "You have {} incomplete tasks. Consider prioritizing them.",
            incomplete_count
        ));
    }

    if notes
        .iter()
        .any(|n| n.text.to_lowercase().contains("meeting"))
    {
        suggestions.push("Consider adding meeting follow-up tasks".to_string());
    }

    suggestions.push("Review and update your notes regularly".to_string());
    suggestions.push("Consider breaking down large tasks into smaller ones".to_string());
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::note::{BoardType, NoteStatus, DEFAULT_NOTE_COLOR};

    fn note(id: i64, text: &str, status: NoteStatus) -> Note {
        Note {
            id,
            title: String::new(),
            text: text.to_string(),
            x: 0,
            y: 0,
            username: "alice".to_string(),
            status,
            is_private: false,
            board_type: BoardType::Main,
            color: DEFAULT_NOTE_COLOR.to_string(),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_scan_counts() {
        let notes = vec![
            note(1, "buy milk", NoteStatus::Active),
            note(2, "team meeting", NoteStatus::Done),
            note(3, "family dinner", NoteStatus::Active),
        ];

        let report = scan_notes(&notes);
        assert_eq!(report.total_notes, 3);
        assert_eq!(report.completed_notes, 1);
        assert_eq!(report.active_notes, 2);
        assert_eq!(report.old_notes.len(), 2);
    }

    #[test]
    fn test_word_cloud_skips_short_words_and_ranks() {
        let notes = vec![
            note(1, "plan the big launch", NoteStatus::Active),
            note(2, "launch checklist", NoteStatus::Active),
            note(3, "a an to", NoteStatus::Active),
        ];

        let cloud = word_cloud(&notes);
        assert_eq!(cloud[0].word, "launch");
        assert_eq!(cloud[0].count, 2);
        assert!(cloud.iter().all(|w| w.word.len() > MIN_WORD_LENGTH));
        assert!(!cloud.iter().any(|w| w.word == "the"));
    }

    #[test]
    fn test_word_cloud_truncates_to_limit() {
        let text = (0..30)
            .map(|i| format!("uniqueword{:02}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let notes = vec![note(1, &text, NoteStatus::Active)];
        assert_eq!(word_cloud(&notes).len(), WORD_CLOUD_LIMIT);
    }

    #[test]
    fn test_categorize_first_bucket_wins() {
        // "meeting" and "buy" both appear; the meetings bucket wins
        let notes = vec![
            note(1, "buy snacks for the meeting", NoteStatus::Active),
            note(2, "buy milk", NoteStatus::Active),
            note(3, "finish work project", NoteStatus::Active),
            note(4, "watch clouds", NoteStatus::Active),
        ];

        let categories = categorize(&notes);
        assert_eq!(categories.get("meetings"), Some(&1));
        assert_eq!(categories.get("shopping"), Some(&1));
        assert_eq!(categories.get("work"), Some(&1));
        assert_eq!(categories.get("personal"), None);
    }

    #[test]
    fn test_insights_include_completion_rate() {
        let notes = vec![
            note(1, "one", NoteStatus::Done),
            note(2, "two", NoteStatus::Active),
        ];
        let report = scan_notes(&notes);
        assert!(report
            .productivity_insights
            .iter()
            .any(|i| i.contains("Completion rate: 50.0%")));
    }

    #[test]
    fn test_insights_empty_for_no_notes() {
        let report = scan_notes(&[]);
        assert!(report.productivity_insights.is_empty());
        assert_eq!(report.total_notes, 0);
    }

    #[test]
    fn test_old_notes_filters_by_age_and_completion() {
        let now = Utc::now();
        let mut fresh = note(1, "fresh", NoteStatus::Active);
        fresh.created_at = now - Duration::days(1);
        let mut stale = note(2, "stale", NoteStatus::Active);
        stale.created_at = now - Duration::days(30);
        let mut stale_done = note(3, "stale done", NoteStatus::Done);
        stale_done.created_at = now - Duration::days(30);

        let old = old_notes(&[fresh, stale, stale_done], 7, now);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].id, 2);
    }

    #[test]
    fn test_suggestions_for_empty_board() {
        let suggestions = note_suggestions(&[]);
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("first note"));
    }

    #[test]
    fn test_suggestions_flag_backlog_and_meetings() {
        let mut notes: Vec<Note> = (0..6)
            .map(|i| note(i, "pending task", NoteStatus::Active))
            .collect();
        notes.push(note(10, "quarterly meeting notes", NoteStatus::Active));

        let suggestions = note_suggestions(&notes);
        assert!(suggestions.iter().any(|s| s.contains("7 incomplete tasks")));
        assert!(suggestions
            .iter()
            .any(|s| s.contains("meeting follow-up tasks")));
    }
}
