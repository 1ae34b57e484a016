//! Summer metrics aggregation
//!
//! Orchestrates keyword, topic, and emotion extraction over the fixed
//! summer window (June 1 - August 31 UTC) of one resolved year and
//! derives the full [`SummerMetrics`] record.
//!
//! All window math happens in UTC; display formatting is the slide
//! builder's problem. The aggregator is total: no data, no in-window
//! data, or no topics all resolve to explicit zero/empty values with
//! descriptive text, so downstream consumers never need null-checks
//! beyond "is this the empty-state shape".

use crate::analytics::accomplishments::{mine_accomplishments, Accomplishment};
use crate::analytics::persona::{build_persona, build_roast, Persona};
use crate::analytics::timesaved::estimate_time_saved;
use crate::analytics::topics::{classify, TOPIC_RULES};
use crate::nlp::emotion::{analyze_emotions, EmotionSummary};
use crate::nlp::keywords::{extract_keywords, KeywordOptions};
use crate::nlp::lexicons::lexicons;
use crate::nlp::tokenize::tokenize;
use crate::types::{Message, NamedCount, Thread};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// ============================================
// Window and options
// ============================================

/// The fixed summer window of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummerWindow {
    pub year: i32,
}

impl SummerWindow {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// June 1, 00:00:00.000 UTC.
    pub fn start(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(self.year, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    /// August 31, 23:59:59.999 UTC (inclusive).
    pub fn end(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(self.year, 8, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap()
            .and_utc()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start().date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end().date_naive()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start() && at <= self.end()
    }
}

/// Configuration accepted by the aggregator.
///
/// `reference_year` is the explicit wall-clock year supplied at
/// construction; the aggregator itself never reads the clock, which
/// keeps it deterministic and testable.
#[derive(Debug, Clone)]
pub struct SummerOptions {
    /// Pin the window to this year instead of auto-selecting
    pub year: Option<i32>,
    /// Case-insensitive terms given boosted keyword weight
    pub aliases: Vec<String>,
    /// Number of keywords to keep
    pub top_keywords: usize,
    /// Year used when the export holds no timestamped messages at all
    pub reference_year: i32,
}

impl SummerOptions {
    pub fn new(reference_year: i32) -> Self {
        Self {
            year: None,
            aliases: Vec::new(),
            top_keywords: 12,
            reference_year,
        }
    }
}

// ============================================
// Derived metrics
// ============================================

/// The calendar day with the most user prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusiestDay {
    pub date: NaiveDate,
    /// User prompts that day
    pub prompts: u64,
    /// Messages of all roles that day
    pub total: u64,
}

/// User prompt count for one Monday-aligned week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    /// `"Week of {MM-DD}"` where MM-DD is the Monday
    pub label: String,
    pub count: u64,
}

/// Turn count for the deepest conversation of the summer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    /// Messages of all roles within the window
    pub turns: u64,
}

/// The complete derived record: the sole artifact consumed downstream.
///
/// Immutable once produced. All message-derived statistics cover
/// user-authored messages only, except `total` on [`BusiestDay`] and
/// `turns` on [`ThreadSummary`], which count all roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummerMetrics {
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_prompts: u64,
    pub total_responses: u64,
    /// Days with at least one message of any role (at most 92)
    pub unique_days: u64,
    /// Longest run of consecutive days each having >=1 user prompt
    pub longest_streak: u64,
    pub busiest_day: Option<BusiestDay>,
    pub topics: Vec<NamedCount>,
    pub week_buckets: Vec<WeekBucket>,
    pub keywords: Vec<NamedCount>,
    pub emotions: EmotionSummary,
    pub longest_thread: Option<ThreadSummary>,
    pub time_saved_minutes: u64,
    pub accomplishments: Vec<Accomplishment>,
    pub persona: Persona,
    pub roast: String,
}

impl SummerMetrics {
    /// The zero-valued record returned when no in-window data exists.
    pub fn empty(year: i32) -> Self {
        let window = SummerWindow::new(year);
        Self {
            year,
            start_date: window.start_date(),
            end_date: window.end_date(),
            total_prompts: 0,
            total_responses: 0,
            unique_days: 0,
            longest_streak: 0,
            busiest_day: None,
            topics: Vec::new(),
            week_buckets: Vec::new(),
            keywords: Vec::new(),
            emotions: EmotionSummary::default(),
            longest_thread: None,
            time_saved_minutes: 0,
            accomplishments: Vec::new(),
            persona: Persona::empty(),
            roast: String::new(),
        }
    }

    /// Whether this is the empty-state shape.
    pub fn is_empty_state(&self) -> bool {
        self.total_prompts == 0 && self.total_responses == 0 && self.unique_days == 0
    }
}

// ============================================
// Aggregation
// ============================================

/// A message flattened out of its thread, with a guaranteed timestamp.
struct Tagged<'a> {
    thread_id: &'a str,
    thread_title: &'a str,
    message: &'a Message,
    at: DateTime<Utc>,
}

/// Compute the summer metrics for the given threads.
pub fn compute_summer_metrics(threads: &[Thread], opts: &SummerOptions) -> SummerMetrics {
    // 1) Flatten, dropping messages without a timestamp
    let all: Vec<Tagged> = threads
        .iter()
        .flat_map(|thread| {
            thread.messages.iter().filter_map(move |message| {
                message.created_at.map(|at| Tagged {
                    thread_id: &thread.id,
                    thread_title: &thread.title,
                    message,
                    at,
                })
            })
        })
        .collect();

    if all.is_empty() {
        debug!("no timestamped messages, returning empty metrics");
        return SummerMetrics::empty(opts.year.unwrap_or(opts.reference_year));
    }

    // 2) Resolve the year, 3) filter to the window
    let year = opts.year.unwrap_or_else(|| resolve_year(&all));
    let window = SummerWindow::new(year);
    let in_summer: Vec<&Tagged> = all.iter().filter(|t| window.contains(t.at)).collect();

    if in_summer.is_empty() {
        debug!(year, "no messages in the summer window");
        return SummerMetrics::empty(year);
    }

    // 4) Partition by role
    let user: Vec<&Tagged> = in_summer
        .iter()
        .copied()
        .filter(|t| t.message.role.is_user())
        .collect();
    let user_messages: Vec<&Message> = user.iter().map(|t| t.message).collect();

    let total_prompts = user.len() as u64;
    let total_responses = in_summer
        .iter()
        .filter(|t| t.message.role.is_assistant())
        .count() as u64;

    let lex = lexicons();
    let keywords = extract_keywords(
        &user_messages,
        lex,
        &KeywordOptions {
            top_n: opts.top_keywords,
            boost: opts.aliases.iter().map(|a| a.to_lowercase()).collect(),
        },
    );

    // 5) Daily buckets: (user count, all-role count) per UTC day
    let mut daily: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for tagged in &in_summer {
        let entry = daily.entry(tagged.at.date_naive()).or_insert((0, 0));
        if tagged.message.role.is_user() {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
    let unique_days = daily.len() as u64;

    // Busiest day: most user prompts, then most all-role messages, then
    // earliest date (strict comparisons over date-ascending iteration)
    let mut busiest_day: Option<BusiestDay> = None;
    for (&date, &(prompts, total)) in &daily {
        let better = match &busiest_day {
            None => true,
            Some(b) => prompts > b.prompts || (prompts == b.prompts && total > b.total),
        };
        if better {
            busiest_day = Some(BusiestDay { date, prompts, total });
        }
    }

    // 6) Longest streak of consecutive days with >=1 user prompt
    let mut longest_streak = 0u64;
    let mut current = 0u64;
    let mut prev: Option<NaiveDate> = None;
    for (&date, &(prompts, _)) in &daily {
        if prompts == 0 {
            prev = None;
            current = 0;
            continue;
        }
        current = match prev {
            Some(p) if p.succ_opt() == Some(date) => current + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(current);
        prev = Some(date);
    }

    // Topics over user prompts, first-seen tie order
    let mut topic_index: HashMap<&'static str, usize> = HashMap::new();
    let mut topics: Vec<NamedCount> = Vec::new();
    for tagged in &user {
        for label in classify(&tokenize(&tagged.message.text), TOPIC_RULES) {
            match topic_index.get(label) {
                Some(&i) => topics[i].value += 1,
                None => {
                    topic_index.insert(label, topics.len());
                    topics.push(NamedCount {
                        name: label.to_string(),
                        value: 1,
                    });
                }
            }
        }
    }
    topics.sort_by(|a, b| b.value.cmp(&a.value));

    // 7) Weekly buckets, keyed by the Monday of each week
    let mut weeks: BTreeMap<String, u64> = BTreeMap::new();
    for tagged in &user {
        let day = tagged.at.date_naive();
        let monday = day - Days::new(u64::from(day.weekday().num_days_from_monday()));
        let label = format!("Week of {}", monday.format("%m-%d"));
        *weeks.entry(label).or_insert(0) += 1;
    }
    let week_buckets: Vec<WeekBucket> = weeks
        .into_iter()
        .map(|(label, count)| WeekBucket { label, count })
        .collect();

    // 8) Longest thread by all-role turns, first-seen id wins ties
    let mut thread_index: HashMap<&str, usize> = HashMap::new();
    let mut thread_turns: Vec<ThreadSummary> = Vec::new();
    for tagged in &in_summer {
        match thread_index.get(tagged.thread_id) {
            Some(&i) => thread_turns[i].turns += 1,
            None => {
                thread_index.insert(tagged.thread_id, thread_turns.len());
                thread_turns.push(ThreadSummary {
                    id: tagged.thread_id.to_string(),
                    title: tagged.thread_title.to_string(),
                    turns: 1,
                });
            }
        }
    }
    let mut longest_thread: Option<&ThreadSummary> = None;
    for summary in &thread_turns {
        if longest_thread.map_or(true, |best| summary.turns > best.turns) {
            longest_thread = Some(summary);
        }
    }

    // 9-11) Time saved, accomplishments, emotions, persona, roast
    let time_saved_minutes = estimate_time_saved(&user_messages, lex);
    let accomplishments: Vec<Accomplishment> = mine_accomplishments(&user_messages);
    let emotions = analyze_emotions(&user_messages, lex);
    let persona = build_persona(&topics, total_prompts, longest_streak);
    let roast = build_roast(
        &topics,
        longest_streak,
        emotions.panic_count,
        emotions.lol_count,
    );

    debug!(
        year,
        total_prompts, unique_days, longest_streak, "summer metrics computed"
    );

    SummerMetrics {
        year,
        start_date: window.start_date(),
        end_date: window.end_date(),
        total_prompts,
        total_responses,
        unique_days,
        longest_streak,
        busiest_day,
        topics,
        week_buckets,
        keywords,
        emotions,
        longest_thread: longest_thread.cloned(),
        time_saved_minutes,
        accomplishments,
        persona,
        roast,
    }
}

/// Pick the year whose June-August span holds the most messages,
/// breaking ties by the earliest year. Falls back to the year of the
/// earliest message when nothing lands in any summer.
fn resolve_year(all: &[Tagged]) -> i32 {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for tagged in all {
        if (6..=8).contains(&tagged.at.month()) {
            *by_year.entry(tagged.at.year()).or_insert(0) += 1;
        }
    }

    let mut best: Option<(i32, u64)> = None;
    for (&year, &count) in &by_year {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((year, count));
        }
    }

    best.map(|(year, _)| year).unwrap_or_else(|| {
        all.iter()
            .map(|t| t.at)
            .min()
            .map(|at| at.year())
            .unwrap_or(0)
    })
}
