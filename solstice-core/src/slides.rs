//! Slide deck construction
//!
//! Projects a [`SummerMetrics`] record into an ordered list of
//! presentation-agnostic slide descriptors. Pure formatting: the core
//! populates [`SlideDescriptor`] but never interprets what a `kind`
//! means to the renderer. Optional slides are present exactly when
//! their backing metric is non-empty; ordering is fixed.

use crate::analytics::{SummerMetrics, GENERAL_TOPIC};
use crate::types::NamedCount;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Slide kinds understood by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    FullCover,
    Stat,
    Pie,
    List,
    Chart,
    Text,
    Photo,
    Video,
}

/// One entry of a list or pie slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideItem {
    pub name: String,
    /// Numeric weight (pie slides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    /// Pre-formatted detail text (list slides)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
}

impl SlideItem {
    fn weighted(name: &str, value: u64) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            count: None,
        }
    }

    fn detailed(name: &str, count: String) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            count: Some(count),
        }
    }
}

/// One point of a chart slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

/// A presentation-agnostic slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescriptor {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SlideKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SlideItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Vec<ChartPoint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

fn slide(id: &str, title: &str, kind: SlideKind) -> SlideDescriptor {
    SlideDescriptor {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        content: None,
        subtext: None,
        items: None,
        chart_data: None,
        image: None,
        video_url: None,
    }
}

const COVER_IMAGE: &str = "https://images.pexels.com/photos/3052361/pexels-photo-3052361.jpeg";

/// Build the ordered slide deck for a metrics record.
pub fn build_summer_slides(metrics: &SummerMetrics) -> Vec<SlideDescriptor> {
    let subrange = format!(
        "{}\u{2013}{}, {}",
        fmt_md(metrics.start_date),
        fmt_md(metrics.end_date),
        metrics.end_date.year()
    );

    let mut slides: Vec<SlideDescriptor> = Vec::new();

    let cover_copy = if metrics.total_prompts > 0 {
        format!("A quick look at your summer of conversations.\n{}", subrange)
    } else {
        format!("We didn't find summer prompts in your export.\n{}", subrange)
    };
    slides.push(SlideDescriptor {
        content: Some(cover_copy),
        image: Some(COVER_IMAGE.to_string()),
        ..slide("cover", "Your Summer Wrapped", SlideKind::FullCover)
    });

    slides.push(SlideDescriptor {
        content: Some(group_thousands(metrics.total_prompts)),
        subtext: Some(format!("Prompts you sent, {}", subrange)),
        ..slide("prompts", "Total Prompts", SlideKind::Stat)
    });

    slides.push(SlideDescriptor {
        content: Some(metrics.unique_days.to_string()),
        subtext: Some("Days you showed up this summer".to_string()),
        ..slide("active-days", "Active Days", SlideKind::Stat)
    });

    slides.push(SlideDescriptor {
        content: Some(format!(
            "{} day{}",
            metrics.longest_streak,
            plural(metrics.longest_streak)
        )),
        subtext: Some("Consecutive days you showed up".to_string()),
        ..slide("streak", "Longest Streak", SlideKind::Stat)
    });

    if let Some(busiest) = &metrics.busiest_day {
        slides.push(SlideDescriptor {
            content: Some(format!(
                "{} prompt{}",
                busiest.prompts,
                plural(busiest.prompts)
            )),
            subtext: Some(format!("on {}", fmt_wmd(busiest.date))),
            ..slide("busiest", "Busiest Day", SlideKind::Stat)
        });
    }

    slides.push(SlideDescriptor {
        subtext: Some("Topic distribution".to_string()),
        items: Some(topic_items(&metrics.topics)),
        ..slide("topics-pie", "What You Worked On", SlideKind::Pie)
    });

    slides.push(SlideDescriptor {
        items: Some(
            if metrics.topics.is_empty() {
                vec![SlideItem::detailed(GENERAL_TOPIC, "\u{2014} 1x".to_string())]
            } else {
                metrics
                    .topics
                    .iter()
                    .take(6)
                    .map(|t| SlideItem::detailed(&t.name, format!("\u{2014} {}x", t.value)))
                    .collect()
            },
        ),
        subtext: Some("Based on your summer prompts".to_string()),
        ..slide("topics-list", "Top Topics", SlideKind::List)
    });

    if !metrics.keywords.is_empty() {
        slides.push(SlideDescriptor {
            subtext: Some("What you brought up the most".to_string()),
            items: Some(
                metrics
                    .keywords
                    .iter()
                    .map(|k| SlideItem::weighted(&k.name, k.value))
                    .collect(),
            ),
            ..slide("keywords-pie", "Most-used Keywords", SlideKind::Pie)
        });
        slides.push(SlideDescriptor {
            items: Some(
                metrics
                    .keywords
                    .iter()
                    .take(10)
                    .map(|k| SlideItem::detailed(&k.name, format!("\u{2014} {}x", k.value)))
                    .collect(),
            ),
            subtext: Some("Based on your summer prompts".to_string()),
            ..slide("keywords-list", "Top Keywords", SlideKind::List)
        });
    }

    if !metrics.week_buckets.is_empty() {
        slides.push(SlideDescriptor {
            chart_data: Some(
                metrics
                    .week_buckets
                    .iter()
                    .map(|w| ChartPoint {
                        label: w.label.clone(),
                        value: w.count as i64,
                    })
                    .collect(),
            ),
            content: Some(format!(
                "Your prompt volume by week ({} \u{2192} {})",
                fmt_mdy(metrics.start_date),
                fmt_mdy(metrics.end_date)
            )),
            ..slide("weekly", "Weekly Activity", SlideKind::Chart)
        });
    }

    if let Some(thread) = &metrics.longest_thread {
        slides.push(SlideDescriptor {
            items: Some(vec![SlideItem::detailed(
                &thread.title,
                format!("\u{2014} {} turn{}", thread.turns, plural(thread.turns)),
            )]),
            subtext: Some("Your longest summer thread".to_string()),
            ..slide("thread", "Deepest Dive", SlideKind::List)
        });
    }

    if metrics.time_saved_minutes > 0 {
        slides.push(SlideDescriptor {
            content: Some(format!("~{}", fmt_minutes(metrics.time_saved_minutes))),
            subtext: Some("Rough estimate of time you got back".to_string()),
            ..slide("time-saved", "Time Saved", SlideKind::Stat)
        });
    }

    if !metrics.accomplishments.is_empty() {
        slides.push(SlideDescriptor {
            items: Some(
                metrics
                    .accomplishments
                    .iter()
                    .map(|a| SlideItem::detailed(&a.label, format!("\u{2014} {}", fmt_md(a.date))))
                    .collect(),
            ),
            subtext: Some("Receipts from your own messages".to_string()),
            ..slide("accomplishments", "Things You Shipped", SlideKind::List)
        });
    }

    if !metrics.emotions.daily_scores.is_empty() {
        slides.push(SlideDescriptor {
            chart_data: Some(
                metrics
                    .emotions
                    .daily_scores
                    .iter()
                    .map(|d| ChartPoint {
                        label: d.date.format("%m-%d").to_string(),
                        value: d.score,
                    })
                    .collect(),
            ),
            content: Some(format!(
                "{} panic spike{}, {} laugh{}",
                metrics.emotions.panic_count,
                plural(metrics.emotions.panic_count),
                metrics.emotions.lol_count,
                plural(metrics.emotions.lol_count)
            )),
            ..slide("mood", "Mood Curve", SlideKind::Chart)
        });
    }

    let tags = metrics
        .persona
        .tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join("  ");
    slides.push(SlideDescriptor {
        content: Some(format!("{}\n\n{}", metrics.persona.blurb, tags)),
        subtext: Some("Shareable vibe snapshot".to_string()),
        ..slide("persona", "Your Summer Persona", SlideKind::Text)
    });

    if !metrics.roast.is_empty() {
        slides.push(SlideDescriptor {
            content: Some(metrics.roast.clone()),
            subtext: Some("With love".to_string()),
            ..slide("roast", "The Roast", SlideKind::Text)
        });
    }

    slides.push(SlideDescriptor {
        content: Some(
            "Export this as a clip or keep iterating with more inputs.".to_string(),
        ),
        subtext: Some("All processing stayed on your machine.".to_string()),
        ..slide("outro", "Nice work \u{2728}", SlideKind::Text)
    });

    slides
}

fn topic_items(topics: &[NamedCount]) -> Vec<SlideItem> {
    if topics.is_empty() {
        vec![SlideItem::weighted(GENERAL_TOPIC, 1)]
    } else {
        topics
            .iter()
            .map(|t| SlideItem::weighted(&t.name, t.value))
            .collect()
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// "Jun 1"
fn fmt_md(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "Jun 1, 2024"
fn fmt_mdy(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Tue, Jul 2"
fn fmt_wmd(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "1234567" -> "1,234,567"
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "90" -> "1h 30m", "45" -> "45m"
fn fmt_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{BusiestDay, SummerMetrics};

    fn ids(slides: &[SlideDescriptor]) -> Vec<&str> {
        slides.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_empty_metrics_deck() {
        let slides = build_summer_slides(&SummerMetrics::empty(2024));
        assert_eq!(
            ids(&slides),
            vec![
                "cover",
                "prompts",
                "active-days",
                "streak",
                "topics-pie",
                "topics-list",
                "persona",
                "outro"
            ]
        );
        // cover explains the missing data
        assert!(slides[0].content.as_ref().unwrap().contains("didn't find"));
        // the pie still renders a General placeholder
        let pie = &slides[4];
        assert_eq!(pie.items.as_ref().unwrap()[0].name, "General");
    }

    #[test]
    fn test_optional_slides_follow_their_metrics() {
        let mut metrics = SummerMetrics::empty(2024);
        metrics.total_prompts = 3;
        metrics.busiest_day = Some(BusiestDay {
            date: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
            prompts: 2,
            total: 4,
        });
        metrics.time_saved_minutes = 90;
        metrics.roast = "gentle roast".to_string();

        let slides = build_summer_slides(&metrics);
        let ids = ids(&slides);
        assert!(ids.contains(&"busiest"));
        assert!(ids.contains(&"time-saved"));
        assert!(ids.contains(&"roast"));
        assert!(!ids.contains(&"weekly"));
        assert!(!ids.contains(&"keywords-pie"));

        let busiest = slides.iter().find(|s| s.id == "busiest").unwrap();
        assert_eq!(busiest.content.as_deref(), Some("2 prompts"));
        assert_eq!(busiest.subtext.as_deref(), Some("on Tue, Jul 2"));

        let saved = slides.iter().find(|s| s.id == "time-saved").unwrap();
        assert_eq!(saved.content.as_deref(), Some("~1h 30m"));
    }

    #[test]
    fn test_slide_kind_serialization() {
        let value = serde_json::to_value(slide("x", "X", SlideKind::FullCover)).unwrap();
        assert_eq!(value["type"], "full-cover");
        assert_eq!(value["id"], "x");
        // omitted optionals don't serialize
        assert!(value.get("content").is_none());
        assert!(value.get("videoUrl").is_none());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(fmt_minutes(45), "45m");
        assert_eq!(fmt_minutes(125), "2h 5m");
        assert_eq!(fmt_md(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()), "Jun 1");
        assert_eq!(
            fmt_wmd(NaiveDate::from_ymd_opt(2024, 7, 2).unwrap()),
            "Tue, Jul 2"
        );
    }
}
