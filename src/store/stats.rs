//! Dashboard aggregation.

use super::interaction::{Interaction, InteractionType, Sentiment};
use chrono::{Duration, NaiveDate};

/// How many recent interactions the dashboard lists.
pub const RECENT_LIMIT: usize = 5;

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    /// Interactions dated within the last seven days (today included)
    pub this_week: usize,
    pub pending_follow_ups: usize,
    /// Count per type, in [`InteractionType::ALL`] order
    pub by_type: Vec<(InteractionType, usize)>,
    /// Count per sentiment, in [`Sentiment::ALL`] order
    pub by_sentiment: Vec<(Sentiment, usize)>,
    /// Ids of the most recent interactions, newest first
    pub recent: Vec<u64>,
}

impl DashboardStats {
    /// Aggregate `interactions`, which must already be sorted newest first.
    pub fn compute(interactions: &[&Interaction], today: NaiveDate) -> Self {
        let week_start = today - Duration::days(6);

        let by_type = InteractionType::ALL
            .iter()
            .map(|t| {
                let n = interactions
                    .iter()
                    .filter(|i| i.interaction_type == *t)
                    .count();
                (*t, n)
            })
            .collect();

        let by_sentiment = Sentiment::ALL
            .iter()
            .map(|s| (*s, interactions.iter().filter(|i| i.sentiment == *s).count()))
            .collect();

        Self {
            total: interactions.len(),
            this_week: interactions
                .iter()
                .filter(|i| i.date >= week_start && i.date <= today)
                .count(),
            pending_follow_ups: interactions
                .iter()
                .filter(|i| i.has_pending_follow_up())
                .count(),
            by_type,
            by_sentiment,
            recent: interactions.iter().take(RECENT_LIMIT).map(|i| i.id).collect(),
        }
    }

    /// Share of positive interactions as a whole percentage, `None` when empty.
    pub fn positive_percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let positive = self
            .by_sentiment
            .iter()
            .find(|(s, _)| *s == Sentiment::Positive)
            .map(|(_, n)| *n)
            .unwrap_or(0);
        Some(((positive * 100 + self.total / 2) / self.total) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InteractionDraft, Store};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_empty_stats() {
        let store = Store::in_memory();
        let stats = store.stats(day(10));
        assert_eq!(stats.total, 0);
        assert_eq!(stats.positive_percent(), None);
        assert!(stats.recent.is_empty());
        assert_eq!(stats.by_type.len(), InteractionType::ALL.len());
    }

    #[test]
    fn test_counts() {
        let mut store = Store::in_memory();
        for (d, kind, sentiment, follow_up) in [
            (1, InteractionType::Call, Sentiment::Positive, None),
            (4, InteractionType::Call, Sentiment::Negative, Some("Call back")),
            (8, InteractionType::Email, Sentiment::Positive, Some("Send deck")),
            (10, InteractionType::Meeting, Sentiment::Neutral, None),
        ] {
            let mut draft = InteractionDraft::new(format!("Dr. {}", d), day(d));
            draft.interaction_type = kind;
            draft.sentiment = sentiment;
            draft.follow_up = follow_up.map(str::to_string);
            store.add(draft).unwrap();
        }
        store.toggle_follow_up(2).unwrap();

        let stats = store.stats(day(10));
        assert_eq!(stats.total, 4);
        // May 4..=10
        assert_eq!(stats.this_week, 3);
        assert_eq!(stats.pending_follow_ups, 1);
        assert!(stats.by_type.contains(&(InteractionType::Call, 2)));
        assert!(stats.by_type.contains(&(InteractionType::Conference, 0)));
        assert_eq!(stats.positive_percent(), Some(50));
        assert_eq!(stats.recent, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_recent_is_capped() {
        let mut store = Store::in_memory();
        for d in 1..=8 {
            store.add(InteractionDraft::new("Dr. X", day(d))).unwrap();
        }
        assert_eq!(store.stats(day(8)).recent.len(), RECENT_LIMIT);
    }
}
