use super::*;
use chrono::Datelike;

/// Ordered, human-readable slot labels.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Calendar(Vec<String>);

impl Calendar {
    /// Three whole days.
    pub fn days() -> Self {
        Self::from(vec!["Mon", "Tue", "Wed"])
    }
    /// Hourly slots from 09:00 to 17:00 on the five weekdays after `start`.
    pub fn workweek(start: chrono::NaiveDate) -> Self {
        Self(
            start
                .iter_days()
                .skip(1)
                .filter(|day| day.weekday().num_days_from_monday() < 5)
                .take(5)
                .flat_map(|day| {
                    (9..17).map(move |h| format!("{} {:02}:00-{:02}:00", day.format("%a %Y-%m-%d"), h, h + 1))
                })
                .collect(),
        )
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        (0..self.0.len()).map(Slot::from)
    }
    pub fn labels(&self) -> &[String] {
        &self.0
    }
    pub fn contains(&self, slot: Slot) -> bool {
        slot.index() < self.0.len()
    }
    pub fn label(&self, slot: Slot) -> &str {
        self.0.get(slot.index()).map(String::as_str).unwrap_or("?")
    }
    /// The slot whose label is exactly `label`, ignoring case and padding.
    pub fn find(&self, label: &str) -> Option<Slot> {
        let label = label.trim();
        self.0
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .map(Slot::from)
    }
    /// The first slot, in calendar order, whose label appears anywhere in `text`.
    pub fn mention(&self, text: &str) -> Option<Slot> {
        let text = text.to_lowercase();
        self.0
            .iter()
            .position(|l| text.contains(&l.to_lowercase()))
            .map(Slot::from)
    }
    /// Resolves a list of labels, failing on the first unknown one.
    pub fn resolve<'a>(&self, labels: impl IntoIterator<Item = &'a String>) -> anyhow::Result<Vec<Slot>> {
        labels
            .into_iter()
            .map(|l| self.find(l).ok_or_else(|| anyhow::anyhow!("unknown slot {:?}", l)))
            .collect()
    }
}

impl From<Vec<&str>> for Calendar {
    fn from(labels: Vec<&str>) -> Self {
        Self(labels.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for Calendar {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workweek_skips_weekends() {
        let friday = chrono::NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let calendar = Calendar::workweek(friday);
        assert_eq!(calendar.len(), 40);
        assert_eq!(calendar.labels()[0], "Mon 2024-06-03 09:00-10:00");
        assert_eq!(calendar.labels()[39], "Fri 2024-06-07 16:00-17:00");
    }

    #[test]
    fn workweek_starts_the_day_after() {
        let monday = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let calendar = Calendar::workweek(monday);
        assert_eq!(calendar.labels()[0], "Tue 2024-06-04 09:00-10:00");
        assert_eq!(calendar.labels()[39], "Mon 2024-06-10 16:00-17:00");
    }

    #[test]
    fn lookups() {
        let calendar = Calendar::days();
        assert_eq!(calendar.find(" wed "), Some(Slot::from(2)));
        assert_eq!(calendar.find("Thu"), None);
        assert_eq!(calendar.mention("How about Tuesday? Or Mon."), Some(Slot::from(0)));
        assert_eq!(calendar.mention("nothing works"), None);
        assert_eq!(calendar.label(Slot::from(1)), "Tue");
    }
}
