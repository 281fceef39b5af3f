use super::*;
use crate::*;
use anyhow::Context;
use rand::Rng;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Where a scenario's slot labels come from.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Dates {
    Labels(Vec<String>),
    Workweek { workweek: chrono::NaiveDate },
}

impl From<&Dates> for Calendar {
    fn from(dates: &Dates) -> Self {
        match dates {
            Dates::Labels(labels) => Calendar::from(labels.clone()),
            Dates::Workweek { workweek } => Calendar::workweek(*workweek),
        }
    }
}

/// A seat as written in a scenario file, with slots named by label.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Delegate {
    pub name: String,
    pub availability: Vec<String>,
    #[serde(default)]
    pub valuations: BTreeMap<String, Utility>,
}

/// Serializable description of a meeting.
///
/// ```json
/// {
///   "calendar": {"workweek": "2024-05-31"},
///   "seats": [{"name": "Ann", "availability": ["Mon 2024-06-03 09:00-10:00"], "valuations": {}}],
///   "rounds": 5,
///   "bonus": 100.0,
///   "protocol": "public"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub calendar: Dates,
    pub seats: Vec<Delegate>,
    pub rounds: usize,
    #[serde(default)]
    pub bonus: Utility,
    #[serde(default)]
    pub protocol: Protocol,
}

impl Scenario {
    /// Bob and Suzy pick one of three days over three rounds.
    pub fn classic() -> Self {
        let values = |mon: Utility, tue: Utility, wed: Utility| {
            BTreeMap::from([
                (String::from("Mon"), mon),
                (String::from("Tue"), tue),
                (String::from("Wed"), wed),
            ])
        };
        Self {
            calendar: Dates::Labels(Calendar::days().labels().to_vec()),
            seats: vec![
                Delegate {
                    name: String::from("Bob"),
                    availability: vec![String::from("Mon"), String::from("Wed")],
                    valuations: values(5., 0., 3.),
                },
                Delegate {
                    name: String::from("Suzy"),
                    availability: vec![String::from("Tue"), String::from("Wed")],
                    valuations: values(0., 4., 2.),
                },
            ],
            rounds: 3,
            bonus: 0.,
            protocol: Protocol::Letter,
        }
    }

    /// Three seats with overlapping windows over a 40-slot workweek.
    pub fn conference(start: chrono::NaiveDate) -> Self {
        Self::overlapping(start, [0..15, 10..30, 25..40], 0., Protocol::Private)
    }

    /// Like [`Scenario::conference`] but with wider windows, public
    /// preferences, and a large bonus for agreeing at all.
    pub fn perfect(start: chrono::NaiveDate) -> Self {
        Self::overlapping(start, [0..20, 10..30, 15..40], UNANIMOUS_BONUS, Protocol::Public)
    }

    fn overlapping(
        start: chrono::NaiveDate,
        windows: [std::ops::Range<usize>; 3],
        bonus: Utility,
        protocol: Protocol,
    ) -> Self {
        let ref calendar = Calendar::workweek(start);
        let labels = calendar.labels();
        Self {
            calendar: Dates::Workweek { workweek: start },
            seats: windows
                .into_iter()
                .enumerate()
                .map(|(seat, window)| Delegate {
                    name: Seat::from(seat).to_string(),
                    availability: labels[window].to_vec(),
                    valuations: labels
                        .iter()
                        .enumerate()
                        .map(|(i, label)| (label.clone(), ((i + seat + 1) % 5 + 1) as Utility))
                        .collect(),
                })
                .collect(),
            rounds: 5,
            bonus,
            protocol,
        }
    }

    /// A random private meeting over a workweek.
    ///
    /// Every seat shares one common window, so agreement is always possible,
    /// and adds a window of its own. Available slots get valuations in 1..=10.
    pub fn random(start: chrono::NaiveDate, seats: usize, rng: &mut impl Rng) -> Self {
        let ref calendar = Calendar::workweek(start);
        let labels = calendar.labels();
        let n = labels.len();
        let width = rng.random_range(1..=4);
        let shared = rng.random_range(0..=n - width);
        Self {
            calendar: Dates::Workweek { workweek: start },
            seats: (0..seats)
                .map(|seat| {
                    let extra = rng.random_range(2..=10);
                    let from = rng.random_range(0..=n - extra);
                    let slots = (shared..shared + width)
                        .chain(from..from + extra)
                        .collect::<BTreeSet<_>>();
                    Delegate {
                        name: Seat::from(seat).to_string(),
                        availability: slots.iter().map(|i| labels[*i].clone()).collect(),
                        valuations: slots
                            .iter()
                            .map(|i| (labels[*i].clone(), rng.random_range(1..=10) as Utility))
                            .collect(),
                    }
                })
                .collect(),
            rounds: 5,
            bonus: 0.,
            protocol: Protocol::Private,
        }
    }

    /// A built-in scenario by name, or a JSON file by path.
    /// Workweek built-ins start after today.
    pub fn named(name: &str) -> anyhow::Result<Self> {
        let today = chrono::Local::now().date_naive();
        match name {
            "classic" => Ok(Self::classic()),
            "conference" => Ok(Self::conference(today)),
            "perfect" => Ok(Self::perfect(today)),
            path => Self::load(path),
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path).with_context(|| format!("open scenario {}", path))?;
        serde_json::from_reader(std::io::BufReader::new(file)).with_context(|| format!("parse scenario {}", path))
    }

    /// Resolves labels against the calendar and validates the result.
    pub fn build(&self) -> anyhow::Result<Meeting> {
        let calendar = Calendar::from(&self.calendar);
        let attendees = self
            .seats
            .iter()
            .map(|delegate| {
                let availability = calendar
                    .resolve(delegate.availability.iter())
                    .with_context(|| format!("availability of {}", delegate.name))?;
                let valuations = delegate
                    .valuations
                    .iter()
                    .map(|(label, value)| {
                        calendar
                            .find(label)
                            .map(|slot| (slot, *value))
                            .ok_or_else(|| anyhow::anyhow!("{} values unknown slot {:?}", delegate.name, label))
                    })
                    .collect::<anyhow::Result<BTreeMap<_, _>>>()?;
                Ok(Attendee {
                    name: delegate.name.clone(),
                    availability,
                    valuations,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Meeting::new(calendar, attendees, self.rounds, self.bonus, self.protocol)
    }
}
